//! 预导入模块，方便使用

pub use super::copies::{ActiveModel as CopyActiveModel, Entity as Copies, Model as CopyModel};
pub use super::modules::{
    ActiveModel as ModuleActiveModel, Entity as Modules, Model as ModuleModel,
};
pub use super::results::{
    ActiveModel as ResultActiveModel, Entity as Results, Model as ResultModel,
};
pub use super::secret_codes::{
    ActiveModel as SecretCodeActiveModel, Entity as SecretCodes, Model as SecretCodeModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
