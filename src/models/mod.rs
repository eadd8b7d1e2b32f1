pub mod auth;
pub mod common;
pub mod copies;
pub mod modules;
pub mod results;
pub mod secret_codes;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间，注入 app_data 供健康检查等使用
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；1xxx 通用错误；2xxx 认证与用户；3xxx 科目；4xxx 匿名码；
/// 5xxx 答卷与阅卷；6xxx 成绩。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证与用户
    AuthFailed = 2000,
    UserNotFound = 2001,
    UserAlreadyExists = 2002,
    UserNameInvalid = 2003,
    UserEmailInvalid = 2004,
    UserPasswordInvalid = 2005,
    UserCreationFailed = 2006,
    UserDeleteFailed = 2007,
    CanNotDeleteCurrentUser = 2008,

    // 科目
    ModuleNotFound = 3001,
    ModuleAlreadyExists = 3002,
    ModuleNameInvalid = 3003,

    // 匿名码
    SecretCodeAlreadyAssigned = 4001,
    SecretCodeSpaceExhausted = 4002,

    // 答卷与阅卷
    CopyNotFound = 5001,
    CopyNotEligible = 5002,
    CopyConcurrentModification = 5003,
    MarkInvalid = 5004,

    // 成绩
    ResultNotFound = 6001,
}
