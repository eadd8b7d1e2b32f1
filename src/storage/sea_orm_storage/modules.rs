//! 科目存储操作

use super::SeaOrmStorage;
use crate::entity::modules::{ActiveModel, Column, Entity as Modules};
use crate::errors::{GradingError, Result};
use crate::models::modules::{entities::Module, requests::CreateModuleRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_module_impl(&self, req: CreateModuleRequest) -> Result<Module> {
        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("创建科目失败: {e}")))?;

        Ok(result.into_module())
    }

    pub async fn get_module_by_id_impl(&self, id: i64) -> Result<Option<Module>> {
        let result = Modules::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_module()))
    }

    pub async fn list_modules_impl(&self) -> Result<Vec<Module>> {
        let modules = Modules::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(modules.into_iter().map(|m| m.into_module()).collect())
    }
}
