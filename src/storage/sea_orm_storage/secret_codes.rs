//! 匿名码存储操作

use super::SeaOrmStorage;
use crate::entity::secret_codes::{ActiveModel, Column, Entity as SecretCodes};
use crate::errors::{GradingError, Result};
use crate::models::secret_codes::entities::SecretCode;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 保存匿名码，唯一索引保证内容与考生均不重复
    pub async fn create_secret_code_impl(
        &self,
        candidate_id: i64,
        content: &str,
    ) -> Result<SecretCode> {
        let model = ActiveModel {
            content: Set(content.to_string()),
            candidate_id: Set(candidate_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("保存匿名码失败: {e}")))?;

        Ok(result.into_secret_code())
    }

    pub async fn get_secret_code_by_candidate_impl(
        &self,
        candidate_id: i64,
    ) -> Result<Option<SecretCode>> {
        let result = SecretCodes::find()
            .filter(Column::CandidateId.eq(candidate_id))
            .one(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询匿名码失败: {e}")))?;

        Ok(result.map(|m| m.into_secret_code()))
    }

    pub async fn list_secret_codes_impl(&self) -> Result<Vec<SecretCode>> {
        let codes = SecretCodes::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询匿名码列表失败: {e}")))?;

        Ok(codes.into_iter().map(|m| m.into_secret_code()).collect())
    }
}
