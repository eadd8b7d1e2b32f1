//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::copies::{Column as CopyColumn, Entity as Copies};
use crate::entity::results::{ActiveModel, Column, Entity as Results};
use crate::errors::{GradingError, Result};
use crate::models::results::entities::CandidateResult;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    pub async fn get_result_by_candidate_impl(
        &self,
        candidate_id: i64,
    ) -> Result<Option<CandidateResult>> {
        let result = Results::find()
            .filter(Column::CandidateId.eq(candidate_id))
            .one(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(result.map(|m| m.into_result()))
    }

    /// 按成绩从高到低列出
    pub async fn list_results_impl(&self) -> Result<Vec<CandidateResult>> {
        let results = Results::find()
            .order_by_desc(Column::Value)
            .order_by_asc(Column::CandidateId)
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_result()).collect())
    }

    /// 发布单个考生的成绩
    ///
    /// 写入成绩与删除答卷在同一事务内完成。`copies` 为 (答卷ID, 读取时的版本号)，
    /// 任何一份答卷被并发修改或该考生已有成绩时回滚并返回 `None`。
    pub async fn publish_candidate_result_impl(
        &self,
        candidate_id: i64,
        value: f64,
        accepted: bool,
        copies: &[(i64, i64)],
    ) -> Result<Option<CandidateResult>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradingError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Results::find()
            .filter(Column::CandidateId.eq(candidate_id))
            .one(&txn)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询成绩失败: {e}")))?;
        if existing.is_some() {
            debug!("考生 {} 已有成绩，跳过发布", candidate_id);
            txn.rollback()
                .await
                .map_err(|e| GradingError::database_operation(format!("回滚事务失败: {e}")))?;
            return Ok(None);
        }

        let model = ActiveModel {
            candidate_id: Set(candidate_id),
            value: Set(value),
            accepted: Set(accepted),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| GradingError::database_operation(format!("写入成绩失败: {e}")))?;

        for (copy_id, version) in copies {
            let deleted = Copies::delete_many()
                .filter(CopyColumn::Id.eq(*copy_id))
                .filter(CopyColumn::CandidateId.eq(candidate_id))
                .filter(CopyColumn::Version.eq(*version))
                .exec(&txn)
                .await
                .map_err(|e| GradingError::database_operation(format!("删除答卷失败: {e}")))?;

            if deleted.rows_affected == 0 {
                debug!("答卷 {} 在发布期间被修改，回滚考生 {}", copy_id, candidate_id);
                txn.rollback().await.map_err(|e| {
                    GradingError::database_operation(format!("回滚事务失败: {e}"))
                })?;
                return Ok(None);
            }
        }

        txn.commit()
            .await
            .map_err(|e| GradingError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(inserted.into_result()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        copies::entities::ExamCopy,
        modules::requests::CreateModuleRequest,
        users::{entities::UserRole, requests::CreateUserRequest},
    };
    use crate::storage::Storage;

    async fn storage_with_copy() -> (SeaOrmStorage, i64, ExamCopy) {
        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 10)
            .await
            .unwrap();
        let candidate = storage
            .create_user(CreateUserRequest {
                username: "cand1".to_string(),
                email: "cand1@example.com".to_string(),
                password: "not-a-real-hash".to_string(),
                role: UserRole::Candidate,
                display_name: None,
            })
            .await
            .unwrap();
        let module = storage
            .create_module(CreateModuleRequest {
                name: "Algorithmique".to_string(),
                description: None,
            })
            .await
            .unwrap();
        let copy = storage.create_copy(candidate.id, module.id).await.unwrap();
        (storage, candidate.id, copy)
    }

    #[tokio::test]
    async fn test_stale_copy_version_rolls_back() {
        let (storage, candidate_id, copy) = storage_with_copy().await;

        let published = storage
            .publish_candidate_result(candidate_id, 16.0, true, &[(copy.id, copy.version + 7)])
            .await
            .unwrap();
        assert!(published.is_none());

        assert!(
            storage
                .get_result_by_candidate(candidate_id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(storage.get_copy_by_id(copy.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_existing_result_rolls_back_and_keeps_copies() {
        let (storage, candidate_id, copy) = storage_with_copy().await;

        storage
            .publish_candidate_result(candidate_id, 12.0, true, &[])
            .await
            .unwrap()
            .unwrap();

        let again = storage
            .publish_candidate_result(candidate_id, 16.0, true, &[(copy.id, copy.version)])
            .await
            .unwrap();
        assert!(again.is_none());

        let results = storage.list_results().await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].value, 12.0);
        assert!(storage.get_copy_by_id(copy.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_publish_deletes_copies_with_matching_version() {
        let (storage, candidate_id, copy) = storage_with_copy().await;

        let result = storage
            .publish_candidate_result(candidate_id, 16.0, true, &[(copy.id, copy.version)])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result.candidate_id, candidate_id);
        assert!(storage.get_copy_by_id(copy.id).await.unwrap().is_none());
    }
}
