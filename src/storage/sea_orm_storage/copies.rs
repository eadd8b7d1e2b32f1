//! 答卷存储操作
//!
//! 所有修改答卷的写操作都带 `version = expected` 条件并把版本号加一，
//! `rows_affected == 0` 表示并发修改或前置条件不满足。

use super::SeaOrmStorage;
use crate::entity::copies::{ActiveModel, Column, Entity as Copies};
use crate::errors::{GradingError, Result};
use crate::models::copies::entities::{ExamCopy, MarkSlot};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 登记一份未分配的答卷
    pub async fn create_copy_impl(&self, candidate_id: i64, module_id: i64) -> Result<ExamCopy> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            candidate_id: Set(candidate_id),
            module_id: Set(module_id),
            teacher1_id: Set(None),
            teacher2_id: Set(None),
            teacher3_id: Set(None),
            mark1: Set(None),
            mark2: Set(None),
            mark3: Set(None),
            mark1_grader_id: Set(None),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("登记答卷失败: {e}")))?;

        Ok(result.into_copy())
    }

    pub async fn get_copy_by_id_impl(&self, id: i64) -> Result<Option<ExamCopy>> {
        let result = Copies::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询答卷失败: {e}")))?;

        Ok(result.map(|m| m.into_copy()))
    }

    pub async fn list_copies_impl(&self) -> Result<Vec<ExamCopy>> {
        let copies = Copies::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询答卷列表失败: {e}")))?;

        Ok(copies.into_iter().map(|m| m.into_copy()).collect())
    }

    pub async fn list_copies_by_candidate_impl(&self, candidate_id: i64) -> Result<Vec<ExamCopy>> {
        let copies = Copies::find()
            .filter(Column::CandidateId.eq(candidate_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询考生答卷失败: {e}")))?;

        Ok(copies.into_iter().map(|m| m.into_copy()).collect())
    }

    pub async fn list_copies_by_teacher_impl(&self, teacher_id: i64) -> Result<Vec<ExamCopy>> {
        let copies = Copies::find()
            .filter(
                Condition::any()
                    .add(Column::Teacher1Id.eq(teacher_id))
                    .add(Column::Teacher2Id.eq(teacher_id))
                    .add(Column::Teacher3Id.eq(teacher_id)),
            )
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("查询教师答卷失败: {e}")))?;

        Ok(copies.into_iter().map(|m| m.into_copy()).collect())
    }

    /// 设置两位初评教师
    pub async fn assign_primary_teachers_impl(
        &self,
        copy_id: i64,
        teacher1_id: i64,
        teacher2_id: i64,
        expected_version: i64,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Copies::update_many()
            .col_expr(Column::Teacher1Id, Expr::value(teacher1_id))
            .col_expr(Column::Teacher2Id, Expr::value(teacher2_id))
            .col_expr(Column::Version, Expr::value(expected_version + 1))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(copy_id))
            .filter(Column::Version.eq(expected_version))
            .filter(Column::Mark1.is_null())
            .filter(Column::Mark2.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("分配阅卷教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 设置仲裁教师
    pub async fn assign_arbitrator_impl(
        &self,
        copy_id: i64,
        teacher3_id: i64,
        expected_version: i64,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Copies::update_many()
            .col_expr(Column::Teacher3Id, Expr::value(teacher3_id))
            .col_expr(Column::Version, Expr::value(expected_version + 1))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(copy_id))
            .filter(Column::Version.eq(expected_version))
            .filter(Column::Teacher3Id.is_null())
            .filter(Column::Mark3.is_null())
            .exec(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("分配仲裁教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 填写一个分数槽位
    pub async fn fill_mark_slot_impl(
        &self,
        copy_id: i64,
        slot: MarkSlot,
        mark: f64,
        grader_id: i64,
        expected_version: i64,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let mut update = Copies::update_many()
            .col_expr(Column::Version, Expr::value(expected_version + 1))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(copy_id))
            .filter(Column::Version.eq(expected_version));

        update = match slot {
            MarkSlot::First => update
                .col_expr(Column::Mark1, Expr::value(mark))
                .col_expr(Column::Mark1GraderId, Expr::value(grader_id))
                .filter(Column::Mark1.is_null()),
            MarkSlot::Second => update
                .col_expr(Column::Mark2, Expr::value(mark))
                .filter(Column::Mark1.is_not_null())
                .filter(Column::Mark2.is_null()),
            MarkSlot::Third => update
                .col_expr(Column::Mark3, Expr::value(mark))
                .filter(Column::Mark2.is_not_null())
                .filter(Column::Mark3.is_null())
                .filter(Column::Teacher3Id.eq(grader_id)),
        };

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| GradingError::database_operation(format!("写入分数失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
