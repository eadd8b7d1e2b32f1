//! 阅卷协调引擎
//!
//! 答卷流转：未分配 -> 双评 -> 分差判定 -> 仲裁 -> 定分，
//! 定分后按考生汇总发布成绩。HTTP 层只做参数解析与响应包装，
//! 业务规则都在这里。

pub mod evaluator;
pub mod secret_code;

mod assignment;
mod codes;
mod marking;
mod publish;
mod views;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use crate::config::GradingConfig;
use crate::errors::{GradingError, Result};
use crate::models::{
    copies::{
        entities::{CopyState, ExamCopy, MarkSlot},
        requests::MarkSubmission,
        responses::{CopyView, SubmitMarksResponse, TeacherCopyView},
    },
    results::responses::{PublishReport, RankedResult},
    secret_codes::{entities::SecretCode, responses::SecretCodeView},
    users::entities::{User, UserRole},
};
use crate::notifications::Notifier;
use crate::storage::Storage;

pub use evaluator::CopyStatus;
pub use secret_code::SecretCodeGenerator;

#[derive(Clone)]
pub struct GradingEngine {
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    policy: GradingConfig,
}

impl GradingEngine {
    pub fn new(
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
        policy: GradingConfig,
    ) -> Self {
        Self {
            storage,
            notifier,
            policy,
        }
    }

    pub fn policy(&self) -> &GradingConfig {
        &self.policy
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// 按当前规则判定答卷状态
    pub fn status_of(&self, copy: &ExamCopy) -> CopyStatus {
        evaluator::evaluate(copy, self.policy.mark_difference_threshold)
    }

    // 匿名码
    pub async fn issue_code(&self, candidate_id: i64) -> Result<SecretCode> {
        codes::issue_code(self, candidate_id).await
    }

    pub async fn issue_codes_for_all(&self) -> Result<Vec<SecretCode>> {
        codes::issue_codes_for_all(self).await
    }

    pub async fn candidates_without_code(&self) -> Result<Vec<User>> {
        codes::candidates_without_code(self).await
    }

    // 答卷登记与分配
    pub async fn register_copy(&self, candidate_id: i64, module_id: i64) -> Result<ExamCopy> {
        assignment::register_copy(self, candidate_id, module_id).await
    }

    pub async fn assign_primary(
        &self,
        copy_id: i64,
        teacher1_id: i64,
        teacher2_id: i64,
    ) -> Result<ExamCopy> {
        assignment::assign_primary(self, copy_id, teacher1_id, teacher2_id).await
    }

    pub async fn assign_arbitrator(&self, copy_id: i64, teacher3_id: i64) -> Result<ExamCopy> {
        assignment::assign_arbitrator(self, copy_id, teacher3_id).await
    }

    // 评分
    pub async fn submit_mark(&self, copy_id: i64, grader_id: i64, mark: f64) -> Result<MarkSlot> {
        marking::submit_mark(self, copy_id, grader_id, mark).await
    }

    pub async fn submit_marks(
        &self,
        grader_id: i64,
        submissions: &[MarkSubmission],
    ) -> Result<SubmitMarksResponse> {
        marking::submit_marks(self, grader_id, submissions).await
    }

    // 发布
    pub async fn publish(&self) -> Result<PublishReport> {
        publish::publish(self).await
    }

    // 查询
    pub async fn copies_in_state(&self, state: Option<CopyState>) -> Result<Vec<CopyView>> {
        views::copies_in_state(self, state).await
    }

    pub async fn copies_for_teacher(&self, teacher_id: i64) -> Result<Vec<TeacherCopyView>> {
        views::copies_for_teacher(self, teacher_id).await
    }

    pub async fn issued_codes(&self) -> Result<Vec<SecretCodeView>> {
        views::issued_codes(self).await
    }

    pub async fn ranked_results(&self) -> Result<Vec<RankedResult>> {
        views::ranked_results(self).await
    }

    /// 读取用户并检查角色
    async fn load_user_with_role(&self, user_id: i64, role: UserRole) -> Result<User> {
        let user = self
            .storage
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| GradingError::not_found(format!("用户 {user_id} 不存在")))?;

        if user.role != role {
            return Err(GradingError::validation(format!(
                "用户 {} 的角色是 {}，需要 {}",
                user_id, user.role, role
            )));
        }
        Ok(user)
    }

    async fn load_copy(&self, copy_id: i64) -> Result<ExamCopy> {
        self.storage
            .get_copy_by_id(copy_id)
            .await?
            .ok_or_else(|| GradingError::not_found(format!("答卷 {copy_id} 不存在")))
    }
}
