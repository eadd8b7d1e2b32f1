use serde_json::json;
use tracing::info;

use super::{CopyStatus, GradingEngine};
use crate::errors::{GradingError, Result};
use crate::models::{copies::entities::ExamCopy, users::entities::UserRole};
use crate::notifications::{NotificationKind, dispatch};

/// 登记一份答卷；同一考生同一科目只允许一份，已发布成绩的考生不再登记
pub(super) async fn register_copy(
    engine: &GradingEngine,
    candidate_id: i64,
    module_id: i64,
) -> Result<ExamCopy> {
    engine
        .load_user_with_role(candidate_id, UserRole::Candidate)
        .await?;
    engine
        .storage
        .get_module_by_id(module_id)
        .await?
        .ok_or_else(|| GradingError::not_found(format!("科目 {module_id} 不存在")))?;

    if engine
        .storage
        .get_result_by_candidate(candidate_id)
        .await?
        .is_some()
    {
        return Err(GradingError::not_eligible(format!(
            "考生 {candidate_id} 的成绩已发布"
        )));
    }

    let duplicate = engine
        .storage
        .list_copies_by_candidate(candidate_id)
        .await?
        .into_iter()
        .any(|copy| copy.module_id == module_id);
    if duplicate {
        return Err(GradingError::not_eligible(format!(
            "考生 {candidate_id} 在科目 {module_id} 已有答卷"
        )));
    }

    let copy = engine.storage.create_copy(candidate_id, module_id).await?;
    info!(
        "登记答卷 {}（考生 {}，科目 {}）",
        copy.id, candidate_id, module_id
    );
    Ok(copy)
}

pub(super) async fn assign_primary(
    engine: &GradingEngine,
    copy_id: i64,
    teacher1_id: i64,
    teacher2_id: i64,
) -> Result<ExamCopy> {
    if teacher1_id == teacher2_id {
        return Err(GradingError::validation("两位初评教师不能是同一人"));
    }

    let copy = engine.load_copy(copy_id).await?;
    let status = engine.status_of(&copy);
    if status != CopyStatus::Unassigned {
        return Err(GradingError::not_eligible(format!(
            "答卷 {} 当前状态为 {}，不能分配初评教师",
            copy_id,
            status.state()
        )));
    }

    let teacher1 = engine
        .load_user_with_role(teacher1_id, UserRole::Teacher)
        .await?;
    let teacher2 = engine
        .load_user_with_role(teacher2_id, UserRole::Teacher)
        .await?;

    let applied = engine
        .storage
        .assign_primary_teachers(copy_id, teacher1_id, teacher2_id, copy.version)
        .await?;
    if !applied {
        return Err(GradingError::conflict(format!(
            "答卷 {copy_id} 已被其他请求修改，请刷新后重试"
        )));
    }

    info!(
        "答卷 {} 已分配初评教师 {} 与 {}",
        copy_id, teacher1_id, teacher2_id
    );

    for teacher in [&teacher1, &teacher2] {
        dispatch(
            engine.notifier.as_ref(),
            &teacher.email,
            NotificationKind::TeacherAssigned,
            json!({
                "name": teacher.full_name(),
                "copies": 1,
                "copy_id": copy_id,
            }),
        )
        .await;
    }

    engine.load_copy(copy_id).await
}

pub(super) async fn assign_arbitrator(
    engine: &GradingEngine,
    copy_id: i64,
    teacher3_id: i64,
) -> Result<ExamCopy> {
    let copy = engine.load_copy(copy_id).await?;

    if copy.teacher3_id.is_some() {
        return Err(GradingError::not_eligible(format!(
            "答卷 {copy_id} 已有仲裁教师"
        )));
    }
    let status = engine.status_of(&copy);
    if status != CopyStatus::RequiresArbitration {
        return Err(GradingError::not_eligible(format!(
            "答卷 {} 当前状态为 {}，无需仲裁",
            copy_id,
            status.state()
        )));
    }

    if copy.teacher1_id == Some(teacher3_id) || copy.teacher2_id == Some(teacher3_id) {
        return Err(GradingError::validation("仲裁教师不能是初评教师"));
    }

    let teacher3 = engine
        .load_user_with_role(teacher3_id, UserRole::Teacher)
        .await?;

    let applied = engine
        .storage
        .assign_arbitrator(copy_id, teacher3_id, copy.version)
        .await?;
    if !applied {
        return Err(GradingError::conflict(format!(
            "答卷 {copy_id} 已被其他请求修改，请刷新后重试"
        )));
    }

    info!("答卷 {} 已分配仲裁教师 {}", copy_id, teacher3_id);

    dispatch(
        engine.notifier.as_ref(),
        &teacher3.email,
        NotificationKind::ArbitratorAssigned,
        json!({
            "name": teacher3.full_name(),
            "copies": 1,
            "copy_id": copy_id,
        }),
    )
    .await;

    engine.load_copy(copy_id).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::test_support::Fixture;
    use crate::errors::GradingError;
    use crate::models::users::entities::UserRole;
    use crate::notifications::{NotificationKind, testing::FailingNotifier};

    #[tokio::test]
    async fn test_register_copy_once_per_module() {
        let fx = Fixture::new().await;
        let copy = fx
            .engine
            .register_copy(fx.candidate.id, fx.module_a.id)
            .await
            .unwrap();
        assert_eq!(copy.version, 0);
        assert!(copy.teacher1_id.is_none());

        let err = fx
            .engine
            .register_copy(fx.candidate.id, fx.module_a.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::NotEligible(_)));

        let err = fx
            .engine
            .register_copy(fx.teacher1.id, fx.module_b.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::Validation(_)));

        let err = fx
            .engine
            .register_copy(fx.candidate.id, 9999)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_assign_primary_notifies_both_teachers() {
        let fx = Fixture::new().await;
        let copy = fx.add_copy(&fx.candidate, &fx.module_a).await;

        let updated = fx
            .engine
            .assign_primary(copy.id, fx.teacher1.id, fx.teacher2.id)
            .await
            .unwrap();

        assert_eq!(updated.teacher1_id, Some(fx.teacher1.id));
        assert_eq!(updated.teacher2_id, Some(fx.teacher2.id));
        assert_eq!(updated.version, copy.version + 1);
        assert_eq!(
            fx.notifier.recipients(NotificationKind::TeacherAssigned),
            vec![fx.teacher1.email.clone(), fx.teacher2.email.clone()]
        );
    }

    #[tokio::test]
    async fn test_assign_primary_twice_not_eligible() {
        let fx = Fixture::new().await;
        let copy = fx.assigned_copy(&fx.candidate, &fx.module_a).await;

        let err = fx
            .engine
            .assign_primary(copy.id, fx.teacher2.id, fx.teacher3.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::NotEligible(_)));

        let unchanged = fx.copy(copy.id).await.unwrap();
        assert_eq!(unchanged.teacher1_id, Some(fx.teacher1.id));
    }

    #[tokio::test]
    async fn test_assign_primary_validates_teachers() {
        let fx = Fixture::new().await;
        let copy = fx.add_copy(&fx.candidate, &fx.module_a).await;

        let err = fx
            .engine
            .assign_primary(copy.id, fx.teacher1.id, fx.teacher1.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::Validation(_)));

        let err = fx
            .engine
            .assign_primary(copy.id, fx.teacher1.id, fx.candidate.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::Validation(_)));

        let err = fx
            .engine
            .assign_primary(copy.id, fx.teacher1.id, 9999)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::NotFound(_)));

        let untouched = fx.copy(copy.id).await.unwrap();
        assert_eq!(untouched.teacher1_id, None);
        assert_eq!(untouched.version, 0);
    }

    #[tokio::test]
    async fn test_assign_primary_unknown_copy() {
        let fx = Fixture::new().await;
        let err = fx
            .engine
            .assign_primary(4242, fx.teacher1.id, fx.teacher2.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_fail_assignment() {
        let fx = Fixture::new().await;
        let engine = fx.engine_with(Arc::new(FailingNotifier));
        let copy = fx.add_copy(&fx.candidate, &fx.module_a).await;

        let updated = engine
            .assign_primary(copy.id, fx.teacher1.id, fx.teacher2.id)
            .await
            .unwrap();
        assert_eq!(updated.teacher2_id, Some(fx.teacher2.id));
    }

    #[tokio::test]
    async fn test_arbitrator_requires_disagreement() {
        let fx = Fixture::new().await;
        let copy = fx.assigned_copy(&fx.candidate, &fx.module_a).await;

        // 尚未评分
        let err = fx
            .engine
            .assign_arbitrator(copy.id, fx.teacher3.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::NotEligible(_)));

        // 分差小于阈值，已定分
        fx.engine.submit_mark(copy.id, fx.teacher1.id, 14.0).await.unwrap();
        fx.engine.submit_mark(copy.id, fx.teacher2.id, 13.0).await.unwrap();
        let err = fx
            .engine
            .assign_arbitrator(copy.id, fx.teacher3.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::NotEligible(_)));
    }

    #[tokio::test]
    async fn test_arbitrator_assignment_once() {
        let fx = Fixture::new().await;
        let copy = fx.assigned_copy(&fx.candidate, &fx.module_a).await;
        fx.engine.submit_mark(copy.id, fx.teacher1.id, 8.0).await.unwrap();
        fx.engine.submit_mark(copy.id, fx.teacher2.id, 15.0).await.unwrap();

        let err = fx
            .engine
            .assign_arbitrator(copy.id, fx.teacher1.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::Validation(_)));

        let updated = fx
            .engine
            .assign_arbitrator(copy.id, fx.teacher3.id)
            .await
            .unwrap();
        assert_eq!(updated.teacher3_id, Some(fx.teacher3.id));
        assert_eq!(fx.notifier.count(NotificationKind::ArbitratorAssigned), 1);

        let other = fx.add_user("teacher4", UserRole::Teacher).await;
        let err = fx
            .engine
            .assign_arbitrator(copy.id, other.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::NotEligible(_)));
    }

    #[tokio::test]
    async fn test_arbitrator_unknown_copy() {
        let fx = Fixture::new().await;
        let err = fx
            .engine
            .assign_arbitrator(4242, fx.teacher3.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::NotFound(_)));
    }
}
