use tracing::{debug, info};

use super::GradingEngine;
use crate::errors::{GradingError, Result};
use crate::models::copies::{
    entities::{ExamCopy, MarkSlot},
    requests::MarkSubmission,
    responses::{MarkOutcome, SubmitMarksResponse},
};
use crate::utils::validate::validate_mark;

/// 检查阅卷人能否填写下一个空位，返回该槽位
fn eligible_slot(copy: &ExamCopy, grader_id: i64) -> Result<MarkSlot> {
    if !copy.is_grader(grader_id) {
        return Err(GradingError::not_eligible(format!(
            "教师 {} 不是答卷 {} 的阅卷人",
            grader_id, copy.id
        )));
    }

    let slot = copy.next_empty_slot().ok_or_else(|| {
        GradingError::not_eligible(format!("答卷 {} 的三个分数均已填写", copy.id))
    })?;

    let is_primary = copy.teacher1_id == Some(grader_id) || copy.teacher2_id == Some(grader_id);
    match slot {
        MarkSlot::First | MarkSlot::Second if !is_primary => Err(GradingError::not_eligible(
            format!("答卷 {} 还在初评阶段，仲裁教师暂不能评分", copy.id),
        )),
        MarkSlot::Second if copy.mark1_grader_id == Some(grader_id) => {
            Err(GradingError::not_eligible(format!(
                "教师 {} 已为答卷 {} 评过分",
                grader_id, copy.id
            )))
        }
        MarkSlot::Third if copy.teacher3_id != Some(grader_id) => {
            Err(GradingError::not_eligible(format!(
                "答卷 {} 的第三个分数只能由仲裁教师填写",
                copy.id
            )))
        }
        _ => Ok(slot),
    }
}

/// 填写 mark1 -> mark2 -> mark3 中第一个空位
///
/// 写入以版本号做比较交换，并发冲突时重新读取后重试。
/// 三个分数均已填写时单次调用返回 `NotEligible`，调用方需要明确结果；
/// 批量接口 [`submit_marks`] 则把该项记为未更新后继续。
pub(super) async fn submit_mark(
    engine: &GradingEngine,
    copy_id: i64,
    grader_id: i64,
    mark: f64,
) -> Result<MarkSlot> {
    validate_mark(mark, engine.policy.max_mark).map_err(GradingError::validation)?;

    let mut retries = 0;
    loop {
        let copy = engine.load_copy(copy_id).await?;
        let slot = eligible_slot(&copy, grader_id)?;

        let applied = engine
            .storage
            .fill_mark_slot(copy_id, slot, mark, grader_id, copy.version)
            .await?;
        if applied {
            info!(
                "教师 {} 为答卷 {} 填写了第 {} 个分数",
                grader_id,
                copy_id,
                slot.number()
            );
            return Ok(slot);
        }

        retries += 1;
        if retries > engine.policy.mark_submit_retries {
            return Err(GradingError::conflict(format!(
                "答卷 {copy_id} 并发修改过多，请稍后重试"
            )));
        }
        debug!("答卷 {} 版本冲突，第 {} 次重试", copy_id, retries);
    }
}

/// 批量提交；未知答卷与不满足条件的条目跳过，不中断整批
pub(super) async fn submit_marks(
    engine: &GradingEngine,
    grader_id: i64,
    submissions: &[MarkSubmission],
) -> Result<SubmitMarksResponse> {
    // 先整体校验分数，任何一条不合法都不做修改
    for submission in submissions {
        validate_mark(submission.mark, engine.policy.max_mark).map_err(|e| {
            GradingError::validation(format!("答卷 {}: {e}", submission.copy_id))
        })?;
    }

    let mut updated = 0;
    let mut items = Vec::with_capacity(submissions.len());

    for submission in submissions {
        match submit_mark(engine, submission.copy_id, grader_id, submission.mark).await {
            Ok(slot) => {
                updated += 1;
                items.push(MarkOutcome::updated(submission.copy_id, slot));
            }
            Err(
                e @ (GradingError::NotFound(_)
                | GradingError::NotEligible(_)
                | GradingError::Conflict(_)),
            ) => {
                debug!("跳过答卷 {}: {}", submission.copy_id, e.message());
                items.push(MarkOutcome::skipped(submission.copy_id, e.message()));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(SubmitMarksResponse { updated, items })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use crate::errors::GradingError;
    use crate::models::copies::{entities::MarkSlot, requests::MarkSubmission};

    #[tokio::test]
    async fn test_marks_fill_slots_in_order() {
        let fx = Fixture::new().await;
        let copy = fx.assigned_copy(&fx.candidate, &fx.module_a).await;

        let slot = fx.engine.submit_mark(copy.id, fx.teacher2.id, 8.0).await.unwrap();
        assert_eq!(slot, MarkSlot::First);
        let slot = fx.engine.submit_mark(copy.id, fx.teacher1.id, 15.0).await.unwrap();
        assert_eq!(slot, MarkSlot::Second);

        fx.engine
            .assign_arbitrator(copy.id, fx.teacher3.id)
            .await
            .unwrap();
        let slot = fx.engine.submit_mark(copy.id, fx.teacher3.id, 10.0).await.unwrap();
        assert_eq!(slot, MarkSlot::Third);

        let stored = fx.copy(copy.id).await.unwrap();
        assert_eq!(stored.mark1, Some(8.0));
        assert_eq!(stored.mark2, Some(15.0));
        assert_eq!(stored.mark3, Some(10.0));
        assert_eq!(stored.mark1_grader_id, Some(fx.teacher2.id));
    }

    #[tokio::test]
    async fn test_same_grader_cannot_fill_both_primary_slots() {
        let fx = Fixture::new().await;
        let copy = fx.assigned_copy(&fx.candidate, &fx.module_a).await;

        fx.engine.submit_mark(copy.id, fx.teacher1.id, 12.0).await.unwrap();
        let err = fx
            .engine
            .submit_mark(copy.id, fx.teacher1.id, 12.5)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::NotEligible(_)));
        assert_eq!(fx.copy(copy.id).await.unwrap().mark2, None);
    }

    #[tokio::test]
    async fn test_outsider_cannot_submit() {
        let fx = Fixture::new().await;
        let copy = fx.assigned_copy(&fx.candidate, &fx.module_a).await;

        let err = fx
            .engine
            .submit_mark(copy.id, fx.teacher3.id, 12.0)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::NotEligible(_)));
    }

    #[tokio::test]
    async fn test_mark_out_of_range_rejected_before_mutation() {
        let fx = Fixture::new().await;
        let copy = fx.assigned_copy(&fx.candidate, &fx.module_a).await;

        for mark in [-1.0, 20.5, f64::NAN] {
            let err = fx
                .engine
                .submit_mark(copy.id, fx.teacher1.id, mark)
                .await
                .unwrap_err();
            assert!(matches!(err, GradingError::Validation(_)));
        }
        assert_eq!(fx.copy(copy.id).await.unwrap().mark1, None);
    }

    #[tokio::test]
    async fn test_fourth_mark_is_not_updated() {
        let fx = Fixture::new().await;
        let copy = fx.assigned_copy(&fx.candidate, &fx.module_a).await;
        fx.engine.submit_mark(copy.id, fx.teacher1.id, 5.0).await.unwrap();
        fx.engine.submit_mark(copy.id, fx.teacher2.id, 12.0).await.unwrap();
        fx.engine
            .assign_arbitrator(copy.id, fx.teacher3.id)
            .await
            .unwrap();
        fx.engine.submit_mark(copy.id, fx.teacher3.id, 9.0).await.unwrap();

        // 单次调用明确报错
        let err = fx
            .engine
            .submit_mark(copy.id, fx.teacher3.id, 11.0)
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::NotEligible(_)));

        let response = fx
            .engine
            .submit_marks(
                fx.teacher3.id,
                &[MarkSubmission {
                    copy_id: copy.id,
                    mark: 11.0,
                }],
            )
            .await
            .unwrap();
        assert_eq!(response.updated, 0);
        assert!(response.items[0].skipped_reason.is_some());

        let stored = fx.copy(copy.id).await.unwrap();
        assert_eq!(stored.mark3, Some(9.0));
    }

    #[tokio::test]
    async fn test_batch_skips_unknown_copies() {
        let fx = Fixture::new().await;
        let copy_a = fx.assigned_copy(&fx.candidate, &fx.module_a).await;
        let copy_b = fx.assigned_copy(&fx.candidate, &fx.module_b).await;

        let response = fx
            .engine
            .submit_marks(
                fx.teacher1.id,
                &[
                    MarkSubmission {
                        copy_id: copy_a.id,
                        mark: 14.0,
                    },
                    MarkSubmission {
                        copy_id: 9999,
                        mark: 10.0,
                    },
                    MarkSubmission {
                        copy_id: copy_b.id,
                        mark: 11.0,
                    },
                ],
            )
            .await
            .unwrap();

        assert_eq!(response.updated, 2);
        assert_eq!(response.items.len(), 3);
        assert_eq!(response.items[0].slot, Some(MarkSlot::First));
        assert!(response.items[1].skipped_reason.is_some());
    }

    #[tokio::test]
    async fn test_batch_with_invalid_mark_changes_nothing() {
        let fx = Fixture::new().await;
        let copy = fx.assigned_copy(&fx.candidate, &fx.module_a).await;

        let err = fx
            .engine
            .submit_marks(
                fx.teacher1.id,
                &[
                    MarkSubmission {
                        copy_id: copy.id,
                        mark: 14.0,
                    },
                    MarkSubmission {
                        copy_id: copy.id,
                        mark: 25.0,
                    },
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GradingError::Validation(_)));
        assert_eq!(fx.copy(copy.id).await.unwrap().mark1, None);
    }

    #[tokio::test]
    async fn test_concurrent_submissions_land_in_distinct_slots() {
        let fx = Fixture::new().await;
        let copy = fx.assigned_copy(&fx.candidate, &fx.module_a).await;

        let (first, second) = tokio::join!(
            fx.engine.submit_mark(copy.id, fx.teacher1.id, 12.0),
            fx.engine.submit_mark(copy.id, fx.teacher2.id, 13.0),
        );
        let mut slots = vec![first.unwrap(), second.unwrap()];
        slots.sort_by_key(|slot| slot.number());
        assert_eq!(slots, vec![MarkSlot::First, MarkSlot::Second]);

        let stored = fx.copy(copy.id).await.unwrap();
        assert!(stored.mark1.is_some() && stored.mark2.is_some());
    }
}
