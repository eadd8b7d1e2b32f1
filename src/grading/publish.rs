use serde_json::json;
use std::collections::{BTreeMap, HashSet};
use tracing::{error, info, warn};

use super::{CopyStatus, GradingEngine};
use crate::config::GradingConfig;
use crate::errors::Result;
use crate::models::{
    copies::entities::ExamCopy,
    results::responses::{PublishReport, SkippedCandidate},
};
use crate::notifications::{NotificationKind, dispatch};

/// 单个考生的计算结果
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CandidateOutcome {
    pub value: f64,
    pub accepted: bool,
}

/// 浮点累加误差容限，15 × 2/3 这类整除结果仍判为达线
const PASSING_TOLERANCE: f64 = 1e-9;

/// 结果保留两位小数，仅用于存储与展示
fn round_value(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 计算考生成绩；不满足发布条件时返回跳过原因
///
/// 要求考生名下所有答卷都已定分、定分科目数恰好等于规定科目数且科目互不重复。
pub(super) fn evaluate_candidate(
    policy: &GradingConfig,
    group: &[(ExamCopy, CopyStatus)],
) -> std::result::Result<CandidateOutcome, String> {
    let finals: Vec<f64> = group
        .iter()
        .filter_map(|(_, status)| status.final_mark())
        .collect();

    let pending = group.len() - finals.len();
    if pending > 0 {
        return Err(format!("{pending} 份答卷尚未定分"));
    }

    if finals.len() != policy.required_modules_per_candidate {
        return Err(format!(
            "已定分科目数为 {}，需要 {}",
            finals.len(),
            policy.required_modules_per_candidate
        ));
    }

    let modules: HashSet<i64> = group.iter().map(|(copy, _)| copy.module_id).collect();
    if modules.len() != group.len() {
        return Err("同一科目存在多份答卷".to_string());
    }

    // 录取按未取整的原始成绩判断
    let raw = finals.iter().sum::<f64>() * policy.result_calculation_multiplier;
    Ok(CandidateOutcome {
        value: round_value(raw),
        accepted: raw >= policy.minimum_passing_mark - PASSING_TOLERANCE,
    })
}

/// 发布所有满足条件考生的成绩
///
/// 每位考生的成绩写入与答卷删除在一个事务中完成；单个考生失败只计数，不影响其他考生。
pub(super) async fn publish(engine: &GradingEngine) -> Result<PublishReport> {
    let mut groups: BTreeMap<i64, Vec<(ExamCopy, CopyStatus)>> = BTreeMap::new();
    for copy in engine.storage.list_copies().await? {
        let status = engine.status_of(&copy);
        groups.entry(copy.candidate_id).or_default().push((copy, status));
    }

    let mut report = PublishReport::default();

    for (candidate_id, group) in groups {
        let outcome = match evaluate_candidate(&engine.policy, &group) {
            Ok(outcome) => outcome,
            Err(reason) => {
                info!("考生 {} 暂不发布: {}", candidate_id, reason);
                report.skipped.push(SkippedCandidate {
                    candidate_id,
                    reason,
                });
                continue;
            }
        };

        let versions: Vec<(i64, i64)> = group
            .iter()
            .map(|(copy, _)| (copy.id, copy.version))
            .collect();

        match engine
            .storage
            .publish_candidate_result(candidate_id, outcome.value, outcome.accepted, &versions)
            .await
        {
            Ok(Some(result)) => {
                info!(
                    "考生 {} 成绩已发布: {:.2} ({})",
                    candidate_id,
                    result.value,
                    if result.accepted { "录取" } else { "未录取" }
                );
                notify_candidate(engine, candidate_id, result.value, result.accepted).await;
                report.published += 1;
                report.results.push(result);
            }
            Ok(None) => {
                warn!("考生 {} 已有成绩或答卷在发布期间被修改，跳过", candidate_id);
                report.skipped.push(SkippedCandidate {
                    candidate_id,
                    reason: "已有成绩或答卷在发布期间被修改".to_string(),
                });
            }
            Err(e) => {
                error!("发布考生 {} 成绩失败: {}", candidate_id, e);
                report.failed += 1;
            }
        }
    }

    info!(
        "成绩发布完成：发布 {}，跳过 {}，失败 {}",
        report.published,
        report.skipped.len(),
        report.failed
    );
    Ok(report)
}

async fn notify_candidate(engine: &GradingEngine, candidate_id: i64, value: f64, accepted: bool) {
    let candidate = match engine.storage.get_user_by_id(candidate_id).await {
        Ok(Some(candidate)) => candidate,
        Ok(None) => return,
        Err(e) => {
            warn!("读取考生 {} 失败，未发送成绩通知: {}", candidate_id, e);
            return;
        }
    };

    dispatch(
        engine.notifier.as_ref(),
        &candidate.email,
        NotificationKind::ResultPublished,
        json!({
            "name": candidate.full_name(),
            "final_mark": value,
            "accepted": accepted,
        }),
    )
    .await;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::grading::test_support::Fixture;
    use crate::models::users::entities::UserRole;
    use crate::notifications::testing::FailingNotifier;

    fn resolved(copy_id: i64, module_id: i64, final_mark: f64) -> (ExamCopy, CopyStatus) {
        let now = chrono::Utc::now();
        (
            ExamCopy {
                id: copy_id,
                candidate_id: 1,
                module_id,
                teacher1_id: Some(2),
                teacher2_id: Some(3),
                teacher3_id: None,
                mark1: Some(final_mark),
                mark2: Some(final_mark),
                mark3: None,
                mark1_grader_id: Some(2),
                version: 2,
                created_at: now,
                updated_at: now,
            },
            CopyStatus::Resolved { final_mark },
        )
    }

    #[test]
    fn test_evaluate_candidate_value_and_acceptance() {
        let policy = GradingConfig::default();
        let outcome =
            evaluate_candidate(&policy, &[resolved(1, 10, 14.0), resolved(2, 11, 10.0)]).unwrap();
        assert_eq!(outcome.value, 16.0);
        assert!(outcome.accepted);

        let outcome =
            evaluate_candidate(&policy, &[resolved(1, 10, 7.0), resolved(2, 11, 7.0)]).unwrap();
        assert_eq!(outcome.value, 9.33);
        assert!(!outcome.accepted);
    }

    #[test]
    fn test_evaluate_candidate_boundary_is_accepted() {
        let policy = GradingConfig::default();
        let outcome =
            evaluate_candidate(&policy, &[resolved(1, 10, 7.5), resolved(2, 11, 7.5)]).unwrap();
        assert_eq!(outcome.value, 10.0);
        assert!(outcome.accepted);
    }

    #[test]
    fn test_acceptance_uses_unrounded_value() {
        let policy = GradingConfig::default();
        // 7.5 + 7.495 = 14.995，乘 2/3 约为 9.9967，存储为 10.0 但未达线
        let outcome =
            evaluate_candidate(&policy, &[resolved(1, 10, 7.5), resolved(2, 11, 7.495)]).unwrap();
        assert_eq!(outcome.value, 10.0);
        assert!(!outcome.accepted);

        let outcome =
            evaluate_candidate(&policy, &[resolved(1, 10, 9.0), resolved(2, 11, 6.0)]).unwrap();
        assert_eq!(outcome.value, 10.0);
        assert!(outcome.accepted);
    }

    #[test]
    fn test_evaluate_candidate_rejects_incomplete_groups() {
        let policy = GradingConfig::default();
        assert!(evaluate_candidate(&policy, &[resolved(1, 10, 14.0)]).is_err());
        assert!(
            evaluate_candidate(&policy, &[resolved(1, 10, 14.0), resolved(2, 10, 12.0)]).is_err()
        );

        let (mut pending, _) = resolved(3, 11, 12.0);
        pending.mark2 = None;
        let group = vec![
            resolved(1, 10, 14.0),
            (pending, CopyStatus::PartiallyMarked),
        ];
        assert!(evaluate_candidate(&policy, &group).is_err());
    }

    #[tokio::test]
    async fn test_end_to_end_publish() {
        let fx = Fixture::new().await;
        let copy_a = fx.assigned_copy(&fx.candidate, &fx.module_a).await;
        let copy_b = fx.assigned_copy(&fx.candidate, &fx.module_b).await;

        fx.engine.submit_mark(copy_a.id, fx.teacher1.id, 14.0).await.unwrap();
        fx.engine.submit_mark(copy_a.id, fx.teacher2.id, 13.0).await.unwrap();

        fx.engine.submit_mark(copy_b.id, fx.teacher1.id, 8.0).await.unwrap();
        fx.engine.submit_mark(copy_b.id, fx.teacher2.id, 15.0).await.unwrap();
        let copy_b_state = fx.copy(copy_b.id).await.unwrap();
        assert_eq!(
            fx.engine.status_of(&copy_b_state),
            CopyStatus::RequiresArbitration
        );

        fx.engine
            .assign_arbitrator(copy_b.id, fx.teacher3.id)
            .await
            .unwrap();
        fx.engine.submit_mark(copy_b.id, fx.teacher3.id, 10.0).await.unwrap();

        let report = fx.engine.publish().await.unwrap();
        assert_eq!(report.published, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(report.results[0].value, 16.0);
        assert!(report.results[0].accepted);

        let stored = fx
            .storage
            .get_result_by_candidate(fx.candidate.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.value, 16.0);
        assert!(fx.copy(copy_a.id).await.is_none());
        assert!(fx.copy(copy_b.id).await.is_none());
        assert_eq!(
            fx.notifier.recipients(NotificationKind::ResultPublished),
            vec![fx.candidate.email.clone()]
        );

        // 再次发布不会产生新成绩
        let again = fx.engine.publish().await.unwrap();
        assert_eq!(again.published, 0);
        assert_eq!(fx.storage.list_results().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_single_resolved_module_is_skipped() {
        let fx = Fixture::new().await;
        let copy_a = fx.assigned_copy(&fx.candidate, &fx.module_a).await;
        let copy_b = fx.assigned_copy(&fx.candidate, &fx.module_b).await;

        fx.engine.submit_mark(copy_a.id, fx.teacher1.id, 14.0).await.unwrap();
        fx.engine.submit_mark(copy_a.id, fx.teacher2.id, 13.0).await.unwrap();
        fx.engine.submit_mark(copy_b.id, fx.teacher1.id, 8.0).await.unwrap();

        let report = fx.engine.publish().await.unwrap();
        assert_eq!(report.published, 0);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].candidate_id, fx.candidate.id);

        assert!(fx.copy(copy_a.id).await.is_some());
        assert!(
            fx.storage
                .get_result_by_candidate(fx.candidate.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_candidates_published_independently() {
        let fx = Fixture::new().await;
        let other = fx.add_user("cand2", UserRole::Candidate).await;

        for (candidate, marks) in [(&fx.candidate, (12.0, 11.0)), (&other, (6.0, 5.0))] {
            for module in [&fx.module_a, &fx.module_b] {
                let copy = fx.assigned_copy(candidate, module).await;
                fx.engine.submit_mark(copy.id, fx.teacher1.id, marks.0).await.unwrap();
                fx.engine.submit_mark(copy.id, fx.teacher2.id, marks.1).await.unwrap();
            }
        }
        // 第二位考生多出一份未评的答卷
        fx.assigned_copy(&other, &fx.module_a).await;

        let engine = fx.engine_with(Arc::new(FailingNotifier));
        let report = engine.publish().await.unwrap();
        assert_eq!(report.published, 1);
        assert_eq!(report.results[0].candidate_id, fx.candidate.id);
        assert_eq!(report.results[0].value, 16.0);
        assert_eq!(report.skipped[0].candidate_id, other.id);
    }
}
