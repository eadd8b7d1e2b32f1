use std::collections::HashMap;

use super::GradingEngine;
use crate::errors::Result;
use crate::models::{
    copies::{
        entities::CopyState,
        responses::{CopyView, TeacherCopyView},
    },
    results::responses::RankedResult,
    secret_codes::responses::SecretCodeView,
    users::entities::UserRole,
};

async fn module_names(engine: &GradingEngine) -> Result<HashMap<i64, String>> {
    Ok(engine
        .storage
        .list_modules()
        .await?
        .into_iter()
        .map(|module| (module.id, module.name))
        .collect())
}

/// 考生 ID -> 匿名码
async fn codes_by_candidate(engine: &GradingEngine) -> Result<HashMap<i64, String>> {
    Ok(engine
        .storage
        .list_secret_codes()
        .await?
        .into_iter()
        .map(|code| (code.candidate_id, code.content))
        .collect())
}

/// 主席视角：按状态筛选答卷，`None` 返回全部
pub(super) async fn copies_in_state(
    engine: &GradingEngine,
    state: Option<CopyState>,
) -> Result<Vec<CopyView>> {
    let modules = module_names(engine).await?;
    let codes = codes_by_candidate(engine).await?;

    Ok(engine
        .storage
        .list_copies()
        .await?
        .into_iter()
        .filter_map(|copy| {
            let status = engine.status_of(&copy);
            if state.is_some_and(|wanted| wanted != status.state()) {
                return None;
            }
            Some(CopyView {
                module_name: modules.get(&copy.module_id).cloned(),
                secret_code: codes.get(&copy.candidate_id).cloned(),
                state: status.state(),
                final_mark: status.final_mark(),
                copy,
            })
        })
        .collect())
}

/// 阅卷教师视角：只暴露匿名码与科目
pub(super) async fn copies_for_teacher(
    engine: &GradingEngine,
    teacher_id: i64,
) -> Result<Vec<TeacherCopyView>> {
    let modules = module_names(engine).await?;
    let codes = codes_by_candidate(engine).await?;

    Ok(engine
        .storage
        .list_copies_by_teacher(teacher_id)
        .await?
        .into_iter()
        .map(|copy| TeacherCopyView {
            copy_id: copy.id,
            secret_code: codes.get(&copy.candidate_id).cloned(),
            module_id: copy.module_id,
            module_name: modules.get(&copy.module_id).cloned(),
            arbitration: copy.teacher3_id == Some(teacher_id),
        })
        .collect())
}

/// 院长视角：已发放的匿名码及其考生
pub(super) async fn issued_codes(engine: &GradingEngine) -> Result<Vec<SecretCodeView>> {
    let candidates: HashMap<i64, _> = engine
        .storage
        .list_users_by_role(UserRole::Candidate)
        .await?
        .into_iter()
        .map(|user| (user.id, user))
        .collect();

    Ok(engine
        .storage
        .list_secret_codes()
        .await?
        .into_iter()
        .map(|code| {
            let (candidate_name, candidate_email) = match candidates.get(&code.candidate_id) {
                Some(user) => (user.full_name().to_string(), user.email.clone()),
                None => (format!("#{}", code.candidate_id), String::new()),
            };
            SecretCodeView {
                code,
                candidate_name,
                candidate_email,
            }
        })
        .collect())
}

/// 已发布成绩，按分数从高到低排名，同分同名次
pub(super) async fn ranked_results(engine: &GradingEngine) -> Result<Vec<RankedResult>> {
    let names: HashMap<i64, String> = engine
        .storage
        .list_users_by_role(UserRole::Candidate)
        .await?
        .into_iter()
        .map(|user| (user.id, user.full_name().to_string()))
        .collect();

    let mut results = engine.storage.list_results().await?;
    results.sort_by(|a, b| b.value.total_cmp(&a.value));

    let mut ranked: Vec<RankedResult> = Vec::with_capacity(results.len());
    for (index, result) in results.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if prev.value == result.value => prev.rank,
            _ => index + 1,
        };
        ranked.push(RankedResult {
            rank,
            candidate_name: names
                .get(&result.candidate_id)
                .cloned()
                .unwrap_or_else(|| format!("#{}", result.candidate_id)),
            value: result.value,
            accepted: result.accepted,
        });
    }
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use crate::models::copies::entities::CopyState;
    use crate::models::users::entities::UserRole;

    #[tokio::test]
    async fn test_copies_filtered_by_state() {
        let fx = Fixture::new().await;
        let pending = fx.add_copy(&fx.candidate, &fx.module_a).await;
        let assigned = fx.assigned_copy(&fx.candidate, &fx.module_b).await;

        let unassigned = fx
            .engine
            .copies_in_state(Some(CopyState::Unassigned))
            .await
            .unwrap();
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].copy.id, pending.id);
        assert_eq!(unassigned[0].module_name.as_deref(), Some("Algorithmique"));

        let all = fx.engine.copies_in_state(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|view| view.copy.id == assigned.id
            && view.state == CopyState::AssignedAwaitingMarks));
    }

    #[tokio::test]
    async fn test_resolved_view_carries_final_mark() {
        let fx = Fixture::new().await;
        let copy = fx.assigned_copy(&fx.candidate, &fx.module_a).await;
        fx.engine.submit_mark(copy.id, fx.teacher1.id, 14.0).await.unwrap();
        fx.engine.submit_mark(copy.id, fx.teacher2.id, 13.0).await.unwrap();

        let resolved = fx
            .engine
            .copies_in_state(Some(CopyState::Resolved))
            .await
            .unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].final_mark, Some(14.0));
    }

    #[tokio::test]
    async fn test_teacher_view_hides_candidate() {
        let fx = Fixture::new().await;
        let code = fx.engine.issue_code(fx.candidate.id).await.unwrap();
        let copy = fx.assigned_copy(&fx.candidate, &fx.module_a).await;

        let views = fx.engine.copies_for_teacher(fx.teacher1.id).await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].copy_id, copy.id);
        assert_eq!(views[0].secret_code.as_deref(), Some(code.content.as_str()));
        assert!(!views[0].arbitration);

        let json = serde_json::to_value(&views[0]).unwrap();
        assert!(json.get("candidate_id").is_none());

        assert!(
            fx.engine
                .copies_for_teacher(fx.teacher3.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_issued_codes_list_candidate() {
        let fx = Fixture::new().await;
        fx.engine.issue_code(fx.candidate.id).await.unwrap();

        let codes = fx.engine.issued_codes().await.unwrap();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].candidate_name, "cand1");
        assert_eq!(codes[0].candidate_email, "cand1@example.com");
    }

    #[tokio::test]
    async fn test_ranked_results_share_rank_on_tie() {
        let fx = Fixture::new().await;
        let other = fx.add_user("cand2", UserRole::Candidate).await;
        let third = fx.add_user("cand3", UserRole::Candidate).await;

        fx.storage
            .publish_candidate_result(fx.candidate.id, 12.0, true, &[])
            .await
            .unwrap();
        fx.storage
            .publish_candidate_result(other.id, 16.0, true, &[])
            .await
            .unwrap();
        fx.storage
            .publish_candidate_result(third.id, 12.0, true, &[])
            .await
            .unwrap();

        let ranked = fx.engine.ranked_results().await.unwrap();
        let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 2]);
        assert_eq!(ranked[0].candidate_name, "cand2");
    }
}
