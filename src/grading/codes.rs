use serde_json::json;
use std::collections::HashSet;
use tracing::info;

use super::{GradingEngine, SecretCodeGenerator};
use crate::errors::{GradingError, Result};
use crate::models::{
    secret_codes::entities::SecretCode,
    users::entities::{User, UserRole},
};
use crate::notifications::{NotificationKind, dispatch};

pub(super) async fn issue_code(engine: &GradingEngine, candidate_id: i64) -> Result<SecretCode> {
    let candidate = engine
        .load_user_with_role(candidate_id, UserRole::Candidate)
        .await?;

    if let Some(existing) = engine
        .storage
        .get_secret_code_by_candidate(candidate_id)
        .await?
    {
        return Err(GradingError::not_eligible(format!(
            "考生 {} 已有匿名码（编号 {}）",
            candidate_id, existing.id
        )));
    }

    let mut avoiding: HashSet<String> = engine
        .storage
        .list_secret_codes()
        .await?
        .into_iter()
        .map(|code| code.content)
        .collect();

    let generator = SecretCodeGenerator::from_config(&engine.policy);
    issue_for(engine, &generator, &candidate, &mut avoiding).await
}

/// 为所有尚无匿名码的考生发放，整批共用一个避让集合
pub(super) async fn issue_codes_for_all(engine: &GradingEngine) -> Result<Vec<SecretCode>> {
    let existing = engine.storage.list_secret_codes().await?;
    let owners: HashSet<i64> = existing.iter().map(|code| code.candidate_id).collect();
    let mut avoiding: HashSet<String> = existing.into_iter().map(|code| code.content).collect();

    let generator = SecretCodeGenerator::from_config(&engine.policy);
    let mut issued = Vec::new();

    for candidate in engine.storage.list_users_by_role(UserRole::Candidate).await? {
        if owners.contains(&candidate.id) {
            continue;
        }
        issued.push(issue_for(engine, &generator, &candidate, &mut avoiding).await?);
    }

    info!("批量发放匿名码 {} 个", issued.len());
    Ok(issued)
}

pub(super) async fn candidates_without_code(engine: &GradingEngine) -> Result<Vec<User>> {
    let owners: HashSet<i64> = engine
        .storage
        .list_secret_codes()
        .await?
        .into_iter()
        .map(|code| code.candidate_id)
        .collect();

    Ok(engine
        .storage
        .list_users_by_role(UserRole::Candidate)
        .await?
        .into_iter()
        .filter(|user| !owners.contains(&user.id))
        .collect())
}

async fn issue_for(
    engine: &GradingEngine,
    generator: &SecretCodeGenerator,
    candidate: &User,
    avoiding: &mut HashSet<String>,
) -> Result<SecretCode> {
    let content = generator.generate(avoiding)?;
    let code = engine
        .storage
        .create_secret_code(candidate.id, &content)
        .await?;

    info!("已为考生 {} 发放匿名码", candidate.id);

    dispatch(
        engine.notifier.as_ref(),
        &candidate.email,
        NotificationKind::SecretCodeAssigned,
        json!({
            "name": candidate.full_name(),
            "secret_code": code.content,
        }),
    )
    .await;

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use crate::errors::GradingError;
    use crate::notifications::NotificationKind;

    #[tokio::test]
    async fn test_issue_code_once_per_candidate() {
        let fx = Fixture::new().await;

        let code = fx.engine.issue_code(fx.candidate.id).await.unwrap();
        assert_eq!(code.content.len(), 4);
        assert_eq!(fx.notifier.count(NotificationKind::SecretCodeAssigned), 1);

        let err = fx.engine.issue_code(fx.candidate.id).await.unwrap_err();
        assert!(matches!(err, GradingError::NotEligible(_)));
    }

    #[tokio::test]
    async fn test_issue_code_rejects_non_candidate() {
        let fx = Fixture::new().await;
        let err = fx.engine.issue_code(fx.teacher1.id).await.unwrap_err();
        assert!(matches!(err, GradingError::Validation(_)));

        let err = fx.engine.issue_code(9999).await.unwrap_err();
        assert!(matches!(err, GradingError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_issue_codes_for_all_skips_existing_owners() {
        let fx = Fixture::new().await;
        let other = fx.add_user("cand2", crate::models::users::entities::UserRole::Candidate).await;

        fx.engine.issue_code(fx.candidate.id).await.unwrap();
        let issued = fx.engine.issue_codes_for_all().await.unwrap();
        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].candidate_id, other.id);

        assert!(fx.engine.candidates_without_code().await.unwrap().is_empty());
        assert!(fx.engine.issue_codes_for_all().await.unwrap().is_empty());
    }
}
