//! 通知投递
//!
//! 业务流程只依赖 [`Notifier`] trait。通知是尽力而为的：
//! 投递失败由 [`dispatch`] 记录日志后吞掉，不影响已完成的业务操作。

mod templates;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::Result;
pub use templates::{RenderedMessage, render};

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    TeacherAssigned,
    ArbitratorAssigned,
    SecretCodeAssigned,
    ResultPublished,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::TeacherAssigned => write!(f, "teacher_assigned"),
            NotificationKind::ArbitratorAssigned => write!(f, "arbitrator_assigned"),
            NotificationKind::SecretCodeAssigned => write!(f, "secret_code_assigned"),
            NotificationKind::ResultPublished => write!(f, "result_published"),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        recipient_email: &str,
        kind: NotificationKind,
        payload: &serde_json::Value,
    ) -> Result<()>;
}

/// 只写日志的通知实现，未接入邮件服务时使用
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(
        &self,
        recipient_email: &str,
        kind: NotificationKind,
        payload: &serde_json::Value,
    ) -> Result<()> {
        let message = render(kind, payload)?;
        info!(
            to = recipient_email,
            kind = %kind,
            subject = %message.subject,
            "Email notification:\n{}",
            message.body
        );
        Ok(())
    }
}

/// 投递一条通知，失败只记录告警；返回是否投递成功
pub async fn dispatch(
    notifier: &dyn Notifier,
    recipient_email: &str,
    kind: NotificationKind,
    payload: serde_json::Value,
) -> bool {
    match notifier.notify(recipient_email, kind, &payload).await {
        Ok(()) => true,
        Err(e) => {
            warn!("通知 {} 投递给 {} 失败: {}", kind, recipient_email, e);
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! 测试用的通知替身

    use super::*;
    use crate::errors::GradingError;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingNotifier {
        pub sent: Mutex<Vec<(String, NotificationKind, serde_json::Value)>>,
    }

    impl RecordingNotifier {
        pub fn count(&self, kind: NotificationKind) -> usize {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, k, _)| *k == kind)
                .count()
        }

        pub fn recipients(&self, kind: NotificationKind) -> Vec<String> {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, k, _)| *k == kind)
                .map(|(to, _, _)| to.clone())
                .collect()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(
            &self,
            recipient_email: &str,
            kind: NotificationKind,
            payload: &serde_json::Value,
        ) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((recipient_email.to_string(), kind, payload.clone()));
            Ok(())
        }
    }

    /// 每次投递都失败
    pub struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn notify(
            &self,
            _recipient_email: &str,
            _kind: NotificationKind,
            _payload: &serde_json::Value,
        ) -> Result<()> {
            Err(GradingError::transport("smtp unreachable"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FailingNotifier, RecordingNotifier};
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_dispatch_swallows_failure() {
        let delivered = dispatch(
            &FailingNotifier,
            "t@example.com",
            NotificationKind::TeacherAssigned,
            json!({"name": "T", "copies": 1}),
        )
        .await;
        assert!(!delivered);
    }

    #[tokio::test]
    async fn test_dispatch_records() {
        let notifier = RecordingNotifier::default();
        assert!(
            dispatch(
                &notifier,
                "c@example.com",
                NotificationKind::SecretCodeAssigned,
                json!({"name": "C", "secret_code": "Ab12"}),
            )
            .await
        );
        assert_eq!(notifier.count(NotificationKind::SecretCodeAssigned), 1);
    }

    #[tokio::test]
    async fn test_log_notifier_rejects_incomplete_payload() {
        let result = LogNotifier
            .notify(
                "c@example.com",
                NotificationKind::ResultPublished,
                &json!({"name": "C"}),
            )
            .await;
        assert!(result.is_err());
    }
}
