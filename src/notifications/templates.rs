//! 邮件模板

use serde_json::Value;

use super::NotificationKind;
use crate::errors::{GradingError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub subject: String,
    pub body: String,
}

fn field<'a>(payload: &'a Value, key: &str) -> Result<&'a Value> {
    payload
        .get(key)
        .ok_or_else(|| GradingError::serialization(format!("通知内容缺少字段 '{key}'")))
}

fn str_field<'a>(payload: &'a Value, key: &str) -> Result<&'a str> {
    field(payload, key)?
        .as_str()
        .ok_or_else(|| GradingError::serialization(format!("通知字段 '{key}' 不是字符串")))
}

/// 按通知类型渲染邮件标题与正文
pub fn render(kind: NotificationKind, payload: &Value) -> Result<RenderedMessage> {
    let name = str_field(payload, "name")?;

    let (subject, content) = match kind {
        NotificationKind::TeacherAssigned | NotificationKind::ArbitratorAssigned => {
            let copies = field(payload, "copies")?.as_u64().unwrap_or(1);
            let role = if kind == NotificationKind::ArbitratorAssigned {
                " as arbitrator"
            } else {
                ""
            };
            (
                "New Examination Papers Assigned".to_string(),
                format!(
                    "You have been assigned {copies} examination paper(s) to grade{role}.\n\n\
                     Please log into the system to access and grade the assigned papers."
                ),
            )
        }
        NotificationKind::SecretCodeAssigned => {
            let code = str_field(payload, "secret_code")?;
            (
                "Secret Code Assigned - Examination System".to_string(),
                format!(
                    "Your secret code for anonymous examination has been assigned.\n\n\
                     Secret Code: {code}\n\n\
                     Please keep this code confidential. It will be used to identify your \
                     examination papers anonymously.\n\n\
                     Important: Do not share this code with anyone."
                ),
            )
        }
        NotificationKind::ResultPublished => {
            let final_mark = field(payload, "final_mark")?
                .as_f64()
                .ok_or_else(|| GradingError::serialization("通知字段 'final_mark' 不是数字"))?;
            let accepted = field(payload, "accepted")?.as_bool().unwrap_or(false);
            let status = if accepted { "Accepted" } else { "Not Accepted" };
            (
                "Examination Results Published".to_string(),
                format!(
                    "Your examination results have been published.\n\n\
                     Final Mark: {final_mark:.2}/20\n\
                     Status: {status}\n\n\
                     You can view detailed results by logging into the system."
                ),
            )
        }
    };

    Ok(RenderedMessage {
        subject,
        body: format!("Dear {name},\n\n{content}\n\nBest regards,\nExamination Committee"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_result_published() {
        let message = render(
            NotificationKind::ResultPublished,
            &json!({"name": "Amina", "final_mark": 16.0, "accepted": true}),
        )
        .unwrap();
        assert_eq!(message.subject, "Examination Results Published");
        assert!(message.body.starts_with("Dear Amina,"));
        assert!(message.body.contains("Final Mark: 16.00/20"));
        assert!(message.body.contains("Status: Accepted"));
    }

    #[test]
    fn test_render_arbitrator_assignment() {
        let message = render(
            NotificationKind::ArbitratorAssigned,
            &json!({"name": "T3", "copies": 1}),
        )
        .unwrap();
        assert!(message.body.contains("1 examination paper(s) to grade as arbitrator."));
    }

    #[test]
    fn test_render_teacher_assignment() {
        let message = render(
            NotificationKind::TeacherAssigned,
            &json!({"name": "T1", "copies": 2}),
        )
        .unwrap();
        assert!(message.body.contains("2 examination paper(s) to grade."));
    }

    #[test]
    fn test_render_missing_code() {
        let err = render(NotificationKind::SecretCodeAssigned, &json!({"name": "C"})).unwrap_err();
        assert!(err.message().contains("secret_code"));
    }
}
