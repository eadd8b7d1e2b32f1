use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考生匿名码，一经发放不可修改
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/secret_code.ts")]
pub struct SecretCode {
    pub id: i64,
    // 匿名码内容
    pub content: String,
    // 所属考生
    pub candidate_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
