use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考生最终成绩，只创建一次
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct CandidateResult {
    pub id: i64,
    pub candidate_id: i64,
    // 各科最终分之和乘以系数
    pub value: f64,
    // 是否录取
    pub accepted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
