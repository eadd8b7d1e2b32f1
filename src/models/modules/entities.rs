use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考试科目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/module.ts")]
pub struct Module {
    // 科目ID
    pub id: i64,
    // 科目名称
    pub name: String,
    // 科目描述
    pub description: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
