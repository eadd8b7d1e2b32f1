use serde::Deserialize;
use ts_rs::TS;

// 创建科目请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/module.ts")]
pub struct CreateModuleRequest {
    pub name: String,
    pub description: Option<String>,
}
