use super::entities::Module;
use serde::Serialize;
use ts_rs::TS;

// 科目列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/module.ts")]
pub struct ModuleListResponse {
    pub items: Vec<Module>,
}
