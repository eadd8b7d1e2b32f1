use super::entities::SecretCode;
use crate::models::users::responses::UserSummary;
use serde::Serialize;
use ts_rs::TS;

// 院长查看的匿名码（带考生信息）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/secret_code.ts")]
pub struct SecretCodeView {
    pub code: SecretCode,
    pub candidate_name: String,
    pub candidate_email: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/secret_code.ts")]
pub struct SecretCodeListResponse {
    pub items: Vec<SecretCodeView>,
}

// 尚未发放匿名码的考生
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/secret_code.ts")]
pub struct PendingCandidatesResponse {
    pub items: Vec<UserSummary>,
}

// 批量发放结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/secret_code.ts")]
pub struct IssuedCodesResponse {
    pub issued: usize,
    pub items: Vec<SecretCode>,
}
