use super::entities::CopyState;
use serde::Deserialize;
use ts_rs::TS;

// 登记答卷请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub struct CreateCopyRequest {
    pub candidate_id: i64,
    pub module_id: i64,
}

// 分配两位初评教师
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub struct AssignTeachersRequest {
    pub copy_id: i64,
    pub teacher1_id: i64,
    pub teacher2_id: i64,
}

// 分配仲裁教师
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub struct AssignArbitratorRequest {
    pub copy_id: i64,
    pub teacher3_id: i64,
}

// 答卷列表查询参数
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub struct CopyListQuery {
    pub state: Option<CopyState>,
}

// 单条分数提交
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub struct MarkSubmission {
    pub copy_id: i64,
    pub mark: f64,
}
