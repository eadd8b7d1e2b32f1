use super::entities::{CopyState, ExamCopy, MarkSlot};
use serde::Serialize;
use ts_rs::TS;

// 主席查看的答卷
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub struct CopyView {
    pub copy: ExamCopy,
    pub state: CopyState,
    pub final_mark: Option<f64>,
    pub module_name: Option<String>,
    pub secret_code: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub struct CopyListResponse {
    pub items: Vec<CopyView>,
}

// 阅卷教师看到的答卷：只有匿名码和科目，不含考生身份
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub struct TeacherCopyView {
    pub copy_id: i64,
    pub secret_code: Option<String>,
    pub module_id: i64,
    pub module_name: Option<String>,
    // 是否作为仲裁教师
    pub arbitration: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub struct TeacherCopyListResponse {
    pub items: Vec<TeacherCopyView>,
}

// 单条分数的处理结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub struct MarkOutcome {
    pub copy_id: i64,
    pub slot: Option<MarkSlot>,
    pub skipped_reason: Option<String>,
}

impl MarkOutcome {
    pub fn updated(copy_id: i64, slot: MarkSlot) -> Self {
        Self {
            copy_id,
            slot: Some(slot),
            skipped_reason: None,
        }
    }

    pub fn skipped(copy_id: i64, reason: impl Into<String>) -> Self {
        Self {
            copy_id,
            slot: None,
            skipped_reason: Some(reason.into()),
        }
    }
}

// 批量提交分数的响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub struct SubmitMarksResponse {
    pub updated: usize,
    pub items: Vec<MarkOutcome>,
}
