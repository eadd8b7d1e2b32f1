use super::entities::CandidateResult;
use serde::Serialize;
use ts_rs::TS;

// 排名后的成绩
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct RankedResult {
    pub rank: usize,
    pub candidate_name: String,
    pub value: f64,
    pub accepted: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultListResponse {
    pub items: Vec<RankedResult>,
}

// 某考生未被发布的原因
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct SkippedCandidate {
    pub candidate_id: i64,
    pub reason: String,
}

// 发布成绩的汇总
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct PublishReport {
    pub published: usize,
    pub results: Vec<CandidateResult>,
    pub skipped: Vec<SkippedCandidate>,
    pub failed: usize,
}
