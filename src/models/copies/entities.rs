use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 考生答卷
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub struct ExamCopy {
    pub id: i64,
    // 答卷所属考生，不向阅卷教师暴露
    pub candidate_id: i64,
    pub module_id: i64,
    // 两位初评教师与仲裁教师
    pub teacher1_id: Option<i64>,
    pub teacher2_id: Option<i64>,
    pub teacher3_id: Option<i64>,
    pub mark1: Option<f64>,
    pub mark2: Option<f64>,
    pub mark3: Option<f64>,
    // 填写第一份分数的教师
    pub mark1_grader_id: Option<i64>,
    // 乐观锁版本号，每次修改递增
    pub version: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ExamCopy {
    /// 该教师是否为本答卷的阅卷人之一
    pub fn is_grader(&self, teacher_id: i64) -> bool {
        [self.teacher1_id, self.teacher2_id, self.teacher3_id]
            .into_iter()
            .flatten()
            .any(|id| id == teacher_id)
    }

    /// 按 mark1 -> mark2 -> mark3 的顺序返回第一个空位
    pub fn next_empty_slot(&self) -> Option<MarkSlot> {
        if self.mark1.is_none() {
            Some(MarkSlot::First)
        } else if self.mark2.is_none() {
            Some(MarkSlot::Second)
        } else if self.mark3.is_none() {
            Some(MarkSlot::Third)
        } else {
            None
        }
    }
}

// 答卷所处阶段
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub enum CopyState {
    Unassigned,
    AssignedAwaitingMarks,
    PartiallyMarked,
    RequiresArbitration,
    Resolved,
}

impl std::fmt::Display for CopyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CopyState::Unassigned => "unassigned",
            CopyState::AssignedAwaitingMarks => "assigned_awaiting_marks",
            CopyState::PartiallyMarked => "partially_marked",
            CopyState::RequiresArbitration => "requires_arbitration",
            CopyState::Resolved => "resolved",
        };
        write!(f, "{s}")
    }
}

// 分数槽位
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/copy.ts")]
pub enum MarkSlot {
    First,
    Second,
    Third,
}

impl MarkSlot {
    pub fn number(self) -> u8 {
        match self {
            MarkSlot::First => 1,
            MarkSlot::Second => 2,
            MarkSlot::Third => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_copy() -> ExamCopy {
        let now = chrono::Utc::now();
        ExamCopy {
            id: 1,
            candidate_id: 10,
            module_id: 100,
            teacher1_id: Some(2),
            teacher2_id: Some(3),
            teacher3_id: None,
            mark1: None,
            mark2: None,
            mark3: None,
            mark1_grader_id: None,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_next_empty_slot_in_order() {
        let mut copy = blank_copy();
        assert_eq!(copy.next_empty_slot(), Some(MarkSlot::First));
        copy.mark1 = Some(12.0);
        assert_eq!(copy.next_empty_slot(), Some(MarkSlot::Second));
        copy.mark2 = Some(4.0);
        assert_eq!(copy.next_empty_slot(), Some(MarkSlot::Third));
        copy.mark3 = Some(9.0);
        assert_eq!(copy.next_empty_slot(), None);
    }

    #[test]
    fn test_is_grader() {
        let mut copy = blank_copy();
        assert!(copy.is_grader(2));
        assert!(!copy.is_grader(4));
        copy.teacher3_id = Some(4);
        assert!(copy.is_grader(4));
    }
}
