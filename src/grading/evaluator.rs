//! 答卷状态判定
//!
//! 纯函数：只根据分数与初评教师是否齐全给答卷分类，不访问存储。

use crate::models::copies::entities::{CopyState, ExamCopy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CopyStatus {
    Unassigned,
    AssignedAwaitingMarks,
    PartiallyMarked,
    RequiresArbitration,
    Resolved { final_mark: f64 },
}

impl CopyStatus {
    pub fn state(&self) -> CopyState {
        match self {
            CopyStatus::Unassigned => CopyState::Unassigned,
            CopyStatus::AssignedAwaitingMarks => CopyState::AssignedAwaitingMarks,
            CopyStatus::PartiallyMarked => CopyState::PartiallyMarked,
            CopyStatus::RequiresArbitration => CopyState::RequiresArbitration,
            CopyStatus::Resolved { .. } => CopyState::Resolved,
        }
    }

    pub fn final_mark(&self) -> Option<f64> {
        match self {
            CopyStatus::Resolved { final_mark } => Some(*final_mark),
            _ => None,
        }
    }
}

/// 分差小于 `threshold` 取两者最高分；否则需要仲裁，仲裁分即最终分。
///
/// 只设置了一位初评教师且尚无分数的答卷视为未分配，方便重新分配。
pub fn classify(
    marks: [Option<f64>; 3],
    primary_teachers: [Option<i64>; 2],
    threshold: f64,
) -> CopyStatus {
    let [mark1, mark2, mark3] = marks;

    match (mark1, mark2) {
        (Some(first), Some(second)) => {
            if let Some(arbitration) = mark3 {
                CopyStatus::Resolved {
                    final_mark: arbitration,
                }
            } else if (first - second).abs() < threshold {
                CopyStatus::Resolved {
                    final_mark: first.max(second),
                }
            } else {
                CopyStatus::RequiresArbitration
            }
        }
        (Some(_), None) | (None, Some(_)) => CopyStatus::PartiallyMarked,
        (None, None) => match primary_teachers {
            [Some(_), Some(_)] => CopyStatus::AssignedAwaitingMarks,
            _ => CopyStatus::Unassigned,
        },
    }
}

pub fn evaluate(copy: &ExamCopy, threshold: f64) -> CopyStatus {
    classify(
        [copy.mark1, copy.mark2, copy.mark3],
        [copy.teacher1_id, copy.teacher2_id],
        threshold,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f64 = 3.0;
    const ASSIGNED: [Option<i64>; 2] = [Some(1), Some(2)];

    #[test]
    fn test_unassigned() {
        assert_eq!(
            classify([None, None, None], [None, None], THRESHOLD),
            CopyStatus::Unassigned
        );
        // 只有一位初评教师
        assert_eq!(
            classify([None, None, None], [Some(1), None], THRESHOLD),
            CopyStatus::Unassigned
        );
    }

    #[test]
    fn test_awaiting_marks() {
        assert_eq!(
            classify([None, None, None], ASSIGNED, THRESHOLD),
            CopyStatus::AssignedAwaitingMarks
        );
    }

    #[test]
    fn test_partially_marked() {
        assert_eq!(
            classify([Some(12.0), None, None], ASSIGNED, THRESHOLD),
            CopyStatus::PartiallyMarked
        );
        assert_eq!(
            classify([None, Some(12.0), None], ASSIGNED, THRESHOLD),
            CopyStatus::PartiallyMarked
        );
    }

    #[test]
    fn test_agreement_takes_higher_mark() {
        let status = classify([Some(14.0), Some(13.0), None], ASSIGNED, THRESHOLD);
        assert_eq!(status, CopyStatus::Resolved { final_mark: 14.0 });
        assert_eq!(status.state(), CopyState::Resolved);

        let status = classify([Some(11.0), Some(13.5), None], ASSIGNED, THRESHOLD);
        assert_eq!(status.final_mark(), Some(13.5));
    }

    #[test]
    fn test_difference_at_threshold_requires_arbitration() {
        assert_eq!(
            classify([Some(10.0), Some(13.0), None], ASSIGNED, THRESHOLD),
            CopyStatus::RequiresArbitration
        );
        assert_eq!(
            classify([Some(8.0), Some(15.0), None], ASSIGNED, THRESHOLD),
            CopyStatus::RequiresArbitration
        );
    }

    #[test]
    fn test_arbitration_mark_is_final() {
        let status = classify([Some(8.0), Some(15.0), Some(10.0)], ASSIGNED, THRESHOLD);
        assert_eq!(status, CopyStatus::Resolved { final_mark: 10.0 });
    }

    #[test]
    fn test_custom_threshold() {
        assert_eq!(
            classify([Some(10.0), Some(13.0), None], ASSIGNED, 5.0).final_mark(),
            Some(13.0)
        );
    }
}
