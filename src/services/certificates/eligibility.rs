use std::collections::HashSet;

use crate::models::progress::entities::StudentProgress;
use crate::services::lesson_tests::scoring::round_one_decimal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eligibility {
    /// 仍有课时未通过
    Incomplete { remaining: u32 },
    /// 全部通过，附课程平均分
    Complete { average: f64 },
}

/// 判断学生是否已通过课程全部课时
///
/// 平均分只统计已通过且有分数的课时；都没有分数时使用本次提交的分数。
pub fn evaluate(lesson_ids: &[i64], progress: &[StudentProgress], current_score: f64) -> Eligibility {
    let course_lessons: HashSet<i64> = lesson_ids.iter().copied().collect();
    let passed: Vec<&StudentProgress> = progress
        .iter()
        .filter(|p| p.test_passed && course_lessons.contains(&p.lesson_id))
        .collect();

    let passed_lessons: HashSet<i64> = passed.iter().map(|p| p.lesson_id).collect();
    let remaining = course_lessons.len().saturating_sub(passed_lessons.len()) as u32;
    if remaining > 0 {
        return Eligibility::Incomplete { remaining };
    }

    let scores: Vec<f64> = passed.iter().filter_map(|p| p.test_score).collect();
    let average = if scores.is_empty() {
        current_score
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    Eligibility::Complete {
        average: round_one_decimal(average),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(lesson_id: i64, passed: bool, score: Option<f64>) -> StudentProgress {
        StudentProgress {
            id: lesson_id,
            student_id: 1,
            lesson_id,
            watched_video_ids: vec![],
            test_passed: passed,
            test_score: score,
            attended: passed,
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_incomplete_until_every_lesson_passed() {
        let records = vec![progress(1, true, Some(80.0)), progress(2, false, Some(40.0))];
        assert_eq!(
            evaluate(&[1, 2], &records, 80.0),
            Eligibility::Incomplete { remaining: 1 }
        );
    }

    #[test]
    fn test_missing_progress_counts_as_remaining() {
        let records = vec![progress(1, true, Some(80.0))];
        assert_eq!(
            evaluate(&[1, 2, 3], &records, 80.0),
            Eligibility::Incomplete { remaining: 2 }
        );
    }

    #[test]
    fn test_average_over_passed_lessons() {
        let records = vec![progress(1, true, Some(80.0)), progress(2, true, Some(90.0))];
        assert_eq!(
            evaluate(&[1, 2], &records, 90.0),
            Eligibility::Complete { average: 85.0 }
        );
    }

    #[test]
    fn test_unscored_passes_are_excluded() {
        let records = vec![progress(1, true, None), progress(2, true, Some(70.0))];
        assert_eq!(
            evaluate(&[1, 2], &records, 70.0),
            Eligibility::Complete { average: 70.0 }
        );
    }

    #[test]
    fn test_falls_back_to_current_score() {
        let records = vec![progress(1, true, None)];
        assert_eq!(
            evaluate(&[1], &records, 66.7),
            Eligibility::Complete { average: 66.7 }
        );
    }

    #[test]
    fn test_progress_of_other_courses_ignored() {
        let records = vec![progress(1, true, Some(100.0)), progress(9, true, Some(10.0))];
        assert_eq!(
            evaluate(&[1], &records, 100.0),
            Eligibility::Complete { average: 100.0 }
        );
    }
}
