//! 测验评分
//!
//! 每道题只有当提交的选项属于该题且被标记为正确时才得分。
//! 缺失、无法解析或指向其他题目的答案一律按答错处理。

use std::collections::HashMap;

use serde_json::Value;

use crate::models::lesson_tests::entities::QuestionWithChoices;

/// 及格线（百分制，按未取整的分数比较）
pub const PASS_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestScore {
    pub correct: u32,
    pub total: u32,
    /// 保留一位小数
    pub score: f64,
    pub passed: bool,
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum KeyForm {
    Prefixed,
    Plain,
}

// 题目键兼容 "12" 与 "question_12" 两种写法
fn parse_question_key(key: &str) -> Option<(i64, KeyForm)> {
    let key = key.trim();
    match key.strip_prefix("question_") {
        Some(id) => Some((id.parse().ok()?, KeyForm::Prefixed)),
        None => Some((key.parse().ok()?, KeyForm::Plain)),
    }
}

fn parse_choice_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// 将原始答卷整理为 题目 ID -> 选项 ID
///
/// 同一题同时出现 "12" 与 "question_12" 时以 "12" 为准。
pub fn normalize_answers(raw: &HashMap<String, Value>) -> HashMap<i64, i64> {
    let mut picked: HashMap<i64, (KeyForm, i64)> = HashMap::new();
    for (key, value) in raw {
        let (Some((question_id, form)), Some(choice_id)) =
            (parse_question_key(key), parse_choice_value(value))
        else {
            continue;
        };
        picked
            .entry(question_id)
            .and_modify(|current| {
                if form > current.0 {
                    *current = (form, choice_id);
                }
            })
            .or_insert((form, choice_id));
    }
    picked
        .into_iter()
        .map(|(question_id, (_, choice_id))| (question_id, choice_id))
        .collect()
}

pub fn score_answers(questions: &[QuestionWithChoices], answers: &HashMap<i64, i64>) -> TestScore {
    let total = questions.len() as u32;
    let correct = questions
        .iter()
        .filter(|item| {
            answers.get(&item.question.id).is_some_and(|choice_id| {
                item.choices
                    .iter()
                    .any(|c| c.id == *choice_id && c.question_id == item.question.id && c.is_correct)
            })
        })
        .count() as u32;

    let raw = if total == 0 {
        0.0
    } else {
        f64::from(correct) / f64::from(total) * 100.0
    };

    TestScore {
        correct,
        total,
        score: round_one_decimal(raw),
        passed: raw >= PASS_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lesson_tests::entities::{Choice, Question};
    use serde_json::json;

    fn question(id: i64, correct_choice: i64, wrong_choice: i64) -> QuestionWithChoices {
        QuestionWithChoices {
            question: Question {
                id,
                test_id: 1,
                text: format!("Q{id}"),
            },
            choices: vec![
                Choice {
                    id: correct_choice,
                    question_id: id,
                    text: "right".into(),
                    is_correct: true,
                },
                Choice {
                    id: wrong_choice,
                    question_id: id,
                    text: "wrong".into(),
                    is_correct: false,
                },
            ],
        }
    }

    fn five_questions() -> Vec<QuestionWithChoices> {
        (1..=5).map(|i| question(i, i * 10, i * 10 + 1)).collect()
    }

    #[test]
    fn test_three_of_five_passes() {
        let answers = HashMap::from([(1, 10), (2, 20), (3, 30), (4, 41), (5, 51)]);
        let result = score_answers(&five_questions(), &answers);
        assert_eq!(result.correct, 3);
        assert_eq!(result.total, 5);
        assert_eq!(result.score, 60.0);
        assert!(result.passed);
    }

    #[test]
    fn test_two_of_five_fails() {
        let answers = HashMap::from([(1, 10), (2, 20)]);
        let result = score_answers(&five_questions(), &answers);
        assert_eq!(result.score, 40.0);
        assert!(!result.passed);
    }

    #[test]
    fn test_empty_test_scores_zero() {
        let result = score_answers(&[], &HashMap::new());
        assert_eq!(result.total, 0);
        assert_eq!(result.score, 0.0);
        assert!(!result.passed);
    }

    #[test]
    fn test_foreign_choice_earns_nothing() {
        // 题 1 提交了题 2 的正确选项
        let answers = HashMap::from([(1, 20)]);
        let result = score_answers(&five_questions(), &answers);
        assert_eq!(result.correct, 0);
    }

    #[test]
    fn test_score_rounded_but_pass_uses_raw_value() {
        let questions: Vec<_> = (1..=3).map(|i| question(i, i * 10, i * 10 + 1)).collect();
        let answers = HashMap::from([(1, 10), (2, 20)]);
        let result = score_answers(&questions, &answers);
        assert_eq!(result.score, 66.7);
        assert!(result.passed);
    }

    #[test]
    fn test_normalize_answers_is_lenient() {
        let raw = HashMap::from([
            ("1".to_string(), json!(10)),
            ("question_2".to_string(), json!(" 20 ")),
            ("3".to_string(), json!("abc")),
            ("nope".to_string(), json!(40)),
            ("5".to_string(), json!(null)),
        ]);
        let answers = normalize_answers(&raw);
        assert_eq!(answers, HashMap::from([(1, 10), (2, 20)]));
    }

    #[test]
    fn test_plain_key_wins_over_prefixed_alias() {
        let raw = HashMap::from([
            ("question_1".to_string(), json!(11)),
            ("1".to_string(), json!(12)),
            ("question_2".to_string(), json!("21")),
        ]);

        for _ in 0..8 {
            let answers = normalize_answers(&raw);
            assert_eq!(answers.get(&1), Some(&12));
            assert_eq!(answers.get(&2), Some(&21));
        }

        let mut reordered: HashMap<String, Value> = HashMap::new();
        reordered.insert("1".to_string(), json!(12));
        reordered.insert("question_1".to_string(), json!(11));
        assert_eq!(normalize_answers(&reordered).get(&1), Some(&12));
    }
}
