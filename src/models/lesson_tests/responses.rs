use super::entities::{LessonTest, QuestionWithChoices};
use crate::models::certificates::responses::CertificateOutcome;
use serde::Serialize;
use ts_rs::TS;

// 答题页面中的选项，不包含正确答案
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct ChoiceView {
    pub id: i64,
    pub text: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct QuestionView {
    pub id: i64,
    pub text: String,
    pub choices: Vec<ChoiceView>,
}

impl From<QuestionWithChoices> for QuestionView {
    fn from(item: QuestionWithChoices) -> Self {
        Self {
            id: item.question.id,
            text: item.question.text,
            choices: item
                .choices
                .into_iter()
                .map(|c| ChoiceView {
                    id: c.id,
                    text: c.text,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct TestPageResponse {
    pub lesson_id: i64,
    pub test: LessonTest,
    pub questions: Vec<QuestionView>,
}

// 教师查看的完整测验
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct TestDetailResponse {
    pub test: LessonTest,
    pub questions: Vec<QuestionWithChoices>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct TestSubmitResponse {
    pub lesson_id: i64,
    pub correct: u32,
    pub total: u32,
    /// 保留一位小数
    pub score: f64,
    pub passed: bool,
    pub certificate: CertificateOutcome,
    pub notices: Vec<String>,
}
