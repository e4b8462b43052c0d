use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课时测验
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct LessonTest {
    pub id: i64,
    pub lesson_id: Option<i64>,
    pub title: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct Question {
    pub id: i64,
    pub test_id: i64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct Choice {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
}

/// 题目及其全部选项，评分与管理页面共用
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct QuestionWithChoices {
    pub question: Question,
    pub choices: Vec<Choice>,
}
