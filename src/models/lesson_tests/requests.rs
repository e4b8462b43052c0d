use serde::Deserialize;
use std::collections::HashMap;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct CreateTestRequest {
    pub lesson_id: Option<i64>,
    pub title: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct CreateChoiceRequest {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct CreateQuestionRequest {
    pub text: String,
    #[serde(default)]
    pub choices: Vec<CreateChoiceRequest>,
}

/// 答卷：题目 ID -> 选项 ID
///
/// 键和值都按宽松方式解析，无法识别的答案按答错处理，不会拒绝整份答卷。
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson_test.ts")]
pub struct SubmitTestRequest {
    #[serde(default)]
    #[ts(type = "Record<string, number | string>")]
    pub answers: HashMap<String, serde_json::Value>,
}
