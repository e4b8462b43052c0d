use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 学生在某一课时上的进度，每个 (student, lesson) 至多一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/progress.ts")]
pub struct StudentProgress {
    pub id: i64,
    pub student_id: i64,
    pub lesson_id: i64,
    pub watched_video_ids: Vec<i64>,
    pub test_passed: bool,
    pub test_score: Option<f64>,
    pub attended: bool,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
