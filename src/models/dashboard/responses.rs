use crate::models::lessons::entities::Lesson;
use crate::models::progress::entities::StudentProgress;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardLesson {
    pub lesson: Lesson,
    pub progress: StudentProgress,
}

// 今日课程
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardResponse {
    pub date: chrono::NaiveDate,
    pub lessons: Vec<DashboardLesson>,
}
