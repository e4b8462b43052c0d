use super::entities::Lesson;
use crate::models::common::PaginationInfo;
use crate::models::progress::entities::StudentProgress;
use crate::models::videos::entities::Video;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonListResponse {
    pub items: Vec<Lesson>,
    pub pagination: PaginationInfo,
}

/// 学生视角的课时详情
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonDetailResponse {
    pub lesson: Lesson,
    pub videos: Vec<Video>,
    pub unlocked_video_ids: Vec<i64>,
    pub watched_video_ids: Vec<i64>,
    pub has_test: bool,
    pub can_take_test: bool,
    pub progress: StudentProgress,
}
