use std::collections::HashSet;
use std::sync::Arc;

use super::gating;
use crate::errors::Result;
use crate::models::lessons::entities::Lesson;
use crate::models::progress::entities::StudentProgress;
use crate::models::videos::entities::Video;
use crate::storage::Storage;

/// 学生在某课时上的学习状态
pub struct LessonProgressContext {
    pub lesson: Lesson,
    pub videos: Vec<Video>,
    pub progress: StudentProgress,
}

impl LessonProgressContext {
    /// 加载课时、视频与进度；进度不存在时创建。课时不存在返回 None
    pub async fn load(
        storage: &Arc<dyn Storage>,
        student_id: i64,
        lesson_id: i64,
    ) -> Result<Option<Self>> {
        let Some(lesson) = storage.get_lesson_by_id(lesson_id).await? else {
            return Ok(None);
        };
        let videos = storage.list_videos_by_lesson(lesson_id).await?;
        let progress = storage.get_or_create_progress(student_id, lesson_id).await?;
        Ok(Some(Self {
            lesson,
            videos,
            progress,
        }))
    }

    pub fn video_ids(&self) -> Vec<i64> {
        self.videos.iter().map(|v| v.id).collect()
    }

    pub fn watched(&self) -> HashSet<i64> {
        self.progress.watched_video_ids.iter().copied().collect()
    }

    pub fn unlocked_video_ids(&self) -> Vec<i64> {
        gating::unlocked_video_ids(&self.video_ids(), &self.watched())
    }

    pub fn all_videos_watched(&self) -> bool {
        gating::can_take_test(&self.video_ids(), &self.watched())
    }
}
