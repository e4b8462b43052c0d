//! 视频存储操作

use super::SeaOrmStorage;
use crate::entity::videos::{ActiveModel, Column, Entity as Videos};
use crate::errors::{CourseHubError, Result};
use crate::models::videos::{entities::Video, requests::CreateVideoRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_video_impl(&self, req: CreateVideoRequest) -> Result<Video> {
        let model = ActiveModel {
            lesson_id: Set(req.lesson_id),
            title: Set(req.title),
            file_token: Set(req.file_token),
            sort_order: Set(req.sort_order.unwrap_or(0)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建视频失败: {e}")))?;

        Ok(result.into_video())
    }

    pub async fn get_video_by_id_impl(&self, video_id: i64) -> Result<Option<Video>> {
        let result = Videos::find_by_id(video_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询视频失败: {e}")))?;

        Ok(result.map(|m| m.into_video()))
    }

    /// 解锁顺序依赖这里的排序
    pub async fn list_videos_by_lesson_impl(&self, lesson_id: i64) -> Result<Vec<Video>> {
        let videos = Videos::find()
            .filter(Column::LessonId.eq(lesson_id))
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课时视频失败: {e}")))?;

        Ok(videos.into_iter().map(|m| m.into_video()).collect())
    }

    pub async fn delete_video_impl(&self, video_id: i64) -> Result<bool> {
        let result = Videos::delete_by_id(video_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除视频失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
