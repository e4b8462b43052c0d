//! 学习进度存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::progress_videos::{
    ActiveModel as ProgressVideoActiveModel, Column as ProgressVideoColumn,
    Entity as ProgressVideos,
};
use crate::entity::student_progress::{
    ActiveModel, Column, Entity as StudentProgressEntity, Model,
};
use crate::errors::{CourseHubError, Result};
use crate::models::progress::entities::StudentProgress;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    async fn find_progress_model(&self, student_id: i64, lesson_id: i64) -> Result<Option<Model>> {
        StudentProgressEntity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::LessonId.eq(lesson_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询学习进度失败: {e}")))
    }

    async fn watched_video_ids(&self, progress_id: i64) -> Result<Vec<i64>> {
        let rows = ProgressVideos::find()
            .filter(ProgressVideoColumn::ProgressId.eq(progress_id))
            .order_by_asc(ProgressVideoColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询已观看视频失败: {e}")))?;

        Ok(rows.into_iter().map(|r| r.video_id).collect())
    }

    /// 获取或创建进度记录
    ///
    /// 并发请求可能同时插入，唯一约束冲突时重新读取已存在的记录。
    pub async fn get_or_create_progress_impl(
        &self,
        student_id: i64,
        lesson_id: i64,
    ) -> Result<StudentProgress> {
        if let Some(model) = self.find_progress_model(student_id, lesson_id).await? {
            let watched = self.watched_video_ids(model.id).await?;
            return Ok(model.into_progress(watched));
        }

        let model = ActiveModel {
            student_id: Set(student_id),
            lesson_id: Set(lesson_id),
            test_passed: Set(false),
            test_score: Set(None),
            attended: Set(false),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(created) => Ok(created.into_progress(Vec::new())),
            Err(e) if is_unique_violation(&e) => {
                let existing = self
                    .find_progress_model(student_id, lesson_id)
                    .await?
                    .ok_or_else(|| CourseHubError::not_found("学习进度记录不存在"))?;
                let watched = self.watched_video_ids(existing.id).await?;
                Ok(existing.into_progress(watched))
            }
            Err(e) => Err(CourseHubError::database_operation(format!(
                "创建学习进度失败: {e}"
            ))),
        }
    }

    /// 记录已观看视频，重复观看不报错
    pub async fn mark_video_watched_impl(&self, progress_id: i64, video_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let model = ProgressVideoActiveModel {
            progress_id: Set(progress_id),
            video_id: Set(video_id),
            watched_at: Set(now),
            ..Default::default()
        };

        let inserted = match model.insert(&self.db).await {
            Ok(_) => true,
            Err(e) if is_unique_violation(&e) => false,
            Err(e) => {
                return Err(CourseHubError::database_operation(format!(
                    "记录观看失败: {e}"
                )));
            }
        };

        if inserted {
            self.touch_progress(progress_id, now).await?;
        }
        Ok(inserted)
    }

    async fn touch_progress(&self, progress_id: i64, now: i64) -> Result<()> {
        StudentProgressEntity::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(progress_id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("更新学习进度失败: {e}")))?;
        Ok(())
    }

    pub async fn set_progress_attended_impl(&self, progress_id: i64, attended: bool) -> Result<bool> {
        let result = StudentProgressEntity::update_many()
            .col_expr(Column::Attended, Expr::value(attended))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(progress_id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("更新出勤状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 写入测验结果，覆盖之前的成绩
    pub async fn record_test_result_impl(
        &self,
        progress_id: i64,
        passed: bool,
        score: f64,
        attended: bool,
    ) -> Result<bool> {
        let result = StudentProgressEntity::update_many()
            .col_expr(Column::TestPassed, Expr::value(passed))
            .col_expr(Column::TestScore, Expr::value(score))
            .col_expr(Column::Attended, Expr::value(attended))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().timestamp()))
            .filter(Column::Id.eq(progress_id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("保存测验结果失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_progress_for_lessons_impl(
        &self,
        student_id: i64,
        lesson_ids: &[i64],
    ) -> Result<Vec<StudentProgress>> {
        if lesson_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = StudentProgressEntity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::LessonId.is_in(lesson_ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询学习进度失败: {e}")))?;

        if models.is_empty() {
            return Ok(Vec::new());
        }

        let progress_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let watched_rows = ProgressVideos::find()
            .filter(ProgressVideoColumn::ProgressId.is_in(progress_ids))
            .order_by_asc(ProgressVideoColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询已观看视频失败: {e}")))?;

        let mut watched: HashMap<i64, Vec<i64>> = HashMap::new();
        for row in watched_rows {
            watched.entry(row.progress_id).or_default().push(row.video_id);
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let ids = watched.remove(&m.id).unwrap_or_default();
                m.into_progress(ids)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_lesson, seed_student, seed_video};

    #[tokio::test]
    async fn test_get_or_create_progress_is_idempotent() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "anna").await;
        let lesson = seed_lesson(&storage, None, "Intro").await;

        let first = storage
            .get_or_create_progress_impl(student.id, lesson.id)
            .await
            .unwrap();
        let second = storage
            .get_or_create_progress_impl(student.id, lesson.id)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert!(!second.test_passed);
        assert!(second.test_score.is_none());
        assert!(second.watched_video_ids.is_empty());
    }

    #[tokio::test]
    async fn test_mark_video_watched_deduplicates() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "boris").await;
        let lesson = seed_lesson(&storage, None, "Basics").await;
        let video = seed_video(&storage, lesson.id, student.id, 0).await;

        let progress = storage
            .get_or_create_progress_impl(student.id, lesson.id)
            .await
            .unwrap();

        assert!(storage.mark_video_watched_impl(progress.id, video.id).await.unwrap());
        assert!(!storage.mark_video_watched_impl(progress.id, video.id).await.unwrap());

        let reloaded = storage
            .get_or_create_progress_impl(student.id, lesson.id)
            .await
            .unwrap();
        assert_eq!(reloaded.watched_video_ids, vec![video.id]);
    }

    #[tokio::test]
    async fn test_record_test_result_and_list() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "clara").await;
        let a = seed_lesson(&storage, None, "A").await;
        let b = seed_lesson(&storage, None, "B").await;

        let progress = storage
            .get_or_create_progress_impl(student.id, a.id)
            .await
            .unwrap();
        storage
            .record_test_result_impl(progress.id, true, 80.0, true)
            .await
            .unwrap();

        let listed = storage
            .list_progress_for_lessons_impl(student.id, &[a.id, b.id])
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].test_passed);
        assert!(listed[0].attended);
        assert_eq!(listed[0].test_score, Some(80.0));
    }
}
