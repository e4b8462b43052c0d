//! 学习进度实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_progress")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub lesson_id: i64,
    pub test_passed: bool,
    #[sea_orm(column_type = "Double", nullable)]
    pub test_score: Option<f64>,
    pub attended: bool,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::lessons::Entity",
        from = "Column::LessonId",
        to = "super::lessons::Column::Id",
        on_delete = "Cascade"
    )]
    Lesson,
    #[sea_orm(has_many = "super::progress_videos::Entity")]
    WatchedVideos,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::lessons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lesson.def()
    }
}

impl Related<super::progress_videos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WatchedVideos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 已观看视频集合单独存放在关联表中，由调用方查询后传入
    pub fn into_progress(
        self,
        watched_video_ids: Vec<i64>,
    ) -> crate::models::progress::entities::StudentProgress {
        use crate::models::progress::entities::StudentProgress;
        use chrono::{DateTime, Utc};

        StudentProgress {
            id: self.id,
            student_id: self.student_id,
            lesson_id: self.lesson_id,
            watched_video_ids,
            test_passed: self.test_passed,
            test_score: self.test_score,
            attended: self.attended,
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
