use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_catalog_tables::{Courses, Lessons, Users, Videos};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 学习进度表 ====================
        manager
            .create_table(
                Table::create()
                    .table(StudentProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentProgress::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProgress::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProgress::LessonId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProgress::TestPassed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(StudentProgress::TestScore).double().null())
                    .col(
                        ColumnDef::new(StudentProgress::Attended)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StudentProgress::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentProgress::Table, StudentProgress::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentProgress::Table, StudentProgress::LessonId)
                            .to(Lessons::Table, Lessons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 已观看视频关联表 ====================
        manager
            .create_table(
                Table::create()
                    .table(ProgressVideos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProgressVideos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProgressVideos::ProgressId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProgressVideos::VideoId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProgressVideos::WatchedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProgressVideos::Table, ProgressVideos::ProgressId)
                            .to(StudentProgress::Table, StudentProgress::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ProgressVideos::Table, ProgressVideos::VideoId)
                            .to(Videos::Table, Videos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 证书表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Certificates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Certificates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Certificates::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Certificates::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Certificates::TestScore).double().not_null())
                    .col(
                        ColumnDef::new(Certificates::CertificateId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Certificates::PdfFile).string().null())
                    .col(
                        ColumnDef::new(Certificates::IssuedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Certificates::Table, Certificates::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Certificates::Table, Certificates::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 课表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schedules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Schedules::GroupId).big_integer().not_null())
                    .col(ColumnDef::new(Schedules::LessonId).big_integer().not_null())
                    .col(ColumnDef::new(Schedules::DayOfWeek).string_len(10).not_null())
                    .col(ColumnDef::new(Schedules::StartTime).time().not_null())
                    .col(ColumnDef::new(Schedules::EndTime).time().not_null())
                    .col(ColumnDef::new(Schedules::Room).string_len(50).null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Schedules::Table, Schedules::GroupId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Schedules::Table, Schedules::LessonId)
                            .to(Lessons::Table, Lessons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 唯一约束 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_student_progress_student_lesson")
                    .table(StudentProgress::Table)
                    .col(StudentProgress::StudentId)
                    .col(StudentProgress::LessonId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_progress_videos_progress_video")
                    .table(ProgressVideos::Table)
                    .col(ProgressVideos::ProgressId)
                    .col(ProgressVideos::VideoId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_certificates_student_course")
                    .table(Certificates::Table)
                    .col(Certificates::StudentId)
                    .col(Certificates::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uk_schedules_slot")
                    .table(Schedules::Table)
                    .col(Schedules::GroupId)
                    .col(Schedules::LessonId)
                    .col(Schedules::DayOfWeek)
                    .col(Schedules::StartTime)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_certificates_student_id")
                    .table(Certificates::Table)
                    .col(Certificates::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Certificates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProgressVideos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentProgress::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum StudentProgress {
    #[sea_orm(iden = "student_progress")]
    Table,
    Id,
    StudentId,
    LessonId,
    TestPassed,
    TestScore,
    Attended,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProgressVideos {
    #[sea_orm(iden = "progress_videos")]
    Table,
    Id,
    ProgressId,
    VideoId,
    WatchedAt,
}

#[derive(DeriveIden)]
enum Certificates {
    #[sea_orm(iden = "certificates")]
    Table,
    Id,
    StudentId,
    CourseId,
    TestScore,
    CertificateId,
    PdfFile,
    IssuedAt,
}

#[derive(DeriveIden)]
enum Schedules {
    #[sea_orm(iden = "schedules")]
    Table,
    Id,
    GroupId,
    LessonId,
    DayOfWeek,
    StartTime,
    EndTime,
    Room,
}
