//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod certificates;
mod courses;
mod files;
mod lesson_tests;
mod lessons;
mod progress;
mod schedules;
mod users;
mod videos;

use crate::config::AppConfig;
use crate::errors::{CourseHubError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);
        Ok(storage)
    }

    /// 基于已有连接构建存储，并执行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| CourseHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| CourseHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| CourseHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(CourseHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 唯一约束冲突（并发插入同一进度、证书等）
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::models::{
        courses::{entities::Course, requests::CreateCourseRequest},
        lessons::{entities::Lesson, requests::CreateLessonRequest},
        users::{
            entities::{User, UserProfile, UserRole},
            requests::CreateUserRequest,
        },
        videos::{entities::Video, requests::CreateVideoRequest},
    };
    use crate::storage::Storage;
    use actix_web::test::TestRequest;
    use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};
    use sea_orm::{ConnectOptions, Database};
    use std::sync::Arc;

    /// 内存 SQLite，单连接保证所有查询看到同一个库
    pub async fn memory_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .expect("in-memory sqlite should connect");
        SeaOrmStorage::from_connection(db)
            .await
            .expect("migrations should apply")
    }

    pub async fn seed_user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
        storage
            .create_user_impl(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@example.org"),
                password: "hash".to_string(),
                role,
                profile: UserProfile::default(),
                group_id: None,
            })
            .await
            .expect("user should be created")
    }

    pub async fn seed_student(storage: &SeaOrmStorage, username: &str) -> User {
        seed_user(storage, username, UserRole::Student).await
    }

    /// 模拟 RequireJWT 通过后的请求：注入存储与当前用户
    pub fn request_as(storage: &Arc<dyn Storage>, user: &User) -> HttpRequest {
        let request = TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .to_http_request();
        request.extensions_mut().insert(user.clone());
        request
    }

    /// 响应体解析为 JSON
    pub async fn json_body(response: HttpResponse) -> serde_json::Value {
        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("response body should be readable");
        serde_json::from_slice(&bytes).expect("response body should be json")
    }

    pub async fn seed_course(storage: &SeaOrmStorage, title: &str) -> Course {
        storage
            .create_course_impl(CreateCourseRequest {
                title: title.to_string(),
                description: None,
            })
            .await
            .expect("course should be created")
    }

    pub async fn seed_lesson(
        storage: &SeaOrmStorage,
        course_id: Option<i64>,
        title: &str,
    ) -> Lesson {
        storage
            .create_lesson_impl(CreateLessonRequest {
                course_id,
                title: title.to_string(),
                description: None,
                date: None,
                start_time: None,
                sort_order: None,
                file_token: None,
            })
            .await
            .expect("lesson should be created")
    }

    pub async fn seed_video(
        storage: &SeaOrmStorage,
        lesson_id: i64,
        uploader_id: i64,
        sort_order: i32,
    ) -> Video {
        let file = storage
            .upload_file_impl("clip.mp4", "stored.bin", &1024, "video/mp4", uploader_id)
            .await
            .expect("file record should be created");
        storage
            .create_video_impl(CreateVideoRequest {
                lesson_id,
                title: format!("Video {sort_order}"),
                file_token: file.download_token,
                sort_order: Some(sort_order),
            })
            .await
            .expect("video should be created")
    }
}

// Storage trait 实现
use crate::models::{
    auth::requests::UpdateProfileRequest,
    certificates::{entities::Certificate, responses::CertificateListItem},
    courses::{
        entities::Course,
        requests::{CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    files::entities::File,
    lesson_tests::{
        entities::{Choice, LessonTest, QuestionWithChoices},
        requests::{CreateChoiceRequest, CreateQuestionRequest, CreateTestRequest},
    },
    lessons::{
        entities::Lesson,
        requests::{CreateLessonRequest, UpdateLessonRequest},
        responses::LessonListResponse,
    },
    progress::entities::StudentProgress,
    schedules::{entities::Schedule, requests::CreateScheduleRequest, responses::ScheduleItem},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
    videos::{entities::Video, requests::CreateVideoRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_user_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>> {
        self.update_user_profile_impl(id, update).await
    }

    async fn update_user_password(&self, id: i64, password_hash: &str) -> Result<bool> {
        self.update_user_password_impl(id, password_hash).await
    }

    async fn assign_user_group(&self, id: i64, group_id: Option<i64>) -> Result<Option<User>> {
        self.assign_user_group_impl(id, group_id).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 文件模块
    async fn upload_file(
        &self,
        original_name: &str,
        stored_name: &str,
        file_size: &i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        self.upload_file_impl(original_name, stored_name, file_size, file_type, user_id)
            .await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(token).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        page: i64,
        size: i64,
        search: Option<String>,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(page, size, search)
            .await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // 课时模块
    async fn create_lesson(&self, lesson: CreateLessonRequest) -> Result<Lesson> {
        self.create_lesson_impl(lesson).await
    }

    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_by_id_impl(lesson_id).await
    }

    async fn list_lessons_with_pagination(
        &self,
        page: i64,
        size: i64,
        course_id: Option<i64>,
    ) -> Result<LessonListResponse> {
        self.list_lessons_with_pagination_impl(page, size, course_id)
            .await
    }

    async fn list_lessons_by_course(&self, course_id: i64) -> Result<Vec<Lesson>> {
        self.list_lessons_by_course_impl(course_id).await
    }

    async fn list_lessons_by_date(&self, date: chrono::NaiveDate) -> Result<Vec<Lesson>> {
        self.list_lessons_by_date_impl(date).await
    }

    async fn update_lesson(
        &self,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>> {
        self.update_lesson_impl(lesson_id, update).await
    }

    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool> {
        self.delete_lesson_impl(lesson_id).await
    }

    // 视频模块
    async fn create_video(&self, video: CreateVideoRequest) -> Result<Video> {
        self.create_video_impl(video).await
    }

    async fn get_video_by_id(&self, video_id: i64) -> Result<Option<Video>> {
        self.get_video_by_id_impl(video_id).await
    }

    async fn list_videos_by_lesson(&self, lesson_id: i64) -> Result<Vec<Video>> {
        self.list_videos_by_lesson_impl(lesson_id).await
    }

    async fn delete_video(&self, video_id: i64) -> Result<bool> {
        self.delete_video_impl(video_id).await
    }

    // 测验模块
    async fn create_lesson_test(&self, test: CreateTestRequest) -> Result<LessonTest> {
        self.create_lesson_test_impl(test).await
    }

    async fn get_lesson_test_by_id(&self, test_id: i64) -> Result<Option<LessonTest>> {
        self.get_lesson_test_by_id_impl(test_id).await
    }

    async fn get_lesson_test_by_lesson(&self, lesson_id: i64) -> Result<Option<LessonTest>> {
        self.get_lesson_test_by_lesson_impl(lesson_id).await
    }

    async fn list_questions_with_choices(&self, test_id: i64) -> Result<Vec<QuestionWithChoices>> {
        self.list_questions_with_choices_impl(test_id).await
    }

    async fn create_question(
        &self,
        test_id: i64,
        question: CreateQuestionRequest,
    ) -> Result<QuestionWithChoices> {
        self.create_question_impl(test_id, question).await
    }

    async fn add_choice(
        &self,
        question_id: i64,
        choice: CreateChoiceRequest,
    ) -> Result<Option<Choice>> {
        self.add_choice_impl(question_id, choice).await
    }

    async fn delete_lesson_test(&self, test_id: i64) -> Result<bool> {
        self.delete_lesson_test_impl(test_id).await
    }

    async fn delete_question(&self, question_id: i64) -> Result<bool> {
        self.delete_question_impl(question_id).await
    }

    // 进度模块
    async fn get_or_create_progress(
        &self,
        student_id: i64,
        lesson_id: i64,
    ) -> Result<StudentProgress> {
        self.get_or_create_progress_impl(student_id, lesson_id).await
    }

    async fn mark_video_watched(&self, progress_id: i64, video_id: i64) -> Result<bool> {
        self.mark_video_watched_impl(progress_id, video_id).await
    }

    async fn set_progress_attended(&self, progress_id: i64, attended: bool) -> Result<bool> {
        self.set_progress_attended_impl(progress_id, attended).await
    }

    async fn record_test_result(
        &self,
        progress_id: i64,
        passed: bool,
        score: f64,
        attended: bool,
    ) -> Result<bool> {
        self.record_test_result_impl(progress_id, passed, score, attended)
            .await
    }

    async fn list_progress_for_lessons(
        &self,
        student_id: i64,
        lesson_ids: &[i64],
    ) -> Result<Vec<StudentProgress>> {
        self.list_progress_for_lessons_impl(student_id, lesson_ids)
            .await
    }

    // 证书模块
    async fn create_certificate(
        &self,
        student_id: i64,
        course_id: i64,
        test_score: f64,
        certificate_id: &str,
    ) -> Result<(Certificate, bool)> {
        self.create_certificate_impl(student_id, course_id, test_score, certificate_id)
            .await
    }

    async fn get_certificate_by_id(&self, id: i64) -> Result<Option<Certificate>> {
        self.get_certificate_by_id_impl(id).await
    }

    async fn get_certificate_by_uuid(&self, certificate_id: &str) -> Result<Option<Certificate>> {
        self.get_certificate_by_uuid_impl(certificate_id).await
    }

    async fn list_certificates_by_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<CertificateListItem>> {
        self.list_certificates_by_student_impl(student_id).await
    }

    async fn set_certificate_pdf(&self, id: i64, pdf_file: Option<String>) -> Result<bool> {
        self.set_certificate_pdf_impl(id, pdf_file).await
    }

    // 课表模块
    async fn create_schedule(&self, schedule: CreateScheduleRequest) -> Result<Schedule> {
        self.create_schedule_impl(schedule).await
    }

    async fn list_schedules_by_group(&self, group_id: i64) -> Result<Vec<ScheduleItem>> {
        self.list_schedules_by_group_impl(group_id).await
    }

    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool> {
        self.delete_schedule_impl(schedule_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("coursehub.db").unwrap(),
            "sqlite://coursehub.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/lms").unwrap(),
            "postgres://u:p@localhost/lms"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }
}
