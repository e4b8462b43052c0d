use std::sync::Arc;

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
    schedules::{
        entities::Schedule, requests::CreateScheduleRequest, responses::ScheduleItem,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
    videos::{entities::Video, requests::CreateVideoRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息（管理员）
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新个人资料
    async fn update_user_profile(
        &self,
        id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<User>>;
    // 更新密码哈希
    async fn update_user_password(&self, id: i64, password_hash: &str) -> Result<bool>;
    // 分配学生分组
    async fn assign_user_group(&self, id: i64, group_id: Option<i64>) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 文件管理方法
    // 记录上传文件，返回带下载令牌的文件信息
    async fn upload_file(
        &self,
        original_name: &str,
        stored_name: &str,
        file_size: &i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    // 通过下载令牌获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;

    /// 课程管理方法
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        page: i64,
        size: i64,
        search: Option<String>,
    ) -> Result<CourseListResponse>;
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 课时管理方法
    async fn create_lesson(&self, lesson: CreateLessonRequest) -> Result<Lesson>;
    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>>;
    async fn list_lessons_with_pagination(
        &self,
        page: i64,
        size: i64,
        course_id: Option<i64>,
    ) -> Result<LessonListResponse>;
    // 课程的全部课时，按 (sort_order, id) 排序
    async fn list_lessons_by_course(&self, course_id: i64) -> Result<Vec<Lesson>>;
    // 指定日期的课时，按开始时间排序
    async fn list_lessons_by_date(&self, date: chrono::NaiveDate) -> Result<Vec<Lesson>>;
    async fn update_lesson(
        &self,
        lesson_id: i64,
        update: UpdateLessonRequest,
    ) -> Result<Option<Lesson>>;
    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool>;

    /// 视频管理方法
    async fn create_video(&self, video: CreateVideoRequest) -> Result<Video>;
    async fn get_video_by_id(&self, video_id: i64) -> Result<Option<Video>>;
    // 课时的全部视频，按 (sort_order, id) 排序
    async fn list_videos_by_lesson(&self, lesson_id: i64) -> Result<Vec<Video>>;
    async fn delete_video(&self, video_id: i64) -> Result<bool>;

    /// 测验管理方法
    async fn create_lesson_test(&self, test: CreateTestRequest) -> Result<LessonTest>;
    async fn get_lesson_test_by_id(&self, test_id: i64) -> Result<Option<LessonTest>>;
    async fn get_lesson_test_by_lesson(&self, lesson_id: i64) -> Result<Option<LessonTest>>;
    async fn list_questions_with_choices(&self, test_id: i64) -> Result<Vec<QuestionWithChoices>>;
    async fn create_question(
        &self,
        test_id: i64,
        question: CreateQuestionRequest,
    ) -> Result<QuestionWithChoices>;
    async fn add_choice(&self, question_id: i64, choice: CreateChoiceRequest)
    -> Result<Option<Choice>>;
    async fn delete_lesson_test(&self, test_id: i64) -> Result<bool>;
    async fn delete_question(&self, question_id: i64) -> Result<bool>;

    /// 学习进度方法
    // 获取或创建进度记录（容忍并发插入）
    async fn get_or_create_progress(&self, student_id: i64, lesson_id: i64)
    -> Result<StudentProgress>;
    // 记录已观看视频，返回是否为新记录
    async fn mark_video_watched(&self, progress_id: i64, video_id: i64) -> Result<bool>;
    async fn set_progress_attended(&self, progress_id: i64, attended: bool) -> Result<bool>;
    async fn record_test_result(
        &self,
        progress_id: i64,
        passed: bool,
        score: f64,
        attended: bool,
    ) -> Result<bool>;
    // 学生在指定课时上的已有进度（不创建）
    async fn list_progress_for_lessons(
        &self,
        student_id: i64,
        lesson_ids: &[i64],
    ) -> Result<Vec<StudentProgress>>;

    /// 证书方法
    // 创建证书；(student, course) 已存在时返回已有证书与 false
    async fn create_certificate(
        &self,
        student_id: i64,
        course_id: i64,
        test_score: f64,
        certificate_id: &str,
    ) -> Result<(Certificate, bool)>;
    async fn get_certificate_by_id(&self, id: i64) -> Result<Option<Certificate>>;
    async fn get_certificate_by_uuid(&self, certificate_id: &str) -> Result<Option<Certificate>>;
    async fn list_certificates_by_student(
        &self,
        student_id: i64,
    ) -> Result<Vec<CertificateListItem>>;
    async fn set_certificate_pdf(&self, id: i64, pdf_file: Option<String>) -> Result<bool>;

    /// 课表方法
    async fn create_schedule(&self, schedule: CreateScheduleRequest) -> Result<Schedule>;
    // 分组的全部课表条目（附课时标题），按开始时间排序
    async fn list_schedules_by_group(&self, group_id: i64) -> Result<Vec<ScheduleItem>>;
    async fn delete_schedule(&self, schedule_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
