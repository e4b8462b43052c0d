pub mod auth;
pub mod certificates;
pub mod courses;
pub mod dashboard;
pub mod files;
pub mod lesson_tests;
pub mod lessons;
pub mod schedules;
pub mod users;
pub mod videos;

pub use auth::AuthService;
pub use certificates::CertificateService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use files::FileService;
pub use lesson_tests::LessonTestService;
pub use lessons::LessonService;
pub use schedules::ScheduleService;
pub use users::UserService;
pub use videos::VideoService;
