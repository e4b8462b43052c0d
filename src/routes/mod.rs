pub mod auth;

pub mod users;

pub mod dashboard;

pub mod courses;

pub mod lessons;

pub mod videos;

pub mod lesson_tests;

pub mod schedules;

pub mod certificates;

pub mod files;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use certificates::configure_certificate_routes;
pub use courses::configure_course_routes;
pub use dashboard::configure_dashboard_routes;
pub use files::configure_file_routes;
pub use frontend::configure_frontend_routes;
pub use lesson_tests::configure_test_routes;
pub use lessons::configure_lesson_routes;
pub use schedules::configure_schedule_routes;
pub use users::configure_user_routes;
pub use videos::configure_video_routes;
