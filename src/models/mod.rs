pub mod auth;
pub mod certificates;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod files;
pub mod lesson_tests;
pub mod lessons;
pub mod progress;
pub mod schedules;
pub mod users;
pub mod videos;

pub use common::*;

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；1xxx 通用，2xxx 认证与用户，3xxx 文件，4xxx 课程目录，
/// 5xxx 学习进度与测验，6xxx 证书，7xxx 课表。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    MethodNotAllowed = 1005,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证与用户
    AuthFailed = 2000,
    UserNotFound = 2001,
    UserAlreadyExists = 2002,
    UserNameInvalid = 2003,
    UserEmailInvalid = 2004,
    UserPasswordInvalid = 2005,
    UserCreationFailed = 2006,
    UserUpdateFailed = 2007,
    UserOldPasswordIncorrect = 2008,
    UserProfileInvalid = 2009,

    // 文件
    FileNotFound = 3000,
    FileUploadFailed = 3001,
    FileTypeNotAllowed = 3002,
    FileSizeExceeded = 3003,
    MultifileUploadNotAllowed = 3004,

    // 课程目录
    CourseNotFound = 4000,
    LessonNotFound = 4001,
    VideoNotFound = 4002,
    TestNotFound = 4003,
    QuestionNotFound = 4004,
    TestAlreadyExists = 4005,
    CatalogValidationFailed = 4006,

    // 学习进度与测验
    VideoLocked = 5000,
    TestLocked = 5001,

    // 证书
    CertificateNotFound = 6000,
    CertificateNotReady = 6001,
    CertificateRenderFailed = 6002,

    // 课表
    ScheduleGroupNotAssigned = 7000,
    ScheduleSlotConflict = 7001,
    ScheduleInvalidTimeRange = 7002,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::TestLocked as i32, 5001);
        assert_eq!(ErrorCode::CertificateNotReady as i32, 6001);
    }

    #[test]
    fn test_api_response_carries_code() {
        let resp = ApiResponse::error_empty(ErrorCode::ScheduleGroupNotAssigned, "no group");
        assert_eq!(resp.code, 7000);
        assert!(resp.data.is_none());

        let ok = ApiResponse::success(42_i64, "ok");
        assert_eq!(ok.code, 0);
        assert_eq!(ok.data, Some(42));
    }
}
