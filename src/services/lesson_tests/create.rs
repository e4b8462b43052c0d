use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonTestService;
use crate::errors::CourseHubError;
use crate::models::lesson_tests::requests::CreateTestRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::lessons::MAX_TITLE_CHARS;
use crate::utils::validate::validate_title;

pub async fn create_test(
    service: &LessonTestService,
    request: &HttpRequest,
    mut test_data: CreateTestRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_title(&test_data.title, MAX_TITLE_CHARS) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CatalogValidationFailed,
            msg,
        )));
    }
    test_data.title = test_data.title.trim().to_string();

    let storage = service.get_storage(request);

    if let Some(lesson_id) = test_data.lesson_id {
        match storage.get_lesson_by_id(lesson_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::LessonNotFound,
                    "Lesson not found",
                )));
            }
            Err(e) => {
                return Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::internal_error("Failed to load lesson", e)));
            }
        }
    }

    match storage.create_lesson_test(test_data).await {
        Ok(test) => Ok(HttpResponse::Created().json(ApiResponse::success(test, "测验创建成功"))),
        Err(CourseHubError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::TestAlreadyExists, msg))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to create test", e))),
    }
}
