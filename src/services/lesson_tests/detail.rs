use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonTestService;
use crate::models::lesson_tests::responses::TestDetailResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_test_detail(
    service: &LessonTestService,
    request: &HttpRequest,
    test_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let test = match storage.get_lesson_test_by_id(test_id).await {
        Ok(Some(test)) => test,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TestNotFound,
                "Test not found",
            )));
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load test", e)));
        }
    };

    match storage.list_questions_with_choices(test.id).await {
        Ok(questions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TestDetailResponse { test, questions },
            "获取成功",
        ))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to load questions", e))),
    }
}
