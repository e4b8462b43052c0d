use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonTestService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_test(
    service: &LessonTestService,
    request: &HttpRequest,
    test_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_lesson_test(test_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("测验删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TestNotFound,
            "Test not found",
        ))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to delete test", e))),
    }
}
