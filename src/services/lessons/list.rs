use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonService;
use crate::models::ApiResponse;
use crate::models::lessons::requests::LessonListParams;

pub async fn list_lessons(
    service: &LessonService,
    request: &HttpRequest,
    query: LessonListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_lessons_with_pagination(
            query.pagination.page,
            query.pagination.size,
            query.course_id,
        )
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Lesson list retrieved successfully",
        ))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to list lessons", e))),
    }
}
