use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, MAX_TITLE_CHARS};
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_title;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    mut course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_title(&course_data.title, MAX_TITLE_CHARS) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CatalogValidationFailed,
            msg,
        )));
    }
    course_data.title = course_data.title.trim().to_string();

    let storage = service.get_storage(request);

    match storage.create_course(course_data).await {
        Ok(course) => {
            tracing::info!("Course {} created: {}", course.id, course.title);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "课程创建成功")))
        }
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to create course", e))),
    }
}
