use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonService, MAX_TITLE_CHARS, check_file_token};
use crate::models::lessons::requests::CreateLessonRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_title;

pub async fn create_lesson(
    service: &LessonService,
    request: &HttpRequest,
    mut lesson_data: CreateLessonRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_title(&lesson_data.title, MAX_TITLE_CHARS) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CatalogValidationFailed,
            msg,
        )));
    }
    lesson_data.title = lesson_data.title.trim().to_string();

    let storage = service.get_storage(request);

    if let Some(course_id) = lesson_data.course_id {
        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::CourseNotFound,
                    "Course not found",
                )));
            }
            Err(e) => {
                return Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::internal_error("Failed to load course", e)));
            }
        }
    }

    if let Err(response) = check_file_token(&storage, lesson_data.file_token.as_deref()).await {
        return Ok(response);
    }

    match storage.create_lesson(lesson_data).await {
        Ok(lesson) => {
            tracing::info!("Lesson {} created: {}", lesson.id, lesson.title);
            Ok(HttpResponse::Created().json(ApiResponse::success(lesson, "课时创建成功")))
        }
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to create lesson", e))),
    }
}
