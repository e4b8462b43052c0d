use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonService, MAX_TITLE_CHARS, check_file_token};
use crate::models::lessons::requests::UpdateLessonRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_title;

pub async fn update_lesson(
    service: &LessonService,
    request: &HttpRequest,
    lesson_id: i64,
    mut update_data: UpdateLessonRequest,
) -> ActixResult<HttpResponse> {
    if let Some(title) = update_data.title.as_deref() {
        if let Err(msg) = validate_title(title, MAX_TITLE_CHARS) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::CatalogValidationFailed,
                msg,
            )));
        }
        update_data.title = Some(title.trim().to_string());
    }

    let storage = service.get_storage(request);

    if let Err(response) = check_file_token(&storage, update_data.file_token.as_deref()).await {
        return Ok(response);
    }

    match storage.update_lesson(lesson_id, update_data).await {
        Ok(Some(lesson)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(lesson, "课时更新成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::LessonNotFound,
            "Lesson not found",
        ))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to update lesson", e))),
    }
}
