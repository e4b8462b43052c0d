use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::VideoService;
use crate::models::videos::requests::CreateVideoRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::lessons::{MAX_TITLE_CHARS, check_file_token};
use crate::utils::validate::validate_title;

pub async fn create_video(
    service: &VideoService,
    request: &HttpRequest,
    mut video_data: CreateVideoRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_title(&video_data.title, MAX_TITLE_CHARS) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CatalogValidationFailed,
            msg,
        )));
    }
    video_data.title = video_data.title.trim().to_string();

    let storage = service.get_storage(request);

    match storage.get_lesson_by_id(video_data.lesson_id).await {
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

    if let Err(response) = check_file_token(&storage, Some(&video_data.file_token)).await {
        return Ok(response);
    }

    match storage.create_video(video_data).await {
        Ok(video) => {
            tracing::info!("Video {} added to lesson {}", video.id, video.lesson_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(video, "视频创建成功")))
        }
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to create video", e))),
    }
}
