use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header, web};

use super::VideoService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::lessons::{LessonProgressContext, gating};
use crate::utils::content_type_for;

fn file_missing() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::FileNotFound,
        "File not found",
    ))
}

pub async fn stream_video(
    service: &VideoService,
    request: &HttpRequest,
    video_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let video = match storage.get_video_by_id(video_id).await {
        Ok(Some(video)) => video,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::VideoNotFound,
                "Video not found",
            )));
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load video", e)));
        }
    };

    if user.role == UserRole::Student {
        let context = match LessonProgressContext::load(&storage, user.id, video.lesson_id).await {
            Ok(Some(context)) => context,
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::LessonNotFound,
                    "Lesson not found",
                )));
            }
            Err(e) => {
                return Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::internal_error("Failed to load progress", e)));
            }
        };
        if gating::is_video_unlocked(&context.video_ids(), &context.watched(), video_id)
            != Some(true)
        {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::VideoLocked,
                "Watch the previous video first",
            )));
        }
    }

    let file = match storage.get_file_by_token(&video.file_token).await {
        Ok(Some(file)) => file,
        Ok(None) => return Ok(file_missing()),
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load video file", e)));
        }
    };

    let path = file.disk_path(&AppConfig::get().upload.dir);
    let bytes = match web::block(move || std::fs::read(path)).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            tracing::warn!("Video file for {} unreadable: {}", video_id, e);
            return Ok(file_missing());
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to read video file", e)));
        }
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type_for(&file.original_name)))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", file.stored_name),
        ))
        .insert_header((header::CACHE_CONTROL, "private, no-store"))
        .body(bytes))
}
