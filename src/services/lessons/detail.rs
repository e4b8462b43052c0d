use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LessonProgressContext, LessonService};
use crate::middlewares::RequireJWT;
use crate::models::lessons::responses::LessonDetailResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_lesson_detail(
    service: &LessonService,
    request: &HttpRequest,
    lesson_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let context = match LessonProgressContext::load(&storage, user.id, lesson_id).await {
        Ok(Some(context)) => context,
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
    };

    let has_test = match storage.get_lesson_test_by_lesson(lesson_id).await {
        Ok(test) => test.is_some(),
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load lesson test", e)));
        }
    };

    let unlocked_video_ids = context.unlocked_video_ids();
    let can_take_test = has_test && context.all_videos_watched();
    let LessonProgressContext {
        lesson,
        videos,
        progress,
    } = context;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        LessonDetailResponse {
            lesson,
            videos,
            unlocked_video_ids,
            watched_video_ids: progress.watched_video_ids.clone(),
            has_test,
            can_take_test,
            progress,
        },
        "Lesson retrieved successfully",
    )))
}
