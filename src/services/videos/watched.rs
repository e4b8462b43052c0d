use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::VideoService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::videos::responses::VideoWatchedResponse;
use crate::services::lessons::{LessonProgressContext, gating};

/// 非 POST 请求的统一响应
pub fn post_required() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(VideoWatchedResponse::error("POST required"))
}

pub async fn mark_watched(
    service: &VideoService,
    request: &HttpRequest,
    video_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(VideoWatchedResponse::error("Unauthorized")));
    };
    let storage = service.get_storage(request);

    let video = match storage.get_video_by_id(video_id).await {
        Ok(Some(video)) => video,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(VideoWatchedResponse::error("Video not found")));
        }
        Err(e) => {
            tracing::error!("Failed to load video {}: {}", video_id, e);
            return Ok(HttpResponse::InternalServerError()
                .json(VideoWatchedResponse::error("Internal server error")));
        }
    };

    let context = match LessonProgressContext::load(&storage, user.id, video.lesson_id).await {
        Ok(Some(context)) => context,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(VideoWatchedResponse::error("Lesson not found")));
        }
        Err(e) => {
            tracing::error!("Failed to load progress for video {}: {}", video_id, e);
            return Ok(HttpResponse::InternalServerError()
                .json(VideoWatchedResponse::error("Internal server error")));
        }
    };

    // 学生只能标记已解锁的视频
    let mut watched = context.watched();
    if user.role == UserRole::Student
        && gating::is_video_unlocked(&context.video_ids(), &watched, video_id) != Some(true)
    {
        return Ok(HttpResponse::Forbidden().json(VideoWatchedResponse::error("Video is locked")));
    }

    let progress_id = context.progress.id;
    if let Err(e) = storage.mark_video_watched(progress_id, video_id).await {
        tracing::error!("Failed to mark video {} watched: {}", video_id, e);
        return Ok(HttpResponse::InternalServerError()
            .json(VideoWatchedResponse::error("Internal server error")));
    }
    watched.insert(video_id);

    // 视频全部看完且测验已通过时记为出勤
    if !context.progress.attended
        && context.progress.test_passed
        && gating::can_take_test(&context.video_ids(), &watched)
        && let Err(e) = storage.set_progress_attended(progress_id, true).await
    {
        tracing::warn!("Failed to update attendance for progress {}: {}", progress_id, e);
    }

    tracing::debug!("User {} watched video {}", user.id, video_id);
    Ok(HttpResponse::Ok().json(VideoWatchedResponse::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::{
        json_body, memory_storage, request_as, seed_lesson, seed_student, seed_user, seed_video,
    };
    use actix_web::http::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_locked_video_rejected_for_student_allowed_for_teacher() {
        let sea = memory_storage().await;
        let student = seed_student(&sea, "viewer").await;
        let teacher = seed_user(&sea, "lecturer", UserRole::Teacher).await;
        let lesson = seed_lesson(&sea, None, "Ownership").await;
        let first = seed_video(&sea, lesson.id, teacher.id, 0).await;
        let second = seed_video(&sea, lesson.id, teacher.id, 1).await;
        let third = seed_video(&sea, lesson.id, teacher.id, 2).await;
        let storage: Arc<dyn Storage> = Arc::new(sea);
        let service = VideoService::new_lazy();

        let as_student = request_as(&storage, &student);
        let response = service.mark_watched(&as_student, third.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = json_body(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["detail"], "Video is locked");

        // 按顺序观看后逐个解锁
        for video in [&first, &second, &third] {
            let response = service.mark_watched(&as_student, video.id).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        // 教师不受顺序限制
        let as_teacher = request_as(&storage, &teacher);
        let response = service.mark_watched(&as_teacher, third.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_last_video_after_passed_test_marks_attended() {
        let sea = memory_storage().await;
        let student = seed_student(&sea, "late-viewer").await;
        let lesson = seed_lesson(&sea, None, "Traits").await;
        let video = seed_video(&sea, lesson.id, student.id, 0).await;
        let storage: Arc<dyn Storage> = Arc::new(sea);

        let progress = storage
            .get_or_create_progress(student.id, lesson.id)
            .await
            .unwrap();
        storage
            .record_test_result(progress.id, true, 100.0, false)
            .await
            .unwrap();

        let request = request_as(&storage, &student);
        let response = VideoService::new_lazy()
            .mark_watched(&request, video.id)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let progress = storage
            .get_or_create_progress(student.id, lesson.id)
            .await
            .unwrap();
        assert!(progress.attended);
        assert!(progress.test_passed);
    }

    #[tokio::test]
    async fn test_unknown_video_is_not_found() {
        let sea = memory_storage().await;
        let student = seed_student(&sea, "lost").await;
        let storage: Arc<dyn Storage> = Arc::new(sea);

        let request = request_as(&storage, &student);
        let response = VideoService::new_lazy()
            .mark_watched(&request, 404)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_post_required_body() {
        let response = post_required();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = json_body(response).await;
        assert_eq!(body, serde_json::json!({"status": "error", "detail": "POST required"}));
    }
}
