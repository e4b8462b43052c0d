use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::errors::CourseHubError;
use crate::models::schedules::requests::CreateScheduleRequest;
use crate::models::{ApiResponse, ErrorCode};

const MAX_ROOM_CHARS: usize = 50;

pub async fn create_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    mut schedule: CreateScheduleRequest,
) -> ActixResult<HttpResponse> {
    if schedule.end_time <= schedule.start_time {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ScheduleInvalidTimeRange,
            "End time must be after start time",
        )));
    }

    schedule.room = schedule
        .room
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());
    if schedule
        .room
        .as_ref()
        .is_some_and(|r| r.chars().count() > MAX_ROOM_CHARS)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CatalogValidationFailed,
            "Room must be at most 50 characters",
        )));
    }

    let storage = service.get_storage(request);

    match storage.get_course_by_id(schedule.group_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Group not found",
            )));
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load group", e)));
        }
    }
    match storage.get_lesson_by_id(schedule.lesson_id).await {
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

    match storage.create_schedule(schedule).await {
        Ok(created) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(created, "课表条目创建成功")))
        }
        Err(CourseHubError::Conflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::ScheduleSlotConflict, msg))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to create schedule", e))),
    }
}
