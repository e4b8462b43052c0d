use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ScheduleService, week};
use crate::middlewares::RequireJWT;
use crate::models::schedules::requests::WeekQuery;
use crate::models::schedules::responses::WeekScheduleResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_week_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    query: WeekQuery,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);

    // 会话缓存中的分组可能已过期，以数据库为准
    let group_id = match storage.get_user_by_id(user.id).await {
        Ok(fresh) => fresh.and_then(|u| u.group_id),
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load user", e)));
        }
    };
    let Some(group_id) = group_id else {
        return Ok(HttpResponse::Ok().json(ApiResponse::error_empty(
            ErrorCode::ScheduleGroupNotAssigned,
            "You are not assigned to any group",
        )));
    };

    let group_title = match storage.get_course_by_id(group_id).await {
        Ok(Some(course)) => course.title,
        Ok(None) => {
            return Ok(HttpResponse::Ok().json(ApiResponse::error_empty(
                ErrorCode::ScheduleGroupNotAssigned,
                "You are not assigned to any group",
            )));
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load group", e)));
        }
    };

    let items = match storage.list_schedules_by_group(group_id).await {
        Ok(items) => items,
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load schedule", e)));
        }
    };

    let today = chrono::Local::now().date_naive();
    let week_start = week::resolve_week_start(query.week.as_deref(), today);
    // resolve_week_start 只返回可前后翻页的周一
    let (prev_week, next_week) =
        week::adjacent_weeks(week_start).unwrap_or((week_start, week_start));

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        WeekScheduleResponse {
            group_id,
            group_title,
            week_start,
            prev_week,
            next_week,
            week_range: week::week_range(week_start),
            today,
            days: week::build_days(week_start, today, &items),
        },
        "获取成功",
    )))
}
