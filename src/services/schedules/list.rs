use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScheduleService;
use crate::models::schedules::requests::ScheduleListParams;
use crate::models::schedules::responses::ScheduleListResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_schedules(
    service: &ScheduleService,
    request: &HttpRequest,
    query: ScheduleListParams,
) -> ActixResult<HttpResponse> {
    let Some(group_id) = query.group_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "group_id is required",
        )));
    };

    let storage = service.get_storage(request);
    match storage.list_schedules_by_group(group_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ScheduleListResponse { items },
            "获取成功",
        ))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to list schedules", e))),
    }
}
