use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::models::dashboard::responses::{DashboardLesson, DashboardResponse};

/// 今天的课时（按开始时间排序），每个课时附带学生进度，缺失时自动创建
pub async fn get_today(
    service: &DashboardService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);
    let today = chrono::Local::now().date_naive();

    let lessons = match storage.list_lessons_by_date(today).await {
        Ok(lessons) => lessons,
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load today's lessons", e)));
        }
    };

    let mut items = Vec::with_capacity(lessons.len());
    for lesson in lessons {
        match storage.get_or_create_progress(user.id, lesson.id).await {
            Ok(progress) => items.push(DashboardLesson { lesson, progress }),
            Err(e) => {
                return Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::internal_error("Failed to load progress", e)));
            }
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        DashboardResponse {
            date: today,
            lessons: items,
        },
        "获取成功",
    )))
}
