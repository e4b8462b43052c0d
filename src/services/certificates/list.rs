use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CertificateService;
use crate::middlewares::RequireJWT;
use crate::models::certificates::requests::CertificateListParams;
use crate::models::certificates::responses::CertificateListResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_certificates(
    service: &CertificateService,
    request: &HttpRequest,
    query: CertificateListParams,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let student_id = match query.student_id {
        Some(id) if id != user.id && user.role != UserRole::Admin => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Only administrators can view other students' certificates",
            )));
        }
        Some(id) => id,
        None => user.id,
    };

    let storage = service.get_storage(request);
    match storage.list_certificates_by_student(student_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CertificateListResponse { items },
            "获取成功",
        ))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to list certificates", e))),
    }
}
