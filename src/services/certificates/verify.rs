use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CertificateService;
use crate::models::ApiResponse;
use crate::models::certificates::responses::VerifyCertificateResponse;

pub async fn verify_certificate(
    service: &CertificateService,
    request: &HttpRequest,
    certificate_uuid: &str,
) -> ActixResult<HttpResponse> {
    // 非法 UUID 直接视为无效证书
    let Ok(parsed) = uuid::Uuid::parse_str(certificate_uuid.trim()) else {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            VerifyCertificateResponse::invalid(),
            "证书无效",
        )));
    };

    let storage = service.get_storage(request);
    let certificate = match storage.get_certificate_by_uuid(&parsed.to_string()).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return Ok(HttpResponse::Ok().json(ApiResponse::success(
                VerifyCertificateResponse::invalid(),
                "证书无效",
            )));
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to verify certificate", e)));
        }
    };

    let student_name = match storage.get_user_by_id(certificate.student_id).await {
        Ok(user) => user.map(|u| u.display_name().to_string()),
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load student", e)));
        }
    };
    let course_title = match storage.get_course_by_id(certificate.course_id).await {
        Ok(course) => course.map(|c| c.title),
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load course", e)));
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        VerifyCertificateResponse {
            valid: true,
            certificate: Some(certificate),
            student_name,
            course_title,
        },
        "证书有效",
    )))
}
