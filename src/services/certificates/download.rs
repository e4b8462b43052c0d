use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header, web};
use std::path::Path;

use super::CertificateService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

fn not_ready() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::CertificateNotReady,
        "Certificate is not ready yet",
    ))
}

pub async fn download_certificate(
    service: &CertificateService,
    request: &HttpRequest,
    certificate_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    // 非本人证书按不存在处理
    let certificate = match storage.get_certificate_by_id(certificate_id).await {
        Ok(Some(c)) if c.student_id == user.id || user.role == UserRole::Admin => c,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CertificateNotFound,
                "Certificate not found",
            )));
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load certificate", e)));
        }
    };

    let Some(pdf_file) = certificate.pdf_file.clone().filter(|f| !f.is_empty()) else {
        return Ok(not_ready());
    };

    let path = Path::new(&AppConfig::get().certificate.output_dir).join(&pdf_file);
    let bytes = match web::block(move || std::fs::read(path)).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            tracing::warn!(
                "PDF for certificate {} missing on disk: {}",
                certificate.certificate_id,
                e
            );
            return Ok(not_ready());
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to read certificate", e)));
        }
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/pdf"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"certificate_{}.pdf\"", certificate.short_id()),
        ))
        .body(bytes))
}
