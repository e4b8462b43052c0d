use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CertificateService;
use super::issue::render_pdf;
use crate::config::AppConfig;
use crate::models::certificates::responses::RegenerateCertificateResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn regenerate_certificate(
    service: &CertificateService,
    request: &HttpRequest,
    certificate_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let mut certificate = match storage.get_certificate_by_id(certificate_id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
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

    match render_pdf(&storage, &certificate, &AppConfig::get().certificate).await {
        Ok(file_name) => {
            tracing::info!("Certificate {} PDF regenerated", certificate.certificate_id);
            certificate.pdf_file = Some(file_name);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                RegenerateCertificateResponse {
                    certificate,
                    pdf_generated: true,
                },
                "证书已重新生成",
            )))
        }
        Err(e) => {
            tracing::error!(
                "Failed to regenerate certificate {}: {}",
                certificate.certificate_id,
                e
            );
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::CertificateRenderFailed,
                "Failed to render certificate PDF",
            )))
        }
    }
}
