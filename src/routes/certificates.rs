use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::certificates::requests::CertificateListParams;
use crate::models::users::entities::UserRole;
use crate::services::CertificateService;
use crate::utils::{SafeIDI64, SafeToken};

// 懒加载的全局 CertificateService 实例
static CERTIFICATE_SERVICE: Lazy<CertificateService> = Lazy::new(CertificateService::new_lazy);

pub async fn list_certificates(
    req: HttpRequest,
    query: web::Query<CertificateListParams>,
) -> ActixResult<HttpResponse> {
    CERTIFICATE_SERVICE
        .list_certificates(&req, query.into_inner())
        .await
}

pub async fn download_certificate(
    req: HttpRequest,
    certificate_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    CERTIFICATE_SERVICE
        .download_certificate(&req, certificate_id.0)
        .await
}

pub async fn verify_certificate(req: HttpRequest, uuid: SafeToken) -> ActixResult<HttpResponse> {
    CERTIFICATE_SERVICE.verify_certificate(&req, &uuid.0).await
}

pub async fn regenerate_certificate(
    req: HttpRequest,
    certificate_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    CERTIFICATE_SERVICE
        .regenerate_certificate(&req, certificate_id.0)
        .await
}

// 配置路由
pub fn configure_certificate_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/certificates")
            // 公开验证接口，不需要登录
            .service(
                web::resource("/verify/{token}")
                    .wrap(RateLimit::certificate_verify())
                    .route(web::get().to(verify_certificate)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("", web::get().to(list_certificates))
                    .route("/{id}/download", web::get().to(download_certificate))
                    .service(
                        web::resource("/{id}/regenerate")
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                            .route(web::post().to(regenerate_certificate)),
                    ),
            ),
    );
}
