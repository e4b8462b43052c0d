pub mod download;
pub mod eligibility;
pub mod issue;
pub mod list;
pub mod pdf;
pub mod regenerate;
pub mod verify;

pub use issue::issue_if_eligible;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::certificates::requests::CertificateListParams;
use crate::storage::Storage;

pub struct CertificateService {
    storage: Option<Arc<dyn Storage>>,
}

impl CertificateService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn list_certificates(
        &self,
        request: &HttpRequest,
        query: CertificateListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_certificates(self, request, query).await
    }

    pub async fn download_certificate(
        &self,
        request: &HttpRequest,
        certificate_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::download_certificate(self, request, certificate_id).await
    }

    // 公开验证，无需登录
    pub async fn verify_certificate(
        &self,
        request: &HttpRequest,
        certificate_uuid: &str,
    ) -> ActixResult<HttpResponse> {
        verify::verify_certificate(self, request, certificate_uuid).await
    }

    pub async fn regenerate_certificate(
        &self,
        request: &HttpRequest,
        certificate_id: i64,
    ) -> ActixResult<HttpResponse> {
        regenerate::regenerate_certificate(self, request, certificate_id).await
    }
}
