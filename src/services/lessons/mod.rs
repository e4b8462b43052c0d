pub mod context;
pub mod create;
pub mod delete;
pub mod detail;
pub mod gating;
pub mod list;
pub mod update;

pub use context::LessonProgressContext;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::lessons::requests::{
    CreateLessonRequest, LessonListParams, UpdateLessonRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub(crate) const MAX_TITLE_CHARS: usize = 200;

pub struct LessonService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonService {
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

    // 学生视角的课时详情
    pub async fn get_lesson_detail(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_lesson_detail(self, request, lesson_id).await
    }

    pub async fn list_lessons(
        &self,
        request: &HttpRequest,
        query: LessonListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_lessons(self, request, query).await
    }

    pub async fn create_lesson(
        &self,
        request: &HttpRequest,
        lesson_data: CreateLessonRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_lesson(self, request, lesson_data).await
    }

    pub async fn update_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
        update_data: UpdateLessonRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_lesson(self, request, lesson_id, update_data).await
    }

    pub async fn delete_lesson(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_lesson(self, request, lesson_id).await
    }
}

/// 校验引用的课时资料文件是否存在
pub(crate) async fn check_file_token(
    storage: &Arc<dyn Storage>,
    file_token: Option<&str>,
) -> Result<(), HttpResponse> {
    let Some(token) = file_token else {
        return Ok(());
    };
    match storage.get_file_by_token(token).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "Referenced file not found",
        ))),
        Err(e) => Err(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to check file", e))),
    }
}
