pub mod create;
pub mod delete;
pub mod stream;
pub mod watched;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::videos::requests::CreateVideoRequest;
use crate::storage::Storage;

pub struct VideoService {
    storage: Option<Arc<dyn Storage>>,
}

impl VideoService {
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

    // 标记视频已观看
    pub async fn mark_watched(
        &self,
        request: &HttpRequest,
        video_id: i64,
    ) -> ActixResult<HttpResponse> {
        watched::mark_watched(self, request, video_id).await
    }

    // 播放视频文件
    pub async fn stream_video(
        &self,
        request: &HttpRequest,
        video_id: i64,
    ) -> ActixResult<HttpResponse> {
        stream::stream_video(self, request, video_id).await
    }

    pub async fn create_video(
        &self,
        request: &HttpRequest,
        video_data: CreateVideoRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_video(self, request, video_data).await
    }

    pub async fn delete_video(
        &self,
        request: &HttpRequest,
        video_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_video(self, request, video_id).await
    }
}
