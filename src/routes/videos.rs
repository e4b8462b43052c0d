use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::videos::requests::CreateVideoRequest;
use crate::services::VideoService;
use crate::services::videos::watched::post_required;
use crate::utils::SafeIDI64;

// 懒加载的全局 VideoService 实例
static VIDEO_SERVICE: Lazy<VideoService> = Lazy::new(VideoService::new_lazy);

pub async fn mark_watched(req: HttpRequest, video_id: SafeIDI64) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.mark_watched(&req, video_id.0).await
}

pub async fn watched_method_not_allowed() -> HttpResponse {
    post_required()
}

pub async fn stream_video(req: HttpRequest, video_id: SafeIDI64) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.stream_video(&req, video_id.0).await
}

pub async fn create_video(
    req: HttpRequest,
    video_data: web::Json<CreateVideoRequest>,
) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.create_video(&req, video_data.into_inner()).await
}

pub async fn delete_video(req: HttpRequest, video_id: SafeIDI64) -> ActixResult<HttpResponse> {
    VIDEO_SERVICE.delete_video(&req, video_id.0).await
}

// 标记观看只接受 POST，其余方法统一返回 405
fn watched_resource() -> actix_web::Resource {
    web::resource("/{id}/watched")
        .route(web::post().to(mark_watched))
        .default_service(web::route().to(watched_method_not_allowed))
}

// 配置路由
pub fn configure_video_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/videos")
            .wrap(middlewares::RequireJWT)
            .service(watched_resource())
            .route("/{id}/stream", web::get().to(stream_video))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::post().to(create_video))
                    .route("/{id}", web::delete().to(delete_video)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn test_watched_rejects_non_post() {
        let app = test::init_service(App::new().service(watched_resource())).await;

        for req in [
            test::TestRequest::get().uri("/7/watched"),
            test::TestRequest::put().uri("/7/watched"),
        ] {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["status"], "error");
            assert_eq!(body["detail"], "POST required");
        }
    }
}
