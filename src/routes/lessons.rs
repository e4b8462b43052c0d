use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::lesson_tests::requests::SubmitTestRequest;
use crate::models::lessons::requests::{
    CreateLessonRequest, LessonListParams, UpdateLessonRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{LessonService, LessonTestService};
use crate::utils::SafeIDI64;

// 懒加载的全局实例
static LESSON_SERVICE: Lazy<LessonService> = Lazy::new(LessonService::new_lazy);
static LESSON_TEST_SERVICE: Lazy<LessonTestService> = Lazy::new(LessonTestService::new_lazy);

pub async fn get_lesson_detail(
    req: HttpRequest,
    lesson_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.get_lesson_detail(&req, lesson_id.0).await
}

pub async fn get_test_page(req: HttpRequest, lesson_id: SafeIDI64) -> ActixResult<HttpResponse> {
    LESSON_TEST_SERVICE.get_test_page(&req, lesson_id.0).await
}

pub async fn submit_test(
    req: HttpRequest,
    lesson_id: SafeIDI64,
    submission: web::Json<SubmitTestRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_TEST_SERVICE
        .submit_test(&req, lesson_id.0, submission.into_inner())
        .await
}

pub async fn list_lessons(
    req: HttpRequest,
    query: web::Query<LessonListParams>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.list_lessons(&req, query.into_inner()).await
}

pub async fn create_lesson(
    req: HttpRequest,
    lesson_data: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .create_lesson(&req, lesson_data.into_inner())
        .await
}

pub async fn update_lesson(
    req: HttpRequest,
    lesson_id: SafeIDI64,
    update_data: web::Json<UpdateLessonRequest>,
) -> ActixResult<HttpResponse> {
    LESSON_SERVICE
        .update_lesson(&req, lesson_id.0, update_data.into_inner())
        .await
}

pub async fn delete_lesson(req: HttpRequest, lesson_id: SafeIDI64) -> ActixResult<HttpResponse> {
    LESSON_SERVICE.delete_lesson(&req, lesson_id.0).await
}

// 配置路由
pub fn configure_lesson_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/lessons")
            .wrap(middlewares::RequireJWT)
            .route("/{id}", web::get().to(get_lesson_detail))
            .route("/{id}/test", web::get().to(get_test_page))
            .route("/{id}/test/submit", web::post().to(submit_test))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::get().to(list_lessons))
                    .route("", web::post().to(create_lesson))
                    .route("/{id}", web::put().to(update_lesson))
                    .route("/{id}", web::delete().to(delete_lesson)),
            ),
    );
}
