use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::lesson_tests::requests::{
    CreateChoiceRequest, CreateQuestionRequest, CreateTestRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::LessonTestService;
use crate::utils::SafeIDI64;

// 懒加载的全局 LessonTestService 实例
static TEST_SERVICE: Lazy<LessonTestService> = Lazy::new(LessonTestService::new_lazy);

pub async fn create_test(
    req: HttpRequest,
    test_data: web::Json<CreateTestRequest>,
) -> ActixResult<HttpResponse> {
    TEST_SERVICE.create_test(&req, test_data.into_inner()).await
}

pub async fn get_test_detail(req: HttpRequest, test_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEST_SERVICE.get_test_detail(&req, test_id.0).await
}

pub async fn delete_test(req: HttpRequest, test_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TEST_SERVICE.delete_test(&req, test_id.0).await
}

pub async fn add_question(
    req: HttpRequest,
    test_id: SafeIDI64,
    question: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    TEST_SERVICE
        .add_question(&req, test_id.0, question.into_inner())
        .await
}

pub async fn add_choice(
    req: HttpRequest,
    question_id: SafeIDI64,
    choice: web::Json<CreateChoiceRequest>,
) -> ActixResult<HttpResponse> {
    TEST_SERVICE
        .add_choice(&req, question_id.0, choice.into_inner())
        .await
}

pub async fn delete_question(
    req: HttpRequest,
    question_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    TEST_SERVICE.delete_question(&req, question_id.0).await
}

// 配置路由（仅教师与管理员）
pub fn configure_test_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tests")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles()))
                    .route("", web::post().to(create_test))
                    .route("/questions/{id}", web::delete().to(delete_question))
                    .route("/questions/{id}/choices", web::post().to(add_choice))
                    .route("/{id}", web::get().to(get_test_detail))
                    .route("/{id}", web::delete().to(delete_test))
                    .route("/{id}/questions", web::post().to(add_question)),
            ),
    );
}
