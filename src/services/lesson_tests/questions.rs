use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonTestService;
use crate::models::lesson_tests::requests::{CreateChoiceRequest, CreateQuestionRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_title;

const MAX_TEXT_CHARS: usize = 1000;

fn invalid_text(msg: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::CatalogValidationFailed,
        msg,
    ))
}

pub async fn add_question(
    service: &LessonTestService,
    request: &HttpRequest,
    test_id: i64,
    mut question: CreateQuestionRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_title(&question.text, MAX_TEXT_CHARS) {
        return Ok(invalid_text(msg));
    }
    for choice in &mut question.choices {
        if let Err(msg) = validate_title(&choice.text, MAX_TEXT_CHARS) {
            return Ok(invalid_text(msg));
        }
        choice.text = choice.text.trim().to_string();
    }
    question.text = question.text.trim().to_string();

    let storage = service.get_storage(request);

    match storage.get_lesson_test_by_id(test_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TestNotFound,
                "Test not found",
            )));
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load test", e)));
        }
    }

    match storage.create_question(test_id, question).await {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(created, "题目创建成功"))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to create question", e))),
    }
}

pub async fn add_choice(
    service: &LessonTestService,
    request: &HttpRequest,
    question_id: i64,
    mut choice: CreateChoiceRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_title(&choice.text, MAX_TEXT_CHARS) {
        return Ok(invalid_text(msg));
    }
    choice.text = choice.text.trim().to_string();

    let storage = service.get_storage(request);
    match storage.add_choice(question_id, choice).await {
        Ok(Some(created)) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(created, "选项创建成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to create choice", e))),
    }
}

pub async fn delete_question(
    service: &LessonTestService,
    request: &HttpRequest,
    question_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_question(question_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("题目删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "Question not found",
        ))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to delete question", e))),
    }
}
