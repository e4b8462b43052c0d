use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::LessonTestService;
use super::page::load_unlocked_test;
use super::scoring;
use crate::middlewares::RequireJWT;
use crate::models::certificates::responses::CertificateOutcome;
use crate::models::lesson_tests::requests::SubmitTestRequest;
use crate::models::lesson_tests::responses::TestSubmitResponse;
use crate::models::ApiResponse;
use crate::services::certificates::issue_if_eligible;

pub async fn submit_test(
    service: &LessonTestService,
    request: &HttpRequest,
    lesson_id: i64,
    submission: SubmitTestRequest,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let (context, test) = match load_unlocked_test(&storage, user.id, lesson_id).await {
        Ok(loaded) => loaded,
        Err(response) => return Ok(response),
    };

    let questions = match storage.list_questions_with_choices(test.id).await {
        Ok(questions) => questions,
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load questions", e)));
        }
    };

    let answers = scoring::normalize_answers(&submission.answers);
    let result = scoring::score_answers(&questions, &answers);

    // 出勤与测验是否通过保持一致
    if let Err(e) = storage
        .record_test_result(context.progress.id, result.passed, result.score, result.passed)
        .await
    {
        return Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to save test result", e)));
    }

    tracing::info!(
        "User {} submitted test {} for lesson {}: {}/{} ({:.1})",
        user.id,
        test.id,
        lesson_id,
        result.correct,
        result.total,
        result.score
    );

    let (certificate, notices) = if result.passed {
        match issue_if_eligible(&storage, user.id, &context.lesson, result.score).await {
            Ok(issued) => issued,
            Err(e) => {
                tracing::error!("Certificate check failed for user {}: {}", user.id, e);
                (
                    CertificateOutcome::NotApplicable,
                    vec!["Test passed, but the certificate status could not be checked".to_string()],
                )
            }
        }
    } else {
        (
            CertificateOutcome::NotApplicable,
            vec![format!(
                "Test not passed. At least {:.0}% is required",
                scoring::PASS_THRESHOLD
            )],
        )
    };

    let message = if result.passed { "测验通过" } else { "测验未通过" };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TestSubmitResponse {
            lesson_id,
            correct: result.correct,
            total: result.total,
            score: result.score,
            passed: result.passed,
            certificate,
            notices,
        },
        message,
    )))
}
