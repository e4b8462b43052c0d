use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::LessonTestService;
use crate::middlewares::RequireJWT;
use crate::models::lesson_tests::entities::LessonTest;
use crate::models::lesson_tests::responses::{QuestionView, TestPageResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::lessons::LessonProgressContext;
use crate::storage::Storage;

/// 答题前的统一检查：课时存在、有测验、视频已全部看完
pub(crate) async fn load_unlocked_test(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    lesson_id: i64,
) -> Result<(LessonProgressContext, LessonTest), HttpResponse> {
    let context = match LessonProgressContext::load(storage, student_id, lesson_id).await {
        Ok(Some(context)) => context,
        Ok(None) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::LessonNotFound,
                "Lesson not found",
            )));
        }
        Err(e) => {
            return Err(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load progress", e)));
        }
    };

    let test = match storage.get_lesson_test_by_lesson(lesson_id).await {
        Ok(Some(test)) => test,
        Ok(None) => {
            return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::TestLocked,
                "This lesson has no test",
            )));
        }
        Err(e) => {
            return Err(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("Failed to load test", e)));
        }
    };

    if !context.all_videos_watched() {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::TestLocked,
            "Watch all videos of the lesson before taking the test",
        )));
    }

    Ok((context, test))
}

pub async fn get_test_page(
    service: &LessonTestService,
    request: &HttpRequest,
    lesson_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match RequireJWT::require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let (_, test) = match load_unlocked_test(&storage, user.id, lesson_id).await {
        Ok(loaded) => loaded,
        Err(response) => return Ok(response),
    };

    match storage.list_questions_with_choices(test.id).await {
        Ok(questions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TestPageResponse {
                lesson_id,
                test,
                questions: questions.into_iter().map(QuestionView::from).collect(),
            },
            "获取成功",
        ))),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(ApiResponse::internal_error("Failed to load questions", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lesson_tests::requests::{
        CreateChoiceRequest, CreateQuestionRequest, CreateTestRequest,
    };
    use crate::storage::sea_orm_storage::test_support::{
        json_body, memory_storage, request_as, seed_lesson, seed_student, seed_video,
    };
    use actix_web::http::StatusCode;

    async fn seed_test(storage: &Arc<dyn Storage>, lesson_id: i64) -> LessonTest {
        let test = storage
            .create_lesson_test(CreateTestRequest {
                lesson_id: Some(lesson_id),
                title: "Quiz".to_string(),
            })
            .await
            .unwrap();
        storage
            .create_question(
                test.id,
                CreateQuestionRequest {
                    text: "2 + 2?".to_string(),
                    choices: vec![
                        CreateChoiceRequest {
                            text: "4".to_string(),
                            is_correct: true,
                        },
                        CreateChoiceRequest {
                            text: "5".to_string(),
                            is_correct: false,
                        },
                    ],
                },
            )
            .await
            .unwrap();
        test
    }

    #[tokio::test]
    async fn test_lesson_without_test_is_locked() {
        let sea = memory_storage().await;
        let student = seed_student(&sea, "no-quiz").await;
        let lesson = seed_lesson(&sea, None, "Intro").await;
        let storage: Arc<dyn Storage> = Arc::new(sea);

        let request = request_as(&storage, &student);
        let response = LessonTestService::new_lazy()
            .get_test_page(&request, lesson.id)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(response).await["code"], ErrorCode::TestLocked as i32);
    }

    #[tokio::test]
    async fn test_page_requires_all_videos_watched() {
        let sea = memory_storage().await;
        let student = seed_student(&sea, "quiz-taker").await;
        let lesson = seed_lesson(&sea, None, "Lifetimes").await;
        let first = seed_video(&sea, lesson.id, student.id, 0).await;
        let second = seed_video(&sea, lesson.id, student.id, 1).await;
        let storage: Arc<dyn Storage> = Arc::new(sea);
        seed_test(&storage, lesson.id).await;

        let service = LessonTestService::new_lazy();
        let request = request_as(&storage, &student);
        let progress = storage
            .get_or_create_progress(student.id, lesson.id)
            .await
            .unwrap();
        storage.mark_video_watched(progress.id, first.id).await.unwrap();

        let response = service.get_test_page(&request, lesson.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(response).await["code"], ErrorCode::TestLocked as i32);

        storage.mark_video_watched(progress.id, second.id).await.unwrap();
        let response = service.get_test_page(&request, lesson.id).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let choices = &body["data"]["questions"][0]["choices"];
        assert_eq!(choices.as_array().map(Vec::len), Some(2));
        // 页面不暴露正确答案
        assert!(choices[0].get("is_correct").is_none());
    }

    #[tokio::test]
    async fn test_missing_lesson_is_not_found() {
        let sea = memory_storage().await;
        let student = seed_student(&sea, "wanderer").await;
        let storage: Arc<dyn Storage> = Arc::new(sea);

        let request = request_as(&storage, &student);
        let response = LessonTestService::new_lazy()
            .get_test_page(&request, 999)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
