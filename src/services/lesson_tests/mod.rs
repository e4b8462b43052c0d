pub mod create;
pub mod delete;
pub mod detail;
pub mod page;
pub mod questions;
pub mod scoring;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::lesson_tests::requests::{
    CreateChoiceRequest, CreateQuestionRequest, CreateTestRequest, SubmitTestRequest,
};
use crate::storage::Storage;

pub struct LessonTestService {
    storage: Option<Arc<dyn Storage>>,
}

impl LessonTestService {
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

    // 学生答题页面
    pub async fn get_test_page(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
    ) -> ActixResult<HttpResponse> {
        page::get_test_page(self, request, lesson_id).await
    }

    // 提交答卷
    pub async fn submit_test(
        &self,
        request: &HttpRequest,
        lesson_id: i64,
        submission: SubmitTestRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_test(self, request, lesson_id, submission).await
    }

    pub async fn create_test(
        &self,
        request: &HttpRequest,
        test_data: CreateTestRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_test(self, request, test_data).await
    }

    pub async fn get_test_detail(
        &self,
        request: &HttpRequest,
        test_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_test_detail(self, request, test_id).await
    }

    pub async fn delete_test(
        &self,
        request: &HttpRequest,
        test_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_test(self, request, test_id).await
    }

    pub async fn add_question(
        &self,
        request: &HttpRequest,
        test_id: i64,
        question: CreateQuestionRequest,
    ) -> ActixResult<HttpResponse> {
        questions::add_question(self, request, test_id, question).await
    }

    pub async fn add_choice(
        &self,
        request: &HttpRequest,
        question_id: i64,
        choice: CreateChoiceRequest,
    ) -> ActixResult<HttpResponse> {
        questions::add_choice(self, request, question_id, choice).await
    }

    pub async fn delete_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        questions::delete_question(self, request, question_id).await
    }
}
