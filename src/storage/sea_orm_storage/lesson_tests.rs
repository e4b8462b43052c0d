//! 测验、题目与选项存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::choices::{
    ActiveModel as ChoiceActiveModel, Column as ChoiceColumn, Entity as Choices,
};
use crate::entity::lesson_tests::{ActiveModel, Column, Entity as LessonTests};
use crate::entity::questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as Questions,
};
use crate::errors::{CourseHubError, Result};
use crate::models::lesson_tests::{
    entities::{Choice, LessonTest, QuestionWithChoices},
    requests::{CreateChoiceRequest, CreateQuestionRequest, CreateTestRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建测验，同一课时已有测验时返回冲突错误
    pub async fn create_lesson_test_impl(&self, req: CreateTestRequest) -> Result<LessonTest> {
        let model = ActiveModel {
            lesson_id: Set(req.lesson_id),
            title: Set(req.title),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(result) => Ok(result.into_lesson_test()),
            Err(e) if is_unique_violation(&e) => Err(CourseHubError::conflict(
                "This lesson already has a test",
            )),
            Err(e) => Err(CourseHubError::database_operation(format!(
                "创建测验失败: {e}"
            ))),
        }
    }

    pub async fn get_lesson_test_by_id_impl(&self, test_id: i64) -> Result<Option<LessonTest>> {
        let result = LessonTests::find_by_id(test_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询测验失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson_test()))
    }

    pub async fn get_lesson_test_by_lesson_impl(
        &self,
        lesson_id: i64,
    ) -> Result<Option<LessonTest>> {
        let result = LessonTests::find()
            .filter(Column::LessonId.eq(lesson_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课时测验失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson_test()))
    }

    /// 测验的全部题目及选项，均按 ID 排序
    pub async fn list_questions_with_choices_impl(
        &self,
        test_id: i64,
    ) -> Result<Vec<QuestionWithChoices>> {
        let questions = Questions::find()
            .filter(QuestionColumn::TestId.eq(test_id))
            .order_by_asc(QuestionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询题目失败: {e}")))?;

        if questions.is_empty() {
            return Ok(Vec::new());
        }

        let question_ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        let choices = Choices::find()
            .filter(ChoiceColumn::QuestionId.is_in(question_ids))
            .order_by_asc(ChoiceColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询选项失败: {e}")))?;

        let mut by_question: HashMap<i64, Vec<Choice>> = HashMap::new();
        for choice in choices {
            by_question
                .entry(choice.question_id)
                .or_default()
                .push(choice.into_choice());
        }

        Ok(questions
            .into_iter()
            .map(|q| {
                let choices = by_question.remove(&q.id).unwrap_or_default();
                QuestionWithChoices {
                    question: q.into_question(),
                    choices,
                }
            })
            .collect())
    }

    /// 创建题目及其选项（同一事务）
    pub async fn create_question_impl(
        &self,
        test_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<QuestionWithChoices> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("开启事务失败: {e}")))?;

        let question = QuestionActiveModel {
            test_id: Set(test_id),
            text: Set(req.text),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| CourseHubError::database_operation(format!("创建题目失败: {e}")))?;

        let mut choices = Vec::with_capacity(req.choices.len());
        for choice in req.choices {
            let model = ChoiceActiveModel {
                question_id: Set(question.id),
                text: Set(choice.text),
                is_correct: Set(choice.is_correct),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("创建选项失败: {e}")))?;
            choices.push(model.into_choice());
        }

        txn.commit()
            .await
            .map_err(|e| CourseHubError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(QuestionWithChoices {
            question: question.into_question(),
            choices,
        })
    }

    /// 为已有题目追加选项，题目不存在时返回 None
    pub async fn add_choice_impl(
        &self,
        question_id: i64,
        req: CreateChoiceRequest,
    ) -> Result<Option<Choice>> {
        let exists = Questions::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询题目失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let model = ChoiceActiveModel {
            question_id: Set(question_id),
            text: Set(req.text),
            is_correct: Set(req.is_correct),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| CourseHubError::database_operation(format!("创建选项失败: {e}")))?;

        Ok(Some(model.into_choice()))
    }

    pub async fn delete_lesson_test_impl(&self, test_id: i64) -> Result<bool> {
        let result = LessonTests::delete_by_id(test_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除测验失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete_question_impl(&self, question_id: i64) -> Result<bool> {
        let result = Questions::delete_by_id(question_id)
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("删除题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
