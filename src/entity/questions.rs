//! 题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub test_id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lesson_tests::Entity",
        from = "Column::TestId",
        to = "super::lesson_tests::Column::Id",
        on_delete = "Cascade"
    )]
    Test,
    #[sea_orm(has_many = "super::choices::Entity")]
    Choices,
}

impl Related<super::lesson_tests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Test.def()
    }
}

impl Related<super::choices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Choices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_question(self) -> crate::models::lesson_tests::entities::Question {
        crate::models::lesson_tests::entities::Question {
            id: self.id,
            test_id: self.test_id,
            text: self.text,
        }
    }
}
