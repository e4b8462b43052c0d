use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课时
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct Lesson {
    pub id: i64,
    pub course_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    /// 上课日期，仪表盘按它筛选"今天"
    pub date: Option<chrono::NaiveDate>,
    pub start_time: Option<chrono::NaiveTime>,
    pub sort_order: i32,
    /// 课时资料（可选）
    pub file_token: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
