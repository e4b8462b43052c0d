use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课时视频，(sort_order, id) 决定解锁顺序
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/video.ts")]
pub struct Video {
    pub id: i64,
    pub lesson_id: i64,
    pub title: String,
    pub file_token: String,
    pub sort_order: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
