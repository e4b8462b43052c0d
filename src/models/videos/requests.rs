use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/video.ts")]
pub struct CreateVideoRequest {
    pub lesson_id: i64,
    pub title: String,
    /// 已上传视频文件的下载令牌
    pub file_token: String,
    pub sort_order: Option<i32>,
}
