use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct File {
    // 下载令牌（主键）
    pub download_token: String,
    // 原始文件名
    pub original_name: String,
    // 磁盘上的随机文件名
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub stored_name: String,
    // 文件大小（以字节为单位）
    pub file_size: i64,
    // 文件类型
    pub file_type: String,
    // 上传时间
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
    // 上传者
    pub user_id: i64,
}

impl File {
    /// 文件在上传目录中的路径
    pub fn disk_path(&self, upload_dir: &str) -> std::path::PathBuf {
        std::path::Path::new(upload_dir).join(&self.stored_name)
    }
}
