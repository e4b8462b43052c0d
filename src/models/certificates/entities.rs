use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 结业证书
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
pub struct Certificate {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// 课程平均分
    pub test_score: f64,
    /// 公开验证用的 UUID
    pub certificate_id: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub pdf_file: Option<String>,
    pub issued_at: chrono::DateTime<chrono::Utc>,
}

impl Certificate {
    /// 证书上打印的短编号
    pub fn short_id(&self) -> String {
        self.certificate_id.chars().take(8).collect::<String>().to_uppercase()
    }

    pub fn has_pdf(&self) -> bool {
        self.pdf_file.as_deref().is_some_and(|f| !f.is_empty())
    }
}
