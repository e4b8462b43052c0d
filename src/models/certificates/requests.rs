use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
pub struct CertificateListParams {
    /// 管理员可查看指定学生的证书
    pub student_id: Option<i64>,
}
