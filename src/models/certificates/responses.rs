use super::entities::Certificate;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
pub struct CertificateListItem {
    pub certificate: Certificate,
    pub course_title: String,
    pub has_pdf: bool,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
pub struct CertificateListResponse {
    pub items: Vec<CertificateListItem>,
}

/// 公开验证结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
pub struct VerifyCertificateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<Certificate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,
}

impl VerifyCertificateResponse {
    pub fn invalid() -> Self {
        Self {
            valid: false,
            certificate: None,
            student_name: None,
            course_title: None,
        }
    }
}

/// 提交测验后证书签发的结果
#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
pub enum CertificateOutcome {
    /// 未通过或课时不属于任何课程
    NotApplicable,
    /// 还有课时未通过
    Incomplete { remaining: u32 },
    /// 新签发
    Issued {
        certificate: Certificate,
        pdf_generated: bool,
    },
    /// 已有证书
    AlreadyIssued { certificate: Certificate },
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/certificate.ts")]
pub struct RegenerateCertificateResponse {
    pub certificate: Certificate,
    pub pdf_generated: bool,
}
