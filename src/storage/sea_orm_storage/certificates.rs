//! 证书存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::certificates::{ActiveModel, Column, Entity as Certificates};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::errors::{CourseHubError, Result};
use crate::models::certificates::{entities::Certificate, responses::CertificateListItem};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, sea_query::Expr,
};

impl SeaOrmStorage {
    async fn find_certificate_by_pair(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Certificate>> {
        let result = Certificates::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询证书失败: {e}")))?;

        Ok(result.map(|m| m.into_certificate()))
    }

    /// 创建证书，依赖 (student_id, course_id) 唯一约束保证只签发一次
    pub async fn create_certificate_impl(
        &self,
        student_id: i64,
        course_id: i64,
        test_score: f64,
        certificate_id: &str,
    ) -> Result<(Certificate, bool)> {
        if let Some(existing) = self.find_certificate_by_pair(student_id, course_id).await? {
            return Ok((existing, false));
        }

        let model = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            test_score: Set(test_score),
            certificate_id: Set(certificate_id.to_string()),
            pdf_file: Set(None),
            issued_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(created) => Ok((created.into_certificate(), true)),
            Err(e) if is_unique_violation(&e) => {
                let existing = self
                    .find_certificate_by_pair(student_id, course_id)
                    .await?
                    .ok_or_else(|| CourseHubError::conflict("证书 UUID 冲突"))?;
                Ok((existing, false))
            }
            Err(e) => Err(CourseHubError::database_operation(format!(
                "创建证书失败: {e}"
            ))),
        }
    }

    pub async fn get_certificate_by_id_impl(&self, id: i64) -> Result<Option<Certificate>> {
        let result = Certificates::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询证书失败: {e}")))?;

        Ok(result.map(|m| m.into_certificate()))
    }

    pub async fn get_certificate_by_uuid_impl(
        &self,
        certificate_id: &str,
    ) -> Result<Option<Certificate>> {
        let result = Certificates::find()
            .filter(Column::CertificateId.eq(certificate_id))
            .one(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询证书失败: {e}")))?;

        Ok(result.map(|m| m.into_certificate()))
    }

    /// 学生的全部证书（最新在前），附带课程标题
    pub async fn list_certificates_by_student_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<CertificateListItem>> {
        let certificates = Certificates::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::IssuedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询证书列表失败: {e}")))?;

        if certificates.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: Vec<i64> = certificates.iter().map(|c| c.course_id).collect();
        let titles: HashMap<i64, String> = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.title))
            .collect();

        Ok(certificates
            .into_iter()
            .map(|m| {
                let certificate = m.into_certificate();
                CertificateListItem {
                    course_title: titles
                        .get(&certificate.course_id)
                        .cloned()
                        .unwrap_or_default(),
                    has_pdf: certificate.has_pdf(),
                    certificate,
                }
            })
            .collect())
    }

    pub async fn set_certificate_pdf_impl(&self, id: i64, pdf_file: Option<String>) -> Result<bool> {
        let result = Certificates::update_many()
            .col_expr(Column::PdfFile, Expr::value(pdf_file))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| CourseHubError::database_operation(format!("更新证书文件失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_course, seed_student};

    #[tokio::test]
    async fn test_certificate_is_issued_once_per_course() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "dmitry").await;
        let course = seed_course(&storage, "Rust 101").await;

        let (first, created) = storage
            .create_certificate_impl(student.id, course.id, 85.0, "0f8c1c1e-aaaa-4bbb-8ccc-123456789abc")
            .await
            .unwrap();
        assert!(created);
        assert_eq!(first.test_score, 85.0);

        let (second, created_again) = storage
            .create_certificate_impl(student.id, course.id, 99.0, "11111111-2222-4333-8444-555555555555")
            .await
            .unwrap();
        assert!(!created_again);
        assert_eq!(second.id, first.id);
        assert_eq!(second.test_score, 85.0);
    }

    #[tokio::test]
    async fn test_certificate_lookup_and_pdf_update() {
        let storage = memory_storage().await;
        let student = seed_student(&storage, "elena").await;
        let course = seed_course(&storage, "Databases").await;

        let (cert, _) = storage
            .create_certificate_impl(student.id, course.id, 72.5, "abcdef12-0000-4000-8000-000000000000")
            .await
            .unwrap();
        assert!(!cert.has_pdf());

        storage
            .set_certificate_pdf_impl(cert.id, Some("certificates/abcdef12.pdf".into()))
            .await
            .unwrap();

        let found = storage
            .get_certificate_by_uuid_impl("abcdef12-0000-4000-8000-000000000000")
            .await
            .unwrap()
            .expect("certificate should exist");
        assert!(found.has_pdf());

        let listed = storage
            .list_certificates_by_student_impl(student.id)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].course_title, "Databases");
        assert!(listed[0].has_pdf);
    }
}
