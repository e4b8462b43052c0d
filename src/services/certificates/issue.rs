use std::sync::Arc;

use super::eligibility::{self, Eligibility};
use super::pdf::{self, CertificateDocument};
use crate::config::{AppConfig, CertificateConfig};
use crate::errors::{CourseHubError, Result};
use crate::models::certificates::entities::Certificate;
use crate::models::certificates::responses::CertificateOutcome;
use crate::models::lessons::entities::Lesson;
use crate::storage::Storage;

/// 渲染证书 PDF 并记录文件名，返回生成的文件名
pub(crate) async fn render_pdf(
    storage: &Arc<dyn Storage>,
    certificate: &Certificate,
    settings: &CertificateConfig,
) -> Result<String> {
    let student = storage
        .get_user_by_id(certificate.student_id)
        .await?
        .ok_or_else(|| CourseHubError::not_found("证书所属学生不存在"))?;
    let course = storage
        .get_course_by_id(certificate.course_id)
        .await?
        .ok_or_else(|| CourseHubError::not_found("证书所属课程不存在"))?;

    let document = CertificateDocument {
        student_name: student.display_name().to_string(),
        course_title: course.title,
        score: certificate.test_score,
        issued_at: certificate.issued_at,
        short_id: certificate.short_id(),
        verify_url: settings.verify_url(&certificate.certificate_id),
    };
    let output_dir = settings.output_dir.clone();
    let font_dir = settings.font_dir.clone();

    let file_name = tokio::task::spawn_blocking(move || {
        pdf::write_certificate(&document, &output_dir, &font_dir)
    })
    .await
    .map_err(|e| CourseHubError::certificate_render(format!("渲染任务失败: {e}")))??;

    storage
        .set_certificate_pdf(certificate.id, Some(file_name.clone()))
        .await?;
    Ok(file_name)
}

/// 通过测验后尝试签发课程证书
///
/// 返回签发结果与需要展示给学生的提示。PDF 渲染失败不影响证书记录。
pub async fn issue_if_eligible(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    lesson: &Lesson,
    current_score: f64,
) -> Result<(CertificateOutcome, Vec<String>)> {
    issue_with_settings(
        storage,
        student_id,
        lesson,
        current_score,
        &AppConfig::get().certificate,
    )
    .await
}

pub(crate) async fn issue_with_settings(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    lesson: &Lesson,
    current_score: f64,
    settings: &CertificateConfig,
) -> Result<(CertificateOutcome, Vec<String>)> {
    let Some(course_id) = lesson.course_id else {
        return Ok((CertificateOutcome::NotApplicable, Vec::new()));
    };

    let lesson_ids: Vec<i64> = storage
        .list_lessons_by_course(course_id)
        .await?
        .iter()
        .map(|l| l.id)
        .collect();
    let progress = storage
        .list_progress_for_lessons(student_id, &lesson_ids)
        .await?;

    let average = match eligibility::evaluate(&lesson_ids, &progress, current_score) {
        Eligibility::Incomplete { remaining } => {
            return Ok((
                CertificateOutcome::Incomplete { remaining },
                vec![format!(
                    "Test passed. Lessons remaining before the certificate: {remaining}"
                )],
            ));
        }
        Eligibility::Complete { average } => average,
    };

    let certificate_id = uuid::Uuid::new_v4().to_string();
    let (mut certificate, created) = storage
        .create_certificate(student_id, course_id, average, &certificate_id)
        .await?;

    if !created {
        return Ok((
            CertificateOutcome::AlreadyIssued { certificate },
            vec!["Certificate for this course has already been issued".to_string()],
        ));
    }

    tracing::info!(
        "Certificate {} issued to student {} for course {}",
        certificate.certificate_id,
        student_id,
        course_id
    );

    let mut notices = vec![format!(
        "Congratulations! Course completed with an average score of {average:.1}%"
    )];
    let pdf_generated = match render_pdf(storage, &certificate, settings).await {
        Ok(file_name) => {
            certificate.pdf_file = Some(file_name);
            true
        }
        Err(e) => {
            tracing::error!(
                "Failed to render PDF for certificate {}: {}",
                certificate.certificate_id,
                e
            );
            notices.push("Certificate issued, but the PDF could not be generated".to_string());
            false
        }
    };

    Ok((
        CertificateOutcome::Issued {
            certificate,
            pdf_generated,
        },
        notices,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorCode;
    use crate::services::certificates::CertificateService;
    use crate::storage::sea_orm_storage::test_support::{
        json_body, memory_storage, request_as, seed_course, seed_lesson, seed_student,
    };
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("coursehub-{tag}-{}", uuid::Uuid::new_v4()))
    }

    fn settings_in(output_dir: &std::path::Path) -> CertificateConfig {
        CertificateConfig {
            output_dir: output_dir.to_string_lossy().into_owned(),
            verify_base_url: "http://127.0.0.1:8080".to_string(),
            font_dir: "fonts-that-do-not-exist".to_string(),
        }
    }

    async fn pass_lesson(storage: &Arc<dyn Storage>, student_id: i64, lesson: &Lesson, score: f64) {
        let progress = storage
            .get_or_create_progress(student_id, lesson.id)
            .await
            .unwrap();
        storage
            .record_test_result(progress.id, true, score, true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_certificate_after_all_lessons_passed() {
        let sea = memory_storage().await;
        let student = seed_student(&sea, "student1").await;
        let course = seed_course(&sea, "Rust").await;
        let lesson_a = seed_lesson(&sea, Some(course.id), "A").await;
        let lesson_b = seed_lesson(&sea, Some(course.id), "B").await;
        let storage: Arc<dyn Storage> = Arc::new(sea);
        let dir = scratch_dir("issue");
        let settings = settings_in(&dir);

        pass_lesson(&storage, student.id, &lesson_a, 80.0).await;
        let (outcome, notices) =
            issue_with_settings(&storage, student.id, &lesson_a, 80.0, &settings)
                .await
                .unwrap();
        assert!(matches!(outcome, CertificateOutcome::Incomplete { remaining: 1 }));
        assert_eq!(notices.len(), 1);

        pass_lesson(&storage, student.id, &lesson_b, 90.0).await;
        let (outcome, _) = issue_with_settings(&storage, student.id, &lesson_b, 90.0, &settings)
            .await
            .unwrap();
        let CertificateOutcome::Issued {
            certificate,
            pdf_generated,
        } = outcome
        else {
            panic!("certificate should be issued");
        };
        assert_eq!(certificate.test_score, 85.0);
        assert!(pdf_generated);
        let pdf_file = certificate.pdf_file.clone().unwrap();
        assert!(dir.join(&pdf_file).exists());

        // 再次提交不会重复签发
        let (outcome, notices) =
            issue_with_settings(&storage, student.id, &lesson_b, 90.0, &settings)
                .await
                .unwrap();
        assert!(matches!(outcome, CertificateOutcome::AlreadyIssued { .. }));
        assert!(notices[0].contains("already"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_render_failure_keeps_certificate_without_pdf() {
        let sea = memory_storage().await;
        let student = seed_student(&sea, "student3").await;
        let course = seed_course(&sea, "Rust").await;
        let lesson = seed_lesson(&sea, Some(course.id), "Only").await;
        let storage: Arc<dyn Storage> = Arc::new(sea);

        // 输出目录实际是一个普通文件，写 PDF 必然失败
        let blocker = scratch_dir("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let settings = settings_in(&blocker);

        pass_lesson(&storage, student.id, &lesson, 75.0).await;
        let (outcome, notices) =
            issue_with_settings(&storage, student.id, &lesson, 75.0, &settings)
                .await
                .unwrap();
        let CertificateOutcome::Issued {
            certificate,
            pdf_generated,
        } = outcome
        else {
            panic!("certificate should be issued even if rendering fails");
        };
        assert!(!pdf_generated);
        assert!(certificate.pdf_file.is_none());
        assert!(notices.iter().any(|n| n.contains("PDF could not be generated")));

        let stored = storage
            .get_certificate_by_id(certificate.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.pdf_file, None);
        assert_eq!(stored.test_score, 75.0);

        // 再次触发只返回已签发，不会重新渲染
        let (outcome, _) = issue_with_settings(&storage, student.id, &lesson, 75.0, &settings)
            .await
            .unwrap();
        let CertificateOutcome::AlreadyIssued { certificate: again } = outcome else {
            panic!("second issue should report the existing certificate");
        };
        assert_eq!(again.id, certificate.id);
        assert_eq!(again.pdf_file, None);

        // 没有 PDF 的证书下载返回未就绪
        let request = request_as(&storage, &student);
        let response = CertificateService::new_lazy()
            .download_certificate(&request, certificate.id)
            .await
            .unwrap();
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], ErrorCode::CertificateNotReady as i32);

        let _ = std::fs::remove_file(&blocker);
    }

    #[tokio::test]
    async fn test_lesson_without_course_is_not_applicable() {
        let sea = memory_storage().await;
        let student = seed_student(&sea, "student2").await;
        let lesson = seed_lesson(&sea, None, "Loose").await;
        let storage: Arc<dyn Storage> = Arc::new(sea);

        let settings = settings_in(&scratch_dir("unused"));
        let (outcome, notices) =
            issue_with_settings(&storage, student.id, &lesson, 100.0, &settings)
                .await
                .unwrap();
        assert!(matches!(outcome, CertificateOutcome::NotApplicable));
        assert!(notices.is_empty());
    }
}
