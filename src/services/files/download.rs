use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header, web};

use super::FileService;
use crate::config::AppConfig;
use crate::errors::CourseHubError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::content_type_for;

pub async fn handle_download(
    service: &FileService,
    request: &HttpRequest,
    file_token: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let db_file = match storage.get_file_by_token(&file_token).await {
        Ok(Some(f)) => f,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found",
            )));
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("File query failed", e)));
        }
    };

    let file_path = db_file.disk_path(&AppConfig::get().upload.dir);

    let buf = match web::block(move || std::fs::read(file_path)).await {
        Ok(Ok(buf)) => buf,
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::FileNotFound, "文件不存在")));
        }
        Ok(Err(e)) => {
            tracing::error!("{}", CourseHubError::file_operation(format!("{e}")));
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "File read failed",
            )));
        }
        Err(e) => {
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::internal_error("File read failed", e)));
        }
    };

    // 使用数据库中的原始文件名
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type_for(&db_file.original_name)))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                db_file.original_name.replace('"', "")
            ),
        ))
        .body(buf))
}
