use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::{fs::File, path::Path};
use uuid::Uuid;

use super::FileService;
use crate::config::AppConfig;
use crate::errors::CourseHubError;
use crate::middlewares::RequireJWT;
use crate::models::ErrorCode;
use crate::models::files::entities::File as StoredFile;
use crate::models::{ApiResponse, files::responses::FileUploadResponse};
use crate::utils::validate_magic_bytes;

/// 头像只接受的图片扩展名
pub const AVATAR_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg"];
const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// 课时资料与视频，扩展名按配置校验
    Attachment,
    /// 个人头像，仅限图片
    Avatar,
}

impl UploadKind {
    fn allows(self, extension: &str, allowed_types: &[String]) -> bool {
        match self {
            UploadKind::Attachment => allowed_types.iter().any(|t| t.to_lowercase() == extension),
            UploadKind::Avatar => AVATAR_EXTENSIONS.contains(&extension),
        }
    }

    fn max_size(self, configured: usize) -> usize {
        match self {
            UploadKind::Attachment => configured,
            UploadKind::Avatar => configured.min(MAX_AVATAR_BYTES),
        }
    }
}

fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// 文件能否作为该用户的头像：本人上传的图片
pub fn is_avatar_file(file: &StoredFile, user_id: i64) -> bool {
    file.user_id == user_id && AVATAR_EXTENSIONS.contains(&extension_of(&file.original_name).as_str())
}

pub async fn handle_upload(
    service: &FileService,
    req: &HttpRequest,
    mut payload: Multipart,
    kind: UploadKind,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(req) {
        Some(id) => id,
        None => {
            return Ok(
                HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                    ErrorCode::Unauthorized,
                    "用户未登录",
                )),
            );
        }
    };

    let config = AppConfig::get();
    let upload_dir = &config.upload.dir;
    let max_size = kind.max_size(config.upload.max_size);
    let allowed_types = &config.upload.allowed_types;

    // 确保上传目录存在
    if !Path::new(upload_dir).exists()
        && let Err(e) = fs::create_dir_all(upload_dir)
    {
        tracing::error!("{}", CourseHubError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "创建上传目录失败",
            )),
        );
    }

    // 文件相关信息
    let mut original_name = String::new();
    let mut file_size: i64 = 0;
    let mut file_uploaded = false;
    let mut file_type = String::new();
    let mut stored_name = String::new();

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "file" {
            if file_uploaded {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::MultifileUploadNotAllowed,
                    "Only one file can be uploaded at a time",
                )));
            }
            file_uploaded = true;

            // 先获取原始文件名
            original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            // 提取扩展名并校验
            let extension = extension_of(&original_name);

            if !kind.allows(&extension, allowed_types) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "File type not allowed",
                )));
            }

            // 获取 MIME 类型（用于存储记录，不用于校验）
            file_type = field
                .content_type()
                .map(|ct| ct.to_string())
                .unwrap_or_default();

            // 磁盘文件名随机生成，与原始文件名无关
            stored_name = format!("{}{}", Uuid::new_v4().simple(), extension);
            let file_path = Path::new(upload_dir).join(&stored_name);
            let mut f = match File::create(&file_path) {
                Ok(file) => file,
                Err(e) => {
                    tracing::error!("{}", CourseHubError::file_operation(format!("{e}")));
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "文件创建失败"),
                    ));
                }
            };

            let mut total_size: usize = 0;
            let mut first_chunk = true;
            while let Some(chunk) = field.next().await {
                let data = chunk?;

                // 第一个 chunk 时验证魔术字节
                if first_chunk {
                    first_chunk = false;
                    if !validate_magic_bytes(&data, &extension) {
                        let _ = fs::remove_file(&file_path);
                        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::FileTypeNotAllowed,
                            "文件内容与扩展名不匹配",
                        )));
                    }
                }

                total_size += data.len();
                // 校验大小
                if total_size > max_size {
                    let _ = fs::remove_file(&file_path);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileSizeExceeded,
                        "File size exceeds the limit",
                    )));
                }
                if let Err(e) = f.write_all(&data) {
                    let _ = fs::remove_file(&file_path);
                    tracing::error!("{}", CourseHubError::file_operation(format!("{e}")));
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::<()>::error_empty(ErrorCode::FileUploadFailed, "文件写入失败"),
                    ));
                }
            }
            if total_size == 0 {
                let _ = fs::remove_file(&file_path);
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Uploaded file is empty",
                )));
            }
            file_size = total_size as i64;
        }
    }

    if !file_uploaded {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    }

    let storage = service.get_storage(req);

    let db_file = match storage
        .upload_file(
            &original_name,
            &stored_name,
            &file_size,
            &file_type,
            user_id,
        )
        .await
    {
        Ok(file) => FileUploadResponse {
            download_token: file.download_token,
            file_name: file.original_name,
            size: file.file_size,
            content_type: file.file_type,
            uploaded_at: file.uploaded_at,
        },
        Err(e) => {
            let _ = fs::remove_file(Path::new(upload_dir).join(&stored_name));
            tracing::error!("Failed to record uploaded file: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::FileUploadFailed,
                    "Failed to upload file",
                )),
            );
        }
    };

    tracing::info!(
        "User {} uploaded {} ({} bytes)",
        user_id,
        db_file.file_name,
        db_file.size
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(db_file, "File uploaded successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(original_name: &str, user_id: i64) -> StoredFile {
        StoredFile {
            download_token: "token".to_string(),
            original_name: original_name.to_string(),
            stored_name: "stored.bin".to_string(),
            file_size: 10,
            file_type: String::new(),
            uploaded_at: chrono::Utc::now(),
            user_id,
        }
    }

    #[test]
    fn test_avatar_upload_accepts_images_only() {
        let configured = vec![".mp4".to_string(), ".png".to_string(), ".pdf".to_string()];
        assert!(UploadKind::Avatar.allows(".jpg", &configured));
        assert!(UploadKind::Avatar.allows(".png", &configured));
        assert!(!UploadKind::Avatar.allows(".mp4", &configured));
        assert!(!UploadKind::Avatar.allows(".pdf", &configured));
        assert!(UploadKind::Attachment.allows(".mp4", &configured));
        assert!(!UploadKind::Attachment.allows(".jpg", &configured));
    }

    #[test]
    fn test_avatar_size_is_capped() {
        assert_eq!(UploadKind::Avatar.max_size(usize::MAX), MAX_AVATAR_BYTES);
        assert_eq!(UploadKind::Avatar.max_size(1024), 1024);
        assert_eq!(UploadKind::Attachment.max_size(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_is_avatar_file() {
        assert!(is_avatar_file(&stored("me.JPG", 3), 3));
        assert!(!is_avatar_file(&stored("me.png", 4), 3));
        assert!(!is_avatar_file(&stored("lecture.mp4", 3), 3));
    }
}
