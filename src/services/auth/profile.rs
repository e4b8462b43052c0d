use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::files::upload::is_avatar_file;
use crate::utils::validate::validate_phone;

use super::AuthService;

const MAX_FULL_NAME_CHARS: usize = 100;
const MAX_BIO_CHARS: usize = 2000;

fn validate_profile(update: &UpdateProfileRequest) -> Result<(), String> {
    if let Some(full_name) = update.full_name.as_deref()
        && full_name.trim().chars().count() > MAX_FULL_NAME_CHARS
    {
        return Err(format!(
            "Full name must be at most {MAX_FULL_NAME_CHARS} characters"
        ));
    }
    if let Some(phone) = update.phone.as_deref()
        && !phone.trim().is_empty()
    {
        validate_phone(phone)?;
    }
    if let Some(bio) = update.bio.as_deref()
        && bio.chars().count() > MAX_BIO_CHARS
    {
        return Err(format!("Bio must be at most {MAX_BIO_CHARS} characters"));
    }
    if let Some(birth_date) = update.birth_date
        && birth_date > chrono::Utc::now().date_naive()
    {
        return Err("Birth date cannot be in the future".to_string());
    }
    Ok(())
}

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current_user = match RequireJWT::require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Err(msg) = validate_profile(&update_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserProfileInvalid, msg)));
    }

    let storage = service.get_storage(request);

    // 头像令牌必须指向本人上传的图片
    if let Some(token) = update_data.avatar_token.as_deref().filter(|t| !t.is_empty()) {
        match storage.get_file_by_token(token).await {
            Ok(Some(file)) if is_avatar_file(&file, current_user.id) => {}
            Ok(_) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserProfileInvalid,
                    "Avatar must be an image uploaded by you",
                )));
            }
            Err(e) => {
                return Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::internal_error("Failed to load avatar file", e)));
            }
        }
    }

    match storage.update_user_profile(current_user.id, update_data).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "用户信息更新成功",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "用户不存在",
        ))),
        Err(e) => {
            tracing::error!("Failed to update profile for {}: {}", current_user.id, e);
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserUpdateFailed,
                "更新用户信息失败",
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_validation() {
        let ok = UpdateProfileRequest {
            full_name: Some("Ivan Petrov".into()),
            phone: Some("+7 (900) 123-45-67".into()),
            ..Default::default()
        };
        assert!(validate_profile(&ok).is_ok());

        let bad_phone = UpdateProfileRequest {
            phone: Some("call me".into()),
            ..Default::default()
        };
        assert!(validate_profile(&bad_phone).is_err());

        let future_birth = UpdateProfileRequest {
            birth_date: chrono::Utc::now()
                .date_naive()
                .succ_opt(),
            ..Default::default()
        };
        assert!(validate_profile(&future_birth).is_err());

        // 空电话视为清空
        let cleared = UpdateProfileRequest {
            phone: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_profile(&cleared).is_ok());
    }

    #[tokio::test]
    async fn test_avatar_token_must_be_own_image() {
        use crate::storage::Storage;
        use crate::storage::sea_orm_storage::test_support::{
            json_body, memory_storage, request_as, seed_student,
        };
        use actix_web::http::StatusCode;
        use std::sync::Arc;

        let sea = memory_storage().await;
        let student = seed_student(&sea, "avatar-owner").await;
        let other = seed_student(&sea, "someone-else").await;
        let storage: Arc<dyn Storage> = Arc::new(sea);

        let own_image = storage
            .upload_file("me.png", "a.png", &100, "image/png", student.id)
            .await
            .unwrap();
        let own_video = storage
            .upload_file("clip.mp4", "b.mp4", &100, "video/mp4", student.id)
            .await
            .unwrap();
        let foreign_image = storage
            .upload_file("them.png", "c.png", &100, "image/png", other.id)
            .await
            .unwrap();

        let service = AuthService::new_lazy();
        let request = request_as(&storage, &student);
        let with_avatar = |token: &str| UpdateProfileRequest {
            avatar_token: Some(token.to_string()),
            ..Default::default()
        };

        for rejected in [&own_video, &foreign_image] {
            let response = service
                .update_profile(with_avatar(&rejected.download_token), &request)
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        let response = service
            .update_profile(with_avatar(&own_image.download_token), &request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body["data"]["user"]["profile"]["avatar_token"],
            own_image.download_token.as_str()
        );

        // 空字符串移除头像
        let response = service.update_profile(with_avatar(""), &request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let user = storage.get_user_by_id(student.id).await.unwrap().unwrap();
        assert_eq!(user.profile.avatar_token, None);
    }
}
