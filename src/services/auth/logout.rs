use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::user_cache_key;
use crate::models::ApiResponse;
use crate::utils::jwt::{ACCESS_TOKEN_COOKIE, JwtUtils, REFRESH_TOKEN_COOKIE};

use super::AuthService;

/// 处理用户登出
/// 清除两个令牌 Cookie，并丢弃当前 access token 对应的用户缓存
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let access_token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::to_string)
        .or_else(|| {
            request
                .cookie(ACCESS_TOKEN_COOKIE)
                .map(|c| c.value().to_string())
        });

    if let (Some(token), Some(cache)) = (access_token, service.get_cache(request)) {
        cache.remove(&user_cache_key(&token)).await;
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_expired_cookie(ACCESS_TOKEN_COOKIE))
        .cookie(JwtUtils::create_expired_cookie(REFRESH_TOKEN_COOKIE))
        .json(ApiResponse::<()>::success_empty("登出成功")))
}
