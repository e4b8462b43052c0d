use std::sync::OnceLock;

use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

// 未配置密钥时的进程内随机密钥
static FALLBACK_SECRET: OnceLock<String> = OnceLock::new();

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user ID)
    pub role: String,       // 用户角色
    pub token_type: String, // token类型: "access" 或 "refresh"
    pub exp: usize,         // Expiration time (时间戳)
    pub iat: usize,         // Issued at (签发时间)
}

// Token 响应结构体
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> &'static str {
        let configured = &AppConfig::get().jwt.secret;
        if !configured.is_empty() {
            return configured;
        }
        FALLBACK_SECRET.get_or_init(|| {
            tracing::warn!("jwt.secret is not configured, tokens will not survive a restart");
            rand::rng()
                .sample_iter(&Alphanumeric)
                .take(64)
                .map(char::from)
                .collect()
        })
    }

    fn build_claims(
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Claims {
        let now = chrono::Utc::now();
        Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            token_type: token_type.to_string(),
            exp: (now + expiry_duration).timestamp() as usize,
            iat: now.timestamp() as usize,
        }
    }

    fn encode_with_secret(
        claims: &Claims,
        secret: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    fn decode_with_secret(
        token: &str,
        secret: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|token_data| token_data.claims)
    }

    fn check_type(
        claims: Claims,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        if claims.token_type != expected_type {
            return Err(jsonwebtoken::errors::Error::from(
                jsonwebtoken::errors::ErrorKind::InvalidToken,
            ));
        }
        Ok(claims)
    }

    // 生成 Access Token
    pub fn generate_access_token(
        user_id: i64,
        role: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_token_with_expiry(
            user_id,
            role,
            "access",
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        )
    }

    // 生成 Refresh Token
    pub fn generate_refresh_token(
        user_id: i64,
        role: &str,
        token_expiry: Option<chrono::Duration>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let expiry = token_expiry.unwrap_or_else(|| {
            chrono::Duration::days(AppConfig::get().jwt.refresh_token_expiry)
        });
        Self::generate_token_with_expiry(user_id, role, "refresh", expiry)
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::build_claims(user_id, role, token_type, expiry_duration);
        Self::encode_with_secret(&claims, Self::get_secret())
    }

    // 生成完整的 Token 对
    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        refresh_token_expiry: Option<chrono::Duration>,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let access_token = Self::generate_access_token(user_id, role)?;
        let refresh_token = Self::generate_refresh_token(user_id, role, refresh_token_expiry)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    // 验证 JWT token
    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(token, Self::get_secret())
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::check_type(Self::verify_token(token)?, "access")
    }

    // 验证 Refresh Token
    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::check_type(Self::verify_token(token)?, "refresh")
    }

    // 使用 Refresh Token 生成新的 Access Token
    pub fn refresh_access_token(
        refresh_token: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        Self::generate_access_token(user_id, &claims.role)
    }

    fn build_cookie(
        name: &'static str,
        value: &str,
        max_age: actix_web::cookie::time::Duration,
        same_site: SameSite,
    ) -> Cookie<'static> {
        Cookie::build(name, value.to_string())
            .path("/")
            .max_age(max_age)
            .same_site(same_site)
            .http_only(true)
            .secure(AppConfig::get().is_production()) // 生产环境下使用 HTTPS
            .finish()
    }

    /// 创建 Refresh Token Cookie
    pub fn create_refresh_token_cookie(
        refresh_token: &str,
        expiry: chrono::Duration,
    ) -> Cookie<'static> {
        Self::build_cookie(
            REFRESH_TOKEN_COOKIE,
            refresh_token,
            actix_web::cookie::time::Duration::seconds(expiry.num_seconds()),
            SameSite::Strict,
        )
    }

    /// 创建 Access Token Cookie，供 `<video>` 等无法携带 Authorization 头的请求使用
    pub fn create_access_token_cookie(access_token: &str) -> Cookie<'static> {
        Self::build_cookie(
            ACCESS_TOKEN_COOKIE,
            access_token,
            actix_web::cookie::time::Duration::minutes(AppConfig::get().jwt.access_token_expiry),
            SameSite::Lax,
        )
    }

    /// 创建用于注销的过期 Cookie
    pub fn create_expired_cookie(name: &'static str) -> Cookie<'static> {
        Self::build_cookie(
            name,
            "",
            actix_web::cookie::time::Duration::seconds(0),
            SameSite::Strict,
        )
    }

    /// 从请求中提取 Refresh Token
    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_roundtrip_with_explicit_secret() {
        let claims = JwtUtils::build_claims(7, "student", "access", chrono::Duration::minutes(5));
        let token = JwtUtils::encode_with_secret(&claims, SECRET).unwrap();

        let decoded = JwtUtils::decode_with_secret(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, "7");
        assert_eq!(decoded.role, "student");
        assert!(JwtUtils::check_type(decoded.clone(), "access").is_ok());
        assert!(JwtUtils::check_type(decoded, "refresh").is_err());
    }

    #[test]
    fn test_wrong_secret_and_expired_token() {
        let claims = JwtUtils::build_claims(1, "admin", "access", chrono::Duration::minutes(5));
        let token = JwtUtils::encode_with_secret(&claims, SECRET).unwrap();
        assert!(JwtUtils::decode_with_secret(&token, "other-secret").is_err());

        let expired = JwtUtils::build_claims(1, "admin", "access", chrono::Duration::hours(-2));
        let token = JwtUtils::encode_with_secret(&expired, SECRET).unwrap();
        assert!(JwtUtils::decode_with_secret(&token, SECRET).is_err());
    }
}
