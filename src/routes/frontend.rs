//! 前端静态资源路由
//!
//! 前端构建产物通过 rust-embed 嵌入二进制。未命中的路径回退到 index.html，
//! 交给前端路由处理（课时页、证书验证页等）。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::borrow::Cow;
use std::path::Path;

use crate::config::AppConfig;

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

const INDEX: &str = "index.html";

fn mime_for(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "webmanifest" => "application/json; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        _ => "application/octet-stream",
    }
}

// 构建工具输出到 assets/ 的文件名带 hash，可以长期缓存
fn is_immutable(path: &str) -> bool {
    path.starts_with("assets/") && !path.ends_with(".html")
}

/// 替换页面中的系统名称占位符
fn render_index(content: &[u8], system_name: &str) -> Vec<u8> {
    String::from_utf8_lossy(content)
        .replace("%SYSTEM_NAME%", system_name)
        .into_bytes()
}

fn lookup(path: &str) -> Option<(Cow<'static, [u8]>, &str)> {
    if !path.is_empty()
        && let Some(file) = FrontendAssets::get(path)
    {
        return Some((file.data, path));
    }
    FrontendAssets::get(INDEX).map(|file| (file.data, INDEX))
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    let Some((data, resolved)) = lookup(path) else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Frontend assets are not embedded in this build"));
    };

    let mime = mime_for(resolved);
    let body = if resolved == INDEX {
        render_index(&data, &AppConfig::get().app.system_name)
    } else {
        data.into_owned()
    };

    let cache_control = if is_immutable(resolved) {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache"
    };

    Ok(HttpResponse::Ok()
        .content_type(mime)
        .insert_header(("Cache-Control", cache_control))
        .body(body))
}

/// 所有未被 API 匹配的 GET 请求交给前端
pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for("index.html"), "text/html; charset=utf-8");
        assert_eq!(mime_for("assets/app.JS"), "application/javascript; charset=utf-8");
        assert_eq!(mime_for("fonts/DejaVuSans.ttf"), "font/ttf");
        assert_eq!(mime_for("blob"), "application/octet-stream");
    }

    #[test]
    fn test_is_immutable() {
        assert!(is_immutable("assets/index-3f2a.js"));
        assert!(!is_immutable("index.html"));
        assert!(!is_immutable("favicon.ico"));
    }

    #[test]
    fn test_render_index_replaces_system_name() {
        let html = b"<title>%SYSTEM_NAME%</title>";
        assert_eq!(render_index(html, "CourseHub"), b"<title>CourseHub</title>".to_vec());
    }
}
