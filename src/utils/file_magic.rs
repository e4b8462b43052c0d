/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// `data` 为文件开头的字节（上传时的第一个分片），`extension` 含点号，如 ".mp4"。
/// 未知扩展名一律拒绝。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // 视频
        ".mp4" | ".m4v" | ".mov" => is_iso_bmff(data),
        ".webm" | ".mkv" => data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]),

        // 图片
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),

        // 课时资料
        ".pdf" => data.starts_with(b"%PDF"),
        ".ppt" | ".doc" => data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
        ".docx" | ".pptx" | ".xlsx" | ".zip" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),

        // 纯文本不检查
        ".txt" | ".md" => true,

        _ => false,
    }
}

/// MP4/MOV 等 ISO 基础媒体格式：第 4..8 字节为 `ftyp`
fn is_iso_bmff(data: &[u8]) -> bool {
    data.len() >= 8 && &data[4..8] == b"ftyp"
}

/// 按文件名扩展名推断响应的 Content-Type
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "zip" => "application/zip",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "txt" | "md" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mp4_magic() {
        let header = [0x00, 0x00, 0x00, 0x20, b'f', b't', b'y', b'p', b'i', b's', b'o', b'm'];
        assert!(validate_magic_bytes(&header, ".mp4"));
        assert!(validate_magic_bytes(&header, ".MOV"));
        assert!(!validate_magic_bytes(&header, ".webm"));
        assert!(!validate_magic_bytes(&header[..6], ".mp4"));
    }

    #[test]
    fn test_webm_magic() {
        let header = [0x1A, 0x45, 0xDF, 0xA3, 0x9F, 0x42];
        assert!(validate_magic_bytes(&header, ".webm"));
        assert!(!validate_magic_bytes(&header, ".mp4"));
    }

    #[test]
    fn test_pdf_magic() {
        let pdf_header = b"%PDF-1.7";
        assert!(validate_magic_bytes(pdf_header, ".pdf"));
        assert!(!validate_magic_bytes(pdf_header, ".pptx"));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("intro.MP4"), "video/mp4");
        assert_eq!(content_type_for("lecture.webm"), "video/webm");
        assert_eq!(content_type_for("slides.pdf"), "application/pdf");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], ".txt"));
        assert!(!validate_magic_bytes(b"MZ\x90\x00", ".exe"));
    }
}
