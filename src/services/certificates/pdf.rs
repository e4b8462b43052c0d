//! 证书 PDF 渲染
//!
//! 横向 A4，包含边框、标题、学生姓名、课程名、平均分、签发日期、短编号
//! 以及指向公开验证地址的二维码。字体优先从配置目录加载 DejaVu，
//! 加载失败时回退到内置 Helvetica。

use std::path::Path;

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Polygon, Rgb,
};
use qrcode::QrCode;

use crate::errors::{CourseHubError, Result};

const PAGE_WIDTH: f32 = 297.0;
const PAGE_HEIGHT: f32 = 210.0;
const QR_SIZE: f32 = 40.0;
const PT_TO_MM: f32 = 0.3528;

pub struct CertificateDocument {
    pub student_name: String,
    pub course_title: String,
    pub score: f64,
    pub issued_at: chrono::DateTime<chrono::Utc>,
    pub short_id: String,
    pub verify_url: String,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn render_error(context: &str, err: impl std::fmt::Display) -> CourseHubError {
    CourseHubError::certificate_render(format!("{context}: {err}"))
}

fn load_external_font(doc: &PdfDocumentReference, path: &Path) -> Option<IndirectFontRef> {
    let file = std::fs::File::open(path).ok()?;
    match doc.add_external_font(file) {
        Ok(font) => Some(font),
        Err(e) => {
            tracing::warn!("Failed to load font {}: {}", path.display(), e);
            None
        }
    }
}

fn load_fonts(doc: &PdfDocumentReference, font_dir: &str) -> Result<Fonts> {
    let dir = Path::new(font_dir);
    let regular = load_external_font(doc, &dir.join("DejaVuSans.ttf"));
    let bold = load_external_font(doc, &dir.join("DejaVuSans-Bold.ttf"));

    if let (Some(regular), Some(bold)) = (regular, bold) {
        return Ok(Fonts { regular, bold });
    }

    tracing::debug!("DejaVu fonts unavailable in {}, using Helvetica", font_dir);
    Ok(Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| render_error("加载内置字体失败", e))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| render_error("加载内置字体失败", e))?,
    })
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn rect_ring(x: f32, y: f32, w: f32, h: f32) -> Vec<(Point, bool)> {
    vec![
        (Point::new(Mm(x), Mm(y)), false),
        (Point::new(Mm(x + w), Mm(y)), false),
        (Point::new(Mm(x + w), Mm(y + h)), false),
        (Point::new(Mm(x), Mm(y + h)), false),
    ]
}

// 内置字体没有度量信息，按平均字宽估算居中位置
fn centered_text(layer: &PdfLayerReference, text: &str, size: f32, y: f32, font: &IndirectFontRef) {
    let width = text.chars().count() as f32 * size * 0.5 * PT_TO_MM;
    let x = ((PAGE_WIDTH - width) / 2.0).max(15.0);
    layer.use_text(text, size, Mm(x), Mm(y), font);
}

fn draw_border(layer: &PdfLayerReference) {
    layer.set_outline_color(rgb(0.17, 0.29, 0.48));
    layer.set_outline_thickness(3.0);
    layer.add_line(Line {
        points: rect_ring(10.0, 10.0, PAGE_WIDTH - 20.0, PAGE_HEIGHT - 20.0),
        is_closed: true,
    });
    layer.set_outline_thickness(1.0);
    layer.add_line(Line {
        points: rect_ring(14.0, 14.0, PAGE_WIDTH - 28.0, PAGE_HEIGHT - 28.0),
        is_closed: true,
    });
}

fn draw_qr_code(layer: &PdfLayerReference, data: &str, x0: f32, y0: f32) -> Result<()> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| render_error("生成二维码失败", e))?;
    let width = code.width();
    let colors = code.to_colors();
    let module = QR_SIZE / width as f32;

    let rings: Vec<Vec<(Point, bool)>> = colors
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == qrcode::Color::Dark)
        .map(|(i, _)| {
            let (row, col) = (i / width, i % width);
            let x = x0 + col as f32 * module;
            let y = y0 + (width - 1 - row) as f32 * module;
            rect_ring(x, y, module, module)
        })
        .collect();

    layer.set_fill_color(rgb(0.0, 0.0, 0.0));
    layer.add_polygon(Polygon {
        rings,
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
    Ok(())
}

/// 渲染证书，返回 PDF 字节
pub fn render_certificate(document: &CertificateDocument, font_dir: &str) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Certificate {}", document.short_id),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "certificate",
    );
    let fonts = load_fonts(&doc, font_dir)?;
    let layer = doc.get_page(page).get_layer(layer);

    draw_border(&layer);

    layer.set_fill_color(rgb(0.17, 0.29, 0.48));
    centered_text(&layer, "CERTIFICATE", 36.0, 165.0, &fonts.bold);
    layer.set_fill_color(rgb(0.2, 0.2, 0.2));
    centered_text(&layer, "of course completion", 16.0, 153.0, &fonts.regular);
    centered_text(&layer, "This certifies that", 14.0, 135.0, &fonts.regular);

    layer.set_fill_color(rgb(0.0, 0.0, 0.0));
    centered_text(&layer, &document.student_name, 26.0, 120.0, &fonts.bold);

    layer.set_fill_color(rgb(0.2, 0.2, 0.2));
    centered_text(&layer, "has successfully completed the course", 14.0, 105.0, &fonts.regular);
    centered_text(
        &layer,
        &format!("\"{}\"", document.course_title),
        18.0,
        93.0,
        &fonts.bold,
    );
    centered_text(
        &layer,
        &format!("Average score: {:.1}%", document.score),
        14.0,
        78.0,
        &fonts.regular,
    );

    layer.use_text(
        format!("Issue date: {}", document.issued_at.format("%d.%m.%Y")),
        11.0,
        Mm(25.0),
        Mm(30.0),
        &fonts.regular,
    );
    layer.use_text(
        format!("Certificate No: {}", document.short_id),
        11.0,
        Mm(25.0),
        Mm(23.0),
        &fonts.regular,
    );

    let qr_x = PAGE_WIDTH - 25.0 - QR_SIZE;
    draw_qr_code(&layer, &document.verify_url, qr_x, 25.0)?;
    layer.use_text("Scan to verify", 9.0, Mm(qr_x + 6.0), Mm(20.0), &fonts.regular);

    doc.save_to_bytes()
        .map_err(|e| render_error("写出 PDF 失败", e))
}

/// 渲染并写入输出目录，返回随机生成的文件名
pub fn write_certificate(
    document: &CertificateDocument,
    output_dir: &str,
    font_dir: &str,
) -> Result<String> {
    let bytes = render_certificate(document, font_dir)?;
    std::fs::create_dir_all(output_dir)?;
    let file_name = format!("certificate_{}.pdf", uuid::Uuid::new_v4().simple());
    std::fs::write(Path::new(output_dir).join(&file_name), bytes)?;
    Ok(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CertificateDocument {
        CertificateDocument {
            student_name: "Ivan Petrov".into(),
            course_title: "Rust Basics".into(),
            score: 85.0,
            issued_at: chrono::Utc::now(),
            short_id: "1A2B3C4D".into(),
            verify_url: "http://localhost:8080/api/v1/certificates/verify/1a2b3c4d".into(),
        }
    }

    #[test]
    fn test_render_with_builtin_fonts() {
        let bytes = render_certificate(&sample(), "/nonexistent/fonts").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_certificate_uses_random_name() {
        let dir = std::env::temp_dir().join(format!("coursehub-cert-{}", uuid::Uuid::new_v4()));
        let dir_str = dir.to_string_lossy().to_string();
        let first = write_certificate(&sample(), &dir_str, "/nonexistent").unwrap();
        let second = write_certificate(&sample(), &dir_str, "/nonexistent").unwrap();
        assert_ne!(first, second);
        assert!(dir.join(&first).exists());
        let _ = std::fs::remove_dir_all(dir);
    }
}
