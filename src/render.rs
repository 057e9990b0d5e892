//! Renders a finished symbol to PNG, SVG, or plain text.
//!
//! This is a thin downstream layer: it only reads the matrix a [`QrBuilder`]
//! already drew, the way the teacher's own `QR::to_gray_image`/`to_str`
//! render a finished grid, generalized here to accept an output sink and
//! optional custom colors instead of returning an owned image.
//!
//! [`QrBuilder`]: crate::builder::QrBuilder

use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;

use image::{ImageBuffer, ImageEncoder, Rgba};

use crate::builder::QR;
use crate::common::error::{QrError, QrResult};

const QUIET_ZONE: u32 = 4;

/// Renders `qr` as an 8-bit PNG, `scale` pixels per module, into `sink`.
///
/// `module_color`/`background`, when given, must each be a 3- or 4-byte
/// RGB(A) tuple; setting one without the other is an [`QrError::InvalidColor`].
/// With neither set, the image is plain 8-bit grayscale.
pub fn render_png(
    qr: &QR,
    scale: u32,
    module_color: Option<&[u8]>,
    background: Option<&[u8]>,
    sink: &mut impl IoWrite,
) -> QrResult<()> {
    match (module_color, background) {
        (None, None) => encode_gray_png(qr, scale, sink),
        (Some(fg), Some(bg)) => encode_rgba_png(qr, scale, parse_color(fg)?, parse_color(bg)?, sink),
        _ => Err(QrError::InvalidColor),
    }
}

fn parse_color(bytes: &[u8]) -> QrResult<Rgba<u8>> {
    match bytes.len() {
        3 => Ok(Rgba([bytes[0], bytes[1], bytes[2], 255])),
        4 => Ok(Rgba([bytes[0], bytes[1], bytes[2], bytes[3]])),
        _ => Err(QrError::InvalidColor),
    }
}

fn encode_gray_png(qr: &QR, scale: u32, sink: &mut impl IoWrite) -> QrResult<()> {
    let img = qr.to_gray_image(scale);
    let encoder = image::codecs::png::PngEncoder::new(&mut *sink);
    encoder
        .write_image(img.as_raw(), img.width(), img.height(), image::ExtendedColorType::L8)
        .map_err(|e| QrError::RenderIoFailure(e.to_string()))
}

fn encode_rgba_png(
    qr: &QR,
    scale: u32,
    module_color: Rgba<u8>,
    background: Rgba<u8>,
    sink: &mut impl IoWrite,
) -> QrResult<()> {
    let qz_sz = QUIET_ZONE * scale;
    let qr_sz = qr.width() as u32 * scale;
    let total_sz = qz_sz + qr_sz + qz_sz;

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_fn(total_sz, total_sz, |x, y| {
        if x < qz_sz || x >= qz_sz + qr_sz || y < qz_sz || y >= qz_sz + qr_sz {
            return background;
        }
        let r = ((y - qz_sz) / scale) as i16;
        let c = ((x - qz_sz) / scale) as i16;
        if *qr.get(r, c) {
            module_color
        } else {
            background
        }
    });

    let encoder = image::codecs::png::PngEncoder::new(&mut *sink);
    encoder
        .write_image(img.as_raw(), img.width(), img.height(), image::ExtendedColorType::Rgba8)
        .map_err(|e| QrError::RenderIoFailure(e.to_string()))
}

/// Renders `qr` as an SVG document, `scale` units per module, into `sink`.
///
/// Contiguous horizontal runs of dark modules within a row are coalesced
/// into a single `<line>` element, the way the original generator this
/// crate's behavior is modeled on emits its SVG output.
pub fn render_svg(
    qr: &QR,
    scale: f64,
    module_color: Option<&str>,
    background: Option<&str>,
    sink: &mut impl FmtWrite,
) -> QrResult<()> {
    if scale < 0.0 {
        return Err(QrError::InvalidColor);
    }
    let w = qr.width();
    let total = (w as f64 + 2.0 * QUIET_ZONE as f64) * scale;
    let fg = module_color.unwrap_or("black");

    write_svg(sink, total, fg, background, w, |r, c| *qr.get(r as i16, c as i16), scale)
        .map_err(|e| QrError::RenderIoFailure(e.to_string()))
}

fn write_svg(
    sink: &mut impl FmtWrite,
    total: f64,
    fg: &str,
    background: Option<&str>,
    w: usize,
    is_dark: impl Fn(usize, usize) -> bool,
    scale: f64,
) -> std::fmt::Result {
    writeln!(
        sink,
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    )?;
    writeln!(
        sink,
        r#"<svg class="pyqrcode" xmlns="http://www.w3.org/2000/svg" width="{total}" height="{total}">"#,
    )?;

    if let Some(bg) = background {
        writeln!(sink, r#"<rect width="100%" height="100%" fill="{bg}"/>"#)?;
    }

    let qz = QUIET_ZONE as f64 * scale;
    for r in 0..w {
        let mut c = 0;
        while c < w {
            if !is_dark(r, c) {
                c += 1;
                continue;
            }
            let start = c;
            while c < w && is_dark(r, c) {
                c += 1;
            }
            let run_len = (c - start) as f64 * scale;
            let x = qz + start as f64 * scale;
            let y = qz + r as f64 * scale + scale / 2.0;
            writeln!(
                sink,
                r#"<line class="pyqrline" x1="{x}" y1="{y}" x2="{}" y2="{y}" stroke="{fg}" stroke-width="{scale}"/>"#,
                x + run_len,
            )?;
        }
    }

    writeln!(sink, "</svg>")
}

/// Renders `qr` as an `N`-row string of `"1"`/`"0"` characters, one row per
/// module row, newline-separated, with no quiet zone — a debug-oriented dump
/// rather than a display format.
pub fn render_text(qr: &QR) -> String {
    qr.to_str(1)
}

#[cfg(test)]
mod render_tests {
    use super::*;
    use crate::common::codec::Mode;
    use crate::common::metadata::{ECLevel, Version};

    fn sample_qr() -> QR {
        let mut qr = QR::new(Version(1), ECLevel::L, Mode::Binary);
        qr.draw_all_function_patterns();
        let total_bits = Version(1).total_codewords() * 8;
        let mut bs = crate::common::bitstream::BitStream::new(total_bits);
        for i in 0..total_bits {
            bs.push(i % 3 == 0);
        }
        qr.draw_encoding_region(bs);
        crate::common::mask::apply_best_mask(&mut qr);
        qr
    }

    #[test]
    fn test_render_png_gray() {
        let qr = sample_qr();
        let mut buf = Vec::new();
        render_png(&qr, 4, None, None, &mut buf).unwrap();
        assert_eq!(&buf[1..4], b"PNG");
    }

    #[test]
    fn test_render_png_color_requires_both() {
        let qr = sample_qr();
        let mut buf = Vec::new();
        let err = render_png(&qr, 4, Some(&[255, 0, 0]), None, &mut buf).unwrap_err();
        assert_eq!(err, QrError::InvalidColor);
    }

    #[test]
    fn test_render_svg_has_header_and_lines() {
        let qr = sample_qr();
        let mut out = String::new();
        render_svg(&qr, 1.0, None, Some("white"), &mut out).unwrap();
        assert!(out.contains("pyqrcode"));
        assert!(out.contains("pyqrline"));
        assert!(out.contains(r#"fill="white""#));
    }

    #[test]
    fn test_render_text_dimensions() {
        let qr = sample_qr();
        let text = render_text(&qr);
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), qr.width());
        assert_eq!(rows[0].len(), qr.width());
    }
}
