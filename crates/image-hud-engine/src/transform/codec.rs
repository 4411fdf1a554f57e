use std::io::Cursor;
use std::sync::OnceLock;

use image::codecs::{jpeg::JpegEncoder, png::PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageReader};
use regex::Regex;

use crate::error::{HudError, Result};
use crate::models::TargetFormat;

/// The host's image loading and drawing capability.
pub trait ImageCodec {
    /// Decodes file bytes into a bitmap.
    fn decode(&self, bytes: &[u8], extension: &str) -> Result<DynamicImage>;

    /// Resamples `image` to `width` x `height` and encodes it. `quality` is
    /// in 0.1..=1.0 and only applies to lossy formats.
    fn encode(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
        format: TargetFormat,
        quality: f64,
    ) -> Result<Vec<u8>>;

    /// Natural pixel size without a full decode where possible.
    fn natural_size(&self, bytes: &[u8], extension: &str) -> Option<(u32, u32)>;
}

/// Largest bitmap `encode` will allocate, in pixels.
pub const MAX_ENCODE_PIXELS: u64 = 1 << 28;

/// [`ImageCodec`] backed by the `image` crate, with lossy WebP from libwebp.
///
/// Resampling uses a triangle filter.
#[derive(Debug, Default, Clone, Copy)]
pub struct RasterCodec;

impl ImageCodec for RasterCodec {
    fn decode(&self, bytes: &[u8], extension: &str) -> Result<DynamicImage> {
        if extension.eq_ignore_ascii_case("svg") {
            return Err(HudError::Decode(
                "vector images cannot be rasterized".to_string(),
            ));
        }
        image::load_from_memory(bytes).map_err(|e| HudError::Decode(e.to_string()))
    }

    fn encode(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
        format: TargetFormat,
        quality: f64,
    ) -> Result<Vec<u8>> {
        if u64::from(width) * u64::from(height) > MAX_ENCODE_PIXELS {
            return Err(HudError::SizeTooLarge {
                width: u64::from(width),
                height: u64::from(height),
            });
        }

        let resized = if (image.width(), image.height()) == (width, height) {
            image.clone()
        } else {
            image.resize_exact(width, height, FilterType::Triangle)
        };

        let percent = (quality * 100.0).round().clamp(1.0, 100.0);
        let mut out = Vec::new();
        let written = match format {
            TargetFormat::Png => resized.write_with_encoder(PngEncoder::new(&mut out)),
            TargetFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8())
                .write_with_encoder(JpegEncoder::new_with_quality(&mut out, percent as u8)),
            TargetFormat::Webp => return encode_webp(&resized, percent as f32),
        };

        match written {
            Ok(()) if out.is_empty() => Err(HudError::EncodeFailed),
            Ok(()) => Ok(out),
            Err(ImageError::Unsupported(e)) => Err(HudError::EncodeUnavailable(e.to_string())),
            Err(e) => {
                log::warn!("encoding {} failed: {e}", format.extension());
                Err(HudError::EncodeFailed)
            }
        }
    }

    fn natural_size(&self, bytes: &[u8], extension: &str) -> Option<(u32, u32)> {
        if extension.eq_ignore_ascii_case("svg") {
            return svg_dimensions(bytes);
        }
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

fn encode_webp(image: &DynamicImage, quality: f32) -> Result<Vec<u8>> {
    let rgba = image.to_rgba8();
    let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
    match encoder.encode_simple(false, quality) {
        Ok(memory) if memory.is_empty() => Err(HudError::EncodeFailed),
        Ok(memory) => Ok(memory.to_vec()),
        Err(e) => {
            log::warn!("encoding webp failed: {e:?}");
            Err(HudError::EncodeFailed)
        }
    }
}

static SVG_ROOT: OnceLock<Regex> = OnceLock::new();
static SVG_WIDTH: OnceLock<Regex> = OnceLock::new();
static SVG_HEIGHT: OnceLock<Regex> = OnceLock::new();
static SVG_VIEW_BOX: OnceLock<Regex> = OnceLock::new();

/// Size declared on the root `<svg>` element: `width`/`height` when both are
/// present, else the `viewBox` extent.
pub fn svg_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let source = String::from_utf8_lossy(bytes);
    let root = SVG_ROOT
        .get_or_init(|| Regex::new(r"(?is)<svg\b([^>]*)>").expect("Invalid svg root regex"));
    let attrs = root.captures(source.as_ref())?.get(1)?.as_str();

    let width = SVG_WIDTH.get_or_init(|| attr_regex("width"));
    let height = SVG_HEIGHT.get_or_init(|| attr_regex("height"));
    if let (Some(w), Some(h)) = (svg_length(width, attrs), svg_length(height, attrs)) {
        return Some((w, h));
    }

    let view_box = SVG_VIEW_BOX.get_or_init(|| attr_regex("viewBox"));
    let value = view_box.captures(attrs)?.get(1)?.as_str();
    let parts: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>)
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [_, _, w, h] if w.is_finite() && h.is_finite() && *w > 0.0 && *h > 0.0 => {
            Some((w.round().max(1.0) as u32, h.round().max(1.0) as u32))
        }
        _ => None,
    }
}

fn attr_regex(name: &str) -> Regex {
    Regex::new(&format!(r#"(?i)\b{name}\s*=\s*["']([^"']+)["']"#))
        .expect("Invalid svg attribute regex")
}

/// Leading number of a length attribute; `100px` and `12.5` parse, `50%` does not.
fn svg_length(regex: &Regex, attrs: &str) -> Option<u32> {
    let value = regex.captures(attrs)?.get(1)?.as_str().trim();
    if value.ends_with('%') {
        return None;
    }
    let number: String = value
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let parsed: f64 = number.parse().ok()?;
    (parsed.is_finite() && parsed > 0.0).then(|| parsed.round().max(1.0) as u32)
}
