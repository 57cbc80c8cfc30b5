use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat};
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Longest edge of the preview shown back to the user.
pub const PREVIEW_EDGE: u32 = 512;

#[derive(Debug, Clone, Serialize)]
pub struct UploadSummary {
    pub file_name: String,
    pub format: &'static str,
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub preview_data_uri: String,
}

pub fn is_supported_name(file_name: &str) -> bool {
    match Path::new(file_name).extension().and_then(|s| s.to_str()) {
        Some(ext) => {
            let ext = ext.to_ascii_lowercase();
            matches!(ext.as_str(), "jpg" | "jpeg" | "png")
        }
        None => false,
    }
}

pub fn decode(file_name: &str, bytes: &[u8]) -> AppResult<UploadSummary> {
    if bytes.is_empty() {
        return Err(AppError::MissingUpload);
    }
    if !file_name.is_empty() && !is_supported_name(file_name) {
        return Err(AppError::UnsupportedFormat(file_name.to_string()));
    }

    let format = match image::guess_format(bytes)? {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        other => return Err(AppError::UnsupportedFormat(format!("{other:?}"))),
    };

    let rgb = image::load_from_memory(bytes)?.to_rgb8();
    let (width, height) = rgb.dimensions();

    let preview = DynamicImage::ImageRgb8(rgb).thumbnail(PREVIEW_EDGE, PREVIEW_EDGE);
    let mut png = Vec::new();
    preview.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(UploadSummary {
        file_name: file_name.to_string(),
        format,
        width,
        height,
        preview_data_uri: format!("data:image/png;base64,{}", STANDARD.encode(&png)),
    })
}

#[cfg(test)]
pub(crate) fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 160, 90]));
    let mut png = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();
    png
}
