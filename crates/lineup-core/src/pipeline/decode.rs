//! Full-decode validation with format detection.

use image::ImageFormat;
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Image decoder with configurable limits.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Metadata from a successful decode.
///
/// The pixel buffer itself is dropped: the model request carries the
/// original encoded bytes, so decoding serves as validation only.
#[derive(Debug)]
pub struct DecodedImage {
    /// Detected format as a lowercase string ("jpeg", "png", ...)
    pub format: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Decode an image from an in-memory byte buffer.
    ///
    /// The buffer is already in memory because the same bytes feed XMP
    /// extraction and the model request; decoding must not read the file
    /// again. Runs on the blocking pool since decode is CPU-bound.
    pub async fn decode_from_bytes(
        &self,
        bytes: Vec<u8>,
        path: &Path,
    ) -> Result<DecodedImage, PipelineError> {
        let path_owned = path.to_path_buf();
        let decoded = tokio::task::spawn_blocking(move || Self::decode_bytes_sync(&bytes, &path_owned))
            .await
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Task join error: {}", e),
            })??;

        if decoded.width > self.limits.max_image_dimension
            || decoded.height > self.limits.max_image_dimension
        {
            return Err(PipelineError::ImageTooLarge {
                path: path.to_path_buf(),
                width: decoded.width,
                height: decoded.height,
                max_dim: self.limits.max_image_dimension,
            });
        }
        Ok(decoded)
    }

    /// Synchronous decode (runs in spawn_blocking).
    fn decode_bytes_sync(bytes: &[u8], path: &Path) -> Result<DecodedImage, PipelineError> {
        let format = image::guess_format(bytes).map_err(|e| PipelineError::UnsupportedFileType {
            path: path.to_path_buf(),
            message: format!("Cannot detect image format: {}", e),
        })?;

        let img = image::load_from_memory_with_format(bytes, format).map_err(|e| {
            PipelineError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        Ok(DecodedImage {
            format: format_to_string(format),
            width: img.width(),
            height: img.height(),
        })
    }
}

/// Convert an ImageFormat to a string representation.
pub fn format_to_string(format: ImageFormat) -> String {
    match format {
        ImageFormat::Jpeg => "jpeg".to_string(),
        ImageFormat::Png => "png".to_string(),
        ImageFormat::WebP => "webp".to_string(),
        ImageFormat::Gif => "gif".to_string(),
        ImageFormat::Tiff => "tiff".to_string(),
        ImageFormat::Bmp => "bmp".to_string(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_format_to_string() {
        assert_eq!(format_to_string(ImageFormat::Jpeg), "jpeg");
        assert_eq!(format_to_string(ImageFormat::Png), "png");
        assert_eq!(format_to_string(ImageFormat::WebP), "webp");
    }

    #[tokio::test]
    async fn test_decode_png_from_bytes() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let decoded = decoder
            .decode_from_bytes(png_bytes(4, 3), Path::new("test.png"))
            .await
            .unwrap();
        assert_eq!(decoded.format, "png");
        assert_eq!((decoded.width, decoded.height), (4, 3));
    }

    #[tokio::test]
    async fn test_decode_rejects_oversized_dimensions() {
        let decoder = ImageDecoder::new(LimitsConfig {
            max_image_dimension: 2,
            ..LimitsConfig::default()
        });
        let err = decoder
            .decode_from_bytes(png_bytes(4, 3), Path::new("test.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::ImageTooLarge { .. }));
    }

    #[tokio::test]
    async fn test_decode_garbage_is_unsupported() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let err = decoder
            .decode_from_bytes(b"not an image at all".to_vec(), Path::new("bad.bin"))
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFileType { .. }));
    }
}
