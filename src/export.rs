//! Export module for generated QR images.

use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat, RgbaImage};

/// Write the image to `path` in the format implied by its extension.
///
/// A missing or unsupported extension is normalized to `.png`. JPEG has no
/// alpha channel, so the RGBA buffer is converted to RGB for it. Returns the
/// path actually written.
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<PathBuf, ImageError> {
    let path = normalize_extension(path);
    let format = ImageFormat::from_path(&path)?;

    match format {
        ImageFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(image.clone()).into_rgb8();
            rgb.save(&path)?;
        }
        _ => image.save(&path)?,
    }

    log::info!("Saved QR code to {:?}", path);
    Ok(path)
}

/// Replace a missing or unsupported extension with `png`.
fn normalize_extension(path: &Path) -> PathBuf {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ImageFormat::from_extension(ext).is_some())
        .unwrap_or(false);

    if supported {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn test_image() -> RgbaImage {
        RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 255]))
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.png");

        let written = save_image(&test_image(), &path).unwrap();

        assert_eq!(written, path);
        let read_back = image::open(&written).unwrap();
        assert_eq!(read_back.width(), 32);
        assert_eq!(read_back.height(), 32);
    }

    #[test]
    fn test_save_jpeg_converts_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.jpg");

        let written = save_image(&test_image(), &path).unwrap();

        assert_eq!(written.extension().unwrap(), "jpg");
        assert!(image::open(&written).is_ok());
    }

    #[test]
    fn test_missing_extension_defaults_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr");

        let written = save_image(&test_image(), &path).unwrap();

        assert_eq!(written.extension().unwrap(), "png");
        assert!(written.exists());
    }

    #[test]
    fn test_unsupported_extension_defaults_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.xyz");

        let written = save_image(&test_image(), &path).unwrap();

        assert_eq!(written.extension().unwrap(), "png");
        assert!(written.exists());
    }

    #[test]
    fn test_save_to_invalid_path_fails() {
        let err = save_image(&test_image(), Path::new("/nonexistent-dir/qr.png"));
        assert!(err.is_err());
    }
}
