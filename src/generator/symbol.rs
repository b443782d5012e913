//! Symbol construction and bitmap rendering.
//!
//! Thin wrapper over the `qrcode` crate: encoding always uses error
//! correction level L and lets the encoder pick the smallest symbol version
//! that fits the data. Rendering scales each module to the configured pixel
//! size and surrounds the symbol with the standard quiet zone.

use image::RgbaImage;
use qrcode::{EcLevel, QrCode};

use super::session::RenderOptions;

/// Quiet zone width in modules, on each side of the symbol.
pub const QUIET_ZONE_MODULES: u32 = 4;

/// Encode text into a QR symbol at error correction level L.
///
/// Fails if the data exceeds the maximum payload across all symbol versions.
pub fn encode(text: &str) -> Result<QrCode, qrcode::types::QrError> {
    QrCode::with_error_correction_level(text.as_bytes(), EcLevel::L)
}

/// Render a symbol to an RGBA bitmap with the configured colors.
pub fn render(code: &QrCode, options: &RenderOptions) -> RgbaImage {
    code.render::<image::Rgba<u8>>()
        .dark_color(options.fill.rgba())
        .light_color(options.background.rgba())
        .module_dimensions(options.module_size, options.module_size)
        .quiet_zone(true)
        .build()
}

/// Pixel side length of a rendered symbol: modules plus quiet zone on both
/// sides, scaled by the module size.
pub fn pixel_side(module_count: u32, module_size: u32) -> u32 {
    (module_count + 2 * QUIET_ZONE_MODULES) * module_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::palette::{BackColor, FillColor};

    #[test]
    fn test_render_dimensions() {
        let code = encode("HELLO").unwrap();
        let options = RenderOptions {
            module_size: 10,
            ..Default::default()
        };
        let img = render(&code, &options);

        let expected = pixel_side(code.width() as u32, 10);
        assert_eq!(img.width(), expected);
        assert_eq!(img.height(), expected);
    }

    #[test]
    fn test_render_colors() {
        let code = encode("HELLO").unwrap();
        let options = RenderOptions {
            module_size: 4,
            fill: FillColor::Blue,
            background: BackColor::Yellow,
        };
        let img = render(&code, &options);

        // Top-left pixel is inside the quiet zone.
        assert_eq!(*img.get_pixel(0, 0), BackColor::Yellow.rgba());

        // First symbol module is the corner of the finder pattern (dark).
        let offset = QUIET_ZONE_MODULES * options.module_size;
        assert_eq!(*img.get_pixel(offset, offset), FillColor::Blue.rgba());
    }

    #[test]
    fn test_capacity_exceeded() {
        // Level L tops out at 2953 bytes; this cannot fit any version.
        let oversized = "a".repeat(4000);
        assert!(encode(&oversized).is_err());
    }

    #[test]
    fn test_minimal_version_selected() {
        // Short alphanumeric data fits version 1 (21 modules).
        let code = encode("HELLO").unwrap();
        assert_eq!(code.width(), 21);
    }
}
