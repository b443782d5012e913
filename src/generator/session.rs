//! Generator session: the state behind the interactive UI.
//!
//! Owns the current input text, the rendering options, the most recently
//! generated image and a single status line. The three operations (generate,
//! save, clear) run synchronously on the UI thread; a failed operation never
//! leaves the session half-mutated.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;

use super::palette::{BackColor, FillColor};
use super::symbol;
use crate::export;

/// Smallest selectable module size in pixels.
pub const MIN_MODULE_SIZE: u32 = 1;
/// Largest selectable module size in pixels.
pub const MAX_MODULE_SIZE: u32 = 20;

/// How many leading characters of the input appear in the status line.
const STATUS_PREFIX_CHARS: usize = 30;

/// Rendering options for the generated symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixel width/height of a single module.
    pub module_size: u32,
    /// Module (foreground) color.
    pub fill: FillColor,
    /// Background color.
    pub background: BackColor,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_size: 10,
            fill: FillColor::default(),
            background: BackColor::default(),
        }
    }
}

/// Errors from the generate operation.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Please enter some text or URL!")]
    EmptyInput,
    #[error("Failed to generate QR code: {0}")]
    Encoding(#[from] qrcode::types::QrError),
}

/// Errors from the save operation.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Generate a QR code first!")]
    NoImage,
    #[error("Failed to save QR code: {0}")]
    Write(#[from] image::ImageError),
}

/// State of the generator session.
pub struct GeneratorSession {
    /// Raw text to encode.
    pub input_text: String,
    /// Current rendering options.
    pub options: RenderOptions,
    /// Last successfully generated image.
    image: Option<RgbaImage>,
    /// Human-readable outcome of the last operation.
    status: String,
}

impl GeneratorSession {
    pub fn new() -> Self {
        Self {
            input_text: String::new(),
            options: RenderOptions::default(),
            image: None,
            status: "Ready".to_string(),
        }
    }

    /// Last generated image, if any.
    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Encode the current input and render it with the current options.
    ///
    /// On success the stored image is replaced. On failure the previous
    /// image is kept; an encoding failure additionally updates the status
    /// line, while empty input leaves the session untouched.
    pub fn generate(&mut self) -> Result<(), GenerateError> {
        let text = self.input_text.trim();
        if text.is_empty() {
            return Err(GenerateError::EmptyInput);
        }

        let code = match symbol::encode(text) {
            Ok(code) => code,
            Err(e) => {
                self.status = "Error generating QR code".to_string();
                return Err(GenerateError::Encoding(e));
            }
        };

        let image = symbol::render(&code, &self.options);
        log::info!(
            "Generated {}x{} module symbol ({}x{} px)",
            code.width(),
            code.width(),
            image.width(),
            image.height()
        );

        self.image = Some(image);
        let prefix: String = text.chars().take(STATUS_PREFIX_CHARS).collect();
        self.status = format!("QR Code generated for: {}...", prefix);
        Ok(())
    }

    /// Write the stored image to `path`, normalizing the extension.
    ///
    /// Returns the path actually written so the UI can confirm it.
    pub fn save(&mut self, path: &Path) -> Result<PathBuf, SaveError> {
        let image = self.image.as_ref().ok_or(SaveError::NoImage)?;

        let written = match export::save_image(image, path) {
            Ok(written) => written,
            Err(e) => {
                self.status = "Error saving QR code".to_string();
                return Err(SaveError::Write(e));
            }
        };

        let filename = written
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| written.display().to_string());
        self.status = format!("QR Code saved to: {}", filename);
        Ok(written)
    }

    /// Reset input, options, image and status to their initial state.
    pub fn clear(&mut self) {
        self.input_text.clear();
        self.options = RenderOptions::default();
        self.image = None;
        self.status = "Ready".to_string();
    }
}

impl Default for GeneratorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_success() {
        let mut session = GeneratorSession::new();
        session.input_text = "https://example.com".to_string();

        session.generate().unwrap();

        assert!(session.has_image());
        assert_eq!(
            session.status(),
            "QR Code generated for: https://example.com..."
        );
    }

    #[test]
    fn test_generate_empty_input() {
        let mut session = GeneratorSession::new();
        session.input_text = "   \n\t".to_string();

        let err = session.generate().unwrap_err();

        assert!(matches!(err, GenerateError::EmptyInput));
        assert!(!session.has_image());
        assert_eq!(session.status(), "Ready");
    }

    #[test]
    fn test_generate_truncates_status_prefix() {
        let mut session = GeneratorSession::new();
        session.input_text = "x".repeat(40);

        session.generate().unwrap();

        let expected = format!("QR Code generated for: {}...", "x".repeat(30));
        assert_eq!(session.status(), expected);
    }

    #[test]
    fn test_generate_failure_preserves_image() {
        let mut session = GeneratorSession::new();
        session.input_text = "hello".to_string();
        session.generate().unwrap();
        let before = session.image().unwrap().dimensions();

        // Exceeds the level L capacity across all symbol versions.
        session.input_text = "a".repeat(4000);
        let err = session.generate().unwrap_err();

        assert!(matches!(err, GenerateError::Encoding(_)));
        assert_eq!(session.image().unwrap().dimensions(), before);
        assert_eq!(session.status(), "Error generating QR code");
    }

    #[test]
    fn test_generate_replaces_previous_image() {
        let mut session = GeneratorSession::new();
        session.input_text = "short".to_string();
        session.generate().unwrap();
        let small = session.image().unwrap().dimensions();

        // Enough data to force a larger symbol version.
        session.input_text = "a".repeat(500);
        session.generate().unwrap();
        let large = session.image().unwrap().dimensions();

        assert!(large.0 > small.0);
    }

    #[test]
    fn test_save_without_image() {
        let mut session = GeneratorSession::new();

        let err = session.save(Path::new("/tmp/never-written.png")).unwrap_err();

        assert!(matches!(err, SaveError::NoImage));
        assert_eq!(session.status(), "Ready");
        assert!(!Path::new("/tmp/never-written.png").exists());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let mut session = GeneratorSession::new();
        session.input_text = "https://example.com".to_string();
        session.generate().unwrap();
        let dims = session.image().unwrap().dimensions();

        let written = session.save(&path).unwrap();

        assert_eq!(written, path);
        let read_back = image::open(&path).unwrap();
        assert_eq!((read_back.width(), read_back.height()), dims);
        assert_eq!(session.status(), "QR Code saved to: out.png");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = GeneratorSession::new();
        session.input_text = "hello".to_string();
        session.options.module_size = 3;
        session.options.fill = FillColor::Red;
        session.options.background = BackColor::Pink;
        session.generate().unwrap();

        session.clear();

        assert!(session.input_text.is_empty());
        assert_eq!(session.options, RenderOptions::default());
        assert_eq!(session.options.module_size, 10);
        assert!(!session.has_image());
        assert_eq!(session.status(), "Ready");
    }
}
