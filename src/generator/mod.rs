//! QR code generation: render options, symbol construction and session state.

pub mod palette;
pub mod session;
pub mod symbol;

pub use palette::{BackColor, FillColor};
pub use session::{GenerateError, GeneratorSession, RenderOptions, SaveError};
