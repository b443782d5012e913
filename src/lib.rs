//! Desktop QR Code Generator
//!
//! A standalone application for generating QR code images:
//! - Text input with configurable module size and colors
//! - Live preview of the generated symbol
//! - Export to PNG/JPEG via a native save dialog

pub mod app;
pub mod export;
pub mod generator;
pub mod render;
pub mod ui;
