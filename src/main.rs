//! QR Code Generator
//!
//! Entry point for the qr-studio application.

use qr_studio::app::StudioApp;
use winit::event_loop::EventLoop;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("QR Studio starting...");

    // Create event loop and run application
    let event_loop = EventLoop::new().expect("Failed to create event loop");
    let mut app = StudioApp::new();

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }

    log::info!("QR Studio exiting");
}
