//! Main application state and event handling.

use std::sync::Arc;

/// Helper function to render egui pass, working around lifetime issues in egui-wgpu.
fn render_egui_pass(
    renderer: &egui_wgpu::Renderer,
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    paint_jobs: &[egui::ClippedPrimitive],
    screen_descriptor: &egui_wgpu::ScreenDescriptor,
) {
    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("egui Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    // SAFETY: The render_pass is used only within this function and dropped
    // before the encoder is finished.
    let render_pass_static: &mut wgpu::RenderPass<'static> =
        unsafe { std::mem::transmute(&mut render_pass) };

    renderer.render(render_pass_static, paint_jobs, screen_descriptor);
}

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::generator::session::{MAX_MODULE_SIZE, MIN_MODULE_SIZE};
use crate::generator::{BackColor, FillColor, GenerateError, GeneratorSession};
use crate::render::SurfacePipeline;
use crate::ui::{Notice, UiState};

/// Optional application icon; any failure is silently ignored.
fn load_window_icon() -> Option<winit::window::Icon> {
    let image = image::open("assets/icon.png").ok()?.into_rgba8();
    let (width, height) = image.dimensions();
    winit::window::Icon::from_rgba(image.into_raw(), width, height).ok()
}

/// Main application state.
pub struct StudioApp {
    /// Main window
    window: Option<Arc<Window>>,
    /// GPU surface pipeline
    render: Option<SurfacePipeline>,
    /// egui context
    egui_ctx: egui::Context,
    /// egui-winit state
    egui_state: Option<egui_winit::State>,
    /// egui-wgpu renderer
    egui_renderer: Option<egui_wgpu::Renderer>,
    /// Generator session (input, options, image, status)
    session: GeneratorSession,
    /// Transient UI state
    ui_state: UiState,
    /// Preview texture for the generated image
    preview: Option<egui::TextureHandle>,
}

impl StudioApp {
    pub fn new() -> Self {
        Self {
            window: None,
            render: None,
            egui_ctx: egui::Context::default(),
            egui_state: None,
            egui_renderer: None,
            session: GeneratorSession::new(),
            ui_state: UiState::default(),
            preview: None,
        }
    }

    fn initialize_graphics(&mut self, window: Arc<Window>) {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone()).expect("Failed to create surface");

        // Request adapter
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        // Create device and queue
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Main Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("Failed to create device");

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let render = SurfacePipeline::new(device, queue, surface, config);

        // Initialize egui
        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            render.device(),
            surface_format,
            None,
            1,
            false,
        );

        self.window = Some(window);
        self.render = Some(render);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
    }

    fn handle_resize(&mut self, size: PhysicalSize<u32>) {
        if let Some(render) = &mut self.render {
            render.resize(size.width.max(1), size.height.max(1));
        }
    }

    /// Upload the session's current image as an egui texture.
    fn update_preview(&mut self) {
        self.preview = self.session.image().map(|img| {
            let size = [img.width() as usize, img.height() as usize];
            let pixels = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
            self.egui_ctx
                .load_texture("qr-preview", pixels, egui::TextureOptions::NEAREST)
        });
    }

    fn on_generate(&mut self) {
        match self.session.generate() {
            Ok(()) => {
                self.update_preview();
            }
            Err(e @ GenerateError::EmptyInput) => {
                self.ui_state.notice = Some(Notice::warning(e.to_string()));
            }
            Err(e) => {
                log::error!("Generation failed: {}", e);
                self.ui_state.notice = Some(Notice::error(e.to_string()));
            }
        }
    }

    fn on_save(&mut self) {
        if !self.session.has_image() {
            self.ui_state.notice = Some(Notice::warning("Generate a QR code first!"));
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .set_title("Save QR Code")
            .set_file_name("qrcode.png")
            .add_filter("PNG image", &["png"])
            .add_filter("JPEG image", &["jpg", "jpeg"])
            .save_file()
        else {
            // Dialog cancelled, nothing changes.
            return;
        };

        match self.session.save(&path) {
            Ok(written) => {
                self.ui_state.notice = Some(Notice::info(format!(
                    "QR Code saved to:\n{}",
                    written.display()
                )));
            }
            Err(e) => {
                log::error!("Save failed: {}", e);
                self.ui_state.notice = Some(Notice::error(e.to_string()));
            }
        }
    }

    fn on_clear(&mut self) {
        self.session.clear();
        self.preview = None;
    }

    fn render_frame(&mut self) {
        // Get window reference for egui input
        let Some(window) = &self.window else { return };
        let Some(egui_state) = &mut self.egui_state else { return };

        // Begin egui frame
        let raw_input = egui_state.take_egui_input(window);
        self.egui_ctx.begin_pass(raw_input);

        // Draw UI
        self.draw_ui();

        // End egui frame
        let full_output = self.egui_ctx.end_pass();

        let Some(window) = &self.window else { return };
        let Some(egui_state) = &mut self.egui_state else { return };
        egui_state.handle_platform_output(window, full_output.platform_output);

        // Tessellate shapes
        let pixels_per_point = self.egui_ctx.pixels_per_point();
        let clipped_primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);

        // Now do the rendering
        let Some(render) = &self.render else { return };
        let Some(egui_renderer) = &mut self.egui_renderer else { return };

        // Render
        let output = match render.surface().get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let Some(window) = &self.window else { return };
                let size = window.inner_size();
                if let Some(render) = &mut self.render {
                    render.resize(size.width, size.height);
                }
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = render.device().create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        // Clear pass
        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.94,
                            g: 0.94,
                            b: 0.94,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        // egui pass
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [render.config().width, render.config().height],
            pixels_per_point,
        };

        for (id, delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(render.device(), render.queue(), *id, delta);
        }

        egui_renderer.update_buffers(
            render.device(),
            render.queue(),
            &mut encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        render_egui_pass(
            egui_renderer,
            &mut encoder,
            &view,
            &clipped_primitives,
            &screen_descriptor,
        );

        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        render.queue().submit(std::iter::once(encoder.finish()));
        output.present();
    }

    fn draw_ui(&mut self) {
        let mut generate_clicked = false;
        let mut save_clicked = false;
        let mut clear_clicked = false;

        egui::TopBottomPanel::top("menu_bar").show(&self.egui_ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save QR Code...").clicked() {
                        save_clicked = true;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        std::process::exit(0);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.ui_state.about_open = true;
                        ui.close_menu();
                    }
                });
            });
        });

        egui::SidePanel::left("input_panel")
            .min_width(320.0)
            .show(&self.egui_ctx, |ui| {
                ui.heading("Input");
                ui.separator();

                ui.label("Enter text or URL:");
                ui.add(
                    egui::TextEdit::multiline(&mut self.session.input_text)
                        .desired_rows(5)
                        .desired_width(f32::INFINITY),
                );

                ui.add_space(20.0);
                ui.heading("QR Code Options");
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Size:");
                    ui.add(
                        egui::Slider::new(
                            &mut self.session.options.module_size,
                            MIN_MODULE_SIZE..=MAX_MODULE_SIZE,
                        )
                        .suffix(" px"),
                    );
                });

                ui.horizontal(|ui| {
                    ui.label("Fill Color:");
                    egui::ComboBox::from_id_salt("fill_color")
                        .selected_text(self.session.options.fill.label())
                        .show_ui(ui, |ui| {
                            for color in FillColor::ALL {
                                ui.selectable_value(
                                    &mut self.session.options.fill,
                                    color,
                                    color.label(),
                                );
                            }
                        });
                });

                ui.horizontal(|ui| {
                    ui.label("Background:");
                    egui::ComboBox::from_id_salt("back_color")
                        .selected_text(self.session.options.background.label())
                        .show_ui(ui, |ui| {
                            for color in BackColor::ALL {
                                ui.selectable_value(
                                    &mut self.session.options.background,
                                    color,
                                    color.label(),
                                );
                            }
                        });
                });

                ui.add_space(20.0);
                ui.horizontal(|ui| {
                    if ui.button("Generate QR Code").clicked() {
                        generate_clicked = true;
                    }
                    if ui.button("Save QR Code...").clicked() {
                        save_clicked = true;
                    }
                    if ui.button("Clear").clicked() {
                        clear_clicked = true;
                    }
                });
            });

        egui::TopBottomPanel::bottom("status_bar").show(&self.egui_ctx, |ui| {
            ui.label(self.session.status());
        });

        egui::CentralPanel::default().show(&self.egui_ctx, |ui| {
            ui.heading("Generated QR Code");
            ui.separator();

            ui.centered_and_justified(|ui| match &self.preview {
                Some(texture) => {
                    ui.add(egui::Image::new(texture).shrink_to_fit());
                }
                None => {
                    ui.label("No QR code generated yet");
                }
            });
        });

        self.draw_notice();
        self.draw_about();

        if generate_clicked {
            self.on_generate();
        }
        if save_clicked {
            self.on_save();
        }
        if clear_clicked {
            self.on_clear();
        }
    }

    /// Modal notice window (success / warning / error), dismissed with OK.
    fn draw_notice(&mut self) {
        let Some(notice) = self.ui_state.notice.clone() else { return };

        let mut dismissed = false;
        egui::Window::new(notice.kind.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(&self.egui_ctx, |ui| {
                ui.label(&notice.message);
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.ui_state.notice = None;
        }
    }

    fn draw_about(&mut self) {
        if !self.ui_state.about_open {
            return;
        }

        let mut open = true;
        egui::Window::new("About")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(&self.egui_ctx, |ui| {
                ui.label("QR Studio");
                ui.label("Generate QR codes from text or URLs and save them as images.");
            });
        self.ui_state.about_open = open;
    }
}

impl Default for StudioApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for StudioApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("QR Code Generator")
                .with_inner_size(PhysicalSize::new(900, 620))
                .with_window_icon(load_window_icon());

            let window = Arc::new(
                event_loop
                    .create_window(window_attrs)
                    .expect("Failed to create window"),
            );

            self.initialize_graphics(window);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let Some(egui_state) = &mut self.egui_state {
            if let Some(window) = &self.window {
                let response = egui_state.on_window_event(window, &event);
                if response.consumed {
                    return;
                }
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.handle_resize(size);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
