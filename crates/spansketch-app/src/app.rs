//! Core application state and lifecycle.

use kurbo::Point;
use peniko::Color;
use spansketch_core::{Board, ConfigError, GestureResponse, SessionError};
use spansketch_render::{GridStyle, RenderContext, Renderer, RendererError, VelloRenderer};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::config::AppConfig;
use crate::event_handler::{Button, EventHandler};
use crate::layout::BoardLayout;
use crate::shortcuts::ShortcutRegistry;
use crate::ui::{UiAction, UiState, render_ui};

/// Fatal application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    board_renderer: VelloRenderer,
    /// Converts the Rgba8Unorm render target to the surface format.
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    board: Board,
    events: EventHandler,
    grid_style: GridStyle,
}

impl AppState {
    /// Apply a handler result: log failures, remember the last point and
    /// schedule a redraw.
    fn apply(&mut self, result: Result<GestureResponse, SessionError>) {
        match result {
            Ok(response) => {
                if let Some(point) = response.point {
                    self.ui_state.last_point = Some(point);
                }
                if let Some(selection) = response.finished {
                    log::info!(
                        "Selection finished: [{:.3}, {:.3}] in {} mode",
                        selection.span.0,
                        selection.span.1,
                        selection.mode
                    );
                }
                if response.redraw {
                    self.window.request_redraw();
                }
            }
            Err(e) => log::warn!("Gesture ignored: {}", e),
        }
    }

    fn run_action(&mut self, action: UiAction) {
        match action {
            UiAction::SelectMode(index) => {
                if let Err(e) = self.board.select_mode(index) {
                    log::warn!("Mode not changed: {}", e);
                }
            }
            UiAction::ClearSelection => {
                self.board.clear_selection();
            }
            UiAction::ResetView => {
                if let Some(canvas) = self.board.surface_mut().as_canvas_mut() {
                    canvas.reset_view();
                }
            }
            UiAction::CycleGrid => {
                if self.board.surface().as_canvas().is_some() {
                    self.grid_style = self.grid_style.next();
                    self.ui_state.grid_style = self.grid_style;
                }
            }
        }
        self.window.request_redraw();
    }

    /// Cursor position in logical pixels.
    fn logical(&self, position: winit::dpi::PhysicalPosition<f64>) -> Point {
        let logical = position.to_logical::<f64>(self.window.scale_factor());
        Point::new(logical.x, logical.y)
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
        }
    }

    /// Load the configuration from the environment and run until the window closes.
    pub fn run() -> Result<(), AppError> {
        let config = AppConfig::load()?;
        let event_loop = EventLoop::new()?;
        let mut app = App::with_config(config);
        event_loop.run_app(&mut app)?;
        Ok(())
    }

    /// Create the window, GPU surface and renderers.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RendererError> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| RendererError::InitFailed(e.to_string()))?,
        );

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);
        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(format!("{:?}", e)))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(format!("{:?}", e)))?;
        let texture_blitter =
            vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let layout = BoardLayout::from_config(&self.config);
        let mut board = Board::from_config(&self.config.board);
        board.set_viewport(layout.board_size());

        log::info!(
            "SpanSketch initialized - board {}x{} ({} surface)",
            layout.board_size().width,
            layout.board_size().height,
            board.surface().kind().name()
        );
        log::info!("Keyboard shortcuts:");
        ShortcutRegistry::log_all();

        window.request_redraw();
        self.state = Some(AppState {
            window,
            surface,
            vello_renderer,
            board_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::new(layout),
            board,
            events: EventHandler::new(layout),
            grid_style: GridStyle::default(),
        });
        Ok(())
    }

    /// Build the UI and the board scene, then draw both.
    fn redraw(&mut self) {
        let Some(state) = &mut self.state else {
            return;
        };

        state.ui_state.sync(&state.board);
        let egui_input = state.egui_state.take_egui_input(&state.window);
        let mut ui_action = None;
        let egui_output = state.egui_ctx.run(egui_input, |ctx| {
            ui_action = render_ui(ctx, &state.ui_state);
        });
        state
            .egui_state
            .handle_platform_output(&state.window, egui_output.platform_output);
        let egui_primitives = state
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        if let Some(action) = ui_action {
            state.run_action(action);
        }

        let scale_factor = state.window.scale_factor();
        let ctx = RenderContext::new(&state.board)
            .with_origin(state.ui_state.layout.origin())
            .with_scale_factor(scale_factor)
            .with_grid(state.grid_style);
        state.board_renderer.build_scene(&ctx);
        let scene = state.board_renderer.take_scene();

        let Some(render_cx) = self.render_cx.as_ref() else {
            return;
        };
        let device_handle = &render_cx.devices[state.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match state.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return;
            }
        };

        let width = state.surface.config.width;
        let height = state.surface.config.height;
        let params = RenderParams {
            base_color: Color::from(self.config.background_color),
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello needs a storage-bindable Rgba8Unorm target; the surface may be Bgra8Unorm.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        if let Err(e) = state.vello_renderer.render_to_texture(
            device,
            queue,
            &scene,
            &render_texture_view,
            &params,
        ) {
            log::error!("Failed to render: {:?}", e);
            return;
        }

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("blit encoder"),
                });
            state.texture_blitter.copy(
                device,
                &mut blit_encoder,
                &render_texture_view,
                &surface_view,
            );
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            state
                .egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("egui encoder"),
                });
            state.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        // Draw over the board.
                        load: vello::wgpu::LoadOp::Load,
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            // egui-wgpu wants a 'static render pass.
            let mut render_pass = render_pass.forget_lifetime();
            state
                .egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            state.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        let repaint_now = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|v| v.repaint_delay.is_zero());
        if repaint_now {
            state.window.request_redraw();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        log::info!("Creating window...");
        if let Err(e) = self.init(event_loop) {
            log::error!("Startup failed: {}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }
        // A drag that started on the board keeps the pointer even over egui areas.
        let egui_wants_pointer = !state.events.is_tracking()
            && (egui_response.consumed
                || state.egui_ctx.is_pointer_over_area()
                || state.egui_ctx.wants_pointer_input());
        let egui_wants_keyboard = state.egui_ctx.wants_keyboard_input();
        let now = Instant::now();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let point = state.logical(position);
                if egui_wants_pointer {
                    return;
                }
                let result = state.events.cursor_moved(&mut state.board, point, now);
                state.apply(result);
            }

            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                let result = state.events.cancel(&mut state.board, now);
                state.apply(result);
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                let button = match button {
                    MouseButton::Left => Button::Primary,
                    MouseButton::Middle => Button::Middle,
                    _ => return,
                };
                let result = match button_state {
                    ElementState::Pressed => {
                        if egui_wants_pointer {
                            return;
                        }
                        state.events.button_pressed(&mut state.board, button, now)
                    }
                    ElementState::Released => {
                        state.events.button_released(&mut state.board, button, now)
                    }
                };
                state.apply(result);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if egui_wants_pointer {
                    return;
                }
                let scroll_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as f64,
                    MouseScrollDelta::PixelDelta(pos) => pos.y,
                };
                let response = state.events.wheel(&mut state.board, scroll_y);
                state.apply(Ok(response));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if egui_wants_keyboard || event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if let Some(action) = ShortcutRegistry::action_for(&event.logical_key) {
                    state.run_action(action);
                }
            }

            _ => {}
        }
    }
}
