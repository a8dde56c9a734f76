use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use winit::{
    event::*,
    event_loop::EventLoop,
    window::Window,
};

// Import from the library crate
use endzone_dash::{
    config::GameConfig,
    controller::input::native::window_event_to_input,
    controller::{FrameLoopContext, InputProcessor},
    logging,
    view::{GpuContext, RenderState},
};

struct App {
    window: Arc<Window>,
    gpu: GpuContext,
    render_state: RenderState,
    egui_state: egui_winit::State,
    frame_ctx: FrameLoopContext,
    started: Instant,
}

impl App {
    async fn new(window: Arc<Window>, config: GameConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let gpu = GpuContext::new_native(window.clone(), size.width, size.height)
            .await
            .context("GPU init failed")?;
        let render_state = RenderState::new(gpu.device.as_ref(), &gpu.config);

        let frame_ctx = FrameLoopContext::new(config, InputProcessor::default(), 0.0);
        let egui_state = egui_winit::State::new(
            frame_ctx.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        Ok(Self {
            window,
            gpu,
            render_state,
            egui_state,
            frame_ctx,
            started: Instant::now(),
        })
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Returns true when the event was handled
    fn input(&mut self, event: &WindowEvent) -> bool {
        // First let egui process the event (banner button)
        let egui_captured = self.egui_state.on_window_event(self.window.as_ref(), event).consumed;

        let input = window_event_to_input(event);

        match input {
            Some(input) => {
                let now = self.now_ms();
                self.frame_ctx.handle_input(&input, now);
                true
            }
            None => egui_captured,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.render_state
            .resize(&self.gpu.device, &self.gpu.surface, new_size.width, new_size.height);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = self.now_ms();
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let platform_output = self.frame_ctx.update(now, raw_input, &mut self.render_state);
        self.egui_state.handle_platform_output(&self.window, platform_output);

        self.render_state.draw_frame(&self.gpu.device, &self.gpu.queue, &self.gpu.surface)
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = GameConfig::default();
    config.validate()?;

    let event_loop = EventLoop::new()?;
    let window_attributes = Window::default_attributes()
        .with_title("Endzone Dash")
        .with_inner_size(winit::dpi::LogicalSize::new(config.field_width as f64, config.field_height as f64));
    #[allow(deprecated)]
    let window = Arc::new(event_loop.create_window(window_attributes)?);

    let mut app = pollster::block_on(App::new(window, config))?;
    tracing::info!("game ready, press SPACE to start");

    #[allow(deprecated)]
    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == app.window.id() => {
                if !app.input(event) {
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(physical_size) => {
                            app.resize(*physical_size);
                        }
                        WindowEvent::RedrawRequested => match app.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                tracing::error!("GPU out of memory, exiting");
                                elwt.exit();
                            }
                            Err(e) => tracing::warn!("frame skipped: {e:?}"),
                        },
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                app.window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
