use tracing::trace;

use crate::config::GameConfig;
use crate::controller::game_loop::GameLoop;
use crate::controller::input::{InputEvent, InputProcessor};
use crate::view::projection::FrameView;
use crate::view::render::RenderState;
use crate::view::ui;

/// Per-frame glue shared by the browser and native shells: advance the game
/// clock, project state, build the egui overlay and hand it to the renderer.
pub struct FrameLoopContext {
    pub game_loop: GameLoop,
    pub input: InputProcessor,
    pub egui_ctx: egui::Context,
}

impl FrameLoopContext {
    pub fn new(config: GameConfig, input: InputProcessor, now_ms: f64) -> Self {
        Self {
            game_loop: GameLoop::new(config, now_ms),
            input,
            egui_ctx: egui::Context::default(),
        }
    }

    /// Feed one input event; events arriving between frames are applied at
    /// their own timestamp.
    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) {
        if let Some(action) = self.input.action_for(event) {
            trace!(?event, ?action, "input");
            self.game_loop.dispatch_at(action, now_ms);
        }
    }

    /// Update game state and store the UI for rendering.
    /// Returns egui's platform output (cursor icon, clipboard...).
    pub fn update(
        &mut self,
        now_ms: f64,
        raw_input: egui::RawInput,
        render_state: &mut RenderState,
    ) -> egui::PlatformOutput {
        self.game_loop.advance_to(now_ms);

        let frame = FrameView::project(self.game_loop.game());
        let (mut full_output, pressed) =
            ui::build_ui(&self.egui_ctx, raw_input, &frame, self.game_loop.game().config());

        if let Some(event) = pressed {
            self.handle_input(&event, now_ms);
        }

        // Tessellate and store for rendering in next step
        let dpr = full_output.pixels_per_point;
        let primitives = self.egui_ctx.tessellate(std::mem::take(&mut full_output.shapes), dpr);
        render_state.clear = frame.background;
        render_state.egui_primitives = Some(primitives);
        render_state.egui_textures = Some(std::mem::take(&mut full_output.textures_delta));
        render_state.egui_dpr = dpr;

        full_output.platform_output
    }
}
