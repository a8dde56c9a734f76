use egui::{Align2, Color32, Context, FontId, Pos2, Rect, RichText, Stroke, Vec2};

use crate::config::GameConfig;
use crate::controller::InputEvent;
use crate::model::EnemySprite;
use crate::view::projection::{Background, Banner, FrameView, PlayerSprite};

const PLAYER_SIZE: Vec2 = Vec2::new(50.0, 70.0);
const OBSTACLE_WIDTH: f32 = 50.0;

impl Background {
    pub fn color(&self) -> Color32 {
        match self {
            Background::Welcome => Color32::from_rgb(18, 28, 58),
            Background::Field => Color32::from_rgb(46, 125, 50),
            Background::Victory => Color32::from_rgb(227, 24, 55),
        }
    }
}

fn sprite_color(sprite: EnemySprite) -> Color32 {
    let [r, g, b] = sprite.color();
    Color32::from_rgb(r, g, b)
}

/// Maps playfield units (origin bottom-left, y up) onto screen points
struct Field {
    rect: Rect,
    scale: f32,
}

impl Field {
    fn fit(available: Rect, config: &GameConfig) -> Self {
        let scale = (available.width() / config.field_width).min(available.height() / config.field_height);
        let size = Vec2::new(config.field_width, config.field_height) * scale;
        Self {
            rect: Rect::from_center_size(available.center(), size),
            scale,
        }
    }

    /// Screen rect of a sprite whose left edge is `x` and bottom edge is `offset`
    fn sprite_rect(&self, x: f64, offset: f64, size: Vec2) -> Rect {
        let left = self.rect.left() + x as f32 * self.scale;
        let bottom = self.rect.bottom() - offset as f32 * self.scale;
        Rect::from_min_max(
            Pos2::new(left, bottom - size.y * self.scale),
            Pos2::new(left + size.x * self.scale, bottom),
        )
    }
}

/// Build the complete UI and return egui output plus any button press
pub fn build_ui(
    egui_ctx: &Context,
    raw_input: egui::RawInput,
    frame: &FrameView,
    config: &GameConfig,
) -> (egui::FullOutput, Option<InputEvent>) {
    let mut pressed = None;
    let output = egui_ctx.run(raw_input, |ctx| {
        draw_field(ctx, frame, config);
        draw_scoreboard(ctx, frame);
        draw_roster(ctx, frame);
        if let Some(banner) = &frame.banner {
            if draw_banner(ctx, banner) {
                pressed = Some(InputEvent::PlayAgain);
            }
        }
    });
    (output, pressed)
}

fn draw_field(ctx: &Context, frame: &FrameView, config: &GameConfig) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(frame.background.color()))
        .show(ctx, |ui| {
            let field = Field::fit(ui.max_rect(), config);
            let painter = ui.painter_at(field.rect);

            // Ground strip up to the grounded offset
            let ground_top = field.rect.bottom() - config.ground_offset as f32 * field.scale;
            painter.rect_filled(
                Rect::from_min_max(Pos2::new(field.rect.left(), ground_top), field.rect.right_bottom()),
                0.0,
                Color32::from_rgb(96, 64, 32),
            );

            for obstacle in &frame.obstacles {
                let rect = field.sprite_rect(
                    obstacle.x,
                    config.ground_offset,
                    Vec2::new(OBSTACLE_WIDTH, obstacle.height as f32),
                );
                painter.rect_filled(rect, 4.0, sprite_color(obstacle.sprite));
            }

            if frame.player.visible {
                let rect = field.sprite_rect(frame.player.x, frame.player.offset, PLAYER_SIZE);
                let color = match frame.player.sprite {
                    PlayerSprite::Running => Color32::from_rgb(255, 184, 28),
                    PlayerSprite::Jumping => Color32::from_rgb(255, 230, 120),
                };
                painter.rect_filled(rect, 6.0, color);
                painter.rect_stroke(rect, 6.0, Stroke::new(2.0, Color32::WHITE), egui::StrokeKind::Inside);
            }
        });
}

fn draw_scoreboard(ctx: &Context, frame: &FrameView) {
    let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::Foreground, egui::Id::new("score")));
    let origin = ctx.available_rect().left_top() + Vec2::new(16.0, 12.0);
    painter.text(origin, Align2::LEFT_TOP, &frame.score_text, FontId::proportional(28.0), Color32::WHITE);
    if let Some(best) = &frame.high_score_text {
        painter.text(
            origin + Vec2::new(0.0, 34.0),
            Align2::LEFT_TOP,
            best,
            FontId::proportional(16.0),
            Color32::LIGHT_GRAY,
        );
    }
}

fn draw_roster(ctx: &Context, frame: &FrameView) {
    if frame.roster.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("roster"))
        .anchor(Align2::RIGHT_TOP, [-16.0, 12.0])
        .interactable(false)
        .show(ctx, |ui| {
            for entry in &frame.roster {
                let text = RichText::new(entry.name).size(14.0);
                let text = if entry.defeated {
                    text.strikethrough().color(Color32::GRAY)
                } else {
                    text.color(Color32::WHITE)
                };
                ui.label(text);
            }
        });
}

/// Returns true when "Play Again" was clicked
fn draw_banner(ctx: &Context, banner: &Banner) -> bool {
    let mut clicked = false;
    egui::Area::new(egui::Id::new("banner"))
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(Color32::from_black_alpha(200))
                .corner_radius(8.0)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_max_width(420.0);
                    ui.vertical_centered(|ui| match banner {
                        Banner::Start { story, prompt } => {
                            ui.label(RichText::new(story).size(16.0).color(Color32::WHITE));
                            ui.add_space(8.0);
                            ui.label(RichText::new(*prompt).size(18.0).strong().color(Color32::YELLOW));
                        }
                        Banner::GameOver { title, message } => {
                            ui.heading(RichText::new(title).size(32.0).color(Color32::WHITE));
                            ui.label(RichText::new(message).size(18.0).color(Color32::WHITE));
                            ui.add_space(8.0);
                            clicked = ui.button(RichText::new("Play Again").size(18.0)).clicked();
                        }
                    });
                });
        });
    clicked
}
