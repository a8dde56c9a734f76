//! Pure projection of game state onto what the screen shows.
//!
//! Nothing here draws; `ui` paints a [`FrameView`] with egui.

use crate::controller::Game;
use crate::model::{EnemySprite, ObstacleId, Outcome, Phase, SPAWN_SCHEDULE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Welcome,
    Field,
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSprite {
    Running,
    Jumping,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub visible: bool,
    pub sprite: PlayerSprite,
    pub x: f64,
    /// Height above the bottom edge of the playfield
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleView {
    pub id: ObstacleId,
    pub x: f64,
    pub height: f64,
    pub sprite: EnemySprite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub name: &'static str,
    pub defeated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    Start { story: String, prompt: &'static str },
    GameOver { title: String, message: String },
}

impl Banner {
    pub fn offers_play_again(&self) -> bool {
        matches!(self, Banner::GameOver { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub background: Background,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub score_text: String,
    pub high_score_text: Option<String>,
    pub roster: Vec<RosterEntry>,
    pub banner: Option<Banner>,
}

impl FrameView {
    pub fn project(game: &Game) -> Self {
        let state = game.state();
        let config = game.config();

        let background = match (state.phase, state.outcome) {
            (Phase::Idle, _) => Background::Welcome,
            (Phase::GameOver, Some(Outcome::Victory)) => Background::Victory,
            _ => Background::Field,
        };

        let player = PlayerView {
            visible: state.phase == Phase::Playing,
            sprite: if state.is_jumping { PlayerSprite::Jumping } else { PlayerSprite::Running },
            x: config.player_position,
            offset: state.player_offset,
        };

        let obstacles = game
            .obstacles()
            .iter()
            .filter_map(|o| {
                Some(ObstacleView {
                    id: o.id,
                    x: o.position,
                    height: o.height,
                    sprite: o.sprite()?,
                })
            })
            .collect();

        let cursor = state.schedule_cursor();
        let roster = SPAWN_SCHEDULE
            .iter()
            .enumerate()
            .take_while(|(index, _)| cursor > *index)
            .map(|(index, point)| RosterEntry {
                name: point.name,
                defeated: state.defeated.contains(&index),
            })
            .collect();

        let high_score_text =
            (state.high_score > 0.0).then(|| format!("Best: {} Yards", state.high_score.floor() as u32));

        let banner = match (state.phase, state.outcome) {
            (Phase::Idle, _) => Some(Banner::Start {
                story: config.start_story.clone(),
                prompt: "Press SPACE to start.",
            }),
            (Phase::GameOver, Some(Outcome::Victory)) => Some(Banner::GameOver {
                title: config.victory_title.clone(),
                message: config.victory_message.clone(),
            }),
            (Phase::GameOver, _) => Some(Banner::GameOver {
                title: config.defeat_title.clone(),
                message: format!("You made it: {} Yards", state.yards()),
            }),
            (Phase::Playing, _) => None,
        };

        Self {
            background,
            player,
            obstacles,
            score_text: format!("{} Yards", state.yards()),
            high_score_text,
            roster,
            banner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn score_to(game: &mut Game, score: f64) {
        while game.state().score < score {
            game.score_tick();
        }
    }

    #[test]
    fn test_idle_frame() {
        let game = Game::new(GameConfig::default());
        let frame = FrameView::project(&game);
        assert_eq!(frame.background, Background::Welcome);
        assert!(!frame.player.visible);
        assert_eq!(frame.score_text, "0 Yards");
        assert!(frame.roster.is_empty());
        assert!(frame.high_score_text.is_none());
        match frame.banner {
            Some(Banner::Start { prompt, .. }) => assert_eq!(prompt, "Press SPACE to start."),
            other => panic!("unexpected banner {other:?}"),
        }
    }

    #[test]
    fn test_playing_frame_tracks_jump() {
        let mut game = Game::new(GameConfig::default());
        game.start();
        score_to(&mut game, 3.5);

        let frame = FrameView::project(&game);
        assert_eq!(frame.background, Background::Field);
        assert!(frame.player.visible);
        assert_eq!(frame.player.sprite, PlayerSprite::Running);
        assert_eq!(frame.player.offset, 20.0);
        assert_eq!(frame.score_text, "3 Yards");
        assert!(frame.banner.is_none());

        let ticket = game.jump().unwrap();
        let frame = FrameView::project(&game);
        assert_eq!(frame.player.sprite, PlayerSprite::Jumping);
        assert_eq!(frame.player.offset, 170.0);

        game.land(ticket);
        assert_eq!(FrameView::project(&game).player.sprite, PlayerSprite::Running);
    }

    #[test]
    fn test_roster_shows_spawned_and_defeated() {
        let mut game = Game::new(GameConfig::default());
        game.start();
        score_to(&mut game, 3.0);
        game.jump();

        game.physics_tick(0.0);
        let frame = FrameView::project(&game);
        assert_eq!(frame.obstacles.len(), 1);
        assert_eq!(frame.obstacles[0].sprite, EnemySprite::LeftTackle);
        assert_eq!(frame.obstacles[0].x, 800.0);
        // Counter is 0.5: floor is 0, not listed yet
        assert!(frame.roster.is_empty());

        game.physics_tick(20.0);
        let frame = FrameView::project(&game);
        assert_eq!(frame.roster, vec![RosterEntry { name: "Eagles Left Tackle", defeated: false }]);

        for tick in 2..=107 {
            game.physics_tick(tick as f64 * 20.0);
        }
        let frame = FrameView::project(&game);
        assert!(frame.obstacles.is_empty());
        assert_eq!(frame.roster, vec![RosterEntry { name: "Eagles Left Tackle", defeated: true }]);
    }

    #[test]
    fn test_defeat_banner_reports_yards() {
        let mut game = Game::new(GameConfig::default());
        game.start();
        score_to(&mut game, 42.5);
        while game.physics_tick(0.0).is_none() {}

        let frame = FrameView::project(&game);
        assert_eq!(frame.background, Background::Field);
        assert!(!frame.player.visible);
        assert_eq!(frame.high_score_text.as_deref(), Some("Best: 42 Yards"));
        let banner = frame.banner.expect("game over banner");
        assert!(banner.offers_play_again());
        assert_eq!(
            banner,
            Banner::GameOver { title: "GAME OVER".to_string(), message: "You made it: 42 Yards".to_string() }
        );
    }

    #[test]
    fn test_victory_frame() {
        let mut game = Game::new(GameConfig::default());
        game.start();
        score_to(&mut game, 100.0);

        let frame = FrameView::project(&game);
        assert_eq!(frame.background, Background::Victory);
        assert_eq!(frame.score_text, "100 Yards");
        match frame.banner {
            Some(Banner::GameOver { title, .. }) => assert_eq!(title, "CHIEFS WIN!"),
            other => panic!("unexpected banner {other:?}"),
        }
    }
}
