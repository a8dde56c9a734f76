use tracing::{debug, info};

use crate::config::GameConfig;
use crate::model::{spawn_point, GameState, Obstacle, ObstacleId, Outcome, Phase};

/// Proof of a jump, redeemed by the landing timer.
///
/// A ticket only lands the jump it was issued for: tickets from an earlier
/// session or an earlier jump are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpTicket {
    session: u64,
    jump: u64,
}

/// What the action key did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceOutcome {
    Started,
    Jumped(JumpTicket),
    Ignored,
}

/// The runner state machine: one game instance with its obstacles.
///
/// All operations are synchronous and run to completion; timing is the
/// caller's job (see `GameLoop`).
pub struct Game {
    config: GameConfig,
    state: GameState,
    obstacles: Vec<Obstacle>,
    jump_seq: u64,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let state = GameState::new(&config);
        Self {
            config,
            state,
            obstacles: Vec::new(),
            jump_seq: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Begin a fresh session. Only valid from Idle or GameOver; returns
    /// false (and changes nothing) while a session is running.
    pub fn start(&mut self) -> bool {
        if self.state.is_playing() {
            return false;
        }

        let s = &mut self.state;
        s.session += 1;
        s.phase = Phase::Playing;
        s.outcome = None;
        s.score = 0.0;
        s.spawn_counter = 0.0;
        s.defeated.clear();
        s.player_offset = self.config.ground_offset;
        s.is_jumping = false;
        self.obstacles.clear();

        info!(session = s.session, high_score = s.high_score, "session started");
        true
    }

    /// Lift the player. Silent no-op unless Playing and grounded.
    pub fn jump(&mut self) -> Option<JumpTicket> {
        if !self.state.is_playing() || self.state.is_jumping {
            return None;
        }

        self.jump_seq += 1;
        self.state.is_jumping = true;
        self.state.player_offset = self.config.jump_offset;
        debug!(score = self.state.score, "jump");

        Some(JumpTicket {
            session: self.state.session,
            jump: self.jump_seq,
        })
    }

    /// Return the player to the ground. Returns false for stale tickets.
    pub fn land(&mut self, ticket: JumpTicket) -> bool {
        if ticket.session != self.state.session || ticket.jump != self.jump_seq || !self.state.is_jumping {
            debug!(?ticket, "ignoring stale landing");
            return false;
        }

        self.state.is_jumping = false;
        self.state.player_offset = self.config.ground_offset;
        true
    }

    /// Single input entry point: starts a session when none is running,
    /// jumps otherwise.
    pub fn handle_space_key(&mut self) -> SpaceOutcome {
        match self.state.phase {
            Phase::Idle | Phase::GameOver => {
                self.start();
                SpaceOutcome::Started
            }
            Phase::Playing => match self.jump() {
                Some(ticket) => SpaceOutcome::Jumped(ticket),
                None => SpaceOutcome::Ignored,
            },
        }
    }

    /// Score timer body. Returns the outcome if this tick ended the session.
    pub fn score_tick(&mut self) -> Option<Outcome> {
        if !self.state.is_playing() {
            return None;
        }

        self.state.score += self.config.score_increment;
        if self.state.score >= self.config.victory_score {
            return Some(self.finish());
        }
        None
    }

    /// Physics timer body: move, retire, spawn, then test collisions.
    /// `now_ms` stamps newly spawned obstacles.
    pub fn physics_tick(&mut self, now_ms: f64) -> Option<Outcome> {
        if !self.state.is_playing() {
            return None;
        }

        let step = self.config.obstacle_step;
        for obstacle in &mut self.obstacles {
            obstacle.advance(step);
        }

        let despawn = self.config.obstacle_despawn_position;
        let defeated = &mut self.state.defeated;
        self.obstacles.retain(|obstacle| {
            if obstacle.is_off_screen(despawn) {
                debug!(index = obstacle.schedule_index, name = obstacle.name(), "obstacle defeated");
                defeated.insert(obstacle.schedule_index);
                false
            } else {
                true
            }
        });

        self.spawn_next(now_ms);

        if self.is_colliding() {
            return Some(self.finish());
        }
        None
    }

    fn spawn_next(&mut self, now_ms: f64) {
        let cursor = self.state.schedule_cursor();

        // A half step means this slot's obstacle is already out; finish the step.
        if self.state.spawn_counter.fract() != 0.0 {
            self.state.spawn_counter = (cursor + 1) as f64;
            return;
        }

        let Some(point) = spawn_point(cursor) else {
            return;
        };
        if self.state.score < point.threshold {
            return;
        }

        info!(index = cursor, name = point.name, score = self.state.yards(), "spawning obstacle");
        self.obstacles.push(Obstacle::new(
            ObstacleId(now_ms.max(0.0) as u64),
            self.config.obstacle_spawn_position,
            cursor,
            self.config.obstacle_height,
        ));
        self.state.spawn_counter += 0.5;
    }

    fn is_colliding(&self) -> bool {
        if self.state.player_offset >= self.config.clear_offset {
            return false;
        }
        self.obstacles
            .iter()
            .any(|o| (o.position - self.config.player_position).abs() < self.config.collision_band)
    }

    fn finish(&mut self) -> Outcome {
        let s = &mut self.state;
        let outcome = if s.score >= self.config.victory_score {
            Outcome::Victory
        } else {
            Outcome::Defeat { yards: s.yards() }
        };

        s.phase = Phase::GameOver;
        s.outcome = Some(outcome);
        s.high_score = s.high_score.max(s.score);

        info!(?outcome, score = s.score, high_score = s.high_score, "session over");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn playing() -> Game {
        let mut game = Game::new(GameConfig::default());
        assert!(game.start());
        game
    }

    fn score_to(game: &mut Game, score: f64) {
        while game.state().score < score {
            game.score_tick();
        }
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = Game::new(GameConfig::default());
        let s = game.state();
        assert_eq!(s.phase, Phase::Idle);
        assert_eq!(s.score, 0.0);
        assert_eq!(s.player_offset, 20.0);
        assert!(game.obstacles().is_empty());
    }

    #[test]
    fn test_ticks_ignored_outside_playing() {
        let mut game = Game::new(GameConfig::default());
        assert_eq!(game.score_tick(), None);
        assert_eq!(game.physics_tick(0.0), None);
        assert_eq!(game.state().score, 0.0);
        assert!(game.jump().is_none());
    }

    #[test]
    fn test_start_while_playing_is_noop() {
        let mut game = playing();
        game.score_tick();
        assert!(!game.start());
        assert_eq!(game.state().score, 0.25);
        assert_eq!(game.state().session, 1);
    }

    #[test]
    fn test_jump_and_land() {
        let mut game = playing();
        let ticket = game.jump().expect("grounded player can jump");
        assert!(game.state().is_jumping);
        assert_eq!(game.state().player_offset, 170.0);

        assert!(game.jump().is_none(), "no double jump");

        assert!(game.land(ticket));
        assert!(!game.state().is_jumping);
        assert_eq!(game.state().player_offset, 20.0);
        assert!(!game.land(ticket), "ticket is single use");
    }

    #[test]
    fn test_stale_landing_from_previous_session() {
        let mut game = playing();
        let old = game.jump().unwrap();

        // Crash while airborne is impossible, so end the session by victory
        score_to(&mut game, 100.0);
        assert_eq!(game.state().phase, Phase::GameOver);
        game.start();

        let fresh = game.jump().unwrap();
        assert!(!game.land(old));
        assert!(game.state().is_jumping);
        assert!(game.land(fresh));
    }

    #[test]
    fn test_space_key_dispatch() {
        let mut game = Game::new(GameConfig::default());
        assert_eq!(game.handle_space_key(), SpaceOutcome::Started);
        assert!(matches!(game.handle_space_key(), SpaceOutcome::Jumped(_)));
        assert_eq!(game.handle_space_key(), SpaceOutcome::Ignored);

        score_to(&mut game, 100.0);
        assert_eq!(game.handle_space_key(), SpaceOutcome::Started);
        assert_eq!(game.state().score, 0.0);
    }

    #[test]
    fn test_victory_at_threshold() {
        let mut game = playing();
        for _ in 0..399 {
            assert_eq!(game.score_tick(), None);
        }
        assert_eq!(game.score_tick(), Some(Outcome::Victory));
        assert_eq!(game.state().score, 100.0);
        assert_eq!(game.state().high_score, 100.0);

        game.score_tick();
        assert_eq!(game.state().score, 100.0, "score frozen after game over");
    }

    #[test]
    fn test_first_spawn_at_three_yards() {
        let mut game = playing();
        score_to(&mut game, 2.75);
        game.physics_tick(20.0);
        assert!(game.obstacles().is_empty());

        game.score_tick();
        game.physics_tick(40.0);
        assert_eq!(game.obstacles().len(), 1);
        assert_eq!(game.obstacles()[0].schedule_index, 0);
        assert_eq!(game.obstacles()[0].position, 800.0);
        assert_eq!(game.obstacles()[0].id, ObstacleId(40));
        assert_eq!(game.state().spawn_counter, 0.5);

        // Next tick completes the slot instead of spawning index 0 again
        game.physics_tick(60.0);
        assert_eq!(game.obstacles().len(), 1);
        assert_eq!(game.state().spawn_counter, 1.0);
    }

    #[test]
    fn test_one_obstacle_per_index() {
        let mut game = playing();
        score_to(&mut game, 95.0);
        // Keep the player airborne so nothing collides
        let mut seen = Vec::new();
        for tick in 0..40 {
            if !game.state().is_jumping {
                game.jump();
            }
            game.physics_tick(tick as f64 * 20.0);
            for o in game.obstacles() {
                if !seen.contains(&o.id) {
                    seen.push(o.id);
                }
            }
            let indices: BTreeSet<_> = game.obstacles().iter().map(|o| o.schedule_index).collect();
            assert_eq!(indices.len(), game.obstacles().len());
        }
        assert_eq!(seen.len(), 8);
        assert_eq!(game.state().spawn_counter, 8.0);
    }

    #[test]
    fn test_obstacle_retired_into_defeated_set() {
        let mut game = playing();
        score_to(&mut game, 3.0);
        game.jump();
        game.physics_tick(0.0);

        for tick in 1..=107 {
            game.physics_tick(tick as f64 * 20.0);
            if tick < 107 {
                assert!(game.obstacles().iter().any(|o| o.schedule_index == 0));
            }
        }
        assert!(game.obstacles().iter().all(|o| o.schedule_index != 0));
        assert!(game.state().defeated.contains(&0));
        assert_eq!(game.state().phase, Phase::Playing);
    }

    #[test]
    fn test_collision_ends_session_with_yards() {
        let mut game = playing();
        score_to(&mut game, 42.5);

        let mut outcome = None;
        let mut ticks = 0;
        while outcome.is_none() {
            ticks += 1;
            outcome = game.physics_tick(ticks as f64 * 20.0);
            assert!(ticks < 200, "expected a collision");
        }

        // Spawned at 800 on tick 1, first inside the band at 128 on tick 85
        assert_eq!(ticks, 85);
        assert_eq!(outcome, Some(Outcome::Defeat { yards: 42 }));
        let s = game.state();
        assert_eq!(s.phase, Phase::GameOver);
        assert_eq!(s.high_score, 42.5);

        // Frozen
        assert_eq!(game.physics_tick(5000.0), None);
        assert_eq!(game.score_tick(), None);
        assert_eq!(game.state().score, 42.5);
    }

    #[test]
    fn test_high_score_never_decreases() {
        let mut game = playing();
        score_to(&mut game, 42.5);
        while game.physics_tick(0.0).is_none() {}
        assert_eq!(game.state().high_score, 42.5);

        game.start();
        score_to(&mut game, 3.0);
        while game.physics_tick(0.0).is_none() {}
        assert_eq!(game.state().outcome, Some(Outcome::Defeat { yards: 3 }));
        assert_eq!(game.state().high_score, 42.5);
    }

    #[test]
    fn test_restart_clears_session_state() {
        let mut game = playing();
        score_to(&mut game, 42.5);
        while game.physics_tick(0.0).is_none() {}
        assert!(!game.obstacles().is_empty());

        assert!(game.start());
        let s = game.state();
        assert_eq!(s.phase, Phase::Playing);
        assert_eq!(s.outcome, None);
        assert_eq!(s.score, 0.0);
        assert_eq!(s.spawn_counter, 0.0);
        assert!(s.defeated.is_empty());
        assert!(game.obstacles().is_empty());
        assert_eq!(s.session, 2);
    }
}
