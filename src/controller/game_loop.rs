use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::controller::game::{Game, JumpTicket, SpaceOutcome};
use crate::controller::timers::{TickScheduler, TimerId};
use crate::model::Outcome;

/// Player intents, already decoded from raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// The action key: start when idle/over, jump while playing
    SpaceKey,
    /// Pointer or tap: jump only
    Jump,
    /// "Play Again"
    Start,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerTask {
    Score,
    Physics,
    Land(JumpTicket),
}

/// Drives a [`Game`] from wall-clock time.
///
/// Owns the score interval, the physics interval and the landing timeout.
/// Intervals only exist while a session is playing; every timer of a session
/// is cancelled before the next one starts.
pub struct GameLoop {
    game: Game,
    timers: TickScheduler<TimerTask>,
    score_timer: Option<TimerId>,
    physics_timer: Option<TimerId>,
    land_timer: Option<TimerId>,
}

impl GameLoop {
    pub fn new(config: GameConfig, now_ms: f64) -> Self {
        Self {
            game: Game::new(config),
            timers: TickScheduler::new(now_ms),
            score_timer: None,
            physics_timer: None,
            land_timer: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn now(&self) -> f64 {
        self.timers.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Catch up to `now_ms` and then apply `action`
    pub fn dispatch_at(&mut self, action: GameAction, now_ms: f64) {
        self.advance_to(now_ms);
        self.dispatch(action);
    }

    /// Apply `action` at the current game-clock time
    pub fn dispatch(&mut self, action: GameAction) {
        match action {
            GameAction::SpaceKey => match self.game.handle_space_key() {
                SpaceOutcome::Started => self.arm_session(),
                SpaceOutcome::Jumped(ticket) => self.arm_landing(ticket),
                SpaceOutcome::Ignored => {}
            },
            GameAction::Jump => {
                if let Some(ticket) = self.game.jump() {
                    self.arm_landing(ticket);
                }
            }
            GameAction::Start => {
                if self.game.start() {
                    self.arm_session();
                }
            }
        }
    }

    /// Fire every timer due up to `now_ms`, in order
    pub fn advance_to(&mut self, now_ms: f64) {
        let gap = now_ms - self.timers.now();
        let max_gap = self.game.config().max_catch_up_ms;
        if gap > max_gap {
            warn!(gap_ms = gap, "frame gap too large, dropping time");
            self.timers.skip(gap - max_gap);
        }

        while let Some(task) = self.timers.pop_due(now_ms) {
            self.run(task);
        }
        self.timers.settle(now_ms);
    }

    fn run(&mut self, task: TimerTask) {
        let ended = match task {
            TimerTask::Score => self.game.score_tick(),
            TimerTask::Physics => self.game.physics_tick(self.timers.now()),
            TimerTask::Land(ticket) => {
                self.land_timer = None;
                self.game.land(ticket);
                None
            }
        };

        if let Some(outcome) = ended {
            self.stop_ticking(outcome);
        }
    }

    fn arm_session(&mut self) {
        // Drops the previous session's landing timer as well
        self.timers.cancel_all();
        self.land_timer = None;

        let config = self.game.config();
        let (score_period, physics_period) = (config.score_period_ms, config.physics_period_ms);
        self.score_timer = Some(self.timers.set_interval(score_period, TimerTask::Score));
        self.physics_timer = Some(self.timers.set_interval(physics_period, TimerTask::Physics));
        debug!(now = self.timers.now(), "session timers armed");
    }

    fn arm_landing(&mut self, ticket: JumpTicket) {
        if let Some(stale) = self.land_timer.take() {
            self.timers.cancel(stale);
        }
        let duration = self.game.config().jump_duration_ms;
        self.land_timer = Some(self.timers.set_timeout(duration, TimerTask::Land(ticket)));
    }

    fn stop_ticking(&mut self, outcome: Outcome) {
        for id in [self.score_timer.take(), self.physics_timer.take()].into_iter().flatten() {
            self.timers.cancel(id);
        }
        debug!(?outcome, now = self.timers.now(), "session timers stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Phase;

    fn started() -> GameLoop {
        let mut game_loop = GameLoop::new(GameConfig::default(), 0.0);
        game_loop.dispatch(GameAction::SpaceKey);
        game_loop
    }

    /// Step in frame-sized increments so the catch-up clamp never kicks in
    fn run_until(game_loop: &mut GameLoop, until: f64) {
        let mut now = game_loop.now();
        while now < until {
            now = (now + 16.0).min(until);
            game_loop.advance_to(now);
        }
    }

    #[test]
    fn test_space_starts_and_arms_timers() {
        let game_loop = started();
        assert_eq!(game_loop.game().state().phase, Phase::Playing);
        assert_eq!(game_loop.pending_timers(), 2);
    }

    #[test]
    fn test_score_accrues_every_100ms() {
        let mut game_loop = started();
        run_until(&mut game_loop, 1000.0);
        assert_eq!(game_loop.game().state().score, 2.5);
    }

    #[test]
    fn test_first_obstacle_spawns_at_1200ms() {
        let mut game_loop = started();
        run_until(&mut game_loop, 1199.0);
        assert!(game_loop.game().obstacles().is_empty());

        run_until(&mut game_loop, 1200.0);
        let obstacles = game_loop.game().obstacles();
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].schedule_index, 0);
        assert_eq!(game_loop.game().state().spawn_counter, 0.5);
    }

    #[test]
    fn test_jump_lands_after_500ms() {
        let mut game_loop = started();
        game_loop.dispatch_at(GameAction::Jump, 200.0);
        assert!(game_loop.game().state().is_jumping);

        run_until(&mut game_loop, 699.0);
        assert!(game_loop.game().state().is_jumping);
        assert_eq!(game_loop.game().state().player_offset, 170.0);

        run_until(&mut game_loop, 700.0);
        assert!(!game_loop.game().state().is_jumping);
        assert_eq!(game_loop.game().state().player_offset, 20.0);
    }

    #[test]
    fn test_collision_stops_both_intervals() {
        let mut game_loop = started();
        run_until(&mut game_loop, 10_000.0);

        let state = game_loop.game().state();
        assert_eq!(state.phase, Phase::GameOver);
        // Spawned at 1200ms, reaches the player 84 physics ticks later
        assert_eq!(state.outcome, Some(Outcome::Defeat { yards: 7 }));
        assert_eq!(state.score, 7.0);
        assert_eq!(game_loop.pending_timers(), 0);

        run_until(&mut game_loop, 12_000.0);
        assert_eq!(game_loop.game().state().score, 7.0);
    }

    #[test]
    fn test_restart_cancels_stale_landing() {
        let config = GameConfig { victory_score: 1.0, ..GameConfig::default() };
        let mut game_loop = GameLoop::new(config, 0.0);
        game_loop.dispatch(GameAction::SpaceKey);

        run_until(&mut game_loop, 300.0);
        game_loop.dispatch(GameAction::SpaceKey);
        assert!(game_loop.game().state().is_jumping);

        run_until(&mut game_loop, 400.0);
        assert_eq!(game_loop.game().state().outcome, Some(Outcome::Victory));
        assert_eq!(game_loop.pending_timers(), 1, "only the landing is left");

        run_until(&mut game_loop, 450.0);
        game_loop.dispatch(GameAction::Start);
        assert_eq!(game_loop.pending_timers(), 2, "old landing dropped");
        run_until(&mut game_loop, 600.0);
        game_loop.dispatch(GameAction::SpaceKey);
        assert!(game_loop.game().state().is_jumping);

        // The first jump would have landed at 800
        run_until(&mut game_loop, 850.0);
        assert!(game_loop.game().state().is_jumping);

        run_until(&mut game_loop, 1100.0);
        assert!(!game_loop.game().state().is_jumping);
    }

    #[test]
    fn test_dispatch_at_within_catch_up_keeps_time() {
        let mut game_loop = started();
        game_loop.dispatch_at(GameAction::Jump, 200.0);
        assert_eq!(game_loop.game().state().score, 0.5);
        assert_eq!(game_loop.now(), 200.0);
    }

    #[test]
    fn test_pointer_does_not_start() {
        let mut game_loop = GameLoop::new(GameConfig::default(), 0.0);
        game_loop.dispatch(GameAction::Jump);
        assert_eq!(game_loop.game().state().phase, Phase::Idle);
        assert_eq!(game_loop.pending_timers(), 0);
    }

    #[test]
    fn test_large_gap_is_clamped() {
        let mut game_loop = started();
        game_loop.advance_to(60_000.0);
        assert_eq!(game_loop.game().state().score, 0.5);
        assert_eq!(game_loop.game().state().phase, Phase::Playing);
        assert_eq!(game_loop.now(), 60_000.0);
    }
}
