use std::collections::BTreeSet;

use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Playing,
    GameOver,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    /// Collision; `yards` is the floored score at the moment of impact
    Defeat { yards: u32 },
}

/// All mutable state of one game instance
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: Phase,
    pub outcome: Option<Outcome>,
    pub score: f64,
    /// Best score of this run; never decreases
    pub high_score: f64,
    pub player_offset: f64,
    pub is_jumping: bool,
    /// Advances by 0.5 per step; `floor` is the next schedule index
    pub spawn_counter: f64,
    pub defeated: BTreeSet<usize>,
    /// Incremented on every start, used to reject stale timers
    pub session: u64,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            phase: Phase::Idle,
            outcome: None,
            score: 0.0,
            high_score: 0.0,
            player_offset: config.ground_offset,
            is_jumping: false,
            spawn_counter: 0.0,
            defeated: BTreeSet::new(),
            session: 0,
        }
    }

    pub fn yards(&self) -> u32 {
        self.score.floor() as u32
    }

    /// Index of the next schedule slot that may spawn
    pub fn schedule_cursor(&self) -> usize {
        self.spawn_counter.floor() as usize
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }
}
