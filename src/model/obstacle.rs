use crate::model::schedule::{spawn_point, EnemySprite};

/// Creation timestamp (game clock, milliseconds). Unique because at most one
/// obstacle spawns per physics tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObstacleId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub position: f64,
    pub schedule_index: usize,
    pub height: f64,
}

impl Obstacle {
    pub fn new(id: ObstacleId, position: f64, schedule_index: usize, height: f64) -> Self {
        Self { id, position, schedule_index, height }
    }

    pub fn advance(&mut self, step: f64) {
        self.position -= step;
    }

    pub fn is_off_screen(&self, despawn_position: f64) -> bool {
        self.position <= despawn_position
    }

    pub fn name(&self) -> &'static str {
        spawn_point(self.schedule_index).map(|p| p.name).unwrap_or("Unknown")
    }

    pub fn sprite(&self) -> Option<EnemySprite> {
        spawn_point(self.schedule_index).map(|p| p.sprite)
    }
}
