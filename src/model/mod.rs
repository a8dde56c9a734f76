// MODEL: Game state and data
pub mod game_state;
pub mod obstacle;
pub mod schedule;

pub use game_state::{GameState, Outcome, Phase};
pub use obstacle::{Obstacle, ObstacleId};
pub use schedule::{spawn_point, EnemySprite, SpawnPoint, SPAWN_SCHEDULE};
