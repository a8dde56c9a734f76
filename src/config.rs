use thiserror::Error;

/// Tunables for one game instance. Units are playfield pixels and milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    // Timers
    pub score_period_ms: f64,
    pub physics_period_ms: f64,
    pub jump_duration_ms: f64,
    /// Largest frame gap replayed in one update (backgrounded tabs)
    pub max_catch_up_ms: f64,

    // Scoring
    pub score_increment: f64,
    pub victory_score: f64,

    // Obstacles
    pub obstacle_step: f64,
    pub obstacle_spawn_position: f64,
    pub obstacle_despawn_position: f64,
    pub obstacle_height: f64,

    // Player
    pub player_position: f64,
    pub collision_band: f64,
    pub ground_offset: f64,
    pub jump_offset: f64,
    pub clear_offset: f64,

    // Playfield
    pub field_width: f32,
    pub field_height: f32,

    // Banners
    pub start_story: String,
    pub victory_title: String,
    pub victory_message: String,
    pub defeat_title: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("ground offset {ground} already clears obstacles (clear offset {clear})")]
    GroundClears { ground: f64, clear: f64 },
    #[error("jump offset {jump} does not clear obstacles (clear offset {clear})")]
    JumpTooLow { jump: f64, clear: f64 },
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            score_period_ms: 100.0,
            physics_period_ms: 20.0,
            jump_duration_ms: 500.0,
            max_catch_up_ms: 250.0,

            score_increment: 0.25,
            victory_score: 100.0,

            obstacle_step: 8.0,
            obstacle_spawn_position: 800.0,
            obstacle_despawn_position: -50.0,
            obstacle_height: 80.0,

            player_position: 100.0,
            collision_band: 35.0,
            ground_offset: 20.0,
            jump_offset: 170.0,
            clear_offset: 100.0,

            field_width: 800.0,
            field_height: 400.0,

            start_story: "It's the final seconds of the fourth quarter and the Chiefs are down 5 points. \
                In an unprecedented move Mahomes throws to a rookie fresh off the bench. \
                Can she make it to the endzone?"
                .to_string(),
            victory_title: "CHIEFS WIN!".to_string(),
            victory_message: "Touchdown! The rookie made it to the endzone.".to_string(),
            defeat_title: "GAME OVER".to_string(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("score_period_ms", self.score_period_ms),
            ("physics_period_ms", self.physics_period_ms),
            ("jump_duration_ms", self.jump_duration_ms),
            ("max_catch_up_ms", self.max_catch_up_ms),
            ("score_increment", self.score_increment),
            ("victory_score", self.victory_score),
            ("obstacle_step", self.obstacle_step),
            ("collision_band", self.collision_band),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        if self.ground_offset >= self.clear_offset {
            return Err(ConfigError::GroundClears {
                ground: self.ground_offset,
                clear: self.clear_offset,
            });
        }
        if self.jump_offset < self.clear_offset {
            return Err(ConfigError::JumpTooLow {
                jump: self.jump_offset,
                clear: self.clear_offset,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_period() {
        let config = GameConfig { physics_period_ms: 0.0, ..GameConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive { name: "physics_period_ms", value: 0.0 })
        );
    }

    #[test]
    fn test_rejects_nan_step() {
        let config = GameConfig { obstacle_step: f64::NAN, ..GameConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { name: "obstacle_step", .. })
        ));
    }

    #[test]
    fn test_rejects_grounded_player_that_clears() {
        let config = GameConfig { ground_offset: 120.0, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::GroundClears { .. })));

        let config = GameConfig { jump_offset: 60.0, ..GameConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::JumpTooLow { .. })));
    }
}
