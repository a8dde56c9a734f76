/// Sprite shown for each obstacle slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemySprite {
    LeftTackle,
    Safety,
    Spencer,
    FreezerGinger,
    ProteinShake,
    Sauron,
    Voldemort,
    Scooter,
}

impl EnemySprite {
    /// Fill color used when no texture is available (RGB)
    pub fn color(&self) -> [u8; 3] {
        match self {
            EnemySprite::LeftTackle => [0, 76, 84],
            EnemySprite::Safety => [0, 104, 96],
            EnemySprite::Spencer => [160, 110, 60],
            EnemySprite::FreezerGinger => [170, 210, 240],
            EnemySprite::ProteinShake => [236, 120, 150],
            EnemySprite::Sauron => [210, 80, 20],
            EnemySprite::Voldemort => [60, 70, 60],
            EnemySprite::Scooter => [230, 190, 40],
        }
    }
}

/// One entry of the obstacle schedule: an obstacle appears once the score reaches `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub threshold: f64,
    pub name: &'static str,
    pub sprite: EnemySprite,
}

pub const SPAWN_SCHEDULE: [SpawnPoint; 8] = [
    SpawnPoint { threshold: 3.0, name: "Eagles Left Tackle", sprite: EnemySprite::LeftTackle },
    SpawnPoint { threshold: 15.0, name: "Eagles Safety", sprite: EnemySprite::Safety },
    SpawnPoint { threshold: 27.0, name: "Spencer", sprite: EnemySprite::Spencer },
    SpawnPoint { threshold: 39.0, name: "Freezer Ginger", sprite: EnemySprite::FreezerGinger },
    SpawnPoint { threshold: 51.0, name: "Strawberry Banana Protein Shake", sprite: EnemySprite::ProteinShake },
    SpawnPoint { threshold: 63.0, name: "Sauron", sprite: EnemySprite::Sauron },
    SpawnPoint { threshold: 75.0, name: "Lord Voldemort", sprite: EnemySprite::Voldemort },
    SpawnPoint { threshold: 90.0, name: "Scooter", sprite: EnemySprite::Scooter },
];

pub fn spawn_point(index: usize) -> Option<&'static SpawnPoint> {
    SPAWN_SCHEDULE.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_thresholds_ascend() {
        for pair in SPAWN_SCHEDULE.windows(2) {
            assert!(pair[0].threshold < pair[1].threshold);
        }
        assert!(SPAWN_SCHEDULE[7].threshold < 100.0, "last obstacle must appear before victory");
    }

    #[test]
    fn test_spawn_point_bounds() {
        assert_eq!(spawn_point(0).map(|p| p.name), Some("Eagles Left Tackle"));
        assert_eq!(spawn_point(7).map(|p| p.sprite), Some(EnemySprite::Scooter));
        assert!(spawn_point(8).is_none());
    }
}
