use rusequence_core::Difficulty;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cosmetic pause before an automated player acts. Purely presentational.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ThinkingDelay {
    pub easy_ms: u64,
    pub medium_ms: u64,
    pub hard_ms: u64,
    /// 0.0 disables the pause.
    pub scale: f64,
}

impl Default for ThinkingDelay {
    fn default() -> Self {
        Self {
            easy_ms: 600,
            medium_ms: 900,
            hard_ms: 1200,
            scale: 1.0,
        }
    }
}

impl ThinkingDelay {
    pub fn instant() -> Self {
        Self {
            scale: 0.0,
            ..Self::default()
        }
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> Duration {
        let base = match difficulty {
            Difficulty::Easy => self.easy_ms,
            Difficulty::Medium => self.medium_ms,
            Difficulty::Hard => self.hard_ms,
        };
        let scaled = (base as f64 * self.scale.max(0.0)).round() as u64;
        Duration::from_millis(scaled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutoplayConfig {
    pub seed: u64,
    pub max_turns: u32,
    pub thinking: ThinkingDelay,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            max_turns: 1000,
            thinking: ThinkingDelay::instant(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_scales_per_tier() {
        let delay = ThinkingDelay {
            scale: 0.5,
            ..ThinkingDelay::default()
        };
        assert_eq!(delay.for_difficulty(Difficulty::Easy), Duration::from_millis(300));
        assert_eq!(delay.for_difficulty(Difficulty::Hard), Duration::from_millis(600));
        assert_eq!(
            ThinkingDelay::instant().for_difficulty(Difficulty::Medium),
            Duration::ZERO
        );
    }
}
