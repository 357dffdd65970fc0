//! Game tuning constants.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Vowels that make the harder distractor in Level 1.
pub const DIFFICULT_VOWELS: [&str; 5] = ["icecream", "australia", "eagle", "earth", "ukulele"];

/// Settings shared by every session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// How long selection feedback stays on screen before input resumes.
    pub feedback_delay_ms: u64,
    /// Draw weights for the three Distinction target vowels.
    pub distinction_weights: [f64; 3],
    /// Draws allowed while avoiding a back-to-back repeat.
    pub max_selection_attempts: u32,
    /// A Distinction sub-level fails once mistakes reach this.
    pub distinction_max_mistakes: u32,
    /// A Distinction sub-level fails once replays reach this.
    pub distinction_max_replays: u32,
    /// Copies of each target vowel in the Familiarization queue.
    pub familiarization_ratio: [u32; 3],
    pub difficult_vowels: Vec<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            feedback_delay_ms: 1000,
            distinction_weights: [0.4, 0.4, 0.2],
            max_selection_attempts: 5,
            distinction_max_mistakes: 3,
            distinction_max_replays: 2,
            familiarization_ratio: [3, 2, 2],
            difficult_vowels: DIFFICULT_VOWELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GameSettings {
    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }

    pub fn is_difficult(&self, name: &str) -> bool {
        self.difficult_vowels.iter().any(|v| v == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_rules() {
        let settings = GameSettings::default();
        assert_eq!(settings.feedback_delay(), Duration::from_secs(1));
        assert!((settings.distinction_weights.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert_eq!(settings.familiarization_ratio.iter().sum::<u32>(), 7);
        assert!(settings.is_difficult("earth"));
        assert!(!settings.is_difficult("pin"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: GameSettings = serde_json::from_str(r#"{"feedback_delay_ms": 250}"#).unwrap();
        assert_eq!(settings.feedback_delay_ms, 250);
        assert_eq!(settings.max_selection_attempts, 5);
        assert_eq!(settings.difficult_vowels.len(), 5);
    }
}
