use std::str::FromStr;

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::constants::config::MIN_ROUND_COUNT;
use crate::error::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Pick the label among a handful of options
    MultipleChoice,
    /// Type the label
    FreeText,
}

impl FromStr for GameMode {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "multiple_choice" => Ok(GameMode::MultipleChoice),
            "free_text" => Ok(GameMode::FreeText),
            other => Err(QuizError::InvalidConfig(format!("unknown game mode {other:?}"))),
        }
    }
}

/// Options chosen on the configuration screen. Fixed for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GameConfig {
    #[garde(skip)]
    pub mode: GameMode,
    /// Requested number of rounds, clamped to the catalog size on start
    #[garde(range(min = MIN_ROUND_COUNT))]
    pub round_count: u32,
    /// Seconds per round, 0 for untimed
    #[garde(skip)]
    pub time_limit_secs: u32,
}

impl GameConfig {
    pub fn new(mode: GameMode, round_count: u32, time_limit_secs: u32) -> Result<Self, QuizError> {
        let config = GameConfig {
            mode,
            round_count,
            time_limit_secs,
        };
        config.check()?;
        Ok(config)
    }

    /// Builds a config from the raw selections of the configuration screen,
    /// where either option may still be unset.
    pub fn from_selection(
        mode: GameMode,
        round_count: Option<u32>,
        time_limit_secs: Option<u32>,
    ) -> Result<Self, QuizError> {
        let round_count = round_count
            .ok_or_else(|| QuizError::InvalidConfig("no round count selected".to_string()))?;
        let time_limit_secs = time_limit_secs
            .ok_or_else(|| QuizError::InvalidConfig("no time limit selected".to_string()))?;
        Self::new(mode, round_count, time_limit_secs)
    }

    pub fn check(&self) -> Result<(), QuizError> {
        self.validate()
            .map_err(|report| QuizError::InvalidConfig(report.to_string()))
    }

    pub fn is_timed(&self) -> bool {
        self.time_limit_secs > 0
    }
}
