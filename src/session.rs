//! Game session: question order, scoring and the per-round history.
//!
//! A session walks `NotStarted -> InProgress -> Ended`. Each round is
//! resolved exactly once; a second resolution of the same round (typically a
//! timer expiry racing a click) is ignored until [`GameSession::advance`]
//! opens the next round.

use std::rc::Rc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::FlagCatalog;
use crate::choices::{draw_choices, Choice};
use crate::config::{GameConfig, GameMode};
use crate::constants::rounds::TIMED_OUT_ANSWER;
use crate::error::QuizError;
use crate::matcher::is_correct;
use crate::shuffle::shuffle_with;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    InProgress,
    Ended,
}

/// How a round came to an end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Selected key in multiple choice, typed text in free text
    Answered(String),
    Skipped,
    TimedOut,
}

/// Outcome of one round, written once when the round resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub key: String,
    pub label: String,
    pub correct: bool,
    pub user_answer: String,
    pub skipped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    Good,
    Average,
    Poor,
}

impl ScoreBand {
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Average,
            _ => ScoreBand::Poor,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent ! Vous êtes un expert des drapeaux !",
            ScoreBand::Good => "Très bien ! Encore un petit effort !",
            ScoreBand::Average => "Pas mal, mais vous pouvez mieux faire !",
            ScoreBand::Poor => "Continuez à vous entraîner !",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub score: u32,
    pub round_count: u32,
    pub percentage: u32,
    pub band: ScoreBand,
    pub message: String,
    pub history: Vec<AnswerRecord>,
}

/// `round(100 * score / total)`, halves rounded up.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (score, total) = (score as u64, total as u64);
    ((200 * score + total) / (2 * total)) as u32
}

pub struct GameSession {
    catalog: Rc<FlagCatalog>,
    rng: ChaCha8Rng,
    phase: Phase,
    config: Option<GameConfig>,
    questions: Vec<String>,
    current: usize,
    score: u32,
    history: Vec<AnswerRecord>,
    round_answered: bool,
    choices: Vec<Choice>,
}

impl GameSession {
    pub fn new(catalog: Rc<FlagCatalog>) -> Self {
        Self::with_rng(catalog, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    /// Reproducible question order, for tests and replays.
    pub fn with_seed(catalog: Rc<FlagCatalog>, seed: u64) -> Self {
        Self::with_rng(catalog, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(catalog: Rc<FlagCatalog>, rng: ChaCha8Rng) -> Self {
        GameSession {
            catalog,
            rng,
            phase: Phase::NotStarted,
            config: None,
            questions: vec![],
            current: 0,
            score: 0,
            history: vec![],
            round_answered: false,
            choices: vec![],
        }
    }

    /// Starts a fresh game, discarding any previous progress. An invalid
    /// config leaves the session untouched.
    pub fn start(&mut self, mut config: GameConfig) -> Result<(), QuizError> {
        config.check()?;
        let available = u32::try_from(self.catalog.len()).unwrap_or(u32::MAX);
        config.round_count = config.round_count.min(available);

        let keys: Vec<String> = self.catalog.keys().map(str::to_string).collect();
        let mut questions = shuffle_with(&mut self.rng, &keys);
        questions.truncate(config.round_count as usize);

        self.questions = questions;
        self.config = Some(config);
        self.current = 0;
        self.score = 0;
        self.history.clear();
        self.round_answered = false;
        self.phase = Phase::InProgress;
        self.choices = self.draw_round_choices();
        log::info!(
            "game started: {:?}, {} rounds, {}s per round",
            config.mode,
            config.round_count,
            config.time_limit_secs
        );
        Ok(())
    }

    /// Key of the flag being asked.
    pub fn current_question(&self) -> Result<&str, QuizError> {
        if self.phase == Phase::NotStarted {
            return Err(QuizError::NotInProgress);
        }
        self.questions
            .get(self.current)
            .map(String::as_str)
            .ok_or(QuizError::OutOfRange {
                index: self.current,
                count: self.questions.len(),
            })
    }

    pub fn current_label(&self) -> Result<&str, QuizError> {
        let key = self.current_question()?;
        Ok(self.catalog.label(key).unwrap_or(key))
    }

    /// Options of the current multiple-choice round; empty in free text.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Records the outcome of the current round. Returns `None` when the
    /// round was already resolved or no round is open.
    pub fn resolve_round(&mut self, outcome: Outcome) -> Option<&AnswerRecord> {
        if self.phase != Phase::InProgress || self.round_answered {
            log::debug!("ignoring {outcome:?}: no open round");
            return None;
        }
        let config = self.config?;
        let key = self.questions.get(self.current)?.clone();
        let label = self.catalog.label(&key).unwrap_or(&key).to_string();

        let record = match outcome {
            Outcome::Answered(answer) => match config.mode {
                GameMode::MultipleChoice => AnswerRecord {
                    correct: answer == key,
                    user_answer: self.catalog.label(&answer).unwrap_or(&answer).to_string(),
                    key,
                    label,
                    skipped: false,
                },
                GameMode::FreeText => AnswerRecord {
                    correct: is_correct(&answer, &label),
                    user_answer: answer,
                    key,
                    label,
                    skipped: false,
                },
            },
            Outcome::Skipped => AnswerRecord {
                key,
                label,
                correct: false,
                user_answer: String::new(),
                skipped: true,
            },
            Outcome::TimedOut => AnswerRecord {
                key,
                label,
                correct: false,
                user_answer: TIMED_OUT_ANSWER.to_string(),
                skipped: false,
            },
        };

        if record.correct {
            self.score += 1;
        }
        log::debug!(
            "round {} resolved: {} (answer {:?})",
            self.current + 1,
            if record.correct { "correct" } else { "wrong" },
            record.user_answer
        );
        self.round_answered = true;
        self.current += 1;
        if self.current >= self.questions.len() {
            self.phase = Phase::Ended;
            log::info!("game ended: {}/{}", self.score, self.questions.len());
        }
        self.history.push(record);
        self.history.last()
    }

    /// Opens the next round once the previous one has been resolved.
    /// Returns whether a new round started.
    pub fn advance(&mut self) -> bool {
        if self.phase != Phase::InProgress || !self.round_answered {
            return false;
        }
        self.round_answered = false;
        self.choices = self.draw_round_choices();
        true
    }

    pub fn summary(&self) -> Result<Summary, QuizError> {
        if self.phase != Phase::Ended {
            return Err(QuizError::NotEnded);
        }
        let round_count = self.round_count();
        let percentage = percentage(self.score, round_count);
        let band = ScoreBand::from_percentage(percentage);
        Ok(Summary {
            score: self.score,
            round_count,
            percentage,
            band,
            message: band.message().to_string(),
            history: self.history.clone(),
        })
    }

    fn draw_round_choices(&mut self) -> Vec<Choice> {
        let multiple_choice = self
            .config
            .is_some_and(|config| config.mode == GameMode::MultipleChoice);
        match self.questions.get(self.current) {
            Some(key) if multiple_choice => draw_choices(&mut self.rng, &self.catalog, key),
            _ => vec![],
        }
    }

    pub fn catalog(&self) -> &FlagCatalog {
        &self.catalog
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> Option<&GameConfig> {
        self.config.as_ref()
    }

    /// Effective number of rounds, after clamping.
    pub fn round_count(&self) -> u32 {
        self.questions.len() as u32
    }

    pub fn current_round_index(&self) -> usize {
        self.current
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn round_answered(&self) -> bool {
        self.round_answered
    }
}
