//! Flag recognition quiz compiled to WebAssembly.
//!
//! Two modes: pick the country among a few options, or type its name. The
//! core (session, timer, answer matching) is renderer-agnostic and runs
//! headless; [`web::FlagQuiz`] is the facade the page talks to.

pub mod catalog;
pub mod choices;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod matcher;
pub mod screen;
pub mod session;
pub mod shuffle;
pub mod theme;
pub mod timer;
pub mod web;

pub use catalog::{flag_key, CatalogSource, FlagCatalog, FlagImages, JsonCatalog};
pub use config::{GameConfig, GameMode};
pub use controller::ScreenController;
pub use error::QuizError;
pub use matcher::{is_correct, normalize_answer};
pub use session::{AnswerRecord, GameSession, Outcome, Phase, Summary};
pub use shuffle::shuffle;
pub use timer::{RoundTimer, TimerListener};
pub use web::FlagQuiz;
