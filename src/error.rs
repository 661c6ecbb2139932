use thiserror::Error;

/// Errors surfaced by the quiz core.
///
/// Resolving a round twice is deliberately absent: the second resolution is
/// ignored rather than reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The flag catalog could not be obtained or was malformed
    #[error("could not load the flag catalog: {0}")]
    CatalogLoad(String),
    /// A game was requested with missing or out-of-range options
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
    /// The current question was requested past the last round
    #[error("round {index} is out of range for a {count}-round game")]
    OutOfRange { index: usize, count: usize },
    #[error("no game is in progress")]
    NotInProgress,
    #[error("the game has not ended yet")]
    NotEnded,
}
