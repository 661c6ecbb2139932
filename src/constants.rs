// Flag quiz limits and defaults

/// Game configuration limits
pub mod config {
    pub const MIN_ROUND_COUNT: u32 = 1;
}

/// Multiple choice rounds
pub mod choices {
    pub const CHOICE_COUNT: usize = 4;
}

/// Round flow
pub mod rounds {
    /// Seconds the feedback stays on screen before the next round starts
    pub const FEEDBACK_DELAY_SECS: f64 = 1.5;
    /// Recorded as the user answer when the timer runs out
    pub const TIMED_OUT_ANSWER: &str = "(temps écoulé)";
}

/// Flag image assets
pub mod images {
    pub const IMAGE_DIR: &str = "drapeau";
    pub const IMAGE_EXTENSION: &str = "svg";
}

/// Theme preference
pub mod theme {
    pub const THEME_STORAGE_KEY: &str = "theme";
}
