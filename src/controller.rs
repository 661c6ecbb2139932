//! Screen controller: owns the session and timer, turns player actions into
//! session transitions and tells the renderer what to show.

use std::rc::Rc;

use crate::catalog::{CatalogSource, FlagCatalog, FlagImages};
use crate::config::{GameConfig, GameMode};
use crate::constants::rounds::FEEDBACK_DELAY_SECS;
use crate::error::QuizError;
use crate::screen::{Feedback, Hud, Renderer, Screen, SummaryView, TimerDisplay, Verdict};
use crate::session::{GameSession, Outcome, Phase};
use crate::theme::{load_theme, Theme, ThemeStore};
use crate::timer::{RoundTimer, TimerListener};

/// Forwards countdown ticks to the renderer and remembers an expiry so the
/// controller can resolve the round once the timer call returns.
struct Countdown<'a, R: Renderer> {
    renderer: &'a mut R,
    limit: u32,
    expired: bool,
}

impl<R: Renderer> TimerListener for Countdown<'_, R> {
    fn on_tick(&mut self, remaining: u32) {
        self.renderer.render_timer(TimerDisplay {
            seconds: Some(remaining),
            fraction: remaining as f64 / self.limit.max(1) as f64,
        });
    }

    fn on_expire(&mut self) {
        self.expired = true;
    }
}

pub struct ScreenController<R: Renderer, S: ThemeStore> {
    renderer: R,
    theme_store: S,
    theme: Theme,
    images: FlagImages,
    catalog: Result<Rc<FlagCatalog>, QuizError>,
    screen: Screen,
    pending_mode: Option<GameMode>,
    last_config: Option<GameConfig>,
    session: Option<GameSession>,
    timer: RoundTimer,
    feedback_left: Option<f64>,
    seed: Option<u64>,
}

impl<R: Renderer, S: ThemeStore> ScreenController<R, S> {
    /// Loads the theme and the catalog, then shows the home screen. Without a
    /// catalog a blocking message is shown and no game can be started.
    pub fn new(source: &impl CatalogSource, renderer: R, theme_store: S) -> Self {
        let theme = load_theme(&theme_store);
        let catalog = source.load().map(Rc::new);
        let mut controller = ScreenController {
            renderer,
            theme_store,
            theme,
            images: FlagImages::default(),
            catalog,
            screen: Screen::Home,
            pending_mode: None,
            last_config: None,
            session: None,
            timer: RoundTimer::new(),
            feedback_left: None,
            seed: None,
        };
        controller.renderer.render_theme(theme);
        controller.renderer.show_screen(Screen::Home);
        match &controller.catalog {
            Ok(catalog) => log::info!("catalog loaded: {} flags", catalog.len()),
            Err(e) => {
                log::warn!("{e}");
                let message = e.to_string();
                controller.renderer.show_fatal(&message);
            }
        }
        controller
    }

    pub fn set_images(&mut self, images: FlagImages) {
        self.images = images;
    }

    /// Makes every following game draw its questions from a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn catalog(&self) -> Result<Rc<FlagCatalog>, QuizError> {
        self.catalog.clone()
    }

    fn show(&mut self, screen: Screen) {
        self.screen = screen;
        self.renderer.show_screen(screen);
    }

    pub fn open_config(&mut self, mode: GameMode) -> Result<(), QuizError> {
        self.catalog()?;
        self.abandon();
        self.pending_mode = Some(mode);
        self.show(match mode {
            GameMode::MultipleChoice => Screen::ConfigChoice,
            GameMode::FreeText => Screen::ConfigFreeText,
        });
        Ok(())
    }

    /// Starts a game from the options picked on the configuration screen.
    pub fn start_selected(
        &mut self,
        round_count: Option<u32>,
        time_limit_secs: Option<u32>,
    ) -> Result<(), QuizError> {
        let mode = self
            .pending_mode
            .ok_or_else(|| QuizError::InvalidConfig("no game mode selected".to_string()))?;
        let config = GameConfig::from_selection(mode, round_count, time_limit_secs)?;
        self.start(config)
    }

    pub fn start(&mut self, config: GameConfig) -> Result<(), QuizError> {
        let catalog = self.catalog()?;
        let mut session = match self.seed {
            Some(seed) => GameSession::with_seed(catalog, seed),
            None => GameSession::new(catalog),
        };
        session.start(config)?;

        self.timer.cancel();
        self.feedback_left = None;
        self.session = Some(session);
        self.last_config = Some(config);
        self.pending_mode = Some(config.mode);
        self.show(match config.mode {
            GameMode::MultipleChoice => Screen::PlayChoice,
            GameMode::FreeText => Screen::PlayFreeText,
        });
        self.begin_round()
    }

    /// Plays again with the previous options.
    pub fn replay(&mut self) -> Result<(), QuizError> {
        let config = self
            .last_config
            .ok_or_else(|| QuizError::InvalidConfig("no previous game".to_string()))?;
        self.start(config)
    }

    fn begin_round(&mut self) -> Result<(), QuizError> {
        let session = self.session.as_ref().ok_or(QuizError::NotInProgress)?;
        let key = session.current_question()?;
        let config = session.config().copied().ok_or(QuizError::NotInProgress)?;

        self.renderer.render_feedback(None);
        self.renderer.render_hud(Hud {
            round: session.current_round_index() + 1,
            total: session.round_count(),
            score: session.score(),
        });
        self.renderer.render_flag(&self.images.locator(key));
        match config.mode {
            GameMode::MultipleChoice => self.renderer.render_choices(session.choices()),
            GameMode::FreeText => self.renderer.render_text_input(),
        }

        let limit = config.time_limit_secs;
        if limit == 0 {
            self.renderer.render_timer(TimerDisplay {
                seconds: None,
                fraction: 1.0,
            });
        }
        let mut countdown = Countdown {
            renderer: &mut self.renderer,
            limit,
            expired: false,
        };
        self.timer.start(limit, &mut countdown);
        Ok(())
    }

    /// Multiple choice: the player clicked the option for `key`.
    pub fn choose(&mut self, key: &str) -> Result<bool, QuizError> {
        if self.mode() != Some(GameMode::MultipleChoice) {
            return Ok(false);
        }
        self.resolve(Outcome::Answered(key.to_string()))
    }

    /// Free text: the player validated `text`. Blank input is ignored.
    pub fn submit_text(&mut self, text: &str) -> Result<bool, QuizError> {
        if self.mode() != Some(GameMode::FreeText) || text.trim().is_empty() {
            return Ok(false);
        }
        self.resolve(Outcome::Answered(text.to_string()))
    }

    pub fn skip(&mut self) -> Result<bool, QuizError> {
        self.resolve(Outcome::Skipped)
    }

    fn mode(&self) -> Option<GameMode> {
        self.session
            .as_ref()
            .and_then(|session| session.config())
            .map(|config| config.mode)
    }

    /// Resolves the open round. Returns `false` when it was already resolved.
    fn resolve(&mut self, outcome: Outcome) -> Result<bool, QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NotInProgress)?;
        let verdict = match outcome {
            Outcome::Skipped => Verdict::Skipped,
            Outcome::TimedOut => Verdict::TimedOut,
            Outcome::Answered(_) => Verdict::Incorrect,
        };
        let Some(record) = session.resolve_round(outcome) else {
            return Ok(false);
        };
        // The countdown must not outlive the round it was started for.
        self.timer.cancel();

        let verdict = if record.correct { Verdict::Correct } else { verdict };
        let feedback = Feedback {
            verdict,
            correct_key: record.key.clone(),
            correct_label: (!record.correct).then(|| record.label.clone()),
            user_answer: record.user_answer.clone(),
        };
        let hud = Hud {
            round: session.history().len(),
            total: session.round_count(),
            score: session.score(),
        };
        self.renderer.render_feedback(Some(feedback));
        self.renderer.render_hud(hud);
        self.feedback_left = Some(FEEDBACK_DELAY_SECS);
        Ok(true)
    }

    /// Leaves the feedback of the last round and moves on, either to the
    /// next flag or to the end screen.
    pub fn next_round(&mut self) -> Result<bool, QuizError> {
        if self.feedback_left.take().is_none() {
            return Ok(false);
        }
        let session = self.session.as_mut().ok_or(QuizError::NotInProgress)?;
        if session.phase() == Phase::Ended {
            let summary = session.summary()?;
            self.show(Screen::End);
            self.renderer.render_summary(SummaryView {
                score: summary.score,
                round_count: summary.round_count,
                percentage: summary.percentage,
                band: summary.band,
                message: summary.message,
            });
            self.renderer.render_recap(&summary.history);
        } else {
            session.advance();
            self.begin_round()?;
        }
        Ok(true)
    }

    /// Host frame callback with the seconds elapsed since the previous frame.
    pub fn tick(&mut self, dt: f64) -> Result<(), QuizError> {
        if let Some(left) = self.feedback_left.as_mut() {
            *left -= dt;
            if *left <= 0.0 {
                self.next_round()?;
            }
            return Ok(());
        }
        if !self.timer.is_running() {
            return Ok(());
        }

        let limit = self.session_time_limit();
        let mut countdown = Countdown {
            renderer: &mut self.renderer,
            limit,
            expired: false,
        };
        self.timer.advance(dt, &mut countdown);
        let expired = countdown.expired;
        if expired {
            log::debug!("round timer expired");
            self.resolve(Outcome::TimedOut)?;
        } else if let Some(seconds) = self.timer.remaining() {
            self.renderer.render_timer(TimerDisplay {
                seconds: Some(seconds),
                fraction: self.timer.fraction_remaining(),
            });
        }
        Ok(())
    }

    fn session_time_limit(&self) -> u32 {
        self.session
            .as_ref()
            .and_then(|session| session.config())
            .map_or(0, |config| config.time_limit_secs)
    }

    /// Abandons any game in progress.
    pub fn go_home(&mut self) {
        self.abandon();
        self.pending_mode = None;
        self.show(Screen::Home);
    }

    fn abandon(&mut self) {
        self.timer.cancel();
        self.feedback_left = None;
        self.session = None;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.theme_store.save(self.theme.as_str());
        self.renderer.render_theme(self.theme);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    pub fn is_ready(&self) -> bool {
        self.catalog.is_ok()
    }
}
