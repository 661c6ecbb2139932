//! Rendering surface.
//!
//! The controller never touches the page itself; it describes what should be
//! visible through [`Renderer`]. [`ViewModel`] is the renderer used by the
//! browser build: it keeps the latest state as a plain serializable snapshot
//! the page pulls after each event or frame.

use serde::Serialize;

use crate::choices::Choice;
use crate::session::{AnswerRecord, ScoreBand};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    #[default]
    Home,
    ConfigChoice,
    ConfigFreeText,
    PlayChoice,
    PlayFreeText,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    /// 1-based
    pub round: usize,
    pub total: u32,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimerDisplay {
    /// `None` when the round is untimed
    pub seconds: Option<u32>,
    pub fraction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    Skipped,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub verdict: Verdict,
    pub correct_key: String,
    /// Shown only when the player missed
    pub correct_label: Option<String>,
    pub user_answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub score: u32,
    pub round_count: u32,
    pub percentage: u32,
    pub band: ScoreBand,
    pub message: String,
}

pub trait Renderer {
    fn show_screen(&mut self, screen: Screen);
    fn show_fatal(&mut self, message: &str);
    fn render_hud(&mut self, hud: Hud);
    fn render_flag(&mut self, locator: &str);
    fn render_choices(&mut self, choices: &[Choice]);
    fn render_text_input(&mut self);
    fn render_timer(&mut self, timer: TimerDisplay);
    fn render_feedback(&mut self, feedback: Option<Feedback>);
    fn render_summary(&mut self, summary: SummaryView);
    fn render_recap(&mut self, history: &[AnswerRecord]);
    fn render_theme(&mut self, theme: Theme);
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewModel {
    pub screen: Screen,
    pub fatal: Option<String>,
    pub theme: Theme,
    pub hud: Option<Hud>,
    pub flag: Option<String>,
    pub choices: Vec<Choice>,
    pub text_input: bool,
    pub timer: Option<TimerDisplay>,
    pub feedback: Option<Feedback>,
    pub summary: Option<SummaryView>,
    pub recap: Vec<AnswerRecord>,
}

impl Renderer for ViewModel {
    fn show_screen(&mut self, screen: Screen) {
        self.screen = screen;
        match screen {
            Screen::PlayChoice | Screen::PlayFreeText => {
                self.choices.clear();
                self.text_input = false;
                self.summary = None;
                self.recap.clear();
            }
            Screen::End => {
                self.feedback = None;
                self.choices.clear();
                self.text_input = false;
                self.timer = None;
            }
            _ => {
                self.hud = None;
                self.flag = None;
                self.choices.clear();
                self.text_input = false;
                self.timer = None;
                self.feedback = None;
                self.summary = None;
                self.recap.clear();
            }
        }
    }

    fn show_fatal(&mut self, message: &str) {
        self.fatal = Some(message.to_string());
    }

    fn render_hud(&mut self, hud: Hud) {
        self.hud = Some(hud);
    }

    fn render_flag(&mut self, locator: &str) {
        self.flag = Some(locator.to_string());
    }

    fn render_choices(&mut self, choices: &[Choice]) {
        self.choices = choices.to_vec();
    }

    fn render_text_input(&mut self) {
        self.text_input = true;
    }

    fn render_timer(&mut self, timer: TimerDisplay) {
        self.timer = Some(timer);
    }

    fn render_feedback(&mut self, feedback: Option<Feedback>) {
        if feedback.is_some() {
            self.text_input = false;
        }
        self.feedback = feedback;
    }

    fn render_summary(&mut self, summary: SummaryView) {
        self.summary = Some(summary);
    }

    fn render_recap(&mut self, history: &[AnswerRecord]) {
        self.recap = history.to_vec();
    }

    fn render_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
