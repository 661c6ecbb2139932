//! Browser entry point.
//!
//! The page constructs a [`FlagQuiz`] with the parsed `drapeaux.json`,
//! forwards clicks and key presses, calls [`FlagQuiz::tick`] from its
//! animation frame loop and re-renders from [`FlagQuiz::view`].

use wasm_bindgen::prelude::*;

use crate::catalog::{CatalogSource, FlagCatalog, FlagImages};
use crate::constants::theme::THEME_STORAGE_KEY;
use crate::controller::ScreenController;
use crate::error::QuizError;
use crate::screen::ViewModel;
use crate::theme::ThemeStore;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(s: &str);
}

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Debug
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            console_log(&format!("[{}] {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn init_logging() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }
}

/// Catalog handed over by the page as a plain `{ key: label }` object.
pub struct JsCatalog(pub JsValue);

impl CatalogSource for JsCatalog {
    fn load(&self) -> Result<FlagCatalog, QuizError> {
        serde_wasm_bindgen::from_value(self.0.clone())
            .map_err(|e| QuizError::CatalogLoad(e.to_string()))
    }
}

pub struct LocalStorageThemeStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageThemeStore {
    pub fn new() -> Self {
        LocalStorageThemeStore {
            storage: web_sys::window().and_then(|window| window.local_storage().ok().flatten()),
        }
    }
}

impl Default for LocalStorageThemeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeStore for LocalStorageThemeStore {
    fn load(&self) -> Option<String> {
        self.storage.as_ref()?.get_item(THEME_STORAGE_KEY).ok().flatten()
    }

    fn save(&self, value: &str) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = storage.set_item(THEME_STORAGE_KEY, value) {
            log::warn!("could not save theme preference: {e:?}");
        }
    }
}

fn to_js(e: QuizError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

#[wasm_bindgen]
pub struct FlagQuiz {
    controller: ScreenController<ViewModel, LocalStorageThemeStore>,
}

#[wasm_bindgen]
impl FlagQuiz {
    /// Never fails: a bad catalog leaves the quiz on a blocking error message
    /// (see `view().fatal`) and every game action is refused.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog: JsValue) -> FlagQuiz {
        init_logging();
        FlagQuiz {
            controller: ScreenController::new(
                &JsCatalog(catalog),
                ViewModel::default(),
                LocalStorageThemeStore::new(),
            ),
        }
    }

    pub fn set_images(&mut self, dir: String, extension: String) {
        self.controller.set_images(FlagImages { dir, extension });
    }

    pub fn is_ready(&self) -> bool {
        self.controller.is_ready()
    }

    /// `mode` is `"multiple_choice"` or `"free_text"`.
    pub fn open_config(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = mode.parse().map_err(to_js)?;
        self.controller.open_config(mode).map_err(to_js)
    }

    pub fn start(&mut self, round_count: Option<u32>, time_limit_secs: Option<u32>) -> Result<(), JsValue> {
        self.controller
            .start_selected(round_count, time_limit_secs)
            .map_err(to_js)
    }

    pub fn replay(&mut self) -> Result<(), JsValue> {
        self.controller.replay().map_err(to_js)
    }

    pub fn choose(&mut self, key: &str) -> Result<bool, JsValue> {
        self.controller.choose(key).map_err(to_js)
    }

    pub fn submit_text(&mut self, text: &str) -> Result<bool, JsValue> {
        self.controller.submit_text(text).map_err(to_js)
    }

    pub fn skip(&mut self) -> Result<bool, JsValue> {
        self.controller.skip().map_err(to_js)
    }

    pub fn next_round(&mut self) -> Result<bool, JsValue> {
        self.controller.next_round().map_err(to_js)
    }

    pub fn tick(&mut self, dt: f64) -> Result<(), JsValue> {
        self.controller.tick(dt).map_err(to_js)
    }

    pub fn go_home(&mut self) {
        self.controller.go_home();
    }

    /// Returns the new theme name.
    pub fn toggle_theme(&mut self) -> String {
        self.controller.toggle_theme();
        self.controller.theme().to_string()
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.controller.renderer()).map_err(Into::into)
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::screen::Screen;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn catalog() -> JsValue {
        let flags = js_sys::Object::new();
        js_sys::Reflect::set(&flags, &"fr".into(), &"France".into()).unwrap();
        js_sys::Reflect::set(&flags, &"pe".into(), &"Pérou".into()).unwrap();
        flags.into()
    }

    #[wasm_bindgen_test]
    fn test_js_catalog_loads() {
        let catalog = JsCatalog(catalog()).load().unwrap();
        assert_eq!(catalog.label("pe"), Some("Pérou"));
        assert!(JsCatalog(JsValue::from_f64(3.0)).load().is_err());
    }

    #[wasm_bindgen_test]
    fn test_free_text_game_in_browser() {
        let mut quiz = FlagQuiz::new(catalog());
        assert!(quiz.is_ready());
        quiz.open_config("free_text").unwrap();
        quiz.start(Some(1), Some(0)).unwrap();
        let label = quiz
            .controller
            .session()
            .unwrap()
            .current_label()
            .unwrap()
            .to_string();
        assert!(quiz.submit_text(&label.to_lowercase()).unwrap());
        assert!(quiz.next_round().unwrap());
        assert_eq!(quiz.controller.screen(), Screen::End);
        assert!(quiz.view().unwrap().is_object());
    }

    #[wasm_bindgen_test]
    fn test_bad_catalog_is_fatal() {
        let mut quiz = FlagQuiz::new(JsValue::NULL);
        assert!(!quiz.is_ready());
        assert!(quiz.open_config("multiple_choice").is_err());
        assert!(quiz.open_config("unknown").is_err());
    }
}
