use std::sync::LazyLock;

use regex::Regex;
use unidecode::unidecode;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[-'"`]"#).expect("separator pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Folds an answer down to the form used for comparison: accents stripped,
/// lowercased, hyphens and quotes turned into spaces, whitespace collapsed.
pub fn normalize_answer(s: &str) -> String {
    let folded = unidecode(s).to_lowercase();
    let spaced = SEPARATORS.replace_all(&folded, " ");
    WHITESPACE.replace_all(spaced.trim(), " ").into_owned()
}

/// Free-text answer check. No partial credit.
pub fn is_correct(user_input: &str, reference_label: &str) -> bool {
    normalize_answer(user_input) == normalize_answer(reference_label)
}
