//! Flag catalog: the key to label table the whole game draws from.
//!
//! Keys double as image file stems, so a key addresses both the label shown
//! to the player and the flag picture.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use unidecode::unidecode;

use crate::constants::images::{IMAGE_DIR, IMAGE_EXTENSION};
use crate::error::QuizError;

/// Immutable mapping of flag key to display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct FlagCatalog {
    labels: BTreeMap<String, String>,
}

/// Anything able to hand over the catalog once at startup.
pub trait CatalogSource {
    fn load(&self) -> Result<FlagCatalog, QuizError>;
}

/// Catalog held as a JSON document (the `drapeaux.json` layout).
pub struct JsonCatalog<'a>(pub &'a str);

impl CatalogSource for JsonCatalog<'_> {
    fn load(&self) -> Result<FlagCatalog, QuizError> {
        FlagCatalog::from_json(self.0)
    }
}

impl CatalogSource for FlagCatalog {
    fn load(&self) -> Result<FlagCatalog, QuizError> {
        Ok(self.clone())
    }
}

impl TryFrom<BTreeMap<String, String>> for FlagCatalog {
    type Error = QuizError;

    fn try_from(labels: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if labels.is_empty() {
            return Err(QuizError::CatalogLoad("catalog is empty".to_string()));
        }
        if let Some((key, _)) = labels
            .iter()
            .find(|(key, label)| key.trim().is_empty() || label.trim().is_empty())
        {
            return Err(QuizError::CatalogLoad(format!(
                "entry {key:?} has an empty key or label"
            )));
        }
        Ok(FlagCatalog { labels })
    }
}

impl From<FlagCatalog> for BTreeMap<String, String> {
    fn from(catalog: FlagCatalog) -> Self {
        catalog.labels
    }
}

impl FlagCatalog {
    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        let labels: BTreeMap<String, String> =
            serde_json::from_str(json).map_err(|e| QuizError::CatalogLoad(e.to_string()))?;
        Self::try_from(labels)
    }

    /// Builds a catalog from bare labels, deriving each key with [`flag_key`].
    /// Later labels that collide with an existing key are dropped.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for label in labels {
            let label = label.as_ref();
            let key = flag_key(label);
            if key.is_empty() {
                continue;
            }
            map.entry(key).or_insert_with(|| label.to_string());
        }
        Self::try_from(map)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.labels.contains_key(key)
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.labels.keys().map(String::as_str)
    }
}

/// Derives the snake_case key used for flag file names from a country label.
///
/// `"Côte d'Ivoire"` becomes `"cote_d_ivoire"`.
pub fn flag_key(label: &str) -> String {
    let ascii = unidecode(&label.replace(['\u{2019}', '\u{2018}'], "'")).to_lowercase();
    let mut key = String::with_capacity(ascii.len());
    let mut pending_sep = false;
    for c in ascii.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.push(c);
        } else {
            pending_sep = true;
        }
    }
    key
}

/// Where flag pictures live. The locator is built, never checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagImages {
    pub dir: String,
    pub extension: String,
}

impl Default for FlagImages {
    fn default() -> Self {
        FlagImages {
            dir: IMAGE_DIR.to_string(),
            extension: IMAGE_EXTENSION.to_string(),
        }
    }
}

impl FlagImages {
    pub fn locator(&self, key: &str) -> String {
        format!("{}/{}.{}", self.dir, key, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "algerie": "Algérie",
        "cote_d_ivoire": "Côte d'Ivoire",
        "france": "France"
    }"#;

    #[test]
    fn test_from_json() {
        let catalog = FlagCatalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.label("france"), Some("France"));
        assert_eq!(catalog.label("espagne"), None);
        assert_eq!(
            catalog.keys().collect::<Vec<_>>(),
            vec!["algerie", "cote_d_ivoire", "france"]
        );
    }

    #[test]
    fn test_malformed_catalogs_are_rejected() {
        for bad in ["", "[]", "{}", r#"{"fr": ""}"#, r#"{"": "France"}"#, r#"{"fr": 3}"#] {
            assert!(
                matches!(FlagCatalog::from_json(bad), Err(QuizError::CatalogLoad(_))),
                "{bad:?} should not load"
            );
        }
    }

    #[test]
    fn test_json_source() {
        let catalog = JsonCatalog(SAMPLE).load().unwrap();
        assert!(catalog.contains("algerie"));
        assert!(JsonCatalog("not json").load().is_err());
    }

    #[test]
    fn test_flag_key() {
        assert_eq!(flag_key("Algérie"), "algerie");
        assert_eq!(
            flag_key("République démocratique du Congo"),
            "republique_democratique_du_congo"
        );
        assert_eq!(flag_key("Côte d'Ivoire"), "cote_d_ivoire");
        assert_eq!(flag_key("Côte d\u{2019}Ivoire"), "cote_d_ivoire");
        assert_eq!(flag_key("  (Bosnie-Herzégovine)  "), "bosnie_herzegovine");
        assert_eq!(flag_key("!!"), "");
    }

    #[test]
    fn test_from_labels_skips_duplicates() {
        let catalog = FlagCatalog::from_labels(["France", "FRANCE", "Pérou", "??"]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.label("france"), Some("France"));
        assert_eq!(catalog.label("perou"), Some("Pérou"));
    }

    #[test]
    fn test_image_locator() {
        assert_eq!(FlagImages::default().locator("france"), "drapeau/france.svg");
        let png = FlagImages {
            dir: "assets/flags".to_string(),
            extension: "png".to_string(),
        };
        assert_eq!(png.locator("perou"), "assets/flags/perou.png");
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let catalog: FlagCatalog = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(serde_json::from_str::<FlagCatalog>("{}").is_err());
    }
}
