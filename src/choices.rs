use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::FlagCatalog;
use crate::constants::choices::CHOICE_COUNT;
use crate::shuffle::shuffle_with;

/// One button of a multiple-choice round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub key: String,
    pub label: String,
}

/// Draws the options for a round: the correct key plus up to three distinct
/// wrong keys, in random display order. Small catalogs yield fewer options.
pub fn draw_choices<R: Rng>(rng: &mut R, catalog: &FlagCatalog, correct: &str) -> Vec<Choice> {
    let others: Vec<&str> = catalog.keys().filter(|key| *key != correct).collect();
    let mut keys: Vec<&str> = shuffle_with(rng, &others)
        .into_iter()
        .take(CHOICE_COUNT - 1)
        .collect();
    keys.push(correct);
    shuffle_with(rng, &keys)
        .into_iter()
        .map(|key| Choice {
            key: key.to_string(),
            label: catalog.label(key).unwrap_or(key).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn catalog(n: usize) -> FlagCatalog {
        let json = (0..n)
            .map(|i| format!("\"k{i}\": \"Label {i}\""))
            .collect::<Vec<_>>()
            .join(",");
        FlagCatalog::from_json(&format!("{{{json}}}")).unwrap()
    }

    #[test]
    fn test_four_distinct_choices_with_correct_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let catalog = catalog(20);
        for _ in 0..50 {
            let choices = draw_choices(&mut rng, &catalog, "k7");
            assert_eq!(choices.len(), CHOICE_COUNT);
            let keys: HashSet<_> = choices.iter().map(|c| c.key.as_str()).collect();
            assert_eq!(keys.len(), CHOICE_COUNT);
            assert!(keys.contains("k7"));
            for choice in &choices {
                assert_eq!(Some(choice.label.as_str()), catalog.label(&choice.key));
            }
        }
    }

    #[test]
    fn test_correct_choice_position_varies() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let catalog = catalog(10);
        let positions: HashSet<usize> = (0..100)
            .map(|_| {
                draw_choices(&mut rng, &catalog, "k0")
                    .iter()
                    .position(|c| c.key == "k0")
                    .unwrap()
            })
            .collect();
        assert_eq!(positions.len(), CHOICE_COUNT);
    }

    #[test]
    fn test_small_catalog_shrinks_options() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(draw_choices(&mut rng, &catalog(3), "k1").len(), 3);
        assert_eq!(draw_choices(&mut rng, &catalog(2), "k1").len(), 2);
        let single = draw_choices(&mut rng, &catalog(1), "k0");
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].key, "k0");
    }
}
