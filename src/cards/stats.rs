use std::collections::BTreeMap;

use serde::Serialize;

use super::{Colour, CubeList, Rarity};

/// Derived counts over the cube list, recomputable on demand. Every colour,
/// rarity and colour-rarity combination is present even at zero, so callers
/// can look any of them up without a miss.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CubeStatistics {
    pub total_cards: usize,
    pub by_colour: BTreeMap<String, usize>,
    pub by_rarity: BTreeMap<String, usize>,
    pub by_colour_and_rarity: BTreeMap<String, usize>,
}

pub fn combination_key(colour: Colour, rarity: Rarity) -> String {
    format!("{}-{}", colour.name(), rarity.name())
}

impl CubeStatistics {
    pub fn compute(cube: &CubeList) -> Self {
        let mut by_colour = BTreeMap::new();
        let mut by_rarity = BTreeMap::new();
        let mut by_colour_and_rarity = BTreeMap::new();

        for colour in Colour::ALL {
            by_colour.insert(colour.name().to_string(), 0);
            for rarity in Rarity::ALL {
                by_colour_and_rarity.insert(combination_key(colour, rarity), 0);
            }
        }
        for rarity in Rarity::ALL {
            by_rarity.insert(rarity.name().to_string(), 0);
        }

        for card in cube.cards() {
            if let Some(count) = by_colour.get_mut(card.colour.name()) {
                *count += 1;
            }
            if let Some(count) = by_rarity.get_mut(card.rarity.name()) {
                *count += 1;
            }
            if let Some(count) = by_colour_and_rarity.get_mut(&combination_key(card.colour, card.rarity)) {
                *count += 1;
            }
        }

        Self {
            total_cards: cube.size(),
            by_colour,
            by_rarity,
            by_colour_and_rarity,
        }
    }
}
