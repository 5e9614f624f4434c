use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::cards::{Colour, ColourCounts, Rarity};

/// A synthetic card with no identity beyond its attributes. Value duplicates
/// are fine, within a booster and across boosters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbstractCard {
    pub colour: Colour,
    pub rarity: Rarity,
}

pub type Booster = Vec<AbstractCard>;

/// Tunable shape of a custom booster. The counts are not forced to sum to
/// the conventional 15 cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoosterSettings {
    pub mythics: u32,
    pub rares: u32,
    pub uncommons: u32,
    pub commons: u32,
    pub colour_balance: bool,
    pub max_per_colour: u32,
}

impl Default for BoosterSettings {
    fn default() -> Self {
        Self {
            mythics: 1,
            rares: 3,
            uncommons: 4,
            commons: 7,
            colour_balance: true,
            max_per_colour: 3,
        }
    }
}

impl BoosterSettings {
    pub fn total(&self) -> u32 {
        self.mythics + self.rares + self.uncommons + self.commons
    }
}

/// Generate a booster to the requested shape, one rarity block at a time,
/// rarest first.
pub fn generate_custom_booster<R: Rng>(settings: &BoosterSettings, rng: &mut R) -> Booster {
    let mut booster = Vec::with_capacity(settings.total() as usize);
    let mut counts = ColourCounts::new();

    let blocks = [
        (Rarity::Mythic, settings.mythics),
        (Rarity::Rare, settings.rares),
        (Rarity::Uncommon, settings.uncommons),
        (Rarity::Common, settings.commons),
    ];
    for (rarity, count) in blocks {
        for _ in 0..count {
            let colour = if settings.colour_balance {
                balanced_colour(&counts, settings.max_per_colour, rng)
            } else {
                random_colour(rng)
            };
            counts.increment(colour);
            booster.push(AbstractCard { colour, rarity });
        }
    }

    booster
}

fn random_colour<R: Rng>(rng: &mut R) -> Colour {
    Colour::ALL[rng.gen_range(0..Colour::ALL.len())]
}

/// Prefer colours still under the cap in this booster. Once every colour is
/// saturated the cap is advisory and the pick falls back to the full wheel,
/// so a draw is always possible.
fn balanced_colour<R: Rng>(counts: &ColourCounts, max_per_colour: u32, rng: &mut R) -> Colour {
    let open: Vec<Colour> = Colour::ALL
        .into_iter()
        .filter(|&colour| counts.get(colour) < max_per_colour)
        .collect();
    match open.choose(rng) {
        Some(&colour) => colour,
        None => random_colour(rng),
    }
}
