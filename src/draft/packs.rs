use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};

use crate::{
    cards::{Colour, ColourCounts, CubeCard, CubeList, Rarity},
    Res,
};

use super::{CubeBooster, DraftSession, BOOSTER_SIZE};

/// Per-colour cap within one cube booster. Multicolour and colourless slots
/// run looser than the five pigment colours.
fn colour_cap(colour: Colour) -> u32 {
    if colour.is_pigment() {
        2
    } else {
        3
    }
}

/// Deal one booster from the cube, never repeating a name in `used_names`.
/// One mythic is seeded first while any unused mythic remains. The remaining
/// slots fill under the per-colour caps, falling back to the whole unused
/// cube once no card is under cap. The booster runs short only when the cube
/// itself runs out, which is observed rather than treated as an error.
pub fn generate_cube_booster<R: Rng>(
    cube: &CubeList,
    used_names: &mut HashSet<String>,
    rng: &mut R,
) -> CubeBooster {
    let mut booster = Vec::with_capacity(BOOSTER_SIZE);
    let mut counts = ColourCounts::new();

    let mythics: Vec<&CubeCard> = cube
        .cards()
        .iter()
        .filter(|card| card.rarity == Rarity::Mythic && !used_names.contains(&card.name))
        .collect();
    if let Some(&card) = mythics.choose(rng) {
        used_names.insert(card.name.clone());
        counts.increment(card.colour);
        booster.push(card.clone());
    }

    while booster.len() < BOOSTER_SIZE {
        let available: Vec<&CubeCard> = cube
            .cards()
            .iter()
            .filter(|card| !used_names.contains(&card.name))
            .collect();
        if available.is_empty() {
            tracing::warn!(
                "Cube exhausted; booster stops at {} of {BOOSTER_SIZE} cards.",
                booster.len()
            );
            break;
        }

        let eligible: Vec<&CubeCard> = available
            .iter()
            .copied()
            .filter(|card| counts.get(card.colour) < colour_cap(card.colour))
            .collect();

        let choice = if eligible.is_empty() {
            available.choose(rng)
        } else {
            eligible.choose(rng)
        };
        let Some(&card) = choice else { break };

        used_names.insert(card.name.clone());
        counts.increment(card.colour);
        booster.push(card.clone());
    }

    booster
}

/// Run a whole draft: validate the booster budget up front, then deal every
/// booster from one fresh session so no card repeats across the draft.
pub fn generate_all_boosters<R: Rng>(
    cube: &CubeList,
    players: u32,
    boosters_per_player: u32,
    rng: &mut R,
) -> Res<DraftSession> {
    let mut session = DraftSession::new(players, boosters_per_player)?;
    for _ in 0..session.total_boosters {
        let booster = generate_cube_booster(cube, &mut session.used_names, rng);
        session.boosters.push(booster);
    }
    Ok(session)
}
