use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::{cards::CubeCard, err, Res};

pub mod packs;

/// Cards in a full cube booster.
pub const BOOSTER_SIZE: usize = 15;

/// Hard ceiling on boosters per draft, from the 540-card cube assumption
/// (36 boosters of 15).
pub const MAX_BOOSTERS: u32 = 36;

pub type CubeBooster = Vec<CubeCard>;

/// State for one multi-booster generation run. Card names are unique across
/// everything generated for the same session; `used_names` only ever grows.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSession {
    pub id: Uuid,
    pub players: u32,
    pub boosters_per_player: u32,
    pub total_boosters: u32,
    #[serde(skip)]
    pub used_names: HashSet<String>,
    pub boosters: Vec<CubeBooster>,
}

impl DraftSession {
    /// A fresh session with no cards consumed. Fails when the requested
    /// booster count exceeds the ceiling; nothing is generated in that case.
    pub fn new(players: u32, boosters_per_player: u32) -> Res<Self> {
        let total_boosters = players.checked_mul(boosters_per_player).unwrap_or(u32::MAX);
        if total_boosters > MAX_BOOSTERS {
            return err(format!(
                "Maximum {MAX_BOOSTERS} boosters allowed ({total_boosters} requested)."
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            players,
            boosters_per_player,
            total_boosters,
            used_names: HashSet::new(),
            boosters: Vec::new(),
        })
    }
}
