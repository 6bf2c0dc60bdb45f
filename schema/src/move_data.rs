use crate::{Id, MoveCategory, PokemonType};
use serde::{Deserialize, Serialize};

/// One combat move with the tactical tags the set builder reasons about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub move_type: PokemonType,
    pub category: MoveCategory,
    /// 0 for moves that do no direct or fixed-formula damage.
    #[serde(default)]
    pub base_power: u16,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub multihit: bool,
    #[serde(default)]
    pub self_switch: bool,
    #[serde(default)]
    pub sets_weather: bool,
}

impl MoveData {
    pub fn is_damaging(&self) -> bool {
        self.base_power > 0
    }

    /// Neutral stand-in for a move the registry does not know. Keeps the
    /// generator total: unknown moves count as plain status moves.
    pub fn unknown(id: &Id) -> Self {
        MoveData {
            name: id.to_string(),
            move_type: PokemonType::Normal,
            category: MoveCategory::Status,
            base_power: 0,
            priority: 0,
            multihit: false,
            self_switch: false,
            sets_weather: false,
        }
    }
}

/// Held item metadata the factory builder cares about: whether the item is
/// a mega stone or a Z-crystal, both of which are capped team resources.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemData {
    pub name: String,
    #[serde(default)]
    pub mega_stone: bool,
    #[serde(default)]
    pub z_crystal: bool,
}
