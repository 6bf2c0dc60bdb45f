use schema::{Id, StatSpread};
use serde::{Deserialize, Serialize};

/// One finished roster entry: a species identity plus its synthesized
/// loadout. The display name and battle species may differ under the
/// alternate-forme rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSet {
    pub name: String,
    pub species: Id,
    pub gender: Option<String>,
    pub level: u8,
    pub happiness: u8,
    pub shiny: bool,
    pub item: Option<Id>,
    pub ability: String,
    /// Chosen moves, order-preserving, at most four.
    pub moves: Vec<Id>,
    pub nature: Option<String>,
    pub evs: StatSpread,
    pub ivs: StatSpread,
}

impl PokemonSet {
    pub fn has_move(&self, id: &str) -> bool {
        self.moves.iter().any(|m| m == id)
    }
}
