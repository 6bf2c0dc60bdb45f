use crate::{Id, PokemonType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    pub fn total(&self) -> u16 {
        self.hp as u16
            + self.attack as u16
            + self.defense as u16
            + self.sp_attack as u16
            + self.sp_defense as u16
            + self.speed as u16
    }
}

/// One species (or forme) as the team generator sees it.
///
/// A forme is its own record: a mega forme carries its own stats, typing,
/// and `required_item`, and points back at the plain species through
/// `base_species`. Battle-only formes keep their combat profile but are
/// displayed under the base species' identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub num: u16,
    pub name: String,
    pub base_species: Id,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub gender: Option<String>,
    /// Species this one can still evolve into. Non-empty means the species
    /// is not fully evolved.
    #[serde(default)]
    pub evos: Vec<Id>,
    /// Alternate formes reachable from this species (mega formes first).
    #[serde(default)]
    pub other_formes: Vec<Id>,
    /// The combat profile belongs to this forme, but the displayed identity
    /// is the base species.
    #[serde(default)]
    pub battle_only: bool,
    #[serde(default)]
    pub is_mega: bool,
    #[serde(default)]
    pub required_item: Option<Id>,
    #[serde(default)]
    pub required_move: Option<Id>,
    /// Curated list of moves viable in random battles. Preferred over the
    /// raw learnset when non-empty.
    #[serde(default)]
    pub random_battle_moves: Vec<Id>,
    /// Full learnable move list, used when no curated list exists.
    #[serde(default)]
    pub learnset: Vec<Id>,
}

impl SpeciesData {
    pub fn has_type(&self, typ: PokemonType) -> bool {
        self.types.contains(&typ)
    }

    pub fn is_nfe(&self) -> bool {
        !self.evos.is_empty()
    }

    /// True when neither a curated move list nor a learnset is available,
    /// i.e. the species cannot be given a move set at all.
    pub fn has_no_move_pool(&self) -> bool {
        self.random_battle_moves.is_empty() && self.learnset.is_empty()
    }
}
