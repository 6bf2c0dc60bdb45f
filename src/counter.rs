//! Move-pool counters.
//!
//! [`MoveCounter::tally`] condenses a candidate move set (plus what is left
//! in the draw pool) into the numbers the culling predicate reasons about.
//! It is recomputed from scratch every time the chosen move list changes.

use crate::dex::Dex;
use schema::{Id, MoveCategory, PokemonType};
use std::collections::HashMap;

/// Stat-boosting moves that commit the set to physical attacking.
pub const PHYSICAL_SETUP: &[&str] = &[
    "bellydrum",
    "bulkup",
    "coil",
    "curse",
    "dragondance",
    "honeclaws",
    "howl",
    "poweruppunch",
    "shiftgear",
    "swordsdance",
];

/// Stat-boosting moves that commit the set to special attacking.
pub const SPECIAL_SETUP: &[&str] = &[
    "calmmind",
    "chargebeam",
    "geomancy",
    "nastyplot",
    "quiverdance",
    "tailglow",
];

/// Stat-boosting moves that support a mixed attacking set.
pub const MIXED_SETUP: &[&str] = &["celebrate", "growth", "happyhour", "shellsmash", "workup"];

/// Moves that boost speed and nothing offensive.
pub const SPEED_SETUP: &[&str] = &["agility", "autotomize", "rockpolish"];

/// The damage category a set's stat-boosting moves have committed it to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupType {
    Physical,
    Special,
    Mixed,
}

impl SetupType {
    /// The single damage category this setup commits to; `None` for mixed.
    pub fn category(self) -> Option<MoveCategory> {
        match self {
            SetupType::Physical => Some(MoveCategory::Physical),
            SetupType::Special => Some(MoveCategory::Special),
            SetupType::Mixed => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MoveCounter {
    /// Damaging move counts per category.
    pub physical: u32,
    pub special: u32,
    /// Status move count (anything without base power).
    pub status: u32,
    /// Ids of the damaging moves currently chosen.
    pub damaging: Vec<Id>,
    /// Damaging moves matching one of the species' own types.
    pub stab: u32,
    /// Damaging move count per elemental type.
    pub type_damage: HashMap<PokemonType, u32>,
    pub physical_setup: u32,
    pub special_setup: u32,
    pub mixed_setup: u32,
    pub speed_setup: u32,
    /// Damaging moves still drawable from the pool, per category.
    pub physical_pool: u32,
    pub special_pool: u32,
    pub setup_type: Option<SetupType>,
}

impl MoveCounter {
    pub fn tally(
        dex: &Dex,
        moves: &[Id],
        species_types: &[PokemonType],
        move_pool: &[Id],
    ) -> Self {
        let mut counter = MoveCounter::default();

        for move_id in moves {
            let data = dex.move_or_default(move_id);
            if data.is_damaging() {
                match data.category {
                    MoveCategory::Physical => counter.physical += 1,
                    MoveCategory::Special => counter.special += 1,
                    MoveCategory::Status => {}
                }
                *counter.type_damage.entry(data.move_type).or_insert(0) += 1;
                if species_types.contains(&data.move_type) {
                    counter.stab += 1;
                }
                counter.damaging.push(move_id.clone());
            } else {
                counter.status += 1;
            }

            let id = move_id.as_str();
            if PHYSICAL_SETUP.contains(&id) {
                counter.physical_setup += 1;
            } else if SPECIAL_SETUP.contains(&id) {
                counter.special_setup += 1;
            } else if MIXED_SETUP.contains(&id) {
                counter.mixed_setup += 1;
            } else if SPEED_SETUP.contains(&id) {
                counter.speed_setup += 1;
            }
        }

        for move_id in move_pool {
            let data = dex.move_or_default(move_id);
            if data.is_damaging() {
                match data.category {
                    MoveCategory::Physical => counter.physical_pool += 1,
                    MoveCategory::Special => counter.special_pool += 1,
                    MoveCategory::Status => {}
                }
            }
        }

        counter.setup_type = counter.derive_setup_type();
        counter
    }

    /// The dominant setup category. Mixed boosts win outright; a set
    /// carrying both physical and special boosts commits to whichever
    /// category has more attacks behind it.
    fn derive_setup_type(&self) -> Option<SetupType> {
        if self.mixed_setup > 0 {
            Some(SetupType::Mixed)
        } else if self.physical_setup > 0 && self.special_setup > 0 {
            if self.physical >= self.special {
                Some(SetupType::Physical)
            } else {
                Some(SetupType::Special)
            }
        } else if self.physical_setup > 0 {
            Some(SetupType::Physical)
        } else if self.special_setup > 0 {
            Some(SetupType::Special)
        } else {
            None
        }
    }

    pub fn damaging_count(&self) -> u32 {
        self.damaging.len() as u32
    }

    /// Chosen damaging moves of one category.
    pub fn category_count(&self, category: MoveCategory) -> u32 {
        match category {
            MoveCategory::Physical => self.physical,
            MoveCategory::Special => self.special,
            MoveCategory::Status => self.status,
        }
    }

    /// Chosen damaging moves of the locked setup category. A mixed setup
    /// counts everything damaging.
    pub fn setup_category_count(&self, setup: SetupType) -> u32 {
        match setup {
            SetupType::Physical => self.physical,
            SetupType::Special => self.special,
            SetupType::Mixed => self.damaging_count(),
        }
    }

    pub fn type_damage_count(&self, typ: PokemonType) -> u32 {
        self.type_damage.get(&typ).copied().unwrap_or(0)
    }
}
