//! Roster-wide accumulators.
//!
//! Both roster assemblers thread one of these values through a single build
//! attempt. They are constructed fresh per attempt and discarded afterwards;
//! nothing here is process-wide.

use schema::{Id, PokemonType};
use std::collections::{HashMap, HashSet};

/// Team facts the free-mode assembler shares with the set builder: whether
/// the roster already carries the hazard-setting and hazard-clearing moves
/// it only wants once.
#[derive(Debug, Clone, Default)]
pub struct TeamDetails {
    pub stealth_rock: bool,
    pub rapid_spin: bool,
}

impl TeamDetails {
    /// Fold an accepted member's move list into the team facts.
    pub fn note_moves(&mut self, moves: &[Id]) {
        if moves.iter().any(|m| m == "stealthrock") {
            self.stealth_rock = true;
        }
        if moves.iter().any(|m| m == "rapidspin") {
            self.rapid_spin = true;
        }
    }
}

/// Everything the factory builder accumulates over one build attempt.
#[derive(Debug, Clone)]
pub struct FactoryTeamData {
    pub type_count: HashMap<PokemonType, u32>,
    /// Occurrences of each sorted, deduplicated type pairing. The key is a
    /// string so weather abilities can substitute their own bucket.
    pub type_combo_count: HashMap<String, u32>,
    pub base_formes: HashSet<Id>,
    pub mega_count: u32,
    pub z_count: u32,
    /// Usage counts for items, moves, and satisfied move families.
    pub has: HashMap<Id, u32>,
    pub weaknesses: HashMap<PokemonType, u32>,
    pub resistances: HashMap<PokemonType, u32>,
    /// Ambient weather committed to by a member's ability, if any.
    pub weather: Option<Id>,
    /// Set once the retry budget is exhausted; suppresses eligibility
    /// filtering in set selection and the post-build quality gate.
    pub force_result: bool,
}

impl FactoryTeamData {
    pub fn new(force_result: bool) -> Self {
        FactoryTeamData {
            type_count: HashMap::new(),
            type_combo_count: HashMap::new(),
            base_formes: HashSet::new(),
            mega_count: 0,
            z_count: 0,
            has: HashMap::new(),
            weaknesses: HashMap::new(),
            resistances: HashMap::new(),
            weather: None,
            force_result,
        }
    }

    pub fn has_count(&self, key: &str) -> u32 {
        self.has.get(key).copied().unwrap_or(0)
    }

    pub fn bump_has(&mut self, key: Id) {
        *self.has.entry(key).or_insert(0) += 1;
    }

    pub fn type_count(&self, typ: PokemonType) -> u32 {
        self.type_count.get(&typ).copied().unwrap_or(0)
    }

    pub fn weakness_count(&self, typ: PokemonType) -> u32 {
        self.weaknesses.get(&typ).copied().unwrap_or(0)
    }

    pub fn resistance_count(&self, typ: PokemonType) -> u32 {
        self.resistances.get(&typ).copied().unwrap_or(0)
    }
}

/// Order-independent key for a type pairing: sorted and deduplicated, so
/// Water/Ground and Ground/Water land in the same bucket.
pub fn type_combo_key(types: &[PokemonType]) -> String {
    let mut sorted: Vec<PokemonType> = types.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join("/")
}
