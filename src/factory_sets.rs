//! Curated factory set tables: per-tier, per-species lists of hand-authored
//! sets, loaded once from JSON before any generation call.

use crate::errors::{DataLoadError, TeamGenResult};
use schema::{Id, StatSpread};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One hand-authored competitive set. A move slot may offer several
/// variants; selection picks one per slot. Item, ability, and nature may
/// likewise offer alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorySet {
    #[serde(default)]
    pub name: Option<String>,
    pub species: Id,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub item: Vec<Id>,
    #[serde(default)]
    pub ability: Vec<String>,
    #[serde(default)]
    pub nature: Vec<String>,
    pub moves: Vec<Vec<Id>>,
    #[serde(default)]
    pub evs: Option<StatSpread>,
    #[serde(default)]
    pub ivs: Option<StatSpread>,
    #[serde(default)]
    pub level: Option<u8>,
    #[serde(default)]
    pub shiny: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorySpeciesSets {
    pub sets: Vec<FactorySet>,
}

/// The full curated table, keyed by tier then species.
#[derive(Debug, Default)]
pub struct FactorySets {
    tiers: HashMap<Id, HashMap<Id, FactorySpeciesSets>>,
}

impl FactorySets {
    pub fn new() -> Self {
        FactorySets::default()
    }

    pub fn from_json_str(source: &str) -> TeamGenResult<Self> {
        let tiers: HashMap<Id, HashMap<Id, FactorySpeciesSets>> =
            serde_json::from_str(source).map_err(|e| DataLoadError::Parse(e.to_string()))?;
        Ok(FactorySets { tiers })
    }

    pub fn load_json_file(path: &Path) -> TeamGenResult<Self> {
        let source =
            fs::read_to_string(path).map_err(|e| DataLoadError::Io(e.to_string()))?;
        Self::from_json_str(&source)
    }

    /// Direct insertion, used by tests and by callers that author tables
    /// in code.
    pub fn insert_sets(
        &mut self,
        tier: impl Into<Id>,
        species: impl Into<Id>,
        sets: Vec<FactorySet>,
    ) {
        self.tiers
            .entry(tier.into())
            .or_default()
            .insert(species.into(), FactorySpeciesSets { sets });
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Tier ids in sorted order, for deterministic sampling.
    pub fn tier_ids_sorted(&self) -> Vec<Id> {
        let mut tiers: Vec<Id> = self.tiers.keys().cloned().collect();
        tiers.sort();
        tiers
    }

    /// Species ids with sets in the tier, sorted for deterministic draws.
    pub fn species_pool_sorted(&self, tier: &Id) -> Vec<Id> {
        let mut pool: Vec<Id> = self
            .tiers
            .get(tier)
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default();
        pool.sort();
        pool
    }

    pub fn species_sets(&self, tier: &Id, species: &Id) -> Option<&[FactorySet]> {
        self.tiers
            .get(tier)
            .and_then(|table| table.get(species))
            .map(|entry| entry.sets.as_slice())
    }
}
