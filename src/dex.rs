//! Read-only registry of species, move, and item tables.
//!
//! The registry is populated once, before any generation call, either from
//! RON files or by direct insertion (the test fixtures do the latter). The
//! generator only ever reads from it.

use crate::errors::{DataLoadError, TeamGenResult};
use schema::{Id, ItemData, MoveData, SpeciesData};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Known-good fallback species for data-incompatibility recovery.
pub const DEFAULT_SPECIES: &str = "bulbasaur";

#[derive(Debug, Default)]
pub struct Dex {
    species: HashMap<Id, SpeciesData>,
    moves: HashMap<Id, MoveData>,
    items: HashMap<Id, ItemData>,
}

impl Dex {
    pub fn new() -> Self {
        Dex::default()
    }

    // --- Lookups ---
    // A miss returns None rather than an error: the generator treats a
    // missing record as "non-existent" and recovers locally.

    pub fn species(&self, id: &Id) -> Option<&SpeciesData> {
        self.species.get(id)
    }

    pub fn move_data(&self, id: &Id) -> Option<&MoveData> {
        self.moves.get(id)
    }

    /// Move lookup that never fails: unknown moves resolve to a neutral
    /// status move so set building stays total.
    pub fn move_or_default(&self, id: &Id) -> MoveData {
        self.moves
            .get(id)
            .cloned()
            .unwrap_or_else(|| MoveData::unknown(id))
    }

    pub fn item(&self, id: &Id) -> Option<&ItemData> {
        self.items.get(id)
    }

    /// Item lookup that never fails: no item, or an unknown one, resolves
    /// to a neutral record with no resource flags set.
    pub fn item_or_default(&self, id: Option<&Id>) -> ItemData {
        id.and_then(|id| self.items.get(id))
            .cloned()
            .unwrap_or_default()
    }

    /// All species ids ordered by dex number, then id. The generators draw
    /// from this so a replayed random sequence rebuilds the same roster.
    pub fn species_ids_sorted(&self) -> Vec<Id> {
        let mut ids: Vec<(u16, &Id)> = self
            .species
            .iter()
            .map(|(id, data)| (data.num, id))
            .collect();
        ids.sort();
        ids.into_iter().map(|(_, id)| id.clone()).collect()
    }

    // --- Population ---

    pub fn add_species(&mut self, id: impl Into<Id>, data: SpeciesData) {
        self.species.insert(id.into(), data);
    }

    pub fn add_move(&mut self, id: impl Into<Id>, data: MoveData) {
        self.moves.insert(id.into(), data);
    }

    pub fn add_item(&mut self, id: impl Into<Id>, data: ItemData) {
        self.items.insert(id.into(), data);
    }

    /// Parse a RON map of species records and merge it into the registry.
    /// Returns how many records were loaded.
    pub fn load_species_ron(&mut self, source: &str) -> TeamGenResult<usize> {
        let table: HashMap<Id, SpeciesData> =
            ron::from_str(source).map_err(|e| DataLoadError::Parse(e.to_string()))?;
        let count = table.len();
        self.species.extend(table);
        Ok(count)
    }

    /// Parse a RON map of move records and merge it into the registry.
    pub fn load_moves_ron(&mut self, source: &str) -> TeamGenResult<usize> {
        let table: HashMap<Id, MoveData> =
            ron::from_str(source).map_err(|e| DataLoadError::Parse(e.to_string()))?;
        let count = table.len();
        self.moves.extend(table);
        Ok(count)
    }

    /// Parse a RON map of item records and merge it into the registry.
    pub fn load_items_ron(&mut self, source: &str) -> TeamGenResult<usize> {
        let table: HashMap<Id, ItemData> =
            ron::from_str(source).map_err(|e| DataLoadError::Parse(e.to_string()))?;
        let count = table.len();
        self.items.extend(table);
        Ok(count)
    }

    /// Load `species.ron`, `moves.ron`, and (if present) `items.ron` from a
    /// data directory.
    pub fn load_data_dir(&mut self, data_path: &Path) -> TeamGenResult<()> {
        let species = fs::read_to_string(data_path.join("species.ron"))
            .map_err(|e| DataLoadError::Io(e.to_string()))?;
        self.load_species_ron(&species)?;

        let moves = fs::read_to_string(data_path.join("moves.ron"))
            .map_err(|e| DataLoadError::Io(e.to_string()))?;
        self.load_moves_ron(&moves)?;

        let items_path = data_path.join("items.ron");
        if items_path.exists() {
            let items = fs::read_to_string(&items_path)
                .map_err(|e| DataLoadError::Io(e.to_string()))?;
            self.load_items_ron(&items)?;
        }
        Ok(())
    }
}
