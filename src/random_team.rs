//! Free-mode roster assembly: sample species from the eligible pool under
//! the diversity caps, synthesizing a move set per accepted member.

use crate::generator::TeamGenerator;
use crate::pokemon_set::PokemonSet;
use crate::sampler::{random_chance, sample_no_replace};
use crate::team_data::{type_combo_key, TeamDetails};
use rand::Rng;
use schema::{Id, PokemonType};
use std::collections::{HashMap, HashSet};

/// Classic species window: the first generation plus the two later
/// additions distributed alongside it.
const GEN_WINDOW_MAX: u16 = 151;
const GEN_WINDOW_EXTRAS: [u16; 2] = [808, 809];

/// Maximum roster size.
pub const TEAM_SIZE: usize = 6;

/// At most this many not-fully-evolved members per roster.
const NFE_LIMIT: u32 = 3;

fn in_generation_window(num: u16) -> bool {
    (1..=GEN_WINDOW_MAX).contains(&num) || GEN_WINDOW_EXTRAS.contains(&num)
}

impl<'a> TeamGenerator<'a> {
    /// Assemble a roster of up to six members with fully synthesized move
    /// sets.
    pub fn random_team(&self, rng: &mut impl Rng) -> Vec<PokemonSet> {
        let mut pool: Vec<Id> = self
            .dex
            .species_ids_sorted()
            .into_iter()
            .filter(|id| {
                self.dex.species(id).is_some_and(|data| {
                    in_generation_window(data.num) && !data.random_battle_moves.is_empty()
                })
            })
            .collect();

        let mut team: Vec<PokemonSet> = Vec::new();
        let mut type_count: HashMap<PokemonType, u32> = HashMap::new();
        let mut type_combo_count: HashMap<String, u32> = HashMap::new();
        let mut base_formes: HashSet<Id> = HashSet::new();
        let mut nfe_count: u32 = 0;
        let mut details = TeamDetails::default();

        while !pool.is_empty() && team.len() < TEAM_SIZE {
            let Some(species_id) = sample_no_replace(rng, &mut pool) else {
                break;
            };
            let Some(template) = self.dex.species(&species_id) else {
                continue;
            };

            // Limit to one of each species (Species Clause)
            if base_formes.contains(&template.base_species) {
                continue;
            }

            // Limit 2 of any type, softly: a third usually gets skipped
            let mut skip = false;
            for typ in &template.types {
                if type_count.get(typ).copied().unwrap_or(0) > 1 && random_chance(rng, 4, 5) {
                    skip = true;
                    break;
                }
            }
            if skip {
                continue;
            }

            // Limit 1 of any type combination
            let combo = type_combo_key(&template.types);
            if type_combo_count.get(&combo).copied().unwrap_or(0) >= 1 {
                continue;
            }

            // Limit 3 not-fully-evolved members; checked before synthesis
            // so a doomed pick costs nothing
            let is_nfe = template.is_nfe();
            if is_nfe && nfe_count >= NFE_LIMIT {
                continue;
            }

            let types = template.types.clone();
            let base_species = template.base_species.clone();
            let set = self.random_set(rng, &species_id, &details);

            // The set passes; fold it into the roster-wide counters
            details.note_moves(&set.moves);
            team.push(set);
            base_formes.insert(base_species);
            for typ in types {
                *type_count.entry(typ).or_insert(0) += 1;
            }
            *type_combo_count.entry(combo).or_insert(0) += 1;
            if is_nfe {
                nfe_count += 1;
            }
        }

        team
    }

    /// Chaotic variant: the same roster machinery, but each member's
    /// synthesized move set is discarded and replaced with raw draws from
    /// the full learnset, with no culling at all.
    pub fn random_cc_team(&self, rng: &mut impl Rng) -> Vec<PokemonSet> {
        let mut pool: Vec<Id> = self
            .dex
            .species_ids_sorted()
            .into_iter()
            .filter(|id| {
                self.dex.species(id).is_some_and(|data| {
                    in_generation_window(data.num)
                        && !data.is_nfe()
                        && !data.random_battle_moves.is_empty()
                })
            })
            .collect();

        let mut team: Vec<PokemonSet> = Vec::new();
        let mut type_count: HashMap<PokemonType, u32> = HashMap::new();
        let mut type_combo_count: HashMap<String, u32> = HashMap::new();
        let mut base_formes: HashSet<Id> = HashSet::new();
        let mut details = TeamDetails::default();

        while !pool.is_empty() && team.len() < TEAM_SIZE {
            let Some(species_id) = sample_no_replace(rng, &mut pool) else {
                break;
            };
            let Some(template) = self.dex.species(&species_id) else {
                continue;
            };

            if base_formes.contains(&template.base_species) {
                continue;
            }

            let mut skip = false;
            for typ in &template.types {
                if type_count.get(typ).copied().unwrap_or(0) > 1 && random_chance(rng, 4, 5) {
                    skip = true;
                    break;
                }
            }
            if skip {
                continue;
            }

            let combo = type_combo_key(&template.types);
            if type_combo_count.get(&combo).copied().unwrap_or(0) >= 1 {
                continue;
            }

            let types = template.types.clone();
            let base_species = template.base_species.clone();

            let mut raw_pool: Vec<Id> = if !template.learnset.is_empty() {
                template.learnset.clone()
            } else if template.battle_only {
                self.dex
                    .species(&template.base_species)
                    .map(|base| base.learnset.clone())
                    .unwrap_or_default()
            } else {
                Vec::new()
            };
            if raw_pool.is_empty() {
                raw_pool.push(Id::new("struggle"));
            }

            let mut set = self.random_set(rng, &species_id, &details);
            set.moves = if raw_pool.len() <= 4 {
                raw_pool
            } else {
                (0..4)
                    .filter_map(|_| sample_no_replace(rng, &mut raw_pool))
                    .collect()
            };

            details.note_moves(&set.moves);
            team.push(set);
            base_formes.insert(base_species);
            for typ in types {
                *type_count.entry(typ).or_insert(0) += 1;
            }
            *type_combo_count.entry(combo).or_insert(0) += 1;
        }

        team
    }
}
