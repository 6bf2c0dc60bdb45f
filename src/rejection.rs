//! The culling predicate of the set builder.
//!
//! Each chosen move is re-evaluated against the current set every pass.
//! The verdict combines a move-specific check (keyed by move identity)
//! with a fixed ordered list of cross-cutting checks; the set builder
//! removes the first move the predicate rejects and refills from the pool.

use crate::counter::{MoveCounter, SetupType};
use crate::dex::Dex;
use crate::team_data::TeamDetails;
use schema::{Id, MoveCategory, MoveData, PokemonType, SpeciesData};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verdict {
    pub rejected: bool,
    /// Marks the move as a setup move, which exempts it from the shared
    /// coverage-pressure check.
    pub is_setup: bool,
}

/// Attacking types a species of that type is expected to cover with at
/// least one damaging move.
const MARQUEE_TYPES: &[PokemonType] = &[
    PokemonType::Dark,
    PokemonType::Dragon,
    PokemonType::Electric,
    PokemonType::Fighting,
    PokemonType::Fire,
    PokemonType::Ghost,
    PokemonType::Ground,
    PokemonType::Ice,
    PokemonType::Water,
];

/// "Don't take both" move pairings: the keyed move is redundant once any
/// of its partners is already in the set.
const REDUNDANT_PAIRS: &[(&str, &[&str])] = &[
    ("leechlife", &["uturn"]),
    ("substitute", &["uturn"]),
    ("dragonclaw", &["dragontail", "outrage"]),
    ("dragonpulse", &["dragontail", "outrage"]),
    ("thunderbolt", &["thunder"]),
    ("flareblitz", &["fireblast", "firepunch"]),
    ("flamethrower", &["fireblast", "firepunch"]),
    ("lavaplume", &["fireblast", "firepunch"]),
    ("megadrain", &["petaldance", "powerwhip"]),
    ("bonemerang", &["earthquake"]),
    ("icebeam", &["blizzard"]),
    ("return", &["bodyslam", "facade", "doubleedge"]),
    ("psychic", &["psyshock"]),
    ("rockslide", &["stoneedge"]),
    ("hydropump", &["scald"]),
    ("willowisp", &["scald"]),
    ("surf", &["hydropump", "scald"]),
];

fn has(chosen: &[Id], id: &str) -> bool {
    chosen.iter().any(|m| m == id)
}

fn redundant_partners(move_id: &str) -> Option<&'static [&'static str]> {
    REDUNDANT_PAIRS
        .iter()
        .find(|(key, _)| *key == move_id)
        .map(|(_, partners)| *partners)
}

/// Evaluate one chosen move against the rest of the set.
pub fn evaluate(
    dex: &Dex,
    move_id: &Id,
    species: &SpeciesData,
    chosen: &[Id],
    counter: &MoveCounter,
    move_pool: &[Id],
    team: &TeamDetails,
) -> Verdict {
    let data = dex.move_or_default(move_id);
    let mut verdict = move_specific_verdict(move_id, chosen, counter, team);

    // Increased/decreased priority moves are unneeded with moves that boost only speed
    if data.priority != 0 && counter.speed_setup > 0 {
        verdict.rejected = true;
    }

    if opposes_locked_setup(&data, counter)
        && (!species.has_type(data.move_type)
            || counter.stab > 1
            || counter.category_count(data.category) < 2)
    {
        verdict.rejected = true;
    }

    if off_role_under_lopsided_setup(&data, &verdict, counter) {
        verdict.rejected = true;
    }

    // A kept move still gets rejected when the set has unmet attacking
    // obligations and this move does nothing toward them.
    if !verdict.rejected
        && !verdict.is_setup
        && !data.sets_weather
        && setup_not_committed(&data, counter)
        && coverage_pressure(species, counter, move_pool)
        && fails_coverage(&data, species)
    {
        verdict.rejected = true;
    }

    verdict
}

/// The dispatch keyed by move identity: setup gating, anti-synergy after
/// setup, fixed-damage moves, hazards, and the pairwise redundancy table.
fn move_specific_verdict(
    move_id: &Id,
    chosen: &[Id],
    counter: &MoveCounter,
    team: &TeamDetails,
) -> Verdict {
    let mut rejected = false;
    let mut is_setup = false;

    match move_id.as_str() {
        // Set up once and only if we have the moves for it
        "bulkup" | "swordsdance" => {
            rejected = counter.setup_type != Some(SetupType::Physical)
                || counter.physical_setup > 1
                || counter.physical + counter.physical_pool < 2;
            is_setup = true;
        }
        "calmmind" | "nastyplot" | "quiverdance" => {
            rejected = counter.setup_type != Some(SetupType::Special)
                || counter.special_setup > 1
                || counter.special + counter.special_pool < 2;
            is_setup = true;
        }
        "growth" | "shellsmash" => {
            rejected = counter.setup_type != Some(SetupType::Mixed)
                || counter.damaging_count() + counter.physical_pool + counter.special_pool < 2;
            is_setup = true;
        }
        "agility" => {
            rejected = counter.damaging_count() < 2 && counter.setup_type.is_none();
            is_setup = counter.setup_type.is_none();
        }

        // Bad after setup
        "dragontail" => {
            rejected = counter.setup_type.is_some()
                || counter.speed_setup > 0
                || has(chosen, "encore")
                || has(chosen, "roar")
                || has(chosen, "whirlwind");
        }
        "fakeout" | "uturn" => {
            rejected = counter.setup_type.is_some()
                || counter.speed_setup > 0
                || has(chosen, "substitute");
        }
        "haze" | "leechseed" | "roar" | "whirlwind" => {
            rejected = counter.setup_type.is_some()
                || counter.speed_setup > 0
                || has(chosen, "dragontail");
        }
        "nightshade" | "seismictoss" | "superfang" => {
            rejected = counter.damaging_count() > 1 || counter.setup_type.is_some();
        }
        "protect" => {
            rejected = counter.setup_type.is_some()
                || has(chosen, "rest")
                || has(chosen, "lightscreen")
                || has(chosen, "reflect");
        }
        "stealthrock" => {
            rejected = counter.setup_type.is_some()
                || counter.speed_setup > 0
                || team.stealth_rock;
        }
        _ => {}
    }

    // Bit redundant to have both
    if !rejected {
        if let Some(partners) = redundant_partners(move_id.as_str()) {
            rejected = partners.iter().any(|p| has(chosen, p));
        }
    }

    Verdict { rejected, is_setup }
}

/// A damaging move whose category contradicts the locked setup category.
fn opposes_locked_setup(data: &MoveData, counter: &MoveCounter) -> bool {
    matches!(
        (data.category, counter.setup_type),
        (MoveCategory::Physical, Some(SetupType::Special))
            | (MoveCategory::Special, Some(SetupType::Physical))
    )
}

/// With a single-category setup locked but fewer than two attacks of that
/// category, off-category moves are dead weight. Status moves survive
/// unless the set is already crowded enough that something must go.
fn off_role_under_lopsided_setup(
    data: &MoveData,
    verdict: &Verdict,
    counter: &MoveCounter,
) -> bool {
    let Some(setup) = counter.setup_type else {
        return false;
    };
    let Some(setup_category) = setup.category() else {
        return false;
    };
    if verdict.is_setup
        || data.category == setup_category
        || counter.setup_category_count(setup) >= 2
    {
        return false;
    }
    let must_reject = counter.setup_category_count(setup) + counter.status > 3
        && counter.physical_setup + counter.special_setup < 2;
    data.category != MoveCategory::Status || must_reject
}

/// Whether the set is still open to demanding coverage from this move:
/// either no setup is locked, the setup is mixed, the move is off-category
/// and non-status, or the set is crowded past its status budget.
fn setup_not_committed(data: &MoveData, counter: &MoveCounter) -> bool {
    if counter.physical_setup + counter.special_setup >= 2 {
        return false;
    }
    match counter.setup_type {
        None => true,
        Some(setup) => match setup.category() {
            None => true,
            Some(setup_category) => {
                (data.category != setup_category && data.category != MoveCategory::Status)
                    || counter.setup_category_count(setup) + counter.status > 3
            }
        },
    }
}

/// The set has unmet attacking obligations: no damage or no same-type
/// attack while the pool could still provide one, a marquee type without
/// coverage, or a species-required move still waiting in the pool.
fn coverage_pressure(species: &SpeciesData, counter: &MoveCounter, move_pool: &[Id]) -> bool {
    if (counter.damaging_count() == 0 || counter.stab == 0)
        && (counter.physical_pool > 0 || counter.special_pool > 0)
    {
        return true;
    }
    for &typ in MARQUEE_TYPES {
        if !species.has_type(typ) {
            continue;
        }
        let uncovered = match typ {
            // Ghosts with a Dark typing already threaten with Dark coverage
            PokemonType::Ghost => {
                !species.has_type(PokemonType::Dark)
                    && counter.type_damage_count(PokemonType::Ghost) == 0
            }
            // A Fighting type may sit back on status instead
            PokemonType::Fighting => {
                counter.type_damage_count(PokemonType::Fighting) == 0
                    && (counter.setup_type.is_some() || counter.status == 0)
            }
            // Water types want their attack to actually be same-typed
            PokemonType::Water => {
                counter.type_damage_count(PokemonType::Water) == 0 || counter.stab == 0
            }
            _ => counter.type_damage_count(typ) == 0,
        };
        if uncovered {
            return true;
        }
    }
    species
        .required_move
        .as_ref()
        .is_some_and(|required| move_pool.contains(required))
}

/// Moves that do nothing for the obligations above: status moves, off-type
/// attacks, pivoting attacks, and weak single-hit filler.
fn fails_coverage(data: &MoveData, species: &SpeciesData) -> bool {
    data.category == MoveCategory::Status
        || !species.has_type(data.move_type)
        || data.self_switch
        || (data.base_power > 0 && data.base_power < 40 && !data.multihit)
}
