use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
            MoveCategory::Status => write!(f, "Status"),
        }
    }
}

/// A six-stat allocation, used for both effort values and individual values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatSpread {
    #[serde(default)]
    pub hp: u8,
    #[serde(default)]
    pub atk: u8,
    #[serde(default)]
    pub def: u8,
    #[serde(default)]
    pub spa: u8,
    #[serde(default)]
    pub spd: u8,
    #[serde(default)]
    pub spe: u8,
}

impl StatSpread {
    /// All six stats at the individual-value ceiling of 31.
    pub fn max_ivs() -> Self {
        StatSpread {
            hp: 31,
            atk: 31,
            def: 31,
            spa: 31,
            spd: 31,
            spe: 31,
        }
    }

    /// The same amount on every stat except HP.
    pub fn even_non_hp(amount: u8) -> Self {
        StatSpread {
            hp: 0,
            atk: amount,
            def: amount,
            spa: amount,
            spd: amount,
            spe: amount,
        }
    }

    pub fn total(&self) -> u16 {
        self.hp as u16
            + self.atk as u16
            + self.def as u16
            + self.spa as u16
            + self.spd as u16
            + self.spe as u16
    }
}
