//! The state space of the world chain.
//!
//! An [`Outcome`] is either an ordinary calendar year, in which nothing
//! decisive has happened yet, or one of three absorbing fates:
//!
//! | Outcome  | Meaning                                        |
//! |----------|------------------------------------------------|
//! | `Year(y)`| the world reached year `y` with nothing decided |
//! | `Dead`   | extinction                                     |
//! | `Heaven` | a lasting good outcome                         |
//! | `Reset`  | civilization collapses and starts over         |
//!
//! Outcomes render and parse as `"2031"`, `"dead"`, `"heaven"`, `"reset"`,
//! and serialize in that same string form so they can key JSON maps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// A terminal fate: the keys of an odds record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fate {
    /// A lasting good outcome.
    Heaven,
    /// Extinction.
    Dead,
    /// Civilizational collapse and restart.
    Reset,
}

impl Fate {
    /// All fates, in declaration order.
    pub const ALL: [Self; 3] = [Self::Heaven, Self::Dead, Self::Reset];

    /// Lowercase label used in output and parsing.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Heaven => "heaven",
            Self::Dead => "dead",
            Self::Reset => "reset",
        }
    }
}

/// One state of the world chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Outcome {
    /// An ordinary year; transient.
    Year(i32),
    /// Extinction; absorbing.
    Dead,
    /// Lasting good outcome; absorbing.
    Heaven,
    /// Civilizational reset; absorbing.
    Reset,
}

impl Outcome {
    /// Whether the chain can never leave this outcome.
    pub const fn is_absorbing(self) -> bool {
        !matches!(self, Self::Year(_))
    }

    /// The calendar year, if this is a transient year state.
    pub const fn year(self) -> Option<i32> {
        match self {
            Self::Year(year) => Some(year),
            Self::Dead | Self::Heaven | Self::Reset => None,
        }
    }

    /// The fate this outcome represents, if it is absorbing.
    pub const fn fate(self) -> Option<Fate> {
        match self {
            Self::Year(_) => None,
            Self::Dead => Some(Fate::Dead),
            Self::Heaven => Some(Fate::Heaven),
            Self::Reset => Some(Fate::Reset),
        }
    }
}

impl From<Fate> for Outcome {
    fn from(fate: Fate) -> Self {
        match fate {
            Fate::Heaven => Self::Heaven,
            Fate::Dead => Self::Dead,
            Fate::Reset => Self::Reset,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Dead => f.write_str(Fate::Dead.label()),
            Self::Heaven => f.write_str(Fate::Heaven.label()),
            Self::Reset => f.write_str(Fate::Reset.label()),
        }
    }
}

impl FromStr for Outcome {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dead" => Ok(Self::Dead),
            "heaven" => Ok(Self::Heaven),
            "reset" => Ok(Self::Reset),
            other => match other.parse::<i32>() {
                Ok(year) => Ok(Self::Year(year)),
                Err(_) => Err(WorldError::InvalidOutcome {
                    value: other.to_owned(),
                }),
            },
        }
    }
}

impl TryFrom<String> for Outcome {
    type Error = WorldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> Self {
        outcome.to_string()
    }
}
