use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    Pool,
    Slot,
}

/// Where a token currently sits. Pool positions are contiguous and shift when the
/// pool shrinks; slot positions are fixed for the lifetime of a puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Pool(usize),
    Slot(usize),
}

impl Location {
    pub fn kind(&self) -> Container {
        match self {
            Location::Pool(_) => Container::Pool,
            Location::Slot(_) => Container::Slot,
        }
    }

    pub fn position(&self) -> usize {
        match *self {
            Location::Pool(p) | Location::Slot(p) => p,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Pool(p) => write!(f, "pool[{p}]"),
            Location::Slot(p) => write!(f, "slot[{p}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse location `{0}` (expected `pool N` or `slot N`)")]
pub struct ParseLocationError(pub String);

impl FromStr for Location {
    type Err = ParseLocationError;

    // Accepts `pool 2`, `pool[2]`, `slot 1`, `slot[1]`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLocationError(s.to_string());
        let t = s.trim();
        let (name, rest) = match t.find(|c: char| c == '[' || c.is_whitespace()) {
            Some(i) => (&t[..i], &t[i..]),
            None => return Err(err()),
        };
        let rest = rest.trim();
        let digits = match rest.strip_prefix('[') {
            Some(inner) => inner.strip_suffix(']').ok_or_else(err)?.trim(),
            None => rest,
        };
        let pos = digits.parse::<usize>().map_err(|_| err())?;
        match name.to_ascii_lowercase().as_str() {
            "pool" => Ok(Location::Pool(pos)),
            "slot" => Ok(Location::Slot(pos)),
            _ => Err(err()),
        }
    }
}
