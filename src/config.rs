use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::gesture::OccupiedPolicy;

/// Session settings, read from JSON and then overridden by command-line flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Defaults to one slot per keyword.
    pub slot_count: Option<usize>,
    /// Seed for the initial pool shuffle.
    pub seed: u64,
    pub on_occupied: OccupiedPolicy,
    /// Keep the question's keyword order instead of shuffling.
    pub no_shuffle: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { slot_count: None, seed: 0x5eed, on_occupied: OccupiedPolicy::Reject, no_shuffle: false }
    }
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parsing config {}", path.display()))
    }
}
