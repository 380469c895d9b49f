// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Data-quality flag names and the open/restricted source registry.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Flags published without authentication.
pub const OPEN_DATA_FLAGS: [&str; 3] = ["H1_DATA", "L1_DATA", "V1_DATA"];

/// A named boolean validity source, e.g. `H1:DCS-ANALYSIS_READY_C01:1`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flag(String);

impl Flag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Prefix a bare flag name with a detector id: `H1` + `X:1` -> `H1:X:1`.
    pub fn qualified(ifo: &str, name: &str) -> Self {
        Self(format!("{}:{}", ifo, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Detector/site id, if the name carries one.
    pub fn ifo(&self) -> Option<&str> {
        self.0.split_once(':').map(|(ifo, _)| ifo)
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Flag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Flag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Whether a flag can be queried anonymously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagAccess {
    Open,
    Restricted,
}

crate::simple_display! {
    FlagAccess {
        Open => "open",
        Restricted => "restricted",
    }
}

/// Flags split by access path, each list sorted and de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionedFlags {
    pub open: Vec<Flag>,
    pub restricted: Vec<Flag>,
}

impl PartitionedFlags {
    pub fn is_empty(&self) -> bool {
        self.open.is_empty() && self.restricted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.open.len() + self.restricted.len()
    }
}

/// Registry of flags that need no authentication. Everything else is restricted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagRegistry {
    open: BTreeSet<Flag>,
}

impl Default for FlagRegistry {
    fn default() -> Self {
        Self::with_open(OPEN_DATA_FLAGS.iter().copied().map(Flag::from))
    }
}

impl FlagRegistry {
    pub fn with_open(open: impl IntoIterator<Item = Flag>) -> Self {
        Self { open: open.into_iter().collect() }
    }

    pub fn access(&self, flag: &Flag) -> FlagAccess {
        if self.open.contains(flag) {
            FlagAccess::Open
        } else {
            FlagAccess::Restricted
        }
    }

    pub fn partition<'a>(&self, flags: impl IntoIterator<Item = &'a Flag>) -> PartitionedFlags {
        let unique: BTreeSet<&Flag> = flags.into_iter().collect();
        let mut out = PartitionedFlags::default();
        for flag in unique {
            match self.access(flag) {
                FlagAccess::Open => out.open.push(flag.clone()),
                FlagAccess::Restricted => out.restricted.push(flag.clone()),
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "flag_tests.rs"]
mod tests;
