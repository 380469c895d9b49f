// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduler resource request sizes such as `10 GB`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceSizeError {
    #[error("empty resource size")]
    Empty,
    #[error("invalid resource amount {0:?}")]
    Amount(String),
    #[error("unknown size unit {0:?}")]
    Unit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeUnit {
    Kilo,
    Mega,
    Giga,
    Tera,
}

crate::simple_display! {
    SizeUnit {
        Kilo => "KB",
        Mega => "MB",
        Giga => "GB",
        Tera => "TB",
    }
}

impl FromStr for SizeUnit {
    type Err = ResourceSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "K" | "KB" => Ok(SizeUnit::Kilo),
            "M" | "MB" => Ok(SizeUnit::Mega),
            "G" | "GB" => Ok(SizeUnit::Giga),
            "T" | "TB" => Ok(SizeUnit::Tera),
            _ => Err(ResourceSizeError::Unit(s.to_string())),
        }
    }
}

/// A memory or disk request. A missing unit leaves the scheduler's default
/// unit in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceSize {
    pub amount: u64,
    pub unit: Option<SizeUnit>,
}

impl ResourceSize {
    pub const fn gigabytes(amount: u64) -> Self {
        Self { amount, unit: Some(SizeUnit::Giga) }
    }

    pub const fn megabytes(amount: u64) -> Self {
        Self { amount, unit: Some(SizeUnit::Mega) }
    }
}

impl FromStr for ResourceSize {
    type Err = ResourceSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ResourceSizeError::Empty);
        }
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (digits, rest) = s.split_at(split);
        let amount = digits.parse::<u64>().map_err(|_| ResourceSizeError::Amount(s.to_string()))?;
        let rest = rest.trim();
        let unit = if rest.is_empty() { None } else { Some(rest.parse()?) };
        Ok(Self { amount, unit })
    }
}

impl TryFrom<String> for ResourceSize {
    type Error = ResourceSizeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ResourceSize> for String {
    fn from(size: ResourceSize) -> Self {
        size.to_string()
    }
}

impl std::fmt::Display for ResourceSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.unit {
            Some(unit) => write!(f, "{} {}", self.amount, unit),
            None => write!(f, "{}", self.amount),
        }
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod tests;
