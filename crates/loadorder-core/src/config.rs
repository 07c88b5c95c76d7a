//! Resolver configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How candidates sharing a descriptor id are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the first candidate in input order; later ones are reported as duplicates.
    #[default]
    FirstWins,
    /// Keep the last candidate in input order; earlier ones are reported as duplicates.
    LastWins,
    /// Fail the resolution call with [`Error::DuplicateDescriptor`](crate::Error::DuplicateDescriptor).
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first-wins" | "first" => Ok(Self::FirstWins),
            "last-wins" | "last" | "overwrite" => Ok(Self::LastWins),
            "reject" | "error" => Ok(Self::Reject),
            _ => Err(format!("unknown duplicate policy: {s}")),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstWins => write!(f, "first-wins"),
            Self::LastWins => write!(f, "last-wins"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

/// Settings for a [`Resolver`](crate::Resolver).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResolverConfig {
    /// Duplicate descriptor id handling
    pub duplicates: DuplicatePolicy,
}

impl ResolverConfig {
    pub fn with_duplicates(duplicates: DuplicatePolicy) -> Self {
        Self { duplicates }
    }
}
