//! Versions and inclusive version ranges.
//!
//! Descriptor versions are dot-separated lists of non-negative integers
//! (`1`, `1.2`, `1.2.0`, `4.0.0.12`). Comparison is component-wise and
//! numeric, with missing trailing components treated as zero, so `1.0` and
//! `1.0.0` are the same version.
//!
//! # Examples
//!
//! ```
//! use loadorder_core::{Version, VersionRange};
//!
//! let v: Version = "1.5.0".parse().unwrap();
//! assert!(v > "1.4.99".parse().unwrap());
//! assert_eq!(Version::parse("2").unwrap(), Version::parse("2.0.0").unwrap());
//!
//! let range = VersionRange::new("core", "D1", "1.0.0", "2.0.0").unwrap();
//! assert!(range.matches("core", "D1", &v));
//! assert!(!range.matches("core", "D1", &Version::parse("3.0.0").unwrap()));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An ordered, dot-separated numeric version.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Parse a version string such as `"1.2.0"`.
    ///
    /// Surrounding whitespace is ignored. Empty strings, empty segments
    /// (`"1..2"`), non-numeric segments and segments that overflow `u64`
    /// are rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidVersion {
                version: s.to_string(),
                reason: "empty version".to_string(),
            });
        }

        let mut components = Vec::new();
        for segment in trimmed.split('.') {
            if segment.is_empty() {
                return Err(Error::InvalidVersion {
                    version: s.to_string(),
                    reason: "empty version segment".to_string(),
                });
            }
            if !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidVersion {
                    version: s.to_string(),
                    reason: format!("segment '{segment}' is not a non-negative integer"),
                });
            }
            let value = segment.parse::<u64>().map_err(|e| Error::InvalidVersion {
                version: s.to_string(),
                reason: format!("segment '{segment}': {e}"),
            })?;
            components.push(value);
        }

        Ok(Self { components })
    }

    /// Build a version directly from its components.
    ///
    /// An empty slice is treated as `0`.
    pub fn from_components(components: &[u64]) -> Self {
        if components.is_empty() {
            return Self { components: vec![0] };
        }
        Self {
            components: components.to_vec(),
        }
    }

    /// The smallest version, `0`.
    pub fn zero() -> Self {
        Self { components: vec![0] }
    }

    /// The numeric components as written.
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Components with trailing zeros removed; the canonical form used for
    /// equality and hashing.
    fn significant(&self) -> &[u64] {
        let len = self
            .components
            .iter()
            .rposition(|&c| c != 0)
            .map_or(0, |pos| pos + 1);
        &self.components[..len]
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.significant() == other.significant()
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant().hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                non_eq => return non_eq,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Version({self})")
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.components {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

/// Where a concrete descriptor falls relative to a [`VersionRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeCheck {
    /// Plugin id or descriptor id differ from the reference.
    IdentityMismatch,
    /// Version is below the range minimum.
    TooOld,
    /// Version is within `[min, max]`.
    Compatible,
    /// Version is above the range maximum.
    TooNew,
}

/// A reference to another descriptor, qualified by an inclusive version window.
///
/// The upper bound is optional. Without one, every version at or above the
/// minimum is accepted.
///
/// Equality is structural over all four fields, with bounds compared
/// numerically (`[1.0, 2]` equals `[1.0.0, 2.0.0]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRange {
    plugin_id: String,
    descriptor_id: String,
    min: Version,
    max: Option<Version>,
}

impl VersionRange {
    /// Create a range reference from version strings.
    pub fn new(
        plugin_id: impl Into<String>,
        descriptor_id: impl Into<String>,
        min: &str,
        max: &str,
    ) -> Result<Self> {
        Self::from_versions(plugin_id, descriptor_id, Version::parse(min)?, Version::parse(max)?)
    }

    /// Create a range reference from already parsed bounds.
    ///
    /// Fails with [`Error::InvalidRange`] when `min > max`.
    pub fn from_versions(
        plugin_id: impl Into<String>,
        descriptor_id: impl Into<String>,
        min: Version,
        max: Version,
    ) -> Result<Self> {
        let plugin_id = plugin_id.into();
        let descriptor_id = descriptor_id.into();
        if min > max {
            return Err(Error::InvalidRange {
                plugin_id,
                descriptor_id,
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self {
            plugin_id,
            descriptor_id,
            min,
            max: Some(max),
        })
    }

    /// A reference with a minimum and no upper bound.
    pub fn at_least(
        plugin_id: impl Into<String>,
        descriptor_id: impl Into<String>,
        min: Version,
    ) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            descriptor_id: descriptor_id.into(),
            min,
            max: None,
        }
    }

    /// A reference that accepts any version of the target.
    pub fn any(plugin_id: impl Into<String>, descriptor_id: impl Into<String>) -> Self {
        Self::at_least(plugin_id, descriptor_id, Version::zero())
    }

    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    pub fn descriptor_id(&self) -> &str {
        &self.descriptor_id
    }

    pub fn min(&self) -> &Version {
        &self.min
    }

    /// The inclusive upper bound, if any.
    pub fn max(&self) -> Option<&Version> {
        self.max.as_ref()
    }

    /// Whether the reference targets this plugin/descriptor pair.
    pub fn targets(&self, plugin_id: &str, descriptor_id: &str) -> bool {
        self.plugin_id == plugin_id && self.descriptor_id == descriptor_id
    }

    /// Whether `version` is below the minimum bound.
    pub fn is_below(&self, version: &Version) -> bool {
        version < &self.min
    }

    /// Whether `version` is above the maximum bound.
    pub fn is_above(&self, version: &Version) -> bool {
        self.max.as_ref().is_some_and(|max| version > max)
    }

    /// Classify a concrete `(plugin, descriptor, version)` triple.
    pub fn check(&self, plugin_id: &str, descriptor_id: &str, version: &Version) -> RangeCheck {
        if !self.targets(plugin_id, descriptor_id) {
            RangeCheck::IdentityMismatch
        } else if self.is_below(version) {
            RangeCheck::TooOld
        } else if self.is_above(version) {
            RangeCheck::TooNew
        } else {
            RangeCheck::Compatible
        }
    }

    /// Identity matches exactly and `min <= version <= max`.
    pub fn matches(&self, plugin_id: &str, descriptor_id: &str, version: &Version) -> bool {
        self.check(plugin_id, descriptor_id, version) == RangeCheck::Compatible
    }

}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.plugin_id, self.descriptor_id)?;
        match &self.max {
            Some(max) => write!(f, " [{}, {}]", self.min, max),
            None if self.min == Version::zero() => Ok(()),
            None => write!(f, " >= {}", self.min),
        }
    }
}
