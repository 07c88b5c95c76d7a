//! Plugin-contributed descriptors and their declared relationships.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::version::{Version, VersionRange};

/// Identity of a concrete descriptor, used in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DescriptorKey {
    pub plugin_id: String,
    pub descriptor_id: String,
    pub version: Version,
}

impl fmt::Display for DescriptorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.plugin_id, self.descriptor_id, self.version)
    }
}

/// One unit of plugin-contributed behavior for an extension interface.
///
/// A descriptor carries four relationship lists. They are always present
/// and may be empty:
///
/// - `load_before`: this descriptor should activate before the target (soft)
/// - `load_after`: this descriptor should activate after the target (soft)
/// - `depends_on`: the target must be present, in range, and active (hard)
/// - `conflicts_with`: this descriptor is dropped if the target is active
///
/// # Example
///
/// ```
/// use loadorder_core::{Descriptor, VersionRange};
///
/// let settings = Descriptor::new("core", "settings", "1.2.0")
///     .unwrap()
///     .depends_on(VersionRange::new("core", "storage", "1.0", "2.0").unwrap())
///     .load_after(VersionRange::any("theme", "palette"));
///
/// assert_eq!(settings.descriptor_id(), "settings");
/// assert_eq!(settings.dependencies().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    plugin_id: String,
    descriptor_id: String,
    version: Version,
    load_before: Vec<VersionRange>,
    load_after: Vec<VersionRange>,
    depends_on: Vec<VersionRange>,
    conflicts_with: Vec<VersionRange>,
}

impl Descriptor {
    /// Create a descriptor with no relationships, parsing `version`.
    pub fn new(
        plugin_id: impl Into<String>,
        descriptor_id: impl Into<String>,
        version: &str,
    ) -> Result<Self> {
        Ok(Self::with_version(plugin_id, descriptor_id, Version::parse(version)?))
    }

    /// Create a descriptor with no relationships from a parsed version.
    pub fn with_version(
        plugin_id: impl Into<String>,
        descriptor_id: impl Into<String>,
        version: Version,
    ) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            descriptor_id: descriptor_id.into(),
            version,
            load_before: Vec::new(),
            load_after: Vec::new(),
            depends_on: Vec::new(),
            conflicts_with: Vec::new(),
        }
    }

    /// Declare that this descriptor activates before `target`.
    pub fn load_before(mut self, target: VersionRange) -> Self {
        self.load_before.push(target);
        self
    }

    /// Declare that this descriptor activates after `target`.
    pub fn load_after(mut self, target: VersionRange) -> Self {
        self.load_after.push(target);
        self
    }

    /// Declare a hard dependency on `target`.
    pub fn depends_on(mut self, target: VersionRange) -> Self {
        self.depends_on.push(target);
        self
    }

    /// Declare that this descriptor cannot be active alongside `target`.
    pub fn conflicts_with(mut self, target: VersionRange) -> Self {
        self.conflicts_with.push(target);
        self
    }

    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    pub fn descriptor_id(&self) -> &str {
        &self.descriptor_id
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn befores(&self) -> &[VersionRange] {
        &self.load_before
    }

    pub fn afters(&self) -> &[VersionRange] {
        &self.load_after
    }

    pub fn dependencies(&self) -> &[VersionRange] {
        &self.depends_on
    }

    pub fn conflicts(&self) -> &[VersionRange] {
        &self.conflicts_with
    }

    /// The `(plugin, descriptor, version)` identity of this descriptor.
    pub fn key(&self) -> DescriptorKey {
        DescriptorKey {
            plugin_id: self.plugin_id.clone(),
            descriptor_id: self.descriptor_id.clone(),
            version: self.version.clone(),
        }
    }

    /// Whether `reference` targets this descriptor and accepts its version.
    pub fn satisfies(&self, reference: &VersionRange) -> bool {
        reference.matches(&self.plugin_id, &self.descriptor_id, &self.version)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.plugin_id, self.descriptor_id, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_descriptor_has_empty_relationships() {
        let d = Descriptor::new("core", "D1", "1.5.0").unwrap();
        assert!(d.befores().is_empty());
        assert!(d.afters().is_empty());
        assert!(d.dependencies().is_empty());
        assert!(d.conflicts().is_empty());
        assert_eq!(d.version(), &Version::parse("1.5").unwrap());
    }

    #[test]
    fn test_invalid_version_rejected() {
        assert!(Descriptor::new("core", "D1", "1.five").is_err());
    }

    #[test]
    fn test_builder_preserves_declaration_order() {
        let d = Descriptor::new("core", "D3", "1.0")
            .unwrap()
            .load_after(VersionRange::any("core", "D2"))
            .load_after(VersionRange::any("core", "D1"));
        let targets: Vec<_> = d.afters().iter().map(|r| r.descriptor_id()).collect();
        assert_eq!(targets, vec!["D2", "D1"]);
    }

    #[test]
    fn test_satisfies_checks_identity_and_range() {
        let d = Descriptor::new("core", "D1", "1.5.0").unwrap();
        assert!(d.satisfies(&VersionRange::new("core", "D1", "1.0", "2.0").unwrap()));
        assert!(!d.satisfies(&VersionRange::new("core", "D1", "1.6", "2.0").unwrap()));
        assert!(!d.satisfies(&VersionRange::any("other", "D1")));
    }

    #[test]
    fn test_display_and_key() {
        let d = Descriptor::new("core", "D1", "1.5.0").unwrap();
        assert_eq!(d.to_string(), "core/D1@1.5.0");
        assert_eq!(d.key().to_string(), "core/D1 1.5.0");
    }
}
