//! Descriptor-set schema.
//!
//! # Example TOML
//!
//! ```toml
//! [interface]
//! name = "settings-pages"
//! sort = "reverse"
//!
//! [resolver]
//! duplicates = "first-wins"
//!
//! [[descriptor]]
//! plugin = "core"
//! id = "D1"
//! version = "1.5.0"
//!
//! [[descriptor]]
//! plugin = "core"
//! id = "D2"
//! version = "1.0.0"
//! depends_on = [{ plugin = "core", id = "D1", min = "1.0.0", max = "2.0.0" }]
//! ```

use loadorder_core::{Descriptor, InterfaceMeta, ResolverConfig, SortContext, Version, VersionRange};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A complete descriptor-set document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DescriptorSet {
    pub interface: InterfaceSection,
    #[serde(default)]
    pub resolver: ResolverConfig,
    /// Candidates in contribution order
    #[serde(default, rename = "descriptor")]
    pub descriptors: Vec<DescriptorDecl>,
}

/// The `[interface]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InterfaceSection {
    pub name: String,
    #[serde(default, rename = "sort")]
    pub sort_context: SortContext,
    #[serde(default)]
    pub system_only: bool,
}

/// A reference to another descriptor. Omitted bounds accept any version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReferenceDecl {
    pub plugin: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

/// One `[[descriptor]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DescriptorDecl {
    pub plugin: String,
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub load_before: Vec<ReferenceDecl>,
    #[serde(default)]
    pub load_after: Vec<ReferenceDecl>,
    #[serde(default)]
    pub depends_on: Vec<ReferenceDecl>,
    #[serde(default)]
    pub conflicts_with: Vec<ReferenceDecl>,
}

impl ReferenceDecl {
    pub fn to_range(&self) -> Result<VersionRange> {
        let min = match &self.min {
            Some(min) => Version::parse(min)?,
            None => Version::zero(),
        };
        match &self.max {
            Some(max) => Ok(VersionRange::from_versions(
                &self.plugin,
                &self.id,
                min,
                Version::parse(max)?,
            )?),
            None => Ok(VersionRange::at_least(&self.plugin, &self.id, min)),
        }
    }
}

impl DescriptorDecl {
    /// "plugin/id", as used in error messages.
    pub fn qualified_id(&self) -> String {
        format!("{}/{}", self.plugin, self.id)
    }

    /// Convert into a core descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] naming this entry when its
    /// version or any of its references is malformed.
    pub fn to_descriptor(&self) -> Result<Descriptor> {
        self.build().map_err(|e| Error::InvalidDescriptor {
            id: self.qualified_id(),
            reason: e.to_string(),
        })
    }

    fn build(&self) -> Result<Descriptor> {
        let mut descriptor = Descriptor::new(&self.plugin, &self.id, &self.version)?;
        for reference in &self.load_before {
            descriptor = descriptor.load_before(reference.to_range()?);
        }
        for reference in &self.load_after {
            descriptor = descriptor.load_after(reference.to_range()?);
        }
        for reference in &self.depends_on {
            descriptor = descriptor.depends_on(reference.to_range()?);
        }
        for reference in &self.conflicts_with {
            descriptor = descriptor.conflicts_with(reference.to_range()?);
        }
        Ok(descriptor)
    }
}

impl DescriptorSet {
    pub fn interface_meta(&self) -> InterfaceMeta {
        InterfaceMeta {
            name: self.interface.name.clone(),
            sort_context: self.interface.sort_context,
            system_only: self.interface.system_only,
        }
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        self.resolver.clone()
    }

    /// Convert every entry into a core descriptor, keeping file order.
    pub fn to_descriptors(&self) -> Result<Vec<Descriptor>> {
        self.descriptors.iter().map(DescriptorDecl::to_descriptor).collect()
    }
}
