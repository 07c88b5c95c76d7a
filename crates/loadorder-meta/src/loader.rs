//! Reading descriptor sets from text and files.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use loadorder_core::{Resolution, Resolver};

use crate::error::{Error, Result};
use crate::schema::DescriptorSet;

/// Largest descriptor-set file accepted by [`DescriptorSet::from_path`] (1 MiB)
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

impl DescriptorSet {
    /// Parse a descriptor set from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let set: Self = toml::from_str(text)?;
        tracing::debug!(
            interface = %set.interface.name,
            descriptors = set.descriptors.len(),
            "Parsed descriptor set"
        );
        Ok(set)
    }

    /// Load a descriptor set from a file of at most [`MAX_FILE_SIZE`] bytes.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        if metadata.len() > MAX_FILE_SIZE {
            return Err(Error::TooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                max: MAX_FILE_SIZE,
            });
        }

        tracing::debug!(path = %path.display(), "Loading descriptor set");
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Resolve this set with its own resolver settings and interface.
    pub fn resolve(&self) -> Result<Resolution> {
        let resolver = Resolver::new(self.resolver_config());
        let resolution = resolver.resolve(self.to_descriptors()?, &self.interface_meta())?;
        Ok(resolution)
    }
}
