//! Descriptor-set files for loadorder.
//!
//! A descriptor set is a TOML document describing one extension interface,
//! the resolver settings to use for it, and the candidate descriptors
//! contributed by plugins. It is the input format of the `loadorder` CLI and
//! a convenient way to write resolution fixtures.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{Error, Result};
pub use loader::MAX_FILE_SIZE;
pub use schema::{DescriptorDecl, DescriptorSet, InterfaceSection, ReferenceDecl};
