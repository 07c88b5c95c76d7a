//! Command implementations for loadorder-cli

pub mod check;
pub mod inspect;
pub mod resolve;

pub use check::run_check;
pub use inspect::run_inspect;
pub use resolve::run_resolve;

use std::path::Path;

use loadorder_core::Resolution;
use loadorder_meta::DescriptorSet;

use crate::error::Result;

/// Load a descriptor-set file and resolve it with its own settings.
pub(crate) fn load_and_resolve(file: &Path) -> Result<Resolution> {
    Ok(DescriptorSet::from_path(file)?.resolve()?)
}
