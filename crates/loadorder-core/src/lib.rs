//! Descriptor resolution and load ordering for plugin extension interfaces.
//!
//! Plugins contribute descriptors to shared extension interfaces without
//! knowing about each other. Each descriptor declares soft ordering hints
//! (`load_before`, `load_after`), hard dependencies and conflicts, each
//! qualified by an inclusive [`VersionRange`]. This crate turns an unordered
//! candidate list into:
//!
//! - the set of descriptors that can be activated,
//! - the reason every other descriptor was excluded, and
//! - a deterministic total order over the activated set.
//!
//! The computation is pure and synchronous. Only an ordering cycle among
//! activatable descriptors fails a call; every other problem is recorded
//! on the [`ResolutionGraph`] and surfaced through a [`ResolutionReport`].
//!
//! # Example
//!
//! ```
//! use loadorder_core::{Descriptor, InterfaceMeta, Resolver, SortContext, VersionRange};
//!
//! let candidates = vec![
//!     Descriptor::new("core", "D1", "3.0.0").unwrap(),
//!     Descriptor::new("core", "D2", "1.0.0").unwrap()
//!         .depends_on(VersionRange::new("core", "D1", "1.0.0", "2.0.0").unwrap()),
//!     Descriptor::new("core", "D3", "1.0.0").unwrap()
//!         .load_after(VersionRange::any("core", "D2")),
//! ];
//!
//! let meta = InterfaceMeta::new("pages").with_sort_context(SortContext::Forward);
//! let resolution = Resolver::default().resolve(candidates, &meta).unwrap();
//!
//! // D1 is too new for D2, so D2 is dropped and D3's soft edge with it.
//! assert_eq!(resolution.ordered_ids(), vec!["D1", "D3"]);
//! let report = resolution.report();
//! assert!(!report.get("D2").unwrap().status.is_active());
//! ```

pub mod config;
pub mod descriptor;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod interface;
pub mod resolver;
pub mod sort;
pub mod version;

pub use config::{DuplicatePolicy, ResolverConfig};
pub use descriptor::{Descriptor, DescriptorKey};
pub use diagnostics::{DescriptorStatus, ReportEntry, ReportSummary, ResolutionReport};
pub use error::{Error, Result};
pub use graph::{ConflictFailure, DependencyFailure, NodeId, NodeState, ResolutionGraph};
pub use interface::{Accessor, ExtensionInterface, ExtensionRegistry, InterfaceMeta, SortContext};
pub use resolver::{Resolution, Resolver, apply_sort_context};
pub use sort::TopologicalSorter;
pub use version::{RangeCheck, Version, VersionRange};
