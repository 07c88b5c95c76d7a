//! Shared test utilities for the loadorder workspace.
//!
//! This crate provides the reference resolution scenarios and a temporary
//! workspace for descriptor-set files. It is a dev-dependency only and is
//! never published.
//!
//! # Modules
//!
//! - [`fixtures`]: the reference scenarios as core descriptors and as TOML
//! - [`workspace`]: [`TestWorkspace`] for writing descriptor-set files

pub mod fixtures;
pub mod workspace;

pub use workspace::TestWorkspace;
