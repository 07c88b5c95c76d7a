//! Error types for loadorder-core

/// Result type for loadorder-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a resolution call or reject malformed input.
///
/// Exclusions caused by missing dependencies or declared conflicts are not
/// errors; they are recorded on the [`ResolutionGraph`](crate::ResolutionGraph).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A version string could not be parsed.
    #[error("invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// A version range has its lower bound above its upper bound.
    #[error("invalid range for {plugin_id}/{descriptor_id}: {min} is greater than {max}")]
    InvalidRange {
        plugin_id: String,
        descriptor_id: String,
        min: String,
        max: String,
    },

    /// The active descriptors contain an ordering cycle.
    #[error("cyclic dependency detected: {}", .cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    /// Two candidates share a descriptor id and duplicates are rejected.
    #[error("duplicate descriptor '{descriptor_id}' contributed by '{first_plugin}' and '{second_plugin}'")]
    DuplicateDescriptor {
        descriptor_id: String,
        first_plugin: String,
        second_plugin: String,
    },

    /// No accessor was registered for the requested extension interface.
    #[error("no descriptor accessor registered for extension interface '{interface}'")]
    InterfaceNotRegistered { interface: String },
}
