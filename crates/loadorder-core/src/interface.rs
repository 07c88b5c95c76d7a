//! Extension interfaces and the accessor registry.
//!
//! Each extension interface declares, once, how descriptors are obtained
//! from a plugin instance implementing it and how the resolved order is
//! exposed. The registry maps the interface's plugin type (usually a trait
//! object such as `dyn SettingsPages`) to a typed accessor function, so no
//! per-call configuration or runtime reflection is needed.
//!
//! # Example
//!
//! ```
//! use loadorder_core::{Descriptor, ExtensionRegistry, InterfaceMeta, SortContext};
//!
//! trait Pages {
//!     fn pages(&self) -> Vec<Descriptor>;
//! }
//!
//! let mut registry = ExtensionRegistry::new();
//! registry.register::<dyn Pages>(
//!     InterfaceMeta::new("pages").with_sort_context(SortContext::Reverse),
//!     |plugin| plugin.pages(),
//! );
//!
//! let interface = registry.interface::<dyn Pages>().unwrap();
//! assert_eq!(interface.meta().name, "pages");
//! ```

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::descriptor::Descriptor;
use crate::error::{Error, Result};

/// Direction in which a resolved order is handed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortContext {
    /// Dependencies first, exactly as sorted.
    #[default]
    Forward,
    /// Reversed, so the most specific contributor comes first.
    Reverse,
}

impl SortContext {
    /// Apply this direction to a forward order.
    pub fn apply<T>(self, mut order: Vec<T>) -> Vec<T> {
        if self == Self::Reverse {
            order.reverse();
        }
        order
    }
}

impl FromStr for SortContext {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" => Ok(Self::Forward),
            "reverse" => Ok(Self::Reverse),
            _ => Err(format!("unknown sort context: {s}")),
        }
    }
}

impl fmt::Display for SortContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Reverse => write!(f, "reverse"),
        }
    }
}

/// Interface-level metadata declared once per extension interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceMeta {
    pub name: String,
    #[serde(default)]
    pub sort_context: SortContext,
    /// Contributions are reserved for system plugins and hidden from user toggles.
    #[serde(default)]
    pub system_only: bool,
}

impl InterfaceMeta {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sort_context: SortContext::Forward,
            system_only: false,
        }
    }

    pub fn with_sort_context(mut self, sort_context: SortContext) -> Self {
        self.sort_context = sort_context;
        self
    }

    pub fn system_only(mut self) -> Self {
        self.system_only = true;
        self
    }
}

/// Descriptor-producing operation of an extension interface.
pub type Accessor<P> = fn(&P) -> Vec<Descriptor>;

/// A registered extension interface: its metadata and typed accessor.
pub struct ExtensionInterface<P: ?Sized + 'static> {
    meta: InterfaceMeta,
    accessor: Accessor<P>,
}

impl<P: ?Sized + 'static> ExtensionInterface<P> {
    pub fn new(meta: InterfaceMeta, accessor: Accessor<P>) -> Self {
        Self { meta, accessor }
    }

    pub fn meta(&self) -> &InterfaceMeta {
        &self.meta
    }

    /// Call the accessor on every instance and flatten the results,
    /// preserving instance order and each instance's descriptor order.
    pub fn collect<'a, I>(&self, instances: I) -> Vec<Descriptor>
    where
        I: IntoIterator<Item = &'a P>,
    {
        instances
            .into_iter()
            .flat_map(|instance| (self.accessor)(instance))
            .collect()
    }
}

impl<P: ?Sized + 'static> Clone for ExtensionInterface<P> {
    fn clone(&self) -> Self {
        Self {
            meta: self.meta.clone(),
            accessor: self.accessor,
        }
    }
}

impl<P: ?Sized + 'static> fmt::Debug for ExtensionInterface<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionInterface")
            .field("meta", &self.meta)
            .field("plugin_type", &type_name::<P>())
            .finish()
    }
}

/// Startup-time registry of extension interfaces keyed by plugin type.
#[derive(Default)]
pub struct ExtensionRegistry {
    interfaces: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    names: HashMap<TypeId, String>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the accessor for plugin type `P`.
    ///
    /// Registering the same plugin type again replaces the previous entry.
    pub fn register<P: ?Sized + 'static>(&mut self, meta: InterfaceMeta, accessor: Accessor<P>) {
        let key = TypeId::of::<P>();
        tracing::debug!(
            interface = %meta.name,
            plugin_type = type_name::<P>(),
            sort_context = %meta.sort_context,
            "Registering extension interface"
        );
        self.names.insert(key, meta.name.clone());
        self.interfaces
            .insert(key, Box::new(ExtensionInterface::new(meta, accessor)));
    }

    /// Look up the interface registered for plugin type `P`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InterfaceNotRegistered`] when `P` has no accessor.
    pub fn interface<P: ?Sized + 'static>(&self) -> Result<&ExtensionInterface<P>> {
        self.interfaces
            .get(&TypeId::of::<P>())
            .and_then(|entry| entry.downcast_ref::<ExtensionInterface<P>>())
            .ok_or_else(|| Error::InterfaceNotRegistered {
                interface: type_name::<P>().to_string(),
            })
    }

    pub fn contains<P: ?Sized + 'static>(&self) -> bool {
        self.interfaces.contains_key(&TypeId::of::<P>())
    }

    /// Registered interface names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.values().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("interfaces", &self.names())
            .finish()
    }
}
