//! Resolver orchestration.
//!
//! A resolution call moves candidates through a fixed pipeline:
//!
//! ```text
//! plugin instances -> accessor -> candidates -> ResolutionGraph
//!     -> TopologicalSorter -> sort context -> ordered descriptors
//! ```
//!
//! Nothing is cached between calls; each call works on its own snapshot.

use crate::config::ResolverConfig;
use crate::descriptor::Descriptor;
use crate::diagnostics::ResolutionReport;
use crate::error::Result;
use crate::graph::{NodeId, ResolutionGraph};
use crate::interface::{ExtensionRegistry, InterfaceMeta, SortContext};
use crate::sort::TopologicalSorter;

/// The outcome of one successful resolution call.
#[derive(Debug, Clone)]
pub struct Resolution {
    interface: InterfaceMeta,
    graph: ResolutionGraph,
    /// Active nodes with the interface's sort context already applied.
    order: Vec<NodeId>,
}

impl Resolution {
    pub fn interface(&self) -> &InterfaceMeta {
        &self.interface
    }

    pub fn graph(&self) -> &ResolutionGraph {
        &self.graph
    }

    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Active descriptors in final order.
    pub fn ordered(&self) -> Vec<&Descriptor> {
        self.order.iter().map(|id| self.graph.descriptor(*id)).collect()
    }

    /// Descriptor ids of the active descriptors in final order.
    pub fn ordered_ids(&self) -> Vec<&str> {
        self.order
            .iter()
            .map(|id| self.graph.descriptor(*id).descriptor_id())
            .collect()
    }

    /// Final position of an active descriptor.
    pub fn position(&self, descriptor_id: &str) -> Option<usize> {
        let id = self.graph.node_id(descriptor_id)?;
        self.order.iter().position(|candidate| *candidate == id)
    }

    /// Diagnostics for every candidate.
    pub fn report(&self) -> ResolutionReport {
        ResolutionReport::from_resolution(self)
    }

    /// Consume the resolution, returning the ordered active descriptors.
    pub fn into_ordered(self) -> Vec<Descriptor> {
        let mut slots: Vec<Option<Descriptor>> =
            self.graph.into_descriptors().into_iter().map(Some).collect();
        self.order
            .iter()
            .filter_map(|id| slots[id.index()].take())
            .collect()
    }
}

/// Computes activation orders for extension interfaces.
///
/// # Example
///
/// ```
/// use loadorder_core::{Descriptor, InterfaceMeta, Resolver, VersionRange};
///
/// let resolver = Resolver::default();
/// let candidates = vec![
///     Descriptor::new("core", "D3", "1.0").unwrap()
///         .load_after(VersionRange::any("core", "D2")),
///     Descriptor::new("core", "D2", "1.0").unwrap()
///         .depends_on(VersionRange::new("core", "D1", "1.0.0", "2.0.0").unwrap()),
///     Descriptor::new("core", "D1", "1.5.0").unwrap(),
/// ];
///
/// let resolution = resolver.resolve(candidates, &InterfaceMeta::new("pages")).unwrap();
/// assert_eq!(resolution.ordered_ids(), vec!["D1", "D2", "D3"]);
/// ```
#[derive(Debug, Default)]
pub struct Resolver {
    config: ResolverConfig,
    registry: ExtensionRegistry,
    sorter: TopologicalSorter,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            config,
            registry: ExtensionRegistry::new(),
            sorter: TopologicalSorter::new(),
        }
    }

    pub fn with_registry(config: ResolverConfig, registry: ExtensionRegistry) -> Self {
        Self {
            config,
            registry,
            sorter: TopologicalSorter::new(),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ExtensionRegistry {
        &mut self.registry
    }

    /// Build the resolution graph without ordering it.
    ///
    /// Exposes both exclusion sets and the ordering edges for inspection.
    pub fn resolve_context(&self, descriptors: Vec<Descriptor>) -> Result<ResolutionGraph> {
        ResolutionGraph::build(descriptors, &self.config)
    }

    /// Resolve and order a candidate list for an interface.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::CyclicDependency`](crate::Error::CyclicDependency)
    /// when the active descriptors cannot be ordered; the whole extension
    /// point should then be treated as unavailable.
    pub fn resolve(&self, descriptors: Vec<Descriptor>, interface: &InterfaceMeta) -> Result<Resolution> {
        let graph = self.resolve_context(descriptors)?;
        let forward = self.sorter.sort(&graph)?;
        let order = apply_sort_context(forward, interface.sort_context);
        tracing::debug!(
            interface = %interface.name,
            sort_context = %interface.sort_context,
            ordered = order.len(),
            excluded = graph.len() - order.len(),
            "Resolved extension interface"
        );
        Ok(Resolution {
            interface: interface.clone(),
            graph,
            order,
        })
    }

    /// Collect descriptors from every instance through the accessor
    /// registered for `P`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InterfaceNotRegistered`](crate::Error::InterfaceNotRegistered)
    /// when `P` has no registered accessor.
    pub fn aggregate<'a, P, I>(&self, instances: I) -> Result<Vec<Descriptor>>
    where
        P: ?Sized + 'static,
        I: IntoIterator<Item = &'a P>,
    {
        Ok(self.registry.interface::<P>()?.collect(instances))
    }

    /// Aggregate, resolve and order the descriptors of an interface,
    /// keeping the full diagnostics.
    pub fn resolve_interface<'a, P, I>(&self, instances: I) -> Result<Resolution>
    where
        P: ?Sized + 'static,
        I: IntoIterator<Item = &'a P>,
    {
        let interface = self.registry.interface::<P>()?;
        let descriptors = interface.collect(instances);
        self.resolve(descriptors, interface.meta())
    }

    /// Aggregate, resolve and order the descriptors of an interface.
    pub fn resolve_and_order<'a, P, I>(&self, instances: I) -> Result<Vec<Descriptor>>
    where
        P: ?Sized + 'static,
        I: IntoIterator<Item = &'a P>,
    {
        Ok(self.resolve_interface(instances)?.into_ordered())
    }
}

/// Orient a forward topological order per the interface's sort context.
pub fn apply_sort_context<T>(order: Vec<T>, sort_context: SortContext) -> Vec<T> {
    sort_context.apply(order)
}
