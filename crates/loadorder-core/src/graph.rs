//! Resolution graph: candidate partitioning and ordering edges.
//!
//! A [`ResolutionGraph`] is built once per resolution call from a flat list
//! of candidate descriptors. Building it partitions the candidates into
//! active, dependency-disabled, conflict-disabled and duplicate nodes, then
//! records "must precede" edges among the active nodes only.
//!
//! Nodes live in an arena in input order and are addressed by [`NodeId`],
//! so nothing about the result depends on hash ordering.
//!
//! Exclusion runs in this order:
//!
//! 1. Duplicate descriptor ids are resolved per [`DuplicatePolicy`].
//! 2. Hard dependencies are checked to a fixed point. A descriptor whose
//!    dependency is missing, provided by another plugin, out of range, or
//!    itself disabled becomes dependency-disabled.
//! 3. Conflicts are settled in dependency order. A descriptor is decided
//!    only after everything it depends on or conflicts with has been decided,
//!    so a conflict never fires against a target that is disabled afterwards.
//!    Only the declaring descriptor is disabled. When the remaining relations
//!    form a loop, the earliest undecided candidate is decided first, which
//!    keeps the later member of a mutually conflicting pair.
//! 4. Hard dependencies are re-checked so dependents of conflict-disabled
//!    descriptors are disabled too.
//!
//! Two active descriptors never conflict with each other. When the
//! dependency and conflict relations are acyclic, every conflict-disabled
//! descriptor names a target that is still active in the final graph.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap};
use std::fmt;

use crate::config::{DuplicatePolicy, ResolverConfig};
use crate::descriptor::{Descriptor, DescriptorKey};
use crate::error::{Error, Result};
use crate::version::{RangeCheck, VersionRange};

/// Arena index of a candidate; equal to its position in the input list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Why a hard dependency could not be satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyFailure {
    /// No candidate has the referenced descriptor id.
    Missing { reference: VersionRange },
    /// The descriptor id exists but is contributed by a different plugin.
    PluginMismatch {
        reference: VersionRange,
        found: DescriptorKey,
    },
    /// The target version is below the accepted minimum.
    VersionTooOld {
        reference: VersionRange,
        found: DescriptorKey,
    },
    /// The target version is above the accepted maximum.
    VersionTooNew {
        reference: VersionRange,
        found: DescriptorKey,
    },
    /// The target was found but is itself excluded.
    DependencyInactive {
        reference: VersionRange,
        dependency: DescriptorKey,
    },
}

impl DependencyFailure {
    /// The reference that failed.
    pub fn reference(&self) -> &VersionRange {
        match self {
            Self::Missing { reference }
            | Self::PluginMismatch { reference, .. }
            | Self::VersionTooOld { reference, .. }
            | Self::VersionTooNew { reference, .. }
            | Self::DependencyInactive { reference, .. } => reference,
        }
    }
}

impl fmt::Display for DependencyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { reference } => write!(f, "missing dependency {reference}"),
            Self::PluginMismatch { reference, found } => write!(
                f,
                "dependency {reference} is provided by plugin '{}' instead",
                found.plugin_id
            ),
            Self::VersionTooOld { reference, found } => write!(
                f,
                "dependency {}/{} version {} is older than {}",
                found.plugin_id,
                found.descriptor_id,
                found.version,
                reference.min()
            ),
            Self::VersionTooNew { reference, found } => match reference.max() {
                Some(max) => write!(
                    f,
                    "dependency {}/{} version {} is newer than {}",
                    found.plugin_id, found.descriptor_id, found.version, max
                ),
                None => write!(
                    f,
                    "dependency {}/{} version {} is outside {reference}",
                    found.plugin_id, found.descriptor_id, found.version
                ),
            },
            Self::DependencyInactive { dependency, .. } => write!(
                f,
                "dependency {}/{} is disabled",
                dependency.plugin_id, dependency.descriptor_id
            ),
        }
    }
}

/// Why a descriptor was dropped for a declared conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictFailure {
    pub reference: VersionRange,
    pub conflicting: DescriptorKey,
}

impl fmt::Display for ConflictFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "conflicts with {} {} from plugin '{}'",
            self.conflicting.descriptor_id, self.conflicting.version, self.conflicting.plugin_id
        )
    }
}

/// Partition state of a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
    Active,
    DependencyDisabled(DependencyFailure),
    ConflictDisabled(ConflictFailure),
    /// Shadowed by another candidate with the same descriptor id.
    Duplicate { kept: NodeId },
}

impl NodeState {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Per-call graph over a candidate set.
#[derive(Debug, Clone)]
pub struct ResolutionGraph {
    nodes: Vec<Descriptor>,
    states: Vec<NodeState>,
    index: HashMap<String, NodeId>,
    /// For each node, the active nodes that must precede it.
    predecessors: Vec<BTreeSet<NodeId>>,
}

impl ResolutionGraph {
    /// Build the graph for `candidates`, honoring input order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateDescriptor`] only when the config uses
    /// [`DuplicatePolicy::Reject`]. All other problems are recorded as node
    /// states.
    pub fn build(candidates: Vec<Descriptor>, config: &ResolverConfig) -> Result<Self> {
        let count = candidates.len();
        let mut graph = Self {
            nodes: candidates,
            states: vec![NodeState::Active; count],
            index: HashMap::with_capacity(count),
            predecessors: vec![BTreeSet::new(); count],
        };

        graph.index_candidates(config.duplicates)?;
        graph.propagate_dependency_failures();
        graph.settle_conflicts();
        graph.propagate_dependency_failures();
        graph.add_ordering_edges();

        tracing::debug!(
            candidates = count,
            active = graph.active_count(),
            edges = graph.edge_count(),
            "Built resolution graph"
        );
        Ok(graph)
    }

    fn index_candidates(&mut self, policy: DuplicatePolicy) -> Result<()> {
        for position in 0..self.nodes.len() {
            let id = NodeId(position);
            let descriptor_id = self.nodes[position].descriptor_id().to_string();
            let Some(&existing) = self.index.get(&descriptor_id) else {
                self.index.insert(descriptor_id, id);
                continue;
            };

            let first = &self.nodes[existing.0];
            let second = &self.nodes[position];
            tracing::warn!(
                descriptor = %descriptor_id,
                first = %first,
                second = %second,
                %policy,
                "Duplicate descriptor id"
            );
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(Error::DuplicateDescriptor {
                        descriptor_id,
                        first_plugin: first.plugin_id().to_string(),
                        second_plugin: second.plugin_id().to_string(),
                    });
                }
                DuplicatePolicy::FirstWins => {
                    self.states[position] = NodeState::Duplicate { kept: existing };
                }
                DuplicatePolicy::LastWins => {
                    self.index.insert(descriptor_id, id);
                    for state in &mut self.states {
                        if matches!(state, NodeState::Duplicate { kept } if *kept == existing) {
                            *state = NodeState::Duplicate { kept: id };
                        }
                    }
                    self.states[existing.0] = NodeState::Duplicate { kept: id };
                }
            }
        }
        Ok(())
    }

    /// Look up the node a reference points at, checking plugin and version.
    fn lookup(&self, reference: &VersionRange) -> std::result::Result<NodeId, DependencyFailure> {
        let Some(&id) = self.index.get(reference.descriptor_id()) else {
            return Err(DependencyFailure::Missing {
                reference: reference.clone(),
            });
        };
        let target = &self.nodes[id.0];
        match reference.check(target.plugin_id(), target.descriptor_id(), target.version()) {
            RangeCheck::Compatible => Ok(id),
            RangeCheck::IdentityMismatch => Err(DependencyFailure::PluginMismatch {
                reference: reference.clone(),
                found: target.key(),
            }),
            RangeCheck::TooOld => Err(DependencyFailure::VersionTooOld {
                reference: reference.clone(),
                found: target.key(),
            }),
            RangeCheck::TooNew => Err(DependencyFailure::VersionTooNew {
                reference: reference.clone(),
                found: target.key(),
            }),
        }
    }

    /// Disable descriptors with unsatisfied hard dependencies until no more
    /// exclusions occur.
    fn propagate_dependency_failures(&mut self) {
        loop {
            let mut changed = false;
            for position in 0..self.nodes.len() {
                if !self.states[position].is_active() {
                    continue;
                }
                if let Some(failure) = self.first_dependency_failure(NodeId(position)) {
                    tracing::debug!(
                        descriptor = %self.nodes[position],
                        reason = %failure,
                        "Descriptor dependency-disabled"
                    );
                    self.states[position] = NodeState::DependencyDisabled(failure);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
    }

    fn first_dependency_failure(&self, id: NodeId) -> Option<DependencyFailure> {
        for reference in self.nodes[id.0].dependencies() {
            match self.lookup(reference) {
                Err(failure) => return Some(failure),
                Ok(target) if target != id && !self.states[target.0].is_active() => {
                    return Some(DependencyFailure::DependencyInactive {
                        reference: reference.clone(),
                        dependency: self.nodes[target.0].key(),
                    });
                }
                Ok(_) => {}
            }
        }
        None
    }

    /// Decide every active node once, after the nodes it depends on or
    /// conflicts with.
    fn settle_conflicts(&mut self) {
        let count = self.nodes.len();
        let mut waiting = vec![0usize; count];
        let mut dependents: Vec<Vec<NodeId>> = vec![Vec::new(); count];
        let mut pending: BTreeSet<NodeId> = self.active_ids().collect();

        for &id in &pending {
            let descriptor = &self.nodes[id.0];
            let prerequisites: BTreeSet<NodeId> = descriptor
                .dependencies()
                .iter()
                .chain(descriptor.conflicts())
                .filter_map(|reference| self.active_target(id, reference))
                .collect();
            waiting[id.0] = prerequisites.len();
            for prerequisite in prerequisites {
                dependents[prerequisite.0].push(id);
            }
        }

        let mut ready: BinaryHeap<Reverse<NodeId>> = pending
            .iter()
            .filter(|id| waiting[id.0] == 0)
            .map(|&id| Reverse(id))
            .collect();

        while let Some(&earliest) = pending.first() {
            let id = match ready.pop() {
                Some(Reverse(id)) => id,
                None => {
                    tracing::trace!(
                        descriptor = %self.nodes[earliest.0],
                        "Breaking conflict loop at earliest undecided descriptor"
                    );
                    earliest
                }
            };
            if !pending.remove(&id) {
                continue;
            }
            self.decide(id);
            for &dependent in &dependents[id.0] {
                waiting[dependent.0] = waiting[dependent.0].saturating_sub(1);
                if waiting[dependent.0] == 0 && pending.contains(&dependent) {
                    ready.push(Reverse(dependent));
                }
            }
        }
    }

    fn decide(&mut self, id: NodeId) {
        let state = if let Some(failure) = self.first_dependency_failure(id) {
            tracing::debug!(
                descriptor = %self.nodes[id.0],
                reason = %failure,
                "Descriptor dependency-disabled"
            );
            NodeState::DependencyDisabled(failure)
        } else if let Some(failure) = self.first_conflict(id) {
            tracing::debug!(
                descriptor = %self.nodes[id.0],
                reason = %failure,
                "Descriptor conflict-disabled"
            );
            NodeState::ConflictDisabled(failure)
        } else {
            return;
        };
        self.states[id.0] = state;
    }

    fn first_conflict(&self, id: NodeId) -> Option<ConflictFailure> {
        self.nodes[id.0].conflicts().iter().find_map(|reference| {
            self.active_target(id, reference).map(|target| ConflictFailure {
                reference: reference.clone(),
                conflicting: self.nodes[target.0].key(),
            })
        })
    }

    /// Resolve a reference to an active node other than `from`.
    fn active_target(&self, from: NodeId, reference: &VersionRange) -> Option<NodeId> {
        let target = self.lookup(reference).ok()?;
        (target != from && self.states[target.0].is_active()).then_some(target)
    }

    fn add_ordering_edges(&mut self) {
        for position in 0..self.nodes.len() {
            let id = NodeId(position);
            if !self.states[position].is_active() {
                continue;
            }
            let descriptor = &self.nodes[position];
            let mut edges: Vec<(NodeId, NodeId)> = Vec::new();

            for reference in descriptor.befores() {
                match self.active_target(id, reference) {
                    Some(target) => edges.push((id, target)),
                    None => tracing::trace!(
                        descriptor = %descriptor,
                        target = %reference,
                        "Dropping load_before edge to unavailable descriptor"
                    ),
                }
            }
            for reference in descriptor.afters() {
                match self.active_target(id, reference) {
                    Some(target) => edges.push((target, id)),
                    None => tracing::trace!(
                        descriptor = %descriptor,
                        target = %reference,
                        "Dropping load_after edge to unavailable descriptor"
                    ),
                }
            }
            for reference in descriptor.dependencies() {
                if let Some(target) = self.active_target(id, reference) {
                    edges.push((target, id));
                }
            }

            for (before, after) in edges {
                self.predecessors[after.0].insert(before);
            }
        }
    }

    /// All candidates in input order, including excluded ones.
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.nodes
    }

    /// Take back ownership of all candidates, in input order.
    pub fn into_descriptors(self) -> Vec<Descriptor> {
        self.nodes
    }

    pub fn descriptor(&self, id: NodeId) -> &Descriptor {
        &self.nodes[id.0]
    }

    pub fn node_state(&self, id: NodeId) -> &NodeState {
        &self.states[id.0]
    }

    /// Every candidate with its arena id and state, in input order.
    pub fn entries(&self) -> impl Iterator<Item = (NodeId, &Descriptor, &NodeState)> {
        self.nodes
            .iter()
            .zip(&self.states)
            .enumerate()
            .map(|(position, (descriptor, state))| (NodeId(position), descriptor, state))
    }

    /// The node a descriptor id resolves to (the kept one for duplicates).
    pub fn node_id(&self, descriptor_id: &str) -> Option<NodeId> {
        self.index.get(descriptor_id).copied()
    }

    /// The descriptor a descriptor id resolves to.
    pub fn get(&self, descriptor_id: &str) -> Option<&Descriptor> {
        self.node_id(descriptor_id).map(|id| self.descriptor(id))
    }

    /// State of the descriptor a descriptor id resolves to.
    pub fn state(&self, descriptor_id: &str) -> Option<&NodeState> {
        self.node_id(descriptor_id).map(|id| self.node_state(id))
    }

    pub fn is_active(&self, descriptor_id: &str) -> bool {
        self.state(descriptor_id).is_some_and(NodeState::is_active)
    }

    /// Active node ids in input order.
    pub fn active_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_active())
            .map(|(position, _)| NodeId(position))
    }

    /// Active descriptors in input order.
    pub fn active(&self) -> impl Iterator<Item = &Descriptor> {
        self.active_ids().map(|id| self.descriptor(id))
    }

    pub fn active_count(&self) -> usize {
        self.states.iter().filter(|state| state.is_active()).count()
    }

    pub fn dependency_disabled(&self) -> impl Iterator<Item = (&Descriptor, &DependencyFailure)> {
        self.entries().filter_map(|(_, descriptor, state)| match state {
            NodeState::DependencyDisabled(failure) => Some((descriptor, failure)),
            _ => None,
        })
    }

    pub fn conflict_disabled(&self) -> impl Iterator<Item = (&Descriptor, &ConflictFailure)> {
        self.entries().filter_map(|(_, descriptor, state)| match state {
            NodeState::ConflictDisabled(failure) => Some((descriptor, failure)),
            _ => None,
        })
    }

    /// Shadowed duplicates paired with the descriptor that was kept.
    pub fn duplicates(&self) -> impl Iterator<Item = (&Descriptor, &Descriptor)> {
        self.entries().filter_map(|(_, descriptor, state)| match state {
            NodeState::Duplicate { kept } => Some((descriptor, self.descriptor(*kept))),
            _ => None,
        })
    }

    /// Active nodes that must precede `id`.
    pub fn predecessors(&self, id: NodeId) -> &BTreeSet<NodeId> {
        &self.predecessors[id.0]
    }

    /// Descriptor ids that must precede `descriptor_id`.
    pub fn predecessors_of(&self, descriptor_id: &str) -> Vec<&str> {
        self.node_id(descriptor_id)
            .map(|id| {
                self.predecessors(id)
                    .iter()
                    .map(|p| self.descriptor(*p).descriptor_id())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of distinct ordering edges.
    pub fn edge_count(&self) -> usize {
        self.predecessors.iter().map(BTreeSet::len).sum()
    }

    /// Number of candidates, including excluded ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
