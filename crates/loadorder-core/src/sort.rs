//! Deterministic topological ordering of the active descriptors.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::error::{Error, Result};
use crate::graph::{NodeId, ResolutionGraph};

/// Kahn's algorithm over the active subset of a [`ResolutionGraph`].
///
/// When several nodes are ready at once the one that appeared first in the
/// candidate list is emitted first, so the same input always yields the same
/// order regardless of descriptor ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopologicalSorter;

impl TopologicalSorter {
    pub fn new() -> Self {
        Self
    }

    /// Order the active nodes so every node follows its predecessors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CyclicDependency`] naming the descriptors of one
    /// cycle when the active nodes cannot be fully ordered. No partial order
    /// is returned.
    pub fn sort(&self, graph: &ResolutionGraph) -> Result<Vec<NodeId>> {
        let active: Vec<NodeId> = graph.active_ids().collect();
        let mut in_degree = vec![0usize; graph.len()];
        let mut successors: Vec<Vec<NodeId>> = vec![Vec::new(); graph.len()];

        for &id in &active {
            for &before in graph.predecessors(id) {
                in_degree[id.index()] += 1;
                successors[before.index()].push(id);
            }
        }

        let mut ready: BinaryHeap<Reverse<NodeId>> = active
            .iter()
            .filter(|id| in_degree[id.index()] == 0)
            .map(|&id| Reverse(id))
            .collect();

        let mut order = Vec::with_capacity(active.len());
        while let Some(Reverse(current)) = ready.pop() {
            order.push(current);
            for &next in &successors[current.index()] {
                let degree = &mut in_degree[next.index()];
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if order.len() != active.len() {
            let sorted: HashSet<NodeId> = order.iter().copied().collect();
            let remaining: Vec<NodeId> = active
                .into_iter()
                .filter(|id| !sorted.contains(id))
                .collect();
            let cycle = find_cycle(graph, &remaining);
            tracing::warn!(cycle = ?cycle, "Ordering cycle among active descriptors");
            return Err(Error::CyclicDependency { cycle });
        }

        Ok(order)
    }
}

/// Walk predecessor links among the unsorted nodes until one repeats.
///
/// Every unsorted node keeps at least one unsorted predecessor, so the walk
/// always closes a loop. The result lists the loop in precedence order,
/// starting from its earliest candidate, with the first id repeated at the end.
fn find_cycle(graph: &ResolutionGraph, remaining: &[NodeId]) -> Vec<String> {
    let pending: HashSet<NodeId> = remaining.iter().copied().collect();
    let Some(&start) = remaining.first() else {
        return Vec::new();
    };

    let mut path: Vec<NodeId> = Vec::new();
    let mut current = start;
    loop {
        if let Some(position) = path.iter().position(|&seen| seen == current) {
            let mut members: Vec<NodeId> = path[position..].iter().rev().copied().collect();
            if let Some(earliest) = members
                .iter()
                .enumerate()
                .min_by_key(|(_, id)| **id)
                .map(|(offset, _)| offset)
            {
                members.rotate_left(earliest);
            }
            let mut cycle: Vec<String> = members
                .iter()
                .map(|id| graph.descriptor(*id).descriptor_id().to_string())
                .collect();
            if let Some(first) = cycle.first().cloned() {
                cycle.push(first);
            }
            return cycle;
        }
        path.push(current);
        match graph
            .predecessors(current)
            .iter()
            .find(|p| pending.contains(p))
        {
            Some(&next) => current = next,
            None => {
                return path
                    .iter()
                    .map(|id| graph.descriptor(*id).descriptor_id().to_string())
                    .collect();
            }
        }
    }
}
