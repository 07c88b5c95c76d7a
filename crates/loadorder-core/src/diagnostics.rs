//! Read-only diagnostics projection of a resolution.
//!
//! A [`ResolutionReport`] lists every candidate in input order with its
//! final state: its position in the resolved order when active, or a short
//! human-readable reason when excluded. It is meant for administrative views
//! and serializes to JSON.

use std::fmt;

use serde::Serialize;

use crate::graph::{NodeId, NodeState};
use crate::interface::SortContext;
use crate::resolver::Resolution;
use crate::version::Version;

/// Final state of one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum DescriptorStatus {
    Active {
        sort_index: usize,
    },
    DependencyDisabled {
        /// The failing reference.
        reference: String,
        reason: String,
    },
    ConflictDisabled {
        /// The active descriptor this one conflicts with.
        conflicting: String,
        reason: String,
    },
    Duplicate {
        kept_plugin: String,
        reason: String,
    },
}

impl DescriptorStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Short state name, as used in the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active { .. } => "active",
            Self::DependencyDisabled { .. } => "dependency-disabled",
            Self::ConflictDisabled { .. } => "conflict-disabled",
            Self::Duplicate { .. } => "duplicate",
        }
    }

    /// Exclusion reason, if excluded.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Active { .. } => None,
            Self::DependencyDisabled { reason, .. }
            | Self::ConflictDisabled { reason, .. }
            | Self::Duplicate { reason, .. } => Some(reason),
        }
    }
}

impl fmt::Display for DescriptorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active { sort_index } => write!(f, "active (#{sort_index})"),
            other => write!(f, "{}: {}", other.label(), other.reason().unwrap_or_default()),
        }
    }
}

/// One candidate in a [`ResolutionReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub plugin_id: String,
    pub descriptor_id: String,
    pub version: Version,
    #[serde(flatten)]
    pub status: DescriptorStatus,
}

/// Candidate counts per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub active: usize,
    pub dependency_disabled: usize,
    pub conflict_disabled: usize,
    pub duplicates: usize,
}

impl ReportSummary {
    pub fn total(&self) -> usize {
        self.active + self.dependency_disabled + self.conflict_disabled + self.duplicates
    }

    pub fn excluded(&self) -> usize {
        self.total() - self.active
    }
}

/// Per-descriptor diagnostics for one extension interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub interface: String,
    pub sort_context: SortContext,
    pub system_only: bool,
    pub entries: Vec<ReportEntry>,
}

impl ResolutionReport {
    pub fn from_resolution(resolution: &Resolution) -> Self {
        let graph = resolution.graph();
        let mut sort_index: Vec<Option<usize>> = vec![None; graph.len()];
        for (position, id) in resolution.order().iter().enumerate() {
            sort_index[id.index()] = Some(position);
        }

        let entries = graph
            .entries()
            .map(|(id, descriptor, state)| ReportEntry {
                plugin_id: descriptor.plugin_id().to_string(),
                descriptor_id: descriptor.descriptor_id().to_string(),
                version: descriptor.version().clone(),
                status: status_of(resolution, id, state, sort_index[id.index()]),
            })
            .collect();

        let interface = resolution.interface();
        Self {
            interface: interface.name.clone(),
            sort_context: interface.sort_context,
            system_only: interface.system_only,
            entries,
        }
    }

    /// The entry a descriptor id resolved to, skipping shadowed duplicates.
    pub fn get(&self, descriptor_id: &str) -> Option<&ReportEntry> {
        self.entries.iter().find(|entry| {
            entry.descriptor_id == descriptor_id
                && !matches!(entry.status, DescriptorStatus::Duplicate { .. })
        })
    }

    /// Active entries in resolved order.
    pub fn active_in_order(&self) -> Vec<&ReportEntry> {
        let mut active: Vec<(usize, &ReportEntry)> = self
            .entries
            .iter()
            .filter_map(|entry| match entry.status {
                DescriptorStatus::Active { sort_index } => Some((sort_index, entry)),
                _ => None,
            })
            .collect();
        active.sort_by_key(|(index, _)| *index);
        active.into_iter().map(|(_, entry)| entry).collect()
    }

    /// Excluded entries in input order.
    pub fn excluded(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|entry| !entry.status.is_active())
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary::default();
        for entry in &self.entries {
            match entry.status {
                DescriptorStatus::Active { .. } => summary.active += 1,
                DescriptorStatus::DependencyDisabled { .. } => summary.dependency_disabled += 1,
                DescriptorStatus::ConflictDisabled { .. } => summary.conflict_disabled += 1,
                DescriptorStatus::Duplicate { .. } => summary.duplicates += 1,
            }
        }
        summary
    }
}

fn status_of(
    resolution: &Resolution,
    id: NodeId,
    state: &NodeState,
    sort_index: Option<usize>,
) -> DescriptorStatus {
    match state {
        NodeState::Active => DescriptorStatus::Active {
            // Every active node is in the order of a successful resolution.
            sort_index: sort_index.unwrap_or(id.index()),
        },
        NodeState::DependencyDisabled(failure) => DescriptorStatus::DependencyDisabled {
            reference: failure.reference().to_string(),
            reason: failure.to_string(),
        },
        NodeState::ConflictDisabled(failure) => DescriptorStatus::ConflictDisabled {
            conflicting: failure.conflicting.to_string(),
            reason: failure.to_string(),
        },
        NodeState::Duplicate { kept } => {
            let kept = resolution.graph().descriptor(*kept);
            DescriptorStatus::Duplicate {
                kept_plugin: kept.plugin_id().to_string(),
                reason: format!("shadowed by {kept}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Descriptor;
    use crate::interface::InterfaceMeta;
    use crate::resolver::Resolver;
    use crate::version::VersionRange;

    fn report(meta: InterfaceMeta) -> ResolutionReport {
        let candidates = vec![
            Descriptor::new("core", "D1", "3.0.0").unwrap(),
            Descriptor::new("core", "D2", "1.0.0")
                .unwrap()
                .depends_on(VersionRange::new("core", "D1", "1.0.0", "2.0.0").unwrap()),
            Descriptor::new("core", "D3", "1.0.0")
                .unwrap()
                .load_after(VersionRange::any("core", "D2")),
            Descriptor::new("extras", "D4", "1.0.0")
                .unwrap()
                .conflicts_with(VersionRange::any("core", "D3")),
            Descriptor::new("extras", "D1", "1.0.0").unwrap(),
        ];
        Resolver::default().resolve(candidates, &meta).unwrap().report()
    }

    #[test]
    fn test_report_lists_every_candidate_in_input_order() {
        let report = report(InterfaceMeta::new("pages"));
        let ids: Vec<&str> = report.entries.iter().map(|e| e.descriptor_id.as_str()).collect();
        assert_eq!(ids, vec!["D1", "D2", "D3", "D4", "D1"]);
        assert_eq!(report.interface, "pages");
    }

    #[test]
    fn test_report_states_and_reasons() {
        let report = report(InterfaceMeta::new("pages"));
        assert_eq!(report.get("D1").unwrap().status, DescriptorStatus::Active { sort_index: 0 });
        assert_eq!(report.get("D3").unwrap().status, DescriptorStatus::Active { sort_index: 1 });
        assert_eq!(
            report.get("D2").unwrap().status.reason(),
            Some("dependency core/D1 version 3.0.0 is newer than 2.0.0")
        );
        assert_eq!(
            report.get("D4").unwrap().status.reason(),
            Some("conflicts with D3 1.0.0 from plugin 'core'")
        );
        assert_eq!(
            report.entries[4].status,
            DescriptorStatus::Duplicate {
                kept_plugin: "core".to_string(),
                reason: "shadowed by core/D1@3.0.0".to_string(),
            }
        );
    }

    #[test]
    fn test_report_summary() {
        let summary = report(InterfaceMeta::new("pages")).summary();
        assert_eq!(
            summary,
            ReportSummary {
                active: 2,
                dependency_disabled: 1,
                conflict_disabled: 1,
                duplicates: 1,
            }
        );
        assert_eq!(summary.total(), 5);
        assert_eq!(summary.excluded(), 3);
    }

    #[test]
    fn test_sort_index_follows_sort_context() {
        let report = report(InterfaceMeta::new("pages").with_sort_context(SortContext::Reverse));
        let active: Vec<&str> = report
            .active_in_order()
            .iter()
            .map(|e| e.descriptor_id.as_str())
            .collect();
        assert_eq!(active, vec!["D3", "D1"]);
        assert_eq!(report.sort_context, SortContext::Reverse);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(DescriptorStatus::Active { sort_index: 2 }.to_string(), "active (#2)");
        let status = DescriptorStatus::DependencyDisabled {
            reference: "core/X".to_string(),
            reason: "missing dependency core/X".to_string(),
        };
        assert_eq!(status.to_string(), "dependency-disabled: missing dependency core/X");
    }
}
