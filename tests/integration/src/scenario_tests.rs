//! End-to-end resolution scenarios
//!
//! These tests exercise the complete flow: plugin instances -> accessor ->
//! resolution graph -> topological sort -> sort context.

use loadorder_core::{
    Descriptor, DescriptorStatus, DuplicatePolicy, Error, ExtensionRegistry, InterfaceMeta,
    NodeState, Resolver, ResolverConfig, SortContext, VersionRange,
};
use loadorder_test_utils::fixtures::{INTERFACE, scenario_a, scenario_b, scenario_c};
use pretty_assertions::assert_eq;
use rstest::rstest;

trait SettingsPages {
    fn settings_pages(&self) -> Vec<Descriptor>;
}

struct Plugin {
    pages: Vec<Descriptor>,
}

impl SettingsPages for Plugin {
    fn settings_pages(&self) -> Vec<Descriptor> {
        self.pages.clone()
    }
}

fn resolver_for(meta: InterfaceMeta) -> Resolver {
    let mut registry = ExtensionRegistry::new();
    registry.register::<dyn SettingsPages>(meta, |plugin| plugin.settings_pages());
    Resolver::with_registry(ResolverConfig::default(), registry)
}

#[rstest]
#[case::scenario_a(scenario_a(), vec!["D1", "D2", "D3"])]
#[case::scenario_b(scenario_b(), vec!["D1", "D3"])]
#[case::scenario_c(scenario_c(), vec!["D3", "D2", "D1"])]
fn test_reference_scenarios(
    #[case] scenario: (Vec<Descriptor>, InterfaceMeta),
    #[case] expected: Vec<&str>,
) {
    let (candidates, meta) = scenario;
    let resolution = Resolver::default().resolve(candidates, &meta).unwrap();
    assert_eq!(resolution.ordered_ids(), expected);
}

#[test]
fn test_scenario_b_reports_version_mismatch() {
    let (candidates, meta) = scenario_b();
    let resolution = Resolver::default().resolve(candidates, &meta).unwrap();

    let graph = resolution.graph();
    assert!(matches!(graph.state("D2"), Some(NodeState::DependencyDisabled(_))));
    assert!(graph.predecessors_of("D3").is_empty());

    let report = resolution.report();
    assert_eq!(
        report.get("D2").unwrap().status,
        DescriptorStatus::DependencyDisabled {
            reference: "core/D1 [1.0.0, 2.0.0]".to_string(),
            reason: "dependency core/D1 version 3.0.0 is newer than 2.0.0".to_string(),
        }
    );
}

#[test]
fn test_contributions_from_several_plugins() {
    let (mut candidates, meta) = scenario_c();
    let d3 = candidates.pop().unwrap();
    let resolver = resolver_for(meta);

    // The dependent plugin is listed before the plugin it depends on.
    let plugins: Vec<Box<dyn SettingsPages>> = vec![
        Box::new(Plugin { pages: vec![d3] }),
        Box::new(Plugin { pages: candidates }),
    ];

    let resolution = resolver
        .resolve_interface(plugins.iter().map(Box::as_ref))
        .unwrap();
    assert_eq!(resolution.interface().name, INTERFACE);
    assert_eq!(resolution.ordered_ids(), vec!["D3", "D2", "D1"]);

    let ordered = resolver
        .resolve_and_order(plugins.iter().map(Box::as_ref))
        .unwrap();
    let versions: Vec<String> = ordered.iter().map(|d| d.version().to_string()).collect();
    assert_eq!(versions, vec!["1.0.0", "1.0.0", "1.5.0"]);
}

#[test]
fn test_resolution_snapshot_is_independent_per_call() {
    let resolver = resolver_for(InterfaceMeta::new(INTERFACE));
    let first: Vec<Box<dyn SettingsPages>> = vec![Box::new(Plugin {
        pages: scenario_b().0,
    })];
    let second: Vec<Box<dyn SettingsPages>> = vec![Box::new(Plugin {
        pages: scenario_a().0,
    })];

    let b = resolver.resolve_interface(first.iter().map(Box::as_ref)).unwrap();
    let a = resolver.resolve_interface(second.iter().map(Box::as_ref)).unwrap();
    assert_eq!(b.ordered_ids(), vec!["D1", "D3"]);
    assert_eq!(a.ordered_ids(), vec!["D1", "D2", "D3"]);
}

#[test]
fn test_every_candidate_has_exactly_one_state() {
    let candidates = vec![
        Descriptor::new("core", "base", "2.0").unwrap(),
        Descriptor::new("extras", "base", "1.0").unwrap(),
        Descriptor::new("extras", "legacy", "1.0")
            .unwrap()
            .conflicts_with(VersionRange::new("core", "base", "2.0", "3.0").unwrap()),
        Descriptor::new("extras", "addon", "1.0")
            .unwrap()
            .depends_on(VersionRange::any("extras", "legacy")),
        Descriptor::new("extras", "orphan", "1.0")
            .unwrap()
            .depends_on(VersionRange::any("extras", "nowhere")),
        Descriptor::new("core", "panel", "1.0")
            .unwrap()
            .load_after(VersionRange::any("extras", "addon"))
            .load_before(VersionRange::any("core", "base")),
    ];
    let report = Resolver::default()
        .resolve(candidates, &InterfaceMeta::new(INTERFACE))
        .unwrap()
        .report();

    let labels: Vec<&str> = report.entries.iter().map(|e| e.status.label()).collect();
    assert_eq!(
        labels,
        vec![
            "active",
            "duplicate",
            "conflict-disabled",
            "dependency-disabled",
            "dependency-disabled",
            "active",
        ]
    );
    let active: Vec<&str> = report
        .active_in_order()
        .iter()
        .map(|e| e.descriptor_id.as_str())
        .collect();
    assert_eq!(active, vec!["panel", "base"]);
    assert_eq!(report.summary().total(), 6);
}

#[test]
fn test_reject_policy_fails_the_call() {
    let resolver = Resolver::new(ResolverConfig::with_duplicates(DuplicatePolicy::Reject));
    let err = resolver
        .resolve(
            vec![
                Descriptor::new("core", "D1", "1.0").unwrap(),
                Descriptor::new("extras", "D1", "1.0").unwrap(),
            ],
            &InterfaceMeta::new(INTERFACE),
        )
        .unwrap_err();
    assert_eq!(
        err,
        Error::DuplicateDescriptor {
            descriptor_id: "D1".to_string(),
            first_plugin: "core".to_string(),
            second_plugin: "extras".to_string(),
        }
    );
}

#[test]
fn test_cycle_makes_interface_unavailable() {
    let meta = InterfaceMeta::new(INTERFACE).with_sort_context(SortContext::Reverse);
    let err = Resolver::default()
        .resolve(
            vec![
                Descriptor::new("core", "free", "1.0").unwrap(),
                Descriptor::new("core", "A", "1.0")
                    .unwrap()
                    .load_before(VersionRange::any("core", "B")),
                Descriptor::new("core", "B", "1.0")
                    .unwrap()
                    .load_before(VersionRange::any("core", "A")),
            ],
            &meta,
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "cyclic dependency detected: A -> B -> A");
}

#[test]
fn test_report_serializes_for_admin_views() {
    let (candidates, meta) = scenario_b();
    let report = Resolver::default().resolve(candidates, &meta).unwrap().report();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["interface"], INTERFACE);
    assert_eq!(json["sort_context"], "forward");
    assert_eq!(json["entries"][0]["state"], "active");
    assert_eq!(json["entries"][0]["sort_index"], 0);
    assert_eq!(json["entries"][1]["state"], "dependency-disabled");
    assert_eq!(json["entries"][1]["version"], "1.0.0");
}
