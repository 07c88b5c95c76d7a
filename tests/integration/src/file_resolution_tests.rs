//! Descriptor-set files resolve the same way as in-memory candidates.

use loadorder_core::{DescriptorStatus, Resolver, SortContext};
use loadorder_meta::{DescriptorSet, Error};
use loadorder_test_utils::TestWorkspace;
use loadorder_test_utils::fixtures::{MIXED_TOML, chain, chain_set, chain_toml};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("1.5.0", SortContext::Forward)]
#[case("3.0.0", SortContext::Forward)]
#[case("1.5.0", SortContext::Reverse)]
fn test_file_matches_in_memory(#[case] d1_version: &str, #[case] sort_context: SortContext) {
    let workspace = TestWorkspace::new();
    let path = workspace.write_set("pages.toml", &chain_toml(d1_version, sort_context));

    let set = DescriptorSet::from_path(&path).unwrap();
    assert_eq!(set, chain_set(d1_version, sort_context));

    let from_file = set.resolve().unwrap();
    let in_memory = Resolver::default()
        .resolve(chain(d1_version), &set.interface_meta())
        .unwrap();
    assert_eq!(from_file.ordered_ids(), in_memory.ordered_ids());
    assert_eq!(from_file.report(), in_memory.report());
}

#[test]
fn test_mixed_set_report() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_set("sets/mixed.toml", MIXED_TOML);

    let report = DescriptorSet::from_path(&path).unwrap().resolve().unwrap().report();
    assert!(report.system_only);

    let states: Vec<(&str, &str, &str)> = report
        .entries
        .iter()
        .map(|e| (e.plugin_id.as_str(), e.descriptor_id.as_str(), e.status.label()))
        .collect();
    assert_eq!(
        states,
        vec![
            ("core", "base", "active"),
            ("extras", "base", "duplicate"),
            ("extras", "legacy", "conflict-disabled"),
            ("extras", "addon", "dependency-disabled"),
            ("core", "panel", "active"),
        ]
    );
    assert_eq!(
        report.get("legacy").unwrap().status,
        DescriptorStatus::ConflictDisabled {
            conflicting: "core/base 2.0".to_string(),
            reason: "conflicts with base 2.0 from plugin 'core'".to_string(),
        }
    );
}

#[test]
fn test_missing_file() {
    let workspace = TestWorkspace::new();
    let err = DescriptorSet::from_path(workspace.missing("nope.toml")).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}
