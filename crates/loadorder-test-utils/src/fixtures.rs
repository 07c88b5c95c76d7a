//! Reference resolution scenarios.
//!
//! | Scenario | D1 version | Sort context | Expected order |
//! |----------|------------|--------------|----------------|
//! | A        | 1.5.0      | forward      | D1, D2, D3     |
//! | B        | 3.0.0      | forward      | D1, D3         |
//! | C        | 1.5.0      | reverse      | D3, D2, D1     |

use loadorder_core::{Descriptor, InterfaceMeta, SortContext, VersionRange};
use loadorder_meta::{DescriptorDecl, DescriptorSet, InterfaceSection, ReferenceDecl};

pub const INTERFACE: &str = "settings-pages";

/// D1 at `d1_version`; D2 depends on D1 in `[1.0.0, 2.0.0]`; D3 loads after D2.
pub fn chain(d1_version: &str) -> Vec<Descriptor> {
    vec![
        Descriptor::new("core", "D1", d1_version).unwrap(),
        Descriptor::new("core", "D2", "1.0.0")
            .unwrap()
            .depends_on(VersionRange::new("core", "D1", "1.0.0", "2.0.0").unwrap()),
        Descriptor::new("core", "D3", "1.0.0")
            .unwrap()
            .load_after(VersionRange::any("core", "D2")),
    ]
}

pub fn scenario_a() -> (Vec<Descriptor>, InterfaceMeta) {
    (chain("1.5.0"), InterfaceMeta::new(INTERFACE))
}

pub fn scenario_b() -> (Vec<Descriptor>, InterfaceMeta) {
    (chain("3.0.0"), InterfaceMeta::new(INTERFACE))
}

pub fn scenario_c() -> (Vec<Descriptor>, InterfaceMeta) {
    (
        chain("1.5.0"),
        InterfaceMeta::new(INTERFACE).with_sort_context(SortContext::Reverse),
    )
}

fn reference(id: &str, min: Option<&str>, max: Option<&str>) -> ReferenceDecl {
    ReferenceDecl {
        plugin: "core".to_string(),
        id: id.to_string(),
        min: min.map(str::to_string),
        max: max.map(str::to_string),
    }
}

fn decl(id: &str, version: &str) -> DescriptorDecl {
    DescriptorDecl {
        plugin: "core".to_string(),
        id: id.to_string(),
        version: version.to_string(),
        load_before: Vec::new(),
        load_after: Vec::new(),
        depends_on: Vec::new(),
        conflicts_with: Vec::new(),
    }
}

/// The chain scenario as a descriptor set.
pub fn chain_set(d1_version: &str, sort_context: SortContext) -> DescriptorSet {
    let mut d2 = decl("D2", "1.0.0");
    d2.depends_on.push(reference("D1", Some("1.0.0"), Some("2.0.0")));
    let mut d3 = decl("D3", "1.0.0");
    d3.load_after.push(reference("D2", None, None));

    DescriptorSet {
        interface: InterfaceSection {
            name: INTERFACE.to_string(),
            sort_context,
            system_only: false,
        },
        resolver: Default::default(),
        descriptors: vec![decl("D1", d1_version), d2, d3],
    }
}

/// The chain scenario as descriptor-set TOML text.
pub fn chain_toml(d1_version: &str, sort_context: SortContext) -> String {
    toml::to_string(&chain_set(d1_version, sort_context)).unwrap()
}

/// Two descriptors ordered after each other.
pub const CYCLE_TOML: &str = r#"
[interface]
name = "settings-pages"

[[descriptor]]
plugin = "core"
id = "A"
version = "1.0"
load_after = [{ plugin = "core", id = "B" }]

[[descriptor]]
plugin = "core"
id = "B"
version = "1.0"
load_after = [{ plugin = "core", id = "A" }]
"#;

/// Every exclusion kind in one set: a duplicate, a conflict and a
/// dependency on the conflicting descriptor.
pub const MIXED_TOML: &str = r#"
[interface]
name = "settings-pages"
system_only = true

[[descriptor]]
plugin = "core"
id = "base"
version = "2.0"

[[descriptor]]
plugin = "extras"
id = "base"
version = "9.0"

[[descriptor]]
plugin = "extras"
id = "legacy"
version = "0.5"
conflicts_with = [{ plugin = "core", id = "base", min = "2.0" }]

[[descriptor]]
plugin = "extras"
id = "addon"
version = "1.0"
depends_on = [{ plugin = "extras", id = "legacy" }]
load_after = [{ plugin = "core", id = "base" }]

[[descriptor]]
plugin = "core"
id = "panel"
version = "1.0"
load_after = [{ plugin = "core", id = "base" }]
"#;
