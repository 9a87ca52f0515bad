use std::sync::Arc;

use names_core::model::{Address, NameKind};
use names_core::services::ordinals::OrdinalCache;
use names_core::services::registry::NameRegistry;
use names_core::services::report::NameReport;
use names_core::sources::{NullDemangler, RustDemangler};

#[test]
fn report_lists_non_empty_addresses_in_order() {
    let mut registry = NameRegistry::empty(OrdinalCache::default(), Arc::new(NullDemangler));
    registry.add_name(Address::new(0x2000), "beta", NameKind::Export);
    registry.add_name(Address::new(0x1000), "alpha", NameKind::SymbolFunction);
    registry.add_name(Address::new(0x1000), "alpha_cfg", NameKind::ConfigFunction);
    registry.names_at(Address::new(0x3000));

    let report = NameReport::from_registry(&registry);
    assert_eq!(report.len(), 2);
    assert_eq!(report.entries[0].address, "0x1000");
    assert_eq!(report.entries[0].preferred, "alpha_cfg");
    assert_eq!(report.entries[0].kind, NameKind::ConfigFunction);
    assert_eq!(report.entries[0].candidates.len(), 2);
    assert_eq!(report.entries[0].candidates[1].name, "alpha");
    assert!(report.entry("0x3000").is_none());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["entries"][1]["kind"], "export");
    assert!(json["entries"][1].get("demangled").is_none());
}

#[test]
fn report_includes_demangled_names() {
    let mut registry = NameRegistry::empty(OrdinalCache::default(), Arc::new(RustDemangler));
    registry.add_name(
        Address::new(0x10),
        "_ZN4core3fmt5write17h0123456789abcdefE",
        NameKind::SymbolFunction,
    );
    registry.add_name(Address::new(0x20), "plain_c_name", NameKind::SymbolFunction);

    let report = NameReport::from_registry(&registry);
    assert_eq!(report.entry("0x10").and_then(|e| e.demangled.as_deref()), Some("core::fmt::write"));
    assert_eq!(report.entry("0x20").and_then(|e| e.demangled.clone()), None);
    assert_eq!(registry.demangler().name(), "rust");
}
