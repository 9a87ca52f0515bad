use names_core::model::{Address, Name, NameKind, Names, NAME_KIND_PRECEDENCE};

#[test]
fn address_parses_hex_and_decimal() {
    assert_eq!("0x1000".parse::<Address>().unwrap(), Address::new(0x1000));
    assert_eq!("0X1f".parse::<Address>().unwrap(), Address::new(0x1f));
    assert_eq!("4096".parse::<Address>().unwrap(), Address::new(4096));
    assert!("main".parse::<Address>().is_err());
}

#[test]
fn address_undefined_is_default_and_renders_specially() {
    assert!(Address::default().is_undefined());
    assert_eq!(Address::UNDEFINED.to_string(), "<undefined>");
    assert_eq!(Address::new(0x401000).to_string(), "0x401000");
    assert_eq!(Address::new(0xABC).to_hex_string(), "abc");
}

#[test]
fn precedence_table_matches_rank() {
    for (index, kind) in NAME_KIND_PRECEDENCE.iter().enumerate() {
        assert_eq!(kind.rank(), index, "rank mismatch for {kind}");
    }
    // Curated sources beat recovered ones, which beat raw image data.
    assert!(NameKind::ConfigFunction < NameKind::DebugFunction);
    assert!(NameKind::DebugFunction < NameKind::SymbolFunction);
    assert!(NameKind::Import < NameKind::ImportGenerated);
    assert!(NameKind::EntryPoint < NameKind::Segment);
}

#[test]
fn default_name_is_invalid_sentinel() {
    let name = Name::default();
    assert!(!name.is_valid());
    assert_eq!(name.text(), "");
    assert_eq!(name.kind(), NameKind::Invalid);
}

#[test]
fn underscore_main_is_normalized() {
    assert_eq!(Name::new("_main", NameKind::SymbolFunction).text(), "main");
    assert_eq!(Name::new("__main", NameKind::SymbolFunction).text(), "__main");
    assert_eq!(Name::new("_main_loop", NameKind::SymbolFunction).text(), "_main_loop");
    let long = "x".repeat(4096);
    assert_eq!(Name::new(long.clone(), NameKind::Export).text(), long);
}

#[test]
fn names_order_by_kind_then_text() {
    let a = Name::new("zeta", NameKind::ConfigFunction);
    let b = Name::new("alpha", NameKind::DebugFunction);
    let c = Name::new("beta", NameKind::DebugFunction);
    assert!(a < b);
    assert!(b < c);
}

#[test]
fn empty_text_is_rejected() {
    let mut names = Names::new();
    assert!(!names.add("", NameKind::ConfigFunction));
    assert!(names.is_empty());
    assert!(!names.preferred().is_valid());
}

#[test]
fn adding_same_pair_twice_is_idempotent() {
    let mut names = Names::new();
    assert!(names.add("init", NameKind::ConfigFunction));
    assert!(names.add("init", NameKind::ConfigFunction));
    assert_eq!(names.len(), 1);

    // Same text under another kind is a different candidate.
    assert!(names.add("init", NameKind::SymbolFunction));
    assert_eq!(names.len(), 2);
}

#[test]
fn preferred_ignores_insertion_order() {
    let mut first = Names::new();
    first.add("sym_name", NameKind::SymbolFunction);
    first.add("dbg_name", NameKind::DebugFunction);

    let mut second = Names::new();
    second.add("dbg_name", NameKind::DebugFunction);
    second.add("sym_name", NameKind::SymbolFunction);

    assert_eq!(first.preferred().text(), "dbg_name");
    assert_eq!(second.preferred().text(), "dbg_name");
}

#[test]
fn preferred_reflects_latest_insertions() {
    let mut names = Names::new();
    names.add("segment", NameKind::Segment);
    assert_eq!(names.preferred().kind(), NameKind::Segment);
    names.add("user_name", NameKind::ConfigGlobal);
    assert_eq!(names.preferred().text(), "user_name");
    assert_eq!(names.preferred().text(), "user_name");
}

#[test]
fn iteration_is_ranked_and_repeatable() {
    let mut names = Names::new();
    names.add("b", NameKind::Export);
    names.add("a", NameKind::Export);
    names.add("c", NameKind::ConfigFunction);

    let first: Vec<&str> = names.iter().map(Name::text).collect();
    let second: Vec<&str> = (&names).into_iter().map(Name::text).collect();
    assert_eq!(first, vec!["c", "a", "b"]);
    assert_eq!(first, second);
}

#[test]
fn contains_uses_normalized_text() {
    let mut names = Names::new();
    names.add("_main", NameKind::SymbolFunction);
    assert!(names.contains("main", NameKind::SymbolFunction));
    assert!(names.contains("_main", NameKind::SymbolFunction));
}
