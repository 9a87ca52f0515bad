use std::sync::Arc;

use names_core::services::ordinals::{
    normalize_library_name, parse_ordinal_map, OrdinalCache,
};
use names_core::services::registry::NameRegistry;
use names_core::sources::NullDemangler;
use tempfile::tempdir;

#[test]
fn library_names_are_lowercased_and_suffix_stripped() {
    assert_eq!(normalize_library_name("KERNEL32.DLL"), "kernel32");
    assert_eq!(normalize_library_name("foo"), "foo");
    assert_eq!(normalize_library_name("Comctl32.ocx"), "comctl32");
    assert_eq!(normalize_library_name("libc.so.6"), "libc.so.6");
}

#[test]
fn parse_skips_invalid_lines_and_keeps_last_duplicate() {
    let map = parse_ordinal_map(
        "1 First\n\
         -4 Negative\n\
         abc NotANumber\n\
         \n\
         2\n\
         1 FirstAgain\n\
         7   CreateWidget   trailing\n\
         9 NoNewline",
    );
    assert_eq!(map.len(), 4);
    assert_eq!(map.get(&1).map(String::as_str), Some("FirstAgain"));
    assert_eq!(map.get(&2).map(String::as_str), Some(""));
    assert_eq!(map.get(&7).map(String::as_str), Some("CreateWidget"));
    assert_eq!(map.get(&9).map(String::as_str), Some("NoNewline"));
}

#[test]
fn bare_ordinal_line_clears_an_earlier_name() {
    let map = parse_ordinal_map("7 Foo\n7\n");
    assert_eq!(map.get(&7).map(String::as_str), Some(""));

    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("widgets.ord"), "7 Foo\n7\n8 Bar\n").unwrap();
    let mut cache = OrdinalCache::new(Some(dir.path().to_path_buf()));
    assert_eq!(cache.resolve("widgets.dll", 7), None);
    assert_eq!(cache.resolve("widgets.dll", 8), Some("Bar"));
}

#[test]
fn registry_resolves_listed_and_reports_unlisted_ordinals() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("foo.ord"), "7 CreateWidget\n").unwrap();

    let ordinals = OrdinalCache::new(Some(dir.path().to_path_buf()));
    let mut registry = NameRegistry::empty(ordinals, Arc::new(NullDemangler));
    assert_eq!(registry.resolve_ordinal_name("foo", 7), Some("CreateWidget"));
    assert_eq!(registry.resolve_ordinal_name("FOO.dll", 7), Some("CreateWidget"));
    assert_eq!(registry.resolve_ordinal_name("foo", 99), None);
    assert_eq!(registry.resolve_ordinal_name("missing-lib", 1), None);
}

#[test]
fn libraries_are_loaded_once() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("user32.ord");
    std::fs::write(&path, "10 MessageBoxA\n").unwrap();

    let mut cache = OrdinalCache::new(Some(dir.path().to_path_buf()));
    assert_eq!(cache.resolve("user32.dll", 10), Some("MessageBoxA"));

    // Changing the file afterwards has no effect: the map is cached.
    std::fs::write(&path, "10 Replaced\n").unwrap();
    assert_eq!(cache.resolve("USER32", 10), Some("MessageBoxA"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn failed_loads_are_remembered() {
    let dir = tempdir().unwrap();
    let mut cache = OrdinalCache::new(Some(dir.path().to_path_buf()));
    assert_eq!(cache.resolve("late", 1), None);
    assert!(cache.is_cached("late"));
    assert!(!cache.is_loaded("late"));

    // A file appearing later is not picked up.
    std::fs::write(dir.path().join("late.ord"), "1 TooLate\n").unwrap();
    assert_eq!(cache.resolve("late", 1), None);
}

#[test]
fn empty_file_is_a_successful_load() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("empty.ord"), "").unwrap();
    let mut cache = OrdinalCache::new(Some(dir.path().to_path_buf()));
    assert_eq!(cache.resolve("empty", 0), None);
    assert!(cache.is_loaded("empty"));
}

#[test]
fn missing_directory_resolves_nothing() {
    let mut cache = OrdinalCache::new(None);
    assert!(cache.file_path("foo").is_none());
    assert_eq!(cache.resolve("foo", 1), None);
    assert!(cache.is_cached("foo"));
}
