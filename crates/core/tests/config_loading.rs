use names_core::model::Address;
use names_core::sources::{load_debug_info, load_names_config, ConfigError, Storage};
use tempfile::tempdir;

#[test]
fn loads_json_config_with_mixed_address_forms() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("names.json");
    std::fs::write(
        &path,
        r#"{
            "entry_point": "0x401000",
            "functions": [
                { "name": "init", "address": "0x401010" },
                { "name": "decimal", "address": 4096 },
                { "name": "no_address" }
            ],
            "globals": [{ "name": "g_state", "address": "0x600000" }],
            "parameters": { "ordinals_directory": "/opt/ordinals" }
        }"#,
    )
    .unwrap();

    let config = load_names_config(&path).expect("config");
    assert_eq!(config.entry_point, Address::new(0x401000));
    assert_eq!(config.functions.len(), 3);
    assert_eq!(config.functions[1].address, Address::new(4096));
    assert!(config.functions[2].address.is_undefined());
    assert!(config.segments.is_empty());
    assert_eq!(
        config.parameters.ordinals_directory.as_deref(),
        Some(std::path::Path::new("/opt/ordinals"))
    );
}

#[test]
fn loads_yaml_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("names.yml");
    std::fs::write(
        &path,
        "functions:\n  - name: start\n    address: 0x100\n\
         segments:\n  - name: .data\n    address: 8192\n",
    )
    .unwrap();

    let config = load_names_config(&path).expect("yaml config");
    assert!(config.entry_point.is_undefined());
    assert_eq!(config.functions[0].address, Address::new(0x100));
    assert_eq!(config.segments[0].name, ".data");
}

#[test]
fn loads_debug_info_with_storage_variants() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("debug.json");
    std::fs::write(
        &path,
        r#"{
            "functions": [{ "address": "0x1000", "name": "main" }],
            "globals": [
                { "name": "g", "storage": { "memory": { "address": "0x2000" } } },
                { "name": "r", "storage": { "register": { "name": "rbx" } } },
                { "name": "u", "storage": "undefined" },
                { "name": "d" }
            ]
        }"#,
    )
    .unwrap();

    let debug = load_debug_info(&path).expect("debug info");
    assert_eq!(debug.functions[0].name, "main");
    assert_eq!(debug.globals[0].storage.memory_address(), Some(Address::new(0x2000)));
    assert_eq!(debug.globals[1].storage, Storage::Register { name: "rbx".into() });
    assert_eq!(debug.globals[2].storage, Storage::Undefined);
    assert_eq!(debug.globals[3].storage, Storage::Undefined);
}

#[test]
fn reports_errors_by_kind() {
    let dir = tempdir().unwrap();

    let missing = load_names_config(dir.path().join("absent.json"));
    assert!(matches!(missing, Err(ConfigError::Io { .. })));

    let bad_json = dir.path().join("bad.json");
    std::fs::write(&bad_json, "{ not json").unwrap();
    assert!(matches!(load_names_config(&bad_json), Err(ConfigError::Json { .. })));

    let bad_address = dir.path().join("bad_address.json");
    std::fs::write(&bad_address, r#"{ "entry_point": "main" }"#).unwrap();
    assert!(matches!(load_names_config(&bad_address), Err(ConfigError::Json { .. })));

    let toml = dir.path().join("names.toml");
    std::fs::write(&toml, "").unwrap();
    assert!(matches!(load_names_config(&toml), Err(ConfigError::UnsupportedFormat(_))));
}
