use std::io::Write;

use tracejs::config::DEFAULT_MAX_STRING_LENGTH;
use tracejs::{ConfigError, Engine, EngineConfig};

#[test]
fn empty_object_yields_defaults() {
    let config = EngineConfig::from_json_str("{}").expect("config should parse");
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.heap_limit, None);
    assert_eq!(config.gc_threshold, 1024);
    assert_eq!(config.max_string_length, DEFAULT_MAX_STRING_LENGTH);
    assert_eq!(config.max_frames, 10_000);
    assert!(!config.retain_stack_traces);
}

#[test]
fn camel_case_keys_override_defaults() {
    let config = EngineConfig::from_json_str(
        r#"{
            "heapLimit": 4096,
            "maxStringLength": 128,
            "retainStackTraces": true
        }"#,
    )
    .expect("config should parse");

    assert_eq!(config.heap_limit, Some(4096));
    assert_eq!(config.max_string_length, 128);
    assert!(config.retain_stack_traces);
    assert_eq!(config.max_frames, 10_000);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = EngineConfig::from_json_str("{ heapLimit: }").expect_err("config should not parse");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_file_is_a_read_error() {
    let path = std::env::temp_dir().join("tracejs-config-that-does-not-exist.json");
    let err = EngineConfig::from_path(&path).expect_err("missing file should fail");
    match err {
        ConfigError::Read { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn config_file_round_trips_through_engine() {
    let path = std::env::temp_dir().join(format!("tracejs-config-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).expect("temp file should be created");
    file.write_all(br#"{ "maxFrames": 7, "gcThreshold": 32 }"#)
        .expect("config should be written");
    drop(file);

    let config = EngineConfig::from_path(&path).expect("config should load");
    std::fs::remove_file(&path).expect("temp file should be removed");

    let ctx = Engine::from_config(config)
        .new_context()
        .expect("context should initialize");
    assert_eq!(ctx.config().max_frames, 7);
    assert_eq!(ctx.config().gc_threshold, 32);
}

#[test]
fn builder_methods_set_fields() {
    let engine = Engine::new()
        .with_heap_limit(512)
        .with_gc_threshold(16)
        .with_max_string_length(64)
        .with_max_frames(9)
        .with_retain_stack_traces(true);

    assert_eq!(
        engine.config(),
        &EngineConfig {
            heap_limit: Some(512),
            gc_threshold: 16,
            max_string_length: 64,
            max_frames: 9,
            retain_stack_traces: true,
        }
    );
}
