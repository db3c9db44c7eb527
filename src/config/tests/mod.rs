//! Unit tests for config module
//!
//! Defaults, TOML parsing and schema generation. File loading goes through
//! a temporary directory.

#![allow(clippy::panic, clippy::unwrap_used)]

use std::{fs, time::Duration};

use crate::{
    config::{ConfigError, LogLevel, NowPlayingConfig},
    services::now_playing::{CategoryOptions, SessionCategory, SessionMode},
};

#[test]
fn empty_toml_yields_defaults() {
    let config = NowPlayingConfig::from_toml_str("").unwrap();

    assert_eq!(config, NowPlayingConfig::default());
    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.session.category, SessionCategory::Playback);
    assert_eq!(config.session.mode, SessionMode::Default);
    assert!(config.session.category_options().is_empty());
    assert_eq!(config.bridge.handler_timeout(), Duration::from_secs(5));
    assert_eq!(config.commands.skip_intervals, vec![15.0]);
    assert_eq!(config.commands.playback_rates, vec![0.5, 1.0, 1.5, 2.0]);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = NowPlayingConfig::from_toml_str(
        r#"
        [session]
        mode = "spoken_audio"
        options = ["allow_air_play", "duck_others"]

        [bridge]
        handler_timeout_ms = 250
        "#,
    )
    .unwrap();

    assert_eq!(config.session.category, SessionCategory::Playback);
    assert_eq!(config.session.mode, SessionMode::SpokenAudio);
    assert_eq!(
        config.session.category_options(),
        CategoryOptions::ALLOW_AIR_PLAY | CategoryOptions::DUCK_OTHERS
    );
    assert_eq!(config.bridge.handler_timeout(), Duration::from_millis(250));
    assert_eq!(config.commands.skip_intervals, vec![15.0]);
}

#[test]
fn unknown_log_level_is_rejected() {
    let err = NowPlayingConfig::from_toml_str(
        r#"
        [general]
        log_level = "loud"
        "#,
    )
    .unwrap_err();

    let ConfigError::TomlParse { location, .. } = err else {
        panic!("expected a parse error");
    };
    assert_eq!(location, "string");
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nowplaying.toml");
    fs::write(
        &path,
        r#"
        [general]
        log_level = "trace"

        [commands]
        skip_intervals = [10.0, 30.0]
        "#,
    )
    .unwrap();

    let config = NowPlayingConfig::load(&path).unwrap();

    assert_eq!(config.general.log_level, LogLevel::Trace);
    assert_eq!(config.commands.skip_intervals, vec![10.0, 30.0]);
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let err = NowPlayingConfig::load(&path).unwrap_err();

    assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
}

#[test]
fn load_reports_file_location_on_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[session\ncategory = ").unwrap();

    let err = NowPlayingConfig::load(&path).unwrap_err();

    let ConfigError::TomlParse { location, .. } = err else {
        panic!("expected a parse error");
    };
    assert!(location.ends_with("broken.toml"));
}

#[test]
fn serialized_defaults_parse_back() {
    let original = NowPlayingConfig::default();

    let toml_str = toml::to_string(&original).unwrap();
    let parsed = NowPlayingConfig::from_toml_str(&toml_str).unwrap();

    assert!(toml_str.contains("[session]"));
    assert_eq!(parsed, original);
}

#[test]
fn schema_lists_sections() {
    let schema = serde_json::to_value(NowPlayingConfig::json_schema()).unwrap();

    let properties = schema["properties"].as_object().unwrap();
    for section in ["general", "session", "bridge", "commands"] {
        assert!(properties.contains_key(section), "missing {section}");
    }
}
