use super::{settings_from_sources, Settings};

use std::{collections::HashMap, path::PathBuf};

use directory::config::{PLACEHOLDER_KEY, PLACEHOLDER_URL};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn defaults_use_placeholder_directory() {
    let settings = settings_from_sources(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.server_bind, "127.0.0.1:5000");
    assert_eq!(settings.directory.directory_url, PLACEHOLDER_URL);
    assert_eq!(settings.directory.directory_key, PLACEHOLDER_KEY);
    assert!(!settings.directory.is_configured());
}

#[test]
fn settings_file_overrides_defaults() {
    let file = r#"
        bind_addr = "0.0.0.0:8080"
        static_dir = "web/dist"
        directory_url = "https://db.example.com"
        directory_key = "anon"
    "#;
    let settings = settings_from_sources(Some(file), env_from(&[]));
    assert_eq!(settings.server_bind, "0.0.0.0:8080");
    assert_eq!(settings.static_dir, PathBuf::from("web/dist"));
    assert!(settings.directory.is_configured());
}

#[test]
fn environment_overrides_settings_file() {
    let file = r#"directory_url = "https://file.example.com""#;
    let settings = settings_from_sources(
        Some(file),
        env_from(&[
            ("DIRECTORY_URL", "https://env.example.com"),
            ("DIRECTORY_KEY", "env-key"),
        ]),
    );
    assert_eq!(settings.directory.directory_url, "https://env.example.com");
    assert_eq!(settings.directory.directory_key, "env-key");
}

#[test]
fn prefixed_variables_win_over_bare_ones() {
    let settings = settings_from_sources(
        None,
        env_from(&[
            ("PORT", "9000"),
            ("SERVER_BIND", "127.0.0.1:7000"),
            ("APP__BIND_ADDR", "127.0.0.1:7001"),
            ("STATIC_DIR", "a"),
            ("APP__STATIC_DIR", "b"),
            ("DIRECTORY_KEY", "bare"),
            ("APP__DIRECTORY_KEY", "prefixed"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:7001");
    assert_eq!(settings.static_dir, PathBuf::from("b"));
    assert_eq!(settings.directory.directory_key, "prefixed");
}

#[test]
fn port_binds_all_interfaces() {
    let settings = settings_from_sources(None, env_from(&[("PORT", "8081")]));
    assert_eq!(settings.server_bind, "0.0.0.0:8081");
}

#[test]
fn blank_variables_are_ignored() {
    let settings = settings_from_sources(
        None,
        env_from(&[("DIRECTORY_URL", "  "), ("SERVER_BIND", "")]),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn malformed_settings_file_is_ignored() {
    let settings = settings_from_sources(Some("bind_addr = ["), env_from(&[]));
    assert_eq!(settings, Settings::default());
}
