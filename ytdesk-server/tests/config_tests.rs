//! Environment-variable configuration tests
//!
//! These mutate process environment, so they run serially.

use clap::Parser;
use serial_test::serial;
use std::env;
use ytdesk_common::config::TomlConfig;
use ytdesk_server::config::{Args, ServerConfig};
use ytdesk_server::youtube::Credentials;

const VARS: [&str; 6] = [
    "PORT",
    "YOUTUBE_API_KEY",
    "YOUTUBE_ACCESS_TOKEN",
    "ALLOWED_ORIGINS",
    "DATABASE_URL",
    "YTDESK_BIND",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_env_vars_are_read() {
    clear_env();
    env::set_var("PORT", "7070");
    env::set_var("YOUTUBE_API_KEY", "env-key");
    env::set_var("YOUTUBE_ACCESS_TOKEN", "ya29.env");
    env::set_var("ALLOWED_ORIGINS", "https://desk.example.com, https://*.vercel.app");
    env::set_var("DATABASE_URL", "sqlite::memory:");

    let args = Args::parse_from(["ytdesk-server"]);
    let config = ServerConfig::resolve(args, TomlConfig::default()).unwrap();

    assert_eq!(config.listen_addr.port(), 7070);
    assert_eq!(config.youtube.api_key.as_deref(), Some("env-key"));
    assert_eq!(config.youtube.credentials, Credentials::Static("ya29.env".into()));
    assert_eq!(
        config.allowed_origins,
        vec!["https://desk.example.com", "https://*.vercel.app"]
    );
    assert_eq!(config.database_url, "sqlite::memory:");

    clear_env();
}

#[test]
#[serial]
fn test_flag_beats_env() {
    clear_env();
    env::set_var("PORT", "7070");

    let args = Args::parse_from(["ytdesk-server", "--port", "6060", "--bind", "127.0.0.1"]);
    let config = ServerConfig::resolve(args, TomlConfig::default()).unwrap();
    assert_eq!(config.listen_addr.to_string(), "127.0.0.1:6060");

    clear_env();
}

#[test]
#[serial]
fn test_env_beats_toml() {
    clear_env();
    env::set_var("YOUTUBE_API_KEY", "env-key");

    let toml: TomlConfig = toml::from_str(
        r#"
        port = 8081

        [youtube]
        api_key = "toml-key"
        "#,
    )
    .unwrap();

    let args = Args::parse_from(["ytdesk-server"]);
    let config = ServerConfig::resolve(args, toml).unwrap();
    assert_eq!(config.listen_addr.port(), 8081);
    assert_eq!(config.youtube.api_key.as_deref(), Some("env-key"));

    clear_env();
}
