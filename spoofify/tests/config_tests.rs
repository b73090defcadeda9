//! Command line / environment configuration tests
//!
//! Note: Uses serial_test to prevent ENV variable race conditions.

use serial_test::serial;
use std::env;
use std::net::SocketAddr;

use clap::Parser;
use spoofify::config::{Args, ServiceConfig};
use spoofify_common::config::TomlConfig;

const VARS: [&str; 5] = [
    "SPOOFIFY_CONFIG",
    "SPOOFIFY_LLAMA_URL",
    "SPOOFIFY_GENRE_URL",
    "SPOOFIFY_BIND_ADDR",
    "SPOOFIFY_RENDER_HTML",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_env_supplies_llama_url() {
    clear_env();
    env::set_var("SPOOFIFY_LLAMA_URL", "http://env-host:11434");

    let args = Args::try_parse_from(["spoofify"]).unwrap();
    let config = ServiceConfig::resolve(&args, &TomlConfig::default());
    clear_env();

    assert_eq!(config.unwrap().llama_url, "http://env-host:11434");
}

#[test]
#[serial]
fn test_flag_beats_env() {
    clear_env();
    env::set_var("SPOOFIFY_LLAMA_URL", "http://env-host:11434");

    let args = Args::try_parse_from(["spoofify", "--llama-url", "http://flag-host:11434"]).unwrap();
    clear_env();

    assert_eq!(args.llama_url.as_deref(), Some("http://flag-host:11434"));
}

#[test]
#[serial]
fn test_env_beats_toml() {
    clear_env();
    env::set_var("SPOOFIFY_RENDER_HTML", "false");
    env::set_var("SPOOFIFY_BIND_ADDR", "0.0.0.0:8000");

    let args = Args::try_parse_from(["spoofify"]).unwrap();
    clear_env();

    let toml_config = TomlConfig {
        llama_url: Some("http://toml-host:11434".into()),
        bind_addr: Some("127.0.0.1:9000".into()),
        render_html: Some(true),
        ..TomlConfig::default()
    };
    let config = ServiceConfig::resolve(&args, &toml_config).unwrap();

    assert_eq!(config.llama_url, "http://toml-host:11434");
    assert_eq!(config.bind_addr, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
    assert!(!config.render_html);
}

#[test]
#[serial]
fn test_render_html_flag_takes_value() {
    clear_env();

    let args = Args::try_parse_from(["spoofify", "--render-html", "false"]).unwrap();
    assert_eq!(args.render_html, Some(false));

    assert!(Args::try_parse_from(["spoofify", "--render-html", "maybe"]).is_err());
}

#[test]
#[serial]
fn test_nothing_configured_fails() {
    clear_env();

    let args = Args::try_parse_from(["spoofify"]).unwrap();
    assert!(ServiceConfig::resolve(&args, &TomlConfig::default()).is_err());
}
