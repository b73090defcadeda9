//! Stamps the binary with the commit, build time and profile shown in the
//! startup banner.
//!
//! `SOURCE_DATE_EPOCH` pins the build time for reproducible builds.

use std::env;
use std::process::Command;

use chrono::{DateTime, SecondsFormat, Utc};

fn main() {
    let stamps = [
        ("BUILD_COMMIT", git_describe().unwrap_or_else(|| "unknown".into())),
        ("BUILD_TIMESTAMP", build_time().to_rfc3339_opts(SecondsFormat::Secs, true)),
        ("BUILD_PROFILE", env::var("PROFILE").unwrap_or_else(|_| "unknown".into())),
    ];
    for (key, value) in stamps {
        println!("cargo:rustc-env={key}={value}");
    }

    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=../.git/HEAD");
}

/// Commit id with a `-dirty` suffix for uncommitted changes
fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    (!described.is_empty()).then(|| described.to_string())
}

fn build_time() -> DateTime<Utc> {
    env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now)
}
