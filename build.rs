//! Build script for annotrack
//!
//! Stamps build time, commit and compiler into the environment read by
//! `annotrack::build_info()`.

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let built_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs().to_string())
        .unwrap_or_default();

    // docs.rs builds without git or a usable rustc on PATH
    let docs_rs = std::env::var_os("DOCS_RS").is_some();
    let commit = stamp(docs_rs, "git", &["rev-parse", "--short", "HEAD"]);
    let compiler = stamp(docs_rs, "rustc", &["--version"]);

    for (key, value) in [
        ("BUILD_TIME", built_at.as_str()),
        ("GIT_HASH", commit.as_str()),
        ("RUST_VERSION", compiler.as_str()),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }

    for path in [".git/HEAD", ".git/refs/heads/", "Cargo.toml"] {
        println!("cargo:rerun-if-changed={}", path);
    }
}

/// First line of a tool's stdout, or `unknown`
fn stamp(skip: bool, program: &str, args: &[&str]) -> String {
    if skip {
        return "unknown".to_string();
    }

    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .and_then(|text| text.lines().next().map(|line| line.trim().to_string()))
        .filter(|line| !line.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
