#![forbid(
    dead_code,
    deprecated,
    future_incompatible,
    missing_copy_implementations,
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused,
    unsafe_code,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used
)]

fn set_git_hash() {
    use std::process::Command;
    if let Ok(hash) = std::env::var("LYRA_BUILD_GIT_HASH") {
        if hash == "skip" {
            println!("cargo:rustc-env=LYRA_BUILD_GIT_HASH=");
        } else {
            println!("cargo:rustc-env=LYRA_BUILD_GIT_HASH= (rev {hash})");
        }
        return;
    }
    let args = &["rev-parse", "--short", "HEAD"];
    let hash = Command::new("git")
        .args(args)
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_default();
    // the version string is assembled with env!, so the variable must exist
    // even outside a git checkout.
    if hash.is_empty() {
        println!("cargo:rustc-env=LYRA_BUILD_GIT_HASH=");
    } else {
        println!("cargo:rustc-env=LYRA_BUILD_GIT_HASH= (rev {hash})");
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed=LYRA_BUILD_GIT_HASH");
    println!("cargo:rerun-if-changed=build.rs");
    set_git_hash();
}
