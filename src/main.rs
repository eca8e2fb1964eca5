#![deny(
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
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used
)]

use clap::Parser;
use tracing_subscriber::EnvFilter;

const EXPANDED_VERSION: &str = concat!(
    "v",
    env!("CARGO_PKG_VERSION"),
    env!("LYRA_BUILD_GIT_HASH")
);

mod cli;
mod config;
mod error;
mod util;
mod vectors;

use cli::Cli;

// the matrix is a single large allocation per derivation. musl's allocator
// handles that noticeably worse than glibc's, so musl builds use jemalloc.
// jemalloc doesn't support i686, hence the pointer width check.
#[cfg(all(target_env = "musl", target_pointer_width = "64"))]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() -> Result<(), error::Context> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli.run()
}
