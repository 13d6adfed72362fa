#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

use stalecheck::filter::{Filter, PathPattern, SkipCondition};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Owned path list from string literals.
pub fn paths(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Filter with no skip condition.
pub fn filter(name: &str, files: &[&str]) -> Filter {
    Filter::new(
        name,
        files.iter().copied().map(PathPattern::new).collect(),
        None,
    )
    .expect("valid filter")
}

/// Filter with a skip condition.
pub fn filter_with_skip(name: &str, files: &[&str], skip: &[&str]) -> Filter {
    Filter::new(
        name,
        files.iter().copied().map(PathPattern::new).collect(),
        Some(SkipCondition::new(
            skip.iter().copied().map(PathPattern::new).collect(),
        )),
    )
    .expect("valid filter")
}
