//! Common test utilities and logging infrastructure
//!
//! Integration tests share structured logging through the `tracing` crate,
//! a few table-building helpers, and environment guards.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::init_test_logging;
//!
//! #[test]
//! fn my_test() {
//!     init_test_logging();
//!     // test code...
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG=debug` - Enable debug logging in tests
//! - `RUST_LOG=adaptive_table::layout=trace` - Per-column measurements
//! - `TEST_LOG_JSON=1` - Output JSON format for CI parsing
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

pub mod assertions;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use adaptive_table::console::Console;
use adaptive_table::renderables::{AdaptiveTable, Row};

static INIT: Once = Once::new();

/// Initialize test logging infrastructure.
///
/// Output goes through the test writer, so it is captured unless
/// `--nocapture` is given. Calling this more than once is harmless.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let use_json = std::env::var("TEST_LOG_JSON").is_ok();

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("adaptive_table=debug,test=info"));

        if use_json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_test_writer())
                .try_init()
                .ok();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_test_writer()
                        .with_ansi(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_thread_ids(true)
                        .with_target(true)
                        .compact(),
                )
                .try_init()
                .ok();
        }
    });
}

/// A test span guard that logs entry.
pub fn test_phase(name: &str) -> tracing::span::EnteredSpan {
    let span = tracing::info_span!("test_phase", phase = name);
    tracing::info!(phase = name, "entering test phase");
    span.entered()
}

/// Log test context information.
pub fn log_test_context(test_name: &str, description: &str) {
    tracing::info!(
        test_name = test_name,
        description = description,
        "test context"
    );
}

/// Render rows through an ASCII table of the given width, without color.
pub fn render_ascii(headers: Vec<Row>, rows: Vec<Row>, max_width: usize) -> String {
    let mut console = Console::new(Vec::new());
    let mut table = AdaptiveTable::builder()
        .max_width(max_width)
        .box_style("ascii")
        .build(&mut console);
    table.set_headers(headers).expect("valid headers");
    table.add_rows(rows).expect("valid rows");
    table.render().expect("render succeeds");
    drop(table);
    String::from_utf8(console.into_inner()).expect("utf-8 output")
}

/// Run a closure with an environment variable set, restoring it afterwards.
///
/// Callers must be `#[serial]`.
pub fn with_env_var<F, R>(key: &str, value: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let original = std::env::var(key).ok();
    // SAFETY: Test-only code, serialized with `#[serial]`
    unsafe { std::env::set_var(key, value) };

    let result = f();

    // SAFETY: Test-only code, serialized with `#[serial]`
    match original {
        Some(v) => unsafe { std::env::set_var(key, v) },
        None => unsafe { std::env::remove_var(key) },
    }

    result
}

/// Run a closure with an environment variable removed, restoring it afterwards.
///
/// Callers must be `#[serial]`.
pub fn without_env_var<F, R>(key: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let original = std::env::var(key).ok();
    // SAFETY: Test-only code, serialized with `#[serial]`
    unsafe { std::env::remove_var(key) };

    let result = f();

    if let Some(v) = original {
        // SAFETY: Test-only code, serialized with `#[serial]`
        unsafe { std::env::set_var(key, v) };
    }

    result
}
