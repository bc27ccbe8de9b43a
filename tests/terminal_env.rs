//! Environment-driven terminal detection.
//!
//! These tests mutate process environment variables, so each one is
//! serialized with `#[serial]`.

mod common;

use adaptive_table::console::Console;
use adaptive_table::renderables::AdaptiveTable;
use adaptive_table::terminal::{self, DEFAULT_WIDTH};
use common::{init_test_logging, with_env_var, without_env_var};
use serial_test::serial;

#[test]
#[serial]
fn columns_overrides_terminal_width() {
    init_test_logging();

    with_env_var("COLUMNS", "37", || {
        assert_eq!(terminal::get_terminal_width(), 37);
    });
}

#[test]
#[serial]
fn columns_is_trimmed() {
    init_test_logging();

    with_env_var("COLUMNS", " 120 ", || {
        assert_eq!(terminal::get_terminal_width(), 120);
    });
}

#[test]
#[serial]
fn invalid_columns_is_ignored() {
    init_test_logging();

    for value in ["abc", "0", "-5", ""] {
        with_env_var("COLUMNS", value, || {
            let width = terminal::get_terminal_width();
            tracing::debug!(value, width, "width with invalid COLUMNS");
            assert!(width > 0);
            if terminal::get_terminal_size().is_none() {
                assert_eq!(width, DEFAULT_WIDTH);
            }
        });
    }
}

#[test]
#[serial]
fn table_resolves_width_at_construction() {
    init_test_logging();

    let mut console = Console::new(Vec::new());
    let sink = &mut console;
    let table = with_env_var("COLUMNS", "42", move || AdaptiveTable::new(sink));

    // Changing COLUMNS later does not affect a built table.
    with_env_var("COLUMNS", "100", || {
        assert_eq!(table.max_width(), 42);
    });
}

#[test]
#[serial]
fn explicit_max_width_ignores_columns() {
    init_test_logging();

    with_env_var("COLUMNS", "42", || {
        let mut console = Console::new(Vec::new());
        let table = AdaptiveTable::builder().max_width(64).build(&mut console);
        assert_eq!(table.max_width(), 64);
    });
}

#[test]
#[serial]
fn no_color_disables_styling() {
    init_test_logging();

    with_env_var("FORCE_COLOR", "1", || {
        with_env_var("NO_COLOR", "1", || {
            assert!(!terminal::color_enabled());
            assert!(!Console::stdout().is_color_enabled());
        });
    });
}

#[test]
#[serial]
fn force_color_enables_styling() {
    init_test_logging();

    with_env_var("FORCE_COLOR", "1", || {
        without_env_var("NO_COLOR", || {
            with_env_var("TERM", "xterm-256color", || {
                assert!(terminal::is_terminal());
                assert!(terminal::color_enabled());
                assert!(Console::stdout().is_color_enabled());
            });
        });
    });
}

#[test]
#[serial]
fn dumb_terminal_disables_styling() {
    init_test_logging();

    with_env_var("FORCE_COLOR", "1", || {
        without_env_var("NO_COLOR", || {
            with_env_var("TERM", "dumb", || {
                assert!(!terminal::color_enabled());
            });
        });
    });
}

#[test]
#[serial]
fn force_color_zero_is_not_forced() {
    init_test_logging();

    with_env_var("FORCE_COLOR", "0", || {
        assert_eq!(
            terminal::is_terminal(),
            std::io::IsTerminal::is_terminal(&std::io::stdout())
        );
    });
}
