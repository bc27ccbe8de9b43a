//! Terminal detection.
//!
//! Tables resolve the terminal width once, when they are built. `COLUMNS`
//! takes precedence over the size reported by the terminal so that output
//! can be sized explicitly in pipelines and tests.

use std::io::IsTerminal;

/// Width used when no terminal size can be determined.
pub const DEFAULT_WIDTH: usize = 80;

struct EnvSettings {
    columns: Option<String>,
    no_color: Option<String>,
    force_color: Option<String>,
    term: Option<String>,
}

fn read_env_settings() -> EnvSettings {
    EnvSettings {
        columns: std::env::var("COLUMNS").ok(),
        no_color: std::env::var("NO_COLOR").ok(),
        force_color: std::env::var("FORCE_COLOR").ok(),
        term: std::env::var("TERM").ok(),
    }
}

/// Get the terminal size (width, height) in cells.
///
/// Returns `None` if the terminal size cannot be determined.
#[must_use]
pub fn get_terminal_size() -> Option<(usize, usize)> {
    crossterm::terminal::size()
        .ok()
        .filter(|&(w, _)| w > 0)
        .map(|(w, h)| (w as usize, h as usize))
}

/// Get the terminal width in cells.
///
/// `COLUMNS` wins when it holds a positive integer; otherwise the size
/// reported by the terminal is used, falling back to 80.
#[must_use]
pub fn get_terminal_width() -> usize {
    width_with(&read_env_settings(), get_terminal_size().map(|(w, _)| w))
}

fn width_with(env: &EnvSettings, detected: Option<usize>) -> usize {
    env.columns
        .as_deref()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&width| width > 0)
        .or(detected)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Check if stdout is connected to a terminal.
///
/// A non-empty `FORCE_COLOR` other than `0` counts as a terminal.
#[must_use]
pub fn is_terminal() -> bool {
    if force_color(&read_env_settings()) {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn force_color(env: &EnvSettings) -> bool {
    env.force_color
        .as_deref()
        .map(str::trim)
        .is_some_and(|value| !value.is_empty() && value != "0")
}

/// Whether styled output should carry ANSI escape codes.
///
/// Disabled by a non-empty `NO_COLOR`, by `TERM=dumb`, and when stdout is not
/// a terminal.
#[must_use]
pub fn color_enabled() -> bool {
    let env = read_env_settings();
    color_enabled_with(&env, force_color(&env) || std::io::stdout().is_terminal())
}

fn color_enabled_with(env: &EnvSettings, is_tty: bool) -> bool {
    if env.no_color.as_deref().is_some_and(|value| !value.is_empty()) {
        return false;
    }
    let dumb = env
        .term
        .as_deref()
        .is_some_and(|term| matches!(term.trim().to_lowercase().as_str(), "dumb" | "unknown"));
    is_tty && !dumb
}
