//! Logged assertion helpers for adaptive_table tests.
//!
//! These wrap standard assertions with tracing logs, so a failure in CI
//! comes with the values that were compared.

#![allow(dead_code)]

use std::fmt::Debug;

use adaptive_table::cells::cell_len;
use adaptive_table::markup::strip;

/// Assert equality with detailed logging.
#[track_caller]
pub fn assert_eq_logged<T: PartialEq + Debug>(context: &str, actual: T, expected: T) {
    tracing::debug!(
        context = context,
        expected = ?expected,
        actual = ?actual,
        "asserting equality"
    );

    if actual != expected {
        tracing::error!(
            context = context,
            expected = ?expected,
            actual = ?actual,
            "assertion failed: values not equal"
        );
    }

    assert_eq!(
        actual, expected,
        "{context}: expected {expected:?}, got {actual:?}"
    );
}

/// Assert that a value is true with logging.
#[track_caller]
pub fn assert_true_logged(context: &str, value: bool) {
    tracing::debug!(context = context, value = value, "asserting true");
    if !value {
        tracing::error!(context = context, "assertion failed: expected true");
    }
    assert!(value, "{context}: expected true, got false");
}

/// Assert that a Result is Ok, returning the value.
#[track_caller]
pub fn assert_ok_logged<T: Debug, E: Debug>(context: &str, result: Result<T, E>) -> T {
    tracing::debug!(context = context, result = ?result, "asserting Ok");
    match result {
        Ok(value) => value,
        Err(ref e) => {
            tracing::error!(context = context, error = ?e, "assertion failed: expected Ok, got Err");
            panic!("{context}: expected Ok, got Err({e:?})");
        }
    }
}

/// Assert that a Result is Err, returning the error.
#[track_caller]
pub fn assert_err_logged<T: Debug, E: Debug>(context: &str, result: Result<T, E>) -> E {
    tracing::debug!(context = context, result = ?result, "asserting Err");
    match result {
        Err(e) => e,
        Ok(ref value) => {
            tracing::error!(context = context, value = ?value, "assertion failed: expected Err, got Ok");
            panic!("{context}: expected Err, got Ok({value:?})");
        }
    }
}

/// Assert that a string contains a substring.
#[track_caller]
pub fn assert_contains_logged(context: &str, haystack: &str, needle: &str) {
    tracing::debug!(context = context, needle = needle, "asserting contains");
    if !haystack.contains(needle) {
        tracing::error!(
            context = context,
            haystack = haystack,
            needle = needle,
            "assertion failed: substring not found"
        );
    }
    assert!(
        haystack.contains(needle),
        "{context}: expected to find {needle:?} in:\n{haystack}"
    );
}

/// Assert that every visible line of rendered output fits `width` cells.
#[track_caller]
pub fn assert_lines_fit(context: &str, output: &str, width: usize) {
    for (i, line) in output.lines().enumerate() {
        let visible = cell_len(&strip(line));
        if visible > width {
            tracing::error!(
                context = context,
                line = i,
                visible,
                width,
                "assertion failed: line too wide"
            );
        }
        assert!(
            visible <= width,
            "{context}: line {i} is {visible} cells wide, limit {width}:\n{output}"
        );
    }
}

/// Assert that all lines of rendered output have the same visible width.
#[track_caller]
pub fn assert_rectangular(context: &str, output: &str) {
    let widths: Vec<usize> = output.lines().map(|line| cell_len(&strip(line))).collect();
    tracing::debug!(context = context, widths = ?widths, "asserting rectangular output");
    assert!(
        widths.windows(2).all(|pair| pair[0] == pair[1]),
        "{context}: ragged lines {widths:?}:\n{output}"
    );
}
