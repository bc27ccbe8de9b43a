//! End-to-end tests for markup-aware wrapping.
//!
//! Run with: RUST_LOG=debug cargo test --test e2e_wrap -- --nocapture

mod common;

use adaptive_table::markup::{self, MarkupError};
use adaptive_table::wrap::{wrap, wrap_plain};
use common::assertions::{assert_eq_logged, assert_ok_logged};
use common::init_test_logging;

fn assert_lines_valid(output: &str) {
    for line in output.split('\n') {
        assert_ok_logged(line, markup::validate(line));
    }
}

#[test]
fn e2e_wrap_plain_words() {
    init_test_logging();
    tracing::info!("Starting E2E plain wrap test");

    assert_eq_logged("hello world", wrap("hello world", 5).as_str(), "hello\nworld");

    tracing::info!("E2E plain wrap test PASSED");
}

#[test]
fn e2e_wrap_style_reopened_after_break() {
    init_test_logging();
    tracing::info!("Starting E2E style reopen test");

    let output = wrap("<info>hello world</info>", 5);
    tracing::debug!(output = %output, "Wrapped");

    assert_eq_logged(
        "info span",
        output.as_str(),
        "<info>hello</info>\n<info>world</info>",
    );
    assert_lines_valid(&output);

    tracing::info!("E2E style reopen test PASSED");
}

#[test]
fn e2e_wrap_nested_styles() {
    init_test_logging();

    let input = "<error>all <options=bold>systems failing</> now</error>";
    let output = wrap(input, 8);
    tracing::debug!(output = %output, "Wrapped");

    assert_eq!(markup::strip(&output), "all\nsystems\nfailing\nnow");
    assert_lines_valid(&output);
}

#[test]
fn e2e_wrap_short_text_unchanged() {
    init_test_logging();

    for input in [
        "short",
        "<info>ok</info>",
        "<fg=red;options=bold>x</>",
        "two\nlines",
        "trailing   ",
    ] {
        assert_eq_logged(input, wrap(input, 20).as_str(), input);
    }
}

#[test]
fn e2e_wrap_tag_between_words() {
    init_test_logging();

    let output = wrap("alpha <comment>beta gamma</comment>", 6);
    tracing::debug!(output = %output, "Wrapped");

    assert_eq!(markup::strip(&output), wrap_plain("alpha beta gamma", 6));
    assert!(output.starts_with("alpha\n<comment>beta"), "got {output:?}");
    assert_lines_valid(&output);
}

#[test]
fn e2e_wrap_existing_newlines_rebalanced() {
    init_test_logging();

    let output = wrap("<info>first line is long\nsecond</info>", 10);
    tracing::debug!(output = %output, "Wrapped");

    assert_eq!(markup::strip(&output), "first line\nis long\nsecond");
    assert_lines_valid(&output);
}

#[test]
fn e2e_wrap_escaped_brackets() {
    init_test_logging();

    let output = wrap("a \\<tag> b c", 4);
    tracing::debug!(output = %output, "Wrapped");

    assert_eq!(markup::strip(&output), wrap_plain("a <tag> b c", 4));
    assert!(output.contains("\\<"), "escape lost: {output:?}");
}

#[test]
fn e2e_wrap_degenerate_width() {
    init_test_logging();

    assert_eq!(wrap("ab cd", 0), "a\nb\nc\nd");
    assert_eq!(wrap("", 5), "");
}

#[test]
fn e2e_wrap_does_not_validate() {
    init_test_logging();

    let malformed = "<info>unclosed text that wraps";
    let output = wrap(malformed, 10);
    assert_eq!(markup::strip(&output), wrap_plain("unclosed text that wraps", 10));
    assert!(matches!(
        markup::validate(malformed),
        Err(MarkupError::UnclosedTag(ref name)) if name == "info"
    ));
}

#[test]
fn e2e_escape_then_wrap() {
    init_test_logging();

    let user_text = "<b> is not a tag here";
    let escaped = markup::escape(user_text);
    assert_ok_logged("escaped", markup::validate(&escaped));

    let output = wrap(&escaped, 10);
    assert_eq!(markup::strip(&output), wrap_plain(user_text, 10));
}
