// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn styles_returns_plain_when_no_color() {
    std::env::set_var("NO_COLOR", "1");
    std::env::remove_var("COLOR");

    let debug = format!("{:?}", styles());
    assert_eq!(debug, format!("{:?}", Styles::plain()));
}

#[test]
#[serial]
fn styles_returns_styled_when_color_forced() {
    std::env::remove_var("NO_COLOR");
    std::env::set_var("COLOR", "1");

    let debug = format!("{:?}", styles());
    assert_ne!(debug, format!("{:?}", Styles::plain()));
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn helpers_wrap_in_their_color() {
    std::env::remove_var("NO_COLOR");
    std::env::set_var("COLOR", "1");

    let cases: [(fn(&str) -> String, u8); 4] = [
        (header, codes::HEADER),
        (literal, codes::LITERAL),
        (context, codes::CONTEXT),
        (muted, codes::MUTED),
    ];
    for (paint_fn, code) in cases {
        let result = paint_fn("foo");
        assert!(result.starts_with(&format!("\x1b[38;5;{code}m")));
        assert!(result.contains("foo"));
        assert!(result.ends_with("\x1b[0m"));
    }
    std::env::remove_var("COLOR");
}

#[test]
#[serial]
fn no_color_leaves_text_untouched() {
    std::env::set_var("NO_COLOR", "1");
    assert_eq!(literal("plain"), "plain");
    std::env::remove_var("NO_COLOR");
}
