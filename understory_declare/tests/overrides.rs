// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for temporary property overrides.
//!
//! Every override snapshots the readable state of an object and must put it
//! back on every exit path, including panics and nested overrides.

mod common;

use std::panic::{AssertUnwindSafe, catch_unwind};

use common::Widget;
use understory_declare::{ConfigError, ConfigurableExt, Policy, PropertyBundle, Value};

fn widget() -> Widget {
    let mut widget = Widget::default();
    widget
        .declare_properties(
            &PropertyBundle::new()
                .with("size", 10)
                .with("title", "Base")
                .with("color", "#112233"),
        )
        .unwrap();
    widget
}

#[test]
fn scoped_override_round_trips() {
    let mut widget = widget();
    let before = widget.get_properties("");
    {
        let guard = widget
            .scoped(&PropertyBundle::new().with("size", 99).with("title", "Tmp"))
            .unwrap();
        assert_eq!(guard.size, 99);
        assert_eq!(
            guard.get_property("title").unwrap(),
            Some(Value::from("Tmp"))
        );
        assert_eq!(guard.overrides.depth(), 1);
    }
    assert_eq!(widget.size, 10);
    assert_eq!(widget.title, "Base");
    assert_eq!(widget.get_properties(""), before);
    assert!(widget.overrides.is_empty());
}

#[test]
fn with_properties_returns_the_body_result() {
    let mut widget = widget();
    let seen = widget
        .with_properties(&PropertyBundle::new().with("template", "big"), |w| w.size)
        .unwrap();
    assert_eq!(seen, 50);
    assert_eq!(widget.size, 10);
}

#[test]
fn panicking_body_still_restores() {
    let mut widget = widget();
    let result = catch_unwind(AssertUnwindSafe(|| {
        widget
            .with_properties(&PropertyBundle::new().with("size", 77), |w| {
                assert_eq!(w.size, 77);
                panic!("body failed");
            })
            .unwrap();
    }));
    assert!(result.is_err());
    assert_eq!(widget.size, 10);
    assert!(widget.overrides.is_empty());
}

#[test]
fn nested_overrides_restore_in_order() {
    let mut widget = widget();
    {
        let mut outer = widget
            .scoped(&PropertyBundle::new().with("size", 20))
            .unwrap();
        {
            let inner = outer
                .scoped(&PropertyBundle::new().with("size", 30).with("title", "Inner"))
                .unwrap();
            assert_eq!(inner.size, 30);
            assert_eq!(inner.overrides.depth(), 2);
        }
        assert_eq!(outer.size, 20);
        assert_eq!(outer.title, "Base");
        outer.finish().unwrap();
    }
    assert_eq!(widget.size, 10);
}

#[test]
fn explicit_begin_and_end() {
    let mut widget = widget();
    widget
        .begin_override(&PropertyBundle::new().with("size", 1), Policy::Strict)
        .unwrap();
    widget
        .begin_override(&PropertyBundle::new().with("size", 2), Policy::Strict)
        .unwrap();
    assert_eq!(widget.size, 2);
    assert!(widget.end_override().unwrap());
    assert_eq!(widget.size, 1);
    assert!(widget.end_override().unwrap());
    assert_eq!(widget.size, 10);
    assert!(!widget.end_override().unwrap());
}

#[test]
fn rejected_override_leaves_no_snapshot() {
    let mut widget = widget();
    let err = widget
        .scoped(&PropertyBundle::new().with("size", "huge"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidArgument { .. }));
    assert_eq!(widget.size, 10);
    assert!(widget.overrides.is_empty());

    // The lenient variant accepts the same bundle as a no-op.
    widget
        .begin_override(&PropertyBundle::new().with("size", "huge"), Policy::Lenient)
        .unwrap();
    assert_eq!(widget.overrides.depth(), 1);
    assert!(widget.end_override().unwrap());
}

#[test]
fn settable_only_properties_are_not_restored() {
    let mut widget = widget();
    widget
        .with_properties(
            &PropertyBundle::new().with("range", Value::from(vec![1.0, 2.0])),
            |w| assert_eq!(w.range, (1.0, 2.0)),
        )
        .unwrap();
    // `range` has no getter, so it keeps the override.
    assert_eq!(widget.range, (1.0, 2.0));
}

#[test]
fn unset_properties_are_unset_again() {
    let mut widget = Widget::default();
    assert_eq!(widget.color, None);
    widget
        .with_properties(&PropertyBundle::new().with("color", "#ff0000"), |w| {
            assert!(w.color.is_some());
        })
        .unwrap();
    assert_eq!(widget.color, None);
    assert_eq!(widget.get_property("color").unwrap(), None);
}

#[test]
fn reset_property_uses_the_latest_snapshot() {
    let mut widget = widget();
    assert!(!widget.reset_property("size").unwrap());

    widget
        .begin_override(
            &PropertyBundle::new().with("size", 1).with("title", "Tmp"),
            Policy::Strict,
        )
        .unwrap();
    assert!(widget.reset_property("SIZE").unwrap());
    assert_eq!(widget.size, 10);
    assert_eq!(widget.title, "Tmp");
    // Settable-only properties are not in the snapshot.
    assert!(!widget.reset_property("range").unwrap());
    assert!(!widget.reset_property("bogus").unwrap());
    assert_eq!(widget.overrides.depth(), 1);

    assert!(widget.end_override().unwrap());
    assert_eq!(widget.title, "Base");
}
