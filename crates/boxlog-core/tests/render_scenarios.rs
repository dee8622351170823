//! End-to-end rendering scenarios
//!
//! Drive writers the way callers do and check the exact boxes that reach
//! the console.

mod common;

use boxlog_core::{BoxlogError, EngineConfig, Field, LoggerConfig, Logger, Scope};
use common::{logger, plain_engine, Capture};

// ============================================================================
// Basic Records
// ============================================================================

#[test]
fn test_error_with_two_fields() {
    let capture = Capture::default();
    let logger = logger(plain_engine(10));

    let mut w = logger.writer_with_console("job", false, capture.console());
    w.error(["boom", "retry=3"]).unwrap();
    w.close();

    assert_eq!(
        capture.box_lines(),
        vec![
            "┌──────────┬────────────┐",
            "│ error    │ boom       │",
            "├──────────┼────────────┤",
            "│          │ retry=3    │",
            "└──────────┴────────────┘",
        ]
    );
}

#[test]
fn test_long_field_wraps_with_blank_labels() {
    let capture = Capture::default();
    let logger = logger(plain_engine(10));

    let mut w = logger.writer_with_console("job", false, capture.console());
    w.info(["0123456789abcdefghij!"]).unwrap();
    drop(w);

    assert_eq!(
        capture.box_lines(),
        vec![
            "┌──────────┬────────────┐",
            "│ info     │ 0123456789 │",
            "│          │ abcdefghij │",
            "│          │ !          │",
            "└──────────┴────────────┘",
        ]
    );
}

#[test]
fn test_multiline_value_keeps_blank_rows() {
    let capture = Capture::default();
    let logger = logger(plain_engine(10));

    let mut w = logger.writer_with_console("job", false, capture.console());
    w.message(["a\n\nb"]).unwrap();
    w.close();

    let rows: Vec<_> = capture
        .box_lines()
        .into_iter()
        .filter(|l| l.starts_with('│'))
        .collect();
    assert_eq!(
        rows,
        vec![
            "│ message  │ a          │",
            "│          │            │",
            "│          │ b          │",
        ]
    );
}

#[test]
fn test_structured_value_is_pretty_printed() {
    #[derive(serde::Serialize)]
    struct Address {
        country: &'static str,
        city: &'static str,
    }

    let capture = Capture::default();
    let logger = logger(plain_engine(30));

    let mut w = logger.writer_with_console("job", false, capture.console());
    w.data([Field::value(&Address {
        country: "NL",
        city: "Utrecht",
    })
    .unwrap()])
        .unwrap();
    w.close();

    let text = capture.text();
    assert!(text.contains("│ data     │ {"));
    assert!(text.contains("│     \"city\": \"Utrecht\","));
    assert!(text.contains("│     \"country\": \"NL\""));
}

#[test]
fn test_every_line_has_the_same_width() {
    let capture = Capture::default();
    let logger = logger(plain_engine(20));

    let mut w = logger.writer_with_console("job", false, capture.console());
    w.warning(["short", "a much longer value that wraps twice", ""])
        .unwrap();
    w.close();

    let widths: Vec<_> = capture
        .box_lines()
        .iter()
        .map(|l| l.chars().count())
        .collect();
    assert!(widths.iter().all(|w| *w == widths[0]), "{:?}", widths);
}

// ============================================================================
// Writer Lifecycle
// ============================================================================

#[test]
fn test_start_and_end_lines() {
    let capture = Capture::default();
    let logger = logger(plain_engine(10));

    let w = logger.writer_with_console("repository.create", false, capture.console());
    w.close();

    let text = capture.text();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(":: START :: --->"));
    assert!(lines[0].contains("repository.create"));
    assert!(lines[1].starts_with("::  END  :: --->"));
}

#[test]
fn test_drop_closes_once() {
    let capture = Capture::default();
    let logger = logger(plain_engine(10));

    {
        let mut w = logger.writer_with_console("job", false, capture.console());
        w.info(["x"]).unwrap();
    }

    assert_eq!(capture.text().matches("::  END  ::").count(), 1);
}

#[test]
fn test_namespace_prefix() {
    let capture = Capture::default();
    let logger = Logger::with_remote(
        LoggerConfig {
            namespace: Some("api".into()),
            engine: plain_engine(10),
            ..LoggerConfig::default()
        },
        None,
    )
    .unwrap();

    let mut w = logger.writer_with_console("job", false, capture.console());
    w.info(["x"]).unwrap();
    w.close();

    for line in capture.text().lines() {
        assert!(line.starts_with("| api | "), "{}", line);
    }
}

#[test]
fn test_timestamp_prefix() {
    let capture = Capture::default();
    let engine = EngineConfig {
        timestamps: true,
        ..plain_engine(10)
    };
    let logger = logger(engine);

    let mut w = logger.writer_with_console("job", false, capture.console());
    w.info(["x"]).unwrap();
    w.close();

    for line in capture.text().lines() {
        // [YYYY-MM-DD HH:MM:SS]
        assert_eq!(&line[0..1], "[");
        assert_eq!(&line[20..22], "] ");
    }
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_empty_record_fails_without_output() {
    let capture = Capture::default();
    let logger = logger(plain_engine(10));

    let mut w = logger.writer_with_console("job", false, capture.console());
    let err = w.info(Vec::<&str>::new()).unwrap_err();
    w.close();

    assert!(matches!(err, BoxlogError::EmptyRecord));
    assert!(capture.box_lines().is_empty());
}

#[test]
fn test_empty_record_fails_even_with_context() {
    let capture = Capture::default();
    let logger = logger(plain_engine(10));

    let mut w = logger.writer_with_console("job", false, capture.console());
    w.from_scope(&Scope::new().attach(["req=42"]));
    assert!(matches!(
        w.debug(Vec::<String>::new()),
        Err(BoxlogError::EmptyRecord)
    ));
}

#[test]
fn test_unserializable_value_is_surfaced() {
    let mut map = std::collections::HashMap::new();
    map.insert(vec![1u8], "bytes as key");

    let err = Field::value(&map).unwrap_err();
    assert!(matches!(err, BoxlogError::Serialization(_)));
}

// ============================================================================
// Carried Context
// ============================================================================

#[test]
fn test_context_is_trailing_field_with_marker() {
    let capture = Capture::default();
    let logger = logger(plain_engine(10));
    let scope = Scope::new().attach(["req=42"]).attach(["user=7"]);
    assert_eq!(scope.read(), "req=42, user=7");

    let mut w = logger.writer_with_console("job", false, capture.console());
    w.from_scope(&scope);
    w.info(["hello"]).unwrap();
    w.close();

    assert_eq!(
        capture.box_lines(),
        vec![
            "┌──────────┬────────────┐",
            "│ info     │ hello      │",
            "├──────────┼────────────┤",
            "│ context  │ req=42, us │",
            "│          │ er=7       │",
            "└──────────┴────────────┘",
        ]
    );
}

#[test]
fn test_empty_scope_attaches_sentinel() {
    let capture = Capture::default();
    let logger = logger(plain_engine(40));

    let mut w = logger.writer_with_console("job", false, capture.console());
    w.from_scope(&Scope::new());
    assert_eq!(w.context(), Some(boxlog_core::NOT_FOUND));
    w.info(["x"]).unwrap();
    w.close();

    assert!(capture.text().contains("│ context  │ \"value\":\"not found\""));
}

#[test]
fn test_context_applies_to_every_later_record() {
    let capture = Capture::default();
    let logger = logger(plain_engine(20));

    let mut w = logger.writer_with_console("job", false, capture.console());
    w.info(["before"]).unwrap();
    w.from_scope(&Scope::new().attach(["job=nightly"]));
    w.info(["one"]).unwrap();
    w.success(["two"]).unwrap();
    w.close();

    assert_eq!(capture.text().matches("│ context  │").count(), 2);
}

#[test]
fn test_compact_engine_ignores_context() {
    let capture = Capture::default();
    let logger = logger(EngineConfig::compact().plain());

    let mut w = logger.writer_with_console("job", false, capture.console());
    w.from_scope(&Scope::new().attach(["req=42"]));
    w.info(["x"]).unwrap();
    w.close();

    assert!(!capture.text().contains("context"));
    // 1 + 10 + 1 + 57 + 1
    assert_eq!(capture.box_lines()[0].chars().count(), 70);
}
