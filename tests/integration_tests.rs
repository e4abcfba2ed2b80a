//! Integration tests for the mediatype library

use mediatype::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_content_type_header() {
    init_tracing();

    let media_type = parse("application/vnd.api+json; charset=utf-8").unwrap();
    assert_eq!(media_type.full_type(), "application/vnd.api+json");
    assert_eq!(media_type.main_type(), "application");
    assert_eq!(media_type.trees(), ["vnd"]);
    assert_eq!(media_type.prefix(), "vnd");
    assert_eq!(media_type.sub_type(), "api");
    assert_eq!(media_type.suffix(), "json");
    assert_eq!(media_type.parameters().get("charset").unwrap(), "utf-8");
}

#[test]
fn test_common_types() {
    let cases: &[(&str, &str, &[&str], &str, &str)] = &[
        ("text/html", "text", &[], "html", ""),
        ("application/json", "application", &[], "json", ""),
        ("image/svg+xml", "image", &[], "svg", "xml"),
        ("application/atom+xml", "application", &[], "atom", "xml"),
        ("application/x.custom+cbor", "application", &["x"], "custom", "cbor"),
        ("text/prs.lines.tag", "text", &["prs", "lines"], "tag", ""),
        (
            "application/vnd.criticalstack.swift.plus.v1",
            "application",
            &["vnd", "criticalstack", "swift", "plus"],
            "v1",
            "",
        ),
    ];

    for &(raw, main, trees, sub, suffix) in cases {
        let media_type = parse(raw).unwrap();
        assert_eq!(media_type.main_type(), main, "{raw}");
        assert_eq!(media_type.trees(), trees, "{raw}");
        assert_eq!(media_type.sub_type(), sub, "{raw}");
        assert_eq!(media_type.suffix(), suffix, "{raw}");
    }
}

#[test]
fn test_disposition_without_subtype() {
    let media_type = parse("Attachment; filename*=UTF-8''r%C3%A9sum%C3%A9.pdf").unwrap();
    assert_eq!(media_type.full_type(), "attachment");
    assert_eq!(media_type.main_type(), "attachment");
    assert_eq!(media_type.sub_type(), "");
    assert!(media_type.trees().is_empty());
    assert_eq!(media_type.suffix(), "");
    assert_eq!(media_type.parameters().get("filename").unwrap(), "résumé.pdf");
}

#[test]
fn test_parse_failure_produces_no_value() {
    init_tracing();

    for raw in ["", "/json", "text/", "text/html; charset", "a/b; x=1; X=2"] {
        assert!(parse(raw).is_err(), "{raw:?} should not parse");
    }

    assert_eq!(
        "a/b; x=1; X=2".parse::<ParsedMediaType>().unwrap_err(),
        Error::DuplicateParameter("x".to_string())
    );
}

#[test]
fn test_parameters_before_and_after_split() {
    let mut params = HashMap::new();
    params.insert("charset".to_string(), "utf-8".to_string());

    let media_type = ParsedMediaType::new("text/plain", params.clone());
    assert!(!media_type.is_split());
    assert_eq!(media_type.parameters(), &params);

    assert_eq!(media_type.sub_type(), "plain");
    assert!(media_type.is_split());
    assert_eq!(media_type.parameters(), &params);
}

#[test]
fn test_shared_across_threads() {
    let media_type = Arc::new(ParsedMediaType::new(
        "application/vnd.example.v2+json",
        HashMap::new(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let media_type = Arc::clone(&media_type);
            thread::spawn(move || {
                (
                    media_type.trees().to_vec(),
                    media_type.sub_type().to_string(),
                    media_type.suffix().to_string(),
                )
            })
        })
        .collect();

    for handle in handles {
        let (trees, sub_type, suffix) = handle.join().unwrap();
        assert_eq!(trees, ["vnd", "example"]);
        assert_eq!(sub_type, "v2");
        assert_eq!(suffix, "json");
    }

    // Every thread saw the one split the cell holds
    assert!(std::ptr::eq(media_type.trees(), media_type.trees()));
}

#[test]
fn test_separator_constants() {
    assert_eq!(MAIN_SUB_SEPARATOR, '/');
    assert_eq!(SUFFIX_SEPARATOR, '+');
    assert_eq!(TREE_SEPARATOR, '.');
}
