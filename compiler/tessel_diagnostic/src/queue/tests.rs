use pretty_assertions::assert_eq;

use super::*;
use crate::ContextFrame;

fn void_field(owner: &str, field: &str) -> Diagnostic {
    crate::diagnostic::unsupported_type("void", "`void` has no values").with_context([
        ContextFrame::Type(owner.to_string()),
        ContextFrame::Field {
            owner: owner.to_string(),
            field: field.to_string(),
        },
    ])
}

#[test]
fn test_duplicates_in_same_context_are_dropped() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(void_field("a.A", "x")));
    assert!(!queue.add(void_field("a.A", "x")));
    assert!(queue.add(void_field("a.A", "y")));
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn test_same_problem_via_different_roots_is_kept() {
    let mut queue = DiagnosticQueue::new();
    let mut first = void_field("a.A", "x");
    first.context.insert(0, ContextFrame::Root("a.R1".to_string()));
    let mut second = void_field("a.A", "x");
    second.context.insert(0, ContextFrame::Root("a.R2".to_string()));

    assert!(queue.add(first));
    assert!(queue.add(second));
}

fn void_list_in(owner: &str, field: &str) -> Diagnostic {
    let mut diag = void_field(owner, field);
    diag.context.push(ContextFrame::Argument("void".to_string()));
    diag
}

#[test]
fn test_shared_innermost_frame_in_different_fields_is_kept() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(void_list_in("p.A", "first")));
    assert!(queue.add(void_list_in("p.A", "second")));
    assert!(queue.add(void_list_in("p.B", "third")));
    assert!(!queue.add(void_list_in("p.A", "second")));
    assert_eq!(queue.error_count(), 3);
}

#[test]
fn test_unlimited_keeps_duplicates() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    queue.add(void_field("a.A", "x"));
    queue.add(void_field("a.A", "x"));
    assert_eq!(queue.flush().len(), 2);
}

#[test]
fn test_error_limit_appends_summary() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: true,
    });
    for field in ["a", "b", "c", "d"] {
        queue.add(void_field("a.A", field));
    }
    assert!(queue.limit_reached());

    let flushed = queue.flush();
    assert_eq!(flushed.len(), 3);
    assert_eq!(flushed[2].code, ErrorCode::E9002);
    assert_eq!(flushed[2].message, "aborting after 2 errors; 2 more not shown");
}

#[test]
fn test_flush_preserves_insertion_order_and_resets() {
    let mut queue = DiagnosticQueue::new();
    queue.add(void_field("a.B", "z"));
    queue.add(void_field("a.A", "a"));
    let flushed = queue.flush();
    let owners: Vec<_> = flushed.iter().map(|d| d.context[0].clone()).collect();
    assert_eq!(
        owners,
        vec![
            ContextFrame::Type("a.B".to_string()),
            ContextFrame::Type("a.A".to_string()),
        ]
    );
    assert_eq!(queue.error_count(), 0);
    assert!(queue.has_errors().is_none());
    assert!(queue.add(void_field("a.B", "z")));
}

#[test]
fn test_warnings_do_not_count_as_errors() {
    let mut queue = DiagnosticQueue::new();
    queue.add(Diagnostic::warning(ErrorCode::E9001).with_message("odd"));
    assert_eq!(queue.error_count(), 0);
    assert!(queue.has_errors().is_none());
}

#[test]
fn test_emit_error_yields_guarantee() {
    let mut queue = DiagnosticQueue::new();
    let _guarantee = queue.emit_error(void_field("a.A", "x"));
    assert!(queue.has_errors().is_some());
}
