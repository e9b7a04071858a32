use pretty_assertions::assert_eq;

use super::*;

#[test]
fn display_renders_innermost_context_first() {
    let diag = unsupported_type("void", "`void` has no values")
        .with_context([
            ContextFrame::Root("com.acme.Zoo".to_string()),
            ContextFrame::Type("com.acme.Zoo".to_string()),
            ContextFrame::Field {
                owner: "com.acme.Zoo".to_string(),
                field: "nothing".to_string(),
            },
        ]);
    assert_eq!(
        diag.to_string(),
        "error[E1001]: unsupported type `void`: `void` has no values\n  \
         in field `com.acme.Zoo.nothing`\n  \
         in type `com.acme.Zoo`\n  \
         requested as root `com.acme.Zoo`"
    );
}

#[test]
fn notes_follow_context() {
    let diag = missing_type_arguments("std.List")
        .with_context([ContextFrame::Type("a.B".to_string())]);
    assert_eq!(
        diag.to_string(),
        "error[E1002]: container `std.List` is used without type arguments\n  \
         in type `a.B`\n  \
         = note: element, key and value codecs are chosen from the type arguments"
    );
}

#[test]
fn innermost_frame() {
    let diag = abstract_not_allowed("a.Shape", "map key").with_context([
        ContextFrame::Type("a.B".to_string()),
        ContextFrame::Argument("a.Shape".to_string()),
    ]);
    assert_eq!(
        diag.innermost(),
        Some(&ContextFrame::Argument("a.Shape".to_string()))
    );
    assert_eq!(diag.code, ErrorCode::E1003);
    assert!(diag.is_error());
}

#[test]
fn warning_is_not_error() {
    let diag = Diagnostic::warning(ErrorCode::E9001).with_message("odd");
    assert!(!diag.is_error());
    assert_eq!(diag.to_string(), "warning[E9001]: odd");
}

#[test]
fn unknown_root_message() {
    assert_eq!(
        unknown_root("int").message,
        "`int` cannot be a generation root: expected a class, enum or container"
    );
}
