//! Property tests: generated output depends only on the type graph's
//! contents, never on declaration order.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;

use tessel_gen::{generate, GeneratorConfig};
use tessel_ir::{TypeGraphBuilder, TypeId};

const FIELDS: [(&str, TypeId); 6] = [
    ("age", TypeId::INT),
    ("name", TypeId::STRING),
    ("born", TypeId::DATE),
    ("score", TypeId::BOXED_DOUBLE),
    ("extra", TypeId::OBJECT),
    ("flag", TypeId::BOOLEAN),
];

/// Generate for a small hierarchy whose fields and subclasses are declared
/// in the given orders.
fn source_for(field_order: &[usize], subclass_order: &[usize]) -> String {
    let mut b = TypeGraphBuilder::new();
    let base = b.declare_abstract_class("p.Base").unwrap();
    for &i in field_order {
        let (name, ty) = FIELDS[i];
        b.field(base, name, ty).unwrap();
    }
    let subclasses = ["p.One", "p.Two", "p.Three"];
    for &i in subclass_order {
        let sub = b.declare_class(subclasses[i]).unwrap();
        b.set_superclass(sub, base).unwrap();
        b.field(sub, "tag", TypeId::STRING).unwrap();
    }
    let graph = b.build();
    generate(&graph, &[base], GeneratorConfig::default())
        .unwrap()
        .source()
        .to_string()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn declaration_order_does_not_matter(
        fields in Just((0..FIELDS.len()).collect::<Vec<_>>()).prop_shuffle(),
        subclasses in Just(vec![0usize, 1, 2]).prop_shuffle(),
    ) {
        let canonical = source_for(&[0, 1, 2, 3, 4, 5], &[0, 1, 2]);
        prop_assert_eq!(source_for(&fields, &subclasses), canonical);
    }

    #[test]
    fn member_names_never_break_identities(name in "[a-z][a-zA-Z0-9_$]{0,12}") {
        let mut b = TypeGraphBuilder::new();
        let class = b.declare_class(format!("p.{name}")).unwrap();
        let graph = b.build();
        let unit = generate(&graph, &[class], GeneratorConfig::default()).unwrap();
        let identity = &unit.identities[&format!("p.{name}")];
        prop_assert!(identity.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        prop_assert!(identity.ends_with("_JsonCodec"));
    }
}
