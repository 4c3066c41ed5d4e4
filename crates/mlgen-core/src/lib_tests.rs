use std::collections::BTreeSet;

use crate::{
    Constructor, Primitive, TypeDescriptor, TypeIdentity, ValueConstructor, ValueExpr,
    parse_descriptors,
};

fn id(name: &str) -> TypeIdentity {
    TypeIdentity::new("main", "Types", name)
}

const PERSON_JSON: &str = r#"[
    {
        "identity": { "package": "main", "module": "Types", "name": "Person" },
        "display_name": "Person",
        "constructor": {
            "value": {
                "record": {
                    "name": "Person",
                    "value": {
                        "product": [
                            { "field": { "name": "id", "value": { "primitive": "int" } } },
                            { "field": { "name": "name", "value": { "primitive": { "option": { "primitive": "string" } } } } }
                        ]
                    }
                }
            }
        }
    },
    {
        "identity": { "package": "main", "module": "Types", "name": "Suit" },
        "display_name": "Suit",
        "constructor": { "enumerator": ["Clubs", "Diamonds", "Hearts", "Spades"] }
    }
]"#;

#[test]
fn parse_record_and_enumeration() {
    let descriptors = parse_descriptors(PERSON_JSON).expect("valid descriptors");
    assert_eq!(descriptors.len(), 2);

    let person = &descriptors[0];
    assert_eq!(person.identity, id("Person"));
    let expected = Constructor::Value(ValueConstructor::record(
        "Person",
        [
            ("id", Primitive::Int.into()),
            ("name", Primitive::option(Primitive::String).into()),
        ],
    ));
    assert_eq!(person.constructor, expected);

    let Constructor::Enumerator(tags) = &descriptors[1].constructor else {
        panic!("expected enumerator");
    };
    assert_eq!(tags, &["Clubs", "Diamonds", "Hearts", "Spades"]);
}

#[test]
fn parse_rejects_unknown_constructor() {
    let json = r#"[{
        "identity": { "package": "p", "module": "M", "name": "T" },
        "display_name": "T",
        "constructor": { "mystery": [] }
    }]"#;
    assert!(parse_descriptors(json).is_err());
}

#[test]
fn serde_round_trip_preserves_descriptor() {
    let descriptor = TypeDescriptor::new(
        id("Pair"),
        Constructor::Value(ValueConstructor::named(
            "Pair",
            [ValueExpr::param("b"), ValueExpr::param("a")],
        )),
    );
    let json = serde_json::to_string(&descriptor).unwrap();
    let back: TypeDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(back, descriptor);
}

#[test]
fn product_is_right_nested() {
    let product = ValueExpr::product([
        Primitive::Int.into(),
        Primitive::Bool.into(),
        Primitive::Float.into(),
    ]);
    let ValueExpr::Product(left, right) = &product else {
        panic!("expected product");
    };
    assert_eq!(**left, ValueExpr::Primitive(Primitive::Int));
    assert!(matches!(**right, ValueExpr::Product(_, _)));
}

#[test]
fn product_of_one_and_none() {
    assert_eq!(ValueExpr::product([]), ValueExpr::Empty);
    assert_eq!(
        ValueExpr::product([Primitive::Int.into()]),
        ValueExpr::Primitive(Primitive::Int)
    );
}

#[test]
fn flatten_preserves_declared_order() {
    let product = ValueExpr::product([
        ValueExpr::field("c", Primitive::Int.into()),
        ValueExpr::field("a", Primitive::Int.into()),
        ValueExpr::field("b", Primitive::Int.into()),
    ]);
    let names: Vec<_> = product
        .flatten()
        .into_iter()
        .map(|v| match v {
            ValueExpr::Field { name, .. } => name.as_str(),
            _ => panic!("expected field"),
        })
        .collect();
    assert_eq!(names, ["c", "a", "b"]);
}

#[test]
fn flatten_skips_empty_and_left_nesting() {
    let expr = ValueExpr::Product(
        Box::new(ValueExpr::Product(
            Box::new(Primitive::Int.into()),
            Box::new(ValueExpr::Empty),
        )),
        Box::new(Primitive::Bool.into()),
    );
    assert_eq!(
        expr.flatten(),
        [
            &ValueExpr::Primitive(Primitive::Int),
            &ValueExpr::Primitive(Primitive::Bool)
        ]
    );
}

#[test]
fn type_params_sorted_and_deduplicated() {
    let descriptor = TypeDescriptor::new(
        id("Triple"),
        Constructor::Value(ValueConstructor::record(
            "Triple",
            [
                ("third", ValueExpr::param("c")),
                ("first", ValueExpr::param("a")),
                ("nested", Primitive::list(ValueExpr::param("b")).into()),
                ("again", ValueExpr::param("a")),
            ],
        )),
    );
    assert_eq!(descriptor.type_params(), ["a", "b", "c"]);
}

#[test]
fn type_params_through_applications() {
    let expr = ValueExpr::apply(
        id("Wrapper"),
        [
            ValueExpr::param("z"),
            Primitive::either(ValueExpr::param("y"), Primitive::Int).into(),
        ],
    );
    let mut params = BTreeSet::new();
    expr.collect_type_params(&mut params);
    assert_eq!(params.into_iter().collect::<Vec<_>>(), ["y", "z"]);
}

#[test]
fn enumerations_have_no_type_params() {
    let descriptor = TypeDescriptor::new(
        id("Suit"),
        Constructor::Enumerator(vec!["Clubs".into()]),
    );
    assert!(descriptor.type_params().is_empty());
}

#[test]
fn nested_multiples_flatten() {
    let sum = ValueConstructor::Multiple(vec![
        ValueConstructor::named("A", []),
        ValueConstructor::Multiple(vec![
            ValueConstructor::named("B", []),
            ValueConstructor::named("C", []),
        ]),
    ]);
    let names: Vec<_> = sum.branches().iter().filter_map(|b| b.name()).collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[test]
fn references_finds_nested_identity() {
    let tree = id("Tree");
    let descriptor = TypeDescriptor::new(
        tree.clone(),
        Constructor::Value(ValueConstructor::named(
            "Node",
            [Primitive::list(ValueExpr::type_ref(tree.clone())).into()],
        )),
    );
    assert!(descriptor.references(&tree));
    assert!(!descriptor.references(&id("Other")));
}

#[test]
fn char_list_detection() {
    assert!(Primitive::list(Primitive::Char).is_char_list());
    assert!(!Primitive::list(Primitive::String).is_char_list());
}

#[test]
fn identity_display_and_module_sharing() {
    let person = id("Person");
    assert_eq!(person.to_string(), "main:Types.Person");
    assert!(id("PersonAddress").shares_module_with(&person));
    assert!(!TypeIdentity::new("other", "Types", "X").shares_module_with(&person));
}
