//! Shared descriptor fixtures for renderer tests.

use mlgen_core::{
    Constructor, Primitive, TypeDescriptor, TypeIdentity, ValueConstructor, ValueExpr,
};

pub fn id(name: &str) -> TypeIdentity {
    TypeIdentity::new("main", "Types", name)
}

fn value(name: &str, constructor: ValueConstructor) -> TypeDescriptor {
    TypeDescriptor::new(id(name), Constructor::Value(constructor))
}

/// `Person { id : Int, name : Maybe String }`
pub fn person() -> TypeDescriptor {
    value(
        "Person",
        ValueConstructor::record(
            "Person",
            [
                ("id", Primitive::Int.into()),
                ("name", Primitive::option(Primitive::String).into()),
            ],
        ),
    )
}

/// `Suit = Clubs | Diamonds | Hearts | Spades`
pub fn suit() -> TypeDescriptor {
    TypeDescriptor::new(
        id("Suit"),
        Constructor::Enumerator(
            ["Clubs", "Diamonds", "Hearts", "Spades"]
                .into_iter()
                .map(String::from)
                .collect(),
        ),
    )
}

/// `Token = Token`
pub fn singleton() -> TypeDescriptor {
    TypeDescriptor::new(id("Token"), Constructor::Enumerator(vec!["Token".into()]))
}

/// `UserId = Int`
pub fn user_id() -> TypeDescriptor {
    TypeDescriptor::new(id("UserId"), Constructor::PrimitiveWrapper(Primitive::Int))
}

/// `Shape = Circle Float | Rect Float Float | Empty`
pub fn shape() -> TypeDescriptor {
    value(
        "Shape",
        ValueConstructor::Multiple(vec![
            ValueConstructor::named("Circle", [Primitive::Float.into()]),
            ValueConstructor::named("Rect", [Primitive::Float.into(), Primitive::Float.into()]),
            ValueConstructor::named("Empty", []),
        ]),
    )
}

/// `Shape = Circle { radius } | Rect { width, height }`
pub fn shape_records() -> TypeDescriptor {
    TypeDescriptor::new(
        id("Shape"),
        Constructor::SumOfRecords {
            type_name: "Shape".into(),
            branches: ValueConstructor::Multiple(vec![
                ValueConstructor::record("Circle", [("radius", Primitive::Float.into())]),
                ValueConstructor::record(
                    "Rect",
                    [
                        ("width", Primitive::Float.into()),
                        ("height", Primitive::Float.into()),
                    ],
                ),
            ]),
        },
    )
}

/// `Tree = Leaf { value : Int } | Node { children : [Tree] }`
pub fn tree_records() -> TypeDescriptor {
    TypeDescriptor::new(
        id("Tree"),
        Constructor::SumOfRecords {
            type_name: "Tree".into(),
            branches: ValueConstructor::Multiple(vec![
                ValueConstructor::record("Leaf", [("value", Primitive::Int.into())]),
                ValueConstructor::record(
                    "Node",
                    [("children", Primitive::list(ValueExpr::type_ref(id("Tree"))).into())],
                ),
            ]),
        },
    )
}

/// `Box a = Box { unbox : a }`
pub fn boxed() -> TypeDescriptor {
    value(
        "Box",
        ValueConstructor::record("Box", [("unbox", ValueExpr::param("a"))]),
    )
}

/// `Pair a b = Pair b a`, arguments deliberately out of parameter order.
pub fn pair() -> TypeDescriptor {
    value(
        "Pair",
        ValueConstructor::named("Pair", [ValueExpr::param("b"), ValueExpr::param("a")]),
    )
}

/// `Triple a b c = Triple { third : c, first : [a], second : Maybe b }`
pub fn triple() -> TypeDescriptor {
    value(
        "Triple",
        ValueConstructor::record(
            "Triple",
            [
                ("third", ValueExpr::param("c")),
                ("first", Primitive::list(ValueExpr::param("a")).into()),
                ("second", Primitive::option(ValueExpr::param("b")).into()),
            ],
        ),
    )
}

/// `Company { name : String, staff : [Person] }`
pub fn company() -> TypeDescriptor {
    value(
        "Company",
        ValueConstructor::record(
            "Company",
            [
                ("name", Primitive::String.into()),
                ("staff", Primitive::list(ValueExpr::type_ref(id("Person"))).into()),
            ],
        ),
    )
}
