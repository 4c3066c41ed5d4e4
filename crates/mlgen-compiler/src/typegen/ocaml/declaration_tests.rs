use mlgen_core::{Constructor, Primitive, TypeDescriptor, TypeIdentity, ValueConstructor, ValueExpr};

use super::declaration::{render_declaration, render_declaration_signature};
use crate::error::RenderError;
use crate::options::Options;
use crate::resolver::ModuleLocation;
use crate::test_utils::{self, id};

fn render(descriptor: &TypeDescriptor) -> String {
    render_declaration(descriptor, &Options::new()).unwrap()
}

#[test]
fn alias() {
    insta::assert_snapshot!(render(&test_utils::user_id()), @"type userId = int");
}

#[test]
fn record() {
    insta::assert_snapshot!(render(&test_utils::person()), @r"
    type person =
      { id : int
      ; name : string option
      }
    ");
}

#[test]
fn enumeration() {
    insta::assert_snapshot!(render(&test_utils::suit()), @r"
    type suit =
      | Clubs
      | Diamonds
      | Hearts
      | Spades
    ");
}

#[test]
fn plain_sum() {
    insta::assert_snapshot!(render(&test_utils::shape()), @r"
    type shape =
      | Circle of float
      | Rect of float * float
      | Empty
    ");
}

#[test]
fn sum_of_records_hoists_before_the_sum() {
    insta::assert_snapshot!(render(&test_utils::shape_records()), @r"
    type shapeCircle =
      { radius : float
      }

    type shapeRect =
      { width : float
      ; height : float
      }

    type shape =
      | Circle of shapeCircle
      | Rect of shapeRect
    ");
}

#[test]
fn recursive_sum_of_records_shares_one_type_group() {
    insta::assert_snapshot!(render(&test_utils::tree_records()), @r"
    type treeLeaf =
      { value : int
      }

    and treeNode =
      { children : tree list
      }

    and tree =
      | Leaf of treeLeaf
      | Node of treeNode
    ");
}

#[test]
fn type_parameters_are_sorted() {
    insta::assert_snapshot!(render(&test_utils::pair()), @r"
    type ('a, 'b) pair =
      | Pair of 'b * 'a
    ");
    insta::assert_snapshot!(render(&test_utils::triple()), @r"
    type ('a, 'b, 'c) triple =
      { third : 'c
      ; first : 'a list
      ; second : 'b option
      }
    ");
}

#[test]
fn composite_primitives() {
    let descriptor = TypeDescriptor::new(
        id("Misc"),
        Constructor::Value(ValueConstructor::record(
            "Misc",
            [
                ("name", Primitive::list(Primitive::Char).into()),
                ("when", Primitive::Date.into()),
                (
                    "choice",
                    Primitive::either(Primitive::Int32, Primitive::Bool).into(),
                ),
                (
                    "pair",
                    Primitive::Tuple(vec![Primitive::Int.into(), Primitive::Unit.into()]).into(),
                ),
            ],
        )),
    );
    insta::assert_snapshot!(render(&descriptor), @r"
    type misc =
      { name : string
      ; when_ : Js_date.t
      ; choice : (int32, bool) Aeson.Compatibility.Either.t
      ; pair : (int * unit)
      }
    ");
}

#[test]
fn generic_application_with_qualification() {
    let other = TypeIdentity::new("main", "Containers", "Box");
    let descriptor = TypeDescriptor::new(
        id("Holder"),
        Constructor::Value(ValueConstructor::named(
            "Holder",
            [ValueExpr::apply(other.clone(), [Primitive::Int.into()])],
        )),
    );
    let options = Options::new().dependency(other, ModuleLocation::new(["containers"]));
    insta::assert_snapshot!(render_declaration(&descriptor, &options).unwrap(), @r"
    type holder =
      | Holder of int Containers.box
    ");
}

#[test]
fn reference_into_nested_submodule() {
    let person = id("Person");
    let options = Options::new()
        .dependency(person.clone(), ModuleLocation::new(["src", "people"]).submodule("Staff"))
        .dependency(id("Company"), ModuleLocation::new(["src", "company"]));
    let output = render_declaration(&test_utils::company(), &options).unwrap();
    assert!(output.contains("; staff : People.Staff.person list"));
}

#[test]
fn unmapped_foreign_reference_fails() {
    let stranger = TypeIdentity::new("ext", "Elsewhere", "Thing");
    let descriptor = TypeDescriptor::new(
        id("Holder"),
        Constructor::Value(ValueConstructor::named("Holder", [ValueExpr::type_ref(stranger)])),
    );
    let err = render_declaration(&descriptor, &Options::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown type identity `ext:Elsewhere.Thing` referenced from `main:Types.Holder`"
    );
}

#[test]
fn unsupported_tuple_arity_fails() {
    let descriptor = TypeDescriptor::new(
        id("Single"),
        Constructor::PrimitiveWrapper(Primitive::Tuple(vec![Primitive::Int.into()])),
    );
    assert_eq!(
        render_declaration(&descriptor, &Options::new()).unwrap_err(),
        RenderError::TupleArity { arity: 1 }
    );
}

#[test]
fn signature_repeats_declaration() {
    let options = Options::new();
    let descriptor = test_utils::shape_records();
    assert_eq!(
        render_declaration_signature(&descriptor, &options).unwrap(),
        render_declaration(&descriptor, &options).unwrap()
    );
}
