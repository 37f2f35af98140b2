//! `===`/`!==` (strict) and `==`/`!=` (abstract) equality, grounded on
//! boa's `CompOp::Equal`/`StrictEqual` arms in `exec/mod.rs`, which special-
//! case objects to reference identity and fall back to `PartialEq` on the
//! primitive payload otherwise.

use crate::heap::Heap;
use crate::value::conversions::{to_number, to_primitive, PreferredType};
use crate::value::{Primitive, Value};

/// `x === y`
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Reference(x), Value::Reference(y)) => x == y,
        (Value::Primitive(x), Value::Primitive(y)) => x == y,
        _ => false,
    }
}

/// `x == y`, the abstract equality algorithm.
pub fn abstract_equals(a: &Value, b: &Value, heap: &Heap) -> bool {
    match (a, b) {
        (Value::Reference(_), Value::Reference(_)) => strict_equals(a, b),
        (Value::Primitive(Primitive::Null), Value::Primitive(Primitive::Undefined))
        | (Value::Primitive(Primitive::Undefined), Value::Primitive(Primitive::Null))
        | (Value::Primitive(Primitive::Undefined), Value::Primitive(Primitive::Undefined))
        | (Value::Primitive(Primitive::Null), Value::Primitive(Primitive::Null)) => true,
        (Value::Primitive(Primitive::Undefined), _)
        | (Value::Primitive(Primitive::Null), _)
        | (_, Value::Primitive(Primitive::Undefined))
        | (_, Value::Primitive(Primitive::Null)) => false,
        (Value::Primitive(x), Value::Primitive(y)) => match (x, y) {
            (Primitive::Number(_), Primitive::Number(_))
            | (Primitive::String(_), Primitive::String(_))
            | (Primitive::Boolean(_), Primitive::Boolean(_))
            | (Primitive::BigInt(_), Primitive::BigInt(_))
            | (Primitive::Symbol(_), Primitive::Symbol(_)) => x == y,
            _ => to_number(a, heap) == to_number(b, heap),
        },
        (Value::Reference(_), Value::Primitive(_)) => {
            let prim = to_primitive(a, heap, PreferredType::Default);
            abstract_equals(&prim, b, heap)
        }
        (Value::Primitive(_), Value::Reference(_)) => {
            let prim = to_primitive(b, heap, PreferredType::Default);
            abstract_equals(a, &prim, heap)
        }
    }
}
