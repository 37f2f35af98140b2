//! The binary, unary, and update operator tables (§4.4), grounded on boa's
//! `BinOp`/`UnaryOp` arms in `exec/mod.rs` and the fast-path/slow-path split
//! in the newer `JsValue::add`/`sub`/... family. Logical operators (`&&`,
//! `||`, `??`) are *not* here - they need lazy evaluation of their right-hand
//! side and live in `exec::operator` instead.

use crate::heap::{Heap, HeapObject};
use crate::value::conversions::{f64_to_int32, f64_to_uint32, to_number, to_primitive, to_string, PreferredType};
use crate::value::equality::{abstract_equals, strict_equals};
use crate::value::{Primitive, Value};

/// All non-assignment, non-logical binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
    In,
    InstanceOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,
    Plus,
    Not,
    BitNot,
    Void,
}

/// Result of an update (`++`/`--`) operator: the value written back to the
/// binding, and the value the expression itself evaluates to (current for
/// postfix, new for prefix).
pub struct UpdateResult {
    pub new_value: Value,
    pub return_value: Value,
}

pub fn update_op(current: &Value, heap: &Heap, increment: bool, prefix: bool) -> UpdateResult {
    let n = to_number(current, heap);
    let new = if increment { n + 1.0 } else { n - 1.0 };
    let new_value = Value::number(new);
    let return_value = if prefix {
        new_value.clone()
    } else {
        Value::number(n)
    };
    UpdateResult {
        new_value,
        return_value,
    }
}

pub fn unary_op(op: UnaryOp, value: &Value, heap: &Heap) -> Value {
    match op {
        UnaryOp::Minus => Value::number(-to_number(value, heap)),
        UnaryOp::Plus => Value::number(to_number(value, heap)),
        UnaryOp::Not => Value::boolean(!crate::value::conversions::to_boolean(value)),
        UnaryOp::BitNot => Value::number(f64::from(!f64_to_int32(to_number(value, heap)))),
        UnaryOp::Void => Value::undefined(),
    }
}

/// Applies a binary operator. The only operator that can fail is `in`
/// against a non-reference right-hand side, which throws a `TypeError`; the
/// `String` carried by `Err` is the error message (the caller is responsible
/// for allocating the heap `TypeError` object and bubbling it, per §7).
pub fn binary_op(op: BinaryOp, left: &Value, right: &Value, heap: &Heap) -> Result<Value, String> {
    use BinaryOp::*;
    Ok(match op {
        Add => add(left, right, heap),
        Sub => Value::number(to_number(left, heap) - to_number(right, heap)),
        Mul => Value::number(to_number(left, heap) * to_number(right, heap)),
        Div => Value::number(to_number(left, heap) / to_number(right, heap)),
        Mod => Value::number(to_number(left, heap) % to_number(right, heap)),
        Exp => Value::number(to_number(left, heap).powf(to_number(right, heap))),
        Equal => Value::boolean(abstract_equals(left, right, heap)),
        NotEqual => Value::boolean(!abstract_equals(left, right, heap)),
        StrictEqual => Value::boolean(strict_equals(left, right)),
        StrictNotEqual => Value::boolean(!strict_equals(left, right)),
        LessThan => relational(left, right, heap, |a, b| a < b, |a, b| a < b),
        LessThanOrEqual => relational(left, right, heap, |a, b| a <= b, |a, b| a <= b),
        GreaterThan => relational(left, right, heap, |a, b| a > b, |a, b| a > b),
        GreaterThanOrEqual => relational(left, right, heap, |a, b| a >= b, |a, b| a >= b),
        BitAnd => Value::number(f64::from(f64_to_int32(to_number(left, heap)) & f64_to_int32(to_number(right, heap)))),
        BitOr => Value::number(f64::from(f64_to_int32(to_number(left, heap)) | f64_to_int32(to_number(right, heap)))),
        BitXor => Value::number(f64::from(f64_to_int32(to_number(left, heap)) ^ f64_to_int32(to_number(right, heap)))),
        Shl => {
            let l = f64_to_int32(to_number(left, heap));
            let r = f64_to_uint32(to_number(right, heap)) & 0x1F;
            Value::number(f64::from(l.wrapping_shl(r)))
        }
        Shr => {
            let l = f64_to_int32(to_number(left, heap));
            let r = f64_to_uint32(to_number(right, heap)) & 0x1F;
            Value::number(f64::from(l.wrapping_shr(r)))
        }
        UShr => {
            let l = f64_to_uint32(to_number(left, heap));
            let r = f64_to_uint32(to_number(right, heap)) & 0x1F;
            Value::number(f64::from(l.wrapping_shr(r)))
        }
        In => {
            let key = to_string(left, heap);
            match right {
                Value::Reference(r) => Value::boolean(has_own(*r, &key, heap)),
                _ => {
                    return Err("Cannot use 'in' operator to search for a key in a non-object".to_string())
                }
            }
        }
        // §9 open question: instanceof is simplified to false unless both
        // sides are references; we don't model prototype chains.
        InstanceOf => Value::boolean(matches!((left, right), (Value::Reference(_), Value::Reference(_)))),
    })
}

fn has_own(r: crate::heap::Ref, key: &str, heap: &Heap) -> bool {
    match heap.get(r) {
        Some(HeapObject::Plain(obj)) => obj.properties.contains_key(key),
        Some(HeapObject::Array(arr)) => {
            if key == "length" {
                return true;
            }
            if let Ok(idx) = key.parse::<usize>() {
                idx < arr.elements.len()
            } else {
                arr.properties.contains_key(key)
            }
        }
        Some(HeapObject::Function(_)) | Some(HeapObject::Native(_)) | None => false,
    }
}

fn add(left: &Value, right: &Value, heap: &Heap) -> Value {
    let pl = to_primitive(left, heap, PreferredType::Default);
    let pr = to_primitive(right, heap, PreferredType::Default);
    if matches!(pl, Value::Primitive(Primitive::String(_))) || matches!(pr, Value::Primitive(Primitive::String(_))) {
        Value::string(format!("{}{}", to_string(&pl, heap), to_string(&pr, heap)))
    } else {
        Value::number(to_number(&pl, heap) + to_number(&pr, heap))
    }
}

fn relational(
    left: &Value,
    right: &Value,
    heap: &Heap,
    str_cmp: impl Fn(&str, &str) -> bool,
    num_cmp: impl Fn(f64, f64) -> bool,
) -> Value {
    let pl = to_primitive(left, heap, PreferredType::Number);
    let pr = to_primitive(right, heap, PreferredType::Number);
    if let (Value::Primitive(Primitive::String(a)), Value::Primitive(Primitive::String(b))) = (&pl, &pr) {
        Value::boolean(str_cmp(a, b))
    } else {
        let a = to_number(&pl, heap);
        let b = to_number(&pr, heap);
        if a.is_nan() || b.is_nan() {
            Value::boolean(false)
        } else {
            Value::boolean(num_cmp(a, b))
        }
    }
}
