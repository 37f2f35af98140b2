//! The ECMAScript abstract coercion operations: `ToBoolean`, `ToNumber`,
//! `ToInt32`, `ToUint32`, `ToString`, `ToPrimitive`.
//!
//! Grounded on boa's old `builtins::number` conversion helpers and the
//! `Interpreter::to_primitive`/`to_string`/`value_to_rust_number` family in
//! `exec/mod.rs`, simplified because this simulator's objects never carry
//! user-defined `toString`/`valueOf` - `ToPrimitive` over a reference is a
//! pure function of the heap object's kind (§4.4).

use crate::heap::{Heap, HeapObject, Ref};
use crate::value::{Primitive, Value};

/// The preferred type hint passed to `ToPrimitive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    String,
    Number,
    Default,
}

/// `ToBoolean ( argument )`
pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Reference(_) => true,
        Value::Primitive(p) => match p {
            Primitive::Undefined | Primitive::Null | Primitive::NotInitialized => false,
            Primitive::Boolean(b) => *b,
            Primitive::Number(n) => *n != 0.0 && !n.is_nan(),
            Primitive::BigInt(n) => *n != 0,
            Primitive::String(s) => !s.is_empty(),
            Primitive::Symbol(_) => true,
        },
    }
}

/// `ToPrimitive ( input [ , preferredType ] )`, restricted to the fixed
/// per-kind stringification rules this simulator's heap objects support.
pub fn to_primitive(value: &Value, heap: &Heap, preferred: PreferredType) -> Value {
    let r = match value {
        Value::Reference(r) => *r,
        Value::Primitive(_) => return value.clone(),
    };
    Value::string(object_to_primitive_string(r, heap, preferred))
}

fn object_to_primitive_string(r: Ref, heap: &Heap, _preferred: PreferredType) -> String {
    match heap.get(r) {
        Some(HeapObject::Array(arr)) => arr
            .elements
            .iter()
            .map(|v| match v {
                Value::Primitive(Primitive::Undefined) | Value::Primitive(Primitive::Null) => {
                    String::new()
                }
                other => to_string(other, heap),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(HeapObject::Function(f)) => {
            if f.is_arrow {
                "() => { [native code] }".to_string()
            } else {
                format!("function {}() {{ [native code] }}", f.name.as_deref().unwrap_or(""))
            }
        }
        Some(HeapObject::Native(_)) => "function () { [native code] }".to_string(),
        Some(HeapObject::Plain(_)) | None => "[object Object]".to_string(),
    }
}

/// `ToString ( argument )`
pub fn to_string(value: &Value, heap: &Heap) -> String {
    match value {
        Value::Reference(_) => {
            let prim = to_primitive(value, heap, PreferredType::String);
            to_string(&prim, heap)
        }
        Value::Primitive(p) => match p {
            Primitive::Undefined => "undefined".to_string(),
            Primitive::Null => "null".to_string(),
            Primitive::NotInitialized => "undefined".to_string(),
            Primitive::Boolean(b) => b.to_string(),
            Primitive::Number(n) => number_to_string(*n),
            Primitive::BigInt(n) => n.to_string(),
            Primitive::String(s) => s.clone(),
            Primitive::Symbol(s) => format!("Symbol({})", s.description.as_deref().unwrap_or("")),
        },
    }
}

/// JS `Number::toString` for the common case: integral doubles print without
/// a trailing `.0`, `NaN`/`Infinity` print as their JS spellings.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && (n as i64) as f64 == n {
        // `as i64` saturates rather than wrapping on overflow, so round-trip
        // through `i64` and back to catch magnitudes it can't represent
        // (anywhere past roughly 9.2e18) and fall through to `n`'s own
        // Display impl instead of printing a saturated value.
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// `ToNumber ( argument )`
pub fn to_number(value: &Value, heap: &Heap) -> f64 {
    match value {
        Value::Reference(_) => {
            let prim = to_primitive(value, heap, PreferredType::Number);
            to_number(&prim, heap)
        }
        Value::Primitive(p) => match p {
            Primitive::Undefined => f64::NAN,
            Primitive::Null => 0.0,
            Primitive::NotInitialized => f64::NAN,
            Primitive::Boolean(true) => 1.0,
            Primitive::Boolean(false) => 0.0,
            Primitive::Number(n) => *n,
            Primitive::BigInt(n) => *n as f64,
            Primitive::String(s) => string_to_number(s),
            Primitive::Symbol(_) => f64::NAN,
        },
    }
}

fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `ToInt32 ( argument )`
pub fn to_int32(value: &Value, heap: &Heap) -> i32 {
    f64_to_int32(to_number(value, heap))
}

/// `ToUint32 ( argument )`
pub fn to_uint32(value: &Value, heap: &Heap) -> u32 {
    f64_to_uint32(to_number(value, heap))
}

/// Signed 32-bit wraparound per the ECMAScript `ToInt32` algorithm.
pub fn f64_to_int32(n: f64) -> i32 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    let n = n.trunc();
    let m = n.rem_euclid(2f64.powi(32));
    if m >= 2f64.powi(31) {
        (m - 2f64.powi(32)) as i32
    } else {
        m as i32
    }
}

/// Unsigned 32-bit wraparound per the ECMAScript `ToUint32` algorithm.
pub fn f64_to_uint32(n: f64) -> u32 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    let n = n.trunc();
    n.rem_euclid(2f64.powi(32)) as u32
}
