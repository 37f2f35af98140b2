//! `Literal`, `ArrayExpression`, `ObjectExpression` (§4.6 "Object/array
//! literals"). Grounded on boa's `Node::Const`/`ArrayDecl`/`Object`
//! handling in `exec/mod.rs`, which built a `GcObject` by iterating
//! `extract_array_properties`/property lists; the push-then-pop-back shape
//! here is spelled out explicitly by the design because the operand-stack
//! shape during that process is itself observable trace state.

use indexmap::IndexMap;

use crate::ast::Node;
use crate::error::SimResult;
use crate::heap::{ArrayObject, HeapObject, PlainObject};
use crate::interpreter::{Flow, Interpreter};
use crate::step::StepType;
use crate::value::Value;

fn json_to_value(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::null(),
        serde_json::Value::Bool(b) => Value::boolean(*b),
        serde_json::Value::Number(n) => Value::number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::string(s.clone()),
        _ => Value::undefined(),
    }
}

pub fn run_literal(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let raw = match node {
        Node::Literal { value } => value,
        _ => unreachable!("literal::run_literal dispatched on a non-Literal"),
    };
    interp.emit(node, StepType::Evaluating, None);
    interp.push_value(json_to_value(raw));
    interp.emit(node, StepType::Evaluated, None);
    Ok(None)
}

/// Evaluates `elements` left-to-right, pushing each (elisions push
/// `undefined`), then pops them back off in source order to build the
/// array before pushing the new reference (§4.6).
pub fn run_array(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let elements = match node {
        Node::ArrayExpression { elements } => elements,
        _ => unreachable!("literal::run_array dispatched on a non-ArrayExpression"),
    };
    interp.emit(node, StepType::Evaluating, None);

    for element in elements {
        match element {
            Some(expr) => {
                if let Some(bubble) = crate::exec::dispatch(interp, expr)? {
                    interp.emit(node, StepType::Evaluated, Some(bubble));
                    return Ok(Some(bubble));
                }
            }
            None => interp.push_value(Value::undefined()),
        }
    }

    let mut values = Vec::with_capacity(elements.len());
    for _ in 0..elements.len() {
        values.push(interp.pop_value()?);
    }
    values.reverse();

    let r = interp.heap.allocate(HeapObject::Array(ArrayObject {
        elements: values,
        properties: IndexMap::new(),
    }));
    interp.record_create(r);
    interp.push_value(Value::reference(r));
    interp.emit(node, StepType::Evaluated, None);
    Ok(None)
}

/// Evaluates each property's value left-to-right (a computed key is
/// resolved immediately before its value, since keys never travel the
/// operand stack), then pops the values back off in source order to build
/// the object before pushing the new reference (§4.6).
pub fn run_object(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let properties = match node {
        Node::ObjectExpression { properties } => properties,
        _ => unreachable!("literal::run_object dispatched on a non-ObjectExpression"),
    };
    interp.emit(node, StepType::Evaluating, None);

    let mut keys = Vec::with_capacity(properties.len());
    for property in properties {
        let key = if property.computed {
            if let Some(bubble) = crate::exec::dispatch(interp, &property.key)? {
                interp.emit(node, StepType::Evaluated, Some(bubble));
                return Ok(Some(bubble));
            }
            let key_value = interp.pop_value()?;
            crate::value::conversions::to_string(&key_value, &interp.heap)
        } else {
            match property.key.as_ref() {
                Node::Identifier { name } => name.clone(),
                Node::Literal { value } => crate::value::conversions::to_string(&json_to_value(value), &interp.heap),
                other => {
                    return Err(crate::error::SimError::MalformedAst(format!(
                        "unsupported object property key, got {}",
                        other.kind()
                    )))
                }
            }
        };
        keys.push(key);

        if let Some(bubble) = crate::exec::dispatch(interp, &property.value)? {
            interp.emit(node, StepType::Evaluated, Some(bubble));
            return Ok(Some(bubble));
        }
    }

    let mut values = Vec::with_capacity(keys.len());
    for _ in 0..keys.len() {
        values.push(interp.pop_value()?);
    }
    values.reverse();

    let mut object_properties = IndexMap::new();
    for (key, value) in keys.into_iter().zip(values.into_iter()) {
        object_properties.insert(key, value);
    }
    let r = interp.heap.allocate(HeapObject::Plain(PlainObject {
        properties: object_properties,
    }));
    interp.record_create(r);
    interp.push_value(Value::reference(r));
    interp.emit(node, StepType::Evaluated, None);
    Ok(None)
}
