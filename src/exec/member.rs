//! `MemberExpression` read/write/delete (§4.6 "Variable access" / "Delete"),
//! grounded on boa's `Node::GetConstField`/`GetField`/`Assign` handling in
//! `exec/mod.rs`, which read and wrote through `Value::get_field`/
//! `set_field`; simplified here to the heap's own `read_property`/
//! `write_property`/`delete_property` since this simulator's objects carry
//! no accessor properties.

use crate::ast::Node;
use crate::error::{SimError, SimResult};
use crate::heap::Ref;
use crate::interpreter::{Flow, Interpreter};
use crate::step::StepType;
use crate::value::Value;

fn gerund(action: &str) -> &'static str {
    match action {
        "read" => "reading",
        "set" => "setting",
        _ => "deleting",
    }
}

fn property_key(interp: &mut Interpreter, property: &Node, computed: bool) -> SimResult<Result<String, Flow>> {
    if computed {
        if let Some(bubble) = crate::exec::dispatch(interp, property)? {
            return Ok(Err(Some(bubble)));
        }
        let key_value = interp.pop_value()?;
        Ok(Ok(crate::value::conversions::to_string(&key_value, &interp.heap)))
    } else {
        match property {
            Node::Identifier { name } => Ok(Ok(name.clone())),
            other => Err(SimError::MalformedAst(format!(
                "non-computed member property must be an Identifier, got {}",
                other.kind()
            ))),
        }
    }
}

/// Evaluates `object` and the property key, returning the resolved
/// `(ref, key)` pair, the bubble if evaluating either side threw, or a
/// `TypeError` bubble (already pushed/recorded) if `object` is
/// null/undefined. `action` is the infinitive verb used in the message
/// ("read"/"set"/"delete").
fn resolve(interp: &mut Interpreter, node: &Node, action: &str) -> SimResult<Result<(Ref, String), Flow>> {
    let (object, property, computed) = match node {
        Node::MemberExpression { object, property, computed } => (object.as_ref(), property.as_ref(), *computed),
        _ => unreachable!("member::resolve dispatched on a non-MemberExpression"),
    };
    if let Some(bubble) = crate::exec::dispatch(interp, object)? {
        return Ok(Err(Some(bubble)));
    }
    let obj_value = interp.pop_value()?;
    let key = match property_key(interp, property, computed)? {
        Ok(key) => key,
        Err(bubble) => return Ok(Err(bubble)),
    };
    match obj_value.as_reference() {
        Some(r) => Ok(Ok((r, key))),
        None => {
            let description = crate::value::conversions::to_string(&obj_value, &interp.heap);
            let bubble = interp.throw_error(
                "TypeError",
                format!("Cannot {action} properties of {description} ({} '{key}')", gerund(action)),
            );
            Ok(Err(bubble))
        }
    }
}

/// `MemberExpression` as an expression: reads the property and pushes it.
pub fn run_read(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    interp.emit(node, StepType::Evaluating, None);
    match resolve(interp, node, "read")? {
        Ok((r, key)) => {
            let value = interp.heap.read_property(r, &key);
            interp.push_value(value);
            interp.emit(node, StepType::Evaluated, None);
            Ok(None)
        }
        Err(bubble) => {
            interp.emit(node, StepType::Evaluated, bubble);
            Ok(bubble)
        }
    }
}

/// Resolves a member expression as an assignment target and writes `value`
/// to it. Does not push anything - the caller decides what the enclosing
/// expression's result should be (plain/compound assignment push `value`;
/// `UpdateExpression` pushes its own pre/post-increment result instead).
pub fn write(interp: &mut Interpreter, node: &Node, value: Value) -> SimResult<Flow> {
    match resolve(interp, node, "set")? {
        Ok((r, key)) => {
            interp.heap.write_property(r, &key, value.clone());
            interp.record_write_property(r, key, value);
            Ok(None)
        }
        Err(bubble) => Ok(bubble),
    }
}

/// Reads the current value of a member expression target without emitting
/// its own `evaluating`/`evaluated` pair - used by compound assignment and
/// update expressions, which wrap the whole read-modify-write in their own
/// step boundary.
pub fn read_for_update(interp: &mut Interpreter, node: &Node) -> SimResult<Result<(Ref, String, Value), Flow>> {
    match resolve(interp, node, "read")? {
        Ok((r, key)) => {
            let value = interp.heap.read_property(r, &key);
            Ok(Ok((r, key, value)))
        }
        Err(bubble) => Ok(Err(bubble)),
    }
}

/// `delete obj.p` / `delete obj[k]` (§4.6 "Delete"): deletes and pushes the
/// boolean result; a null/undefined object is still a `TypeError`.
pub fn delete(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    match resolve(interp, node, "delete")? {
        Ok((r, key)) => {
            let removed = interp.heap.delete_property(r, &key);
            interp.record_delete_property(r, key);
            interp.push_value(Value::boolean(removed));
            Ok(None)
        }
        Err(bubble) => Ok(bubble),
    }
}
