//! `Identifier` read and the identifier half of assignment (§4.6 "Variable
//! access"), grounded on boa's `Node::Local` handling in `exec/mod.rs`,
//! which resolved through `self.realm.environment.get_binding_value` and
//! raised a `ReferenceError` on an unresolved binding.

use crate::ast::Node;
use crate::error::SimResult;
use crate::interpreter::{Flow, Interpreter};
use crate::step::StepType;
use crate::value::Value;

/// `Identifier` as an expression. `undefined` and `NaN` are recognized as
/// direct primitives rather than looked up (§4.6). A TDZ binding throws
/// `ReferenceError`; an unresolved name throws unless a `typeof` parent is
/// tolerating it, in which case it evaluates to `undefined`.
pub fn run_read(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let name = match node {
        Node::Identifier { name } => name.as_str(),
        _ => unreachable!("identifier::run_read dispatched on a non-Identifier"),
    };
    interp.emit(node, StepType::Evaluating, None);

    if name == "undefined" {
        interp.push_value(Value::undefined());
        interp.emit(node, StepType::Evaluated, None);
        return Ok(None);
    }
    if name == "NaN" {
        interp.push_value(Value::nan());
        interp.emit(node, StepType::Evaluated, None);
        return Ok(None);
    }

    let bubble = match interp.scopes.lookup(name) {
        Some((value, _)) if value.is_not_initialized() => {
            interp.throw_error("ReferenceError", format!("Cannot access '{name}' before initialization"))
        }
        Some((value, _)) => {
            interp.push_value(value);
            None
        }
        None if interp.typeof_context => {
            interp.push_value(Value::undefined());
            None
        }
        None => interp.throw_error("ReferenceError", format!("{name} is not defined")),
    };
    interp.emit(node, StepType::Evaluated, bubble);
    Ok(bubble)
}

/// Writes `value` to `name` (§4.2, §4.6): a TDZ binding still throws, an
/// unresolved name creates a `global` binding in scope 0 (this simulator
/// does not model a separate strict-mode policy). Does not push anything -
/// callers (plain assignment, compound assignment, update expressions) each
/// push whatever their own expression result should be.
pub fn write(interp: &mut Interpreter, name: &str, value: Value) -> Flow {
    if let Some((current, _)) = interp.scopes.lookup(name) {
        if current.is_not_initialized() {
            return interp.throw_error("ReferenceError", format!("Cannot access '{name}' before initialization"));
        }
    }
    match interp.scopes.write_variable(name, value.clone(), true) {
        Ok(idx) => {
            interp.record_write(idx, name.to_string(), value);
            None
        }
        Err(_) => unreachable!("write_variable with create_global_if_missing never fails"),
    }
}
