//! The remaining plain statements (§4.6): `ExpressionStatement`,
//! `VariableDeclaration` as a statement, `ReturnStatement`, `ThrowStatement`,
//! `BreakStatement`, `ContinueStatement`, `EmptyStatement`. Grounded on boa's
//! per-node `Executable` impls in `exec/mod.rs` for the first three and
//! `exec/break_node.rs`/`exec/continue_node.rs` for the last two, which
//! returned a dedicated `InterpreterState` variant instead of a plain value -
//! the same role [`BubbleUp`] plays here.

use crate::ast::Node;
use crate::console::ConsoleKind;
use crate::error::{SimError, SimResult};
use crate::interpreter::{Flow, Interpreter};
use crate::step::{BubbleUp, StepType};
use crate::value::Value;

/// A bare expression used for its side effect: the value it pushes is
/// discarded on normal completion (a statement leaves the operand stack at
/// the depth it found it, §3) but left in place if it bubbled, since the
/// bubble's payload (a thrown/returned value) belongs to whoever catches it.
pub fn run_expression_statement(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let expression = match node {
        Node::ExpressionStatement { expression } => expression.as_ref(),
        _ => unreachable!("statement::run_expression_statement dispatched on a non-ExpressionStatement"),
    };
    interp.emit(node, StepType::Executing, None);
    let flow = crate::exec::dispatch(interp, expression)?;
    if flow.is_none() {
        interp.pop_value()?;
    }
    interp.emit(node, StepType::Executed, flow);
    Ok(flow)
}

fn declarator_name(id: &Node) -> SimResult<&str> {
    match id {
        Node::Identifier { name } => Ok(name),
        other => Err(SimError::MalformedAst(format!("expected Identifier, got {}", other.kind()))),
    }
}

/// Writes `value` directly into the nearest binding named `name`, bypassing
/// the TDZ check `identifier::write` applies to ordinary assignment - a
/// declaration's own initializer is exactly what lifts a `let`/`const`
/// binding out of the TDZ, not a violation of it.
fn initialize_binding(interp: &mut Interpreter, name: &str, value: Value) -> Flow {
    match interp.scopes.write_variable(name, value.clone(), true) {
        Ok(idx) => {
            interp.record_write(idx, name.to_string(), value);
            None
        }
        Err(_) => unreachable!("write_variable with create_global_if_missing never fails"),
    }
}

fn run_declarator(interp: &mut Interpreter, kind: crate::ast::DeclKind, decl: &crate::ast::VariableDeclarator) -> SimResult<Flow> {
    let name = declarator_name(&decl.id)?.to_string();
    match (&decl.init, kind) {
        // `var x;` with no initializer is a runtime no-op - hoisting already
        // bound it to `undefined`, and re-running the declaration must not
        // stomp a value assigned before this point (e.g. inside a loop).
        (None, crate::ast::DeclKind::Var) => Ok(None),
        (None, _) => Ok(initialize_binding(interp, &name, Value::undefined())),
        (Some(init), _) => {
            if let Some(bubble) = crate::exec::dispatch(interp, init)? {
                return Ok(Some(bubble));
            }
            let value = interp.pop_value()?;
            Ok(initialize_binding(interp, &name, value))
        }
    }
}

/// `VariableDeclaration` as a statement: hoisting already created the
/// bindings (§4.5); this is what actually runs each declarator's
/// initializer and writes the value (or, for `let`/`const` with none, lifts
/// the TDZ to `undefined`).
pub fn run_variable_declaration(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let (kind, declarations) = match node {
        Node::VariableDeclaration { kind, declarations } => (*kind, declarations),
        _ => unreachable!("statement::run_variable_declaration dispatched on a non-VariableDeclaration"),
    };
    interp.emit(node, StepType::Executing, None);
    let mut flow = None;
    for decl in declarations {
        flow = run_declarator(interp, kind, decl)?;
        if flow.is_some() {
            break;
        }
    }
    interp.emit(node, StepType::Executed, flow);
    Ok(flow)
}

pub fn run_return(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let argument = match node {
        Node::ReturnStatement { argument } => argument.as_deref(),
        _ => unreachable!("statement::run_return dispatched on a non-ReturnStatement"),
    };
    interp.emit(node, StepType::Executing, None);
    let flow = match argument {
        Some(expr) => match crate::exec::dispatch(interp, expr)? {
            Some(bubble) => Some(bubble),
            None => Some(BubbleUp::Return),
        },
        None => {
            interp.push_value(Value::undefined());
            Some(BubbleUp::Return)
        }
    };
    interp.emit(node, StepType::Executed, flow);
    Ok(flow)
}

/// `throw expr`: the thrown value stays on the operand stack (it's what a
/// surrounding `try`/`catch` hands to `hoist_catch_entry`), and a matching
/// `error` entry is appended to the console log (§4.6, §7).
pub fn run_throw(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let argument = match node {
        Node::ThrowStatement { argument } => argument.as_ref(),
        _ => unreachable!("statement::run_throw dispatched on a non-ThrowStatement"),
    };
    interp.emit(node, StepType::Executing, None);
    let flow = match crate::exec::dispatch(interp, argument)? {
        Some(bubble) => Some(bubble),
        None => {
            let thrown = interp.memval.peek(0).cloned().unwrap_or_else(Value::undefined);
            interp.console.push(ConsoleKind::Error, vec![thrown]);
            Some(BubbleUp::Throw)
        }
    };
    interp.emit(node, StepType::Executed, flow);
    Ok(flow)
}

pub fn run_break(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    interp.emit(node, StepType::Executing, None);
    interp.emit(node, StepType::Executed, Some(BubbleUp::Break));
    Ok(Some(BubbleUp::Break))
}

pub fn run_continue(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    interp.emit(node, StepType::Executing, None);
    interp.emit(node, StepType::Executed, Some(BubbleUp::Continue));
    Ok(Some(BubbleUp::Continue))
}

pub fn run_empty(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    interp.emit(node, StepType::Executing, None);
    interp.emit(node, StepType::Executed, None);
    Ok(None)
}
