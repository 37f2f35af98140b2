//! Block traversal (§4.6): `Program`, `BlockStatement`, function bodies,
//! and catch bodies all share the same shape - push a scope (except the
//! pre-existing global scope), hoist, run statements in order skipping
//! `FunctionDeclaration` (already bound by hoisting), then pop. Grounded on
//! boa's `StatementList::run` in `exec/mod.rs`, which looped over each
//! statement and threaded `InterpreterState` to short-circuit on a bubble.

use crate::ast::Node;
use crate::error::{SimError, SimResult};
use crate::interpreter::{Flow, Interpreter};
use crate::scope::ScopeKind;

pub fn body_of(node: &Node) -> SimResult<&[Node]> {
    match node {
        Node::Program { body } | Node::BlockStatement { body } => Ok(body),
        other => Err(SimError::MalformedAst(format!("expected a block, got {}", other.kind()))),
    }
}

/// Runs `body`'s statements in order, skipping `FunctionDeclaration`s (bound
/// during hoisting), stopping at the first bubble.
pub fn run_statements(interp: &mut Interpreter, body: &[Node]) -> SimResult<Flow> {
    for stmt in body {
        if matches!(stmt, Node::FunctionDeclaration { .. }) {
            continue;
        }
        if let Some(bubble) = crate::exec::dispatch(interp, stmt)? {
            return Ok(Some(bubble));
        }
    }
    Ok(None)
}

/// The `Program` case: the global scope already exists (index 0), so this
/// hoists and executes directly into it without a push/pop pair.
pub fn run_in_current_scope(interp: &mut Interpreter, node: &Node, body: &[Node]) -> SimResult<Flow> {
    crate::hoist::hoist_block(interp, node, body)?;
    run_statements(interp, body)
}

/// Every other plain block: push a scope of `kind`, hoist, execute, pop -
/// even on a bubble, so the pop_scope step is still recorded (§4.6).
pub fn run_in_new_scope(interp: &mut Interpreter, node: &Node, body: &[Node], kind: ScopeKind) -> SimResult<Flow> {
    interp.push_scope(node, kind);
    crate::hoist::hoist_block(interp, node, body)?;
    let flow = run_statements(interp, body)?;
    interp.pop_scope(node, flow);
    Ok(flow)
}

/// Runs a statement-position branch that may or may not be a `BlockStatement`
/// (an `if` consequent/`for` body can be a single bare statement, which
/// introduces no scope of its own). Used by `if`/`for` (§5's scope-kind
/// table picks the scope kind when the branch is a real block).
pub fn run_branch(interp: &mut Interpreter, branch: &Node, kind: ScopeKind) -> SimResult<Flow> {
    match branch {
        Node::BlockStatement { body } => run_in_new_scope(interp, branch, body, kind),
        other => crate::exec::dispatch(interp, other),
    }
}
