//! `IfStatement` / `ConditionalExpression` (§4.6), grounded on boa's
//! `Node::If`/ternary handling in `exec/mod.rs`. A `BlockStatement` consequent
//! or alternate gets its own scope tagged `conditional` (§5's scope-kind
//! table) rather than the plain `block` a nested `{ }` elsewhere gets; a
//! bare, brace-less branch introduces no scope at all, matching JS grammar.

use crate::ast::Node;
use crate::error::SimResult;
use crate::interpreter::{Flow, Interpreter};
use crate::scope::ScopeKind;
use crate::step::StepType;
use crate::value::conversions::to_boolean;

pub fn run_if(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let (test, consequent, alternate) = match node {
        Node::IfStatement {
            test,
            consequent,
            alternate,
        } => (test.as_ref(), consequent.as_ref(), alternate.as_deref()),
        _ => unreachable!("control::run_if dispatched on a non-IfStatement"),
    };
    interp.emit(node, StepType::Executing, None);

    if let Some(bubble) = crate::exec::dispatch(interp, test)? {
        interp.emit(node, StepType::Executed, Some(bubble));
        return Ok(Some(bubble));
    }
    let test_value = interp.pop_value()?;

    let bubble = if to_boolean(&test_value) {
        crate::exec::block::run_branch(interp, consequent, ScopeKind::Conditional)?
    } else if let Some(alternate) = alternate {
        crate::exec::block::run_branch(interp, alternate, ScopeKind::Conditional)?
    } else {
        None
    };
    interp.emit(node, StepType::Executed, bubble);
    Ok(bubble)
}

/// `a ? b : c`: ternary branches are always expressions, never blocks, so
/// no scope is ever pushed here regardless of the chosen branch.
pub fn run_conditional(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let (test, consequent, alternate) = match node {
        Node::ConditionalExpression {
            test,
            consequent,
            alternate,
        } => (test.as_ref(), consequent.as_ref(), alternate.as_ref()),
        _ => unreachable!("control::run_conditional dispatched on a non-ConditionalExpression"),
    };
    interp.emit(node, StepType::Evaluating, None);

    if let Some(bubble) = crate::exec::dispatch(interp, test)? {
        interp.emit(node, StepType::Evaluated, Some(bubble));
        return Ok(Some(bubble));
    }
    let test_value = interp.pop_value()?;
    let branch = if to_boolean(&test_value) { consequent } else { alternate };

    let bubble = crate::exec::dispatch(interp, branch)?;
    interp.emit(node, StepType::Evaluated, bubble);
    Ok(bubble)
}
