//! `ForStatement` (§4.6 "Loops"), grounded on boa's `ForLoop::run` in
//! `exec/iteration/mod.rs`, which threaded an `InterpreterState` through the
//! init/test/body/update cycle and special-cased `Break`/`Continue`. The
//! whole loop lives in a single `loop` scope pushed once at entry (so a
//! `let`-declared counter is scoped to the loop, not reintroduced per
//! iteration) rather than boa's per-iteration environment.

use crate::ast::Node;
use crate::error::SimResult;
use crate::interpreter::{Flow, Interpreter};
use crate::scope::ScopeKind;
use crate::step::{BubbleUp, StepType};
use crate::value::conversions::to_boolean;

pub fn run_for(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let (init, test, update, body) = match node {
        Node::ForStatement { init, test, update, body } => {
            (init.as_deref(), test.as_deref(), update.as_deref(), body.as_ref())
        }
        _ => unreachable!("iteration::run_for dispatched on a non-ForStatement"),
    };
    interp.emit(node, StepType::Executing, None);
    interp.push_scope(node, ScopeKind::Loop);

    let flow = run_body(interp, init, test, update, body)?;

    interp.pop_scope(node, flow);
    interp.emit(node, StepType::Executed, flow);
    Ok(flow)
}

fn run_body(
    interp: &mut Interpreter,
    init: Option<&Node>,
    test: Option<&Node>,
    update: Option<&Node>,
    body: &Node,
) -> SimResult<Flow> {
    if let Some(init) = init {
        if matches!(init, Node::VariableDeclaration { .. }) {
            crate::hoist::hoist_block(interp, init, std::slice::from_ref(init))?;
        }
        if let Some(bubble) = crate::exec::dispatch(interp, init)? {
            return Ok(Some(bubble));
        }
    }

    loop {
        if let Some(test_expr) = test {
            if let Some(bubble) = crate::exec::dispatch(interp, test_expr)? {
                return Ok(Some(bubble));
            }
            let value = interp.pop_value()?;
            if !to_boolean(&value) {
                break;
            }
        }

        match crate::exec::block::run_branch(interp, body, ScopeKind::Block)? {
            Some(BubbleUp::Break) => break,
            Some(BubbleUp::Continue) | None => {}
            Some(other) => return Ok(Some(other)),
        }

        if let Some(update_expr) = update {
            if let Some(bubble) = crate::exec::dispatch(interp, update_expr)? {
                return Ok(Some(bubble));
            }
            // `update` is an expression in statement position - its value
            // is evaluated for side effect only and discarded (§4.6).
            interp.pop_value()?;
        }
    }

    Ok(None)
}
