//! `TryStatement` (§4.6 "try/catch/finally"), grounded on boa's
//! `Try::run` in `exec/try_node/mod.rs`, which ran the block, optionally
//! routed a thrown value into the catch binding, and always ran the
//! finalizer last - a bubble escaping the finalizer overrides whatever the
//! block/catch were carrying, exactly as it does here.

use crate::ast::Node;
use crate::error::SimResult;
use crate::interpreter::{Flow, Interpreter};
use crate::scope::ScopeKind;
use crate::step::{BubbleUp, StepType};

pub fn run(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let (block, handler, finalizer) = match node {
        Node::TryStatement { block, handler, finalizer } => (block.as_ref(), handler.as_ref(), finalizer.as_deref()),
        _ => unreachable!("try_node::run dispatched on a non-TryStatement"),
    };
    interp.emit(node, StepType::Executing, None);

    let block_body = crate::exec::block::body_of(block)?;
    let mut flow = crate::exec::block::run_in_new_scope(interp, block, block_body, ScopeKind::Try)?;

    if matches!(flow, Some(BubbleUp::Throw)) {
        if let Some(clause) = handler {
            let catch_body = crate::exec::block::body_of(&clause.body)?;
            interp.push_scope(&clause.body, ScopeKind::Catch);
            let entry_flow =
                crate::hoist::hoist_catch_entry(interp, &clause.body, clause.param.as_deref(), catch_body)?;
            let catch_flow = match entry_flow {
                Some(bubble) => Some(bubble),
                None => crate::exec::block::run_statements(interp, catch_body)?,
            };
            interp.pop_scope(&clause.body, catch_flow);
            flow = catch_flow;
        }
    }

    if let Some(finalizer) = finalizer {
        let finally_body = crate::exec::block::body_of(finalizer)?;
        let finally_flow = crate::exec::block::run_in_new_scope(interp, finalizer, finally_body, ScopeKind::Finally)?;
        if finally_flow.is_some() {
            flow = finally_flow;
        }
    }

    interp.emit(node, StepType::Executed, flow);
    Ok(flow)
}
