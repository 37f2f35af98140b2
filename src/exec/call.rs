//! `CallExpression`, implementing the ten-step protocol of §4.6 exactly.
//! Grounded on boa's `Interpreter::call`/`Node::Call` handling in
//! `exec/mod.rs`, which evaluated callee and arguments, type-checked the
//! callee against `Value::Object` wrapping a `Function`, and then inlined
//! the call; here every step of that protocol is an observable trace step
//! instead of an implementation detail.

use crate::ast::Node;
use crate::error::SimResult;
use crate::heap::HeapObject;
use crate::interpreter::{Flow, Interpreter};
use crate::scope::ScopeKind;
use crate::step::{BubbleUp, StepType};
use crate::value::Value;

pub fn run(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let (callee, arguments) = match node {
        Node::CallExpression { callee, arguments } => (callee.as_ref(), arguments),
        _ => unreachable!("call::run dispatched on a non-CallExpression"),
    };

    interp.emit(node, StepType::Evaluating, None);

    // 1. Evaluate callee; its reference is left on the stack.
    if let Some(bubble) = crate::exec::dispatch(interp, callee)? {
        interp.emit(node, StepType::Evaluated, Some(bubble));
        return Ok(Some(bubble));
    }

    // 2. Evaluate arguments left-to-right, pushing each.
    for arg in arguments {
        if let Some(bubble) = crate::exec::dispatch(interp, arg)? {
            interp.emit(node, StepType::Evaluated, Some(bubble));
            return Ok(Some(bubble));
        }
    }

    // 3. Push the argument count.
    interp.push_value(Value::number(arguments.len() as f64));

    // 4. Re-push the callee reference so it is visible in the function_call
    // step (it sits `arguments.len() + 1` slots below the count we just
    // pushed: the count itself, then each argument).
    let callee_value = interp
        .memval
        .peek(arguments.len() + 1)
        .cloned()
        .unwrap_or_else(Value::undefined);
    interp.push_value(callee_value.clone());

    // 5. Emit the function_call step, then pop the re-pushed callee copy.
    interp.emit(node, StepType::FunctionCall, None);
    interp.pop_value()?;

    // The original callee reference from step 1 has served its purpose -
    // `callee_value` already holds everything the rest of the protocol
    // needs - so pop it too. Otherwise a completed call would leave
    // `[callee, result]` above its baseline instead of just `[result]`.
    interp.pop_value()?;

    // 6. Type-check the callee.
    let callee_ref = match callee_value
        .as_reference()
        .filter(|r| interp.heap.get(*r).map(HeapObject::is_function).unwrap_or(false))
    {
        Some(r) => r,
        None => {
            // Unwind the arg-count and argument values - they belong to the
            // aborted call protocol, not to whatever is above it on the stack.
            for _ in 0..=arguments.len() {
                interp.pop_value()?;
            }
            let description = crate::value::conversions::to_string(&callee_value, &interp.heap);
            let bubble = interp.throw_error("TypeError", format!("{description} is not a function"));
            interp.emit(node, StepType::Evaluated, bubble);
            return Ok(bubble);
        }
    };

    // 7. A native function (`console.*`) has no body to traverse; route it
    // to its host behavior and skip the rest of the call protocol.
    if let Some(HeapObject::Native(native)) = interp.heap.get(callee_ref) {
        let native = *native;
        return crate::exec::native::call(interp, node, native);
    }

    // Traverse the function body as a block; its hoisting pass consumes the
    // arg-count and argument values left on the stack.
    let function_node = match interp.heap.get(callee_ref) {
        Some(HeapObject::Function(f)) => f.node.clone(),
        _ => unreachable!("callee_ref was just verified to be a function"),
    };
    let (params, body_node) = crate::exec::function::params_and_body(&function_node)?;
    let body = crate::exec::function::body_statements(body_node);

    interp.push_scope(node, ScopeKind::Function);
    let entry_flow = crate::hoist::hoist_function_entry(interp, node, params, &body)?;
    let flow = match entry_flow {
        Some(bubble) => Some(bubble),
        None => crate::exec::block::run_statements(interp, &body)?,
    };
    interp.pop_scope(node, flow);

    match flow {
        // 8. Normal completion: implicit undefined return.
        None => {
            interp.push_value(Value::undefined());
            interp.emit(node, StepType::Evaluated, None);
            Ok(None)
        }
        // 9. Return bubble: the returned value is already on the stack.
        Some(BubbleUp::Return) => {
            interp.emit(node, StepType::Evaluated, Some(BubbleUp::Return));
            Ok(None)
        }
        // 10. Throw bubble: surface through the call as a throw.
        Some(BubbleUp::Throw) => {
            interp.emit(node, StepType::Evaluated, Some(BubbleUp::Throw));
            Ok(Some(BubbleUp::Throw))
        }
        Some(other) => {
            // A `break`/`continue` escaping a function body is malformed
            // input (no enclosing loop); surface it rather than silently
            // dropping it.
            interp.emit(node, StepType::Evaluated, Some(other));
            Ok(Some(other))
        }
    }
}
