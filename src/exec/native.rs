//! Native calls: the handful of host functions the call protocol recognizes
//! without an AST body (§4.6 treats `console.*` as ambient, not user code).
//! Grounded on boa's `console` builtin (`boa/src/builtins/console/mod.rs`),
//! which likewise intercepts its methods natively instead of interpreting a
//! function body; here the call protocol's steps 7-10 (push a function
//! scope, hoist parameters, run the body) are simply skipped in favor of
//! appending a [`crate::console::ConsoleEntry`] and returning `undefined`.

use crate::ast::Node;
use crate::console::ConsoleKind;
use crate::error::SimResult;
use crate::heap::NativeFunction;
use crate::interpreter::{Flow, Interpreter};
use crate::step::StepType;
use crate::value::Value;

fn console_kind(native: NativeFunction) -> ConsoleKind {
    match native {
        NativeFunction::ConsoleLog => ConsoleKind::Log,
        NativeFunction::ConsoleError => ConsoleKind::Error,
        NativeFunction::ConsoleInfo => ConsoleKind::Info,
        NativeFunction::ConsoleWarn => ConsoleKind::Warn,
        NativeFunction::ConsoleDebug => ConsoleKind::Debug,
    }
}

/// Called from `call::run` once the callee has resolved to a
/// [`NativeFunction`] instead of a user-defined `FunctionObject`. Consumes
/// the argument count/values the call protocol already pushed, appends the
/// console entry, and pushes `undefined` as the call's result.
pub fn call(interp: &mut Interpreter, node: &Node, native: NativeFunction) -> SimResult<Flow> {
    let args = crate::hoist::pop_call_arguments(interp)?;
    interp.console.push(console_kind(native), args);
    interp.push_value(Value::undefined());
    interp.emit(node, StepType::Evaluated, None);
    Ok(None)
}
