//! Function/arrow literal evaluation and the machinery calls need to get
//! back from a `FunctionObject` to its params/body (§4.6 "Arrow/function
//! expressions"). Grounded on boa's `FunctionExpr`/`ArrowFunctionDecl`
//! `Executable` impls in `exec/declaration/mod.rs`, which built an ordinary
//! function object carrying the defining `Node` and the active
//! environment; here the environment is approximated by recording which
//! scope indices existed at allocation time (§9).

use std::borrow::Cow;
use std::rc::Rc;

use crate::ast::Node;
use crate::error::{SimError, SimResult};
use crate::heap::{FunctionObject, HeapObject, Ref};
use crate::interpreter::{Flow, Interpreter};
use crate::step::StepType;
use crate::value::Value;

fn name_and_arrow(node: &Node) -> (Option<String>, bool) {
    match node {
        Node::FunctionDeclaration { id, .. } | Node::FunctionExpression { id, .. } => {
            let name = id.as_deref().and_then(|n| match n {
                Node::Identifier { name } => Some(name.clone()),
                _ => None,
            });
            (name, false)
        }
        Node::ArrowFunctionExpression { .. } => (None, true),
        _ => (None, false),
    }
}

/// Allocates a `FunctionObject` from a function-shaped node, snapshotting
/// the scope chain in force right now as the closure's defining chain
/// (snapshot-at-allocation, §9). Does not record a step on its own - callers
/// decide whether the allocation is part of a hoisting step or an
/// expression-evaluation step.
pub fn allocate_function_object(interp: &mut Interpreter, node: &Node) -> Ref {
    let (name, is_arrow) = name_and_arrow(node);
    let closure_scope_chain = (0..=interp.scopes.current_index()).collect();
    let object = FunctionObject {
        node: Rc::new(node.clone()),
        name,
        is_arrow,
        closure_scope_chain,
    };
    interp.heap.allocate(HeapObject::Function(object))
}

/// `FunctionExpression` / `ArrowFunctionExpression` as an expression: push
/// the new reference as the evaluated result.
pub fn run_expr(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    interp.emit(node, StepType::Evaluating, None);
    let r = allocate_function_object(interp, node);
    interp.record_create(r);
    interp.push_value(Value::reference(r));
    interp.emit(node, StepType::Evaluated, None);
    Ok(None)
}

/// Pulls `(params, body)` out of a function-shaped node.
pub fn params_and_body(node: &Node) -> SimResult<(&[Node], &Node)> {
    match node {
        Node::FunctionDeclaration { params, body, .. }
        | Node::FunctionExpression { params, body, .. }
        | Node::ArrowFunctionExpression { params, body } => Ok((params, body)),
        other => Err(SimError::MalformedAst(format!("expected a function node, got {}", other.kind()))),
    }
}

/// Normalizes a function body into a statement list: a `BlockStatement`'s
/// body as-is, or a single synthetic `return` wrapping an expression-bodied
/// arrow function (`x => x + 1`).
pub fn body_statements(body: &Node) -> Cow<'_, [Node]> {
    match body {
        Node::BlockStatement { body } => Cow::Borrowed(body),
        other => Cow::Owned(vec![Node::ReturnStatement {
            argument: Some(Box::new(other.clone())),
        }]),
    }
}
