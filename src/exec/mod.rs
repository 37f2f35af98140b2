//! The execution pass (§4.6): one module per AST node family, tied together
//! by [`dispatch`]. Mirrors boa's `impl Executable for Node` in
//! `exec/mod.rs`, which matched every `NodeBase` variant in one place and
//! ran it inline; here each family gets its own file and `dispatch` is the
//! sole recursion point every submodule calls back into.

pub mod block;
pub mod call;
pub mod class;
pub mod control;
pub mod function;
pub mod identifier;
pub mod iteration;
pub mod literal;
pub mod member;
pub mod native;
pub mod operator;
pub mod statement;
pub mod try_node;

use crate::ast::Node;
use crate::error::{SimError, SimResult};
use crate::interpreter::{Flow, Interpreter};
use crate::step::StepType;

/// Routes `node` to whichever submodule implements its execution-pass
/// semantics. Every traversal function in this tree recurses through this
/// single entry point rather than calling a submodule directly, so a step's
/// node-to-handler mapping lives in exactly one place.
pub fn dispatch(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    match node {
        Node::Program { .. } => Err(SimError::MalformedAst("Program cannot appear as a nested node".to_string())),
        Node::BlockStatement { body } => block::run_in_new_scope(interp, node, body, crate::scope::ScopeKind::Block),
        Node::ExpressionStatement { .. } => statement::run_expression_statement(interp, node),
        Node::EmptyStatement {} => statement::run_empty(interp, node),
        Node::VariableDeclaration { .. } => statement::run_variable_declaration(interp, node),
        // Bound during the enclosing block's hoisting pass; a direct
        // dispatch (block traversal already skips these) is a no-op.
        Node::FunctionDeclaration { .. } => Ok(None),
        Node::FunctionExpression { .. } | Node::ArrowFunctionExpression { .. } => function::run_expr(interp, node),
        Node::AssignmentPattern { .. } => Err(SimError::MalformedAst(
            "AssignmentPattern only appears inside a parameter list".to_string(),
        )),
        Node::IfStatement { .. } => control::run_if(interp, node),
        Node::ForStatement { .. } => iteration::run_for(interp, node),
        Node::ReturnStatement { .. } => statement::run_return(interp, node),
        Node::ThrowStatement { .. } => statement::run_throw(interp, node),
        Node::TryStatement { .. } => try_node::run(interp, node),
        Node::BreakStatement {} => statement::run_break(interp, node),
        Node::ContinueStatement {} => statement::run_continue(interp, node),
        Node::Identifier { .. } => identifier::run_read(interp, node),
        Node::Literal { .. } => literal::run_literal(interp, node),
        Node::ArrayExpression { .. } => literal::run_array(interp, node),
        Node::ObjectExpression { .. } => literal::run_object(interp, node),
        Node::CallExpression { .. } => call::run(interp, node),
        Node::MemberExpression { .. } => member::run_read(interp, node),
        Node::BinaryExpression { .. } => operator::run_binary(interp, node),
        Node::LogicalExpression { .. } => operator::run_logical(interp, node),
        Node::UnaryExpression { .. } => operator::run_unary(interp, node),
        Node::UpdateExpression { .. } => operator::run_update(interp, node),
        Node::AssignmentExpression { .. } => operator::run_assignment(interp, node),
        Node::ConditionalExpression { .. } => control::run_conditional(interp, node),
        Node::SequenceExpression { expressions } => run_sequence(interp, node, expressions),
        Node::ClassDeclaration { .. } => class::run_class_declaration(interp, node),
        Node::ClassBody { .. } => class::run_class_body(interp, node),
        Node::MethodDefinition { .. } => class::run_method_definition(interp, node),
        Node::PropertyDefinition { .. } => class::run_property_definition(interp, node),
    }
}

/// `(a, b, c)`: evaluates each expression left-to-right, discarding every
/// result but the last (§4.6).
fn run_sequence(interp: &mut Interpreter, node: &Node, expressions: &[Node]) -> SimResult<Flow> {
    interp.emit(node, StepType::Evaluating, None);
    for (i, expr) in expressions.iter().enumerate() {
        if let Some(bubble) = dispatch(interp, expr)? {
            interp.emit(node, StepType::Evaluated, Some(bubble));
            return Ok(Some(bubble));
        }
        if i + 1 < expressions.len() {
            interp.pop_value()?;
        }
    }
    interp.emit(node, StepType::Evaluated, None);
    Ok(None)
}
