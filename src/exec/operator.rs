//! `BinaryExpression`, `LogicalExpression`, `UnaryExpression`,
//! `UpdateExpression`, `AssignmentExpression` (§4.4, §4.6). Grounded on
//! boa's `BinOp`/`UnaryOp`/`Assign` arms in `exec/mod.rs`; logical operators
//! are handled here rather than in `value::operations` because they need
//! lazy evaluation of their right-hand side (§9), which only the traversal
//! driver can provide.

use crate::ast::Node;
use crate::error::{SimError, SimResult};
use crate::heap::Ref;
use crate::interpreter::{Flow, Interpreter};
use crate::step::StepType;
use crate::value::conversions::to_boolean;
use crate::value::operations::{self, BinaryOp, UnaryOp};
use crate::value::Value;

fn map_binary(operator: &str) -> SimResult<BinaryOp> {
    use BinaryOp::*;
    Ok(match operator {
        "+" => Add,
        "-" => Sub,
        "*" => Mul,
        "/" => Div,
        "%" => Mod,
        "**" => Exp,
        "==" => Equal,
        "!=" => NotEqual,
        "===" => StrictEqual,
        "!==" => StrictNotEqual,
        "<" => LessThan,
        "<=" => LessThanOrEqual,
        ">" => GreaterThan,
        ">=" => GreaterThanOrEqual,
        "&" => BitAnd,
        "|" => BitOr,
        "^" => BitXor,
        "<<" => Shl,
        ">>" => Shr,
        ">>>" => UShr,
        "in" => In,
        "instanceof" => InstanceOf,
        other => return Err(SimError::MalformedAst(format!("unknown binary operator {other}"))),
    })
}

fn map_unary(operator: &str) -> SimResult<UnaryOp> {
    use UnaryOp::*;
    Ok(match operator {
        "-" => Minus,
        "+" => Plus,
        "!" => Not,
        "~" => BitNot,
        "void" => Void,
        other => return Err(SimError::MalformedAst(format!("unknown unary operator {other}"))),
    })
}

pub fn run_binary(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let (operator, left, right) = match node {
        Node::BinaryExpression { operator, left, right } => (operator.as_str(), left.as_ref(), right.as_ref()),
        _ => unreachable!("operator::run_binary dispatched on a non-BinaryExpression"),
    };
    interp.emit(node, StepType::Evaluating, None);
    if let Some(bubble) = crate::exec::dispatch(interp, left)? {
        interp.emit(node, StepType::Evaluated, Some(bubble));
        return Ok(Some(bubble));
    }
    if let Some(bubble) = crate::exec::dispatch(interp, right)? {
        interp.emit(node, StepType::Evaluated, Some(bubble));
        return Ok(Some(bubble));
    }
    let right_value = interp.pop_value()?;
    let left_value = interp.pop_value()?;
    let op = map_binary(operator)?;
    let bubble = match operations::binary_op(op, &left_value, &right_value, &interp.heap) {
        Ok(value) => {
            interp.push_value(value);
            None
        }
        Err(message) => interp.throw_error("TypeError", message),
    };
    interp.emit(node, StepType::Evaluated, bubble);
    Ok(bubble)
}

/// Short-circuit `&&`/`||`/`??`: the right-hand side is only traversed (and
/// so only emits steps) when the left side doesn't already decide the
/// result (§4.4, §9).
pub fn run_logical(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let (operator, left, right) = match node {
        Node::LogicalExpression { operator, left, right } => (operator.as_str(), left.as_ref(), right.as_ref()),
        _ => unreachable!("operator::run_logical dispatched on a non-LogicalExpression"),
    };
    interp.emit(node, StepType::Evaluating, None);
    if let Some(bubble) = crate::exec::dispatch(interp, left)? {
        interp.emit(node, StepType::Evaluated, Some(bubble));
        return Ok(Some(bubble));
    }
    let left_value = interp.pop_value()?;
    let short_circuits = match operator {
        "&&" => !to_boolean(&left_value),
        "||" => to_boolean(&left_value),
        "??" => !left_value.is_null_or_undefined(),
        other => return Err(SimError::MalformedAst(format!("unknown logical operator {other}"))),
    };
    let result = if short_circuits {
        left_value
    } else {
        if let Some(bubble) = crate::exec::dispatch(interp, right)? {
            interp.emit(node, StepType::Evaluated, Some(bubble));
            return Ok(Some(bubble));
        }
        interp.pop_value()?
    };
    interp.push_value(result);
    interp.emit(node, StepType::Evaluated, None);
    Ok(None)
}

pub fn run_unary(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let (operator, argument) = match node {
        Node::UnaryExpression { operator, argument, .. } => (operator.as_str(), argument.as_ref()),
        _ => unreachable!("operator::run_unary dispatched on a non-UnaryExpression"),
    };
    interp.emit(node, StepType::Evaluating, None);
    let bubble = match operator {
        "delete" => run_delete(interp, argument)?,
        "typeof" => run_typeof(interp, argument)?,
        _ => {
            if let Some(bubble) = crate::exec::dispatch(interp, argument)? {
                Some(bubble)
            } else {
                let value = interp.pop_value()?;
                let op = map_unary(operator)?;
                let result = operations::unary_op(op, &value, &interp.heap);
                interp.push_value(result);
                None
            }
        }
    };
    interp.emit(node, StepType::Evaluated, bubble);
    Ok(bubble)
}

fn run_delete(interp: &mut Interpreter, argument: &Node) -> SimResult<Flow> {
    match argument {
        Node::MemberExpression { .. } => crate::exec::member::delete(interp, argument),
        Node::Identifier { name } => {
            let is_global = interp
                .scopes
                .get(0)
                .and_then(|scope| scope.get(name))
                .map(|binding| binding.declaration_kind == crate::scope::DeclarationKind::Global)
                .unwrap_or(false);
            interp.push_value(Value::boolean(is_global));
            Ok(None)
        }
        other => Err(SimError::MalformedAst(format!("unsupported delete target, got {}", other.kind()))),
    }
}

fn run_typeof(interp: &mut Interpreter, argument: &Node) -> SimResult<Flow> {
    let prior = interp.typeof_context;
    interp.typeof_context = true;
    let bubble = crate::exec::dispatch(interp, argument);
    interp.typeof_context = prior;
    if let Some(bubble) = bubble? {
        return Ok(Some(bubble));
    }
    let value = interp.pop_value()?;
    let type_str = value.type_of(&interp.heap);
    interp.push_value(Value::string(type_str));
    Ok(None)
}

pub fn run_update(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let (operator, argument, prefix) = match node {
        Node::UpdateExpression { operator, argument, prefix } => (operator.as_str(), argument.as_ref(), *prefix),
        _ => unreachable!("operator::run_update dispatched on a non-UpdateExpression"),
    };
    interp.emit(node, StepType::Evaluating, None);
    let increment = operator == "++";

    let bubble = match argument {
        Node::Identifier { name } => {
            let current = match interp.scopes.lookup(name) {
                Some((value, _)) if value.is_not_initialized() => Err(interp.throw_error(
                    "ReferenceError",
                    format!("Cannot access '{name}' before initialization"),
                )),
                Some((value, _)) => Ok(value),
                None => Err(interp.throw_error("ReferenceError", format!("{name} is not defined"))),
            };
            match current {
                Err(bubble) => bubble,
                Ok(value) => {
                    let result = operations::update_op(&value, &interp.heap, increment, prefix);
                    match crate::exec::identifier::write(interp, name, result.new_value) {
                        Some(bubble) => Some(bubble),
                        None => {
                            interp.push_value(result.return_value);
                            None
                        }
                    }
                }
            }
        }
        Node::MemberExpression { .. } => match crate::exec::member::read_for_update(interp, argument)? {
            Ok((r, key, value)) => {
                let result = operations::update_op(&value, &interp.heap, increment, prefix);
                interp.heap.write_property(r, &key, result.new_value.clone());
                interp.record_write_property(r, key, result.new_value);
                interp.push_value(result.return_value);
                None
            }
            Err(bubble) => bubble,
        },
        other => return Err(SimError::MalformedAst(format!("unsupported update target, got {}", other.kind()))),
    };
    interp.emit(node, StepType::Evaluated, bubble);
    Ok(bubble)
}

pub fn run_assignment(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    let (operator, left, right) = match node {
        Node::AssignmentExpression { operator, left, right } => (operator.as_str(), left.as_ref(), right.as_ref()),
        _ => unreachable!("operator::run_assignment dispatched on a non-AssignmentExpression"),
    };
    interp.emit(node, StepType::Evaluating, None);

    let bubble = match operator {
        "=" => assign_plain(interp, left, right)?,
        "||=" | "&&=" | "??=" => assign_logical(interp, operator, left, right)?,
        _ => assign_compound(interp, operator, left, right)?,
    };
    interp.emit(node, StepType::Evaluated, bubble);
    Ok(bubble)
}

fn assign_plain(interp: &mut Interpreter, left: &Node, right: &Node) -> SimResult<Flow> {
    if let Some(bubble) = crate::exec::dispatch(interp, right)? {
        return Ok(Some(bubble));
    }
    let value = interp.pop_value()?;
    write_target(interp, left, value)
}

fn assign_compound(interp: &mut Interpreter, operator: &str, left: &Node, right: &Node) -> SimResult<Flow> {
    let binary_operator = operator.trim_end_matches('=');
    let op = map_binary(binary_operator)?;

    let (target, current) = match resolve_target(interp, left)? {
        Ok(pair) => pair,
        Err(bubble) => return Ok(bubble),
    };
    if let Some(bubble) = crate::exec::dispatch(interp, right)? {
        return Ok(Some(bubble));
    }
    let right_value = interp.pop_value()?;
    match operations::binary_op(op, &current, &right_value, &interp.heap) {
        Ok(value) => write_resolved(interp, target, value),
        Err(message) => Ok(interp.throw_error("TypeError", message)),
    }
}

fn assign_logical(interp: &mut Interpreter, operator: &str, left: &Node, right: &Node) -> SimResult<Flow> {
    let (target, current) = match resolve_target(interp, left)? {
        Ok(pair) => pair,
        Err(bubble) => return Ok(bubble),
    };
    let short_circuits = match operator {
        "||=" => to_boolean(&current),
        "&&=" => !to_boolean(&current),
        "??=" => !current.is_null_or_undefined(),
        _ => unreachable!(),
    };
    if short_circuits {
        interp.push_value(current);
        return Ok(None);
    }
    if let Some(bubble) = crate::exec::dispatch(interp, right)? {
        return Ok(Some(bubble));
    }
    let value = interp.pop_value()?;
    write_resolved(interp, target, value)
}

/// An assignment target resolved to the spot it will be written back to -
/// for a `MemberExpression` this is the object/key pair `resolve` already
/// evaluated, so the write-back doesn't re-evaluate them (§4.6 "compound
/// forms read first, apply the operator, then write": a single reference
/// evaluation, not two).
enum AssignTarget {
    Identifier(String),
    Member(Ref, String),
}

/// Reads the current value of an assignment target without disturbing the
/// operand stack's net depth, returning the resolved target alongside it so
/// the caller can write back without re-resolving (used by compound/logical
/// assignment).
fn resolve_target(interp: &mut Interpreter, target: &Node) -> SimResult<Result<(AssignTarget, Value), Flow>> {
    match target {
        Node::Identifier { name } => match interp.scopes.lookup(name) {
            Some((value, _)) if value.is_not_initialized() => Ok(Err(interp.throw_error(
                "ReferenceError",
                format!("Cannot access '{name}' before initialization"),
            ))),
            Some((value, _)) => Ok(Ok((AssignTarget::Identifier(name.clone()), value))),
            None => Ok(Err(interp.throw_error("ReferenceError", format!("{name} is not defined")))),
        },
        Node::MemberExpression { .. } => match crate::exec::member::read_for_update(interp, target)? {
            Ok((r, key, value)) => Ok(Ok((AssignTarget::Member(r, key), value))),
            Err(bubble) => Ok(Err(bubble)),
        },
        other => Err(SimError::MalformedAst(format!("unsupported assignment target, got {}", other.kind()))),
    }
}

/// Writes `value` to a target already resolved by `resolve_target`, pushing
/// it as the expression's result on success.
fn write_resolved(interp: &mut Interpreter, target: AssignTarget, value: Value) -> SimResult<Flow> {
    let bubble = match target {
        AssignTarget::Identifier(name) => crate::exec::identifier::write(interp, &name, value.clone()),
        AssignTarget::Member(r, key) => {
            interp.heap.write_property(r, &key, value.clone());
            interp.record_write_property(r, key, value.clone());
            None
        }
    };
    if let Some(bubble) = bubble {
        return Ok(Some(bubble));
    }
    interp.push_value(value);
    Ok(None)
}

fn write_target(interp: &mut Interpreter, target: &Node, value: Value) -> SimResult<Flow> {
    match target {
        Node::Identifier { name } => {
            if let Some(bubble) = crate::exec::identifier::write(interp, name, value.clone()) {
                return Ok(Some(bubble));
            }
            interp.push_value(value);
            Ok(None)
        }
        Node::MemberExpression { .. } => match crate::exec::member::write(interp, target, value.clone())? {
            Some(bubble) => Ok(Some(bubble)),
            None => {
                interp.push_value(value);
                Ok(None)
            }
        },
        other => Err(SimError::MalformedAst(format!("unsupported assignment target, got {}", other.kind()))),
    }
}
