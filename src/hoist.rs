//! The hoisting pass (§4.5): a pre-execution scan of a block's direct
//! statement list that creates every binding the block will need before any
//! statement runs. Grounded on boa's per-`Executable` declaration handling
//! in `exec/declaration/mod.rs` (`FunctionDecl`/`VarDeclList`/
//! `LetDeclList`/`ConstDeclList`), collapsed into a single pass that also
//! covers parameter binding for function/catch entry.

use crate::ast::Node;
use crate::error::{SimError, SimResult};
use crate::interpreter::{Flow, Interpreter};
use crate::scope::DeclarationKind;
use crate::step::DeclarationRecord;
use crate::value::Value;

fn identifier_name(node: &Node) -> SimResult<&str> {
    match node {
        Node::Identifier { name } => Ok(name),
        other => Err(SimError::MalformedAst(format!("expected Identifier, got {}", other.kind()))),
    }
}

/// Scans `body`'s direct statements (no descent into nested functions or
/// blocks) and declares functions, `var`s, and `let`/`const`s in source
/// order, into the interpreter's current scope.
fn collect_block_declarations(
    interp: &mut Interpreter,
    body: &[Node],
    out: &mut Vec<DeclarationRecord>,
) -> SimResult<()> {
    let scope_index = interp.scopes.current_index();
    for stmt in body {
        match stmt {
            Node::FunctionDeclaration { id, .. } => {
                let name = identifier_name(
                    id.as_deref()
                        .ok_or_else(|| SimError::MalformedAst("FunctionDeclaration without id".to_string()))?,
                )?
                .to_string();
                let r = crate::exec::function::allocate_function_object(interp, stmt);
                let value = Value::reference(r);
                interp.declare(&name, DeclarationKind::Function, value.clone());
                out.push(DeclarationRecord {
                    declaration_kind: DeclarationKind::Function,
                    variable_name: name,
                    initial_value: value,
                    scope_index,
                });
            }
            Node::VariableDeclaration { kind, declarations } => {
                let declaration_kind = match kind {
                    crate::ast::DeclKind::Var => DeclarationKind::Var,
                    crate::ast::DeclKind::Let => DeclarationKind::Let,
                    crate::ast::DeclKind::Const => DeclarationKind::Const,
                };
                let initial = match declaration_kind {
                    DeclarationKind::Var => Value::undefined(),
                    _ => Value::not_initialized(),
                };
                for decl in declarations {
                    let name = identifier_name(&decl.id)?.to_string();
                    interp.declare(&name, declaration_kind, initial.clone());
                    out.push(DeclarationRecord {
                        declaration_kind,
                        variable_name: name,
                        initial_value: initial.clone(),
                        scope_index,
                    });
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Hoists a plain block (`Program`, `BlockStatement`, `try`/`finally`
/// bodies): no parameters to bind, just the function/var/let/const scan.
pub fn hoist_block(interp: &mut Interpreter, node: &Node, body: &[Node]) -> SimResult<()> {
    let mut declarations = Vec::new();
    collect_block_declarations(interp, body, &mut declarations)?;
    interp.emit_hoisting(node, declarations);
    Ok(())
}

/// Binds a single parameter name to `value`, running its default
/// initializer first if `value` is `undefined` and the parameter carries an
/// `AssignmentPattern` (§4.5).
fn bind_parameter(
    interp: &mut Interpreter,
    param: &Node,
    value: Value,
    out: &mut Vec<DeclarationRecord>,
) -> SimResult<Flow> {
    let scope_index = interp.scopes.current_index();
    let (name_node, default) = match param {
        Node::AssignmentPattern { left, right } => (left.as_ref(), Some(right.as_ref())),
        other => (other, None),
    };
    let name = identifier_name(name_node)?.to_string();
    let bound_value = if value.is_undefined() {
        match default {
            Some(default) => {
                if let Some(bubble) = crate::exec::dispatch(interp, default)? {
                    return Ok(Some(bubble));
                }
                interp.pop_value()?
            }
            None => value,
        }
    } else {
        value
    };
    interp.declare(&name, DeclarationKind::Param, bound_value.clone());
    out.push(DeclarationRecord {
        declaration_kind: DeclarationKind::Param,
        variable_name: name,
        initial_value: bound_value,
        scope_index,
    });
    Ok(None)
}

/// Pops the argument count and that many argument values off the operand
/// stack (pushed there by the call protocol, §4.6 steps 2-3), restoring
/// source order. Shared by function-body entry and native-function calls
/// (`console.*`), neither of which care how the other consumes arguments.
pub fn pop_call_arguments(interp: &mut Interpreter) -> SimResult<Vec<Value>> {
    let arg_count_value = interp.pop_value()?;
    let arg_count = crate::value::conversions::to_number(&arg_count_value, &interp.heap) as usize;
    let mut args = Vec::with_capacity(arg_count);
    for _ in 0..arg_count {
        args.push(interp.pop_value()?);
    }
    args.reverse();
    Ok(args)
}

/// Hoists a function body on entry (§4.5, call protocol step 7): consumes
/// the argument count and that many values off the operand stack (pushed
/// there by the call protocol), binds them to `params` left to right, then
/// runs the ordinary block scan over `body`. Emits one combined `hoisting`
/// step covering both parameters and body declarations.
pub fn hoist_function_entry(
    interp: &mut Interpreter,
    node: &Node,
    params: &[Node],
    body: &[Node],
) -> SimResult<Flow> {
    let args = pop_call_arguments(interp)?;

    let mut declarations = Vec::new();
    for (i, param) in params.iter().enumerate() {
        let value = args.get(i).cloned().unwrap_or_else(Value::undefined);
        if let Some(bubble) = bind_parameter(interp, param, value, &mut declarations)? {
            return Ok(Some(bubble));
        }
    }
    collect_block_declarations(interp, body, &mut declarations)?;
    interp.emit_hoisting(node, declarations);
    Ok(None)
}

/// Hoists a `catch` body: binds the thrown value (already on the operand
/// stack) to the clause's parameter, if any, then runs the ordinary block
/// scan (§4.6 try/catch).
pub fn hoist_catch_entry(
    interp: &mut Interpreter,
    node: &Node,
    param: Option<&Node>,
    body: &[Node],
) -> SimResult<Flow> {
    let mut declarations = Vec::new();
    match param {
        Some(param) => {
            let thrown = interp.pop_value()?;
            if let Some(bubble) = bind_parameter(interp, param, thrown, &mut declarations)? {
                return Ok(Some(bubble));
            }
        }
        None => {
            // No catch parameter: the thrown value is discarded.
            interp.pop_value()?;
        }
    }
    collect_block_declarations(interp, body, &mut declarations)?;
    interp.emit_hoisting(node, declarations);
    Ok(None)
}
