//! Class constructs (§4.6, §9): explicitly out of normative scope beyond
//! acknowledging that the node exists. Each handler emits a single
//! `executing`/`executed` pair with no memory or operand-stack effect -
//! grounded on boa's own staged class rollout, where `exec/mod.rs` carried
//! a bare `Node::Class` arm for a long stretch before class semantics
//! actually landed.

use crate::ast::Node;
use crate::error::SimResult;
use crate::interpreter::{Flow, Interpreter};
use crate::step::StepType;

fn run_descriptive(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    interp.emit(node, StepType::Executing, None);
    interp.emit(node, StepType::Executed, None);
    Ok(None)
}

pub fn run_class_declaration(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    run_descriptive(interp, node)
}

pub fn run_class_body(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    run_descriptive(interp, node)
}

pub fn run_method_definition(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    run_descriptive(interp, node)
}

pub fn run_property_definition(interp: &mut Interpreter, node: &Node) -> SimResult<Flow> {
    run_descriptive(interp, node)
}
