//! `ecma_trace`: a deterministic, step-by-step ECMAScript execution
//! simulator (§1, §3). Given a parsed ESTree-shaped program, [`run`]
//! produces an ordered trace of [`crate::step::Step`]s suitable for driving
//! a visualizer - every scope push/pop, variable write, heap mutation, and
//! operand-stack transition the execution pass makes along the way.
//!
//! Grounded on boa (<https://github.com/boa-dev/boa>), whose tree-walking
//! interpreter (`boa/src/exec/mod.rs`, pre-bytecode-VM) plays the role of
//! "HOW to walk this AST" throughout this crate; the big difference is that
//! boa discards its intermediate state once each node finishes, while this
//! simulator's entire purpose is to keep every intermediate state around as
//! the trace.
//!
//! This crate does not parse JavaScript source itself (§1's Non-goals) - a
//! host feeds it an already-parsed [`ast::Node::Program`], typically
//! deserialized from ESTree JSON via `serde_json`.

pub mod ast;
pub mod console;
pub mod error;
pub mod exec;
pub mod heap;
pub mod hoist;
pub mod interpreter;
pub mod memval;
pub mod scope;
pub mod step;
pub mod value;

use crate::ast::Node;
use crate::error::SimResult;
use crate::interpreter::Interpreter;
use crate::step::Step;

/// Runs `program` from a fresh [`Interpreter`] and returns its complete step
/// log (§6). A script-level uncaught throw is not itself a [`SimError`] -
/// see [`error::SimError`]'s module docs for the simulated/simulator
/// distinction - so this can return `Ok` with a trace whose final step
/// carries `bubble_up: Some(BubbleUp::Throw)`.
///
/// [`SimError`]: error::SimError
pub fn run(program: &Node) -> SimResult<Vec<Step>> {
    let mut interpreter = Interpreter::new();
    interpreter.run(program)
}
