//! Error handling for the simulator.
//!
//! There are two error classes (see the crate-level docs): *simulated*
//! errors, which are ECMAScript-visible values (`TypeError`, `ReferenceError`,
//! user `throw`) carried on the [`crate::memval::MemVal`] stack and propagated
//! via [`crate::step::BubbleUp::Throw`], and *simulator* errors, which are
//! internal failures of this crate and never observable as script-level
//! values. The latter are modeled here with [`thiserror`] and surfaced to the
//! host as a hard failure of [`crate::interpreter::Interpreter::run`].

use thiserror::Error;

/// An internal failure of the simulator itself: malformed input the
/// execution pass does not know how to handle. Never thrown as a
/// script-visible value.
///
/// This is deliberately narrow. A node type `dispatch` doesn't recognize
/// would be a variant here, but `dispatch`'s match is total over
/// [`crate::ast::Node`], so that failure mode can't occur; scope and heap
/// accesses are similarly infallible by construction (`ScopeStack::pop`
/// refuses to drop the global scope, `Heap::get`/`read_property`/
/// `write_property` take `Ref`s the allocator itself handed out). An
/// uncaught `throw` is not a simulator error at all - it's the last step's
/// `bubble_up`, per §7.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("malformed AST: {0}")]
    MalformedAst(String),

    #[error("operand stack underflow")]
    StackUnderflow,
}

pub type SimResult<T> = std::result::Result<T, SimError>;
