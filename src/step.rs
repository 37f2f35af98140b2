//! The step log: the simulator's sole externally-visible output (§3, §6).
//!
//! Every public transition in the execution pass emits exactly one
//! [`Step`], carrying a full, independent snapshot of memory so a consumer
//! can render any past step without re-running anything. This replaces
//! boa's `BoaProfiler::start_event` timing hooks (`exec/mod.rs` is laced
//! with `let _timer = BoaProfiler::global().start_event(...)`) with a
//! structural trace instead of a flat profile.

use crate::console::ConsoleEntry;
use crate::heap::Heap;
use crate::memval::MemvalChange;
use crate::scope::ScopeStack;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepType {
    Initial,
    PushScope,
    Hoisting,
    Executing,
    Executed,
    Evaluating,
    Evaluated,
    FunctionCall,
    PopScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleUp {
    Return,
    Throw,
    Break,
    Continue,
}

#[derive(Debug, Clone)]
pub struct DeclarationRecord {
    pub declaration_kind: crate::scope::DeclarationKind,
    pub variable_name: String,
    pub initial_value: Value,
    pub scope_index: usize,
}

#[derive(Debug, Clone)]
pub enum MemoryChange {
    None,
    Declaration(Vec<DeclarationRecord>),
    WriteVariable {
        scope_index: usize,
        variable_name: String,
        value: Value,
    },
    CreateHeapObject {
        r: crate::heap::Ref,
    },
    WriteProperty {
        r: crate::heap::Ref,
        key: String,
        value: Value,
    },
    DeleteProperty {
        r: crate::heap::Ref,
        key: String,
    },
    PushScope {
        scope_index: usize,
    },
    PopScope {
        scope_index: usize,
    },
}

/// A full, independently-owned copy of the runtime's observable state. No
/// field here is shared (`Rc`/`Gc`) with the live interpreter, so steps can
/// be held and compared long after execution has moved past them.
#[derive(Debug, Clone)]
pub struct MemorySnapshot {
    pub scopes: ScopeStack,
    pub heap: Heap,
    pub memval: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct Step {
    pub index: usize,
    /// Identity-preserving reference to the AST node this step concerns;
    /// consumers compare by id, not by structural equality.
    pub node_ref: crate::ast::NodeId,
    pub step_type: StepType,
    pub scope_index: usize,
    pub memory_snapshot: MemorySnapshot,
    pub memory_change: MemoryChange,
    pub memval_changes: Vec<MemvalChange>,
    pub console_snapshot: Vec<ConsoleEntry>,
    pub bubble_up: Option<BubbleUp>,
}
