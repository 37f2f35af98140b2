//! The top-level driver. Owns every piece of runtime state (§3) and the
//! step log, and is the sole thing the execution pass (`crate::exec`) and
//! the hoisting pass (`crate::hoist`) mutate.
//!
//! Grounded on boa's `Interpreter` in `exec/mod.rs`, which bundled a
//! `Realm`, the environment stack, and a `BoaProfiler` event under one
//! struct threaded through every `run` call; here the same role is played
//! by [`Interpreter`], threaded through the [`Executable`] trait instead of
//! a giant match arm.

use indexmap::IndexMap;

use crate::ast::{node_id, Node};
use crate::console::{ConsoleBuffer, ConsoleKind};
use crate::error::{SimError, SimResult};
use crate::heap::{Heap, HeapObject, NativeFunction, PlainObject};
use crate::memval::{MemVal, MemvalChange};
use crate::scope::{DeclarationKind, ScopeKind, ScopeStack};
use crate::step::{BubbleUp, DeclarationRecord, MemoryChange, MemorySnapshot, Step, StepType};
use crate::value::Value;

/// What a traversal function returns: either it ran to normal completion, or
/// it is propagating a non-local control transfer (§4.6). This is the
/// `Flow` half of boa's old `(Value, InterpreterState)` pair - the `Value`
/// half lives on [`Interpreter::memval`] instead of in the return type.
pub type Flow = Option<BubbleUp>;

/// Dispatch point for the execution pass, one impl per AST node category
/// (see `crate::exec`). Mirrors boa's `trait Executable { fn run(...) }`
/// from `exec/mod.rs`, generalized to also carry the operand-stack and
/// step-recording contracts instead of returning a bare `Value`.
pub trait Executable {
    fn run(&self, interp: &mut Interpreter) -> SimResult<Flow>;
}

pub struct Interpreter {
    pub scopes: ScopeStack,
    pub heap: Heap,
    pub memval: MemVal,
    pub console: ConsoleBuffer,
    /// Set while evaluating the operand of a `typeof` unary expression so
    /// identifier lookup can tolerate an unresolved name (§4.6).
    pub typeof_context: bool,
    steps: Vec<Step>,
    pending_memory_change: MemoryChange,
    pending_memval_changes: Vec<MemvalChange>,
}

impl Interpreter {
    pub fn new() -> Self {
        let mut interp = Self {
            scopes: ScopeStack::new(),
            heap: Heap::new(),
            memval: MemVal::new(),
            console: ConsoleBuffer::new(),
            typeof_context: false,
            steps: Vec::new(),
            pending_memory_change: MemoryChange::None,
            pending_memval_changes: Vec::new(),
        };
        interp.install_globals();
        interp
    }

    /// Seeds the global scope with the host collaborators §4.6 assumes are
    /// ambient rather than user-defined - currently just `console`. Runs
    /// before the first step is emitted, so it never shows up as a traced
    /// hoisting/write transition of its own; it's simply already there.
    fn install_globals(&mut self) {
        let mut console_properties = IndexMap::new();
        for (name, native) in [
            ("log", NativeFunction::ConsoleLog),
            ("error", NativeFunction::ConsoleError),
            ("info", NativeFunction::ConsoleInfo),
            ("warn", NativeFunction::ConsoleWarn),
            ("debug", NativeFunction::ConsoleDebug),
        ] {
            let r = self.heap.allocate(HeapObject::Native(native));
            console_properties.insert(name.to_string(), Value::reference(r));
        }
        let console_ref = self.heap.allocate(HeapObject::Plain(PlainObject {
            properties: console_properties,
        }));
        self.scopes.declare("console", DeclarationKind::Global, Value::reference(console_ref), 0);
    }

    /// Runs a whole program and returns its step log (§6). The global scope
    /// (index 0) pre-exists in a fresh [`ScopeStack`], so the program body
    /// hoists and executes directly into it rather than pushing a new one.
    pub fn run(&mut self, program: &Node) -> SimResult<Vec<Step>> {
        log::debug!("starting run");
        self.emit(program, StepType::Initial, None);
        let body = match program {
            Node::Program { body } => body,
            other => return Err(SimError::MalformedAst(format!("expected Program, got {}", other.kind()))),
        };
        let result = crate::exec::block::run_in_current_scope(self, program, body);
        match &result {
            Ok(flow) => log::debug!("run finished with {} steps, flow = {flow:?}", self.steps.len()),
            Err(err) => log::warn!("run aborted: {err}"),
        }
        result?;
        Ok(std::mem::take(&mut self.steps))
    }

    /// Pushes a new scope of `kind`, recording the transition as a
    /// `push_scope` step (§4.6).
    pub fn push_scope(&mut self, node: &Node, kind: ScopeKind) -> usize {
        let idx = self.scopes.push(kind);
        self.pending_memory_change = MemoryChange::PushScope { scope_index: idx };
        self.emit(node, StepType::PushScope, None);
        idx
    }

    /// Pops the current scope, recording a `pop_scope` step tagged with
    /// `bubble` if a control transfer is in flight (§4.6). The global scope
    /// is never actually popped ([`ScopeStack::pop`] guards this), but the
    /// step is still emitted so the trace shows the attempted transition.
    pub fn pop_scope(&mut self, node: &Node, bubble: Flow) {
        let idx = self.scopes.current_index();
        self.scopes.pop();
        self.pending_memory_change = MemoryChange::PopScope { scope_index: idx };
        self.emit(node, StepType::PopScope, bubble);
    }

    pub fn push_value(&mut self, value: Value) {
        self.pending_memval_changes.push(MemvalChange::Push(value.clone()));
        self.memval.push(value);
    }

    pub fn pop_value(&mut self) -> SimResult<Value> {
        let value = self.memval.pop().ok_or(SimError::StackUnderflow)?;
        self.pending_memval_changes.push(MemvalChange::Pop);
        Ok(value)
    }

    pub fn declare(&mut self, name: &str, kind: DeclarationKind, value: Value) {
        let idx = self.scopes.current_index();
        self.scopes.declare(name, kind, value, idx);
    }

    /// Records a single hoisting pass's declarations and emits its step
    /// (§4.5). Called once per block, after all declarations in that block
    /// have been registered with [`Interpreter::declare`].
    pub fn emit_hoisting(&mut self, node: &Node, declarations: Vec<DeclarationRecord>) {
        self.pending_memory_change = MemoryChange::Declaration(declarations);
        self.emit(node, StepType::Hoisting, None);
    }

    pub fn record_write(&mut self, scope_index: usize, variable_name: String, value: Value) {
        self.pending_memory_change = MemoryChange::WriteVariable {
            scope_index,
            variable_name,
            value,
        };
    }

    pub fn record_create(&mut self, r: crate::heap::Ref) {
        self.pending_memory_change = MemoryChange::CreateHeapObject { r };
    }

    pub fn record_write_property(&mut self, r: crate::heap::Ref, key: String, value: Value) {
        self.pending_memory_change = MemoryChange::WriteProperty { r, key, value };
    }

    pub fn record_delete_property(&mut self, r: crate::heap::Ref, key: String) {
        self.pending_memory_change = MemoryChange::DeleteProperty { r, key };
    }

    /// Synthesizes a simulated error (§7): allocates a `{name, message,
    /// stack}` plain object, pushes it as the expression result, appends a
    /// console `error` entry, and returns the `throw` bubble for the caller
    /// to attach to its step.
    pub fn throw_error(&mut self, name: &str, message: impl Into<String>) -> Flow {
        let message = message.into();
        let stack = format!("{name}: {message}");
        let mut properties = IndexMap::new();
        properties.insert("name".to_string(), Value::string(name));
        properties.insert("message".to_string(), Value::string(message));
        properties.insert("stack".to_string(), Value::string(stack.clone()));
        let r = self.heap.allocate(HeapObject::Plain(PlainObject { properties }));
        self.record_create(r);
        self.push_value(Value::reference(r));
        self.console.push(ConsoleKind::Error, vec![Value::string(stack)]);
        Some(BubbleUp::Throw)
    }

    /// Appends an `executing`/`executed`/`evaluating`/`evaluated`/
    /// `function_call` step, capturing a deep snapshot of every piece of
    /// observable state and draining the pending change buffers (§4.7).
    pub fn emit(&mut self, node: &Node, step_type: StepType, bubble: Flow) {
        let memory_change = std::mem::replace(&mut self.pending_memory_change, MemoryChange::None);
        let memval_changes = std::mem::take(&mut self.pending_memval_changes);
        let step = Step {
            index: self.steps.len(),
            node_ref: node_id(node),
            step_type,
            scope_index: self.scopes.current_index(),
            memory_snapshot: MemorySnapshot {
                scopes: self.scopes.clone(),
                heap: self.heap.clone(),
                memval: self.memval.as_slice().to_vec(),
            },
            memory_change,
            memval_changes,
            console_snapshot: self.console.entries().to_vec(),
            bubble_up: bubble,
        };
        self.steps.push(step);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
