//! The scope stack, grounded on boa's `LexicalEnvironment` /
//! `VariableScope` split in `environment/lexical_environment.rs`. That file
//! dispatches `create_mutable_binding` over four `dyn EnvironmentRecordTrait`
//! implementations (declarative / function / global / object); per §3 this
//! simulator flattens that into one `Scope` struct tagged by [`ScopeKind`]
//! and addressed by its index in the stack, so a step can simply carry a
//! `scope_index` rather than an opaque environment handle.

use rustc_hash::FxHashMap;

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Program,
    Function,
    Block,
    Try,
    Catch,
    Finally,
    Conditional,
    Loop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
    Function,
    Class,
    Param,
    Global,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub declaration_kind: DeclarationKind,
    pub value: Value,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub kind: ScopeKind,
    bindings: FxHashMap<String, Binding>,
    /// Preserves declaration order for deterministic snapshot output.
    order: Vec<String>,
}

impl Scope {
    fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            bindings: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Binding)> {
        self.order.iter().filter_map(|name| self.bindings.get(name).map(|b| (name, b)))
    }
}

/// Raised by [`ScopeStack::write_variable`] when a write targets a name with
/// no binding anywhere on the stack and strict-mode policy forbids creating
/// an implicit global (§4.2, §7).
pub struct UnresolvedReference;

#[derive(Debug, Clone)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    /// The global scope is always index 0 and is never popped (§3).
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new(ScopeKind::Program)],
        }
    }

    pub fn push(&mut self, kind: ScopeKind) -> usize {
        self.scopes.push(Scope::new(kind));
        self.scopes.len() - 1
    }

    /// Pops the top scope. The global scope (index 0) must never be popped;
    /// callers are expected to uphold this (see §4.6 block traversal).
    pub fn pop(&mut self) -> Option<Scope> {
        if self.scopes.len() <= 1 {
            return None;
        }
        self.scopes.pop()
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn current_index(&self) -> usize {
        self.scopes.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Scope> {
        self.scopes.get(index)
    }

    /// Declares `name` in the scope at `scope_index`. No shadow-check: a
    /// second `declare` of the same name overwrites, matching boa's
    /// `create_mutable_binding` (the hoisting pass is expected to have
    /// already deduplicated declarations within a block).
    pub fn declare(&mut self, name: &str, declaration_kind: DeclarationKind, initial: Value, scope_index: usize) {
        let scope = &mut self.scopes[scope_index];
        if !scope.bindings.contains_key(name) {
            scope.order.push(name.to_string());
        }
        scope.bindings.insert(
            name.to_string(),
            Binding {
                declaration_kind,
                value: initial,
            },
        );
    }

    /// Top-down lookup starting from the current scope.
    pub fn lookup(&self, name: &str) -> Option<(Value, usize)> {
        for (idx, scope) in self.scopes.iter().enumerate().rev() {
            if let Some(binding) = scope.bindings.get(name) {
                return Some((binding.value.clone(), idx));
            }
        }
        None
    }

    pub fn has_binding(&self, name: &str) -> bool {
        self.scopes.iter().any(|s| s.bindings.contains_key(name))
    }

    /// Writes to the nearest binding named `name`. If none exists and
    /// `create_global_if_missing` is set, creates a `global`-kind binding in
    /// scope 0 (the sloppy-mode fallback); otherwise returns
    /// [`UnresolvedReference`] so the caller can raise a `ReferenceError`.
    pub fn write_variable(
        &mut self,
        name: &str,
        value: Value,
        create_global_if_missing: bool,
    ) -> Result<usize, UnresolvedReference> {
        for (idx, scope) in self.scopes.iter_mut().enumerate().rev() {
            if let Some(binding) = scope.bindings.get_mut(name) {
                binding.value = value;
                return Ok(idx);
            }
        }
        if create_global_if_missing {
            self.declare(name, DeclarationKind::Global, value, 0);
            Ok(0)
        } else {
            Err(UnresolvedReference)
        }
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}
