//! The heap: a monotonic, append-only arena of [`HeapObject`]s addressed by
//! [`Ref`]. Grounded on boa's `GcObject`/`Object` split in
//! `boa/src/object/mod.rs`, minus the garbage collector: §3 states heap
//! entries are never renumbered and nothing is explicitly freed during a
//! run, so a `Vec`-backed arena stands in for boa's `Gc<GcCell<Object>>`.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::ast::Node;
use crate::value::Value;

/// A heap slot address. Monotonically assigned by [`Heap::allocate`] and
/// never reused.
pub type Ref = usize;

#[derive(Debug, Clone, Default)]
pub struct PlainObject {
    pub properties: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default)]
pub struct ArrayObject {
    pub elements: Vec<Value>,
    /// Non-index properties set on an array (e.g. custom tags); `length`
    /// and in-range numeric indices are served from `elements` instead.
    pub properties: IndexMap<String, Value>,
}

impl ArrayObject {
    pub fn length(&self) -> usize {
        self.elements.len()
    }
}

#[derive(Debug, Clone)]
pub struct FunctionObject {
    /// A private copy of the defining AST node (`FunctionDeclaration`,
    /// `FunctionExpression`, or `ArrowFunctionExpression`), owned via `Rc`
    /// so snapshot cloning (§3) shares it instead of deep-copying the
    /// subtree on every step - the AST is immutable input data, unlike the
    /// heap/scope/memval state the snapshot contract actually cares about.
    pub node: Rc<Node>,
    pub name: Option<String>,
    pub is_arrow: bool,
    /// The scope stack in effect when the function literal was evaluated,
    /// snapshotted at allocation time per the closure-capture policy chosen
    /// in §9 (snapshot-at-allocation, not re-walk-at-call-time).
    pub closure_scope_chain: Vec<usize>,
}

/// A builtin callable with no AST body of its own (§4.6 treats `console.*`
/// as an ambient host collaborator rather than user-defined code). Grounded
/// on boa's `console` builtin (`boa/src/builtins/console/mod.rs`), which is
/// likewise a native function wired into the global object rather than
/// parsed from script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeFunction {
    ConsoleLog,
    ConsoleError,
    ConsoleInfo,
    ConsoleWarn,
    ConsoleDebug,
}

#[derive(Debug, Clone)]
pub enum HeapObject {
    Plain(PlainObject),
    Array(ArrayObject),
    Function(FunctionObject),
    Native(NativeFunction),
}

impl HeapObject {
    pub fn is_function(&self) -> bool {
        matches!(self, HeapObject::Function(_) | HeapObject::Native(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, HeapObject::Array(_))
    }
}

/// The heap arena. See module docs for the no-GC rationale.
#[derive(Debug, Clone, Default)]
pub struct Heap {
    objects: Vec<HeapObject>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new heap slot and returns its monotonic reference.
    pub fn allocate(&mut self, object: HeapObject) -> Ref {
        let r = self.objects.len();
        self.objects.push(object);
        r
    }

    pub fn get(&self, r: Ref) -> Option<&HeapObject> {
        self.objects.get(r)
    }

    pub fn get_mut(&mut self, r: Ref) -> Option<&mut HeapObject> {
        self.objects.get_mut(r)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Reads a property. Arrays split numeric-string keys into `elements`
    /// and everything else (including `length`) into `properties`, per §4.1.
    pub fn read_property(&self, r: Ref, key: &str) -> Value {
        match self.get(r) {
            Some(HeapObject::Plain(obj)) => obj.properties.get(key).cloned().unwrap_or_else(Value::undefined),
            Some(HeapObject::Array(arr)) => {
                if key == "length" {
                    Value::number(arr.length() as f64)
                } else if let Ok(idx) = key.parse::<usize>() {
                    arr.elements.get(idx).cloned().unwrap_or_else(Value::undefined)
                } else {
                    arr.properties.get(key).cloned().unwrap_or_else(Value::undefined)
                }
            }
            Some(HeapObject::Function(_)) | Some(HeapObject::Native(_)) | None => Value::undefined(),
        }
    }

    /// Writes a property, following the same array-index split as
    /// [`Heap::read_property`]. Writing past the end of an array's
    /// `elements` pads with `undefined`.
    pub fn write_property(&mut self, r: Ref, key: &str, value: Value) {
        match self.get_mut(r) {
            Some(HeapObject::Plain(obj)) => {
                obj.properties.insert(key.to_string(), value);
            }
            Some(HeapObject::Array(arr)) => {
                if key == "length" {
                    if let Value::Primitive(crate::value::Primitive::Number(n)) = value {
                        let new_len = n as usize;
                        arr.elements.resize(new_len, Value::undefined());
                    }
                } else if let Ok(idx) = key.parse::<usize>() {
                    if idx >= arr.elements.len() {
                        arr.elements.resize(idx + 1, Value::undefined());
                    }
                    arr.elements[idx] = value;
                } else {
                    arr.properties.insert(key.to_string(), value);
                }
            }
            Some(HeapObject::Function(_)) | Some(HeapObject::Native(_)) | None => {}
        }
    }

    pub fn delete_property(&mut self, r: Ref, key: &str) -> bool {
        match self.get_mut(r) {
            Some(HeapObject::Plain(obj)) => obj.properties.shift_remove(key).is_some(),
            Some(HeapObject::Array(arr)) => {
                if let Ok(idx) = key.parse::<usize>() {
                    if idx < arr.elements.len() {
                        arr.elements[idx] = Value::undefined();
                        return true;
                    }
                    false
                } else {
                    arr.properties.shift_remove(key).is_some()
                }
            }
            Some(HeapObject::Function(_)) | Some(HeapObject::Native(_)) | None => false,
        }
    }
}
