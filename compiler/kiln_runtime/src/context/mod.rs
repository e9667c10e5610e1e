//! The context: one keyed store that is the program's whole address space.
//!
//! Every literal, variable, function and compiled body lives in a slot here
//! and is addressed by index. Slots are created by [`Context::new_var`], which
//! takes the most recently recycled index before growing the store.
//!
//! # Reserved slots
//!
//! | index | key | value |
//! |-------|-----|-------|
//! | 0 | `context` | `Null`, the context's identity slot |
//! | 1 | `delimiter` | `Any`, statement delimiter byte |
//!
//! Programs may rebind `delimiter`; see [`Context::delimiter`].

mod args;
mod builder;

pub use args::ArgListExt;
pub use builder::{ContextBuilder, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH};

use kiln_store::ValueStore;

use crate::diagnostics::SharedDiagnostics;
use crate::errors::RuntimeError;
use crate::eval::Evaluator;
use crate::fatal;
use crate::parse::Parser;
use crate::value::{Flow, NativeFn, TypeTag, Value};

/// Key of the identity slot.
pub const CONTEXT_KEY: &str = "context";

/// Key of the statement delimiter slot.
pub const DELIMITER_KEY: &str = "delimiter";

/// Index of the identity slot.
pub const CONTEXT_SLOT: usize = 0;

/// Slots created by the builder; `$N` cannot clear them.
pub const RESERVED_SLOTS: usize = 2;

/// Delimiter used when none is configured or the configured one is unusable.
pub const DEFAULT_DELIMITER: u8 = b';';

pub struct Context {
    slots: ValueStore<Value>,
    /// Recycled indices; the last entry is handed out first.
    unused: Vec<usize>,
    parser: Parser,
    evaluator: Evaluator,
    diagnostics: SharedDiagnostics,
    depth: usize,
    max_depth: usize,
}

impl Context {
    /// A context with the standard parser and evaluator, reporting to stderr.
    pub fn new() -> Self {
        ContextBuilder::new().build()
    }

    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    #[track_caller]
    fn check_slot(&self, index: usize) {
        if index >= self.slots.len() {
            fatal::contract_violation(&format!(
                "slot {index} out of range (context holds {} slots)",
                self.slots.len()
            ));
        }
    }

    // Slot allocator

    /// Create a slot holding `value`, reusing the most recently recycled
    /// index if there is one.
    ///
    /// On reuse, `Some(key)` replaces the slot's key and `None` keeps it.
    pub fn new_var(&mut self, value: Value, key: Option<&str>) -> usize {
        if let Some(index) = self.unused.pop() {
            tracing::debug!(index, "reusing slot");
            self.slots.set(index, value);
            if key.is_some() {
                self.slots.set_key(index, key);
            }
            index
        } else {
            self.slots.push_keyed(value, key);
            self.slots.len() - 1
        }
    }

    /// Push a new slot, ignoring the unused list.
    pub fn push_var(&mut self, value: Value, key: Option<&str>) -> usize {
        self.slots.push_keyed(value, key);
        self.slots.len() - 1
    }

    /// Free the slot's payload and key, leaving it `Null`.
    ///
    /// The index is not recycled; use [`Context::delete_var`] for that.
    #[track_caller]
    pub fn clear_var(&mut self, index: usize) {
        self.check_slot(index);
        self.slots.set(index, Value::Null);
        self.slots.set_key(index, None);
    }

    /// Clear the slot and hand its index to the next [`Context::new_var`].
    #[track_caller]
    pub fn delete_var(&mut self, index: usize) {
        self.clear_var(index);
        self.recycle(index);
    }

    /// Put `index` on top of the unused list without touching the slot.
    #[track_caller]
    pub fn recycle(&mut self, index: usize) {
        self.check_slot(index);
        self.unused.retain(|&u| u != index);
        self.unused.push(index);
    }

    /// Recycled indices, next to be reused last.
    pub fn unused(&self) -> &[usize] {
        &self.unused
    }

    // Accessors

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Never true: the reserved slots always exist.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[track_caller]
    pub fn get(&self, index: usize) -> &Value {
        self.check_slot(index);
        self.slots.get(index)
    }

    #[track_caller]
    pub fn get_mut(&mut self, index: usize) -> &mut Value {
        self.check_slot(index);
        self.slots.get_mut(index)
    }

    /// Replace a slot's value, returning the old one.
    #[track_caller]
    pub fn set(&mut self, index: usize, value: Value) -> Value {
        self.check_slot(index);
        self.slots.set(index, value)
    }

    #[track_caller]
    pub fn key(&self, index: usize) -> Option<&str> {
        self.check_slot(index);
        self.slots.key(index)
    }

    #[track_caller]
    pub fn set_key(&mut self, index: usize, key: Option<&str>) {
        self.check_slot(index);
        self.slots.set_key(index, key);
    }

    #[track_caller]
    pub fn tag(&self, index: usize) -> TypeTag {
        self.get(index).tag()
    }

    #[track_caller]
    pub fn retag(&mut self, index: usize, to: TypeTag) -> Result<(), RuntimeError> {
        self.get_mut(index).retag(to)
    }

    /// Index of the first slot keyed `key`.
    pub fn find(&self, key: &str) -> Option<usize> {
        self.slots.find_key(key)
    }

    /// Value of the first slot keyed `key`.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.find(key).map(|index| self.slots.get(index))
    }

    /// Number of live heap payloads (buffers, lists, baked bodies).
    pub fn owned_payloads(&self) -> usize {
        self.slots.iter().filter(|v| v.tag().is_owned()).count()
    }

    /// Bind `name` to a native function.
    pub fn add_function(&mut self, name: &str, function: NativeFn) -> usize {
        self.new_var(Value::Function(function), Some(name))
    }

    // Configuration

    /// The statement delimiter, read from the `delimiter` slot.
    ///
    /// Falls back to `;` when the slot is missing or does not hold a single
    /// ASCII byte.
    pub fn delimiter(&self) -> u8 {
        let Some(value) = self.lookup(DELIMITER_KEY) else {
            tracing::warn!("no `delimiter` slot, using `;`");
            return DEFAULT_DELIMITER;
        };
        match value.as_int().and_then(|n| u8::try_from(n).ok()) {
            Some(byte) if byte.is_ascii() && byte != 0 => byte,
            _ => {
                tracing::warn!(?value, "`delimiter` is not an ASCII byte, using `;`");
                DEFAULT_DELIMITER
            }
        }
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn diagnostics(&self) -> &SharedDiagnostics {
        &self.diagnostics
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    // Diagnostics and recursion

    /// Report a soft error and carry on.
    pub fn report(&self, error: &RuntimeError) {
        tracing::warn!(%error, "runtime error");
        self.diagnostics.println(&format!("error: {error}"));
    }

    /// Enter one level of parse/evaluate recursion.
    pub(crate) fn enter(&mut self) {
        self.depth += 1;
        if self.depth > self.max_depth {
            fatal::contract_violation(&format!(
                "maximum recursion depth {} exceeded",
                self.max_depth
            ));
        }
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Evaluate `text` with the context's own parser.
    pub fn run(&mut self, text: &str) -> Flow {
        let parser = self.parser.clone();
        self.eval(&parser, text)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        tracing::debug!(
            slots = self.slots.len(),
            payloads = self.owned_payloads(),
            "dropping context"
        );
    }
}
