//! Argument access for native functions.
//!
//! An argument list holds the callee at entry 0 and the operands after it.
//! Argument `k` is entry `k + 1`, resolved through the context.

use super::Context;
use crate::errors::RuntimeError;
use crate::fatal;
use crate::value::{ArgList, Ref, TypeTag, Value};

static NULL: Value = Value::Null;

pub trait ArgListExt {
    /// Entry 0, or `Invalid` for an empty list.
    fn callee(&self) -> Ref;

    /// Number of operands, callee excluded.
    fn arg_count(&self) -> usize;

    /// Entry for argument `k`. Panics when `k >= arg_count()`.
    fn arg_ref(&self, k: usize) -> Ref;
}

impl ArgListExt for ArgList {
    fn callee(&self) -> Ref {
        self.try_get(0).copied().unwrap_or(Ref::Invalid)
    }

    fn arg_count(&self) -> usize {
        self.len().saturating_sub(1)
    }

    #[track_caller]
    fn arg_ref(&self, k: usize) -> Ref {
        let count = self.arg_count();
        if k >= count {
            fatal::contract_violation(&format!(
                "argument {k} out of range (call has {count} arguments)"
            ));
        }
        *self.get(k + 1)
    }
}

impl Context {
    /// Slot index of argument `k`, if it refers to a slot.
    #[track_caller]
    pub fn arg_index(&self, args: &ArgList, k: usize) -> Option<usize> {
        args.arg_ref(k).slot()
    }

    /// Value of argument `k`; `Null` when the entry is not a slot.
    #[track_caller]
    pub fn arg(&self, args: &ArgList, k: usize) -> &Value {
        match self.arg_index(args, k) {
            Some(index) => self.get(index),
            None => &NULL,
        }
    }

    #[track_caller]
    pub fn arg_key(&self, args: &ArgList, k: usize) -> Option<&str> {
        self.arg_index(args, k).and_then(|index| self.key(index))
    }

    #[track_caller]
    pub fn arg_tag(&self, args: &ArgList, k: usize) -> TypeTag {
        self.arg(args, k).tag()
    }

    /// Overwrite argument `k`'s slot. Does nothing for a non-slot entry.
    #[track_caller]
    pub fn set_arg(&mut self, args: &ArgList, k: usize, value: Value) {
        match self.arg_index(args, k) {
            Some(index) => {
                self.set(index, value);
            }
            None => tracing::warn!(k, "set_arg on an argument that is not a slot"),
        }
    }

    #[track_caller]
    pub fn set_arg_key(&mut self, args: &ArgList, k: usize, key: Option<&str>) {
        match self.arg_index(args, k) {
            Some(index) => self.set_key(index, key),
            None => tracing::warn!(k, "set_arg_key on an argument that is not a slot"),
        }
    }

    #[track_caller]
    pub fn set_arg_tag(
        &mut self,
        args: &ArgList,
        k: usize,
        tag: TypeTag,
    ) -> Result<(), RuntimeError> {
        match self.arg_index(args, k) {
            Some(index) => self.retag(index, tag),
            None => {
                tracing::warn!(k, "set_arg_tag on an argument that is not a slot");
                Ok(())
            }
        }
    }
}
