//! Tagged values, argument references and statement flow.
//!
//! A context slot holds one [`Value`]; the variant is the slot's type tag.
//! Heap payloads (`Buffer`, `List`, `Baked`, `UserFunction`) are owned by the
//! variant and dropped with it, so clearing a slot frees exactly once.

use std::fmt;

use kiln_store::ValueStore;

use crate::context::Context;
use crate::errors::RuntimeError;

/// An argument list: entry 0 is the callee, entries `1..` the operands.
///
/// Argument lists, list payloads and baked bodies share this shape.
pub type RefList = ValueStore<Ref>;

/// Argument list passed to natives and the evaluator.
pub type ArgList = RefList;

/// A native function bound into a context.
///
/// Receives the context and the full argument list (callee included) and
/// reports whether the surrounding sequence should stop.
pub type NativeFn = fn(&mut Context, &ArgList) -> Flow;

/// The closed set of slot types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Null,
    Any,
    Float,
    Buffer,
    List,
    Function,
    Baked,
    UserFunction,
}

impl TypeTag {
    pub const ALL: [TypeTag; 8] = [
        TypeTag::Null,
        TypeTag::Any,
        TypeTag::Float,
        TypeTag::Buffer,
        TypeTag::List,
        TypeTag::Function,
        TypeTag::Baked,
        TypeTag::UserFunction,
    ];

    /// Numeric code, as accepted by `@@N`.
    pub const fn code(self) -> i64 {
        match self {
            TypeTag::Null => -1,
            TypeTag::Any => 0,
            TypeTag::Float => 1,
            TypeTag::Buffer => 2,
            TypeTag::List => 3,
            TypeTag::Function => 4,
            TypeTag::Baked => 5,
            TypeTag::UserFunction => 6,
        }
    }

    pub fn from_code(code: i64) -> Option<TypeTag> {
        TypeTag::ALL.into_iter().find(|tag| tag.code() == code)
    }

    pub const fn name(self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Any => "any",
            TypeTag::Float => "float",
            TypeTag::Buffer => "buffer",
            TypeTag::List => "list",
            TypeTag::Function => "function",
            TypeTag::Baked => "baked",
            TypeTag::UserFunction => "user_function",
        }
    }

    pub fn from_name(name: &str) -> Option<TypeTag> {
        TypeTag::ALL.into_iter().find(|tag| tag.name() == name)
    }

    /// Whether values of this type own a heap payload.
    pub const fn is_owned(self) -> bool {
        matches!(
            self,
            TypeTag::Buffer | TypeTag::List | TypeTag::Baked | TypeTag::UserFunction
        )
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The contents of one context slot.
#[derive(Clone, Default)]
pub enum Value {
    /// Cleared or never-written slot.
    #[default]
    Null,
    /// Raw 64-bit integer. Not owned.
    Any(i64),
    Float(f64),
    /// Owned string.
    Buffer(String),
    /// Native callable. Not owned.
    Function(NativeFn),
    /// Owned sequence of references.
    List(RefList),
    /// Precompiled statement sequence: each entry refers to a `List` slot
    /// holding one parsed statement.
    Baked(RefList),
    /// Like `Baked`, but statements may hold `Param`/`Spread` placeholders.
    UserFunction(RefList),
}

impl Value {
    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Any(_) => TypeTag::Any,
            Value::Float(_) => TypeTag::Float,
            Value::Buffer(_) => TypeTag::Buffer,
            Value::Function(_) => TypeTag::Function,
            Value::List(_) => TypeTag::List,
            Value::Baked(_) => TypeTag::Baked,
            Value::UserFunction(_) => TypeTag::UserFunction,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Any(n) => Some(*n),
            _ => None,
        }
    }

    /// The `Any` bits read as an unsigned integer.
    pub fn as_uint(&self) -> Option<u64> {
        self.as_int().map(|n| u64::from_ne_bytes(n.to_ne_bytes()))
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Buffer(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<NativeFn> {
        match self {
            Value::Function(f) => Some(*f),
            _ => None,
        }
    }

    /// The reference sequence of a `List`, `Baked` or `UserFunction`.
    pub fn as_list(&self) -> Option<&RefList> {
        match self {
            Value::List(list) | Value::Baked(list) | Value::UserFunction(list) => Some(list),
            _ => None,
        }
    }

    /// Convert to another type tag in place.
    ///
    /// - `Any` and `Float` reinterpret the same 64 bits.
    /// - `List`, `Baked` and `UserFunction` keep their sequence.
    /// - `Null` becomes `Any(-1)`, the integer view of a cleared slot.
    /// - Anything becomes `Null` by dropping its payload.
    ///
    /// Other conversions leave the value untouched and return an error.
    pub fn retag(&mut self, to: TypeTag) -> Result<(), RuntimeError> {
        let from = self.tag();
        if from == to {
            return Ok(());
        }
        let next = match (std::mem::take(self), to) {
            (_, TypeTag::Null) => Value::Null,
            (Value::Null, TypeTag::Any) => Value::Any(-1),
            (Value::Any(n), TypeTag::Float) => {
                Value::Float(f64::from_bits(u64::from_ne_bytes(n.to_ne_bytes())))
            }
            (Value::Float(x), TypeTag::Any) => {
                Value::Any(i64::from_ne_bytes(x.to_bits().to_ne_bytes()))
            }
            (Value::List(l) | Value::Baked(l) | Value::UserFunction(l), TypeTag::List) => {
                Value::List(l)
            }
            (Value::List(l) | Value::Baked(l) | Value::UserFunction(l), TypeTag::Baked) => {
                Value::Baked(l)
            }
            (Value::List(l) | Value::Baked(l) | Value::UserFunction(l), TypeTag::UserFunction) => {
                Value::UserFunction(l)
            }
            (previous, _) => {
                *self = previous;
                return Err(RuntimeError::InvalidRetag { from, to });
            }
        };
        *self = next;
        Ok(())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Any(n) => f.debug_tuple("Any").field(n).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Buffer(s) => f.debug_tuple("Buffer").field(s).finish(),
            Value::Function(_) => f.write_str("Function(<native>)"),
            Value::List(l) => f.debug_tuple("List").field(l).finish(),
            Value::Baked(l) => f.debug_tuple("Baked").field(l).finish(),
            Value::UserFunction(l) => f.debug_tuple("UserFunction").field(l).finish(),
        }
    }
}

/// One entry of an argument list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ref {
    /// A context slot index.
    Slot(usize),
    /// `%k`: substitute call-site argument `k` (0-based).
    Param(usize),
    /// `...%`: splice every call-site argument here.
    Spread,
    /// Placeholder left where a token failed to parse.
    Invalid,
}

impl Ref {
    /// Integer encoding: slots are non-negative, `Param(k)` is `-k-1`,
    /// `Spread` is `i64::MIN`. `Invalid` encodes as `-1`, the same as
    /// `Param(0)`; the two never meet in one list.
    pub fn to_raw(self) -> i64 {
        match self {
            Ref::Slot(index) => i64::try_from(index).unwrap_or(i64::MAX),
            Ref::Param(k) => -1 - i64::try_from(k).unwrap_or(i64::MAX - 1),
            Ref::Spread => i64::MIN,
            Ref::Invalid => -1,
        }
    }

    /// Decode a function-body entry. Negative values are placeholders.
    pub fn from_raw(raw: i64) -> Ref {
        if raw == i64::MIN {
            Ref::Spread
        } else if raw < 0 {
            usize::try_from(-1 - raw).map_or(Ref::Invalid, Ref::Param)
        } else {
            usize::try_from(raw).map_or(Ref::Invalid, Ref::Slot)
        }
    }

    #[inline]
    pub fn slot(self) -> Option<usize> {
        match self {
            Ref::Slot(index) => Some(index),
            _ => None,
        }
    }

    /// Whether this entry is resolved at call time.
    #[inline]
    pub fn is_placeholder(self) -> bool {
        matches!(self, Ref::Param(_) | Ref::Spread)
    }
}

/// Outcome of one statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Run the next statement.
    Continue,
    /// Stop the enclosing sequence, yielding this slot.
    Stop(usize),
}

impl Flow {
    #[inline]
    pub fn is_stop(self) -> bool {
        matches!(self, Flow::Stop(_))
    }

    #[inline]
    pub fn result(self) -> Option<usize> {
        match self {
            Flow::Stop(index) => Some(index),
            Flow::Continue => None,
        }
    }
}
