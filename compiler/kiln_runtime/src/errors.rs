//! Soft runtime errors.
//!
//! These are reported through [`Context::report`](crate::Context::report)
//! and never abort the process: the parser substitutes [`Ref::Invalid`]
//! for the failed token and evaluation moves on to the next statement.
//!
//! [`Ref::Invalid`]: crate::Ref::Invalid

use crate::value::TypeTag;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    // Lookup
    #[error("variable `{name}` not found")]
    UndefinedVariable { name: String },
    #[error("`{name}` is a {tag}, only lists can be spread")]
    SpreadNonList { name: String, tag: TypeTag },

    // Slot reuse
    #[error("cannot reuse slot {index}: context holds {len} slots")]
    ReuseOutOfRange { index: usize, len: usize },
    #[error("slot {index} is reserved and cannot be reused")]
    ReservedSlot { index: usize },

    // Direct access
    #[error("empty direct access")]
    EmptyDirectAccess,
    #[error("direct access needs a slot index, found a {tag}")]
    InvalidDirectAccess { tag: TypeTag },

    // Key assignment
    #[error("`{token}` has no previous value")]
    NoPreviousValue { token: String },
    #[error("`{token}` follows a value that failed to parse")]
    PreviousValueInvalid { token: String },
    #[error("unknown type `{name}`")]
    UnknownType { name: String },
    #[error("cannot retag a {from} as {to}")]
    InvalidRetag { from: TypeTag, to: TypeTag },

    // Calls
    #[error("a {tag} is not callable")]
    NotCallable { tag: TypeTag },
    #[error("invalid function type `{tag}`")]
    InvalidFunctionType { tag: TypeTag },
    #[error("function literal has an empty body")]
    EmptyFunction,
    #[error("argument %{index} is out of range: the call passed {count}")]
    ArgumentOutOfRange { index: usize, count: usize },
}
