//! Steps that act on slots rather than produce them: naming, retagging, and
//! pinning the next allocation.

use crate::context::{Context, CONTEXT_SLOT, RESERVED_SLOTS};
use crate::errors::RuntimeError;
use crate::parse::{ParseState, ParserStep, StepOutcome};
use crate::value::{Ref, TypeTag, Value};

/// `@name` renames the previous result slot; `@@type` retags it.
///
/// `type` is a tag code (`@@3`), a tag name (`@@list`), or a key whose slot
/// holds a tag code. Errors are reported here and never push an entry, so
/// the statement keeps its shape.
pub struct KeyStep;

fn resolve_tag(ctx: &Context, name: &str) -> Option<TypeTag> {
    if let Ok(code) = name.parse::<i64>() {
        return TypeTag::from_code(code);
    }
    TypeTag::from_name(name).or_else(|| {
        ctx.lookup(name)
            .and_then(Value::as_int)
            .and_then(TypeTag::from_code)
    })
}

impl KeyStep {
    fn apply(ctx: &mut Context, state: &ParseState<'_>, word: &str) -> Result<(), RuntimeError> {
        let index = match state.last() {
            None => {
                return Err(RuntimeError::NoPreviousValue {
                    token: word.to_owned(),
                })
            }
            Some(Ref::Slot(index)) => index,
            Some(_) => {
                return Err(RuntimeError::PreviousValueInvalid {
                    token: word.to_owned(),
                })
            }
        };

        if let Some(type_name) = word.strip_prefix("@@") {
            let tag = resolve_tag(ctx, type_name).ok_or_else(|| RuntimeError::UnknownType {
                name: type_name.to_owned(),
            })?;
            ctx.retag(index, tag)
        } else {
            ctx.set_key(index, Some(&word[1..]));
            Ok(())
        }
    }
}

impl ParserStep for KeyStep {
    fn name(&self) -> &'static str {
        "key"
    }

    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        let word = state.word();
        if !word.starts_with('@') {
            return StepOutcome::NotMatched;
        }
        if let Err(error) = Self::apply(ctx, state, word) {
            ctx.report(&error);
        }
        StepOutcome::Matched
    }
}

/// Pin the index the next new slot will take.
///
/// - `$N` clears slot `N` and puts it on top of the unused list.
/// - `$name` puts the slot keyed `name` on top of the unused list without
///   clearing it, creating a `Null` slot under that key if none exists. The
///   next value written takes the slot and keeps the key.
/// - `$$name` (or bare `$$`) pushes a brand-new slot and pins it.
pub struct ReuseStep;

impl ParserStep for ReuseStep {
    fn name(&self) -> &'static str {
        "reuse"
    }

    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        let word = state.word();
        if let Some(name) = word.strip_prefix("$$") {
            let key = (!name.is_empty()).then_some(name);
            let index = ctx.push_var(Value::Null, key);
            ctx.recycle(index);
            return StepOutcome::Matched;
        }

        let Some(target) = word.strip_prefix('$').filter(|t| !t.is_empty()) else {
            return StepOutcome::NotMatched;
        };

        if target.bytes().all(|b| b.is_ascii_digit()) {
            let len = ctx.len();
            match target.parse::<usize>() {
                Ok(index) if index < RESERVED_SLOTS => {
                    StepOutcome::Failed(RuntimeError::ReservedSlot { index })
                }
                Ok(index) if index < len => {
                    tracing::debug!(index, "pinning slot by index");
                    ctx.delete_var(index);
                    StepOutcome::Matched
                }
                _ => StepOutcome::Failed(RuntimeError::ReuseOutOfRange {
                    index: target.parse().unwrap_or(usize::MAX),
                    len,
                }),
            }
        } else {
            let index = match ctx.find(target) {
                Some(index) => index,
                None => ctx.push_var(Value::Null, Some(target)),
            };
            if index == CONTEXT_SLOT {
                return StepOutcome::Failed(RuntimeError::ReservedSlot { index });
            }
            tracing::debug!(index, key = target, "pinning slot by key");
            ctx.recycle(index);
            StepOutcome::Matched
        }
    }
}
