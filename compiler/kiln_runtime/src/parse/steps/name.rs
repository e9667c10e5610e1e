//! Name-driven steps: placeholders, spread, comments, variable lookup.

use crate::context::Context;
use crate::errors::RuntimeError;
use crate::parse::{ParseState, ParserStep, StepOutcome};
use crate::value::{Ref, Value};

/// `%N` and `...%` inside a function body.
///
/// Only present in the chain while a function literal is being baked.
pub struct ParamStep;

impl ParserStep for ParamStep {
    fn name(&self) -> &'static str {
        "param"
    }

    fn try_handle(&self, _ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        let word = state.word();
        if word == "...%" {
            state.push(Ref::Spread);
            return StepOutcome::Matched;
        }
        match word.strip_prefix('%').map(str::parse::<usize>) {
            Some(Ok(k)) => {
                state.push(Ref::Param(k));
                StepOutcome::Matched
            }
            _ => StepOutcome::NotMatched,
        }
    }
}

/// `...name`: splice the entries of the `List` slot keyed `name`.
pub struct SpreadStep;

impl ParserStep for SpreadStep {
    fn name(&self) -> &'static str {
        "spread"
    }

    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        let Some(name) = state.word().strip_prefix("...") else {
            return StepOutcome::NotMatched;
        };
        let Some(index) = ctx.find(name) else {
            return StepOutcome::Failed(RuntimeError::UndefinedVariable {
                name: name.to_owned(),
            });
        };
        match ctx.get(index) {
            Value::List(items) => {
                state.extend(items.iter().copied());
                StepOutcome::Matched
            }
            other => StepOutcome::Failed(RuntimeError::SpreadNonList {
                name: name.to_owned(),
                tag: other.tag(),
            }),
        }
    }
}

/// `//`: drop the rest of the statement.
pub struct CommentStep;

impl ParserStep for CommentStep {
    fn name(&self) -> &'static str {
        "comment"
    }

    fn try_handle(&self, _ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        if !state.word().starts_with("//") {
            return StepOutcome::NotMatched;
        }
        state.skip_rest();
        StepOutcome::Matched
    }
}

/// Bare word: the index of the slot keyed by it.
pub struct VariableStep;

impl ParserStep for VariableStep {
    fn name(&self) -> &'static str {
        "variable"
    }

    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        let word = state.word();
        match ctx.find(word) {
            Some(index) => {
                state.push(Ref::Slot(index));
                StepOutcome::Matched
            }
            None => StepOutcome::Failed(RuntimeError::UndefinedVariable {
                name: word.to_owned(),
            }),
        }
    }
}
