//! Bracketed forms that re-enter the parser or evaluator.

use kiln_lexer::{unwrap_group, Group};

use super::ParamStep;
use crate::context::Context;
use crate::errors::RuntimeError;
use crate::parse::{ParseState, ParserStep, StepOutcome};
use crate::value::{Flow, Ref, TypeTag, Value};

/// `(% body)`: bake a function literal.
///
/// The body is baked with a `param` step in front of the current chain. A
/// body holding placeholders becomes a `UserFunction`, otherwise `Baked`.
pub struct FunctionStep;

impl ParserStep for FunctionStep {
    fn name(&self) -> &'static str {
        "function"
    }

    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        let Some(body) =
            unwrap_group(state.word(), Group::Paren).and_then(|inner| inner.strip_prefix('%'))
        else {
            return StepOutcome::NotMatched;
        };

        let body_parser = state.parser().with_front(ParamStep);
        let Some(index) = ctx.bake(&body_parser, body) else {
            return StepOutcome::Failed(RuntimeError::EmptyFunction);
        };
        if ctx.is_parameterized(index) {
            if let Err(error) = ctx.retag(index, TypeTag::UserFunction) {
                return StepOutcome::Failed(error);
            }
        }
        state.push(Ref::Slot(index));
        StepOutcome::Matched
    }
}

/// `(text)`: evaluate now and push the result, or `Invalid` if none.
pub struct ExpressionStep;

impl ParserStep for ExpressionStep {
    fn name(&self) -> &'static str {
        "expression"
    }

    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        let Some(inner) = unwrap_group(state.word(), Group::Paren) else {
            return StepOutcome::NotMatched;
        };
        match ctx.eval(state.parser(), inner) {
            Flow::Stop(index) => state.push(Ref::Slot(index)),
            Flow::Continue => state.push(Ref::Invalid),
        }
        StepOutcome::Matched
    }
}

/// `[items]`: parse the items and store them as a `List` slot.
pub struct ListStep;

impl ParserStep for ListStep {
    fn name(&self) -> &'static str {
        "list"
    }

    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        let Some(inner) = unwrap_group(state.word(), Group::Bracket) else {
            return StepOutcome::NotMatched;
        };
        let items = ctx.parse(state.parser(), inner);
        let index = ctx.new_var(Value::List(items), None);
        state.push(Ref::Slot(index));
        StepOutcome::Matched
    }
}

/// `<expr>`: dereference. The last item of `expr` must hold a slot index;
/// that index is pushed in place of the expression.
pub struct DirectAccessStep;

impl ParserStep for DirectAccessStep {
    fn name(&self) -> &'static str {
        "direct_access"
    }

    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        let Some(inner) = unwrap_group(state.word(), Group::Angle) else {
            return StepOutcome::NotMatched;
        };
        let items = ctx.parse(state.parser(), inner);
        let Some(last) = items.as_slice().last().copied() else {
            return StepOutcome::Failed(RuntimeError::EmptyDirectAccess);
        };

        let Some(source) = last.slot() else {
            return StepOutcome::Failed(RuntimeError::InvalidDirectAccess { tag: TypeTag::Null });
        };
        let value = ctx.get(source);
        match value.as_int().and_then(|n| usize::try_from(n).ok()) {
            Some(target) if target < ctx.len() => {
                state.push(Ref::Slot(target));
                StepOutcome::Matched
            }
            _ => StepOutcome::Failed(RuntimeError::InvalidDirectAccess { tag: value.tag() }),
        }
    }
}
