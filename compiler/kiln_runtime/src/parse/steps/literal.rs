//! Literal values: strings, numbers, characters.

use kiln_lexer::{strip_escapes, unwrap_group, Group};

use crate::context::Context;
use crate::parse::{parse_number, ParseState, ParserStep, StepOutcome};
use crate::value::{Ref, Value};

/// `{text}` or `"text"`: a `Buffer` slot with escapes removed.
pub struct StringStep;

impl ParserStep for StringStep {
    fn name(&self) -> &'static str {
        "string"
    }

    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        let word = state.word();
        let quoted = word.len() >= 2 && word.starts_with('"') && word.ends_with('"');
        let inner = unwrap_group(word, Group::Brace)
            .or_else(|| quoted.then(|| &word[1..word.len() - 1]));
        let Some(inner) = inner else {
            return StepOutcome::NotMatched;
        };
        let index = ctx.new_var(Value::Buffer(strip_escapes(inner).into_owned()), None);
        state.push(Ref::Slot(index));
        StepOutcome::Matched
    }
}

/// Integer or float literal: a leading digit, or `-` followed by a digit or
/// `.`. A lone `-` is left for later steps so it can name a function.
pub struct NumberStep;

fn is_number(word: &str) -> bool {
    match word.as_bytes() {
        [first, ..] if first.is_ascii_digit() => true,
        [b'-', second, ..] => second.is_ascii_digit() || *second == b'.',
        _ => false,
    }
}

impl ParserStep for NumberStep {
    fn name(&self) -> &'static str {
        "number"
    }

    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        let word = state.word();
        if !is_number(word) {
            return StepOutcome::NotMatched;
        }
        let index = ctx.new_var(parse_number(word), None);
        state.push(Ref::Slot(index));
        StepOutcome::Matched
    }
}

/// `'c'`: the character's code point as an `Any` slot.
pub struct CharStep;

impl ParserStep for CharStep {
    fn name(&self) -> &'static str {
        "char"
    }

    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        let Some(inner) = state
            .word()
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
        else {
            return StepOutcome::NotMatched;
        };
        let mut chars = inner.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return StepOutcome::NotMatched;
        };
        let index = ctx.new_var(Value::Any(i64::from(u32::from(c))), None);
        state.push(Ref::Slot(index));
        StepOutcome::Matched
    }
}
