//! Standard evaluator steps.

use super::{Dispatch, EvaluatorStep};
use crate::context::Context;
use crate::errors::RuntimeError;
use crate::parse::Parser;
use crate::value::{ArgList, TypeTag, Value};

/// Calls a `Function` slot.
pub struct NativeStep;

impl EvaluatorStep for NativeStep {
    fn name(&self) -> &'static str {
        "native"
    }

    fn try_dispatch(
        &self,
        ctx: &mut Context,
        _parser: &Parser,
        callee: usize,
        args: &ArgList,
    ) -> Dispatch {
        match ctx.get(callee).as_function() {
            Some(function) => Dispatch::Handled(function(ctx, args)),
            None => Dispatch::Declined,
        }
    }
}

/// Evaluates a `Buffer` slot's text.
pub struct BufferStep;

impl EvaluatorStep for BufferStep {
    fn name(&self) -> &'static str {
        "buffer"
    }

    fn try_dispatch(
        &self,
        ctx: &mut Context,
        parser: &Parser,
        callee: usize,
        _args: &ArgList,
    ) -> Dispatch {
        let Value::Buffer(text) = ctx.get(callee) else {
            return Dispatch::Declined;
        };
        let text = text.clone();
        Dispatch::Handled(ctx.eval(parser, &text))
    }
}

/// Lists are data; calling one is an error.
pub struct ListStep;

impl EvaluatorStep for ListStep {
    fn name(&self) -> &'static str {
        "list"
    }

    fn try_dispatch(
        &self,
        ctx: &mut Context,
        _parser: &Parser,
        callee: usize,
        _args: &ArgList,
    ) -> Dispatch {
        if ctx.tag(callee) != TypeTag::List {
            return Dispatch::Declined;
        }
        ctx.report(&RuntimeError::NotCallable { tag: TypeTag::List });
        Dispatch::Suppressed
    }
}

/// Runs a `Baked` slot.
pub struct BakedStep;

impl EvaluatorStep for BakedStep {
    fn name(&self) -> &'static str {
        "baked"
    }

    fn try_dispatch(
        &self,
        ctx: &mut Context,
        parser: &Parser,
        callee: usize,
        _args: &ArgList,
    ) -> Dispatch {
        let Value::Baked(body) = ctx.get(callee) else {
            return Dispatch::Declined;
        };
        let body = body.clone();
        Dispatch::Handled(ctx.run_baked(parser, &body))
    }
}

/// Runs a `UserFunction` slot against the call's arguments.
pub struct UserFunctionStep;

impl EvaluatorStep for UserFunctionStep {
    fn name(&self) -> &'static str {
        "user_function"
    }

    fn try_dispatch(
        &self,
        ctx: &mut Context,
        parser: &Parser,
        callee: usize,
        args: &ArgList,
    ) -> Dispatch {
        let Value::UserFunction(body) = ctx.get(callee) else {
            return Dispatch::Declined;
        };
        let body = body.clone();
        Dispatch::Handled(ctx.call_user_function(parser, &body, args))
    }
}
