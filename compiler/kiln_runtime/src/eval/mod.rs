//! Evaluation.
//!
//! [`Context::evaluate`] runs one argument list by offering its callee to
//! the evaluator chain. Each step handles one callee type:
//!
//! | step | callee | behaviour |
//! |------|--------|-----------|
//! | `native` | `Function` | call it with the context and argument list |
//! | `buffer` | `Buffer` | evaluate the text |
//! | `list` | `List` | report "not callable", no result |
//! | `baked` | `Baked` | run each statement |
//! | `user_function` | `UserFunction` | run each statement with placeholders bound |
//!
//! A callee no step accepts reports "invalid function type".
//!
//! Sequences stop at the first statement that yields [`Flow::Stop`]; that
//! result becomes the sequence's result.

mod steps;

pub use steps::{BakedStep, BufferStep, ListStep, NativeStep, UserFunctionStep};

use std::rc::Rc;

use kiln_lexer::split_statements;

use crate::context::{ArgListExt, Context};
use crate::errors::RuntimeError;
use crate::parse::Parser;
use crate::stack::ensure_sufficient_stack;
use crate::value::{ArgList, Flow, Ref, RefList, TypeTag};

/// What a step did with a callee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Ran the call.
    Handled(Flow),
    /// Took the call but produced nothing (it already reported why).
    Suppressed,
    /// Not this step's type.
    Declined,
}

/// One link of the evaluator chain.
pub trait EvaluatorStep {
    fn name(&self) -> &'static str;

    fn try_dispatch(
        &self,
        ctx: &mut Context,
        parser: &Parser,
        callee: usize,
        args: &ArgList,
    ) -> Dispatch;
}

/// An ordered chain of evaluator steps.
#[derive(Clone)]
pub struct Evaluator {
    steps: Rc<[Rc<dyn EvaluatorStep>]>,
}

impl Evaluator {
    pub fn new(steps: impl IntoIterator<Item = Rc<dyn EvaluatorStep>>) -> Self {
        Evaluator {
            steps: steps.into_iter().collect(),
        }
    }

    pub fn standard() -> Self {
        Evaluator::new([
            Rc::new(NativeStep) as Rc<dyn EvaluatorStep>,
            Rc::new(BufferStep),
            Rc::new(ListStep),
            Rc::new(BakedStep),
            Rc::new(UserFunctionStep),
        ])
    }

    /// A copy of this chain with `step` tried first.
    #[must_use]
    pub fn with_front(&self, step: impl EvaluatorStep + 'static) -> Self {
        let front: Rc<dyn EvaluatorStep> = Rc::new(step);
        Evaluator::new(std::iter::once(front).chain(self.steps.iter().cloned()))
    }

    #[must_use]
    pub fn without(&self, name: &str) -> Self {
        Evaluator::new(self.steps.iter().filter(|s| s.name() != name).cloned())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    fn dispatch(&self, ctx: &mut Context, parser: &Parser, callee: usize, args: &ArgList) -> Flow {
        for step in self.steps.iter() {
            match step.try_dispatch(ctx, parser, callee, args) {
                Dispatch::Handled(flow) => return flow,
                Dispatch::Suppressed => return Flow::Continue,
                Dispatch::Declined => {}
            }
        }
        ctx.report(&RuntimeError::InvalidFunctionType { tag: ctx.tag(callee) });
        Flow::Continue
    }
}

impl Context {
    /// Run one argument list.
    #[tracing::instrument(level = "trace", skip_all, fields(callee = ?args.callee()))]
    pub fn evaluate(&mut self, parser: &Parser, args: &ArgList) -> Flow {
        let Ref::Slot(callee) = args.callee() else {
            self.report(&RuntimeError::InvalidFunctionType { tag: TypeTag::Null });
            return Flow::Continue;
        };

        self.enter();
        let evaluator = self.evaluator().clone();
        let flow = ensure_sufficient_stack(|| evaluator.dispatch(self, parser, callee, args));
        self.leave();
        flow
    }

    /// Split `text` into statements, then parse and run each one until a
    /// statement stops.
    ///
    /// Blank statements, and statements without a usable callee, are skipped.
    #[tracing::instrument(level = "debug", skip(self, parser))]
    pub fn eval(&mut self, parser: &Parser, text: &str) -> Flow {
        self.enter();
        let delimiter = self.delimiter();
        let mut flow = Flow::Continue;
        for statement in split_statements(text, delimiter) {
            if statement.is_blank() {
                continue;
            }
            let args = self.parse(parser, statement.text());
            let callable = match args.callee() {
                Ref::Slot(index) => self.tag(index) != TypeTag::Null,
                _ => false,
            };
            if !callable {
                tracing::warn!(statement = statement.text(), "skipping statement without a callee");
                continue;
            }
            flow = self.evaluate(parser, &args);
            if flow.is_stop() {
                break;
            }
        }
        self.leave();
        flow
    }

    /// Run each statement of a baked body.
    pub(crate) fn run_baked(&mut self, parser: &Parser, body: &RefList) -> Flow {
        let mut scratch = ArgList::new();
        for statement in body.iter().filter_map(|entry| entry.slot()) {
            match self.get(statement).as_list() {
                Some(list) => scratch.refill(list.as_slice()),
                None => continue,
            }
            if let Flow::Stop(index) = self.evaluate(parser, &scratch) {
                return Flow::Stop(index);
            }
        }
        Flow::Continue
    }

    /// Run each statement of a user-function body with `Param(k)` replaced
    /// by the call's argument `k` and `Spread` by all of them.
    pub(crate) fn call_user_function(
        &mut self,
        parser: &Parser,
        body: &RefList,
        call: &ArgList,
    ) -> Flow {
        let count = call.arg_count();
        let mut scratch = ArgList::new();
        for statement in body.iter().filter_map(|entry| entry.slot()) {
            let Some(list) = self.get(statement).as_list() else {
                continue;
            };
            scratch.clear();
            for entry in list {
                match *entry {
                    Ref::Param(k) if k < count => scratch.push(call.arg_ref(k)),
                    Ref::Param(k) => {
                        self.report(&RuntimeError::ArgumentOutOfRange { index: k, count });
                        return Flow::Continue;
                    }
                    Ref::Spread => scratch.extend(call.iter().skip(1).copied()),
                    other => scratch.push(other),
                }
            }
            if let Flow::Stop(index) = self.evaluate(parser, &scratch) {
                return Flow::Stop(index);
            }
        }
        Flow::Continue
    }
}
