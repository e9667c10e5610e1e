//! Kiln Runtime - an embeddable, index-addressed language runtime.
//!
//! A [`Context`] is a single keyed store that serves as the program's heap,
//! symbol table and code container. Source text is split into statements,
//! each statement is parsed by an ordered chain of [`ParserStep`]s into an
//! argument list of slot indices, and the argument list is run by an ordered
//! chain of [`EvaluatorStep`]s that dispatch on the callee's type.
//!
//! ```text
//! source ──► split_statements ──► parse (ParserStep chain) ──► ArgList
//!                                      │ writes literal slots      │
//!                                      ▼                           ▼
//!                                   Context ◄──── evaluate (EvaluatorStep chain)
//! ```
//!
//! # Embedding
//!
//! ```text
//! fn add(ctx: &mut Context, args: &ArgList) -> Flow {
//!     let sum = ctx.arg(args, 0).as_int().unwrap_or(0) + ctx.arg(args, 1).as_int().unwrap_or(0);
//!     Flow::Stop(ctx.new_var(Value::Any(sum), None))
//! }
//!
//! let mut ctx = Context::new();
//! ctx.add_function("add", add);
//! let result = ctx.run("add 2 3");
//! ```
//!
//! Hosts that want the runtime's trace output call [`init_tracing`] once at
//! startup and set `RUST_LOG`.
//!
//! # Errors
//!
//! Malformed program text is a soft error: it is reported through the
//! context's diagnostics handler and evaluation moves on. Broken embedder
//! contracts (slot or argument index out of range, recursion past
//! [`ContextBuilder::max_depth`]) panic through [`fatal::contract_violation`].

mod bake;
pub mod context;
pub mod diagnostics;
mod errors;
pub mod eval;
pub mod fatal;
pub mod parse;
mod stack;
mod value;

pub use context::{ArgListExt, Context, ContextBuilder};
pub use diagnostics::{buffer_handler, silent_handler, stderr_handler, SharedDiagnostics};
pub use errors::RuntimeError;
pub use eval::{Dispatch, Evaluator, EvaluatorStep};
pub use parse::{ParseState, Parser, ParserStep, StepOutcome};
pub use value::{ArgList, Flow, NativeFn, Ref, RefList, TypeTag, Value};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
/// Enable with `RUST_LOG=kiln_runtime=debug` or `RUST_LOG=kiln_runtime=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
