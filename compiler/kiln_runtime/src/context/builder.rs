//! Builder for [`Context`].

use kiln_store::ValueStore;

use super::{Context, CONTEXT_KEY, DEFAULT_DELIMITER, DELIMITER_KEY};
use crate::diagnostics::{stderr_handler, SharedDiagnostics};
use crate::eval::Evaluator;
use crate::parse::Parser;
use crate::value::Value;

/// Recursion limit when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Initial slot capacity when none is configured.
pub const DEFAULT_CAPACITY: usize = 16;

pub struct ContextBuilder {
    capacity: usize,
    parser: Option<Parser>,
    evaluator: Option<Evaluator>,
    diagnostics: Option<SharedDiagnostics>,
    max_depth: usize,
    delimiter: u8,
}

impl ContextBuilder {
    pub fn new() -> Self {
        ContextBuilder {
            capacity: DEFAULT_CAPACITY,
            parser: None,
            evaluator: None,
            diagnostics: None,
            max_depth: DEFAULT_MAX_DEPTH,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Parser used by [`Context::run`].
    #[must_use]
    pub fn parser(mut self, parser: Parser) -> Self {
        self.parser = Some(parser);
        self
    }

    #[must_use]
    pub fn evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    #[must_use]
    pub fn diagnostics(mut self, handler: SharedDiagnostics) -> Self {
        self.diagnostics = Some(handler);
        self
    }

    /// Nesting depth of parse/evaluate calls past which the context panics.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Initial statement delimiter. Must be a non-NUL ASCII byte.
    #[must_use]
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn build(self) -> Context {
        let delimiter = if self.delimiter.is_ascii() && self.delimiter != 0 {
            self.delimiter
        } else {
            tracing::warn!(delimiter = self.delimiter, "delimiter is not an ASCII byte, using `;`");
            DEFAULT_DELIMITER
        };

        let mut slots = ValueStore::table(self.capacity);
        slots.push_keyed(Value::Null, Some(CONTEXT_KEY));
        slots.push_keyed(Value::Any(i64::from(delimiter)), Some(DELIMITER_KEY));

        Context {
            slots,
            unused: Vec::new(),
            parser: self.parser.unwrap_or_else(Parser::standard),
            evaluator: self.evaluator.unwrap_or_else(Evaluator::standard),
            diagnostics: self.diagnostics.unwrap_or_else(stderr_handler),
            depth: 0,
            max_depth: self.max_depth,
        }
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
