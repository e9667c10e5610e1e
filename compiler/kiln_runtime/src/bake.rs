//! Precompiling statement blocks.
//!
//! A baked block is a `Baked` slot whose sequence refers to one `List` slot
//! per statement; each list is that statement's parsed argument list.
//! Running it later skips splitting and parsing.

use kiln_lexer::split_statements;

use crate::context::Context;
use crate::parse::Parser;
use crate::value::{Ref, RefList, Value};

impl Context {
    /// Parse every non-blank statement of `text` and store the result as a
    /// `Baked` slot. Returns `None` when there is nothing to bake.
    #[tracing::instrument(level = "debug", skip(self, parser))]
    pub fn bake(&mut self, parser: &Parser, text: &str) -> Option<usize> {
        let delimiter = self.delimiter();
        let mut body = RefList::new();
        for statement in split_statements(text, delimiter) {
            if statement.is_blank() {
                continue;
            }
            let args = self.parse(parser, statement.text());
            body.push(Ref::Slot(self.new_var(Value::List(args), None)));
        }
        if body.is_empty() {
            return None;
        }
        tracing::debug!(statements = body.len(), "baked");
        Some(self.new_var(Value::Baked(body), None))
    }

    /// Whether any statement of the baked slot holds a call-time placeholder.
    pub fn is_parameterized(&self, baked: usize) -> bool {
        let Some(body) = self.get(baked).as_list() else {
            return false;
        };
        body.iter()
            .filter_map(|entry| entry.slot())
            .filter_map(|index| self.get(index).as_list())
            .any(|statement| statement.iter().any(|entry| entry.is_placeholder()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::diagnostics::buffer_handler;
    use crate::value::{Ref, TypeTag};
    use crate::Context;

    #[test]
    fn bakes_one_list_per_statement() {
        let mut ctx = Context::builder().diagnostics(buffer_handler()).build();
        let parser = ctx.parser().clone();
        let baked = ctx.bake(&parser, "1 2; 3;;  ; 4").unwrap_or_default();

        assert_eq!(ctx.tag(baked), TypeTag::Baked);
        let statements: Vec<usize> = ctx
            .get(baked)
            .as_list()
            .map(|body| body.iter().filter_map(|r| r.slot()).collect())
            .unwrap_or_default();
        assert_eq!(statements.len(), 3);
        for index in &statements {
            assert_eq!(ctx.tag(*index), TypeTag::List);
        }
        assert!(!ctx.is_parameterized(baked));
    }

    #[test]
    fn blank_block_bakes_nothing() {
        let mut ctx = Context::new();
        let parser = ctx.parser().clone();
        assert_eq!(ctx.bake(&parser, " ; \n ;"), None);
        assert_eq!(ctx.owned_payloads(), 0);
    }

    #[test]
    fn placeholders_mark_a_body_parameterized() {
        let mut ctx = Context::new();
        let parser = ctx.parser().with_front(crate::parse::steps::ParamStep);
        let baked = ctx.bake(&parser, "context; context %1").unwrap_or_default();
        assert!(ctx.is_parameterized(baked));

        let last = ctx
            .get(baked)
            .as_list()
            .and_then(|body| body.as_slice().last().copied())
            .and_then(Ref::slot)
            .unwrap_or_default();
        let entries = ctx.get(last).as_list().map(|l| l.as_slice().to_vec()).unwrap_or_default();
        assert_eq!(entries, vec![Ref::Slot(0), Ref::Param(1)]);
    }
}
