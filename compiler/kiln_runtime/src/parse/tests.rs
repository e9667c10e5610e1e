use pretty_assertions::assert_eq;

use super::*;
use crate::context::{CONTEXT_KEY, CONTEXT_SLOT, DELIMITER_KEY};
use crate::diagnostics::{buffer_handler, SharedDiagnostics};
use crate::value::{Flow, RefList, TypeTag, Value};

fn setup() -> (Context, Parser, SharedDiagnostics) {
    let handler = buffer_handler();
    let ctx = Context::builder().diagnostics(handler.clone()).build();
    let parser = ctx.parser().clone();
    (ctx, parser, handler)
}

fn slots(args: &ArgList) -> Vec<usize> {
    args.iter().filter_map(|r| r.slot()).collect()
}

fn noop(_ctx: &mut Context, _args: &ArgList) -> Flow {
    Flow::Continue
}

fn answer(ctx: &mut Context, _args: &ArgList) -> Flow {
    Flow::Stop(ctx.new_var(Value::Any(42), None))
}

// Chain

#[test]
fn standard_chain_order() {
    assert_eq!(
        Parser::standard().names(),
        vec![
            "function",
            "expression",
            "string",
            "number",
            "key",
            "reuse",
            "list",
            "direct_access",
            "char",
            "spread",
            "comment",
            "variable",
        ]
    );
}

#[test]
fn chain_edits_return_new_chains() {
    let standard = Parser::standard();
    let without = standard.without("comment");
    assert_eq!(without.len(), 11);
    assert_eq!(without.position("comment"), None);
    assert_eq!(standard.position("comment"), Some(10));

    let front = standard.with_front(steps::ParamStep);
    assert_eq!(front.position("param"), Some(0));
    assert_eq!(front.position("function"), Some(1));

    let inserted = standard.insert_before("variable", steps::ParamStep);
    assert_eq!(inserted.position("param"), Some(11));
    assert_eq!(inserted.position("variable"), Some(12));

    let appended = standard.insert_before("missing", steps::ParamStep);
    assert_eq!(appended.position("param"), Some(12));
}

struct TrueStep;

impl ParserStep for TrueStep {
    fn name(&self) -> &'static str {
        "true"
    }

    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome {
        if state.word() != "true" {
            return StepOutcome::NotMatched;
        }
        let index = ctx.new_var(Value::Any(1), None);
        state.push(Ref::Slot(index));
        StepOutcome::Matched
    }
}

#[test]
fn custom_step_shadows_variable_lookup() {
    let (mut ctx, parser, handler) = setup();
    let parser = parser.insert_before("variable", TrueStep);
    let args = ctx.parse(&parser, "true");
    let index = slots(&args)[0];
    assert_eq!(ctx.get(index).as_int(), Some(1));
    assert_eq!(handler.get_output(), "");
}

#[test]
fn unclaimed_words_are_dropped() {
    let (mut ctx, _, handler) = setup();
    let args = ctx.parse(&Parser::new([]), "anything at all");
    assert!(args.is_empty());
    assert_eq!(handler.get_output(), "");
}

// Literals

#[test]
fn numbers_become_slots() {
    let (mut ctx, parser, _) = setup();
    let args = ctx.parse(&parser, "1 -2 0x10 2.5");
    let values: Vec<Value> = slots(&args).into_iter().map(|i| ctx.get(i).clone()).collect();
    assert_eq!(values[0].as_int(), Some(1));
    assert_eq!(values[1].as_int(), Some(-2));
    assert_eq!(values[2].as_int(), Some(16));
    assert_eq!(values[3].as_float(), Some(2.5));
}

#[test]
fn lone_minus_is_a_name() {
    let (mut ctx, parser, _) = setup();
    let minus = ctx.add_function("-", noop);
    let args = ctx.parse(&parser, "- 1");
    assert_eq!(args.as_slice()[0], Ref::Slot(minus));
}

#[test]
fn strings_strip_brackets_and_escapes() {
    let (mut ctx, parser, _) = setup();
    let args = ctx.parse(&parser, r#"{a \} b} "two words""#);
    let texts: Vec<String> = slots(&args)
        .into_iter()
        .filter_map(|i| ctx.get(i).as_str().map(str::to_owned))
        .collect();
    assert_eq!(texts, vec!["a } b".to_owned(), "two words".to_owned()]);
}

#[test]
fn char_literal_is_code_point() {
    let (mut ctx, parser, _) = setup();
    let args = ctx.parse(&parser, "'x' 'é'");
    let codes: Vec<Option<i64>> = slots(&args).into_iter().map(|i| ctx.get(i).as_int()).collect();
    assert_eq!(codes, vec![Some(120), Some(233)]);
}

#[test]
fn list_literal_holds_item_slots() {
    let (mut ctx, parser, _) = setup();
    let args = ctx.parse(&parser, "[1 {two} 3]");
    let list = slots(&args)[0];
    assert_eq!(ctx.tag(list), TypeTag::List);
    let items = ctx.get(list).as_list().map(RefList::len);
    assert_eq!(items, Some(3));
}

// Keys and tags

#[test]
fn key_renames_previous_result() {
    let (mut ctx, parser, _) = setup();
    let args = ctx.parse(&parser, "5 @five");
    assert_eq!(args.len(), 1);
    assert_eq!(ctx.find("five"), Some(slots(&args)[0]));
}

#[test]
fn key_without_previous_value_is_reported() {
    let (mut ctx, parser, handler) = setup();
    let args = ctx.parse(&parser, "@lonely");
    assert!(args.is_empty());
    assert_eq!(handler.get_output(), "error: `@lonely` has no previous value\n");
}

#[test]
fn key_after_failed_word_is_reported() {
    let (mut ctx, parser, handler) = setup();
    let args = ctx.parse(&parser, "missing @name");
    assert_eq!(args.as_slice(), &[Ref::Invalid]);
    let output = handler.get_output();
    assert!(output.contains("variable `missing` not found"));
    assert!(output.contains("`@name` follows a value that failed to parse"));
}

#[test]
fn retag_by_name_code_and_variable() {
    let (mut ctx, parser, handler) = setup();
    let args = ctx.parse(&parser, "[1] @@baked");
    assert_eq!(ctx.tag(slots(&args)[0]), TypeTag::Baked);

    let args = ctx.parse(&parser, "0 @@1");
    assert_eq!(ctx.get(slots(&args)[0]).as_float(), Some(0.0));

    ctx.new_var(Value::Any(TypeTag::Null.code()), Some("nothing"));
    let args = ctx.parse(&parser, "{gone} @@nothing");
    assert_eq!(ctx.tag(slots(&args)[0]), TypeTag::Null);

    assert_eq!(handler.get_output(), "");
}

#[test]
fn retag_errors_are_reported_not_fatal() {
    let (mut ctx, parser, handler) = setup();
    let args = ctx.parse(&parser, "1 @@bogus {s} @@float 2");
    assert_eq!(args.len(), 3);
    let output = handler.get_output();
    assert!(output.contains("unknown type `bogus`"));
    assert!(output.contains("cannot retag a buffer as float"));
}

// Reuse

#[test]
fn reuse_by_name_assigns_next_value() {
    let (mut ctx, parser, _) = setup();
    let args = ctx.parse(&parser, "$x 5");
    let x = ctx.find("x").unwrap_or_default();
    assert_eq!(slots(&args), vec![x]);
    assert_eq!(ctx.get(x).as_int(), Some(5));

    let again = ctx.parse(&parser, "$x 6");
    assert_eq!(slots(&again), vec![x]);
    assert_eq!(ctx.get(x).as_int(), Some(6));
}

#[test]
fn reuse_by_index_clears_then_reuses() {
    let (mut ctx, parser, _) = setup();
    let target = ctx.new_var(Value::Buffer("old".to_owned()), Some("old"));
    ctx.new_var(Value::Any(0), None);

    let args = ctx.parse(&parser, &format!("${target} 7"));
    assert_eq!(slots(&args), vec![target]);
    assert_eq!(ctx.get(target).as_int(), Some(7));
    assert_eq!(ctx.key(target), None);
}

#[test]
fn double_dollar_pins_a_fresh_slot() {
    let (mut ctx, parser, _) = setup();
    let free = ctx.new_var(Value::Null, None);
    ctx.delete_var(free);
    let len = ctx.len();

    let args = ctx.parse(&parser, "$$fresh 1");
    assert_eq!(slots(&args), vec![len]);
    assert_eq!(ctx.key(len), Some("fresh"));
    assert_eq!(ctx.unused(), &[free]);
}

#[test]
fn reuse_index_out_of_range_is_reported() {
    let (mut ctx, parser, handler) = setup();
    let args = ctx.parse(&parser, "$99");
    assert_eq!(args.as_slice(), &[Ref::Invalid]);
    assert!(handler.get_output().contains("cannot reuse slot 99"));
}

#[test]
fn reserved_slots_cannot_be_reused() {
    let (mut ctx, parser, handler) = setup();
    for source in ["$0 7", "$1 7", "$context 7"] {
        let args = ctx.parse(&parser, source);
        assert_eq!(args.as_slice().first(), Some(&Ref::Invalid));
    }
    assert_eq!(ctx.find(CONTEXT_KEY), Some(CONTEXT_SLOT));
    assert!(ctx.get(CONTEXT_SLOT).is_null());
    assert_eq!(ctx.find(DELIMITER_KEY), Some(1));
    assert_eq!(ctx.delimiter(), b';');
    assert!(ctx.unused().is_empty());
    assert_eq!(
        handler.get_output().matches("is reserved and cannot be reused").count(),
        3
    );
}

// Direct access, spread, comments, variables

#[test]
fn direct_access_pushes_referenced_slot() {
    let (mut ctx, parser, _) = setup();
    let target = ctx.new_var(Value::Buffer("target".to_owned()), None);
    let pointer = i64::try_from(target).unwrap_or_default();
    ctx.new_var(Value::Any(pointer), Some("ptr"));

    let args = ctx.parse(&parser, "<ptr>");
    assert_eq!(args.as_slice(), &[Ref::Slot(target)]);
}

#[test]
fn direct_access_errors() {
    let (mut ctx, parser, handler) = setup();
    ctx.new_var(Value::Buffer("text".to_owned()), Some("s"));
    let args = ctx.parse(&parser, "<> <s> <99>");
    assert_eq!(args.as_slice(), &[Ref::Invalid, Ref::Invalid, Ref::Invalid]);
    let output = handler.get_output();
    assert!(output.contains("empty direct access"));
    assert!(output.contains("found a buffer"));
    assert!(output.contains("found a any"));
}

#[test]
fn spread_splices_list_entries() {
    let (mut ctx, parser, _) = setup();
    let list = ctx.parse(&parser, "[1 2 3] @xs");
    let items: Vec<Ref> = ctx
        .get(slots(&list)[0])
        .as_list()
        .map(|l| l.as_slice().to_vec())
        .unwrap_or_default();

    let args = ctx.parse(&parser, "0 ...xs 4");
    assert_eq!(args.len(), 5);
    assert_eq!(&args.as_slice()[1..4], items.as_slice());
}

#[test]
fn spread_of_non_list_is_reported() {
    let (mut ctx, parser, handler) = setup();
    let args = ctx.parse(&parser, "...delimiter ...nope");
    assert_eq!(args.as_slice(), &[Ref::Invalid, Ref::Invalid]);
    let output = handler.get_output();
    assert!(output.contains("`delimiter` is a any, only lists can be spread"));
    assert!(output.contains("variable `nope` not found"));
}

#[test]
fn comment_discards_rest_of_statement() {
    let (mut ctx, parser, _) = setup();
    let args = ctx.parse(&parser, "1 // 2 3");
    assert_eq!(args.len(), 1);
}

#[test]
fn variable_lookup_pushes_index() {
    let (mut ctx, parser, handler) = setup();
    let args = ctx.parse(&parser, "context delimiter nope");
    assert_eq!(args.as_slice(), &[Ref::Slot(0), Ref::Slot(1), Ref::Invalid]);
    assert_eq!(handler.get_output(), "error: variable `nope` not found\n");
}

// Recursive forms

#[test]
fn expression_pushes_result_or_invalid() {
    let (mut ctx, parser, _) = setup();
    ctx.add_function("answer", answer);
    ctx.add_function("noop", noop);

    let args = ctx.parse(&parser, "(answer) (noop)");
    assert_eq!(args.len(), 2);
    let first = slots(&args)[0];
    assert_eq!(ctx.get(first).as_int(), Some(42));
    assert_eq!(args.as_slice()[1], Ref::Invalid);
}

#[test]
fn function_literal_kinds() {
    let (mut ctx, parser, handler) = setup();
    ctx.add_function("noop", noop);

    let args = ctx.parse(&parser, "(% noop %0) (% noop) (%)");
    let kinds: Vec<TypeTag> = slots(&args).into_iter().map(|i| ctx.tag(i)).collect();
    assert_eq!(kinds, vec![TypeTag::UserFunction, TypeTag::Baked]);
    assert_eq!(args.as_slice()[2], Ref::Invalid);
    assert_eq!(handler.get_output(), "error: function literal has an empty body\n");
}

#[test]
fn placeholders_outside_function_are_variables() {
    let (mut ctx, parser, handler) = setup();
    let args = ctx.parse(&parser, "%0");
    assert_eq!(args.as_slice(), &[Ref::Invalid]);
    assert!(handler.get_output().contains("variable `%0` not found"));
}
