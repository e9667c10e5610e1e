//! Parser step chain.
//!
//! Parsing turns one statement into an [`ArgList`]. The statement is split
//! into words, and each word is offered to the chain's steps in order until
//! one claims it. A step claims a word by returning [`StepOutcome::Matched`]
//! (it has pushed zero or more entries) or [`StepOutcome::Failed`] (the
//! parse loop reports the error and pushes [`Ref::Invalid`] in its place).
//! Earlier steps shadow later ones: a numeric-looking word never reaches
//! variable lookup.
//!
//! # Standard chain
//!
//! | # | name | form |
//! |---|------|------|
//! | 1 | `function` | `(% body)` |
//! | 2 | `expression` | `(text)` |
//! | 3 | `string` | `{text}` or `"text"` |
//! | 4 | `number` | `42`, `-1.5`, `0xff`, `0b101`, `0o17` |
//! | 5 | `key` | `@name`, `@@type` |
//! | 6 | `reuse` | `$N`, `$name`, `$$name` |
//! | 7 | `list` | `[items]` |
//! | 8 | `direct_access` | `<expr>` |
//! | 9 | `char` | `'c'` |
//! | 10 | `spread` | `...name` |
//! | 11 | `comment` | `//` |
//! | 12 | `variable` | bare word |
//!
//! Function bodies are parsed with an extra `param` step in front, which
//! turns `%N` and `...%` into call-time placeholders.
//!
//! A chain is immutable and cheap to clone. Customising means building a new
//! chain with [`Parser::with_front`], [`Parser::without`] or
//! [`Parser::insert_before`].

mod number;
pub mod steps;

pub use number::parse_number;

use std::rc::Rc;

use kiln_lexer::{split_words, Token};

use crate::context::Context;
use crate::errors::RuntimeError;
use crate::stack::ensure_sufficient_stack;
use crate::value::{ArgList, Ref};

/// What a step did with the current word.
#[derive(Debug)]
pub enum StepOutcome {
    /// Consumed; stop trying further steps.
    Matched,
    /// Not this step's form; try the next one.
    NotMatched,
    /// This step's form, but malformed. Reported, and `Invalid` is pushed.
    Failed(RuntimeError),
}

/// One link of the parser chain.
pub trait ParserStep {
    /// Stable name used to locate the step in a chain.
    fn name(&self) -> &'static str;

    /// Try to consume the current word of `state`.
    fn try_handle(&self, ctx: &mut Context, state: &mut ParseState<'_>) -> StepOutcome;
}

/// Per-statement parse state handed to each step.
pub struct ParseState<'a> {
    parser: &'a Parser,
    words: &'a [Token<'a>],
    index: usize,
    step: usize,
    done: bool,
    result: ArgList,
}

impl<'a> ParseState<'a> {
    fn new(parser: &'a Parser, words: &'a [Token<'a>]) -> Self {
        ParseState {
            parser,
            words,
            index: 0,
            step: 0,
            done: false,
            result: ArgList::new(),
        }
    }

    /// The chain this statement is being parsed with.
    pub fn parser(&self) -> &'a Parser {
        self.parser
    }

    /// The word being offered.
    pub fn word(&self) -> &'a str {
        self.words[self.index].text()
    }

    /// Position of the current word in the statement.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Position of the step being tried in the chain.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn words(&self) -> &'a [Token<'a>] {
        self.words
    }

    pub fn result(&self) -> &ArgList {
        &self.result
    }

    pub fn push(&mut self, entry: Ref) {
        self.result.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = Ref>) {
        self.result.extend(entries);
    }

    /// The most recent entry of the result.
    pub fn last(&self) -> Option<Ref> {
        self.result.as_slice().last().copied()
    }

    /// Discard the remaining words of the statement.
    pub fn skip_rest(&mut self) {
        self.done = true;
    }
}

/// An ordered chain of parser steps.
#[derive(Clone)]
pub struct Parser {
    steps: Rc<[Rc<dyn ParserStep>]>,
}

impl Parser {
    pub fn new(steps: impl IntoIterator<Item = Rc<dyn ParserStep>>) -> Self {
        Parser {
            steps: steps.into_iter().collect(),
        }
    }

    /// The twelve standard steps, in priority order.
    pub fn standard() -> Self {
        Parser::new(steps::standard())
    }

    /// A copy of this chain with `step` tried before all others.
    #[must_use]
    pub fn with_front(&self, step: impl ParserStep + 'static) -> Self {
        let front: Rc<dyn ParserStep> = Rc::new(step);
        Parser::new(std::iter::once(front).chain(self.steps.iter().cloned()))
    }

    /// A copy of this chain without the step called `name`.
    #[must_use]
    pub fn without(&self, name: &str) -> Self {
        Parser::new(self.steps.iter().filter(|s| s.name() != name).cloned())
    }

    /// A copy of this chain with `step` placed before the step called `name`,
    /// or appended when there is no such step.
    #[must_use]
    pub fn insert_before(&self, name: &str, step: impl ParserStep + 'static) -> Self {
        let mut steps: Vec<Rc<dyn ParserStep>> = self.steps.to_vec();
        let at = self.position(name).unwrap_or(steps.len());
        steps.insert(at, Rc::new(step));
        Parser::new(steps)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Context {
    /// Parse one statement into an argument list.
    ///
    /// New literals are written into fresh slots as they are met; the
    /// returned list refers to them by index.
    #[tracing::instrument(level = "trace", skip(self, parser))]
    pub fn parse(&mut self, parser: &Parser, text: &str) -> ArgList {
        let words = split_words(text);
        let mut state = ParseState::new(parser, &words);

        self.enter();
        ensure_sufficient_stack(|| {
            while state.index < words.len() && !state.done {
                self.parse_word(parser, &mut state);
                state.index += 1;
            }
        });
        self.leave();

        state.result
    }

    fn parse_word(&mut self, parser: &Parser, state: &mut ParseState<'_>) {
        for (position, step) in parser.steps.iter().enumerate() {
            state.step = position;
            match step.try_handle(self, state) {
                StepOutcome::NotMatched => {}
                StepOutcome::Matched => return,
                StepOutcome::Failed(error) => {
                    self.report(&error);
                    state.push(Ref::Invalid);
                    return;
                }
            }
        }
        tracing::debug!(word = state.word(), "no parser step claimed the word");
    }
}

#[cfg(test)]
mod tests;
