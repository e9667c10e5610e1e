//! Kiln Lexer - splits source text into words and statements.
//!
//! The language has no token grammar beyond grouping: a word is either a
//! balanced bracket group, a quoted run, or a whitespace-delimited run of
//! bytes. Statements are separated by a single delimiter byte that is
//! ignored inside any open group.
//!
//! # Grouping
//!
//! | open | close | meaning downstream |
//! |------|-------|--------------------|
//! | `(`  | `)`   | sub-expression or function literal |
//! | `{`  | `}`   | string literal |
//! | `[`  | `]`   | list literal |
//! | `<`  | `>`   | direct access |
//!
//! A backslash immediately before a bracket byte removes it from depth
//! counting, so `{a \} b}` is a single group.
//!
//! Tokens borrow the source; a token's byte length travels with its slice, so
//! downstream code never rescans for a terminator.

mod escape;
mod group;
mod split;
mod token;

pub use escape::strip_escapes;
pub use group::{unwrap_group, Group};
pub use split::{split_statements, split_words, Statements, Words};
pub use token::Token;
