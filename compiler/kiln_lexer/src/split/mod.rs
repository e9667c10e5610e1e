//! Word and statement splitting.
//!
//! Both splitters work on bytes: every byte they treat specially is ASCII, so
//! cut points always land on char boundaries.

use smallvec::SmallVec;

use crate::group::Group;
use crate::token::Token;

/// Words of one statement. Most statements have a handful of words.
pub type Words<'src> = SmallVec<[Token<'src>; 8]>;

/// Statements of one source text.
pub type Statements<'src> = SmallVec<[Token<'src>; 4]>;

#[inline]
fn is_quote(byte: u8) -> bool {
    byte == b'"' || byte == b'\''
}

#[inline]
fn escaped(bytes: &[u8], at: usize) -> bool {
    at > 0 && bytes[at - 1] == b'\\'
}

/// Index of the byte closing the group opened at `start`, if balanced.
///
/// Only brackets of the same kind count toward depth; an opener or closer
/// directly preceded by a backslash is literal.
fn matching_close(bytes: &[u8], start: usize, group: Group) -> Option<usize> {
    let mut depth = 1usize;
    for at in start + 1..bytes.len() {
        let byte = bytes[at];
        if escaped(bytes, at) {
            continue;
        }
        if byte == group.open() {
            depth += 1;
        } else if byte == group.close() {
            depth -= 1;
            if depth == 0 {
                return Some(at);
            }
        }
    }
    None
}

/// End (exclusive) of a quoted run starting at `start`.
///
/// An unterminated quote runs to the end of the input.
fn quote_end(bytes: &[u8], start: usize) -> usize {
    memchr::memchr(bytes[start], &bytes[start + 1..]).map_or(bytes.len(), |off| start + off + 2)
}

/// Split one statement into words.
///
/// - A bracket group, nested brackets of its own kind included, is one word.
/// - A quoted run (`"..."` or `'...'`) is one word, quotes included.
/// - Anything else is a maximal run of non-whitespace bytes.
///
/// A group that never closes is read as a plain word instead.
pub fn split_words(src: &str) -> Words<'_> {
    let bytes = src.as_bytes();
    let mut words = Words::new();
    let mut at = 0;

    while at < bytes.len() {
        let byte = bytes[at];
        if byte.is_ascii_whitespace() {
            at += 1;
            continue;
        }

        if let Some(group) = Group::from_open(byte) {
            if let Some(close) = matching_close(bytes, at, group) {
                words.push(Token::new(src, at, close + 1));
                at = close + 1;
                continue;
            }
        } else if is_quote(byte) {
            let end = quote_end(bytes, at);
            words.push(Token::new(src, at, end));
            at = end;
            continue;
        }

        let end = bytes[at..]
            .iter()
            .position(u8::is_ascii_whitespace)
            .map_or(bytes.len(), |off| at + off);
        words.push(Token::new(src, at, end));
        at = end;
    }

    words
}

/// Split source text into statements at `delimiter`.
///
/// The delimiter only separates statements at depth zero. Depth is tracked
/// per bracket kind, and a bracket only counts while every other kind is at
/// depth zero, so `{ ( }` leaves the paren counter untouched. Quotes are
/// ordinary bytes here: `don't; b` is two statements. A stray closer never
/// drives a counter below zero.
///
/// A trailing delimiter does not produce an empty last statement; empty
/// statements between two delimiters are kept.
pub fn split_statements(src: &str, delimiter: u8) -> Statements<'_> {
    let bytes = src.as_bytes();
    let mut statements = Statements::new();
    let mut depth = [0usize; 4];
    let mut start = 0;

    let others_closed = |depth: &[usize; 4], group: Group| {
        depth
            .iter()
            .enumerate()
            .all(|(kind, d)| kind == group.index() || *d == 0)
    };

    for (at, &byte) in bytes.iter().enumerate() {
        let top_level = depth.iter().all(|d| *d == 0);

        if !escaped(bytes, at) {
            if let Some(group) = Group::from_open(byte) {
                if others_closed(&depth, group) {
                    depth[group.index()] += 1;
                }
            } else if let Some(group) = Group::from_close(byte) {
                if others_closed(&depth, group) {
                    depth[group.index()] = depth[group.index()].saturating_sub(1);
                }
            }
        }

        if byte == delimiter && top_level {
            statements.push(Token::new(src, start, at));
            start = at + 1;
        }
    }

    if start < bytes.len() {
        statements.push(Token::new(src, start, bytes.len()));
    }

    statements
}

#[cfg(test)]
mod tests;
