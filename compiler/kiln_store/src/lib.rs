//! Kiln Store - the growable slot container every runtime layer builds on.
//!
//! A [`ValueStore`] is an ordered sequence of elements with an optional,
//! index-aligned key column. With keys it acts as a table (the runtime's
//! context is one); without keys it is a plain sequence (argument lists,
//! list payloads and baked statement bodies).
//!
//! # Invariants
//!
//! - The key column, when present, always has exactly one entry per element.
//!   Every mutation that moves elements (`insert`, `remove`, `swap`, `shift`,
//!   `reverse`, ...) moves the keys with them.
//! - Capacity doubles when a push finds the store full and halves when the
//!   length falls to a quarter of it.
//! - Indexing past the end is a contract violation and panics.

mod store;

pub use store::{ValueStore, MIN_SHRINK_CAPACITY};
