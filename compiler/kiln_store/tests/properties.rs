//! Property tests: the key column never drifts out of alignment.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use kiln_store::ValueStore;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Push(u8),
    Pop,
    Insert(usize, u8),
    Remove(usize),
    Swap(usize, usize),
    FastRemove(usize),
    Shift,
    Reverse,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Push),
        Just(Op::Pop),
        (0usize..16, any::<u8>()).prop_map(|(i, v)| Op::Insert(i, v)),
        (0usize..16).prop_map(Op::Remove),
        (0usize..16, 0usize..16).prop_map(|(i, j)| Op::Swap(i, j)),
        (0usize..16).prop_map(Op::FastRemove),
        Just(Op::Shift),
        Just(Op::Reverse),
    ]
}

/// Apply an op to both a table whose keys mirror its values and a
/// reference `Vec`, skipping ops that would index out of range.
fn apply(table: &mut ValueStore<u8>, model: &mut Vec<u8>, op: &Op) {
    let len = model.len();
    match *op {
        Op::Push(v) => {
            table.push_keyed(v, Some(&v.to_string()));
            model.push(v);
        }
        Op::Pop => {
            assert_eq!(table.pop(), model.pop());
        }
        Op::Insert(i, v) if i <= len => {
            table.insert(i, v, Some(&v.to_string()));
            model.insert(i, v);
        }
        Op::Remove(i) if i < len => {
            assert_eq!(table.remove(i), model.remove(i));
        }
        Op::Swap(i, j) if i < len && j < len => {
            table.swap(i, j);
            model.swap(i, j);
        }
        Op::FastRemove(i) if i < len => {
            assert_eq!(table.fast_remove(i), model.swap_remove(i));
        }
        Op::Shift if len > 0 => {
            assert_eq!(table.shift(), Some(model.remove(0)));
        }
        Op::Reverse => {
            table.reverse();
            model.reverse();
        }
        _ => {}
    }
}

proptest! {
    #[test]
    fn keys_track_values(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut table = ValueStore::table(0);
        let mut model = Vec::new();
        for op in &ops {
            apply(&mut table, &mut model, op);
        }
        prop_assert_eq!(table.as_slice(), model.as_slice());
        for (value, key) in table.entries() {
            let expected = value.to_string();
            prop_assert_eq!(key, Some(expected.as_str()));
        }
        prop_assert!(table.capacity() >= table.len());
    }
}
