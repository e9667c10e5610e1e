//! The `ValueStore` container.

use std::fmt;

/// Stores never shrink below this capacity.
pub const MIN_SHRINK_CAPACITY: usize = 8;

/// Ordered, growable sequence with an optional index-aligned key column.
///
/// `T` is the element type: the runtime context stores tagged values, while
/// argument lists store slot references. Keys are owned strings; lookups by
/// key scan linearly and return the first match.
#[derive(Clone)]
pub struct ValueStore<T> {
    values: Vec<T>,
    /// Present only in table mode. `keys.len() == values.len()` at all times.
    keys: Option<Vec<Option<String>>>,
    /// Logical capacity, managed by doubling and halving.
    capacity: usize,
}

#[cold]
#[track_caller]
fn out_of_range(index: usize, len: usize) -> ! {
    panic!("index {index} out of range in store of size {len}")
}

#[cold]
#[track_caller]
fn not_a_table(op: &str) -> ! {
    panic!("{op} called on a store that is not a table")
}

impl<T> ValueStore<T> {
    /// Create an empty plain (non-keyed) store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty plain store with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        ValueStore {
            values: Vec::with_capacity(capacity),
            keys: None,
            capacity,
        }
    }

    /// Create an empty table (keyed store) with room for `capacity` elements.
    pub fn table(capacity: usize) -> Self {
        ValueStore {
            values: Vec::with_capacity(capacity),
            keys: Some(Vec::with_capacity(capacity)),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Logical capacity (grows by doubling, shrinks by halving).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether this store carries a key column.
    #[inline]
    pub fn is_table(&self) -> bool {
        self.keys.is_some()
    }

    fn grow(&mut self) {
        self.capacity = if self.capacity == 0 {
            1
        } else {
            self.capacity.saturating_mul(2)
        };
        let additional = self.capacity - self.values.len();
        self.values.reserve_exact(additional);
        if let Some(keys) = &mut self.keys {
            keys.reserve_exact(additional);
        }
    }

    fn maybe_shrink(&mut self) {
        if self.capacity > MIN_SHRINK_CAPACITY && self.values.len() <= self.capacity / 4 {
            self.capacity /= 2;
            self.values.shrink_to(self.capacity);
            if let Some(keys) = &mut self.keys {
                keys.shrink_to(self.capacity);
            }
        }
    }

    fn ensure_room(&mut self, extra: usize) {
        while self.values.len() + extra > self.capacity {
            self.grow();
        }
    }

    /// Append an element with no key.
    pub fn push(&mut self, value: T) {
        self.push_keyed(value, None);
    }

    /// Append an element under `key`.
    ///
    /// On a plain store the key is ignored.
    pub fn push_keyed(&mut self, value: T, key: Option<&str>) {
        self.ensure_room(1);
        self.values.push(value);
        if let Some(keys) = &mut self.keys {
            keys.push(key.map(str::to_owned));
        }
    }

    /// Remove and return the last element (its key is dropped).
    pub fn pop(&mut self) -> Option<T> {
        let value = self.values.pop()?;
        if let Some(keys) = &mut self.keys {
            keys.pop();
        }
        self.maybe_shrink();
        Some(value)
    }

    /// Prepend an element, shifting everything one position up.
    pub fn unshift(&mut self, value: T, key: Option<&str>) {
        self.insert(0, value, key);
    }

    /// Remove and return the first element.
    pub fn shift(&mut self) -> Option<T> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.remove(0))
    }

    /// Insert at `at`, shifting later elements up. `at == len()` appends.
    #[track_caller]
    pub fn insert(&mut self, at: usize, value: T, key: Option<&str>) {
        if at > self.values.len() {
            out_of_range(at, self.values.len());
        }
        self.ensure_room(1);
        self.values.insert(at, value);
        if let Some(keys) = &mut self.keys {
            keys.insert(at, key.map(str::to_owned));
        }
    }

    /// Remove the element at `at`, shifting later elements down.
    #[track_caller]
    pub fn remove(&mut self, at: usize) -> T {
        if at >= self.values.len() {
            out_of_range(at, self.values.len());
        }
        let value = self.values.remove(at);
        if let Some(keys) = &mut self.keys {
            keys.remove(at);
        }
        self.maybe_shrink();
        value
    }

    /// Remove the element at `at` by swapping the last element into its place.
    #[track_caller]
    pub fn fast_remove(&mut self, at: usize) -> T {
        if at >= self.values.len() {
            out_of_range(at, self.values.len());
        }
        let value = self.values.swap_remove(at);
        if let Some(keys) = &mut self.keys {
            keys.swap_remove(at);
        }
        self.maybe_shrink();
        value
    }

    /// Swap two elements together with their keys.
    #[track_caller]
    pub fn swap(&mut self, i: usize, j: usize) {
        let len = self.values.len();
        if i >= len {
            out_of_range(i, len);
        }
        if j >= len {
            out_of_range(j, len);
        }
        self.values.swap(i, j);
        if let Some(keys) = &mut self.keys {
            keys.swap(i, j);
        }
    }

    pub fn reverse(&mut self) {
        self.values.reverse();
        if let Some(keys) = &mut self.keys {
            keys.reverse();
        }
    }

    /// Drop every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.values.clear();
        if let Some(keys) = &mut self.keys {
            keys.clear();
        }
    }

    pub fn truncate(&mut self, len: usize) {
        self.values.truncate(len);
        if let Some(keys) = &mut self.keys {
            keys.truncate(len);
        }
    }

    /// Index of the first element whose key equals `key`.
    ///
    /// A plain store has no keys; asking it for one logs a warning and
    /// finds nothing.
    pub fn find_key(&self, key: &str) -> Option<usize> {
        let Some(keys) = &self.keys else {
            tracing::warn!(key, "key lookup on a store that is not a table");
            return None;
        };
        keys.iter().position(|k| k.as_deref() == Some(key))
    }

    #[inline]
    pub fn try_get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    #[inline]
    #[track_caller]
    pub fn get(&self, index: usize) -> &T {
        match self.values.get(index) {
            Some(value) => value,
            None => out_of_range(index, self.values.len()),
        }
    }

    #[inline]
    #[track_caller]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        let len = self.values.len();
        match self.values.get_mut(index) {
            Some(value) => value,
            None => out_of_range(index, len),
        }
    }

    /// Replace the element at `index`, returning the previous one.
    #[track_caller]
    pub fn set(&mut self, index: usize, value: T) -> T {
        std::mem::replace(self.get_mut(index), value)
    }

    /// Key of the element at `index`; always `None` on a plain store.
    #[track_caller]
    pub fn key(&self, index: usize) -> Option<&str> {
        if index >= self.values.len() {
            out_of_range(index, self.values.len());
        }
        self.keys.as_ref().and_then(|keys| keys[index].as_deref())
    }

    /// Replace (or remove, with `None`) the key at `index`.
    #[track_caller]
    pub fn set_key(&mut self, index: usize, key: Option<&str>) {
        let len = self.values.len();
        if index >= len {
            out_of_range(index, len);
        }
        match &mut self.keys {
            Some(keys) => keys[index] = key.map(str::to_owned),
            None => not_a_table("set_key"),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.values.iter_mut()
    }

    /// Iterate over keys in index order; all `None` on a plain store.
    pub fn keys(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        (0..self.values.len())
            .map(move |i| self.keys.as_ref().and_then(|keys| keys[i].as_deref()))
    }

    /// Iterate over `(element, key)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&T, Option<&str>)> + '_ {
        self.values.iter().enumerate().map(move |(i, value)| {
            let key = self.keys.as_ref().and_then(|keys| keys[i].as_deref());
            (value, key)
        })
    }
}

impl<T: PartialEq> ValueStore<T> {
    /// Index of the first element equal to `value`.
    pub fn find_value(&self, value: &T) -> Option<usize> {
        self.values.iter().position(|v| v == value)
    }
}

impl<T: Clone> ValueStore<T> {
    /// Append clones of every element of `other`.
    ///
    /// Keys are carried over only when both stores are tables.
    pub fn concat(&mut self, other: &ValueStore<T>) {
        self.ensure_room(other.len());
        self.values.extend_from_slice(&other.values);
        if let Some(keys) = &mut self.keys {
            match &other.keys {
                Some(other_keys) => keys.extend_from_slice(other_keys),
                None => keys.extend(std::iter::repeat(None).take(other.len())),
            }
        }
    }

    /// Replace the contents with clones of `items`, reusing the allocation.
    pub fn refill(&mut self, items: &[T]) {
        self.clear();
        self.extend(items.iter().cloned());
    }
}

impl<T> Extend<T> for ValueStore<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for ValueStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut store = ValueStore::new();
        store.extend(iter);
        store
    }
}

impl<'a, T> IntoIterator for &'a ValueStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Equality ignores capacity: same elements, same keys.
impl<T: PartialEq> PartialEq for ValueStore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.keys == other.keys
    }
}

impl<T> Default for ValueStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.keys {
            None => f.debug_list().entries(&self.values).finish(),
            Some(_) => f.debug_map().entries(self.entries().map(|(v, k)| (k, v))).finish(),
        }
    }
}
