//! Identifier-keyed helpers shared by the entity stores.

/// An entity cached by a store and matched by its server identifier.
pub trait Keyed {
    /// Identifier type used for in-place matching.
    type Key: Copy + PartialEq;

    /// Returns the entity identifier.
    fn key(&self) -> Self::Key;
}

/// Inserts `item` at the front, dropping any entry already holding its key.
///
/// Returns `true` when an existing entry was displaced.
pub(crate) fn prepend_unique<T: Keyed>(items: &mut Vec<T>, item: T) -> bool {
    let key = item.key();
    let before = items.len();
    items.retain(|existing| existing.key() != key);
    let displaced = items.len() != before;
    items.insert(0, item);
    displaced
}

/// Replaces the entry matching `item`'s key in place.
///
/// Returns the previous value, or `None` when no entry matched (nothing is
/// inserted in that case).
pub(crate) fn replace_by_key<T: Keyed>(items: &mut [T], item: T) -> Option<T> {
    let key = item.key();
    items
        .iter_mut()
        .find(|existing| existing.key() == key)
        .map(|slot| std::mem::replace(slot, item))
}

/// Removes every entry with the given key, returning how many were removed.
pub(crate) fn remove_by_key<T: Keyed>(items: &mut Vec<T>, key: T::Key) -> usize {
    let before = items.len();
    items.retain(|existing| existing.key() != key);
    before - items.len()
}

/// Looks up an entry by key.
pub(crate) fn find_by_key<T: Keyed>(items: &[T], key: T::Key) -> Option<&T> {
    items.iter().find(|existing| existing.key() == key)
}
