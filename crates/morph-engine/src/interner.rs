use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use morph_types::AttrCode;
use tracing::warn;

/// Case-insensitive attribute name to [`AttrCode`] table.
///
/// Codes are handed out sequentially from 0 in first-seen order and never
/// change or get reused. Values are only meaningful within one interner, so
/// codes must not be persisted or compared across instances.
#[derive(Debug)]
pub struct Interner {
    codes: DashMap<String, AttrCode>,
    next: AtomicUsize,
    limit: usize,
    exhausted: AtomicBool,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    pub fn new() -> Self {
        Self::with_limit(AttrCode::CAPACITY)
    }

    /// An interner that refuses to grow past `limit` codes (clamped to
    /// [`AttrCode::CAPACITY`]).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            codes: DashMap::new(),
            next: AtomicUsize::new(0),
            limit: limit.min(AttrCode::CAPACITY),
            exhausted: AtomicBool::new(false),
        }
    }

    /// Code for `name`, assigning the next free one on first sight.
    ///
    /// Returns `None` only when `name` is new and the code space is used up.
    pub fn code_for(&self, name: &str) -> Option<AttrCode> {
        let key = name.to_lowercase();
        if let Some(code) = self.codes.get(&key) {
            return Some(*code);
        }
        match self.codes.entry(key) {
            Entry::Occupied(entry) => Some(*entry.get()),
            Entry::Vacant(entry) => {
                let limit = self.limit;
                let Ok(raw) = self
                    .next
                    .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                        (n < limit).then_some(n + 1)
                    })
                else {
                    if !self.exhausted.swap(true, Ordering::Relaxed) {
                        warn!("attribute vocabulary exhausted at {limit} codes; '{name}' not interned");
                    }
                    return None;
                };
                let code = AttrCode(raw as u16);
                entry.insert(code);
                Some(code)
            }
        }
    }

    /// Existing code for `name`, without assigning one.
    pub fn get(&self, name: &str) -> Option<AttrCode> {
        self.codes.get(&name.to_lowercase()).map(|code| *code)
    }

    /// Number of distinct attributes seen so far.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_sequential_codes_from_zero() {
        let interner = Interner::new();
        assert_eq!(interner.code_for("nomn"), Some(AttrCode(0)));
        assert_eq!(interner.code_for("sing"), Some(AttrCode(1)));
        assert_eq!(interner.code_for("anim"), Some(AttrCode(2)));
        assert_eq!(interner.len(), 3);
    }

    #[test]
    fn codes_are_stable_and_case_insensitive() {
        let interner = Interner::new();
        let noun = interner.code_for("NOUN");
        assert_eq!(interner.code_for("noun"), noun);
        assert_eq!(interner.code_for("Noun"), noun);
        assert_eq!(interner.code_for("NOUN"), noun);
        assert_eq!(interner.get("nOuN"), noun);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn lowercases_non_ascii_names() {
        let interner = Interner::new();
        let code = interner.code_for("ЕДЧ");
        assert_eq!(interner.code_for("едч"), code);
    }

    #[test]
    fn get_does_not_assign() {
        let interner = Interner::new();
        assert_eq!(interner.get("datv"), None);
        assert!(interner.is_empty());
    }

    #[test]
    fn independent_instances_do_not_share_state() {
        let a = Interner::new();
        let b = Interner::new();
        a.code_for("sing");
        assert_eq!(b.code_for("plur"), Some(AttrCode(0)));
        assert_eq!(b.get("sing"), None);
    }

    #[test]
    fn refuses_new_names_once_exhausted() {
        let interner = Interner::with_limit(2);
        assert_eq!(interner.code_for("a"), Some(AttrCode(0)));
        assert_eq!(interner.code_for("b"), Some(AttrCode(1)));
        assert_eq!(interner.code_for("c"), None);
        assert_eq!(interner.code_for("c"), None);
        assert_eq!(interner.code_for("A"), Some(AttrCode(0)));
        assert_eq!(interner.len(), 2);
    }
}
