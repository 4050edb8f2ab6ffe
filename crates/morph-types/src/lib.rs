//! Shared, compact types for attribute-tagged dictionary forms.
//!
//! Grammatical attributes (grammemes such as `nomn`, `sing`, `anim`) are
//! interned into small [`AttrCode`] values by the engine. A form carries an
//! [`AttrSet`]: a sorted, deduplicated slice of codes that answers the one
//! question lookups need, "does this form carry every requested attribute?".
//!
//! The text helpers here ([`split_form_line`], [`attr_names`]) define the
//! dictionary and query syntax shared by the loader and the engine.
//!
//! ```rust
//! use morph_types::{AttrCode, AttrSet, attr_names, split_form_line};
//!
//! let form = AttrSet::from_codes([AttrCode(2), AttrCode(0), AttrCode(1)]);
//! let query = AttrSet::from_codes([AttrCode(1)]);
//! assert!(form.is_superset_of(&query));
//!
//! assert_eq!(split_form_line("коту\tNOUN,anim sing,datv"), Some(("коту", "NOUN,anim sing,datv")));
//! assert_eq!(attr_names("NOUN, anim").collect::<Vec<_>>(), vec!["NOUN", "anim"]);
//! ```

/// Compact code of one interned attribute name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct AttrCode(pub u16);

impl AttrCode {
    /// Number of distinct codes an interner may hand out (`0..=65534`).
    pub const CAPACITY: usize = u16::MAX as usize;
}

/// Unordered set of attribute codes, stored sorted and without duplicates.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct AttrSet {
    codes: Box<[AttrCode]>,
}

impl AttrSet {
    /// Build a set from any code sequence; order and duplicates are irrelevant.
    pub fn from_codes(codes: impl IntoIterator<Item = AttrCode>) -> Self {
        let mut codes: Vec<AttrCode> = codes.into_iter().collect();
        codes.sort_unstable();
        codes.dedup();
        Self {
            codes: codes.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// True when every code of `other` is also in `self`.
    ///
    /// Both sides are sorted, so this is a single merge walk.
    pub fn is_superset_of(&self, other: &AttrSet) -> bool {
        if other.len() > self.len() {
            return false;
        }
        let mut mine = self.codes.iter();
        'wanted: for code in other.codes.iter() {
            for have in mine.by_ref() {
                if have == code {
                    continue 'wanted;
                }
                if have > code {
                    return false;
                }
            }
            return false;
        }
        true
    }
}

impl FromIterator<AttrCode> for AttrSet {
    fn from_iter<I: IntoIterator<Item = AttrCode>>(iter: I) -> Self {
        Self::from_codes(iter)
    }
}

/// One inflected spelling of a lemma with the attributes it satisfies.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Form {
    pub text: String,
    pub attrs: AttrSet,
}

/// Split a dictionary content line `WORD<TAB>ATTRS` at its first tab.
///
/// Returns `None` when the line has no tab at all.
pub fn split_form_line(line: &str) -> Option<(&str, &str)> {
    line.split_once('\t')
}

/// Attribute names in a list separated by commas and/or whitespace.
///
/// Blank entries (from `", "` or doubled separators) are skipped.
pub fn attr_names(list: &str) -> impl Iterator<Item = &str> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| !name.is_empty())
}
