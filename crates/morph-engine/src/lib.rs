//! Dictionary-driven sentence inflection.
//!
//! Given an OpenCorpora-style dictionary (lemma blocks of `WORD<TAB>ATTRS`
//! lines) and a sentence whose words may carry a brace-delimited attribute
//! list, [`SentenceMorpher::morph`] rewrites every annotated word to the first
//! dictionary form of that lemma carrying all requested attributes.
//!
//! # How it works
//! 1. Blocks are indexed once by the hash of their uppercased headword; each
//!    lemma keeps its raw lines until first looked up.
//! 2. Attribute names of dictionary forms are interned case-insensitively into
//!    small codes; query names are only looked up, never interned.
//! 3. For each token `word{attr, attr}` the bucket for `word` is scanned in
//!    dictionary order and the first lemma with a matching form wins.
//! 4. Anything that does not resolve (no braces, no attributes, unknown word,
//!    no matching form) is emitted unchanged, so morphing never fails.
//!
//! # Example
//! ```rust
//! use morph_engine::SentenceMorpher;
//!
//! let dict = [
//!     "1",
//!     "кот\tNOUN,anim,masc sing,nomn",
//!     "коту\tNOUN,anim,masc sing,datv",
//!     "",
//!     "2",
//!     "мама\tNOUN,anim,femn sing,nomn",
//! ];
//! let morpher = SentenceMorpher::from_lines(dict);
//! assert_eq!(morpher.morph("КОТ{datv} мама{gent} и"), "коту мама и");
//! ```
//!
//! For a runnable demo, see `cargo run -p morph-engine --example morph -- <dict-file> [--demo|<sentence>]`.

mod index;
mod interner;
mod lemma;
mod tokenize;

use std::hash::{BuildHasher, RandomState};

use morph_dict::{Block, blocks};
use morph_types::{AttrSet, attr_names};
use serde::Serialize;
use tracing::info;

pub use index::LemmaIndex;
pub use interner::Interner;
pub use lemma::Lemma;
pub use morph_types::{AttrCode, Form};
pub use tokenize::{Tokens, tokenize};

use tokenize::split_token;

/// Counters describing a loaded morpher.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct MorphStats {
    pub lemmas: usize,
    pub buckets: usize,
    pub materialized: usize,
    pub attributes: usize,
}

/// Rewrites annotated sentences using a dictionary loaded once.
///
/// Each morpher owns its attribute interner; two morphers never share codes.
#[derive(Debug)]
pub struct SentenceMorpher<S = RandomState> {
    index: LemmaIndex<S>,
    interner: Interner,
}

impl SentenceMorpher {
    /// Build from raw dictionary lines (see `morph_dict` for the format).
    pub fn from_lines<I, T>(lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self::from_blocks(blocks(lines))
    }

    /// Build from already split dictionary blocks.
    pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self::with_hasher(blocks, RandomState::new())
    }
}

impl<S: BuildHasher> SentenceMorpher<S> {
    /// Build with a custom hasher for the lemma index.
    pub fn with_hasher(blocks: impl IntoIterator<Item = Block>, hasher: S) -> Self {
        Self {
            index: LemmaIndex::build_with_hasher(blocks, hasher),
            interner: Interner::new(),
        }
    }

    /// Rewrite every annotated word of `sentence`; words are joined by one space.
    pub fn morph(&self, sentence: &str) -> String {
        tokenize(sentence)
            .map(|token| self.morph_word(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Resolve a single `word{attrs}` token, falling back to the bare word.
    pub fn morph_word<'a>(&'a self, token: &'a str) -> &'a str {
        let (word, attrs) = split_token(token);
        let Some(attrs) = attrs else {
            return word;
        };

        let names: Vec<&str> = attr_names(attrs).collect();
        if names.is_empty() {
            return word;
        }

        // Only dictionary forms assign codes; a name no candidate form uses
        // cannot match, and query text never grows the interner.
        let candidates = self.index.bucket(word);
        for lemma in candidates {
            lemma.forms(&self.interner);
        }
        let mut codes = Vec::with_capacity(names.len());
        for name in names {
            match self.interner.get(name) {
                Some(code) => codes.push(code),
                None => return word,
            }
        }
        let query = AttrSet::from_codes(codes);

        candidates
            .iter()
            .find_map(|lemma| lemma.try_get_form(word, &query, &self.interner))
            .map_or(word, |form| form.text.as_str())
    }

    /// Parse every lemma's forms now instead of on first lookup.
    pub fn materialize_all(&self) {
        let mut forms = 0usize;
        for lemma in self.index.lemmas() {
            forms += lemma.forms(&self.interner).len();
        }
        info!(
            "materialized {} lemmas ({forms} forms, {} attributes)",
            self.index.len(),
            self.interner.len()
        );
    }

    pub fn stats(&self) -> MorphStats {
        MorphStats {
            lemmas: self.index.len(),
            buckets: self.index.bucket_count(),
            materialized: self
                .index
                .lemmas()
                .filter(|lemma| lemma.is_materialized())
                .count(),
            attributes: self.interner.len(),
        }
    }

    pub fn index(&self) -> &LemmaIndex<S> {
        &self.index
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }
}
