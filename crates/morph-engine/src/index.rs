use std::collections::HashMap;
use std::hash::{BuildHasher, RandomState};

use morph_dict::Block;
use tracing::info;

use crate::lemma::Lemma;

/// Lemmas grouped by the hash of their uppercased canonical form.
///
/// Each bucket keeps its lemmas in dictionary order. Buckets may hold
/// unrelated words whose hashes collide as well as homographs sharing a
/// canonical form; callers re-check the word via [`Lemma::is_word`].
#[derive(Debug)]
pub struct LemmaIndex<S = RandomState> {
    buckets: HashMap<u64, Vec<Lemma>>,
    hasher: S,
    len: usize,
}

impl LemmaIndex {
    pub fn build(blocks: impl IntoIterator<Item = Block>) -> Self {
        Self::build_with_hasher(blocks, RandomState::new())
    }
}

impl<S: BuildHasher> LemmaIndex<S> {
    /// Build the index with a caller-chosen hasher for bucket keys.
    pub fn build_with_hasher(blocks: impl IntoIterator<Item = Block>, hasher: S) -> Self {
        let mut buckets: HashMap<u64, Vec<Lemma>> = HashMap::new();
        let mut len = 0usize;
        for (index, block) in blocks.into_iter().enumerate() {
            let lemma = Lemma::new(block, index);
            let key = hasher.hash_one(lemma.word());
            buckets.entry(key).or_default().push(lemma);
            len += 1;
        }
        info!("indexed {len} lemmas into {} buckets", buckets.len());
        Self {
            buckets,
            hasher,
            len,
        }
    }

    /// Lemmas that may carry `word` as canonical form, lowest index first.
    pub fn bucket(&self, word: &str) -> &[Lemma] {
        let key = self.hasher.hash_one(word.to_uppercase().as_str());
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every lemma, bucket by bucket.
    pub fn lemmas(&self) -> impl Iterator<Item = &Lemma> + '_ {
        self.buckets.values().flatten()
    }

    /// Number of lemmas indexed.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
