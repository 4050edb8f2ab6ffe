use std::sync::{Mutex, OnceLock, PoisonError};

use morph_dict::Block;
use morph_types::{AttrSet, Form, attr_names, split_form_line};
use tracing::debug;

use crate::interner::Interner;

/// A dictionary headword and its inflected forms.
///
/// A lemma starts out holding its raw block lines. The first lookup parses
/// them into [`Form`]s exactly once and drops the lines; afterwards lookups
/// only read. The transition is guarded by a `OnceLock`, so a lemma can be
/// queried from several threads at once.
#[derive(Debug)]
pub struct Lemma {
    word: String,
    index: usize,
    raw: Mutex<Option<Vec<String>>>,
    forms: OnceLock<Box<[Form]>>,
}

impl Lemma {
    /// Wrap a dictionary block; `index` is the block's 0-based position.
    pub fn new(block: Block, index: usize) -> Self {
        let word = block.headword().to_uppercase();
        Self {
            word,
            index,
            raw: Mutex::new(Some(block.into_lines())),
            forms: OnceLock::new(),
        }
    }

    /// Canonical form, uppercased.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Position of this lemma's block in the source dictionary.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_materialized(&self) -> bool {
        self.forms.get().is_some()
    }

    /// Forms in dictionary order, parsing the raw lines on first call.
    pub fn forms(&self, interner: &Interner) -> &[Form] {
        self.forms.get_or_init(|| self.materialize(interner))
    }

    /// Case-insensitive comparison against the canonical form.
    pub fn is_word(&self, word: &str) -> bool {
        word.chars().flat_map(char::to_uppercase).eq(self.word.chars())
    }

    /// First form, in dictionary order, carrying every attribute in `query`.
    ///
    /// Returns `None` when `word` is not this lemma's canonical form, which
    /// happens when unrelated lemmas share an index bucket.
    pub fn try_get_form(&self, word: &str, query: &AttrSet, interner: &Interner) -> Option<&Form> {
        let forms = self.forms(interner);
        if !self.is_word(word) {
            return None;
        }
        forms.iter().find(|form| form.attrs.is_superset_of(query))
    }

    fn materialize(&self, interner: &Interner) -> Box<[Form]> {
        let lines = self
            .raw
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .unwrap_or_default();
        let forms: Box<[Form]> = lines
            .iter()
            .filter_map(|line| parse_form(line, interner))
            .collect();
        debug!(
            "materialized {} ({} forms from {} lines)",
            self.word,
            forms.len(),
            lines.len()
        );
        forms
    }
}

fn parse_form(line: &str, interner: &Interner) -> Option<Form> {
    let Some((text, attrs)) = split_form_line(line) else {
        debug!("skipping dictionary line without tab: {line:?}");
        return None;
    };
    // Names the interner can no longer code are dropped; no query can name them either.
    let attrs: AttrSet = attr_names(attrs)
        .filter_map(|name| interner.code_for(name))
        .collect();
    Some(Form {
        text: text.to_string(),
        attrs,
    })
}
