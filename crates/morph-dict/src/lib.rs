//! Load OpenCorpora-style plain-text dictionaries and split them into blocks.
//!
//! A dictionary is a sequence of lines. Content lines have the shape
//! `WORD<TAB>ATTR[, ]ATTR...`; every run of content lines forms one
//! [`Block`] describing a lemma (first line) and its inflected forms. Any line
//! that is empty or does not start with a letter (OpenCorpora uses numeric
//! lemma ids) only separates blocks.
//!
//! Loading is split from parsing: [`DictionaryFile`] owns the bytes (mmap or
//! owned buffer, chosen with [`LoadMode`]) and yields lines, while
//! [`parse_blocks`] / [`blocks`] accept any line sequence, so callers can feed
//! text from anywhere.
//!
//! # Example
//! ```no_run
//! use morph_dict::{DictionaryFile, LoadMode, parse_blocks};
//!
//! # fn main() -> anyhow::Result<()> {
//! let dict = DictionaryFile::load_with_mode("/path/to/dict.opcorpora.txt", LoadMode::Mmap)?;
//! let blocks = parse_blocks(dict.lines());
//! println!("{} lemmas, first: {:?}", blocks.len(), blocks.first().map(|b| b.headword()));
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p morph-dict --example stats -- <dict-file>`.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use memmap2::Mmap;
use morph_types::{attr_names, split_form_line};

/// Strategy for loading the dictionary file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file (fast, zero-copy).
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// A dictionary file whose contents have been validated as UTF-8.
pub struct DictionaryFile {
    path: PathBuf,
    buffer: Buffer,
}

impl DictionaryFile {
    /// Load a dictionary, memory-mapping it by default.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(path, LoadMode::Mmap)
    }

    /// Load a dictionary choosing between mmap and an owned buffer at runtime.
    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let buffer = load_file(&path, mode)?;
        std::str::from_utf8(buffer.as_slice())
            .with_context(|| format!("{} is not valid utf-8", path.display()))?;
        Ok(Self { path, buffer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the backing file in bytes.
    pub fn len_bytes(&self) -> usize {
        self.buffer.as_slice().len()
    }

    /// Lines in file order, without line terminators or a leading BOM.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        let text = self.text();
        text.strip_prefix('\u{feff}').unwrap_or(text).lines()
    }

    fn text(&self) -> &str {
        // Validated in `load_with_mode`; the buffer is never mutated afterwards.
        std::str::from_utf8(self.buffer.as_slice()).unwrap_or_default()
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

/// Contiguous content lines describing one lemma and its forms.
///
/// Never empty; every line starts with a letter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Block {
    lines: Vec<String>,
}

impl Block {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lemma's canonical form as written: text of the first line before
    /// its first tab, or the whole line when it has none.
    pub fn headword(&self) -> &str {
        let first = self.lines.first().map(String::as_str).unwrap_or("");
        split_form_line(first).map_or(first, |(word, _)| word)
    }
}

/// Streaming block splitter over a line iterator. See [`blocks`].
pub struct Blocks<I> {
    lines: I,
    done: bool,
}

impl<I, S> Iterator for Blocks<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        if self.done {
            return None;
        }
        let mut current: Vec<String> = Vec::new();
        for line in self.lines.by_ref() {
            let line = line.as_ref();
            if is_content_line(line) {
                current.push(line.to_string());
            } else if !current.is_empty() {
                return Some(Block { lines: current });
            }
        }
        self.done = true;
        (!current.is_empty()).then_some(Block { lines: current })
    }
}

/// Split lines into blocks lazily, in input order.
pub fn blocks<I, S>(lines: I) -> Blocks<I::IntoIter>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Blocks {
        lines: lines.into_iter(),
        done: false,
    }
}

/// Split lines into blocks. An input with no content lines yields no blocks.
pub fn parse_blocks<I, S>(lines: I) -> Vec<Block>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    blocks(lines).collect()
}

/// A line belongs to a block iff it starts with a letter.
pub fn is_content_line(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_alphabetic)
}

/// Distinct lowercase attribute names used by the content lines of a dictionary.
pub fn grammemes<I, S>(lines: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names = BTreeSet::new();
    for line in lines {
        let line = line.as_ref();
        if !is_content_line(line) {
            continue;
        }
        if let Some((_, attrs)) = split_form_line(line) {
            names.extend(attr_names(attrs).map(str::to_lowercase));
        }
    }
    names
}
