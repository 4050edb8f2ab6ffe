use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use morph_dict::{DictionaryFile, LoadMode, blocks, grammemes};

fn main() -> Result<()> {
    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: cargo run -p morph-dict --example stats -- <path-to-dict.opcorpora.txt>")?;

    let start = Instant::now();
    let dict = DictionaryFile::load_with_mode(&path, LoadMode::Mmap)
        .with_context(|| format!("loading dictionary from {}", path.display()))?;

    let mut lemma_count = 0usize;
    let mut form_count = 0usize;
    let mut largest = (0usize, String::new());
    for block in blocks(dict.lines()) {
        lemma_count += 1;
        form_count += block.len();
        if block.len() > largest.0 {
            largest = (block.len(), block.headword().to_string());
        }
    }
    let names = grammemes(dict.lines());

    println!("Dictionary : {}", path.display());
    println!("Size       : {} bytes", dict.len_bytes());
    println!("Lemmas     : {}", lemma_count);
    println!("Form lines : {}", form_count);
    println!("Largest    : {} ({} forms)", largest.1, largest.0);
    println!("Grammemes  : {}", names.len());
    for name in &names {
        println!("  {}", name);
    }
    println!("Scanned in {} ms", start.elapsed().as_millis());

    Ok(())
}
