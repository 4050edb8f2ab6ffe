use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use morph_dict::{DictionaryFile, LoadMode};
use morph_engine::SentenceMorpher;

const DEMO: &str = "мама{noun,anim,femn,sing,gent} мыла РАМА{noun,inan,femn,sing,accs}
ОДНАЖДЫ{ADVB}
В{NOUN,anim,ms-f,Sgtm,Fixd,Abbr,Init,nomn}
СТУДЁНЫЙ{ADJF,Qual,femn,sing,accs}
ЗИМНИЙ{ADJF,femn,accs}
ПОРА{sing,accs}
ВЫШЕЛ{VERB,perf,intr,sing,indc}
СИЛЬНЫЙ{Qual,masc,nomn}
МОРОЗ{anim,femn,Sgtm,Surn,sing,nomn}";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let usage = "usage: cargo run -p morph-engine --example morph -- <dict-file> [--demo | <sentence>]";
    let dict_path = args.next().map(PathBuf::from).context(usage)?;
    let sentence = match args.next() {
        Some(arg) if arg == "--demo" => DEMO.to_string(),
        Some(arg) => arg,
        None => bail!(usage),
    };
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let start = Instant::now();
    let dict = DictionaryFile::load_with_mode(&dict_path, LoadMode::Mmap)
        .with_context(|| format!("loading dictionary from {}", dict_path.display()))?;
    let morpher = SentenceMorpher::from_lines(dict.lines());
    println!("Dictionary: {} ({} lemmas)", dict_path.display(), morpher.stats().lemmas);
    println!("Init took {} ms", start.elapsed().as_millis());

    let start = Instant::now();
    let result = morpher.morph(&sentence);
    println!("[took {} us]   {}", start.elapsed().as_micros(), result);

    Ok(())
}
