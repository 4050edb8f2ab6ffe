use std::io::Write;
use std::path::PathBuf;

use morph_dict::{DictionaryFile, LoadMode, grammemes, parse_blocks};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("opcorpora.txt")
}

#[test]
fn splits_fixture_into_lemma_blocks() {
    let dict = DictionaryFile::load(fixture_path()).expect("load fixture");
    let blocks = parse_blocks(dict.lines());
    let heads: Vec<&str> = blocks.iter().map(|b| b.headword()).collect();
    assert_eq!(
        heads,
        vec!["КОТ", "МАМА", "РАМА", "МЫТЬ", "ОДНАЖДЫ", "ПОРА", "ПОРА", "ЗИМНИЙ"]
    );
    assert_eq!(blocks[0].len(), 8);
    assert_eq!(blocks[4].len(), 1);
    assert!(
        blocks
            .iter()
            .flat_map(|b| b.lines())
            .all(|line| line.contains('\t'))
    );
}

#[test]
fn mmap_and_owned_modes_agree() {
    let mapped = DictionaryFile::load_with_mode(fixture_path(), LoadMode::Mmap).expect("mmap");
    let owned = DictionaryFile::load_with_mode(fixture_path(), LoadMode::Owned).expect("owned");
    assert_eq!(mapped.len_bytes(), owned.len_bytes());
    assert!(mapped.lines().eq(owned.lines()));
}

#[test]
fn strips_bom_and_crlf() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all("\u{feff}кот\tNOUN sing,nomn\r\nкоту\tNOUN sing,datv\r\n\r\n1\r\n".as_bytes())
        .unwrap();
    let dict = DictionaryFile::load_with_mode(file.path(), LoadMode::Owned).expect("load");
    let lines: Vec<&str> = dict.lines().collect();
    assert_eq!(lines, vec!["кот\tNOUN sing,nomn", "коту\tNOUN sing,datv", "", "1"]);

    let blocks = parse_blocks(dict.lines());
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].headword(), "кот");
}

#[test]
fn mapped_multibyte_lines_read_back_verbatim() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all("\u{feff}стёкла\tNOUN,inan plur,nomn\nёж\tNOUN sing,nomn".as_bytes())
        .unwrap();
    let dict = DictionaryFile::load_with_mode(file.path(), LoadMode::Mmap).expect("mmap");
    let expected = vec!["стёкла\tNOUN,inan plur,nomn", "ёж\tNOUN sing,nomn"];
    assert_eq!(dict.lines().collect::<Vec<_>>(), expected);
    assert_eq!(dict.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn rejects_missing_and_non_utf8_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.txt");
    let err = DictionaryFile::load(&missing).err().expect("missing file fails");
    assert!(format!("{err:#}").contains("absent.txt"));

    let bad = dir.path().join("bad.txt");
    std::fs::write(&bad, [0xff, 0xfe, 0x00]).unwrap();
    let err = DictionaryFile::load_with_mode(&bad, LoadMode::Owned)
        .err()
        .expect("invalid utf-8 fails");
    assert!(format!("{err:#}").contains("utf-8"));
}

#[test]
fn lists_fixture_grammemes() {
    let dict = DictionaryFile::load(fixture_path()).expect("load fixture");
    let names = grammemes(dict.lines());
    for expected in ["noun", "anim", "datv", "advb", "pred", "adjf"] {
        assert!(names.contains(expected), "missing {expected}");
    }
    assert!(!names.iter().any(|n| n.chars().any(char::is_uppercase)));
}
