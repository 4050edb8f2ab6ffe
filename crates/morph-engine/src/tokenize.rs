/// Split a sentence into word tokens.
///
/// Spaces and newlines separate tokens only outside braces, so an attribute
/// list such as `{NOUN, sing}` stays attached to its word. Blank tokens are
/// skipped. A `}` without an open brace counts as plain text; an unclosed `{`
/// keeps the rest of the sentence in one token.
///
/// ```rust
/// use morph_engine::tokenize;
///
/// let tokens: Vec<&str> = tokenize("мама{NOUN, sing}  мыла\nраму").collect();
/// assert_eq!(tokens, vec!["мама{NOUN, sing}", "мыла", "раму"]);
/// ```
pub fn tokenize(sentence: &str) -> Tokens<'_> {
    Tokens {
        rest: Some(sentence),
    }
}

/// Iterator over the tokens of a sentence. See [`tokenize`].
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while let Some(rest) = self.rest {
            let (token, tail) = match boundary(rest) {
                Some(at) => (&rest[..at], Some(&rest[at + 1..])),
                None => (rest, None),
            };
            self.rest = tail;
            if !token.trim().is_empty() {
                return Some(token);
            }
        }
        None
    }
}

/// Byte offset of the first space or newline at brace depth zero.
fn boundary(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (at, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ' ' | '\n' if depth == 0 => return Some(at),
            _ => {}
        }
    }
    None
}

/// Split a token into its word and the attribute list of its first brace pair.
///
/// `None` means the token carries no braces at all.
pub(crate) fn split_token(token: &str) -> (&str, Option<&str>) {
    match token.find(['{', '}']) {
        Some(open) => {
            let after = &token[open + 1..];
            let attrs = after.split(['{', '}']).next().unwrap_or(after);
            (&token[..open], Some(attrs))
        }
        None => (token, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(sentence: &str) -> Vec<&str> {
        tokenize(sentence).collect()
    }

    #[test]
    fn splits_on_spaces_and_newlines() {
        assert_eq!(tokens("a b\nc"), vec!["a", "b", "c"]);
        assert_eq!(tokens("ОДНАЖДЫ{ADVB}\nВ{nomn}"), vec!["ОДНАЖДЫ{ADVB}", "В{nomn}"]);
    }

    #[test]
    fn keeps_brace_contents_together() {
        assert_eq!(
            tokens("мама{noun, anim,\nfemn} рама{noun inan}"),
            vec!["мама{noun, anim,\nfemn}", "рама{noun inan}"]
        );
    }

    #[test]
    fn nested_braces_close_at_outer_level() {
        assert_eq!(tokens("a{b {c d} e} f"), vec!["a{b {c d} e}", "f"]);
    }

    #[test]
    fn drops_blank_tokens() {
        assert_eq!(tokens("  a   b \n\n "), vec!["a", "b"]);
        assert!(tokens("").is_empty());
        assert!(tokens(" \n \t ").is_empty());
    }

    #[test]
    fn other_whitespace_is_not_a_boundary() {
        assert_eq!(tokens("a\tb c\r"), vec!["a\tb", "c\r"]);
    }

    #[test]
    fn unbalanced_braces() {
        assert_eq!(tokens("a} b"), vec!["a}", "b"]);
        assert_eq!(tokens("a{b c d"), vec!["a{b c d"]);
    }

    #[test]
    fn tokenizing_is_repeatable() {
        let sentence = "мама{noun,anim} мыла\nраму{accs}";
        let first = tokenize(sentence);
        let replay = first.clone();
        assert!(first.eq(replay));
        assert_eq!(tokens(sentence), tokens(sentence));
    }

    #[test]
    fn splits_word_from_first_brace_pair() {
        assert_eq!(split_token("кот"), ("кот", None));
        assert_eq!(split_token("кот{datv}"), ("кот", Some("datv")));
        assert_eq!(split_token("кот{}"), ("кот", Some("")));
        assert_eq!(split_token("кот{a{b}c}"), ("кот", Some("a")));
        assert_eq!(split_token("кот}x"), ("кот", Some("x")));
        assert_eq!(split_token("{nomn}"), ("", Some("nomn")));
    }
}
