//! Line and word tokenizers.
//!
//! Both tokenizers borrow from the input, so a diff never copies text until
//! it builds the output rows.

/// Split a field's text into lines.
///
/// The position of a token is its line index; line numbers in the output are
/// `index + 1`. Follows `str::lines`: `\n` and `\r\n` both end a line and a
/// single trailing terminator does not produce an empty last line.
pub fn tokenize_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Punct,
}

fn classify(c: char) -> CharClass {
    if c.is_alphanumeric() || c == '_' {
        CharClass::Word
    } else if c.is_whitespace() {
        CharClass::Space
    } else {
        CharClass::Punct
    }
}

/// Split one line into word, whitespace and punctuation tokens.
///
/// Words and whitespace are maximal runs; each punctuation character is a
/// token of its own. Concatenating the tokens yields the input exactly.
pub fn tokenize_words(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<CharClass> = None;

    for (idx, c) in line.char_indices() {
        let class = classify(c);
        match current {
            Some(prev) if prev == class && class != CharClass::Punct => {}
            Some(_) => {
                tokens.push(&line[start..idx]);
                start = idx;
            }
            None => {}
        }
        current = Some(class);
    }

    if start < line.len() {
        tokens.push(&line[start..]);
    }

    tokens
}
