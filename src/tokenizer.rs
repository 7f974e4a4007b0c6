use log::trace;

use crate::grammar::Grammar;

/// Byte range into the text returned by [`normalize`], not into the raw
/// input: lowercasing can change byte lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One terminal unit of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Normalized text; words of a folded phrase are joined by one space.
    pub text: String,
    /// 1-based.
    pub position: usize,
    /// Where the token sits in `normalize(input)`.
    pub span: Span,
}

/// Lowercase, trim, drop trailing periods. Stray periods separated by
/// spaces (`"a b . ."`) go too.
pub fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase();
    let mut text = lowered.trim();
    loop {
        let stripped = text.trim_end_matches('.').trim_end();
        if stripped == text {
            break;
        }
        text = stripped;
    }
    text.to_string()
}

/// Whitespace tokenizer that keeps multi-word terminals together.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    /// Each phrase split into words, longest first.
    phrases: Vec<Vec<String>>,
}

impl Tokenizer {
    /// `phrases` are tried in the given order at each position, so pass them
    /// longest first.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| {
                    p.as_ref()
                        .split_whitespace()
                        .map(str::to_lowercase)
                        .collect::<Vec<_>>()
                })
                .filter(|words| words.len() > 1)
                .collect(),
        }
    }

    pub fn for_grammar(grammar: &Grammar) -> Self {
        Self::new(grammar.phrases())
    }

    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let text = normalize(input);
        let words = word_indices(&text);

        let mut tokens = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let width = self.phrase_at(&words[i..]).unwrap_or(1);
            let (start, _) = words[i];
            let (last_start, last) = words[i + width - 1];
            let end = last_start + last.len();
            let text = words[i..i + width]
                .iter()
                .map(|(_, w)| *w)
                .collect::<Vec<_>>()
                .join(" ");
            if width > 1 {
                trace!("folded phrase `{}` at word {}", text, i + 1);
            }
            tokens.push(Token {
                text,
                position: tokens.len() + 1,
                span: Span::new(start, end),
            });
            i += width;
        }
        tokens
    }

    /// Word count of the first phrase that matches at the head of `words`.
    fn phrase_at(&self, words: &[(usize, &str)]) -> Option<usize> {
        self.phrases
            .iter()
            .find(|phrase| {
                phrase.len() <= words.len()
                    && phrase.iter().zip(words).all(|(p, (_, w))| p.as_str() == *w)
            })
            .map(Vec::len)
    }
}

fn word_indices(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push((s, &text[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, &text[s..]));
    }
    words
}
