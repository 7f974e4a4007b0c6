pub mod highlighter;
#[cfg(test)]
mod tests;
#[cfg(test)]
mod tests_rejections;

use chumsky::{
    prelude::*,
    text::{inline_whitespace, newline},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Str<'gr> {
    pub text: &'gr str,
    pub span: SimpleSpan,
}

impl<'gr> std::ops::Deref for Str<'gr> {
    type Target = &'gr str;
    fn deref(&self) -> &Self::Target {
        &self.text
    }
}

impl<'gr> AsRef<str> for Str<'gr> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

impl<'gr> std::fmt::Display for Str<'gr> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.text.fmt(f)
    }
}

impl<'gr> Str<'gr> {
    pub fn new(text: &'gr str, span: SimpleSpan) -> Self {
        Self { text, span }
    }
}

impl<'gr> PartialEq<str> for Str<'gr> {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl<'gr> PartialEq<&str> for Str<'gr> {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol<'gr> {
    /// Quoted; the span covers the text between the quotes.
    Terminal(Str<'gr>),
    NonTerminal(Str<'gr>),
}

impl<'gr> std::fmt::Display for Symbol<'gr> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(s) => write!(f, "\"{}\"", s),
            Symbol::NonTerminal(s) => write!(f, "{}", s),
        }
    }
}

/// `lhs -> alt | alt | ...`
#[derive(Debug, Clone)]
pub struct Rule<'gr> {
    pub lhs: Str<'gr>,
    pub alternatives: Vec<Vec<Symbol<'gr>>>,
}

#[derive(Debug, Clone)]
pub enum Statement<'gr> {
    /// `start: S`
    Start(Str<'gr>),
    Rule(Rule<'gr>),
}

/// `# ...` up to (not including) the end of the line.
pub(crate) fn comment<'gr>() -> impl Parser<'gr, &'gr str, &'gr str, extra::Err<Rich<'gr, char>>> {
    just('#').then(none_of("\r\n").repeated()).to_slice()
}

/// A whole grammar definition: statements separated by newlines or `;`,
/// with blank lines and `#` comments in between.
pub fn rules<'gr>() -> impl Parser<'gr, &'gr str, Vec<Statement<'gr>>, extra::Err<Rich<'gr, char>>>
{
    let line_end = inline_whitespace()
        .then(comment().or_not())
        .then(newline())
        .ignored();
    let separator = choice((line_end, just(';').ignored()))
        .repeated()
        .at_least(1);

    statement()
        .padded_by(inline_whitespace())
        .separated_by(separator)
        .allow_leading()
        .allow_trailing()
        .collect::<Vec<_>>()
        .then_ignore(inline_whitespace())
        .then_ignore(comment().or_not())
        .then_ignore(end())
}

fn statement<'gr>() -> impl Parser<'gr, &'gr str, Statement<'gr>, extra::Err<Rich<'gr, char>>> {
    choice((start_decl().map(Statement::Start), rule().map(Statement::Rule)))
}

fn start_decl<'gr>() -> impl Parser<'gr, &'gr str, Str<'gr>, extra::Err<Rich<'gr, char>>> {
    just("start")
        .then(just(':').padded_by(inline_whitespace()))
        .ignore_then(ident())
}

fn rule<'gr>() -> impl Parser<'gr, &'gr str, Rule<'gr>, extra::Err<Rich<'gr, char>>> {
    ident()
        .then_ignore(just("->").padded_by(inline_whitespace()))
        .then(
            alternative()
                .separated_by(just('|').padded_by(inline_whitespace()))
                .at_least(1)
                .collect(),
        )
        .map(|(lhs, alternatives)| Rule { lhs, alternatives })
}

fn alternative<'gr>() -> impl Parser<'gr, &'gr str, Vec<Symbol<'gr>>, extra::Err<Rich<'gr, char>>> {
    symbol()
        .padded_by(inline_whitespace())
        .repeated()
        .at_least(1)
        .collect()
}

fn symbol<'gr>() -> impl Parser<'gr, &'gr str, Symbol<'gr>, extra::Err<Rich<'gr, char>>> {
    choice((terminal(), ident().map(Symbol::NonTerminal)))
}

fn ident<'gr>() -> impl Parser<'gr, &'gr str, Str<'gr>, extra::Err<Rich<'gr, char>>> {
    text::ident().map_with(|s, extra| Str::new(s, extra.span()))
}

fn terminal<'gr>() -> impl Parser<'gr, &'gr str, Symbol<'gr>, extra::Err<Rich<'gr, char>>> {
    just('"')
        .ignore_then(
            none_of("\"\r\n")
                .repeated()
                .at_least(1)
                .to_slice()
                .map_with(|s, extra| Str::new(s, extra.span())),
        )
        .then_ignore(just('"'))
        .map(Symbol::Terminal)
}
