use std::ops::Range;

use crate::grammar_parser::{Statement, Str, Symbol};

/// What kind of token this is for highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    LHS,
    Terminal,
    NonTerminal,
    StartSymbol,
}

/// A token with a span in the original input
#[derive(Debug, Clone)]
pub struct HighlightToken<'a> {
    pub text: &'a str,
    pub span: Range<usize>,
    pub kind: HighlightKind,
}

fn span_token<'a>(s: &Str<'a>, kind: HighlightKind) -> HighlightToken<'a> {
    HighlightToken {
        text: s.text,
        span: s.span.start..s.span.end,
        kind,
    }
}

/// Highlight tokens for every statement, sorted by position. Text between
/// tokens (arrows, bars, quotes, comments) is left to the caller.
pub fn highlight_tokens<'a>(statements: &[Statement<'a>]) -> Vec<HighlightToken<'a>> {
    let mut tokens = Vec::new();

    for statement in statements {
        match statement {
            Statement::Start(sym) => tokens.push(span_token(sym, HighlightKind::StartSymbol)),
            Statement::Rule(rule) => {
                tokens.push(span_token(&rule.lhs, HighlightKind::LHS));
                for sym in rule.alternatives.iter().flatten() {
                    match sym {
                        Symbol::Terminal(t) => tokens.push(span_token(t, HighlightKind::Terminal)),
                        Symbol::NonTerminal(nt) => {
                            tokens.push(span_token(nt, HighlightKind::NonTerminal))
                        }
                    }
                }
            }
        }
    }

    tokens.sort_by_key(|t| t.span.start);
    tokens
}
