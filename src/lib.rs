use chumsky::Parser;
use log::debug;
use thiserror::Error;

use crate::{
    chart::Chart,
    export::ChartView,
    grammar::{Grammar, GrammarError},
    grammar_parser::rules,
    recognizer::Verdict,
    tokenizer::{Token, Tokenizer},
};

pub mod chart;
pub mod conversion;
pub mod display;
pub mod export;
pub mod grammar;
pub mod grammar_parser;
pub mod recognizer;
pub mod tokenizer;

/// Definition of the bundled Balinese grammar.
pub const BALINESE: &str = include_str!("../grammars/balinese.cnf");

#[derive(Debug, Error)]
pub enum CykError {
    #[error("Error(s) while parsing the grammar definition : {0}")]
    InvalidCnfdef(String),
    #[error("Invalid grammar : {0}")]
    Grammar(#[from] GrammarError),
    #[error("Nothing to parse: the sentence has no tokens")]
    EmptyInput,
}

/// Everything the presentation side needs about one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub verdict: Verdict,
    pub view: ChartView,
    pub unknown: Vec<Token>,
}

/// Checks sentences against one grammar. Immutable, so one checker can
/// serve any number of threads.
#[derive(Debug, Clone)]
pub struct SyntaxChecker {
    grammar: Grammar,
    tokenizer: Tokenizer,
}

impl SyntaxChecker {
    pub fn new(grammar: Grammar) -> Self {
        let tokenizer = Tokenizer::for_grammar(&grammar);
        Self { grammar, tokenizer }
    }

    /// Parses and validates a grammar definition.
    pub fn from_cnfdef(definition: &str) -> Result<Self, CykError> {
        let result = rules().parse(definition);
        if result.has_errors() {
            let mut error_string = String::new();
            for e in result.errors() {
                error_string += &format!("\n{} at {}", e, e.span());
            }
            return Err(CykError::InvalidCnfdef(error_string));
        }
        let statements = result
            .output()
            .ok_or_else(|| CykError::InvalidCnfdef("no output".to_string()))?;
        let grammar = Grammar::try_from(statements)?;
        Ok(Self::new(grammar))
    }

    pub fn balinese() -> Result<Self, CykError> {
        Self::from_cnfdef(BALINESE)
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        self.tokenizer.tokenize(input)
    }

    /// Tokenizes and fills a chart. Sentences without tokens never reach
    /// the chart builder.
    pub fn chart(&self, input: &str) -> Result<Chart<'_>, CykError> {
        let tokens = self.tokenize(input);
        if tokens.is_empty() {
            debug!("empty input: {:?}", input);
            return Err(CykError::EmptyInput);
        }
        debug!(
            "tokens: {:?}",
            tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>()
        );
        Ok(Chart::build(&self.grammar, tokens))
    }

    pub fn check(&self, input: &str) -> Result<Analysis, CykError> {
        let chart = self.chart(input)?;
        Ok(Analysis {
            verdict: chart.verdict(),
            view: chart.export(),
            unknown: chart.unknown_tokens().into_iter().cloned().collect(),
        })
    }

    /// Just the verdict.
    pub fn accepts(&self, input: &str) -> Result<bool, CykError> {
        Ok(self.chart(input)?.accepted())
    }
}
