mod cli;

use std::io::{self, BufRead};
use std::process::ExitCode;

use anyhow::{Context, Result};
use balicyk::display::render_grid;
use balicyk::grammar::Grammar;
use balicyk::grammar_parser::highlighter::{highlight_tokens, HighlightKind};
use balicyk::grammar_parser::rules;
use balicyk::{CykError, SyntaxChecker, BALINESE};
use chumsky::Parser as _;
use clap::Parser;
use colored::*;
use log::info;

use crate::cli::Cli;

fn highlight(definition: &str) {
    let result = rules().parse(definition);

    if result.has_errors() {
        for e in result.errors() {
            println!("Error: {} at {}", e, e.span());
        }
        println!("--- continuing to highlight valid parts ---");
    }

    let Some(statements) = result.output() else {
        println!("No rules parsed.");
        return;
    };

    let mut cursor = 0;
    for tok in highlight_tokens(statements) {
        // Print any text before this token
        if tok.span.start > cursor {
            print!("{}", definition[cursor..tok.span.start].dimmed());
        }

        let colored_text = match tok.kind {
            HighlightKind::LHS => tok.text.blue().bold(),
            HighlightKind::Terminal => tok.text.yellow(),
            HighlightKind::NonTerminal => tok.text.cyan(),
            HighlightKind::StartSymbol => tok.text.bright_green().bold(),
        };

        print!("{}", colored_text);
        cursor = tok.span.end;
    }

    if cursor < definition.len() {
        print!("{}", definition[cursor..].dimmed());
    }
    println!();
}

fn checker(definition: &str, start: Option<&str>) -> Result<SyntaxChecker> {
    let checker = SyntaxChecker::from_cnfdef(definition)?;
    let Some(start) = start else {
        return Ok(checker);
    };
    let grammar: Grammar = checker.grammar().clone().with_start(start)?;
    Ok(SyntaxChecker::new(grammar))
}

/// Prints the verdict and chart for one sentence; `Ok(true)` if accepted.
fn report(checker: &SyntaxChecker, sentence: &str, colorize: bool) -> Result<bool> {
    let analysis = match checker.check(sentence) {
        Ok(analysis) => analysis,
        Err(CykError::EmptyInput) => {
            println!("{}", "empty input".dimmed());
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    let verdict = if analysis.verdict.accepted {
        "VALID".green().bold()
    } else {
        "INVALID".red().bold()
    };
    println!("{} {} ({} tokens)", verdict, sentence.trim(), analysis.verdict.token_count);
    if !analysis.unknown.is_empty() {
        let words: Vec<_> = analysis.unknown.iter().map(|t| t.text.as_str()).collect();
        println!("{} {}", "unknown:".yellow(), words.join(", "));
    }
    print!("{}", render_grid(&analysis.view, colorize));
    Ok(analysis.verdict.accepted)
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.plain {
        colored::control::set_override(false);
    }

    let definition = match &cli.grammar {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading grammar {}", path.display()))?,
        None => BALINESE.to_string(),
    };

    if cli.highlight {
        highlight(&definition);
        return Ok(ExitCode::SUCCESS);
    }

    let checker = checker(&definition, cli.start.as_deref()).context("loading grammar")?;
    info!(
        "grammar ready: start {}, {} binary rules",
        checker.grammar().start(),
        checker.grammar().binary_rules().len()
    );

    let colorize = !cli.plain;
    let mut all_accepted = true;
    if cli.sentences.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("reading stdin")?;
            if line.trim().is_empty() {
                continue;
            }
            all_accepted &= report(&checker, &line, colorize)?;
        }
    } else {
        for sentence in &cli.sentences {
            all_accepted &= report(&checker, sentence, colorize)?;
        }
    }

    Ok(if all_accepted {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
