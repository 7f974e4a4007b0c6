use std::path::PathBuf;

use clap::Parser;

/// Check sentences against a CNF grammar with the CYK algorithm and print
/// the filled chart.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Sentences to check (default: one per line from stdin)
    pub sentences: Vec<String>,

    /// Grammar definition file (default: the bundled Balinese grammar)
    #[arg(short, long, value_name = "FILE")]
    pub grammar: Option<PathBuf>,

    /// Start symbol (default: the grammar's own)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<String>,

    /// No colors
    #[arg(long)]
    pub plain: bool,

    /// Print the grammar definition with highlighting and exit
    #[arg(long)]
    pub highlight: bool,
}
