use std::collections::BTreeSet;

use log::{debug, trace};

use crate::grammar::Grammar;
use crate::tokenizer::Token;

/// Nonterminals deriving one span. Ordered, so labels come out sorted.
pub type Cell<'gr> = BTreeSet<&'gr str>;

/// The CYK table. `cells[i - 1][len - 1]` is the cell for the span of
/// `len` tokens starting at 1-based position `i`; row `i` holds
/// `n - i + 1` cells.
#[derive(Debug, Clone)]
pub struct Chart<'gr> {
    pub grammar: &'gr Grammar,
    tokens: Vec<Token>,
    cells: Vec<Vec<Cell<'gr>>>,
}

impl<'gr> Chart<'gr> {
    /// Allocates an empty table for `tokens`. Nothing is derived until
    /// [`Chart::fill`] runs.
    pub fn new(grammar: &'gr Grammar, tokens: Vec<Token>) -> Self {
        let n = tokens.len();
        let cells = (1..=n).map(|i| vec![Cell::new(); n - i + 1]).collect();
        Self {
            grammar,
            tokens,
            cells,
        }
    }

    /// Allocates and fills in one go.
    pub fn build(grammar: &'gr Grammar, tokens: Vec<Token>) -> Self {
        let mut chart = Self::new(grammar, tokens);
        chart.fill();
        chart
    }

    /// The sentence the table was allocated for. Read-only, so the table
    /// always has one row per token.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The cell for the span of `len` tokens starting at `i` (both 1-based),
    /// or `None` if that span does not fit in the sentence.
    pub fn cell(&self, i: usize, len: usize) -> Option<&Cell<'gr>> {
        if i == 0 || len == 0 {
            return None;
        }
        self.cells.get(i - 1)?.get(len - 1)
    }

    /// Runs the lexical pass then the binary pass. Returns how many
    /// (span, nonterminal) entries were added; zero on an already filled
    /// chart.
    pub fn fill(&mut self) -> usize {
        let n = self.len();
        let mut added = 0;

        for i in 1..=n {
            added += self.fill_lexical(i);
        }

        // Every sub-span of (i, len) is shorter, so it is final by the time
        // we get here.
        for len in 2..=n {
            for i in 1..=n - len + 1 {
                added += self.fill_span(i, len);
            }
        }

        debug!(
            "chart filled: {} tokens, {} entries added, start symbol {} over full span",
            n,
            added,
            if self.accepted() { "present" } else { "absent" }
        );
        added
    }

    fn fill_lexical(&mut self, i: usize) -> usize {
        let grammar = self.grammar;
        let Some(token) = self.tokens.get(i - 1) else {
            return 0;
        };
        let mut found: Cell<'gr> = grammar.categories_of(&token.text).collect();
        if found.is_empty() {
            trace!("({}, 1) `{}` matches no lexical rule", i, token.text);
        }
        close_units(grammar, &mut found);
        self.extend(i, 1, found)
    }

    fn fill_span(&mut self, i: usize, len: usize) -> usize {
        let grammar = self.grammar;
        let mut found = Cell::new();

        for k in 1..len {
            let (Some(left), Some(right)) = (self.cell(i, k), self.cell(i + k, len - k)) else {
                continue;
            };
            if left.is_empty() || right.is_empty() {
                continue;
            }
            for rule in grammar.binary_rules() {
                if left.contains(rule.left.as_str()) && right.contains(rule.right.as_str()) {
                    found.insert(rule.lhs.as_str());
                }
            }
        }

        close_units(grammar, &mut found);
        self.extend(i, len, found)
    }

    /// Inserts only; cells never shrink.
    fn extend(&mut self, i: usize, len: usize, found: Cell<'gr>) -> usize {
        let Some(cell) = self.cells.get_mut(i - 1).and_then(|row| row.get_mut(len - 1)) else {
            return 0;
        };
        let before = cell.len();
        cell.extend(found);
        if !cell.is_empty() {
            trace!("({}, {}) = {:?}", i, len, cell);
        }
        cell.len() - before
    }
}

/// Adds every unit ancestor of every member. The ancestor sets are already
/// transitive, so one pass is enough.
fn close_units<'gr>(grammar: &'gr Grammar, cell: &mut Cell<'gr>) {
    let lifted: Vec<&'gr str> = cell
        .iter()
        .flat_map(|sym| grammar.unit_ancestors(sym))
        .collect();
    cell.extend(lifted);
}
