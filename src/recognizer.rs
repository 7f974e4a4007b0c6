use crate::chart::Chart;
use crate::tokenizer::Token;

/// Membership answer for one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub accepted: bool,
    pub token_count: usize,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = if self.accepted { "accepted" } else { "rejected" };
        write!(f, "{} ({} tokens)", word, self.token_count)
    }
}

impl<'gr> Chart<'gr> {
    /// Whether the start symbol covers the whole sentence. The start symbol
    /// showing up over a shorter span does not count.
    pub fn accepted(&self) -> bool {
        let n = self.len();
        n > 0
            && self
                .cell(1, n)
                .is_some_and(|cell| cell.contains(self.grammar.start()))
    }

    pub fn verdict(&self) -> Verdict {
        Verdict {
            accepted: self.accepted(),
            token_count: self.len(),
        }
    }

    /// Tokens no lexical rule produces. These never raise an error, they
    /// just leave their span-1 cell empty. Cells are looked up by the
    /// token's index, whatever its `position` says.
    pub fn unknown_tokens(&self) -> Vec<&Token> {
        self.tokens()
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.cell(idx + 1, 1).is_some_and(|c| c.is_empty()))
            .map(|(_, t)| t)
            .collect()
    }
}
