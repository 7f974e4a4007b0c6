use crate::chart::Chart;

/// Label of a cell no nonterminal derives.
pub const EMPTY_CELL: &str = "Ø";

/// One chart cell placed on the display grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCell {
    /// `start + len - 1`, the position of the last token of the span.
    pub row: usize,
    /// `start`.
    pub column: usize,
    pub start: usize,
    pub len: usize,
    /// Sorted nonterminal names joined by `", "`, or [`EMPTY_CELL`].
    pub label: String,
    pub has_start: bool,
}

/// A display-ready copy of a filled chart. Rows and columns are 1-based;
/// single-token spans sit on the diagonal and the full span at
/// `(n, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartView {
    pub tokens: Vec<String>,
    pub cells: Vec<ViewCell>,
    pub accepted: bool,
}

impl ChartView {
    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&ViewCell> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.column == column)
    }

    /// `size()` rows of `size()` slots; slots above the diagonal are `None`.
    /// Cells placed outside the grid are left out.
    pub fn rows(&self) -> Vec<Vec<Option<&ViewCell>>> {
        let n = self.size();
        let mut grid = vec![vec![None; n]; n];
        for cell in &self.cells {
            let (Some(row), Some(column)) = (cell.row.checked_sub(1), cell.column.checked_sub(1))
            else {
                continue;
            };
            if let Some(slot) = grid.get_mut(row).and_then(|r| r.get_mut(column)) {
                *slot = Some(cell);
            }
        }
        grid
    }
}

impl<'gr> Chart<'gr> {
    pub fn export(&self) -> ChartView {
        let n = self.len();
        let start_symbol = self.grammar.start();
        let mut cells = Vec::with_capacity(n * (n + 1) / 2);

        for len in 1..=n {
            for i in 1..=n - len + 1 {
                let Some(cell) = self.cell(i, len) else {
                    continue;
                };
                let label = if cell.is_empty() {
                    EMPTY_CELL.to_string()
                } else {
                    cell.iter().copied().collect::<Vec<_>>().join(", ")
                };
                cells.push(ViewCell {
                    row: i + len - 1,
                    column: i,
                    start: i,
                    len,
                    label,
                    has_start: cell.contains(start_symbol),
                });
            }
        }

        ChartView {
            tokens: self.tokens().iter().map(|t| t.text.clone()).collect(),
            cells,
            accepted: self.accepted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::tokenizer::Tokenizer;

    fn view(input: &str) -> ChartView {
        let g = Grammar::builder("S")
            .binary("S", "A", "B")
            .binary("A", "A", "A")
            .lexical("A", "a")
            .lexical("B", "b")
            .lexical("S", "s")
            .build()
            .unwrap();
        Chart::build(&g, Tokenizer::default().tokenize(input)).export()
    }

    #[test]
    fn diagonal_layout() {
        let v = view("a a b");
        assert_eq!(v.size(), 3);
        assert_eq!(v.tokens, vec!["a", "a", "b"]);
        assert_eq!(v.cells.len(), 6);

        // single-token spans on the diagonal
        for i in 1..=3 {
            let c = v.get(i, i).unwrap();
            assert_eq!((c.start, c.len), (i, 1));
        }
        // full span bottom-left
        let full = v.get(3, 1).unwrap();
        assert_eq!((full.start, full.len), (1, 3));
        assert_eq!(full.label, "S");
        assert!(full.has_start);
        assert!(v.accepted);

        // nothing above the diagonal
        assert!(v.get(1, 2).is_none());
        assert!(v.get(1, 3).is_none());
    }

    #[test]
    fn labels_are_sorted_and_joined() {
        let v = view("a b");
        let c = v.get(2, 1).unwrap();
        assert_eq!(c.label, "S");
        assert_eq!(v.get(1, 1).unwrap().label, "A");
    }

    #[test]
    fn empty_cells_use_marker() {
        let v = view("b a");
        let full = v.get(2, 1).unwrap();
        assert_eq!(full.label, EMPTY_CELL);
        assert!(!full.has_start);
        assert!(!v.accepted);
    }

    #[test]
    fn start_flag_on_shorter_span() {
        let v = view("s a");
        assert!(v.get(1, 1).unwrap().has_start);
        assert!(!v.accepted);
    }

    #[test]
    fn rows_fill_lower_triangle() {
        let v = view("a a b");
        let rows = v.rows();
        assert_eq!(rows.len(), 3);
        let filled: Vec<usize> = rows
            .iter()
            .map(|r| r.iter().filter(|c| c.is_some()).count())
            .collect();
        assert_eq!(filled, vec![1, 2, 3]);
        assert_eq!(rows[2][0].unwrap().label, "S");
    }

    #[test]
    fn rows_skip_cells_off_the_grid() {
        let mut v = view("a b");
        let expected: Vec<Vec<Option<ViewCell>>> = v
            .rows()
            .into_iter()
            .map(|r| r.into_iter().map(|c| c.cloned()).collect())
            .collect();

        let stray = |row, column| ViewCell {
            row,
            column,
            start: 1,
            len: 1,
            label: "X".to_string(),
            has_start: false,
        };
        v.cells.push(stray(0, 1));
        v.cells.push(stray(3, 1));
        v.cells.push(stray(1, 0));
        v.cells.push(stray(2, 5));

        let rows: Vec<Vec<Option<ViewCell>>> = v
            .rows()
            .into_iter()
            .map(|r| r.into_iter().map(|c| c.cloned()).collect())
            .collect();
        assert_eq!(rows, expected);
    }

    #[test]
    fn multi_label_cell() {
        let g = Grammar::builder("X")
            .lexical("X", "w")
            .lexical("B", "w")
            .lexical("A", "w")
            .build()
            .unwrap();
        let v = Chart::build(&g, Tokenizer::default().tokenize("w")).export();
        assert_eq!(v.get(1, 1).unwrap().label, "A, B, X");
    }
}
