use colored::*;
use unicode_segmentation::UnicodeSegmentation;

use crate::export::ChartView;

fn width(text: &str) -> usize {
    text.graphemes(true).count()
}

fn pad(text: &str, to: usize) -> String {
    let fill = to.saturating_sub(width(text));
    format!("{}{}", text, " ".repeat(fill))
}

/// Draws the exported chart as a text grid: tokens across the top and down
/// the left, the triangle of cells below the diagonal. With `colorize`,
/// cells holding the start symbol are green and headers bold.
pub fn render_grid(view: &ChartView, colorize: bool) -> String {
    let n = view.size();
    if n == 0 {
        return String::new();
    }

    let col = view
        .tokens
        .iter()
        .map(|t| width(t))
        .chain(view.cells.iter().map(|c| width(&c.label)))
        .max()
        .unwrap_or(1);
    let sep = format!("+{}\n", format!("{}+", "-".repeat(col + 2)).repeat(n + 1));

    let header = |text: &str| {
        let cell = pad(text, col);
        if colorize {
            cell.bold().to_string()
        } else {
            cell
        }
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push_str(&format!("| {} |", pad("", col)));
    for t in &view.tokens {
        out.push_str(&format!(" {} |", header(t)));
    }
    out.push('\n');
    out.push_str(&sep);

    for (r, row) in view.rows().into_iter().enumerate() {
        out.push_str(&format!("| {} |", header(&view.tokens[r])));
        for slot in row {
            let text = match slot {
                Some(cell) => {
                    let padded = pad(&cell.label, col);
                    if colorize && cell.has_start {
                        padded.green().bold().to_string()
                    } else {
                        padded
                    }
                }
                None => pad("", col),
            };
            out.push_str(&format!(" {} |", text));
        }
        out.push('\n');
        out.push_str(&sep);
    }
    out
}
