//! Terminal table for sorted pairs.
//!
//! ```text
//!   ┌───┬─────┬───────┐
//!   │ # │ Key │ Value │
//!   ├───┼─────┼───────┤
//!   │ 1 │ a1  │ n3    │
//!   └───┴─────┴───────┘
//! ```

use colored::*;

/// Narrowest a column is squeezed to when the terminal is too small.
const MIN_COLUMN: usize = 8;

/// Cells may carry ANSI styling; run user text through [`sanitize`] first.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn print(&self) {
        let (_, term_width) = console::Term::stdout().size();
        for line in self.render(term_width as usize) {
            println!("{}", line);
        }
    }

    pub fn render(&self, max_width: usize) -> Vec<String> {
        if self.headers.is_empty() {
            return Vec::new();
        }

        let widths = self.column_widths(max_width);
        let mut lines = Vec::with_capacity(self.rows.len() + 4);

        lines.push(border(&widths, '┌', '┬', '┐'));
        lines.push(row_line(
            &widths,
            self.headers.iter().map(|h| h.bold().to_string()),
        ));
        lines.push(border(&widths, '├', '┼', '┤'));
        for row in &self.rows {
            lines.push(row_line(&widths, row.iter().map(|c| flatten(c))));
        }
        lines.push(border(&widths, '└', '┴', '┘'));

        lines
    }

    fn column_widths(&self, max_width: usize) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| console::measure_text_width(h))
            .collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(console::measure_text_width(&flatten(cell)));
            }
        }

        // indent + left edge + " x |" per column
        let overhead = 3 + 3 * widths.len();
        let budget = max_width.saturating_sub(overhead);
        while widths.iter().sum::<usize>() > budget {
            let Some(widest) = widths.iter_mut().max() else {
                break;
            };
            if *widest <= MIN_COLUMN {
                break;
            }
            *widest -= 1;
        }

        widths
    }
}

fn border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    let mid = mid.to_string();
    format!("  {}{}{}", left, segments.join(mid.as_str()), right)
}

fn row_line(widths: &[usize], cells: impl Iterator<Item = String>) -> String {
    let mut line = String::from("  │");
    for (cell, &width) in cells.zip(widths) {
        let shown = console::truncate_str(&cell, width, "...");
        let pad = width.saturating_sub(console::measure_text_width(&shown));
        line.push_str(&format!(" {}{} │", shown, " ".repeat(pad)));
    }
    line
}

/// Makes user text safe to print: control characters, ESC included,
/// become spaces. Apply before any styling.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

// Cells may already carry styling, so only line breaks and tabs go.
fn flatten(s: &str) -> String {
    s.chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect()
}
