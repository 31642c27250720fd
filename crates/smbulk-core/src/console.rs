//! Operator console seam.
//!
//! Every prompt and every line of operator-facing output goes through
//! [`Console`], so the workflow runs the same against a terminal, piped
//! stdin, or a scripted test double.

use std::io;

use secrecy::SecretString;

/// Width of the left column in two-column listings.
pub const COLUMN_WIDTH: usize = 55;

/// Interactive line-oriented console.
pub trait Console {
    /// Ask for one line of input. The returned text has no line terminator.
    fn prompt(&mut self, message: &str) -> io::Result<String>;

    /// Ask for one line of input without echoing it.
    fn prompt_secret(&mut self, message: &str) -> io::Result<SecretString>;

    /// Print a plain line.
    fn say(&mut self, line: &str);

    /// Print a line reporting a successful operation.
    fn success(&mut self, line: &str) {
        self.say(line);
    }

    /// Print a line reporting a failed operation.
    fn failure(&mut self, line: &str) {
        self.say(line);
    }

    /// Print a notice about skipped or ignored input.
    fn warn(&mut self, line: &str) {
        self.say(line);
    }
}

/// Lay out cells two per line, left column padded to [`COLUMN_WIDTH`].
pub fn two_columns(cells: &[String]) -> Vec<String> {
    cells
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => format!("{left:<COLUMN_WIDTH$} {right}"),
            [left] => left.clone(),
            _ => String::new(),
        })
        .collect()
}

/// A horizontal rule used to frame menus and summaries.
pub fn rule() -> String {
    "=".repeat(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_cells_and_pads_left_column() {
        let cells: Vec<String> = ["a (ID: 1)", "b (ID: 2)", "c (ID: 3)"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let lines = two_columns(&cells);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("{:<55} b (ID: 2)", "a (ID: 1)"));
        assert_eq!(lines[1], "c (ID: 3)");
    }

    #[test]
    fn long_left_cell_is_not_truncated() {
        let long = "x".repeat(70);
        let lines = two_columns(&[long.clone(), "y".into()]);
        assert_eq!(lines[0], format!("{long} y"));
    }

    #[test]
    fn rule_is_sixty_wide() {
        assert_eq!(rule().len(), 60);
    }
}
