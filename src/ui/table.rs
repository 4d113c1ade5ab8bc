//! Table rendering for formatted output.

/// A simple box-drawn table.
///
/// Column widths are measured in characters so non-ASCII cells line up.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let column_widths = headers.iter().map(|h| h.chars().count()).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Add a row. Cells beyond the header count are dropped.
    pub fn add_row<S: AsRef<str>>(&mut self, row: &[S]) {
        let row: Vec<String> = row
            .iter()
            .take(self.headers.len())
            .map(|cell| cell.as_ref().to_string())
            .collect();

        for (width, cell) in self.column_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.chars().count());
        }

        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let mut lines = vec![
            self.render_border('┌', '┬', '┐'),
            self.render_row(&self.headers),
            self.render_border('├', '┼', '┤'),
        ];
        lines.extend(self.rows.iter().map(|row| self.render_row(row)));
        lines.push(self.render_border('└', '┴', '┘'));
        lines.join("\n")
    }

    fn render_border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self
            .column_widths
            .iter()
            .map(|width| "─".repeat(width + 2))
            .collect();
        format!("{}{}{}", left, segments.join(mid.to_string().as_str()), right)
    }

    fn render_row(&self, row: &[String]) -> String {
        let mut line = String::from("│");
        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let padding = width - cell.chars().count();
            line.push_str(&format!(" {}{} │", cell, " ".repeat(padding)));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_renders_headers() {
        let table = Table::new(&["ID", "Severity"]);
        assert!(table.is_empty());

        let output = table.render();
        assert!(output.contains("│ ID │ Severity │"));
    }

    #[test]
    fn columns_grow_to_fit() {
        let mut table = Table::new(&["ID", "Severity"]);
        table.add_row(&["RUN004", "Warning"]);

        assert_eq!(table.row_count(), 1);
        let output = table.render();
        assert!(output.contains("│ RUN004 │ Warning  │"));
        assert!(output.starts_with("┌────────┬──────────┐"));
    }

    #[test]
    fn extra_cells_are_dropped() {
        let mut table = Table::new(&["A"]);
        table.add_row(&["x", "y"]);

        assert!(!table.render().contains('y'));
    }
}
