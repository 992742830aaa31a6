use comfy_table::{
    Attribute, Cell, Color, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL,
};

/// Builder for the report tables printed by the CLI
pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    pub fn new() -> Self {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);

        Self { table }
    }

    /// Set bold table headers
    pub fn headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header_cells: Vec<Cell> = headers
            .into_iter()
            .map(|h| Cell::new(h.into()).add_attribute(Attribute::Bold))
            .collect();

        self.table.set_header(header_cells);
        self
    }

    /// Add a label/value row
    pub fn field<L: Into<String>, V: Into<String>>(&mut self, label: L, value: V) -> &mut Self {
        self.table
            .add_row(vec![cells::bold(label), Cell::new(value.into())]);
        self
    }

    /// Add a row with custom styled cells
    pub fn styled_row(&mut self, cells: Vec<Cell>) -> &mut Self {
        self.table.add_row(cells);
        self
    }

    pub fn build(self) -> String {
        self.table.to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper functions for creating styled cells
pub mod cells {
    use super::*;

    pub fn bold<S: Into<String>>(text: S) -> Cell {
        Cell::new(text.into()).add_attribute(Attribute::Bold)
    }

    /// Red text on the default background
    pub fn error<S: Into<String>>(text: S) -> Cell {
        Cell::new(text.into()).fg(Color::Red)
    }

    pub fn success<S: Into<String>>(text: S) -> Cell {
        Cell::new(text.into()).fg(Color::Green)
    }

    /// Gray text
    pub fn muted<S: Into<String>>(text: S) -> Cell {
        Cell::new(text.into()).fg(Color::DarkGrey)
    }
}
