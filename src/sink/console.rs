//! Stdout sink rendering the report as a table.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use super::{SinkError, TabularSink};

/// Prints the report as a table on stdout; useful for local runs without a spreadsheet.
#[derive(Default)]
pub struct ConsoleSink {
    header: Mutex<Vec<String>>,
}

impl ConsoleSink {
    /// Sink with no header set yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn header(&self) -> Vec<String> {
        self.header
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl TabularSink for ConsoleSink {
    async fn set_header(&self, header: &[&str]) -> Result<(), SinkError> {
        *self.header.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) =
            header.iter().map(|cell| cell.to_string()).collect();
        Ok(())
    }

    async fn clear(&self) -> Result<(), SinkError> {
        self.header
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
        Ok(())
    }

    async fn append_rows(&self, rows: &[Vec<String>]) -> Result<(), SinkError> {
        let rendered = render_table(&self.header(), rows);
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", rendered)?;
        stdout.flush()?;
        Ok(())
    }
}

/// Renders header and rows; short rows are padded so blank separators stay visible.
pub fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let width = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if !header.is_empty() {
        table.set_header(header.to_vec());
    }
    for row in rows {
        let mut cells = row.clone();
        cells.resize(width, String::new());
        table.add_row(cells);
    }
    table.to_string()
}
