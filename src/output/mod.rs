mod markdown;

pub use markdown::MarkdownReport;

use crate::model::RunReport;
use std::io::Write;

pub trait OutputFormatter {
    fn format<W: Write>(&self, report: &RunReport, writer: &mut W) -> std::io::Result<()>;
}

/// Escape text for use inside a markdown table cell.
pub fn table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
