//! Excel export and read-back
//!
//! - Export: WorkbookModel → .xlsx with formulas, styles, merges and internal links
//! - Read-back: .xlsx → per-sheet counts and dangling formula references

mod exporter;
mod importer;

pub use exporter::WorkbookExporter;
pub use importer::{SheetSummary, WorkbookInspector, WorkbookSummary};
