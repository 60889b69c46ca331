//! Flockbook - two-year financial statements workbook for a poultry company
//!
//! Builds an in-memory workbook model of about sixty sheets (assumptions,
//! opening balance, the primary statements, ledgers, notes, narrative pages and
//! management reports) in which every derived figure is an Excel formula, then
//! writes it to `.xlsx`.
//!
//! Cells that other sheets read are registered as anchors, so no formula
//! hard-codes a row number. The statements reference each other in a cycle
//! (Financial Position ↔ Cash Flows), which the builder settles by
//! repopulating them until nothing is pending and a pass repeats itself.
//!
//! # Example
//!
//! ```no_run
//! use flockbook::config::ReportConfig;
//! use flockbook::core::{check_model, ReportBuilder};
//! use flockbook::excel::WorkbookExporter;
//! use std::path::Path;
//!
//! let config = ReportConfig { seed: Some(42), ..ReportConfig::default() };
//! let report = ReportBuilder::new(config).build()?;
//! assert!(check_model(&report.model)?.is_empty());
//!
//! WorkbookExporter::new(&report.model).export(Path::new("statements.xlsx"))?;
//! # Ok::<(), flockbook::error::BookError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod sheets;
pub mod types;

// Re-export commonly used types
pub use config::ReportConfig;
pub use error::{BookError, BookResult};
pub use types::{Cell, CellAddr, CellValue, Sheet, SheetCell, WorkbookModel};
