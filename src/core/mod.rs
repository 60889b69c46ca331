//! Report assembly: anchors, sample data, the build loop and reference checks

pub mod anchors;
pub mod assumptions;
pub mod dependency;
pub mod payroll;
pub mod references;
pub mod report;

pub use anchors::{Anchor, AnchorRegistry, Period};
pub use dependency::SheetGraph;
pub use references::{check_model, DanglingKind, DanglingRef, ReferenceScanner};
pub use report::{ConvergenceReport, Report, ReportBuilder};
