//! Excel read-back - .xlsx → per-sheet summary and dangling references
//!
//! Only formula references are checked here. calamine reads values and
//! formulas but not hyperlinks, so internal links are checked on the model
//! before export.

use crate::core::references::{CellLookup, DanglingRef, ReferenceScanner};
use crate::error::{BookError, BookResult};
use crate::types::{CellAddr, SheetCell};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub name: String,
    /// Non-empty cells, formulas included
    pub cells: usize,
    pub formulas: usize,
    /// Formula references into other sheets
    pub cross_refs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkbookSummary {
    pub path: PathBuf,
    pub sheets: Vec<SheetSummary>,
    pub dangling: Vec<DanglingRef>,
}

impl WorkbookSummary {
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn total_formulas(&self) -> usize {
        self.sheets.iter().map(|s| s.formulas).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }
}

/// Occupied cells per sheet, as read from disk
#[derive(Default)]
struct ReadBack {
    occupied: HashMap<String, HashSet<CellAddr>>,
    formulas: Vec<(SheetCell, String)>,
}

impl CellLookup for ReadBack {
    fn has_sheet(&self, name: &str) -> bool {
        self.occupied.contains_key(name)
    }

    fn has_cell(&self, target: &SheetCell) -> bool {
        self.occupied
            .get(&target.sheet)
            .is_some_and(|cells| cells.contains(&target.addr))
    }
}

/// 1-based addresses of the non-empty cells of a calamine range
fn occupied_cells<T, F>(range: &Range<T>, mut keep: F) -> Vec<(CellAddr, &T)>
where
    T: calamine::CellType,
    F: FnMut(&T) -> bool,
{
    let (top, left) = range.start().unwrap_or((0, 0));
    range
        .used_cells()
        .filter(|(_, _, value)| keep(value))
        .map(|(row, col, value)| {
            let addr = CellAddr::new(top + row as u32 + 1, (left + col as u32 + 1) as u16);
            (addr, value)
        })
        .collect()
}

/// Reads a generated workbook back and checks its cross-sheet references
pub struct WorkbookInspector {
    path: PathBuf,
}

impl WorkbookInspector {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn inspect(&self) -> BookResult<WorkbookSummary> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            BookError::Import(format!("Failed to open '{}': {}", self.path.display(), e))
        })?;

        let scanner = ReferenceScanner::new()?;
        let mut read_back = ReadBack::default();
        let mut sheets = Vec::new();

        for name in workbook.sheet_names().to_vec() {
            let values = workbook.worksheet_range(&name).map_err(|e| {
                BookError::Import(format!("Failed to read sheet '{}': {}", name, e))
            })?;
            let formulas = workbook.worksheet_formula(&name).map_err(|e| {
                BookError::Import(format!("Failed to read formulas of '{}': {}", name, e))
            })?;

            let mut occupied: HashSet<CellAddr> =
                occupied_cells(&values, |v| !matches!(v, Data::Empty))
                    .into_iter()
                    .map(|(addr, _)| addr)
                    .collect();

            let mut cross_refs = 0;
            let formula_cells = occupied_cells(&formulas, |f| !f.is_empty());
            for (addr, formula) in &formula_cells {
                occupied.insert(*addr);
                // calamine drops the leading '='
                let formula = format!("={}", formula);
                cross_refs += scanner.cross_refs(&formula).len();
                read_back
                    .formulas
                    .push((SheetCell::new(name.as_str(), *addr), formula));
            }

            debug!(sheet = %name, cells = occupied.len(), formulas = formula_cells.len(), "read sheet");
            sheets.push(SheetSummary {
                name: name.clone(),
                cells: occupied.len(),
                formulas: formula_cells.len(),
                cross_refs,
            });
            read_back.occupied.insert(name, occupied);
        }

        let mut dangling = Vec::new();
        for (source, formula) in &read_back.formulas {
            scanner.check_formula(&read_back, source, formula, &mut dangling);
        }

        Ok(WorkbookSummary {
            path: self.path.clone(),
            sheets,
            dangling,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::references::{check_model, DanglingKind};
    use crate::excel::WorkbookExporter;
    use crate::types::{col, WorkbookModel};
    use tempfile::TempDir;

    fn export(model: &WorkbookModel) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.xlsx");
        WorkbookExporter::new(model).export(&path).unwrap();
        (dir, path)
    }

    #[test]
    fn test_inspect_counts_cells_and_formulas() {
        let mut model = WorkbookModel::new();
        {
            let sheet = model.add_sheet("Profit and Loss").unwrap();
            sheet.write(8, col::F, 1000.0);
            sheet.write(9, col::F, 400.0);
            sheet.write(10, col::F, "=F8-F9");
        }
        {
            let sheet = model.add_sheet("Comparative Report").unwrap();
            sheet.write(10, col::B, "Operating revenue");
            sheet.write(10, col::C, "='Profit and Loss'!F8");
        }
        let (_dir, path) = export(&model);

        let summary = WorkbookInspector::new(&path).inspect().unwrap();
        assert_eq!(summary.sheet_names(), vec!["Profit and Loss", "Comparative Report"]);
        assert_eq!(summary.sheets[0].cells, 3);
        assert_eq!(summary.sheets[0].formulas, 1);
        assert_eq!(summary.sheets[1].cross_refs, 1);
        assert_eq!(summary.total_formulas(), 2);
        assert!(summary.is_clean());
    }

    #[test]
    fn test_inspect_reports_empty_targets() {
        let mut model = WorkbookModel::new();
        model.add_sheet("Profit and Loss").unwrap();
        model
            .add_sheet("Equity")
            .unwrap()
            .write(16, col::E, "='Profit and Loss'!F21");
        let (_dir, path) = export(&model);

        let summary = WorkbookInspector::new(&path).inspect().unwrap();
        assert_eq!(summary.dangling.len(), 1);
        assert_eq!(summary.dangling[0].kind, DanglingKind::EmptyCell);
        assert_eq!(summary.dangling[0].source, "'Equity'!E16");
    }

    #[test]
    fn test_inspect_checks_formulas_but_not_links() {
        let mut model = WorkbookModel::new();
        {
            let sheet = model.add_sheet("Equity").unwrap();
            sheet.link(1, col::B, "Back to Financial Position", "Financial Position");
            sheet.write(16, col::E, "='Profit and Loss'!F21");
        }
        model.add_sheet("Profit and Loss").unwrap();

        let before = check_model(&model).unwrap();
        assert_eq!(before.len(), 2);
        assert!(before.iter().any(|d| d.kind == DanglingKind::BrokenLink));

        let (_dir, path) = export(&model);
        let summary = WorkbookInspector::new(&path).inspect().unwrap();
        // The link text reads back as a plain string cell
        assert_eq!(summary.sheets[0].cells, 2);
        assert_eq!(summary.sheets[0].cross_refs, 1);
        assert_eq!(summary.dangling.len(), 1);
        assert_eq!(summary.dangling[0].kind, DanglingKind::EmptyCell);
    }

    #[test]
    fn test_inspect_missing_file() {
        let err = WorkbookInspector::new("/nonexistent/book.xlsx")
            .inspect()
            .unwrap_err();
        assert!(matches!(err, BookError::Import(_)));
    }
}
