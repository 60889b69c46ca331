//! Cross-sheet reference scanning and the dangling-reference check
//!
//! A reference dangles when its sheet does not exist, or when it points at a
//! cell that holds nothing. Internal hyperlinks dangle when their sheet does
//! not exist. The model check covers both. The formula check also runs
//! against a workbook read back from disk, where hyperlinks are not visible.

use crate::error::{BookError, BookResult};
use crate::types::{column_number, CellAddr, SheetCell, WorkbookModel};
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Anything the check can ask about sheets and cells
pub trait CellLookup {
    fn has_sheet(&self, name: &str) -> bool;
    fn has_cell(&self, target: &SheetCell) -> bool;
}

impl CellLookup for WorkbookModel {
    fn has_sheet(&self, name: &str) -> bool {
        self.sheet(name).is_some()
    }

    fn has_cell(&self, target: &SheetCell) -> bool {
        self.resolve(target).is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DanglingKind {
    MissingSheet,
    EmptyCell,
    BrokenLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingRef {
    pub kind: DanglingKind,
    /// Cell holding the formula or hyperlink
    pub source: String,
    pub target: String,
}

impl fmt::Display for DanglingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            DanglingKind::MissingSheet => "references missing sheet",
            DanglingKind::EmptyCell => "references empty cell",
            DanglingKind::BrokenLink => "links to missing sheet",
        };
        write!(f, "{} {} {}", self.source, what, self.target)
    }
}

/// Finds `Sheet!A1` and `'Sheet Name'!A1` references in formula text
pub struct ReferenceScanner {
    reference: Regex,
    literal: Regex,
}

impl ReferenceScanner {
    pub fn new() -> BookResult<Self> {
        let reference = Regex::new(
            r"(?:'((?:[^']|'')+)'|([A-Za-z_][A-Za-z0-9_.]*))!\$?([A-Za-z]{1,3})\$?([0-9]+)",
        )
        .map_err(|e| BookError::Parse(format!("Regex error: {}", e)))?;
        let literal = Regex::new(r#""(?:[^"]|"")*""#)
            .map_err(|e| BookError::Parse(format!("Regex error: {}", e)))?;
        Ok(Self { reference, literal })
    }

    /// Every cross-sheet reference in `formula`, in order of appearance.
    /// Text inside double-quoted string literals is ignored.
    pub fn cross_refs(&self, formula: &str) -> Vec<SheetCell> {
        let code = self.literal.replace_all(formula, "\"\"");

        self.reference
            .captures_iter(&code)
            .filter_map(|caps| {
                let sheet = match (caps.get(1), caps.get(2)) {
                    (Some(quoted), _) => quoted.as_str().replace("''", "'"),
                    (None, Some(bare)) => bare.as_str().to_string(),
                    (None, None) => return None,
                };
                let col = column_number(caps.get(3)?.as_str())?;
                let row: u32 = caps.get(4)?.as_str().parse().ok()?;
                if row == 0 {
                    return None;
                }
                Some(SheetCell::new(sheet, CellAddr::new(row, col)))
            })
            .collect()
    }

    /// Check one formula, appending what dangles to `found`
    pub fn check_formula<L: CellLookup>(
        &self,
        lookup: &L,
        source: &SheetCell,
        formula: &str,
        found: &mut Vec<DanglingRef>,
    ) {
        for target in self.cross_refs(formula) {
            let kind = if !lookup.has_sheet(&target.sheet) {
                DanglingKind::MissingSheet
            } else if !lookup.has_cell(&target) {
                DanglingKind::EmptyCell
            } else {
                continue;
            };
            found.push(DanglingRef {
                kind,
                source: source.to_string(),
                target: target.to_string(),
            });
        }
    }

    pub fn check_link<L: CellLookup>(
        &self,
        lookup: &L,
        source: &SheetCell,
        target: &SheetCell,
        found: &mut Vec<DanglingRef>,
    ) {
        if !lookup.has_sheet(&target.sheet) {
            found.push(DanglingRef {
                kind: DanglingKind::BrokenLink,
                source: source.to_string(),
                target: target.to_string(),
            });
        }
    }
}

/// Every dangling formula reference and hyperlink in the model
pub fn check_model(model: &WorkbookModel) -> BookResult<Vec<DanglingRef>> {
    let scanner = ReferenceScanner::new()?;
    let mut found = Vec::new();

    for sheet in model.sheets() {
        for (addr, cell) in sheet.cells() {
            let source = SheetCell::new(sheet.name(), *addr);
            if let Some(formula) = cell.value.formula() {
                scanner.check_formula(model, &source, formula, &mut found);
            }
            if let Some(target) = &cell.link {
                scanner.check_link(model, &source, target, &mut found);
            }
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::col;

    fn scanner() -> ReferenceScanner {
        ReferenceScanner::new().unwrap()
    }

    #[test]
    fn test_quoted_and_bare_references() {
        let refs = scanner().cross_refs("='Profit and Loss'!F21+Equity!$E$17-G8");
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].to_string(), "'Profit and Loss'!F21");
        assert_eq!(refs[1], SheetCell::new("Equity", CellAddr::new(17, col::E)));
    }

    #[test]
    fn test_numeric_sheet_names_and_escaped_quotes() {
        let refs = scanner().cross_refs("=-'9'!C12+'Owner''s'!A1");
        assert_eq!(refs[0].sheet, "9");
        assert_eq!(refs[1].sheet, "Owner's");
    }

    #[test]
    fn test_string_literals_are_skipped() {
        let refs = scanner().cross_refs(
            "=CONCATENATE(\"See 'Cash Flows'!C35 for \"\"details\"\"\",TEXT('Cash Flows'!C35,\"#,##0\"))",
        );
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].addr.a1(), "C35");
    }

    #[test]
    fn test_check_model_reports_each_kind() {
        let mut model = WorkbookModel::new();
        model.add_sheet("Source").unwrap();
        model.add_sheet("Target").unwrap().write(5, col::B, 1);
        let source = model.sheet_mut("Source").unwrap();
        source.write(1, col::A, "='Target'!B5");
        source.write(2, col::A, "='Target'!B6");
        source.write(3, col::A, "='Gone'!A1");
        source.link(4, col::A, "Back", "Nowhere");
        source.link(5, col::A, "Back", "Target");

        let found = check_model(&model).unwrap();
        let kinds: Vec<_> = found.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DanglingKind::EmptyCell,
                DanglingKind::MissingSheet,
                DanglingKind::BrokenLink
            ]
        );
        assert_eq!(found[0].to_string(), "'Source'!A2 references empty cell 'Target'!B6");
    }
}
