//! End-to-end tests: build the whole report model and check its structure

use flockbook::core::anchors::{Anchor, Period};
use flockbook::core::{check_model, ReferenceScanner, ReportBuilder, SheetGraph};
use flockbook::sheets::{self, balance_sheet, numeric_notes};
use flockbook::types::{col, CellValue};
use flockbook::ReportConfig;
use pretty_assertions::assert_eq;
use std::collections::{BTreeSet, HashSet};

fn seeded(seed: u64, employees: usize) -> ReportConfig {
    ReportConfig {
        seed: Some(seed),
        employees,
        ..ReportConfig::default()
    }
}

#[test]
fn test_sheet_order_matches_model() {
    let report = ReportBuilder::new(seeded(1, 10)).build().unwrap();
    let expected = sheets::sheet_order();
    let actual: Vec<String> = report
        .model
        .sheet_names()
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(actual, expected);
    assert_eq!(
        report.model.active_sheet().map(|s| s.name()),
        Some(sheets::FINANCIAL_POSITION)
    );
}

#[test]
fn test_every_sheet_has_content_and_a_way_back() {
    let report = ReportBuilder::new(seeded(2, 10)).build().unwrap();
    for sheet in report.model.sheets() {
        if sheet.name() == sheets::FINANCIAL_POSITION {
            continue;
        }
        assert!(sheet.cell_count() > 2, "{} is nearly empty", sheet.name());
        let back = sheet
            .cells()
            .filter(|(addr, _)| addr.row == 1)
            .any(|(_, cell)| cell.link.is_some());
        assert!(back, "{} has no back link", sheet.name());
    }
}

#[test]
fn test_seeded_builds_are_identical() {
    let first = ReportBuilder::new(seeded(42, 25)).build().unwrap();
    let second = ReportBuilder::new(seeded(42, 25)).build().unwrap();
    assert!(first.model == second.model);

    let other = ReportBuilder::new(seeded(43, 25)).build().unwrap();
    assert!(first.model != other.model);
}

#[test]
fn test_statement_loop_converges_quickly() {
    let report = ReportBuilder::new(seeded(3, 10)).build().unwrap();
    let convergence = &report.convergence;
    assert!(convergence.converged);
    assert!(convergence.passes > 1);
    assert!(convergence.passes < ReportConfig::default().max_passes);
    assert_eq!(convergence.pending_per_pass.last(), Some(&0));
    assert!(convergence.pending_per_pass[0] > 0);
}

#[test]
fn test_no_dangling_references() {
    let report = ReportBuilder::new(seeded(4, 10)).build().unwrap();
    let dangling = check_model(&report.model).unwrap();
    assert!(dangling.is_empty(), "{:?}", dangling);
}

#[test]
fn test_statement_cycle_is_visible_in_graph() {
    let report = ReportBuilder::new(seeded(5, 10)).build().unwrap();
    let graph = SheetGraph::from_model(&report.model).unwrap();
    let cycles = graph.cycles();
    assert!(cycles.iter().any(|c| {
        c.iter().any(|s| s == sheets::FINANCIAL_POSITION)
            && c.iter().any(|s| s == sheets::CASH_FLOWS)
    }));

    // Inputs come before the statements that read them
    let order: Vec<String> = graph
        .evaluation_order()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    let position = |name: &str| order.iter().position(|s| s == name).unwrap();
    assert!(position(sheets::ASSUMPTIONS) < position(sheets::PROFIT_AND_LOSS));
    assert!(position(sheets::PROFIT_AND_LOSS) < position(sheets::COMPARATIVE_REPORT));
    assert!(position(sheets::COMPARATIVE_REPORT) < position(sheets::BUSINESS_ANALYSIS));
}

#[test]
fn test_payroll_register_size_and_totals() {
    let report = ReportBuilder::new(seeded(6, 10)).build().unwrap();
    assert_eq!(report.employees, 10);

    let payroll = report.model.sheet(sheets::PAYROLL).unwrap();
    let data_rows = (8..=17)
        .filter(|&r| payroll.cell(r, col::A).is_some())
        .count();
    assert_eq!(data_rows, 10);
    assert!(payroll.cell(18, col::A).is_none());
    assert_eq!(
        payroll.cell(19, col::N).unwrap().value.formula(),
        Some("=SUM(N8:N17)")
    );
    assert_eq!(payroll.cell(20, col::N).unwrap().value.formula(), Some("=N19*12"));
}

#[test]
fn test_balance_check_formula_present_for_both_years() {
    let report = ReportBuilder::new(seeded(7, 10)).build().unwrap();
    let position = report.model.sheet(sheets::FINANCIAL_POSITION).unwrap();
    for c in [col::E, col::F] {
        let formula = position.cell(40, c).unwrap().value.formula().unwrap();
        assert!(formula.contains(balance_sheet::BALANCED));
        assert!(formula.contains(balance_sheet::NOT_BALANCED));
    }
}

#[test]
fn test_anchors_resolve_to_populated_cells() {
    let report = ReportBuilder::new(seeded(8, 10)).build().unwrap();
    for (_, target) in report.anchors.iter() {
        assert!(
            report.model.resolve(target).is_some(),
            "anchor points at empty cell {}",
            target
        );
    }
    let closing = report
        .anchors
        .get(Anchor::ClosingCash, Period::Current)
        .unwrap();
    assert_eq!(closing.sheet, sheets::CASH_FLOWS);
}

#[test]
fn test_every_registered_anchor_is_read_by_a_formula() {
    let report = ReportBuilder::new(seeded(11, 10)).build().unwrap();
    let scanner = ReferenceScanner::new().unwrap();
    let read: HashSet<_> = report
        .model
        .sheets()
        .iter()
        .flat_map(|sheet| sheet.cells())
        .filter_map(|(_, cell)| cell.value.formula())
        .flat_map(|formula| scanner.cross_refs(formula))
        .collect();

    // Assumptions are inputs shown in full even where no statement uses them
    let unread: BTreeSet<Anchor> = report
        .anchors
        .iter()
        .filter(|((anchor, _), _)| !matches!(anchor, Anchor::Assumption(_)))
        .map(|((anchor, _), _)| *anchor)
        .filter(|anchor| {
            !report
                .anchors
                .iter()
                .any(|((other, _), target)| other == anchor && read.contains(target))
        })
        .collect();
    assert!(unread.is_empty(), "registered but never read: {:?}", unread);
}

#[test]
fn test_notes_link_back_to_their_statement() {
    let report = ReportBuilder::new(seeded(9, 10)).build().unwrap();
    for note in numeric_notes::CATALOG.iter() {
        let sheet = report.model.sheet(note.sheet).unwrap();
        let back = sheet
            .cells()
            .filter_map(|(_, cell)| cell.link.as_ref())
            .any(|link| link.sheet == note.return_sheet);
        assert!(back, "note {} does not link to {}", note.sheet, note.return_sheet);
    }
}

#[test]
fn test_history_title_uses_company_name() {
    let config = ReportConfig {
        company_name: "Green Valley Poultry".to_string(),
        ..seeded(10, 5)
    };
    let report = ReportBuilder::new(config).build().unwrap();
    let history = report.model.sheet(sheets::HISTORY).unwrap();
    assert_eq!(
        history.cell(2, col::A).map(|c| &c.value),
        Some(&CellValue::Text("History of Green Valley Poultry".to_string()))
    );
}
