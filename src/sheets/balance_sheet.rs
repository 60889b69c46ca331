//! Statement of financial position
//!
//! The prior year opens from the opening balance and the current year opens
//! from the prior column, so every movement between two columns is one the
//! cash flow statement reports. Cash itself is read back from the cash flow
//! statement, which makes this sheet part of the statement loop.

use super::{back_link, SheetContext, CASH_FLOWS, FIXED_ASSETS, INVENTORY_NOTE, MILLION_RIALS};
use crate::core::anchors::{Anchor, Period};
use crate::core::assumptions::Assumption;
use crate::error::BookResult;
use crate::types::{col, column_letter, Sheet};

pub const BALANCED: &str = "Balanced";
pub const NOT_BALANCED: &str = "Not balanced";

struct Line {
    row: u32,
    label: &'static str,
    total: bool,
    /// Link text and target sheet for the note column
    note: Option<(&'static str, &'static str)>,
    anchor: Option<Anchor>,
}

const fn item(row: u32, label: &'static str, note: Option<(&'static str, &'static str)>, anchor: Option<Anchor>) -> Line {
    Line { row, label, total: false, note, anchor }
}

const fn total(row: u32, label: &'static str, anchor: Option<Anchor>) -> Line {
    Line { row, label, total: true, note: None, anchor }
}

const fn heading(row: u32, label: &'static str) -> Line {
    total(row, label, None)
}

const LINES: [Line; 25] = [
    item(10, "Cash and cash equivalents", Some(("6", "6")), Some(Anchor::Cash)),
    item(11, "Trade and notes receivable", Some(("42.43", "42.43")), Some(Anchor::Receivables)),
    item(12, "Inventories", Some(("Inventory", INVENTORY_NOTE)), Some(Anchor::Inventory)),
    item(13, "Prepayments and other current assets", Some(("10", "10.11.12")), Some(Anchor::Prepayments)),
    total(14, "Total current assets", Some(Anchor::CurrentAssets)),
    item(17, "Property, plant and equipment (net book value)", Some(("Roll-forward", FIXED_ASSETS)), None),
    item(18, "Other non-current assets", Some(("13", "13")), Some(Anchor::OtherNonCurrentAssets)),
    total(19, "Total non-current assets", None),
    total(21, "Total assets", Some(Anchor::TotalAssets)),
    item(25, "Trade and notes payable", Some(("28.29.30.31", "28.29.30.31")), Some(Anchor::Payables)),
    item(26, "Income tax payable", Some(("17", "17")), Some(Anchor::TaxPayable)),
    item(27, "Dividends payable", Some(("18", "18")), Some(Anchor::DividendsPayable)),
    item(28, "Current portion of long-term borrowings", Some(("16", "16")), None),
    total(29, "Total current liabilities", Some(Anchor::CurrentLiabilities)),
    item(32, "Long-term borrowings", Some(("19", "19")), None),
    item(33, "Employee end-of-service benefits", Some(("20", "20")), None),
    total(34, "Total non-current liabilities", None),
    total(35, "Total liabilities", Some(Anchor::TotalLiabilities)),
    item(37, "Equity", Some(("21", "21")), None),
    total(38, "Total liabilities and equity", None),
    total(40, "Balance check", None),
    heading(9, "Current assets"),
    heading(16, "Non-current assets"),
    heading(24, "Current liabilities"),
    heading(31, "Non-current liabilities"),
];

pub fn populate(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let date_line = format!(
        "As at {} {} and {}",
        ctx.config.year_end,
        ctx.config.current_year,
        ctx.config.prior_year()
    );
    ctx.start(
        sheet,
        "Statement of financial position",
        &date_line,
        Some(MILLION_RIALS),
        &[
            (col::A, 5.0),
            (col::B, 40.0),
            (col::C, 45.0),
            (col::D, 12.0),
            (col::E, 18.0),
            (col::F, 18.0),
        ],
    );

    sheet.write(7, col::D, "Note").bold();
    sheet.write(7, col::E, ctx.year(Period::Current).to_string()).bold();
    sheet.write(7, col::F, ctx.year(Period::Prior).to_string()).bold();
    sheet.write(8, col::B, "Assets").bold();
    sheet.write(23, col::B, "Liabilities and equity").bold();

    for (period, c) in [(Period::Current, col::E), (Period::Prior, col::F)] {
        write_column(ctx, sheet, period, c)?;
    }

    for line in LINES.iter() {
        let label_col = if line.total { col::B } else { col::C };
        let cell = sheet.write(line.row, label_col, line.label);
        if line.total {
            cell.bold();
        }
        if let Some((text, target)) = line.note {
            sheet.link(line.row, col::D, text, target);
        }
        if let Some(anchor) = line.anchor {
            ctx.mark(sheet, line.row, col::E, anchor, Period::Current);
            ctx.mark(sheet, line.row, col::F, anchor, Period::Prior);
        }
    }

    back_link(sheet, CASH_FLOWS);
    Ok(())
}

fn write_column(ctx: &mut SheetContext, sheet: &mut Sheet, period: Period, c: u16) -> BookResult<()> {
    let l = column_letter(c);
    let assumption = Anchor::Assumption;

    let cash = ctx.refer(Anchor::ClosingCash, period)?;
    let receivable_days = ctx.refer(assumption(Assumption::ReceivableDays), period)?;
    let revenue = ctx.refer(Anchor::Revenue, period)?;
    let inventory = ctx.refer(Anchor::InventoryClosing, period)?;
    let nbv = ctx.refer(Anchor::NetBookValue, period)?;
    let payable_days = ctx.refer(assumption(Assumption::PayableDays), period)?;
    let cost_of_sales = ctx.refer(Anchor::CostOfSalesTotal, period)?;
    let income_tax = ctx.refer(Anchor::IncomeTax, period)?;
    let repayment = ctx.refer(assumption(Assumption::LoanRepayment), period)?;
    let borrowing = ctx.refer(assumption(Assumption::NewBorrowing), period)?;
    let end_of_service = ctx.refer(Anchor::EndOfServiceExpense, period)?;
    let equity = ctx.refer(Anchor::EquityClosing, period)?;

    // Balances the year opens with: the opening position for the prior year,
    // the prior column for the current year
    let (opening_debt, opening_end_of_service) = match period {
        Period::Prior => (
            format!(
                "{}+{}",
                ctx.single(Anchor::OpeningCurrentDebt)?,
                ctx.single(Anchor::OpeningLongTermDebt)?
            ),
            ctx.single(Anchor::OpeningEndOfService)?,
        ),
        Period::Current => ("F28+F32".to_string(), "F33".to_string()),
    };
    let (prepayments, other_non_current) = match period {
        Period::Current => (50_000.0, 100_000.0),
        Period::Prior => (40_000.0, 80_000.0),
    };

    sheet.write(10, c, format!("={}", cash));
    sheet.write(11, c, format!("=({}/365)*{}", receivable_days, revenue));
    sheet.write(12, c, format!("={}", inventory));
    sheet.write(13, c, prepayments);
    sheet.write(14, c, format!("=SUM({l}10:{l}13)")).bold();

    sheet.write(17, c, format!("={}", nbv));
    sheet.write(18, c, other_non_current);
    sheet.write(19, c, format!("=SUM({l}17:{l}18)")).bold();
    sheet.write(21, c, format!("={l}14+{l}19")).bold();

    sheet.write(25, c, format!("=({}/365)*{}", payable_days, cost_of_sales));
    sheet.write(26, c, format!("=-{}", income_tax));
    // Dividends are paid in the year they are declared
    sheet.write(27, c, 0);
    sheet.write(28, c, format!("={}", repayment));
    sheet.write(29, c, format!("=SUM({l}25:{l}28)")).bold();

    sheet.write(
        32,
        c,
        format!("={}+{}-{}-{l}28", opening_debt, borrowing, repayment),
    );
    sheet.write(33, c, format!("={}+{}", opening_end_of_service, end_of_service));
    sheet.write(34, c, format!("=SUM({l}32:{l}33)")).bold();
    sheet.write(35, c, format!("={l}29+{l}34")).bold();

    sheet.write(37, c, format!("={}", equity));
    sheet.write(38, c, format!("={l}35+{l}37")).bold();
    sheet.write(
        40,
        c,
        format!(
            "=IF(ROUND({l}21-{l}38,0)=0,\"{}\",\"{}\")",
            BALANCED, NOT_BALANCED
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::core::anchors::AnchorRegistry;

    fn build() -> (Sheet, AnchorRegistry) {
        let config = ReportConfig::default();
        let mut anchors = AnchorRegistry::new();
        anchors.set_single(Anchor::OpeningCurrentDebt, "Opening Balance", 30, col::D);
        anchors.set_single(Anchor::OpeningLongTermDebt, "Opening Balance", 34, col::D);
        anchors.set_single(Anchor::OpeningEndOfService, "Opening Balance", 35, col::D);
        anchors.set_lenient(true);

        let mut sheet = Sheet::new("Financial Position");
        populate(&mut SheetContext::new(&config, &mut anchors), &mut sheet).unwrap();
        (sheet, anchors)
    }

    #[test]
    fn test_cash_is_a_pending_forward_reference() {
        let (sheet, anchors) = build();
        assert_eq!(sheet.cell_a1("E10").unwrap().value.formula(), Some("=0"));
        assert!(anchors.pending().contains(&(Anchor::ClosingCash, Period::Current)));
        assert!(anchors.pending().contains(&(Anchor::ClosingCash, Period::Prior)));
    }

    #[test]
    fn test_debt_rolls_from_opening_balance() {
        let (sheet, _) = build();
        assert_eq!(
            sheet.cell_a1("F32").unwrap().value.formula(),
            Some("='Opening Balance'!D30+'Opening Balance'!D34+0-0-F28")
        );
        assert_eq!(sheet.cell_a1("E32").unwrap().value.formula(), Some("=F28+F32+0-0-E28"));
        assert_eq!(sheet.cell_a1("F33").unwrap().value.formula(), Some("='Opening Balance'!D35+0"));
        assert_eq!(sheet.cell_a1("E33").unwrap().value.formula(), Some("=F33+0"));
    }

    #[test]
    fn test_totals_and_balance_check() {
        let (sheet, anchors) = build();
        assert_eq!(sheet.cell_a1("E14").unwrap().value.formula(), Some("=SUM(E10:E13)"));
        assert_eq!(sheet.cell_a1("F38").unwrap().value.formula(), Some("=F35+F37"));
        assert_eq!(
            sheet.cell_a1("E40").unwrap().value.formula(),
            Some("=IF(ROUND(E21-E38,0)=0,\"Balanced\",\"Not balanced\")")
        );
        assert_eq!(anchors.get(Anchor::TotalAssets, Period::Prior).unwrap().addr.a1(), "F21");
        assert_eq!(anchors.get(Anchor::Payables, Period::Current).unwrap().addr.a1(), "E25");
    }

    #[test]
    fn test_note_links() {
        let (sheet, _) = build();
        let link = |a1: &str| sheet.cell_a1(a1).and_then(|c| c.link.clone()).map(|l| l.sheet);
        assert_eq!(link("D12").as_deref(), Some(INVENTORY_NOTE));
        assert_eq!(link("D17").as_deref(), Some(FIXED_ASSETS));
        assert_eq!(link("D28").as_deref(), Some("16"));
        assert!(link("D14").is_none());
    }
}
