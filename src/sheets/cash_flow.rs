//! Cash flow statement, indirect method
//!
//! Working-capital lines are the movement between the balance a year opens
//! with and the one it closes with on the financial position. Closing cash is
//! registered here and read back by the financial position.

use super::{back_link, SheetContext, FINANCIAL_POSITION, MILLION_RIALS};
use crate::core::anchors::{Anchor, Period};
use crate::core::assumptions::Assumption;
use crate::error::BookResult;
use crate::types::{col, column_letter, Sheet};

/// Whether a balance increase brings cash in (liabilities) or uses it (assets)
#[derive(Clone, Copy)]
enum Side {
    Asset,
    Liability,
}

const MOVEMENTS: [(u32, &str, Anchor, Anchor, Side); 6] = [
    (14, "(Increase) decrease in receivables", Anchor::Receivables, Anchor::OpeningReceivables, Side::Asset),
    (15, "(Increase) decrease in inventories", Anchor::Inventory, Anchor::OpeningInventory, Side::Asset),
    (16, "(Increase) decrease in prepayments", Anchor::Prepayments, Anchor::OpeningPrepayments, Side::Asset),
    (17, "Increase (decrease) in payables", Anchor::Payables, Anchor::OpeningPayables, Side::Liability),
    (18, "Increase (decrease) in income tax payable", Anchor::TaxPayable, Anchor::OpeningTaxPayable, Side::Liability),
    (23, "(Increase) decrease in other non-current assets", Anchor::OtherNonCurrentAssets, Anchor::OpeningOtherNonCurrent, Side::Asset),
];

const LABELS: [(u32, &str, bool); 16] = [
    (8, "Cash flows from operating activities", true),
    (9, "Net profit", false),
    (10, "Adjustments for non-cash items:", false),
    (11, "Depreciation", false),
    (12, "Employee end-of-service benefits expense", false),
    (13, "Changes in working capital:", false),
    (19, "Net cash from operating activities", true),
    (21, "Cash flows from investing activities", true),
    (22, "Purchase of property, plant and equipment (CAPEX)", false),
    (24, "Net cash used in investing activities", true),
    (26, "Cash flows from financing activities", true),
    (27, "Proceeds from borrowings", false),
    (28, "Repayment of borrowings", false),
    (29, "Dividends paid", false),
    (31, "Net cash from financing activities", true),
    (33, "Net increase (decrease) in cash", true),
];

pub fn populate(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let period = ctx.both_years_line();
    ctx.start(
        sheet,
        "Statement of cash flows",
        &period,
        Some(MILLION_RIALS),
        &[(col::A, 5.0), (col::B, 55.0), (col::C, 18.0), (col::D, 18.0)],
    );

    sheet.write(7, col::C, ctx.year(Period::Current).to_string()).bold();
    sheet.write(7, col::D, ctx.year(Period::Prior).to_string()).bold();

    for (row, label, bold) in LABELS {
        let cell = sheet.write(row, col::B, label);
        if bold {
            cell.bold();
        }
    }
    for (row, label, ..) in MOVEMENTS {
        sheet.write(row, col::B, label);
    }
    sheet.write(30, col::B, "Increase (decrease) in dividends payable");
    sheet.write(34, col::B, "Cash at the beginning of the year");
    sheet.write(35, col::B, "Cash at the end of the year").bold();

    for (period, c) in [(Period::Current, col::C), (Period::Prior, col::D)] {
        write_column(ctx, sheet, period, c)?;
    }

    for (row, note, target) in [(11, "12", "10.11.12"), (22, "12", "10.11.12"), (27, "19", "19"), (29, "18", "18")] {
        sheet.link(row, col::A, note, target);
    }

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}

/// The balance of `closing` at the start of `period`
fn opening_balance(
    ctx: &mut SheetContext,
    closing: Anchor,
    opening: Anchor,
    period: Period,
) -> BookResult<String> {
    match period {
        Period::Current => ctx.refer(closing, Period::Prior),
        Period::Prior => ctx.single(opening),
    }
}

fn write_column(ctx: &mut SheetContext, sheet: &mut Sheet, period: Period, c: u16) -> BookResult<()> {
    let l = column_letter(c);

    sheet.write(9, c, format!("={}", ctx.refer(Anchor::NetProfit, period)?));
    sheet.write(11, c, format!("={}", ctx.refer(Anchor::Depreciation, period)?));
    sheet.write(12, c, format!("={}", ctx.refer(Anchor::EndOfServiceExpense, period)?));

    for (row, _, balance, opening, side) in MOVEMENTS {
        let close = ctx.refer(balance, period)?;
        let open = opening_balance(ctx, balance, opening, period)?;
        let formula = match side {
            Side::Asset => format!("={}-{}", open, close),
            Side::Liability => format!("={}-{}", close, open),
        };
        sheet.write(row, c, formula);
    }

    sheet
        .write(19, c, format!("=SUM({l}9,{l}11,{l}12,{l}14:{l}18)"))
        .bold();

    let capex = ctx.refer(Anchor::Assumption(Assumption::Capex), period)?;
    sheet.write(22, c, format!("=-{}", capex));
    sheet.write(24, c, format!("=SUM({l}22:{l}23)")).bold();

    let borrowing = ctx.refer(Anchor::Assumption(Assumption::NewBorrowing), period)?;
    let repayment = ctx.refer(Anchor::Assumption(Assumption::LoanRepayment), period)?;
    let dividends = ctx.refer(Anchor::DividendsDeclared, period)?;
    let payable = ctx.refer(Anchor::DividendsPayable, period)?;
    let payable_open =
        opening_balance(ctx, Anchor::DividendsPayable, Anchor::OpeningDividendsPayable, period)?;
    sheet.write(27, c, format!("={}", borrowing));
    sheet.write(28, c, format!("=-{}", repayment));
    // Already negative on the equity statement
    sheet.write(29, c, format!("={}", dividends));
    sheet.write(30, c, format!("={}-{}", payable, payable_open));
    sheet.write(31, c, format!("=SUM({l}27:{l}30)")).bold();

    sheet.write(33, c, format!("={l}19+{l}24+{l}31")).bold();
    let opening_cash = opening_balance(ctx, Anchor::Cash, Anchor::OpeningCash, period)?;
    sheet.write(34, c, format!("={}", opening_cash));
    sheet.write(35, c, format!("={l}33+{l}34")).bold();

    ctx.mark(sheet, 35, c, Anchor::ClosingCash, period);
    Ok(())
}
