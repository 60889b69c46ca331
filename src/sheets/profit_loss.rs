use super::{back_link, SheetContext, FINANCIAL_POSITION, MILLION_RIALS};
use crate::core::anchors::{Anchor, Period};
use crate::core::assumptions::Assumption;
use crate::error::BookResult;
use crate::types::{col, column_letter, Sheet};

/// Prior-year operating revenue, the base the growth assumption applies to
pub const BASE_REVENUE: f64 = 2_100_000.0;

const LINES: [(u32, &str, Option<&str>, Option<Anchor>); 11] = [
    (8, "Operating revenue", Some("5"), Some(Anchor::Revenue)),
    (9, "Cost of operating revenue", Some("9"), Some(Anchor::CostOfSales)),
    (10, "Gross profit", None, Some(Anchor::GrossProfit)),
    (12, "Selling, general and administrative expenses", Some("8"), None),
    (13, "Other income", Some("26.27"), None),
    (14, "Other expenses", Some("26.27"), None),
    (15, "Operating profit", None, Some(Anchor::OperatingProfit)),
    (17, "Finance costs", Some("26.27"), None),
    (18, "Profit before tax", None, None),
    (20, "Income tax", Some("34"), Some(Anchor::IncomeTax)),
    (21, "Net profit", None, Some(Anchor::NetProfit)),
];

/// Income statement, current year in F and prior year in G
pub fn populate(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let period = ctx.both_years_line();
    ctx.start(
        sheet,
        "Statement of profit or loss",
        &period,
        Some(MILLION_RIALS),
        &[
            (col::A, 5.0),
            (col::B, 40.0),
            (col::C, 12.0),
            (col::D, 18.0),
            (col::E, 10.0),
            (col::F, 18.0),
            (col::G, 18.0),
        ],
    );

    sheet.write(7, col::E, "Note").bold();
    sheet.write(7, col::F, format!("Year {}", ctx.year(Period::Current))).bold();
    sheet.write(7, col::G, format!("Year {}", ctx.year(Period::Prior))).bold();

    let growth = ctx.refer(Anchor::Assumption(Assumption::RevenueGrowth), Period::Current)?;
    sheet.write(8, col::F, format!("=G8*(1+{})", growth));
    sheet.write(8, col::G, BASE_REVENUE);

    for (period, c) in [(Period::Current, col::F), (Period::Prior, col::G)] {
        let l = column_letter(c);
        let cost_of_sales = ctx.refer(Anchor::CostOfSalesTotal, period)?;
        let sga = ctx.refer(Anchor::SgaTotal, period)?;
        let finance = ctx.refer(Anchor::Assumption(Assumption::FinanceCost), period)?;
        let tax_rate = ctx.refer(Anchor::Assumption(Assumption::IncomeTaxRate), period)?;
        let (other_income, other_expense) = match period {
            Period::Current => (150_000.0, -10_000.0),
            Period::Prior => (120_000.0, -30_000.0),
        };

        sheet.write(9, c, format!("=-{}", cost_of_sales));
        sheet.write(10, c, format!("=SUM({l}8:{l}9)"));
        sheet.write(12, c, format!("=-{}", sga));
        sheet.write(13, c, other_income);
        sheet.write(14, c, other_expense);
        sheet.write(15, c, format!("=SUM({l}10,{l}12:{l}14)"));
        sheet.write(17, c, format!("=-{}", finance));
        sheet.write(18, c, format!("=SUM({l}15,{l}17)"));
        sheet.write(20, c, format!("=IF({l}18>0,{l}18*(-{}),0)", tax_rate));
        sheet.write(21, c, format!("={l}18+{l}20"));
    }

    for (row, label, note, anchor) in LINES {
        let profit_line = label.to_lowercase().contains("profit");
        let cell = sheet.write(row, col::B, label);
        if profit_line {
            cell.bold();
            for c in [col::F, col::G] {
                if let Some(amount) = sheet.cell_mut(row, c) {
                    amount.bold();
                }
            }
        }
        if let Some(note) = note {
            sheet.link(row, col::E, note, note);
        }
        if let Some(anchor) = anchor {
            ctx.mark(sheet, row, col::F, anchor, Period::Current);
            ctx.mark(sheet, row, col::G, anchor, Period::Prior);
        }
    }

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}
