//! Notes 9 (cost of sales) and 8 (selling, general and administrative
//! expenses). Both feed the profit and loss statement.

use super::{back_link, SheetContext, MILLION_RIALS, PROFIT_AND_LOSS};
use crate::core::anchors::{Anchor, Period};
use crate::error::BookResult;
use crate::types::{col, Sheet};

/// Share of depreciation charged to production; the rest is administrative
const PRODUCTION_DEPRECIATION_SHARE: f64 = 0.8;
const ADMIN_DEPRECIATION_SHARE: f64 = 0.2;

enum Amount {
    Fixed(f64, f64),
    /// Another anchor times a factor, for both years
    Scaled(Anchor, f64),
}

fn write_line(
    ctx: &mut SheetContext,
    sheet: &mut Sheet,
    row: u32,
    label: &str,
    amount: Amount,
) -> BookResult<()> {
    sheet.write(row, col::B, label);
    match amount {
        Amount::Fixed(current, prior) => {
            sheet.write(row, col::C, current);
            sheet.write(row, col::D, prior);
        }
        Amount::Scaled(anchor, factor) => {
            for (period, c) in [(Period::Current, col::C), (Period::Prior, col::D)] {
                let source = ctx.refer(anchor, period)?;
                let formula = if factor == 1.0 {
                    format!("={}", source)
                } else {
                    format!("={}*{}", source, factor)
                };
                sheet.write(row, c, formula);
            }
        }
    }
    Ok(())
}

fn column_headers(ctx: &SheetContext, sheet: &mut Sheet) {
    sheet.write(7, col::B, "Description").bold();
    sheet.write(7, col::C, ctx.year(Period::Current).to_string()).bold();
    sheet.write(7, col::D, ctx.year(Period::Prior).to_string()).bold();
}

fn mark_both(ctx: &mut SheetContext, sheet: &Sheet, row: u32, anchor: Anchor) {
    ctx.mark(sheet, row, col::C, anchor, Period::Current);
    ctx.mark(sheet, row, col::D, anchor, Period::Prior);
}

const WIDTHS: [(u16, f64); 4] = [(col::A, 5.0), (col::B, 45.0), (col::C, 18.0), (col::D, 18.0)];

/// Note 9: cost of sales, total on row 12
pub fn populate_cost_of_sales(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let period = ctx.both_years_line();
    ctx.start(sheet, "Note 9: Cost of sales", &period, Some(MILLION_RIALS), &WIDTHS);
    column_headers(ctx, sheet);

    write_line(
        ctx,
        sheet,
        8,
        "Cost of goods sold (inventory ledger)",
        Amount::Scaled(Anchor::InventoryCogs, 1.0),
    )?;
    write_line(ctx, sheet, 9, "Direct production wages", Amount::Fixed(450_000.0, 400_000.0))?;
    write_line(
        ctx,
        sheet,
        10,
        "Depreciation of production assets (80%)",
        Amount::Scaled(Anchor::Depreciation, PRODUCTION_DEPRECIATION_SHARE),
    )?;
    write_line(
        ctx,
        sheet,
        11,
        "Other direct production costs (overhead)",
        Amount::Fixed(50_000.0, 45_000.0),
    )?;

    sheet.write(12, col::B, "Total cost of sales").bold();
    sheet.write(12, col::C, "=SUM(C8:C11)").bold();
    sheet.write(12, col::D, "=SUM(D8:D11)").bold();
    mark_both(ctx, sheet, 12, Anchor::CostOfSalesTotal);

    back_link(sheet, PROFIT_AND_LOSS);
    Ok(())
}

/// Note 8: selling block, administrative block, grand total on row 19
pub fn populate_sga(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let period = ctx.both_years_line();
    ctx.start(
        sheet,
        "Note 8: Selling, general and administrative expenses",
        &period,
        Some(MILLION_RIALS),
        &WIDTHS,
    );
    column_headers(ctx, sheet);

    sheet.write(8, col::B, "a) Selling and distribution expenses:").bold();
    write_line(ctx, sheet, 9, "Sales personnel costs", Amount::Fixed(250_000.0, 220_000.0))?;
    mark_both(ctx, sheet, 9, Anchor::SellingPersonnel);
    write_line(ctx, sheet, 10, "Advertising and marketing", Amount::Fixed(50_000.0, 40_000.0))?;
    sheet.write(11, col::B, "Total selling expenses").bold();
    sheet.write(11, col::C, "=SUM(C9:C10)").bold();
    sheet.write(11, col::D, "=SUM(D9:D10)").bold();

    sheet.write(12, col::B, "b) General and administrative expenses:").bold();
    write_line(
        ctx,
        sheet,
        13,
        "Administrative personnel costs",
        Amount::Fixed(350_000.0, 320_000.0),
    )?;
    mark_both(ctx, sheet, 13, Anchor::AdminPersonnel);
    write_line(
        ctx,
        sheet,
        14,
        "Depreciation of administrative assets (20%)",
        Amount::Scaled(Anchor::Depreciation, ADMIN_DEPRECIATION_SHARE),
    )?;
    mark_both(ctx, sheet, 14, Anchor::AdminDepreciation);
    write_line(
        ctx,
        sheet,
        15,
        "Provision for employee end-of-service benefits",
        Amount::Fixed(80_000.0, 75_000.0),
    )?;
    mark_both(ctx, sheet, 15, Anchor::EndOfServiceExpense);
    write_line(ctx, sheet, 16, "Other administrative expenses", Amount::Fixed(30_000.0, 25_000.0))?;
    sheet.write(17, col::B, "Total administrative expenses").bold();
    sheet.write(17, col::C, "=SUM(C13:C16)").bold();
    sheet.write(17, col::D, "=SUM(D13:D16)").bold();

    sheet
        .write(19, col::B, "Total selling, general and administrative expenses")
        .bold();
    sheet.write(19, col::C, "=C11+C17").bold();
    sheet.write(19, col::D, "=D11+D17").bold();
    mark_both(ctx, sheet, 19, Anchor::SgaTotal);

    back_link(sheet, PROFIT_AND_LOSS);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::core::anchors::AnchorRegistry;

    #[test]
    fn test_cost_of_sales_total_row() {
        let config = ReportConfig::default();
        let mut anchors = AnchorRegistry::new();
        anchors.set(Anchor::InventoryCogs, Period::Current, "Inventory Detail", 27, col::F);
        anchors.set(Anchor::InventoryCogs, Period::Prior, "Inventory Detail", 27, col::J);
        anchors.set(Anchor::Depreciation, Period::Current, "Fixed Asset Roll-forward", 15, col::D);
        anchors.set(Anchor::Depreciation, Period::Prior, "Fixed Asset Roll-forward", 10, col::D);

        let mut sheet = Sheet::new("9");
        populate_cost_of_sales(&mut SheetContext::new(&config, &mut anchors), &mut sheet).unwrap();

        assert_eq!(
            sheet.cell_a1("C8").unwrap().value.formula(),
            Some("='Inventory Detail'!F27")
        );
        assert_eq!(
            sheet.cell_a1("D10").unwrap().value.formula(),
            Some("='Fixed Asset Roll-forward'!D10*0.8")
        );
        assert_eq!(sheet.cell_a1("C12").unwrap().value.formula(), Some("=SUM(C8:C11)"));
        assert_eq!(anchors.get(Anchor::CostOfSalesTotal, Period::Current).unwrap().addr.a1(), "C12");
    }

    #[test]
    fn test_sga_forward_reference_is_pending_when_lenient() {
        let config = ReportConfig::default();
        let mut anchors = AnchorRegistry::new();
        anchors.set_lenient(true);

        let mut sheet = Sheet::new("8");
        populate_sga(&mut SheetContext::new(&config, &mut anchors), &mut sheet).unwrap();

        assert_eq!(sheet.cell_a1("C14").unwrap().value.formula(), Some("=0*0.2"));
        assert!(anchors.pending().contains(&(Anchor::Depreciation, Period::Current)));
        assert_eq!(sheet.cell_a1("C19").unwrap().value.formula(), Some("=C11+C17"));
        assert_eq!(anchors.get(Anchor::SgaTotal, Period::Prior).unwrap().addr.a1(), "D19");
        assert_eq!(anchors.get(Anchor::EndOfServiceExpense, Period::Current).unwrap().addr.a1(), "C15");
    }

    #[test]
    fn test_strict_mode_rejects_missing_depreciation() {
        let config = ReportConfig::default();
        let mut anchors = AnchorRegistry::new();
        let mut sheet = Sheet::new("8");
        assert!(populate_sga(&mut SheetContext::new(&config, &mut anchors), &mut sheet).is_err());
    }
}
