use super::{back_link, SheetContext, FINANCIAL_POSITION, PERCENT};
use crate::core::anchors::{Anchor, Period};
use crate::core::assumptions::AssumptionCategory;
use crate::error::BookResult;
use crate::types::{col, Sheet};

const CATEGORY_COLOR: u32 = 0x000080;

/// Category blocks with one assumption per row, current year in B and prior in C
pub fn populate(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    ctx.start(
        sheet,
        "Financial model assumptions (profitability scenario)",
        "",
        None,
        &[(col::A, 40.0), (col::B, 18.0), (col::C, 18.0)],
    );

    let current = format!("Value ({})", ctx.year(Period::Current));
    let prior = format!("Value ({})", ctx.year(Period::Prior));
    sheet.write(4, col::A, "Assumption").bold();
    sheet.write(4, col::B, current).bold();
    sheet.write(4, col::C, prior).bold();

    let mut row = 5;
    for category in AssumptionCategory::ALL {
        sheet.write(row, col::A, category.title()).bold().color(CATEGORY_COLOR);
        row += 1;

        for assumption in category.members() {
            let (current, prior) = assumption.values();
            sheet.write(row, col::A, assumption.description());
            let b = sheet.write(row, col::B, current);
            if assumption.is_rate() {
                b.number_format(PERCENT);
            }
            let c = sheet.write(row, col::C, prior);
            if assumption.is_rate() {
                c.number_format(PERCENT);
            }

            let anchor = Anchor::Assumption(assumption);
            ctx.mark(sheet, row, col::B, anchor, Period::Current);
            ctx.mark(sheet, row, col::C, anchor, Period::Prior);
            row += 1;
        }
        row += 1;
    }

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}
