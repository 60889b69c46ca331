use super::inventory::ITEMS;
use super::{back_link, SheetContext, FINANCIAL_POSITION, INVENTORY_DETAIL, MILLION_RIALS};
use crate::core::anchors::{Anchor, Period};
use crate::error::BookResult;
use crate::types::{col, Sheet};

/// Highlight for the reconciliation difference, which should read zero
const DIFFERENCE_FILL: u32 = 0xFFFF00;

const COMPOSITION_ROW: u32 = 10;
const RECONCILIATION_ROW: u32 = 19;

/// Inventory note: closing balance per item for both years, then the current
/// year's opening + purchases - cost of sales - closing reconciliation.
pub fn populate(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let date_line = format!(
        "As at {} {} and {}",
        ctx.config.year_end,
        ctx.config.current_year,
        ctx.config.prior_year()
    );
    ctx.start(
        sheet,
        "Note: Inventories (summary)",
        &date_line,
        Some(MILLION_RIALS),
        &[
            (col::A, 5.0),
            (col::B, 35.0),
            (col::C, 25.0),
            (col::D, 12.0),
            (col::E, 18.0),
            (col::F, 18.0),
            (col::G, 18.0),
        ],
    );

    sheet.write(7, col::E, "Note").bold();
    sheet.write(7, col::F, ctx.year(Period::Current).to_string()).bold();
    sheet.write(7, col::G, ctx.year(Period::Prior).to_string()).bold();
    sheet.write(8, col::F, "Million rials");
    sheet.write(8, col::G, "Million rials");

    sheet.write(9, col::A, "Composition of inventories:").bold();
    for (i, item) in ITEMS.iter().enumerate() {
        let row = COMPOSITION_ROW + i as u32;
        let anchor = Anchor::InventoryItemClosing(i as u8 + 1);
        sheet.write(row, col::B, item.name).wrap();
        sheet.write(row, col::F, format!("={}", ctx.refer(anchor, Period::Current)?));
        sheet.write(row, col::G, format!("={}", ctx.refer(anchor, Period::Prior)?));
    }

    let total_row = COMPOSITION_ROW + ITEMS.len() as u32;
    sheet
        .link(total_row, col::B, "Total inventories (closing)", INVENTORY_DETAIL)
        .bold();
    sheet
        .write(total_row, col::F, format!("={}", ctx.refer(Anchor::InventoryClosing, Period::Current)?))
        .bold();
    sheet
        .write(total_row, col::G, format!("={}", ctx.refer(Anchor::InventoryClosing, Period::Prior)?))
        .bold();

    let first = RECONCILIATION_ROW;
    sheet
        .write(
            first - 1,
            col::A,
            format!("Inventory reconciliation ({}):", ctx.year(Period::Current)),
        )
        .bold();
    let lines = [
        ("Opening inventory", Anchor::InventoryOpening),
        ("Purchases and direct rearing costs", Anchor::InventoryPurchases),
        ("Cost of goods sold", Anchor::InventoryCogs),
        ("Closing inventory", Anchor::InventoryClosing),
    ];
    for (i, (label, anchor)) in lines.into_iter().enumerate() {
        let row = first + i as u32;
        sheet.write(row, col::B, label).wrap();
        sheet.write(row, col::C, format!("={}", ctx.refer(anchor, Period::Current)?));
    }

    let difference = first + lines.len() as u32;
    sheet.write(difference, col::B, "Difference (surplus / shortage)").wrap();
    sheet
        .write(
            difference,
            col::C,
            format!("=C{}+C{}-C{}-C{}", first, first + 1, first + 2, first + 3),
        )
        .bold()
        .fill(DIFFERENCE_FILL);

    sheet.write(difference + 2, col::A, "Valuation method:").bold();
    sheet
        .write(
            difference + 3,
            col::B,
            "Inventories are valued on the weighted average cost method and measured \
             at the lower of cost and net realisable value.",
        )
        .wrap();

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}
