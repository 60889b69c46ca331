use super::{back_link, SheetContext, FINANCIAL_POSITION};
use crate::core::anchors::{Anchor, Period};
use crate::error::BookResult;
use crate::types::{col, column_letter, Sheet};

pub struct InventoryItem {
    pub name: &'static str,
    pub unit: &'static str,
    /// Opening, receipts, issues for the current year
    pub current: [u64; 3],
    /// Opening, receipts, issues for the prior year
    pub prior: [u64; 3],
    /// Average unit price in rials
    pub unit_price: u64,
}

pub const ITEMS: [InventoryItem; 5] = [
    InventoryItem {
        name: "Day-old chicks",
        unit: "Head",
        current: [800_000, 4_500_000, 4_300_000],
        prior: [600_000, 3_800_000, 3_400_000],
        unit_price: 150,
    },
    InventoryItem {
        name: "Feed",
        unit: "Kilogram",
        current: [8_000_000, 25_000_000, 24_000_000],
        prior: [6_000_000, 22_000_000, 20_000_000],
        unit_price: 390,
    },
    InventoryItem {
        name: "Growing birds",
        unit: "Head",
        current: [200_000, 900_000, 850_000],
        prior: [150_000, 750_000, 700_000],
        unit_price: 3_600,
    },
    InventoryItem {
        name: "Medicine and vaccines",
        unit: "Pack",
        current: [10_000, 40_000, 38_000],
        prior: [8_000, 30_000, 28_000],
        unit_price: 25,
    },
    InventoryItem {
        name: "Market-ready broilers",
        unit: "Kilogram",
        current: [50_000, 900_000, 880_000],
        prior: [40_000, 750_000, 720_000],
        unit_price: 140,
    },
];

const QTY_HEADER_ROW: u32 = 7;
const QTY_FIRST_ROW: u32 = 8;
const VALUE_HEADER_ROW: u32 = 17;
pub const VALUE_FIRST_ROW: u32 = 18;
pub const TOTAL_ROW: u32 = 27;
const OUTPUT_ROW: u32 = 29;

/// Quantity ledger, value ledger in million rials, totals and outputs.
/// Current year runs through columns D..G, prior year through H..K.
pub fn populate(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let mut widths = vec![(col::A, 5.0), (col::B, 20.0), (col::C, 10.0)];
    widths.extend((col::D..=col::L).map(|c| (c, 15.0)));
    let period = ctx.both_years_line();
    ctx.start(
        sheet,
        "Detailed inventory ledger (quantity and value)",
        &period,
        Some("(Unit prices in rials, values in millions of rials)"),
        &widths,
    );

    let cur = ctx.year(Period::Current);
    let prior = ctx.year(Period::Prior);

    sheet.write(QTY_HEADER_ROW, col::A, "No.").bold();
    sheet.write(QTY_HEADER_ROW, col::B, "Item").bold();
    sheet.write(QTY_HEADER_ROW, col::C, "Unit").bold();
    for (c, year) in [(col::D, cur), (col::H, prior)] {
        sheet.write(QTY_HEADER_ROW, c, format!("Opening {} (qty)", year)).bold();
        sheet.write(QTY_HEADER_ROW, c + 1, format!("Receipts {} (qty)", year)).bold();
        sheet.write(QTY_HEADER_ROW, c + 2, format!("Issues {} (qty)", year)).bold();
        sheet.write(QTY_HEADER_ROW, c + 3, format!("Closing {} (qty)", year)).bold();
    }
    sheet.write(QTY_HEADER_ROW, col::L, "Average unit price (rials)").bold();

    for (i, item) in ITEMS.iter().enumerate() {
        let r = QTY_FIRST_ROW + i as u32;
        sheet.write(r, col::A, i as u32 + 1);
        sheet.write(r, col::B, item.name);
        sheet.write(r, col::C, item.unit);
        for (k, qty) in item.current.iter().enumerate() {
            sheet.write(r, col::D + k as u16, *qty);
        }
        sheet.write(r, col::G, format!("=D{r}+E{r}-F{r}"));
        for (k, qty) in item.prior.iter().enumerate() {
            sheet.write(r, col::H + k as u16, *qty);
        }
        sheet.write(r, col::K, format!("=H{r}+I{r}-J{r}"));
        sheet.write(r, col::L, item.unit_price);
    }

    sheet.write(VALUE_HEADER_ROW, col::B, "Values (million rials)").bold();
    for (c, year) in [(col::D, cur), (col::H, prior)] {
        sheet.write(VALUE_HEADER_ROW, c, format!("Opening {}", year)).bold();
        sheet.write(VALUE_HEADER_ROW, c + 1, format!("Receipts {}", year)).bold();
        sheet.write(VALUE_HEADER_ROW, c + 2, format!("Issues (cost of sales) {}", year)).bold();
        sheet.write(VALUE_HEADER_ROW, c + 3, format!("Closing {}", year)).bold();
    }

    for i in 0..ITEMS.len() {
        let q = QTY_FIRST_ROW + i as u32;
        let r = VALUE_FIRST_ROW + i as u32;
        sheet.write(r, col::A, format!("=A{q}"));
        sheet.write(r, col::B, format!("=B{q}"));
        sheet.write(r, col::C, "M.R.");
        for c in col::D..=col::K {
            let letter = column_letter(c);
            sheet.write(r, c, format!("=ROUND({letter}{q}*L{q}/1000000,0)"));
        }

        let item = i as u8 + 1;
        ctx.mark(sheet, r, col::G, Anchor::InventoryItemClosing(item), Period::Current);
        ctx.mark(sheet, r, col::K, Anchor::InventoryItemClosing(item), Period::Prior);
    }

    let last_value_row = VALUE_FIRST_ROW + ITEMS.len() as u32 - 1;
    sheet.write(TOTAL_ROW, col::B, "Total (million rials)").bold();
    for c in col::D..=col::K {
        let letter = column_letter(c);
        sheet
            .write(
                TOTAL_ROW,
                c,
                format!("=SUM({letter}{}:{letter}{})", VALUE_FIRST_ROW, last_value_row),
            )
            .bold();
    }

    let ledger = [
        (Anchor::InventoryOpening, col::D, col::H),
        (Anchor::InventoryPurchases, col::E, col::I),
        (Anchor::InventoryCogs, col::F, col::J),
        (Anchor::InventoryClosing, col::G, col::K),
    ];
    for (anchor, current_col, prior_col) in ledger {
        ctx.mark(sheet, TOTAL_ROW, current_col, anchor, Period::Current);
        ctx.mark(sheet, TOTAL_ROW, prior_col, anchor, Period::Prior);
    }

    sheet.write(OUTPUT_ROW, col::B, "Outputs for other sheets").bold();
    let outputs = [
        (format!("Cost of goods sold {} (profit and loss)", cur), "F"),
        (format!("Cost of goods sold {} (profit and loss)", prior), "J"),
        (format!("Closing inventory {} (financial position)", cur), "G"),
        (format!("Closing inventory {} (financial position)", prior), "K"),
    ];
    for (offset, (label, letter)) in outputs.into_iter().enumerate() {
        let r = OUTPUT_ROW + 1 + offset as u32;
        sheet.write(r, col::B, label);
        sheet.write(r, col::F, format!("={letter}{TOTAL_ROW}")).bold();
    }

    back_link(sheet, FINANCIAL_POSITION);
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
        let mut sheet = Sheet::new("Inventory Detail");
        populate(&mut SheetContext::new(&config, &mut anchors), &mut sheet).unwrap();
        (sheet, anchors)
    }

    #[test]
    fn test_quantity_and_value_formulas() {
        let (sheet, _) = build();
        assert_eq!(sheet.cell_a1("G8").unwrap().value.formula(), Some("=D8+E8-F8"));
        assert_eq!(sheet.cell_a1("K12").unwrap().value.formula(), Some("=H12+I12-J12"));
        assert_eq!(
            sheet.cell_a1("F19").unwrap().value.formula(),
            Some("=ROUND(F9*L9/1000000,0)")
        );
        assert_eq!(sheet.cell_a1("A18").unwrap().value.formula(), Some("=A8"));
    }

    #[test]
    fn test_totals_and_outputs() {
        let (sheet, _) = build();
        assert_eq!(sheet.cell_a1("F27").unwrap().value.formula(), Some("=SUM(F18:F22)"));
        assert_eq!(sheet.cell_a1("F30").unwrap().value.formula(), Some("=F27"));
        assert_eq!(sheet.cell_a1("F33").unwrap().value.formula(), Some("=K27"));
    }

    #[test]
    fn test_ledger_anchors() {
        let (_, mut anchors) = build();
        assert_eq!(
            anchors.reference(Anchor::InventoryCogs, Period::Current).unwrap(),
            "'Inventory Detail'!F27"
        );
        assert_eq!(
            anchors.reference(Anchor::InventoryClosing, Period::Prior).unwrap(),
            "'Inventory Detail'!K27"
        );
        assert_eq!(
            anchors
                .reference(Anchor::InventoryItemClosing(5), Period::Current)
                .unwrap(),
            "'Inventory Detail'!G22"
        );
    }
}
