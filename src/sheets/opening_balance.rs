use super::{back_link, SheetContext, FINANCIAL_POSITION, MILLION_RIALS};
use crate::core::anchors::Anchor;
use crate::error::BookResult;
use crate::types::{col, Cell, Sheet};

/// Fill for the balance check cell
const CHECK_FILL: u32 = 0xFFCCCC;

enum Line {
    Heading(u32, &'static str),
    Item(u32, &'static str, &'static str),
    Total(u32, &'static str, &'static str),
}

const LAYOUT: [Line; 34] = [
    Line::Heading(8, "Assets"),
    Line::Heading(9, "Current assets"),
    Line::Item(10, "Cash and cash equivalents", "800000"),
    Line::Item(11, "Trade and notes receivable", "515068"),
    Line::Item(12, "Inventories", "200000"),
    Line::Item(13, "Prepayments and other current assets", "50000"),
    Line::Total(14, "Total current assets", "=SUM(D10:D13)"),
    Line::Heading(16, "Non-current assets"),
    Line::Item(17, "Gross cost of property, plant and equipment", "3000000"),
    Line::Item(18, "Less: accumulated depreciation", "300000"),
    Line::Item(19, "Property, plant and equipment (net book value)", "=D17-D18"),
    Line::Item(20, "Other non-current assets", "120000"),
    Line::Total(21, "Total non-current assets", "=SUM(D19:D20)"),
    Line::Total(23, "Total assets", "=D14+D21"),
    Line::Heading(25, "Liabilities and equity"),
    Line::Heading(26, "Current liabilities"),
    Line::Item(27, "Trade and notes payable", "380000"),
    Line::Item(28, "Income tax payable", "25000"),
    Line::Item(29, "Dividends payable", "75000"),
    Line::Item(30, "Current portion of long-term borrowings", "60000"),
    Line::Total(31, "Total current liabilities", "=SUM(D27:D30)"),
    Line::Heading(33, "Non-current liabilities"),
    Line::Item(34, "Long-term borrowings", "700000"),
    Line::Item(35, "Employee end-of-service benefits", "150000"),
    Line::Total(36, "Total non-current liabilities", "=SUM(D34:D35)"),
    Line::Total(37, "Total liabilities", "=D31+D36"),
    Line::Heading(39, "Equity"),
    Line::Item(40, "Share capital", "1000000"),
    Line::Item(41, "Legal reserve", "120000"),
    Line::Item(42, "Other reserves", "60000"),
    // Plug: assets less liabilities less capital and reserves
    Line::Item(43, "Retained earnings", "=D23-D37-D40-D41-D42"),
    Line::Total(44, "Total equity", "=SUM(D40:D43)"),
    Line::Total(46, "Total liabilities and equity", "=D37+D44"),
    Line::Total(48, "Balance check (must be zero)", "=D23-D46"),
];

const ANCHORS: [(Anchor, u32); 17] = [
    (Anchor::OpeningCash, 10),
    (Anchor::OpeningReceivables, 11),
    (Anchor::OpeningInventory, 12),
    (Anchor::OpeningPrepayments, 13),
    (Anchor::OpeningAssetCost, 17),
    (Anchor::OpeningAccumulatedDepreciation, 18),
    (Anchor::OpeningOtherNonCurrent, 20),
    (Anchor::OpeningPayables, 27),
    (Anchor::OpeningTaxPayable, 28),
    (Anchor::OpeningDividendsPayable, 29),
    (Anchor::OpeningCurrentDebt, 30),
    (Anchor::OpeningLongTermDebt, 34),
    (Anchor::OpeningEndOfService, 35),
    (Anchor::OpeningShareCapital, 40),
    (Anchor::OpeningLegalReserve, 41),
    (Anchor::OpeningOtherReserves, 42),
    (Anchor::OpeningRetainedEarnings, 43),
];

/// Balanced opening position of the prior year. Everything is in column D.
pub fn populate(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let date_line = format!(
        "As at {} {} (opening of {})",
        ctx.config.year_end,
        ctx.config.prior_year() - 1,
        ctx.config.prior_year()
    );
    ctx.start(
        sheet,
        "Opening statement of financial position",
        &date_line,
        Some(MILLION_RIALS),
        &[(col::A, 5.0), (col::B, 40.0), (col::C, 45.0), (col::D, 18.0)],
    );

    for line in LAYOUT.iter() {
        match *line {
            Line::Heading(row, label) => {
                sheet.write(row, col::B, label).bold();
            }
            Line::Item(row, label, value) => {
                sheet.write(row, col::C, label);
                write_amount(sheet, row, value);
            }
            Line::Total(row, label, value) => {
                sheet.write(row, col::B, label).bold();
                write_amount(sheet, row, value).bold();
            }
        }
    }
    if let Some(check) = sheet.cell_mut(48, col::D) {
        check.fill(CHECK_FILL);
    }

    for (anchor, row) in ANCHORS {
        ctx.anchors.set_single(anchor, sheet.name(), row, col::D);
    }

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}

fn write_amount<'s>(sheet: &'s mut Sheet, row: u32, value: &str) -> &'s mut Cell {
    match value.parse::<f64>() {
        Ok(number) => sheet.write(row, col::D, number),
        Err(_) => sheet.write(row, col::D, value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::core::anchors::AnchorRegistry;
    use crate::types::CellValue;

    fn build() -> (Sheet, AnchorRegistry) {
        let config = ReportConfig::default();
        let mut anchors = AnchorRegistry::new();
        let mut sheet = Sheet::new("Opening Balance");
        populate(&mut SheetContext::new(&config, &mut anchors), &mut sheet).unwrap();
        (sheet, anchors)
    }

    #[test]
    fn test_retained_earnings_is_the_plug() {
        let (sheet, _) = build();
        assert_eq!(
            sheet.cell_a1("D43").unwrap().value.formula(),
            Some("=D23-D37-D40-D41-D42")
        );
        let check = sheet.cell_a1("D48").unwrap();
        assert_eq!(check.value.formula(), Some("=D23-D46"));
        assert_eq!(check.style.fill, Some(CHECK_FILL));
        assert!(check.style.bold);
    }

    #[test]
    fn test_literal_values() {
        let (sheet, _) = build();
        assert_eq!(sheet.cell_a1("D10").unwrap().value, CellValue::Number(800_000.0));
        assert_eq!(sheet.cell_a1("D34").unwrap().value, CellValue::Number(700_000.0));
        assert_eq!(sheet.cell_a1("D19").unwrap().value.formula(), Some("=D17-D18"));
    }

    #[test]
    fn test_opening_anchors() {
        let (_, mut anchors) = build();
        assert_eq!(anchors.len(), ANCHORS.len());
        assert_eq!(
            anchors.single(Anchor::OpeningEndOfService).unwrap(),
            "'Opening Balance'!D35"
        );
    }

    #[test]
    fn test_header_dates() {
        let (sheet, _) = build();
        assert_eq!(
            sheet.cell_a1("A3").unwrap().value,
            CellValue::Text("As at 29 Esfand 1401 (opening of 1402)".to_string())
        );
    }
}
