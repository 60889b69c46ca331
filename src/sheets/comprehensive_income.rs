use super::{back_link, SheetContext, MILLION_RIALS, PROFIT_AND_LOSS};
use crate::core::anchors::{Anchor, Period};
use crate::error::BookResult;
use crate::types::{col, Sheet};

/// Foreign operations translation adjustment, net of tax
const TRANSLATION_ADJUSTMENT: [(Period, f64); 2] =
    [(Period::Current, 10_000.0), (Period::Prior, 5_000.0)];

pub fn populate(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let period = ctx.both_years_line();
    ctx.start(
        sheet,
        "Statement of comprehensive income",
        &period,
        Some(MILLION_RIALS),
        &[(col::A, 5.0), (col::B, 40.0), (col::C, 18.0), (col::D, 18.0)],
    );

    sheet.write(9, col::B, "Net profit for the year");
    sheet.write(11, col::B, "Other comprehensive income:").italic();
    sheet.write(12, col::B, "Exchange differences on translating foreign operations (net of tax)").wrap();
    sheet.write(14, col::B, "Total comprehensive income for the year").bold();

    for (period, adjustment) in TRANSLATION_ADJUSTMENT {
        let c = match period {
            Period::Current => col::C,
            Period::Prior => col::D,
        };
        let l = crate::types::column_letter(c);
        sheet.write(7, c, ctx.year(period).to_string()).bold();
        sheet.write(9, c, format!("={}", ctx.refer(Anchor::NetProfit, period)?));
        sheet.write(12, c, adjustment);
        sheet.write(14, c, format!("={l}9+{l}12")).bold();
    }

    back_link(sheet, PROFIT_AND_LOSS);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::core::anchors::AnchorRegistry;

    #[test]
    fn test_total_adds_other_comprehensive_income() {
        let config = ReportConfig::default();
        let mut anchors = AnchorRegistry::new();
        anchors.set(Anchor::NetProfit, Period::Current, "Profit and Loss", 21, col::F);
        anchors.set(Anchor::NetProfit, Period::Prior, "Profit and Loss", 21, col::G);

        let mut sheet = Sheet::new("Comprehensive Income");
        populate(&mut SheetContext::new(&config, &mut anchors), &mut sheet).unwrap();

        assert_eq!(sheet.cell_a1("C9").unwrap().value.formula(), Some("='Profit and Loss'!F21"));
        assert_eq!(sheet.cell_a1("D9").unwrap().value.formula(), Some("='Profit and Loss'!G21"));
        assert_eq!(sheet.cell_a1("C14").unwrap().value.formula(), Some("=C9+C12"));
        assert_eq!(sheet.cell_a1("D14").unwrap().value.formula(), Some("=D9+D12"));
    }
}
