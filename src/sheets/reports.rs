//! Management reports built on top of the statements: a comparative KPI table
//! and a business analysis whose sentences are formulas over that table.

use super::{back_link, SheetContext, FINANCIAL_POSITION, MILLION_RIALS, PERCENT, RATIO};
use crate::core::anchors::{Anchor, Period};
use crate::error::BookResult;
use crate::types::{col, Sheet};

/// Excel rejects string literals longer than this inside a formula
pub const MAX_FORMULA_LITERAL: usize = 255;

const KPIS: [(u32, &str, Anchor); 6] = [
    (10, "Operating revenue", Anchor::Revenue),
    (11, "Gross profit", Anchor::GrossProfit),
    (12, "Operating profit", Anchor::OperatingProfit),
    (13, "Net profit", Anchor::NetProfit),
    (15, "Total assets", Anchor::TotalAssets),
    (16, "Total liabilities", Anchor::TotalLiabilities),
];

fn ratio(numerator: &str, denominator: &str) -> String {
    format!("=IFERROR({}/{},0)", numerator, denominator)
}

pub fn populate_comparative(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let period = ctx.both_years_line();
    ctx.start(
        sheet,
        "Comparative management report",
        &period,
        Some(MILLION_RIALS),
        &[(col::A, 5.0), (col::B, 30.0), (col::C, 18.0), (col::D, 18.0), (col::E, 18.0)],
    );

    sheet.write(7, col::C, ctx.year(Period::Current).to_string()).bold();
    sheet.write(7, col::D, ctx.year(Period::Prior).to_string()).bold();
    sheet.write(7, col::E, "% change").bold();

    sheet.write(9, col::A, "Key performance indicators:").bold();
    for (row, label, anchor) in KPIS {
        sheet.write(row, col::B, label);
        sheet.write(row, col::C, format!("={}", ctx.refer(anchor, Period::Current)?));
        sheet.write(row, col::D, format!("={}", ctx.refer(anchor, Period::Prior)?));
        sheet
            .write(row, col::E, format!("=IF(D{row}<>0,(C{row}-D{row})/D{row},\"N/A\")"))
            .number_format(PERCENT);
    }
    ctx.mark(sheet, 10, col::E, Anchor::RevenueChange, Period::Current);

    sheet.write(18, col::A, "Key financial ratios:").bold();
    sheet.write(19, col::B, "Current ratio");
    sheet.write(20, col::B, "Debt ratio");
    sheet.write(21, col::B, "Net profit margin");

    for (period, c) in [(Period::Current, col::C), (Period::Prior, col::D)] {
        let current_assets = ctx.refer(Anchor::CurrentAssets, period)?;
        let current_liabilities = ctx.refer(Anchor::CurrentLiabilities, period)?;
        let total_assets = ctx.refer(Anchor::TotalAssets, period)?;
        let total_liabilities = ctx.refer(Anchor::TotalLiabilities, period)?;
        let net_profit = ctx.refer(Anchor::NetProfit, period)?;
        let revenue = ctx.refer(Anchor::Revenue, period)?;

        sheet
            .write(19, c, ratio(&current_assets, &current_liabilities))
            .number_format(RATIO);
        sheet
            .write(20, c, ratio(&total_liabilities, &total_assets))
            .number_format(RATIO);
        sheet
            .write(21, c, ratio(&net_profit, &revenue))
            .number_format(PERCENT);

        ctx.mark(sheet, 19, c, Anchor::CurrentRatio, period);
        ctx.mark(sheet, 21, c, Anchor::NetMargin, period);
    }

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}

/// Fills for the four analysis paragraphs
const FILLS: [u32; 4] = [0xFFF2CC, 0xD9EAD3, 0xCCE0F5, 0xF2F2F2];

pub fn populate_business_analysis(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let period = ctx.current_year_line();
    ctx.start(
        sheet,
        "Business analysis report",
        &period,
        None,
        &[(col::A, 25.0), (col::B, 80.0)],
    );

    let year = ctx.year(Period::Current);
    let revenue_change = ctx.refer(Anchor::RevenueChange, Period::Current)?;
    let cost_current = ctx.refer(Anchor::CostOfSales, Period::Current)?;
    let cost_prior = ctx.refer(Anchor::CostOfSales, Period::Prior)?;
    let net_margin = ctx.refer(Anchor::NetMargin, Period::Current)?;
    let current_ratio = ctx.refer(Anchor::CurrentRatio, Period::Current)?;

    let paragraphs = [
        (
            "1. Operating performance:",
            format!(
                "=CONCATENATE(\"In {year} operating revenue changed by \",TEXT({revenue_change},\"0.00%\"),\
                 \" against the prior year, mainly from added production capacity and broiler demand. \
                 Cost of operating revenue changed by \",TEXT(IFERROR({cost_current}/{cost_prior}-1,0),\"0.00%\"),\
                 \", which calls for tighter cost control across the supply chain.\")"
            ),
        ),
        (
            "2. Profitability:",
            format!(
                "=CONCATENATE(\"The net profit margin for {year} reached \",TEXT({net_margin},\"0.00%\"),\
                 \", showing the company can manage direct production costs. General and administrative \
                 expenses also grew noticeably and should be reviewed.\")"
            ),
        ),
        (
            "3. Liquidity:",
            format!(
                "=CONCATENATE(\"Operating cash flows were positive, so the core business funds itself. \
                 The current ratio for {year} is \",TEXT({current_ratio},\"0.00\"),\
                 \", a comfortable position for meeting current obligations.\")"
            ),
        ),
        (
            "4. Recommendations:",
            "- Review general and administrative expenses for savings.\n\
             - Invest in farm technology to raise productivity and lower production cost.\n\
             - Develop new markets for the company's products."
                .to_string(),
        ),
    ];

    for (i, ((title, body), fill)) in paragraphs.into_iter().zip(FILLS).enumerate() {
        let row = 5 + 3 * i as u32;
        sheet.write(row, col::A, title).bold();
        sheet.write(row + 1, col::B, body).wrap().fill(fill);
    }

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::core::anchors::AnchorRegistry;
    use regex::Regex;

    fn registry() -> AnchorRegistry {
        let mut anchors = AnchorRegistry::new();
        let statement = [
            (Anchor::Revenue, "Profit and Loss", 8, col::F, col::G),
            (Anchor::CostOfSales, "Profit and Loss", 9, col::F, col::G),
            (Anchor::GrossProfit, "Profit and Loss", 10, col::F, col::G),
            (Anchor::OperatingProfit, "Profit and Loss", 15, col::F, col::G),
            (Anchor::NetProfit, "Profit and Loss", 21, col::F, col::G),
            (Anchor::CurrentAssets, "Financial Position", 14, col::E, col::F),
            (Anchor::TotalAssets, "Financial Position", 21, col::E, col::F),
            (Anchor::CurrentLiabilities, "Financial Position", 29, col::E, col::F),
            (Anchor::TotalLiabilities, "Financial Position", 35, col::E, col::F),
        ];
        for (anchor, sheet, row, current, prior) in statement {
            anchors.set(anchor, Period::Current, sheet, row, current);
            anchors.set(anchor, Period::Prior, sheet, row, prior);
        }
        anchors
    }

    #[test]
    fn test_comparative_kpis_and_ratios() {
        let config = ReportConfig::default();
        let mut anchors = registry();
        let mut sheet = Sheet::new("Comparative Report");
        populate_comparative(&mut SheetContext::new(&config, &mut anchors), &mut sheet).unwrap();

        assert_eq!(sheet.cell_a1("C10").unwrap().value.formula(), Some("='Profit and Loss'!F8"));
        let change = sheet.cell_a1("E16").unwrap();
        assert_eq!(change.value.formula(), Some("=IF(D16<>0,(C16-D16)/D16,\"N/A\")"));
        assert_eq!(change.style.number_format.as_deref(), Some("0.00%"));
        assert_eq!(
            sheet.cell_a1("D19").unwrap().value.formula(),
            Some("=IFERROR('Financial Position'!F14/'Financial Position'!F29,0)")
        );
        assert_eq!(anchors.get(Anchor::NetMargin, Period::Current).unwrap().addr.a1(), "C21");
        assert_eq!(anchors.get(Anchor::RevenueChange, Period::Current).unwrap().addr.a1(), "E10");
    }

    #[test]
    fn test_business_analysis_reads_the_comparative_report() {
        let config = ReportConfig::default();
        let mut anchors = registry();
        let mut ctx = SheetContext::new(&config, &mut anchors);
        let mut comparative = Sheet::new("Comparative Report");
        populate_comparative(&mut ctx, &mut comparative).unwrap();
        let mut sheet = Sheet::new("Business Analysis");
        populate_business_analysis(&mut ctx, &mut sheet).unwrap();

        let first = sheet.cell_a1("B6").unwrap();
        let formula = first.value.formula().unwrap();
        assert!(formula.starts_with("=CONCATENATE("));
        assert!(formula.contains("TEXT('Comparative Report'!E10,\"0.00%\")"));
        assert_eq!(first.style.fill, Some(0xFFF2CC));
        assert_eq!(sheet.cell_a1("B15").unwrap().style.fill, Some(0xF2F2F2));
        assert!(sheet.cell_a1("B15").unwrap().value.formula().is_none());
    }

    #[test]
    fn test_formula_literals_fit_excel_limit() {
        let config = ReportConfig::default();
        let mut anchors = registry();
        let mut ctx = SheetContext::new(&config, &mut anchors);
        let mut comparative = Sheet::new("Comparative Report");
        populate_comparative(&mut ctx, &mut comparative).unwrap();
        let mut sheet = Sheet::new("Business Analysis");
        populate_business_analysis(&mut ctx, &mut sheet).unwrap();

        let literal = Regex::new(r#""((?:[^"]|"")*)""#).unwrap();
        for (_, cell) in sheet.cells() {
            if let Some(formula) = cell.value.formula() {
                for caps in literal.captures_iter(formula) {
                    assert!(caps[1].chars().count() <= MAX_FORMULA_LITERAL, "{}", &caps[1]);
                }
            }
        }
    }
}
