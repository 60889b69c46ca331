use super::{back_link, SheetContext, FINANCIAL_POSITION, MILLION_RIALS};
use crate::core::anchors::{Anchor, Period};
use crate::core::assumptions::Assumption;
use crate::error::BookResult;
use crate::types::{col, Sheet};

/// Cost, accumulated depreciation and net book value for each year.
/// Depreciation is charged on the opening cost of the year.
pub fn populate(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let period = ctx.both_years_line();
    ctx.start(
        sheet,
        "Property, plant and equipment roll-forward",
        &period,
        Some(MILLION_RIALS),
        &[
            (col::A, 35.0),
            (col::B, 20.0),
            (col::C, 20.0),
            (col::D, 20.0),
            (col::E, 20.0),
        ],
    );

    let headers = [
        "Description",
        "Opening balance",
        "Additions (CAPEX)",
        "Depreciation charge",
        "Closing balance",
    ];
    for (i, header) in headers.iter().enumerate() {
        sheet.write(7, col::A + i as u16, *header).bold();
    }

    let opening_cost = format!("={}", ctx.single(Anchor::OpeningAssetCost)?);
    let opening_depreciation = format!("={}", ctx.single(Anchor::OpeningAccumulatedDepreciation)?);
    write_year(ctx, sheet, Period::Prior, 8, opening_cost, opening_depreciation)?;
    write_year(ctx, sheet, Period::Current, 13, "=E9".to_string(), "=E10".to_string())?;

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}

fn write_year(
    ctx: &mut SheetContext,
    sheet: &mut Sheet,
    period: Period,
    title_row: u32,
    opening_cost: String,
    opening_depreciation: String,
) -> BookResult<()> {
    let capex = ctx.refer(Anchor::Assumption(Assumption::Capex), period)?;
    let rate = ctx.refer(Anchor::Assumption(Assumption::DepreciationRate), period)?;
    let (cost, dep, nbv) = (title_row + 1, title_row + 2, title_row + 3);

    sheet.write(title_row, col::A, format!("Year {}", ctx.year(period))).bold();

    sheet.write(cost, col::A, "Cost");
    sheet.write(cost, col::B, opening_cost).bold();
    sheet.write(cost, col::C, format!("={}", capex));
    // No disposals
    sheet.write(cost, col::D, 0);
    sheet.write(cost, col::E, format!("=SUM(B{cost}:D{cost})"));

    sheet.write(dep, col::A, "Accumulated depreciation");
    sheet.write(dep, col::B, opening_depreciation).bold();
    sheet.write(dep, col::C, 0);
    sheet.write(dep, col::D, format!("=B{cost}*{}", rate));
    sheet.write(dep, col::E, format!("=B{dep}+D{dep}"));

    sheet.write(nbv, col::A, "Net book value").bold();
    sheet.write(nbv, col::B, format!("=B{cost}-B{dep}"));
    sheet.write(nbv, col::E, format!("=E{cost}-E{dep}")).bold();

    ctx.mark(sheet, dep, col::D, Anchor::Depreciation, period);
    ctx.mark(sheet, nbv, col::E, Anchor::NetBookValue, period);
    Ok(())
}
