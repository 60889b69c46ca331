use super::{back_link, SheetContext, FINANCIAL_POSITION, MILLION_RIALS};
use crate::core::anchors::{Anchor, Period};
use crate::core::assumptions::Assumption;
use crate::error::BookResult;
use crate::types::{col, Sheet};

/// Share of a positive net profit transferred to the legal reserve
pub const LEGAL_RESERVE_RATE: f64 = 0.05;

/// Two stacked blocks: the prior year on rows 8..=12 opening from the opening
/// balance, the current year on rows 14..=18 opening from the prior closing row.
pub fn populate(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let period = ctx.both_years_line();
    ctx.start(
        sheet,
        "Statement of changes in equity",
        &period,
        Some(MILLION_RIALS),
        &[
            (col::A, 30.0),
            (col::B, 18.0),
            (col::C, 18.0),
            (col::D, 18.0),
            (col::E, 18.0),
            (col::F, 20.0),
        ],
    );

    let headers = [
        "Description",
        "Share capital",
        "Legal reserve",
        "Other reserves",
        "Retained earnings",
        "Total",
    ];
    for (i, header) in headers.iter().enumerate() {
        sheet.write(7, col::A + i as u16, *header).bold();
    }

    let opening = [
        ctx.single(Anchor::OpeningShareCapital)?,
        ctx.single(Anchor::OpeningLegalReserve)?,
        ctx.single(Anchor::OpeningOtherReserves)?,
        ctx.single(Anchor::OpeningRetainedEarnings)?,
    ]
    .map(|r| format!("={}", r));
    write_block(ctx, sheet, Period::Prior, 8, opening)?;

    let carried = ["=B12", "=C12", "=D12", "=E12"].map(String::from);
    write_block(ctx, sheet, Period::Current, 14, carried)?;

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}

fn write_block(
    ctx: &mut SheetContext,
    sheet: &mut Sheet,
    period: Period,
    first: u32,
    opening: [String; 4],
) -> BookResult<()> {
    let year = ctx.year(period);
    let net_profit = ctx.refer(Anchor::NetProfit, period)?;
    let payout = ctx.refer(Anchor::Assumption(Assumption::DividendPayout), period)?;

    let (open, profit, reserve, dividends, close) =
        (first, first + 1, first + 2, first + 3, first + 4);

    sheet.write(open, col::A, format!("Balance at the start of {}", year));
    for (i, formula) in opening.into_iter().enumerate() {
        sheet.write(open, col::B + i as u16, formula);
    }
    sheet.write(open, col::F, format!("=SUM(B{open}:E{open})"));

    sheet.write(profit, col::A, format!("Net profit {}", year));
    sheet.write(profit, col::E, format!("={}", net_profit));
    sheet.write(profit, col::F, format!("=E{profit}"));

    sheet.write(reserve, col::A, "Transfer to legal reserve");
    sheet.write(
        reserve,
        col::C,
        format!("=MAX(0,{})*{}", net_profit, LEGAL_RESERVE_RATE),
    );
    sheet.write(reserve, col::E, format!("=-C{reserve}"));
    sheet.write(reserve, col::F, format!("=C{reserve}+E{reserve}"));

    sheet.write(dividends, col::A, "Dividends declared");
    sheet.write(dividends, col::E, format!("=-({}*{})", net_profit, payout));
    sheet.write(dividends, col::F, format!("=E{dividends}"));

    sheet.write(close, col::A, format!("Balance at the end of {}", year)).bold();
    sheet.write(close, col::B, format!("=B{open}")).bold();
    sheet.write(close, col::C, format!("=SUM(C{open}:C{dividends})")).bold();
    sheet.write(close, col::D, format!("=D{open}")).bold();
    sheet.write(close, col::E, format!("=SUM(E{open}:E{dividends})")).bold();
    sheet.write(close, col::F, format!("=SUM(B{close}:E{close})")).bold();

    ctx.mark(sheet, open, col::E, Anchor::RetainedEarningsOpening, period);
    ctx.mark(sheet, reserve, col::C, Anchor::LegalReserveTransfer, period);
    ctx.mark(sheet, dividends, col::E, Anchor::DividendsDeclared, period);
    ctx.mark(sheet, close, col::F, Anchor::EquityClosing, period);
    Ok(())
}
