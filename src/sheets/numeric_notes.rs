//! Numbered notes to the financial statements
//!
//! Each note is a small table described by a [`NoteSpec`]: either one list of
//! items with a total, or several titled sections each with a subtotal.
//! Amounts are sample figures or links to statement cells.

use super::{back_link, SheetContext, EQUITY, FINANCIAL_POSITION, MILLION_RIALS, PROFIT_AND_LOSS};
use crate::core::anchors::{Anchor, Period};
use crate::error::BookResult;
use crate::types::{col, Sheet};

/// First row of note content
pub const FIRST_ROW: u32 = 10;

#[derive(Debug, Clone, Copy)]
pub enum Amount {
    Value(f64),
    /// `factor` times the anchor's cell for `period`
    Linked {
        anchor: Anchor,
        period: Period,
        factor: f64,
    },
}

#[derive(Debug)]
pub struct Item {
    pub label: &'static str,
    pub current: Amount,
    pub prior: Amount,
}

#[derive(Debug)]
pub struct Section {
    pub title: &'static str,
    pub items: &'static [Item],
    pub total: Option<&'static str>,
}

#[derive(Debug)]
pub enum Body {
    Items {
        items: &'static [Item],
        total: &'static str,
    },
    Sections(&'static [Section]),
}

#[derive(Debug)]
pub struct NoteSpec {
    pub sheet: &'static str,
    pub title: &'static str,
    pub body: Body,
    /// Explanatory paragraphs under the table
    pub notes: &'static [&'static str],
    pub return_sheet: &'static str,
}

const fn item(label: &'static str, current: f64, prior: f64) -> Item {
    Item {
        label,
        current: Amount::Value(current),
        prior: Amount::Value(prior),
    }
}

/// Same anchor for both years
const fn linked(label: &'static str, anchor: Anchor, factor: f64) -> Item {
    Item {
        label,
        current: Amount::Linked {
            anchor,
            period: Period::Current,
            factor,
        },
        prior: Amount::Linked {
            anchor,
            period: Period::Prior,
            factor,
        },
    }
}

/// Current-year anchor, prior year estimated as a share of it
const fn scaled_back(label: &'static str, anchor: Anchor, prior_factor: f64) -> Item {
    Item {
        label,
        current: Amount::Linked {
            anchor,
            period: Period::Current,
            factor: 1.0,
        },
        prior: Amount::Linked {
            anchor,
            period: Period::Current,
            factor: prior_factor,
        },
    }
}

const fn items(sheet: &'static str, title: &'static str, items: &'static [Item], total: &'static str, return_sheet: &'static str) -> NoteSpec {
    NoteSpec {
        sheet,
        title,
        body: Body::Items { items, total },
        notes: &[],
        return_sheet,
    }
}

const fn sections(sheet: &'static str, title: &'static str, sections: &'static [Section], return_sheet: &'static str) -> NoteSpec {
    NoteSpec {
        sheet,
        title,
        body: Body::Sections(sections),
        notes: &[],
        return_sheet,
    }
}

const fn section(title: &'static str, items: &'static [Item], total: &'static str) -> Section {
    Section {
        title,
        items,
        total: Some(total),
    }
}

const fn with_notes(spec: NoteSpec, notes: &'static [&'static str]) -> NoteSpec {
    NoteSpec { notes, ..spec }
}

pub const CATALOG: [NoteSpec; 38] = [
    items(
        "5",
        "Note 5: Operating revenue",
        &[
            item("Sale of broiler chickens", 2_000_000.0, 1_700_000.0),
            item("Sale of day-old chicks", 300_000.0, 250_000.0),
            item("Sale of manure and other by-products", 200_000.0, 150_000.0),
        ],
        "Total operating revenue",
        PROFIT_AND_LOSS,
    ),
    items(
        "6",
        "Note 6: Cash and cash equivalents",
        &[
            item("Cash on hand and at banks", 1_000_000.0, 700_000.0),
            item("Short-term bank deposits", 200_000.0, 200_000.0),
        ],
        "Total cash and cash equivalents",
        FINANCIAL_POSITION,
    ),
    items(
        "7",
        "Note 7: Short-term investments",
        &[
            item("Fixed-income securities", 250_000.0, 200_000.0),
            item("Other short-term investments", 50_000.0, 50_000.0),
        ],
        "Total short-term investments",
        FINANCIAL_POSITION,
    ),
    sections(
        "10.11.12",
        "Notes 10-12: Prepayments, long-term investments and property, plant and equipment",
        &[
            section(
                "a) Prepayments (note 10)",
                &[
                    item("Prepayments for materials and goods", 50_000.0, 40_000.0),
                    item("Prepaid expenses", 50_000.0, 40_000.0),
                ],
                "Total prepayments",
            ),
            section(
                "b) Long-term investments (note 11)",
                &[
                    item("Investments in subsidiaries", 150_000.0, 100_000.0),
                    item("Long-term bank deposits", 50_000.0, 50_000.0),
                ],
                "Total long-term investments",
            ),
            section(
                "c) Property, plant and equipment (note 12)",
                &[
                    item("Land", 500_000.0, 500_000.0),
                    item("Farm buildings and installations", 1_500_000.0, 1_300_000.0),
                    item("Machinery and equipment", 1_000_000.0, 1_000_000.0),
                ],
                "Total property, plant and equipment",
            ),
        ],
        FINANCIAL_POSITION,
    ),
    sections(
        "13",
        "Note 13: Intangible and other assets",
        &[
            section(
                "a) Intangible assets",
                &[
                    item("Software and information systems", 30_000.0, 25_000.0),
                    item("Operating rights", 20_000.0, 15_000.0),
                ],
                "Total intangible assets",
            ),
            section(
                "b) Other assets",
                &[
                    item("Guarantee deposits", 20_000.0, 15_000.0),
                    item("Assets awaiting sale", 10_000.0, 10_000.0),
                ],
                "Total other assets",
            ),
        ],
        FINANCIAL_POSITION,
    ),
    with_notes(
        items(
            "14",
            "Note 14: Discontinued operations",
            &[
                item("Profit (loss) from discontinued activities", 0.0, 0.0),
                item("Profit (loss) on disposal of discontinued assets", 0.0, 0.0),
            ],
            "Total profit (loss) from discontinued operations",
            PROFIT_AND_LOSS,
        ),
        &["The company had no discontinued operations during the period."],
    ),
    items(
        "15",
        "Note 15: Trade and other payables",
        &[
            item("Payables for feed and chicks", 400_000.0, 350_000.0),
            item("Salaries and wages payable", 50_000.0, 40_000.0),
            item("Other payables", 150_000.0, 110_000.0),
        ],
        "Total trade and other payables",
        FINANCIAL_POSITION,
    ),
    items(
        "16",
        "Note 16: Borrowings",
        &[
            item("Short-term bank facilities", 250_000.0, 200_000.0),
            item("Short-term loans from individuals", 150_000.0, 150_000.0),
        ],
        "Total current borrowings",
        FINANCIAL_POSITION,
    ),
    items(
        "17",
        "Note 17: Taxes payable",
        &[
            item("Income tax payable", 30_000.0, 20_000.0),
            item("Value added tax payable", 20_000.0, 20_000.0),
        ],
        "Total taxes payable",
        FINANCIAL_POSITION,
    ),
    with_notes(
        items(
            "18",
            "Note 18: Dividends payable",
            &[
                item("Dividends approved by the general meeting (current year)", 80_000.0, 0.0),
                item("Dividends approved by the general meeting (prior year)", 0.0, 70_000.0),
            ],
            "Total dividends payable",
            FINANCIAL_POSITION,
        ),
        &["Dividends approved by the annual general meeting are payable within the statutory period."],
    ),
    items(
        "19",
        "Note 19: Long-term borrowings",
        &[
            item("Long-term facility from Keshavarzi Bank", 500_000.0, 400_000.0),
            item("Long-term loan from the National Development Fund", 200_000.0, 200_000.0),
        ],
        "Total long-term borrowings",
        FINANCIAL_POSITION,
    ),
    with_notes(
        items(
            "20",
            "Note 20: Employee end-of-service benefits",
            &[item("Provision for end-of-service benefits", 150_000.0, 130_000.0)],
            "Total employee end-of-service benefits",
            FINANCIAL_POSITION,
        ),
        &["The obligation for employee end-of-service benefits is recognised under current labour law."],
    ),
    with_notes(
        items(
            "21",
            "Note 21: Share capital",
            &[item(
                "Registered capital (1,000,000 ordinary shares of 1,000 rials)",
                1_000_000.0,
                1_000_000.0,
            )],
            "Total share capital",
            FINANCIAL_POSITION,
        ),
        &["Share capital did not change during the years reported."],
    ),
    sections(
        "22.-23",
        "Notes 22-23: Legal reserve and other reserves",
        &[
            section(
                "a) Legal reserve (note 22)",
                &[
                    item("Balance at the start of the year", 150_000.0, 100_000.0),
                    item("Transfer from retained earnings", 50_000.0, 50_000.0),
                ],
                "Legal reserve at the end of the year",
            ),
            section(
                "b) Other reserves (note 23)",
                &[
                    item("Balance at the start of the year", 80_000.0, 50_000.0),
                    item("Transfer from retained earnings (development)", 20_000.0, 30_000.0),
                ],
                "Other reserves at the end of the year",
            ),
        ],
        EQUITY,
    ),
    items(
        "24.25",
        "Notes 24-25: Retained earnings",
        &[
            linked("Balance at the start of the year", Anchor::RetainedEarningsOpening, 1.0),
            linked("Net profit for the year", Anchor::NetProfit, 1.0),
            linked("Transfer to legal reserve", Anchor::LegalReserveTransfer, -1.0),
            item("Transfer to other reserves", 0.0, 0.0),
            linked("Dividends declared", Anchor::DividendsDeclared, 1.0),
        ],
        "Retained earnings at the end of the year",
        EQUITY,
    ),
    sections(
        "26.27",
        "Notes 26-27: Finance costs and other non-operating income and expenses",
        &[
            section(
                "a) Finance costs (note 26)",
                &[
                    item("Interest on bank facilities", -60_000.0, -50_000.0),
                    item("Bank charges", -10_000.0, -10_000.0),
                ],
                "Total finance costs",
            ),
            section(
                "b) Other non-operating income and expenses (note 27)",
                &[
                    item("Foreign exchange gains", 15_000.0, 10_000.0),
                    item("Gain on sale of fixed assets", 15_000.0, 15_000.0),
                    item("Sundry losses", -5_000.0, -5_000.0),
                ],
                "Total other non-operating income and expenses",
            ),
        ],
        PROFIT_AND_LOSS,
    ),
    sections(
        "28.29.30.31",
        "Notes 28-31: Liabilities in detail",
        &[
            section(
                "a) Trade and notes payable (note 28)",
                &[
                    item("Raw materials purchased (feed, medicine)", 300_000.0, 250_000.0),
                    item("Chicks purchased", 100_000.0, 80_000.0),
                ],
                "Total trade payables",
            ),
            section(
                "b) Other payables (note 29)",
                &[
                    item("Salaries and wages payable", 50_000.0, 40_000.0),
                    item("Taxes payable", 50_000.0, 40_000.0),
                ],
                "Total other payables",
            ),
            section(
                "c) Current borrowings (note 30)",
                &[
                    item("Short-term bank facilities", 250_000.0, 200_000.0),
                    item("Other short-term facilities", 150_000.0, 150_000.0),
                ],
                "Total current borrowings",
            ),
            section(
                "d) Long-term borrowings (note 31)",
                &[
                    item("Long-term bank facilities", 500_000.0, 400_000.0),
                    item("Loans from other sources", 200_000.0, 200_000.0),
                ],
                "Total long-term borrowings",
            ),
        ],
        FINANCIAL_POSITION,
    ),
    sections(
        "32.33",
        "Notes 32-33: Selling and administrative expenses",
        &[
            section(
                "a) Selling expenses (note 32)",
                &[
                    linked("Sales salaries and wages", Anchor::SellingPersonnel, 1.0),
                    item("Advertising and marketing", 50_000.0, 40_000.0),
                    item("Transport and distribution", 150_000.0, 130_000.0),
                ],
                "Total selling expenses",
            ),
            section(
                "b) General and administrative expenses (note 33)",
                &[
                    linked("Administrative salaries and wages", Anchor::AdminPersonnel, 1.0),
                    item("Rent", 20_000.0, 18_000.0),
                    linked("Depreciation", Anchor::AdminDepreciation, 1.0),
                    item("Services", 10_000.0, 9_000.0),
                    item("Other", 10_000.0, 15_000.0),
                ],
                "Total general and administrative expenses",
            ),
        ],
        PROFIT_AND_LOSS,
    ),
    items(
        "34",
        "Note 34: Income tax",
        &[
            item("Income tax for the current year", 50_000.0, 40_000.0),
            item("Income tax for prior years", 10_000.0, 5_000.0),
            item("Deferred tax", 0.0, 0.0),
        ],
        "Total income tax recognised",
        PROFIT_AND_LOSS,
    ),
    sections(
        "35",
        "Note 35: Investments",
        &[
            section(
                "a) Short-term investments",
                &[
                    item("Government bonds", 150_000.0, 100_000.0),
                    item("Investment funds", 150_000.0, 150_000.0),
                ],
                "Total short-term investments",
            ),
            section(
                "b) Long-term investments",
                &[
                    item("Shares in unlisted companies", 100_000.0, 80_000.0),
                    item("Investment property", 100_000.0, 70_000.0),
                ],
                "Total long-term investments",
            ),
        ],
        FINANCIAL_POSITION,
    ),
    items(
        "35-1",
        "Note 35-1: Assets held for sale",
        &[
            item("Inactive poultry farm held for sale", 50_000.0, 50_000.0),
            item("Surplus equipment", 10_000.0, 0.0),
        ],
        "Total",
        FINANCIAL_POSITION,
    ),
    with_notes(
        items(
            "35-6",
            "Note 35-6: Payroll summary",
            &[
                scaled_back("Total salaries and benefits paid to staff", Anchor::PayrollGrossAnnual, 0.9),
                scaled_back("Employer's share of social insurance", Anchor::PayrollEmployerInsuranceAnnual, 0.9),
            ],
            "Total",
            PROFIT_AND_LOSS,
        ),
        &["Summarises the payroll register. Prior-year figures are estimated at 90% of the current year."],
    ),
    items(
        "36-37",
        "Notes 36-37: Income tax in detail",
        &[
            item("Income tax for the current year", 50_000.0, 40_000.0),
            item("Prior-year taxes and penalties", 10_000.0, 5_000.0),
            item("Effect of temporary differences", 0.0, 0.0),
        ],
        "Total income tax recognised",
        PROFIT_AND_LOSS,
    ),
    sections(
        "38.39.40",
        "Notes 38-40: Share information",
        &[
            Section {
                title: "a) Ordinary shares (note 38)",
                items: &[item("Shares outstanding (number)", 1_000_000.0, 1_000_000.0)],
                total: None,
            },
            Section {
                title: "b) Nominal value per share (note 39)",
                items: &[item("Nominal value per share (rials)", 1_000.0, 1_000.0)],
                total: None,
            },
            // Profit in million rials over one million shares is rials per share
            Section {
                title: "c) Basic earnings per share (note 40)",
                items: &[linked("Basic earnings per share (rials)", Anchor::NetProfit, 1.0)],
                total: None,
            },
        ],
        PROFIT_AND_LOSS,
    ),
    sections(
        "41",
        "Note 41: Cash and short-term investments in detail",
        &[
            section(
                "a) Cash and cash equivalents",
                &[
                    item("Balances at the central bank", 500_000.0, 400_000.0),
                    item("Balances at commercial banks", 400_000.0, 300_000.0),
                    item("Cash in transit", 300_000.0, 200_000.0),
                ],
                "Total cash and cash equivalents",
            ),
            section(
                "b) Short-term investments",
                &[
                    item("Participation bonds", 200_000.0, 150_000.0),
                    item("Short-term deposits", 100_000.0, 100_000.0),
                ],
                "Total short-term investments",
            ),
        ],
        FINANCIAL_POSITION,
    ),
    sections(
        "42.43",
        "Notes 42-43: Receivables",
        &[
            section(
                "a) Trade and notes receivable (note 42)",
                &[
                    item("Major customers", 500_000.0, 450_000.0),
                    item("Other customers", 200_000.0, 150_000.0),
                ],
                "Total trade and notes receivable",
            ),
            section(
                "b) Other receivables (note 43)",
                &[
                    item("Amounts due from employees", 10_000.0, 5_000.0),
                    item("Other", 20_000.0, 15_000.0),
                ],
                "Total other receivables",
            ),
        ],
        FINANCIAL_POSITION,
    ),
    items(
        "44",
        "Note 44: Property, plant and equipment (land)",
        &[item("Land", 500_000.0, 500_000.0)],
        "Total",
        FINANCIAL_POSITION,
    ),
    items(
        "44-4",
        "Note 44-4: Property, plant and equipment (farm buildings)",
        &[
            item("Cost", 1_800_000.0, 1_500_000.0),
            item("Accumulated depreciation", -300_000.0, -200_000.0),
        ],
        "Carrying amount",
        FINANCIAL_POSITION,
    ),
    items(
        "44-6",
        "Note 44-6: Property, plant and equipment (machinery)",
        &[
            item("Cost", 1_200_000.0, 1_100_000.0),
            item("Accumulated depreciation", -200_000.0, -100_000.0),
        ],
        "Carrying amount",
        FINANCIAL_POSITION,
    ),
    items(
        "45",
        "Note 45: Prepayments in detail",
        &[
            item("Prepayments for raw materials", 50_000.0, 40_000.0),
            item("Prepaid insurance", 20_000.0, 15_000.0),
            item("Prepaid rent", 30_000.0, 25_000.0),
        ],
        "Total prepayments",
        FINANCIAL_POSITION,
    ),
    items(
        "46",
        "Note 46: Trade payables in detail",
        &[
            item("Feed suppliers", 250_000.0, 200_000.0),
            item("Chick suppliers", 100_000.0, 80_000.0),
            item("Medicine and vaccine suppliers", 50_000.0, 40_000.0),
        ],
        "Total",
        FINANCIAL_POSITION,
    ),
    items(
        "46-3",
        "Note 46-3: Other payables in detail",
        &[
            item("Salaries and wages payable", 50_000.0, 40_000.0),
            item("Taxes payable", 50_000.0, 40_000.0),
            item("Social insurance payable", 20_000.0, 15_000.0),
        ],
        "Total",
        FINANCIAL_POSITION,
    ),
    sections(
        "47.48",
        "Notes 47-48: Borrowings in detail",
        &[
            section(
                "a) Current borrowings",
                &[
                    item("Short-term loan from Bank Melli", 250_000.0, 200_000.0),
                    item("Credit line from Bank Mellat", 150_000.0, 150_000.0),
                ],
                "Total current borrowings",
            ),
            section(
                "b) Long-term borrowings",
                &[
                    item("Long-term loan from Keshavarzi Bank", 1_200_000.0, 400_000.0),
                    item("Loan from the National Development Fund", 200_000.0, 200_000.0),
                ],
                "Total long-term borrowings",
            ),
        ],
        FINANCIAL_POSITION,
    ),
    items(
        "49",
        "Note 49: Employee end-of-service benefits in detail",
        &[
            item("Balance at the start of the year", 130_000.0, 100_000.0),
            item("Provision recognised during the year", 20_000.0, 30_000.0),
            item("Paid during the year", 0.0, 0.0),
        ],
        "Balance at the end of the year",
        FINANCIAL_POSITION,
    ),
    with_notes(
        items(
            "16 cont",
            "Note 16 (continued): Borrowings",
            &[
                item("Short-term facilities from government bodies", 50_000.0, 30_000.0),
                item("Letters of credit", 20_000.0, 10_000.0),
            ],
            "Total",
            "16",
        ),
        &["Further detail of current borrowings."],
    ),
    with_notes(
        items(
            "34 cont",
            "Note 34 (continued): Income tax",
            &[
                item("Deferred tax assets", 0.0, 0.0),
                item("Deferred tax liabilities", 0.0, 0.0),
            ],
            "Total",
            "34",
        ),
        &["Further detail of income tax."],
    ),
    with_notes(
        sections(
            "41 cont",
            "Note 41 (continued): Cash and short-term investments",
            &[
                section(
                    "a) Commercial paper and cash commitments",
                    &[
                        item("Commercial notes receivable", 50_000.0, 40_000.0),
                        item("Short-term cash commitments", -20_000.0, -10_000.0),
                    ],
                    "Total",
                ),
                section(
                    "b) Listed participation bonds and other securities",
                    &[
                        item("Listed participation bonds", 50_000.0, 30_000.0),
                        item("Other securities", 10_000.0, 5_000.0),
                    ],
                    "Total",
                ),
            ],
            "41",
        ),
        &["Further detail of cash and short-term investments."],
    ),
    with_notes(
        items(
            "41 cont 2",
            "Note 41 (continued, part 2): Cash and short-term investments",
            &[
                item("Funds in collection", 20_000.0, 10_000.0),
                item("Guarantee notes", 10_000.0, 5_000.0),
            ],
            "Total",
            "41",
        ),
        &["Further detail of cash and short-term investments."],
    ),
];

/// Look up a note by sheet name
pub fn find(sheet: &str) -> Option<&'static NoteSpec> {
    CATALOG.iter().find(|n| n.sheet == sheet)
}

pub fn populate(ctx: &mut SheetContext, sheet: &mut Sheet, spec: &NoteSpec) -> BookResult<()> {
    let period = ctx.both_years_line();
    ctx.start(
        sheet,
        spec.title,
        &period,
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

    let mut row = FIRST_ROW;
    match &spec.body {
        Body::Items { items, total } => {
            row = write_items(ctx, sheet, row, items, Some(*total))?;
        }
        Body::Sections(sections) => {
            for section in sections.iter() {
                sheet.write(row, col::A, section.title).bold();
                row = write_items(ctx, sheet, row + 1, section.items, section.total)?;
            }
        }
    }

    for note in spec.notes {
        sheet.write(row, col::B, *note).wrap();
        row += 1;
    }

    back_link(sheet, spec.return_sheet);
    Ok(())
}

/// Items from `first`, then the total row if any. Returns the row after the
/// blank line that follows.
fn write_items(
    ctx: &mut SheetContext,
    sheet: &mut Sheet,
    first: u32,
    items: &[Item],
    total: Option<&str>,
) -> BookResult<u32> {
    let mut row = first;
    for item in items {
        sheet.write(row, col::B, item.label).wrap();
        let current = amount(ctx, item.current)?;
        let prior = amount(ctx, item.prior)?;
        write_amount(sheet, row, col::F, current);
        write_amount(sheet, row, col::G, prior);
        row += 1;
    }

    if let Some(text) = total {
        let last = row - 1;
        sheet.write(row, col::B, text).bold();
        sheet.write(row, col::F, format!("=SUM(F{first}:F{last})")).bold();
        sheet.write(row, col::G, format!("=SUM(G{first}:G{last})")).bold();
        row += 1;
    }
    Ok(row + 1)
}

enum Written {
    Number(f64),
    Formula(String),
}

fn amount(ctx: &mut SheetContext, value: Amount) -> BookResult<Written> {
    Ok(match value {
        Amount::Value(v) => Written::Number(v),
        Amount::Linked {
            anchor,
            period,
            factor,
        } => {
            let source = ctx.refer(anchor, period)?;
            if factor == 1.0 {
                Written::Formula(format!("={}", source))
            } else {
                Written::Formula(format!("={}*{}", source, factor))
            }
        }
    })
}

fn write_amount(sheet: &mut Sheet, row: u32, col: u16, value: Written) {
    match value {
        Written::Number(n) => sheet.write(row, col, n),
        Written::Formula(f) => sheet.write(row, col, f),
    };
}
