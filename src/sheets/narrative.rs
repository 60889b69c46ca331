//! Text-only sheets: front matter, company history, accounting policies,
//! management judgment and the attachment page

use super::{back_link, SheetContext, FINANCIAL_POSITION};
use crate::error::BookResult;
use crate::types::{col, CellAddr, Sheet};

/// Bold heading in column A
fn heading(sheet: &mut Sheet, row: u32, text: &str) {
    sheet.write(row, col::A, text).bold();
}

/// Wrapped paragraph in column B
fn paragraph(sheet: &mut Sheet, row: u32, text: &str) {
    sheet.write(row, col::B, text).wrap();
}

/// Header without a period or currency line, leaving rows 3 onward free
fn start(ctx: &SheetContext, sheet: &mut Sheet, title: &str, widths: &[(u16, f64)]) {
    ctx.start(sheet, title, "", None, widths);
}

pub fn populate_page_header(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    start(ctx, sheet, "Page header (for printing and presentation)", &[(col::A, 80.0)]);

    sheet
        .write(3, col::A, "Repeated at the top of every printed page.")
        .italic();
    sheet
        .write(5, col::A, format!("Company: {}", ctx.config.company_name))
        .wrap();
    sheet
        .write(6, col::A, "Statement: profit or loss / financial position / other statements")
        .wrap();
    sheet
        .write(
            7,
            col::A,
            format!("Fiscal year: ended {} {}", ctx.config.year_end, ctx.config.current_year),
        )
        .wrap();

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}

pub fn populate_signatures(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    start(ctx, sheet, "Signatories to the financial statements", &[(col::A, 40.0)]);

    // Approval date falls in the year after the one reported
    let date = format!("Date: {}/03/22", ctx.config.current_year + 1);
    heading(sheet, 3, "These financial statements were prepared and approved by:");

    let signatories = [
        ("[Chief executive officer]", "Chief executive officer"),
        ("[Finance manager]", "Finance manager"),
        ("[Auditor]", "Independent auditor"),
    ];
    for (i, (name, position)) in signatories.iter().enumerate() {
        let row = 5 + 4 * i as u32;
        sheet.write(row, col::A, format!("Name: {}", name));
        sheet.write(row + 1, col::A, format!("Position: {}", position));
        sheet.write(row + 2, col::A, date.as_str());
    }

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}

pub fn populate_history(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    let title = format!("History of {}", ctx.config.company_name);
    start(ctx, sheet, &title, &[(col::A, 15.0), (col::B, 80.0)]);
    sheet.merge(CellAddr::new(1, col::A), CellAddr::new(1, col::B));

    heading(sheet, 4, "Introduction:");
    paragraph(
        sheet,
        5,
        "The company was founded in 1375 to invest and operate in the poultry industry and the \
         chicken meat supply chain. Drawing on current know-how and advanced technology in \
         grandparent day-old chick breeding, broiler production and supply to slaughterhouses, \
         it has become one of the leaders of the industry in the country.",
    );
    heading(sheet, 7, "Objectives and strategy:");
    paragraph(
        sheet,
        8,
        "The company's main objective is to produce high-quality protein, raise productivity \
         across the supply chain, grow sustainably and play a responsible part in national food \
         security. Its strategy covers new farms, better breeds, more efficient feed use and \
         less waste.",
    );
    heading(sheet, 10, "Principal activities:");
    paragraph(
        sheet,
        11,
        "The company operates 10 broiler farms, 5 warehouses for feed and birds, and a logistics \
         unit that carries products to slaughterhouses. Annual capacity exceeds 50,000 tonnes \
         of broiler meat.",
    );
    heading(sheet, 13, "Outlook:");
    paragraph(
        sheet,
        14,
        "With a focus on innovation, market development and added capacity, the company aims to \
         increase its market share and become one of the largest poultry supply chain companies \
         in the region.",
    );

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}

const POLICIES: [&str; 6] = [
    "Presentation: the financial statements are prepared under Iranian accounting standards on \
     the historical cost basis. Transactions are recognised when they occur. The statements are \
     prepared on a going concern basis.",
    "Revenue recognition: revenue from broiler sales is recognised on delivery, when the risks \
     and rewards of ownership pass to the buyer. Revenue from day-old chicks is recognised after \
     delivery, transfer of ownership and reasonable certainty of collection. By-product revenue \
     (such as manure) is recognised when realised.",
    "Inventories: inventories (chicks, feed, medicine and market-ready birds) are measured on \
     the weighted average method at the lower of cost and net realisable value. The cost of \
     growing birds includes direct rearing costs (feed, medicine, vaccines, direct farm labour) \
     and an appropriate share of production overhead. An allowance for write-down is recognised \
     where needed.",
    "Property, plant and equipment: carried at historical cost less accumulated depreciation \
     and impairment. Depreciation is charged on a straight-line basis over estimated useful \
     lives. Subsequent expenditure is capitalised only when it significantly increases future \
     economic benefits. Assets not yet ready for use are held as construction in progress.",
    "Foreign currency: foreign currency transactions are recorded at the rate on the \
     transaction date. Monetary items are translated at the reporting-date rate and the \
     resulting gains or losses are recognised as non-operating income or expense.",
    "Employee end-of-service benefits: the obligation is calculated and recognised under \
     Iranian labour and social security law using the accrued benefit method.",
];

pub fn populate_policy(ctx: &mut SheetContext, sheet: &mut Sheet, number: u8) -> BookResult<()> {
    let title = format!("Note {}: Significant accounting policies", number);
    start(ctx, sheet, &title, &[(col::A, 25.0), (col::B, 80.0)]);

    heading(sheet, 4, "Introduction:");
    paragraph(
        sheet,
        5,
        "These financial statements are prepared under Iranian accounting standards \
         (Audit Organization publication 160). The significant accounting policies applied are \
         set out below:",
    );

    let text = usize::from(number)
        .checked_sub(1)
        .and_then(|i| POLICIES.get(i))
        .copied()
        .unwrap_or("No description is available for this accounting policy.");
    heading(sheet, 7, &format!("Accounting policy {}:", number));
    paragraph(sheet, 8, text);

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}

pub fn populate_management_judgment(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    start(
        ctx,
        sheet,
        "Note: Management judgment in applying accounting policies",
        &[(col::A, 40.0), (col::B, 80.0)],
    );

    heading(sheet, 4, "Introduction:");
    paragraph(
        sheet,
        5,
        "Preparing financial statements under Iranian accounting standards requires management \
         to make significant judgments in applying accounting policies and estimates. The key \
         areas are:",
    );

    let judgments = [
        (
            "1. Useful lives of tangible and intangible assets:",
            "Management estimates the useful lives of farm buildings, equipment, machinery, \
             software and breed rights from past experience and expected physical and \
             technological obsolescence. A change in these estimates affects future depreciation \
             and carrying amounts.",
        ),
        (
            "2. Net realisable value of inventories:",
            "Determining the net realisable value of chicks, feed and market-ready birds involves \
             judgment about future selling prices, completion costs and costs to sell. These \
             depend on market conditions, feed and medicine prices and demand, and may lead to \
             an inventory write-down.",
        ),
        (
            "3. Allowance for doubtful receivables:",
            "Management estimates doubtful receivables from collection history, customers' \
             financial position and current economic conditions, applying prudence to the \
             uncertainty of future collections.",
        ),
    ];
    for (i, (title, text)) in judgments.iter().enumerate() {
        let row = 7 + 3 * i as u32;
        heading(sheet, row, title);
        paragraph(sheet, row + 1, text);
    }

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}

pub fn populate_attachment(ctx: &mut SheetContext, sheet: &mut Sheet) -> BookResult<()> {
    start(ctx, sheet, "Attachment to the financial statements", &[(col::A, 80.0)]);

    sheet
        .write(
            4,
            col::A,
            "Supplementary information and detailed schedules needed to fully understand the \
             financial statements.",
        )
        .bold()
        .wrap();
    sheet
        .write(
            6,
            col::A,
            "For example: property, plant and equipment schedules, investment schedules, revenue \
             by product and region, and the full payroll register.",
        )
        .wrap();

    back_link(sheet, FINANCIAL_POSITION);
    Ok(())
}
