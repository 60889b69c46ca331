//! Sheet builders
//!
//! One `populate` function per sheet. Each builder resets its sheet, writes
//! the standard header and its fixed layout, registers the cells other sheets
//! read as anchors, and finishes with a "Back to …" hyperlink in row 1.

pub mod assumptions;
pub mod balance_sheet;
pub mod cash_flow;
pub mod comprehensive_income;
pub mod equity;
pub mod expense_notes;
pub mod fixed_assets;
pub mod inventory;
pub mod inventory_note;
pub mod narrative;
pub mod numeric_notes;
pub mod opening_balance;
pub mod payroll;
pub mod profit_loss;
pub mod reports;

use crate::config::ReportConfig;
use crate::core::anchors::{Anchor, AnchorRegistry, Period};
use crate::error::BookResult;
use crate::types::{col, Sheet};

pub const ASSUMPTIONS: &str = "Assumptions";
pub const OPENING_BALANCE: &str = "Opening Balance";
pub const FINANCIAL_POSITION: &str = "Financial Position";
pub const PROFIT_AND_LOSS: &str = "Profit and Loss";
pub const CASH_FLOWS: &str = "Cash Flows";
pub const EQUITY: &str = "Equity";
pub const COMPREHENSIVE_INCOME: &str = "Comprehensive Income";
pub const FIXED_ASSETS: &str = "Fixed Asset Roll-forward";
pub const INVENTORY_DETAIL: &str = "Inventory Detail";
pub const INVENTORY_NOTE: &str = "Inventory";
pub const PAYROLL: &str = "Payroll";
pub const SGA_NOTE: &str = "8";
pub const COST_OF_SALES_NOTE: &str = "9";
pub const PAGE_HEADER: &str = "Page Header";
pub const SIGNATURES: &str = "Signatures";
pub const HISTORY: &str = "Company History";
pub const MANAGEMENT_JUDGMENT: &str = "Management Judgment";
pub const ATTACHMENT: &str = "Attachment";
pub const COMPARATIVE_REPORT: &str = "Comparative Report";
pub const BUSINESS_ANALYSIS: &str = "Business Analysis";

/// Number of accounting policy sheets ("Policy 1" … "Policy 6")
pub const POLICY_COUNT: u8 = 6;

pub const MILLION_RIALS: &str = "(Amounts in millions of rials)";
pub const PERCENT: &str = "0.00%";
pub const RATIO: &str = "0.00";

pub fn policy_sheet_name(number: u8) -> String {
    format!("Policy {}", number)
}

/// Every sheet in workbook order
pub fn sheet_order() -> Vec<String> {
    let mut names: Vec<String> = [
        ASSUMPTIONS,
        OPENING_BALANCE,
        FINANCIAL_POSITION,
        PROFIT_AND_LOSS,
        CASH_FLOWS,
        EQUITY,
        COMPREHENSIVE_INCOME,
        FIXED_ASSETS,
        INVENTORY_DETAIL,
        INVENTORY_NOTE,
        PAYROLL,
        SGA_NOTE,
        COST_OF_SALES_NOTE,
        PAGE_HEADER,
        SIGNATURES,
        HISTORY,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    names.extend((1..=POLICY_COUNT).map(policy_sheet_name));
    names.push(MANAGEMENT_JUDGMENT.to_string());
    names.push(ATTACHMENT.to_string());
    names.extend(numeric_notes::CATALOG.iter().map(|n| n.sheet.to_string()));
    names.push(COMPARATIVE_REPORT.to_string());
    names.push(BUSINESS_ANALYSIS.to_string());
    names
}

/// What a builder needs besides its own sheet
pub struct SheetContext<'a> {
    pub config: &'a ReportConfig,
    pub anchors: &'a mut AnchorRegistry,
}

impl<'a> SheetContext<'a> {
    pub fn new(config: &'a ReportConfig, anchors: &'a mut AnchorRegistry) -> Self {
        Self { config, anchors }
    }

    /// Formula reference to another sheet's anchor
    pub fn refer(&mut self, anchor: Anchor, period: Period) -> BookResult<String> {
        self.anchors.reference(anchor, period)
    }

    pub fn single(&mut self, anchor: Anchor) -> BookResult<String> {
        self.anchors.single(anchor)
    }

    pub fn mark(&mut self, sheet: &Sheet, row: u32, col: u16, anchor: Anchor, period: Period) {
        self.anchors.set(anchor, period, sheet.name(), row, col);
    }

    pub fn year(&self, period: Period) -> u32 {
        match period {
            Period::Current => self.config.current_year,
            Period::Prior => self.config.prior_year(),
        }
    }

    /// "For the year ended 29 Esfand 1403 and 1402"
    pub fn both_years_line(&self) -> String {
        format!(
            "For the year ended {} {} and {}",
            self.config.year_end,
            self.config.current_year,
            self.config.prior_year()
        )
    }

    pub fn current_year_line(&self) -> String {
        format!(
            "For the year ended {} {}",
            self.config.year_end, self.config.current_year
        )
    }

    /// Reset `sheet` and write the standard header block
    pub fn start(
        &self,
        sheet: &mut Sheet,
        title: &str,
        date_line: &str,
        currency_line: Option<&str>,
        widths: &[(u16, f64)],
    ) {
        sheet.clear();
        sheet.set_right_to_left(self.config.right_to_left);
        sheet.set_column_widths(widths);

        sheet.write(1, col::A, self.config.company_name.as_str()).bold().size(14.0);
        sheet.write(2, col::A, title).bold();
        if !date_line.is_empty() {
            sheet.write(3, col::A, date_line);
        }
        if let Some(currency) = currency_line {
            sheet.write(5, col::A, currency);
        }
    }
}

/// Put a "Back to …" hyperlink in row 1, in the last used column (at least B),
/// moving right past any cell already occupied or merged.
pub fn back_link(sheet: &mut Sheet, target: &str) {
    let covered = |sheet: &Sheet, column: u16| {
        sheet.cell(1, column).is_some()
            || sheet
                .merges()
                .iter()
                .any(|(first, last)| first.row <= 1 && (first.col..=last.col).contains(&column))
    };
    let mut column = sheet.max_column().max(col::B);
    while covered(sheet, column) {
        column += 1;
    }
    sheet
        .link(1, column, format!("Back to {}", target), target)
        .color(0x0563C1);
}
