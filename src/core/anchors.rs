//! Named cells shared between sheets
//!
//! A builder registers each cell another sheet needs as an [`Anchor`]. Later
//! formulas ask the registry for the address instead of hard-coding a row, so
//! moving a line on one sheet cannot leave a stale reference on another.
//!
//! During the statement loop the registry is *lenient*: asking for an anchor
//! that a later sheet in the same pass registers yields `0` and records the
//! request as pending. The next pass resolves it. Outside the loop lookups are
//! strict and an unknown anchor is an error.

use crate::core::assumptions::Assumption;
use crate::error::{BookError, BookResult};
use crate::types::{CellAddr, SheetCell};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Period {
    Current,
    Prior,
}

impl Period {
    pub const ALL: [Period; 2] = [Period::Current, Period::Prior];
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Current => f.write_str("current"),
            Period::Prior => f.write_str("prior"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Anchor {
    Assumption(Assumption),

    // Opening balance (single-valued)
    OpeningCash,
    OpeningReceivables,
    OpeningInventory,
    OpeningPrepayments,
    OpeningAssetCost,
    OpeningAccumulatedDepreciation,
    OpeningOtherNonCurrent,
    OpeningPayables,
    OpeningTaxPayable,
    OpeningDividendsPayable,
    OpeningCurrentDebt,
    OpeningLongTermDebt,
    OpeningEndOfService,
    OpeningShareCapital,
    OpeningLegalReserve,
    OpeningOtherReserves,
    OpeningRetainedEarnings,

    // Payroll register
    PayrollGrossAnnual,
    PayrollEmployerInsuranceAnnual,

    // Inventory ledger
    InventoryOpening,
    InventoryPurchases,
    InventoryCogs,
    InventoryClosing,
    InventoryItemClosing(u8),

    // Expense notes
    CostOfSalesTotal,
    SellingPersonnel,
    AdminPersonnel,
    AdminDepreciation,
    EndOfServiceExpense,
    SgaTotal,

    // Profit and loss
    Revenue,
    CostOfSales,
    GrossProfit,
    OperatingProfit,
    IncomeTax,
    NetProfit,

    // Equity roll-forward
    RetainedEarningsOpening,
    LegalReserveTransfer,
    DividendsDeclared,
    EquityClosing,

    // Fixed asset roll-forward
    Depreciation,
    NetBookValue,

    // Financial position
    Cash,
    Receivables,
    Inventory,
    Prepayments,
    CurrentAssets,
    OtherNonCurrentAssets,
    TotalAssets,
    Payables,
    TaxPayable,
    DividendsPayable,
    CurrentLiabilities,
    TotalLiabilities,

    // Cash flows
    ClosingCash,

    // Comparative report
    RevenueChange,
    NetMargin,
    CurrentRatio,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::Assumption(a) => write!(f, "Assumption({:?})", a),
            other => write!(f, "{:?}", other),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct AnchorRegistry {
    cells: HashMap<(Anchor, Period), SheetCell>,
    pending: BTreeSet<(Anchor, Period)>,
    lenient: bool,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, anchor: Anchor, period: Period, sheet: &str, row: u32, col: u16) {
        self.cells
            .insert((anchor, period), SheetCell::new(sheet, CellAddr::new(row, col)));
    }

    /// Register a single-valued anchor (stored under [`Period::Current`])
    pub fn set_single(&mut self, anchor: Anchor, sheet: &str, row: u32, col: u16) {
        self.set(anchor, Period::Current, sheet, row, col);
    }

    pub fn get(&self, anchor: Anchor, period: Period) -> BookResult<&SheetCell> {
        self.cells.get(&(anchor, period)).ok_or_else(|| {
            BookError::Reference(format!("{} ({}) has not been written yet", anchor, period))
        })
    }

    /// Quoted cross-sheet reference for use inside a formula
    pub fn reference(&mut self, anchor: Anchor, period: Period) -> BookResult<String> {
        match self.cells.get(&(anchor, period)) {
            Some(cell) => Ok(cell.to_string()),
            None if self.lenient => {
                self.pending.insert((anchor, period));
                Ok("0".to_string())
            }
            None => Err(BookError::Reference(format!(
                "{} ({}) has not been written yet",
                anchor, period
            ))),
        }
    }

    pub fn single(&mut self, anchor: Anchor) -> BookResult<String> {
        self.reference(anchor, Period::Current)
    }

    pub fn set_lenient(&mut self, lenient: bool) {
        self.lenient = lenient;
    }

    pub fn pending(&self) -> &BTreeSet<(Anchor, Period)> {
        &self.pending
    }

    pub fn reset_pending(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(Anchor, Period), &SheetCell)> {
        self.cells.iter()
    }
}
