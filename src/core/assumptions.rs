//! The model assumptions every statement formula ultimately reads

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssumptionCategory {
    IncomeStatement,
    WorkingCapital,
    FixedAssets,
    Financing,
}

impl AssumptionCategory {
    pub const ALL: [AssumptionCategory; 4] = [
        AssumptionCategory::IncomeStatement,
        AssumptionCategory::WorkingCapital,
        AssumptionCategory::FixedAssets,
        AssumptionCategory::Financing,
    ];

    pub fn title(self) -> &'static str {
        match self {
            AssumptionCategory::IncomeStatement => "Income statement assumptions",
            AssumptionCategory::WorkingCapital => "Balance sheet assumptions (working capital)",
            AssumptionCategory::FixedAssets => "Fixed asset and depreciation assumptions",
            AssumptionCategory::Financing => "Financing assumptions",
        }
    }

    pub fn members(self) -> impl Iterator<Item = Assumption> {
        Assumption::ALL
            .into_iter()
            .filter(move |a| a.category() == self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Assumption {
    RevenueGrowth,
    CostOfSalesRatio,
    SgaRatio,
    IncomeTaxRate,
    ReceivableDays,
    InventoryDays,
    PayableDays,
    Capex,
    DepreciationRate,
    FinanceCost,
    DividendPayout,
    NewBorrowing,
    LoanRepayment,
    OpeningLongTermDebt,
}

impl Assumption {
    /// Listed in sheet order
    pub const ALL: [Assumption; 14] = [
        Assumption::RevenueGrowth,
        Assumption::CostOfSalesRatio,
        Assumption::SgaRatio,
        Assumption::IncomeTaxRate,
        Assumption::ReceivableDays,
        Assumption::InventoryDays,
        Assumption::PayableDays,
        Assumption::Capex,
        Assumption::DepreciationRate,
        Assumption::FinanceCost,
        Assumption::DividendPayout,
        Assumption::NewBorrowing,
        Assumption::LoanRepayment,
        Assumption::OpeningLongTermDebt,
    ];

    pub fn category(self) -> AssumptionCategory {
        use Assumption::*;
        match self {
            RevenueGrowth | CostOfSalesRatio | SgaRatio | IncomeTaxRate => {
                AssumptionCategory::IncomeStatement
            }
            ReceivableDays | InventoryDays | PayableDays => AssumptionCategory::WorkingCapital,
            Capex | DepreciationRate => AssumptionCategory::FixedAssets,
            FinanceCost | DividendPayout | NewBorrowing | LoanRepayment | OpeningLongTermDebt => {
                AssumptionCategory::Financing
            }
        }
    }

    pub fn description(self) -> &'static str {
        use Assumption::*;
        match self {
            RevenueGrowth => "Operating revenue growth (%)",
            CostOfSalesRatio => "Cost of sales as % of revenue",
            SgaRatio => "Selling, general and administrative expenses as % of revenue",
            IncomeTaxRate => "Income tax rate",
            ReceivableDays => "Receivable collection period (days)",
            InventoryDays => "Inventory holding period (days)",
            PayableDays => "Payables payment period (days)",
            Capex => "Annual capital expenditure (CAPEX)",
            DepreciationRate => "Annual depreciation rate (on opening cost)",
            FinanceCost => "Fixed finance cost",
            DividendPayout => "Dividend payout (% of net profit)",
            NewBorrowing => "New borrowing received during the year",
            LoanRepayment => "Loan principal repaid during the year",
            OpeningLongTermDebt => "Opening long-term debt balance",
        }
    }

    /// Sample values as (current year, prior year)
    pub fn values(self) -> (f64, f64) {
        use Assumption::*;
        match self {
            RevenueGrowth => (0.50, 0.15),
            CostOfSalesRatio => (0.65, 0.68),
            SgaRatio => (0.12, 0.13),
            IncomeTaxRate => (0.25, 0.25),
            ReceivableDays => (90.0, 95.0),
            InventoryDays => (120.0, 125.0),
            PayableDays => (75.0, 80.0),
            Capex => (600_000.0, 450_000.0),
            DepreciationRate => (0.10, 0.10),
            FinanceCost => (50_000.0, 60_000.0),
            DividendPayout => (0.40, 0.45),
            NewBorrowing => (850_000.0, 300_000.0),
            LoanRepayment => (50_000.0, 40_000.0),
            OpeningLongTermDebt => (0.0, 0.0),
        }
    }

    /// Rates are shown as percentages
    pub fn is_rate(self) -> bool {
        use Assumption::*;
        matches!(
            self,
            RevenueGrowth | CostOfSalesRatio | SgaRatio | IncomeTaxRate | DepreciationRate | DividendPayout
        )
    }
}

impl fmt::Display for Assumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_assumption_has_one_category() {
        let total: usize = AssumptionCategory::ALL
            .iter()
            .map(|c| c.members().count())
            .sum();
        assert_eq!(total, Assumption::ALL.len());
    }

    #[test]
    fn test_category_sizes() {
        assert_eq!(AssumptionCategory::IncomeStatement.members().count(), 4);
        assert_eq!(AssumptionCategory::WorkingCapital.members().count(), 3);
        assert_eq!(AssumptionCategory::FixedAssets.members().count(), 2);
        assert_eq!(AssumptionCategory::Financing.members().count(), 5);
    }

    #[test]
    fn test_rates_are_fractions() {
        for a in Assumption::ALL.iter().filter(|a| a.is_rate()) {
            let (cur, prior) = a.values();
            assert!((0.0..=1.0).contains(&cur), "{a} current value out of range");
            assert!((0.0..=1.0).contains(&prior), "{a} prior value out of range");
        }
    }

    #[test]
    fn test_sample_values() {
        assert_eq!(Assumption::RevenueGrowth.values(), (0.50, 0.15));
        assert_eq!(Assumption::Capex.values(), (600_000.0, 450_000.0));
        assert!(!Assumption::ReceivableDays.is_rate());
    }
}
