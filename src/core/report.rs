//! Builds the whole workbook model
//!
//! Inputs first, then the statement loop until its formulas stop changing,
//! then everything that only reads from the statements.

use crate::config::ReportConfig;
use crate::core::anchors::AnchorRegistry;
use crate::core::payroll::{generate_employees, Employee};
use crate::error::{BookError, BookResult};
use crate::sheets::{self, SheetContext};
use crate::types::{Sheet, WorkbookModel};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, warn};

type Builder = fn(&mut SheetContext<'_>, &mut Sheet) -> BookResult<()>;

/// Sheets repopulated on every pass, in pass order
const LOOP_SHEETS: [(&str, Builder); 7] = [
    (sheets::COST_OF_SALES_NOTE, sheets::expense_notes::populate_cost_of_sales),
    (sheets::SGA_NOTE, sheets::expense_notes::populate_sga),
    (sheets::PROFIT_AND_LOSS, sheets::profit_loss::populate),
    (sheets::EQUITY, sheets::equity::populate),
    (sheets::FIXED_ASSETS, sheets::fixed_assets::populate),
    (sheets::FINANCIAL_POSITION, sheets::balance_sheet::populate),
    (sheets::CASH_FLOWS, sheets::cash_flow::populate),
];

/// Outcome of the statement loop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConvergenceReport {
    pub passes: usize,
    pub converged: bool,
    /// Forward references still written as `0` after each pass
    pub pending_per_pass: Vec<usize>,
}

/// A built model with what it took to build it
#[derive(Debug)]
pub struct Report {
    pub model: WorkbookModel,
    pub convergence: ConvergenceReport,
    pub anchors: AnchorRegistry,
    pub employees: usize,
}

pub struct ReportBuilder {
    config: ReportConfig,
}

impl ReportBuilder {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn build(&self) -> BookResult<Report> {
        self.config.validate()?;

        let mut model = WorkbookModel::new();
        for name in sheets::sheet_order() {
            model.add_sheet(&name)?;
        }
        debug!(sheets = model.len(), "created sheets");

        let staff = self.employees();
        let mut anchors = AnchorRegistry::new();

        self.populate_inputs(&mut model, &mut anchors, &staff)?;
        let convergence = self.run_statement_loop(&mut model, &mut anchors)?;
        self.populate_supporting(&mut model, &mut anchors)?;

        model.set_active(sheets::FINANCIAL_POSITION)?;
        info!(
            sheets = model.len(),
            anchors = anchors.len(),
            passes = convergence.passes,
            "workbook model built"
        );

        Ok(Report {
            model,
            convergence,
            anchors,
            employees: staff.len(),
        })
    }

    fn employees(&self) -> Vec<Employee> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        generate_employees(self.config.employees, &mut rng)
    }

    fn populate_inputs(
        &self,
        model: &mut WorkbookModel,
        anchors: &mut AnchorRegistry,
        staff: &[Employee],
    ) -> BookResult<()> {
        let mut ctx = SheetContext::new(&self.config, anchors);
        sheets::assumptions::populate(&mut ctx, model.require_mut(sheets::ASSUMPTIONS)?)?;
        sheets::opening_balance::populate(&mut ctx, model.require_mut(sheets::OPENING_BALANCE)?)?;
        sheets::payroll::populate(&mut ctx, model.require_mut(sheets::PAYROLL)?, staff)?;
        sheets::inventory::populate(&mut ctx, model.require_mut(sheets::INVENTORY_DETAIL)?)?;
        Ok(())
    }

    /// Repopulate the statements until a pass resolves every forward
    /// reference and writes exactly what the pass before it wrote
    fn run_statement_loop(
        &self,
        model: &mut WorkbookModel,
        anchors: &mut AnchorRegistry,
    ) -> BookResult<ConvergenceReport> {
        let mut report = ConvergenceReport::default();
        let mut previous: Option<Vec<Sheet>> = None;
        anchors.set_lenient(true);

        for pass in 1..=self.config.max_passes {
            anchors.reset_pending();
            {
                let mut ctx = SheetContext::new(&self.config, anchors);
                for (name, populate) in LOOP_SHEETS {
                    populate(&mut ctx, model.require_mut(name)?)?;
                }
            }

            let pending = anchors.pending().len();
            let snapshot: Vec<Sheet> = LOOP_SHEETS
                .iter()
                .filter_map(|(name, _)| model.sheet(name).cloned())
                .collect();
            let stable = previous.as_ref() == Some(&snapshot);

            report.passes = pass;
            report.pending_per_pass.push(pending);
            debug!(pass, pending, stable, "statement pass");

            if pending == 0 && stable {
                report.converged = true;
                break;
            }
            previous = Some(snapshot);
        }

        anchors.set_lenient(false);

        if !report.converged {
            warn!(
                passes = report.passes,
                "statement loop did not converge, continuing with the last pass"
            );
        }
        if !anchors.pending().is_empty() {
            let names: Vec<String> = anchors
                .pending()
                .iter()
                .map(|(anchor, period)| format!("{} ({})", anchor, period))
                .collect();
            return Err(BookError::Reference(format!(
                "still pending after {} passes: {}",
                report.passes,
                names.join(", ")
            )));
        }

        Ok(report)
    }

    fn populate_supporting(
        &self,
        model: &mut WorkbookModel,
        anchors: &mut AnchorRegistry,
    ) -> BookResult<()> {
        let mut ctx = SheetContext::new(&self.config, anchors);

        sheets::inventory_note::populate(&mut ctx, model.require_mut(sheets::INVENTORY_NOTE)?)?;
        for note in sheets::numeric_notes::CATALOG.iter() {
            sheets::numeric_notes::populate(&mut ctx, model.require_mut(note.sheet)?, note)?;
        }
        sheets::comprehensive_income::populate(
            &mut ctx,
            model.require_mut(sheets::COMPREHENSIVE_INCOME)?,
        )?;

        sheets::narrative::populate_page_header(&mut ctx, model.require_mut(sheets::PAGE_HEADER)?)?;
        sheets::narrative::populate_signatures(&mut ctx, model.require_mut(sheets::SIGNATURES)?)?;
        sheets::narrative::populate_history(&mut ctx, model.require_mut(sheets::HISTORY)?)?;
        for number in 1..=sheets::POLICY_COUNT {
            let name = sheets::policy_sheet_name(number);
            sheets::narrative::populate_policy(&mut ctx, model.require_mut(&name)?, number)?;
        }
        sheets::narrative::populate_management_judgment(
            &mut ctx,
            model.require_mut(sheets::MANAGEMENT_JUDGMENT)?,
        )?;
        sheets::narrative::populate_attachment(&mut ctx, model.require_mut(sheets::ATTACHMENT)?)?;

        sheets::reports::populate_comparative(
            &mut ctx,
            model.require_mut(sheets::COMPARATIVE_REPORT)?,
        )?;
        sheets::reports::populate_business_analysis(
            &mut ctx,
            model.require_mut(sheets::BUSINESS_ANALYSIS)?,
        )?;
        Ok(())
    }
}
