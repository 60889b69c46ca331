//! Payroll register: one row per employee, row formulas for every derived
//! figure, then monthly, yearly and million-rial totals and a personnel cost
//! summary by unit. Note 35-6 reads the annual gross pay and employer
//! insurance from the million-rial row.

use super::{back_link, SheetContext, PROFIT_AND_LOSS};
use crate::core::anchors::{Anchor, Period};
use crate::core::payroll::{
    Employee, Unit, CONSUMER_BASKET_ALLOWANCE, EMPLOYEE_INSURANCE_RATE, EMPLOYER_INSURANCE_RATE,
    HOUSING_ALLOWANCE, PRIOR_YEAR_RATIO, SALARY_TAX_RATE, TAX_EXEMPTION_MONTHLY,
};
use crate::error::BookResult;
use crate::types::{col, column_letter, Sheet};

pub const HEADER_ROW: u32 = 7;
pub const FIRST_DATA_ROW: u32 = 8;

const HEADERS: [&str; 23] = [
    "No.",
    "First name",
    "Last name",
    "Unit",
    "Position",
    "National ID",
    "Insurance no.",
    "Children",
    "Base salary",
    "Housing allowance",
    "Consumer basket allowance",
    "Child allowance",
    "Total benefits",
    "Gross salary",
    "Insurable salary",
    "Employee insurance (7%)",
    "Taxable salary",
    "Salary tax",
    "Other deductions",
    "Total deductions",
    "Net salary (payable)",
    "Employer insurance (23%)",
    "Total cost to employer",
];

/// Where the totals and outputs of a register with `employees` rows land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollRows {
    pub last_data: u32,
    pub monthly: u32,
    pub yearly: u32,
    pub million: u32,
    pub outputs: u32,
}

impl PayrollRows {
    pub fn for_count(employees: usize) -> Self {
        let last_data = FIRST_DATA_ROW + employees.max(1) as u32 - 1;
        let monthly = last_data + 2;
        Self {
            last_data,
            monthly,
            yearly: monthly + 1,
            million: monthly + 2,
            outputs: monthly + 4,
        }
    }
}

pub fn populate(ctx: &mut SheetContext, sheet: &mut Sheet, staff: &[Employee]) -> BookResult<()> {
    let mut widths: Vec<(u16, f64)> = vec![(col::A, 5.0), (col::B, 15.0), (col::C, 15.0), (col::D, 15.0)];
    widths.extend((col::E..=col::S).map(|c| (c, 20.0)));
    widths.extend((col::T..=col::W).map(|c| (c, 25.0)));
    let title = format!("Payroll register ({})", ctx.year(Period::Current));
    ctx.start(
        sheet,
        &title,
        "Broken down by operating unit",
        Some("(Amounts in rials)"),
        &widths,
    );

    for (i, header) in HEADERS.iter().enumerate() {
        sheet.write(HEADER_ROW, i as u16 + 1, *header).bold();
    }

    for (i, employee) in staff.iter().enumerate() {
        write_employee(sheet, FIRST_DATA_ROW + i as u32, employee);
    }

    let rows = PayrollRows::for_count(staff.len());
    write_totals(sheet, rows);
    write_outputs(ctx, sheet, rows);

    back_link(sheet, PROFIT_AND_LOSS);
    Ok(())
}

fn write_employee(sheet: &mut Sheet, r: u32, e: &Employee) {
    sheet.write(r, col::A, e.id);
    sheet.write(r, col::B, e.first_name);
    sheet.write(r, col::C, e.last_name);
    sheet.write(r, col::D, e.unit.to_string());
    sheet.write(r, col::E, e.role.title());
    sheet.write(r, col::F, e.national_id);
    sheet.write(r, col::G, e.insurance_number);
    sheet.write(r, col::H, u32::from(e.children));
    sheet.write(r, col::I, e.base_salary);
    sheet.write(r, col::J, HOUSING_ALLOWANCE);
    sheet.write(r, col::K, CONSUMER_BASKET_ALLOWANCE);
    sheet.write(r, col::L, e.child_allowance());

    sheet.write(r, col::M, format!("=SUM(J{r}:L{r})"));
    sheet.write(r, col::N, format!("=I{r}+M{r}"));
    sheet.write(r, col::O, format!("=I{r}+J{r}+K{r}"));
    sheet.write(r, col::P, format!("=O{r}*{}", EMPLOYEE_INSURANCE_RATE));
    sheet.write(r, col::Q, format!("=MAX(0,N{r}-P{r}-{})", TAX_EXEMPTION_MONTHLY));
    sheet.write(r, col::R, format!("=ROUND(Q{r}*{},0)", SALARY_TAX_RATE));
    sheet.write(r, col::S, e.other_deductions);
    sheet.write(r, col::T, format!("=SUM(P{r},R{r},S{r})"));
    sheet.write(r, col::U, format!("=N{r}-T{r}"));
    sheet.write(r, col::V, format!("=O{r}*{}", EMPLOYER_INSURANCE_RATE));
    sheet.write(r, col::W, format!("=N{r}+V{r}"));
}

fn write_totals(sheet: &mut Sheet, rows: PayrollRows) {
    sheet.write(rows.monthly, col::A, "Total monthly (rials)").bold();
    sheet.write(rows.yearly, col::A, "Total yearly (rials)").bold();
    sheet.write(rows.million, col::A, "Total yearly (million rials)").bold();

    for c in col::I..=col::W {
        let letter = column_letter(c);
        sheet.write(
            rows.monthly,
            c,
            format!("=SUM({letter}{}:{letter}{})", FIRST_DATA_ROW, rows.last_data),
        );
        sheet.write(rows.yearly, c, format!("={letter}{}*12", rows.monthly));
        sheet.write(rows.million, c, format!("={letter}{}/1000000", rows.yearly));
    }
}

fn write_outputs(ctx: &mut SheetContext, sheet: &mut Sheet, rows: PayrollRows) {
    let (first, last) = (FIRST_DATA_ROW, rows.last_data);
    let units = format!("D{first}:D{last}");
    let cost = format!("W{first}:W{last}");
    let sales = Unit::Sales.to_string();
    let admin = Unit::Administration.to_string();

    sheet
        .write(rows.outputs, col::A, "Personnel cost by unit (million rials)")
        .bold();
    sheet.write(rows.outputs, col::E, ctx.year(Period::Current).to_string()).bold();
    sheet.write(rows.outputs, col::F, ctx.year(Period::Prior).to_string()).bold();

    let lines = [
        (
            "Annual sales personnel cost",
            format!("=ROUND(SUMIF({units},\"{sales}\",{cost})*12/1000000,0)"),
        ),
        (
            "Annual administrative personnel cost",
            format!("=ROUND(SUMIF({units},\"{admin}\",{cost})*12/1000000,0)"),
        ),
        (
            "Annual production personnel cost",
            format!(
                "=ROUND(SUMIFS({cost},{units},\"<>{sales}\",{units},\"<>{admin}\")*12/1000000,0)"
            ),
        ),
    ];

    for (offset, (label, formula)) in lines.into_iter().enumerate() {
        let r = rows.outputs + 1 + offset as u32;
        sheet.write(r, col::B, label);
        sheet.write(r, col::E, formula);
        sheet.write(r, col::F, format!("=ROUND(E{r}*{},0)", PRIOR_YEAR_RATIO));
    }

    ctx.mark(sheet, rows.million, col::N, Anchor::PayrollGrossAnnual, Period::Current);
    ctx.mark(
        sheet,
        rows.million,
        col::V,
        Anchor::PayrollEmployerInsuranceAnnual,
        Period::Current,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::core::anchors::AnchorRegistry;
    use crate::core::payroll::generate_employees;
    use crate::types::CellValue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build(count: usize) -> (Sheet, AnchorRegistry) {
        let config = ReportConfig::default();
        let mut anchors = AnchorRegistry::new();
        let staff = generate_employees(count, &mut StdRng::seed_from_u64(7));
        let mut sheet = Sheet::new("Payroll");
        populate(&mut SheetContext::new(&config, &mut anchors), &mut sheet, &staff).unwrap();
        (sheet, anchors)
    }

    #[test]
    fn test_rows_layout() {
        let rows = PayrollRows::for_count(100);
        assert_eq!(rows.last_data, 107);
        assert_eq!(rows.monthly, 109);
        assert_eq!(rows.yearly, 110);
        assert_eq!(rows.million, 111);
        assert_eq!(rows.outputs, 113);
    }

    #[test]
    fn test_one_row_per_employee() {
        let (sheet, _) = build(100);
        assert_eq!(sheet.cell(FIRST_DATA_ROW, col::A).unwrap().value, CellValue::Number(1.0));
        assert_eq!(sheet.cell(107, col::A).unwrap().value, CellValue::Number(100.0));
        assert!(sheet.cell(108, col::A).is_none());
        assert_eq!(sheet.cell(HEADER_ROW, col::W).unwrap().value, CellValue::Text("Total cost to employer".to_string()));
    }

    #[test]
    fn test_row_formulas() {
        let (sheet, _) = build(10);
        assert_eq!(sheet.cell_a1("M8").unwrap().value.formula(), Some("=SUM(J8:L8)"));
        assert_eq!(sheet.cell_a1("P8").unwrap().value.formula(), Some("=O8*0.07"));
        assert_eq!(
            sheet.cell_a1("Q8").unwrap().value.formula(),
            Some("=MAX(0,N8-P8-120000000)")
        );
        assert_eq!(sheet.cell_a1("R8").unwrap().value.formula(), Some("=ROUND(Q8*0.1,0)"));
        assert_eq!(sheet.cell_a1("V8").unwrap().value.formula(), Some("=O8*0.23"));
        assert_eq!(sheet.cell_a1("W8").unwrap().value.formula(), Some("=N8+V8"));
    }

    #[test]
    fn test_totals_cover_data_range() {
        let (sheet, _) = build(10);
        // 10 employees: rows 8..=17, totals at 19/20/21
        assert_eq!(sheet.cell_a1("I19").unwrap().value.formula(), Some("=SUM(I8:I17)"));
        assert_eq!(sheet.cell_a1("W20").unwrap().value.formula(), Some("=W19*12"));
        assert_eq!(sheet.cell_a1("N21").unwrap().value.formula(), Some("=N20/1000000"));
    }

    #[test]
    fn test_unit_summary_and_note_anchors() {
        let (sheet, mut anchors) = build(10);
        assert_eq!(
            sheet.cell_a1("A23").unwrap().value,
            CellValue::Text("Personnel cost by unit (million rials)".to_string())
        );
        assert_eq!(
            sheet.cell_a1("E24").unwrap().value.formula(),
            Some("=ROUND(SUMIF(D8:D17,\"Sales\",W8:W17)*12/1000000,0)")
        );
        assert_eq!(sheet.cell_a1("F25").unwrap().value.formula(), Some("=ROUND(E25*0.8,0)"));
        assert_eq!(
            anchors.single(Anchor::PayrollGrossAnnual).unwrap(),
            "'Payroll'!N21"
        );
        assert_eq!(
            anchors.single(Anchor::PayrollEmployerInsuranceAnnual).unwrap(),
            "'Payroll'!V21"
        );
        // The unit summary is for reading only
        assert_eq!(anchors.len(), 2);
    }
}
