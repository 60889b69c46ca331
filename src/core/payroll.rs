//! Sample employee generation for the payroll register
//!
//! Amounts are monthly rials for the current year. The register derives every
//! other figure (gross, insurance, tax, net) with row formulas.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// Daily minimum wage, current year
pub const MIN_WAGE_DAILY: u64 = 2_388_728;
/// Monthly minimum wage (30 days)
pub const MIN_WAGE_MONTHLY: u64 = MIN_WAGE_DAILY * 30;
pub const HOUSING_ALLOWANCE: u64 = 9_000_000;
pub const CONSUMER_BASKET_ALLOWANCE: u64 = 14_000_000;
/// Monthly income exempt from salary tax
pub const TAX_EXEMPTION_MONTHLY: u64 = 120_000_000;
pub const SALARY_TAX_RATE: f64 = 0.10;
pub const EMPLOYEE_INSURANCE_RATE: f64 = 0.07;
pub const EMPLOYER_INSURANCE_RATE: f64 = 0.23;
/// Prior-year personnel cost as a share of the current year
pub const PRIOR_YEAR_RATIO: f64 = 0.8;

const FARMS: u8 = 10;
const WAREHOUSES: u8 = 5;

const FIRST_NAMES: [&str; 20] = [
    "Ali", "Reza", "Mohammad", "Hossein", "Fatemeh", "Zahra", "Maryam", "Saeed", "Amin", "Nazanin",
    "Kiarash", "Sara", "Nima", "Arezoo", "Behrouz", "Kamal", "Parisa", "Danial", "Zeinab",
    "Mehrnaz",
];

const LAST_NAMES: [&str; 20] = [
    "Ahmadi", "Karimi", "Mohammadi", "Rezaei", "Ghasemi", "Nowruzi", "Hosseini", "Sadeghi",
    "Mousavi", "Rahimi", "Yazdani", "Bahrami", "Fallah", "Shojaei", "Mozaffari", "Amiri",
    "Jahani", "Hashemi", "Mokhtari", "Pourmohammadi",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    FarmManager,
    Veterinarian,
    Guard,
    Worker,
    WarehouseManager,
    Storekeeper,
    ChiefExecutive,
    FinanceManager,
    Accountant,
    HrManager,
    Secretary,
    Specialist,
    SalesManager,
    SalesSpecialist,
}

// Repeated entries weight the draw toward workers
const FARM_ROLES: [Role; 10] = [
    Role::FarmManager,
    Role::Veterinarian,
    Role::Guard,
    Role::Worker,
    Role::Worker,
    Role::Worker,
    Role::Worker,
    Role::Worker,
    Role::Worker,
    Role::Worker,
];
const WAREHOUSE_ROLES: [Role; 4] = [
    Role::WarehouseManager,
    Role::Storekeeper,
    Role::Worker,
    Role::Worker,
];
const ADMIN_ROLES: [Role; 6] = [
    Role::ChiefExecutive,
    Role::FinanceManager,
    Role::Accountant,
    Role::HrManager,
    Role::Secretary,
    Role::Specialist,
];
const SALES_ROLES: [Role; 4] = [
    Role::SalesManager,
    Role::SalesSpecialist,
    Role::SalesSpecialist,
    Role::SalesSpecialist,
];

impl Role {
    pub fn title(self) -> &'static str {
        match self {
            Role::FarmManager => "Farm manager",
            Role::Veterinarian => "Veterinarian",
            Role::Guard => "Guard",
            Role::Worker => "Worker",
            Role::WarehouseManager => "Warehouse manager",
            Role::Storekeeper => "Storekeeper",
            Role::ChiefExecutive => "Chief executive",
            Role::FinanceManager => "Finance manager",
            Role::Accountant => "Accountant",
            Role::HrManager => "HR manager",
            Role::Secretary => "Secretary",
            Role::Specialist => "Specialist",
            Role::SalesManager => "Sales manager",
            Role::SalesSpecialist => "Sales specialist",
        }
    }

    /// Inclusive monthly base-salary band in rials
    pub fn salary_band(self) -> (u64, u64) {
        match self {
            Role::FarmManager
            | Role::WarehouseManager
            | Role::ChiefExecutive
            | Role::FinanceManager
            | Role::HrManager
            | Role::SalesManager => (130_000_000, 200_000_000),
            Role::Veterinarian => (100_000_000, 160_000_000),
            Role::Specialist | Role::SalesSpecialist | Role::Accountant | Role::Storekeeper => {
                (80_000_000, 130_000_000)
            }
            Role::Guard | Role::Worker | Role::Secretary => (MIN_WAGE_MONTHLY, 120_000_000),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Farm(u8),
    Warehouse(u8),
    Administration,
    Sales,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Farm(n) => write!(f, "Farm {}", n),
            Unit::Warehouse(n) => write!(f, "Warehouse {}", n),
            Unit::Administration => f.write_str("Administration"),
            Unit::Sales => f.write_str("Sales"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: u32,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub unit: Unit,
    pub role: Role,
    pub children: u8,
    pub national_id: u64,
    pub insurance_number: u64,
    /// Monthly base salary in rials
    pub base_salary: u64,
    /// Monthly miscellaneous deductions in rials
    pub other_deductions: u64,
}

impl Employee {
    /// Child allowance: three days of minimum wage per child
    pub fn child_allowance(&self) -> u64 {
        u64::from(self.children) * 3 * MIN_WAGE_DAILY
    }
}

/// Generate exactly `count` employees: farm crews first, then warehouse crews,
/// then administration and sales staff for the remaining places.
pub fn generate_employees<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Employee> {
    let mut staff = Vec::with_capacity(count);

    for farm in 1..=FARMS {
        let crew = rng.gen_range(6..=10);
        for _ in 0..crew {
            if staff.len() >= count {
                break;
            }
            let role = pick(&FARM_ROLES, rng);
            let children = rng.gen_range(0..=3);
            staff.push(hire(staff.len(), Unit::Farm(farm), role, children, rng));
        }
    }

    for warehouse in 1..=WAREHOUSES {
        let crew = rng.gen_range(3..=5);
        for _ in 0..crew {
            if staff.len() >= count {
                break;
            }
            let role = pick(&WAREHOUSE_ROLES, rng);
            let children = rng.gen_range(0..=3);
            staff.push(hire(staff.len(), Unit::Warehouse(warehouse), role, children, rng));
        }
    }

    while staff.len() < count {
        let (unit, role) = if rng.gen_bool(0.5) {
            (Unit::Administration, pick(&ADMIN_ROLES, rng))
        } else {
            (Unit::Sales, pick(&SALES_ROLES, rng))
        };
        let children = rng.gen_range(0..=2);
        staff.push(hire(staff.len(), unit, role, children, rng));
    }

    staff
}

fn pick<R: Rng + ?Sized>(roles: &[Role], rng: &mut R) -> Role {
    roles.choose(rng).copied().unwrap_or(Role::Worker)
}

fn hire<R: Rng + ?Sized>(
    index: usize,
    unit: Unit,
    role: Role,
    children: u8,
    rng: &mut R,
) -> Employee {
    let (low, high) = role.salary_band();
    Employee {
        id: index as u32 + 1,
        first_name: FIRST_NAMES.choose(rng).copied().unwrap_or("Ali"),
        last_name: LAST_NAMES.choose(rng).copied().unwrap_or("Ahmadi"),
        unit,
        role,
        children,
        national_id: rng.gen_range(1_000_000_000..=9_999_999_999),
        insurance_number: rng.gen_range(10_000_000_000..=99_999_999_999),
        base_salary: rng.gen_range(low..=high),
        other_deductions: rng.gen_range(500_000..=2_000_000),
    }
}
