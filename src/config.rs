//! Report configuration loaded from YAML
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! standard sample report. CLI flags override whatever the file sets.

use crate::error::{BookError, BookResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default number of repopulation passes for the statement loop
pub const DEFAULT_MAX_PASSES: usize = 20;

/// Financial Position reads closing cash before Cash Flows registers it,
/// so a single pass always leaves it unresolved
pub const MIN_PASSES: usize = 2;

/// Default payroll headcount
pub const DEFAULT_EMPLOYEES: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Company name printed in every sheet header
    pub company_name: String,

    /// Fiscal year of the current period; the prior period is the year before
    pub current_year: u32,

    /// Day and month the fiscal year ends on, e.g. "29 Esfand"
    pub year_end: String,

    /// Where `generate` writes the workbook
    pub output: PathBuf,

    /// Number of employees on the payroll register
    pub employees: usize,

    /// Seed for the payroll generator; unseeded runs differ every time
    pub seed: Option<u64>,

    /// Upper bound on statement repopulation passes
    pub max_passes: usize,

    /// Lay sheets out right-to-left
    pub right_to_left: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            company_name: "Sample Poultry Company (Public Joint Stock)".to_string(),
            current_year: 1403,
            year_end: "29 Esfand".to_string(),
            output: PathBuf::from("financial_statements.xlsx"),
            employees: DEFAULT_EMPLOYEES,
            seed: None,
            max_passes: DEFAULT_MAX_PASSES,
            right_to_left: false,
        }
    }
}

impl ReportConfig {
    /// Load and validate a YAML configuration file
    pub fn load(path: &Path) -> BookResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: ReportConfig = if content.trim().is_empty() {
            ReportConfig::default()
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> BookResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> BookResult<()> {
        if self.company_name.trim().is_empty() {
            return Err(BookError::Config("company_name must not be empty".to_string()));
        }
        if self.current_year < 2 {
            return Err(BookError::Config(format!(
                "current_year must be at least 2, got {}",
                self.current_year
            )));
        }
        if self.employees == 0 {
            return Err(BookError::Config("employees must be at least 1".to_string()));
        }
        if self.max_passes < MIN_PASSES {
            return Err(BookError::Config(format!(
                "max_passes must be at least {}, got {}",
                MIN_PASSES, self.max_passes
            )));
        }
        Ok(())
    }

    pub fn prior_year(&self) -> u32 {
        self.current_year - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = ReportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.current_year, 1403);
        assert_eq!(config.prior_year(), 1402);
        assert_eq!(config.max_passes, 20);
        assert_eq!(config.employees, 100);
        assert!(!config.right_to_left);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "company_name: Golden Hen Farms\nseed: 7\nright_to_left: true").unwrap();

        let config = ReportConfig::load(file.path()).unwrap();
        assert_eq!(config.company_name, "Golden Hen Farms");
        assert_eq!(config.seed, Some(7));
        assert!(config.right_to_left);
        assert_eq!(config.employees, DEFAULT_EMPLOYEES);
    }

    #[test]
    fn test_load_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let config = ReportConfig::load(file.path()).unwrap();
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_load_rejects_unknown_field() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "employes: 10").unwrap();
        assert!(matches!(
            ReportConfig::load(file.path()),
            Err(BookError::Yaml(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_staff = ReportConfig {
            employees: 0,
            ..ReportConfig::default()
        };
        assert!(matches!(zero_staff.validate(), Err(BookError::Config(_))));

        let zero_passes = ReportConfig {
            max_passes: 0,
            ..ReportConfig::default()
        };
        assert!(zero_passes.validate().is_err());

        let one_pass = ReportConfig {
            max_passes: 1,
            ..ReportConfig::default()
        };
        let err = one_pass.validate().unwrap_err();
        assert!(matches!(err, BookError::Config(_)));
        assert!(err.to_string().contains("at least 2"));

        let two_passes = ReportConfig {
            max_passes: 2,
            ..ReportConfig::default()
        };
        assert!(two_passes.validate().is_ok());

        let blank_name = ReportConfig {
            company_name: "  ".to_string(),
            ..ReportConfig::default()
        };
        assert!(blank_name.validate().is_err());

        let year_one = ReportConfig {
            current_year: 1,
            ..ReportConfig::default()
        };
        assert!(year_one.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ReportConfig {
            seed: Some(42),
            ..ReportConfig::default()
        };
        let yaml = config.to_yaml().unwrap();
        let parsed: ReportConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
