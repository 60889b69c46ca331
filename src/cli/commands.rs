use crate::config::ReportConfig;
use crate::core::{check_model, ReportBuilder, SheetGraph};
use crate::error::{BookError, BookResult};
use crate::excel::{WorkbookExporter, WorkbookInspector};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// How many dangling references to print before summarising the rest
const MAX_LISTED: usize = 20;

/// CLI overrides for the configuration file
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
    pub employees: Option<usize>,
    pub passes: Option<usize>,
}

impl GenerateOptions {
    /// Load the configuration file (or the defaults) and apply the flags on top
    pub fn resolve(&self) -> BookResult<ReportConfig> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(employees) = self.employees {
            config.employees = employees;
        }
        if let Some(passes) = self.passes {
            config.max_passes = passes;
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn load_config(path: Option<&Path>) -> BookResult<ReportConfig> {
    match path {
        Some(path) => ReportConfig::load(path),
        None => Ok(ReportConfig::default()),
    }
}

/// Execute the generate command, returning the path written
pub fn generate(options: GenerateOptions) -> BookResult<PathBuf> {
    let config = options.resolve()?;

    println!("{}", "🐔 Flockbook - Generating financial statements".bold().green());
    println!("   Company: {}", config.company_name);
    println!(
        "   Years:   {} and {}",
        config.current_year,
        config.prior_year()
    );
    println!("   Output:  {}\n", config.output.display());

    let report = ReportBuilder::new(config.clone()).build()?;
    println!(
        "   Built {} sheets, {} employees, statements settled in {} passes",
        report.model.len().to_string().bold(),
        report.employees,
        report.convergence.passes.to_string().bold()
    );

    let dangling = check_model(&report.model)?;
    if !dangling.is_empty() {
        println!(
            "\n{}",
            format!("❌ Found {} dangling references", dangling.len())
                .bold()
                .red()
        );
        for found in dangling.iter().take(MAX_LISTED) {
            println!("   {}", found);
        }
        return Err(BookError::Reference(format!(
            "{} dangling references in the built workbook",
            dangling.len()
        )));
    }

    WorkbookExporter::new(&report.model).export(&config.output)?;
    info!(path = %config.output.display(), "workbook written");

    println!("\n{}", "✅ Workbook written".bold().green());
    println!("   {}\n", config.output.display());
    Ok(config.output)
}

/// Execute the verify command. Fails when anything dangles.
pub fn verify(file: PathBuf, json: bool) -> BookResult<()> {
    let summary = WorkbookInspector::new(&file).inspect()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", "🔍 Flockbook - Verifying workbook".bold().green());
        println!("   File: {}\n", file.display());
        println!(
            "   {:<26} {:>7} {:>9} {:>11}",
            "Sheet".bold(),
            "Cells".bold(),
            "Formulas".bold(),
            "Cross-refs".bold()
        );
        for sheet in &summary.sheets {
            println!(
                "   {:<26} {:>7} {:>9} {:>11}",
                sheet.name.bright_blue(),
                sheet.cells,
                sheet.formulas,
                sheet.cross_refs
            );
        }
        println!(
            "\n   {} sheets, {} formulas",
            summary.sheets.len(),
            summary.total_formulas()
        );
    }

    if summary.is_clean() {
        if !json {
            println!("\n{}", "✅ No dangling references".bold().green());
        }
        return Ok(());
    }

    if !json {
        println!(
            "\n{}",
            format!("❌ Found {} dangling references", summary.dangling.len())
                .bold()
                .red()
        );
        for found in summary.dangling.iter().take(MAX_LISTED) {
            println!("   {}", found);
        }
        if summary.dangling.len() > MAX_LISTED {
            println!("   ... and {} more", summary.dangling.len() - MAX_LISTED);
        }
    }
    Err(BookError::Reference(format!(
        "{} dangling references in {}",
        summary.dangling.len(),
        file.display()
    )))
}

/// Execute the audit command: sheet dependency order, cycles and convergence
pub fn audit(config: Option<PathBuf>) -> BookResult<()> {
    let config = load_config(config.as_deref())?;
    println!("{}", "🔍 Flockbook - Sheet dependency audit".bold().green());
    println!();

    let report = ReportBuilder::new(config).build()?;
    let graph = SheetGraph::from_model(&report.model)?;

    println!(
        "   {} sheets, {} cross-sheet dependencies\n",
        graph.sheet_count(),
        graph.edge_count()
    );

    println!("{}", "📋 Evaluation order:".bold());
    for (step, group) in graph.evaluation_order()?.iter().enumerate() {
        let line = group.join(" ↔ ");
        if group.len() > 1 {
            println!("   {:>3}. {}", step + 1, line.yellow());
        } else {
            println!("   {:>3}. {}", step + 1, line);
        }
    }

    println!("\n{}", "🔁 Cycles:".bold());
    let cycles = graph.cycles();
    if cycles.is_empty() {
        println!("   none");
    }
    for cycle in &cycles {
        println!("   {}", cycle.join(" ↔ ").yellow());
    }

    let convergence = &report.convergence;
    println!("\n{}", "🧮 Convergence:".bold());
    println!(
        "   {} after {} passes",
        if convergence.converged {
            "converged".green()
        } else {
            "not converged".red()
        },
        convergence.passes
    );
    let pending: Vec<String> = convergence
        .pending_per_pass
        .iter()
        .map(|n| n.to_string())
        .collect();
    println!("   Pending references per pass: {}", pending.join(", "));
    println!();
    Ok(())
}

/// Execute the init-config command
pub fn init_config(path: PathBuf, force: bool) -> BookResult<()> {
    if path.exists() && !force {
        return Err(BookError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    fs::write(&path, ReportConfig::default().to_yaml()?)?;
    println!("{}", "✅ Configuration written".bold().green());
    println!("   {}\n", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
