use anyhow::Context;
use clap::{Parser, Subcommand};
use flockbook::cli::{self, GenerateOptions};
use flockbook::error::BookError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flockbook")]
#[command(about = "Two-year financial statements workbook for a sample poultry company")]
#[command(long_about = "Flockbook - self-computing financial statements in one .xlsx file

Every statement, note and report cell that depends on another sheet is an
Excel formula, so the workbook recalculates when it is opened.

COMMANDS:
  generate     - Build the workbook and write it to disk
  verify       - Read a workbook back and check its cross-sheet references
  audit        - Show the sheet dependency order, cycles and convergence
  init-config  - Write the default configuration as YAML

EXAMPLES:
  flockbook generate -o statements.xlsx --seed 42
  flockbook generate -c flockbook.yaml --employees 250
  flockbook verify statements.xlsx --json")]
#[command(version)]
struct Cli {
    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the workbook and write it to disk
    Generate {
        /// YAML configuration file
        #[arg(short, long, env = "FLOCKBOOK_CONFIG")]
        config: Option<PathBuf>,

        /// Output .xlsx path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed for the payroll generator
        #[arg(long)]
        seed: Option<u64>,

        /// Number of employees on the payroll register
        #[arg(long)]
        employees: Option<usize>,

        /// Maximum statement repopulation passes (at least 2)
        #[arg(long)]
        passes: Option<usize>,
    },

    #[command(long_about = "Read a generated workbook back and check it.

Prints each sheet's cell, formula and cross-reference counts, then every
formula reference that points at a missing sheet or an empty cell.
Hyperlinks are not read back; generate checks them before export.
Exits non-zero when any reference dangles.")]
    /// Read a workbook back and check its cross-sheet references
    Verify {
        /// Workbook to check
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the sheet dependency order, cycles and convergence
    Audit {
        /// YAML configuration file
        #[arg(short, long, env = "FLOCKBOOK_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Write the default configuration as YAML
    InitConfig {
        /// Where to write it
        #[arg(default_value = "flockbook.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "flockbook=debug"
    } else {
        "flockbook=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            config,
            output,
            seed,
            employees,
            passes,
        } => {
            let options = GenerateOptions {
                config,
                output,
                seed,
                employees,
                passes,
            };
            match cli::generate(options) {
                Ok(_) => Ok(()),
                Err(e @ BookError::Export(_)) => Err(e).context(
                    "could not save the workbook; it may be open in another program, \
                     or the directory may not be writable",
                ),
                Err(e) => Err(e).context("generate failed"),
            }
        }

        Commands::Verify { file, json } => {
            cli::verify(file.clone(), json).with_context(|| format!("verify {}", file.display()))
        }

        Commands::Audit { config } => cli::audit(config).context("audit failed"),

        Commands::InitConfig { path, force } => {
            cli::init_config(path, force).context("init-config failed")
        }
    }
}
