//! # Lightning Risk CLI
//!
//! Command-line front end for `risk_core`.
//!
//! ```text
//! risk_cli init warehouse.lpr --engineer "J. Doe" --job 25-001 --client Acme
//! risk_cli evaluate warehouse.lpr
//! risk_cli evaluate warehouse.lpr --format json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use risk_core::assessment::{Assessment, AssessmentReport};
use risk_core::calculations::{RiskReport, ZoneRisk};
use risk_core::compliance::ComplianceCheck;
use risk_core::file_io::{load_assessment_with_lock_check, save_assessment, FileLock};
use risk_core::CalcError;

#[derive(Parser)]
#[command(name = "risk_cli")]
#[command(about = "IEC 62305-2 lightning risk assessment")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a new assessment file with one zone and one power line
    Init {
        /// Path of the .lpr file to create
        path: PathBuf,

        /// Responsible engineer
        #[arg(long, default_value = "")]
        engineer: String,

        /// Job number
        #[arg(long, default_value = "")]
        job: String,

        /// Client name
        #[arg(long, default_value = "")]
        client: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Compute R1..R4 for an assessment file
    Evaluate {
        /// Path of the .lpr file
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Init {
            path,
            engineer,
            job,
            client,
            force,
        } => init(&path, engineer, job, client, force),
        Commands::Evaluate { path, format } => evaluate(&path, format),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if let Some(calc) = err.downcast_ref::<CalcError>() {
                if let Ok(json) = serde_json::to_string_pretty(calc) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn init(path: &Path, engineer: String, job: String, client: String, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let user = if engineer.is_empty() { "risk_cli".to_string() } else { engineer.clone() };
    let lock = FileLock::acquire(path, user).context("failed to lock assessment file")?;

    let assessment = Assessment::template(engineer, job, client);
    save_assessment(&assessment, path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    drop(lock);

    println!("Created {} ({})", path.display(), assessment.meta.id);
    Ok(())
}

fn evaluate(path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let (assessment, lock) = load_assessment_with_lock_check(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    if let Some(info) = lock {
        eprintln!(
            "Note: {} is being edited by {} on {} since {}",
            path.display(),
            info.user_id,
            info.machine,
            info.locked_at.to_rfc3339()
        );
    }

    let report = assessment.evaluate().context("risk evaluation failed")?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("failed to serialize report to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => print_report(&assessment, &report),
    }
    Ok(())
}

fn print_report(assessment: &Assessment, report: &AssessmentReport) {
    let rule = "═══════════════════════════════════════";
    println!("{}", rule);
    println!("  LIGHTNING RISK ASSESSMENT");
    println!("{}", rule);
    println!();
    println!("Job:      {}", assessment.meta.job_id);
    println!("Client:   {}", assessment.meta.client);
    println!("Engineer: {}", assessment.meta.engineer);
    println!();
    println!("Collection areas:");
    println!("  Ad = {:.1} m²", report.r1.ad);
    println!("  Am = {:.1} m²", report.r1.am);
    for line in &report.r1.lines {
        println!(
            "  {}: Nl = {:.3e}, Ndj = {:.3e}, Ni = {:.3e}",
            line.line, line.nl, line.ndj, line.ni
        );
    }
    println!();

    println!("Risks:");
    for check in &report.compliance {
        println!("  {}", format_check(check));
    }
    println!();

    print_zones("R1", &report.r1);
    print_zones("R2", &report.r2);
    print_zones("R3", &report.r3);
    print_zones("R4", &report.r4);

    if let Some(cb) = &report.cost_benefit {
        println!("Cost-benefit of protection:");
        println!("  Annual loss, unprotected  CL  = {:.2}", cb.loss_unprotected);
        println!("  Annual loss, protected    CRL = {:.2}", cb.loss_residual);
        println!("  Annual protection cost    CPM = {:.2}", cb.protection_cost_annual);
        println!("  Annual saving             SM  = {:.2}", cb.annual_saving);
        println!();
    }

    println!("{}", rule);
    println!(
        "  RESULT: {}",
        if report.is_compliant() { "PASS" } else { "PROTECTION REQUIRED" }
    );
    println!("{}", rule);
}

fn format_check(check: &ComplianceCheck) -> String {
    match (check.tolerable, check.passes) {
        (Some(rt), Some(passes)) => format!(
            "{:<32} {:.3e} / RT {:.0e} {}",
            check.risk.display_name(),
            check.total,
            rt,
            status_icon(passes)
        ),
        _ => format!("{:<32} {:.3e}", check.risk.display_name(), check.total),
    }
}

fn print_zones<Z: ZoneRisk>(label: &str, report: &RiskReport<Z>) {
    if report.zones.is_empty() {
        return;
    }
    println!("{} by zone:", label);
    for (zone, total) in report.ranked_zones() {
        println!("  {:<24} {:.3e}", zone, total);
    }
    println!();
}

fn status_icon(passes: bool) -> &'static str {
    if passes {
        "✓"
    } else {
        "✗"
    }
}
