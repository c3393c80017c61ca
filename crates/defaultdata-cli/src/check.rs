//! # Check Subcommand
//!
//! Lints the project layout and prints every convention violation. Exit
//! code 1 when anything was found, 0 otherwise.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use defaultdata_core::{validate_project, StructureReport};

use crate::CommandContext;

/// Arguments for `defaultdata check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Restrict investigation-level checks to this investigation.
    pub investigation: Option<String>,
}

/// Execute the check subcommand, printing to standard output.
pub fn run_check(args: &CheckArgs, ctx: &CommandContext) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_check_to(args, ctx, &mut out)
}

/// Execute the check subcommand, writing the report to `out`.
pub fn run_check_to<W: Write>(args: &CheckArgs, ctx: &CommandContext, out: &mut W) -> Result<u8> {
    let target = args.investigation.as_deref().filter(|s| !s.is_empty());

    let report = validate_project(&ctx.project_root, target, &ctx.layout, ctx.parser)
        .with_context(|| format!("failed to check {}", ctx.project_root.display()))?;

    tracing::info!(
        investigations = report.checked.len(),
        errors = report.errors.len(),
        "check finished"
    );

    print_report(&report, out)?;
    Ok(if report.is_valid() { 0 } else { 1 })
}

fn print_report<W: Write>(report: &StructureReport, out: &mut W) -> Result<()> {
    if report.is_valid() {
        writeln!(out, "All checks passed.")?;
    } else {
        writeln!(out, "Validation errors found:")?;
        for error in &report.errors {
            writeln!(out, " - {error}")?;
        }
    }
    Ok(())
}
