//! # defaultdata CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use defaultdata_cli::check::{run_check, CheckArgs};
use defaultdata_cli::package::{run_package, PackageArgs};
use defaultdata_cli::CommandContext;

/// Check and package investigation datasets.
#[derive(Parser, Debug)]
#[command(name = "defaultdata", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project root directory. Defaults to the current directory.
    #[arg(long, global = true)]
    project_dir: Option<PathBuf>,

    /// Path to a YAML layout configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the project layout and file contents.
    Check(CheckArgs),

    /// Write datapackage.json from the project's sidecar files.
    Package(PackageArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let parser = defaultdata_core::default_parser();
    if parser.is_none() {
        tracing::debug!("built without YAML support");
    }

    let result = CommandContext::new(cli.project_dir.as_deref(), cli.config.as_deref(), parser)
        .and_then(|ctx| {
            tracing::debug!(project_root = %ctx.project_root.display(), "resolved project root");
            match &cli.command {
                Commands::Check(args) => run_check(args, &ctx),
                Commands::Package(args) => run_package(args, &ctx),
            }
        });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_check_all() {
        let cli = Cli::try_parse_from(["defaultdata", "check"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert!(args.investigation.is_none()),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.verbose, 0);
        assert!(cli.project_dir.is_none());
    }

    #[test]
    fn cli_parse_check_investigation() {
        let cli = Cli::try_parse_from(["defaultdata", "check", "growth"]).unwrap();
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.investigation.as_deref(), Some("growth"));
        }
    }

    #[test]
    fn cli_parse_package_investigation() {
        let cli = Cli::try_parse_from(["defaultdata", "package", "growth"]).unwrap();
        match cli.command {
            Commands::Package(args) => assert_eq!(args.investigation.as_deref(), Some("growth")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "defaultdata",
            "package",
            "-vv",
            "--project-dir",
            "/tmp/study",
            "--config",
            "layout.yml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.project_dir, Some(PathBuf::from("/tmp/study")));
        assert_eq!(cli.config, Some(PathBuf::from("layout.yml")));
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["defaultdata"]).is_err());
    }

    #[test]
    fn cli_rejects_extra_positional() {
        assert!(Cli::try_parse_from(["defaultdata", "check", "a", "b"]).is_err());
    }
}
