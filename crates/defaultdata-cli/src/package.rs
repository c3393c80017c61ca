//! # Package Subcommand
//!
//! Builds the data package descriptor from the project's sidecars and writes
//! it to the project root.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use defaultdata_core::{build_package, write_package, Timestamp};

use crate::CommandContext;

/// Arguments for `defaultdata package`.
#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Package only this investigation.
    pub investigation: Option<String>,
}

/// Execute the package subcommand, printing to standard output.
pub fn run_package(args: &PackageArgs, ctx: &CommandContext) -> Result<u8> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_package_to(args, ctx, &mut out)
}

/// Execute the package subcommand, writing the summary line to `out`.
pub fn run_package_to<W: Write>(
    args: &PackageArgs,
    ctx: &CommandContext,
    out: &mut W,
) -> Result<u8> {
    let target = args.investigation.as_deref().filter(|s| !s.is_empty());

    let package = build_package(
        &ctx.project_root,
        target,
        &ctx.layout,
        ctx.parser,
        Timestamp::now(),
    )
    .context("failed to build data package")?;

    let written = write_package(&ctx.project_root, &package, &ctx.layout)?;
    tracing::info!(
        path = %written.display(),
        resources = package.resources.len(),
        missing_tidy = package.missing_tidy.len(),
        "wrote data package"
    );

    writeln!(
        out,
        "Created {} with {} resource(s).",
        ctx.layout.output_file,
        package.resources.len()
    )?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use defaultdata_core::DataError;

    /// Log sink shared with a scoped subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn context(root: &Path) -> CommandContext {
        CommandContext::new(Some(root), None, defaultdata_core::default_parser()).unwrap()
    }

    fn write_project(root: &Path) {
        let data = root.join("data");
        std::fs::create_dir(&data).unwrap();
        std::fs::write(data.join("alpha.tsv"), "x\ty\n1\t2\n").unwrap();
        std::fs::write(data.join("alpha.yml"), "x:\n  type: integer\ny:\n  type: integer\n")
            .unwrap();
        std::fs::write(data.join("beta.yml"), "z:\n  type: string\n").unwrap();
    }

    fn run(root: &Path, ctx: &CommandContext, investigation: Option<&str>) -> Result<String> {
        let args = PackageArgs {
            investigation: investigation.map(str::to_string),
        };
        let mut out = Vec::new();
        let code = run_package_to(&args, ctx, &mut out)?;
        assert_eq!(code, 0);
        assert!(root.join("datapackage.json").is_file());
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn packages_every_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path());
        let out = run(dir.path(), &context(dir.path()), None).unwrap();
        assert_eq!(out, "Created datapackage.json with 2 resource(s).\n");

        let written = std::fs::read_to_string(dir.path().join("datapackage.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["resources"][0]["name"], "alpha");
        assert_eq!(value["resources"][1]["name"], "beta");
        assert_eq!(value["resources"][1]["bytes"], 0);
    }

    #[test]
    fn packages_single_investigation() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path());
        let out = run(dir.path(), &context(dir.path()), Some("beta")).unwrap();
        assert_eq!(out, "Created datapackage.json with 1 resource(s).\n");
    }

    #[test]
    fn unknown_investigation_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path());
        let err = run(dir.path(), &context(dir.path()), Some("gamma")).unwrap_err();
        assert!(format!("{err:#}").contains("investigation 'gamma' not found"));
        assert!(!dir.path().join("datapackage.json").exists());
    }

    #[test]
    fn missing_tidy_file_logs_warning() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path());
        let ctx = context(dir.path());

        let logs = CapturedLogs::default();
        let sink = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_target(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let out = tracing::subscriber::with_default(subscriber, || {
            run(dir.path(), &ctx, None)
        })
        .unwrap();

        assert_eq!(out, "Created datapackage.json with 2 resource(s).\n");
        let logged = logs.contents();
        assert!(logged.contains("WARN"), "{logged}");
        assert!(logged.contains("beta.tsv' not found. Using placeholder values."), "{logged}");
        assert!(!logged.contains("alpha.tsv"), "{logged}");
    }

    #[test]
    fn write_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path());
        let mut ctx = context(dir.path());
        ctx.layout.output_file = "no_such_dir/datapackage.json".to_string();

        let args = PackageArgs { investigation: None };
        let mut out = Vec::new();
        let err = run_package_to(&args, &ctx, &mut out).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::FileWrite { .. })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn missing_parser_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_project(dir.path());
        let ctx = CommandContext::new(Some(dir.path()), None, None).unwrap();
        let err = run(dir.path(), &ctx, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::ParserUnavailable)
        ));
    }

    #[test]
    fn missing_data_folder_is_reported_without_parser() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = CommandContext::new(Some(dir.path()), None, None).unwrap();
        let err = run(dir.path(), &ctx, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::DataDirMissing { .. })
        ));
    }
}
