//! girstub command line.
//!
//! ```text
//! girstub gen <GIR_DIR> <MODULE> [VERSION]
//! girstub all <GIR_DIR> <OUT_DIR> [--version V] [--keep-going] [--jobs N]
//! ```

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use girstub::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "girstub", version)]
#[command(about = "Generate Python type stubs from GObject-Introspection schemas")]
struct Cli {
    /// Modules imported by every stub from `gi.repository`
    #[arg(long = "import", global = true, value_delimiter = ',', env = "GIRSTUB_IMPORTS")]
    imports: Option<Vec<String>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the stub of one module to stdout
    Gen {
        /// Directory holding the GIR files
        #[arg(env = "GIRSTUB_GIR_DIR")]
        gir_dir: PathBuf,

        /// Logical module name (e.g. Gtk)
        module: String,

        /// Exact schema version to use (e.g. 4 or 4.0)
        #[arg(value_name = "VERSION")]
        schema_version: Option<SchemaVersion>,
    },

    /// Write one stub per module into an output directory
    All {
        /// Directory holding the GIR files
        #[arg(env = "GIRSTUB_GIR_DIR")]
        gir_dir: PathBuf,

        /// Directory receiving the stubs
        #[arg(env = "GIRSTUB_OUT_DIR")]
        out_dir: PathBuf,

        /// Version to pick for modules present in several versions
        #[arg(long = "version", value_name = "V", env = "GIRSTUB_VERSION")]
        schema_version: Option<SchemaVersion>,

        /// Keep generating after a module fails
        #[arg(long, env = "GIRSTUB_KEEP_GOING")]
        keep_going: bool,

        /// Worker threads (defaults to one per core)
        #[arg(short, long, env = "GIRSTUB_JOBS")]
        jobs: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut options = GeneratorOptions::new();
    if let Some(imports) = cli.imports {
        options = options.repository_imports(imports);
    }

    match cli.command {
        Command::Gen {
            gir_dir,
            module,
            schema_version,
        } => {
            let mut out = std::io::stdout().lock();
            generate_module(&gir_dir, &module, schema_version, &options, &mut out)
                .with_context(|| format!("cannot generate {module} from {}", gir_dir.display()))?;
        }
        Command::All {
            gir_dir,
            out_dir,
            schema_version,
            keep_going,
            jobs,
        } => {
            if keep_going {
                options = options.failure_policy(FailurePolicy::SkipAndContinue);
            }
            if let Some(jobs) = jobs {
                options = options.jobs(jobs);
            }

            let report = generate_all(&gir_dir, &out_dir, schema_version, &options)
                .with_context(|| format!("cannot generate stubs into {}", out_dir.display()))?;
            tracing::info!("{} stubs written to {}", report.written.len(), out_dir.display());

            if !report.is_success() {
                let failed: Vec<&str> = report.failed.iter().map(|(name, _)| name.as_str()).collect();
                bail!("{} module(s) failed: {}", failed.len(), failed.join(", "));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsString;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_gen() {
        let cli = Cli::try_parse_from(["girstub", "gen", "/gir", "Gtk", "4"])
            .expect("Failed to parse");
        match cli.command {
            Command::Gen {
                gir_dir,
                module,
                schema_version,
            } => {
                assert_eq!(gir_dir, PathBuf::from("/gir"));
                assert_eq!(module, "Gtk");
                assert_eq!(schema_version, Some(SchemaVersion::new(4, 0)));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_all() {
        let cli = Cli::try_parse_from([
            "girstub",
            "all",
            "/gir",
            "/out",
            "--version",
            "3.0",
            "--keep-going",
            "--jobs",
            "4",
            "--import",
            "GObject,Gio",
        ])
        .expect("Failed to parse");

        assert_eq!(
            cli.imports,
            Some(vec!["GObject".to_string(), "Gio".to_string()])
        );
        match cli.command {
            Command::All {
                schema_version,
                keep_going,
                jobs,
                ..
            } => {
                assert_eq!(schema_version, Some(SchemaVersion::new(3, 0)));
                assert!(keep_going);
                assert_eq!(jobs, Some(4));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_invalid_version() {
        let result = Cli::try_parse_from(["girstub", "gen", "/gir", "Gtk", "four"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_all_keep_going_fails() {
        let gir = tempfile::tempdir().expect("Failed to create temp dir");
        let out = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(gir.path().join("Bad-1.0.gir"), "<repository/>").unwrap();

        let args: Vec<OsString> = vec![
            "girstub".into(),
            "all".into(),
            gir.path().into(),
            out.path().into(),
            "--keep-going".into(),
        ];
        let cli = Cli::try_parse_from(args).expect("Failed to parse");

        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("Bad"));
    }
}
