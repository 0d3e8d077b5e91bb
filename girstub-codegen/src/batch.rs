//! Batch generation of a whole schema directory.

use crate::config::{FailurePolicy, GeneratorOptions};
use crate::error::CodegenError;
use crate::generator::Generator;
use girstub_schema::{SchemaVersion, load_namespace_file, resolve};
use rayon::prelude::*;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Stub files written, in module name order.
    pub written: Vec<PathBuf>,
    /// Modules that failed under [`FailurePolicy::SkipAndContinue`], in
    /// module name order.
    pub failed: Vec<(String, CodegenError)>,
}

impl BatchReport {
    /// Returns true if no module failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Result of one module inside the batch.
enum Outcome {
    Written(PathBuf),
    Failed(CodegenError),
    NotStarted,
}

/// Generates one stub per logical module found in `schema_dir`.
///
/// Modules are processed in parallel. Each stub is rendered completely in
/// memory and moved into place from a temporary file, so a failed module
/// never leaves a partial stub behind. Results are reported in module name
/// order. Every failure is logged as it happens.
///
/// Under [`FailurePolicy::Abort`] no module starts once one has failed.
/// Modules already running finish, and their stubs are kept.
///
/// # Arguments
/// * `schema_dir` - Directory holding the schema files
/// * `output_dir` - Directory receiving the stubs, created if missing
/// * `requested` - Version to pick for modules present in several versions
/// * `options` - Generation options
///
/// # Errors
/// Returns `CodegenError` if the output directory or the schema directory
/// cannot be used, if a module is ambiguous, or (under
/// [`FailurePolicy::Abort`]) the first failed module in name order.
pub fn generate_all(
    schema_dir: &Path,
    output_dir: &Path,
    requested: Option<SchemaVersion>,
    options: &GeneratorOptions,
) -> Result<BatchReport, CodegenError> {
    if !output_dir.is_dir() {
        tracing::info!("creating {}", output_dir.display());
    }
    fs::create_dir_all(output_dir)?;
    write_package_marker(output_dir, &options.package_marker)?;

    let modules: Vec<(String, PathBuf)> = resolve(schema_dir, &options.schema_extension, requested)?
        .into_iter()
        .collect();
    tracing::debug!(
        "generating {} modules from {} into {}",
        modules.len(),
        schema_dir.display(),
        output_dir.display()
    );

    let abort = options.failure_policy == FailurePolicy::Abort;
    let stop = AtomicBool::new(false);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.unwrap_or(0))
        .build()?;
    let outcomes: Vec<(String, Outcome)> = pool.install(|| {
        modules
            .par_iter()
            .map(|(name, path)| {
                if abort && stop.load(Ordering::Acquire) {
                    return (name.clone(), Outcome::NotStarted);
                }
                let outcome = match generate_stub(name, path, output_dir, options) {
                    Ok(stub_path) => Outcome::Written(stub_path),
                    Err(e) => {
                        let err = e.in_module(name.as_str(), path.as_path());
                        tracing::error!("{err}: {}", err.root_cause());
                        stop.store(true, Ordering::Release);
                        Outcome::Failed(err)
                    }
                };
                (name.clone(), outcome)
            })
            .collect()
    });

    let mut report = BatchReport::default();
    let mut not_started = Vec::new();
    for (name, outcome) in outcomes {
        match outcome {
            Outcome::Written(path) => report.written.push(path),
            Outcome::Failed(err) => report.failed.push((name, err)),
            Outcome::NotStarted => not_started.push(name),
        }
    }

    if abort && !report.failed.is_empty() {
        if !not_started.is_empty() {
            tracing::warn!(
                "aborted before generating {} module(s): {}",
                not_started.len(),
                not_started.join(", ")
            );
        }
        let (_, first) = report.failed.remove(0);
        return Err(first);
    }

    Ok(report)
}

/// Renders one module and moves its stub file into place.
fn generate_stub(
    name: &str,
    schema_path: &Path,
    output_dir: &Path,
    options: &GeneratorOptions,
) -> Result<PathBuf, CodegenError> {
    let ns = load_namespace_file(schema_path)?;
    let stub = Generator::new(&ns, options).generate();

    let stub_path = output_dir.join(options.stub_file_name(name));
    let mut staged = tempfile::Builder::new()
        .prefix(".girstub-")
        .suffix(".tmp")
        .tempfile_in(output_dir)?;
    staged.write_all(stub.as_bytes())?;
    staged.persist(&stub_path).map_err(|e| e.error)?;
    tracing::info!("wrote {}", stub_path.display());

    Ok(stub_path)
}

/// Creates the empty package marker unless one already exists.
fn write_package_marker(output_dir: &Path, marker: &str) -> Result<(), CodegenError> {
    let path = output_dir.join(marker);
    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(_) => {
            tracing::debug!("created {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e.into()),
    }
}
