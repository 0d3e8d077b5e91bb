//! Error types for code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing or model building error.
    #[error("schema parse error: {0}")]
    Parse(#[from] girstub_schema::ParseError),

    /// Schema directory resolution error.
    #[error("schema resolution error: {0}")]
    Resolve(#[from] girstub_schema::ResolveError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Worker pool could not be created.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Generation of one module failed.
    #[error("failed to generate module '{module}' from {}", .path.display())]
    Module {
        /// Logical module name.
        module: String,
        /// Schema path.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: Box<CodegenError>,
    },
}

impl CodegenError {
    /// Attaches module identity to an error.
    pub fn in_module(self, module: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Module {
            module: module.into(),
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, below any module context.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Module { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
