//! Generation options.

use girstub_schema::SCHEMA_EXTENSION;

/// What the batch does when one module fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failed module and return its error.
    #[default]
    Abort,
    /// Log the failure, keep generating the other modules.
    SkipAndContinue,
}

/// Options shared by single-module and batch generation.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Extension of written stub files, without the dot.
    pub stub_extension: String,
    /// Extension of schema files, without the dot.
    pub schema_extension: String,
    /// Empty marker file written next to the stubs.
    pub package_marker: String,
    /// Modules named in the preamble's `from gi.repository import` line.
    pub repository_imports: Vec<String>,
    /// Batch failure handling.
    pub failure_policy: FailurePolicy,
    /// Worker threads for the batch; `None` uses one per core.
    pub jobs: Option<usize>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorOptions {
    /// Creates options with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stub_extension: "pyi".to_string(),
            schema_extension: SCHEMA_EXTENSION.to_string(),
            package_marker: "__init__.py".to_string(),
            repository_imports: ["Pango", "Gdk", "Gio", "GObject", "Gsk"]
                .into_iter()
                .map(String::from)
                .collect(),
            failure_policy: FailurePolicy::Abort,
            jobs: None,
        }
    }

    /// Sets the stub file extension.
    #[must_use]
    pub fn stub_extension(mut self, extension: impl Into<String>) -> Self {
        self.stub_extension = extension.into();
        self
    }

    /// Sets the schema file extension.
    #[must_use]
    pub fn schema_extension(mut self, extension: impl Into<String>) -> Self {
        self.schema_extension = extension.into();
        self
    }

    /// Sets the package marker file name.
    #[must_use]
    pub fn package_marker(mut self, name: impl Into<String>) -> Self {
        self.package_marker = name.into();
        self
    }

    /// Replaces the preamble's repository imports.
    #[must_use]
    pub fn repository_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.repository_imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the batch failure policy.
    #[must_use]
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Sets the number of batch worker threads.
    #[must_use]
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Returns the stub file name for a logical module.
    #[must_use]
    pub fn stub_file_name(&self, module: &str) -> String {
        format!("{module}.{}", self.stub_extension)
    }
}
