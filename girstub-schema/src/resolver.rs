//! Schema directory discovery and version selection.
//!
//! GIR files are named `<name>-<major>.<minor>.gir`. Several files may share
//! a logical module name at different versions; the resolver groups them and
//! picks one per name.

use crate::error::ResolveError;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

/// File extension of GIR schema documents.
pub const SCHEMA_EXTENSION: &str = "gir";

static VERSIONED_STEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)-(\d+)\.(\d+)$").expect("versioned stem pattern is valid")
});

/// Numeric schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SchemaVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
}

impl SchemaVersion {
    /// Version of files without a version suffix.
    pub const UNVERSIONED: Self = Self::new(0, 0);

    /// Creates a version.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl FromStr for SchemaVersion {
    type Err = ResolveError;

    /// Parses `4` or `4.0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ResolveError::InvalidVersion {
            value: s.to_string(),
        };
        let (major, minor) = s.trim().split_once('.').unwrap_or((s.trim(), "0"));
        Ok(Self::new(
            major.parse().map_err(|_| invalid())?,
            minor.parse().map_err(|_| invalid())?,
        ))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// One schema file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    /// Logical module name.
    pub name: String,
    /// Path of the schema file.
    pub path: PathBuf,
    /// Version parsed from the file name.
    pub version: SchemaVersion,
}

impl ModuleEntry {
    /// Derives an entry from a schema path.
    ///
    /// Stems that do not end in `-<major>.<minor>` are unversioned and use
    /// the whole stem as the logical name.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;

        let (name, version) = match VERSIONED_STEM.captures(stem) {
            Some(caps) => {
                let major = caps[2].parse().ok()?;
                let minor = caps[3].parse().ok()?;
                (caps[1].to_string(), SchemaVersion::new(major, minor))
            }
            None => (stem.to_string(), SchemaVersion::UNVERSIONED),
        };

        Some(Self {
            name,
            path: path.to_path_buf(),
            version,
        })
    }
}

/// Lists the schema files of a directory, grouped by logical name.
///
/// Entries within a group are ordered by version.
///
/// # Errors
/// Returns `ResolveError::Io` if the directory cannot be read.
pub fn discover(
    dir: &Path,
    extension: &str,
) -> Result<BTreeMap<String, Vec<ModuleEntry>>, ResolveError> {
    let mut modules: BTreeMap<String, Vec<ModuleEntry>> = BTreeMap::new();

    for dir_entry in std::fs::read_dir(dir)? {
        let dir_entry = dir_entry?;
        if !dir_entry.file_type()?.is_file() {
            continue;
        }
        let path = dir_entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        match ModuleEntry::from_path(&path) {
            Some(entry) => {
                tracing::debug!("found {} {} at {}", entry.name, entry.version, path.display());
                modules.entry(entry.name.clone()).or_default().push(entry);
            }
            None => tracing::warn!("skipping schema with unusable name: {}", path.display()),
        }
    }

    for entries in modules.values_mut() {
        entries.sort_by_key(|e| e.version);
    }

    Ok(modules)
}

/// Picks the entry of one logical module.
///
/// A lone entry is selected regardless of the request. With several
/// entries, the one matching `requested` is selected.
///
/// # Errors
/// Returns `ResolveError::AmbiguousVersion` if several entries exist and
/// none matches, or `ResolveError::ModuleNotFound` if `entries` is empty.
pub fn select<'a>(
    name: &str,
    entries: &'a [ModuleEntry],
    requested: Option<SchemaVersion>,
) -> Result<&'a ModuleEntry, ResolveError> {
    match entries {
        [] => Err(ResolveError::ModuleNotFound {
            name: name.to_string(),
        }),
        [only] => Ok(only),
        _ => requested
            .and_then(|v| entries.iter().find(|e| e.version == v))
            .ok_or_else(|| ResolveError::AmbiguousVersion {
                name: name.to_string(),
                requested: requested.map_or_else(|| "(none)".to_string(), |v| v.to_string()),
            }),
    }
}

/// Resolves every logical module of a directory to one schema path.
///
/// # Arguments
/// * `dir` - Directory holding the schema files
/// * `extension` - Schema file extension, without the dot
/// * `requested` - Version to pick where several exist
///
/// # Errors
/// Returns `ResolveError` if the directory cannot be listed or a module is
/// ambiguous.
pub fn resolve(
    dir: &Path,
    extension: &str,
    requested: Option<SchemaVersion>,
) -> Result<BTreeMap<String, PathBuf>, ResolveError> {
    let modules = discover(dir, extension)?;
    let mut chosen = BTreeMap::new();

    for (name, entries) in &modules {
        let entry = select(name, entries, requested)?;
        tracing::debug!("selected {} {}", name, entry.version);
        chosen.insert(name.clone(), entry.path.clone());
    }

    Ok(chosen)
}

/// Resolves a single logical module to its schema path.
///
/// An explicit `requested` version must match exactly, even when only one
/// schema carries the name. Without a request the rules of [`select`]
/// apply.
///
/// # Errors
/// Returns `ResolveError::ModuleNotFound` if no file carries the name,
/// `ResolveError::VersionNotFound` if none has the requested version, or
/// the errors of [`select`].
pub fn resolve_module(
    dir: &Path,
    extension: &str,
    name: &str,
    requested: Option<SchemaVersion>,
) -> Result<PathBuf, ResolveError> {
    let modules = discover(dir, extension)?;
    let entries = modules.get(name).map(Vec::as_slice).unwrap_or_default();

    match requested {
        Some(version) if !entries.is_empty() => entries
            .iter()
            .find(|e| e.version == version)
            .map(|e| e.path.clone())
            .ok_or_else(|| ResolveError::VersionNotFound {
                name: name.to_string(),
                requested: version.to_string(),
            }),
        _ => select(name, entries, requested).map(|e| e.path.clone()),
    }
}
