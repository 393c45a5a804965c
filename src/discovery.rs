//! Template discovery.
//! Recursively lists the files under the includes and pages roots and reads
//! their sources, skipping editor and OS artifacts matched by the ignore set.

use crate::constants::DEFAULT_IGNORE_PATTERNS;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Which template root a file was discovered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateRoot {
    Includes,
    Pages,
}

impl std::fmt::Display for TemplateRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateRoot::Includes => write!(f, "includes"),
            TemplateRoot::Pages => write!(f, "pages"),
        }
    }
}

/// A discovered template: absolute path plus raw source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: PathBuf,
    pub source: String,
    pub root: TemplateRoot,
}

/// Builds the set of glob patterns excluded from discovery.
///
/// The default patterns are always present; `extra` patterns come from the
/// project configuration.
///
/// # Errors
/// * `Error::GlobError` if any pattern is invalid
pub fn build_ignore_set<S: AsRef<str>>(extra: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in DEFAULT_IGNORE_PATTERNS {
        builder.add(Glob::new(pattern)?);
    }
    for pattern in extra {
        builder.add(Glob::new(pattern.as_ref())?);
    }
    Ok(builder.build()?)
}

/// Lists and reads every template file under `root`.
///
/// Symlinks are not followed. Entries are sorted by file name so repeated
/// runs see the same listing.
///
/// Sources that are not valid UTF-8 are decoded lossily. An unreadable file
/// under the includes root is skipped; under the pages root it is fatal.
///
/// # Errors
/// * `Error::DiscoveryError` if the root cannot be traversed, or a page
///   template cannot be read
pub fn discover_templates(
    root: &Path,
    kind: TemplateRoot,
    ignore: &GlobSet,
) -> Result<Vec<TemplateFile>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::DiscoveryError {
            root: root.display().to_string(),
            message: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if ignore.is_match(relative) {
            debug!("Skipping ignored {} file {}", kind, relative.display());
            continue;
        }

        let source = match read_source(path) {
            Ok(source) => source,
            Err(e) if kind == TemplateRoot::Includes => {
                warn!("Skipping unreadable include: {e}");
                continue;
            }
            Err(e) => return Err(e),
        };

        debug!("Discovered {} template {}", kind, relative.display());
        files.push(TemplateFile {
            path: path.to_path_buf(),
            source,
            root: kind,
        });
    }

    Ok(files)
}

fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::DiscoveryError {
        root: path.display().to_string(),
        message: e.to_string(),
    })?;
    match String::from_utf8(bytes) {
        Ok(source) => Ok(source),
        Err(e) => {
            warn!("{} is not valid UTF-8, decoding lossily", path.display());
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Lists the page templates. Any failure is fatal to the build.
pub fn discover_pages(root: &Path, ignore: &GlobSet) -> Result<Vec<TemplateFile>> {
    discover_templates(root, TemplateRoot::Pages, ignore)
}

/// Lists the include templates. A failure is logged and yields no includes,
/// so only pages that actually call `include` fail later, at render time.
pub fn discover_includes(root: &Path, ignore: &GlobSet) -> Vec<TemplateFile> {
    match discover_templates(root, TemplateRoot::Includes, ignore) {
        Ok(files) => files,
        Err(e) => {
            warn!("Include templates unavailable: {e}");
            Vec::new()
        }
    }
}
