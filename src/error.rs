//! Error handling for storefront builds.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while configuring a storefront build.
///
/// Fatal errors (content fetch, pages discovery) abort the pipeline and reach
/// the caller unchanged. Slug resolution errors are logged by the pipeline and
/// never escape it.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The content data bundle could not be fetched or has an invalid shape.
    #[error("Failed to fetch content data from {source_name}: {message}.")]
    ContentFetchError { source_name: String, message: String },

    /// The slug map could not be resolved.
    #[error("Failed to resolve slugs from {source_name}: {message}.")]
    SlugResolveError { source_name: String, message: String },

    /// A template root could not be scanned.
    #[error("Failed to discover templates under '{root}': {message}.")]
    DiscoveryError { root: String, message: String },

    /// Two include files share the same name and collisions are rejected.
    #[error("Include '{name}' is defined by both '{first}' and '{second}'.")]
    IncludeCollision { name: String, first: String, second: String },

    /// Represents errors raised by MiniJinja while compiling or rendering templates
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("HTTP error: {0}.")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid rewrite pattern: {0}.")]
    PatternError(#[from] regex::Error),

    #[error("Invalid ignore pattern: {0}.")]
    GlobError(#[from] globset::Error),

    /// A blocking build stage panicked or was aborted.
    #[error("Build stage failed: {0}.")]
    StageError(#[from] tokio::task::JoinError),
}

/// Convenience type alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
