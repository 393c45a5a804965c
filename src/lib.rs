//! Storefront build configuration.
//! Discovers page and include templates, enumerates one page per template or
//! per CMS collection entry, and derives preview-server rewrites from the
//! pages and a resolved slug map.

/// Command-line interface module
pub mod cli;

/// Project configuration, directory layout, build mode and branding
pub mod config;

/// Common constants and defaults
pub mod constants;

/// CMS content data bundle and its sources
pub mod content;

/// Recursive template discovery under the includes and pages roots
pub mod discovery;

/// Error types and handling
pub mod error;

/// Include registry and the `include(name, args)` template function
pub mod includes;

/// Logger initialization
pub mod logger;

/// Page enumeration, including `_cms/<collection>` data-driven templates
pub mod pages;

/// Stage sequencing from content fetch to build configuration
pub mod pipeline;

/// Page rendering into the output directory
pub mod render;

/// Preview-server rewrite rules
pub mod rewrites;

/// Resource slug map resolution
pub mod slugs;

/// Declarative build configuration and tasks
pub mod tasks;
