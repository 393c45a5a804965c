//! Command-line interface implementation for the storefront builder.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Storefront: configure page builds from templates and CMS content",
    long_about = None
)]
pub struct Args {
    /// Storefront project directory
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: PathBuf,

    /// Build environment; `production` disables the preview server configuration
    #[arg(long = "env", env = "NODE_ENV", value_name = "ENV")]
    pub env: Option<String>,

    /// URL of the CMS content data (overrides the project configuration)
    #[arg(long, value_name = "URL", conflicts_with = "cms_file")]
    pub cms_url: Option<String>,

    /// Read CMS content data from a JSON or YAML file instead of fetching it
    #[arg(long, value_name = "FILE")]
    pub cms_file: Option<PathBuf>,

    /// URL of the resource slug map used for preview routing
    #[arg(long, value_name = "URL", conflicts_with = "slugs_file")]
    pub slugs_url: Option<String>,

    /// Read the resource slug map from a JSON or YAML file
    #[arg(long, value_name = "FILE")]
    pub slugs_file: Option<PathBuf>,

    /// Write the build configuration to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub config_out: Option<PathBuf>,

    /// Render every page into the output directory
    #[arg(short, long)]
    pub render: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
