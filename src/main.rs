//! Storefront builder entry point.
//! Parses arguments, selects content and slug sources, runs the build
//! pipeline and emits the resulting configuration.

use storefront_pages::{
    cli::{get_args, Args},
    config::{get_config, Mode, ProjectConfig, ProjectPaths},
    content::{ContentSource, FileContentSource, HttpContentSource},
    error::{default_error_handler, Error, Result},
    logger::init_logger,
    pipeline::Pipeline,
    slugs::{FileSlugResolver, HttpSlugResolver, NoSlugs, SlugResolver},
};

/// Main application entry point.
#[tokio::main]
async fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args).await {
        default_error_handler(err);
    }
}

fn content_source(args: &Args, config: &ProjectConfig) -> Result<Box<dyn ContentSource>> {
    if let Some(path) = &args.cms_file {
        return Ok(Box::new(FileContentSource::new(path)));
    }
    match args.cms_url.as_deref().or(config.cms_url.as_deref()) {
        Some(url) => Ok(Box::new(HttpContentSource::new(url)?)),
        None => Err(Error::ConfigError(
            "no content source: pass --cms-url, --cms-file or set cms_url".to_string(),
        )),
    }
}

fn slug_resolver(args: &Args, config: &ProjectConfig) -> Result<Box<dyn SlugResolver>> {
    if let Some(path) = &args.slugs_file {
        return Ok(Box::new(FileSlugResolver::new(path)));
    }
    match args.slugs_url.as_deref().or(config.slugs_url.as_deref()) {
        Some(url) => Ok(Box::new(HttpSlugResolver::new(url)?)),
        None => {
            log::debug!("No slug source configured");
            Ok(Box::new(NoSlugs))
        }
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the project configuration
/// 2. Selects the mode from `--env` / `NODE_ENV`
/// 3. Runs the pipeline
/// 4. Prints or writes the build configuration
/// 5. Optionally renders the pages
async fn run(args: Args) -> Result<()> {
    let config = get_config(&args.project_dir)?;
    let paths = ProjectPaths::new(&args.project_dir, &config);
    let mode = Mode::from_env(args.env.as_deref());

    let content = content_source(&args, &config)?;
    let slugs = slug_resolver(&args, &config)?;

    let pipeline = Pipeline::from_config(paths, &config, mode)?;
    let build = pipeline.run(content.as_ref(), slugs.as_ref()).await?;

    let json = serde_json::to_string_pretty(&build.config)?;
    match &args.config_out {
        Some(path) => {
            std::fs::write(path, json)?;
            println!("Build configuration written to {}.", path.display());
        }
        None => println!("{json}"),
    }

    if args.render {
        let output = &pipeline.paths().output;
        let written = build.write_pages(output)?;
        println!("Rendered {} pages into {}.", written.len(), output.display());
    }

    Ok(())
}
