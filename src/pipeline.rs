//! Build orchestration.
//!
//! Stages run in a fixed order, each handing an owned value to the next:
//!
//! 1. fetch the content bundle (fatal on failure)
//! 2. discover and compile includes (the pre-compile gate)
//! 3. discover page templates and enumerate pages (fatal on scan failure)
//! 4. preview only: resolve slugs and build rewrites (failure is logged)
//! 5. assemble the [`BuildConfig`]
//!
//! The include and page scans of stages 2 and 3 run on blocking threads and
//! may overlap; nothing consumes pages before both have finished.

use crate::config::{Branding, CollisionPolicy, Mode, ProjectConfig, ProjectPaths};
use crate::content::{ContentBundle, ContentSource};
use crate::discovery::{build_ignore_set, discover_includes, discover_pages, TemplateFile};
use crate::error::Result;
use crate::includes::CompiledIncludes;
use crate::pages::{enumerate_all, PageDescriptor};
use crate::render::PageRenderer;
use crate::rewrites::RewriteTable;
use crate::slugs::SlugResolver;
use crate::tasks::{self, BuildConfig, Task};
use globset::GlobSet;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything one build run produced.
#[derive(Debug)]
pub struct Build {
    pub config: BuildConfig,
    pub pages: Vec<PageDescriptor>,
    pub includes: CompiledIncludes,
    pub bundle: Arc<ContentBundle>,
    templates: Vec<TemplateFile>,
}

impl Build {
    /// Page renderer over the compiled includes and discovered page templates.
    pub fn into_renderer(self) -> Result<(PageRenderer, Vec<PageDescriptor>)> {
        let renderer = PageRenderer::new(self.includes, &self.templates)?;
        Ok((renderer, self.pages))
    }

    /// Renders every page into `output_dir`.
    pub fn write_pages(self, output_dir: &Path) -> Result<Vec<PathBuf>> {
        let (renderer, pages) = self.into_renderer()?;
        renderer.write_pages(&pages, output_dir)
    }
}

/// One-shot build pipeline. Holds no state between runs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    paths: ProjectPaths,
    mode: Mode,
    port: u16,
    collisions: CollisionPolicy,
    ignore: GlobSet,
}

impl Pipeline {
    /// Pipeline with the default port, collision policy and ignore patterns.
    pub fn new(paths: ProjectPaths, mode: Mode) -> Result<Self> {
        Self::from_config(paths, &ProjectConfig::default(), mode)
    }

    pub fn from_config(paths: ProjectPaths, config: &ProjectConfig, mode: Mode) -> Result<Self> {
        Ok(Self {
            paths,
            mode,
            port: config.dev_server_port,
            collisions: config.include_collisions,
            ignore: build_ignore_set(config.ignore.as_slice())?,
        })
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    /// Runs every stage. `slugs` is only consulted in preview mode.
    ///
    /// # Errors
    /// * Any error of `content.fetch()`; no configuration is produced
    /// * `Error::DiscoveryError` if the pages root cannot be scanned
    /// * `Error::MinijinjaError` / `Error::IncludeCollision` from include compilation
    pub async fn run(
        &self,
        content: &dyn ContentSource,
        slugs: &dyn SlugResolver,
    ) -> Result<Build> {
        info!("Configuring {:?} build in {}", self.mode, self.paths.root.display());

        let bundle = Arc::new(content.fetch().await?);

        let includes_stage = {
            let root = self.paths.includes();
            let ignore = self.ignore.clone();
            let bundle = Arc::clone(&bundle);
            let policy = self.collisions;
            tokio::task::spawn_blocking(move || {
                let files = discover_includes(&root, &ignore);
                CompiledIncludes::compile(&files, bundle, policy)
            })
        };
        let pages_stage = {
            let root = self.paths.pages();
            let ignore = self.ignore.clone();
            tokio::task::spawn_blocking(move || discover_pages(&root, &ignore))
        };
        let (includes, templates) = tokio::try_join!(includes_stage, pages_stage)?;
        let templates = templates?;
        let includes = includes?;
        info!("Compiled {} includes", includes.len());

        let pages = enumerate_all(&templates, &self.paths.pages(), &bundle);
        info!("Enumerated {} pages from {} templates", pages.len(), templates.len());

        let dev_server = match self.mode {
            Mode::Preview => {
                let rewrites = build_rewrites(&pages, slugs).await?;
                Some(tasks::dev_server(&self.paths, self.port, rewrites))
            }
            Mode::Production => None,
        };

        let branding = Branding::from_settings(&bundle.settings(), &self.paths.public);
        let mut plugins = tasks::static_tasks(&self.paths, &branding);
        plugins.push(Task::TemplateIncludes {
            dir: self.paths.includes(),
            names: includes.names().map(str::to_string).collect(),
        });
        if self.mode.is_preview() {
            plugins.push(Task::WatchIncludes { dirs: vec![self.paths.includes()] });
        }
        plugins.extend(pages.iter().map(|page| tasks::page_task(page, self.mode)));

        let config = BuildConfig {
            mode: self.mode,
            entry: self.paths.entries(),
            output: tasks::output(&self.paths),
            devtool: "source-map",
            dev_server,
            module: tasks::module_rules(&branding, self.mode),
            plugins,
        };

        Ok(Build { config, pages, includes, bundle, templates })
    }
}

/// Page rewrites followed by slug-map rewrites. A failing resolver leaves the
/// page rewrites alone.
async fn build_rewrites(
    pages: &[PageDescriptor],
    slugs: &dyn SlugResolver,
) -> Result<RewriteTable> {
    let mut rewrites = RewriteTable::from_pages(pages)?;
    let page_rules = rewrites.len();

    match slugs.resolve().await {
        Ok(map) => {
            let mut extended = rewrites.clone();
            match extended.extend_from_slug_map(&map) {
                Ok(()) => rewrites = extended,
                Err(e) => error!("Ignoring slug rewrites: {e}"),
            }
        }
        Err(e) => error!("Slug resolution failed, routing pages only: {e}"),
    }

    info!("Built {} rewrites ({} from pages)", rewrites.len(), page_rules);
    Ok(rewrites)
}
