//! Page rendering.
//! Renders enumerated pages through the environment that already holds the
//! compiled includes, and writes them to the output directory.

use crate::constants::PAGE_PREFIX;
use crate::discovery::TemplateFile;
use crate::error::{Error, Result};
use crate::includes::CompiledIncludes;
use crate::pages::PageDescriptor;
use log::debug;
use minijinja::Environment;
use std::fs;
use std::path::{Path, PathBuf};

fn page_key(path: &Path) -> String {
    format!("{PAGE_PREFIX}{}", path.display())
}

/// Renders page templates. Can only be built from [`CompiledIncludes`], so
/// includes are always compiled before the first page renders.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// Compiles the page `templates` next to the includes.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if a page template has a syntax error
    pub fn new(includes: CompiledIncludes, templates: &[TemplateFile]) -> Result<Self> {
        let mut env = includes.into_environment();
        for template in templates {
            env.add_template_owned(page_key(&template.path), template.source.clone())?;
        }
        Ok(Self { env })
    }

    /// Renders one page against its shared params plus a `page` object
    /// carrying its `slug` and output `filename`.
    pub fn render(&self, page: &PageDescriptor) -> Result<String> {
        let template = self.env.get_template(&page_key(&page.template_path))?;

        let mut context = page.shared_params.as_map().clone();
        context.insert(
            "page".to_string(),
            serde_json::json!({ "slug": page.slug, "filename": page.filename() }),
        );

        Ok(template.render(serde_json::Value::Object(context))?)
    }

    /// Renders every page into `output_dir/<slug>.html`. Pages sharing a slug
    /// overwrite each other in order.
    pub fn write_pages(&self, pages: &[PageDescriptor], output_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(pages.len());
        for page in pages {
            let html = self.render(page)?;
            let target = output_dir.join(page.filename());
            write_file(&target, &html)?;
            debug!("Wrote page '{}' to {}", page.slug, target.display());
            written.push(target);
        }
        Ok(written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    fs::write(path, content).map_err(Error::IoError)
}
