//! Page enumeration.
//!
//! A page template normally yields one page whose slug is its path relative to
//! the pages root, extension stripped. Templates under `_cms/` are data-driven:
//! `_cms/<collection>` yields one page per entry of that collection in the
//! content bundle, slugged by the entry key, and nothing when the collection
//! does not exist.

use crate::constants::CMS_MARKER;
use crate::content::ContentBundle;
use crate::discovery::TemplateFile;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// One page to build: which template, which output slug, and the data it
/// renders against.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDescriptor {
    pub template_path: PathBuf,
    pub slug: String,
    pub shared_params: Arc<ContentBundle>,
}

impl PageDescriptor {
    /// Output file name, relative to the output directory.
    pub fn filename(&self) -> String {
        format!("{}.html", self.slug)
    }
}

/// Path of `template` relative to `pages_root` without its last extension,
/// components joined with `/` on every platform.
///
/// Returns `None` for paths outside the root.
pub fn page_filename(template: &Path, pages_root: &Path) -> Option<String> {
    let relative = template.strip_prefix(pages_root).ok()?.with_extension("");
    let parts: Vec<&str> = relative
        .components()
        .map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Option<_>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Collection key named by a marker-prefixed filename: `_cms/posts` → `posts`.
pub fn collection_key(filename: &str) -> Option<&str> {
    filename.strip_prefix(CMS_MARKER)?.strip_prefix('/')
}

/// Enumerates the pages produced by one template. Never fails: unknown
/// collections and unusable entries simply produce fewer pages.
pub fn enumerate_pages(
    template: &TemplateFile,
    pages_root: &Path,
    bundle: &Arc<ContentBundle>,
) -> Vec<PageDescriptor> {
    let Some(filename) = page_filename(&template.path, pages_root) else {
        debug!(
            "Skipping {}: not under {}",
            template.path.display(),
            pages_root.display()
        );
        return Vec::new();
    };

    let page = |slug: &str| PageDescriptor {
        template_path: template.path.clone(),
        slug: slug.to_string(),
        shared_params: Arc::clone(bundle),
    };

    let Some(key) = collection_key(&filename) else {
        return vec![page(&filename)];
    };

    let Some(collection) = bundle.collection(key) else {
        if !bundle.contains_key(key) {
            debug!("No '{}' collection in content data; {} yields no pages", key, filename);
        }
        return Vec::new();
    };

    collection
        .keys()
        .filter(|slug| {
            if slug.is_empty() {
                debug!("Skipping entry with empty slug in '{}'", key);
            }
            !slug.is_empty()
        })
        .map(|slug| page(slug))
        .collect()
}

/// Enumerates every template in order, warning about slugs claimed by more
/// than one page. Duplicates are kept; the page written last wins.
pub fn enumerate_all(
    templates: &[TemplateFile],
    pages_root: &Path,
    bundle: &Arc<ContentBundle>,
) -> Vec<PageDescriptor> {
    let pages: Vec<PageDescriptor> = templates
        .iter()
        .flat_map(|template| enumerate_pages(template, pages_root, bundle))
        .collect();

    let mut claimed: HashMap<&str, &Path> = HashMap::new();
    for page in &pages {
        if let Some(previous) = claimed.insert(&page.slug, &page.template_path) {
            warn!(
                "Slug '{}' is produced by both {} and {}",
                page.slug,
                previous.display(),
                page.template_path.display()
            );
        }
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_filename() {
        let root = Path::new("/site/src/views/pages");
        let filename = |path: &Path| page_filename(path, root);
        assert_eq!(filename(&root.join("index.html")).as_deref(), Some("index"));
        assert_eq!(filename(&root.join("shop/cart.html")).as_deref(), Some("shop/cart"));
        assert_eq!(filename(&root.join("_cms/posts.html")).as_deref(), Some("_cms/posts"));
        assert_eq!(filename(Path::new("/elsewhere/index.html")), None);
    }

    #[test]
    fn test_collection_key() {
        assert_eq!(collection_key("_cms/posts"), Some("posts"));
        assert_eq!(collection_key("_cms/blog-posts"), Some("blog-posts"));
        assert_eq!(collection_key("_cmsposts"), None);
        assert_eq!(collection_key("index"), None);
    }
}
