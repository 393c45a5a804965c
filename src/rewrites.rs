//! Preview-server rewrite rules.
//!
//! Rules come from two sources and are kept in insertion order without
//! deduplication: first one per enumerated page (`/<slug>` → `/<slug>.html`),
//! then one per resolved resource slug (`/<slug>` → `/_<resource>.html`).
//! The preview server applies the first rule that matches.

use crate::error::Result;
use crate::pages::PageDescriptor;
use crate::slugs::SlugMap;
use regex::Regex;
use serde::{Serialize, Serializer};

/// Rewrites a root-relative path that equals `/<slug>` exactly.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub pattern: Regex,
    pub target: String,
}

impl RewriteRule {
    /// The slug is matched literally; regex metacharacters in it are escaped.
    pub fn new(slug: &str, target: String) -> Result<Self> {
        let pattern = Regex::new(&format!("^/{}$", regex::escape(slug)))?;
        Ok(Self { pattern, target })
    }

    pub fn for_page(page: &PageDescriptor) -> Result<Self> {
        Self::new(&page.slug, format!("/{}", page.filename()))
    }

    pub fn for_resource(resource: &str, slug: &str) -> Result<Self> {
        Self::new(slug, format!("/_{resource}.html"))
    }

    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

impl PartialEq for RewriteRule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.as_str() == other.pattern.as_str() && self.target == other.target
    }
}

impl Serialize for RewriteRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut rule = serializer.serialize_struct("RewriteRule", 2)?;
        rule.serialize_field("from", self.pattern.as_str())?;
        rule.serialize_field("to", &self.target)?;
        rule.end()
    }
}

/// Ordered rewrite rules for the preview server's history fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RewriteTable {
    rules: Vec<RewriteRule>,
}

impl RewriteTable {
    /// One rule per page, in page order.
    pub fn from_pages(pages: &[PageDescriptor]) -> Result<Self> {
        let rules = pages.iter().map(RewriteRule::for_page).collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Appends one rule per non-empty slug of every resource.
    pub fn extend_from_slug_map(&mut self, slugs: &SlugMap) -> Result<()> {
        for (resource, slug) in slugs.slugs() {
            self.rules.push(RewriteRule::for_resource(resource, slug)?);
        }
        Ok(())
    }

    /// Target of the first rule matching `path`.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        self.rules.iter().find(|rule| rule.matches(path)).map(|rule| rule.target.as_str())
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
