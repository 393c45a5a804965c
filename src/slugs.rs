//! Slug map resolution for preview routing.
//!
//! A slug map lists, per storefront resource (products, categories, brands...),
//! the slugs the preview server should route to that resource's page.

use crate::content::parse_document;
use crate::error::{Error, Result};
use async_trait::async_trait;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

/// Resource name → slugs, in the order the resolver returned them.
///
/// Entries may be empty strings or `null`; [`SlugMap::slugs`] skips both.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct SlugMap(IndexMap<String, Vec<Option<String>>>);

impl SlugMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, resource: S, slugs: Vec<Option<String>>) {
        self.0.insert(resource.into(), slugs);
    }

    /// Every non-empty `(resource, slug)` pair, resources in map order.
    pub fn slugs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().flat_map(|(resource, slugs)| {
            slugs
                .iter()
                .filter_map(|slug| slug.as_deref())
                .filter(|slug| !slug.is_empty())
                .map(move |slug| (resource.as_str(), slug))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<R: Into<String>, S: Into<String>> FromIterator<(R, Vec<S>)> for SlugMap {
    fn from_iter<I: IntoIterator<Item = (R, Vec<S>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(resource, slugs)| {
                    (resource.into(), slugs.into_iter().map(|slug| Some(slug.into())).collect())
                })
                .collect(),
        )
    }
}

/// Supplies the slug map. Only consulted in preview mode; failures are
/// logged by the pipeline and never abort the build.
#[async_trait]
pub trait SlugResolver: Send + Sync {
    async fn resolve(&self) -> Result<SlugMap>;
}

/// Resolves the slug map from a JSON endpoint.
pub struct HttpSlugResolver {
    client: reqwest::Client,
    url: Url,
}

impl HttpSlugResolver {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| Error::ConfigError(format!("invalid slugs URL '{url}': {e}")))?;
        Ok(Self { client: reqwest::Client::new(), url })
    }
}

#[async_trait]
impl SlugResolver for HttpSlugResolver {
    async fn resolve(&self) -> Result<SlugMap> {
        debug!("Resolving slugs from {}", self.url);
        let response = self.client.get(self.url.clone()).send().await?.error_for_status()?;
        response.json().await.map_err(|e| Error::SlugResolveError {
            source_name: self.url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Reads the slug map from a JSON or YAML file.
pub struct FileSlugResolver {
    path: PathBuf,
}

impl FileSlugResolver {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SlugResolver for FileSlugResolver {
    async fn resolve(&self) -> Result<SlugMap> {
        debug!("Reading slugs from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        let value = parse_document(&self.path, &content)?;
        serde_json::from_value(value).map_err(|e| Error::SlugResolveError {
            source_name: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Used when no slug source is configured: resolves to an empty map.
pub struct NoSlugs;

#[async_trait]
impl SlugResolver for NoSlugs {
    async fn resolve(&self) -> Result<SlugMap> {
        Ok(SlugMap::new())
    }
}
