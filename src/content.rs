//! Content data bundle and the sources it can be fetched from.
//!
//! The bundle is a single JSON document: a `settings` object plus any number of
//! named collections (slug → item data). It is fetched once per build and is
//! read-only afterwards; stages share it behind an `Arc`.

use crate::error::{Error, Result};
use async_trait::async_trait;
use log::debug;
use serde_json::{Map, Value};
use std::path::PathBuf;
use url::Url;

/// Immutable snapshot of site settings and collections for one build.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBundle {
    data: Map<String, Value>,
}

impl ContentBundle {
    /// Builds a bundle from a fetched document, which must be a JSON object.
    /// A missing `settings` key is treated as empty settings.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(data) => {
                if let Some(settings) = data.get("settings") {
                    if !settings.is_object() {
                        return Err(Error::ContentFetchError {
                            source_name: "content bundle".to_string(),
                            message: "'settings' must be an object".to_string(),
                        });
                    }
                }
                Ok(Self { data })
            }
            other => Err(Error::ContentFetchError {
                source_name: "content bundle".to_string(),
                message: format!("expected an object, found {}", json_kind(&other)),
            }),
        }
    }

    pub fn empty() -> Self {
        Self { data: Map::new() }
    }

    /// Site settings; empty when the bundle carries none.
    pub fn settings(&self) -> Map<String, Value> {
        self.data.get("settings").and_then(Value::as_object).cloned().unwrap_or_default()
    }

    /// Looks up a collection by key. `None` when the key is absent or does not
    /// hold an object.
    pub fn collection(&self, key: &str) -> Option<&Map<String, Value>> {
        match self.data.get(key) {
            Some(Value::Object(entries)) => Some(entries),
            Some(other) => {
                debug!("'{}' is {}, not a collection", key, json_kind(other));
                None
            }
            None => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// The whole bundle as a template context.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Supplies the content bundle. A failed fetch aborts the build.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self) -> Result<ContentBundle>;
}

/// Fetches the bundle as JSON over HTTP.
pub struct HttpContentSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpContentSource {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| Error::ConfigError(format!("invalid content URL '{url}': {e}")))?;
        Ok(Self { client: reqwest::Client::new(), url })
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self) -> Result<ContentBundle> {
        debug!("Fetching content data from {}", self.url);
        let response = self.client.get(self.url.clone()).send().await?.error_for_status()?;
        let value: Value = response.json().await?;
        ContentBundle::from_value(value).map_err(|e| Error::ContentFetchError {
            source_name: self.url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Reads the bundle from a JSON or YAML file, mainly for offline builds.
pub struct FileContentSource {
    path: PathBuf,
}

impl FileContentSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContentSource for FileContentSource {
    async fn fetch(&self) -> Result<ContentBundle> {
        debug!("Reading content data from {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        let value = parse_document(&self.path, &content)?;
        ContentBundle::from_value(value)
    }
}

/// Parses a JSON document, or YAML when the file extension says so.
pub(crate) fn parse_document(path: &std::path::Path, content: &str) -> Result<Value> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yml") | Some("yaml") => Ok(serde_yaml::from_str(content)?),
        _ => Ok(serde_json::from_str(content)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_lookup() {
        let bundle = ContentBundle::from_value(json!({
            "settings": {"name": "Shop"},
            "posts": {"a": {}, "b": {}},
            "tags": ["x", "y"]
        }))
        .unwrap();

        assert_eq!(bundle.collection("posts").map(|c| c.len()), Some(2));
        assert!(bundle.collection("tags").is_none());
        assert!(bundle.collection("missing").is_none());
        assert_eq!(bundle.settings().get("name"), Some(&json!("Shop")));
    }

    #[test]
    fn test_rejects_non_object_bundle() {
        assert!(ContentBundle::from_value(json!([1, 2])).is_err());
        assert!(ContentBundle::from_value(json!({"settings": "oops"})).is_err());
    }

    #[test]
    fn test_missing_settings_is_empty() {
        let bundle = ContentBundle::from_value(json!({"posts": {}})).unwrap();
        assert!(bundle.settings().is_empty());
    }
}
