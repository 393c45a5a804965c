use std::fs;

use serde_json::json;
use storefront_pages::config::get_config;
use storefront_pages::content::{ContentSource, FileContentSource, HttpContentSource};
use storefront_pages::error::Error;
use storefront_pages::slugs::{FileSlugResolver, NoSlugs, SlugResolver};
use tempfile::TempDir;

#[tokio::test]
async fn test_file_content_source_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("content.json");
    fs::write(&path, r#"{"settings": {"name": "Shop"}, "posts": {"b": {}, "a": {}}}"#).unwrap();

    let bundle = FileContentSource::new(&path).fetch().await.unwrap();

    assert_eq!(bundle.settings().get("name"), Some(&json!("Shop")));
    let slugs: Vec<&String> = bundle.collection("posts").unwrap().keys().collect();
    assert_eq!(slugs, vec!["b", "a"]);
}

#[tokio::test]
async fn test_file_content_source_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("content.yml");
    fs::write(&path, "settings:\n  name: Shop\npages:\n  about:\n    title: About\n").unwrap();

    let bundle = FileContentSource::new(&path).fetch().await.unwrap();
    assert_eq!(bundle.collection("pages").unwrap().len(), 1);
}

#[tokio::test]
async fn test_file_content_source_errors() {
    let temp_dir = TempDir::new().unwrap();

    let missing = FileContentSource::new(temp_dir.path().join("missing.json")).fetch().await;
    assert!(matches!(missing, Err(Error::IoError(_))));

    let path = temp_dir.path().join("content.json");
    fs::write(&path, "[1, 2, 3]").unwrap();
    let invalid = FileContentSource::new(&path).fetch().await;
    assert!(matches!(invalid, Err(Error::ContentFetchError { .. })));
}

#[test]
fn test_http_source_rejects_invalid_url() {
    assert!(matches!(HttpContentSource::new("not a url"), Err(Error::ConfigError(_))));
    assert!(HttpContentSource::new("https://cms.example.com/content.json").is_ok());
}

#[tokio::test]
async fn test_file_slug_resolver() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("slugs.json");
    fs::write(&path, r#"{"products": ["shoe", "", "hat"], "categories": ["sale"]}"#).unwrap();

    let map = FileSlugResolver::new(&path).resolve().await.unwrap();
    let pairs: Vec<(&str, &str)> = map.slugs().collect();
    assert_eq!(pairs, vec![("products", "shoe"), ("products", "hat"), ("categories", "sale")]);

    fs::write(&path, r#"{"products": "shoe"}"#).unwrap();
    let invalid = FileSlugResolver::new(&path).resolve().await;
    assert!(matches!(invalid, Err(Error::SlugResolveError { .. })));

    assert!(NoSlugs.resolve().await.unwrap().is_empty());
}

#[test]
fn test_get_config_defaults_and_file() {
    let temp_dir = TempDir::new().unwrap();

    let config = get_config(temp_dir.path()).unwrap();
    assert_eq!(config.dev_server_port, 9123);
    assert!(config.cms_url.is_none());

    fs::write(
        temp_dir.path().join("storefront.json"),
        r#"{"cms_url": "https://cms.example.com/content.json", "output_dir": "public_html"}"#,
    )
    .unwrap();
    let config = get_config(temp_dir.path()).unwrap();
    assert_eq!(config.cms_url.as_deref(), Some("https://cms.example.com/content.json"));
    assert_eq!(config.output_dir, std::path::PathBuf::from("public_html"));
}
