//! Configuration handling for storefront builds.
//! Loads the optional project configuration file and derives the directory
//! layout, build mode and branding settings consumed by the pipeline.

use crate::constants::{defaults, CONFIG_FILES, PRODUCTION_ENV};
use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Build mode, selected once from the environment when the pipeline starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Production,
    /// Local development server with rewrites, file watching and slug routing.
    Preview,
}

impl Mode {
    /// Production iff the value equals `production`; unset or anything else
    /// selects preview mode.
    pub fn from_env<S: AsRef<str>>(value: Option<S>) -> Self {
        match value {
            Some(value) if value.as_ref() == PRODUCTION_ENV => Mode::Production,
            _ => Mode::Preview,
        }
    }

    pub fn is_preview(self) -> bool {
        self == Mode::Preview
    }
}

/// What to do when two include files resolve to the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Last compiled file wins; a warning names both files.
    #[default]
    Overwrite,
    /// Compilation fails with [`Error::IncludeCollision`].
    Reject,
}

/// Contents of `storefront.json` / `storefront.yml` / `storefront.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub cms_url: Option<String>,
    pub slugs_url: Option<String>,
    pub src_dir: PathBuf,
    pub public_dir: PathBuf,
    pub output_dir: PathBuf,
    pub dev_server_port: u16,
    pub include_collisions: CollisionPolicy,
    /// Extra glob patterns excluded from template discovery.
    pub ignore: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            cms_url: None,
            slugs_url: None,
            src_dir: PathBuf::from(defaults::SRC_DIR),
            public_dir: PathBuf::from(defaults::PUBLIC_DIR),
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            dev_server_port: defaults::DEV_SERVER_PORT,
            include_collisions: CollisionPolicy::default(),
            ignore: Vec::new(),
        }
    }
}

/// Loads configuration content from a project directory, trying multiple file formats.
///
/// # Returns
/// * `Ok(Some(content))` - Contents of the first configuration file found
/// * `Ok(None)` - No configuration file exists; defaults apply
pub fn load_config<P: AsRef<Path>>(
    project_dir: P,
    config_files: &[&str],
) -> Result<Option<String>> {
    for file in config_files {
        let config_path = project_dir.as_ref().join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(Some(std::fs::read_to_string(&config_path)?));
        }
    }
    debug!("No configuration file found (tried: {})", config_files.join(", "));
    Ok(None)
}

/// Parses configuration content, trying JSON first and YAML second.
pub fn parse_config(content: &str) -> Result<ProjectConfig> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Reads the project configuration, falling back to defaults when no file exists.
pub fn get_config<P: AsRef<Path>>(project_dir: P) -> Result<ProjectConfig> {
    match load_config(project_dir, &CONFIG_FILES)? {
        Some(content) => parse_config(&content),
        None => Ok(ProjectConfig::default()),
    }
}

/// Absolute directory layout of a storefront project.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub src: PathBuf,
    pub public: PathBuf,
    pub output: PathBuf,
}

impl ProjectPaths {
    pub fn new<P: AsRef<Path>>(root: P, config: &ProjectConfig) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            src: root.join(&config.src_dir),
            public: root.join(&config.public_dir),
            output: root.join(&config.output_dir),
            root,
        }
    }

    /// Root of the shared include templates.
    pub fn includes(&self) -> PathBuf {
        self.src.join("views").join("includes")
    }

    /// Root of the page templates.
    pub fn pages(&self) -> PathBuf {
        self.src.join("views").join("pages")
    }

    pub fn entries(&self) -> Vec<PathBuf> {
        vec![self.src.join("js").join("index.js"), self.src.join("scss").join("styles.scss")]
    }

    pub fn theme_dir(&self) -> PathBuf {
        self.src.join("scss").join("storefront-twbs")
    }
}

/// Site branding resolved from the content bundle settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub primary_color: String,
    pub secondary_color: String,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub background_color: String,
    pub icon: PathBuf,
    pub large_icon: PathBuf,
}

impl Branding {
    /// Resolves branding from `settings`, applying the documented defaults for
    /// every missing, empty or non-string value.
    pub fn from_settings(
        settings: &serde_json::Map<String, serde_json::Value>,
        public_dir: &Path,
    ) -> Self {
        let text = |key: &str, default: &str| {
            settings
                .get(key)
                .and_then(|value| value.as_str())
                .filter(|value| !value.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        let image = |key: &str, fallback: &str| {
            match settings.get(key).and_then(|v| v.as_str()) {
                Some(upload) if !upload.is_empty() => {
                    public_dir.join("img").join("uploads").join(upload)
                }
                _ => public_dir.join("img").join(fallback),
            }
        };

        Self {
            primary_color: text("primary_color", defaults::PRIMARY_COLOR),
            secondary_color: text("secondary_color", defaults::SECONDARY_COLOR),
            name: text("name", defaults::NAME),
            short_name: text("short_name", defaults::SHORT_NAME),
            description: text("description", defaults::DESCRIPTION),
            background_color: text("bg_color", defaults::BG_COLOR),
            icon: image("icon", "icon.png"),
            large_icon: image("large_icon", "large-icon.png"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mode_from_env() {
        assert_eq!(Mode::from_env(Some("production")), Mode::Production);
        assert_eq!(Mode::from_env(Some("development")), Mode::Preview);
        assert_eq!(Mode::from_env(Some("Production")), Mode::Preview);
        assert_eq!(Mode::from_env(None::<&str>), Mode::Preview);
    }

    #[test]
    fn test_parse_yaml_config() {
        let config = parse_config(
            "cms_url: https://cms.example.com/data.json\n\
             dev_server_port: 8080\n\
             include_collisions: reject\n",
        )
        .unwrap();
        assert_eq!(config.cms_url.as_deref(), Some("https://cms.example.com/data.json"));
        assert_eq!(config.dev_server_port, 8080);
        assert_eq!(config.include_collisions, CollisionPolicy::Reject);
        assert_eq!(config.src_dir, PathBuf::from("src"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_fields() {
        let result = parse_config(r#"{"cms": "https://cms.example.com"}"#);
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_branding_defaults() {
        let settings = serde_json::Map::new();
        let branding = Branding::from_settings(&settings, Path::new("/site/public"));
        assert_eq!(branding.primary_color, "#3fe3e3");
        assert_eq!(branding.secondary_color, "#5e1efe");
        assert_eq!(branding.name, "My Shop");
        assert_eq!(branding.icon, PathBuf::from("/site/public/img/icon.png"));
        assert_eq!(branding.large_icon, PathBuf::from("/site/public/img/large-icon.png"));
    }

    #[test]
    fn test_branding_from_settings() {
        let settings = json!({
            "primary_color": "#000000",
            "name": "Shoe Shop",
            "bg_color": "",
            "icon": "logo.png"
        });
        let settings = settings.as_object().unwrap();
        let branding = Branding::from_settings(settings, Path::new("/site/public"));
        assert_eq!(branding.primary_color, "#000000");
        assert_eq!(branding.name, "Shoe Shop");
        assert_eq!(branding.background_color, "#ffffff");
        assert_eq!(branding.icon, PathBuf::from("/site/public/img/uploads/logo.png"));
    }
}
