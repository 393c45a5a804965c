//! Declarative build configuration handed to the bundling sink.
//!
//! Everything here is data: the crate decides which tasks exist and with
//! which options, and never runs them.

use crate::config::{Branding, Mode, ProjectPaths};
use crate::constants::defaults;
use crate::pages::PageDescriptor;
use crate::rewrites::RewriteTable;
use serde::Serialize;
use std::path::PathBuf;

/// Final build configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    pub mode: Mode,
    pub entry: Vec<PathBuf>,
    pub output: Output,
    pub devtool: &'static str,
    /// Present only in preview mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServer>,
    pub module: ModuleRules,
    pub plugins: Vec<Task>,
}

impl BuildConfig {
    /// Rewrite table of the preview server, `None` in production.
    pub fn rewrites(&self) -> Option<&RewriteTable> {
        self.dev_server.as_ref().map(|server| &server.history_api_fallback.rewrites)
    }

    /// Page tasks, in enumeration order.
    pub fn pages(&self) -> impl Iterator<Item = &PageTask> {
        self.plugins.iter().filter_map(|task| match task {
            Task::Page(page) => Some(page),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    pub path: PathBuf,
    pub public_path: &'static str,
    pub filename: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServer {
    pub compress: bool,
    pub port: u16,
    pub content_base: PathBuf,
    pub history_api_fallback: HistoryApiFallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryApiFallback {
    pub rewrites: RewriteTable,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleRules {
    pub rules: Vec<ModuleRule>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleRule {
    pub test: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<&'static str>,
    #[serde(rename = "use")]
    pub loaders: Vec<Loader>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Loader {
    pub loader: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl Loader {
    fn plain(loader: &'static str) -> Self {
        Self { loader, options: None }
    }
}

/// A page-build task: render `template` into `filename`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageTask {
    pub filename: String,
    pub template: PathBuf,
    pub minify: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Icon {
    pub src: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<&'static str>,
}

/// Plugins of the build, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Task {
    /// Empties the output directory.
    Clean { dir: PathBuf },
    /// Builds the theme stylesheet with the brand colors.
    #[serde(rename_all = "camelCase")]
    StorefrontTheme {
        base_dir: PathBuf,
        output_dir: PathBuf,
        primary_color: String,
        secondary_color: String,
    },
    ExtractCss { filename: &'static str },
    #[serde(rename_all = "camelCase")]
    PwaManifest {
        name: String,
        short_name: String,
        description: String,
        background_color: String,
        crossorigin: &'static str,
        icons: Vec<Icon>,
    },
    #[serde(rename_all = "camelCase")]
    ServiceWorker { sw_dest: &'static str, clients_claim: bool, skip_waiting: bool },
    CopyAssets { from: PathBuf, to: PathBuf },
    /// Compiles the include templates before any page renders.
    TemplateIncludes { dir: PathBuf, names: Vec<String> },
    /// Rebuilds when include templates change; preview only.
    WatchIncludes { dirs: Vec<PathBuf> },
    Page(PageTask),
}

/// Static tasks that precede the include and page tasks.
pub fn static_tasks(paths: &ProjectPaths, branding: &Branding) -> Vec<Task> {
    vec![
        Task::Clean { dir: paths.output.clone() },
        Task::StorefrontTheme {
            base_dir: paths.theme_dir(),
            output_dir: paths.output.clone(),
            primary_color: branding.primary_color.clone(),
            secondary_color: branding.secondary_color.clone(),
        },
        Task::ExtractCss { filename: defaults::STYLE_FILENAME },
        Task::PwaManifest {
            name: branding.name.clone(),
            short_name: branding.short_name.clone(),
            description: branding.description.clone(),
            background_color: branding.background_color.clone(),
            crossorigin: "use-credentials",
            icons: vec![
                Icon {
                    src: branding.icon.clone(),
                    sizes: Some(defaults::ICON_SIZES.to_vec()),
                    size: None,
                },
                Icon {
                    src: branding.large_icon.clone(),
                    sizes: None,
                    size: Some(defaults::LARGE_ICON_SIZE),
                },
            ],
        },
        Task::ServiceWorker {
            sw_dest: defaults::SERVICE_WORKER,
            clients_claim: true,
            skip_waiting: true,
        },
        Task::CopyAssets { from: paths.public.clone(), to: paths.output.clone() },
    ]
}

/// Page task for one descriptor; pages are minified in production only.
pub fn page_task(page: &PageDescriptor, mode: Mode) -> Task {
    Task::Page(PageTask {
        filename: page.filename(),
        template: page.template_path.clone(),
        minify: mode == Mode::Production,
    })
}

/// Stylesheet and script rules. The brand colors are injected as Sass
/// variables; preview inlines styles while production extracts them.
pub fn module_rules(branding: &Branding, mode: Mode) -> ModuleRules {
    let style_loader = if mode.is_preview() { "style-loader" } else { "mini-css-extract-loader" };
    let sass_prelude =
        format!("$primary: {}; $secondary: {}; ", branding.primary_color, branding.secondary_color);

    ModuleRules {
        rules: vec![
            ModuleRule {
                test: r"\.s?css$",
                exclude: None,
                loaders: vec![
                    Loader::plain(style_loader),
                    Loader::plain("css-loader"),
                    Loader {
                        loader: "postcss-loader",
                        options: Some(serde_json::json!({
                            "ident": "postcss",
                            "plugins": ["autoprefixer"],
                        })),
                    },
                    Loader {
                        loader: "sass-loader",
                        options: Some(serde_json::json!({ "data": sass_prelude })),
                    },
                ],
            },
            ModuleRule {
                test: r"\.m?js$",
                exclude: Some("(node_modules|bower_components)"),
                loaders: vec![Loader {
                    loader: "babel-loader",
                    options: Some(serde_json::json!({
                        "presets": [["@babel/preset-env", { "useBuiltIns": "usage", "corejs": 3 }]]
                    })),
                }],
            },
        ],
    }
}

pub fn output(paths: &ProjectPaths) -> Output {
    Output { path: paths.output.clone(), public_path: "/", filename: defaults::SCRIPT_FILENAME }
}

pub fn dev_server(paths: &ProjectPaths, port: u16, rewrites: RewriteTable) -> DevServer {
    DevServer {
        compress: true,
        port,
        content_base: paths.output.clone(),
        history_api_fallback: HistoryApiFallback { rewrites },
    }
}
