//! Common constants used throughout the storefront build.

/// Supported project configuration file names
pub const CONFIG_FILES: [&str; 3] = ["storefront.json", "storefront.yml", "storefront.yaml"];

/// Page templates under this directory expand into one page per collection entry
pub const CMS_MARKER: &str = "_cms";

/// Environment value that selects production mode; anything else is preview
pub const PRODUCTION_ENV: &str = "production";

/// Namespace for include templates inside the shared template environment
pub const INCLUDE_PREFIX: &str = "include:";

/// Deepest chain of nested `include` calls before rendering fails
pub const MAX_INCLUDE_DEPTH: usize = 16;

/// Namespace for page templates inside the shared template environment
pub const PAGE_PREFIX: &str = "page:";

/// Files never treated as templates
pub const DEFAULT_IGNORE_PATTERNS: [&str; 4] =
    ["**/.DS_Store", "**/*~", "**/.*.swp", "**/.gitkeep"];

pub mod defaults {
    pub const SRC_DIR: &str = "src";
    pub const PUBLIC_DIR: &str = "public";
    pub const OUTPUT_DIR: &str = "dist";
    pub const DEV_SERVER_PORT: u16 = 9123;

    pub const PRIMARY_COLOR: &str = "#3fe3e3";
    pub const SECONDARY_COLOR: &str = "#5e1efe";
    pub const NAME: &str = "My Shop";
    pub const SHORT_NAME: &str = "MyShop";
    pub const DESCRIPTION: &str = "My PWA Shop";
    pub const BG_COLOR: &str = "#ffffff";

    pub const SCRIPT_FILENAME: &str = "storefront.[chunkhash].js";
    pub const STYLE_FILENAME: &str = "styles.[chunkhash].css";
    pub const SERVICE_WORKER: &str = "sw.js";
    pub const ICON_SIZES: [u32; 6] = [96, 128, 192, 256, 384, 512];
    pub const LARGE_ICON_SIZE: &str = "1024x1024";
}
