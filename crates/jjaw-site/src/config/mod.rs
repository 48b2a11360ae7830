//! Site configuration: metadata, markdown options, theme and plugin list.
//!
//! [`SiteConfig::default`] is the jjaw.cn site itself. A YAML or JSON file
//! may override any top-level field; fields it omits keep their defaults.
//!
//! ```yaml
//! title: My notes
//! plugins:
//!   - name: sitemap
//!     hostname: example.org
//!     changefreq: weekly
//!   - name: blog
//!     articlesDir: posts
//! ```

mod plugin;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use plugin::{
    default_plugins, BlogCategory, BlogOptions, BlogType, HomePageFrontmatter, PageMeta,
    PluginConfig,
};

/// Host name the site is published under.
pub const DEFAULT_HOSTNAME: &str = "jjaw.cn";

const CHANGE_FREQUENCIES: &[&str] = &[
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

/// Errors from loading or validating a site configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config format for {0} (expected .yml, .yaml or .json)")]
    UnsupportedFormat(PathBuf),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Heading levels included in a generated outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingLevels {
    pub level: Vec<u8>,
}

impl Default for HeadingLevels {
    fn default() -> Self {
        Self {
            level: vec![2, 3, 4],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub toc: HeadingLevels,
    pub headers: HeadingLevels,
}

/// Reference to the theme by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeRef {
    pub name: String,
}

/// The whole site configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub lang: String,
    pub title: String,
    pub description: String,
    /// Static assets directory, relative to the site source.
    pub public: PathBuf,
    pub page_patterns: Vec<String>,
    pub markdown: MarkdownConfig,
    pub should_prefetch: bool,
    pub theme: ThemeRef,
    pub plugins: Vec<PluginConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            lang: "zh-CN".to_string(),
            title: "神奇小破站".to_string(),
            description: "分享有意思的东西".to_string(),
            public: PathBuf::from("public"),
            page_patterns: vec!["./articles/**/*.md".to_string()],
            markdown: MarkdownConfig::default(),
            should_prefetch: false,
            theme: ThemeRef {
                name: "jjaw-cn-page".to_string(),
            },
            plugins: default_plugins(DEFAULT_HOSTNAME),
        }
    }
}

impl SiteConfig {
    /// Loads and validates a config file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => Self::from_yaml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        debug!(path = %path.display(), plugins = config.plugins.len(), "config loaded");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (what, levels) in [
            ("markdown.toc", &self.markdown.toc),
            ("markdown.headers", &self.markdown.headers),
        ] {
            if let Some(bad) = levels.level.iter().find(|l| !(1..=6).contains(*l)) {
                return Err(ConfigError::Invalid(format!(
                    "{what} level {bad} is outside 1..=6"
                )));
            }
        }

        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            if !seen.insert(plugin.name()) {
                return Err(ConfigError::Invalid(format!(
                    "plugin '{}' is listed more than once",
                    plugin.name()
                )));
            }
            match plugin {
                PluginConfig::Sitemap {
                    hostname,
                    changefreq,
                } => {
                    require_hostname("sitemap", hostname)?;
                    if !CHANGE_FREQUENCIES.contains(&changefreq.as_str()) {
                        return Err(ConfigError::Invalid(format!(
                            "sitemap changefreq '{changefreq}' is not one of {}",
                            CHANGE_FREQUENCIES.join(", ")
                        )));
                    }
                }
                PluginConfig::Seo { hostname, .. } => require_hostname("seo", hostname)?,
                PluginConfig::Blog(options) => {
                    for category in &options.categories {
                        if !category.item_path.contains(":name") {
                            return Err(ConfigError::Invalid(format!(
                                "blog category '{}' itemPath must contain ':name'",
                                category.key
                            )));
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Looks a plugin up by its `name` tag.
    pub fn plugin(&self, name: &str) -> Option<&PluginConfig> {
        self.plugins.iter().find(|p| p.name() == name)
    }

    /// Options of the blog plugin, if enabled.
    pub fn blog(&self) -> Option<&BlogOptions> {
        self.plugins.iter().find_map(|p| match p {
            PluginConfig::Blog(options) => Some(options),
            _ => None,
        })
    }

    /// Directory, relative to the site source, that pages must live under to
    /// count as articles. The blog plugin's setting wins over the seo one.
    pub fn articles_dir(&self) -> Option<&str> {
        self.blog()
            .map(|options| options.articles_dir.as_str())
            .or_else(|| {
                self.plugins.iter().find_map(|p| match p {
                    PluginConfig::Seo { articles_dir, .. } => articles_dir.as_deref(),
                    _ => None,
                })
            })
    }

    /// Storage key of the color-scheme preference.
    pub fn color_scheme_key(&self) -> &str {
        self.plugins
            .iter()
            .find_map(|p| match p {
                PluginConfig::PrefersColorScheme { storage_key } => Some(storage_key.as_str()),
                _ => None,
            })
            .unwrap_or(crate::scheme::STORAGE_KEY)
    }
}

fn require_hostname(plugin: &str, hostname: &str) -> Result<(), ConfigError> {
    if hostname.trim().is_empty() {
        return Err(ConfigError::Invalid(format!(
            "{plugin} plugin requires a hostname"
        )));
    }
    Ok(())
}
