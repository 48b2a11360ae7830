//! Typed plugin entries of the site configuration.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

/// Front matter for a generated page, as a title/description pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

/// The home page generated by the `home-page` plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomePageFrontmatter {
    pub layout: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A blog "type": a filtered, sorted article list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogType {
    pub key: String,
    /// Front matter flag an article must set to be listed.
    pub frontmatter_flag: String,
}

/// A blog category: articles grouped by a front matter list.
///
/// `item_path` contains `:name`, replaced by the category value. The item
/// front matter fields are `minijinja` templates with `name` in scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCategory {
    pub key: String,
    pub path: String,
    pub layout: String,
    pub frontmatter: PageMeta,
    pub item_path: String,
    pub item_layout: String,
    pub item_frontmatter: PageMeta,
}

/// Options of the `blog` plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogOptions {
    /// Directory, relative to the site source, holding the articles.
    pub articles_dir: String,
    #[serde(default)]
    pub types: Vec<BlogType>,
    #[serde(default)]
    pub categories: Vec<BlogCategory>,
}

impl Default for BlogOptions {
    fn default() -> Self {
        Self {
            articles_dir: "articles".to_string(),
            types: vec![BlogType {
                key: "stars".to_string(),
                frontmatter_flag: "star".to_string(),
            }],
            categories: vec![BlogCategory {
                key: "tags".to_string(),
                path: "/tags/".to_string(),
                layout: "Tags".to_string(),
                frontmatter: PageMeta {
                    title: "标签页".to_string(),
                    description: "通过标签浏览文章列表.".to_string(),
                },
                item_path: "/tags/:name/".to_string(),
                item_layout: "Tags".to_string(),
                item_frontmatter: PageMeta {
                    title: "{{ name }}标签".to_string(),
                    description: "{{ name }}标签的所有文章".to_string(),
                },
            }],
        }
    }
}

/// One entry of the plugin list, tagged by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum PluginConfig {
    AutoLayouts {
        layouts_dir: String,
    },
    HomePage {
        path: String,
        frontmatter: HomePageFrontmatter,
    },
    RegisterComponents {
        components_dir: String,
    },
    Nprogress,
    Prismjs {
        #[serde(default)]
        preload_languages: Vec<String>,
    },
    Git,
    Toc,
    ActiveHeaderLinks {
        header_link_selector: String,
        header_anchor_selector: String,
    },
    MdEnhance {
        #[serde(default)]
        component: bool,
    },
    Sitemap {
        hostname: String,
        changefreq: String,
    },
    Seo {
        hostname: String,
        /// Pages under this directory are marked up as articles.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        articles_dir: Option<String>,
    },
    Blog(BlogOptions),
    GiscusComment {
        repo: String,
        repo_id: String,
        mapping: String,
    },
    PrefersColorScheme {
        storage_key: String,
    },
}

impl PluginConfig {
    /// The plugin's name as written in the `name` tag.
    pub fn name(&self) -> &'static str {
        match self {
            PluginConfig::AutoLayouts { .. } => "auto-layouts",
            PluginConfig::HomePage { .. } => "home-page",
            PluginConfig::RegisterComponents { .. } => "register-components",
            PluginConfig::Nprogress => "nprogress",
            PluginConfig::Prismjs { .. } => "prismjs",
            PluginConfig::Git => "git",
            PluginConfig::Toc => "toc",
            PluginConfig::ActiveHeaderLinks { .. } => "active-header-links",
            PluginConfig::MdEnhance { .. } => "md-enhance",
            PluginConfig::Sitemap { .. } => "sitemap",
            PluginConfig::Seo { .. } => "seo",
            PluginConfig::Blog(_) => "blog",
            PluginConfig::GiscusComment { .. } => "giscus-comment",
            PluginConfig::PrefersColorScheme { .. } => "prefers-color-scheme",
        }
    }
}

/// The plugin list of the jjaw.cn site.
pub fn default_plugins(hostname: &str) -> Vec<PluginConfig> {
    vec![
        PluginConfig::AutoLayouts {
            layouts_dir: "@layouts".to_string(),
        },
        PluginConfig::HomePage {
            path: "/".to_string(),
            frontmatter: HomePageFrontmatter {
                layout: "HomePage".to_string(),
                description:
                    "分享有意思的东西！java web 前端 网络 vue JavaScript JS TS TypeScript css H5"
                        .to_string(),
                extra: Mapping::new(),
            },
        },
        PluginConfig::RegisterComponents {
            components_dir: "@tags".to_string(),
        },
        PluginConfig::Nprogress,
        PluginConfig::Prismjs {
            preload_languages: Vec::new(),
        },
        PluginConfig::Git,
        PluginConfig::Toc,
        PluginConfig::ActiveHeaderLinks {
            header_link_selector: ".vuepress-toc-link".to_string(),
            header_anchor_selector: ".header-anchor".to_string(),
        },
        PluginConfig::MdEnhance { component: true },
        PluginConfig::Sitemap {
            hostname: hostname.to_string(),
            changefreq: "monthly".to_string(),
        },
        PluginConfig::Seo {
            hostname: hostname.to_string(),
            articles_dir: Some("articles".to_string()),
        },
        PluginConfig::Blog(BlogOptions::default()),
        PluginConfig::GiscusComment {
            repo: "用户名/查看名".to_string(),
            repo_id: "查看id".to_string(),
            mapping: "pathname".to_string(),
        },
        PluginConfig::PrefersColorScheme {
            storage_key: crate::scheme::STORAGE_KEY.to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_variant_yaml() {
        let plugin: PluginConfig = serde_yaml::from_str("name: nprogress").unwrap();
        assert_eq!(plugin, PluginConfig::Nprogress);
    }

    #[test]
    fn test_camel_case_fields() {
        let yaml = "name: giscus-comment\nrepo: a/b\nrepoId: R_1\nmapping: pathname\n";
        let plugin: PluginConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(plugin.name(), "giscus-comment");
        match plugin {
            PluginConfig::GiscusComment { repo_id, .. } => assert_eq!(repo_id, "R_1"),
            other => panic!("unexpected plugin {other:?}"),
        }
    }

    #[test]
    fn test_blog_defaults_when_lists_missing() {
        let yaml = "name: blog\narticlesDir: posts\n";
        let plugin: PluginConfig = serde_yaml::from_str(yaml).unwrap();
        match plugin {
            PluginConfig::Blog(options) => {
                assert_eq!(options.articles_dir, "posts");
                assert!(options.types.is_empty());
                assert!(options.categories.is_empty());
            }
            other => panic!("unexpected plugin {other:?}"),
        }
    }

    #[test]
    fn test_default_plugins_names_are_unique() {
        let plugins = default_plugins("jjaw.cn");
        let mut names: Vec<_> = plugins.iter().map(PluginConfig::name).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 14);
    }

    #[test]
    fn test_name_matches_serialized_tag() {
        for plugin in default_plugins("jjaw.cn") {
            let value = serde_json::to_value(&plugin).unwrap();
            assert_eq!(value["name"], plugin.name());
        }
    }
}
