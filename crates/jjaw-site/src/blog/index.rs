//! Article lists: types filtered by a front matter flag and categories
//! grouped by a front matter list, all sorted by last update.

use std::collections::HashSet;
use std::path::Path;

use minijinja::{context, Environment};
use serde::Serialize;
use serde_yaml::Value;
use tracing::debug;

use super::git::{git_info, GitInfo};
use super::page::Page;
use super::BlogError;
use crate::config::{BlogCategory, BlogOptions, BlogType, PageMeta, SiteConfig};

/// Metadata listed for each article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInfo {
    pub git: Option<GitInfo>,
    pub title: String,
    pub description: Option<String>,
}

impl ArticleInfo {
    /// Last update time, 0 when unknown.
    pub fn updated_time(&self) -> i64 {
        self.git
            .as_ref()
            .and_then(|g| g.updated_time)
            .unwrap_or(0)
    }
}

/// An article and its route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogEntry {
    pub path: String,
    pub info: ArticleInfo,
    pub tags: Vec<String>,
}

/// Whether `page` lives under `articles_dir`.
pub fn is_article(page: &Page, articles_dir: &Path) -> bool {
    page.file_path
        .as_deref()
        .is_some_and(|file| file.starts_with(articles_dir))
}

/// Collects the listed metadata of a page.
///
/// The title prefers the front matter `title` over the content title.
pub fn article_info(page: &Page) -> ArticleInfo {
    ArticleInfo {
        git: page.git.as_ref().map(git_info),
        title: page
            .frontmatter_str("title")
            .filter(|t| !t.is_empty())
            .unwrap_or(page.title.as_str())
            .to_string(),
        description: page.frontmatter_str("description").map(str::to_string),
    }
}

/// Values of a front matter list: a sequence yields its scalar items as
/// strings, a single string yields itself, anything else yields nothing.
///
/// `tags: [2023, rust]` lists `2023` and `rust`. Null and nested items are
/// skipped.
pub fn frontmatter_list(page: &Page, key: &str) -> Vec<String> {
    match page.frontmatter.get(key) {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_string).collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        _ => None,
    }
}

/// The page's `tags`.
pub fn page_tags(page: &Page) -> Vec<String> {
    frontmatter_list(page, "tags")
}

/// Sorts newest first. Entries without an update time count as 0; equal
/// times keep their order.
pub fn sort_by_updated(entries: &mut [BlogEntry]) {
    entries.sort_by_key(|e| std::cmp::Reverse(e.info.updated_time()));
}

/// A flagged article list, e.g. `stars`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeList {
    pub key: String,
    pub entries: Vec<BlogEntry>,
}

/// One value of a category, e.g. the `rust` tag, with its own page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryItem {
    pub name: String,
    pub path: String,
    pub layout: String,
    pub frontmatter: PageMeta,
    pub entries: Vec<BlogEntry>,
}

/// A category page, e.g. `/tags/`, and its items in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryMap {
    pub key: String,
    pub path: String,
    pub layout: String,
    pub frontmatter: PageMeta,
    pub items: Vec<CategoryItem>,
}

impl CategoryMap {
    pub fn item(&self, name: &str) -> Option<&CategoryItem> {
        self.items.iter().find(|i| i.name == name)
    }
}

/// Every list the blog plugin produces.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BlogIndex {
    pub articles: Vec<BlogEntry>,
    pub types: Vec<TypeList>,
    pub categories: Vec<CategoryMap>,
}

impl BlogIndex {
    /// Builds the index from all site pages.
    ///
    /// Only pages under `source_dir/<articlesDir>` are articles.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Template`] if an item front matter template fails
    /// to render.
    pub fn build(pages: &[Page], options: &BlogOptions, source_dir: &Path) -> Result<Self, BlogError> {
        Self::build_in(pages, options, &source_dir.join(&options.articles_dir))
    }

    /// Builds the index with the blog options and articles directory of
    /// `site`. `None` when the site has no blog plugin.
    ///
    /// # Errors
    ///
    /// Same as [`BlogIndex::build`].
    pub fn for_site(
        pages: &[Page],
        site: &SiteConfig,
        source_dir: &Path,
    ) -> Result<Option<Self>, BlogError> {
        let (Some(options), Some(dir)) = (site.blog(), site.articles_dir()) else {
            return Ok(None);
        };
        Self::build_in(pages, options, &source_dir.join(dir)).map(Some)
    }

    fn build_in(pages: &[Page], options: &BlogOptions, articles_dir: &Path) -> Result<Self, BlogError> {
        let article_pages: Vec<&Page> = pages
            .iter()
            .filter(|p| is_article(p, articles_dir))
            .collect();
        debug!(
            pages = pages.len(),
            articles = article_pages.len(),
            dir = %articles_dir.display(),
            "building blog index"
        );

        let mut articles: Vec<BlogEntry> = article_pages.iter().map(|p| entry(p)).collect();
        sort_by_updated(&mut articles);

        let types = options
            .types
            .iter()
            .map(|t| build_type(t, &article_pages))
            .collect();

        let env = Environment::new();
        let categories = options
            .categories
            .iter()
            .map(|c| build_category(&env, c, &article_pages))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            articles,
            types,
            categories,
        })
    }

    pub fn type_list(&self, key: &str) -> Option<&TypeList> {
        self.types.iter().find(|t| t.key == key)
    }

    pub fn category(&self, key: &str) -> Option<&CategoryMap> {
        self.categories.iter().find(|c| c.key == key)
    }
}

fn entry(page: &Page) -> BlogEntry {
    BlogEntry {
        path: page.path.clone(),
        info: article_info(page),
        tags: page_tags(page),
    }
}

fn build_type(blog_type: &BlogType, pages: &[&Page]) -> TypeList {
    let mut entries: Vec<BlogEntry> = pages
        .iter()
        .filter(|p| p.frontmatter_flag(&blog_type.frontmatter_flag))
        .map(|p| entry(p))
        .collect();
    sort_by_updated(&mut entries);
    TypeList {
        key: blog_type.key.clone(),
        entries,
    }
}

fn build_category(
    env: &Environment<'_>,
    category: &BlogCategory,
    pages: &[&Page],
) -> Result<CategoryMap, BlogError> {
    let mut grouped: Vec<(String, Vec<BlogEntry>)> = Vec::new();
    for page in pages {
        let mut values = frontmatter_list(page, &category.key);
        let mut seen = HashSet::new();
        values.retain(|v| seen.insert(v.clone()));
        for value in values {
            let listed = entry(page);
            match grouped.iter_mut().find(|(name, _)| *name == value) {
                Some((_, entries)) => entries.push(listed),
                None => grouped.push((value, vec![listed])),
            }
        }
    }

    let items = grouped
        .into_iter()
        .map(|(name, mut entries)| {
            sort_by_updated(&mut entries);
            let frontmatter = PageMeta {
                title: render(env, &category.item_frontmatter.title, &name)?,
                description: render(env, &category.item_frontmatter.description, &name)?,
            };
            Ok(CategoryItem {
                path: category.item_path.replace(":name", &name),
                layout: category.item_layout.clone(),
                frontmatter,
                name,
                entries,
            })
        })
        .collect::<Result<Vec<_>, BlogError>>()?;

    Ok(CategoryMap {
        key: category.key.clone(),
        path: category.path.clone(),
        layout: category.layout.clone(),
        frontmatter: category.frontmatter.clone(),
        items,
    })
}

fn render(env: &Environment<'_>, template: &str, name: &str) -> Result<String, BlogError> {
    env.render_str(template, context! { name => name })
        .map_err(|e| BlogError::Template(e.to_string()))
}
