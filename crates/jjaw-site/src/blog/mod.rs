//! Blog metadata: article detection, git summaries, tag lists and sorting.
//!
//! - [`Page`]: a site page with YAML front matter and optional [`GitData`]
//! - [`git_info`]: top contributor and last update of a page
//! - [`BlogIndex`]: articles, flagged types (`stars`) and categories (`tags`),
//!   each sorted newest first

mod git;
mod index;
mod page;

use std::path::PathBuf;

pub use git::{git_info, GitContributor, GitData, GitInfo};
pub use index::{
    article_info, frontmatter_list, is_article, page_tags, sort_by_updated, ArticleInfo,
    BlogEntry, BlogIndex, CategoryItem, CategoryMap, TypeList,
};
pub use page::{load_markdown_dir, load_pages_json, Page};

/// Errors from loading pages or building the blog index.
#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid front matter: {0}")]
    Frontmatter(String),
    #[error("invalid pages file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to render front matter template: {0}")]
    Template(String),
}
