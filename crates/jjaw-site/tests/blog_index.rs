//! Building the blog index from a site source tree and a config file.

use std::fs;
use std::path::Path;

use jjaw_site::blog::{load_markdown_dir, load_pages_json, BlogIndex};
use jjaw_site::SiteConfig;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_markdown_tree_with_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "README.md", "---\nstar: true\n---\n# Home\n");
    write(
        root,
        "articles/vue/dark-mode.md",
        "---\ntitle: 暗色模式\ntags: [vue, css]\nstar: true\n---\n",
    );
    write(root, "articles/rust.md", "---\ntags: rust\n---\n# Rust notes\n");

    let config = SiteConfig::default();
    let pages = load_markdown_dir(root).unwrap();
    assert_eq!(pages.len(), 3);

    let index = BlogIndex::build(&pages, config.blog().unwrap(), root).unwrap();
    assert_eq!(index.articles.len(), 2);

    // No git data: both count as 0 and keep route order.
    let titles: Vec<_> = index.articles.iter().map(|e| e.info.title.as_str()).collect();
    assert_eq!(titles, vec!["Rust notes", "暗色模式"]);

    let stars = index.type_list("stars").unwrap();
    assert_eq!(stars.entries.len(), 1);
    assert_eq!(stars.entries[0].path, "/articles/vue/dark-mode.html");

    let tags = index.category("tags").unwrap();
    let vue = tags.item("vue").unwrap();
    assert_eq!(vue.path, "/tags/vue/");
    assert_eq!(vue.frontmatter.title, "vue标签");
    assert!(tags.item("css").is_some());
    assert!(tags.item("rust").is_some());
}

#[test]
fn test_exported_pages_with_custom_config() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(
        root,
        "site.yaml",
        r#"
plugins:
  - name: blog
    articlesDir: posts
    types:
      - key: pinned
        frontmatterFlag: pinned
    categories:
      - key: series
        path: /series/
        layout: Series
        frontmatter: { title: Series, description: All series }
        itemPath: /series/:name/
        itemLayout: Series
        itemFrontmatter: { title: "Series {{ name }}", description: "Posts in {{ name | upper }}" }
"#,
    );
    write(
        root,
        "pages.json",
        r#"[
  {"path": "/posts/a.html", "filePath": "/src/posts/a.md", "title": "A",
   "frontmatter": {"series": "intro", "pinned": true},
   "git": {"updatedTime": 100, "contributors": [
     {"name": "x", "email": "x@e", "commits": 1},
     {"name": "y", "email": "y@e", "commits": 4}]}},
  {"path": "/posts/b.html", "filePath": "/src/posts/b.md", "title": "B",
   "frontmatter": {"series": ["intro", "deep"], "description": "second"},
   "git": {"updatedTime": 200}},
  {"path": "/about.html", "filePath": "/src/about.md", "title": "About",
   "frontmatter": {"series": "intro"}}
]"#,
    );

    let config = SiteConfig::load(&root.join("site.yaml")).unwrap();
    let pages = load_pages_json(&root.join("pages.json")).unwrap();
    let index = BlogIndex::build(&pages, config.blog().unwrap(), Path::new("/src")).unwrap();

    let paths: Vec<_> = index.articles.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["/posts/b.html", "/posts/a.html"]);

    let a = &index.articles[1];
    let git = a.info.git.as_ref().unwrap();
    assert_eq!(git.commit_max_person.as_ref().unwrap().name, "y");
    assert_eq!(git.updated_time, Some(100));
    assert_eq!(index.articles[0].info.description.as_deref(), Some("second"));

    let pinned = index.type_list("pinned").unwrap();
    assert_eq!(pinned.entries.len(), 1);

    let series = index.category("series").unwrap();
    let intro = series.item("intro").unwrap();
    assert_eq!(intro.entries.len(), 2);
    assert_eq!(intro.frontmatter.title, "Series intro");
    assert_eq!(series.item("deep").unwrap().frontmatter.description, "Posts in DEEP");
    assert!(index.category("tags").is_none());
}
