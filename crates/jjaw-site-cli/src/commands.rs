//! Subcommand handlers. Each returns the text to print.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use jjaw_site::blog::{load_markdown_dir, load_pages_json, BlogEntry, BlogIndex};
use jjaw_site::scheme::{install, use_dark_mode, AmbientPreference, Context, FileStorage, Host, HtmlDocument};
use jjaw_site::SiteConfig;
use tracing::{debug, warn};

use crate::args::{Ambient, BlogArgs, Format, SchemeAction, SchemeArgs, SchemeValue};
use crate::output::{accent, format_date, label, pad_to_width, title, truncate_to_width};

pub fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("loading site config {}", path.display())),
        None => Ok(SiteConfig::default()),
    }
}

pub fn config(site: &SiteConfig, format: Format) -> Result<String> {
    let text = match format {
        Format::Yaml => site.to_yaml()?,
        Format::Json => site.to_json()?,
    };
    Ok(text)
}

/// Where the preference lives when `--state` is not given.
pub fn default_state_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("jjaw-site").join("state.json")
}

pub fn scheme(site: &SiteConfig, args: &SchemeArgs) -> Result<String> {
    let state = args.state.clone().unwrap_or_else(default_state_path);
    let ambient = match args.ambient {
        Ambient::System => AmbientPreference::system(),
        Ambient::Light => AmbientPreference::fixed(false),
        Ambient::Dark => AmbientPreference::fixed(true),
    };
    let document = HtmlDocument::new(site.lang.clone());
    debug!(state = %state.display(), "using color scheme state file");

    let mut ctx = Context::new();
    let host = Host::new(ambient.clone(), FileStorage::new(&state), document.clone())
        .with_storage_key(site.color_scheme_key());
    install(&mut ctx, host)?;
    let view = ctx.mount();

    let dark_mode = use_dark_mode(&ctx);
    match args.action.unwrap_or(SchemeAction::Get) {
        SchemeAction::Get => {}
        SchemeAction::Set { value } => dark_mode.set(match value {
            SchemeValue::Auto => ambient.is_dark(),
            SchemeValue::Light => false,
            SchemeValue::Dark => true,
        }),
        SchemeAction::Toggle => {
            dark_mode.toggle();
        }
    }
    view.unmount();

    let mut out = String::new();
    let rows = [
        ("preference", dark_mode.preference().to_string()),
        ("ambient", mode_name(ambient.is_dark()).to_string()),
        ("effective", mode_name(dark_mode.get()).to_string()),
        ("root", document.open_tag().unwrap_or_default()),
    ];
    for (name, value) in rows {
        writeln!(
            out,
            "{}{}",
            label().apply_to(pad_to_width(&format!("{name}:"), 12)),
            value
        )?;
    }
    Ok(out)
}

fn mode_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

pub fn blog(site: &SiteConfig, args: &BlogArgs) -> Result<String> {
    // Exported pages carry absolute file paths, so a JSON file resolves
    // against the working directory rather than its own location.
    let (pages, default_source) = if args.pages.is_dir() {
        (load_markdown_dir(&args.pages)?, args.pages.clone())
    } else {
        let cwd = std::env::current_dir().context("reading the current directory")?;
        (load_pages_json(&args.pages)?, cwd)
    };
    let source = args.source.clone().unwrap_or(default_source);
    let Some(index) = BlogIndex::for_site(&pages, site, &source)? else {
        bail!("the blog plugin is not enabled in the site config");
    };
    if index.articles.is_empty() && !pages.is_empty() {
        let dir = source.join(site.articles_dir().unwrap_or_default());
        warn!(pages = pages.len(), dir = %dir.display(), "no page lives under the articles directory");
    }

    let entries: &[BlogEntry] = if let Some(tag) = &args.tag {
        match index.category("tags").and_then(|c| c.item(tag)) {
            Some(item) => item.entries.as_slice(),
            None => &[],
        }
    } else if args.stars {
        index
            .type_list("stars")
            .map(|t| t.entries.as_slice())
            .unwrap_or(&[])
    } else {
        &index.articles
    };

    if args.json {
        return Ok(serde_json::to_string_pretty(entries)? + "\n");
    }
    render_listing(entries, args.width)
}

fn render_listing(entries: &[BlogEntry], width: usize) -> Result<String> {
    if entries.is_empty() {
        return Ok(format!("{}\n", label().apply_to("no articles")));
    }

    let mut out = String::new();
    for entry in entries {
        let name = pad_to_width(&truncate_to_width(&entry.info.title, width), width);
        let author = entry
            .info
            .git
            .as_ref()
            .and_then(|g| g.commit_max_person.as_ref())
            .map(|p| format!(" {}", label().apply_to(format!("@{}", p.name))))
            .unwrap_or_default();
        let tags = if entry.tags.is_empty() {
            String::new()
        } else {
            format!(" {}", accent().apply_to(format!("[{}]", entry.tags.join(", "))))
        };
        writeln!(
            out,
            "{}  {}  {}{}{}",
            label().apply_to(format_date(entry.info.updated_time())),
            title().apply_to(name),
            entry.path,
            tags,
            author
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn blog_args(pages: PathBuf) -> BlogArgs {
        BlogArgs {
            pages,
            source: None,
            tag: None,
            stars: false,
            json: false,
            width: 20,
        }
    }

    fn scheme_args(state: PathBuf, ambient: Ambient, action: Option<SchemeAction>) -> SchemeArgs {
        SchemeArgs {
            state: Some(state),
            ambient,
            action,
        }
    }

    #[test]
    fn test_config_yaml_and_json() {
        let site = SiteConfig::default();
        assert!(config(&site, Format::Yaml).unwrap().contains("jjaw-cn-page"));
        let json = config(&site, Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["lang"], "zh-CN");
    }

    #[test]
    fn test_scheme_set_and_get() {
        console::set_colors_enabled(false);
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.json");
        let site = SiteConfig::default();

        let out = scheme(
            &site,
            &scheme_args(
                state.clone(),
                Ambient::Light,
                Some(SchemeAction::Set {
                    value: SchemeValue::Dark,
                }),
            ),
        )
        .unwrap();
        assert!(out.contains("preference: dark"));
        assert!(out.contains(r#"<html lang="zh-CN" class="dark">"#));

        let out = scheme(&site, &scheme_args(state.clone(), Ambient::Dark, None)).unwrap();
        assert!(out.contains("preference: dark"));
        assert!(out.contains("effective:  dark"));

        let out = scheme(
            &site,
            &scheme_args(
                state,
                Ambient::Dark,
                Some(SchemeAction::Set {
                    value: SchemeValue::Auto,
                }),
            ),
        )
        .unwrap();
        assert!(out.contains("preference: auto"));
    }

    #[test]
    fn test_scheme_toggle_collapses_to_auto() {
        console::set_colors_enabled(false);
        let dir = tempfile::tempdir().unwrap();
        let state = dir.path().join("state.json");
        let site = SiteConfig::default();

        let toggle = || {
            scheme(
                &site,
                &scheme_args(state.clone(), Ambient::Light, Some(SchemeAction::Toggle)),
            )
            .unwrap()
        };
        assert!(toggle().contains("preference: dark"));
        let out = toggle();
        assert!(out.contains("preference: auto"));
        assert!(out.contains(r#"<html lang="zh-CN">"#));

        let stored = fs::read_to_string(dir.path().join("state.json")).unwrap();
        assert!(stored.contains("\"vuepress-color-scheme\": \"auto\""));
    }

    #[test]
    fn test_blog_listing_from_markdown_dir() {
        console::set_colors_enabled(false);
        let dir = tempfile::tempdir().unwrap();
        let articles = dir.path().join("articles");
        fs::create_dir_all(&articles).unwrap();
        fs::write(
            articles.join("a.md"),
            "---\ntitle: A very long article title indeed\ntags: [rust]\nstar: true\n---\n",
        )
        .unwrap();
        fs::write(articles.join("b.md"), "# B\n").unwrap();

        let site = SiteConfig::default();
        let out = blog(&site, &blog_args(dir.path().to_path_buf())).unwrap();
        assert!(out.contains("A very long article…"));
        assert!(out.contains("/articles/b.html"));
        assert!(out.contains("[rust]"));

        let mut args = blog_args(dir.path().to_path_buf());
        args.stars = true;
        let out = blog(&site, &args).unwrap();
        assert!(!out.contains("/articles/b.html"));

        let mut args = blog_args(dir.path().to_path_buf());
        args.tag = Some("missing".to_string());
        assert!(blog(&site, &args).unwrap().contains("no articles"));
    }

    #[test]
    fn test_blog_json_output_from_pages_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");
        fs::write(
            &path,
            r#"[{"path": "/articles/x.html", "filePath": "/s/articles/x.md", "title": "X",
                 "git": {"updatedTime": 1700000000000,
                         "contributors": [{"name": "jjaw", "email": "j@e", "commits": 3}]}}]"#,
        )
        .unwrap();

        let mut args = blog_args(path);
        args.source = Some(PathBuf::from("/s"));
        args.json = true;
        let out = blog(&SiteConfig::default(), &args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["path"], "/articles/x.html");
        assert_eq!(value[0]["info"]["git"]["commitMaxPerson"]["name"], "jjaw");
    }

    #[test]
    fn test_blog_pages_file_resolves_against_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let temp = dir.path().join(".vuepress").join(".temp");
        fs::create_dir_all(&temp).unwrap();
        let file_path = std::env::current_dir().unwrap().join("articles").join("x.md");
        let pages = serde_json::json!([
            {"path": "/articles/x.html", "filePath": file_path, "title": "X"}
        ]);
        let path = temp.join("pages.json");
        fs::write(&path, pages.to_string()).unwrap();

        let mut args = blog_args(path);
        args.json = true;
        let out = blog(&SiteConfig::default(), &args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["path"], "/articles/x.html");
    }

    #[test]
    fn test_blog_requires_plugin() {
        let site = SiteConfig::from_yaml_str("plugins:\n  - name: git\n").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = blog(&site, &blog_args(dir.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("blog plugin"));
    }
}
