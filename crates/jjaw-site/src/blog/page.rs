//! Pages and their YAML front matter.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use super::git::GitData;
use super::BlogError;

/// A page of the site as seen by the blog aggregator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Route, e.g. `/articles/hello.html`.
    pub path: String,
    #[serde(default)]
    pub file_path: Option<PathBuf>,
    /// Title derived from the content (first `#` heading or file stem).
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub frontmatter: Mapping,
    #[serde(default)]
    pub git: Option<GitData>,
}

impl Page {
    /// Builds a page from markdown source with an optional `---` front matter block.
    pub fn from_markdown(
        route: impl Into<String>,
        file_path: Option<PathBuf>,
        source: &str,
    ) -> Result<Self, BlogError> {
        let (frontmatter, body) = split_frontmatter(source)?;
        let title = first_heading(body)
            .or_else(|| {
                file_path
                    .as_ref()
                    .and_then(|p| p.file_stem())
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .unwrap_or_default();

        Ok(Self {
            path: route.into(),
            file_path,
            title,
            frontmatter,
            git: None,
        })
    }

    /// A front matter value as a string, if it is one.
    pub fn frontmatter_str(&self, key: &str) -> Option<&str> {
        self.frontmatter.get(key).and_then(Value::as_str)
    }

    /// Whether a front matter value is set to something truthy.
    ///
    /// Absent, `null`, `false`, `0`, `NaN` and the empty string are falsy;
    /// everything else, including empty lists and maps, is truthy.
    pub fn frontmatter_flag(&self, key: &str) -> bool {
        match self.frontmatter.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Tagged(tagged)) => !matches!(tagged.value, Value::Null),
            Some(Value::Sequence(_)) | Some(Value::Mapping(_)) => true,
        }
    }

    /// Last update time from git, or 0 when unknown.
    pub fn updated_time(&self) -> i64 {
        self.git
            .as_ref()
            .and_then(|g| g.updated_time)
            .unwrap_or(0)
    }
}

fn split_frontmatter(source: &str) -> Result<(Mapping, &str), BlogError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let Some(rest) = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    else {
        return Ok((Mapping::new(), source));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((parse_frontmatter(yaml)?, body));
        }
        offset += line.len();
    }
    Err(BlogError::Frontmatter(
        "front matter block is not closed with '---'".to_string(),
    ))
}

fn parse_frontmatter(yaml: &str) -> Result<Mapping, BlogError> {
    match serde_yaml::from_str::<Value>(yaml) {
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(Value::Mapping(map)) => Ok(map),
        Ok(_) => Err(BlogError::Frontmatter(
            "front matter must be a mapping".to_string(),
        )),
        Err(e) => Err(BlogError::Frontmatter(e.to_string())),
    }
}

fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim_start)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Loads pages exported as a JSON array.
pub fn load_pages_json(path: &Path) -> Result<Vec<Page>, BlogError> {
    let text = fs::read_to_string(path).map_err(|source| BlogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let pages: Vec<Page> = serde_json::from_str(&text)?;
    debug!(path = %path.display(), pages = pages.len(), "pages loaded");
    Ok(pages)
}

/// Loads every `.md` file under `root`, routing `a/b.md` to `/a/b.html`
/// and `README.md`/`index.md` to their directory.
///
/// Pages are returned sorted by route.
pub fn load_markdown_dir(root: &Path) -> Result<Vec<Page>, BlogError> {
    let mut files = Vec::new();
    walk_markdown(root, &mut files).map_err(|source| BlogError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut pages = Vec::with_capacity(files.len());
    for file in files {
        let source = fs::read_to_string(&file).map_err(|source| BlogError::Io {
            path: file.clone(),
            source,
        })?;
        let relative = file.strip_prefix(root).unwrap_or(&file);
        let route = route_for(relative);
        let page = Page::from_markdown(route, Some(file.clone()), &source).map_err(|e| match e {
            BlogError::Frontmatter(msg) => {
                BlogError::Frontmatter(format!("{}: {msg}", file.display()))
            }
            other => other,
        })?;
        pages.push(page);
    }
    pages.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(root = %root.display(), pages = pages.len(), "markdown pages loaded");
    Ok(pages)
}

fn walk_markdown(current: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(current)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_markdown(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    Ok(())
}

fn route_for(relative: &Path) -> String {
    let mut parts: Vec<String> = relative
        .iter()
        .map(|part| part.to_string_lossy().into_owned())
        .collect();
    let file = parts.pop().unwrap_or_default();
    let stem = file.strip_suffix(".md").unwrap_or(&file);

    let mut route = String::from("/");
    for part in &parts {
        route.push_str(part);
        route.push('/');
    }
    if !(stem.eq_ignore_ascii_case("readme") || stem == "index") {
        route.push_str(stem);
        route.push_str(".html");
    }
    route
}
