//! Version-control metadata attached to pages.

use serde::{Deserialize, Serialize};

/// A contributor to a page's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitContributor {
    pub name: String,
    pub email: String,
    pub commits: u32,
}

/// Git data collected for one page. Times are milliseconds since the epoch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitData {
    pub created_time: Option<i64>,
    pub updated_time: Option<i64>,
    pub contributors: Vec<GitContributor>,
}

/// The git summary listed alongside an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitInfo {
    /// The contributor with the most commits.
    pub commit_max_person: Option<GitContributor>,
    pub updated_time: Option<i64>,
}

/// Summarizes a page's git data.
///
/// The top contributor is the first one with the highest commit count, so
/// ties keep their recorded order.
///
/// # Example
///
/// ```rust
/// use jjaw_site::blog::{git_info, GitContributor, GitData};
///
/// let data = GitData {
///     updated_time: Some(1_700_000_000_000),
///     contributors: vec![
///         GitContributor { name: "a".into(), email: "a@x".into(), commits: 2 },
///         GitContributor { name: "b".into(), email: "b@x".into(), commits: 5 },
///     ],
///     ..Default::default()
/// };
/// let info = git_info(&data);
/// assert_eq!(info.commit_max_person.unwrap().name, "b");
/// ```
pub fn git_info(data: &GitData) -> GitInfo {
    let commit_max_person = data
        .contributors
        .iter()
        .fold(None::<&GitContributor>, |best, c| match best {
            Some(b) if b.commits >= c.commits => Some(b),
            _ => Some(c),
        })
        .cloned();

    GitInfo {
        commit_max_person,
        updated_time: data.updated_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributor(name: &str, commits: u32) -> GitContributor {
        GitContributor {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            commits,
        }
    }

    #[test]
    fn test_no_contributors() {
        let info = git_info(&GitData {
            updated_time: Some(5),
            ..Default::default()
        });
        assert_eq!(info.commit_max_person, None);
        assert_eq!(info.updated_time, Some(5));
    }

    #[test]
    fn test_tie_keeps_first() {
        let data = GitData {
            contributors: vec![contributor("a", 3), contributor("b", 3), contributor("c", 1)],
            ..Default::default()
        };
        assert_eq!(git_info(&data).commit_max_person.unwrap().name, "a");
    }

    #[test]
    fn test_picks_highest() {
        let data = GitData {
            contributors: vec![contributor("a", 1), contributor("b", 9), contributor("c", 4)],
            ..Default::default()
        };
        assert_eq!(git_info(&data).commit_max_person.unwrap().name, "b");
    }

    #[test]
    fn test_deserialize_camel_case_with_missing_fields() {
        let data: GitData = serde_json::from_str(r#"{"updatedTime": 42}"#).unwrap();
        assert_eq!(data.updated_time, Some(42));
        assert!(data.contributors.is_empty());
    }
}
