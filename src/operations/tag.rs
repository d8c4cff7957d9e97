//! Tag names and metadata

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static TAG_NAME_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._/][a-zA-Z0-9._/-]*$").ok());

/// `--format` argument for `git for-each-ref` producing output
/// [`parse_tag_info`] understands.
pub const TAG_FORMAT: &str = "--format=%(refname:short)%1f%(objecttype)%1f%(objectname)%1f%(*objectname)%1f%(subject)%1f%(taggername)%(authorname)%1f%(creatordate:iso-strict)";

/// Letters, digits, dots, dashes, underscores and slashes only, not
/// starting with a dash.
pub fn is_valid_tag_name(name: &str) -> bool {
    TAG_NAME_RE.as_ref().is_some_and(|re| re.is_match(name))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Annotated,
    Lightweight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TagKind,
    pub commit: String,
    pub message: String,
    pub tagger: String,
    pub date: String,
}

/// Parse one line of [`TAG_FORMAT`] output.
pub fn parse_tag_info(line: &str) -> Option<TagInfo> {
    let fields: Vec<&str> = line.trim_end().split('\u{1f}').collect();
    if fields.len() < 7 {
        return None;
    }
    let annotated = fields[1] == "tag";
    let commit = if annotated && !fields[3].is_empty() { fields[3] } else { fields[2] };
    Some(TagInfo {
        name: fields[0].to_string(),
        kind: if annotated { TagKind::Annotated } else { TagKind::Lightweight },
        commit: super::log::short(commit).to_string(),
        message: fields[4].to_string(),
        tagger: if fields[5].is_empty() { "unknown".to_string() } else { fields[5].to_string() },
        date: if fields[6].is_empty() { "unknown".to_string() } else { fields[6].to_string() },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_name_charset() {
        assert!(is_valid_tag_name("v1.2.3"));
        assert!(is_valid_tag_name("release/2024-01_rc"));
        assert!(!is_valid_tag_name("bad tag"));
        assert!(!is_valid_tag_name("v1~2"));
        assert!(!is_valid_tag_name(""));
        assert!(!is_valid_tag_name("-d"));
        assert!(!is_valid_tag_name("--delete"));
        assert!(is_valid_tag_name("v1-rc"));
    }

    #[test]
    fn annotated_tag_points_at_peeled_commit() {
        let line = "v1.0\u{1f}tag\u{1f}aaaaaaaaaaaa\u{1f}bbbbbbbbbbbb\u{1f}Release 1.0\u{1f}Ada\u{1f}2024-03-01T10:00:00+00:00\n";
        let info = parse_tag_info(line).unwrap_or_else(|| panic!("tag line should parse"));
        assert_eq!(info.kind, TagKind::Annotated);
        assert_eq!(info.commit, "bbbbbbbb");
        assert_eq!(info.tagger, "Ada");
    }

    #[test]
    fn lightweight_tag_uses_object_name() {
        let line = "v0.1\u{1f}commit\u{1f}cccccccccccc\u{1f}\u{1f}Initial\u{1f}Bob\u{1f}2024-01-01T00:00:00+00:00";
        let info = parse_tag_info(line).unwrap_or_else(|| panic!("tag line should parse"));
        assert_eq!(info.kind, TagKind::Lightweight);
        assert_eq!(info.commit, "cccccccc");
    }
}
