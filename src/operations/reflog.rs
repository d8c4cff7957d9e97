//! `git reflog show` parsing

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static ENTRY_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([0-9a-f]+) ([^@]+@\{(\d+)\}):\s*(.+)$").ok());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReflogEntry {
    Parsed {
        index: usize,
        hash: String,
        reference: String,
        message: String,
        selector: String,
    },
    Raw {
        index: usize,
        raw: String,
    },
}

/// Parse at most `limit` entries. `reference` names the selector reported
/// back, e.g. `HEAD@{3}`.
pub fn parse_reflog(output: &str, reference: &str, limit: usize) -> Vec<ReflogEntry> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(limit)
        .enumerate()
        .map(|(position, line)| {
            let captures = ENTRY_RE.as_ref().and_then(|re| re.captures(line));
            match captures {
                Some(c) => {
                    let index = c[3].parse().unwrap_or(position);
                    ReflogEntry::Parsed {
                        index,
                        hash: c[1].to_string(),
                        reference: c[2].to_string(),
                        message: c[4].to_string(),
                        selector: format!("{reference}@{{{index}}}"),
                    }
                }
                None => ReflogEntry::Raw {
                    index: position,
                    raw: line.to_string(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_and_unparsable_lines() {
        let output = "a1b2c3d HEAD@{0}: commit: add parser\nf00baa1 HEAD@{1}: checkout: moving from main to topic\nweird line\n";
        let entries = parse_reflog(output, "HEAD", 20);
        assert_eq!(entries.len(), 3);
        match &entries[1] {
            ReflogEntry::Parsed { index, message, selector, .. } => {
                assert_eq!(*index, 1);
                assert_eq!(message, "checkout: moving from main to topic");
                assert_eq!(selector, "HEAD@{1}");
            }
            other => panic!("unexpected entry {other:?}"),
        }
        assert!(matches!(entries[2], ReflogEntry::Raw { index: 2, .. }));
    }

    #[test]
    fn limit_is_applied() {
        let output = "a HEAD@{0}: x\nb HEAD@{1}: y\nc HEAD@{2}: z\n";
        assert_eq!(parse_reflog(output, "HEAD", 2).len(), 2);
    }
}
