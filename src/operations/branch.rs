//! Branch listing

use serde::Serialize;

/// `--format` argument producing output [`parse_branches`] understands.
pub const BRANCH_FORMAT: &str = "--format=%(HEAD)%1f%(refname)%1f%(refname:short)%1f%(upstream:short)%1f%(upstream:track,nobracket)%1f%(objectname:short)%1f%(contents:subject)";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchInfo {
    pub name: String,
    pub current: bool,
    pub remote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream: Option<String>,
    pub ahead: u32,
    pub behind: u32,
    pub commit: String,
    pub subject: String,
}

/// Whether a user-supplied ref or revision would be read by git as an option.
pub fn looks_like_option(value: &str) -> bool {
    value.trim_start().starts_with('-')
}

pub fn parse_branches(output: &str) -> Vec<BranchInfo> {
    output
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split('\u{1f}').collect();
            if fields.len() < 6 {
                return None;
            }
            let full = fields[1];
            // Symbolic refs such as origin/HEAD are not branches
            if full.ends_with("/HEAD") {
                return None;
            }
            let (ahead, behind) = parse_track(fields[4]);
            Some(BranchInfo {
                name: fields[2].to_string(),
                current: fields[0] == "*",
                remote: full.starts_with("refs/remotes/"),
                upstream: Some(fields[3]).filter(|u| !u.is_empty()).map(str::to_string),
                ahead,
                behind,
                commit: fields[5].to_string(),
                subject: fields.get(6).copied().unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Parse `ahead 2, behind 1` (the `upstream:track,nobracket` atom).
fn parse_track(track: &str) -> (u32, u32) {
    let mut ahead = 0;
    let mut behind = 0;
    for part in track.split(',') {
        let mut words = part.split_whitespace();
        match (words.next(), words.next().and_then(|n| n.parse().ok())) {
            (Some("ahead"), Some(n)) => ahead = n,
            (Some("behind"), Some(n)) => behind = n,
            _ => {}
        }
    }
    (ahead, behind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_and_remote_branches() {
        let output = "*\u{1f}refs/heads/main\u{1f}main\u{1f}origin/main\u{1f}ahead 2, behind 1\u{1f}abc1234\u{1f}Initial\n\
                       \u{1f}refs/heads/topic\u{1f}topic\u{1f}\u{1f}\u{1f}def5678\u{1f}Work\n\
                       \u{1f}refs/remotes/origin/HEAD\u{1f}origin\u{1f}\u{1f}\u{1f}abc1234\u{1f}Initial\n\
                       \u{1f}refs/remotes/origin/main\u{1f}origin/main\u{1f}\u{1f}\u{1f}abc1234\u{1f}Initial\n";
        let branches = parse_branches(output);
        assert_eq!(branches.len(), 3);
        assert!(branches[0].current);
        assert_eq!((branches[0].ahead, branches[0].behind), (2, 1));
        assert_eq!(branches[0].upstream.as_deref(), Some("origin/main"));
        assert_eq!(branches[1].upstream, None);
        assert!(branches[2].remote);
        assert_eq!(branches[2].name, "origin/main");
    }

    #[test]
    fn gone_upstream_counts_as_even() {
        assert_eq!(parse_track("gone"), (0, 0));
        assert_eq!(parse_track("behind 4"), (0, 4));
    }
}
