//! Working tree status from `git status --porcelain`

use serde::Serialize;

/// One changed path with its two-letter porcelain code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    pub path: String,
    pub status: String,
}

/// Parsed working tree state of the current branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkingTreeStatus {
    pub branch: String,
    pub ahead: u32,
    pub behind: u32,
    pub staged: Vec<String>,
    pub unstaged: Vec<String>,
    pub untracked: Vec<String>,
    pub conflicted: Vec<String>,
    #[serde(skip)]
    pub files: Vec<FileStatus>,
}

const CONFLICT_CODES: [&str; 7] = ["DD", "AU", "UD", "UA", "DU", "AA", "UU"];

impl WorkingTreeStatus {
    /// Parse porcelain v1 output. Branch and tracking counts are left empty.
    pub fn parse_porcelain(output: &str) -> Self {
        let mut status = Self::default();

        for line in output.lines() {
            if line.len() < 4 || line.starts_with("##") {
                continue;
            }
            let (code, rest) = line.split_at(2);
            let path = match rest[1..].split_once(" -> ") {
                Some((_, to)) => to,
                None => &rest[1..],
            };
            let path = path.trim_matches('"').to_string();

            status.files.push(FileStatus {
                path: path.clone(),
                status: code.to_string(),
            });

            if code == "??" {
                status.untracked.push(path);
                continue;
            }
            if code == "!!" {
                continue;
            }
            if CONFLICT_CODES.contains(&code) {
                status.conflicted.push(path);
                continue;
            }

            let mut chars = code.chars();
            let index = chars.next().unwrap_or(' ');
            let worktree = chars.next().unwrap_or(' ');
            if index != ' ' {
                status.staged.push(path.clone());
            }
            if matches!(worktree, 'M' | 'D' | 'T') {
                status.unstaged.push(path);
            }
        }

        status
    }

    pub fn is_clean(&self) -> bool {
        self.files.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.staged.len() + self.unstaged.len() + self.untracked.len()
    }

    pub fn format_porcelain(&self) -> String {
        let mut out = format!("## {}", self.branch);
        if self.ahead > 0 {
            out.push_str(&format!("...ahead {}", self.ahead));
        }
        if self.behind > 0 {
            out.push_str(&format!("...behind {}", self.behind));
        }
        out.push('\n');
        for file in &self.staged {
            out.push_str(&format!("A  {file}\n"));
        }
        for file in &self.unstaged {
            out.push_str(&format!(" M {file}\n"));
        }
        for file in &self.untracked {
            out.push_str(&format!("?? {file}\n"));
        }
        for file in &self.conflicted {
            out.push_str(&format!("UU {file}\n"));
        }
        out
    }

    pub fn format_short(&self) -> String {
        format!(
            "On branch {} | {} changes | {}↑ {}↓",
            self.branch,
            self.change_count(),
            self.ahead,
            self.behind
        )
    }

    pub fn format_human(&self, stash_count: usize) -> String {
        let mut out = format!("On branch {}\n", self.branch);

        if self.ahead > 0 || self.behind > 0 {
            let mut parts = Vec::new();
            if self.ahead > 0 {
                parts.push(format!("ahead by {}", plural(self.ahead as usize, "commit", "commits")));
            }
            if self.behind > 0 {
                parts.push(format!("behind by {}", plural(self.behind as usize, "commit", "commits")));
            }
            out.push_str(&format!("Your branch is {}\n", parts.join(" and ")));
        }

        let sections: [(&str, &[String], &str); 4] = [
            ("Changes to be committed:", &self.staged, "modified: "),
            ("Changes not staged for commit:", &self.unstaged, "modified: "),
            ("Untracked files:", &self.untracked, ""),
            ("Unmerged paths:", &self.conflicted, "both modified: "),
        ];
        for (title, files, label) in sections {
            if files.is_empty() {
                continue;
            }
            out.push_str(&format!("\n{title}\n"));
            for file in files {
                out.push_str(&format!("  {label}{file}\n"));
            }
        }

        if stash_count > 0 {
            out.push_str(&format!("\nYou have {}\n", plural(stash_count, "stash", "stashes")));
        }
        out
    }
}

/// Parse `git rev-list --left-right --count upstream...HEAD` into (ahead, behind).
pub fn parse_ahead_behind(output: &str) -> (u32, u32) {
    let mut counts = output.split_whitespace().map(|n| n.parse::<u32>().unwrap_or(0));
    let behind = counts.next().unwrap_or(0);
    let ahead = counts.next().unwrap_or(0);
    (ahead, behind)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 { format!("{n} {one}") } else { format!("{n} {many}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORCELAIN: &str = "M  src/lib.rs\n M README.md\nMM src/main.rs\nR  old.rs -> new.rs\n?? notes.txt\nUU conflict.rs\n";

    #[test]
    fn porcelain_lines_are_classified() {
        let status = WorkingTreeStatus::parse_porcelain(PORCELAIN);
        assert_eq!(status.staged, ["src/lib.rs", "src/main.rs", "new.rs"]);
        assert_eq!(status.unstaged, ["README.md", "src/main.rs"]);
        assert_eq!(status.untracked, ["notes.txt"]);
        assert_eq!(status.conflicted, ["conflict.rs"]);
        assert_eq!(status.files.len(), 6);
        assert!(!status.is_clean());
    }

    #[test]
    fn empty_output_is_clean() {
        assert!(WorkingTreeStatus::parse_porcelain("").is_clean());
    }

    #[test]
    fn left_right_count_is_behind_then_ahead() {
        assert_eq!(parse_ahead_behind("3\t5\n"), (5, 3));
        assert_eq!(parse_ahead_behind(""), (0, 0));
    }

    #[test]
    fn human_format_mentions_stashes() {
        let mut status = WorkingTreeStatus::parse_porcelain("?? a.txt\n");
        status.branch = "main".into();
        status.ahead = 2;
        let text = status.format_human(1);
        assert!(text.starts_with("On branch main\nYour branch is ahead by 2 commits\n"));
        assert!(text.contains("Untracked files:\n  a.txt\n"));
        assert!(text.ends_with("You have 1 stash\n"));
    }
}
