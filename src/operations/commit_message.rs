//! Conventional commit and gitmoji message formatting

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

static CONVENTIONAL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([a-z]+)(\([^)]*\))?!?: ").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Test,
    Chore,
    Ci,
    Perf,
}

impl CommitType {
    pub fn as_str(self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
            CommitType::Ci => "ci",
            CommitType::Perf => "perf",
        }
    }

    pub fn gitmoji(self) -> &'static str {
        match self {
            CommitType::Feat => "✨",
            CommitType::Fix => "🐛",
            CommitType::Docs => "📚",
            CommitType::Style => "💄",
            CommitType::Refactor => "♻️",
            CommitType::Test => "✅",
            CommitType::Chore => "🔧",
            CommitType::Ci => "👷",
            CommitType::Perf => "⚡",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "feat" => CommitType::Feat,
            "fix" => CommitType::Fix,
            "docs" => CommitType::Docs,
            "style" => CommitType::Style,
            "refactor" => CommitType::Refactor,
            "test" => CommitType::Test,
            "chore" => CommitType::Chore,
            "ci" => CommitType::Ci,
            "perf" => CommitType::Perf,
            _ => return None,
        })
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emoji used for a prefix that is not a known commit type.
pub const DEFAULT_GITMOJI: &str = "📝";

/// Guess a commit type from keywords in a free-form message.
pub fn detect_type(message: &str) -> CommitType {
    let lower = message.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has(&["fix", "bug"]) {
        CommitType::Fix
    } else if has(&["add", "new"]) {
        CommitType::Feat
    } else if has(&["doc"]) {
        CommitType::Docs
    } else if has(&["style", "format"]) {
        CommitType::Style
    } else if has(&["refactor", "restructure"]) {
        CommitType::Refactor
    } else if has(&["test"]) {
        CommitType::Test
    } else if has(&["performance", "perf"]) {
        CommitType::Perf
    } else if has(&["ci", "build"]) {
        CommitType::Ci
    } else {
        CommitType::Chore
    }
}

/// Type named by an existing `type(scope)!: ` prefix.
///
/// `Some(None)` means a prefix is present but names an unknown type.
pub fn conventional_prefix(message: &str) -> Option<Option<CommitType>> {
    let captures = CONVENTIONAL_RE.as_ref()?.captures(message)?;
    Some(CommitType::parse(&captures[1]))
}

pub fn has_emoji(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c as u32,
            0x1F600..=0x1F64F
            | 0x1F300..=0x1F5FF
            | 0x1F680..=0x1F6FF
            | 0x1F1E0..=0x1F1FF
            | 0x2600..=0x26FF
            | 0x2700..=0x27BF)
    })
}

/// Message formatting switches, the tool argument ANDed with configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageStyle {
    pub conventions: bool,
    pub gitmoji: bool,
}

/// Structured commit message parts.
#[derive(Debug, Clone)]
pub struct ConventionalParts<'a> {
    pub kind: CommitType,
    pub scope: Option<&'a str>,
    pub description: &'a str,
    pub body: Option<&'a str>,
    pub breaking: bool,
}

/// `type(scope)!: description`, body and breaking-change footer.
///
/// Without conventions only the description and body are kept.
pub fn format_conventional(parts: &ConventionalParts<'_>, style: MessageStyle) -> String {
    let mut subject = String::new();
    if style.conventions {
        subject.push_str(parts.kind.as_str());
        if let Some(scope) = parts.scope.filter(|s| !s.is_empty()) {
            subject.push_str(&format!("({scope})"));
        }
        if parts.breaking {
            subject.push('!');
        }
        subject.push_str(": ");
    }
    subject.push_str(parts.description);

    let mut message = if style.gitmoji {
        format!("{} {subject}", parts.kind.gitmoji())
    } else {
        subject
    };

    if let Some(body) = parts.body.filter(|b| !b.is_empty()) {
        message.push_str("\n\n");
        message.push_str(body);
    }
    if parts.breaking && style.conventions {
        message.push_str(&format!("\n\nBREAKING CHANGE: {}", parts.description));
    }
    message
}

/// Free-form message, prefixed with a gitmoji unless it already has an emoji.
///
/// With conventions on, an existing conventional prefix decides the emoji;
/// otherwise keywords do.
pub fn decorate_message(message: &str, style: MessageStyle) -> String {
    if !style.gitmoji || has_emoji(message) {
        return message.to_string();
    }
    let emoji = match conventional_prefix(message).filter(|_| style.conventions) {
        Some(Some(kind)) => kind.gitmoji(),
        Some(None) => DEFAULT_GITMOJI,
        None => detect_type(message).gitmoji(),
    };
    format!("{emoji} {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: MessageStyle = MessageStyle {
        conventions: true,
        gitmoji: true,
    };

    #[test]
    fn keyword_detection_order() {
        assert_eq!(detect_type("Fix crash when adding files"), CommitType::Fix);
        assert_eq!(detect_type("Add new parser"), CommitType::Feat);
        assert_eq!(detect_type("Update docs"), CommitType::Docs);
        assert_eq!(detect_type("Reformat code"), CommitType::Style);
        assert_eq!(detect_type("Bump version"), CommitType::Chore);
    }

    #[test]
    fn breaking_change_with_scope() {
        let parts = ConventionalParts {
            kind: CommitType::Feat,
            scope: Some("api"),
            description: "drop v1 endpoints",
            body: Some("Clients must migrate."),
            breaking: true,
        };
        assert_eq!(
            format_conventional(&parts, ALL),
            "✨ feat(api)!: drop v1 endpoints\n\nClients must migrate.\n\nBREAKING CHANGE: drop v1 endpoints"
        );
    }

    #[test]
    fn conventions_off_keeps_description_only() {
        let parts = ConventionalParts {
            kind: CommitType::Fix,
            scope: None,
            description: "handle empty input",
            body: None,
            breaking: false,
        };
        let style = MessageStyle {
            conventions: false,
            gitmoji: false,
        };
        assert_eq!(format_conventional(&parts, style), "handle empty input");
    }

    #[test]
    fn plain_messages_get_one_emoji() {
        assert_eq!(decorate_message("fix: off by one", ALL), "🐛 fix: off by one");
        assert_eq!(decorate_message("docs(readme): usage", ALL), "📚 docs(readme): usage");
        assert_eq!(decorate_message("wip: spike", ALL), "📝 wip: spike");
        assert_eq!(decorate_message("✨ already decorated", ALL), "✨ already decorated");
        assert_eq!(decorate_message("Bump version", ALL), "🔧 Bump version");
    }
}
