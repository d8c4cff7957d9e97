//! Commit history parsing

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

const FIELD: char = '\u{1f}';
const RECORD: char = '\u{1e}';

/// `--format` argument producing output [`parse_log`] understands.
pub const LOG_FORMAT: &str = "--format=%H%x1f%an%x1f%ae%x1f%aI%x1f%s%x1e";

/// Lightweight commit metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitInfo {
    pub hash: String,
    pub short_hash: String,
    pub author: String,
    pub email: String,
    pub date: Option<DateTime<FixedOffset>>,
    pub message: String,
}

/// Parse `git log` output produced with [`LOG_FORMAT`].
///
/// Records with too few fields are skipped.
pub fn parse_log(output: &str) -> Vec<CommitInfo> {
    output
        .split(RECORD)
        .filter_map(|record| {
            let record = record.trim_start_matches(|c| c == '\n' || c == '\r');
            let mut fields = record.split(FIELD);
            let hash = fields.next()?.trim();
            if hash.is_empty() {
                return None;
            }
            let author = fields.next()?;
            let email = fields.next()?;
            let date = fields.next()?;
            let message = fields.next().unwrap_or_default();
            Some(CommitInfo {
                hash: hash.to_string(),
                short_hash: short(hash).to_string(),
                author: author.to_string(),
                email: email.to_string(),
                date: DateTime::parse_from_rfc3339(date.trim()).ok(),
                message: message.trim_end().to_string(),
            })
        })
        .collect()
}

/// First eight characters of an object id.
pub fn short(hash: &str) -> &str {
    let hash = hash.trim();
    hash.get(..8).unwrap_or(hash)
}
