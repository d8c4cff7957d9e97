//! `git blame --line-porcelain` parsing

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlameLine {
    pub hash: String,
    pub line: u32,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub summary: String,
    pub content: String,
}

pub fn parse_line_porcelain(output: &str) -> Vec<BlameLine> {
    let mut lines = Vec::new();
    let mut current: Option<BlameLine> = None;

    for raw in output.lines() {
        if let Some(content) = raw.strip_prefix('\t') {
            if let Some(mut entry) = current.take() {
                entry.content = content.to_string();
                lines.push(entry);
            }
            continue;
        }

        match &mut current {
            None => {
                let mut parts = raw.split_whitespace();
                let (Some(hash), Some(_orig), Some(line)) = (parts.next(), parts.next(), parts.next()) else {
                    continue;
                };
                current = Some(BlameLine {
                    hash: super::log::short(hash).to_string(),
                    line: line.parse().unwrap_or(0),
                    ..BlameLine::default()
                });
            }
            Some(entry) => {
                let (key, value) = raw.split_once(' ').unwrap_or((raw, ""));
                match key {
                    "author" => entry.author = value.to_string(),
                    "author-mail" => {
                        entry.email = Some(value.trim_matches(|c| c == '<' || c == '>').to_string());
                    }
                    "author-time" => {
                        entry.date = value.parse().ok().and_then(|t| DateTime::from_timestamp(t, 0));
                    }
                    "summary" => entry.summary = value.to_string(),
                    _ => {}
                }
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_end_at_the_content_line() {
        let output = "\
0123456789abcdef0123456789abcdef01234567 1 1 2
author Ada Lovelace
author-mail <ada@example.com>
author-time 1700000000
author-tz +0000
summary Initial import
filename src/lib.rs
\tfn main() {}
0123456789abcdef0123456789abcdef01234567 2 2
author Ada Lovelace
author-mail <ada@example.com>
author-time 1700000000
summary Initial import
filename src/lib.rs
\t
";
        let lines = parse_line_porcelain(output);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].hash, "01234567");
        assert_eq!(lines[0].author, "Ada Lovelace");
        assert_eq!(lines[0].email.as_deref(), Some("ada@example.com"));
        assert_eq!(lines[0].content, "fn main() {}");
        assert_eq!(lines[1].line, 2);
        assert_eq!(lines[1].content, "");
    }
}
