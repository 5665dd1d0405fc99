//! Renders a match set (or the command table) as user-facing text.

use crate::models::{GroupId, GroupRecord};
use crate::query::CommandKind;

const RULE_WIDTH: usize = 80;

/// "N groups match your search" followed by a ruled section per group.
#[must_use]
pub fn groups_response(matches: &[(GroupId, &GroupRecord)]) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut out = format!("{} groups match your search\n", matches.len());
    for (position, (_, record)) in matches.iter().enumerate() {
        out.push_str(&format!("\n{rule}\nGroup {}\n{rule}\n", position + 1));
        out.push_str(&render_group(record));
        out.push('\n');
    }
    out
}

fn render_group(record: &GroupRecord) -> String {
    let mut fields = vec![
        field("country", &record.country),
        field("names", &record.names.join(", ")),
    ];
    if !record.tools.is_empty() {
        fields.push(field("tools", &record.tools.join(", ")));
    }
    if !record.targets.is_empty() {
        fields.push(field("targets", &record.targets.join(", ")));
    }
    if let Some(operations) = &record.operations {
        fields.push(field("operations", &operations.join(", ")));
    }
    for (key, value) in &record.extra {
        fields.push(field(key, value));
    }
    fields.join("\n\n")
}

fn field(key: &str, value: &str) -> String {
    format!("*{key}*:\n{value}")
}

/// The command table shown for `help` and for unrecognized input.
#[must_use]
pub fn help_response() -> String {
    let mut lines = vec!["Please use one of the following commands:".to_string()];
    for kind in CommandKind::ALL {
        lines.push(format!("*{}*: {}", kind.keyword(), kind.description()));
    }
    lines.push("For example, try \"group APT 2\"".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn record() -> GroupRecord {
        let mut extra = BTreeMap::new();
        extra.insert("First Seen".to_string(), "2006".to_string());
        GroupRecord {
            country: "Russia".to_string(),
            names: vec!["APT 28".to_string(), "Fancy Bear".to_string()],
            tools: vec!["X-Agent".to_string()],
            targets: Vec::new(),
            operations: None,
            extra,
        }
    }

    #[test]
    fn groups_response_counts_and_sections() {
        let rec = record();
        let hits = vec![(GroupId::from_position(0, 1), &rec)];
        let rendered = groups_response(&hits);

        assert!(rendered.starts_with("1 groups match your search"));
        assert!(rendered.contains("Group 1"));
        assert!(rendered.contains("*country*:\nRussia"));
        assert!(rendered.contains("*names*:\nAPT 28, Fancy Bear"));
        assert!(rendered.contains("*tools*:\nX-Agent"));
        assert!(rendered.contains("*First Seen*:\n2006"));
        // Absent attributes render nothing at all.
        assert!(!rendered.contains("*targets*"));
        assert!(!rendered.contains("*operations*"));
    }

    #[test]
    fn empty_match_set_renders_a_zero_count() {
        assert!(groups_response(&[]).starts_with("0 groups match your search"));
    }

    #[test]
    fn help_response_lists_all_four_commands() {
        let rendered = help_response();
        for kind in CommandKind::ALL {
            assert!(rendered.contains(&format!("*{}*:", kind.keyword())));
        }
        assert!(rendered.contains("For example"));
    }
}
