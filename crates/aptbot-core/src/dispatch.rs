//! Resolves one inbound line of text to a user-facing response. The chat
//! transport (who receives the line, where the response goes) stays outside
//! the core.

use tracing::debug;

use crate::query::{self, CommandKind};
use crate::respond;
use crate::snapshot::Snapshot;

/// `help` alone shows the command table; a recognized keyword followed by an
/// argument runs the query; anything else falls back to the command table.
/// An unrecognized keyword is a normal outcome, never an error.
#[must_use]
pub fn handle_text(snapshot: &Snapshot, text: &str) -> String {
    let text = text.trim();
    let Some((keyword, argument)) = text.split_once(' ') else {
        // Single word: only `help` is a command that takes no argument.
        return respond::help_response();
    };

    let Some(kind) = CommandKind::from_keyword(keyword) else {
        return respond::help_response();
    };

    let argument = argument.trim();
    let matches = query::matches(snapshot, kind, argument);
    debug!(keyword, argument, matches = matches.len(), "query handled");
    respond::groups_response(&matches)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::index::build_indices;
    use crate::models::{GroupId, GroupRecord};

    fn snapshot() -> Snapshot {
        let mut records = BTreeMap::new();
        records.insert(
            GroupId::from_position(0, 1),
            GroupRecord {
                country: "Russia".to_string(),
                names: vec!["APT 28".to_string()],
                tools: vec!["X-Agent".to_string()],
                targets: Vec::new(),
                operations: None,
                extra: BTreeMap::new(),
            },
        );
        let indices = build_indices(&records);
        Snapshot::from_parts("test", records, indices)
    }

    #[test]
    fn help_returns_the_command_table() {
        let rendered = handle_text(&snapshot(), "help");
        assert!(rendered.starts_with("Please use one of the following commands:"));
    }

    #[test]
    fn recognized_keyword_runs_the_query() {
        let rendered = handle_text(&snapshot(), "group apt");
        assert!(rendered.starts_with("1 groups match your search"));
        assert!(rendered.contains("APT 28"));
    }

    #[test]
    fn argument_whitespace_is_trimmed_before_matching() {
        // Extra spaces between keyword and argument do not become part of
        // the needle.
        let rendered = handle_text(&snapshot(), "group   apt");
        assert!(rendered.starts_with("1 groups match your search"));
    }

    #[test]
    fn zero_matches_is_a_normal_rendered_outcome() {
        let rendered = handle_text(&snapshot(), "target japan");
        assert!(rendered.starts_with("0 groups match your search"));
    }

    #[test]
    fn unrecognized_keyword_falls_back_to_help() {
        let rendered = handle_text(&snapshot(), "groups apt");
        assert!(rendered.starts_with("Please use one of the following commands:"));
    }

    #[test]
    fn bare_command_without_argument_falls_back_to_help() {
        let rendered = handle_text(&snapshot(), "group");
        assert!(rendered.starts_with("Please use one of the following commands:"));
    }

    #[test]
    fn help_with_an_argument_is_not_a_command() {
        let rendered = handle_text(&snapshot(), "help me");
        assert!(rendered.starts_with("Please use one of the following commands:"));
    }
}
