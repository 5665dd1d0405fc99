use std::collections::HashSet;

use crate::index::AttributeKind;
use crate::models::{GroupId, GroupRecord};
use crate::snapshot::Snapshot;

/// Keyword selecting which attribute kind a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Group,
    Tool,
    Target,
    Ops,
}

impl CommandKind {
    pub const ALL: [Self; 4] = [Self::Group, Self::Tool, Self::Target, Self::Ops];

    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Tool => "tool",
            Self::Target => "target",
            Self::Ops => "ops",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Group => "information about the APT group(s) containing the given name",
            Self::Tool => "list of APT groups that use the given tool",
            Self::Target => "list of APT groups that target the given asset or organization",
            Self::Ops => "list of APT groups that executed the given operation",
        }
    }

    #[must_use]
    pub const fn attribute(self) -> AttributeKind {
        match self {
            Self::Group => AttributeKind::Name,
            Self::Tool => AttributeKind::Tool,
            Self::Target => AttributeKind::Target,
            Self::Ops => AttributeKind::Operation,
        }
    }
}

/// Attribute-scoped substring lookup against the frozen snapshot.
///
/// The argument is case-folded for comparison only; a term matches when the
/// folded argument is a substring of the folded term ("apt" matches both
/// "APT 28" and "APT 281"). Results keep first-seen order over the index
/// traversal and are deduplicated by id, so a record whose terms match more
/// than once still appears exactly once. An empty result is a normal "no
/// match" outcome.
///
/// An empty argument is a substring of every term and therefore returns
/// every record carrying the attribute; kept verbatim from the source
/// behavior, pending product review.
#[must_use]
pub fn matches<'a>(
    snapshot: &'a Snapshot,
    kind: CommandKind,
    argument: &str,
) -> Vec<(GroupId, &'a GroupRecord)> {
    let needle = argument.to_lowercase();
    let index = snapshot.indices.for_kind(kind.attribute());

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for (term, ids) in index {
        if !term.to_lowercase().contains(&needle) {
            continue;
        }
        for &id in ids {
            if !seen.insert(id) {
                continue;
            }
            // Index and records are built from the same source; a dangling id
            // is an internal inconsistency recovered by skipping, not a crash.
            let Some(record) = snapshot.records.get(&id) else {
                continue;
            };
            out.push((id, record));
        }
    }
    out
}
