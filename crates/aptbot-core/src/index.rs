use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::models::{GroupId, GroupRecord};

/// The four queryable categorical fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Name,
    Tool,
    Target,
    Operation,
}

/// Inverted mapping from a literal term to the set of record ids listing it.
/// Terms keep their source casing; case folding happens at query time.
pub type TermIndex = BTreeMap<String, BTreeSet<GroupId>>;

/// One term index per attribute kind, built together from one record
/// collection and frozen as part of the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotIndices {
    pub name: TermIndex,
    pub tool: TermIndex,
    pub target: TermIndex,
    pub operation: TermIndex,
}

impl SnapshotIndices {
    #[must_use]
    pub fn for_kind(&self, kind: AttributeKind) -> &TermIndex {
        match kind {
            AttributeKind::Name => &self.name,
            AttributeKind::Tool => &self.tool,
            AttributeKind::Target => &self.target,
            AttributeKind::Operation => &self.operation,
        }
    }
}

#[must_use]
pub fn build_indices(records: &BTreeMap<GroupId, GroupRecord>) -> SnapshotIndices {
    let mut indices = SnapshotIndices::default();
    for (&id, record) in records {
        insert_terms(&mut indices.name, &record.names, id);
        insert_terms(&mut indices.tool, &record.tools, id);
        insert_terms(&mut indices.target, &record.targets, id);
        if let Some(operations) = &record.operations {
            insert_terms(&mut indices.operation, operations, id);
        }
    }
    indices
}

fn insert_terms(index: &mut TermIndex, terms: &[String], id: GroupId) {
    for term in terms {
        index.entry(term.clone()).or_default().insert(id);
    }
}
