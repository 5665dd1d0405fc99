use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for one normalized group record.
///
/// Packs the source position as `(sheet index, row index)`. Ids are
/// collision-free and deterministic within a single normalization run; they
/// are not guaranteed to carry over to a rebuild from an edited source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(u64);

impl GroupId {
    // 32 bits per component: no spreadsheet format carries more sheets or
    // rows than that, so positions never collide within a run.
    const ROW_BITS: u32 = 32;
    const ROW_MASK: u64 = (1 << Self::ROW_BITS) - 1;

    #[must_use]
    pub fn from_position(sheet_index: usize, row_index: usize) -> Self {
        Self(((sheet_index as u64) << Self::ROW_BITS) | (row_index as u64 & Self::ROW_MASK))
    }

    #[must_use]
    pub const fn sheet_index(self) -> u64 {
        self.0 >> Self::ROW_BITS
    }

    #[must_use]
    pub const fn row_index(self) -> u64 {
        self.0 & Self::ROW_MASK
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.sheet_index(), self.row_index())
    }
}

/// One normalized threat-actor-group entry.
///
/// `names` is non-empty for every emitted record; rows without a confirmed
/// name are dropped during normalization. `operations: None` means "no known
/// named operation" and must survive serialization as an absent field,
/// distinct from an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub country: String,
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<String>>,
    /// Source columns that did not match a recognized attribute kind.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}
