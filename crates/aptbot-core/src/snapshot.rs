use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AptError, Result};
use crate::index::{SnapshotIndices, build_indices};
use crate::models::{GroupId, GroupRecord};
use crate::normalize::normalize;
use crate::source::{Workbook, parse_workbook};

/// Provenance stamped onto a snapshot at build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotManifest {
    pub snapshot_id: String,
    pub source: String,
    pub source_hash: String,
    pub built_at: DateTime<Utc>,
    pub record_count: usize,
}

/// The immutable pairing of the record collection and its four indices,
/// published as a unit. Built once offline; read-only for the lifetime of
/// the serving process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub manifest: SnapshotManifest,
    pub records: BTreeMap<GroupId, GroupRecord>,
    pub indices: SnapshotIndices,
}

impl Snapshot {
    /// Runs the full offline build: normalize, index, stamp provenance.
    /// Refuses to produce a snapshot with an empty record collection.
    pub fn build(book: &Workbook, source_label: &str, source_bytes: &[u8]) -> Result<Self> {
        let records = normalize(book);
        if records.is_empty() {
            return Err(AptError::Validation(
                "source produced no records".to_string(),
            ));
        }
        let indices = build_indices(&records);

        let manifest = SnapshotManifest {
            snapshot_id: uuid::Uuid::new_v4().to_string(),
            source: source_label.to_string(),
            source_hash: blake3::hash(source_bytes).to_hex().to_string(),
            built_at: Utc::now(),
            record_count: records.len(),
        };
        info!(
            snapshot_id = %manifest.snapshot_id,
            records = manifest.record_count,
            source = source_label,
            "snapshot built"
        );

        Ok(Self {
            manifest,
            records,
            indices,
        })
    }

    /// Reads a workbook JSON document and builds a snapshot from it.
    pub fn build_from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let book = parse_workbook(&raw)?;
        if book.sheets.is_empty() {
            return Err(AptError::InvalidSource(format!(
                "workbook has no sheets: {}",
                path.display()
            )));
        }
        Self::build(&book, &path.display().to_string(), raw.as_bytes())
    }

    /// Assembles a snapshot from already-built parts, stamping provenance
    /// from the in-memory collection instead of a source document.
    #[must_use]
    pub fn from_parts(
        source_label: &str,
        records: BTreeMap<GroupId, GroupRecord>,
        indices: SnapshotIndices,
    ) -> Self {
        let manifest = SnapshotManifest {
            snapshot_id: uuid::Uuid::new_v4().to_string(),
            source: source_label.to_string(),
            source_hash: String::new(),
            built_at: Utc::now(),
            record_count: records.len(),
        };
        Self {
            manifest,
            records,
            indices,
        }
    }

    /// Serving-side validation: a snapshot without records is never swapped
    /// in. Dangling index ids are tolerated (skipped at query time) but
    /// reported.
    pub fn validate(&self) -> Result<()> {
        if self.records.is_empty() {
            return Err(AptError::InvalidSnapshot(
                "record collection is empty".to_string(),
            ));
        }

        let dangling = [
            &self.indices.name,
            &self.indices.tool,
            &self.indices.target,
            &self.indices.operation,
        ]
        .into_iter()
        .flat_map(|index| index.values())
        .flatten()
        .filter(|id| !self.records.contains_key(*id))
        .count();
        if dangling > 0 {
            warn!(dangling, "snapshot index references unknown record ids");
        }
        Ok(())
    }

    /// Writes the snapshot atomically: sibling temp file, then rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, path)?;
        info!(snapshot_id = %self.manifest.snapshot_id, path = %path.display(), "snapshot saved");
        Ok(())
    }

    /// Loads and validates a previously saved snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

/// Process-wide handle for the published snapshot.
///
/// Readers take an `Arc` and keep using it for the duration of their query;
/// a rebuild publishes a wholly new snapshot in one swap and never mutates
/// the live one.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<Snapshot>>,
}

impl SnapshotStore {
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    #[must_use]
    pub fn current(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn publish(&self, snapshot: Snapshot) {
        info!(snapshot_id = %snapshot.manifest.snapshot_id, "snapshot published");
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(snapshot);
    }
}
