#![allow(
    clippy::missing_errors_doc,
    reason = "every fallible API returns the one crate-level AptError; per-item error docs would restate it"
)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod index;
pub mod models;
pub mod normalize;
pub mod query;
pub mod respond;
pub mod snapshot;
pub mod source;

pub use error::{AptError, Result};
pub use models::{GroupId, GroupRecord};
pub use query::CommandKind;
pub use snapshot::{Snapshot, SnapshotStore};
