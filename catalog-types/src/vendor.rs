use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use typesafe_repository::async_ops::{Get, List, Remove, Save};
use typesafe_repository::macros::Id;
use typesafe_repository::{GetIdentity, Identity, RefIdentity};
use typesafe_repository::Repository;

/// Priority resolved for vendors the registry does not know about (or that
/// are disabled). Large enough that a known vendor always outranks it.
pub const UNKNOWN_VENDOR_PRIORITY: u32 = 999;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    NeverSynced,
    InProgress,
    Success,
    Error,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::NeverSynced => "never_synced",
            SyncStatus::InProgress => "in_progress",
            SyncStatus::Success => "success",
            SyncStatus::Error => "error",
        }
    }

    pub fn from_str(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "in_progress" => SyncStatus::InProgress,
            "success" => SyncStatus::Success,
            "error" => SyncStatus::Error,
            _ => SyncStatus::NeverSynced,
        }
    }
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counters of the last completed (or aborted) sync run for a vendor.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub processed: u64,
    pub created: u64,
    pub updated: u64,
    pub skipped: u64,
    pub failed: u64,
}

#[derive(Id, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[Id(ref_id, get_id)]
pub struct Vendor {
    /// Immutable identity. The display name may change, the slug never does.
    #[id]
    pub slug: String,
    pub name: String,
    /// Unique within the vendor set; 1 is the highest authority. The full
    /// set of priorities is always the dense sequence 1..=N.
    pub priority: u32,
    pub enabled: bool,
    pub last_sync_at: Option<OffsetDateTime>,
    pub sync_status: SyncStatus,
    pub last_error: Option<String>,
    pub stats: SyncStats,
}

impl Vendor {
    pub fn new(slug: impl Into<String>, name: impl Into<String>, priority: u32) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            priority,
            enabled: true,
            last_sync_at: None,
            sync_status: SyncStatus::NeverSynced,
            last_error: None,
            stats: SyncStats::default(),
        }
    }
}

/// Partial update of the persisted sync-state columns. Everything else on
/// the vendor row is left untouched.
#[derive(Clone, Debug)]
pub struct SyncStateUpdate {
    pub status: SyncStatus,
    pub last_error: Option<String>,
    pub stats: Option<SyncStats>,
    /// Set only when the run succeeded; the timestamp never moves on error.
    pub advance_last_sync: Option<OffsetDateTime>,
}

#[async_trait]
pub trait VendorRepository:
    Repository<Vendor, Error = anyhow::Error>
    + Get<Vendor>
    + List<Vendor>
    + Save<Vendor>
    + Remove<Vendor>
    + Send
    + Sync
{
    /// Marks the vendor `in_progress` unless a run is already in flight.
    /// Returns `false` when another run holds the slot.
    async fn begin_sync(&self, slug: &str) -> anyhow::Result<bool>;

    /// Atomic partial update of the sync-state columns.
    async fn update_sync_state(&self, slug: &str, update: SyncStateUpdate) -> anyhow::Result<()>;
}
