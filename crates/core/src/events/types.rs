use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events emitted after content changes, e.g. to invalidate rendered pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SiteEvent {
    PagesSynced(PagesSyncedEvent),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagesSyncedEvent {
    pub site_id: i64,
    pub pages: usize,
    pub blocks: usize,
    pub timestamp: DateTime<Utc>,
}
