use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use super::{build_document, plan_pages};
use crate::error::SyncError;
use crate::events::{EventBus, PagesSyncedEvent, SiteEvent};
use crate::model::validate::validate_page_slug;
use crate::model::Site;
use crate::pages::custom_page_slugs;
use crate::store::ContentStore;

/// Counts of what a sync wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub pages: usize,
    pub blocks: usize,
}

/// Moves site content between the JSON document and page/block rows.
#[derive(Clone)]
pub struct RelationalSync {
    store: Arc<dyn ContentStore>,
    events: EventBus,
}

impl RelationalSync {
    pub fn new(store: Arc<dyn ContentStore>, events: EventBus) -> Self {
        Self { store, events }
    }

    /// Replace all page and block rows of `site` with the content of
    /// `document` and switch the site to relational mode.
    pub async fn sync_to_relational(&self, site: &Site, document: &Value) -> Result<SyncSummary, SyncError> {
        for slug in custom_page_slugs(Some(document)) {
            validate_page_slug(slug)?;
        }

        let template = self.store.load_template(site.template_id).await?;
        let plans = plan_pages(&template, Some(document));
        let summary = SyncSummary {
            pages: plans.len(),
            blocks: plans.iter().map(|p| p.blocks.len()).sum(),
        };

        self.store.replace_site_pages(site.id, &plans, document).await?;

        tracing::info!(
            site_id = site.id,
            pages = summary.pages,
            blocks = summary.blocks,
            "synced site content to relational storage"
        );
        self.events.publish(SiteEvent::PagesSynced(PagesSyncedEvent {
            site_id: site.id,
            pages: summary.pages,
            blocks: summary.blocks,
            timestamp: Utc::now(),
        }));

        Ok(summary)
    }

    /// Reconstruct the content document from the site's rows.
    pub async fn build_from_relational(&self, site_id: i64) -> Result<Value, SyncError> {
        let rows = self.store.load_site_pages(site_id).await?;
        tracing::debug!(
            site_id,
            pages = rows.pages.len(),
            blocks = rows.blocks.len(),
            "rebuilding content document"
        );
        Ok(build_document(&rows.pages, &rows.blocks))
    }
}
