//! Storage seam for sites, templates and the relational page/block rows.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;
use crate::model::{PagePlan, Site, SiteBlockRow, SitePageRow, Template};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// All page and block rows of one site.
#[derive(Debug, Clone, Default)]
pub struct SitePages {
    /// Ordered by `order`, then id.
    pub pages: Vec<SitePageRow>,
    /// Ordered by page, parent, position, then id.
    pub blocks: Vec<SiteBlockRow>,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn load_site(&self, site_id: i64) -> StoreResult<Site>;

    /// Load a template with its pages.
    async fn load_template(&self, template_id: i64) -> StoreResult<Template>;

    /// Atomically replace every page and block of the site with `pages`,
    /// store `document` as the site's content document and switch the site
    /// to relational mode. Either all of it happens or none of it does.
    async fn replace_site_pages(&self, site_id: i64, pages: &[PagePlan], document: &Value) -> StoreResult<()>;

    async fn load_site_pages(&self, site_id: i64) -> StoreResult<SitePages>;

    /// Check storage connectivity.
    async fn ping(&self) -> StoreResult<()>;
}
