use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{ContentStore, SitePages};
use crate::error::{StoreError, StoreResult};
use crate::model::{PagePlan, Site, SiteBlockRow, SitePageRow, Template};

/// In-memory store for tests and local development. A replace holds the
/// write lock for its whole duration, so readers see either the old or the
/// new page set.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    sites: HashMap<i64, Site>,
    templates: HashMap<i64, Template>,
    pages: Vec<SitePageRow>,
    blocks: Vec<SiteBlockRow>,
    last_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_site(&self, site: Site) {
        self.state.write().await.sites.insert(site.id, site);
    }

    pub async fn insert_template(&self, template: Template) {
        self.state.write().await.templates.insert(template.id, template);
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn load_site(&self, site_id: i64) -> StoreResult<Site> {
        self.state
            .read()
            .await
            .sites
            .get(&site_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("site {site_id}")))
    }

    async fn load_template(&self, template_id: i64) -> StoreResult<Template> {
        self.state
            .read()
            .await
            .templates
            .get(&template_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("template {template_id}")))
    }

    async fn replace_site_pages(&self, site_id: i64, pages: &[PagePlan], document: &Value) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if !state.sites.contains_key(&site_id) {
            return Err(StoreError::NotFound(format!("site {site_id}")));
        }

        state.blocks.retain(|b| b.site_id != site_id);
        state.pages.retain(|p| p.site_id != site_id);

        for plan in pages {
            let page_id = state.next_id();
            state.pages.push(plan.to_row(page_id, site_id));

            let mut ids: Vec<i64> = Vec::with_capacity(plan.blocks.len());
            for block in &plan.blocks {
                let id = state.next_id();
                state.blocks.push(SiteBlockRow {
                    id,
                    site_id,
                    page_id,
                    parent_id: block.parent.and_then(|i| ids.get(i).copied()),
                    uuid: Some(block.uuid.clone()),
                    block_type: block.block_type.clone(),
                    data: Value::Object(block.data.clone()),
                    position: block.position,
                });
                ids.push(id);
            }
        }

        if let Some(site) = state.sites.get_mut(&site_id) {
            site.custom_page_data = Some(document.clone());
            site.uses_relational_pages = true;
        }
        Ok(())
    }

    async fn load_site_pages(&self, site_id: i64) -> StoreResult<SitePages> {
        let state = self.state.read().await;
        let mut pages: Vec<SitePageRow> = state
            .pages
            .iter()
            .filter(|p| p.site_id == site_id)
            .cloned()
            .collect();
        pages.sort_by_key(|p| (p.order, p.id));

        let mut blocks: Vec<SiteBlockRow> = state
            .blocks
            .iter()
            .filter(|b| b.site_id == site_id)
            .cloned()
            .collect();
        blocks.sort_by_key(|b| (b.page_id, b.parent_id, b.position, b.id));

        Ok(SitePages { pages, blocks })
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
