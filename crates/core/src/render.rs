use std::sync::Arc;

use serde_json::Value;
use site_composer_blocks::access;

use crate::error::StoreResult;
use crate::model::{Site, Template};
use crate::pages::{page_index, PageSummary};
use crate::relational::build_document;
use crate::resolver::{self, ResolveRequest, ResolvedPage};
use crate::store::ContentStore;

/// Loads a site and its template and runs the resolver over them.
#[derive(Clone)]
pub struct SiteRenderService {
    store: Arc<dyn ContentStore>,
}

impl SiteRenderService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// The saved content document of `site`. In relational mode the page
    /// sections are rebuilt from rows and laid over the stored document, so
    /// site-level keys such as `colors` survive.
    pub async fn saved_document(&self, site: &Site) -> StoreResult<Option<Value>> {
        if !site.uses_relational_pages {
            return Ok(site.custom_page_data.clone());
        }
        let rows = self.store.load_site_pages(site.id).await?;
        let rebuilt = build_document(&rows.pages, &rows.blocks);
        let mut document = access::map_or_empty(site.custom_page_data.as_ref());
        access::shallow_merge(&mut document, &access::map_or_empty(Some(&rebuilt)));
        Ok(Some(Value::Object(document)))
    }

    async fn load(&self, site_id: i64) -> StoreResult<(Template, Option<Value>)> {
        let site = self.store.load_site(site_id).await?;
        let template = self.store.load_template(site.template_id).await?;
        let saved = self.saved_document(&site).await?;
        Ok((template, saved))
    }

    pub async fn render(&self, site_id: i64, request: &ResolveRequest) -> StoreResult<ResolvedPage> {
        let (template, saved) = self.load(site_id).await?;
        Ok(resolver::resolve(&template, saved.as_ref(), request))
    }

    /// The site's page list for the dashboard.
    pub async fn page_index(&self, site_id: i64) -> StoreResult<Vec<PageSummary>> {
        let (template, saved) = self.load(site_id).await?;
        Ok(page_index(&template, saved.as_ref()))
    }

    pub async fn module_labels(&self, site_id: i64, module_type: &str) -> StoreResult<Vec<String>> {
        let (template, saved) = self.load(site_id).await?;
        Ok(resolver::collect_module_labels(&template, saved.as_ref(), module_type))
    }
}
