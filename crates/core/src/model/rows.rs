//! Relational projection of a site's content: one row per page, one row per
//! block, with the block tree stored as an adjacency list.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SeoMeta;

/// Maps to the `site_pages` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SitePageRow {
    pub id: i64,
    pub site_id: i64,
    /// Non-owning link to the template page this page was created from.
    pub template_page_id: Option<i64>,
    pub slug: String,
    pub name: String,
    #[sqlx(rename = "sort_order")]
    pub order: i64,
    pub is_custom: bool,
    pub is_active: bool,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub seo: SeoMeta,
}

/// Maps to the `site_blocks` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SiteBlockRow {
    pub id: i64,
    pub site_id: i64,
    pub page_id: i64,
    /// `None` for root-level blocks.
    pub parent_id: Option<i64>,
    /// The block's `id` from the content document.
    pub uuid: Option<String>,
    pub block_type: String,
    pub data: Value,
    pub position: i64,
}

/// A page to be written, together with its flattened block tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub slug: String,
    pub name: String,
    pub order: i64,
    pub is_custom: bool,
    pub is_active: bool,
    pub template_page_id: Option<i64>,
    pub seo: SeoMeta,
    /// Depth-first pre-order, so every parent precedes its children.
    pub blocks: Vec<BlockPlan>,
}

/// A block to be written. `parent` indexes an earlier entry of the owning
/// [`PagePlan::blocks`].
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPlan {
    pub uuid: String,
    pub block_type: String,
    pub data: Map<String, Value>,
    pub position: i64,
    pub parent: Option<usize>,
}

impl PagePlan {
    /// Build the row for this page once the store has assigned an id.
    pub fn to_row(&self, id: i64, site_id: i64) -> SitePageRow {
        SitePageRow {
            id,
            site_id,
            template_page_id: self.template_page_id,
            slug: self.slug.clone(),
            name: self.name.clone(),
            order: self.order,
            is_custom: self.is_custom,
            is_active: self.is_active,
            seo: self.seo.clone(),
        }
    }
}
