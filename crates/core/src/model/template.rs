use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use site_composer_blocks::access;

use super::INDEX_SLUG;

/// The reusable default content a site is instantiated from.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Template {
    pub id: i64,
    pub name: String,
    /// Site-wide defaults: `site`, `branding`, `navigation`, `footer`, `colors`.
    #[serde(default)]
    pub default_data: Value,
    #[serde(default)]
    #[sqlx(skip)]
    pub pages: Vec<TemplatePage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TemplatePage {
    pub id: i64,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    #[sqlx(rename = "sort_order")]
    pub order: i64,
    /// Page defaults; `layout_components` holds the default block tree.
    #[serde(default)]
    pub data: Value,
}

impl TemplatePage {
    pub fn layout_components(&self) -> &[Value] {
        access::list_or_empty(access::path(Some(&self.data), &["layout_components"]))
    }
}

impl Template {
    pub fn page(&self, slug: &str) -> Option<&TemplatePage> {
        self.pages.iter().find(|p| p.slug == slug)
    }

    pub fn index_page(&self) -> Option<&TemplatePage> {
        self.page(INDEX_SLUG)
    }

    /// Pages sorted by their order index; ties keep declaration order.
    pub fn pages_in_order(&self) -> Vec<&TemplatePage> {
        let mut pages: Vec<&TemplatePage> = self.pages.iter().collect();
        pages.sort_by_key(|p| p.order);
        pages
    }

    /// A named top-level section of the template defaults, if it is an object.
    pub fn section(&self, key: &str) -> Option<&Map<String, Value>> {
        access::as_map(access::path(Some(&self.default_data), &[key]))
    }
}
