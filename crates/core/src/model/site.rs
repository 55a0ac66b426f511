use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tenant website.
///
/// `custom_page_data` is the JSON content document:
/// `layout_components` (index tree), `pages`, `pages_meta`, `custom_pages`,
/// `colors`, and optionally `global_fonts` / `global_button_style`.
/// When `uses_relational_pages` is set, the page/block rows are the
/// source of truth instead.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Site {
    pub id: i64,
    pub template_id: i64,
    #[serde(default)]
    pub custom_page_data: Option<Value>,
    #[serde(default)]
    pub uses_relational_pages: bool,
}

impl Site {
    pub fn new(id: i64, template_id: i64) -> Self {
        Self {
            id,
            template_id,
            custom_page_data: None,
            uses_relational_pages: false,
        }
    }

    pub fn with_content(mut self, document: Value) -> Self {
        self.custom_page_data = Some(document);
        self
    }
}
