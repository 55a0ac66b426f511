use serde_json::{Map, Value};
use site_composer_blocks::access;

use crate::model::Template;

/// Layer the color palette, most specific last:
/// template defaults, saved site colors, draft site colors, page-local colors.
pub fn resolve_colors(
    template: &Template,
    saved: Option<&Value>,
    draft: Option<&Value>,
    draft_colors: Option<&Value>,
    page_data: &Map<String, Value>,
) -> Map<String, Value> {
    let mut colors = access::map_or_empty(access::path(Some(&template.default_data), &["colors"]));
    let layers = [
        access::path(saved, &["colors"]),
        access::path(draft, &["colors"]),
        draft_colors,
        page_data.get("colors"),
    ];
    for layer in layers {
        access::shallow_merge(&mut colors, &access::map_or_empty(layer));
    }
    colors
}
