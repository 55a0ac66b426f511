//! Page data resolution.
//!
//! Given a template, a site's saved content document and optional draft
//! overrides, produce the block tree, color palette and site-wide
//! information to render for one page. Resolution never fails: malformed
//! input sections are dropped and resolution carries on.

pub mod colors;
pub mod content;
pub mod modules;
pub mod slug;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use site_composer_blocks::access;

use crate::model::Template;

pub use colors::resolve_colors;
pub use content::LEGACY_SECTIONS;
pub use modules::{collect_module_labels, detect_active_modules, general_information, MODULE_TYPES};
pub use slug::{get_allowed_page_slugs, normalize_page_slug};

/// Per-call inputs of a resolution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResolveRequest {
    /// Unsaved content edits; replaces the saved document for the content layer.
    #[serde(default)]
    pub draft_page_data: Option<Value>,
    /// Unsaved palette edits; merged over the saved colors.
    #[serde(default)]
    pub draft_colors: Option<Value>,
    #[serde(default, alias = "slug")]
    pub requested_slug: Option<String>,
    /// Preview mode: take the requested slug verbatim.
    #[serde(default)]
    pub allow_unknown_slug: bool,
}

impl ResolveRequest {
    /// A visitor request for a published page.
    pub fn public(slug: Option<&str>) -> Self {
        Self {
            requested_slug: slug.map(str::to_string),
            ..Self::default()
        }
    }

    /// An owner's live preview with unsaved edits.
    pub fn preview(slug: Option<&str>, draft_page_data: Option<Value>, draft_colors: Option<Value>) -> Self {
        Self {
            draft_page_data,
            draft_colors,
            requested_slug: slug.map(str::to_string),
            allow_unknown_slug: true,
        }
    }

    fn draft(&self) -> Option<&Value> {
        self.draft_page_data.as_ref().filter(|v| !v.is_null())
    }
}

/// Render payload for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPage {
    /// The slug actually rendered, which is `index` after a fallback.
    pub slug: String,
    pub page_data: Map<String, Value>,
    pub colors: Map<String, Value>,
    pub general_information: Map<String, Value>,
}

/// Resolve the page requested by `request`.
pub fn resolve(template: &Template, saved: Option<&Value>, request: &ResolveRequest) -> ResolvedPage {
    let draft = request.draft();
    let content = draft.or(saved);
    report_malformed(content);

    let allowed = get_allowed_page_slugs(template, content);
    let slug = normalize_page_slug(
        request.requested_slug.as_deref(),
        &allowed,
        request.allow_unknown_slug,
    );

    let template_only = draft.is_none() && access::is_empty_document(saved);
    let page_data = content::resolve_page_content(template, content, &slug, template_only);
    let colors = resolve_colors(template, saved, draft, request.draft_colors.as_ref(), &page_data);
    let general_information = general_information(template, content);

    tracing::debug!(
        template_id = template.id,
        slug = %slug,
        template_only,
        "resolved page data"
    );

    ResolvedPage {
        slug,
        page_data,
        colors,
        general_information,
    }
}

/// Log top-level sections of a content document that have the wrong shape.
/// They read as empty during resolution.
fn report_malformed(document: Option<&Value>) {
    let Some(document) = document.filter(|d| !d.is_null()) else {
        return;
    };
    let Some(map) = document.as_object() else {
        tracing::debug!("content document is not an object, ignoring it");
        return;
    };
    let expected: [(&str, fn(&Value) -> bool); 5] = [
        ("layout_components", Value::is_array),
        ("pages", Value::is_object),
        ("pages_meta", Value::is_object),
        ("custom_pages", Value::is_array),
        ("colors", Value::is_object),
    ];
    for (key, is_valid) in expected {
        if let Some(value) = map.get(key).filter(|v| !v.is_null() && !is_valid(*v)) {
            tracing::debug!(section = key, value = %value, "malformed content section dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemplatePage;
    use serde_json::json;

    fn template() -> Template {
        Template {
            id: 3,
            name: "Restaurant".into(),
            default_data: json!({
                "branding": {"name": "Trattoria"},
                "colors": {"primary": "#111"}
            }),
            pages: vec![
                TemplatePage {
                    id: 30,
                    slug: "index".into(),
                    name: "Start".into(),
                    order: 0,
                    data: json!({"layout_components": [{"id": "h1", "type": "header", "data": {}}]}),
                },
                TemplatePage {
                    id: 31,
                    slug: "speisekarte".into(),
                    name: "Speisekarte".into(),
                    order: 1,
                    data: json!({"layout_components": [{"id": "m1", "type": "menu", "data": {}}]}),
                },
            ],
        }
    }

    #[test]
    fn site_without_content_renders_template_index() {
        let resolved = resolve(&template(), None, &ResolveRequest::default());
        assert_eq!(resolved.slug, "index");
        assert_eq!(
            resolved.page_data["layout_components"],
            json!([{"id": "h1", "type": "header", "data": {}}])
        );
        assert_eq!(resolved.page_data["seo"], json!({}));
        assert_eq!(resolved.colors["primary"], "#111");
        assert_eq!(resolved.general_information["name"], "Trattoria");
    }

    #[test]
    fn empty_document_equals_template_only_output() {
        let none = resolve(&template(), None, &ResolveRequest::public(Some("speisekarte")));
        let empty = resolve(&template(), Some(&json!({})), &ResolveRequest::public(Some("speisekarte")));
        let null = resolve(&template(), Some(&Value::Null), &ResolveRequest::public(Some("speisekarte")));
        assert_eq!(none, empty);
        assert_eq!(none, null);
    }

    #[test]
    fn unknown_public_slug_renders_index() {
        let saved = json!({"pages_meta": {}});
        let resolved = resolve(&template(), Some(&saved), &ResolveRequest::public(Some("impressum")));
        assert_eq!(resolved.slug, "index");
        assert_eq!(resolved.page_data["layout_components"][0]["id"], "h1");
    }

    #[test]
    fn preview_draft_replaces_saved_content() {
        let saved = json!({"layout_components": [{"id": "saved", "type": "hero"}]});
        let draft = json!({"layout_components": [{"id": "draft", "type": "hero"}]});
        let request = ResolveRequest::preview(None, Some(draft), Some(json!({"primary": "#fff"})));
        let resolved = resolve(&template(), Some(&saved), &request);
        assert_eq!(resolved.page_data["layout_components"][0]["id"], "draft");
        assert_eq!(resolved.colors["primary"], "#fff");
    }

    #[test]
    fn preview_of_unsaved_custom_page() {
        let draft = json!({"pages": {"neu": {"layout_components": [{"id": "x", "type": "text"}]}}});
        let request = ResolveRequest::preview(Some("neu"), Some(draft), None);
        let resolved = resolve(&template(), None, &request);
        assert_eq!(resolved.slug, "neu");
        assert_eq!(resolved.page_data["layout_components"][0]["id"], "x");
    }

    #[test]
    fn color_precedence_end_to_end() {
        let saved = json!({
            "colors": {"primary": "#222", "secondary": "#333"},
            "pages": {"speisekarte": {"colors": {"primary": "#444"}}}
        });
        let resolved = resolve(&template(), Some(&saved), &ResolveRequest::public(Some("speisekarte")));
        assert_eq!(resolved.colors["primary"], "#444");
        assert_eq!(resolved.colors["secondary"], "#333");
    }

    #[test]
    fn malformed_sections_never_fail() {
        let saved = json!({
            "layout_components": "broken",
            "pages": [1, 2],
            "pages_meta": "x",
            "custom_pages": {"slug": "a"},
            "colors": 5
        });
        let resolved = resolve(&template(), Some(&saved), &ResolveRequest::public(Some("speisekarte")));
        assert_eq!(resolved.slug, "speisekarte");
        assert_eq!(resolved.page_data["layout_components"][0]["id"], "m1");
        assert_eq!(resolved.colors["primary"], "#111");
        assert_eq!(resolved.page_data["seo"], json!({}));
    }

    #[test]
    fn payload_uses_camel_case_keys() {
        let resolved = resolve(&template(), None, &ResolveRequest::default());
        let value = serde_json::to_value(&resolved).unwrap();
        assert!(value.get("pageData").is_some());
        assert!(value.get("generalInformation").is_some());
        assert_eq!(value["generalInformation"]["active_modules"], json!([]));
    }
}
