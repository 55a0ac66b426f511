//! Site-wide information and dashboard module detection.

use serde_json::{Map, Value};
use site_composer_blocks::{access, walk};

use crate::model::{Template, TemplatePage};

/// Block types that switch on a dashboard module when present anywhere in a
/// site's content.
pub const MODULE_TYPES: [&str; 2] = ["newsletter", "contactform"];

const GENERAL_SECTIONS: [&str; 4] = ["site", "branding", "navigation", "footer"];
const GLOBAL_STYLE_KEYS: [&str; 2] = ["global_fonts", "global_button_style"];

/// Every block tree a site can render: the root index tree, each entry under
/// `pages`, and every template default tree.
fn content_trees<'a>(template: &'a Template, document: Option<&'a Value>) -> Vec<&'a [Value]> {
    let mut trees = vec![access::list_or_empty(access::path(document, &["layout_components"]))];
    if let Some(pages) = access::as_map(access::path(document, &["pages"])) {
        trees.extend(
            pages
                .values()
                .map(|page| access::list_or_empty(access::path(Some(page), &["layout_components"]))),
        );
    }
    trees.extend(template.pages.iter().map(TemplatePage::layout_components));
    trees
}

/// Module types present in the site's content, in order of first discovery.
pub fn detect_active_modules(template: &Template, document: Option<&Value>) -> Vec<String> {
    walk::collect_types(content_trees(template, document))
        .into_iter()
        .filter(|t| MODULE_TYPES.contains(&t.as_str()))
        .collect()
}

/// Labels the owner gave to the instances of `module_type`, used to tell
/// several newsletter or contact forms apart.
pub fn collect_module_labels(template: &Template, document: Option<&Value>, module_type: &str) -> Vec<String> {
    walk::collect_labels(content_trees(template, document), module_type)
}

/// Merge the template's general sections into one map and attach the
/// derived `active_modules` list.
pub fn general_information(template: &Template, document: Option<&Value>) -> Map<String, Value> {
    let mut info = Map::new();
    for section in GENERAL_SECTIONS {
        if let Some(values) = template.section(section) {
            access::shallow_merge(&mut info, values);
        }
    }
    for key in GLOBAL_STYLE_KEYS {
        if let Some(value) = access::path(document, &[key]).filter(|v| !v.is_null()) {
            info.insert(key.to_string(), value.clone());
        }
    }
    let modules = detect_active_modules(template, document);
    info.insert(
        "active_modules".into(),
        Value::Array(modules.into_iter().map(Value::String).collect()),
    );
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template(index_tree: Value) -> Template {
        Template {
            id: 1,
            name: "t".into(),
            default_data: json!({
                "site": {"title": "Friseur Elif"},
                "branding": {"logo": "logo.svg", "title": "Salon Elif"},
                "navigation": {"items": []},
                "colors": {"primary": "#000"}
            }),
            pages: vec![TemplatePage {
                id: 1,
                slug: "index".into(),
                name: "Start".into(),
                order: 0,
                data: json!({"layout_components": index_tree}),
            }],
        }
    }

    #[test]
    fn nested_newsletter_is_detected() {
        let template = template(json!([
            {"id": "s", "type": "section", "children": [
                {"id": "c", "type": "columns", "children": [
                    {"id": "n", "type": "newsletter", "data": {}}
                ]}
            ]}
        ]));
        assert_eq!(detect_active_modules(&template, None), vec!["newsletter"]);
    }

    #[test]
    fn absent_module_is_not_reported() {
        let template = template(json!([{"id": "h", "type": "header"}]));
        assert!(detect_active_modules(&template, None).is_empty());
    }

    #[test]
    fn site_pages_contribute_modules_once() {
        let template = template(json!([{"id": "n", "type": "newsletter"}]));
        let doc = json!({
            "layout_components": [{"id": "n2", "type": "newsletter"}],
            "pages": {
                "kontakt": {"layout_components": [{"id": "f", "type": "contactform"}]},
                "broken": "not a page"
            }
        });
        assert_eq!(
            detect_active_modules(&template, Some(&doc)),
            vec!["newsletter", "contactform"]
        );
    }

    #[test]
    fn labels_come_from_all_trees() {
        let template = template(json!([{"type": "contactform", "data": {"moduleLabel": "Termin"}}]));
        let doc = json!({"pages": {"kontakt": {"layout_components": [
            {"type": "contactform", "data": {"moduleLabel": "Allgemein"}},
            {"type": "contactform", "data": {}}
        ]}}});
        assert_eq!(
            collect_module_labels(&template, Some(&doc), "contactform"),
            vec!["Allgemein", "Termin"]
        );
    }

    #[test]
    fn general_information_flattens_sections() {
        let template = template(json!([]));
        let doc = json!({"global_fonts": {"heading": "Lora"}});
        let info = general_information(&template, Some(&doc));
        assert_eq!(info["title"], "Salon Elif");
        assert_eq!(info["logo"], "logo.svg");
        assert_eq!(info["items"], json!([]));
        assert_eq!(info["global_fonts"], json!({"heading": "Lora"}));
        assert!(info.get("global_button_style").is_none());
        assert!(info.get("primary").is_none());
        assert_eq!(info["active_modules"], json!([]));
    }
}
