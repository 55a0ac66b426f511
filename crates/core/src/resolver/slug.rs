use serde_json::Value;

use crate::model::{Template, INDEX_SLUG};
use crate::pages::custom_page_slugs;

/// Slugs a public visitor may request: index, every template page, and
/// every listed custom page, de-duplicated in that order.
pub fn get_allowed_page_slugs(template: &Template, document: Option<&Value>) -> Vec<String> {
    let mut slugs = vec![INDEX_SLUG.to_string()];
    let candidates = template
        .pages_in_order()
        .into_iter()
        .map(|p| p.slug.as_str())
        .chain(custom_page_slugs(document));
    for slug in candidates {
        if !slug.is_empty() && !slugs.iter().any(|s| s == slug) {
            slugs.push(slug.to_string());
        }
    }
    slugs
}

/// Map a requested slug onto the page that will actually be rendered.
///
/// Empty requests mean index. With `allow_unknown` (preview) any other slug
/// is taken verbatim; otherwise a slug outside `allowed` falls back to index
/// without signalling an error.
pub fn normalize_page_slug(requested: Option<&str>, allowed: &[String], allow_unknown: bool) -> String {
    let requested = requested.unwrap_or_default();
    if requested.is_empty() {
        return INDEX_SLUG.to_string();
    }
    if allow_unknown || allowed.iter().any(|s| s == requested) {
        return requested.to_string();
    }
    tracing::debug!(slug = requested, "unknown page slug, falling back to index");
    INDEX_SLUG.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemplatePage;
    use serde_json::json;

    fn template() -> Template {
        Template {
            id: 1,
            name: "t".into(),
            default_data: json!({}),
            pages: ["index", "leistungen", "kontakt"]
                .iter()
                .enumerate()
                .map(|(i, slug)| TemplatePage {
                    id: i as i64 + 1,
                    slug: slug.to_string(),
                    name: slug.to_string(),
                    order: i as i64,
                    data: json!({}),
                })
                .collect(),
        }
    }

    #[test]
    fn allowed_slugs_union_template_and_custom() {
        let doc = json!({"custom_pages": [{"slug": "team"}, {"slug": "kontakt"}, {"slug": ""}]});
        assert_eq!(
            get_allowed_page_slugs(&template(), Some(&doc)),
            vec!["index", "leistungen", "kontakt", "team"]
        );
        assert_eq!(
            get_allowed_page_slugs(&template(), None),
            vec!["index", "leistungen", "kontakt"]
        );
    }

    #[test]
    fn unknown_slugs_fall_back_to_index() {
        let allowed = get_allowed_page_slugs(&template(), None);
        for slug in ["blog", "INDEX", "leistungen/", " kontakt"] {
            assert_eq!(normalize_page_slug(Some(slug), &allowed, false), "index");
        }
        assert_eq!(normalize_page_slug(Some("kontakt"), &allowed, false), "kontakt");
    }

    #[test]
    fn preview_keeps_any_non_empty_slug() {
        let allowed = get_allowed_page_slugs(&template(), None);
        assert_eq!(normalize_page_slug(Some("entwurf-neu"), &allowed, true), "entwurf-neu");
        assert_eq!(normalize_page_slug(Some(""), &allowed, true), "index");
        assert_eq!(normalize_page_slug(None, &allowed, true), "index");
        assert_eq!(normalize_page_slug(None, &allowed, false), "index");
    }
}
