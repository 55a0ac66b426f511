//! The set of pages a site exposes: index, the template's pages, and the
//! owner's ad hoc custom pages.

use serde::Serialize;
use serde_json::Value;
use site_composer_blocks::access;

use crate::model::{Template, INDEX_SLUG};

/// Display name used for the home page when the template does not name it.
pub const DEFAULT_INDEX_NAME: &str = "Startseite";

/// One entry of a site's page list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub slug: String,
    pub name: String,
    pub order: i64,
    pub is_custom: bool,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_page_id: Option<i64>,
}

/// `custom_pages` entries of a content document.
pub fn custom_page_entries(document: Option<&Value>) -> &[Value] {
    access::list_or_empty(access::path(document, &["custom_pages"]))
}

/// Non-empty slugs listed in `custom_pages`.
pub fn custom_page_slugs(document: Option<&Value>) -> impl Iterator<Item = &str> {
    custom_page_entries(document)
        .iter()
        .filter_map(|entry| access::non_empty_str(entry.get("slug")))
}

/// Whether the page `slug` is reachable.
///
/// Index is always active and listed custom pages are always active.
/// Template pages are opt-in: they need `pages_meta[slug].active == true`,
/// even when a `custom_pages` entry repeats their slug.
pub fn is_page_active(template: &Template, document: Option<&Value>, slug: &str) -> bool {
    if slug == INDEX_SLUG {
        return true;
    }
    if template.page(slug).is_none() && custom_page_slugs(document).any(|s| s == slug) {
        return true;
    }
    meta_active(document, slug)
}

fn meta_active(document: Option<&Value>, slug: &str) -> bool {
    access::bool_or(access::path(document, &["pages_meta", slug, "active"]), false)
}

/// List every page of the site: index first, then template pages in
/// template order, then custom pages by their `order`. Slugs are unique;
/// a custom page shadowing an earlier slug is dropped.
pub fn page_index(template: &Template, document: Option<&Value>) -> Vec<PageSummary> {
    let index = template.index_page();
    let mut pages = vec![PageSummary {
        slug: INDEX_SLUG.to_string(),
        name: index
            .map(|p| p.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
        order: 0,
        is_custom: false,
        is_active: true,
        template_page_id: index.map(|p| p.id),
    }];

    for page in template.pages_in_order() {
        if page.slug.is_empty() || pages.iter().any(|p| p.slug == page.slug) {
            continue;
        }
        pages.push(PageSummary {
            slug: page.slug.clone(),
            name: page.name.clone(),
            order: page.order,
            is_custom: false,
            is_active: meta_active(document, &page.slug),
            template_page_id: Some(page.id),
        });
    }

    let mut next_order = pages.iter().map(|p| p.order).max().unwrap_or(0).saturating_add(1);
    let mut custom = Vec::new();
    for entry in custom_page_entries(document) {
        let Some(slug) = access::non_empty_str(entry.get("slug")) else {
            continue;
        };
        if pages.iter().chain(custom.iter()).any(|p: &PageSummary| p.slug == slug) {
            continue;
        }
        let order = access::i64_or(entry.get("order"), next_order);
        next_order = next_order.max(order.saturating_add(1));
        custom.push(PageSummary {
            slug: slug.to_string(),
            name: access::non_empty_str(entry.get("name")).unwrap_or(slug).to_string(),
            order,
            is_custom: true,
            is_active: true,
            template_page_id: None,
        });
    }
    custom.sort_by_key(|p| p.order);
    pages.extend(custom);
    pages
}
