//! Content-layer resolution: template defaults merged with saved or draft
//! content for one page.

use serde_json::{Map, Value};
use site_composer_blocks::{access, Block};

use crate::model::{Template, INDEX_SLUG};

/// Flat page-data fields used before content was modelled as a block tree,
/// in render order.
pub const LEGACY_SECTIONS: [&str; 6] = ["header", "hero", "about", "hours", "cta", "footer"];

const LAYOUT: &str = "layout_components";
const COLORS: &str = "colors";

/// Resolve the page data for `slug`.
///
/// With `template_only` the customization layer is skipped entirely and the
/// template defaults are returned as they are.
pub(crate) fn resolve_page_content(
    template: &Template,
    content: Option<&Value>,
    slug: &str,
    template_only: bool,
) -> Map<String, Value> {
    let mut page = if slug == INDEX_SLUG {
        resolve_index(template, content, template_only)
    } else {
        resolve_subpage(template, content, slug, template_only)
    };
    apply_legacy_fallback(&mut page);
    page.insert(
        "seo".into(),
        Value::Object(access::map_or_empty(access::path(
            content,
            &["pages_meta", slug, "seo"],
        ))),
    );
    page
}

fn resolve_index(template: &Template, content: Option<&Value>, template_only: bool) -> Map<String, Value> {
    let mut page = access::map_or_empty(Some(&template.default_data));
    // Top-level colors are the site palette, resolved separately.
    page.remove(COLORS);
    if let Some(index) = template.index_page() {
        access::shallow_merge(&mut page, &access::map_or_empty(Some(&index.data)));
    }
    if template_only {
        return page;
    }

    let template_tree = access::non_empty_list(page.get(LAYOUT)).map(<[Value]>::to_vec);
    let page_colors = page.remove(COLORS);

    let mut site = access::map_or_empty(content);
    site.remove(COLORS);
    access::shallow_merge(&mut page, &site);

    let tree = access::non_empty_list(access::path(content, &[LAYOUT]))
        .or_else(|| access::non_empty_list(access::path(content, &["pages", INDEX_SLUG, LAYOUT])))
        .map(<[Value]>::to_vec)
        .or(template_tree);
    if let Some(tree) = tree {
        page.insert(LAYOUT.into(), Value::Array(tree));
    }

    let mut colors = access::map_or_empty(page_colors.as_ref());
    access::shallow_merge(
        &mut colors,
        &access::map_or_empty(access::path(content, &["pages", INDEX_SLUG, COLORS])),
    );
    if !colors.is_empty() {
        page.insert(COLORS.into(), Value::Object(colors));
    }
    page
}

fn resolve_subpage(
    template: &Template,
    content: Option<&Value>,
    slug: &str,
    template_only: bool,
) -> Map<String, Value> {
    let mut page = template
        .page(slug)
        .map(|p| access::map_or_empty(Some(&p.data)))
        .unwrap_or_default();
    if template_only {
        return page;
    }

    let template_tree = access::non_empty_list(page.get(LAYOUT)).map(<[Value]>::to_vec);
    let mut colors = access::map_or_empty(page.get(COLORS));
    let site_page = access::map_or_empty(access::path(content, &["pages", slug]));
    access::shallow_merge(&mut page, &site_page);

    let tree = access::non_empty_list(site_page.get(LAYOUT))
        .map(<[Value]>::to_vec)
        .or(template_tree);
    if let Some(tree) = tree {
        page.insert(LAYOUT.into(), Value::Array(tree));
    }

    access::shallow_merge(&mut colors, &access::map_or_empty(site_page.get(COLORS)));
    page.remove(COLORS);
    if !colors.is_empty() {
        page.insert(COLORS.into(), Value::Object(colors));
    }
    page
}

/// Synthesize the fixed six-block tree from legacy flat fields when the page
/// has no block tree of its own.
pub(crate) fn apply_legacy_fallback(page: &mut Map<String, Value>) {
    if access::non_empty_list(page.get(LAYOUT)).is_some() {
        return;
    }
    let blocks: Vec<Block> = LEGACY_SECTIONS
        .iter()
        .map(|section| Block::leaf(*section, *section, access::map_or_empty(page.get(*section))))
        .collect();
    page.insert(LAYOUT.into(), Block::list_to_value(&blocks));
}
