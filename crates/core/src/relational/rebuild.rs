use std::collections::HashMap;

use serde_json::{json, Map, Value};
use site_composer_blocks::{access, Block};

use crate::model::{SiteBlockRow, SitePageRow, INDEX_SLUG};

/// Rows grouped by `(page_id, parent_id)`, each group sorted by position.
type ChildIndex<'a> = HashMap<(i64, Option<i64>), Vec<&'a SiteBlockRow>>;

/// Rebuild the content document from page and block rows.
pub fn build_document(pages: &[SitePageRow], blocks: &[SiteBlockRow]) -> Value {
    let index = child_index(blocks);

    let mut pages: Vec<&SitePageRow> = pages.iter().collect();
    pages.sort_by_key(|p| (p.order, p.id));

    let mut root_tree = Value::Array(Vec::new());
    let mut site_pages = Map::new();
    let mut pages_meta = Map::new();
    let mut custom_pages = Vec::new();

    for page in pages {
        let tree = Block::list_to_value(&build_tree(&index, page.id, None));
        if page.slug == INDEX_SLUG {
            root_tree = tree;
        } else {
            site_pages.insert(page.slug.clone(), json!({ "layout_components": tree }));
        }
        pages_meta.insert(
            page.slug.clone(),
            json!({
                "active": page.is_active || page.slug == INDEX_SLUG,
                "seo": page.seo.to_value(),
            }),
        );
        if page.is_custom {
            custom_pages.push(json!({
                "slug": page.slug,
                "name": page.name,
                "order": page.order,
            }));
        }
    }

    json!({
        "layout_components": root_tree,
        "pages": site_pages,
        "pages_meta": pages_meta,
        "custom_pages": custom_pages,
    })
}

fn child_index(blocks: &[SiteBlockRow]) -> ChildIndex<'_> {
    let mut index: ChildIndex<'_> = HashMap::new();
    for block in blocks {
        index.entry((block.page_id, block.parent_id)).or_default().push(block);
    }
    for children in index.values_mut() {
        children.sort_by_key(|b| (b.position, b.id));
    }
    index
}

/// Materialize the children of `parent` (roots when `None`) on `page_id`.
/// Rows unreachable from a root are left out.
fn build_tree(index: &ChildIndex<'_>, page_id: i64, parent: Option<i64>) -> Vec<Block> {
    let Some(rows) = index.get(&(page_id, parent)) else {
        return Vec::new();
    };
    rows.iter()
        .map(|row| Block {
            id: row
                .uuid
                .clone()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| format!("block_{}", row.id)),
            block_type: row.block_type.clone(),
            data: access::map_or_empty(Some(&row.data)),
            children: build_tree(index, page_id, Some(row.id)),
        })
        .collect()
}
