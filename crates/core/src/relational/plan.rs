use serde_json::Value;
use site_composer_blocks::{access, Block};
use uuid::Uuid;

use crate::model::{BlockPlan, PagePlan, SeoMeta, Template, INDEX_SLUG};
use crate::pages::page_index;

/// Turn a content document into the pages and blocks to write, in write
/// order: index, template pages by template order, then custom pages.
pub fn plan_pages(template: &Template, document: Option<&Value>) -> Vec<PagePlan> {
    page_index(template, document)
        .into_iter()
        .map(|page| {
            let tree = page_tree(document, &page.slug);
            PagePlan {
                seo: SeoMeta::from_value(access::path(document, &["pages_meta", page.slug.as_str(), "seo"])),
                blocks: flatten_tree(&Block::list_from_values(tree)),
                slug: page.slug,
                name: page.name,
                order: page.order,
                is_custom: page.is_custom,
                is_active: page.is_active,
                template_page_id: page.template_page_id,
            }
        })
        .collect()
}

fn page_tree<'a>(document: Option<&'a Value>, slug: &str) -> &'a [Value] {
    let nested = || access::list_or_empty(access::path(document, &["pages", slug, "layout_components"]));
    if slug == INDEX_SLUG {
        access::non_empty_list(access::path(document, &["layout_components"])).unwrap_or_else(nested)
    } else {
        nested()
    }
}

/// Flatten a block forest depth-first. Positions restart at 0 under every
/// parent; blocks without an id get a fresh UUID.
pub fn flatten_tree(blocks: &[Block]) -> Vec<BlockPlan> {
    let mut out = Vec::new();
    flatten_into(blocks, None, &mut out);
    out
}

fn flatten_into(blocks: &[Block], parent: Option<usize>, out: &mut Vec<BlockPlan>) {
    for (position, block) in blocks.iter().enumerate() {
        let index = out.len();
        let uuid = if block.id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            block.id.clone()
        };
        out.push(BlockPlan {
            uuid,
            block_type: block.block_type.clone(),
            data: block.data.clone(),
            position: position as i64,
            parent,
        });
        flatten_into(&block.children, Some(index), out);
    }
}
