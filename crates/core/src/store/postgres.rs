use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use super::{ContentStore, SitePages};
use crate::error::{StoreError, StoreResult};
use crate::model::{PagePlan, Site, SiteBlockRow, SitePageRow, Template, TemplatePage};

/// PostgreSQL-backed store. Tables are created by the migrations in
/// `migrations/`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn load_site(&self, site_id: i64) -> StoreResult<Site> {
        sqlx::query_as::<_, Site>(
            "SELECT id, template_id, custom_page_data, uses_relational_pages FROM sites WHERE id = $1",
        )
        .bind(site_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("site {site_id}")))
    }

    async fn load_template(&self, template_id: i64) -> StoreResult<Template> {
        let mut template = sqlx::query_as::<_, Template>(
            "SELECT id, name, default_data FROM templates WHERE id = $1",
        )
        .bind(template_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("template {template_id}")))?;

        template.pages = sqlx::query_as::<_, TemplatePage>(
            "SELECT id, slug, name, sort_order, data FROM template_pages \
             WHERE template_id = $1 ORDER BY sort_order, id",
        )
        .bind(template_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(template)
    }

    async fn replace_site_pages(&self, site_id: i64, pages: &[PagePlan], document: &Value) -> StoreResult<()> {
        // Dropping `tx` without commit rolls everything back.
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE sites SET custom_page_data = $2, uses_relational_pages = TRUE WHERE id = $1",
        )
        .bind(site_id)
        .bind(document)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("site {site_id}")));
        }

        sqlx::query("DELETE FROM site_blocks WHERE site_id = $1")
            .bind(site_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM site_pages WHERE site_id = $1")
            .bind(site_id)
            .execute(&mut *tx)
            .await?;

        for page in pages {
            let page_id = sqlx::query_scalar::<_, i64>(
                "INSERT INTO site_pages (site_id, template_page_id, slug, name, sort_order, is_custom, is_active, \
                 meta_title, meta_description, og_title, og_description, og_image, \
                 twitter_card, twitter_title, twitter_description, twitter_image, robots) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
                 RETURNING id",
            )
            .bind(site_id)
            .bind(page.template_page_id)
            .bind(&page.slug)
            .bind(&page.name)
            .bind(page.order)
            .bind(page.is_custom)
            .bind(page.is_active)
            .bind(&page.seo.meta_title)
            .bind(&page.seo.meta_description)
            .bind(&page.seo.og_title)
            .bind(&page.seo.og_description)
            .bind(&page.seo.og_image)
            .bind(&page.seo.twitter_card)
            .bind(&page.seo.twitter_title)
            .bind(&page.seo.twitter_description)
            .bind(&page.seo.twitter_image)
            .bind(&page.seo.robots)
            .fetch_one(&mut *tx)
            .await?;

            // Parents precede children in the plan, so their ids are known.
            let mut ids: Vec<i64> = Vec::with_capacity(page.blocks.len());
            for block in &page.blocks {
                let id = sqlx::query_scalar::<_, i64>(
                    "INSERT INTO site_blocks (site_id, page_id, parent_id, uuid, block_type, data, position) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
                )
                .bind(site_id)
                .bind(page_id)
                .bind(block.parent.and_then(|i| ids.get(i).copied()))
                .bind(&block.uuid)
                .bind(&block.block_type)
                .bind(Value::Object(block.data.clone()))
                .bind(block.position)
                .fetch_one(&mut *tx)
                .await?;
                ids.push(id);
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn load_site_pages(&self, site_id: i64) -> StoreResult<SitePages> {
        // Both reads must see the same replace.
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let pages = sqlx::query_as::<_, SitePageRow>(
            "SELECT id, site_id, template_page_id, slug, name, sort_order, is_custom, is_active, \
             meta_title, meta_description, og_title, og_description, og_image, \
             twitter_card, twitter_title, twitter_description, twitter_image, robots \
             FROM site_pages WHERE site_id = $1 ORDER BY sort_order, id",
        )
        .bind(site_id)
        .fetch_all(&mut *tx)
        .await?;

        let blocks = sqlx::query_as::<_, SiteBlockRow>(
            "SELECT id, site_id, page_id, parent_id, uuid, block_type, data, position \
             FROM site_blocks WHERE site_id = $1 \
             ORDER BY page_id, parent_id NULLS FIRST, position, id",
        )
        .bind(site_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(SitePages { pages, blocks })
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
