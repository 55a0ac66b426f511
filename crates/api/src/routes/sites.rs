use axum::{
    extract::{Path, Query, State},
    routing::get,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use site_composer_core::pages::PageSummary;
use site_composer_core::relational::SyncSummary;
use site_composer_core::resolver::{ResolveRequest, ResolvedPage};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Site rendering and content storage routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/sites/{site_id}/render", get(render_page))
        .route("/v1/sites/{site_id}/preview", post(preview_page))
        .route("/v1/sites/{site_id}/pages", get(list_pages))
        .route(
            "/v1/sites/{site_id}/modules/{module_type}/labels",
            get(module_labels),
        )
        .route(
            "/v1/sites/{site_id}/content",
            get(load_content).put(save_content),
        )
}

#[derive(Debug, Deserialize)]
struct RenderParams {
    slug: Option<String>,
}

/// Published rendering: no drafts, unknown slugs fall back to index.
async fn render_page(
    State(state): State<AppState>,
    Path(site_id): Path<i64>,
    Query(params): Query<RenderParams>,
) -> ApiResult<Json<ResolvedPage>> {
    let request = ResolveRequest::public(params.slug.as_deref());
    Ok(Json(state.render().render(site_id, &request).await?))
}

/// Owner preview with unsaved edits. Any slug may be previewed.
async fn preview_page(
    State(state): State<AppState>,
    Path(site_id): Path<i64>,
    Json(mut request): Json<ResolveRequest>,
) -> ApiResult<Json<ResolvedPage>> {
    request.allow_unknown_slug = true;
    Ok(Json(state.render().render(site_id, &request).await?))
}

async fn list_pages(
    State(state): State<AppState>,
    Path(site_id): Path<i64>,
) -> ApiResult<Json<Vec<PageSummary>>> {
    Ok(Json(state.render().page_index(site_id).await?))
}

async fn module_labels(
    State(state): State<AppState>,
    Path((site_id, module_type)): Path<(i64, String)>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.render().module_labels(site_id, &module_type).await?))
}

/// Publish a content document into relational storage.
async fn save_content(
    State(state): State<AppState>,
    Path(site_id): Path<i64>,
    Json(document): Json<Value>,
) -> ApiResult<Json<SyncSummary>> {
    if !document.is_object() {
        return Err(ApiError::BadRequest(
            "content document must be a JSON object".to_string(),
        ));
    }
    let site = state.store().load_site(site_id).await?;
    Ok(Json(state.sync().sync_to_relational(&site, &document).await?))
}

async fn load_content(
    State(state): State<AppState>,
    Path(site_id): Path<i64>,
) -> ApiResult<Json<Value>> {
    // Unknown sites are a 404, not an empty document.
    state.store().load_site(site_id).await?;
    Ok(Json(state.sync().build_from_relational(site_id).await?))
}
