pub mod health;
pub mod sites;

use axum::Router;

use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(sites::routes())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use site_composer_core::events::EventBus;
    use site_composer_core::model::{Site, Template, TemplatePage};
    use site_composer_core::store::MemoryStore;
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;

    fn config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: String::new(),
            db_max_connections: 1,
            db_min_connections: 1,
            event_bus_capacity: 16,
            max_body_bytes: 1024 * 1024,
            log_level: "debug".into(),
        }
    }

    async fn app() -> Router {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_template(Template {
                id: 1,
                name: "Werkstatt".into(),
                default_data: json!({"colors": {"primary": "#111"}, "branding": {"name": "Werkstatt"}}),
                pages: vec![
                    TemplatePage {
                        id: 1,
                        slug: "index".into(),
                        name: "Start".into(),
                        order: 0,
                        data: json!({"layout_components": [{"id": "h1", "type": "header", "data": {}}]}),
                    },
                    TemplatePage {
                        id: 2,
                        slug: "kontakt".into(),
                        name: "Kontakt".into(),
                        order: 1,
                        data: json!({"layout_components": [{"id": "cf", "type": "contactform", "data": {}}]}),
                    },
                ],
            })
            .await;
        store.insert_site(Site::new(1, 1)).await;
        build_router(AppState::new(store, config(), EventBus::new(16)))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                request = request.header("content-type", "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn ping_responds() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/v1/ping", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn renders_template_index_for_new_site() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/v1/sites/1/render", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slug"], "index");
        assert_eq!(
            body["pageData"]["layout_components"],
            json!([{"id": "h1", "type": "header", "data": {}}])
        );
        assert_eq!(body["pageData"]["seo"], json!({}));
        assert_eq!(body["colors"]["primary"], "#111");
        assert_eq!(body["generalInformation"]["active_modules"], json!(["contactform"]));
    }

    #[tokio::test]
    async fn unknown_slug_renders_index() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/v1/sites/1/render?slug=impressum", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slug"], "index");
    }

    #[tokio::test]
    async fn preview_uses_draft_and_any_slug() {
        let app = app().await;
        let draft = json!({
            "slug": "entwurf",
            "draft_page_data": {"pages": {"entwurf": {"layout_components": [{"id": "d", "type": "text", "data": {}}]}}},
            "draft_colors": {"primary": "#0f0"}
        });
        let (status, body) = send(&app, Method::POST, "/v1/sites/1/preview", Some(draft)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["slug"], "entwurf");
        assert_eq!(body["pageData"]["layout_components"][0]["id"], "d");
        assert_eq!(body["colors"]["primary"], "#0f0");
    }

    #[tokio::test]
    async fn publish_then_read_back() {
        let app = app().await;
        let document = json!({
            "layout_components": [{"id": "hero", "type": "hero", "data": {"h": "Hallo"}, "children": []}],
            "pages_meta": {"kontakt": {"active": true}},
            "custom_pages": [{"slug": "team", "name": "Team", "order": 3}]
        });
        let (status, body) = send(&app, Method::PUT, "/v1/sites/1/content", Some(document)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"pages": 3, "blocks": 1}));

        let (status, body) = send(&app, Method::GET, "/v1/sites/1/content", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layout_components"][0]["id"], "hero");
        assert_eq!(body["custom_pages"], json!([{"slug": "team", "name": "Team", "order": 3}]));

        let (_, pages) = send(&app, Method::GET, "/v1/sites/1/pages", None).await;
        let slugs: Vec<_> = pages
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["slug"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(slugs, vec!["index", "kontakt", "team"]);
        assert_eq!(pages[1]["is_active"], true);
    }

    #[tokio::test]
    async fn rejects_bad_documents() {
        let app = app().await;
        let (status, body) = send(&app, Method::PUT, "/v1/sites/1/content", Some(json!([1, 2]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "badRequest");

        let bad_slug = json!({"custom_pages": [{"slug": "../admin"}]});
        let (status, _) = send(&app, Method::PUT, "/v1/sites/1/content", Some(bad_slug)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_site_is_not_found() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/v1/sites/42/render", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["statusCode"], 404);

        let (status, _) = send(&app, Method::GET, "/v1/sites/42/content", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn module_labels_route() {
        let app = app().await;
        let document = json!({"pages": {"kontakt": {"layout_components": [
            {"id": "a", "type": "contactform", "data": {"moduleLabel": "Rückruf"}}
        ]}}});
        send(&app, Method::PUT, "/v1/sites/1/content", Some(document)).await;
        let (status, body) = send(&app, Method::GET, "/v1/sites/1/modules/contactform/labels", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["Rückruf"]));
    }
}
