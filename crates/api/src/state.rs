use std::sync::Arc;

use site_composer_core::events::EventBus;
use site_composer_core::relational::RelationalSync;
use site_composer_core::store::ContentStore;
use site_composer_core::SiteRenderService;

use crate::config::AppConfig;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: Arc<dyn ContentStore>,
    config: AppConfig,
    event_bus: EventBus,
    render: SiteRenderService,
    sync: RelationalSync,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, config: AppConfig, event_bus: EventBus) -> Self {
        Self {
            inner: Arc::new(InnerState {
                render: SiteRenderService::new(store.clone()),
                sync: RelationalSync::new(store.clone(), event_bus.clone()),
                store,
                config,
                event_bus,
            }),
        }
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.inner.store.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }

    pub fn render(&self) -> &SiteRenderService {
        &self.inner.render
    }

    pub fn sync(&self) -> &RelationalSync {
        &self.inner.sync
    }
}
