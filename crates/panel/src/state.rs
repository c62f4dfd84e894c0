//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::PanelConfig;
use crate::services::AlertLog;
use crate::storage::FileSlots;

/// Application state shared across all handlers.
///
/// Per-browser state (identity, selected section) lives in the cookie
/// session; what is here is shared by every request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PanelConfig,
    api: ApiClient,
    alerts: AlertLog<FileSlots>,
}

impl AppState {
    #[must_use]
    pub fn new(config: PanelConfig, api: ApiClient, alerts: AlertLog<FileSlots>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                alerts,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.inner.config
    }

    /// FarmaLink REST API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// The panel-wide alert log.
    #[must_use]
    pub fn alerts(&self) -> &AlertLog<FileSlots> {
        &self.inner.alerts
    }
}
