use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::Config;
use crate::sandbox::CodeExecutor;
use crate::storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub executor: Arc<dyn CodeExecutor>,
    pub config: Config,
}

impl FromRef<AppState> for Storage {
    fn from_ref(state: &AppState) -> Self {
        state.storage.clone()
    }
}

impl FromRef<AppState> for Arc<dyn CodeExecutor> {
    fn from_ref(state: &AppState) -> Self {
        state.executor.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
