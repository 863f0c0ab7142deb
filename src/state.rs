use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::Config;
use crate::oracle::GradingOracle;
use crate::store::SharedStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Config,
    pub oracle: Arc<dyn GradingOracle>,
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn GradingOracle> {
    fn from_ref(state: &AppState) -> Self {
        state.oracle.clone()
    }
}
