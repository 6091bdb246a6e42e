use std::sync::Arc;

use crate::db::SensorRepository;

#[derive(Clone)]
pub struct AppState {
    pub repo: SensorRepository,
    /// Expected value of the X-API-KEY header
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(repo: SensorRepository, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            repo,
            api_key: api_key.into(),
        }
    }
}
