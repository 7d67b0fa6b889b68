use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sehha_shared::MapConfig;

use crate::config;

#[derive(Clone)]
pub struct AppState {
    pub map_config: Arc<MapConfig>,
    pub static_dir: Arc<PathBuf>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(map_config: MapConfig, static_dir: PathBuf) -> Self {
        Self {
            map_config: Arc::new(map_config),
            static_dir: Arc::new(static_dir),
            started_at: Utc::now(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(config::map_config(), config::static_dir())
    }

    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }
}
