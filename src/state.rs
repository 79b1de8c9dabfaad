use crate::config::Config;
use crate::models::HabitData;
use crate::scoring::PolicyKind;
use crate::store::HabitStore;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub window_days: usize,
    pub policy: PolicyKind,
    pub store: Arc<Mutex<HabitStore>>,
}

impl AppState {
    pub fn new(config: &Config, data: HabitData) -> Self {
        Self {
            data_path: config.data_path.clone(),
            window_days: config.window_days,
            policy: config.policy,
            store: Arc::new(Mutex::new(HabitStore::new(data))),
        }
    }
}
