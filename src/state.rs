use crate::config::AreaSettings;
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub settings: AreaSettings,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, settings: AreaSettings) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            settings,
        }
    }
}
