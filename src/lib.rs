pub mod app;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod models;
pub mod readings;
pub mod seed;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
