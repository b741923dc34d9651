use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WAITING_AREA_SEATS: u32 = 500;
pub const DEFAULT_CUSTOMS_AREA_CAPACITY: u32 = 200;
pub const DEFAULT_PEOPLE_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_DASHBOARD_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_REFRESH_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSettings {
    pub waiting_area_seats: u32,
    pub customs_area_capacity: u32,
    /// People per taken seat, counting those standing nearby.
    pub people_multiplier: f64,
}

impl Default for AreaSettings {
    fn default() -> Self {
        Self {
            waiting_area_seats: DEFAULT_WAITING_AREA_SEATS,
            customs_area_capacity: DEFAULT_CUSTOMS_AREA_CAPACITY,
            people_multiplier: DEFAULT_PEOPLE_MULTIPLIER,
        }
    }
}

impl AreaSettings {
    pub fn from_env() -> Self {
        Self {
            waiting_area_seats: env_or("WAITING_AREA_SEATS", DEFAULT_WAITING_AREA_SEATS),
            customs_area_capacity: env_or("CUSTOMS_AREA_CAPACITY", DEFAULT_CUSTOMS_AREA_CAPACITY),
            people_multiplier: env_or("PEOPLE_MULTIPLIER", DEFAULT_PEOPLE_MULTIPLIER),
        }
    }
}

pub fn resolve_port() -> u16 {
    env_or("PORT", DEFAULT_PORT)
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchSettings {
    pub base_url: String,
    pub refresh_interval: Duration,
    pub export_dir: PathBuf,
}

impl WatchSettings {
    pub fn from_env() -> Self {
        let base_url = env::var("DASHBOARD_URL")
            .unwrap_or_else(|_| DEFAULT_DASHBOARD_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let secs = env_or("REFRESH_SECS", DEFAULT_REFRESH_SECS).max(1);
        let export_dir = env::var("EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Self {
            base_url,
            refresh_interval: Duration::from_secs(secs),
            export_dir,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("ignoring invalid {key}={value:?}");
                default
            }
        },
        Err(_) => default,
    }
}
