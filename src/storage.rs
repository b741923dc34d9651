use crate::errors::AppError;
use crate::models::AppData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!(
                    waiting_area = data.waiting_area.len(),
                    customs_area = data.customs_area.len(),
                    "loaded readings from {}",
                    path.display()
                );
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                quarantine(path).await;
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

async fn quarantine(path: &Path) {
    let aside = sibling(path, "corrupt");
    match fs::rename(path, &aside).await {
        Ok(()) => warn!("moved unreadable data file to {}", aside.display()),
        Err(err) => error!("failed to move unreadable data file aside: {err}"),
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    // Readers only ever see the old file or the complete new one.
    let tmp = sibling(path, "tmp");
    fs::write(&tmp, payload).await.map_err(AppError::internal)?;
    fs::rename(&tmp, path).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomsAreaReading;
    use chrono::NaiveDate;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("occupancy_storage_{}_{name}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn missing_file_loads_empty_data() {
        let data = load_data(&temp_path("missing")).await;
        assert!(data.waiting_area.is_empty());
        assert!(data.customs_area.is_empty());
    }

    #[tokio::test]
    async fn persisted_readings_load_back() {
        let path = temp_path("roundtrip");
        let mut data = AppData::default();
        data.customs_area.push(CustomsAreaReading {
            entrance_point: 4,
            before_passport_point: 3,
            after_passport_point: 2,
            exit_point: 1,
            current_people_count: 9,
            timestamp: NaiveDate::from_ymd_opt(2026, 1, 5)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
        });

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.customs_area, data.customs_area);
    }

    #[tokio::test]
    async fn corrupt_file_is_moved_aside() {
        let path = temp_path("corrupt");
        let aside = sibling(&path, "corrupt");
        fs::write(&path, b"{ not json").await.unwrap();

        let data = load_data(&path).await;
        let kept = std::fs::read(&aside).unwrap();
        let _ = std::fs::remove_file(&aside);

        assert!(data.waiting_area.is_empty());
        assert!(!path.exists());
        assert_eq!(kept, b"{ not json");
    }

    #[tokio::test]
    async fn persist_replaces_file_without_leaving_temp() {
        let path = temp_path("replace");
        fs::write(&path, b"{\"waiting_area\": []}").await.unwrap();

        let mut data = AppData::default();
        data.customs_area.push(CustomsAreaReading {
            entrance_point: 1,
            before_passport_point: 0,
            after_passport_point: 0,
            exit_point: 0,
            current_people_count: 1,
            timestamp: NaiveDate::from_ymd_opt(2026, 1, 6)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        });
        persist_data(&path, &data).await.unwrap();

        let tmp_left = sibling(&path, "tmp").exists();
        let loaded = load_data(&path).await;
        let _ = std::fs::remove_file(&path);

        assert!(!tmp_left);
        assert_eq!(loaded.customs_area.len(), 1);
    }

    #[tokio::test]
    async fn failed_persist_leaves_existing_file_intact() {
        let dir = temp_path("readonly_target");
        std::fs::create_dir_all(&dir).unwrap();

        // Renaming a file over a non-empty directory fails.
        std::fs::write(dir.join("keep"), b"x").unwrap();
        let result = persist_data(&dir, &AppData::default()).await;
        let _ = std::fs::remove_file(sibling(&dir, "tmp"));
        let kept = std::fs::read(dir.join("keep")).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert!(result.is_err());
        assert_eq!(kept, b"x");
    }
}
