use crate::errors::AppError;
use crate::models::HabitData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub async fn load_data(path: &Path) -> HabitData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                let backup = backup_path(path);
                match fs::rename(path, &backup).await {
                    Ok(()) => warn!("moved unreadable data file to {}", backup.display()),
                    Err(err) => error!("failed to back up data file: {err}"),
                }
                HabitData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => HabitData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            HabitData::default()
        }
    }
}

/// Sibling file an unparsable data file is moved to, so the next save cannot overwrite it.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

/// Overwrites the whole collection: writes a sibling temp file, then renames it into place.
pub async fn persist_data(path: &Path, data: &HabitData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload).await?;
    fs::rename(&tmp_path, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::Day;
    use crate::models::Habit;

    #[tokio::test]
    async fn missing_file_loads_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let data = load_data(&dir.path().join("absent.json")).await;
        assert!(data.habits.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        fs::write(&path, b"{not json").await.unwrap();
        assert_eq!(load_data(&path).await, HabitData::default());

        persist_data(&path, &HabitData::default()).await.unwrap();
        let kept = fs::read(backup_path(&path)).await.unwrap();
        assert_eq!(kept, b"{not json");
    }

    #[tokio::test]
    async fn impossible_stored_days_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        let raw = r#"{"habits":[
            {"id":1,"name":"Read","completions":["2024-02-28","2024-02-30"]},
            {"id":2,"name":"Run","completions":["2024-03-01"]}
        ]}"#;
        fs::write(&path, raw).await.unwrap();

        let data = load_data(&path).await;
        assert_eq!(data.habits.len(), 2);
        let read: Vec<String> = data.habits[0]
            .completions
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(read, vec!["2024-02-28"]);
        assert_eq!(data.habits[1].completions.len(), 1);
        assert!(!backup_path(&path).exists());
    }

    #[tokio::test]
    async fn persisted_collection_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        let data = HabitData {
            habits: vec![Habit {
                id: 1_718_400_000_000,
                name: "Read".to_string(),
                completions: [
                    Day::parse("2024-06-15").unwrap(),
                    Day::parse("2024-06-01").unwrap(),
                ]
                .into_iter()
                .collect(),
            }],
        };

        persist_data(&path, &data).await.unwrap();
        assert_eq!(load_data(&path).await, data);

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).await.unwrap()).unwrap();
        assert_eq!(
            raw["habits"][0]["completions"],
            serde_json::json!(["2024-06-01", "2024-06-15"])
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn duplicate_days_in_file_collapse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        let raw = r#"{"habits":[
            {"id":1,"name":"Run","completions":["2024-06-02","2024-06-01","2024-06-02"]}
        ]}"#;
        fs::write(&path, raw).await.unwrap();

        let data = load_data(&path).await;
        assert_eq!(data.habits[0].completions.len(), 2);
    }
}
