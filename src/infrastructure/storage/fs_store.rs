use crate::domain::storage::{Storage, StorageKeys};
use crate::domain::{BprResult, RankingResult};
use crate::error::{RatingError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct UserProfile {
    #[serde(default)]
    friends: Vec<String>,
}

/// JSON files on disk. Inputs are read from `data_dir`, computed ratings and
/// rankings are written under `output_dir`.
#[derive(Clone)]
pub struct FileSystemStore {
    data_dir: PathBuf,
    output_dir: PathBuf,
}

impl FileSystemStore {
    pub fn new(data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    fn get_path_for_key(&self, key: &str, subdir: Option<&str>, use_data_dir: bool) -> PathBuf {
        let base_dir = if use_data_dir {
            &self.data_dir
        } else {
            &self.output_dir
        };

        if let Some(dir) = subdir {
            base_dir.join(dir).join(format!("{}.json", file_stem(key)))
        } else {
            base_dir.join(format!("{}.json", file_stem(key)))
        }
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    fn write_json_file<T: serde::Serialize + ?Sized>(
        &self,
        key: &str,
        subdir: Option<&str>,
        data: &T,
    ) -> Result<()> {
        match subdir {
            Some(dir) => self.ensure_dir(&self.output_dir.join(dir))?,
            None => self.ensure_dir(&self.output_dir)?,
        }

        let path = self.get_path_for_key(key, subdir, false);
        let content = serde_json::to_string_pretty(data)?;
        fs::write(&path, content)?;
        debug!("Wrote {:?}", path);
        Ok(())
    }

    fn read_json_file<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
        subdir: Option<&str>,
    ) -> Result<Option<T>> {
        let path = self.get_path_for_key(key, subdir, true);
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(Some(serde_json::from_str(&content)?))
        } else {
            Ok(None)
        }
    }
}

/// User ids become file names; keep them inside their directory.
fn file_stem(key: &str) -> String {
    key.replace(['/', '\\'], "_")
}

impl Storage for FileSystemStore {
    fn load_competitions(&self) -> Result<Vec<Value>> {
        Ok(self
            .read_json_file(StorageKeys::COMPETITIONS, None)?
            .unwrap_or_default())
    }

    fn load_friends(&self, user_id: &str) -> Result<Vec<String>> {
        self.read_json_file::<UserProfile>(user_id, Some(StorageKeys::USERS_DIR))?
            .map(|profile| profile.friends)
            .ok_or_else(|| RatingError::UnknownUser(user_id.to_string()))
    }

    fn save_rating(&self, user_id: &str, rating: &BprResult) -> Result<()> {
        self.write_json_file(user_id, Some(StorageKeys::RATINGS_DIR), rating)
    }

    fn save_ranking(&self, user_id: &str, ranking: &RankingResult) -> Result<()> {
        self.write_json_file(user_id, Some(StorageKeys::RANKINGS_DIR), ranking)
    }
}
