use super::{BprResult, RankingResult};
use crate::error::Result;
use serde_json::Value;

pub trait Storage: Send + Sync {
    /// Every raw competition record known to the store, in whatever shape
    /// upstream wrote it.
    fn load_competitions(&self) -> Result<Vec<Value>>;
    fn load_friends(&self, user_id: &str) -> Result<Vec<String>>;
    fn save_rating(&self, user_id: &str, rating: &BprResult) -> Result<()>;
    fn save_ranking(&self, user_id: &str, ranking: &RankingResult) -> Result<()>;
}

pub struct StorageKeys;

impl StorageKeys {
    // Base directories
    pub const USERS_DIR: &'static str = "users";
    pub const RATINGS_DIR: &'static str = "ratings";
    pub const RANKINGS_DIR: &'static str = "rankings";

    pub const COMPETITIONS: &'static str = "competitions";
}
