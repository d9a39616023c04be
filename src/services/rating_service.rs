use crate::domain::storage::Storage;
use crate::domain::{BprResult, RankingResult, RatedUser};
use crate::error::Result;
use crate::services::normalize::transform_competition_data_at;
use crate::services::ranking::build_ranking;
use crate::services::rating::calculate_bpr;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

const COMPLETED_STATUS: &str = "completed";

/// Rates users from the competition records held in a [`Storage`].
///
/// `now` is the clock every rating in this service is evaluated against, so a
/// user and their peers are always decayed consistently.
pub struct RatingService {
    store: Arc<dyn Storage>,
    now: DateTime<Utc>,
}

impl RatingService {
    pub fn new(store: Arc<dyn Storage + 'static>, now: DateTime<Utc>) -> Self {
        info!("Created new Rating Service at {}", now.to_rfc3339());
        Self { store, now }
    }

    /// Rates a single user and stores the result.
    pub fn rate_user(&self, user_id: &str) -> Result<BprResult> {
        let records = completed_records(self.store.load_competitions()?);
        let rating = self.rate_from_records(&records, user_id);

        self.store.save_rating(user_id, &rating)?;
        info!(
            "Rated {}: bpr {:.2} over {} competitions",
            user_id, rating.bpr, rating.competitions_count
        );

        Ok(rating)
    }

    /// Rates every id in parallel. Output order follows `user_ids`.
    pub fn rate_users(&self, user_ids: &[String]) -> Result<Vec<RatedUser>> {
        let records = completed_records(self.store.load_competitions()?);
        Ok(self.rate_all(&records, user_ids))
    }

    /// Ranks a user against everyone on their friends list and stores the
    /// ranking.
    pub fn friends_ranking(&self, user_id: &str) -> Result<RankingResult> {
        let friends = self.store.load_friends(user_id)?;
        let records = completed_records(self.store.load_competitions()?);
        info!(
            "Ranking {} against {} friends over {} completed competitions",
            user_id,
            friends.len(),
            records.len()
        );

        let user = RatedUser::new(user_id, self.rate_from_records(&records, user_id));
        let peers = self.rate_all(&records, &friends);

        let ranking = build_ranking(user, peers);
        self.store.save_ranking(user_id, &ranking)?;
        info!(
            "{} is #{} of {} ({}th percentile)",
            user_id, ranking.friends_rank, ranking.total_friends, ranking.friends_percentile
        );

        Ok(ranking)
    }

    fn rate_all(&self, records: &[Value], user_ids: &[String]) -> Vec<RatedUser> {
        user_ids
            .par_iter()
            .map(|id| RatedUser::new(id.as_str(), self.rate_from_records(records, id)))
            .collect()
    }

    fn rate_from_records(&self, records: &[Value], user_id: &str) -> BprResult {
        let results = transform_competition_data_at(records, user_id, self.now);
        debug!("{} has {} usable competition results", user_id, results.len());
        calculate_bpr(&results, self.now)
    }
}

/// Keeps records that are completed or carry no status at all.
pub fn completed_records(records: Vec<Value>) -> Vec<Value> {
    records
        .into_iter()
        .filter(|record| match record.get("status") {
            None | Some(Value::Null) => true,
            Some(status) => status.as_str() == Some(COMPLETED_STATUS),
        })
        .collect()
}
