use crate::error::{RatingError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user's placement in one completed competition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResult {
    pub competition_id: String,
    /// 1 = first place.
    pub finish_rank: u32,
    /// Number of participants ranked in the competition.
    pub field_size: u32,
    pub ended_at: DateTime<Utc>,
    /// Display only, never used in rating math.
    pub points: f64,
}

impl CompetitionResult {
    /// Builds a result after checking `1 <= finish_rank <= field_size`.
    ///
    /// The fields are public, so trusted callers can still build a record
    /// directly; in that case the scoring preconditions are theirs to uphold.
    pub fn new(
        competition_id: impl Into<String>,
        finish_rank: u32,
        field_size: u32,
        ended_at: DateTime<Utc>,
        points: f64,
    ) -> Result<Self> {
        let competition_id = competition_id.into();

        if field_size == 0 {
            return Err(RatingError::InvalidRecord(format!(
                "{competition_id}: field size must be at least 1"
            )));
        }
        if finish_rank == 0 || finish_rank > field_size {
            return Err(RatingError::InvalidRecord(format!(
                "{competition_id}: finish rank {finish_rank} outside 1..={field_size}"
            )));
        }

        Ok(Self {
            competition_id,
            finish_rank,
            field_size,
            ended_at,
            points,
        })
    }
}
