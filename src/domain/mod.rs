mod competition;
mod rating;
pub mod storage;

pub use competition::CompetitionResult;
pub use rating::{BprResult, RankingEntry, RankingResult, RatedUser};
