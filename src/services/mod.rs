pub mod normalize;
pub mod ranking;
pub mod rating;
pub mod rating_service;
pub mod scoring;

pub use normalize::{transform_competition_data, transform_competition_data_at};
pub use ranking::{build_ranking, percentile, rank_users};
pub use rating::calculate_bpr;
pub use rating_service::RatingService;
pub use scoring::{placement_score, size_weight};
