//! Bayesian Placement Rating: turns a user's competition placements into a
//! comparable skill score and ranks users against their peers.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod services;

pub use domain::{BprResult, CompetitionResult, RankingEntry, RankingResult, RatedUser};
pub use error::{RatingError, Result};
