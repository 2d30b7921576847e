pub mod seed;
pub mod sqlx_repo;

pub use sqlx_repo::{SqlxCandidatesRepository, SqlxPartiesRepository};
