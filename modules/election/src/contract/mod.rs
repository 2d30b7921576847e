pub mod model;

pub use model::{Candidate, NewCandidate, Party};
