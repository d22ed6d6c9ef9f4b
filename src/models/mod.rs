//! Domain types for the movie dataset.

mod appearance;
mod movie;
mod star;

pub use appearance::{Appearance, BulkLinkEntry, BulkLinkOutcome, CollabPair, Collaborator, LinkOutcome};
pub use movie::{Movie, MovieId, MovieSort, MovieSummary};
pub use star::{Star, StarId};
