//! Storage layer for the movie dataset.
//!
//! A single `SQLite` backend holds three tables:
//! - `movies` — title and release year
//! - `stars` — actor names
//! - `appearances` — the movie/star join table
//!
//! All queries the CLI runs live in [`sqlite::MovieStore`]; commands
//! never build SQL themselves.

// Allow cast precision loss for count columns read into display types.
#![allow(clippy::cast_precision_loss)]
// Allow significant_drop_tightening - dropping database connections slightly early
// provides no meaningful benefit.
#![allow(clippy::significant_drop_tightening)]

mod sqlite;

pub use sqlite::{MovieStore, UpsertResult};
