//! Console and file output formatting.

mod markdown;
mod table;

pub use markdown::movie_summaries_markdown;
pub use table::{add_header, create_table, movie_summary_table};
