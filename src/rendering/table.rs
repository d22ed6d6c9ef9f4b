//! Console table formatting.

use crate::models::MovieSummary;
use comfy_table::{Cell, Color, ContentArrangement, Table};

/// Create a styled table with consistent formatting.
#[must_use]
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
    table
}

/// Add a header row to a table.
pub fn add_header(table: &mut Table, headers: &[&str]) {
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
}

/// The movie-summary table: title, year, actor count.
#[must_use]
pub fn movie_summary_table(summaries: &[MovieSummary]) -> Table {
    let mut table = create_table();
    add_header(&mut table, &["Title", "Year", "# Actors"]);
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.title),
            Cell::new(summary.release_year),
            Cell::new(summary.actor_count),
        ]);
    }
    table
}
