//! Markdown export of the movie summary table.

use crate::models::MovieSummary;
use std::fmt::Write as _;

/// Renders the movie summaries as a Markdown pipe table.
///
/// Columns match the console table: Title, Year, # Actors. Pipes in
/// titles are escaped so the table stays well-formed.
#[must_use]
pub fn movie_summaries_markdown(summaries: &[MovieSummary]) -> String {
    let mut out = String::from("| Title | Year | # Actors |\n|---|---:|---:|\n");
    for summary in summaries {
        let title = summary.title.replace('|', "\\|");
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            title, summary.release_year, summary.actor_count
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str, year: i32, count: u32) -> MovieSummary {
        MovieSummary {
            title: title.to_string(),
            release_year: year,
            actor_count: count,
        }
    }

    #[test]
    fn test_markdown_table_shape() {
        let md = movie_summaries_markdown(&[summary("Titanic", 1997, 2)]);
        let lines: Vec<&str> = md.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "| Title | Year | # Actors |");
        assert_eq!(lines[2], "| Titanic | 1997 | 2 |");
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let md = movie_summaries_markdown(&[summary("A|B", 2000, 0)]);
        assert!(md.contains("A\\|B"));
    }

    #[test]
    fn test_markdown_empty_is_header_only() {
        let md = movie_summaries_markdown(&[]);
        assert_eq!(md.lines().count(), 2);
    }
}
