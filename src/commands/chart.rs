//! Chart commands.

use super::CommandResult;
use crate::charts;
use crate::models::MovieSort;
use crate::storage::MovieStore;
use std::path::{Path, PathBuf};

/// Which chart to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ChartKind {
    /// Movies-per-year bar chart.
    Years,
    /// Horizontal role-count bars.
    Roles,
    /// Timeline scatter, dot size = cast size.
    Timeline,
    /// Treemap, area = cast size.
    Treemap,
    /// 5-year-interval panels.
    Decades,
}

impl ChartKind {
    /// Default output file name for the chart.
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Years => "movies_per_year.svg",
            Self::Roles => "actor_roles.svg",
            Self::Timeline => "movie_timeline.svg",
            Self::Treemap => "movie_treemap.svg",
            Self::Decades => "decade_boxes.svg",
        }
    }
}

/// `chart` command: render one chart into `charts_dir` (or an explicit
/// output path) and print where it landed.
pub fn cmd_chart(
    store: &MovieStore,
    kind: ChartKind,
    output: Option<PathBuf>,
    charts_dir: &Path,
) -> CommandResult {
    let output = match output {
        Some(path) => path,
        None => {
            std::fs::create_dir_all(charts_dir)?;
            charts_dir.join(kind.default_file_name())
        },
    };

    match kind {
        ChartKind::Years => charts::year_histogram(&store.release_years()?, &output)?,
        ChartKind::Roles => charts::role_chart(&store.role_counts()?, &output)?,
        ChartKind::Timeline => charts::timeline(&store.movie_summaries()?, &output)?,
        ChartKind::Treemap => charts::treemap_chart(&store.movie_summaries()?, &output)?,
        ChartKind::Decades => {
            charts::decade_boxes(&store.list_movies(MovieSort::Year)?, &output)?;
        },
    }

    println!("Chart saved to: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_names_are_svg() {
        for kind in [
            ChartKind::Years,
            ChartKind::Roles,
            ChartKind::Timeline,
            ChartKind::Treemap,
            ChartKind::Decades,
        ] {
            assert!(kind.default_file_name().ends_with(".svg"));
        }
    }
}
