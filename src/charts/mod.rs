//! Chart rendering.
//!
//! A CLI has no display, so every chart renders to an SVG file and the
//! command prints the path. All renderers take pre-queried data so they
//! stay testable without a database.

mod treemap;

pub use treemap::{Rect, squarify};

use crate::models::{Movie, MovieSummary};
use crate::{Error, Result};
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// Soft pastel panel colors, cycled across treemap tiles and decade boxes.
const PASTELS: [RGBColor; 6] = [
    RGBColor(0xf0, 0xf8, 0xff),
    RGBColor(0xe6, 0xff, 0xe6),
    RGBColor(0xff, 0xf0, 0xf5),
    RGBColor(0xff, 0xff, 0xe0),
    RGBColor(0xf5, 0xf5, 0xdc),
    RGBColor(0xe0, 0xff, 0xff),
];

fn chart_err(e: impl std::fmt::Display) -> Error {
    Error::operation("render_chart", e)
}

/// Renders the movies-per-year bar chart.
///
/// Every year between the dataset's minimum and maximum gets a bar, with
/// zero-count years shown as empty slots; the total lands in the title.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when no years are given, or an
/// operation error if the file cannot be written.
pub fn year_histogram(years: &[i32], output: &Path) -> Result<()> {
    let (&min_year, &max_year) = match (years.iter().min(), years.iter().max()) {
        (Some(min), Some(max)) => (min, max),
        _ => return Err(Error::InvalidInput("no movies to chart".to_string())),
    };

    let mut counts: BTreeMap<i32, u32> = (min_year..=max_year).map(|y| (y, 0)).collect();
    for year in years {
        if let Some(count) = counts.get_mut(year) {
            *count += 1;
        }
    }
    let max_count = counts.values().copied().max().unwrap_or(1).max(1);

    let root = SVGBackend::new(output, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let title = format!("Movies Per Year (Total: {})", years.len());
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(
            f64::from(min_year) - 0.5..f64::from(max_year) + 0.5,
            0.0..f64::from(max_count) * 1.1,
        )
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Number of Movies")
        .x_label_formatter(&|y| format!("{}", *y as i32))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(counts.iter().map(|(&year, &count)| {
            Rectangle::new(
                [
                    (f64::from(year) - 0.4, 0.0),
                    (f64::from(year) + 0.4, f64::from(count)),
                ],
                RGBColor(0x87, 0xce, 0xeb).filled(),
            )
        }))
        .map_err(chart_err)?;
    chart
        .draw_series(counts.iter().map(|(&year, &count)| {
            Rectangle::new(
                [
                    (f64::from(year) - 0.4, 0.0),
                    (f64::from(year) + 0.4, f64::from(count)),
                ],
                BLACK.stroke_width(1),
            )
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Renders the horizontal role-count bar chart, most roles on top.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when there are no appearances, or an
/// operation error if the file cannot be written.
pub fn role_chart(counts: &[(String, u32)], output: &Path) -> Result<()> {
    if counts.is_empty() {
        return Err(Error::InvalidInput("no appearances to chart".to_string()));
    }

    let max_roles = counts.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);
    let height = 120 + u32::try_from(counts.len()).unwrap_or(u32::MAX) * 24;

    let root = SVGBackend::new(output, (900, height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Actor Role Count", ("sans-serif", 24).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(160)
        .build_cartesian_2d(
            0.0..f64::from(max_roles) * 1.1,
            // Inverted so the highest count draws at the top
            f64::from(u32::try_from(counts.len()).unwrap_or(u32::MAX))..0.0,
        )
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Number of Roles")
        .y_desc("Actor")
        .y_labels(counts.len())
        .y_label_formatter(&|idx| {
            let i = *idx as usize;
            counts.get(i).map(|(name, _)| name.clone()).unwrap_or_default()
        })
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, (_, roles))| {
            let i = i as f64;
            Rectangle::new(
                [(0.0, i + 0.1), (f64::from(*roles), i + 0.9)],
                RGBColor(0x3c, 0xb3, 0x71).filled(),
            )
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Renders the movie timeline: one dot per movie along the year axis,
/// deterministically jittered, sized by actor count, labeled when the
/// cast is four or larger.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when no movies exist, or an operation
/// error if the file cannot be written.
pub fn timeline(summaries: &[MovieSummary], output: &Path) -> Result<()> {
    let (min_year, max_year) = match (
        summaries.iter().map(|s| s.release_year).min(),
        summaries.iter().map(|s| s.release_year).max(),
    ) {
        (Some(min), Some(max)) => (min, max),
        _ => return Err(Error::InvalidInput("no movies to chart".to_string())),
    };

    let root = SVGBackend::new(output, (1200, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Movie Timeline (dot size = cast size)",
            ("sans-serif", 24).into_font(),
        )
        .margin(20)
        .x_label_area_size(40)
        .build_cartesian_2d(
            f64::from(min_year) - 1.0..f64::from(max_year) + 1.0,
            -0.5..0.5,
        )
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Release Year")
        .disable_y_mesh()
        .y_labels(0)
        .x_label_formatter(&|y| format!("{}", *y as i32))
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(summaries.iter().map(|summary| {
            let y = jitter(&summary.title);
            let radius = 4 + i32::try_from(summary.actor_count).unwrap_or(0) * 3;
            Circle::new(
                (f64::from(summary.release_year), y),
                radius,
                RGBColor(0x44, 0x8a, 0xff).mix(0.7).filled(),
            )
        }))
        .map_err(chart_err)?;

    chart
        .draw_series(
            summaries
                .iter()
                .filter(|s| s.actor_count >= 4)
                .map(|summary| {
                    Text::new(
                        summary.title.clone(),
                        (f64::from(summary.release_year), jitter(&summary.title) + 0.06),
                        ("sans-serif", 12).into_font(),
                    )
                }),
        )
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Renders the treemap: tile area proportional to actor count, labels
/// hidden below two actors. Movies without recorded actors are skipped.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when no movie has any actors, or an
/// operation error if the file cannot be written.
pub fn treemap_chart(summaries: &[MovieSummary], output: &Path) -> Result<()> {
    let tiles: Vec<&MovieSummary> = summaries.iter().filter(|s| s.actor_count > 0).collect();
    if tiles.is_empty() {
        return Err(Error::InvalidInput(
            "no movies with actors to chart".to_string(),
        ));
    }

    let (width, height) = (1200.0_f64, 750.0_f64);
    let sizes: Vec<f64> = tiles.iter().map(|s| f64::from(s.actor_count)).collect();
    let rects = squarify(
        &sizes,
        Rect {
            x: 0.0,
            y: 40.0,
            w: width,
            h: height - 40.0,
        },
    );

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let root = SVGBackend::new(output, (width as u32, height as u32)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    root.draw(&Text::new(
        "Movie TreeMap (area = cast size)",
        (10, 10),
        ("sans-serif", 22).into_font(),
    ))
    .map_err(chart_err)?;

    #[allow(clippy::cast_possible_truncation)]
    for (i, (summary, rect)) in tiles.iter().zip(&rects).enumerate() {
        let color = PASTELS[i % PASTELS.len()];
        let corners = [
            (rect.x as i32, rect.y as i32),
            ((rect.x + rect.w) as i32, (rect.y + rect.h) as i32),
        ];
        root.draw(&Rectangle::new(corners, color.filled()))
            .map_err(chart_err)?;
        root.draw(&Rectangle::new(corners, BLACK.stroke_width(1)))
            .map_err(chart_err)?;

        if summary.actor_count >= 2 {
            root.draw(&Text::new(
                summary.label(),
                (rect.x as i32 + 4, rect.y as i32 + 4),
                ("sans-serif", 13).into_font(),
            ))
            .map_err(chart_err)?;
        }
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Renders the decade-boxes grid: one panel per 5-year interval listing
/// the movies released in it, panels tinted with cycling pastels.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when no movies exist, or an operation
/// error if the file cannot be written.
pub fn decade_boxes(movies: &[Movie], output: &Path) -> Result<()> {
    if movies.is_empty() {
        return Err(Error::InvalidInput("no movies to chart".to_string()));
    }

    // Group into 5-year intervals keyed by interval start
    let mut groups: BTreeMap<i32, Vec<&Movie>> = BTreeMap::new();
    for movie in movies {
        let start = movie.release_year.div_euclid(5) * 5;
        groups.entry(start).or_default().push(movie);
    }

    let cols = 3_usize;
    let rows = groups.len().div_ceil(cols);
    let (panel_w, panel_h) = (420_i32, 260_i32);
    #[allow(clippy::cast_possible_truncation)]
    let width = (cols as i32 * panel_w + 40) as u32;
    #[allow(clippy::cast_possible_truncation)]
    let height = (i32::try_from(rows).unwrap_or(i32::MAX) * panel_h + 80) as u32;

    let root = SVGBackend::new(output, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    root.draw(&Text::new(
        "Movies Grouped by 5-Year Intervals",
        (20, 15),
        ("sans-serif", 24).into_font(),
    ))
    .map_err(chart_err)?;

    #[allow(clippy::cast_possible_truncation)]
    for (i, (start, group)) in groups.iter().enumerate() {
        let col = (i % cols) as i32;
        let row = (i / cols) as i32;
        let x0 = 20 + col * panel_w;
        let y0 = 50 + row * panel_h;
        let corners = [(x0, y0), (x0 + panel_w - 20, y0 + panel_h - 20)];

        let color = PASTELS[i % PASTELS.len()];
        root.draw(&Rectangle::new(corners, color.filled()))
            .map_err(chart_err)?;
        root.draw(&Rectangle::new(corners, RGBColor(0x80, 0x80, 0x80).stroke_width(2)))
            .map_err(chart_err)?;

        let label = format!("{}\u{2013}{}", start, start + 4);
        root.draw(&Text::new(label, (x0 + 8, y0 + 6), ("sans-serif", 16).into_font()))
            .map_err(chart_err)?;

        for (j, movie) in group.iter().enumerate() {
            let line_y = y0 + 30 + i32::try_from(j).unwrap_or(i32::MAX) * 18;
            if line_y > y0 + panel_h - 36 {
                root.draw(&Text::new("...", (x0 + 8, line_y), ("monospace", 13).into_font()))
                    .map_err(chart_err)?;
                break;
            }
            root.draw(&Text::new(
                movie.label(),
                (x0 + 8, line_y),
                ("monospace", 13).into_font(),
            ))
            .map_err(chart_err)?;
        }
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Deterministic vertical jitter in [-0.2, 0.2] derived from the title,
/// so repeated runs of the timeline chart look identical.
fn jitter(title: &str) -> f64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in title.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    #[allow(clippy::cast_precision_loss)]
    let unit = (hash % 10_000) as f64 / 10_000.0;
    (unit - 0.5) * 0.4
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::models::MovieId;

    fn summaries() -> Vec<MovieSummary> {
        vec![
            MovieSummary {
                title: "Titanic".to_string(),
                release_year: 1997,
                actor_count: 5,
            },
            MovieSummary {
                title: "Juno".to_string(),
                release_year: 2007,
                actor_count: 2,
            },
            MovieSummary {
                title: "The Bounty Hunter".to_string(),
                release_year: 2010,
                actor_count: 0,
            },
        ]
    }

    fn movies() -> Vec<Movie> {
        vec![
            Movie {
                id: MovieId::new(1),
                title: "Titanic".to_string(),
                release_year: 1997,
            },
            Movie {
                id: MovieId::new(2),
                title: "Juno".to_string(),
                release_year: 2007,
            },
        ]
    }

    #[test]
    fn test_year_histogram_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("years.svg");
        year_histogram(&[1997, 2007, 2007, 2010], &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Movies Per Year (Total: 4)"));
    }

    #[test]
    fn test_year_histogram_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("years.svg");
        assert!(matches!(
            year_histogram(&[], &path),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_role_chart_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roles.svg");
        let counts = vec![
            ("Kate Winslet".to_string(), 3),
            ("Drew Barrymore".to_string(), 1),
        ];
        role_chart(&counts, &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Actor Role Count"));
    }

    #[test]
    fn test_timeline_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.svg");
        timeline(&summaries(), &path).unwrap();
        // Titanic has >= 4 actors so its title is annotated
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Titanic"));
    }

    #[test]
    fn test_treemap_skips_empty_movies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("treemap.svg");
        treemap_chart(&summaries(), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        // Zero-actor movie is dropped from the layout entirely
        assert!(!svg.contains("Bounty Hunter"));
        assert!(svg.contains("Titanic (1997)"));
    }

    #[test]
    fn test_treemap_all_zero_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("treemap.svg");
        let empty = vec![MovieSummary {
            title: "X".to_string(),
            release_year: 2000,
            actor_count: 0,
        }];
        assert!(matches!(
            treemap_chart(&empty, &path),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_decade_boxes_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decades.svg");
        decade_boxes(&movies(), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("1995\u{2013}1999"));
        assert!(svg.contains("2005\u{2013}2009"));
    }

    #[test]
    fn test_jitter_deterministic_and_bounded() {
        let a = jitter("Titanic");
        assert!((jitter("Titanic") - a).abs() < f64::EPSILON);
        for title in ["Titanic", "Juno", "Blended", "Up"] {
            let j = jitter(title);
            assert!((-0.2..=0.2).contains(&j), "jitter {j} out of range");
        }
    }
}
