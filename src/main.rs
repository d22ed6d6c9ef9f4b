//! Binary entry point for marquee.
//!
//! This binary provides the CLI interface for exploring the movie
//! database: listings, stats, collaboration graphs, charts, and the
//! interactive insert flows.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print in the main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use marquee::commands::{self, ChartKind, MoviesFormat};
use marquee::config::MarqueeConfig;
use marquee::models::MovieSort;
use marquee::observability;
use marquee::storage::MovieStore;
use std::path::PathBuf;
use std::process::ExitCode;

/// Marquee - explorer CLI for a movies / stars / appearances dataset.
#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the SQLite database (overrides config and MARQUEE_DB).
    #[arg(short, long, global = true, env = "MARQUEE_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Test the connection and list tables.
    Tables,

    /// List movies with actor counts.
    Movies {
        /// Sort order: name, year, or none.
        #[arg(short, long, default_value = "none")]
        sort: String,

        /// Output format: table or json.
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Export the summary as a Markdown table to this path.
        #[arg(long)]
        markdown: Option<PathBuf>,
    },

    /// Search for a star by exact name.
    Star {
        /// The actor's name.
        name: String,
    },

    /// Show the cast of a movie.
    Cast {
        /// The movie title.
        title: String,
    },

    /// Show the movies an actor appeared in.
    Filmography {
        /// The actor's name (fuzzy-matched on miss).
        name: String,
    },

    /// Add a movie, a star, and the appearance linking them.
    Add {
        /// Movie title (prompted if omitted).
        #[arg(long)]
        title: Option<String>,

        /// Release year (prompted if omitted).
        #[arg(long)]
        year: Option<i32>,

        /// Star's name (prompted if omitted).
        #[arg(long)]
        star: Option<String>,
    },

    /// Link actors to an existing movie.
    Link {
        /// The movie title (not needed with --from-csv).
        title: Option<String>,

        /// Actor names (comma-separated).
        #[arg(short, long)]
        actors: Option<String>,

        /// Bulk-link from a CSV file with title,year,actor columns.
        #[arg(long)]
        from_csv: Option<PathBuf>,
    },

    /// Dataset statistics.
    Stats {
        /// Which statistic to show.
        #[command(subcommand)]
        action: StatsAction,
    },

    /// Collaboration summaries and graphs.
    Collab {
        /// Collaboration subcommand.
        #[command(subcommand)]
        action: CollabAction,
    },

    /// Render a chart to an SVG file.
    Chart {
        /// Which chart to render.
        #[arg(value_enum)]
        kind: ChartKind,

        /// Output file path (defaults into the configured charts dir).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive numbered menu.
    Menu,
}

/// Statistics subcommands.
#[derive(Subcommand)]
enum StatsAction {
    /// Actor with the most appearances.
    TopActor,
    /// Movies with no recorded actors.
    OrphanMovies,
    /// Actors not linked to any movie.
    OrphanStars,
    /// All actor pairs that worked together.
    Pairs,
    /// Single-actor movies, with an interactive add loop.
    Solo,
}

/// Collaboration subcommands.
#[derive(Subcommand)]
enum CollabAction {
    /// Per-actor co-star summary.
    Summary,
    /// Two-ring collaboration map around one actor.
    Map {
        /// The actor's name (fuzzy-matched on miss).
        name: String,

        /// Output path for the Graphviz source.
        #[arg(short, long, default_value = "collab_map.dot")]
        output: PathBuf,
    },
    /// The whole collaboration network.
    Network {
        /// Output path for the Graphviz source.
        #[arg(short, long, default_value = "collab_network.dot")]
        output: PathBuf,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();

    observability::init(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, mut config: MarqueeConfig) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    let store = MovieStore::open(&config.db_path)?;

    match cli.command {
        Commands::Tables => commands::cmd_tables(&store),

        Commands::Movies {
            sort,
            format,
            markdown,
        } => commands::cmd_movies(
            &store,
            MovieSort::parse(&sort),
            MoviesFormat::parse(&format),
            markdown.as_deref(),
        ),

        Commands::Star { name } => commands::cmd_star(&store, &name),

        Commands::Cast { title } => commands::cmd_cast(&store, &title),

        Commands::Filmography { name } => commands::cmd_filmography(&store, &name),

        Commands::Add { title, year, star } => commands::cmd_add(&store, title, year, star),

        Commands::Link {
            title,
            actors,
            from_csv,
        } => match (from_csv, title) {
            (Some(path), _) => commands::cmd_link_csv(&store, &path),
            (None, Some(title)) => {
                let actor_list: Vec<String> = actors
                    .map(|a| a.split(',').map(|s| s.trim().to_string()).collect())
                    .unwrap_or_default();
                if actor_list.is_empty() {
                    Err("provide actors with --actors, or use --from-csv".into())
                } else {
                    commands::cmd_link(&store, &title, &actor_list)
                }
            },
            (None, None) => Err("provide a movie title, or use --from-csv".into()),
        },

        Commands::Stats { action } => match action {
            StatsAction::TopActor => commands::cmd_stats_top_actor(&store),
            StatsAction::OrphanMovies => commands::cmd_stats_orphan_movies(&store),
            StatsAction::OrphanStars => commands::cmd_stats_orphan_stars(&store),
            StatsAction::Pairs => commands::cmd_stats_pairs(&store),
            StatsAction::Solo => commands::cmd_stats_solo(&store),
        },

        Commands::Collab { action } => match action {
            CollabAction::Summary => commands::cmd_collab_summary(&store),
            CollabAction::Map { name, output } => {
                commands::cmd_collab_map(&store, &name, &output)
            },
            CollabAction::Network { output } => commands::cmd_collab_network(&store, &output),
        },

        Commands::Chart { kind, output } => {
            commands::cmd_chart(&store, kind, output, &config.charts_dir)
        },

        Commands::Menu => commands::cmd_menu(&store),
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<MarqueeConfig, Box<dyn std::error::Error>> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return MarqueeConfig::load_from_file(std::path::Path::new(config_path))
            .map_err(std::convert::Into::into);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("MARQUEE_CONFIG_PATH") {
        if !config_path.trim().is_empty() {
            return MarqueeConfig::load_from_file(std::path::Path::new(&config_path))
                .map_err(std::convert::Into::into);
        }
    }

    // Otherwise, load from default location
    Ok(MarqueeConfig::load_default())
}
