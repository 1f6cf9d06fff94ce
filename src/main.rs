use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use polaris_tracker::api::state::AppState;
use polaris_tracker::config::AppConfig;
use polaris_tracker::ingest::import_csv_into;
use polaris_tracker::models::CharacterTable;
use polaris_tracker::report::{build_player_report_with_window, TREND_CHUNK_SIZE};
use polaris_tracker::sets::build_sets;
use polaris_tracker::storage::{JsonlMatchStore, MatchStore, StorageConfig};

#[derive(Parser)]
#[command(name = "polaris-tracker")]
#[command(about = "Tekken 8 ranked match tracker with set analytics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path
    #[arg(long, default_value = "./data")]
    data_dir: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import matches from a CSV export
    Import {
        /// Path to the CSV file
        #[arg(long)]
        file: String,
    },

    /// Generate sets from stored matches
    GenerateSets {
        /// Build but don't write the sets
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the analytics report for a player
    Player {
        /// The player's polaris ID
        polaris_id: String,

        /// Override the analysis window size
        #[arg(long)]
        window: Option<usize>,
    },

    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting polaris-tracker v{}", env!("CARGO_PKG_VERSION"));

    let config_path = PathBuf::from(&cli.config);
    let config = if config_path.exists() {
        AppConfig::from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    let storage = StorageConfig::new(PathBuf::from(&cli.data_dir));
    let store = JsonlMatchStore::new(storage);
    let characters = CharacterTable::tekken8();

    match cli.command {
        Commands::Import { file } => {
            let count = import_csv_into(&store, &PathBuf::from(&file))?;

            println!("\n=== Import Results ===");
            println!("Matches imported: {}", count);
            println!("Total stored:     {}", store.match_count()?);
        }
        Commands::GenerateSets { dry_run } => {
            let matches = store.matches_ordered_by_time()?;
            let sets = build_sets(&matches);
            let complete = sets.iter().filter(|s| s.is_complete()).count();

            if !dry_run {
                store.replace_sets(&sets)?;
            }

            println!("\n=== Set Generation Results ===");
            println!("Matches processed: {}", matches.len());
            println!("Sets generated:    {}", sets.len());
            println!("Complete sets:     {}", complete);
            if dry_run {
                println!("\n(dry run - no data written to disk)");
            }
        }
        Commands::Player { polaris_id, window } => {
            let window = window.unwrap_or(config.set_window);
            let report =
                build_player_report_with_window(&store, &characters, &polaris_id, window)?;

            let name_list = |ids: &[polaris_tracker::models::CharacterId]| -> String {
                if ids.is_empty() {
                    "-".to_string()
                } else {
                    ids.iter()
                        .map(|&id| characters.resolve(id))
                        .collect::<Vec<_>>()
                        .join(", ")
                }
            };

            println!("\n=== Player Report: {} ===", report.polaris_id);
            println!("Sets analyzed:     {}", report.total_sets);
            println!("Win rate:          {:.1}%", report.win_rate * 100.0);
            println!(
                "Most frequent:     {} ({} sets)",
                name_list(&report.most_frequent_opponent.character_ids),
                report.most_frequent_opponent.max
            );
            println!(
                "Most defeats by:   {} ({} losses)",
                name_list(&report.most_defeats_by.character_ids),
                report.most_defeats_by.max
            );
            println!(
                "Hardest matchup:   {} ({} swept losses)",
                name_list(&report.hardest_matchup.character_ids),
                report.hardest_matchup.max
            );

            if !report.win_rate_trend.is_empty() {
                let trend: Vec<String> = report
                    .win_rate_trend
                    .iter()
                    .map(|r| format!("{:.0}%", r * 100.0))
                    .collect();
                println!("Trend (per {} sets): {}", TREND_CHUNK_SIZE, trend.join(" -> "));
            }

            if !report.worst_losses.is_empty() {
                println!("\nWorst losses (2-0, at most one round taken per game):");
                for loss in &report.worst_losses {
                    let date = chrono::DateTime::from_timestamp(loss.set_start, 0)
                        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| loss.set_start.to_string());
                    println!(
                        "  {} vs {} ({}) as {} - rounds {}/{}",
                        date,
                        loss.opponent_name,
                        characters.resolve(loss.opponent_chara_id),
                        characters.resolve(loss.player_chara_id),
                        loss.match1_rounds,
                        loss.match2_rounds
                    );
                }
            }

            println!("\n{}", report.recommendation);
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState {
                store: Arc::new(store),
                characters: Arc::new(characters),
                set_window: config.set_window,
            };
            let app = polaris_tracker::api::build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("API listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
