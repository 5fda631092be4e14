use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gameweek_scoring::{
    logging::initialize_logging, rank_rosters, GameWeekEngine, RollingStatsSummary, Roster,
    ScoringConfig, ScoringTable, StatsByPlayer,
};
use player_registry::{PlayerId, PlayerRegistry};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Score fantasy rosters for one GameWeek
#[derive(Parser)]
#[command(name = "gameweek-scoring")]
#[command(about = "Deterministic GameWeek scoring for fantasy rosters")]
struct Cli {
    /// TOML config file; SCORING_* environment variables are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON scoring table replacing the standard weights
    #[arg(short, long)]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every roster in a GameWeek file and print the leaderboard
    Score {
        /// Player pool JSON
        #[arg(long)]
        players: PathBuf,

        /// GameWeek JSON with evaluation_date, rosters and stats
        #[arg(long)]
        gameweek: PathBuf,

        /// Print the full result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Recompute PGS and category from rolling summaries
    Quality {
        /// Player pool JSON
        #[arg(long)]
        players: PathBuf,

        /// JSON object of player id to rolling summary
        #[arg(long)]
        summaries: PathBuf,
    },
}

/// Everything needed to score one GameWeek
#[derive(Debug, Deserialize)]
struct GameWeekInput {
    evaluation_date: NaiveDate,
    rosters: Vec<Roster>,
    stats: StatsByPlayer,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScoringConfig::from_file(path)?,
        None => ScoringConfig::from_env()?,
    };
    initialize_logging(&config.logging)?;
    info!("Starting GameWeek scoring v{}", gameweek_scoring::VERSION);

    let engine = match &cli.table {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read scoring table {:?}", path))?;
            GameWeekEngine::with_table(config, ScoringTable::from_json(&json)?)?
        }
        None => GameWeekEngine::new(config)?,
    };

    let outcome = match cli.command {
        Commands::Score { players, gameweek, json } => score(&engine, &players, &gameweek, json).await,
        Commands::Quality { players, summaries } => quality(&engine, &players, &summaries).await,
    };

    if let Err(e) = &outcome {
        error!("GameWeek scoring failed: {:#}", e);
    }
    outcome
}

async fn score(engine: &GameWeekEngine, players: &Path, gameweek: &Path, json: bool) -> Result<()> {
    let registry = PlayerRegistry::load_from_file(players).await?;
    let input: GameWeekInput = read_json(gameweek)?;
    info!("Scoring {} rosters as of {}", input.rosters.len(), input.evaluation_date);

    let (scores, leaderboard) =
        rank_rosters(engine, &input.rosters, &input.stats, &registry, input.evaluation_date)?;

    if json {
        let output = serde_json::json!({ "scores": scores, "leaderboard": leaderboard });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for score in &scores {
        println!("Roster {} (GameWeek {})", score.roster_id, score.game_week);
        for (player_id, player) in &score.per_player {
            let name = registry.get(*player_id).map(|p| p.name.as_str()).unwrap_or("?");
            println!(
                "  {:>6} {:<24} {:>8.2} pts  fatigue {:.2} -> {:.2}",
                player_id, name, player.points, player.fatigue_before, player.fatigue_after
            );
            for entry in player.breakdown.iter() {
                println!("           {:<22} {:>+8.3}", entry.label, entry.points);
            }
        }
        println!(
            "  raw {:.2} -> {:.2} [{}]",
            score.team.raw_total,
            score.team.total_points,
            score.team.bonus_label.as_deref().unwrap_or("no bonus")
        );
    }

    println!("\nLeaderboard");
    for entry in &leaderboard {
        println!(
            "  {:>3}. roster {:<8} {:>10.2}  {}",
            entry.rank,
            entry.roster_id,
            entry.total_points,
            entry.bonus_label.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

async fn quality(engine: &GameWeekEngine, players: &Path, summaries: &Path) -> Result<()> {
    let mut registry = PlayerRegistry::load_from_file(players).await?;
    let summaries: HashMap<PlayerId, RollingStatsSummary> = read_json(summaries)?;

    let refreshed = engine.refresh_quality(&mut registry, &summaries)?;

    for player in registry.get_players_by_pgs(&refreshed)? {
        println!(
            "  {:>6} {:<24} {:<4} PGS {:>6.3}  {}",
            player.player_id, player.name, player.position.code(), player.pgs, player.category
        );
    }
    println!("Refreshed {} of {} players", refreshed.len(), registry.len());
    Ok(())
}
