use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use match_insight::analysis::{
    ChampionRoleTable, InferenceConfig, PerformanceReport, PerformanceScorer, RoleAssignment,
    RoleInferenceEngine, TierClassifier, TierPolicy,
};
use match_insight::config::Config;
use match_insight::data::{load_aggregates, load_match, load_role_table, LoadedMatch};
use match_insight::display::output::{
    display_error, display_info, display_match_analysis, display_roles, display_scores,
    display_success, display_tier_list,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "Match Insight")]
#[command(about = "Infer roles, score players and build champion tier lists from match data", long_about = None)]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Infer the lane role of every participant
    Roles(RoleArgs),

    /// Score every participant and pick an MVP per side
    Score {
        /// Match file (match-v5 document or participant list)
        match_file: PathBuf,
    },

    /// Roles and scores together
    Analyze(RoleArgs),

    /// Classify champion aggregates into tiers
    Tiers {
        /// JSON array of champion aggregates
        aggregate_file: PathBuf,

        /// Minimum games before a champion can leave tier C (default: 100)
        #[arg(long)]
        min_games: Option<u32>,

        /// Only show the first N entries
        #[arg(short, long)]
        top: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct RoleArgs {
    /// Match file (match-v5 document or participant list)
    match_file: PathBuf,

    /// Champion role table (JSON object: champion id -> roles)
    #[arg(short, long)]
    role_table: Option<PathBuf>,

    /// Summoner spell id that marks the jungler (default: 11)
    #[arg(long)]
    jungle_spell: Option<i32>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    info!("loaded configuration: {:?}", config);

    match cli.command {
        Command::Roles(args) => run_roles(&config, args, cli.json),
        Command::Score { match_file } => run_score(&match_file, cli.json),
        Command::Analyze(args) => run_analyze(&config, args, cli.json),
        Command::Tiers {
            aggregate_file,
            min_games,
            top,
        } => run_tiers(&config, &aggregate_file, min_games, top, cli.json),
    }
}

fn read_match(path: &Path, json: bool) -> Result<LoadedMatch> {
    let loaded = load_match(path).with_context(|| format!("loading match {}", path.display()))?;

    if !json {
        display_success(&format!(
            "Loaded {} participants from {}",
            loaded.participants.len(),
            loaded.summary(&path.display().to_string())
        ));
    }
    if loaded.participants.len() != 10 {
        warn!(
            "expected 10 participants, found {}; results may be partial",
            loaded.participants.len()
        );
    }
    Ok(loaded)
}

fn resolve_role_table(config: &Config, args: &RoleArgs, json: bool) -> Result<ChampionRoleTable> {
    match args.role_table.as_ref().or(config.role_table.as_ref()) {
        Some(path) => {
            let table = load_role_table(path)
                .with_context(|| format!("loading role table {}", path.display()))?;
            if !json {
                display_info(&format!("Role table covers {} champions", table.len()));
            }
            Ok(table)
        }
        None => {
            warn!("no role table given; every role will be filled by fallback");
            Ok(ChampionRoleTable::new())
        }
    }
}

fn role_engine(config: &Config, args: &RoleArgs) -> RoleInferenceEngine {
    RoleInferenceEngine::new(InferenceConfig {
        jungle_spell_id: args.jungle_spell.unwrap_or(config.jungle_spell_id),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{}", out);
    Ok(())
}

fn run_roles(config: &Config, args: RoleArgs, json: bool) -> Result<()> {
    let loaded = read_match(&args.match_file, json)?;
    let table = resolve_role_table(config, &args, json)?;
    let assignment = role_engine(config, &args).infer(&loaded.participants, &table);

    if json {
        return print_json(&assignment);
    }
    display_roles(&assignment);
    Ok(())
}

fn run_score(match_file: &Path, json: bool) -> Result<()> {
    let loaded = read_match(match_file, json)?;
    let report = PerformanceScorer::default().score(&loaded.participants);

    if json {
        return print_json(&report);
    }
    display_scores(&loaded.participants, &report);
    Ok(())
}

#[derive(Serialize)]
struct AnalysisOutput<'a> {
    #[serde(rename = "matchId", skip_serializing_if = "Option::is_none")]
    match_id: Option<&'a str>,
    roles: &'a RoleAssignment<'a>,
    performance: &'a PerformanceReport,
}

fn run_analyze(config: &Config, args: RoleArgs, json: bool) -> Result<()> {
    let loaded = read_match(&args.match_file, json)?;
    let table = resolve_role_table(config, &args, json)?;
    let assignment = role_engine(config, &args).infer(&loaded.participants, &table);
    let report = PerformanceScorer::default().score(&loaded.participants);

    if json {
        return print_json(&AnalysisOutput {
            match_id: loaded.match_id.as_deref(),
            roles: &assignment,
            performance: &report,
        });
    }
    display_match_analysis(&assignment, &report);
    display_scores(&loaded.participants, &report);
    Ok(())
}

fn run_tiers(
    config: &Config,
    aggregate_file: &Path,
    min_games: Option<u32>,
    top: Option<usize>,
    json: bool,
) -> Result<()> {
    let aggregates = load_aggregates(aggregate_file)
        .with_context(|| format!("loading aggregates {}", aggregate_file.display()))?;

    let policy = TierPolicy {
        min_games: min_games.unwrap_or(config.min_games),
        ..TierPolicy::default()
    };
    let classifier = TierClassifier::new(policy);
    let mut entries = classifier.tier_list(&aggregates);
    if let Some(n) = top {
        entries.truncate(n);
    }

    if json {
        return print_json(&entries);
    }
    display_success(&format!("Classified {} champions", aggregates.len()));
    display_tier_list(&entries, policy.min_games);
    Ok(())
}
