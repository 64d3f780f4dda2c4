//! # Command Line Interface
//!
//! Rankings, optimized teams and insights over the cached player pool.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use colored::*;
use player_pool::{CacheDirSource, PlayerPool, Role};
use scoring_engine::{
    matchups, matchups_in_region, summarize, team_regions, top_by_cost_efficiency, MetricSummary,
    ScoredPlayerRecord, ScoringBatch, ScoringEngine,
};
use serde::Serialize;
use std::path::PathBuf;
use team_optimizer::{evaluate_custom, top_by_role, Metric, TeamAssembly, TeamOptimizer};
use tracing::{info, warn};

use crate::config::{LineupConfig, LogFormat};
use crate::report;
use crate::settings::{parse_odds_assignment, Settings, SettingsStore};

/// Fantasy lineup scoring and budget-constrained team builder
#[derive(Parser)]
#[command(name = "lineup-cli")]
#[command(about = "Score fantasy players and build the best team under a budget")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory with the captured market, season and player payloads
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Best players of each role by expected score
    Players {
        /// Only this role
        #[arg(short, long)]
        role: Option<Role>,
        /// Players shown per role
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },
    /// Best teams by expected score and by ceiling
    Teams {
        /// Budget for this run, defaults to the saved one
        #[arg(short, long)]
        budget: Option<f64>,
    },
    /// Best teams for any metric
    Optimize {
        /// Metric to maximize, e.g. expectedScore or cost_efficiency
        #[arg(short, long, default_value = "expectedScore")]
        metric: String,
        #[arg(short, long)]
        budget: Option<f64>,
        /// Only players of this region
        #[arg(short, long)]
        region: Option<String>,
    },
    /// Best team of every region
    Regions {
        #[arg(short, long)]
        budget: Option<f64>,
    },
    /// Next-round pairings grouped by region
    Matchups,
    /// Evaluate a hand-picked team by player name
    Custom {
        #[arg(long)]
        top: String,
        #[arg(long)]
        jungle: String,
        #[arg(long)]
        mid: String,
        #[arg(long)]
        bottom: String,
        #[arg(long)]
        support: String,
    },
    /// Metric summaries and the best value picks
    Insights {
        /// Value picks shown
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Save a new default budget
    SetBudget { budget: f64 },
    /// Save odds for one or more teams, as TEAM=ODDS
    SetOdds {
        #[arg(required = true)]
        assignments: Vec<String>,
    },
}

/// CLI handler
pub struct CliHandler {
    pool: PlayerPool<CacheDirSource>,
    store: SettingsStore,
    scoring: ScoringEngine,
    optimizer: TeamOptimizer,
    json: bool,
}

/// Scored pool plus the settings it was scored with
struct Session {
    batch: ScoringBatch,
    settings: Settings,
}

impl CliHandler {
    pub fn new(config: LineupConfig, json: bool) -> Result<Self> {
        let source = CacheDirSource::with_layout(&config.data_dir, config.cache.clone());
        Ok(Self {
            pool: PlayerPool::new(source, config.regions.clone()),
            store: SettingsStore::new(&config.settings_file),
            scoring: ScoringEngine::new(config.scoring.clone()),
            optimizer: TeamOptimizer::new(config.optimizer.clone())?,
            json,
        })
    }

    /// Handle CLI commands
    pub async fn handle_command(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::SetBudget { budget } => return self.set_budget(budget),
            Commands::SetOdds { assignments } => return self.set_odds(&assignments).await,
            _ => {}
        }

        let Some(session) = self.session().await? else {
            println!("{}", report::NO_DATA.yellow());
            return Ok(());
        };

        match command {
            Commands::Players { role, limit } => self.show_players(&session, role, limit),
            Commands::Teams { budget } => self.show_teams(&session, budget),
            Commands::Optimize { metric, budget, region } => {
                self.show_optimize(&session, &metric, budget, region.as_deref())
            }
            Commands::Regions { budget } => self.show_regions(&session, budget),
            Commands::Matchups => self.show_matchups(&session),
            Commands::Custom { top, jungle, mid, bottom, support } => {
                self.show_custom(&session, [top, jungle, mid, bottom, support])
            }
            Commands::Insights { limit } => self.show_insights(&session, limit),
            Commands::SetBudget { .. } | Commands::SetOdds { .. } => Ok(()),
        }
    }

    /// Load the pool and score it with the saved odds, `None` when empty
    async fn session(&mut self) -> Result<Option<Session>> {
        let pool = self.pool.load().await?;
        info!("Loaded {} players from {:?}", pool.players.len(), self.pool.source().dir());
        for skipped in &pool.skipped {
            warn!("Skipped player {:?}: {}", skipped.player_id, skipped.reason);
        }
        if pool.is_empty() {
            return Ok(None);
        }

        let mut settings = self.store.load()?;
        settings.ensure_teams(pool.teams());
        let batch = self.scoring.score(&pool.players, &settings.odds_map());
        for skipped in &batch.skipped {
            warn!("Could not score {}: {}", skipped.name, skipped.reason);
        }
        if batch.is_empty() {
            return Ok(None);
        }
        Ok(Some(Session { batch, settings }))
    }

    fn show_players(&self, session: &Session, role: Option<Role>, limit: usize) -> Result<()> {
        let mut ranked = top_by_role(&session.batch.players, Metric::ExpectedScore, limit);
        if let Some(role) = role {
            ranked.retain(|r, _| *r == role);
        }
        if self.json {
            return print_json(&ranked);
        }

        println!("{}", "Top players by expected score".bold());
        println!("{}", report::player_header().dimmed());
        for players in ranked.values() {
            for player in players {
                println!("{}", report::player_line(player));
            }
        }
        Ok(())
    }

    fn show_teams(&self, session: &Session, budget: Option<f64>) -> Result<()> {
        let budget = budget.unwrap_or(session.settings.budget);
        let named = self.optimizer.optimize_named(&session.batch.players, budget);
        if self.json {
            return print_json(&named);
        }

        for entry in &named {
            println!("{}", format!("{} (budget {:.2})", entry.label, budget).bold());
            println!("{}", report::status_line(&entry.result).dimmed());
            print_assemblies(&entry.result.assemblies);
        }
        Ok(())
    }

    fn show_optimize(&self, session: &Session, metric: &str, budget: Option<f64>, region: Option<&str>) -> Result<()> {
        let metric = Metric::from_name(metric)?;
        let budget = budget.unwrap_or(session.settings.budget);
        info!("Optimizing {} with budget {:.2}", metric, budget);

        let result = match region {
            Some(region) => {
                let mut regional = self.optimizer.optimize_by_region(&session.batch.players, metric, budget, &[region]);
                match regional.pop() {
                    Some(entry) => entry.result,
                    None => {
                        println!("{}", format!("no players in region {}", region).yellow());
                        return Ok(());
                    }
                }
            }
            None => self.optimizer.optimize(&session.batch.players, metric, budget),
        };
        if self.json {
            return print_json(&result);
        }

        println!("{}", format!("Best teams by {}", metric.field_name()).bold());
        println!("{}", report::status_line(&result).dimmed());
        print_assemblies(&result.assemblies);
        Ok(())
    }

    fn show_regions(&self, session: &Session, budget: Option<f64>) -> Result<()> {
        let budget = budget.unwrap_or(session.settings.budget);
        let regions = self.pool.regions().region_names();
        let results =
            self.optimizer.optimize_by_region(&session.batch.players, Metric::ExpectedScore, budget, &regions);
        if self.json {
            return print_json(&results);
        }

        for entry in &results {
            println!("{}", format!("{} (budget {:.2})", entry.region, budget).bold());
            println!("{}", report::status_line(&entry.result).dimmed());
            if let Some(best) = entry.result.best() {
                print_assemblies(std::slice::from_ref(best));
            }
        }
        Ok(())
    }

    fn show_matchups(&self, session: &Session) -> Result<()> {
        let all = matchups(&session.batch.players);
        let regions = team_regions(&session.batch.players);
        if self.json {
            return print_json(&all);
        }

        if all.is_empty() {
            println!("{}", "no upcoming matchups".yellow());
            return Ok(());
        }
        for region in self.pool.regions().region_names() {
            let games = matchups_in_region(&all, &regions, region);
            if games.is_empty() {
                continue;
            }
            println!("{}", region.bold());
            for game in games {
                println!("  {} vs {}", game.first, game.second);
            }
        }
        Ok(())
    }

    fn show_custom(&self, session: &Session, names: [String; 5]) -> Result<()> {
        let mut picks: Vec<&ScoredPlayerRecord> = Vec::with_capacity(names.len());
        for (role, name) in Role::ALL.into_iter().zip(&names) {
            let player = session
                .batch
                .find_by_name(name)
                .ok_or_else(|| anyhow!("No player named '{}'", name))?;
            if player.role() != role {
                return Err(anyhow!("{} plays {}, not {}", player.name(), player.role(), role));
            }
            picks.push(player);
        }

        let team = evaluate_custom(&picks, Metric::ExpectedScore)?;
        if self.json {
            return print_json(&team);
        }

        println!("{}", "Custom team".bold());
        print_assemblies(std::slice::from_ref(&team));
        let budget = session.settings.budget;
        if team.total_cost > budget {
            println!("{}", format!("over the saved budget {:.2} by {:.2}", budget, team.total_cost - budget).red());
        } else {
            println!("{}", format!("{:.2} left of the saved budget {:.2}", budget - team.total_cost, budget).green());
        }
        Ok(())
    }

    fn show_insights(&self, session: &Session, limit: usize) -> Result<()> {
        let summaries = summarize(&session.batch.players);
        let best_value = top_by_cost_efficiency(&session.batch.players, limit);
        if self.json {
            #[derive(Serialize)]
            struct Insights<'a> {
                avg_sample_size: f64,
                summaries: &'a [MetricSummary],
                best_value: &'a [&'a ScoredPlayerRecord],
            }
            return print_json(&Insights {
                avg_sample_size: session.batch.avg_sample_size,
                summaries: &summaries,
                best_value: &best_value,
            });
        }

        println!("{}", format!("Pool of {} players", session.batch.players.len()).bold());
        println!("average head-to-head sample size {:.3}", session.batch.avg_sample_size);
        for summary in &summaries {
            println!("{}", report::summary_line(summary));
        }
        println!();
        println!("{}", "Best value picks".bold());
        for player in best_value {
            println!("{}", report::value_line(player));
        }
        Ok(())
    }

    fn set_budget(&self, budget: f64) -> Result<()> {
        let mut settings = self.store.load()?;
        settings.set_budget(budget)?;
        self.store.save(&mut settings)?;
        println!("{}", format!("budget set to {:.2} in {:?}", settings.budget, self.store.path()).green());
        Ok(())
    }

    async fn set_odds(&mut self, assignments: &[String]) -> Result<()> {
        let parsed = assignments
            .iter()
            .map(|raw| parse_odds_assignment(raw))
            .collect::<Result<Vec<_>>>()?;

        let mut settings = self.store.load()?;
        // a missing cache only means no default odds get filled in
        match self.pool.load().await {
            Ok(pool) => {
                settings.ensure_teams(pool.teams());
            }
            Err(e) => warn!("Player pool at {:?} unavailable, saving odds only: {}", self.pool.source().dir(), e),
        }
        for (team, odds) in &parsed {
            settings.set_odds(team, *odds)?;
        }
        self.store.save(&mut settings)?;

        for (team, odds) in &parsed {
            println!("{}", format!("{} odds set to {:.2}", team, odds).green());
        }
        Ok(())
    }
}

fn print_assemblies(assemblies: &[TeamAssembly]) {
    for (rank, team) in assemblies.iter().enumerate() {
        println!("{}", format!("#{}", rank + 1).cyan());
        for line in report::assembly_lines(team) {
            println!("{}", line);
        }
    }
    println!();
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
