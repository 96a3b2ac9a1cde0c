// Command handlers. Each one takes already-loaded collaborators and returns
// the rendered report; printing and process setup stay in main.

use std::collections::HashSet;
use std::str::FromStr;

use anyhow::{bail, Context};
use tracing::{info, warn};
use tradewise_core::{analyze_league, analyze_trade, Player, Position, TradeSide};
use tradewise_football::catalog::PlayerCatalog;
use tradewise_football::sleeper::{descriptor_from_snapshot, profiles_from_snapshot};
use tradewise_football::source::{FileLeagueSource, LeagueSource, SleeperClient};

use crate::config::OutputFormat;
use crate::report::{self, LeagueReport, INCOMPLETE_TRADE_PROMPT};

// ---------------------------------------------------------------------------
// Trade
// ---------------------------------------------------------------------------

/// One `--side "Name=id1,id2"` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideSpec {
    pub name: String,
    /// Catalog ids or exact player names.
    pub players: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SideSpecError {
    #[error("expected NAME=PLAYER[,PLAYER...], got `{0}`")]
    MissingSeparator(String),

    #[error("side name must not be empty in `{0}`")]
    EmptyName(String),
}

impl FromStr for SideSpec {
    type Err = SideSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, players) = s
            .split_once('=')
            .ok_or_else(|| SideSpecError::MissingSeparator(s.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(SideSpecError::EmptyName(s.to_string()));
        }
        let players = players
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        Ok(SideSpec {
            name: name.to_string(),
            players,
        })
    }
}

/// Resolve side specs against the catalog. Sides are numbered from 1 in the
/// order given. A player may appear on only one side.
pub fn build_sides(catalog: &PlayerCatalog, specs: &[SideSpec]) -> anyhow::Result<Vec<TradeSide>> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut sides = Vec::with_capacity(specs.len());

    for (idx, spec) in specs.iter().enumerate() {
        let mut side = TradeSide::new((idx + 1).to_string(), spec.name.as_str());
        for key in &spec.players {
            let Some(player) = catalog.get(key).or_else(|| catalog.find_by_name(key)) else {
                bail!("unknown player `{}` on side {}", key, spec.name);
            };
            if taken.contains(&player.id) {
                bail!("{} is already on another side of the trade", player.name);
            }
            if !side.add_player(player.clone()) {
                warn!("{} listed twice for {}, ignoring repeat", player.name, spec.name);
            }
        }
        taken.extend(side.players().iter().map(|p| p.id.clone()));
        sides.push(side);
    }

    Ok(sides)
}

/// Score a proposal. An incomplete proposal is reported, not treated as an
/// error.
pub fn trade(
    catalog: &PlayerCatalog,
    specs: &[SideSpec],
    format: OutputFormat,
) -> anyhow::Result<String> {
    let sides = build_sides(catalog, specs)?;

    match analyze_trade(&sides) {
        Ok(analysis) => {
            info!(
                "Trade scored: fairness {:.2}, winner {}, gap {}",
                analysis.fairness_score, analysis.winner, analysis.value_difference
            );
            match format {
                OutputFormat::Text => Ok(report::render_trade(&analysis)),
                OutputFormat::Json => Ok(report::to_json("trade", &analysis)?),
            }
        }
        Err(reason) => {
            info!("Trade not scored: {}", reason);
            match format {
                OutputFormat::Text => Ok(report::render_incomplete(&reason)),
                OutputFormat::Json => Ok(report::to_json(
                    "trade_incomplete",
                    &serde_json::json!({
                        "message": INCOMPLETE_TRADE_PROMPT,
                        "reason": reason.to_string(),
                    }),
                )?),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// League
// ---------------------------------------------------------------------------

/// Fetch a league snapshot, optionally save it, and analyze it.
pub async fn league(
    source: &dyn LeagueSource,
    league_id: &str,
    catalog: Option<&PlayerCatalog>,
    save_to: Option<&FileLeagueSource>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let snapshot = source
        .fetch_league(league_id)
        .await
        .with_context(|| format!("failed to load league {league_id}"))?;

    if let Some(store) = save_to {
        store
            .save(&snapshot)
            .await
            .context("failed to save league snapshot")?;
    }

    let profiles = profiles_from_snapshot(&snapshot, catalog);
    let descriptor = descriptor_from_snapshot(&snapshot);
    let analysis = analyze_league(&profiles, &descriptor);
    info!(
        "League '{}' analyzed: {} teams, {} trade ideas, {} insights",
        descriptor.name,
        analysis.team_count,
        analysis.trade_opportunities(),
        analysis.insights.len()
    );

    match format {
        OutputFormat::Text => Ok(report::render_league(&descriptor, &analysis)),
        OutputFormat::Json => Ok(report::to_json(
            "league",
            &LeagueReport {
                league: &descriptor,
                analysis: &analysis,
            },
        )?),
    }
}

/// List the leagues `username` plays in for `season`.
pub async fn leagues(
    client: &SleeperClient,
    username: &str,
    season: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let user = client
        .user(username)
        .await
        .with_context(|| format!("failed to look up Sleeper user {username}"))?;
    let leagues = client
        .user_leagues(&user.user_id, season)
        .await
        .with_context(|| format!("failed to list leagues for {username}"))?;
    info!("{} has {} leagues in {}", username, leagues.len(), season);

    match format {
        OutputFormat::Text => Ok(report::render_leagues(username, season, &leagues)),
        OutputFormat::Json => Ok(report::to_json("leagues", &leagues)?),
    }
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct PlayerQuery {
    pub search: Option<String>,
    pub position: Option<Position>,
    /// Ids left out of the listing (e.g. players already in a proposal).
    pub exclude: Vec<String>,
    pub limit: usize,
}

/// Select players for a query, highest value first.
pub fn select_players<'a>(catalog: &'a PlayerCatalog, query: &PlayerQuery) -> Vec<&'a Player> {
    let excluded: HashSet<String> = query.exclude.iter().cloned().collect();

    let mut players = match (query.search.as_deref(), query.position) {
        (None, None) => return catalog.top_value(query.limit, &excluded),
        (None, Some(position)) => catalog.by_position(position),
        (Some(q), position) => {
            let mut matches = catalog.search(q);
            matches.retain(|p| position.map_or(true, |pos| p.position == pos));
            matches.sort_by(|a, b| b.value.cmp(&a.value));
            matches
        }
    };
    players.retain(|p| !excluded.contains(&p.id));
    players.truncate(query.limit);
    players
}

pub fn players(
    catalog: &PlayerCatalog,
    query: &PlayerQuery,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let selected = select_players(catalog, query);
    match format {
        OutputFormat::Text => Ok(report::render_players(&selected)),
        OutputFormat::Json => Ok(report::to_json("players", &selected)?),
    }
}
