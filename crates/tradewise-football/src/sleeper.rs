// Sleeper league payloads and their mapping onto canonical engine types.
//
// Only the fields the analysis needs are modelled; everything else in the
// Sleeper responses is ignored by serde. Most fields are nullable upstream,
// so they are optional or defaulted here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use tradewise_core::league::LeagueDescriptor;
use tradewise_core::{profile_roster, InjuryStatus, Player, Position, RosterProfile, TeamInfo};

use crate::catalog::PlayerCatalog;

/// Tier assigned to players the catalog does not know.
pub const UNRANKED_TIER: u32 = 99;

/// ADP assigned when Sleeper reports no search rank.
pub const UNRANKED_ADP: f64 = 999.0;

// ---------------------------------------------------------------------------
// Raw payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperLeague {
    pub league_id: String,
    pub name: String,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub total_rosters: Option<u32>,
    #[serde(default)]
    pub roster_positions: Vec<String>,
    #[serde(default)]
    pub scoring_settings: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperUser {
    pub user_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleeperRosterSettings {
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ties: u32,
    #[serde(default)]
    pub fpts: f64,
    #[serde(default)]
    pub fpts_decimal: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperRoster {
    pub roster_id: u32,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub players: Option<Vec<String>>,
    #[serde(default)]
    pub settings: SleeperRosterSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperPlayer {
    pub player_id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub fantasy_positions: Option<Vec<String>>,
    #[serde(default)]
    pub injury_status: Option<String>,
    #[serde(default)]
    pub search_rank: Option<u32>,
}

/// Everything fetched for one league, taken at a single point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperSnapshot {
    pub league: SleeperLeague,
    pub rosters: Vec<SleeperRoster>,
    pub users: Vec<SleeperUser>,
    /// Player directory keyed by Sleeper player id.
    pub players: HashMap<String, SleeperPlayer>,
}

// ---------------------------------------------------------------------------
// Player mapping
// ---------------------------------------------------------------------------

impl SleeperPlayer {
    fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref().filter(|n| !n.is_empty()) {
            return full.to_string();
        }
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.player_id.clone()
        } else {
            parts.join(" ")
        }
    }

    /// Primary position, falling back to the first recognised fantasy
    /// position.
    fn canonical_position(&self) -> Option<Position> {
        self.position
            .as_deref()
            .and_then(Position::from_str_pos)
            .or_else(|| {
                self.fantasy_positions
                    .iter()
                    .flatten()
                    .find_map(|p| Position::from_str_pos(p))
            })
    }
}

fn map_injury(status: Option<&str>) -> Option<InjuryStatus> {
    match status?.trim().to_lowercase().as_str() {
        "" => None,
        "questionable" => Some(InjuryStatus::Questionable),
        "doubtful" => Some(InjuryStatus::Doubtful),
        // IR, PUP, suspension and similar designations all mean unavailable.
        _ => Some(InjuryStatus::Out),
    }
}

/// Map a Sleeper player onto the canonical shape.
///
/// Values come from the catalog (matched by id, then by name); players it
/// does not know are unvalued. Returns `None` for positions the engine does
/// not track (IDP, OL, ...).
pub fn player_from_sleeper(raw: &SleeperPlayer, catalog: Option<&PlayerCatalog>) -> Option<Player> {
    let position = raw.canonical_position()?;
    let name = raw.display_name();

    let known = catalog.and_then(|c| c.get(&raw.player_id).or_else(|| c.find_by_name(&name)));

    let mut player = Player {
        id: raw.player_id.clone(),
        name,
        team: raw.team.clone().unwrap_or_default(),
        position,
        adp: raw.search_rank.map(f64::from).unwrap_or(UNRANKED_ADP),
        projection: 0.0,
        current_performance: None,
        value: 0,
        tier: UNRANKED_TIER,
        bye: 0,
        injury: map_injury(raw.injury_status.as_deref()),
    };

    if let Some(known) = known {
        player.adp = known.adp;
        player.projection = known.projection;
        player.current_performance = known.current_performance;
        player.value = known.value;
        player.tier = known.tier;
        player.bye = known.bye;
    }

    Some(player)
}

// ---------------------------------------------------------------------------
// League mapping
// ---------------------------------------------------------------------------

fn team_info(roster: &SleeperRoster, users: &[SleeperUser]) -> TeamInfo {
    let user = roster
        .owner_id
        .as_deref()
        .and_then(|owner| users.iter().find(|u| u.user_id == owner));

    let display = user.and_then(|u| u.display_name.clone().filter(|n| !n.is_empty()));
    let username = user.and_then(|u| u.username.clone().filter(|n| !n.is_empty()));

    TeamInfo {
        id: roster.roster_id.to_string(),
        name: display
            .or_else(|| username.clone())
            .unwrap_or_else(|| format!("Team {}", roster.roster_id)),
        owner: username.unwrap_or_else(|| "Unknown".to_string()),
        total_points: roster.settings.fpts + roster.settings.fpts_decimal / 100.0,
        wins: roster.settings.wins,
        losses: roster.settings.losses,
    }
}

/// Profile every roster in the snapshot, in roster order.
pub fn profiles_from_snapshot(
    snapshot: &SleeperSnapshot,
    catalog: Option<&PlayerCatalog>,
) -> Vec<RosterProfile> {
    snapshot
        .rosters
        .iter()
        .map(|roster| {
            let ids = roster.players.as_deref().unwrap_or_default();
            let players: Vec<Player> = ids
                .iter()
                .filter_map(|id| snapshot.players.get(id))
                .filter_map(|raw| player_from_sleeper(raw, catalog))
                .collect();

            if players.len() < ids.len() {
                debug!(
                    roster_id = roster.roster_id,
                    skipped = ids.len() - players.len(),
                    "skipped unknown or untracked players"
                );
            }

            profile_roster(team_info(roster, &snapshot.users), &players)
        })
        .collect()
}

/// Scoring label from the points-per-reception setting.
fn scoring_label(settings: &HashMap<String, f64>) -> Option<String> {
    let rec = settings.get("rec")?;
    let label = if *rec >= 1.0 {
        "ppr"
    } else if *rec > 0.0 {
        "half-ppr"
    } else {
        "standard"
    };
    Some(label.to_string())
}

pub fn descriptor_from_snapshot(snapshot: &SleeperSnapshot) -> LeagueDescriptor {
    let league = &snapshot.league;
    LeagueDescriptor {
        name: league.name.clone(),
        season: league.season.clone(),
        scoring: scoring_label(&league.scoring_settings),
        roster_positions: (!league.roster_positions.is_empty())
            .then(|| league.roster_positions.clone()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
