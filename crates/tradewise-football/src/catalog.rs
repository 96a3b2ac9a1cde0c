// Player catalog loading and lookup.
//
// The catalog is a CSV table of already-valued players (one row per player)
// keyed by a unique id. It backs trade proposals built from ids and overlays
// values onto imported league rosters.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};
use tradewise_core::{InjuryStatus, Player, Position};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("duplicate player id `{0}`")]
    DuplicateId(String),
}

// ---------------------------------------------------------------------------
// Raw CSV row (private)
// ---------------------------------------------------------------------------

/// One row of the player table. Position and injury are kept as text so that
/// a single bad row can be skipped instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    id: String,
    name: String,
    #[serde(default)]
    team: String,
    position: String,
    adp: f64,
    projection: f64,
    #[serde(default)]
    current_performance: Option<f64>,
    value: u32,
    tier: u32,
    #[serde(default)]
    bye: u32,
    #[serde(default)]
    injury: Option<String>,
}

fn parse_injury(raw: &str) -> Option<InjuryStatus> {
    match raw.trim().to_lowercase().as_str() {
        "" => None,
        "healthy" => Some(InjuryStatus::Healthy),
        "questionable" => Some(InjuryStatus::Questionable),
        "doubtful" => Some(InjuryStatus::Doubtful),
        "out" => Some(InjuryStatus::Out),
        other => {
            warn!("unknown injury status '{}', treating as unreported", other);
            None
        }
    }
}

impl RawPlayerRow {
    fn into_player(self) -> Option<Player> {
        let Some(position) = Position::from_str_pos(&self.position) else {
            warn!(
                "skipping player '{}': unknown position '{}'",
                self.name, self.position
            );
            return None;
        };
        Some(Player {
            id: self.id,
            name: self.name,
            team: self.team,
            position,
            adp: self.adp,
            projection: self.projection,
            current_performance: self.current_performance,
            value: self.value,
            tier: self.tier,
            bye: self.bye,
            injury: self.injury.as_deref().and_then(parse_injury),
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// An immutable, id-unique collection of valued players.
#[derive(Debug, Clone, Default)]
pub struct PlayerCatalog {
    players: Vec<Player>,
    by_id: HashMap<String, usize>,
}

impl PlayerCatalog {
    /// Build a catalog, rejecting repeated ids.
    pub fn from_players(players: Vec<Player>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(players.len());
        for (idx, player) in players.iter().enumerate() {
            if by_id.insert(player.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(player.id.clone()));
            }
        }
        Ok(PlayerCatalog { players, by_id })
    }

    /// Load a catalog from a CSV file.
    pub fn load_csv(path: &Path) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let catalog = Self::from_reader(file, &path.display().to_string())?;
        info!(
            "Loaded {} players from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load a catalog from any CSV reader. `label` names the source in errors.
    pub fn from_reader<R: Read>(reader: R, label: &str) -> Result<Self, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut players = Vec::new();
        for result in rdr.deserialize::<RawPlayerRow>() {
            let row = result.map_err(|e| CatalogError::Csv {
                path: label.to_string(),
                source: e,
            })?;
            if let Some(player) = row.into_player() {
                players.push(player);
            }
        }

        Self::from_players(players)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.by_id.get(id).map(|&idx| &self.players[idx])
    }

    /// Case-insensitive exact name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        let needle = name.trim().to_lowercase();
        self.players
            .iter()
            .find(|p| p.name.to_lowercase() == needle)
    }

    /// Players whose name or team contains `query`, case-insensitively, in
    /// catalog order.
    pub fn search(&self, query: &str) -> Vec<&Player> {
        let needle = query.trim().to_lowercase();
        self.players
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle) || p.team.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Players at `position`, highest value first.
    pub fn by_position(&self, position: Position) -> Vec<&Player> {
        let mut players: Vec<&Player> = self
            .players
            .iter()
            .filter(|p| p.position == position)
            .collect();
        players.sort_by(|a, b| b.value.cmp(&a.value));
        players
    }

    /// The `limit` most valuable players not in `excluded`, highest first.
    /// Ties keep catalog order.
    pub fn top_value(&self, limit: usize, excluded: &HashSet<String>) -> Vec<&Player> {
        let mut players = self.excluding(excluded);
        players.sort_by(|a, b| b.value.cmp(&a.value));
        players.truncate(limit);
        players
    }

    /// Players not in `excluded` (e.g. already placed in a trade).
    pub fn excluding(&self, excluded: &HashSet<String>) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| !excluded.contains(&p.id))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
