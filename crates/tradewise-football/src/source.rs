// League snapshot sources: the Sleeper HTTP API and saved snapshot files.
//
// Both produce a fully materialized `SleeperSnapshot`; nothing downstream
// touches the network.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::sleeper::{SleeperLeague, SleeperPlayer, SleeperRoster, SleeperSnapshot, SleeperUser};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("league `{0}` not found")]
    LeagueNotFound(String),

    #[error("user `{0}` not found")]
    UserNotFound(String),

    #[error("failed to access snapshot {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Anything that can produce a league snapshot by id.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    async fn fetch_league(&self, league_id: &str) -> Result<SleeperSnapshot, SourceError>;
}

// ---------------------------------------------------------------------------
// Sleeper HTTP client
// ---------------------------------------------------------------------------

pub const DEFAULT_SLEEPER_URL: &str = "https://api.sleeper.app/v1";

/// Read-only client for the public Sleeper API.
pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
}

impl SleeperClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let base_url = base_url.into();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Http {
                url: base_url.clone(),
                source: e,
            })?;
        Ok(SleeperClient { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let http_err = |e: reqwest::Error| SourceError::Http {
            url: url.clone(),
            source: e,
        };
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(http_err)?
            .error_for_status()
            .map_err(http_err)?;
        response.json::<T>().await.map_err(http_err)
    }

    /// Look up a user by username. Sleeper answers `null` for unknown users.
    pub async fn user(&self, username: &str) -> Result<SleeperUser, SourceError> {
        self.get_json::<Option<SleeperUser>>(&format!("user/{username}"))
            .await?
            .ok_or_else(|| SourceError::UserNotFound(username.to_string()))
    }

    /// NFL leagues a user belongs to in `season`.
    pub async fn user_leagues(
        &self,
        user_id: &str,
        season: &str,
    ) -> Result<Vec<SleeperLeague>, SourceError> {
        let leagues = self
            .get_json::<Option<Vec<SleeperLeague>>>(&format!("user/{user_id}/leagues/nfl/{season}"))
            .await?;
        Ok(leagues.unwrap_or_default())
    }

    pub async fn league(&self, league_id: &str) -> Result<SleeperLeague, SourceError> {
        self.get_json::<Option<SleeperLeague>>(&format!("league/{league_id}"))
            .await?
            .ok_or_else(|| SourceError::LeagueNotFound(league_id.to_string()))
    }

    pub async fn rosters(&self, league_id: &str) -> Result<Vec<SleeperRoster>, SourceError> {
        let rosters = self
            .get_json::<Option<Vec<SleeperRoster>>>(&format!("league/{league_id}/rosters"))
            .await?;
        Ok(rosters.unwrap_or_default())
    }

    pub async fn users(&self, league_id: &str) -> Result<Vec<SleeperUser>, SourceError> {
        let users = self
            .get_json::<Option<Vec<SleeperUser>>>(&format!("league/{league_id}/users"))
            .await?;
        Ok(users.unwrap_or_default())
    }

    /// The full NFL player directory (several megabytes).
    pub async fn players(
        &self,
    ) -> Result<std::collections::HashMap<String, SleeperPlayer>, SourceError> {
        self.get_json("players/nfl").await
    }
}

#[async_trait]
impl LeagueSource for SleeperClient {
    async fn fetch_league(&self, league_id: &str) -> Result<SleeperSnapshot, SourceError> {
        let (league, rosters, users, players) = futures_util::try_join!(
            self.league(league_id),
            self.rosters(league_id),
            self.users(league_id),
            self.players(),
        )?;
        info!(
            "Fetched league '{}': {} rosters, {} users, {} players",
            league.name,
            rosters.len(),
            users.len(),
            players.len()
        );
        Ok(SleeperSnapshot {
            league,
            rosters,
            users,
            players,
        })
    }
}

// ---------------------------------------------------------------------------
// Saved snapshots
// ---------------------------------------------------------------------------

/// Reads snapshots saved as `<dir>/<league_id>.json`.
pub struct FileLeagueSource {
    dir: PathBuf,
}

impl FileLeagueSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileLeagueSource { dir: dir.into() }
    }

    pub fn snapshot_path(&self, league_id: &str) -> PathBuf {
        self.dir.join(format!("{league_id}.json"))
    }

    /// Write a snapshot so it can be analyzed again offline.
    pub async fn save(&self, snapshot: &SleeperSnapshot) -> Result<PathBuf, SourceError> {
        let path = self.snapshot_path(&snapshot.league.league_id);
        let io_err = |path: &Path, e: std::io::Error| SourceError::Io {
            path: path.display().to_string(),
            source: e,
        };
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_err(&self.dir, e))?;
        let body = serde_json::to_vec_pretty(snapshot).map_err(|e| SourceError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| io_err(&path, e))?;
        info!("Saved league snapshot to {}", path.display());
        Ok(path)
    }
}

#[async_trait]
impl LeagueSource for FileLeagueSource {
    async fn fetch_league(&self, league_id: &str) -> Result<SleeperSnapshot, SourceError> {
        let path = self.snapshot_path(league_id);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::LeagueNotFound(league_id.to_string()));
            }
            Err(e) => {
                return Err(SourceError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };
        serde_json::from_str(&text).map_err(|e| SourceError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }
}
