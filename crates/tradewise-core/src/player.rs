// Canonical player representation shared by every analysis.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Football positions recognised by the engine.
///
/// Declaration order doubles as display order (QB first, DST last), which
/// keeps position breakdowns deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
    #[serde(rename = "K")]
    Kicker,
    #[serde(rename = "DST", alias = "DEF")]
    Defense,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::Quarterback,
        Position::RunningBack,
        Position::WideReceiver,
        Position::TightEnd,
        Position::Kicker,
        Position::Defense,
    ];

    /// Parse a position abbreviation.
    ///
    /// Accepts the platform spellings seen in imported leagues as well:
    /// "DEF" and "D/ST" -> Defense, "PK" -> Kicker.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "K" | "PK" => Some(Position::Kicker),
            "DST" | "DEF" | "D/ST" => Some(Position::Defense),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DST",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// Reported injury designation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjuryStatus {
    Healthy,
    Questionable,
    Doubtful,
    Out,
}

impl InjuryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InjuryStatus::Healthy => "healthy",
            InjuryStatus::Questionable => "questionable",
            InjuryStatus::Doubtful => "doubtful",
            InjuryStatus::Out => "out",
        }
    }
}

/// A player as supplied by an external data source.
///
/// Values, projections and ADP are computed upstream; the engine only reads
/// them. Players are never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier within a data source.
    pub id: String,
    pub name: String,
    /// Pro team abbreviation (e.g. "KC").
    pub team: String,
    pub position: Position,
    /// Average draft position. Lower is more valuable.
    pub adp: f64,
    /// Season fantasy point projection.
    pub projection: f64,
    /// Points scored so far this season, if known.
    #[serde(default)]
    pub current_performance: Option<f64>,
    /// Trade value on a 0-100 scale.
    pub value: u32,
    /// Tier rank. Lower is better.
    pub tier: u32,
    pub bye: u32,
    #[serde(default)]
    pub injury: Option<InjuryStatus>,
}

impl Player {
    /// Whether the player carries no injury designation other than healthy.
    pub fn is_healthy(&self) -> bool {
        matches!(self.injury, None | Some(InjuryStatus::Healthy))
    }

    /// Current performance minus projection. Positive means the player is
    /// outperforming expectations.
    pub fn performance_delta(&self) -> Option<f64> {
        self.current_performance.map(|current| current - self.projection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_platform_spellings() {
        assert_eq!(Position::from_str_pos("qb"), Some(Position::Quarterback));
        assert_eq!(Position::from_str_pos(" WR "), Some(Position::WideReceiver));
        assert_eq!(Position::from_str_pos("DEF"), Some(Position::Defense));
        assert_eq!(Position::from_str_pos("D/ST"), Some(Position::Defense));
        assert_eq!(Position::from_str_pos("PK"), Some(Position::Kicker));
        assert_eq!(Position::from_str_pos("LB"), None);
    }

    #[test]
    fn display_round_trips_through_parser() {
        for pos in Position::ALL {
            assert_eq!(Position::from_str_pos(pos.display_str()), Some(pos));
        }
    }

    #[test]
    fn serializes_as_abbreviations() {
        let json = serde_json::to_string(&Position::Defense).unwrap();
        assert_eq!(json, "\"DST\"");
        let parsed: Position = serde_json::from_str("\"DEF\"").unwrap();
        assert_eq!(parsed, Position::Defense);
        let injury: InjuryStatus = serde_json::from_str("\"questionable\"").unwrap();
        assert_eq!(injury, InjuryStatus::Questionable);
    }

    #[test]
    fn performance_delta_requires_current_numbers() {
        let mut player = Player {
            id: "allen".into(),
            name: "Josh Allen".into(),
            team: "BUF".into(),
            position: Position::Quarterback,
            adp: 8.0,
            projection: 310.0,
            current_performance: None,
            value: 95,
            tier: 1,
            bye: 12,
            injury: Some(InjuryStatus::Healthy),
        };
        assert_eq!(player.performance_delta(), None);
        assert!(player.is_healthy());

        player.current_performance = Some(325.0);
        player.injury = Some(InjuryStatus::Doubtful);
        assert_eq!(player.performance_delta(), Some(15.0));
        assert!(!player.is_healthy());
    }
}
