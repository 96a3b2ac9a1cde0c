// Roster profiling: positional strengths and needs for a single team.
//
// Strength ("depth") and need ("thin") are judged by two separate threshold
// tables. They are not complements: a position can be neither, and the need
// rule must never be derived from the strength rule.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::{Player, Position};
use crate::valuation::aggregate;

// ---------------------------------------------------------------------------
// Depth rules
// ---------------------------------------------------------------------------

/// Thresholds applied to one position's player count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthRule {
    pub position: Position,
    /// Count at or above which the position is a strength.
    pub strength_at: usize,
    /// Count below which the position is a need.
    pub need_below: usize,
}

/// Positions that are profiled, in label order. K and DST are never labelled.
pub const DEPTH_RULES: [DepthRule; 4] = [
    DepthRule {
        position: Position::Quarterback,
        strength_at: 2,
        need_below: 2,
    },
    DepthRule {
        position: Position::RunningBack,
        strength_at: 4,
        need_below: 3,
    },
    DepthRule {
        position: Position::WideReceiver,
        strength_at: 5,
        need_below: 4,
    },
    DepthRule {
        position: Position::TightEnd,
        strength_at: 2,
        need_below: 2,
    },
];

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    Strength,
    Need,
}

/// A positional strength or need.
///
/// Displays as "QB Depth" for a strength and "QB" for a need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterLabel {
    pub position: Position,
    pub kind: LabelKind,
}

impl RosterLabel {
    pub fn strength(position: Position) -> Self {
        RosterLabel {
            position,
            kind: LabelKind::Strength,
        }
    }

    pub fn need(position: Position) -> Self {
        RosterLabel {
            position,
            kind: LabelKind::Need,
        }
    }
}

impl fmt::Display for RosterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LabelKind::Strength => write!(f, "{} Depth", self.position),
            LabelKind::Need => write!(f, "{}", self.position),
        }
    }
}

// ---------------------------------------------------------------------------
// Team identity and profile
// ---------------------------------------------------------------------------

/// Team metadata resolved by the importer before profiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub id: String,
    pub name: String,
    pub owner: String,
    /// Season fantasy points scored.
    #[serde(default)]
    pub total_points: f64,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

/// A team's roster with derived strengths and needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterProfile {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub total_points: f64,
    pub wins: u32,
    pub losses: u32,
    /// Strength labels, ordered QB, RB, WR, TE.
    pub strengths: Vec<RosterLabel>,
    /// Need labels, ordered QB, RB, WR, TE.
    pub needs: Vec<RosterLabel>,
    pub players: Vec<Player>,
}

impl RosterProfile {
    pub fn has_need(&self, position: Position) -> bool {
        self.needs.iter().any(|l| l.position == position)
    }
}

/// Derive a team's profile from its full player list.
pub fn profile_roster(team: TeamInfo, players: &[Player]) -> RosterProfile {
    let summary = aggregate(players);

    let strengths = DEPTH_RULES
        .iter()
        .filter(|rule| summary.count_at(rule.position) >= rule.strength_at)
        .map(|rule| RosterLabel::strength(rule.position))
        .collect();

    let needs = DEPTH_RULES
        .iter()
        .filter(|rule| summary.count_at(rule.position) < rule.need_below)
        .map(|rule| RosterLabel::need(rule.position))
        .collect();

    RosterProfile {
        id: team.id,
        name: team.name,
        owner: team.owner,
        total_points: team.total_points,
        wins: team.wins,
        losses: team.losses,
        strengths,
        needs,
        players: players.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str) -> TeamInfo {
        TeamInfo {
            id: name.to_lowercase(),
            name: name.into(),
            owner: "owner".into(),
            total_points: 1000.0,
            wins: 5,
            losses: 3,
        }
    }

    fn roster(counts: &[(Position, usize)]) -> Vec<Player> {
        let mut players = Vec::new();
        for &(position, count) in counts {
            for i in 0..count {
                players.push(Player {
                    id: format!("{position}-{i}"),
                    name: format!("{position} {i}"),
                    team: "TST".into(),
                    position,
                    adp: 50.0,
                    projection: 150.0,
                    current_performance: None,
                    value: 50,
                    tier: 3,
                    bye: 10,
                    injury: None,
                });
            }
        }
        players
    }

    fn positions(labels: &[RosterLabel]) -> Vec<Position> {
        labels.iter().map(|l| l.position).collect()
    }

    #[test]
    fn thin_roster_needs_everything() {
        let players = roster(&[
            (Position::Quarterback, 1),
            (Position::RunningBack, 2),
            (Position::WideReceiver, 3),
            (Position::TightEnd, 1),
        ]);

        let profile = profile_roster(team("Thin"), &players);

        assert!(profile.strengths.is_empty());
        assert_eq!(
            positions(&profile.needs),
            vec![
                Position::Quarterback,
                Position::RunningBack,
                Position::WideReceiver,
                Position::TightEnd
            ]
        );
    }

    #[test]
    fn deep_roster_has_strengths_and_no_needs() {
        let players = roster(&[
            (Position::Quarterback, 2),
            (Position::RunningBack, 4),
            (Position::WideReceiver, 5),
            (Position::TightEnd, 2),
        ]);

        let profile = profile_roster(team("Deep"), &players);

        assert_eq!(profile.strengths.len(), 4);
        assert!(profile.needs.is_empty());
        assert!(profile.strengths.contains(&RosterLabel::strength(Position::WideReceiver)));
    }

    #[test]
    fn boundary_counts_are_neither_strength_nor_need() {
        // RB 3 and WR 4 clear the need rule but miss the strength rule.
        let players = roster(&[
            (Position::Quarterback, 2),
            (Position::RunningBack, 3),
            (Position::WideReceiver, 4),
            (Position::TightEnd, 2),
        ]);

        let profile = profile_roster(team("Middle"), &players);

        assert!(!profile.strengths.contains(&RosterLabel::strength(Position::RunningBack)));
        assert!(!profile.has_need(Position::RunningBack));
        assert!(!profile.strengths.contains(&RosterLabel::strength(Position::WideReceiver)));
        assert!(!profile.has_need(Position::WideReceiver));
        assert_eq!(
            positions(&profile.strengths),
            vec![Position::Quarterback, Position::TightEnd]
        );
    }

    #[test]
    fn kickers_and_defenses_are_not_labelled() {
        let players = roster(&[(Position::Kicker, 3), (Position::Defense, 3)]);
        let profile = profile_roster(team("Special"), &players);

        assert!(profile.strengths.is_empty());
        assert_eq!(profile.needs.len(), 4);
        assert!(!profile.has_need(Position::Kicker));
    }

    #[test]
    fn profiling_is_repeatable() {
        let players = roster(&[(Position::RunningBack, 5), (Position::WideReceiver, 2)]);
        let first = profile_roster(team("Same"), &players);
        let second = profile_roster(team("Same"), &players);
        assert_eq!(first, second);
    }

    #[test]
    fn carries_team_metadata_through() {
        let players = roster(&[(Position::Quarterback, 1)]);
        let profile = profile_roster(team("Meta"), &players);
        assert_eq!(profile.id, "meta");
        assert_eq!(profile.owner, "owner");
        assert_eq!(profile.wins, 5);
        assert_eq!(profile.players.len(), 1);
    }

    #[test]
    fn label_text() {
        assert_eq!(RosterLabel::strength(Position::RunningBack).to_string(), "RB Depth");
        assert_eq!(RosterLabel::need(Position::TightEnd).to_string(), "TE");
    }
}
