// Complementary-need trade matching between pairs of teams.
//
// Two teams match when each has depth at a position the other is thin at.
// Pairs are scanned in input order (i outer, j inner, i < j) and scanning
// stops after the first `MAX_RECOMMENDATIONS` matches; the list is not a
// ranked top-N.

use serde::{Deserialize, Serialize};

use crate::roster::{RosterLabel, RosterProfile};

/// Maximum number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 5;

const BASE_CONFIDENCE: u32 = 60;
const CONFIDENCE_PER_LABEL: u32 = 10;
const MAX_CONFIDENCE: u32 = 90;

/// A proposed two-team trade built from complementary strengths and needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRecommendation {
    pub team1: String,
    pub team2: String,
    /// Strengths team1 would deal from.
    pub team1_gives: Vec<RosterLabel>,
    /// Strengths team2 would deal from.
    pub team2_gives: Vec<RosterLabel>,
    /// 60-90.
    pub confidence: u32,
    pub rationale: String,
}

impl TradeRecommendation {
    /// Display lines for what team1 sends, e.g. "RB Depth Player".
    pub fn team1_sends(&self) -> Vec<String> {
        self.team1_gives.iter().map(|l| format!("{l} Player")).collect()
    }

    pub fn team2_sends(&self) -> Vec<String> {
        self.team2_gives.iter().map(|l| format!("{l} Player")).collect()
    }
}

/// Confidence for a match with `matched_labels` labels across both sides.
pub fn confidence_for(matched_labels: usize) -> u32 {
    let raw = BASE_CONFIDENCE + CONFIDENCE_PER_LABEL * matched_labels as u32;
    raw.min(MAX_CONFIDENCE)
}

/// Strengths of `giver` that cover one of `receiver`'s needs.
fn covered_needs(giver: &RosterProfile, receiver: &RosterProfile) -> Vec<RosterLabel> {
    giver
        .strengths
        .iter()
        .filter(|s| receiver.has_need(s.position))
        .copied()
        .collect()
}

fn join_labels(labels: &[RosterLabel]) -> String {
    labels
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Evaluate one ordered pair. Returns `None` unless both teams can help.
fn match_pair(team1: &RosterProfile, team2: &RosterProfile) -> Option<TradeRecommendation> {
    let team1_gives = covered_needs(team1, team2);
    let team2_gives = covered_needs(team2, team1);

    if team1_gives.is_empty() || team2_gives.is_empty() {
        return None;
    }

    let confidence = confidence_for(team1_gives.len() + team2_gives.len());
    let rationale = format!(
        "{t1} has excess {g1} while {t2} needs it. {t2} can offer {g2} that {t1} needs.",
        t1 = team1.name,
        t2 = team2.name,
        g1 = join_labels(&team1_gives),
        g2 = join_labels(&team2_gives),
    );

    Some(TradeRecommendation {
        team1: team1.name.clone(),
        team2: team2.name.clone(),
        team1_gives,
        team2_gives,
        confidence,
        rationale,
    })
}

/// Find up to `MAX_RECOMMENDATIONS` complementary trades, in scan order.
pub fn match_trades(profiles: &[RosterProfile]) -> Vec<TradeRecommendation> {
    profiles
        .iter()
        .enumerate()
        .flat_map(|(i, team1)| {
            profiles[i + 1..]
                .iter()
                .filter_map(move |team2| match_pair(team1, team2))
        })
        .take(MAX_RECOMMENDATIONS)
        .collect()
}
