// League-level observations and the competitive balance score.

use serde::{Deserialize, Serialize};

use super::LeagueDescriptor;
use crate::roster::RosterProfile;

/// First-to-last point gaps above this mark a lopsided league.
pub const LARGE_POINT_GAP_ABOVE: f64 = 200.0;

/// First-to-last point gaps below this mark a competitive league.
pub const COMPETITIVE_GAP_BELOW: f64 = 100.0;

/// Teams with fewer needs than this count as well-rounded trade partners.
pub const ACTIVE_TRADER_NEEDS_BELOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Positive,
    Negative,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueInsight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
}

impl LeagueInsight {
    fn new(kind: InsightKind, title: &str, description: String) -> Self {
        LeagueInsight {
            kind,
            title: title.to_string(),
            description,
        }
    }
}

/// Generate insights for teams already ranked by total points, descending.
///
/// The gap rule has a dead zone: gaps in [100, 200] produce nothing.
pub fn generate_insights(ranked: &[RosterProfile], league: &LeagueDescriptor) -> Vec<LeagueInsight> {
    let mut insights = Vec::new();
    let team_count = ranked.len();

    if let (Some(top), Some(bottom)) = (ranked.first(), ranked.last()) {
        let gap = top.total_points - bottom.total_points;
        if gap > LARGE_POINT_GAP_ABOVE {
            insights.push(LeagueInsight::new(
                InsightKind::Negative,
                "Large Point Gap",
                format!(
                    "There's a {} point difference between first and last place, indicating low competitiveness.",
                    format_points(gap)
                ),
            ));
        } else if gap < COMPETITIVE_GAP_BELOW {
            insights.push(LeagueInsight::new(
                InsightKind::Positive,
                "Competitive League",
                format!(
                    "Only {} points separate first and last place. This is a very competitive league!",
                    format_points(gap)
                ),
            ));
        }
    }

    let active_traders = ranked
        .iter()
        .filter(|team| team.needs.len() < ACTIVE_TRADER_NEEDS_BELOW)
        .count();
    // active > n / 2 without integer truncation.
    if active_traders * 2 > team_count {
        insights.push(LeagueInsight::new(
            InsightKind::Positive,
            "Active Trading Environment",
            format!("{active_traders} teams have well-rounded rosters, indicating active trading."),
        ));
    }

    let roster_positions = match league.roster_positions.as_deref() {
        Some(slots) if !slots.is_empty() => slots.len().to_string(),
        _ => "standard".to_string(),
    };
    insights.push(LeagueInsight::new(
        InsightKind::Info,
        "League Format",
        format!("{team_count}-team league with {roster_positions} roster positions."),
    ));

    insights
}

/// Balance metric: `max(0, 100 - stddev / mean * 100)` over team totals,
/// using the population standard deviation.
///
/// Returns `None` for an empty league or a non-positive mean, where the
/// coefficient of variation is undefined.
pub fn competitive_score(totals: &[f64]) -> Option<f64> {
    if totals.is_empty() {
        return None;
    }
    let n = totals.len() as f64;
    let mean = totals.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return None;
    }
    let variance = totals.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n;
    Some((100.0 - variance.sqrt() / mean * 100.0).max(0.0))
}

/// Render a point total without a trailing ".00".
pub(crate) fn format_points(points: f64) -> String {
    let text = format!("{points:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
