// League analysis: ranks teams, matches complementary trades, summarises
// league balance.

pub mod insights;
pub mod matcher;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::roster::RosterProfile;

pub use insights::{competitive_score, generate_insights, InsightKind, LeagueInsight};
pub use matcher::{match_trades, TradeRecommendation};

/// Coarse league settings supplied alongside the rosters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueDescriptor {
    pub name: String,
    #[serde(default)]
    pub season: Option<String>,
    /// Scoring format label (e.g. "ppr"), when the platform reports one.
    #[serde(default)]
    pub scoring: Option<String>,
    /// Roster slot configuration; `None` means the platform default.
    #[serde(default)]
    pub roster_positions: Option<Vec<String>>,
}

/// Everything derived from one league snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueAnalysis {
    pub team_count: usize,
    /// Teams ranked by total points, highest first.
    pub teams: Vec<RosterProfile>,
    /// Balance score at full precision; `None` when undefined.
    pub competitive_score: Option<f64>,
    pub trade_recommendations: Vec<TradeRecommendation>,
    pub insights: Vec<LeagueInsight>,
}

impl LeagueAnalysis {
    /// Competitive score rounded to a whole percentage.
    pub fn competitive_display(&self) -> Option<u32> {
        self.competitive_score.map(|s| s.round() as u32)
    }

    pub fn trade_opportunities(&self) -> usize {
        self.trade_recommendations.len()
    }
}

/// Analyze a league snapshot.
///
/// Profiles are ranked by total points (descending, ties keep input order)
/// and both the trade matcher and the insight rules run on that ranking.
pub fn analyze_league(profiles: &[RosterProfile], league: &LeagueDescriptor) -> LeagueAnalysis {
    let mut teams = profiles.to_vec();
    teams.sort_by(|a, b| b.total_points.total_cmp(&a.total_points));

    let totals: Vec<f64> = teams.iter().map(|t| t.total_points).collect();
    let competitive_score = competitive_score(&totals);
    let trade_recommendations = match_trades(&teams);
    let insights = generate_insights(&teams, league);

    debug!(
        league = %league.name,
        teams = teams.len(),
        recommendations = trade_recommendations.len(),
        "league analyzed"
    );

    LeagueAnalysis {
        team_count: teams.len(),
        teams,
        competitive_score,
        trade_recommendations,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Player, Position};
    use crate::roster::{profile_roster, TeamInfo};

    fn players(counts: &[(Position, usize)]) -> Vec<Player> {
        counts
            .iter()
            .flat_map(|&(position, count)| {
                (0..count).map(move |i| Player {
                    id: format!("{position}{i}"),
                    name: format!("{position} {i}"),
                    team: "TST".into(),
                    position,
                    adp: 30.0,
                    projection: 180.0,
                    current_performance: None,
                    value: 60,
                    tier: 2,
                    bye: 6,
                    injury: None,
                })
            })
            .collect()
    }

    fn team(name: &str, points: f64) -> TeamInfo {
        TeamInfo {
            id: name.to_lowercase(),
            name: name.into(),
            owner: format!("{name} owner"),
            total_points: points,
            wins: 0,
            losses: 0,
        }
    }

    #[test]
    fn ranks_teams_before_matching() {
        let rb_heavy = players(&[
            (Position::Quarterback, 2),
            (Position::RunningBack, 4),
            (Position::WideReceiver, 2),
            (Position::TightEnd, 2),
        ]);
        let wr_heavy = players(&[
            (Position::Quarterback, 2),
            (Position::RunningBack, 1),
            (Position::WideReceiver, 6),
            (Position::TightEnd, 2),
        ]);

        // Lower-scoring team supplied first; ranking flips the pair.
        let profiles = vec![
            profile_roster(team("Runners", 1000.0), &rb_heavy),
            profile_roster(team("Catchers", 1050.0), &wr_heavy),
        ];

        let analysis = analyze_league(&profiles, &LeagueDescriptor::default());

        assert_eq!(analysis.team_count, 2);
        assert_eq!(analysis.teams[0].name, "Catchers");
        assert_eq!(analysis.trade_opportunities(), 1);
        let rec = &analysis.trade_recommendations[0];
        assert_eq!(rec.team1, "Catchers");
        assert_eq!(rec.team2, "Runners");
        assert_eq!(rec.confidence, 80);

        // Gap 50 -> competitive; both teams have one need -> active.
        let titles: Vec<&str> = analysis.insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Competitive League", "Active Trading Environment", "League Format"]
        );
        assert_eq!(analysis.competitive_display(), Some(98));
    }

    #[test]
    fn ties_keep_input_order() {
        let roster = players(&[(Position::Quarterback, 1)]);
        let profiles = vec![
            profile_roster(team("First", 900.0), &roster),
            profile_roster(team("Second", 900.0), &roster),
        ];
        let analysis = analyze_league(&profiles, &LeagueDescriptor::default());
        assert_eq!(analysis.teams[0].name, "First");
        assert_eq!(analysis.teams[1].name, "Second");
    }

    #[test]
    fn empty_league_is_handled() {
        let analysis = analyze_league(&[], &LeagueDescriptor::default());
        assert_eq!(analysis.team_count, 0);
        assert_eq!(analysis.competitive_score, None);
        assert!(analysis.trade_recommendations.is_empty());
        assert_eq!(analysis.insights.len(), 1);
    }
}
