// Report rendering: plain-text views of trade and league analyses, player
// listings, and the timestamped JSON envelope.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tradewise_core::league::{InsightKind, LeagueAnalysis, LeagueDescriptor};
use tradewise_core::trade::{InsufficientData, TradeAnalysis};
use tradewise_core::roster::RosterLabel;
use tradewise_core::{Player, RosterProfile};
use tradewise_football::sleeper::SleeperLeague;

/// Shown in place of an analysis when the proposal is incomplete.
pub const INCOMPLETE_TRADE_PROMPT: &str = "Add players to teams to see trade analysis";

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Wrapper written around every JSON report.
#[derive(Debug, Serialize)]
pub struct Envelope<'a, T: Serialize> {
    pub kind: &'static str,
    pub generated_at: DateTime<Utc>,
    pub data: &'a T,
}

/// Serialize `data` inside an envelope stamped with the current time.
pub fn to_json<T: Serialize>(kind: &'static str, data: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Envelope {
        kind,
        generated_at: Utc::now(),
        data,
    })
}

/// League analysis together with the league it describes.
#[derive(Debug, Serialize)]
pub struct LeagueReport<'a> {
    pub league: &'a LeagueDescriptor,
    #[serde(flatten)]
    pub analysis: &'a LeagueAnalysis,
}

// ---------------------------------------------------------------------------
// Trade
// ---------------------------------------------------------------------------

pub fn render_trade(analysis: &TradeAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Trade Analysis");
    let _ = writeln!(out, "==============");

    let width = analysis.sides.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for side in &analysis.sides {
        let positions: Vec<String> = side
            .summary
            .positions
            .iter()
            .map(|(pos, n)| format!("{pos} {n}"))
            .collect();
        let _ = writeln!(
            out,
            "  {:<width$}  {:>4}  ({} players: {})",
            side.name,
            side.summary.total_value,
            side.summary.player_count,
            positions.join(", "),
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Fairness: {}% ({})",
        analysis.fairness_display(),
        analysis.grade().label()
    );
    match analysis.winner() {
        Some(winner) => {
            let _ = writeln!(
                out,
                "Winner: {} (+{} value over {})",
                winner, analysis.value_difference, analysis.loser
            );
        }
        None => {
            let _ = writeln!(out, "Even trade: no side gains value");
        }
    }

    if !analysis.recommendations.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Recommendations:");
        for advice in &analysis.recommendations {
            let _ = writeln!(out, "  - {advice}");
        }
    }
    out
}

/// Short explanation for a proposal that could not be scored.
pub fn render_incomplete(reason: &InsufficientData) -> String {
    format!("{INCOMPLETE_TRADE_PROMPT} ({reason}).\n")
}

// ---------------------------------------------------------------------------
// League
// ---------------------------------------------------------------------------

pub fn render_league(league: &LeagueDescriptor, analysis: &LeagueAnalysis) -> String {
    let mut out = String::new();

    let details: Vec<&str> = [league.season.as_deref(), league.scoring.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if details.is_empty() {
        let _ = writeln!(out, "League: {}", league.name);
    } else {
        let _ = writeln!(out, "League: {} ({})", league.name, details.join(", "));
    }

    let competitive = analysis
        .competitive_display()
        .map(|score| score.to_string())
        .unwrap_or_else(|| "n/a".into());
    let _ = writeln!(
        out,
        "Teams: {}  Competitive score: {}  Trade opportunities: {}",
        analysis.team_count,
        competitive,
        analysis.trade_opportunities()
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Standings");
    for (rank, team) in analysis.teams.iter().enumerate() {
        let _ = writeln!(out, "  {:>2}. {}", rank + 1, standing_line(team));
    }

    if !analysis.trade_recommendations.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Trade Ideas");
        for rec in &analysis.trade_recommendations {
            let _ = writeln!(
                out,
                "  {} <-> {} ({}% confidence)",
                rec.team1, rec.team2, rec.confidence
            );
            let _ = writeln!(out, "    {} sends: {}", rec.team1, rec.team1_sends().join(", "));
            let _ = writeln!(out, "    {} sends: {}", rec.team2, rec.team2_sends().join(", "));
            let _ = writeln!(out, "    {}", rec.rationale);
        }
    }

    if !analysis.insights.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Insights");
        for insight in &analysis.insights {
            let marker = match insight.kind {
                InsightKind::Positive => '+',
                InsightKind::Negative => '-',
                InsightKind::Info => 'i',
            };
            let _ = writeln!(out, "  [{marker}] {}: {}", insight.title, insight.description);
        }
    }
    out
}

fn join_labels(labels: &[RosterLabel]) -> String {
    if labels.is_empty() {
        return "none".into();
    }
    labels.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(", ")
}

fn standing_line(team: &RosterProfile) -> String {
    format!(
        "{} ({})  {:.1} pts  {}-{}  strengths: {}  needs: {}",
        team.name,
        team.owner,
        team.total_points,
        team.wins,
        team.losses,
        join_labels(&team.strengths),
        join_labels(&team.needs),
    )
}

// ---------------------------------------------------------------------------
// Players and leagues
// ---------------------------------------------------------------------------

pub fn render_players(players: &[&Player]) -> String {
    if players.is_empty() {
        return "No players found.\n".into();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:<3} {:<4} {:>5} {:>4} {:>6} {:>6} {:>7}  {}",
        "Name", "Pos", "Team", "Value", "Tier", "ADP", "Proj", "Delta", "Status"
    );
    for p in players {
        let delta = p
            .performance_delta()
            .map(|d| format!("{d:+.1}"))
            .unwrap_or_else(|| "-".into());
        let status = match p.injury {
            Some(status) if !p.is_healthy() => status.label(),
            _ => "",
        };
        let _ = writeln!(
            out,
            "{:<24} {:<3} {:<4} {:>5} {:>4} {:>6.1} {:>6.1} {:>7}  {}",
            p.name,
            p.position.display_str(),
            p.team,
            p.value,
            p.tier,
            p.adp,
            p.projection,
            delta,
            status
        );
    }
    out
}

pub fn render_leagues(username: &str, season: &str, leagues: &[SleeperLeague]) -> String {
    if leagues.is_empty() {
        return format!("{username} has no {season} leagues.\n");
    }

    let mut out = String::new();
    let _ = writeln!(out, "{username}'s {season} leagues");
    for league in leagues {
        let teams = league
            .total_rosters
            .map(|n| format!("{n} teams"))
            .unwrap_or_else(|| "? teams".into());
        let _ = writeln!(out, "  {:<20} {}  ({})", league.league_id, league.name, teams);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradewise_core::league::analyze_league;
    use tradewise_core::roster::TeamInfo;
    use tradewise_core::trade::analyze_trade;
    use tradewise_core::{profile_roster, Position, TradeSide};

    fn make_player(id: &str, position: Position, value: u32) -> Player {
        Player {
            id: id.into(),
            name: format!("Player {id}"),
            team: "KC".into(),
            position,
            adp: 10.0,
            projection: 200.0,
            current_performance: None,
            value,
            tier: 1,
            bye: 10,
            injury: None,
        }
    }

    fn make_team(id: &str, points: f64, positions: &[Position]) -> RosterProfile {
        let players: Vec<Player> = positions
            .iter()
            .enumerate()
            .map(|(i, &pos)| make_player(&format!("{id}-{i}"), pos, 50))
            .collect();
        profile_roster(
            TeamInfo {
                id: id.into(),
                name: format!("Team {id}"),
                owner: format!("owner{id}"),
                total_points: points,
                wins: 5,
                losses: 3,
            },
            &players,
        )
    }

    #[test]
    fn trade_text_names_winner_and_advice() {
        let sides = vec![
            TradeSide::with_players(
                "1",
                "Sharks",
                [
                    make_player("a", Position::RunningBack, 100),
                    make_player("b", Position::WideReceiver, 75),
                ],
            ),
            TradeSide::with_players("2", "Jets", [make_player("c", Position::TightEnd, 110)]),
        ];
        let analysis = analyze_trade(&sides).unwrap();
        let text = render_trade(&analysis);

        assert!(text.contains("Fairness: 63% (LOPSIDED)"));
        assert!(text.contains("Winner: Sharks (+65 value over Jets)"));
        assert!(text.contains("  - Trade heavily favors Sharks. Consider adding value to balance."));
        assert!(text.contains("Sharks   175  (2 players: RB 1, WR 1)"));
    }

    #[test]
    fn even_trade_has_no_winner_line() {
        let sides = vec![
            TradeSide::with_players("1", "A", [make_player("a", Position::Quarterback, 80)]),
            TradeSide::with_players("2", "B", [make_player("b", Position::Quarterback, 80)]),
        ];
        let text = render_trade(&analyze_trade(&sides).unwrap());
        assert!(text.contains("Even trade"));
        assert!(!text.contains("Winner:"));
    }

    #[test]
    fn incomplete_trade_prompt() {
        let text = render_incomplete(&InsufficientData::TooFewSides { count: 1 });
        assert!(text.starts_with(INCOMPLETE_TRADE_PROMPT));
    }

    #[test]
    fn league_text_sections() {
        use Position::*;
        let teams = vec![
            make_team("1", 1500.0, &[RunningBack, RunningBack, RunningBack, RunningBack, WideReceiver]),
            make_team("2", 1450.0, &[RunningBack, WideReceiver, WideReceiver, WideReceiver, WideReceiver, WideReceiver]),
        ];
        let league = LeagueDescriptor {
            name: "Test League".into(),
            season: Some("2024".into()),
            scoring: Some("ppr".into()),
            roster_positions: None,
        };
        let analysis = analyze_league(&teams, &league);
        let text = render_league(&league, &analysis);

        assert!(text.starts_with("League: Test League (2024, ppr)\n"));
        assert!(text.contains("Trade opportunities: 1"));
        assert!(text.contains("   1. Team 1 (owner1)  1500.0 pts  5-3"));
        assert!(text.contains("  Team 1 <-> Team 2 (80% confidence)"));
        assert!(text.contains("    Team 1 sends: RB Depth Player"));
        assert!(text.contains("Insights"));
    }

    #[test]
    fn player_table_shows_delta_and_injury() {
        let mut p = make_player("k", Position::TightEnd, 85);
        p.name = "Travis Kelce".into();
        p.current_performance = Some(205.0);
        p.projection = 220.0;
        p.injury = Some(tradewise_core::InjuryStatus::Questionable);

        let text = render_players(&[&p]);
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("Travis Kelce"));
        assert!(row.contains("-15.0"));
        assert!(row.ends_with("questionable"));

        assert_eq!(render_players(&[]), "No players found.\n");
    }

    #[test]
    fn json_envelope_carries_kind_and_timestamp() {
        let league = LeagueDescriptor {
            name: "Empty".into(),
            ..Default::default()
        };
        let analysis = analyze_league(&[], &league);
        let json = to_json(
            "league",
            &LeagueReport {
                league: &league,
                analysis: &analysis,
            },
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "league");
        assert!(value["generated_at"].is_string());
        assert_eq!(value["data"]["league"]["name"], "Empty");
        assert_eq!(value["data"]["team_count"], 0);
    }
}
