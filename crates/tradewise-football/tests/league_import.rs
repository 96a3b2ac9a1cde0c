// Integration tests: saved Sleeper snapshot -> adapter -> league analysis,
// with the catalog fixture overlaying player values.

use std::path::Path;

use tradewise_core::league::InsightKind;
use tradewise_core::roster::RosterLabel;
use tradewise_core::{analyze_league, analyze_trade, Position, TradeSide};
use tradewise_football::catalog::PlayerCatalog;
use tradewise_football::sleeper::{descriptor_from_snapshot, profiles_from_snapshot, UNRANKED_TIER};
use tradewise_football::source::{FileLeagueSource, LeagueSource, SourceError};

/// Fixture directory path (relative to the crate root, which is the cwd for
/// `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn catalog() -> PlayerCatalog {
    PlayerCatalog::load_csv(&Path::new(FIXTURES).join("players.csv")).expect("catalog fixture")
}

fn snapshots() -> FileLeagueSource {
    FileLeagueSource::new(Path::new(FIXTURES).join("snapshots"))
}

#[tokio::test]
async fn snapshot_profiles_every_roster() {
    let snapshot = snapshots().fetch_league("777").await.unwrap();
    let catalog = catalog();

    let profiles = profiles_from_snapshot(&snapshot, Some(&catalog));
    assert_eq!(profiles.len(), 3);

    let gurus = &profiles[0];
    assert_eq!(gurus.name, "Gridiron Gurus");
    assert_eq!(gurus.owner, "gridiron_guru");
    assert!((gurus.total_points - 1480.5).abs() < 1e-9);
    assert_eq!(gurus.wins, 9);
    // Linebacker and the id missing from the directory are dropped.
    assert_eq!(gurus.players.len(), 8);
    assert!(gurus.strengths.contains(&RosterLabel::strength(Position::Quarterback)));
    assert!(gurus.strengths.contains(&RosterLabel::strength(Position::RunningBack)));
    assert!(gurus.has_need(Position::WideReceiver));
    assert!(gurus.has_need(Position::TightEnd));

    let mahomes = gurus.players.iter().find(|p| p.id == "4046").unwrap();
    assert_eq!(mahomes.value, 92);
    assert_eq!(mahomes.tier, 1);

    let raiders = &profiles[1];
    assert_eq!(raiders.name, "air_raider");
    let chiefs = raiders.players.iter().find(|p| p.id == "KC").unwrap();
    assert_eq!(chiefs.name, "Kansas City Chiefs");
    assert_eq!(chiefs.position, Position::Defense);

    let orphans = &profiles[2];
    assert_eq!(orphans.name, "Team 3");
    assert_eq!(orphans.owner, "Unknown");
    let bijan = orphans.players.iter().find(|p| p.id == "9509").unwrap();
    assert_eq!(bijan.value, 0);
    assert_eq!(bijan.tier, UNRANKED_TIER);
}

#[tokio::test]
async fn snapshot_league_analysis() {
    let snapshot = snapshots().fetch_league("777").await.unwrap();
    let profiles = profiles_from_snapshot(&snapshot, None);
    let descriptor = descriptor_from_snapshot(&snapshot);

    assert_eq!(descriptor.name, "Sunday Funday");
    assert_eq!(descriptor.scoring.as_deref(), Some("ppr"));

    let analysis = analyze_league(&profiles, &descriptor);

    assert_eq!(analysis.team_count, 3);
    assert_eq!(analysis.trade_opportunities(), 1);
    let rec = &analysis.trade_recommendations[0];
    assert_eq!(rec.team1, "Gridiron Gurus");
    assert_eq!(rec.team2, "air_raider");
    assert_eq!(rec.confidence, 90);

    // Gap of 180.5 falls in the silent band.
    let titles: Vec<&str> = analysis.insights.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Active Trading Environment", "League Format"]);
    assert_eq!(analysis.insights[0].kind, InsightKind::Positive);
    assert_eq!(
        analysis.insights[1].description,
        "3-team league with 9 roster positions."
    );

    assert_eq!(analysis.competitive_display(), Some(95));
}

#[tokio::test]
async fn save_and_reload_snapshot() {
    let original = snapshots().fetch_league("777").await.unwrap();

    let dir = std::env::temp_dir().join("tradewise_snapshot_roundtrip");
    let _ = tokio::fs::remove_dir_all(&dir).await;
    let store = FileLeagueSource::new(&dir);
    let path = store.save(&original).await.unwrap();
    assert!(path.ends_with("777.json"));

    let reloaded = store.fetch_league("777").await.unwrap();
    assert_eq!(reloaded.rosters.len(), original.rosters.len());
    assert_eq!(reloaded.players.len(), original.players.len());

    let _ = tokio::fs::remove_dir_all(&dir).await;
}

#[tokio::test]
async fn unknown_league_id() {
    let err = snapshots().fetch_league("123").await.unwrap_err();
    assert!(matches!(err, SourceError::LeagueNotFound(_)));
}

#[test]
fn catalog_backed_trade() {
    let catalog = catalog();
    let side = |id: &str, name: &str, ids: &[&str]| {
        TradeSide::with_players(
            id,
            name,
            ids.iter().map(|pid| catalog.get(pid).cloned().unwrap()),
        )
    };

    let sides = vec![
        side("1", "Team A", &["mccaffrey", "kelce"]),
        side("2", "Team B", &["jefferson", "barkley"]),
    ];
    let analysis = analyze_trade(&sides).unwrap();

    // 190 vs 187
    assert_eq!(analysis.value_difference, 3);
    assert_eq!(analysis.winner(), Some("Team A"));
    assert_eq!(analysis.fairness_display(), 98);
    let text: Vec<String> = analysis.recommendations.iter().map(|r| r.to_string()).collect();
    assert_eq!(
        text,
        vec![
            "Team A lacks QB depth after trade.",
            "Team A lacks WR depth after trade.",
            "Team B lacks QB depth after trade.",
            "This appears to be a very fair trade for both sides.",
        ]
    );
}
