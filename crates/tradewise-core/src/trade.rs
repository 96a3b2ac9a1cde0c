// Trade fairness analysis for proposals between two or more teams.
//
// Each side is reduced to its total value and position breakdown; the spread
// between the richest and poorest side, measured against the richest side,
// yields a 0-100 fairness score plus a short list of advisories.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::player::{Player, Position};
use crate::valuation::{aggregate, ValueSummary};

// ---------------------------------------------------------------------------
// Policy thresholds
// ---------------------------------------------------------------------------

/// Scores below this flag the trade as favouring the winner.
pub const FAVORS_WINNER_BELOW: f64 = 70.0;

/// Absolute value gaps above this get their own warning.
pub const LARGE_GAP_ABOVE: u32 = 50;

/// Scores at or above this are confirmed as fair.
pub const FAIR_TRADE_AT: f64 = 85.0;

/// Positions checked for depth on every side with more than one player.
const DEPTH_CHECK_POSITIONS: [Position; 3] = [
    Position::Quarterback,
    Position::RunningBack,
    Position::WideReceiver,
];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// The proposal cannot be scored yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsufficientData {
    #[error("a trade needs at least two sides, got {count}")]
    TooFewSides { count: usize },

    #[error("trade side `{side}` has no players")]
    EmptySide { side: String },

    #[error("no side in the trade carries any value")]
    NoValue,
}

// ---------------------------------------------------------------------------
// Trade side
// ---------------------------------------------------------------------------

/// One team's contribution to a trade: the players it gives up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSide {
    pub id: String,
    pub name: String,
    players: Vec<Player>,
}

impl TradeSide {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        TradeSide {
            id: id.into(),
            name: name.into(),
            players: Vec::new(),
        }
    }

    /// Build a side from a player list. Repeated player ids are dropped.
    pub fn with_players(
        id: impl Into<String>,
        name: impl Into<String>,
        players: impl IntoIterator<Item = Player>,
    ) -> Self {
        let mut side = TradeSide::new(id, name);
        for player in players {
            side.add_player(player);
        }
        side
    }

    /// Add a player to the side.
    ///
    /// Returns `false` (and leaves the side unchanged) if a player with the
    /// same id is already included.
    pub fn add_player(&mut self, player: Player) -> bool {
        if self.players.iter().any(|p| p.id == player.id) {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Remove a player by id, returning it if it was part of the side.
    pub fn remove_player(&mut self, player_id: &str) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == player_id)?;
        Some(self.players.remove(idx))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn total_value(&self) -> u32 {
        aggregate(&self.players).total_value
    }
}

// ---------------------------------------------------------------------------
// Analysis output
// ---------------------------------------------------------------------------

/// Aggregated totals for one side of the trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideValuation {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub summary: ValueSummary,
}

/// An advisory attached to a trade analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TradeAdvice {
    /// The score is low enough that one side clearly comes out ahead.
    FavorsWinner { winner: String },
    /// The absolute value gap is large regardless of the ratio.
    LargeValueGap { difference: u32 },
    /// A multi-player side sends away no one at a core position.
    ThinPosition { side: String, position: Position },
    FairTrade,
}

impl fmt::Display for TradeAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAdvice::FavorsWinner { winner } => write!(
                f,
                "Trade heavily favors {winner}. Consider adding value to balance."
            ),
            TradeAdvice::LargeValueGap { difference } => write!(
                f,
                "Large value gap ({difference} points). Review player valuations."
            ),
            TradeAdvice::ThinPosition { side, position } => {
                write!(f, "{side} lacks {position} depth after trade.")
            }
            TradeAdvice::FairTrade => {
                write!(f, "This appears to be a very fair trade for both sides.")
            }
        }
    }
}

/// Three-band reading of a fairness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FairnessGrade {
    /// Score >= 85.
    Fair,
    /// 70 <= score < 85.
    Questionable,
    /// Score < 70.
    Lopsided,
}

impl FairnessGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= FAIR_TRADE_AT {
            FairnessGrade::Fair
        } else if score >= FAVORS_WINNER_BELOW {
            FairnessGrade::Questionable
        } else {
            FairnessGrade::Lopsided
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FairnessGrade::Fair => "FAIR",
            FairnessGrade::Questionable => "QUESTIONABLE",
            FairnessGrade::Lopsided => "LOPSIDED",
        }
    }
}

/// Result of scoring a trade proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeAnalysis {
    /// Per-side totals, in the order the sides were supplied.
    pub sides: Vec<SideValuation>,
    /// 0-100 at full precision. Use `fairness_display` for presentation.
    pub fairness_score: f64,
    /// First side holding the maximum total.
    pub winner: String,
    /// First side holding the minimum total.
    pub loser: String,
    pub value_difference: u32,
    pub recommendations: Vec<TradeAdvice>,
}

impl TradeAnalysis {
    /// Fairness score rounded to a whole percentage.
    pub fn fairness_display(&self) -> u32 {
        self.fairness_score.round() as u32
    }

    pub fn grade(&self) -> FairnessGrade {
        FairnessGrade::from_score(self.fairness_score)
    }

    /// Every side contributes the same total.
    pub fn is_even(&self) -> bool {
        self.value_difference == 0
    }

    /// The side coming out ahead, or `None` when all sides tie.
    pub fn winner(&self) -> Option<&str> {
        (!self.is_even()).then_some(self.winner.as_str())
    }

    /// The side giving up the least, or `None` when all sides tie.
    pub fn loser(&self) -> Option<&str> {
        (!self.is_even()).then_some(self.loser.as_str())
    }
}

// ---------------------------------------------------------------------------
// Core computation
// ---------------------------------------------------------------------------

/// Score a trade between two or more sides.
///
/// Fails with `InsufficientData` when fewer than two sides are supplied, any
/// side is empty, or no side carries value.
pub fn analyze_trade(sides: &[TradeSide]) -> Result<TradeAnalysis, InsufficientData> {
    if sides.len() < 2 {
        return Err(InsufficientData::TooFewSides { count: sides.len() });
    }
    if let Some(empty) = sides.iter().find(|s| s.is_empty()) {
        return Err(InsufficientData::EmptySide {
            side: empty.name.clone(),
        });
    }

    let valuations: Vec<SideValuation> = sides
        .iter()
        .map(|side| SideValuation {
            id: side.id.clone(),
            name: side.name.clone(),
            summary: aggregate(side.players()),
        })
        .collect();

    let max_value = valuations
        .iter()
        .map(|v| v.summary.total_value)
        .max()
        .unwrap_or(0);
    let min_value = valuations
        .iter()
        .map(|v| v.summary.total_value)
        .min()
        .unwrap_or(0);

    if max_value == 0 {
        return Err(InsufficientData::NoValue);
    }

    let value_difference = max_value - min_value;
    let fairness_score =
        (100.0 - (value_difference as f64 / max_value as f64 * 100.0)).max(0.0);

    // Both lookups succeed because max/min came from these same totals.
    let winner = valuations
        .iter()
        .find(|v| v.summary.total_value == max_value)
        .map(|v| v.name.clone())
        .unwrap_or_default();
    let loser = valuations
        .iter()
        .find(|v| v.summary.total_value == min_value)
        .map(|v| v.name.clone())
        .unwrap_or_default();

    let recommendations =
        build_recommendations(&valuations, fairness_score, value_difference, &winner);

    debug!(
        sides = valuations.len(),
        fairness_score,
        value_difference,
        "trade analyzed"
    );

    Ok(TradeAnalysis {
        sides: valuations,
        fairness_score,
        winner,
        loser,
        value_difference,
        recommendations,
    })
}

/// Advisories in check order: lopsided score, large gap, per-side depth,
/// fair-trade confirmation.
fn build_recommendations(
    valuations: &[SideValuation],
    fairness_score: f64,
    value_difference: u32,
    winner: &str,
) -> Vec<TradeAdvice> {
    let mut advice = Vec::new();

    if fairness_score < FAVORS_WINNER_BELOW {
        advice.push(TradeAdvice::FavorsWinner {
            winner: winner.to_string(),
        });
    }

    if value_difference > LARGE_GAP_ABOVE {
        advice.push(TradeAdvice::LargeValueGap {
            difference: value_difference,
        });
    }

    for side in valuations.iter().filter(|v| v.summary.player_count > 1) {
        for position in DEPTH_CHECK_POSITIONS {
            if side.summary.count_at(position) == 0 {
                advice.push(TradeAdvice::ThinPosition {
                    side: side.name.clone(),
                    position,
                });
            }
        }
    }

    if fairness_score >= FAIR_TRADE_AT {
        advice.push(TradeAdvice::FairTrade);
    }

    advice
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
