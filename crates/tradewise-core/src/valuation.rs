// Player value aggregation: totals and positional counts for a player set.
//
// Both the trade analyzer and the roster profiler go through `aggregate`, so
// a side's total and a roster's depth chart are always counted the same way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::{Player, Position};

/// Totals for a collection of players.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSummary {
    /// Sum of every player's value.
    pub total_value: u32,
    pub player_count: usize,
    /// Number of players at each position. Absent positions have no entry.
    pub positions: BTreeMap<Position, usize>,
}

impl ValueSummary {
    /// Number of players at `position` (0 when none).
    pub fn count_at(&self, position: Position) -> usize {
        self.positions.get(&position).copied().unwrap_or(0)
    }
}

/// Aggregate value and position counts over any collection of players.
pub fn aggregate<'a, I>(players: I) -> ValueSummary
where
    I: IntoIterator<Item = &'a Player>,
{
    players
        .into_iter()
        .fold(ValueSummary::default(), |mut summary, player| {
            summary.total_value += player.value;
            summary.player_count += 1;
            *summary.positions.entry(player.position).or_insert(0) += 1;
            summary
        })
}
