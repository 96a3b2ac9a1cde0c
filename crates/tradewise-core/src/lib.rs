// Library root for the trade valuation and matching engine.
//
// Everything in this crate is synchronous and side-effect free: callers hand
// in fully materialized players, trade sides and roster profiles and get an
// analysis back.

pub mod league;
pub mod player;
pub mod roster;
pub mod trade;
pub mod valuation;

pub use league::{analyze_league, LeagueAnalysis, LeagueDescriptor};
pub use player::{InjuryStatus, Player, Position};
pub use roster::{profile_roster, RosterProfile, TeamInfo};
pub use trade::{analyze_trade, InsufficientData, TradeAnalysis, TradeSide};
