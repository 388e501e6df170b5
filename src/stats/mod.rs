//! Per hand statistics derived from a finalized [`crate::hand::Hand`].
//!
//! The engine only reads the hand. Street 0 stats (voluntary money, raise
//! levels, steals) and per street stats (seen streets, continuation bets,
//! check-raises, showdowns) live in separate passes over the recorded
//! actions.

/// Output records.
mod record;
/// Export `HandStats` and `PlayerHandStats`
pub use self::record::{HandStats, PlayerHandStats, STREETS};

mod preflop;
mod streets;

/// The `compute` entry point.
mod engine;
/// Export `compute`
pub use self::engine::compute;
