//! Site adapters shipped with the crate.

/// PokerStars hand histories.
mod pokerstars;
/// Export `PokerStarsAdapter`
pub use self::pokerstars::PokerStarsAdapter;

#[cfg(test)]
pub(crate) mod samples;
