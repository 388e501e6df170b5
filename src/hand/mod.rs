//! The canonical hand model.
//!
//! A [`Hand`] is built once per hand history text through its `add_*`
//! callbacks, street by street. Every chip goes through the [`Pot`] ledger
//! so money is conserved at each step. [`Hand::finalize`] settles the main
//! and side pots, returns uncalled bets and works out the rake. After that
//! the hand is read only and can be turned into a [`HandRecord`] or handed
//! to the stats engine.

/// Game family, category, limit and stakes.
mod game_type;
/// Export `GameType` and the enums describing it
pub use self::game_type::{
    Category, Currency, GameBase, GameType, LimitType, TableKind, TournamentInfo,
};

/// Streets per game family.
mod street;
/// Export `Street`
pub use self::street::Street;

/// Observed actions and raise normalization.
mod action;
/// Export `Action`, `ActionKind` and the raise types
pub use self::action::{Action, ActionKind, BlindType, RaiseAmounts, RaiseIdiom};

mod errors;
pub use self::errors::{HandError, PotError};

mod player;
pub use self::player::{HoleCards, Player};

/// Button and bring-in relative positions.
mod position;
pub use self::position::{assign_positions, Position};

/// Money ledger with main and side pot settlement.
mod pot;
/// Export `Pot` and its settlement
pub use self::pot::{Pot, PotLayer, PotSettlement};

#[allow(clippy::module_inception)]
mod hand;
/// Export `Hand`
pub use self::hand::{Hand, StreetState};

/// Flat output record of a finished hand.
mod record;
pub use self::record::{ActionRecord, BoardRecord, HandRecord, PlayerRecord};
