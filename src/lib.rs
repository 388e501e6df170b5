//! Poker hand history import.
//!
//! This crate reads the text hand histories that poker sites write,
//! rebuilds each hand with exact money accounting and derives the per
//! player statistics a tracker shows.
//!
//! - [`core`] cards and fixed point [`core::Money`].
//! - [`hand`] the hand model and its pot ledger: main and side pots,
//!   uncalled bets and rake.
//! - [`parse`] the site adapter framework, the PokerStars adapter and the
//!   [`parse::Importer`] driver.
//! - [`stats`] VPIP, preflop raise levels, steals, continuation bets and
//!   the rest of the per hand stats.

pub mod core;
pub mod hand;
pub mod parse;
pub mod stats;
