use std::collections::BTreeMap;

use crate::core::{Card, Money};

use super::position::Position;
use super::street::Street;

/// Cards a player holds as of one street. Stud deals some of them face up.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HoleCards {
    pub open: Vec<Card>,
    pub closed: Vec<Card>,
}

impl HoleCards {
    pub fn len(&self) -> usize {
        self.open.len() + self.closed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty() && self.closed.is_empty()
    }
}

/// A seated player with chips and everything that happened to them.
///
/// `bets` keeps the live money per street in the order it went in. Antes
/// and the dead part of blinds are kept under [`Street::BlindsAntes`].
///
/// A player `sitting_out` still owns the seat and whatever they posted.
/// They only count as dealt in when they took part in the hand.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub seat: u8,
    pub name: String,
    pub starting_stack: Money,
    pub stack: Money,
    pub bets: BTreeMap<Street, Vec<Money>>,
    pub hole_cards: BTreeMap<Street, HoleCards>,
    pub shown_cards: Vec<Card>,
    pub position: Option<Position>,

    pub posted_ante: bool,
    pub brought_in: bool,
    pub sitting_out: bool,
    pub dealt: bool,
    pub folded: bool,
    pub shown: bool,
    pub mucked: bool,
    pub all_in: bool,

    pub collected: Money,
    pub returned: Money,
}

impl Player {
    pub fn new(seat: u8, name: &str, stack: Money) -> Self {
        Player {
            seat,
            name: name.to_string(),
            starting_stack: stack,
            stack,
            bets: BTreeMap::new(),
            hole_cards: BTreeMap::new(),
            shown_cards: Vec::new(),
            position: None,
            posted_ante: false,
            brought_in: false,
            sitting_out: false,
            dealt: false,
            folded: false,
            shown: false,
            mucked: false,
            all_in: false,
            collected: Money::ZERO,
            returned: Money::ZERO,
        }
    }

    /// What this player has in front of them on `street`.
    pub fn street_commitment(&self, street: Street) -> Money {
        self.bets
            .get(&street)
            .map(|b| b.iter().sum())
            .unwrap_or(Money::ZERO)
    }

    /// Everything that left the stack, live and dead.
    pub fn total_bet(&self) -> Money {
        self.bets.values().flatten().sum()
    }

    /// Whether the player takes a place in the position ring.
    pub fn in_rotation(&self) -> bool {
        !self.sitting_out || self.dealt
    }

    /// Winnings minus what was put in and not given back.
    pub fn net(&self) -> Money {
        self.collected + self.returned - self.total_bet()
    }

    /// All cards known for this player, latest street wins. Shown cards
    /// fill in what was hidden.
    pub fn known_cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self
            .hole_cards
            .values()
            .next_back()
            .map(|h| h.closed.iter().chain(h.open.iter()).copied().collect())
            .unwrap_or_default();
        for c in &self.shown_cards {
            if !cards.contains(c) {
                cards.push(*c);
            }
        }
        cards
    }
}
