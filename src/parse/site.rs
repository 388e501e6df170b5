use std::ops::Range;

use chrono::{DateTime, Utc};

use crate::core::{Card, Money};
use crate::hand::{BlindType, GameType, HoleCards, RaiseIdiom, Street, TournamentInfo};

use super::errors::ParseError;

/// Everything the header of a hand tells before any player acts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandHeader {
    pub hand_id: String,
    pub table_name: String,
    pub game_type: GameType,
    pub start_time: Option<DateTime<Utc>>,
    pub tournament: Option<TournamentInfo>,
    pub max_seats: Option<u8>,
}

/// A seat line. Players without a stack did not sit with chips and are
/// left out of the hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatInfo {
    pub seat: u8,
    pub name: String,
    pub stack: Option<Money>,
    pub sitting_out: bool,
}

/// Byte ranges of the street sections of a hand text.
///
/// `BlindsAntes` covers the preamble before the first street marker.
/// Streets the hand never reached have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreetSpans {
    spans: Vec<(Street, Range<usize>)>,
}

impl StreetSpans {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, street: Street, range: Range<usize>) {
        self.spans.push((street, range));
    }

    pub fn streets(&self) -> impl Iterator<Item = Street> + '_ {
        self.spans.iter().map(|(s, _)| *s)
    }

    pub fn contains(&self, street: Street) -> bool {
        self.spans.iter().any(|(s, _)| *s == street)
    }

    /// The slice of `text` belonging to `street`.
    pub fn text<'a>(&self, text: &'a str, street: Street) -> Option<&'a str> {
        self.spans
            .iter()
            .find(|(s, _)| *s == street)
            .and_then(|(_, r)| text.get(r.clone()))
    }
}

/// Totals printed in the summary section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatedTotals {
    pub total_pot: Option<Money>,
    pub rake: Option<Money>,
}

/// One primitive event extracted from hand text, in the shape of the hand
/// model's callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandEvent {
    Blind {
        player: String,
        blind: BlindType,
        amount: Money,
    },
    Ante {
        player: String,
        amount: Money,
    },
    BringIn {
        player: String,
        amount: Money,
    },
    Bet {
        street: Street,
        player: String,
        amount: Money,
        all_in: bool,
    },
    Call {
        street: Street,
        player: String,
        amount: Money,
        all_in: bool,
    },
    Raise {
        street: Street,
        player: String,
        idiom: RaiseIdiom,
        all_in: bool,
    },
    Complete {
        street: Street,
        player: String,
        idiom: RaiseIdiom,
        all_in: bool,
    },
    Check {
        street: Street,
        player: String,
    },
    Fold {
        street: Street,
        player: String,
    },
    Discard {
        street: Street,
        player: String,
        count: u8,
        cards: Vec<Card>,
    },
    StandsPat {
        street: Street,
        player: String,
        cards: Vec<Card>,
    },
    HoleCards {
        street: Street,
        player: String,
        cards: HoleCards,
    },
    BoardCards {
        street: Street,
        cards: Vec<Card>,
    },
    ShownCards {
        player: String,
        cards: Vec<Card>,
        mucked: bool,
    },
    CollectPot {
        player: String,
        amount: Money,
    },
}

/// Lexical rules of one site.
///
/// There is one method per extraction pass. The driver in
/// [`crate::parse::build_hand`] calls them in a fixed order and feeds the
/// events to the hand model, so an adapter never touches money itself.
/// Passes take `&self` and may be called any number of times on the same
/// text.
///
/// Adapters are `Send` so each worker thread can own one. Cached state,
/// like patterns built from player names, lives in the adapter instance
/// and is rebuilt through [`SiteAdapter::compile_player_patterns`].
pub trait SiteAdapter: Send {
    fn site_name(&self) -> &str;

    /// Cheap check that a segment is a hand of this site at all.
    fn looks_like_hand(&self, text: &str) -> bool;

    /// Game type, hand id, table and time. Fails with
    /// [`ParseError::GameTypeUnrecognized`] when the header is foreign.
    fn read_header(&self, text: &str) -> Result<HandHeader, ParseError>;

    fn read_players(&self, text: &str) -> Result<Vec<SeatInfo>, ParseError>;

    /// Rebuild patterns that depend on who is at the table.
    fn compile_player_patterns(&mut self, names: &[String]) -> Result<(), ParseError>;

    fn mark_streets(&self, text: &str, game_type: &GameType) -> Result<StreetSpans, ParseError>;

    fn read_blinds(&self, text: &str, spans: &StreetSpans) -> Result<Vec<HandEvent>, ParseError>;

    fn read_antes(&self, text: &str, spans: &StreetSpans) -> Result<Vec<HandEvent>, ParseError>;

    fn read_bring_in(&self, text: &str, spans: &StreetSpans) -> Result<Vec<HandEvent>, ParseError>;

    fn read_button(&self, text: &str) -> Result<Option<u8>, ParseError>;

    /// Hole cards dealt on `street`, the hero's and any exposed ones.
    fn read_hole_cards(&self, street: Street, street_text: &str) -> Result<Vec<HandEvent>, ParseError>;

    fn read_community_cards(&self, street: Street, street_text: &str) -> Result<Vec<HandEvent>, ParseError>;

    fn read_actions(&self, street: Street, street_text: &str) -> Result<Vec<HandEvent>, ParseError>;

    fn read_showdown(&self, text: &str) -> Result<Vec<HandEvent>, ParseError>;

    fn read_collected(&self, text: &str) -> Result<Vec<HandEvent>, ParseError>;

    fn read_totals(&self, text: &str) -> Result<StatedTotals, ParseError>;
}
