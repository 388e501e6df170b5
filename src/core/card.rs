use std::fmt;

use thiserror::Error;

/// Errors produced while reading cards out of hand history text.
#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum CardParseError {
    #[error("unexpected value character '{0}'")]
    UnexpectedValueChar(char),
    #[error("unexpected suit character '{0}'")]
    UnexpectedSuitChar(char),
    #[error("card text '{0}' is not a value followed by a suit")]
    InvalidLength(String),
    #[error("card index {0} is outside 1..=52")]
    InvalidIndex(u8),
}

/// Card rank. Ordering follows poker strength with the ace high.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Value {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// All the values from two to ace.
    pub const fn values() -> [Value; 13] {
        VALUES
    }

    /// Take a char as it appears in hand histories and give back the value.
    /// Ten is always written `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_poker_tracker::core::Value;
    ///
    /// assert_eq!(Some(Value::Ten), Value::from_char('T'));
    /// assert_eq!(Some(Value::Ace), Value::from_char('a'));
    /// assert_eq!(None, Value::from_char('X'));
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            '2' => Some(Value::Two),
            '3' => Some(Value::Three),
            '4' => Some(Value::Four),
            '5' => Some(Value::Five),
            '6' => Some(Value::Six),
            '7' => Some(Value::Seven),
            '8' => Some(Value::Eight),
            '9' => Some(Value::Nine),
            'T' => Some(Value::Ten),
            'J' => Some(Value::Jack),
            'Q' => Some(Value::Queen),
            'K' => Some(Value::King),
            'A' => Some(Value::Ace),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Value::Two => '2',
            Value::Three => '3',
            Value::Four => '4',
            Value::Five => '5',
            Value::Six => '6',
            Value::Seven => '7',
            Value::Eight => '8',
            Value::Nine => '9',
            Value::Ten => 'T',
            Value::Jack => 'J',
            Value::Queen => 'Q',
            Value::King => 'K',
            Value::Ace => 'A',
        }
    }

    /// The face number with deuce as 2 and ace as 14.
    pub fn face(self) -> u8 {
        self as u8 + 2
    }
}

/// Card suit. The discriminant is the suit's block in the compact
/// card index (hearts first, spades last).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub enum Suit {
    Heart = 0,
    Diamond = 1,
    Club = 2,
    Spade = 3,
}

const SUITS: [Suit; 4] = [Suit::Heart, Suit::Diamond, Suit::Club, Suit::Spade];

impl Suit {
    pub const fn suits() -> [Suit; 4] {
        SUITS
    }

    pub fn from_char(s: char) -> Option<Self> {
        match s.to_ascii_lowercase() {
            'h' => Some(Suit::Heart),
            'd' => Some(Suit::Diamond),
            'c' => Some(Suit::Club),
            's' => Some(Suit::Spade),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
            Suit::Club => 'c',
            Suit::Spade => 's',
        }
    }
}

/// A single playing card.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
pub struct Card {
    pub value: Value,
    pub suit: Suit,
}

impl Card {
    pub fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// Compact integer form used by the hand records.
    ///
    /// `0` is reserved for an unknown card, `1..=13` are the hearts from
    /// deuce to ace, then diamonds, clubs and spades in blocks of 13.
    ///
    /// ```
    /// use rs_poker_tracker::core::{Card, Suit, Value};
    ///
    /// assert_eq!(1, Card::new(Value::Two, Suit::Heart).to_index());
    /// assert_eq!(52, Card::new(Value::Ace, Suit::Spade).to_index());
    /// ```
    pub fn to_index(self) -> u8 {
        self.suit as u8 * 13 + self.value as u8 + 1
    }

    pub fn from_index(idx: u8) -> Result<Self, CardParseError> {
        if !(1..=52).contains(&idx) {
            return Err(CardParseError::InvalidIndex(idx));
        }
        let zero_based = idx - 1;
        Ok(Card {
            value: VALUES[(zero_based % 13) as usize],
            suit: SUITS[(zero_based / 13) as usize],
        })
    }

    /// Index for an optional card, unknown cards become `0`.
    pub fn index_or_unknown(card: Option<Card>) -> u8 {
        card.map(Card::to_index).unwrap_or(0)
    }

    /// Parse a whitespace separated list of cards, `"Ah Kd 2c"`.
    pub fn parse_list(text: &str) -> Result<Vec<Card>, CardParseError> {
        text.split_whitespace().map(Card::try_from).collect()
    }
}

impl TryFrom<&str> for Card {
    type Error = CardParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut chars = value.chars();
        let (v, s) = match (chars.next(), chars.next(), chars.next()) {
            (Some(v), Some(s), None) => (v, s),
            _ => return Err(CardParseError::InvalidLength(value.to_string())),
        };
        Ok(Card {
            value: Value::from_char(v).ok_or(CardParseError::UnexpectedValueChar(v))?,
            suit: Suit::from_char(s).ok_or(CardParseError::UnexpectedSuitChar(s))?,
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_card() {
        let c = Card::try_from("Td").unwrap();
        assert_eq!(Value::Ten, c.value);
        assert_eq!(Suit::Diamond, c.suit);
        assert_eq!("Td", c.to_string());
    }

    #[test]
    fn test_parse_bad_cards() {
        assert_eq!(
            Err(CardParseError::UnexpectedValueChar('X')),
            Card::try_from("Xd")
        );
        assert_eq!(
            Err(CardParseError::UnexpectedSuitChar('x')),
            Card::try_from("Ax")
        );
        assert!(matches!(
            Card::try_from("10d"),
            Err(CardParseError::InvalidLength(_))
        ));
    }

    #[test]
    fn test_index_blocks() {
        assert_eq!(13, Card::try_from("Ah").unwrap().to_index());
        assert_eq!(14, Card::try_from("2d").unwrap().to_index());
        assert_eq!(27, Card::try_from("2c").unwrap().to_index());
        assert_eq!(40, Card::try_from("2s").unwrap().to_index());
        assert_eq!(0, Card::index_or_unknown(None));
    }

    #[test]
    fn test_every_index_maps_back() {
        for idx in 1..=52u8 {
            let card = Card::from_index(idx).unwrap();
            assert_eq!(idx, card.to_index());
        }
        assert_eq!(Err(CardParseError::InvalidIndex(0)), Card::from_index(0));
        assert_eq!(Err(CardParseError::InvalidIndex(53)), Card::from_index(53));
    }

    #[test]
    fn test_parse_list() {
        let cards = Card::parse_list("Ah  Kd 2c").unwrap();
        assert_eq!(3, cards.len());
        assert_eq!(Value::Two, cards[2].value);
        assert_eq!(Suit::Club, cards[2].suit);
    }
}
