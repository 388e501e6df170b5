use std::fmt;

use crate::core::Money;

/// The family of a game decides which streets exist and how positions are
/// assigned.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameBase {
    /// Community card games with a button and blinds.
    Hold,
    /// Stud games with antes and a bring-in.
    Stud,
    /// Draw games with a button, blinds and draw rounds.
    Draw,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Holdem,
    OmahaHi,
    OmahaHiLo,
    FiveCardOmahaHi,
    Razz,
    StudHi,
    StudHiLo,
    FiveCardDraw,
    SingleDraw27,
    TripleDraw27,
    Badugi,
}

impl Category {
    pub fn base(self) -> GameBase {
        match self {
            Category::Holdem
            | Category::OmahaHi
            | Category::OmahaHiLo
            | Category::FiveCardOmahaHi => GameBase::Hold,
            Category::Razz | Category::StudHi | Category::StudHiLo => GameBase::Stud,
            Category::FiveCardDraw
            | Category::SingleDraw27
            | Category::TripleDraw27
            | Category::Badugi => GameBase::Draw,
        }
    }

    /// Number of private cards a player holds at the start of the hand.
    pub fn starting_cards(self) -> usize {
        match self {
            Category::Holdem => 2,
            Category::OmahaHi | Category::OmahaHiLo | Category::Badugi => 4,
            Category::FiveCardOmahaHi
            | Category::FiveCardDraw
            | Category::SingleDraw27
            | Category::TripleDraw27 => 5,
            Category::Razz | Category::StudHi | Category::StudHiLo => 3,
        }
    }

    /// Number of draw rounds for draw games, zero otherwise.
    pub fn draw_rounds(self) -> usize {
        match self {
            Category::FiveCardDraw | Category::SingleDraw27 => 1,
            Category::TripleDraw27 | Category::Badugi => 3,
            _ => 0,
        }
    }

    pub fn is_split(self) -> bool {
        matches!(self, Category::OmahaHiLo | Category::StudHiLo)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Holdem => "holdem",
            Category::OmahaHi => "omahahi",
            Category::OmahaHiLo => "omahahilo",
            Category::FiveCardOmahaHi => "5_omahahi",
            Category::Razz => "razz",
            Category::StudHi => "studhi",
            Category::StudHiLo => "studhilo",
            Category::FiveCardDraw => "fivedraw",
            Category::SingleDraw27 => "27_1draw",
            Category::TripleDraw27 => "27_3draw",
            Category::Badugi => "badugi",
        };
        f.write_str(name)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimitType {
    NoLimit,
    PotLimit,
    FixedLimit,
}

impl fmt::Display for LimitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LimitType::NoLimit => "nl",
            LimitType::PotLimit => "pl",
            LimitType::FixedLimit => "fl",
        })
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    PlayMoney,
    TournamentChips,
}

impl Currency {
    /// Map an ISO code or a currency symbol from a hand header.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USD" | "$" => Some(Currency::Usd),
            "EUR" | "€" => Some(Currency::Eur),
            "GBP" | "£" => Some(Currency::Gbp),
            "" => Some(Currency::PlayMoney),
            _ => None,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Ring,
    Tournament,
}

/// Tournament metadata found in a hand header.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TournamentInfo {
    pub tournament_id: String,
    pub buy_in: Option<Money>,
    pub fee: Option<Money>,
    pub level: Option<String>,
}

/// Immutable description of the game a hand was played in.
///
/// For fixed limit games `small_blind`/`big_blind` carry the stakes pair as
/// printed in the header, for stud that is small bet and big bet.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameType {
    pub category: Category,
    pub limit: LimitType,
    pub currency: Currency,
    pub kind: TableKind,
    pub small_blind: Money,
    pub big_blind: Money,
}

impl GameType {
    pub fn base(&self) -> GameBase {
        self.category.base()
    }

    pub fn is_tournament(&self) -> bool {
        self.kind == TableKind::Tournament
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}/{}",
            self.category, self.limit, self.small_blind, self.big_blind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_base() {
        assert_eq!(GameBase::Hold, Category::OmahaHiLo.base());
        assert_eq!(GameBase::Stud, Category::Razz.base());
        assert_eq!(GameBase::Draw, Category::Badugi.base());
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Some(Currency::Eur), Currency::from_code("€"));
        assert_eq!(Some(Currency::Usd), Currency::from_code("USD"));
        assert_eq!(None, Currency::from_code("XYZ"));
    }

    #[test]
    fn test_display() {
        let gt = GameType {
            category: Category::Holdem,
            limit: LimitType::NoLimit,
            currency: Currency::Usd,
            kind: TableKind::Ring,
            small_blind: Money::from_cents(1),
            big_blind: Money::from_cents(2),
        };
        assert_eq!("holdem nl 0.01/0.02", gt.to_string());
        assert!(!gt.is_tournament());
    }
}
