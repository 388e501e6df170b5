use core::fmt;
use std::fmt::Display;

use super::game_type::{Category, GameBase};

/// A betting round, or the forced bet phase in front of the first one.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    /// Blinds and antes, every game base starts here.
    BlindsAntes,

    Preflop,
    Flop,
    Turn,
    River,

    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,

    Deal,
    DrawOne,
    DrawTwo,
    DrawThree,
}

const HOLD_STREETS: [Street; 5] = [
    Street::BlindsAntes,
    Street::Preflop,
    Street::Flop,
    Street::Turn,
    Street::River,
];

const STUD_STREETS: [Street; 6] = [
    Street::BlindsAntes,
    Street::Third,
    Street::Fourth,
    Street::Fifth,
    Street::Sixth,
    Street::Seventh,
];

const DRAW_STREETS: [Street; 5] = [
    Street::BlindsAntes,
    Street::Deal,
    Street::DrawOne,
    Street::DrawTwo,
    Street::DrawThree,
];

impl GameBase {
    /// Every street of the base in play order.
    pub fn streets(self) -> &'static [Street] {
        match self {
            GameBase::Hold => &HOLD_STREETS,
            GameBase::Stud => &STUD_STREETS,
            GameBase::Draw => &DRAW_STREETS,
        }
    }

    /// The betting streets, street 0 first.
    pub fn action_streets(self) -> &'static [Street] {
        &self.streets()[1..]
    }

    /// Street number counted from the first betting round. Street 0 is
    /// preflop, third street or the deal.
    pub fn street_number(self, street: Street) -> Option<usize> {
        self.action_streets().iter().position(|s| *s == street)
    }

    /// The street where blinds count as live bets.
    pub fn blind_street(self) -> Street {
        self.action_streets()[0]
    }
}

impl Category {
    /// Betting streets that can exist for this category. Single draw games
    /// stop after the first draw.
    pub fn action_streets(self) -> &'static [Street] {
        let all = self.base().action_streets();
        match self.base() {
            GameBase::Draw => &all[..=self.draw_rounds()],
            _ => all,
        }
    }
}

impl Street {
    /// The game family a betting street belongs to. `BlindsAntes` is
    /// shared by all of them.
    pub fn base(self) -> Option<GameBase> {
        [GameBase::Hold, GameBase::Stud, GameBase::Draw]
            .into_iter()
            .find(|b| b.street_number(self).is_some())
    }

    /// Number of community cards that become visible on this street.
    pub fn new_board_cards(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            _ => 0,
        }
    }

    pub fn is_draw(self) -> bool {
        matches!(self, Street::DrawOne | Street::DrawTwo | Street::DrawThree)
    }
}

impl Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::BlindsAntes => write!(f, "Blinds/Antes"),
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
            Street::Third => write!(f, "Third Street"),
            Street::Fourth => write!(f, "Fourth Street"),
            Street::Fifth => write!(f, "Fifth Street"),
            Street::Sixth => write!(f, "Sixth Street"),
            Street::Seventh => write!(f, "Seventh Street"),
            Street::Deal => write!(f, "Deal"),
            Street::DrawOne => write!(f, "First Draw"),
            Street::DrawTwo => write!(f, "Second Draw"),
            Street::DrawThree => write!(f, "Third Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_numbers() {
        assert_eq!(Some(0), GameBase::Hold.street_number(Street::Preflop));
        assert_eq!(Some(3), GameBase::Hold.street_number(Street::River));
        assert_eq!(Some(4), GameBase::Stud.street_number(Street::Seventh));
        assert_eq!(None, GameBase::Hold.street_number(Street::BlindsAntes));
        assert_eq!(None, GameBase::Draw.street_number(Street::Flop));
    }

    #[test]
    fn test_single_draw_streets() {
        assert_eq!(
            &[Street::Deal, Street::DrawOne],
            Category::FiveCardDraw.action_streets()
        );
        assert_eq!(4, Category::TripleDraw27.action_streets().len());
        assert_eq!(5, Category::StudHi.action_streets().len());
    }

    #[test]
    fn test_street_base() {
        assert_eq!(Some(GameBase::Stud), Street::Fifth.base());
        assert_eq!(Some(GameBase::Draw), Street::Deal.base());
        assert_eq!(None, Street::BlindsAntes.base());
    }

    #[test]
    fn test_blind_street() {
        assert_eq!(Street::Preflop, GameBase::Hold.blind_street());
        assert_eq!(Street::Deal, GameBase::Draw.blind_street());
        assert_eq!(Street::Third, GameBase::Stud.blind_street());
    }

    #[test]
    fn test_display() {
        assert_eq!("Blinds/Antes", Street::BlindsAntes.to_string());
        assert_eq!("Second Draw", Street::DrawTwo.to_string());
    }
}
