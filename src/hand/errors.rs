use thiserror::Error;

use crate::core::Money;

use super::street::Street;

#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum PotError {
    #[error("Negative amount {amount} for player {player}")]
    NegativeAmount { player: usize, amount: Money },
    #[error("Negative common money {0}")]
    NegativeCommon(Money),
    #[error("Player index {0} is not at this pot")]
    UnknownPlayer(usize),
    #[error("Pot is already finalized")]
    Finalized,
    #[error("Money {0} is committed but no contender is left to win it")]
    Unawardable(Money),
}

/// Contract violations of the hand model.
///
/// Every one of these means the text was fed in a way that breaks money
/// conservation or the callback order, so they are never recovered from.
#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum HandError {
    #[error("Unknown player '{0}'")]
    UnknownPlayer(String),
    #[error("Player '{0}' was added twice")]
    DuplicatePlayer(String),
    #[error("Seat {0} is taken twice")]
    DuplicateSeat(u8),
    #[error("Stack of '{player}' would go negative ({stack})")]
    NegativeStack { player: String, stack: Money },
    #[error("Street {0} does not exist in this game")]
    StreetNotInGame(Street),
    #[error("Pot accounting failed")]
    Pot(#[from] PotError),
    #[error("Negative collected amount {amount} for '{player}'")]
    NegativeCollect { player: String, amount: Money },
    #[error("Collected {collected} is more than the pot {pot}")]
    CollectedExceedsPot { collected: Money, pot: Money },
    #[error("Hand is already finalized")]
    Finalized,
    #[error("Hand is not finalized yet")]
    NotFinalized,
}
