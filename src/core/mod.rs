//! Primitives shared by every other module: cards and fixed point money.

/// Card values, suits and the compact card index.
mod card;
/// Export `Card`, `Value`, `Suit`
pub use self::card::{Card, CardParseError, Suit, Value};

/// Fixed point currency and chip amounts.
mod money;
/// Export `Money`
pub use self::money::{Money, MoneyParseError};
