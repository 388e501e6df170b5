use crate::core::{Card, Money};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlindType {
    Small,
    Big,
    /// Small and big blind posted together by a returning player. Only the
    /// big blind part is a live bet.
    Both,
    /// A second small blind, all of it dead money.
    ExtraSmall,
}

/// The three ways sites print a raise. They all normalize to the same
/// [`RaiseAmounts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaiseIdiom {
    /// "raises 40": the increase over the current bet.
    By(Money),
    /// "raises to 60": the new total bet for the street.
    To(Money),
    /// "raises 50" meaning the chips put in with this action, call
    /// portion included.
    CallAndRaise(Money),
}

/// A raise in its canonical form.
///
/// * `call` - what the raiser needed to call, `Bp - Bc`
/// * `raise_by` - the increase over the previous bet
/// * `raise_to` - the raiser's total for the street, `Bp + raise_by`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RaiseAmounts {
    pub call: Money,
    pub raise_by: Money,
    pub raise_to: Money,
}

impl RaiseAmounts {
    /// Normalize a raise given the street's last bet watermark
    /// (`last_bet`) and what the raiser already has in this street
    /// (`committed`).
    ///
    /// ```
    /// use rs_poker_tracker::core::Money;
    /// use rs_poker_tracker::hand::{RaiseAmounts, RaiseIdiom};
    ///
    /// let bp = Money::from_cents(30);
    /// let bc = Money::from_cents(10);
    /// let by = RaiseAmounts::normalize(bp, bc, RaiseIdiom::By(Money::from_cents(30)));
    /// let to = RaiseAmounts::normalize(bp, bc, RaiseIdiom::To(Money::from_cents(60)));
    /// let cr = RaiseAmounts::normalize(bp, bc, RaiseIdiom::CallAndRaise(Money::from_cents(50)));
    /// assert_eq!(by, to);
    /// assert_eq!(to, cr);
    /// assert_eq!(Money::from_cents(20), by.call);
    /// ```
    pub fn normalize(last_bet: Money, committed: Money, idiom: RaiseIdiom) -> Self {
        let call = last_bet - committed;
        let raise_by = match idiom {
            RaiseIdiom::By(rb) => rb,
            RaiseIdiom::To(rt) => rt - last_bet,
            RaiseIdiom::CallAndRaise(crb) => crb - call,
        };
        RaiseAmounts {
            call,
            raise_by,
            raise_to: last_bet + raise_by,
        }
    }

    /// Chips that leave the raiser's stack with this action.
    pub fn added(&self) -> Money {
        self.call + self.raise_by
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKind {
    PostAnte(Money),
    PostBlind { blind: BlindType, amount: Money },
    BringIn(Money),
    Bet(Money),
    Call(Money),
    Raise(RaiseAmounts),
    /// Stud completion of the bring-in.
    Complete(RaiseAmounts),
    Check,
    Fold,
    Discard { count: u8, cards: Vec<Card> },
    StandsPat { cards: Vec<Card> },
}

impl ActionKind {
    /// Bets, raises and completions.
    pub fn is_aggressive(&self) -> bool {
        matches!(
            self,
            ActionKind::Bet(_) | ActionKind::Raise(_) | ActionKind::Complete(_)
        )
    }

    /// Money that was put in by choice.
    pub fn is_voluntary_money(&self) -> bool {
        matches!(self, ActionKind::Call(_)) || self.is_aggressive()
    }

    pub fn is_forced(&self) -> bool {
        matches!(
            self,
            ActionKind::PostAnte(_) | ActionKind::PostBlind { .. } | ActionKind::BringIn(_)
        )
    }

    /// Draw round bookkeeping that is not a betting decision.
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            ActionKind::Discard { .. } | ActionKind::StandsPat { .. }
        )
    }

    pub fn is_fold(&self) -> bool {
        matches!(self, ActionKind::Fold)
    }

    pub fn is_call(&self) -> bool {
        matches!(self, ActionKind::Call(_))
    }

    pub fn is_raise(&self) -> bool {
        matches!(self, ActionKind::Raise(_) | ActionKind::Complete(_))
    }

    /// Chips moved from the stack by this action.
    pub fn money_added(&self) -> Money {
        match self {
            ActionKind::PostAnte(m)
            | ActionKind::BringIn(m)
            | ActionKind::Bet(m)
            | ActionKind::Call(m) => *m,
            ActionKind::PostBlind { amount, .. } => *amount,
            ActionKind::Raise(r) | ActionKind::Complete(r) => r.added(),
            ActionKind::Check
            | ActionKind::Fold
            | ActionKind::Discard { .. }
            | ActionKind::StandsPat { .. } => Money::ZERO,
        }
    }
}

/// One observed action, `player` indexes [`crate::hand::Hand::players`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    pub player: usize,
    pub kind: ActionKind,
    pub all_in: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_raise_idioms_agree_from_nothing_committed() {
        let by = RaiseAmounts::normalize(m(20), m(0), RaiseIdiom::By(m(40)));
        let to = RaiseAmounts::normalize(m(20), m(0), RaiseIdiom::To(m(60)));
        let cr = RaiseAmounts::normalize(m(20), m(0), RaiseIdiom::CallAndRaise(m(60)));

        assert_eq!(by, to);
        assert_eq!(by, cr);
        assert_eq!(
            RaiseAmounts {
                call: m(20),
                raise_by: m(40),
                raise_to: m(60)
            },
            by
        );
        assert_eq!(m(60), by.added());
    }

    #[test]
    fn test_reraise_after_own_bet() {
        // Bet 10, got raised to 30, re-raises to 90.
        let to = RaiseAmounts::normalize(m(30), m(10), RaiseIdiom::To(m(90)));
        assert_eq!(m(20), to.call);
        assert_eq!(m(60), to.raise_by);
        assert_eq!(m(80), to.added());
    }

    #[test]
    fn test_action_classes() {
        assert!(ActionKind::Bet(m(1)).is_aggressive());
        assert!(ActionKind::Call(m(1)).is_voluntary_money());
        assert!(!ActionKind::BringIn(m(1)).is_voluntary_money());
        assert!(ActionKind::BringIn(m(1)).is_forced());
        assert!(ActionKind::StandsPat { cards: vec![] }.is_draw());
        assert_eq!(Money::ZERO, ActionKind::Check.money_added());
        assert_eq!(
            m(5),
            ActionKind::PostBlind {
                blind: BlindType::Small,
                amount: m(5)
            }
            .money_added()
        );
    }
}
