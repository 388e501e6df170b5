use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::core::Money;

use super::errors::PotError;
use super::street::Street;

/// One main or side pot. `eligible` are player indices, ascending.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PotLayer {
    pub amount: Money,
    pub eligible: Vec<usize>,
}

/// The result of closing the pot.
///
/// * `total` - everything that stays in the middle, `layers + common`
/// * `returned` - uncalled money handed back, by player index
/// * `layers` - main pot first, then side pots
/// * `common` - dead money that belongs to no single contender
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PotSettlement {
    pub total: Money,
    pub returned: Vec<(usize, Money)>,
    pub layers: Vec<PotLayer>,
    pub common: Money,
}

impl PotSettlement {
    pub fn returned_to(&self, player: usize) -> Money {
        self.returned
            .iter()
            .filter(|(p, _)| *p == player)
            .map(|(_, m)| *m)
            .sum()
    }
}

/// Ledger of every chip that went into the middle.
///
/// Players are indexed in the order they were added. Between calls the
/// ledger keeps `sum(committed) + common` equal to what left the stacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pot {
    committed: Vec<Money>,
    contenders: BTreeSet<usize>,
    common: Money,
    street_totals: Vec<(Street, Money)>,
    settlement: Option<PotSettlement>,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a seat to the ledger and return its index.
    pub fn add_player(&mut self) -> Result<usize, PotError> {
        self.check_open()?;
        self.committed.push(Money::ZERO);
        Ok(self.committed.len() - 1)
    }

    pub fn add_money(&mut self, player: usize, amount: Money) -> Result<(), PotError> {
        self.check_open()?;
        if amount.is_negative() {
            return Err(PotError::NegativeAmount { player, amount });
        }
        let slot = self
            .committed
            .get_mut(player)
            .ok_or(PotError::UnknownPlayer(player))?;
        *slot += amount;
        self.contenders.insert(player);
        trace!(player, %amount, "Committed money");
        Ok(())
    }

    /// Dead money, it funds the pot but gives nobody a claim on it.
    pub fn add_common_money(&mut self, amount: Money) -> Result<(), PotError> {
        self.check_open()?;
        if amount.is_negative() {
            return Err(PotError::NegativeCommon(amount));
        }
        self.common += amount;
        Ok(())
    }

    /// The player stops contending. Their money stays in.
    pub fn add_fold(&mut self, player: usize) -> Result<(), PotError> {
        self.check_open()?;
        if player >= self.committed.len() {
            return Err(PotError::UnknownPlayer(player));
        }
        self.contenders.remove(&player);
        Ok(())
    }

    /// Snapshot the running total at the end of `street`.
    pub fn mark_total(&mut self, street: Street) -> Result<Money, PotError> {
        self.check_open()?;
        let total = self.total();
        self.street_totals.push((street, total));
        Ok(total)
    }

    /// Everything in the middle right now, uncalled money included.
    pub fn total(&self) -> Money {
        self.committed.iter().sum::<Money>() + self.common
    }

    pub fn common(&self) -> Money {
        self.common
    }

    pub fn committed(&self, player: usize) -> Money {
        self.committed.get(player).copied().unwrap_or(Money::ZERO)
    }

    pub fn is_contender(&self, player: usize) -> bool {
        self.contenders.contains(&player)
    }

    pub fn street_totals(&self) -> &[(Street, Money)] {
        &self.street_totals
    }

    /// Running total snapshot taken at the end of `street`, if any.
    pub fn total_at(&self, street: Street) -> Option<Money> {
        self.street_totals
            .iter()
            .rev()
            .find(|(s, _)| *s == street)
            .map(|(_, m)| *m)
    }

    pub fn settlement(&self) -> Option<&PotSettlement> {
        self.settlement.as_ref()
    }

    pub fn is_finalized(&self) -> bool {
        self.settlement.is_some()
    }

    /// Close the pot: hand back the uncalled top of the biggest
    /// commitment, then peel layers off at each contender's level.
    pub fn finalize(&mut self) -> Result<&PotSettlement, PotError> {
        self.check_open()?;

        let mut remaining = self.committed.clone();
        let mut total = self.total();
        let mut returned = Vec::new();

        let mut order: Vec<usize> = (0..remaining.len()).collect();
        // Stable sort keeps the lower index first on ties.
        order.sort_by(|a, b| remaining[*b].cmp(&remaining[*a]));
        if let Some(&top) = order.first() {
            let second = order
                .get(1)
                .map(|idx| remaining[*idx])
                .unwrap_or(Money::ZERO);
            let excess = remaining[top] - second;
            if excess.is_positive() {
                debug!(player = top, %excess, "Returning uncalled bet");
                remaining[top] -= excess;
                total -= excess;
                returned.push((top, excess));
            }
        }

        let mut layers = Vec::new();
        loop {
            let in_play: Vec<usize> = (0..remaining.len())
                .filter(|idx| remaining[*idx].is_positive())
                .collect();
            if in_play.is_empty() {
                break;
            }
            let level = in_play
                .iter()
                .filter(|idx| self.contenders.contains(idx))
                .map(|idx| remaining[*idx])
                .min();
            let Some(level) = level else {
                let stranded: Money = in_play.iter().map(|idx| remaining[*idx]).sum();
                return Err(PotError::Unawardable(stranded));
            };
            let amount: Money = in_play
                .iter()
                .map(|idx| remaining[*idx].min(level))
                .sum();
            let eligible: Vec<usize> = in_play
                .iter()
                .copied()
                .filter(|idx| self.contenders.contains(idx))
                .collect();
            trace!(%amount, ?eligible, "Pot layer");
            layers.push(PotLayer { amount, eligible });
            for idx in in_play {
                remaining[idx] = (remaining[idx] - level).max(Money::ZERO);
            }
        }

        Ok(self.settlement.insert(PotSettlement {
            total,
            returned,
            layers,
            common: self.common,
        }))
    }

    fn check_open(&self) -> Result<(), PotError> {
        if self.settlement.is_some() {
            Err(PotError::Finalized)
        } else {
            Ok(())
        }
    }
}
