//! Street 0 stats: voluntary money, raise levels and blind steals.

use std::collections::BTreeSet;

use tracing::trace;

use crate::hand::{Action, Position};

use super::record::PlayerHandStats;

/// What street 0 tells about the hand as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Street0Summary {
    pub players_vpi: usize,
    pub raises: usize,
}

/// Flag voluntary money and street 0 aggression.
///
/// Only a player's first unforced action decides VPIP.
pub(crate) fn vpip_and_aggression(actions: &[Action], stats: &mut [PlayerHandStats]) -> Street0Summary {
    let mut summary = Street0Summary::default();
    let mut acted = BTreeSet::new();
    for action in actions.iter().filter(|a| !a.kind.is_forced()) {
        let player = &mut stats[action.player];
        if acted.insert(action.player) && action.kind.is_voluntary_money() {
            player.street0_vpi = true;
            summary.players_vpi += 1;
        }
        if action.kind.is_aggressive() {
            player.street0_aggr = true;
            summary.raises += 1;
        }
    }
    summary
}

/// 3-bet and 4-bet chances and their fold-to counterparts.
///
/// The bet level starts at one for the forced bets. Every bet or raise
/// moves it up by one. Acting at level two is a 3-bet chance, at level
/// three a 4-bet chance. The player who made level two faces the 3-bet
/// at level three, the 3-bettor faces the 4-bet at level four.
pub(crate) fn raise_levels(actions: &[Action], stats: &mut [PlayerHandStats]) {
    let mut level = 1;
    let mut raisers: Vec<usize> = Vec::new();
    for action in actions.iter().filter(|a| !a.kind.is_forced()) {
        let aggressive = action.kind.is_aggressive();
        let player = &mut stats[action.player];
        match level {
            2 => {
                player.street0_3b_chance = true;
                player.street0_3b_done = aggressive;
            }
            3 => {
                if raisers.first() == Some(&action.player) {
                    player.fold_to_3b_chance = true;
                    player.fold_to_3b_done = action.kind.is_fold();
                }
                player.street0_4b_chance = true;
                player.street0_4b_done = aggressive;
            }
            4 => {
                if raisers.get(1) == Some(&action.player) {
                    player.fold_to_4b_chance = true;
                    player.fold_to_4b_done = action.kind.is_fold();
                }
            }
            _ => {}
        }
        if aggressive {
            level += 1;
            raisers.push(action.player);
        }
    }
}

/// Raise first in: everyone who acts before any voluntary money has the
/// chance, the first aggressor takes it. A limp closes it.
pub(crate) fn raise_first_in(actions: &[Action], stats: &mut [PlayerHandStats]) {
    for action in actions.iter().filter(|a| !a.kind.is_forced()) {
        let player = &mut stats[action.player];
        player.raise_first_in_chance = true;
        if action.kind.is_aggressive() {
            player.raise_first_in_done = true;
            return;
        }
        if action.kind.is_call() {
            return;
        }
    }
}

/// Blind steals, for button games only.
///
/// Late position players get the chance up to and including the first
/// aggressor. If that aggressor sits late the raise is a steal, and each
/// blind acting after it faces the steal until somebody calls or raises.
pub(crate) fn steals(actions: &[Action], positions: &[Option<Position>], stats: &mut [PlayerHandStats]) {
    let mut stealer: Option<usize> = None;
    let mut opened = false;
    for action in actions.iter().filter(|a| !a.kind.is_forced()) {
        let position = positions[action.player];
        let late = position.is_some_and(Position::is_late);
        if !opened {
            if action.kind.is_call() {
                trace!(player = action.player, "Limp, no steal possible");
                return;
            }
            if late {
                stats[action.player].steal_chance = true;
            }
            if action.kind.is_aggressive() {
                opened = true;
                if late {
                    stats[action.player].steal_attempted = true;
                    stealer = Some(action.player);
                } else {
                    return;
                }
            }
            continue;
        }

        if stealer == Some(action.player) {
            return;
        }
        if position.is_some_and(Position::is_blind) {
            let player = &mut stats[action.player];
            player.fold_to_steal_chance = true;
            player.folded_to_steal = action.kind.is_fold();
        }
        if action.kind.is_voluntary_money() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Money;
    use crate::hand::{ActionKind, RaiseAmounts};

    fn act(player: usize, kind: ActionKind) -> Action {
        Action {
            player,
            kind,
            all_in: false,
        }
    }

    fn raise() -> ActionKind {
        ActionKind::Raise(RaiseAmounts {
            call: Money::from_cents(2),
            raise_by: Money::from_cents(4),
            raise_to: Money::from_cents(6),
        })
    }

    fn blank(n: usize) -> Vec<PlayerHandStats> {
        (0..n).map(|i| PlayerHandStats::new(i as u8 + 1, "p", None)).collect()
    }

    #[test]
    fn test_blind_post_is_not_vpip() {
        let actions = vec![
            act(0, ActionKind::Call(Money::from_cents(2))),
            act(1, ActionKind::Check),
        ];
        let mut stats = blank(2);
        let summary = vpip_and_aggression(&actions, &mut stats);
        assert!(stats[0].street0_vpi);
        assert!(!stats[1].street0_vpi);
        assert_eq!(1, summary.players_vpi);
        assert_eq!(0, summary.raises);
    }

    #[test]
    fn test_only_first_action_counts_for_vpip() {
        let actions = vec![
            act(0, ActionKind::Check),
            act(1, raise()),
            act(0, ActionKind::Call(Money::from_cents(4))),
        ];
        let mut stats = blank(2);
        let summary = vpip_and_aggression(&actions, &mut stats);
        assert!(!stats[0].street0_vpi);
        assert!(stats[1].street0_vpi && stats[1].street0_aggr);
        assert_eq!(1, summary.players_vpi);
    }

    #[test]
    fn test_three_and_four_bet_levels() {
        let actions = vec![
            act(0, raise()),
            act(1, raise()),
            act(2, ActionKind::Fold),
            act(0, raise()),
            act(1, ActionKind::Fold),
        ];
        let mut stats = blank(3);
        raise_levels(&actions, &mut stats);

        assert!(!stats[0].street0_3b_chance);
        assert!(stats[1].street0_3b_chance && stats[1].street0_3b_done);

        assert!(stats[2].street0_4b_chance && !stats[2].street0_4b_done);
        assert!(!stats[2].fold_to_3b_chance);
        assert!(stats[0].fold_to_3b_chance && !stats[0].fold_to_3b_done);
        assert!(stats[0].street0_4b_done);

        assert!(stats[1].fold_to_4b_chance && stats[1].fold_to_4b_done);
    }

    #[test]
    fn test_limp_ends_raise_first_in() {
        let actions = vec![
            act(0, ActionKind::Fold),
            act(1, ActionKind::Call(Money::from_cents(2))),
            act(2, raise()),
        ];
        let mut stats = blank(3);
        raise_first_in(&actions, &mut stats);
        assert!(stats[0].raise_first_in_chance);
        assert!(stats[1].raise_first_in_chance);
        assert!(!stats[2].raise_first_in_chance);
    }

    #[test]
    fn test_steal_from_the_cutoff() {
        // Seat order: early, cutoff, button, small blind, big blind.
        let positions = vec![
            Some(Position::Seat(3)),
            Some(Position::Seat(1)),
            Some(Position::Seat(0)),
            Some(Position::SmallBlind),
            Some(Position::BigBlind),
        ];
        let actions = vec![
            act(0, ActionKind::Fold),
            act(1, raise()),
            act(2, ActionKind::Fold),
            act(3, ActionKind::Fold),
            act(4, ActionKind::Fold),
        ];
        let mut stats = blank(5);
        steals(&actions, &positions, &mut stats);
        assert!(!stats[0].steal_chance);
        assert!(stats[1].steal_chance && stats[1].steal_attempted);
        assert!(!stats[2].steal_chance);
        assert!(stats[3].fold_to_steal_chance && stats[3].folded_to_steal);
        assert!(stats[4].fold_to_steal_chance && stats[4].folded_to_steal);
    }

    #[test]
    fn test_call_from_the_blind_ends_fold_to_steal() {
        let positions = vec![
            Some(Position::Seat(1)),
            Some(Position::SmallBlind),
            Some(Position::BigBlind),
        ];
        let actions = vec![
            act(0, raise()),
            act(1, ActionKind::Call(Money::from_cents(4))),
            act(2, ActionKind::Fold),
        ];
        let mut stats = blank(3);
        steals(&actions, &positions, &mut stats);
        assert!(stats[0].steal_attempted);
        assert!(stats[1].fold_to_steal_chance && !stats[1].folded_to_steal);
        assert!(!stats[2].fold_to_steal_chance);
        assert!(!stats[2].folded_to_steal);
    }

    #[test]
    fn test_early_open_is_not_a_steal() {
        let positions = vec![Some(Position::Seat(3)), Some(Position::BigBlind)];
        let actions = vec![act(0, raise()), act(1, ActionKind::Fold)];
        let mut stats = blank(2);
        steals(&actions, &positions, &mut stats);
        assert!(!stats[0].steal_attempted);
        assert!(!stats[1].fold_to_steal_chance);
    }
}
