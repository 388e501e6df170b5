//! Stats that look at every betting street.

use std::collections::BTreeSet;

use tracing::trace;

use crate::hand::{Action, ActionKind};

use super::record::{PlayerHandStats, STREETS};

/// Bets, calls and raises per street.
pub(crate) fn counts(streets: &[&[Action]], stats: &mut [PlayerHandStats]) {
    for (n, actions) in streets.iter().enumerate() {
        for action in actions.iter() {
            let player = &mut stats[action.player];
            match action.kind {
                ActionKind::Bet(_) => player.street_bets[n] += 1,
                ActionKind::Raise(_) | ActionKind::Complete(_) => player.street_raises[n] += 1,
                ActionKind::Call(_) => player.street_calls[n] += 1,
                _ => {}
            }
            if action.kind.is_aggressive() {
                player.street_aggr[n] = true;
            }
        }
    }
}

/// Mark who saw each street and return how many did.
///
/// A street is seen by everyone acting on it plus everyone already all-in
/// on an earlier street. When nobody acts on a street and fewer than two
/// players are all-in, the all-in players alone do not count as seeing it.
pub(crate) fn seen_streets(
    streets: &[&[Action]],
    forced: &[Action],
    stats: &mut [PlayerHandStats],
) -> [usize; STREETS] {
    let mut at_street = [0; STREETS];
    let mut all_in: BTreeSet<usize> = forced
        .iter()
        .filter(|a| a.all_in)
        .map(|a| a.player)
        .collect();

    for (n, actions) in streets.iter().enumerate() {
        let actors: BTreeSet<usize> = actions.iter().map(|a| a.player).collect();
        if n > 0 {
            let mut seen = actors.clone();
            if !actors.is_empty() || all_in.len() >= 2 {
                seen.extend(all_in.iter().copied());
            } else if !all_in.is_empty() {
                trace!(street = n, all_in = all_in.len(), "Lone all-in player does not see the street");
            }
            for p in &seen {
                stats[*p].street_seen[n] = true;
            }
            at_street[n] = seen.len();
        }
        all_in.extend(actions.iter().filter(|a| a.all_in).map(|a| a.player));
    }
    at_street
}

/// Players still in at the end: those who saw the last street and did not
/// fold, plus everyone all-in. Only a contest of two or more counts.
pub(crate) fn showdown(
    last_street: usize,
    folded: &[bool],
    all_in: &[bool],
    stats: &mut [PlayerHandStats],
) -> usize {
    let remaining: Vec<usize> = (0..stats.len())
        .filter(|p| !folded[*p] && (stats[*p].street_seen[last_street] || all_in[*p]))
        .collect();
    if remaining.len() < 2 {
        return 0;
    }
    for p in &remaining {
        stats[*p].saw_showdown = true;
    }
    remaining.len()
}

fn last_aggressor(actions: &[Action]) -> Option<usize> {
    actions
        .iter()
        .rev()
        .find(|a| a.kind.is_aggressive())
        .map(|a| a.player)
}

/// Continuation bets and folds to them.
///
/// The last aggressor of street `n - 1` has the chance on street `n` when
/// nobody bets before their first action and somebody else is still
/// acting. Once the continuation bet is made, every other player's first
/// response up to and including the next raise is a fold-to chance.
pub(crate) fn continuation_bets(streets: &[&[Action]], stats: &mut [PlayerHandStats]) {
    for n in 1..streets.len() {
        let Some(aggressor) = last_aggressor(streets[n - 1]) else {
            continue;
        };
        let actions: Vec<&Action> = streets[n].iter().filter(|a| !a.kind.is_draw()).collect();
        let others_act = actions.iter().any(|a| a.player != aggressor);
        let Some(first) = actions.iter().position(|a| a.player == aggressor) else {
            continue;
        };
        if !others_act || actions[..first].iter().any(|a| a.kind.is_aggressive()) {
            continue;
        }
        stats[aggressor].cbet_chance[n] = true;
        if !actions[first].kind.is_aggressive() {
            continue;
        }
        stats[aggressor].cbet_done[n] = true;

        let mut responded = BTreeSet::new();
        for action in &actions[first + 1..] {
            if action.player == aggressor || !responded.insert(action.player) {
                continue;
            }
            let player = &mut stats[action.player];
            player.fold_to_cbet_chance[n] = true;
            player.fold_to_cbet_done[n] = action.kind.is_fold();
            if action.kind.is_aggressive() {
                break;
            }
        }
    }
}

/// Check, then face the first bettor's raise.
///
/// On streets after street 0 a player who checked before the first bet
/// and acts again after it has the chance. Calling or raising takes it,
/// folding does not.
pub(crate) fn check_call_raise(streets: &[&[Action]], stats: &mut [PlayerHandStats]) {
    for (n, actions) in streets.iter().enumerate().skip(1) {
        let mut checkers = BTreeSet::new();
        let mut bettor = None;
        for action in actions.iter().filter(|a| !a.kind.is_draw()) {
            if bettor.is_none() {
                match action.kind {
                    ActionKind::Check => {
                        checkers.insert(action.player);
                    }
                    _ if action.kind.is_aggressive() => bettor = Some(action.player),
                    _ => {}
                }
                continue;
            }
            if !checkers.remove(&action.player) {
                continue;
            }
            let player = &mut stats[action.player];
            player.check_call_raise_chance[n] = true;
            player.check_call_raise_done[n] = !action.kind.is_fold();
            player.check_call_done[n] = action.kind.is_call();
            player.check_raise_done[n] = action.kind.is_aggressive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Money;
    use crate::hand::RaiseAmounts;

    fn act(player: usize, kind: ActionKind) -> Action {
        Action {
            player,
            kind,
            all_in: false,
        }
    }

    fn bet() -> ActionKind {
        ActionKind::Bet(Money::from_cents(10))
    }

    const EMPTY: &[Action] = &[];

    fn blank(n: usize) -> Vec<PlayerHandStats> {
        (0..n).map(|i| PlayerHandStats::new(i as u8 + 1, "p", None)).collect()
    }

    #[test]
    fn test_lone_all_in_does_not_see_empty_street() {
        let street0 = vec![
            Action {
                player: 0,
                kind: ActionKind::Call(Money::from_cents(10)),
                all_in: true,
            },
            act(1, ActionKind::Check),
        ];
        let streets: Vec<&[Action]> = vec![street0.as_slice(), EMPTY, EMPTY];
        let mut stats = blank(2);
        let at = seen_streets(&streets, EMPTY, &mut stats);
        assert_eq!([0, 0, 0, 0, 0], at);
        assert!(!stats[0].street_seen[1]);
    }

    #[test]
    fn test_two_all_ins_see_every_street() {
        let allin = |p| Action {
            player: p,
            kind: ActionKind::Call(Money::from_cents(10)),
            all_in: true,
        };
        let street0 = vec![allin(0), allin(1)];
        let streets: Vec<&[Action]> = vec![street0.as_slice(), EMPTY, EMPTY, EMPTY];
        let mut stats = blank(2);
        let at = seen_streets(&streets, EMPTY, &mut stats);
        assert_eq!([0, 2, 2, 2, 0], at);
        assert_eq!(2, showdown(3, &[false, false], &[true, true], &mut stats));
        assert!(stats[1].saw_showdown);
    }

    #[test]
    fn test_all_in_counts_next_to_actors() {
        let street0 = vec![
            Action {
                player: 0,
                kind: ActionKind::Call(Money::from_cents(10)),
                all_in: true,
            },
            act(1, ActionKind::Call(Money::from_cents(10))),
            act(2, ActionKind::Check),
        ];
        let street1 = vec![act(1, ActionKind::Check), act(2, ActionKind::Check)];
        let streets: Vec<&[Action]> = vec![street0.as_slice(), street1.as_slice()];
        let mut stats = blank(3);
        let at = seen_streets(&streets, EMPTY, &mut stats);
        assert_eq!(3, at[1]);
        assert!(stats[0].street_seen[1]);
    }

    #[test]
    fn test_cbet_and_fold_to_cbet() {
        let street0 = vec![
            act(0, bet()),
            act(1, ActionKind::Call(Money::from_cents(10))),
            act(2, ActionKind::Call(Money::from_cents(10))),
        ];
        let street1 = vec![
            act(1, ActionKind::Check),
            act(2, ActionKind::Check),
            act(0, bet()),
            act(1, ActionKind::Fold),
            act(2, ActionKind::Call(Money::from_cents(10))),
        ];
        let streets: Vec<&[Action]> = vec![street0.as_slice(), street1.as_slice()];
        let mut stats = blank(3);
        continuation_bets(&streets, &mut stats);
        assert!(stats[0].cbet_chance[1] && stats[0].cbet_done[1]);
        assert!(stats[1].fold_to_cbet_chance[1] && stats[1].fold_to_cbet_done[1]);
        assert!(stats[2].fold_to_cbet_chance[1] && !stats[2].fold_to_cbet_done[1]);
    }

    #[test]
    fn test_raise_over_cbet_ends_fold_chances() {
        let street0 = vec![
            act(0, bet()),
            act(1, ActionKind::Call(Money::from_cents(10))),
            act(2, ActionKind::Call(Money::from_cents(10))),
        ];
        let street1 = vec![
            act(1, ActionKind::Check),
            act(2, ActionKind::Check),
            act(0, bet()),
            act(
                1,
                ActionKind::Raise(RaiseAmounts {
                    call: Money::from_cents(10),
                    raise_by: Money::from_cents(20),
                    raise_to: Money::from_cents(30),
                }),
            ),
            act(2, ActionKind::Fold),
        ];
        let streets: Vec<&[Action]> = vec![street0.as_slice(), street1.as_slice()];
        let mut stats = blank(3);
        continuation_bets(&streets, &mut stats);
        assert!(stats[0].cbet_done[1]);
        assert!(stats[1].fold_to_cbet_chance[1] && !stats[1].fold_to_cbet_done[1]);
        assert!(!stats[2].fold_to_cbet_chance[1]);
        assert!(!stats[2].fold_to_cbet_done[1]);
    }

    #[test]
    fn test_donk_bet_removes_cbet_chance() {
        let street0 = vec![act(0, bet()), act(1, ActionKind::Call(Money::from_cents(10)))];
        let street1 = vec![act(1, bet()), act(0, ActionKind::Call(Money::from_cents(10)))];
        let streets: Vec<&[Action]> = vec![street0.as_slice(), street1.as_slice()];
        let mut stats = blank(2);
        continuation_bets(&streets, &mut stats);
        assert!(!stats[0].cbet_chance[1]);
    }

    #[test]
    fn test_check_raise() {
        let street1 = vec![
            act(0, ActionKind::Check),
            act(1, ActionKind::Check),
            act(2, bet()),
            act(0, ActionKind::Raise(crate::hand::RaiseAmounts {
                call: Money::from_cents(10),
                raise_by: Money::from_cents(20),
                raise_to: Money::from_cents(30),
            })),
            act(1, ActionKind::Fold),
        ];
        let streets: Vec<&[Action]> = vec![EMPTY, street1.as_slice()];
        let mut stats = blank(3);
        check_call_raise(&streets, &mut stats);
        assert!(stats[0].check_call_raise_chance[1] && stats[0].check_raise_done[1]);
        assert!(stats[1].check_call_raise_chance[1] && !stats[1].check_call_raise_done[1]);
        assert!(!stats[2].check_call_raise_chance[1]);
    }
}
