use tracing::{debug, instrument};

use crate::hand::{Action, GameBase, Hand, HandError, Player, Street};

use super::preflop;
use super::record::{HandStats, PlayerHandStats, STREETS};
use super::streets;

/// Derive the stats of a finalized hand.
///
/// This only reads the hand. Calling it twice on the same hand gives the
/// same result.
///
/// Players sitting out keep their money in the result, but what they do
/// is not a decision and stays out of the action stats.
#[instrument(level = "trace", skip(hand), fields(hand_id = %hand.hand_id))]
pub fn compute(hand: &Hand) -> Result<HandStats, HandError> {
    let settlement = hand.settlement().ok_or(HandError::NotFinalized)?;
    let rake = hand.rake().ok_or(HandError::NotFinalized)?;

    let active = |action: &&Action| !hand.players[action.player].sitting_out;
    let actions_of = |street: Street| -> Vec<Action> {
        hand.street(street)
            .map(|st| st.actions.iter().filter(active).cloned().collect())
            .unwrap_or_default()
    };
    let action_streets = hand.game_type.category.action_streets();
    let owned: Vec<Vec<Action>> = action_streets.iter().map(|s| actions_of(*s)).collect();
    let street_actions: Vec<&[Action]> = owned.iter().map(Vec::as_slice).collect();
    let forced = actions_of(Street::BlindsAntes);
    let forced = forced.as_slice();

    let mut players: Vec<PlayerHandStats> = hand
        .players
        .iter()
        .map(|p| PlayerHandStats::new(p.seat, &p.name, p.position))
        .collect();

    let street0 = street_actions.first().copied().unwrap_or_default();
    let summary = preflop::vpip_and_aggression(street0, &mut players);
    preflop::raise_levels(street0, &mut players);
    preflop::raise_first_in(street0, &mut players);
    if hand.base() == GameBase::Hold {
        let positions: Vec<_> = hand.players.iter().map(|p| p.position).collect();
        preflop::steals(street0, &positions, &mut players);
    }

    streets::counts(&street_actions, &mut players);
    let mut players_at_street = streets::seen_streets(&street_actions, forced, &mut players);
    let dealt = |p: &&Player| p.dealt && !p.sitting_out;
    for (stats, player) in players.iter_mut().zip(&hand.players) {
        stats.street_seen[0] = dealt(&player);
    }
    players_at_street[0] = hand.players.iter().filter(dealt).count();

    let last_street = street_actions
        .iter()
        .rposition(|a| !a.is_empty())
        .unwrap_or(0);
    let folded: Vec<bool> = hand.players.iter().map(|p| p.folded).collect();
    let all_in: Vec<bool> = hand.players.iter().map(|p| p.all_in).collect();
    let players_at_showdown = streets::showdown(last_street, &folded, &all_in, &mut players);

    streets::continuation_bets(&street_actions, &mut players);
    streets::check_call_raise(&street_actions, &mut players);

    let total_collected = hand.total_collected();
    let rake_shares = hand.rake_shares();
    for (idx, (stats, player)) in players.iter_mut().zip(&hand.players).enumerate() {
        let share = if total_collected.is_positive() {
            player.collected.cents() as f64 / total_collected.cents() as f64
        } else {
            0.0
        };
        for n in 0..STREETS {
            if stats.street_seen[n] {
                stats.won_when_seen[n] = share;
            }
        }
        if stats.saw_showdown {
            stats.won_at_showdown = share;
        }
        stats.all_in = player.all_in;
        stats.total_bet = player.total_bet();
        stats.winnings = player.collected;
        stats.rake_share = rake_shares[idx];
        stats.total_profit = player.net();
    }

    let mut pot_entering = [None; STREETS - 1];
    for (n, street) in action_streets.iter().enumerate().take(STREETS - 1) {
        if action_streets.get(n + 1).is_some_and(|next| hand.street(*next).is_some_and(|s| s.present)) {
            pot_entering[n] = hand.pot().total_at(*street);
        }
    }
    let showdown_pot = (players_at_showdown > 0).then_some(settlement.total);

    debug!(
        players_vpi = summary.players_vpi,
        players_at_showdown,
        "Computed hand stats"
    );

    Ok(HandStats {
        site: hand.site.clone(),
        hand_id: hand.hand_id.clone(),
        seats: hand.players.len(),
        players_vpi: summary.players_vpi,
        street0_raises: summary.raises,
        players_at_street,
        players_at_showdown,
        pot_entering,
        showdown_pot,
        total_pot: settlement.total,
        rake,
        players,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Money;
    use crate::hand::{Category, Currency, GameType, LimitType, Position, TableKind};
    use crate::parse::sites::{samples, PokerStarsAdapter};
    use crate::parse::{build_hand, SiteConfig};

    fn parse(text: &str) -> Hand {
        let mut adapter = PokerStarsAdapter::new(&SiteConfig::default()).unwrap();
        build_hand(&mut adapter, text, None).unwrap()
    }

    #[test]
    fn test_requires_finalized_hand() {
        let hand = Hand::new(
            "Test",
            "1",
            GameType {
                category: Category::Holdem,
                limit: LimitType::NoLimit,
                currency: Currency::Usd,
                kind: TableKind::Ring,
                small_blind: Money::from_cents(1),
                big_blind: Money::from_cents(2),
            },
        );
        assert_eq!(Err(HandError::NotFinalized), compute(&hand));
    }

    #[test_log::test]
    fn test_cutoff_steal_and_cbet() {
        let hand = parse(samples::HOLDEM_STEAL);
        let stats = compute(&hand).unwrap();

        let dave = stats.player("dave").unwrap();
        assert_eq!(Some(Position::Seat(1)), dave.position);
        assert!(dave.street0_vpi && dave.street0_aggr);
        assert!(dave.steal_chance && dave.steal_attempted);
        assert!(dave.raise_first_in_chance && dave.raise_first_in_done);
        assert!(dave.cbet_chance[1] && dave.cbet_done[1]);
        assert_eq!(Money::from_cents(7), dave.total_profit);

        let frank = stats.player("frank").unwrap();
        assert_eq!(Some(Position::SmallBlind), frank.position);
        assert!(frank.fold_to_steal_chance && frank.folded_to_steal);
        assert!(!frank.street0_vpi);

        let alice = stats.player("alice").unwrap();
        assert_eq!(Some(Position::BigBlind), alice.position);
        assert!(alice.fold_to_steal_chance && !alice.folded_to_steal);
        assert!(alice.street0_vpi);
        assert!(alice.fold_to_cbet_chance[1] && alice.fold_to_cbet_done[1]);
        assert_eq!(Money::from_cents(-6), alice.total_profit);

        let erin = stats.player("erin").unwrap();
        assert!(!erin.steal_chance);

        assert_eq!(2, stats.players_vpi);
        assert_eq!(6, stats.players_at_street[0]);
        assert_eq!(2, stats.players_at_street[1]);
        assert_eq!(0, stats.players_at_showdown);
        assert_eq!(Some(Money::from_cents(13)), stats.pot_entering[0]);
        assert_eq!(1.0, dave.won_when_seen[1]);
    }

    #[test]
    fn test_both_blinds_fold_to_steal() {
        let text = samples::HOLDEM_STEAL
            .replace("alice: calls $0.04\n", "alice: folds\n")
            .replace("dave collected $0.13 from pot", "dave collected $0.05 from pot")
            .replace("Total pot $0.13", "Total pot $0.05");
        let text = text
            .split("*** FLOP ***")
            .next()
            .map(|pre| {
                format!(
                    "{pre}Uncalled bet ($0.04) returned to dave\ndave collected $0.05 from pot\n*** SUMMARY ***\nTotal pot $0.05 | Rake $0"
                )
            })
            .unwrap();
        let stats = compute(&parse(&text)).unwrap();
        for name in ["frank", "alice"] {
            let p = stats.player(name).unwrap();
            assert!(p.fold_to_steal_chance, "{name}");
            assert!(p.folded_to_steal, "{name}");
        }
        assert!(stats.player("dave").unwrap().steal_attempted);
        assert_eq!(1, stats.players_vpi);
    }

    #[test]
    fn test_tournament_showdown_and_split_of_winnings() {
        let stats = compute(&parse(samples::TOURNAMENT_ALL_IN)).unwrap();
        assert_eq!(2, stats.players_at_showdown);
        let ann = stats.player("ann").unwrap();
        let ben = stats.player("ben").unwrap();
        let cat = stats.player("cat").unwrap();
        assert!(ann.saw_showdown && ben.saw_showdown && !cat.saw_showdown);
        assert_eq!(1.0, ben.won_at_showdown);
        assert_eq!(0.0, ann.won_at_showdown);
        assert!(ben.all_in);
        assert!(ben.street0_3b_chance && ben.street0_3b_done);
        assert!(ann.fold_to_3b_chance && !ann.fold_to_3b_done);
        assert_eq!(Money::from_units(800), ben.total_profit);
        assert_eq!(Money::from_units(-400), ann.total_profit);
        assert_eq!(Some(Money::from_units(1200)), stats.showdown_pot);
    }

    #[test]
    fn test_stud_has_no_steals() {
        let stats = compute(&parse(samples::RAZZ)).unwrap();
        assert!(stats.players.iter().all(|p| !p.steal_chance));
        let quinn = stats.player("quinn").unwrap();
        assert_eq!(Some(Position::SmallBlind), quinn.position);
        assert!(!quinn.street0_vpi);
        let rose = stats.player("rose").unwrap();
        assert!(rose.street0_aggr && rose.raise_first_in_done);
        let pat = stats.player("pat").unwrap();
        assert!(pat.street0_3b_done);
        assert!(pat.cbet_done[1]);
    }

    #[test]
    fn test_draw_counts_and_check_call() {
        let stats = compute(&parse(samples::TRIPLE_DRAW)).unwrap();
        let sam = stats.player("sam").unwrap();
        let uma = stats.player("uma").unwrap();
        assert_eq!(1, sam.street_raises[1]);
        assert_eq!(1, uma.street_bets[1]);
        assert_eq!(1, uma.street_calls[1]);
        assert!(uma.street_seen[2]);
        assert!(uma.fold_to_cbet_chance[2] && uma.fold_to_cbet_done[2]);
        assert_eq!(Money::from_cents(4), sam.rake_share);
        assert_eq!(Money::from_cents(41), sam.total_profit);
    }

    #[test_log::test]
    fn test_sitting_out_fold_is_not_a_decision() {
        let text = samples::TOURNAMENT_ALL_IN
            .replace("cat: posts the ante 5\n", "cat: posts the ante 5\ndan: posts the ante 5\n")
            .replace("Dealt to ann [Qs Qh]\n", "Dealt to ann [Qs Qh]\ndan: folds\n")
            .replace("ben collected 1200 from pot", "ben collected 1205 from pot")
            .replace("Total pot 1200", "Total pot 1205");
        let stats = compute(&parse(&text)).unwrap();

        let dan = stats.player("dan").unwrap();
        assert!(!dan.street_seen[0]);
        assert!(!dan.raise_first_in_chance && !dan.street0_vpi);
        assert_eq!(Money::from_units(-5), dan.total_profit);
        assert_eq!(Money::from_units(805), stats.player("ben").unwrap().total_profit);

        let ann = stats.player("ann").unwrap();
        assert!(ann.raise_first_in_chance && ann.raise_first_in_done);
        assert_eq!(3, stats.players_at_street[0]);
        assert_eq!(4, stats.seats);
        assert_eq!(Money::from_units(1205), stats.total_pot);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_reparse_is_byte_identical() {
        use crate::hand::HandRecord;

        let first_hand = parse(samples::TOURNAMENT_ALL_IN);
        let second_hand = parse(samples::TOURNAMENT_ALL_IN);
        assert_eq!(first_hand, second_hand);

        let first = HandRecord::from_hand(&first_hand).unwrap();
        let second = HandRecord::from_hand(&second_hand).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );

        let first = compute(&first_hand).unwrap();
        let second = compute(&second_hand).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
