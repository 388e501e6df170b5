use tracing::{instrument, trace};

use crate::hand::{GameBase, Hand, HandError, Street};

use super::errors::{ImportError, ParseError};
use super::site::{HandEvent, SiteAdapter};

/// Parse one hand text into a finalized [`Hand`].
///
/// Seats without chips are dropped. Seats that are sitting out are kept.
///
/// The passes run strictly in this order: header, seats, player patterns,
/// street sections, blinds, antes, bring-in, button, hole cards, board
/// cards, actions street by street (each followed by a pot snapshot),
/// showdown, collections and the stated totals. Then the hand is
/// finalized.
///
/// `hero` overrides the hero found in the text.
#[instrument(level = "trace", skip(adapter, text))]
pub fn build_hand(adapter: &mut dyn SiteAdapter, text: &str, hero: Option<&str>) -> Result<Hand, ImportError> {
    let header = adapter.read_header(text).map_err(|source| {
        let hand_id = match &source {
            ParseError::GameTypeUnrecognized { hand_id } => hand_id.clone(),
            _ => None,
        };
        ImportError::GameType { hand_id, source }
    })?;

    let hand_id = Some(header.hand_id.clone());
    let parse_err = |source: ParseError| ImportError::Parse {
        hand_id: hand_id.clone(),
        source,
    };
    let hand_err = |source: HandError| ImportError::Accounting {
        hand_id: hand_id.clone(),
        source,
    };

    let mut hand = Hand::new(adapter.site_name(), &header.hand_id, header.game_type.clone());
    hand.table_name = header.table_name;
    hand.start_time = header.start_time;
    hand.tournament = header.tournament;
    hand.max_seats = header.max_seats;

    let seats = adapter.read_players(text).map_err(parse_err)?;
    let mut names = Vec::new();
    for seat in seats {
        let Some(stack) = seat.stack else {
            trace!(name = %seat.name, "Dropping seat without chips");
            continue;
        };
        let idx = hand.add_player(seat.seat, &seat.name, stack).map_err(hand_err)?;
        let player = &mut hand.players[idx];
        player.sitting_out = seat.sitting_out;
        player.dealt = !seat.sitting_out;
        if seat.sitting_out {
            trace!(name = %seat.name, "Seat is sitting out");
        }
        names.push(seat.name);
    }
    if names.is_empty() {
        return Err(parse_err(ParseError::MissingField("players")));
    }
    adapter.compile_player_patterns(&names).map_err(parse_err)?;

    let spans = adapter
        .mark_streets(text, &header.game_type)
        .map_err(parse_err)?;
    for street in spans.streets().filter(|s| *s != Street::BlindsAntes) {
        hand.mark_street(street).map_err(hand_err)?;
    }

    let blinds = adapter.read_blinds(text, &spans).map_err(parse_err)?;
    apply_all(&mut hand, blinds).map_err(hand_err)?;
    let antes = adapter.read_antes(text, &spans).map_err(parse_err)?;
    apply_all(&mut hand, antes).map_err(hand_err)?;
    if hand.base() == GameBase::Stud {
        let bring_in = adapter.read_bring_in(text, &spans).map_err(parse_err)?;
        apply_all(&mut hand, bring_in).map_err(hand_err)?;
    }
    if let Some(button) = adapter.read_button(text).map_err(parse_err)? {
        hand.set_button(button).map_err(hand_err)?;
    }

    let played: Vec<Street> = spans
        .streets()
        .filter(|s| *s != Street::BlindsAntes)
        .collect();
    for street in &played {
        let street_text = spans.text(text, *street).unwrap_or_default();
        let cards = adapter.read_hole_cards(*street, street_text).map_err(parse_err)?;
        apply_all(&mut hand, cards).map_err(hand_err)?;
    }
    for street in &played {
        let street_text = spans.text(text, *street).unwrap_or_default();
        let board = adapter
            .read_community_cards(*street, street_text)
            .map_err(parse_err)?;
        apply_all(&mut hand, board).map_err(hand_err)?;
    }
    for street in &played {
        let street_text = spans.text(text, *street).unwrap_or_default();
        let actions = adapter.read_actions(*street, street_text).map_err(parse_err)?;
        apply_all(&mut hand, actions).map_err(hand_err)?;
        hand.mark_total(*street).map_err(hand_err)?;
    }

    let shown = adapter.read_showdown(text).map_err(parse_err)?;
    apply_all(&mut hand, shown).map_err(hand_err)?;
    let collected = adapter.read_collected(text).map_err(parse_err)?;
    apply_all(&mut hand, collected).map_err(hand_err)?;
    // Sitting out players who posted or acted were dealt in.
    for player in hand.players.iter_mut().filter(|p| p.sitting_out) {
        player.dealt |= player.folded || !player.bets.is_empty();
    }
    let totals = adapter.read_totals(text).map_err(parse_err)?;
    hand.stated_total_pot = totals.total_pot;
    hand.stated_rake = totals.rake;

    hand.hero = match hero {
        Some(name) if hand.player(name).is_some() => Some(name.to_string()),
        _ => hand
            .players
            .iter()
            .find(|p| p.hole_cards.values().any(|h| !h.closed.is_empty()))
            .map(|p| p.name.clone()),
    };

    hand.finalize().map_err(hand_err)?;
    Ok(hand)
}

fn apply_all(hand: &mut Hand, events: Vec<HandEvent>) -> Result<(), HandError> {
    for event in events {
        apply(hand, event)?;
    }
    Ok(())
}

/// The callback contract: one hand model call per event.
pub fn apply(hand: &mut Hand, event: HandEvent) -> Result<(), HandError> {
    trace!(?event, "Applying event");
    match event {
        HandEvent::Blind {
            player,
            blind,
            amount,
        } => hand.add_blind(&player, blind, amount),
        HandEvent::Ante { player, amount } => hand.add_ante(&player, amount),
        HandEvent::BringIn { player, amount } => hand.add_bring_in(&player, amount),
        HandEvent::Bet {
            street,
            player,
            amount,
            all_in,
        } => hand.add_bet(street, &player, amount, all_in),
        HandEvent::Call {
            street,
            player,
            amount,
            all_in,
        } => hand.add_call(street, &player, amount, all_in),
        HandEvent::Raise {
            street,
            player,
            idiom,
            all_in,
        } => hand.add_raise(street, &player, idiom, all_in).map(|_| ()),
        HandEvent::Complete {
            street,
            player,
            idiom,
            all_in,
        } => hand.add_complete(street, &player, idiom, all_in).map(|_| ()),
        HandEvent::Check { street, player } => hand.add_check(street, &player),
        HandEvent::Fold { street, player } => hand.add_fold(street, &player),
        HandEvent::Discard {
            street,
            player,
            count,
            cards,
        } => hand.add_discard(street, &player, count, cards),
        HandEvent::StandsPat {
            street,
            player,
            cards,
        } => hand.add_stands_pat(street, &player, cards),
        HandEvent::HoleCards {
            street,
            player,
            cards,
        } => hand.add_hole_cards(street, &player, cards, true),
        HandEvent::BoardCards { street, cards } => hand.add_board_cards(street, cards),
        HandEvent::ShownCards {
            player,
            cards,
            mucked,
        } => hand.add_shown_cards(&player, cards, mucked),
        HandEvent::CollectPot { player, amount } => hand.add_collect_pot(&player, amount),
    }
}
