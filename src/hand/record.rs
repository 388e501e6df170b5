use chrono::{DateTime, Utc};

use crate::core::{Card, Money};

use super::action::ActionKind;
use super::errors::HandError;
use super::game_type::{GameType, TournamentInfo};
use super::hand::Hand;
use super::pot::PotLayer;
use super::position::Position;
use super::street::Street;

/// Board cards dealt on one street.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardRecord {
    pub street: Street,
    pub cards: Vec<Card>,
}

/// One action in hand order, with its street and sequence number.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionRecord {
    pub street: Street,
    pub seq: usize,
    pub kind: ActionKind,
    pub all_in: bool,
}

/// The per player half of the output.
///
/// `card_indices` holds up to seven cards in compact form, `0` where the
/// card is unknown.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerRecord {
    pub seat: u8,
    pub name: String,
    pub starting_stack: Money,
    pub position: Option<Position>,
    pub sitting_out: bool,
    pub card_indices: [u8; 7],
    pub actions: Vec<ActionRecord>,
    pub winnings: Money,
    pub returned: Money,
    pub rake_share: Money,
    pub total_profit: Money,
}

/// A finished hand in plain, persistable form.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandRecord {
    pub site: String,
    pub hand_id: String,
    pub table_name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub seat_count: usize,
    pub max_seats: u8,
    pub game_type: GameType,
    pub tournament: Option<TournamentInfo>,
    pub board: Vec<BoardRecord>,
    pub players: Vec<PlayerRecord>,
    pub pots: Vec<PotLayer>,
    pub total_pot: Money,
    pub rake: Money,
}

impl HandRecord {
    pub fn from_hand(hand: &Hand) -> Result<Self, HandError> {
        let settlement = hand.settlement().ok_or(HandError::NotFinalized)?;
        let rake = hand.rake().ok_or(HandError::NotFinalized)?;
        let rake_shares = hand.rake_shares();

        let board = hand
            .streets
            .iter()
            .filter(|s| !s.board.is_empty())
            .map(|s| BoardRecord {
                street: s.street,
                cards: s.board.clone(),
            })
            .collect();

        let players = hand
            .players
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                let mut card_indices = [0u8; 7];
                for (slot, card) in card_indices.iter_mut().zip(p.known_cards()) {
                    *slot = card.to_index();
                }
                let mut seq = 0;
                let mut actions = Vec::new();
                for st in &hand.streets {
                    for action in &st.actions {
                        if action.player == idx {
                            actions.push(ActionRecord {
                                street: st.street,
                                seq,
                                kind: action.kind.clone(),
                                all_in: action.all_in,
                            });
                        }
                        seq += 1;
                    }
                }
                PlayerRecord {
                    seat: p.seat,
                    name: p.name.clone(),
                    starting_stack: p.starting_stack,
                    position: p.position,
                    sitting_out: p.sitting_out,
                    card_indices,
                    actions,
                    winnings: p.collected,
                    returned: p.returned,
                    rake_share: rake_shares[idx],
                    total_profit: p.net(),
                }
            })
            .collect();

        Ok(HandRecord {
            site: hand.site.clone(),
            hand_id: hand.hand_id.clone(),
            table_name: hand.table_name.clone(),
            start_time: hand.start_time,
            seat_count: hand.players.len(),
            max_seats: hand.max_seats_or_guess(),
            game_type: hand.game_type.clone(),
            tournament: hand.tournament.clone(),
            board,
            players,
            pots: settlement.layers.clone(),
            total_pot: settlement.total,
            rake,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::action::{BlindType, RaiseIdiom};
    use crate::hand::game_type::{Category, Currency, LimitType, TableKind};
    use crate::hand::player::HoleCards;

    fn c(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    fn finished_hand() -> Hand {
        let mut hand = Hand::new(
            "Test",
            "42",
            GameType {
                category: Category::Holdem,
                limit: LimitType::NoLimit,
                currency: Currency::Usd,
                kind: TableKind::Ring,
                small_blind: c(1),
                big_blind: c(2),
            },
        );
        hand.add_player(1, "hero", c(200)).unwrap();
        hand.add_player(4, "villain", c(200)).unwrap();
        hand.set_button(1).unwrap();
        hand.add_blind("hero", BlindType::Small, c(1)).unwrap();
        hand.add_blind("villain", BlindType::Big, c(2)).unwrap();
        hand.add_hole_cards(
            Street::Preflop,
            "hero",
            HoleCards {
                open: vec![],
                closed: Card::parse_list("Ah Ad").unwrap(),
            },
            true,
        )
        .unwrap();
        hand.add_raise(Street::Preflop, "hero", RaiseIdiom::To(c(6)), false)
            .unwrap();
        hand.add_call(Street::Preflop, "villain", c(4), false).unwrap();
        hand.add_board_cards(Street::Flop, Card::parse_list("2c 7d Ks").unwrap())
            .unwrap();
        hand.add_bet(Street::Flop, "villain", c(6), false).unwrap();
        hand.add_fold(Street::Flop, "hero").unwrap();
        hand.add_collect_pot("villain", c(12)).unwrap();
        hand.finalize().unwrap();
        hand
    }

    #[test]
    fn test_record_requires_finalized_hand() {
        let hand = Hand::new(
            "Test",
            "1",
            finished_hand().game_type.clone(),
        );
        assert_eq!(Err(HandError::NotFinalized), HandRecord::from_hand(&hand));
    }

    #[test]
    fn test_record_contents() {
        let record = HandRecord::from_hand(&finished_hand()).unwrap();
        assert_eq!(2, record.seat_count);
        assert_eq!(2, record.max_seats);
        assert_eq!(1, record.board.len());
        assert_eq!(c(12), record.total_pot);
        assert_eq!(Money::ZERO, record.rake);

        let hero = &record.players[0];
        assert_eq!([13, 26, 0, 0, 0, 0, 0], hero.card_indices);
        assert_eq!(Some(Position::SmallBlind), hero.position);
        assert_eq!(c(-6), hero.total_profit);
        // blind, raise, fold
        assert_eq!(3, hero.actions.len());
        assert!(hero.actions[0].seq < hero.actions[1].seq);

        let villain = &record.players[1];
        assert_eq!(c(6), villain.total_profit);
        assert_eq!(c(6), villain.returned);
    }
}
