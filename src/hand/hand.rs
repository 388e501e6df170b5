use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::core::{Card, Money};

use super::action::{Action, ActionKind, BlindType, RaiseAmounts, RaiseIdiom};
use super::errors::{HandError, PotError};
use super::game_type::{GameBase, GameType, TournamentInfo};
use super::player::{HoleCards, Player};
use super::position::assign_positions;
use super::pot::{Pot, PotSettlement};
use super::street::Street;

/// One street of a hand as it was observed.
///
/// `present` is false for streets the hand never reached. `last_bet` is
/// the highest total any player has in front of them on this street.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreetState {
    pub street: Street,
    pub present: bool,
    pub board: Vec<Card>,
    pub actions: Vec<Action>,
    pub last_bet: Money,
}

impl StreetState {
    fn new(street: Street) -> Self {
        StreetState {
            street,
            present: false,
            board: Vec::new(),
            actions: Vec::new(),
            last_bet: Money::ZERO,
        }
    }
}

/// The canonical model of a single played hand.
///
/// It is filled through the `add_*` callbacks in street order and closed
/// with [`Hand::finalize`]. Every chip that leaves a stack goes through the
/// pot ledger, so the model refuses anything that would break the
/// accounting. After finalizing the hand only answers questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    pub site: String,
    pub hand_id: String,
    pub table_name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub game_type: GameType,
    pub tournament: Option<TournamentInfo>,
    pub max_seats: Option<u8>,
    pub button_seat: Option<u8>,
    pub hero: Option<String>,
    pub players: Vec<Player>,
    pub streets: Vec<StreetState>,
    pub stated_total_pot: Option<Money>,
    pub stated_rake: Option<Money>,
    pot: Pot,
    rake: Option<Money>,
}

impl Hand {
    pub fn new(site: &str, hand_id: &str, game_type: GameType) -> Self {
        let streets = game_type
            .base()
            .streets()
            .iter()
            .map(|s| StreetState::new(*s))
            .collect();
        Hand {
            site: site.to_string(),
            hand_id: hand_id.to_string(),
            table_name: String::new(),
            start_time: None,
            game_type,
            tournament: None,
            max_seats: None,
            button_seat: None,
            hero: None,
            players: Vec::new(),
            streets,
            stated_total_pot: None,
            stated_rake: None,
            pot: Pot::new(),
            rake: None,
        }
    }

    pub fn base(&self) -> GameBase {
        self.game_type.base()
    }

    pub fn is_finalized(&self) -> bool {
        self.pot.is_finalized()
    }

    pub fn pot(&self) -> &Pot {
        &self.pot
    }

    pub fn settlement(&self) -> Option<&PotSettlement> {
        self.pot.settlement()
    }

    /// Rake taken, known once the hand is finalized.
    pub fn rake(&self) -> Option<Money> {
        self.rake
    }

    pub fn player_idx(&self, name: &str) -> Result<usize, HandError> {
        self.players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| HandError::UnknownPlayer(name.to_string()))
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn street(&self, street: Street) -> Option<&StreetState> {
        self.streets.iter().find(|s| s.street == street)
    }

    /// Betting streets the hand reached, in order.
    pub fn played_streets(&self) -> impl Iterator<Item = &StreetState> {
        self.streets
            .iter()
            .skip(1)
            .filter(|s| s.present)
    }

    /// Max seats as stated in the header, otherwise a guess from the number
    /// of players.
    pub fn max_seats_or_guess(&self) -> u8 {
        if let Some(max) = self.max_seats {
            return max;
        }
        match (self.base(), self.players.len()) {
            (GameBase::Stud, _) => 8,
            (_, 0..=2) => 2,
            (_, 3..=6) => 6,
            _ => 9,
        }
    }

    pub fn add_player(&mut self, seat: u8, name: &str, stack: Money) -> Result<usize, HandError> {
        self.check_open()?;
        if self.players.iter().any(|p| p.name == name) {
            return Err(HandError::DuplicatePlayer(name.to_string()));
        }
        if self.players.iter().any(|p| p.seat == seat) {
            return Err(HandError::DuplicateSeat(seat));
        }
        if stack.is_negative() {
            return Err(HandError::NegativeStack {
                player: name.to_string(),
                stack,
            });
        }
        let idx = self.pot.add_player()?;
        trace!(seat, name, %stack, "Adding player");
        self.players.push(Player::new(seat, name, stack));
        Ok(idx)
    }

    /// Record that the hand reached `street`.
    pub fn mark_street(&mut self, street: Street) -> Result<(), HandError> {
        self.check_open()?;
        self.street_mut(street)?.present = true;
        Ok(())
    }

    pub fn set_button(&mut self, seat: u8) -> Result<(), HandError> {
        self.check_open()?;
        self.button_seat = Some(seat);
        Ok(())
    }

    pub fn add_blind(&mut self, name: &str, blind: BlindType, amount: Money) -> Result<(), HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        let blind_street = self.base().blind_street();
        let (live, dead) = match blind {
            BlindType::Small | BlindType::Big => (amount, Money::ZERO),
            BlindType::Both => {
                let live = amount.min(self.game_type.big_blind);
                (live, amount - live)
            }
            BlindType::ExtraSmall => (Money::ZERO, amount),
        };
        self.remove_from_stack(idx, amount)?;
        if dead.is_positive() {
            self.commit_dead(idx, dead)?;
        }
        if live.is_positive() {
            self.commit_live(idx, blind_street, live)?;
            let st = self.street_mut(blind_street)?;
            st.present = true;
            if live > st.last_bet {
                st.last_bet = live;
            }
        }
        self.push_action(
            Street::BlindsAntes,
            idx,
            ActionKind::PostBlind { blind, amount },
            false,
        )
    }

    pub fn add_ante(&mut self, name: &str, amount: Money) -> Result<(), HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        self.remove_from_stack(idx, amount)?;
        self.commit_dead(idx, amount)?;
        self.players[idx].posted_ante = true;
        self.push_action(Street::BlindsAntes, idx, ActionKind::PostAnte(amount), false)
    }

    pub fn add_bring_in(&mut self, name: &str, amount: Money) -> Result<(), HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        let street = Street::Third;
        self.street_mut(street)?;
        self.remove_from_stack(idx, amount)?;
        self.commit_live(idx, street, amount)?;
        self.players[idx].brought_in = true;
        self.street_mut(street)?.last_bet = amount;
        self.push_action(street, idx, ActionKind::BringIn(amount), false)
    }

    pub fn add_bet(&mut self, street: Street, name: &str, amount: Money, all_in: bool) -> Result<(), HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        self.street_mut(street)?;
        self.remove_from_stack(idx, amount)?;
        self.commit_live(idx, street, amount)?;
        let total = self.players[idx].street_commitment(street);
        let st = self.street_mut(street)?;
        if total > st.last_bet {
            st.last_bet = total;
        }
        self.push_action(street, idx, ActionKind::Bet(amount), all_in)
    }

    pub fn add_call(&mut self, street: Street, name: &str, amount: Money, all_in: bool) -> Result<(), HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        self.street_mut(street)?;
        self.remove_from_stack(idx, amount)?;
        self.commit_live(idx, street, amount)?;
        self.push_action(street, idx, ActionKind::Call(amount), all_in)
    }

    /// Apply a raise in any of the textual idioms. The ledger sees the
    /// normalized amounts, which are returned.
    pub fn add_raise(
        &mut self,
        street: Street,
        name: &str,
        idiom: RaiseIdiom,
        all_in: bool,
    ) -> Result<RaiseAmounts, HandError> {
        let amounts = self.apply_raise(street, name, idiom)?;
        let idx = self.player_idx(name)?;
        self.push_action(street, idx, ActionKind::Raise(amounts), all_in)?;
        Ok(amounts)
    }

    /// Stud completion of the bring-in, accounted like a raise.
    pub fn add_complete(
        &mut self,
        street: Street,
        name: &str,
        idiom: RaiseIdiom,
        all_in: bool,
    ) -> Result<RaiseAmounts, HandError> {
        let amounts = self.apply_raise(street, name, idiom)?;
        let idx = self.player_idx(name)?;
        self.push_action(street, idx, ActionKind::Complete(amounts), all_in)?;
        Ok(amounts)
    }

    pub fn add_check(&mut self, street: Street, name: &str) -> Result<(), HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        self.push_action(street, idx, ActionKind::Check, false)
    }

    pub fn add_fold(&mut self, street: Street, name: &str) -> Result<(), HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        self.pot.add_fold(idx)?;
        self.players[idx].folded = true;
        self.push_action(street, idx, ActionKind::Fold, false)
    }

    pub fn add_discard(&mut self, street: Street, name: &str, count: u8, cards: Vec<Card>) -> Result<(), HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        self.push_action(street, idx, ActionKind::Discard { count, cards }, false)
    }

    pub fn add_stands_pat(&mut self, street: Street, name: &str, cards: Vec<Card>) -> Result<(), HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        self.push_action(street, idx, ActionKind::StandsPat { cards }, false)
    }

    /// Cards a player holds as of `street`. `dealt` marks the player as
    /// having been dealt into the hand.
    pub fn add_hole_cards(
        &mut self,
        street: Street,
        name: &str,
        cards: HoleCards,
        dealt: bool,
    ) -> Result<(), HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        self.street_mut(street)?;
        let player = &mut self.players[idx];
        player.dealt |= dealt;
        player.hole_cards.insert(street, cards);
        Ok(())
    }

    pub fn add_board_cards(&mut self, street: Street, cards: Vec<Card>) -> Result<(), HandError> {
        self.check_open()?;
        let st = self.street_mut(street)?;
        st.present = true;
        st.board.extend(cards);
        Ok(())
    }

    /// Cards revealed at the end of the hand. `mucked` cards were seen
    /// in the summary but not shown at the table.
    pub fn add_shown_cards(&mut self, name: &str, cards: Vec<Card>, mucked: bool) -> Result<(), HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        let player = &mut self.players[idx];
        if mucked {
            player.mucked = true;
        } else {
            player.shown = true;
        }
        for c in cards {
            if !player.shown_cards.contains(&c) {
                player.shown_cards.push(c);
            }
        }
        Ok(())
    }

    pub fn add_collect_pot(&mut self, name: &str, amount: Money) -> Result<(), HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        if amount.is_negative() {
            return Err(HandError::NegativeCollect {
                player: name.to_string(),
                amount,
            });
        }
        self.players[idx].collected += amount;
        Ok(())
    }

    /// Snapshot the pot after the actions of `street` have been applied.
    pub fn mark_total(&mut self, street: Street) -> Result<Money, HandError> {
        self.check_open()?;
        Ok(self.pot.mark_total(street)?)
    }

    pub fn total_collected(&self) -> Money {
        self.players.iter().map(|p| p.collected).sum()
    }

    /// Money that left the stacks so far. Before finalizing this always
    /// equals the pot total.
    pub fn money_removed(&self) -> Money {
        self.players
            .iter()
            .map(|p| p.starting_stack - p.stack)
            .sum()
    }

    /// Rake split evenly among the players who collected, one entry per
    /// player. The indivisible remainder goes to the earliest seats.
    pub fn rake_shares(&self) -> Vec<Money> {
        let mut shares = vec![Money::ZERO; self.players.len()];
        let Some(rake) = self.rake else {
            return shares;
        };
        let collectors: Vec<usize> = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.collected.is_positive())
            .map(|(i, _)| i)
            .collect();
        for (idx, share) in collectors.iter().zip(rake.split_even(collectors.len())) {
            shares[*idx] = share;
        }
        shares
    }

    /// Close the ledger. Uncalled money goes back to its owner, winnings
    /// are checked against the pot and the rake is settled.
    pub fn finalize(&mut self) -> Result<(), HandError> {
        self.check_open()?;
        let settlement = self.pot.finalize()?.clone();

        for (idx, amount) in &settlement.returned {
            let player = &mut self.players[*idx];
            player.returned += *amount;
            player.stack += *amount;
        }

        let collected = self.total_collected();
        if collected > settlement.total {
            return Err(HandError::CollectedExceedsPot {
                collected,
                pot: settlement.total,
            });
        }
        for player in self.players.iter_mut() {
            player.stack += player.collected;
        }

        let rake = self.stated_rake.unwrap_or(settlement.total - collected);
        self.rake = Some(rake);
        self.assign_positions();

        debug!(
            hand_id = %self.hand_id,
            total = %settlement.total,
            %rake,
            layers = settlement.layers.len(),
            "Finalized hand"
        );
        Ok(())
    }

    fn assign_positions(&mut self) {
        let anchor = match self.base() {
            GameBase::Stud => self.players.iter().find(|p| p.brought_in).map(|p| p.seat),
            GameBase::Hold | GameBase::Draw => self.button_seat,
        };
        let seats: Vec<u8> = self
            .players
            .iter()
            .filter(|p| p.in_rotation())
            .map(|p| p.seat)
            .collect();
        let positions = assign_positions(self.base(), &seats, anchor);
        let mut positions = positions.into_iter();
        for player in self.players.iter_mut() {
            player.position = if player.in_rotation() {
                positions.next().flatten()
            } else {
                None
            };
        }
    }

    fn apply_raise(&mut self, street: Street, name: &str, idiom: RaiseIdiom) -> Result<RaiseAmounts, HandError> {
        self.check_open()?;
        let idx = self.player_idx(name)?;
        let last_bet = self.street_mut(street)?.last_bet;
        let committed = self.players[idx].street_commitment(street);
        let amounts = RaiseAmounts::normalize(last_bet, committed, idiom);
        trace!(?amounts, ?idiom, "Normalized raise");
        self.remove_from_stack(idx, amounts.added())?;
        self.commit_live(idx, street, amounts.added())?;
        self.street_mut(street)?.last_bet = amounts.raise_to;
        Ok(amounts)
    }

    fn remove_from_stack(&mut self, idx: usize, amount: Money) -> Result<(), HandError> {
        if amount.is_negative() {
            return Err(PotError::NegativeAmount {
                player: idx,
                amount,
            }
            .into());
        }
        let player = &mut self.players[idx];
        let stack = player.stack - amount;
        if stack.is_negative() {
            return Err(HandError::NegativeStack {
                player: player.name.clone(),
                stack,
            });
        }
        player.stack = stack;
        if stack.is_zero() && amount.is_positive() {
            player.all_in = true;
        }
        Ok(())
    }

    fn commit_live(&mut self, idx: usize, street: Street, amount: Money) -> Result<(), HandError> {
        self.pot.add_money(idx, amount)?;
        self.players[idx]
            .bets
            .entry(street)
            .or_default()
            .push(amount);
        Ok(())
    }

    fn commit_dead(&mut self, idx: usize, amount: Money) -> Result<(), HandError> {
        self.pot.add_common_money(amount)?;
        self.players[idx]
            .bets
            .entry(Street::BlindsAntes)
            .or_default()
            .push(amount);
        Ok(())
    }

    fn push_action(&mut self, street: Street, player: usize, kind: ActionKind, all_in: bool) -> Result<(), HandError> {
        if all_in {
            self.players[player].all_in = true;
        }
        let all_in = all_in || (self.players[player].all_in && kind.money_added().is_positive());
        let st = self.street_mut(street)?;
        st.present = true;
        st.actions.push(Action { player, kind, all_in });
        Ok(())
    }

    fn street_mut(&mut self, street: Street) -> Result<&mut StreetState, HandError> {
        self.streets
            .iter_mut()
            .find(|s| s.street == street)
            .ok_or(HandError::StreetNotInGame(street))
    }

    fn check_open(&self) -> Result<(), HandError> {
        if self.is_finalized() {
            Err(HandError::Finalized)
        } else {
            Ok(())
        }
    }
}
