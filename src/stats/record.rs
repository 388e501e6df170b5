use crate::core::Money;
use crate::hand::Position;

/// Number of betting streets a hand can have. Index `0` is street 0
/// (preflop, third street or the deal).
pub const STREETS: usize = 5;

/// Derived facts about one player in one hand.
///
/// Per street arrays are indexed by street number. Chance and done flags
/// come in pairs: the done flag is only ever true when its chance flag is.
///
/// `won_when_seen` and `won_at_showdown` are the share of the money
/// collected in the hand that went to this player, `1.0` for an outright
/// win, `0.0` when the street was not seen.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerHandStats {
    pub seat: u8,
    pub name: String,
    pub position: Option<Position>,

    pub street0_vpi: bool,
    pub street0_aggr: bool,
    pub street0_3b_chance: bool,
    pub street0_3b_done: bool,
    pub street0_4b_chance: bool,
    pub street0_4b_done: bool,
    pub fold_to_3b_chance: bool,
    pub fold_to_3b_done: bool,
    pub fold_to_4b_chance: bool,
    pub fold_to_4b_done: bool,
    pub raise_first_in_chance: bool,
    pub raise_first_in_done: bool,

    pub steal_chance: bool,
    pub steal_attempted: bool,
    /// Only the blinds get these.
    pub fold_to_steal_chance: bool,
    pub folded_to_steal: bool,

    pub street_seen: [bool; STREETS],
    pub street_aggr: [bool; STREETS],
    pub street_calls: [u32; STREETS],
    pub street_bets: [u32; STREETS],
    pub street_raises: [u32; STREETS],

    pub cbet_chance: [bool; STREETS],
    pub cbet_done: [bool; STREETS],
    pub fold_to_cbet_chance: [bool; STREETS],
    pub fold_to_cbet_done: [bool; STREETS],

    pub check_call_raise_chance: [bool; STREETS],
    pub check_call_raise_done: [bool; STREETS],
    pub check_call_done: [bool; STREETS],
    pub check_raise_done: [bool; STREETS],

    pub saw_showdown: bool,
    pub won_at_showdown: f64,
    pub won_when_seen: [f64; STREETS],
    pub all_in: bool,

    pub total_bet: Money,
    pub winnings: Money,
    pub rake_share: Money,
    pub total_profit: Money,
}

impl PlayerHandStats {
    pub fn new(seat: u8, name: &str, position: Option<Position>) -> Self {
        PlayerHandStats {
            seat,
            name: name.to_string(),
            position,
            ..Default::default()
        }
    }

    /// Aggression factor input for `street`: bets plus raises.
    pub fn aggressive_actions(&self, street: usize) -> u32 {
        self.street_bets[street] + self.street_raises[street]
    }
}

/// Hand level derived facts plus one [`PlayerHandStats`] per seated
/// player, in seat order of the hand.
///
/// `players_at_street[0]` counts the players dealt in.
/// `pot_entering[n]` is the pot at the start of street `n + 1`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandStats {
    pub site: String,
    pub hand_id: String,
    pub seats: usize,
    pub players_vpi: usize,
    pub street0_raises: usize,
    pub players_at_street: [usize; STREETS],
    pub players_at_showdown: usize,
    pub pot_entering: [Option<Money>; STREETS - 1],
    pub showdown_pot: Option<Money>,
    pub total_pot: Money,
    pub rake: Money,
    pub players: Vec<PlayerHandStats>,
}

impl HandStats {
    pub fn player(&self, name: &str) -> Option<&PlayerHandStats> {
        self.players.iter().find(|p| p.name == name)
    }
}
