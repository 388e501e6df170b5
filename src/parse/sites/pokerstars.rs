use regex::Regex;
use tracing::{debug, trace, warn};

use crate::core::{Card, Money};
use crate::hand::{
    BlindType, Category, Currency, GameBase, GameType, HoleCards, LimitType, RaiseIdiom, Street,
    TableKind, TournamentInfo,
};
use crate::parse::config::SiteConfig;
use crate::parse::errors::ParseError;
use crate::parse::site::{HandEvent, HandHeader, SeatInfo, SiteAdapter, StatedTotals, StreetSpans};
use crate::parse::timestamp;

/// Game names as printed in the header. Longer names that share a prefix
/// come first.
const GAME_NAMES: [(&str, Category); 11] = [
    ("Hold'em", Category::Holdem),
    ("5 Card Omaha", Category::FiveCardOmahaHi),
    ("Omaha Hi/Lo", Category::OmahaHiLo),
    ("Omaha", Category::OmahaHi),
    ("Razz", Category::Razz),
    ("7 Card Stud Hi/Lo", Category::StudHiLo),
    ("7 Card Stud", Category::StudHi),
    ("Triple Draw 2-7 Lowball", Category::TripleDraw27),
    ("Single Draw 2-7 Lowball", Category::SingleDraw27),
    ("5 Card Draw", Category::FiveCardDraw),
    ("Badugi", Category::Badugi),
];

/// Verbs after `name: ` that carry no betting action.
const IGNORED_VERBS: [&str; 20] = [
    "posts ",
    "brings in ",
    "shows ",
    "mucks",
    "doesn't show",
    "sits out",
    "is sitting out",
    "sitting out",
    "is disconnected",
    "is connected",
    "has timed out",
    "has returned",
    "leaves the table",
    "joins the table",
    "is away",
    "returns",
    "will be allowed",
    "was removed",
    "re-buys",
    "cashed out",
];

/// Patterns built from the names seated at the current hand.
#[derive(Debug, Clone)]
struct PlayerPatterns {
    names: Vec<String>,
    line: Regex,
    dealt: Regex,
    collected: Regex,
    summary_cards: Regex,
}

impl PlayerPatterns {
    fn compile(names: &[String]) -> Result<Self, ParseError> {
        let mut sorted: Vec<&String> = names.iter().collect();
        sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = sorted
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        Ok(PlayerPatterns {
            names: names.to_vec(),
            line: Regex::new(&format!(r"^({alternation}): (.*)$"))?,
            dealt: Regex::new(&format!(r"^Dealt to ({alternation})((?:\s*\[[^\]]*\])+)\s*$"))?,
            collected: Regex::new(&format!(r"^({alternation}) collected (\S+) from"))?,
            summary_cards: Regex::new(&format!(
                r"^Seat \d+: ({alternation})(?: \([^)]*\))* (mucked|showed) \[([^\]]*)\]"
            ))?,
        })
    }
}

/// Adapter for PokerStars hand histories in English.
///
/// Covers hold'em and omaha, stud and razz, and the draw games, in ring
/// games and tournaments.
#[derive(Debug, Clone)]
pub struct PokerStarsAdapter {
    currency_symbols: Vec<String>,
    re_hand_id: Regex,
    re_tournament: Regex,
    re_game: Regex,
    re_level: Regex,
    re_stakes: Regex,
    re_local_time: Regex,
    re_site_time: Regex,
    re_table: Regex,
    re_seat: Regex,
    re_marker: Regex,
    re_blind: Regex,
    re_ante: Regex,
    re_bring_in: Regex,
    re_board: Regex,
    re_brackets: Regex,
    re_call: Regex,
    re_bet: Regex,
    re_raise: Regex,
    re_complete: Regex,
    re_discard: Regex,
    re_stands_pat: Regex,
    re_shows: Regex,
    re_totals: Regex,
    players: Option<PlayerPatterns>,
}

impl PokerStarsAdapter {
    pub const SITE_NAME: &'static str = "PokerStars";

    pub fn new(config: &SiteConfig) -> Result<Self, ParseError> {
        const AMOUNT: &str = r"(\S+)";
        const ALL_IN: &str = r"( and is all-in)?";
        const DATE: &str = r"(\d{4})/(\d{1,2})/(\d{1,2}) (\d{1,2}):(\d{2}):(\d{2}) ([A-Z]+)";

        let game_names = GAME_NAMES
            .iter()
            .map(|(name, _)| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");

        Ok(PokerStarsAdapter {
            currency_symbols: config.currency_symbols.clone(),
            re_hand_id: Regex::new(r"^PokerStars (?:Zoom )?(?:Hand|Game) #(\d+):\s*(.*)$")?,
            re_tournament: Regex::new(
                r"Tournament #(\d+), (?:Freeroll|(\S+?)\+(\S+?)(?:\+\S+)?(?: [A-Z]{3})?)\s",
            )?,
            re_game: Regex::new(&format!(r"({game_names}) (No Limit|Pot Limit|Limit)\b"))?,
            re_level: Regex::new(r"- Level ([IVXLCDM]+|\d+)")?,
            re_stakes: Regex::new(r"[(,]\s*([^/()\s,]+)/([^/()\s]+?)(?: ([A-Z]{3}))?\)")?,
            re_local_time: Regex::new(&format!(r"\[{DATE}\]"))?,
            re_site_time: Regex::new(&format!(r"- {DATE}"))?,
            re_table: Regex::new(
                r"^Table '([^']+)' (\d+)-max(?: \([^)]*\))?(?: Seat #(\d+) is the button)?",
            )?,
            re_seat: Regex::new(r"^Seat (\d+): (.+?) \(([^)]*)\)(.*)$")?,
            re_marker: Regex::new(r"(?m)^\*\*\* (.+?) \*\*\*")?,
            re_blind: Regex::new(&format!(
                r"^posts (small blind|big blind|small & big blinds) {AMOUNT}"
            ))?,
            re_ante: Regex::new(&format!(r"^posts the ante {AMOUNT}"))?,
            re_bring_in: Regex::new(&format!(r"^brings in for {AMOUNT}"))?,
            re_board: Regex::new(r"^\*\*\* (?:FLOP|TURN|RIVER) \*\*\*.*\[([^\]]*)\]\s*$")?,
            re_brackets: Regex::new(r"\[([^\]]*)\]")?,
            re_call: Regex::new(&format!(r"^calls {AMOUNT}{ALL_IN}$"))?,
            re_bet: Regex::new(&format!(r"^bets {AMOUNT}{ALL_IN}$"))?,
            re_raise: Regex::new(&format!(r"^raises {AMOUNT} to {AMOUNT}{ALL_IN}$"))?,
            re_complete: Regex::new(&format!(r"^completes it to {AMOUNT}{ALL_IN}$"))?,
            re_discard: Regex::new(r"^discards (\d+) cards?(?: \[([^\]]*)\])?")?,
            re_stands_pat: Regex::new(r"^stands pat(?: on \[([^\]]*)\])?")?,
            re_shows: Regex::new(r"^shows \[([^\]]*)\]")?,
            re_totals: Regex::new(r"^Total pot (\S+).*?\| Rake (\S+)")?,
            players: None,
        })
    }

    fn money(&self, text: &str) -> Result<Money, ParseError> {
        let mut cleaned = text.to_string();
        for symbol in &self.currency_symbols {
            cleaned = cleaned.replace(symbol.as_str(), "");
        }
        Ok(Money::parse_amount(&cleaned)?)
    }

    fn players(&self) -> Result<&PlayerPatterns, ParseError> {
        self.players.as_ref().ok_or(ParseError::PatternsNotCompiled)
    }

    /// `name: rest` lines of `text` for seated players.
    fn player_lines<'a>(
        &'a self,
        text: &'a str,
    ) -> Result<impl Iterator<Item = (&'a str, &'a str, &'a str)> + 'a, ParseError> {
        let patterns = self.players()?;
        Ok(lines(text).filter_map(move |line| {
            let caps = patterns.line.captures(line)?;
            let name = caps.get(1)?.as_str();
            let rest = caps.get(2)?.as_str();
            Some((line, name, rest))
        }))
    }

    fn read_header_time(&self, line: &str) -> Option<chrono::DateTime<chrono::Utc>> {
        let caps = self
            .re_local_time
            .captures(line)
            .or_else(|| self.re_site_time.captures(line))?;
        let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
        timestamp::from_parts(year, num(2)?, num(3)?, num(4)?, num(5)?, num(6)?, caps.get(7)?.as_str())
    }

    fn hole_cards_for(&self, street: Street, cards: Vec<Card>) -> HoleCards {
        match street.base() {
            Some(GameBase::Stud) => {
                let expected = GameBase::Stud
                    .street_number(street)
                    .map(|n| n + 3)
                    .unwrap_or(0);
                if cards.len() == expected {
                    // Own cards: two down, four up, the last one down.
                    let mut hole = HoleCards::default();
                    for (i, c) in cards.into_iter().enumerate() {
                        if i < 2 || i == 6 {
                            hole.closed.push(c);
                        } else {
                            hole.open.push(c);
                        }
                    }
                    hole
                } else {
                    HoleCards {
                        open: cards,
                        closed: Vec::new(),
                    }
                }
            }
            _ => HoleCards {
                open: Vec::new(),
                closed: cards,
            },
        }
    }

    fn cards_in_brackets(&self, text: &str) -> Result<Vec<Card>, ParseError> {
        let mut cards = Vec::new();
        for caps in self.re_brackets.captures_iter(text) {
            cards.extend(Card::parse_list(&caps[1])?);
        }
        Ok(cards)
    }

    fn parse_action(&self, street: Street, name: &str, rest: &str, line: &str) -> Result<Option<HandEvent>, ParseError> {
        let player = name.to_string();
        if rest == "folds" || rest.starts_with("folds ") {
            return Ok(Some(HandEvent::Fold { street, player }));
        }
        if rest == "checks" {
            return Ok(Some(HandEvent::Check { street, player }));
        }
        if let Some(caps) = self.re_call.captures(rest) {
            return Ok(Some(HandEvent::Call {
                street,
                player,
                amount: self.money(&caps[1])?,
                all_in: caps.get(2).is_some(),
            }));
        }
        if let Some(caps) = self.re_bet.captures(rest) {
            return Ok(Some(HandEvent::Bet {
                street,
                player,
                amount: self.money(&caps[1])?,
                all_in: caps.get(2).is_some(),
            }));
        }
        if let Some(caps) = self.re_raise.captures(rest) {
            return Ok(Some(HandEvent::Raise {
                street,
                player,
                idiom: RaiseIdiom::To(self.money(&caps[2])?),
                all_in: caps.get(3).is_some(),
            }));
        }
        if let Some(caps) = self.re_complete.captures(rest) {
            return Ok(Some(HandEvent::Complete {
                street,
                player,
                idiom: RaiseIdiom::To(self.money(&caps[1])?),
                all_in: caps.get(2).is_some(),
            }));
        }
        if let Some(caps) = self.re_discard.captures(rest) {
            let count = caps[1]
                .parse::<u8>()
                .map_err(|_| ParseError::UnknownAction(line.to_string()))?;
            let cards = match caps.get(2) {
                Some(m) => Card::parse_list(m.as_str())?,
                None => Vec::new(),
            };
            return Ok(Some(HandEvent::Discard {
                street,
                player,
                count,
                cards,
            }));
        }
        if let Some(caps) = self.re_stands_pat.captures(rest) {
            let cards = match caps.get(1) {
                Some(m) => Card::parse_list(m.as_str())?,
                None => Vec::new(),
            };
            return Ok(Some(HandEvent::StandsPat {
                street,
                player,
                cards,
            }));
        }
        if IGNORED_VERBS.iter().any(|v| rest.starts_with(v)) {
            trace!(line, "Ignoring non betting line");
            return Ok(None);
        }
        Err(ParseError::UnknownAction(line.to_string()))
    }
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim_end)
}

fn street_for_marker(base: GameBase, marker: &str) -> Option<Street> {
    match (base, marker) {
        (GameBase::Hold, "HOLE CARDS") => Some(Street::Preflop),
        (GameBase::Hold, "FLOP") => Some(Street::Flop),
        (GameBase::Hold, "TURN") => Some(Street::Turn),
        (GameBase::Hold, "RIVER") => Some(Street::River),
        (GameBase::Stud, "3rd STREET") => Some(Street::Third),
        (GameBase::Stud, "4th STREET") => Some(Street::Fourth),
        (GameBase::Stud, "5th STREET") => Some(Street::Fifth),
        (GameBase::Stud, "6th STREET") => Some(Street::Sixth),
        (GameBase::Stud, "7th STREET" | "RIVER") => Some(Street::Seventh),
        (GameBase::Draw, "DEALING HANDS") => Some(Street::Deal),
        (GameBase::Draw, "FIRST DRAW" | "DRAW") => Some(Street::DrawOne),
        (GameBase::Draw, "SECOND DRAW") => Some(Street::DrawTwo),
        (GameBase::Draw, "THIRD DRAW") => Some(Street::DrawThree),
        _ => None,
    }
}

impl SiteAdapter for PokerStarsAdapter {
    fn site_name(&self) -> &str {
        Self::SITE_NAME
    }

    fn looks_like_hand(&self, text: &str) -> bool {
        lines(text.trim_start())
            .next()
            .is_some_and(|first| self.re_hand_id.is_match(first))
    }

    fn read_header(&self, text: &str) -> Result<HandHeader, ParseError> {
        let mut text_lines = lines(text.trim_start());
        let first = text_lines.next().unwrap_or_default();
        let caps = self
            .re_hand_id
            .captures(first)
            .ok_or(ParseError::GameTypeUnrecognized { hand_id: None })?;
        let hand_id = caps[1].to_string();
        let rest = caps.get(2).map_or("", |m| m.as_str());
        let unrecognized = || ParseError::GameTypeUnrecognized {
            hand_id: Some(hand_id.clone()),
        };

        let game = self.re_game.captures(rest).ok_or_else(unrecognized)?;
        let category = GAME_NAMES
            .iter()
            .find(|(name, _)| *name == &game[1])
            .map(|(_, c)| *c)
            .ok_or_else(unrecognized)?;
        let limit = match &game[2] {
            "No Limit" => LimitType::NoLimit,
            "Pot Limit" => LimitType::PotLimit,
            _ => LimitType::FixedLimit,
        };

        let stakes = self.re_stakes.captures(rest).ok_or_else(unrecognized)?;
        let small_blind = self.money(&stakes[1])?;
        let big_blind = self.money(&stakes[2])?;

        let tournament = self.re_tournament.captures(rest).map(|t| -> Result<_, ParseError> {
            Ok(TournamentInfo {
                tournament_id: t[1].to_string(),
                buy_in: t.get(2).map(|m| self.money(m.as_str())).transpose()?,
                fee: t.get(3).map(|m| self.money(m.as_str())).transpose()?,
                level: self.re_level.captures(rest).map(|l| l[1].to_string()),
            })
        });
        let tournament = tournament.transpose()?;

        let (kind, currency) = if tournament.is_some() {
            (TableKind::Tournament, Currency::TournamentChips)
        } else {
            let code = stakes.get(3).map_or("", |m| m.as_str());
            let symbol = self
                .currency_symbols
                .iter()
                .find(|s| stakes[1].starts_with(s.as_str()))
                .map_or("", |s| s.as_str());
            let currency = Currency::from_code(code)
                .filter(|c| *c != Currency::PlayMoney)
                .or_else(|| Currency::from_code(symbol))
                .unwrap_or(Currency::PlayMoney);
            (TableKind::Ring, currency)
        };

        let start_time = self.read_header_time(rest);
        if start_time.is_none() {
            warn!(hand_id = %hand_id, "No start time in header");
        }

        let (table_name, max_seats) = match text_lines.next().and_then(|l| self.re_table.captures(l)) {
            Some(t) => (t[1].to_string(), t[2].parse::<u8>().ok()),
            None => {
                debug!(hand_id = %hand_id, "No table line");
                (String::new(), None)
            }
        };

        Ok(HandHeader {
            hand_id,
            table_name,
            game_type: GameType {
                category,
                limit,
                currency,
                kind,
                small_blind,
                big_blind,
            },
            start_time,
            tournament,
            max_seats,
        })
    }

    fn read_players(&self, text: &str) -> Result<Vec<SeatInfo>, ParseError> {
        let preamble = text.split("\n***").next().unwrap_or(text);
        let mut seats = Vec::new();
        for line in lines(preamble) {
            let Some(caps) = self.re_seat.captures(line) else {
                continue;
            };
            let Ok(seat) = caps[1].parse::<u8>() else {
                continue;
            };
            let stack = match caps[3].split_once(" in chips") {
                Some((amount, _)) => Some(self.money(amount)?),
                None => None,
            };
            let tail = &caps[4];
            seats.push(SeatInfo {
                seat,
                name: caps[2].to_string(),
                stack,
                sitting_out: tail.contains("is sitting out") || tail.contains("out of hand"),
            });
        }
        Ok(seats)
    }

    fn compile_player_patterns(&mut self, names: &[String]) -> Result<(), ParseError> {
        if self.players.as_ref().is_some_and(|p| p.names == names) {
            trace!("Reusing player patterns");
            return Ok(());
        }
        self.players = Some(PlayerPatterns::compile(names)?);
        Ok(())
    }

    fn mark_streets(&self, text: &str, game_type: &GameType) -> Result<StreetSpans, ParseError> {
        let allowed = game_type.category.action_streets();
        let markers: Vec<(usize, Option<Street>)> = self
            .re_marker
            .captures_iter(text)
            .filter_map(|caps| {
                let start = caps.get(0)?.start();
                let street = street_for_marker(game_type.base(), &caps[1])
                    .filter(|s| allowed.contains(s));
                Some((start, street))
            })
            .collect();

        let first = markers
            .first()
            .map(|(start, _)| *start)
            .ok_or(ParseError::MissingField("street markers"))?;
        let mut spans = StreetSpans::new();
        spans.push(Street::BlindsAntes, 0..first);
        for (i, (start, street)) in markers.iter().enumerate() {
            let Some(street) = street else {
                continue;
            };
            let end = markers.get(i + 1).map_or(text.len(), |(s, _)| *s);
            if !spans.contains(*street) {
                spans.push(*street, *start..end);
            }
        }
        if !allowed.first().is_some_and(|s| spans.contains(*s)) {
            return Err(ParseError::MissingField("first street marker"));
        }
        Ok(spans)
    }

    fn read_blinds(&self, text: &str, spans: &StreetSpans) -> Result<Vec<HandEvent>, ParseError> {
        let preamble = spans.text(text, Street::BlindsAntes).unwrap_or_default();
        let mut events = Vec::new();
        let mut small_posted = false;
        for (_, name, rest) in self.player_lines(preamble)? {
            let Some(caps) = self.re_blind.captures(rest) else {
                continue;
            };
            let blind = match &caps[1] {
                "small blind" if small_posted => BlindType::ExtraSmall,
                "small blind" => {
                    small_posted = true;
                    BlindType::Small
                }
                "big blind" => BlindType::Big,
                _ => BlindType::Both,
            };
            events.push(HandEvent::Blind {
                player: name.to_string(),
                blind,
                amount: self.money(&caps[2])?,
            });
        }
        Ok(events)
    }

    fn read_antes(&self, text: &str, spans: &StreetSpans) -> Result<Vec<HandEvent>, ParseError> {
        let preamble = spans.text(text, Street::BlindsAntes).unwrap_or_default();
        let mut events = Vec::new();
        for (_, name, rest) in self.player_lines(preamble)? {
            if let Some(caps) = self.re_ante.captures(rest) {
                events.push(HandEvent::Ante {
                    player: name.to_string(),
                    amount: self.money(&caps[1])?,
                });
            }
        }
        Ok(events)
    }

    fn read_bring_in(&self, text: &str, spans: &StreetSpans) -> Result<Vec<HandEvent>, ParseError> {
        let sections = [Street::Third, Street::BlindsAntes]
            .into_iter()
            .filter_map(|s| spans.text(text, s));
        for section in sections {
            for (_, name, rest) in self.player_lines(section)? {
                if let Some(caps) = self.re_bring_in.captures(rest) {
                    return Ok(vec![HandEvent::BringIn {
                        player: name.to_string(),
                        amount: self.money(&caps[1])?,
                    }]);
                }
            }
            if let Some(line) = lines(section).find(|l| l.contains(": brings in for ")) {
                return Err(ParseError::UnmatchedBringIn(line.to_string()));
            }
        }
        Ok(Vec::new())
    }

    fn read_button(&self, text: &str) -> Result<Option<u8>, ParseError> {
        Ok(lines(text.trim_start())
            .nth(1)
            .and_then(|l| self.re_table.captures(l))
            .and_then(|caps| caps.get(3))
            .and_then(|m| m.as_str().parse::<u8>().ok()))
    }

    fn read_hole_cards(&self, street: Street, street_text: &str) -> Result<Vec<HandEvent>, ParseError> {
        let patterns = self.players()?;
        let mut events = Vec::new();
        for line in lines(street_text) {
            let Some(caps) = patterns.dealt.captures(line) else {
                continue;
            };
            let cards = self.cards_in_brackets(&caps[2])?;
            events.push(HandEvent::HoleCards {
                street,
                player: caps[1].to_string(),
                cards: self.hole_cards_for(street, cards),
            });
        }
        Ok(events)
    }

    fn read_community_cards(&self, street: Street, street_text: &str) -> Result<Vec<HandEvent>, ParseError> {
        if street.new_board_cards() == 0 {
            return Ok(Vec::new());
        }
        let Some(caps) = lines(street_text).next().and_then(|l| self.re_board.captures(l)) else {
            return Err(ParseError::MissingField("board cards"));
        };
        Ok(vec![HandEvent::BoardCards {
            street,
            cards: Card::parse_list(&caps[1])?,
        }])
    }

    fn read_actions(&self, street: Street, street_text: &str) -> Result<Vec<HandEvent>, ParseError> {
        let mut events = Vec::new();
        for (line, name, rest) in self.player_lines(street_text)? {
            if let Some(event) = self.parse_action(street, name, rest, line)? {
                events.push(event);
            }
        }
        Ok(events)
    }

    fn read_showdown(&self, text: &str) -> Result<Vec<HandEvent>, ParseError> {
        let patterns = self.players()?;
        let mut events = Vec::new();
        for (_, name, rest) in self.player_lines(text)? {
            if let Some(caps) = self.re_shows.captures(rest) {
                events.push(HandEvent::ShownCards {
                    player: name.to_string(),
                    cards: Card::parse_list(&caps[1])?,
                    mucked: false,
                });
            }
        }
        for line in lines(text) {
            if let Some(caps) = patterns.summary_cards.captures(line) {
                events.push(HandEvent::ShownCards {
                    player: caps[1].to_string(),
                    cards: Card::parse_list(&caps[3])?,
                    mucked: &caps[2] == "mucked",
                });
            }
        }
        Ok(events)
    }

    fn read_collected(&self, text: &str) -> Result<Vec<HandEvent>, ParseError> {
        let patterns = self.players()?;
        let mut events = Vec::new();
        for line in lines(text) {
            if let Some(caps) = patterns.collected.captures(line) {
                events.push(HandEvent::CollectPot {
                    player: caps[1].to_string(),
                    amount: self.money(&caps[2])?,
                });
            }
        }
        Ok(events)
    }

    fn read_totals(&self, text: &str) -> Result<StatedTotals, ParseError> {
        let Some(caps) = lines(text).find_map(|l| self.re_totals.captures(l)) else {
            return Ok(StatedTotals::default());
        };
        Ok(StatedTotals {
            total_pot: Some(self.money(&caps[1])?),
            rake: Some(self.money(&caps[2])?),
        })
    }
}
