use std::fmt;

use super::game_type::GameBase;

/// Table position relative to the button, or to the bring-in for stud.
///
/// `Seat(0)` is the button, `Seat(1)` the cutoff and so on toward the first
/// player to act.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    SmallBlind,
    BigBlind,
    Seat(u8),
}

impl Position {
    /// Button, cutoff, hijack and the small blind.
    pub fn is_late(self) -> bool {
        matches!(
            self,
            Position::Seat(0) | Position::Seat(1) | Position::Seat(2) | Position::SmallBlind
        )
    }

    pub fn is_blind(self) -> bool {
        matches!(self, Position::SmallBlind | Position::BigBlind)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::SmallBlind => write!(f, "S"),
            Position::BigBlind => write!(f, "B"),
            Position::Seat(n) => write!(f, "{n}"),
        }
    }
}

/// Assign positions for the players sitting at `seats`.
///
/// Empty seats are skipped, so the distance from the button is counted in
/// players, not in seat numbers. The anchor is the button for button games
/// and the bring-in seat for stud. If the anchor seat is empty the last
/// occupied seat before it takes its place.
///
/// Returns one entry per input seat, in input order. Without an anchor no
/// position can be given and every entry is `None`.
pub fn assign_positions(base: GameBase, seats: &[u8], anchor: Option<u8>) -> Vec<Option<Position>> {
    let mut positions = vec![None; seats.len()];
    let Some(anchor) = anchor else {
        return positions;
    };
    if seats.is_empty() {
        return positions;
    }

    let mut ring: Vec<(u8, usize)> = seats.iter().enumerate().map(|(i, s)| (*s, i)).collect();
    ring.sort();
    let n = ring.len();
    // Last occupied seat at or before the anchor, wrapping around.
    let anchor_idx = ring
        .iter()
        .rposition(|(seat, _)| *seat <= anchor)
        .unwrap_or(n - 1);

    for (ring_idx, (_, input_idx)) in ring.iter().enumerate() {
        let d = (ring_idx + n - anchor_idx) % n;
        let pos = match base {
            GameBase::Stud => {
                if d == 0 {
                    Position::SmallBlind
                } else {
                    Position::Seat((n - 1 - d) as u8)
                }
            }
            GameBase::Hold | GameBase::Draw if n == 2 => {
                if d == 0 {
                    Position::SmallBlind
                } else {
                    Position::BigBlind
                }
            }
            GameBase::Hold | GameBase::Draw => match d {
                0 => Position::Seat(0),
                1 => Position::SmallBlind,
                2 => Position::BigBlind,
                _ => Position::Seat((n - d) as u8),
            },
        };
        positions[*input_idx] = Some(pos);
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_max_positions() {
        let seats = [1, 2, 3, 4, 5, 6];
        let pos = assign_positions(GameBase::Hold, &seats, Some(4));
        assert_eq!(
            vec![
                Some(Position::Seat(3)),
                Some(Position::Seat(2)),
                Some(Position::Seat(1)),
                Some(Position::Seat(0)),
                Some(Position::SmallBlind),
                Some(Position::BigBlind),
            ],
            pos
        );
    }

    #[test]
    fn test_empty_seats_are_skipped() {
        // Nine handed table with four players, button on seat 7.
        let seats = [2, 5, 7, 9];
        let pos = assign_positions(GameBase::Hold, &seats, Some(7));
        assert_eq!(Some(Position::BigBlind), pos[0]);
        assert_eq!(Some(Position::Seat(1)), pos[1]);
        assert_eq!(Some(Position::Seat(0)), pos[2]);
        assert_eq!(Some(Position::SmallBlind), pos[3]);
    }

    #[test]
    fn test_dead_button_uses_previous_seat() {
        let pos = assign_positions(GameBase::Hold, &[1, 3, 5], Some(4));
        assert_eq!(Some(Position::Seat(0)), pos[1]);
        assert_eq!(Some(Position::SmallBlind), pos[2]);
        assert_eq!(Some(Position::BigBlind), pos[0]);
    }

    #[test]
    fn test_heads_up_button_is_small_blind() {
        let pos = assign_positions(GameBase::Hold, &[3, 8], Some(8));
        assert_eq!(vec![Some(Position::BigBlind), Some(Position::SmallBlind)], pos);
    }

    #[test]
    fn test_stud_anchors_on_bring_in() {
        let pos = assign_positions(GameBase::Stud, &[1, 2, 3, 4], Some(2));
        assert_eq!(Some(Position::SmallBlind), pos[1]);
        assert_eq!(Some(Position::Seat(2)), pos[2]);
        assert_eq!(Some(Position::Seat(1)), pos[3]);
        assert_eq!(Some(Position::Seat(0)), pos[0]);
    }

    #[test]
    fn test_no_anchor() {
        assert_eq!(vec![None, None], assign_positions(GameBase::Hold, &[1, 2], None));
    }

    #[test]
    fn test_late_positions() {
        assert!(Position::Seat(2).is_late());
        assert!(Position::SmallBlind.is_late());
        assert!(!Position::BigBlind.is_late());
        assert!(!Position::Seat(3).is_late());
        assert_eq!("B", Position::BigBlind.to_string());
    }
}
