//! The search-facing game state: an adapter between the board rule engine
//! and the tree search.
//!
//! Each explored branch owns an independently cloned [`GoState`], board
//! included. Nothing is shared between branches, so the search can hold any
//! number of hypothetical futures without disturbing the authoritative game.

use std::cmp::Ordering;
use std::fmt;

use log::warn;

use crate::board::{Board, Captures};
use crate::constants::{PASS_THRESHOLD, ROLLOUT_CAP_FACTOR, TERMINATION_THRESHOLD};
use crate::coord::{Coord, Side};
use crate::mcts::SearchState;

/// A move in the search vocabulary: place a stone or pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoMove {
    Place { at: Coord, side: Side },
    Pass { side: Side },
}

impl GoMove {
    pub fn side(self) -> Side {
        match self {
            GoMove::Place { side, .. } | GoMove::Pass { side } => side,
        }
    }
}

impl fmt::Display for GoMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoMove::Place { at, side } => write!(f, "{side} places a stone at {at}"),
            GoMove::Pass { side } => write!(f, "{side} passes"),
        }
    }
}

/// One explorable game state: a board owned by value, the side to move, the
/// consecutive-pass count and the running capture tally.
#[derive(Debug, Clone)]
pub struct GoState {
    board: Board,
    to_move: Side,
    pass_streak: u8,
    move_count: u32,
    captures: Captures,
}

impl GoState {
    pub fn new(size: u8) -> Self {
        Self::from_board(Board::new(size), Side::Black)
    }

    /// Wrap an existing position, typically a clone of the authoritative
    /// board, for exploration.
    pub fn from_board(board: Board, to_move: Side) -> Self {
        GoState {
            board,
            to_move,
            pass_streak: 0,
            move_count: 0,
            captures: Captures::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Stones each side has lost since this state was created.
    pub fn captures(&self) -> Captures {
        self.captures
    }

    /// The side to move has lost once it is down to almost no legal moves;
    /// its opponent is the winner.
    pub fn check_winner(&self) -> Option<Side> {
        if self.board.should_allow_pass(self.to_move, TERMINATION_THRESHOLD) {
            Some(self.to_move.opponent())
        } else {
            None
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.pass_streak >= 2 || self.check_winner().is_some()
    }

    /// Every place the side to move may play, plus a pass once the position
    /// is resolved enough to offer one.
    pub fn legal_moves(&self) -> Vec<GoMove> {
        let side = self.to_move;
        let mut moves: Vec<GoMove> = self
            .board
            .all_legal_moves(side)
            .into_iter()
            .map(|at| GoMove::Place { at, side })
            .collect();
        if moves.len() <= PASS_THRESHOLD {
            moves.push(GoMove::Pass { side });
        }
        moves
    }

    /// Apply a move to a copy of this state; the original is untouched.
    pub fn apply(&self, mv: &GoMove) -> GoState {
        let mut next = self.clone();
        match *mv {
            GoMove::Pass { .. } => {
                next.board.clear_ko();
                next.pass_streak += 1;
            }
            GoMove::Place { at, side } => {
                next.board.place_stone(at, side);
                let captures = next.board.process_neighbor_stones(at, side);
                next.captures.absorb(captures);
                next.pass_streak = 0;
            }
        }
        next.to_move = next.to_move.opponent();
        next.move_count += 1;
        next
    }

    /// Final score: each side's territory minus the stones it lost.
    /// Returns 1.0 for a Black win, 0.0 for a White win, 0.5 for a draw.
    pub fn outcome(&self) -> f64 {
        let territory = self.board.score_area();
        let black = territory.black as i64 - self.captures.get(Side::Black) as i64;
        let white = territory.white as i64 - self.captures.get(Side::White) as i64;
        match black.cmp(&white) {
            Ordering::Greater => 1.0,
            Ordering::Less => 0.0,
            Ordering::Equal => 0.5,
        }
    }

    /// Play uniformly random legal moves until the game ends or the step
    /// cap is reached, then score the position.
    ///
    /// Sampled moves are re-checked before they are applied. A move that
    /// fails the re-check cannot corrupt the playout: the anomaly is logged
    /// and the rollout returns the score of the position as it stands.
    pub fn rollout(&self, rng: &mut fastrand::Rng) -> f64 {
        let size = self.board.size() as usize;
        let cap = ROLLOUT_CAP_FACTOR * size * size;

        let mut state = self.clone();
        for _ in 0..cap {
            if state.is_terminal() {
                break;
            }
            let moves = state.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.usize(..moves.len())];
            if let GoMove::Place { at, side } = mv {
                if !state.board.is_legal(at, side) {
                    warn!("rollout sampled an illegal move ({mv}), scoring as is");
                    break;
                }
            }
            state = state.apply(&mv);
        }
        state.outcome()
    }

    /// Black is player one: the side that moves first.
    pub fn player1_to_move(&self) -> bool {
        self.to_move == Side::Black
    }
}

impl fmt::Display for GoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} to move", self.board, self.to_move)
    }
}

impl SearchState for GoState {
    type Move = GoMove;

    fn legal_moves(&self) -> Vec<GoMove> {
        GoState::legal_moves(self)
    }

    fn apply(&self, mv: &GoMove) -> GoState {
        GoState::apply(self, mv)
    }

    fn is_terminal(&self) -> bool {
        GoState::is_terminal(self)
    }

    fn rollout(&self, rng: &mut fastrand::Rng) -> f64 {
        GoState::rollout(self, rng)
    }

    fn player1_to_move(&self) -> bool {
        GoState::player1_to_move(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_display() {
        let place = GoMove::Place {
            at: Coord::new(3, 4),
            side: Side::Black,
        };
        let pass = GoMove::Pass { side: Side::White };
        assert_eq!(place.to_string(), "Black places a stone at (3, 4)");
        assert_eq!(pass.to_string(), "White passes");
    }

    #[test]
    fn no_pass_offered_in_open_positions() {
        let state = GoState::new(5);
        let moves = state.legal_moves();
        assert_eq!(moves.len(), 25);
        assert!(moves.iter().all(|m| matches!(m, GoMove::Place { .. })));
    }

    #[test]
    fn pass_is_offered_once_the_position_narrows() {
        // Eight empty points left, under the pass threshold.
        let board = Board::from_rows(&["XX__", "XX__", "XX__", "XX__"]);
        let state = GoState::from_board(board, Side::Black);

        let moves = state.legal_moves();
        assert_eq!(moves.len(), 9);
        assert!(moves.contains(&GoMove::Pass { side: Side::Black }));
        assert!(!state.is_terminal());
    }

    #[test]
    fn apply_never_mutates_the_original() {
        let state = GoState::new(5);
        let mv = GoMove::Place {
            at: Coord::new(2, 2),
            side: Side::Black,
        };
        let next = state.apply(&mv);

        assert_eq!(state.move_count(), 0);
        assert!(!state.board().is_occupied(Coord::new(2, 2)));
        assert_eq!(next.move_count(), 1);
        assert!(next.board().is_occupied(Coord::new(2, 2)));
        assert_eq!(next.to_move(), Side::White);
    }

    #[test]
    fn double_pass_is_terminal() {
        let state = GoState::new(5);
        let after_one = state.apply(&GoMove::Pass { side: Side::Black });
        assert!(!after_one.is_terminal());
        let after_two = after_one.apply(&GoMove::Pass { side: Side::White });
        assert!(after_two.is_terminal());
    }

    #[test]
    fn a_played_stone_resets_the_pass_streak() {
        let state = GoState::new(5);
        let s = state.apply(&GoMove::Pass { side: Side::Black });
        let s = s.apply(&GoMove::Place {
            at: Coord::new(0, 0),
            side: Side::White,
        });
        let s = s.apply(&GoMove::Pass { side: Side::Black });
        assert!(!s.is_terminal());
    }

    #[test]
    fn empty_board_outcome_is_a_draw() {
        let state = GoState::new(5);
        assert_eq!(state.outcome(), 0.5);
    }

    #[test]
    fn captures_count_against_their_owner() {
        // White loses its only stone, so Black surrounds every empty
        // region and wins the adjusted score.
        let board = Board::from_rows(&["_X__", "XO__", "_X__", "____"]);
        let state = GoState::from_board(board, Side::Black);
        let next = state.apply(&GoMove::Place {
            at: Coord::new(1, 2),
            side: Side::Black,
        });
        assert_eq!(next.captures().white, 1);
        assert_eq!(next.outcome(), 1.0);
    }

    #[test]
    fn rollout_is_deterministic_under_a_fixed_seed() {
        let state = GoState::new(5);
        let a = state.rollout(&mut fastrand::Rng::with_seed(7));
        let b = state.rollout(&mut fastrand::Rng::with_seed(7));
        assert_eq!(a, b);
        assert!([0.0, 0.5, 1.0].contains(&a));
    }

    #[test]
    fn rollout_leaves_the_start_state_alone() {
        let state = GoState::new(5);
        let before = state.board().clone();
        state.rollout(&mut fastrand::Rng::with_seed(11));
        assert_eq!(state.board(), &before);
        assert_eq!(state.move_count(), 0);
    }
}
