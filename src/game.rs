//! Turn sequencing on top of the board rule engine.

use crate::board::{Board, Captures, MoveError};
use crate::coord::{Coord, Side};

/// Tracks whose turn it is over a single authoritative board.
///
/// `play_turn` is transactional: a move resolves on a private copy of the
/// board and is committed only when resolution completes, so the
/// authoritative state never holds a half-applied move.
///
/// In strict mode (the default) every turn is checked against
/// [`Board::is_legal`] and rejected with the specific [`MoveError`].
/// Trusting mode skips the check for callers that gate on `is_legal`
/// themselves.
#[derive(Debug, Clone)]
pub struct GameStatus {
    board: Board,
    turn: Side,
    finished: bool,
    move_count: u32,
    strict: bool,
}

impl GameStatus {
    /// Fresh game on an empty board; Black moves first.
    pub fn new(size: u8) -> Self {
        Self::with_board(Board::new(size))
    }

    pub fn with_board(board: Board) -> Self {
        GameStatus {
            board,
            turn: Side::Black,
            finished: false,
            move_count: 0,
            strict: true,
        }
    }

    /// Switch to trusting mode: `play_turn` applies moves unchecked.
    pub fn trusting(mut self) -> Self {
        self.strict = false;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Side {
        self.turn
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Mark the game as over.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Play a stone for the side to move, resolve captures, then hand the
    /// turn over. Returns the stones each side lost to the move.
    pub fn play_turn(&mut self, c: Coord) -> Result<Captures, MoveError> {
        if self.strict {
            if !self.board.is_on_board(c) {
                return Err(MoveError::OutOfBounds);
            }
            if self.board.is_occupied(c) {
                return Err(MoveError::Occupied);
            }
            if self.board.is_ko_repeated(c) {
                return Err(MoveError::KoViolation);
            }
            if self.board.is_suicide(c, self.turn) {
                return Err(MoveError::Suicide);
            }
        }

        let mut board = self.board.clone();
        board.place_stone(c, self.turn);
        let captures = board.process_neighbor_stones(c, self.turn);
        self.board = board;

        self.turn = self.turn.opponent();
        self.move_count += 1;
        Ok(captures)
    }

    /// Pass: the turn changes hands and the ko window closes.
    pub fn pass_turn(&mut self) {
        self.board.clear_ko();
        self.turn = self.turn.opponent();
        self.move_count += 1;
    }

    /// Back to an empty board with Black to move.
    pub fn reset_game(&mut self) {
        self.board.reset();
        self.turn = Side::Black;
        self.finished = false;
        self.move_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_alternate_starting_with_black() {
        let mut game = GameStatus::new(9);
        assert_eq!(game.current_turn(), Side::Black);

        game.play_turn(Coord::new(4, 4)).unwrap();
        assert_eq!(game.current_turn(), Side::White);
        assert_eq!(game.move_count(), 1);

        game.pass_turn();
        assert_eq!(game.current_turn(), Side::Black);
        assert_eq!(game.move_count(), 2);
    }

    #[test]
    fn strict_mode_rejects_and_leaves_board_untouched() {
        let mut game = GameStatus::new(9);
        game.play_turn(Coord::new(4, 4)).unwrap();

        let before = game.board().clone();
        assert_eq!(
            game.play_turn(Coord::new(4, 4)),
            Err(MoveError::Occupied)
        );
        assert_eq!(
            game.play_turn(Coord::new(9, 0)),
            Err(MoveError::OutOfBounds)
        );
        assert_eq!(game.board(), &before);
        assert_eq!(game.current_turn(), Side::White);
    }

    #[test]
    fn trusting_mode_applies_moves_unchecked() {
        use crate::coord::Color;

        let mut game = GameStatus::new(5).trusting();
        game.play_turn(Coord::new(2, 2)).unwrap();

        // No rejection on the occupied point; White simply overwrites it.
        let captures = game.play_turn(Coord::new(2, 2)).unwrap();
        assert_eq!(captures, Captures::default());
        assert_eq!(game.board().color_at(Coord::new(2, 2)), Color::White);
    }

    #[test]
    fn capture_is_reported_to_the_caller() {
        let mut game = GameStatus::with_board(Board::from_rows(&[
            "_X__", "XO__", "_X__", "____",
        ]));
        let captures = game.play_turn(Coord::new(1, 2)).unwrap();
        assert_eq!(captures.white, 1);
        assert_eq!(captures.black, 0);
    }

    #[test]
    fn reset_restores_the_opening_state() {
        let mut game = GameStatus::new(5);
        game.play_turn(Coord::new(2, 2)).unwrap();
        game.finish();

        game.reset_game();
        assert_eq!(game.current_turn(), Side::Black);
        assert_eq!(game.move_count(), 0);
        assert!(!game.is_finished());
        assert_eq!(game.board().all_legal_moves(Side::Black).len(), 25);
    }
}
