use super::rules::{check_draw, check_win, MAX_MOVES};
use super::state::GameSnapshot;
use super::validator::{can_move_in_direction, validate_move};
use super::{CellState, Coordinate, Direction, GameState};
use crate::error::GameError;

/// Coarse result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Continue,
    Win,
    Draw,
}

/// Who won, who lost, and how many moves the game took including the winning one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinRecord {
    pub winner: String,
    pub loser: String,
    pub move_count: u32,
}

/// What happened when a move was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Move applied, turn passed to the other player.
    Continue,
    /// Move applied and completed a line of three.
    Win(WinRecord),
    /// Move applied and reached the move limit.
    Draw,
    /// Nothing changed; the caller should ask for another move.
    Rejected(GameError),
}

impl MoveOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }

    /// `None` for a rejected move
    pub fn result(&self) -> Option<GameResult> {
        match self {
            MoveOutcome::Continue => Some(GameResult::Continue),
            MoveOutcome::Win(_) => Some(GameResult::Win),
            MoveOutcome::Draw => Some(GameResult::Draw),
            MoveOutcome::Rejected(_) => None,
        }
    }

    /// Human-readable summary; empty for an ordinary move.
    pub fn message(&self) -> String {
        match self {
            MoveOutcome::Continue => String::new(),
            MoveOutcome::Win(record) => format!("{} wins!", record.winner),
            MoveOutcome::Draw => format!("Draw! The game ended after {MAX_MOVES} moves."),
            MoveOutcome::Rejected(err) => err.to_string(),
        }
    }
}

/// Applies moves to a game it owns exclusively.
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
    outcome: Option<GameResult>,
}

impl GameEngine {
    pub fn new(state: GameState) -> Self {
        GameEngine {
            state,
            outcome: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Seat 0 plays White, seat 1 plays Black.
    pub fn current_player_color(&self) -> CellState {
        self.state.current_side().to_cell()
    }

    /// Win or Draw once the game has ended
    pub fn outcome(&self) -> Option<GameResult> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Slide the current player's piece at `from` one step in `direction`.
    ///
    /// A rejected move leaves the game untouched. A winning or drawing move is
    /// applied to the board but does not pass the turn, and every later call
    /// is rejected with `GameOver`.
    pub fn make_move(&mut self, from: Coordinate, direction: Direction) -> MoveOutcome {
        if self.is_finished() {
            return MoveOutcome::Rejected(GameError::GameOver);
        }

        let color = self.current_player_color();
        let validated = match validate_move(self.state.board(), from, direction, color) {
            Ok(target) => target,
            Err(err) => return MoveOutcome::Rejected(err),
        };

        let target = match can_move_in_direction(self.state.board(), from, direction) {
            Some(target) if target == validated => target,
            _ => return MoveOutcome::Rejected(GameError::IllegalDestination { from, direction }),
        };

        let board = self.state.board_mut();
        board.set(from, CellState::Empty);
        board.set(target, color);

        let moves_played = self.state.move_count().saturating_add(1);

        if check_win(self.state.board(), color) {
            self.outcome = Some(GameResult::Win);
            return MoveOutcome::Win(WinRecord {
                winner: self.state.current_player().to_string(),
                loser: self.state.opponent().to_string(),
                move_count: moves_played,
            });
        }

        if check_draw(moves_played) {
            self.outcome = Some(GameResult::Draw);
            return MoveOutcome::Draw;
        }

        self.state.next_turn();
        MoveOutcome::Continue
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn from_snapshot(snapshot: &GameSnapshot) -> Result<Self, GameError> {
        Ok(GameEngine::new(GameState::from_snapshot(snapshot)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Side};

    fn at(notation: &str) -> Coordinate {
        Coordinate::from_notation(notation).unwrap()
    }

    fn new_engine() -> GameEngine {
        GameEngine::new(GameState::new("Alice", "Bob").unwrap())
    }

    #[test]
    fn test_current_player_color_by_index() {
        let mut engine = new_engine();
        assert_eq!(engine.current_player_color(), CellState::White);
        assert_eq!(engine.make_move(at("A1"), Direction::Down), MoveOutcome::Continue);
        assert_eq!(engine.current_player_color(), CellState::Black);

        let engine = GameEngine::new(GameState::with_starting_player("Alice", "Bob", 1).unwrap());
        assert_eq!(engine.current_player_color(), CellState::Black);
    }

    #[test]
    fn test_blocked_move_is_rejected_without_mutation() {
        let mut engine = new_engine();
        let before = engine.state().clone();

        let outcome = engine.make_move(at("A1"), Direction::Right);
        assert_eq!(
            outcome,
            MoveOutcome::Rejected(GameError::IllegalDestination {
                from: at("A1"),
                direction: Direction::Right,
            })
        );
        assert!(!outcome.is_success());
        assert_eq!(outcome.result(), None);
        assert!(!outcome.message().is_empty());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_off_board_move_is_rejected() {
        let mut engine = new_engine();
        assert!(matches!(
            engine.make_move(at("A1"), Direction::Up),
            MoveOutcome::Rejected(GameError::IllegalDestination { .. })
        ));
    }

    #[test]
    fn test_wrong_piece_is_rejected() {
        let mut engine = new_engine();
        for notation in ["B1", "A4", "B2"] {
            assert!(matches!(
                engine.make_move(at(notation), Direction::Down),
                MoveOutcome::Rejected(GameError::InvalidSelection { .. })
            ));
        }
        assert_eq!(engine.state().move_count(), 0);
        assert_eq!(engine.state().board(), &Board::initial());
    }

    #[test]
    fn test_first_move_a1_to_a2() {
        let mut engine = new_engine();
        let outcome = engine.make_move(at("A1"), Direction::Down);

        assert_eq!(outcome, MoveOutcome::Continue);
        assert!(outcome.is_success());
        assert_eq!(outcome.result(), Some(GameResult::Continue));
        assert_eq!(outcome.message(), "");

        let board = engine.state().board();
        assert_eq!(board.get(at("A1")), CellState::Empty);
        assert_eq!(board.get(at("A2")), CellState::White);
        assert_eq!(engine.state().current_player_index(), 1);
        assert_eq!(engine.state().move_count(), 1);
    }

    #[test]
    fn test_winning_move() {
        // White: A1 -> A2, C1 -> C2, B4 up to B3, then B2 gives A2-B2-C2.
        let mut engine = new_engine();
        let script = [
            ("A1", Direction::Down), // W
            ("A4", Direction::Up),   // B: A3
            ("C1", Direction::Down), // W
            ("C4", Direction::Up),   // B: C3
            ("B4", Direction::Up),   // W: B3
            ("A3", Direction::Down), // B: back to A4
            ("B3", Direction::Up),   // W: B2, wins
        ];
        let mut last = MoveOutcome::Continue;
        for (from, direction) in script {
            last = engine.make_move(at(from), direction);
            assert!(last.is_success(), "{from} {direction}: {last:?}");
        }

        assert_eq!(
            last,
            MoveOutcome::Win(WinRecord {
                winner: "Alice".into(),
                loser: "Bob".into(),
                move_count: 7,
            })
        );
        assert_eq!(last.message(), "Alice wins!");
        assert_eq!(last.result(), Some(GameResult::Win));
        // The turn does not pass on the winning move
        assert_eq!(engine.state().current_player(), "Alice");
        assert_eq!(engine.state().move_count(), 6);
        assert_eq!(engine.outcome(), Some(GameResult::Win));
    }

    #[test]
    fn test_black_can_win() {
        let mut board = Board::new();
        board.set(at("A3"), CellState::Black);
        board.set(at("B3"), CellState::Black);
        board.set(at("D4"), CellState::Black);
        board.set(at("A1"), CellState::White);

        let mut state = GameState::with_starting_player("Alice", "Bob", 1).unwrap();
        state.board_mut().restore(board.cells()).unwrap();
        state.set_move_count(11);
        let mut engine = GameEngine::new(state);

        let outcome = engine.make_move(at("D4"), Direction::Left);
        assert_eq!(outcome, MoveOutcome::Continue);
        let outcome = engine.make_move(at("A1"), Direction::Right);
        assert_eq!(outcome, MoveOutcome::Continue);
        // C4 up to C3 completes A3-B3-C3
        let outcome = engine.make_move(at("C4"), Direction::Up);
        assert_eq!(
            outcome,
            MoveOutcome::Win(WinRecord {
                winner: "Bob".into(),
                loser: "Alice".into(),
                move_count: 14,
            })
        );
        assert_eq!(engine.state().pieces(Side::Black), 3);
    }

    #[test]
    fn test_draw_on_thirtieth_move() {
        // Shuffle A1/A2 for White and A4/A3 for Black without making a line.
        let mut engine = new_engine();
        let white = [("A1", Direction::Down), ("A2", Direction::Up)];
        let black = [("A4", Direction::Up), ("A3", Direction::Down)];

        for i in 0..30 {
            let (from, direction) = if i % 2 == 0 {
                white[(i / 2) % 2]
            } else {
                black[(i / 2) % 2]
            };
            let outcome = engine.make_move(at(from), direction);
            if i < 29 {
                assert_eq!(outcome, MoveOutcome::Continue, "move {}", i + 1);
            } else {
                assert_eq!(outcome, MoveOutcome::Draw, "move {}", i + 1);
            }
        }
        assert_eq!(engine.outcome(), Some(GameResult::Draw));
        assert_eq!(engine.state().move_count(), 29);
    }

    #[test]
    fn test_draw_after_thirty_completed_moves() {
        let mut state = GameState::new("Alice", "Bob").unwrap();
        state.set_move_count(30);
        let mut engine = GameEngine::new(state);

        let outcome = engine.make_move(at("A1"), Direction::Down);
        assert_eq!(outcome, MoveOutcome::Draw);
        assert_eq!(outcome.result(), Some(GameResult::Draw));
        assert!(outcome.message().contains("30"));
    }

    #[test]
    fn test_win_takes_priority_over_draw() {
        let mut board = Board::new();
        board.set(at("A1"), CellState::White);
        board.set(at("B1"), CellState::White);
        board.set(at("C2"), CellState::White);
        let mut state = GameState::new("Alice", "Bob").unwrap();
        state.board_mut().restore(board.cells()).unwrap();
        state.set_move_count(29);
        let mut engine = GameEngine::new(state);

        let outcome = engine.make_move(at("C2"), Direction::Up);
        assert!(matches!(outcome, MoveOutcome::Win(WinRecord { move_count: 30, .. })));
    }

    #[test]
    fn test_finished_game_rejects_moves() {
        let mut state = GameState::new("Alice", "Bob").unwrap();
        state.set_move_count(29);
        let mut engine = GameEngine::new(state);
        assert_eq!(engine.make_move(at("A1"), Direction::Down), MoveOutcome::Draw);

        let before = engine.state().clone();
        assert_eq!(
            engine.make_move(at("C1"), Direction::Down),
            MoveOutcome::Rejected(GameError::GameOver)
        );
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_huge_restored_move_count_does_not_overflow() {
        let mut snapshot = new_engine().snapshot();
        snapshot.move_count = i64::from(u32::MAX);
        let mut engine = GameEngine::from_snapshot(&snapshot).unwrap();

        assert_eq!(engine.make_move(at("A1"), Direction::Down), MoveOutcome::Draw);
        assert_eq!(engine.state().move_count(), u32::MAX);

        let mut state = engine.into_state();
        state.next_turn();
        assert_eq!(state.move_count(), u32::MAX);
    }

    #[test]
    fn test_snapshot_roundtrip_mid_game() {
        let mut engine = new_engine();
        engine.make_move(at("A1"), Direction::Down);
        engine.make_move(at("A4"), Direction::Up);

        let restored = GameEngine::from_snapshot(&engine.snapshot()).unwrap();
        assert_eq!(restored.state(), engine.state());
        assert!(!restored.is_finished());
    }
}
