//! Turn-driving loop for one game.
//!
//! A [`Match`] holds the authoritative position and decides who moves next.
//! Human moves arrive through [`Match::submit_move`]; AI moves are computed
//! with a fresh MCTS search per turn.

use log::info;
use thiserror::Error;

use crate::core::{BoardState, Cell, GameRng, Player, StateError, Utility};
use crate::mcts::{MCTSConfig, MCTSSearch};

use super::worker::AiWorker;

/// Who plays a side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seat {
    Human,
    Ai,
}

/// Rejected match operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("the game is over ({0})")]
    Finished(Utility),

    #[error("it is {0}'s turn and that side is played by the AI")]
    NotHumanTurn(Player),

    #[error("it is {0}'s turn and that side is played by a human")]
    NotAiTurn(Player),

    #[error(transparent)]
    State(#[from] StateError),
}

/// One game between two seats.
pub struct Match {
    state: BoardState,
    seats: [Seat; 2],
    config: MCTSConfig,
    rng: GameRng,
    history: Vec<u8>,
}

impl Match {
    /// New game on the empty cube, `Plus` to move.
    ///
    /// AI turns use `config` and draw per-move random streams forked from
    /// `config.seed`, so a match between two AI seats is reproducible.
    pub fn new(plus: Seat, minus: Seat, config: MCTSConfig) -> Self {
        Self::from_state(BoardState::new(), plus, minus, config)
    }

    /// Continue a game from an existing position.
    pub fn from_state(state: BoardState, plus: Seat, minus: Seat, config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            state,
            seats: [plus, minus],
            config,
            rng,
            history: Vec::new(),
        }
    }

    /// Authoritative position.
    #[must_use]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[must_use]
    pub fn current_player(&self) -> Player {
        self.state.player()
    }

    #[must_use]
    pub fn seat(&self, player: Player) -> Seat {
        self.seats[player as usize]
    }

    #[must_use]
    pub fn current_seat(&self) -> Seat {
        self.seat(self.current_player())
    }

    /// Moves played since this match started.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn history(&self) -> &[u8] {
        &self.history
    }

    /// Content of `cell` on `board`.
    #[must_use]
    pub fn piece(&self, board: usize, cell: usize) -> Cell {
        self.state.cell(board, cell)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Final utility once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<Utility> {
        self.is_finished().then(|| self.state.utility())
    }

    /// Play a human move at flattened `index`.
    pub fn submit_move(&mut self, index: usize) -> Result<(), MatchError> {
        self.check_open()?;
        if self.current_seat() != Seat::Human {
            return Err(MatchError::NotHumanTurn(self.current_player()));
        }
        self.apply(index)
    }

    /// Play a move computed for the AI seat to move, e.g. by an [`AiWorker`].
    pub fn submit_ai_move(&mut self, index: usize) -> Result<(), MatchError> {
        self.check_ai_turn()?;
        self.apply(index)
    }

    /// Search and play the AI seat's move on the calling thread.
    pub fn step_ai(&mut self) -> Result<u8, MatchError> {
        self.check_ai_turn()?;
        let mut search = MCTSSearch::with_rng(self.config.clone(), self.rng.fork());
        let mv = search.search(&self.state);
        self.apply(mv as usize)?;
        Ok(mv)
    }

    /// Start the AI seat's search on a background thread.
    ///
    /// The match is not advanced; feed the result to [`Match::submit_ai_move`].
    pub fn spawn_ai(&mut self) -> Result<AiWorker, MatchError> {
        self.check_ai_turn()?;
        Ok(AiWorker::spawn(self.state.clone(), self.config.clone(), self.rng.fork()))
    }

    /// Let AI seats move until the game ends or a human is to move.
    ///
    /// Returns the utility at that point (`Undetermined` if a human is to move).
    pub fn play_out(&mut self) -> Result<Utility, MatchError> {
        while !self.is_finished() && self.current_seat() == Seat::Ai {
            self.step_ai()?;
        }
        Ok(self.state.utility())
    }

    fn check_open(&self) -> Result<(), MatchError> {
        if self.is_finished() {
            return Err(MatchError::Finished(self.state.utility()));
        }
        Ok(())
    }

    fn check_ai_turn(&self) -> Result<(), MatchError> {
        self.check_open()?;
        if self.current_seat() != Seat::Ai {
            return Err(MatchError::NotAiTurn(self.current_player()));
        }
        Ok(())
    }

    fn apply(&mut self, index: usize) -> Result<(), MatchError> {
        let player = self.current_player();
        self.state = self.state.try_traverse(index)?;
        self.history.push(index as u8);
        info!("move {}: {} plays {}", self.history.len(), player, index);

        if self.state.is_terminal() {
            info!("game over after {} moves: {}", self.history.len(), self.state.utility());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> MCTSConfig {
        MCTSConfig::default().with_iterations(60).with_seed(7)
    }

    #[test]
    fn test_human_moves_alternate() {
        let mut game = Match::new(Seat::Human, Seat::Human, quick());

        game.submit_move(0).unwrap();
        assert_eq!(game.current_player(), Player::Minus);
        assert_eq!(game.piece(0, 0), Cell::Plus);

        game.submit_move(16).unwrap();
        assert_eq!(game.piece(1, 0), Cell::Minus);
        assert_eq!(game.turn_count(), 2);
        assert_eq!(game.history(), &[0u8, 16]);
    }

    #[test]
    fn test_illegal_human_move_rejected() {
        let mut game = Match::new(Seat::Human, Seat::Human, quick());
        game.submit_move(9).unwrap();

        assert_eq!(
            game.submit_move(9),
            Err(MatchError::State(StateError::IllegalMove { index: 9 }))
        );
        assert_eq!(
            game.submit_move(99),
            Err(MatchError::State(StateError::IllegalMove { index: 99 }))
        );
        assert_eq!(game.turn_count(), 1);
        assert_eq!(game.current_player(), Player::Minus);
    }

    #[test]
    fn test_seat_checks() {
        let mut game = Match::new(Seat::Human, Seat::Ai, quick());

        assert_eq!(game.step_ai(), Err(MatchError::NotAiTurn(Player::Plus)));
        game.submit_move(0).unwrap();
        assert_eq!(game.submit_move(1), Err(MatchError::NotHumanTurn(Player::Minus)));

        let mv = game.step_ai().unwrap();
        assert_eq!(game.piece(mv as usize / 16, mv as usize % 16), Cell::Minus);
        assert_eq!(game.current_seat(), Seat::Human);
    }

    #[test]
    fn test_finished_game_rejects_moves() {
        let mut game = Match::new(Seat::Human, Seat::Human, quick());
        for mv in [0, 16, 1, 17, 2, 18, 3] {
            game.submit_move(mv).unwrap();
        }

        assert_eq!(game.winner(), Some(Utility::Win(Player::Plus)));
        assert_eq!(
            game.submit_move(40),
            Err(MatchError::Finished(Utility::Win(Player::Plus)))
        );
    }

    #[test]
    fn test_play_out_stops_at_human() {
        let mut game = Match::new(Seat::Ai, Seat::Human, quick());

        assert_eq!(game.play_out(), Ok(Utility::Undetermined));
        assert_eq!(game.turn_count(), 1);
        assert_eq!(game.current_seat(), Seat::Human);
    }

    #[test]
    fn test_ai_vs_ai_finishes_and_is_reproducible() {
        let config = MCTSConfig::default().with_iterations(30).with_seed(3);
        let mut a = Match::new(Seat::Ai, Seat::Ai, config.clone());
        let mut b = Match::new(Seat::Ai, Seat::Ai, config);

        let result = a.play_out().unwrap();
        assert!(result.is_terminal());
        assert_eq!(a.winner(), Some(result));

        assert_eq!(b.play_out().unwrap(), result);
        assert_eq!(a.history(), b.history());
    }
}
