//! Position and search bindings for Python.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{BoardState, GameRng, Player, StateError, BOARD_CELLS, SIZE};
use crate::mcts::get_next_move;

fn value_error(err: StateError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn player_from(value: i8) -> PyResult<Player> {
    Player::from_value(value)
        .ok_or_else(|| PyValueError::new_err(format!("player must be 1 or -1, got {value}")))
}

/// Python wrapper for BoardState.
///
/// Players are `1` (X, moves first) and `-1` (O); cells hold `0` when empty.
#[pyclass(name = "BoardState", frozen)]
#[derive(Clone, Debug)]
pub struct PyBoardState(pub BoardState);

#[pymethods]
impl PyBoardState {
    /// Empty cube with X to move.
    #[new]
    fn new() -> Self {
        Self(BoardState::new())
    }

    /// Build a position from 64 cell values in `{-1, 0, 1}`.
    #[staticmethod]
    #[pyo3(signature = (values, player = 1))]
    fn from_values(values: Vec<i8>, player: i8) -> PyResult<Self> {
        let player = player_from(player)?;
        BoardState::from_values(&values, player)
            .map(Self)
            .map_err(value_error)
    }

    /// Legal moves as flattened indices, ascending.
    #[getter]
    fn moves(&self) -> Vec<u8> {
        self.0.moves().to_vec()
    }

    /// `None` while undetermined, `0` for a draw, else the winner's value.
    #[getter]
    fn utility(&self) -> Option<i8> {
        self.0.utility().value()
    }

    /// Player to move.
    #[getter]
    fn player(&self) -> i8 {
        self.0.player().value()
    }

    /// Position after the player to move marks `index`.
    fn traverse(&self, index: usize) -> PyResult<Self> {
        self.0.try_traverse(index).map(Self).map_err(value_error)
    }

    /// Value of `cell` on `board`.
    fn cell(&self, board: usize, cell: usize) -> PyResult<i8> {
        if board >= SIZE || cell >= BOARD_CELLS {
            return Err(PyValueError::new_err(format!(
                "cell ({board}, {cell}) is outside the cube"
            )));
        }
        Ok(self.0.cell(board, cell).value())
    }

    fn __repr__(&self) -> String {
        self.0.to_string()
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.0.hash(&mut hasher);
        hasher.finish()
    }
}

/// Choose a move for the player to move with a fresh MCTS search.
#[pyfunction]
#[pyo3(signature = (state, iterations = 5000, seed = 42))]
pub fn next_move(py: Python<'_>, state: &PyBoardState, iterations: u32, seed: u64) -> PyResult<u8> {
    if state.0.is_terminal() {
        return Err(PyValueError::new_err(StateError::GameOver.to_string()));
    }
    let board = state.0.clone();
    Ok(py.allow_threads(move || get_next_move(&board, iterations, &mut GameRng::new(seed))))
}
