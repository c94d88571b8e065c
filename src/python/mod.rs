//! Python bindings for the cube engine.
//!
//! # Quick Start
//!
//! ```python
//! import cube_ttt
//!
//! state = cube_ttt.BoardState()
//! while state.utility is None:
//!     state = state.traverse(cube_ttt.next_move(state, iterations=500))
//! print(state)
//! ```

use pyo3::prelude::*;

mod py_board;

pub use py_board::*;

/// cube_ttt: 4×4×4 tic-tac-toe with an MCTS player.
#[pymodule]
fn cube_ttt(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBoardState>()?;
    m.add_function(wrap_pyfunction!(next_move, m)?)?;
    Ok(())
}
