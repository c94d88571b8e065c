//! Background AI search.
//!
//! The search for one move runs on its own thread and reports back over a
//! channel, so an interactive front end can keep polling for input while
//! the AI thinks.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::debug;
use thiserror::Error;

use crate::core::{BoardState, GameRng};
use crate::mcts::{MCTSConfig, MCTSSearch};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WorkerError {
    /// The search thread ended without sending a move.
    #[error("AI search thread stopped without a move")]
    Disconnected,
}

/// Handle to a move search running on a background thread.
pub struct AiWorker {
    receiver: Receiver<u8>,
    started: Instant,
}

impl AiWorker {
    /// Search `state` on a new thread.
    ///
    /// `state` must not be terminal; otherwise the thread panics and the
    /// handle reports [`WorkerError::Disconnected`].
    pub fn spawn(state: BoardState, config: MCTSConfig, rng: GameRng) -> Self {
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            let mut search = MCTSSearch::with_rng(config, rng);
            let mv = search.search(&state);
            debug!(
                "background search for {} finished: {} ({} iterations)",
                state.player(),
                mv,
                search.stats().iterations
            );
            // The receiver may already be gone if the match was abandoned.
            let _ = sender.send(mv);
        });

        Self {
            receiver,
            started: Instant::now(),
        }
    }

    /// Poll for the finished move without blocking.
    pub fn try_move(&self) -> Result<Option<u8>, WorkerError> {
        match self.receiver.try_recv() {
            Ok(mv) => Ok(Some(mv)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }

    /// Block until the move is ready.
    pub fn wait(self) -> Result<u8, WorkerError> {
        self.receiver.recv().map_err(|_| WorkerError::Disconnected)
    }

    /// Time since the search was started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}
