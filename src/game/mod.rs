//! Playing full games.
//!
//! [`Match`] owns the position and the seat assignment, and [`AiWorker`]
//! runs an AI search off the calling thread.

pub mod session;
pub mod worker;

pub use session::{Match, MatchError, Seat};
pub use worker::{AiWorker, WorkerError};
