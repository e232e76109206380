//! Emoji Roulette Game Engine
//!
//! Platform-agnostic core for the Emoji Roulette toy: a six-chamber cylinder,
//! one hidden bullet, and a history of pulls. This crate has no UI or browser
//! dependencies; front ends drive it through [`Table::dispatch`].

pub mod constants;
pub mod rng;
pub mod session;
pub mod table;

// Re-export commonly used types
pub use constants::{CHAMBER_COUNT, FIRE_DELAY_MS};
pub use rng::{CountingRng, derive_stream_seed};
pub use session::{
    ChamberMark, Outcome, Rejection, RoundRecord, Session, SessionError, Status, Ticket,
};
pub use table::{Action, Dispatch, Table};
