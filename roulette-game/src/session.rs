//! The game session: one playthrough from the first pull to death or reset.

use crate::constants::CHAMBER_COUNT;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether the player is still in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Playing,
    Dead,
}

/// Result of a single resolved pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Safe,
    Fatal,
}

impl Outcome {
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// One line of the round history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round number.
    pub round: u32,
    pub outcome: Outcome,
}

/// Proof that a trigger was accepted and is waiting for its resolution.
///
/// A ticket is only honoured by the session generation that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub generation: u64,
    pub round: u32,
}

/// How a chamber indicator should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChamberMark {
    /// Not reached yet.
    Idle,
    /// Under the hammer.
    Current,
    /// Already fired safely.
    Spent,
    /// The bullet went off here.
    Fatal,
}

/// Reasons an action was ignored. Callers are free to discard these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("the session is over")]
    Dead,
    #[error("round {round} is still resolving")]
    InFlight { round: u32 },
    #[error("no trigger is waiting for resolution")]
    NothingPending,
    #[error("ticket from generation {issued} does not belong to live generation {live}")]
    StaleTicket { issued: u64, live: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("bullet position {0} is outside 0..{CHAMBER_COUNT}")]
    BulletOutOfRange(u8),
}

/// Complete mutable state of one playthrough.
///
/// The bullet position is fixed at construction. There is no in-place reset;
/// a new session is built instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    generation: u64,
    bullet: u8,
    chamber: u8,
    history: Vec<RoundRecord>,
    status: Status,
    pending: Option<Ticket>,
}

impl Session {
    /// Start a session with a bullet drawn uniformly from the chambers.
    pub fn draw<R: Rng + ?Sized>(generation: u64, rng: &mut R) -> Self {
        let bullet = rng.gen_range(0..CHAMBER_COUNT);
        Self::fresh(generation, bullet)
    }

    /// Start a session with a known bullet position.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::BulletOutOfRange`] when `bullet` is not a chamber index.
    pub fn with_bullet(generation: u64, bullet: u8) -> Result<Self, SessionError> {
        if bullet >= CHAMBER_COUNT {
            return Err(SessionError::BulletOutOfRange(bullet));
        }
        Ok(Self::fresh(generation, bullet))
    }

    const fn fresh(generation: u64, bullet: u8) -> Self {
        Self {
            generation,
            bullet,
            chamber: 0,
            history: Vec::new(),
            status: Status::Playing,
            pending: None,
        }
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn bullet_position(&self) -> u8 {
        self.bullet
    }

    #[must_use]
    pub const fn current_chamber(&self) -> u8 {
        self.chamber
    }

    #[must_use]
    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub const fn is_dead(&self) -> bool {
        matches!(self.status, Status::Dead)
    }

    /// The fire control is live only while playing with nothing resolving.
    #[must_use]
    pub const fn can_fire(&self) -> bool {
        !self.is_dead() && !self.is_in_flight()
    }

    #[must_use]
    pub fn safe_rounds(&self) -> usize {
        self.history
            .iter()
            .filter(|record| !record.outcome.is_fatal())
            .count()
    }

    /// Accept a pull of the trigger and mark it in flight.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::Dead`] after the bullet went off and
    /// [`Rejection::InFlight`] while a previous pull is still resolving.
    pub fn trigger(&mut self) -> Result<Ticket, Rejection> {
        if self.is_dead() {
            return Err(Rejection::Dead);
        }
        if let Some(pending) = self.pending {
            return Err(Rejection::InFlight {
                round: pending.round,
            });
        }
        let ticket = Ticket {
            generation: self.generation,
            round: self.next_round(),
        };
        self.pending = Some(ticket);
        Ok(ticket)
    }

    /// Resolve the pull identified by `ticket`.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::StaleTicket`] for tickets issued by another
    /// session and [`Rejection::NothingPending`] when the ticket is not the
    /// one currently in flight.
    pub fn resolve(&mut self, ticket: Ticket) -> Result<RoundRecord, Rejection> {
        if ticket.generation != self.generation {
            return Err(Rejection::StaleTicket {
                issued: ticket.generation,
                live: self.generation,
            });
        }
        if self.pending != Some(ticket) {
            return Err(Rejection::NothingPending);
        }

        let outcome = if self.chamber == self.bullet {
            Outcome::Fatal
        } else {
            Outcome::Safe
        };
        let record = RoundRecord {
            round: ticket.round,
            outcome,
        };
        self.history.push(record);
        match outcome {
            Outcome::Fatal => self.status = Status::Dead,
            Outcome::Safe => self.chamber = (self.chamber + 1) % CHAMBER_COUNT,
        }
        self.pending = None;
        Ok(record)
    }

    /// Visual state of chamber `index`.
    #[must_use]
    pub fn chamber_mark(&self, index: u8) -> ChamberMark {
        if index >= CHAMBER_COUNT {
            ChamberMark::Idle
        } else if index == self.chamber {
            if self.is_dead() {
                ChamberMark::Fatal
            } else {
                ChamberMark::Current
            }
        } else if usize::from(self.chamber_offset(index))
            >= usize::from(CHAMBER_COUNT) - self.spent_span()
        {
            ChamberMark::Spent
        } else {
            ChamberMark::Idle
        }
    }

    /// Marks for every chamber, in cylinder order.
    #[must_use]
    pub fn chamber_marks(&self) -> [ChamberMark; CHAMBER_COUNT as usize] {
        let mut marks = [ChamberMark::Idle; CHAMBER_COUNT as usize];
        for (index, mark) in (0..CHAMBER_COUNT).zip(marks.iter_mut()) {
            *mark = self.chamber_mark(index);
        }
        marks
    }

    fn next_round(&self) -> u32 {
        u32::try_from(self.history.len())
            .unwrap_or(u32::MAX)
            .saturating_add(1)
    }

    // Distance travelled forward from the current chamber to `index`.
    const fn chamber_offset(&self, index: u8) -> u8 {
        (index + CHAMBER_COUNT - self.chamber) % CHAMBER_COUNT
    }

    // Chambers behind the hammer that have been fired, capped at a full turn.
    fn spent_span(&self) -> usize {
        self.safe_rounds().min(usize::from(CHAMBER_COUNT) - 1)
    }
}
