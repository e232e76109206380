//! Reducer that owns the live session, its randomness and the generation counter.

use crate::constants::{BULLET_STREAM_TAG, FIRE_DELAY_MS, FIRST_GENERATION};
use crate::rng::{CountingRng, derive_stream_seed};
use crate::session::{Rejection, RoundRecord, Session, Ticket};
use rand::RngCore;
use rand::rngs::SmallRng;

/// Everything a user (or a timer) can ask of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Trigger,
    Resolve(Ticket),
    Reset,
}

/// What happened in response to an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The trigger was accepted; deliver `Action::Resolve(ticket)` after `delay_ms`.
    Schedule { ticket: Ticket, delay_ms: u32 },
    Resolved(RoundRecord),
    /// A brand new session replaced the old one.
    Reset { generation: u64 },
    Ignored(Rejection),
}

impl Dispatch {
    #[must_use]
    pub const fn scheduled_ticket(&self) -> Option<Ticket> {
        match self {
            Self::Schedule { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    #[must_use]
    pub const fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Ignored(rejection) => Some(*rejection),
            _ => None,
        }
    }
}

/// A single seat at the table: the live session plus what it takes to deal a new one.
#[derive(Debug, Clone)]
pub struct Table<R = CountingRng<SmallRng>> {
    rng: R,
    session: Session,
}

impl Table<CountingRng<SmallRng>> {
    /// Seed a table from client entropy.
    #[must_use]
    pub fn from_entropy(entropy: u64) -> Self {
        Self::with_rng(CountingRng::seeded(derive_stream_seed(
            entropy,
            BULLET_STREAM_TAG,
        )))
    }

    /// Total draws taken from the bullet stream so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.rng.draws()
    }
}

impl<R: RngCore> Table<R> {
    /// Deal the first session from `rng`.
    pub fn with_rng(mut rng: R) -> Self {
        let session = Session::draw(FIRST_GENERATION, &mut rng);
        Self { rng, session }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Apply one action.
    ///
    /// Rejected actions leave the session untouched and come back as
    /// [`Dispatch::Ignored`].
    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        match action {
            Action::Trigger => match self.session.trigger() {
                Ok(ticket) => Dispatch::Schedule {
                    ticket,
                    delay_ms: FIRE_DELAY_MS,
                },
                Err(rejection) => Dispatch::Ignored(rejection),
            },
            Action::Resolve(ticket) => match self.session.resolve(ticket) {
                Ok(record) => Dispatch::Resolved(record),
                Err(rejection) => Dispatch::Ignored(rejection),
            },
            Action::Reset => {
                self.reset();
                Dispatch::Reset {
                    generation: self.session.generation(),
                }
            }
        }
    }

    /// Throw the session away and deal a new one.
    ///
    /// Any ticket still in flight belongs to the old generation and will be
    /// refused by the new session.
    pub fn reset(&mut self) {
        let generation = self.session.generation().saturating_add(1);
        self.session = Session::draw(generation, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Outcome, Status};

    #[test]
    fn trigger_schedules_a_resolution() {
        let mut table = Table::from_entropy(1);
        let dispatch = table.dispatch(Action::Trigger);
        assert_eq!(
            dispatch,
            Dispatch::Schedule {
                ticket: Ticket {
                    generation: FIRST_GENERATION,
                    round: 1
                },
                delay_ms: FIRE_DELAY_MS,
            }
        );
        assert!(table.session().is_in_flight());
    }

    #[test]
    fn reset_bumps_generation_and_clears_state() {
        let mut table = Table::from_entropy(5);
        let ticket = table.dispatch(Action::Trigger).scheduled_ticket().unwrap();
        table.dispatch(Action::Resolve(ticket));
        assert_eq!(
            table.dispatch(Action::Reset),
            Dispatch::Reset {
                generation: FIRST_GENERATION + 1
            }
        );
        let session = table.session();
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(session.current_chamber(), 0);
        assert!(session.history().is_empty());
        assert!(!session.is_in_flight());
    }

    #[test]
    fn pending_resolution_from_before_reset_is_refused() {
        let mut table = Table::from_entropy(11);
        let ticket = table.dispatch(Action::Trigger).scheduled_ticket().unwrap();
        table.dispatch(Action::Reset);
        let dispatch = table.dispatch(Action::Resolve(ticket));
        assert_eq!(
            dispatch.rejection(),
            Some(Rejection::StaleTicket {
                issued: FIRST_GENERATION,
                live: FIRST_GENERATION + 1
            })
        );
        assert!(table.session().history().is_empty());
        assert!(table.session().can_fire());
    }

    #[test]
    fn every_session_dies_within_one_turn_of_the_cylinder() {
        for entropy in 0..64 {
            let mut table = Table::from_entropy(entropy);
            let mut rounds = 0;
            while !table.session().is_dead() {
                let ticket = table.dispatch(Action::Trigger).scheduled_ticket().unwrap();
                table.dispatch(Action::Resolve(ticket));
                rounds += 1;
                assert!(rounds <= 6, "entropy {entropy} survived a full turn");
            }
            let last = table.session().history().last().unwrap();
            assert_eq!(last.outcome, Outcome::Fatal);
            assert_eq!(
                usize::from(table.session().bullet_position()) + 1,
                table.session().history().len()
            );
        }
    }

    #[test]
    fn only_dealing_draws_randomness() {
        let mut table = Table::from_entropy(3);
        let after_deal = table.draws();
        assert!(after_deal >= 1);
        let ticket = table.dispatch(Action::Trigger).scheduled_ticket().unwrap();
        table.dispatch(Action::Resolve(ticket));
        table.dispatch(Action::Trigger);
        assert_eq!(table.draws(), after_deal);
        table.dispatch(Action::Reset);
        assert!(table.draws() > after_deal);
    }
}
