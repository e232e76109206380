//! Web-side game model
//!
//! Wraps the platform-agnostic [`Table`] in a Yew reducer and re-exports the
//! core game types.

use std::rc::Rc;
use yew::Reducible;

// Re-export all types from roulette-game
pub use roulette_game::*;

/// Reducer state behind the roulette widget.
#[derive(Debug, Clone)]
pub struct RouletteModel {
    table: Table,
}

impl RouletteModel {
    /// Deal the first session from client entropy.
    #[must_use]
    pub fn new(entropy: u64) -> Self {
        let table = Table::from_entropy(entropy);
        log::debug!(
            "dealt generation {} from client entropy",
            table.session().generation()
        );
        Self { table }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        self.table.session()
    }
}

impl PartialEq for RouletteModel {
    fn eq(&self, other: &Self) -> bool {
        self.session() == other.session()
    }
}

impl Reducible for RouletteModel {
    type Action = Action;

    /// Rejected actions hand back the same `Rc`, so Yew skips the re-render.
    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match next.table.dispatch(action) {
            Dispatch::Ignored(rejection) => {
                log::debug!("ignored {action:?}: {rejection}");
                return self;
            }
            Dispatch::Schedule { ticket, delay_ms } => {
                log::debug!("round {} resolves in {delay_ms}ms", ticket.round);
            }
            Dispatch::Resolved(record) => {
                log::info!("round {} {:?}", record.round, record.outcome);
            }
            Dispatch::Reset { generation } => {
                log::info!("reset to generation {generation}");
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire(model: Rc<RouletteModel>) -> Rc<RouletteModel> {
        let model = model.reduce(Action::Trigger);
        let ticket = model.session().pending().expect("trigger accepted");
        model.reduce(Action::Resolve(ticket))
    }

    #[test]
    fn rejected_actions_keep_the_same_state() {
        let model = Rc::new(RouletteModel::new(42)).reduce(Action::Trigger);
        let again = Rc::clone(&model).reduce(Action::Trigger);
        assert!(Rc::ptr_eq(&model, &again));
    }

    #[test]
    fn accepted_actions_produce_new_state() {
        let model = Rc::new(RouletteModel::new(42));
        let next = Rc::clone(&model).reduce(Action::Trigger);
        assert!(!Rc::ptr_eq(&model, &next));
        assert!(next.session().is_in_flight());
        assert!(!model.session().is_in_flight());
    }

    #[test]
    fn stale_resolution_after_reset_leaves_new_session_alone() {
        let model = Rc::new(RouletteModel::new(7)).reduce(Action::Trigger);
        let stale = model.session().pending().unwrap();
        let reset = model.reduce(Action::Reset);
        let after = Rc::clone(&reset).reduce(Action::Resolve(stale));
        assert!(Rc::ptr_eq(&reset, &after));
        assert!(after.session().history().is_empty());
    }

    #[test]
    fn playing_to_the_end_only_allows_reset() {
        let mut model = Rc::new(RouletteModel::new(99));
        while !model.session().is_dead() {
            model = fire(model);
        }
        let dead = Rc::clone(&model).reduce(Action::Trigger);
        assert!(Rc::ptr_eq(&model, &dead));
        let fresh = dead.reduce(Action::Reset);
        assert_eq!(fresh.session().status(), Status::Playing);
        assert!(fresh.session().history().is_empty());
    }
}
