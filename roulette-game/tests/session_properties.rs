use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use roulette_game::{
    Action, CHAMBER_COUNT, Dispatch, Outcome, Rejection, RoundRecord, Session, Status, Table,
};

fn pull(session: &mut Session) -> Result<RoundRecord, Rejection> {
    let ticket = session.trigger()?;
    session.resolve(ticket)
}

fn outcomes(session: &Session) -> Vec<Outcome> {
    session.history().iter().map(|r| r.outcome).collect()
}

#[test]
fn bullet_in_fourth_chamber_plays_out_three_safe_pulls() {
    let mut session = Session::with_bullet(1, 3).unwrap();
    for expected_chamber in 1..=3 {
        let record = pull(&mut session).unwrap();
        assert_eq!(record.outcome, Outcome::Safe);
        assert_eq!(session.current_chamber(), expected_chamber);
    }
    let fatal = pull(&mut session).unwrap();
    assert_eq!(fatal.round, 4);
    assert_eq!(fatal.outcome, Outcome::Fatal);
    assert_eq!(session.status(), Status::Dead);
    assert_eq!(
        outcomes(&session),
        vec![Outcome::Safe, Outcome::Safe, Outcome::Safe, Outcome::Fatal]
    );

    assert_eq!(pull(&mut session), Err(Rejection::Dead));
    assert_eq!(session.history().len(), 4);
    assert_eq!(session.current_chamber(), 3);
}

#[test]
fn bullet_in_first_chamber_ends_on_the_first_pull() {
    let mut session = Session::with_bullet(1, 0).unwrap();
    pull(&mut session).unwrap();
    assert_eq!(outcomes(&session), vec![Outcome::Fatal]);
    assert_eq!(session.current_chamber(), 0);
    assert_eq!(session.status(), Status::Dead);
}

#[test]
fn history_is_chronological_and_counts_resolutions() {
    let mut session = Session::with_bullet(1, 5).unwrap();
    for n in 1..=5 {
        pull(&mut session).unwrap();
        assert_eq!(session.history().len(), n);
    }
    let rounds: Vec<u32> = session.history().iter().map(|r| r.round).collect();
    assert_eq!(rounds, vec![1, 2, 3, 4, 5]);
}

#[test]
fn chamber_tracks_safe_rounds() {
    for bullet in 0..CHAMBER_COUNT {
        let mut session = Session::with_bullet(1, bullet).unwrap();
        while !session.is_dead() {
            pull(&mut session).unwrap();
            let safe = u8::try_from(session.safe_rounds()).unwrap();
            assert_eq!(session.current_chamber(), safe % CHAMBER_COUNT);
        }
    }
}

#[test]
fn repeated_triggers_during_flight_do_not_duplicate_rounds() {
    let mut table = Table::from_entropy(0xFEED);
    let first = table.dispatch(Action::Trigger);
    let ticket = first.scheduled_ticket().unwrap();
    for _ in 0..5 {
        assert!(matches!(
            table.dispatch(Action::Trigger),
            Dispatch::Ignored(Rejection::InFlight { round: 1 })
        ));
    }
    table.dispatch(Action::Resolve(ticket));
    assert_eq!(table.session().history().len(), 1);
}

#[test]
fn bullet_never_moves_during_a_session() {
    let mut table = Table::with_rng(ChaCha8Rng::seed_from_u64(17));
    let bullet = table.session().bullet_position();
    while !table.session().is_dead() {
        let ticket = table.dispatch(Action::Trigger).scheduled_ticket().unwrap();
        assert_eq!(table.session().bullet_position(), bullet);
        table.dispatch(Action::Resolve(ticket));
        assert_eq!(table.session().bullet_position(), bullet);
    }
}

#[test]
fn reset_deals_fresh_independent_sessions() {
    let mut table = Table::with_rng(ChaCha8Rng::seed_from_u64(2024));
    let mut seen = [false; CHAMBER_COUNT as usize];
    for _ in 0..200 {
        let ticket = table.dispatch(Action::Trigger).scheduled_ticket().unwrap();
        table.dispatch(Action::Resolve(ticket));
        table.dispatch(Action::Reset);

        let session = table.session();
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(session.current_chamber(), 0);
        assert!(session.history().is_empty());
        seen[usize::from(session.bullet_position())] = true;
    }
    assert!(seen.iter().all(|hit| *hit), "every chamber should be dealt");
}

#[test]
fn dead_sessions_only_accept_reset() {
    let mut table = Table::with_rng(ChaCha8Rng::seed_from_u64(8));
    while !table.session().is_dead() {
        let ticket = table.dispatch(Action::Trigger).scheduled_ticket().unwrap();
        table.dispatch(Action::Resolve(ticket));
    }
    let snapshot = table.session().clone();
    assert_eq!(
        table.dispatch(Action::Trigger),
        Dispatch::Ignored(Rejection::Dead)
    );
    assert_eq!(table.session(), &snapshot);
    assert!(matches!(
        table.dispatch(Action::Reset),
        Dispatch::Reset { .. }
    ));
    assert!(table.session().can_fire());
}

#[test]
fn session_snapshot_serializes_for_reports() {
    let mut session = Session::with_bullet(3, 1).unwrap();
    pull(&mut session).unwrap();
    let value = serde_json::to_value(&session).unwrap();
    assert_eq!(value["generation"], 3);
    assert_eq!(value["status"], "playing");
    assert_eq!(value["history"][0]["outcome"], "safe");
}
