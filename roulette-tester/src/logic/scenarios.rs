use roulette_game::{Action, CHAMBER_COUNT, Dispatch, Rejection, Status};

use super::simulation::{Pacing, SessionSummary, play_to_death, pull, seeded_table};

/// Scripted checks the tester knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    Smoke,
    Invariants,
    StaleResolution,
    Distribution,
}

impl ScenarioKind {
    pub const ALL: [Self; 4] = [
        Self::Smoke,
        Self::Invariants,
        Self::StaleResolution,
        Self::Distribution,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Smoke => "smoke",
            Self::Invariants => "invariants",
            Self::StaleResolution => "stale-resolution",
            Self::Distribution => "distribution",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Smoke => "Play one session per iteration until the bullet goes off",
            Self::Invariants => "Check history, chamber and guard invariants after every action",
            Self::StaleResolution => "Reset while a pull is in flight; the old resolution must be refused",
            Self::Distribution => "Death rounds must be uniform over 1..=6 (chi-square, p = 0.001)",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    ScenarioKind::ALL
        .iter()
        .map(|kind| (kind.key(), kind.description()))
        .collect()
}

pub async fn run_smoke(seed: u64, pacing: Pacing) -> Result<SessionSummary, String> {
    let summary = play_to_death(seed, pacing).await?;
    let expected = u32::from(summary.bullet) + 1;
    match summary.death_round() {
        Some(round) if round == expected => Ok(summary),
        Some(round) => Err(format!(
            "bullet in chamber {} went off on round {round}, expected {expected}",
            summary.bullet
        )),
        None => Err("session ended without a fatal round".to_string()),
    }
}

pub async fn run_invariants(seed: u64, pacing: Pacing) -> Result<(), String> {
    let mut table = seeded_table(seed);
    let bullet = table.session().bullet_position();
    let mut resolved = 0_usize;

    while !table.session().is_dead() {
        let Dispatch::Schedule { ticket, delay_ms } = table.dispatch(Action::Trigger) else {
            return Err("live session refused a trigger".to_string());
        };
        for _ in 0..3 {
            let echo = table.dispatch(Action::Trigger);
            if echo != Dispatch::Ignored(Rejection::InFlight { round: ticket.round }) {
                return Err(format!("trigger during flight returned {echo:?}"));
            }
        }
        pacing.wait(delay_ms).await;
        if !matches!(table.dispatch(Action::Resolve(ticket)), Dispatch::Resolved(_)) {
            return Err(format!("round {} did not resolve", ticket.round));
        }
        resolved += 1;

        let session = table.session();
        if session.bullet_position() != bullet {
            return Err(format!(
                "bullet moved from {bullet} to {}",
                session.bullet_position()
            ));
        }
        if session.history().len() != resolved {
            return Err(format!(
                "history holds {} rounds after {resolved} resolutions",
                session.history().len()
            ));
        }
        let chronological = session
            .history()
            .iter()
            .zip(1_u32..)
            .all(|(record, round)| record.round == round);
        if !chronological {
            return Err("history rounds are out of order".to_string());
        }
        let safe = u8::try_from(session.safe_rounds()).unwrap_or(u8::MAX);
        if session.current_chamber() != safe % CHAMBER_COUNT {
            return Err(format!(
                "chamber {} after {safe} safe rounds",
                session.current_chamber()
            ));
        }
        if resolved > usize::from(CHAMBER_COUNT) {
            return Err("session survived a full turn of the cylinder".to_string());
        }
    }

    let frozen = table.session().clone();
    if table.dispatch(Action::Trigger) != Dispatch::Ignored(Rejection::Dead) {
        return Err("dead session accepted a trigger".to_string());
    }
    if table.session() != &frozen {
        return Err("dead session changed after a trigger".to_string());
    }

    table.dispatch(Action::Reset);
    let fresh = table.session();
    if fresh.status() != Status::Playing
        || fresh.current_chamber() != 0
        || !fresh.history().is_empty()
        || fresh.generation() <= frozen.generation()
    {
        return Err(format!("reset produced {fresh:?}"));
    }
    Ok(())
}

pub async fn run_stale_resolution(seed: u64, pacing: Pacing) -> Result<(), String> {
    let mut table = seeded_table(seed);
    // Walk up to the loaded chamber so the pull cancelled by the reset would be fatal.
    while table.session().current_chamber() < table.session().bullet_position() {
        pull(&mut table, pacing).await?;
    }
    let Some(ticket) = table.dispatch(Action::Trigger).scheduled_ticket() else {
        return Err("live session refused a trigger".to_string());
    };
    table.dispatch(Action::Reset);
    let generation = table.session().generation();
    let bullet = table.session().bullet_position();

    let late = table.dispatch(Action::Resolve(ticket));
    let expected = Dispatch::Ignored(Rejection::StaleTicket {
        issued: ticket.generation,
        live: generation,
    });
    if late != expected {
        return Err(format!("stale resolution returned {late:?}"));
    }
    let session = table.session();
    if !session.history().is_empty() || !session.can_fire() || session.bullet_position() != bullet
    {
        return Err(format!("stale resolution disturbed the new session: {session:?}"));
    }

    let first = pull(&mut table, pacing).await?;
    if first.round != 1 {
        return Err(format!("first round after reset numbered {}", first.round));
    }
    Ok(())
}

/// Tally of which round the bullet went off on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeathTally {
    counts: [usize; CHAMBER_COUNT as usize],
}

impl DeathTally {
    pub fn record(&mut self, summary: &SessionSummary) -> Result<(), String> {
        let round = summary
            .death_round()
            .ok_or_else(|| "session ended without a fatal round".to_string())?;
        let slot = usize::try_from(round)
            .ok()
            .and_then(|r| r.checked_sub(1))
            .and_then(|idx| self.counts.get_mut(idx))
            .ok_or_else(|| format!("death on impossible round {round}"))?;
        *slot += 1;
        Ok(())
    }

    #[must_use]
    pub const fn counts(&self) -> [usize; CHAMBER_COUNT as usize] {
        self.counts
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Pearson chi-square statistic against a uniform distribution.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn chi_square(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let expected = total as f64 / f64::from(CHAMBER_COUNT);
        self.counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }
}
