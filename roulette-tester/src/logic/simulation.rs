use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use roulette_game::{Action, CHAMBER_COUNT, Dispatch, RoundRecord, Table, derive_stream_seed};
use serde::Serialize;
use std::time::Duration;

/// Table driven by a reproducible ChaCha stream.
pub type SimTable = Table<ChaCha8Rng>;

/// Whether pulls wait out the widget's cosmetic delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    Instant,
    Realtime,
}

impl Pacing {
    pub async fn wait(self, delay_ms: u32) {
        if matches!(self, Self::Realtime) {
            tokio::time::sleep(Duration::from_millis(u64::from(delay_ms))).await;
        }
    }
}

#[must_use]
pub fn seeded_table(seed: u64) -> SimTable {
    Table::with_rng(ChaCha8Rng::seed_from_u64(seed))
}

/// Seed for iteration `i` of a run started from `seed`.
#[must_use]
pub fn iteration_seed(seed: u64, iteration: usize) -> u64 {
    let index = u64::try_from(iteration).unwrap_or(u64::MAX);
    derive_stream_seed(seed, &index.to_le_bytes())
}

/// Trigger, wait the scheduled delay, then deliver the resolution.
pub async fn pull(table: &mut SimTable, pacing: Pacing) -> Result<RoundRecord, String> {
    match table.dispatch(Action::Trigger) {
        Dispatch::Schedule { ticket, delay_ms } => {
            pacing.wait(delay_ms).await;
            match table.dispatch(Action::Resolve(ticket)) {
                Dispatch::Resolved(record) => Ok(record),
                other => Err(format!(
                    "resolution of round {} came back as {other:?}",
                    ticket.round
                )),
            }
        }
        other => Err(format!("trigger came back as {other:?}")),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub bullet: u8,
    pub rounds: Vec<RoundRecord>,
}

impl SessionSummary {
    #[must_use]
    pub fn death_round(&self) -> Option<u32> {
        self.rounds
            .iter()
            .find(|record| record.outcome.is_fatal())
            .map(|record| record.round)
    }
}

/// Pull until the bullet goes off.
pub async fn play_to_death(seed: u64, pacing: Pacing) -> Result<SessionSummary, String> {
    let mut table = seeded_table(seed);
    let bullet = table.session().bullet_position();
    while !table.session().is_dead() {
        if table.session().history().len() >= usize::from(CHAMBER_COUNT) {
            return Err(format!(
                "survived {} pulls with the bullet in chamber {bullet}",
                table.session().history().len()
            ));
        }
        pull(&mut table, pacing).await?;
    }
    Ok(SessionSummary {
        seed,
        bullet,
        rounds: table.session().history().to_vec(),
    })
}
