//! Fixed game parameters.

/// Number of chambers in the cylinder. Exactly one holds the bullet.
pub const CHAMBER_COUNT: u8 = 6;

/// Cosmetic pause between pulling the trigger and revealing the outcome.
pub const FIRE_DELAY_MS: u32 = 500;

/// Domain tag for the bullet stream derived from a user seed.
pub const BULLET_STREAM_TAG: &[u8] = b"bullet";

/// Generation assigned to the first session of a table.
pub const FIRST_GENERATION: u64 = 1;
