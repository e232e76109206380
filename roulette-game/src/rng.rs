//! Seeded randomness for bullet placement.

use hmac::digest::{Key, KeyInit};
use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sha2::Sha256;

/// Derive an independent stream seed from a user-visible seed and a domain tag.
///
/// The digest is HMAC-SHA256 keyed by the little-endian seed; the first eight
/// bytes become the stream seed. The seed is zero-padded to the SHA-256 block
/// size, the same padding HMAC applies to short keys.
#[must_use]
pub fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut key = Key::<Hmac<Sha256>>::default();
    key[..8].copy_from_slice(&user_seed.to_le_bytes());
    let mut mac = <Hmac<Sha256> as KeyInit>::new(&key);
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// RNG wrapper that counts how many draws were taken from the inner stream.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl<R> CountingRng<R> {
    /// Wrap an existing generator with a zeroed draw counter.
    #[must_use]
    pub const fn wrap(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl CountingRng<SmallRng> {
    /// Seed a small, fast stream from a 64-bit seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::wrap(SmallRng::seed_from_u64(seed))
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}
