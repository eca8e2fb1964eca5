//! Test-vector generation.
//!
//! The sequential source reproduces the reference listing: passwords of
//! length 0 to 128 with bytes counting up from 0, then passwords of length 1
//! to 128 with bytes counting up from 128. Each salt is a 16-byte window
//! `16·k .. 16·k + 16` with `k` cycling through 0..16.
//!
//! The seeded source keeps the same lengths but draws password and salt
//! contents from a sponge keyed with the seed, so every listing can be
//! reproduced from the seed it prints.

use crate::{error::Error, util::spaced_hex};
use lyra::Sponge;
use rand_core::RngCore;
use std::io::Write;

pub const SALT_LEN: usize = 16;
pub const OUT_LEN: usize = 64;
const MAX_PASSWORD_LEN: usize = 128;
const DOMAIN: &[u8] = b"lyra test vectors";

/// Deterministic generator keyed by a 64-bit seed.
pub struct SeededRandom {
    sponge: Sponge,
}

impl SeededRandom {
    pub fn init(seed: u64) -> Self {
        let mut sponge = Sponge::new();
        sponge.absorb(DOMAIN).absorb(&seed.to_le_bytes());
        Self { sponge }
    }
}

impl std::fmt::Debug for SeededRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SeededRandom { ... }")
    }
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.sponge.squeeze(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Sequential,
    Seeded(u64),
}

impl Source {
    /// Picks a fresh seed from the operating system.
    pub fn random() -> Self {
        Self::Seeded(rand_core::OsRng.next_u64())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub password: Vec<u8>,
    pub salt: [u8; SALT_LEN],
}

#[allow(clippy::cast_possible_truncation)]
pub fn samples(source: Source) -> Vec<Sample> {
    let lengths = (0..=MAX_PASSWORD_LEN)
        .map(|len| (len, 0))
        .chain((1..=MAX_PASSWORD_LEN).map(|len| (len, 128)));
    let mut rng = match source {
        Source::Sequential => None,
        Source::Seeded(seed) => Some(SeededRandom::init(seed)),
    };
    lengths
        .enumerate()
        .map(|(i, (len, first))| {
            let mut password: Vec<u8> = (0..len).map(|k| (first + k) as u8).collect();
            let window = i % SALT_LEN;
            let mut salt: [u8; SALT_LEN] =
                core::array::from_fn(|k| (SALT_LEN * window + k) as u8);
            if let Some(rng) = rng.as_mut() {
                rng.fill_bytes(&mut password);
                rng.fill_bytes(&mut salt);
            }
            Sample { password, salt }
        })
        .collect()
}

/// Hashes every sample and writes the listing to `out`.
pub fn write(
    out: &mut impl Write,
    source: Source,
    t_cost: u32,
    m_cost: u64,
) -> Result<(), Error> {
    let params = lyra::Params::new(t_cost, m_cost)?;
    if let Source::Seeded(seed) = source {
        tracing::info!(seed, "generating seeded test vectors");
        writeln!(out, "seed: {seed}")?;
    }
    let mut key = [0; OUT_LEN];
    for sample in samples(source) {
        lyra::lyra(&sample.password, &sample.salt, &params, &mut key)?;
        writeln!(out)?;
        writeln!(out, "inlen: {}", sample.password.len())?;
        writeln!(out, "t_cost: {t_cost}")?;
        writeln!(out, "m_cost: {m_cost}")?;
        writeln!(out, "outlen: {OUT_LEN}")?;
        writeln!(out, "In: {}", spaced_hex(&sample.password))?;
        writeln!(out, "Salt: {}", spaced_hex(&sample.salt))?;
        writeln!(out, "Out: {}", spaced_hex(&key))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_layout() {
        let s = samples(Source::Sequential);
        assert_eq!(s.len(), 257);
        assert!(s[0].password.is_empty());
        assert_eq!(s[0].salt, core::array::from_fn(|k| k as u8));
        assert_eq!(s[5].password, vec![0, 1, 2, 3, 4]);
        assert_eq!(s[128].password, (0..128).collect::<Vec<u8>>());
        assert_eq!(s[129].password, vec![128]);
        // the salt window keeps rotating across both halves.
        assert_eq!(s[129].salt[0], 16);
        assert_eq!(s[15].salt[15], 255);
        assert_eq!(s[256].password.len(), 128);
        assert_eq!(s[256].password[127], 255);
    }

    #[test]
    fn seeded_samples_are_reproducible() {
        let a = samples(Source::Seeded(7));
        let b = samples(Source::Seeded(7));
        let c = samples(Source::Seeded(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
        let sequential = samples(Source::Sequential);
        for (x, y) in a.iter().zip(sequential.iter()) {
            assert_eq!(x.password.len(), y.password.len());
        }
        assert_ne!(a[10], sequential[10]);
    }

    #[test]
    fn seeded_random_is_a_stream() {
        let mut a = SeededRandom::init(1);
        let mut b = SeededRandom::init(1);
        assert_eq!(a.next_u64(), b.next_u64());
        assert_ne!(a.next_u32(), SeededRandom::init(2).next_u32());
        let mut buf = [0; 8];
        assert!(a.try_fill_bytes(&mut buf).is_ok());
    }

    #[test]
    fn listing_matches_engine() {
        let mut out = Vec::new();
        write(&mut out, Source::Sequential, 1, 2).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("inlen: ").count(), 257);
        let first = lyra::hash(b"", &core::array::from_fn::<u8, 16, _>(|k| k as u8), 64, 1, 2)
            .unwrap();
        let expected = format!(
            "\ninlen: 0\nt_cost: 1\nm_cost: 2\noutlen: 64\nIn: \nSalt: {}\nOut: {}\n",
            spaced_hex(&core::array::from_fn::<u8, 16, _>(|k| k as u8)),
            spaced_hex(first.as_bytes())
        );
        assert!(text.starts_with(&expected), "{}", &text[..200]);
    }

    #[test]
    fn seeded_listing_starts_with_seed() {
        let mut out = Vec::new();
        write(&mut out, Source::Seeded(42), 1, 1).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("seed: 42\n"));
    }

    #[test]
    fn zero_cost_is_rejected_before_hashing() {
        let mut out = Vec::new();
        assert!(matches!(
            write(&mut out, Source::Sequential, 0, 4),
            Err(Error::Lyra(lyra::Error::InvalidParams(_)))
        ));
        assert!(out.is_empty());
    }
}
