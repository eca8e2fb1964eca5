#![deny(
    dead_code,
    deprecated,
    future_incompatible,
    missing_copy_implementations,
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used
)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::inline_always
)]

//! Lyra: a memory-hard password hashing scheme built on a duplex sponge.
//!
//! A derivation absorbs the parameters into the sponge, fills a
//! `m_cost × N_COLS` matrix of blocks row by row, wanders `t_cost` times over
//! it in a password-dependent order, then absorbs the accumulated row and
//! squeezes the key.

mod engine;
mod error;
mod matrix;
mod params;
mod permutation;
mod sponge;

use crypto_common::{constant_time::ConstantTimeEq, erase::Erase};
pub use error::Error;
use matrix::Matrix;
pub use params::Params;
pub use permutation::{FULL_ROUNDS, REDUCED_ROUNDS};
pub use sponge::Sponge;

/// Words in the sponge state.
pub const STATE_WORDS: usize = 16;
/// Words in one block, which is also the sponge rate.
pub const BLOCK_WORDS: usize = 12;
pub const BLOCK_BYTES: usize = BLOCK_WORDS * core::mem::size_of::<u64>();
/// Columns of the memory matrix.
pub const N_COLS: usize = 64;

/// One cell of the memory matrix.
pub type Block = [u64; BLOCK_WORDS];

// the BLAKE2b IV, loaded into the capacity half of the initial state.
const IV: [u64; 8] = [
    0x6a09_e667_f3bc_c908,
    0xbb67_ae85_84ca_a73b,
    0x3c6e_f372_fe94_f82b,
    0xa54f_f53a_5f1d_36f1,
    0x510e_527f_ade6_82d1,
    0x9b05_688c_2b3e_6c1f,
    0x1f83_d9ab_fb41_bd6b,
    0x5be0_cd19_137e_2179,
];

/// Work performed by one derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Work {
    pub duplexes: u64,
    pub full_permutations: u64,
    pub matrix_bytes: usize,
}

/// Derives `output.len()` bytes from `password` and `salt`.
///
/// On error nothing is written to `output`.
pub fn lyra(
    password: &[u8],
    salt: &[u8],
    params: &Params,
    output: &mut [u8],
) -> Result<Work, Error> {
    let mut matrix = match Matrix::try_new(params.m_cost) {
        Ok(matrix) => matrix,
        Err(e) => {
            tracing::warn!(rows = params.m_cost, "memory matrix allocation failed");
            return Err(e);
        }
    };
    tracing::debug!(
        bytes = matrix.size_in_bytes(),
        rows = matrix.rows(),
        "allocated memory matrix"
    );
    let mut sponge = Sponge::new();
    engine::absorb_params(&mut sponge, password, salt, params, output.len());
    engine::setup(&mut sponge, &mut matrix);
    let mut acc = engine::wander(&mut sponge, &mut matrix, params.t_cost);
    engine::wrap_up(&mut sponge, &mut acc, output);
    Ok(Work {
        duplexes: sponge.duplexes(),
        full_permutations: sponge.full_permutations(),
        matrix_bytes: matrix.size_in_bytes(),
    })
}

/// Derives an `out_len`-byte [`Key`].
///
/// The key buffer is reserved before the matrix, so an `out_len` that cannot
/// be allocated is reported as [`Error::OutputAllocation`].
pub fn hash(
    password: &[u8],
    salt: &[u8],
    out_len: usize,
    t_cost: u32,
    m_cost: u64,
) -> Result<Key, Error> {
    let params = Params::new(t_cost, m_cost)?;
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(out_len)
        .map_err(|_| Error::OutputAllocation { len: out_len })?;
    bytes.resize(out_len, 0);
    lyra(password, salt, &params, &mut bytes)?;
    Ok(Key { bytes })
}

/// A derived key. Compared in constant time and erased on drop.
#[derive(Clone)]
pub struct Key {
    bytes: Vec<u8>,
}

impl Key {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.as_slice().ct_eq(other.bytes.as_slice()).to_u8() == 1
    }
}

impl PartialEq<[u8]> for Key {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes.as_slice().ct_eq(other).to_u8() == 1
    }
}

impl Eq for Key {}

impl Drop for Key {
    fn drop(&mut self) {
        self.bytes.iter_mut().erase();
    }
}

impl core::fmt::Debug for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Key(")?;
        for b in &self.bytes {
            write!(f, "{b:02x}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_matches_rate() {
        assert_eq!(BLOCK_BYTES, 96);
        assert!(BLOCK_WORDS < STATE_WORDS);
        assert_eq!(IV.len(), STATE_WORDS - 8);
    }

    #[test]
    fn key_comparison() {
        let a = hash(b"password", b"salt", 32, 1, 4).unwrap();
        let b = hash(b"password", b"salt", 32, 1, 4).unwrap();
        let c = hash(b"password", b"pepper", 32, 1, 4).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a == *b.as_bytes());
        assert_eq!(a.len(), 32);
        assert!(format!("{a:?}").starts_with("Key("));
    }

    #[test]
    fn invalid_params_never_allocate() {
        assert!(matches!(
            hash(b"", b"", 16, 0, u64::MAX),
            Err(Error::InvalidParams(_))
        ));
    }
}
