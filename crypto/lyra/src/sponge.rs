use crate::{
    permutation::{permute, FULL_ROUNDS, REDUCED_ROUNDS},
    Block, BLOCK_BYTES, BLOCK_WORDS, IV, STATE_WORDS,
};
use crypto_common::erase::{Erase, EraseOnDrop};

const W: usize = core::mem::size_of::<u64>();

/// Duplex sponge over the 16-word state.
///
/// The first [`BLOCK_WORDS`] words are the rate; the remaining words are the
/// capacity and are only ever touched by the permutation. Absorbing, squeezing
/// and explicit checkpoints use the full round count. Duplexing uses the
/// reduced round count.
///
/// The state is erased when the sponge is dropped.
pub struct Sponge {
    state: [u64; STATE_WORDS],
    duplexes: u64,
    full_permutations: u64,
}

impl Sponge {
    #[must_use]
    pub fn new() -> Self {
        let mut state = [0; STATE_WORDS];
        state[STATE_WORDS - IV.len()..].copy_from_slice(&IV);
        Self {
            state,
            duplexes: 0,
            full_permutations: 0,
        }
    }

    #[inline(always)]
    fn xor_rate(&mut self, block: &Block) {
        for (s, b) in self.state.iter_mut().zip(block.iter()) {
            *s ^= b;
        }
    }

    #[inline(always)]
    fn rate(&self) -> Block {
        let mut out = [0; BLOCK_WORDS];
        out.copy_from_slice(&self.state[..BLOCK_WORDS]);
        out
    }

    /// Applies the full-round permutation without injecting anything.
    #[inline]
    pub fn permute_full(&mut self) {
        permute(&mut self.state, FULL_ROUNDS);
        self.full_permutations += 1;
    }

    /// Absorbs a single block with the full-round permutation.
    #[inline]
    pub fn absorb_block(&mut self, block: &Block) {
        self.xor_rate(block);
        self.permute_full();
    }

    /// Absorbs arbitrary bytes.
    ///
    /// The input is padded with `0x01`, zeros, and a final `0x80` bit up to a
    /// whole number of blocks. There is always at least one padding byte, so
    /// an input that is already block-aligned gains a full padding block.
    pub fn absorb(&mut self, data: &[u8]) -> &mut Self {
        let mut chunks = data.chunks_exact(BLOCK_BYTES);
        for chunk in &mut chunks {
            self.absorb_block(&block_from_bytes(chunk));
        }
        let tail = chunks.remainder();
        let mut last = [0; BLOCK_BYTES];
        last[..tail.len()].copy_from_slice(tail);
        last[tail.len()] = 0x01;
        last[BLOCK_BYTES - 1] ^= 0x80;
        let mut block = block_from_bytes(&last);
        self.absorb_block(&block);
        last.erase();
        block.erase();
        self
    }

    /// Injects `input` into the rate, applies the reduced-round permutation
    /// and returns the updated rate.
    #[inline]
    pub fn duplex(&mut self, input: &Block) -> Block {
        self.xor_rate(input);
        permute(&mut self.state, REDUCED_ROUNDS);
        self.duplexes += 1;
        self.rate()
    }

    /// Fills `out` from the rate, one block at a time, applying the full-round
    /// permutation after every block that was read.
    pub fn squeeze(&mut self, out: &mut [u8]) -> &mut Self {
        for chunk in out.chunks_mut(BLOCK_BYTES) {
            let mut bytes = [0; BLOCK_BYTES];
            for (dst, word) in bytes.chunks_exact_mut(W).zip(self.state.iter()) {
                dst.copy_from_slice(&word.to_le_bytes());
            }
            chunk.copy_from_slice(&bytes[..chunk.len()]);
            bytes.erase();
            self.permute_full();
        }
        self
    }

    /// Number of duplex calls made so far.
    #[must_use]
    pub const fn duplexes(&self) -> u64 {
        self.duplexes
    }

    /// Number of full-round permutations applied so far.
    #[must_use]
    pub const fn full_permutations(&self) -> u64 {
        self.full_permutations
    }
}

impl Default for Sponge {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Sponge {
    fn drop(&mut self) {
        self.state.erase();
    }
}

impl EraseOnDrop for Sponge {}

impl core::fmt::Debug for Sponge {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Sponge")
            .field("duplexes", &self.duplexes)
            .field("full_permutations", &self.full_permutations)
            .finish_non_exhaustive()
    }
}

#[inline(always)]
fn block_from_bytes(bytes: &[u8]) -> Block {
    debug_assert_eq!(bytes.len(), BLOCK_BYTES);
    let mut block = [0; BLOCK_WORDS];
    for (word, chunk) in block.iter_mut().zip(bytes.chunks_exact(W)) {
        let mut le = [0; W];
        le.copy_from_slice(chunk);
        *word = u64::from_le_bytes(le);
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_carries_iv_in_capacity() {
        let sponge = Sponge::new();
        assert!(sponge.state[..8].iter().all(|&w| w == 0));
        assert_eq!(&sponge.state[8..], &IV);
    }

    #[test]
    fn absorb_pads_aligned_input_with_extra_block() {
        let mut short = Sponge::new();
        short.absorb(&[7; BLOCK_BYTES - 1]);
        assert_eq!(short.full_permutations(), 1);
        let mut aligned = Sponge::new();
        aligned.absorb(&[7; BLOCK_BYTES]);
        assert_eq!(aligned.full_permutations(), 2);
        let mut empty = Sponge::new();
        empty.absorb(&[]);
        assert_eq!(empty.full_permutations(), 1);
    }

    #[test]
    fn padding_separates_trailing_zeros() {
        let mut a = [0; 32];
        let mut b = [0; 32];
        Sponge::new().absorb(b"abc").squeeze(&mut a);
        Sponge::new().absorb(b"abc\0").squeeze(&mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn duplex_returns_rate_after_reduced_round() {
        let mut sponge = Sponge::new();
        let input = [0x5a5a_5a5a_5a5a_5a5a; BLOCK_WORDS];
        let mut expected = sponge.state;
        for (s, i) in expected.iter_mut().zip(input.iter()) {
            *s ^= i;
        }
        permute(&mut expected, REDUCED_ROUNDS);
        let out = sponge.duplex(&input);
        assert_eq!(&out[..], &expected[..BLOCK_WORDS]);
        assert_eq!(sponge.duplexes(), 1);
        assert_eq!(sponge.full_permutations(), 0);
    }

    #[test]
    fn squeeze_is_a_stream_of_rate_blocks() {
        let mut one = [0; 2 * BLOCK_BYTES + 5];
        Sponge::new().absorb(b"seed").squeeze(&mut one);
        let mut s = Sponge::new();
        s.absorb(b"seed");
        let mut first = [0; BLOCK_BYTES];
        let mut second = [0; BLOCK_BYTES];
        let mut third = [0; 5];
        s.squeeze(&mut first).squeeze(&mut second).squeeze(&mut third);
        assert_eq!(&one[..BLOCK_BYTES], &first);
        assert_eq!(&one[BLOCK_BYTES..2 * BLOCK_BYTES], &second);
        assert_eq!(&one[2 * BLOCK_BYTES..], &third);
    }

    #[test]
    fn empty_squeeze_does_not_permute() {
        let mut sponge = Sponge::new();
        sponge.squeeze(&mut []);
        assert_eq!(sponge.full_permutations(), 0);
    }
}
