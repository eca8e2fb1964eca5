use crate::STATE_WORDS;

/// Round count used at phase boundaries, for absorbing and for squeezing.
pub const FULL_ROUNDS: usize = 12;
/// Round count used by every duplex call while the matrix is built and
/// visited.
pub const REDUCED_ROUNDS: usize = 1;

#[inline(always)]
fn g(v: &mut [u64; STATE_WORDS], a: usize, b: usize, c: usize, d: usize) {
    v[a] = v[a].wrapping_add(v[b]);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = v[a].wrapping_add(v[b]);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

// the BLAKE2b round with the message words removed.
#[cfg_attr(not(feature = "uninline"), inline(always))]
fn round(v: &mut [u64; STATE_WORDS]) {
    // mix the columns.
    g(v, 0, 4, 8, 12);
    g(v, 1, 5, 9, 13);
    g(v, 2, 6, 10, 14);
    g(v, 3, 7, 11, 15);
    // mix the diagonals.
    g(v, 0, 5, 10, 15);
    g(v, 1, 6, 11, 12);
    g(v, 2, 7, 8, 13);
    g(v, 3, 4, 9, 14);
}

#[inline]
pub fn permute(state: &mut [u64; STATE_WORDS], rounds: usize) {
    for _ in 0..rounds {
        round(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rounds_is_identity() {
        let mut state: [u64; STATE_WORDS] = core::array::from_fn(|i| i as u64);
        let before = state;
        permute(&mut state, 0);
        assert_eq!(state, before);
    }

    #[test]
    fn rounds_compose() {
        let mut a: [u64; STATE_WORDS] = core::array::from_fn(|i| (i as u64) << 7 | 1);
        let mut b = a;
        permute(&mut a, FULL_ROUNDS);
        for _ in 0..FULL_ROUNDS {
            permute(&mut b, REDUCED_ROUNDS);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn single_word_difference_spreads() {
        let mut a = [0u64; STATE_WORDS];
        let mut b = a;
        b[0] = 1;
        permute(&mut a, FULL_ROUNDS);
        permute(&mut b, FULL_ROUNDS);
        assert!(a.iter().zip(b.iter()).all(|(x, y)| x != y));
    }

    #[test]
    fn distinct_states_stay_distinct() {
        let mut seen = std::collections::HashSet::new();
        for i in 0..256u64 {
            let mut state = [0u64; STATE_WORDS];
            state[15] = i;
            permute(&mut state, REDUCED_ROUNDS);
            assert!(seen.insert(state));
        }
    }
}
