use crate::{
    matrix::{Matrix, Row},
    sponge::Sponge,
    Block, Params, BLOCK_WORDS, N_COLS,
};
use crypto_common::erase::Erase;

#[inline(always)]
fn xor(a: &Block, b: &Block) -> Block {
    let mut out = [0; BLOCK_WORDS];
    for ((o, x), y) in out.iter_mut().zip(a.iter()).zip(b.iter()) {
        *o = x ^ y;
    }
    out
}

#[inline(always)]
fn counter_block(col: usize) -> Block {
    let mut block = [0; BLOCK_WORDS];
    block[0] = col as u64;
    block
}

/// Absorbs the length-prefixed parameter string.
///
/// `le64(out_len) ‖ le64(|pwd|) ‖ pwd ‖ le64(|salt|) ‖ salt ‖ le64(t) ‖
/// le64(rows) ‖ le64(cols)`
pub fn absorb_params(
    sponge: &mut Sponge,
    password: &[u8],
    salt: &[u8],
    params: &Params,
    out_len: usize,
) {
    let mut encoded = Vec::with_capacity(6 * 8 + password.len() + salt.len());
    encoded.extend_from_slice(&(out_len as u64).to_le_bytes());
    encoded.extend_from_slice(&(password.len() as u64).to_le_bytes());
    encoded.extend_from_slice(password);
    encoded.extend_from_slice(&(salt.len() as u64).to_le_bytes());
    encoded.extend_from_slice(salt);
    encoded.extend_from_slice(&u64::from(params.t_cost).to_le_bytes());
    encoded.extend_from_slice(&params.m_cost.to_le_bytes());
    encoded.extend_from_slice(&(N_COLS as u64).to_le_bytes());
    sponge.absorb(&encoded);
    encoded.iter_mut().erase();
}

/// Builds every row of the matrix, strictly in order.
///
/// Row 0 is squeezed out of the sponge by duplexing counter blocks. Row `i`
/// duplexes, column by column, row `i - 1` against a row `j < i` read in
/// reverse column order. `j` is the first word of the block produced last,
/// reduced modulo `i`, so the order in which old rows are revisited depends
/// on the password.
#[allow(clippy::cast_possible_truncation)]
pub fn setup(sponge: &mut Sponge, matrix: &mut Matrix) {
    let _span = tracing::debug_span!("setup", rows = matrix.rows()).entered();
    for (col, block) in matrix.row_mut(0).iter_mut().enumerate() {
        *block = sponge.duplex(&counter_block(col));
    }
    for current in 1..matrix.rows() {
        let previous = current - 1;
        // current fits in usize, so the remainder does too.
        let selected = (matrix.block(previous, N_COLS - 1)[0] % current as u64) as usize;
        let (prev, sel, cur) = matrix.fill_view(current, previous, selected);
        for (col, out) in cur.iter_mut().enumerate() {
            let mut input = xor(&prev[col], &sel[N_COLS - 1 - col]);
            *out = sponge.duplex(&input);
            input.erase();
        }
    }
    sponge.permute_full();
}

/// Visits `t_cost · rows` rows in a password-dependent order and returns the
/// accumulator row.
///
/// Overwrite policy: visiting row `r` duplexes `M[r][c] ⊕ acc[c]` for each
/// column `c`, immediately replaces `M[r][c]` with the output and folds the
/// output into `acc[c]`. Only the visited row is written. The next row to
/// visit is the first word of the last output of the visit, reduced modulo
/// the row count, so the visiting order cannot be known before the previous
/// visit has been computed.
pub fn wander(sponge: &mut Sponge, matrix: &mut Matrix, t_cost: u32) -> Row {
    let _span = tracing::debug_span!("wander", t_cost, rows = matrix.rows()).entered();
    let last_row = matrix.rows() - 1;
    let mut acc: Row = [[0; BLOCK_WORDS]; N_COLS];
    acc.copy_from_slice(matrix.row(last_row));
    let mut row = matrix.row_index(matrix.block(last_row, N_COLS - 1)[0]);
    for pass in 0..t_cost {
        tracing::trace!(pass, "wandering pass");
        for _ in 0..matrix.rows() {
            let mut last = [0; BLOCK_WORDS];
            for (block, a) in matrix.row_mut(row).iter_mut().zip(acc.iter_mut()) {
                let mut input = xor(block, a);
                last = sponge.duplex(&input);
                *block = last;
                for (w, o) in a.iter_mut().zip(last.iter()) {
                    *w ^= o;
                }
                input.erase();
            }
            row = matrix.row_index(last[0]);
            last.erase();
        }
    }
    acc
}

/// Absorbs the accumulator row with full rounds and squeezes the key.
pub fn wrap_up(sponge: &mut Sponge, acc: &mut Row, output: &mut [u8]) {
    let _span = tracing::debug_span!("wrap_up", out_len = output.len()).entered();
    for block in acc.iter() {
        sponge.absorb_block(block);
    }
    acc.erase();
    sponge.squeeze(output);
}
