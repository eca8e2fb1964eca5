//! The memory matrix: `rows × N_COLS` blocks in one contiguous allocation.
//!
//! Rows are handed out as slices of exactly [`N_COLS`] blocks. The setup
//! phase needs two already-built rows alongside the row being written, which
//! [`Matrix::fill_view`] provides through `split_at_mut`, so no two borrows
//! ever overlap.

use crate::{error::Error, Block, BLOCK_BYTES, BLOCK_WORDS, N_COLS};
use crypto_common::erase::Erase;

pub type Row = [Block; N_COLS];

pub struct Matrix {
    blocks: Vec<Block>,
    rows: usize,
}

impl Matrix {
    /// Reserves exactly `rows · N_COLS · BLOCK_BYTES` bytes.
    ///
    /// The reservation is fallible: a size that overflows or that the
    /// allocator refuses is reported as [`Error::Allocation`] instead of
    /// aborting the process.
    ///
    /// Only refusals at reservation time are caught. Where the OS overcommits
    /// memory (Linux by default), a matrix larger than the free RAM but within
    /// the overcommit limit reserves fine, and the process may then be killed
    /// by the OOM killer while the blocks are zeroed.
    pub fn try_new(rows: u64) -> Result<Self, Error> {
        let err = Error::Allocation { rows };
        let n_rows = usize::try_from(rows).map_err(|_| err)?;
        let len = n_rows.checked_mul(N_COLS).ok_or(err)?;
        let mut blocks = Vec::new();
        blocks.try_reserve_exact(len).map_err(|_| err)?;
        blocks.resize(len, [0; BLOCK_WORDS]);
        Ok(Self {
            blocks,
            rows: n_rows,
        })
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Size of the matrix in bytes.
    #[inline]
    #[must_use]
    pub fn size_in_bytes(&self) -> usize {
        self.blocks.len() * BLOCK_BYTES
    }

    /// Reduces `index` modulo the row count.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn row_index(&self, index: u64) -> usize {
        // rows fits in usize, so the remainder does too.
        (index % self.rows as u64) as usize
    }

    #[inline]
    #[must_use]
    pub fn block(&self, row: usize, col: usize) -> &Block {
        &self.row(row)[col % N_COLS]
    }

    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[Block] {
        let start = (row % self.rows) * N_COLS;
        &self.blocks[start..start + N_COLS]
    }

    #[inline]
    pub fn row_mut(&mut self, row: usize) -> &mut [Block] {
        let start = (row % self.rows) * N_COLS;
        &mut self.blocks[start..start + N_COLS]
    }

    /// Borrows the previous row and the selected row for reading, together
    /// with row `current` for writing.
    ///
    /// `previous` and `selected` must both precede `current`.
    pub fn fill_view(
        &mut self,
        current: usize,
        previous: usize,
        selected: usize,
    ) -> (&[Block], &[Block], &mut [Block]) {
        assert!(
            previous < current && selected < current && current < self.rows,
            "setup may only read rows that were already built"
        );
        let (built, rest) = self.blocks.split_at_mut(current * N_COLS);
        let previous = &built[previous * N_COLS..(previous + 1) * N_COLS];
        let selected = &built[selected * N_COLS..(selected + 1) * N_COLS];
        (previous, selected, &mut rest[..N_COLS])
    }
}

impl Drop for Matrix {
    fn drop(&mut self) {
        self.blocks.iter_mut().erase();
    }
}

impl core::fmt::Debug for Matrix {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows)
            .field("cols", &N_COLS)
            .finish_non_exhaustive()
    }
}
