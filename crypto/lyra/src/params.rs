use crate::{error::Error, BLOCK_BYTES, N_COLS};

/// Cost parameters of one derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub(crate) t_cost: u32,
    pub(crate) m_cost: u64,
}

impl Params {
    /// `t_cost` is the number of wandering passes and `m_cost` the number of
    /// rows in the memory matrix. Both must be at least 1.
    ///
    /// Whether the matrix fits in memory is only known once the derivation
    /// tries to allocate it.
    pub const fn new(t_cost: u32, m_cost: u64) -> Result<Self, Error> {
        if t_cost == 0 {
            return Err(Error::InvalidParams("time cost must be at least 1"));
        }
        if m_cost == 0 {
            return Err(Error::InvalidParams("row count must be at least 1"));
        }
        Ok(Self { t_cost, m_cost })
    }

    #[must_use]
    pub const fn t_cost(&self) -> u32 {
        self.t_cost
    }

    #[must_use]
    pub const fn m_cost(&self) -> u64 {
        self.m_cost
    }

    /// Bytes the memory matrix will occupy, if that is representable.
    #[must_use]
    pub fn memory_bytes(&self) -> Option<u64> {
        self.m_cost
            .checked_mul(N_COLS as u64)?
            .checked_mul(BLOCK_BYTES as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_costs_are_rejected() {
        assert!(matches!(Params::new(0, 16), Err(Error::InvalidParams(_))));
        assert!(matches!(Params::new(1, 0), Err(Error::InvalidParams(_))));
        assert!(Params::new(1, 1).is_ok());
    }

    #[test]
    fn memory_bytes() {
        let params = Params::new(1, 16).unwrap();
        assert_eq!(params.memory_bytes(), Some(16 * 64 * 96));
        assert_eq!(Params::new(1, u64::MAX).unwrap().memory_bytes(), None);
    }
}
