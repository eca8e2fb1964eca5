use core::fmt::{Debug, Display};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The `rows · N_COLS · BLOCK_BYTES` matrix could not be allocated.
    Allocation { rows: u64 },
    /// The `len`-byte key buffer could not be allocated.
    OutputAllocation { len: usize },
    InvalidParams(&'static str),
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Allocation { .. } => f.write_str("unable to allocate memory (R too large?)"),
            Self::OutputAllocation { len } => {
                write!(f, "unable to allocate a {len}-byte output buffer")
            }
            Self::InvalidParams(reason) => write!(f, "invalid parameters: {reason}"),
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(self, f)
    }
}

impl std::error::Error for Error {}
