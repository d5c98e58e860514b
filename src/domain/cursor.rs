//! Total ordering of event-log records.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Position of a record in the append-only event log.
///
/// Orders lexicographically by block number, then by transaction index
/// within the block. Keeping the two components explicit avoids the
/// collision a packed encoding hits once a block carries more
/// transactions than the packing scale allows.
///
/// "As-of" queries are strict: an event at cursor `e` is visible to a
/// query at cursor `c` iff `e < c`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Cursor {
    block_number: u64,
    transaction_index: u32,
}

impl Cursor {
    /// Before every possible record.
    pub const ORIGIN: Self = Self {
        block_number: 0,
        transaction_index: 0,
    };

    /// After every possible record.
    pub const MAX: Self = Self {
        block_number: u64::MAX,
        transaction_index: u32::MAX,
    };

    #[must_use]
    pub const fn new(block_number: u64, transaction_index: u32) -> Self {
        Self {
            block_number,
            transaction_index,
        }
    }

    /// The cursor of the first transaction slot in a block. Useful for
    /// "state at start of block" queries.
    #[must_use]
    pub const fn at_block(block_number: u64) -> Self {
        Self::new(block_number, 0)
    }

    #[must_use]
    pub const fn block_number(&self) -> u64 {
        self.block_number
    }

    #[must_use]
    pub const fn transaction_index(&self) -> u32 {
        self.transaction_index
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.block_number, self.transaction_index)
    }
}
