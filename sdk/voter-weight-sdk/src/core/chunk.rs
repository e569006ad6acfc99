//! Splitting of remaining-account lists across instructions.

/// Batch sizes for one remaining-account list.
///
/// Batch boundaries only fall on multiples of `group_size`, so the accounts
/// of one entity (for example an NFT's token, metadata and vote record)
/// always travel in the same instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLayout {
    /// Accounts per logical entity
    pub group_size: usize,
    /// Ceiling for the primary batch
    pub primary_max: usize,
    /// Ceiling for every overflow batch
    pub overflow_max: usize,
}

impl ChunkLayout {
    pub const fn new(group_size: usize, primary_max: usize, overflow_max: usize) -> Self {
        Self {
            group_size,
            primary_max,
            overflow_max,
        }
    }

    fn group(&self) -> usize {
        self.group_size.max(1)
    }

    fn primary_len(&self) -> usize {
        (self.primary_max / self.group()) * self.group()
    }

    fn overflow_len(&self) -> usize {
        ((self.overflow_max / self.group()) * self.group()).max(self.group())
    }
}

/// Split `accounts` into the primary batch followed by overflow batches.
///
/// The result always holds the primary batch, even when it is empty.
/// Concatenating the batches in order yields `accounts` unchanged.
pub fn chunk_accounts<T: Clone>(accounts: &[T], layout: ChunkLayout) -> Vec<Vec<T>> {
    let split = layout.primary_len().min(accounts.len());
    let (primary, rest) = accounts.split_at(split);

    let mut batches = vec![primary.to_vec()];
    batches.extend(rest.chunks(layout.overflow_len()).map(<[T]>::to_vec));
    batches
}
