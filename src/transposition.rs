/*
  Tarrasch, a UCI-compatible chess engine.
  Copyright (C) 2022 Clayton Ramsey.

  Tarrasch is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Tarrasch is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! The transposition table.
//!
//! A fixed-memory, hash-indexed cache of search results. The same
//! position is often reached by more than one move order, so caching what
//! the search already learned about it saves re-deriving the answer.
//!
//! Unlike the lockless, pointer-chasing table this core's ancestor used
//! for multithreaded access, this table is a single `Vec` of slots guarded
//! by ordinary borrowing: it is specified single-threaded (see the
//! concurrency notes on [`crate::search`]), and a plain `Vec` is both
//! simpler and safe. Its entry layout (a hash tag alongside plain-data
//! fields) is still compatible with a future lockless rewrite, which would
//! XOR the hash into the payload on write and reject mismatches on read.

use crate::error::SearchError;
use crate::score::Score;

/// How many ages newer a replacement candidate must be before it evicts an
/// occupied slot unconditionally, regardless of depth or bound kind.
const AGE_THRESHOLD: u16 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a stored score means relative to the window it was computed with.
pub enum NodeType {
    /// The stored score is the true minimax value at the stored depth.
    Exact,
    /// A beta cutoff occurred; the true value is at least the stored
    /// score.
    LowerBound,
    /// No move raised alpha; the true value is at most the stored score.
    UpperBound,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One cached search result.
pub struct TTEntry {
    /// The full 64-bit Zobrist hash of the position this entry describes,
    /// used to detect the index collisions that are inevitable once more
    /// positions exist than slots.
    pub hash: u64,
    /// The cached score, in the height-relative form produced by
    /// [`Score::to_tt`].
    pub score: Score,
    /// The depth remaining at the time of insertion (not the depth from
    /// the root).
    pub depth: i8,
    pub kind: NodeType,
    /// The search generation this entry was written in, used to flush
    /// state from earlier games without a full clear.
    pub age: u16,
}

/// A fixed-size, hash-indexed cache of [`TTEntry`] values.
pub struct TTable {
    slots: Vec<Option<TTEntry>>,
    consumed: usize,
}

impl TTable {
    #[must_use]
    /// Allocate a table sized to fit within `megabytes` of memory.
    pub fn new(megabytes: u32) -> Self {
        let size = Self::slot_count(megabytes);
        TTable {
            slots: vec![None; size],
            consumed: 0,
        }
    }

    fn slot_count(megabytes: u32) -> usize {
        let bytes = (megabytes as usize) << 20;
        (bytes / std::mem::size_of::<Option<TTEntry>>()).max(1)
    }

    /// Clear every slot, preserving the table's size.
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.consumed = 0;
    }

    /// Resize the table to fit within `megabytes`, clearing it in the
    /// process. On allocation failure, the table is left exactly as it
    /// was and the error is returned so the caller can report `Hash`
    /// unchanged, per the engine's allocation-failure policy.
    pub fn resize(&mut self, megabytes: u32) -> Result<(), SearchError> {
        let size = Self::slot_count(megabytes);
        let mut fresh = Vec::new();
        fresh
            .try_reserve_exact(size)
            .map_err(|_| SearchError::AllocationFailure {
                requested_mb: megabytes,
            })?;
        fresh.resize(size, None);
        self.slots = fresh;
        self.consumed = 0;
        Ok(())
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash >> 32) as usize % self.slots.len()
    }

    #[must_use]
    /// Look up `hash`. Returns `None` if the slot is empty or holds a
    /// different position (an index collision); a returned entry is
    /// always the exact position queried.
    pub fn get(&self, hash: u64) -> Option<TTEntry> {
        let slot = &self.slots[self.index(hash)];
        match slot {
            Some(entry) if entry.hash == hash => Some(*entry),
            _ => None,
        }
    }

    /// Insert `entry` under the replacement policy: always replace an
    /// empty slot or the same position; otherwise prefer newer ages,
    /// deeper results, and exact bounds over approximate ones.
    pub fn set(&mut self, entry: TTEntry) {
        let idx = self.index(entry.hash);
        let slot = &mut self.slots[idx];
        match slot {
            None => {
                *slot = Some(entry);
                self.consumed += 1;
            }
            Some(old) if old.hash == entry.hash => {
                *old = entry;
            }
            Some(old) => {
                let keep_old = entry.age.wrapping_sub(old.age) < AGE_THRESHOLD
                    && (old.depth > entry.depth
                        || (old.kind == NodeType::Exact && entry.kind != NodeType::Exact));
                if !keep_old {
                    *old = entry;
                }
            }
        }
    }

    #[must_use]
    /// The fraction of occupied slots, in thousandths, for UCI
    /// `hashfull`.
    pub fn consumed_permille(&self) -> u32 {
        ((self.consumed as u64 * 1000) / self.slots.len() as u64) as u32
    }

    #[must_use]
    pub fn slot_count_actual(&self) -> usize {
        self.slots.len()
    }
}
