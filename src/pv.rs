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

//! Principal-variation lines.
//!
//! A [`PVLine`] is an owned, bounded buffer of moves with an explicit
//! length, not a linked list: every node in the search allocates one for
//! its children, and `add_first` + `replace_tail` copy at most
//! `depth_left` moves, which is negligible next to the cost of the search
//! itself.

use std::fmt::{self, Display, Formatter};

#[derive(Clone, Debug)]
/// A sequence of moves representing the line the search currently
/// believes is best, bounded to `capacity` moves.
pub struct PVLine<M> {
    moves: Vec<M>,
    capacity: usize,
}

impl<M: Copy> PVLine<M> {
    #[must_use]
    /// Create an empty line that can hold up to `capacity` moves.
    pub fn new(capacity: usize) -> Self {
        PVLine {
            moves: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend `m` to the front of this line, as the move that was just
    /// played to reach the position whose continuation this line
    /// describes. If the line is already at capacity, the last move is
    /// evicted to make room: the move nearest the root is the one a caller
    /// can least afford to lose.
    pub fn add_first(&mut self, m: M) {
        if self.moves.len() >= self.capacity {
            self.moves.pop();
        }
        self.moves.insert(0, m);
    }

    /// Replace every move after the first with the moves of `tail`. Used
    /// after `add_first` to graft a child node's line onto this one.
    pub fn replace_tail(&mut self, tail: &PVLine<M>) {
        self.moves.truncate(1);
        for &m in tail.as_slice() {
            if self.moves.len() >= self.capacity {
                break;
            }
            self.moves.push(m);
        }
    }

    /// Remove and return the first move of this line, if any.
    pub fn pop(&mut self) -> Option<M> {
        if self.moves.is_empty() {
            None
        } else {
            Some(self.moves.remove(0))
        }
    }

    #[must_use]
    /// The moves in this line, in play order.
    pub fn as_slice(&self) -> &[M] {
        &self.moves
    }

    #[must_use]
    /// The first move of this line, if any (the move the search
    /// recommends playing right now).
    pub fn best_move(&self) -> Option<M> {
        self.moves.first().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Empty this line without changing its capacity.
    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

impl<M: Display> Display for PVLine<M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for m in &self.moves {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{m}")?;
            first = false;
        }
        Ok(())
    }
}
