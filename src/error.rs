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

//! The error taxonomy for the search core.
//!
//! `StopRequested` and timeout are not represented here: they are normal,
//! cooperative ways for a search to end early and are reported through
//! [`crate::search::SearchOutcome`] rather than as an `Err`.

use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Errors which can arise while running or configuring a search.
pub enum SearchError {
    /// The transposition table could not be resized to the requested size
    /// (the allocator refused the request). The table is left at its
    /// previous size.
    AllocationFailure {
        /// The size, in megabytes, that was requested and rejected.
        requested_mb: u32,
    },
    /// An internal invariant was violated, e.g. `unmake_move` was called
    /// with state that did not match the preceding `make_move`, or a
    /// position was left mutated after a search call returned. The current
    /// search must be aborted, but the engine itself keeps running.
    PolicyViolation {
        /// A short, human-readable description of the invariant that broke.
        detail: &'static str,
    },
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::AllocationFailure { requested_mb } => write!(
                f,
                "failed to allocate a transposition table of {requested_mb} MB"
            ),
            SearchError::PolicyViolation { detail } => {
                write!(f, "internal search invariant violated: {detail}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
