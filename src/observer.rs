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

//! Reporting search progress without this crate knowing about UCI.
//!
//! Iterative deepening calls a [`SearchObserver`] once per completed
//! iteration (and, optionally, more often within a slow iteration); a UCI
//! frontend's observer would format [`SearchInfo`] as an `info` line and
//! print it. This crate never prints anything itself.

use std::time::Duration;

use crate::score::Score;

#[derive(Clone, Debug, PartialEq)]
/// A snapshot of search progress, in the shape a UCI `info` line needs.
pub struct SearchInfo {
    /// The depth just completed, in plies.
    pub depth: u8,
    /// The deepest ply actually reached while resolving tactics at `depth`
    /// (quiescence included).
    pub seldepth: u8,
    /// The best score found at this depth, from the root side's
    /// perspective.
    pub score: Score,
    /// Total nodes searched so far this search (all iterations combined).
    pub nodes: u64,
    /// Nodes per second, averaged over the whole search so far.
    pub nps: u64,
    /// Transposition table occupancy, in thousandths.
    pub hashfull: u32,
    /// Wall-clock time spent searching so far.
    pub time: Duration,
    /// The principal variation, rendered as a space-separated move list.
    pub pv: String,
}

/// Receives progress updates as a search runs.
///
/// Implementors must return quickly: `on_info` is called from inside the
/// search loop, and a slow observer directly slows the search.
pub trait SearchObserver {
    /// Called once a new best line is available, typically at the end of
    /// each iterative-deepening iteration.
    fn on_info(&mut self, info: &SearchInfo);
}

/// An observer that discards every update, for callers that don't need
/// progress reporting.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl SearchObserver for NullObserver {
    fn on_info(&mut self, _info: &SearchInfo) {}
}
