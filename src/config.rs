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

//! Engine-wide configuration, analogous to the knobs a UCI frontend would
//! expose via `setoption`, but plain data: this crate never parses UCI
//! itself.

use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Configuration that applies across every search the engine runs, rather
/// than to a single `go` command.
pub struct EngineConfig {
    /// The transposition table size, in megabytes.
    pub hash_mb: u32,
    /// Time subtracted from every time-based search budget, covering the
    /// latency of actually transmitting the chosen move once search
    /// returns.
    pub move_overhead: Duration,
}

impl EngineConfig {
    #[must_use]
    pub const fn new(hash_mb: u32, move_overhead: Duration) -> EngineConfig {
        EngineConfig {
            hash_mb,
            move_overhead,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            hash_mb: 16,
            move_overhead: Duration::from_millis(10),
        }
    }
}
