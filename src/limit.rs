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

//! Search limiting.
//!
//! It makes little sense for a search to decide for itself when it's done;
//! it's handed a budget instead and polls it periodically. The search
//! itself runs on a single thread, but `stop()` is exposed through an
//! `AtomicBool` so a frontend (a UCI `stop` command, a GUI's "abort"
//! button) on another thread can still cut a search short without any
//! locking.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};

#[derive(Debug)]
/// A budget governing how long and how deep a single search may run.
pub struct SearchLimit {
    /// Set by an external `stop()` call, or once a budget is exceeded.
    over: AtomicBool,
    /// The cumulative number of nodes searched since the last `start`.
    num_nodes: AtomicU64,
    /// A cap on the total number of nodes to search, if any.
    pub nodes_cap: Option<u64>,
    /// A cap on the total search depth, if any.
    pub depth_cap: Option<u8>,
    /// The wall-clock budget for the search, if any.
    pub time_budget: Option<Duration>,
    /// Time the search itself may not spend, reserved for the overhead of
    /// actually transmitting a move once the search is done.
    pub move_overhead: Duration,
    start_time: Mutex<Instant>,
    end_time: RwLock<Option<Instant>>,
}

impl SearchLimit {
    #[must_use]
    /// A limit that never expires on its own; only an explicit `stop()`
    /// ends the search.
    pub fn infinite() -> SearchLimit {
        SearchLimit {
            over: AtomicBool::new(false),
            num_nodes: AtomicU64::new(0),
            nodes_cap: None,
            depth_cap: None,
            time_budget: None,
            move_overhead: Duration::ZERO,
            start_time: Mutex::new(Instant::now()),
            end_time: RwLock::new(None),
        }
    }

    #[must_use]
    /// A limit that stops once `budget` has elapsed, minus `move_overhead`.
    pub fn for_duration(budget: Duration, move_overhead: Duration) -> SearchLimit {
        SearchLimit {
            time_budget: Some(budget.saturating_sub(move_overhead)),
            move_overhead,
            ..SearchLimit::infinite()
        }
    }

    /// Arm the limit: reset the node count and stop flag, and compute the
    /// deadline from `time_budget` if one was set. Must be called exactly
    /// once at the start of each new search.
    ///
    /// # Panics
    ///
    /// Panics if a lock is poisoned.
    pub fn start(&self) {
        self.num_nodes.store(0, Ordering::Relaxed);
        self.over.store(false, Ordering::Relaxed);
        let now = Instant::now();
        *self.start_time.lock().unwrap() = now;
        *self.end_time.write().unwrap() = self.time_budget.map(|budget| now + budget);
    }

    /// Immediately mark the search as over, from this thread or any other.
    pub fn stop(&self) {
        self.over.store(true, Ordering::Relaxed);
    }

    #[must_use]
    /// Poll whether the search must stop now: either `stop()` was called,
    /// or a configured budget has been exceeded.
    ///
    /// # Panics
    ///
    /// Panics if a lock is poisoned.
    pub fn is_over(&self) -> bool {
        if self.over.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(end) = *self.end_time.read().unwrap() {
            if Instant::now() >= end {
                self.over.store(true, Ordering::Relaxed);
                return true;
            }
        }
        false
    }

    /// Record that `nodes` more nodes were searched, checking the node cap
    /// in the process.
    pub fn add_nodes(&self, nodes: u64) {
        let total = self.num_nodes.fetch_add(nodes, Ordering::Relaxed) + nodes;
        if let Some(cap) = self.nodes_cap {
            if total > cap {
                self.over.store(true, Ordering::Relaxed);
            }
        }
    }

    #[must_use]
    pub fn num_nodes(&self) -> u64 {
        self.num_nodes.load(Ordering::Relaxed)
    }

    #[must_use]
    /// Time elapsed since the last `start()`.
    ///
    /// # Panics
    ///
    /// Panics if a lock is poisoned.
    pub fn elapsed(&self) -> Duration {
        self.start_time.lock().unwrap().elapsed()
    }

    #[must_use]
    /// Whether `depth` (plies from the root) exceeds this limit's depth
    /// cap, if one is set.
    pub fn depth_exceeds_cap(&self, depth: u8) -> bool {
        self.depth_cap.is_some_and(|cap| depth > cap)
    }
}
