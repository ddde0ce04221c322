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
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines, clippy::module_name_repetitions)]

//! The search core of a chess engine: a transposition table, move ordering,
//! alpha-beta search with principal-variation search and quiescence, and an
//! iterative-deepening driver.
//!
//! This crate does not know how to represent a chess board, generate legal
//! moves, or evaluate a quiet position. Those responsibilities belong to
//! whatever implements [`position::Position`] and [`position::Evaluator`];
//! this crate only knows how to search once it is handed one of each.

pub mod config;
pub mod error;
pub mod iterative_deepening;
pub mod limit;
pub mod observer;
pub mod ordering;
pub mod position;
pub mod pv;
pub mod score;
pub mod search;
pub mod transposition;


pub use config::EngineConfig;
pub use error::SearchError;
pub use iterative_deepening::{iterative_deepen, BestLine};
pub use limit::SearchLimit;
pub use observer::{NullObserver, SearchInfo, SearchObserver};
pub use position::{Color, Evaluator, GameStatus, Move, PieceKind, Position};
pub use pv::PVLine;
pub use score::Score;
pub use search::{SearchOutcome, SearchStats, Searcher};
pub use transposition::{NodeType, TTEntry, TTable};
