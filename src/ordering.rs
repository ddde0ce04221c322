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

//! Move ordering: rank a node's legal moves so that alpha-beta prunes as
//! much of the tree as possible.
//!
//! This is a two-pass scheme rather than a comparator that calls
//! make/unmake on every comparison: each move's rank is computed once into
//! a parallel key, and the moves are sorted by key. An earlier version of
//! this ordering (and the codebase it was extracted from) paid for an
//! O(n log n) multiple of make/unmake pairs per node by querying the
//! table from inside the comparator itself.

use crate::position::{Move, Position};
use crate::score::Score;
use crate::transposition::{NodeType, TTable};

/// A move's place in the ranking, from lowest (searched last) to highest
/// (searched first): quiet, check, capture, castle, TT-bound, TT-exact.
/// Within a tier, `rank` breaks further ties; it has no meaning across
/// tiers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct MoveKey {
    tier: u8,
    rank: i64,
}

const TIER_QUIET: u8 = 0;
const TIER_CHECK: u8 = 1;
const TIER_CAPTURE: u8 = 2;
const TIER_CASTLE: u8 = 3;
const TIER_TT_BOUND: u8 = 4;
const TIER_TT_EXACT: u8 = 5;

fn tt_key<P: Position>(pos: &mut P, m: P::Move, tt: &TTable, age: u16) -> Option<MoveKey> {
    let undo = pos.make_move(m);
    let hash = pos.hash();
    pos.unmake_move(m, undo);

    tt.get(hash).map(|entry| {
        let tier = if entry.kind == NodeType::Exact {
            TIER_TT_EXACT
        } else {
            TIER_TT_BOUND
        };
        let score = entry.score.from_tt(0).centipawn_value() as i64;
        let _ = age; // age participates in eviction, not in this ranking
        MoveKey {
            tier,
            rank: score * 1_000 + i64::from(entry.depth),
        }
    })
}

fn key_for_move<P: Position>(pos: &mut P, m: P::Move, tt: &TTable, age: u16) -> MoveKey {
    if let Some(key) = tt_key(pos, m, tt, age) {
        return key;
    }
    if m.is_castle() {
        return MoveKey {
            tier: TIER_CASTLE,
            rank: 0,
        };
    }
    if m.is_capture() {
        let victim = m.captured_piece().map_or(0, |p| p.value());
        let attacker = m.moving_piece().value();
        return MoveKey {
            tier: TIER_CAPTURE,
            rank: i64::from(victim) * 1_000 - i64::from(attacker),
        };
    }
    if pos.gives_check(m) {
        return MoveKey {
            tier: TIER_CHECK,
            rank: 0,
        };
    }
    MoveKey {
        tier: TIER_QUIET,
        rank: -i64::from(m.moving_piece().value()),
    }
}

/// Sort `moves` in place, best-first, using the ranking described above.
/// `age` is the table generation the search was started with, threaded
/// through for symmetry with [`crate::transposition::TTable::set`] even
/// though it plays no role in reading an existing entry.
pub fn order_moves<P: Position>(pos: &mut P, moves: &mut [P::Move], tt: &TTable, age: u16) {
    let mut keyed: Vec<(MoveKey, P::Move)> = moves
        .iter()
        .map(|&m| (key_for_move(pos, m, tt, age), m))
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    for (slot, (_, m)) in moves.iter_mut().zip(keyed) {
        *slot = m;
    }
}

/// Reorder `moves` (and the parallel `evals` recorded for them in the
/// previous iterative-deepening pass) best-first by score, so the next,
/// deeper iteration tries last iteration's best move first.
pub fn sort_root_moves_by_prior_eval<M: Copy>(moves: &mut [M], evals: &mut [Score]) {
    debug_assert_eq!(moves.len(), evals.len());
    let mut order: Vec<usize> = (0..moves.len()).collect();
    order.sort_by(|&a, &b| evals[b].cmp(&evals[a]));

    let sorted_moves: Vec<M> = order.iter().map(|&i| moves[i]).collect();
    let sorted_evals: Vec<Score> = order.iter().map(|&i| evals[i]).collect();
    moves.copy_from_slice(&sorted_moves);
    evals.copy_from_slice(&sorted_evals);
}
