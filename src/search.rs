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

//! Principal-variation search with quiescence.
//!
//! All chess engines do some sort of tree searching, and as a classical
//! engine, this one uses a variation of negamax. Here specifically,
//! principal-variation search, which narrows every move after the first at
//! a node to a zero-width window and only re-searches at full width if that
//! move turns out to beat alpha. At each leaf, a second, shorter quiescence
//! search exhausts captures in the position so a "loud" position is never
//! mistaken for a quiet one.

use log::trace;

use crate::ordering::order_moves;
use crate::position::{Evaluator, GameStatus, Move, Position};
use crate::pv::PVLine;
use crate::score::Score;
use crate::transposition::{NodeType, TTEntry, TTable};

use super::limit::SearchLimit;

/// Marks that a search was cut short by [`SearchLimit::is_over`]. Never
/// escapes this module: [`Searcher::run`] converts it into
/// [`SearchOutcome::Stopped`] at the boundary, since a timeout is a normal
/// way for a search to end, not a fallible operation.
struct Stopped;

type NodeResult<T> = Result<T, Stopped>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How many nodes a single [`Searcher::run`] call visited.
pub struct SearchStats {
    /// Every node entered, including quiescence nodes.
    pub nodes: u64,
    /// The deepest ply actually reached, quiescence included.
    pub seldepth: u8,
    /// How many times a transposition-table probe was deep enough and
    /// tight enough to end a node without expanding its moves.
    pub cache_hits: u64,
}

#[derive(Debug)]
/// The result of asking a [`Searcher`] to evaluate one position to one
/// depth and window.
pub enum SearchOutcome<M> {
    /// The search completed within its window.
    Completed {
        score: Score,
        pv: PVLine<M>,
        stats: SearchStats,
    },
    /// The search limit expired before this call finished; its partial
    /// work (including any partial transposition table writes already
    /// made by completed sub-calls) must not be treated as the answer for
    /// this depth.
    Stopped,
}

/// Runs principal-variation search against one position, transposition
/// table, and evaluator. A `Searcher` is cheap to build and is meant to be
/// constructed fresh for every node the root driver wants evaluated (every
/// root move, every aspiration re-try).
pub struct Searcher<'a, P: Position, E: Evaluator<P>> {
    tt: &'a mut TTable,
    limit: &'a SearchLimit,
    evaluator: &'a E,
    age: u16,
    nodes: u64,
    seldepth: u8,
    cache_hits: u64,
    pv_capacity: usize,
    _pos: std::marker::PhantomData<P>,
}

impl<'a, P: Position, E: Evaluator<P>> Searcher<'a, P, E> {
    /// Build a searcher. `pv_capacity` bounds the length of every
    /// [`PVLine`] allocated during the search (the root driver typically
    /// passes the depth it is about to search plus a margin for
    /// quiescence).
    pub fn new(
        tt: &'a mut TTable,
        limit: &'a SearchLimit,
        evaluator: &'a E,
        age: u16,
        pv_capacity: usize,
    ) -> Searcher<'a, P, E> {
        Searcher {
            tt,
            limit,
            evaluator,
            age,
            nodes: 0,
            seldepth: 0,
            cache_hits: 0,
            pv_capacity,
            _pos: std::marker::PhantomData,
        }
    }

    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[must_use]
    pub fn seldepth(&self) -> u8 {
        self.seldepth
    }

    #[must_use]
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    /// Search `pos` to `depth` plies within `[alpha, beta]`, starting at
    /// ply `height` below the game's own root (the root driver passes 0
    /// for its own calls, and a higher height when re-entering a search
    /// that is itself partway down a line, e.g. inside quiescence).
    pub fn run(
        &mut self,
        pos: &mut P,
        depth: i8,
        height: u8,
        alpha: Score,
        beta: Score,
    ) -> SearchOutcome<P::Move> {
        let mut pv = PVLine::new(self.pv_capacity);
        match self.negamax::<true>(pos, depth, height, alpha, beta, &mut pv) {
            Ok(score) => SearchOutcome::Completed {
                score,
                pv,
                stats: SearchStats {
                    nodes: self.nodes,
                    seldepth: self.seldepth,
                    cache_hits: self.cache_hits,
                },
            },
            Err(Stopped) => SearchOutcome::Stopped,
        }
    }

    /// Negamax with principal-variation search. `PV` marks whether this
    /// node is on the principal variation: a `true` node searches its
    /// first move at full width and every subsequent move at zero width,
    /// re-searching at full width only if a zero-width move beats alpha;
    /// a `false` node (reached once a PV node's non-first move is being
    /// probed) searches everything at zero width and never re-searches,
    /// which also means it never stores an `Exact` transposition entry.
    fn negamax<const PV: bool>(
        &mut self,
        pos: &mut P,
        depth_left: i8,
        height: u8,
        mut alpha: Score,
        beta: Score,
        pv_out: &mut PVLine<P::Move>,
    ) -> NodeResult<Score> {
        if self.limit.is_over() {
            return Err(Stopped);
        }

        match pos.status() {
            GameStatus::Checkmate => {
                if PV {
                    pv_out.clear();
                }
                return Ok(-Score::mate_in(u16::from(height)));
            }
            GameStatus::Draw => {
                if PV {
                    pv_out.clear();
                }
                return Ok(Score::DRAW);
            }
            GameStatus::InProgress => {}
        }

        if depth_left <= 0 {
            return self.quiesce::<PV>(pos, height, alpha, beta, pv_out);
        }

        self.nodes += 1;
        self.limit.add_nodes(1);
        self.seldepth = self.seldepth.max(height);

        let hash = pos.hash();
        if let Some(entry) = self.tt.get(hash) {
            let score = entry.score.from_tt(i32::from(height));
            // A cached mate score is trustworthy at any depth: a forced
            // mate found at shallow depth is still a forced mate when the
            // same position is reached again with more depth remaining, so
            // this bypasses the depth-sufficiency gate below entirely.
            if score.is_mate() {
                self.cache_hits += 1;
                return Ok(score);
            }

            if i32::from(entry.depth) >= i32::from(depth_left) {
                let cutoff = match entry.kind {
                    NodeType::Exact if alpha < score && score < beta => Some(score),
                    NodeType::LowerBound if score >= beta => Some(beta),
                    NodeType::UpperBound if score <= alpha => Some(alpha),
                    _ => None,
                };
                if let Some(score) = cutoff {
                    self.cache_hits += 1;
                    return Ok(score);
                }
            }
        }

        let mut moves = pos.legal_moves();
        order_moves(pos, &mut moves, self.tt, self.age);

        let original_alpha = alpha;
        let mut best_score = -Score::INF;
        let mut raised_alpha = false;
        let mut line = PVLine::new(self.pv_capacity);

        for (i, &m) in moves.iter().enumerate() {
            let undo = pos.make_move(m);
            line.clear();

            let score = if PV && i == 0 {
                -self.negamax::<true>(pos, depth_left - 1, height + 1, -beta, -alpha, &mut line)?
            } else {
                let narrow = -self.negamax::<false>(
                    pos,
                    depth_left - 1,
                    height + 1,
                    -alpha - Score::centipawns(1),
                    -alpha,
                    &mut line,
                )?;
                if PV && narrow > alpha && narrow < beta {
                    line.clear();
                    -self.negamax::<true>(
                        pos,
                        depth_left - 1,
                        height + 1,
                        -beta,
                        -alpha,
                        &mut line,
                    )?
                } else {
                    narrow
                }
            };

            pos.unmake_move(m, undo);

            if score > best_score {
                best_score = score;
            }

            if score >= beta {
                self.tt.set(TTEntry {
                    hash,
                    score: score.to_tt(i32::from(height)),
                    depth: depth_left,
                    kind: NodeType::LowerBound,
                    age: self.age,
                });
                return Ok(beta);
            }

            if score > alpha {
                if PV {
                    pv_out.clear();
                    pv_out.add_first(m);
                    pv_out.replace_tail(&line);
                }
                alpha = score;
                raised_alpha = true;
            }
        }

        let kind = if raised_alpha {
            NodeType::Exact
        } else {
            NodeType::UpperBound
        };
        trace!("node at height {height}: depth_left={depth_left} alpha={alpha} kind={kind:?}");
        self.tt.set(TTEntry {
            hash,
            score: alpha.to_tt(i32::from(height)),
            depth: depth_left,
            kind,
            age: self.age,
        });
        debug_assert!(alpha >= original_alpha);
        Ok(alpha)
    }

    /// Quiescence search: resolve captures (and promotions) until the
    /// position is quiet, avoiding the horizon effect of evaluating a
    /// position mid-exchange. Does not consult or write the transposition
    /// table; a position reachable only through a long capture sequence is
    /// cheap enough to re-derive that caching it is not worth the
    /// table-pressure cost.
    fn quiesce<const PV: bool>(
        &mut self,
        pos: &mut P,
        height: u8,
        mut alpha: Score,
        beta: Score,
        pv_out: &mut PVLine<P::Move>,
    ) -> NodeResult<Score> {
        if self.limit.is_over() {
            return Err(Stopped);
        }

        if pos.is_in_check() {
            // A position left in check at the quiescence horizon must
            // search every evasion, not just captures, or a one-move mate
            // can be missed entirely.
            return self.negamax::<PV>(pos, 1, height, alpha, beta, pv_out);
        }

        self.nodes += 1;
        self.limit.add_nodes(1);
        self.seldepth = self.seldepth.max(height);

        let stand_pat = Score::centipawns(self.evaluator.evaluate(pos));
        if stand_pat >= beta {
            return Ok(beta);
        }
        if stand_pat > alpha {
            if PV {
                pv_out.clear();
            }
            alpha = stand_pat;
        }

        let mut captures: Vec<P::Move> = pos
            .legal_moves()
            .into_iter()
            .filter(|m| m.is_capture() || m.is_promotion())
            .collect();
        captures.sort_by_key(|m| {
            let victim = m.captured_piece().map_or(0, |p| p.value());
            let attacker = m.moving_piece().value();
            -(victim * 1_000 - attacker)
        });

        let mut line = PVLine::new(self.pv_capacity);
        for &m in &captures {
            let undo = pos.make_move(m);
            line.clear();

            let narrow = -self.quiesce::<false>(
                pos,
                height + 1,
                -alpha - Score::centipawns(1),
                -alpha,
                &mut line,
            )?;
            let score = if PV && narrow > alpha && narrow < beta {
                line.clear();
                -self.quiesce::<true>(pos, height + 1, -beta, -alpha, &mut line)?
            } else {
                narrow
            };

            pos.unmake_move(m, undo);

            if score >= beta {
                return Ok(beta);
            }
            if score > alpha {
                if PV {
                    pv_out.clear();
                    pv_out.add_first(m);
                    pv_out.replace_tail(&line);
                }
                alpha = score;
            }
        }

        Ok(alpha)
    }
}
