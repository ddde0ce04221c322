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

//! The outer search driver: iterative deepening over the root position.
//!
//! [`crate::search::Searcher`] only knows how to evaluate one position to
//! one depth within one window. Everything about *which* depths to try,
//! *when* to give up, and *what* to tell the caller about progress lives
//! here instead, one level up the stack from the recursive search itself.

use std::fmt::Display;
use std::time::Duration;

use log::{debug, info as log_info};

use crate::limit::SearchLimit;
use crate::observer::{SearchInfo, SearchObserver};
use crate::ordering::sort_root_moves_by_prior_eval;
use crate::position::{Evaluator, Position};
use crate::score::Score;
use crate::search::{SearchOutcome, Searcher};
use crate::transposition::TTable;

/// How many completed iterations a convergence heuristic requires before
/// it may cut a search short: at depth 5 or beyond, if the best move has
/// not changed in more than this many consecutive iterations, stop early.
const CONVERGENCE_DEPTH_FLOOR: u8 = 5;
const CONVERGENCE_STREAK: u32 = 3;

/// The half-width of the first aspiration window tried at depths 4 and
/// beyond, in centipawns. Widened by a further `ASPIRATION_WINDOW_CP` on
/// each failed retry.
const ASPIRATION_WINDOW_CP: i32 = 50;
const ASPIRATION_RETRIES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What the whole iterative-deepening process produced.
pub struct BestLine<M> {
    pub best_move: Option<M>,
    pub score: Score,
    pub depth: u8,
}

/// Search `pos` at increasing depth, up to `max_depth` or until `limit`
/// expires, reporting progress through `observer`. `age` is the table
/// generation this call should write with (see [`TTable::set`]); the
/// caller is responsible for bumping it once per game ply.
#[allow(clippy::too_many_arguments)]
pub fn iterative_deepen<P, E, O>(
    pos: &mut P,
    tt: &mut TTable,
    evaluator: &E,
    limit: &SearchLimit,
    age: u16,
    max_depth: u8,
    observer: &mut O,
) -> BestLine<P::Move>
where
    P: Position,
    P::Move: Display,
    E: Evaluator<P>,
    O: SearchObserver,
{
    limit.start();
    let mut moves = pos.legal_moves();
    if moves.is_empty() {
        return BestLine {
            best_move: None,
            score: Score::DRAW,
            depth: 0,
        };
    }

    let mut evals = vec![Score::DRAW; moves.len()];
    let mut overall_best_move = moves[0];
    let mut overall_best_score = -Score::INF;
    let mut same_best_streak: u32 = 0;
    let mut total_nodes = 0u64;
    let mut completed_depth = 0u8;

    'depths: for depth in 1..=max_depth {
        if limit.depth_exceeds_cap(depth) {
            debug!("depth {depth} exceeds the configured depth cap, stopping");
            break;
        }

        sort_root_moves_by_prior_eval(&mut moves, &mut evals);

        let mut iter_best_score = -Score::INF;
        let mut iter_best_move = moves[0];
        let mut found_mate = false;

        for (k, &m) in moves.iter().enumerate() {
            if limit.is_over() {
                if k == 0 {
                    break 'depths;
                }
                break;
            }

            let prev_eval = if depth >= 4 && evals[k] > -Score::INF {
                Some(evals[k])
            } else {
                None
            };

            let undo = pos.make_move(m);
            let pv_capacity = usize::from(depth) + 32;
            let outcome;
            let seldepth;
            {
                let mut searcher = Searcher::new(tt, limit, evaluator, age, pv_capacity);
                outcome = search_one_root_move(&mut searcher, pos, depth, prev_eval);
                seldepth = searcher.seldepth();
            }
            pos.unmake_move(m, undo);

            let (score, pv_string, nodes) = match outcome {
                SearchOutcome::Completed { score, pv, stats } => {
                    (-score, pv.to_string(), stats.nodes)
                }
                SearchOutcome::Stopped => {
                    evals[k] = -Score::INF;
                    if k == 0 {
                        break 'depths;
                    }
                    break;
                }
            };

            total_nodes += nodes;
            evals[k] = score;

            if score > iter_best_score {
                iter_best_score = score;
                iter_best_move = m;

                let elapsed = limit.elapsed();
                let nps = nps_from(total_nodes, elapsed);
                observer.on_info(&SearchInfo {
                    depth,
                    seldepth,
                    score,
                    nodes: total_nodes,
                    nps,
                    hashfull: tt.consumed_permille(),
                    time: elapsed,
                    pv: format!("{m} {pv_string}").trim().to_string(),
                });
            }

            if score.is_mate() && score > Score::DRAW {
                found_mate = true;
                break;
            }
        }

        if iter_best_score > -Score::INF {
            same_best_streak = if iter_best_move == overall_best_move {
                same_best_streak + 1
            } else {
                0
            };
            overall_best_move = iter_best_move;
            overall_best_score = iter_best_score;
            completed_depth = depth;
        }

        if found_mate {
            debug!("forced mate found at depth {depth}, stopping early");
            break;
        }

        if depth >= CONVERGENCE_DEPTH_FLOOR && same_best_streak > CONVERGENCE_STREAK {
            log_info!("best move converged after {same_best_streak} iterations, stopping at depth {depth}");
            break;
        }
    }

    BestLine {
        best_move: Some(overall_best_move),
        score: overall_best_score,
        depth: completed_depth,
    }
}

fn nps_from(nodes: u64, elapsed: Duration) -> u64 {
    let seconds = elapsed.as_secs_f64();
    if seconds <= 0.0 {
        0
    } else {
        (nodes as f64 / seconds) as u64
    }
}

/// Score one root move, already made on `pos`, using an aspiration window
/// around its previous iteration's evaluation when one is available and
/// the position isn't a mate score (windowing around a mate distance
/// saves little and complicates the retry logic for no real benefit).
fn search_one_root_move<P, E>(
    searcher: &mut Searcher<'_, P, E>,
    pos: &mut P,
    depth: u8,
    prev_eval: Option<Score>,
) -> SearchOutcome<P::Move>
where
    P: Position,
    E: Evaluator<P>,
{
    let depth_left = i8::try_from(depth).unwrap_or(i8::MAX) - 1;

    let center = match prev_eval {
        Some(score) if !score.is_mate() => score,
        _ => return searcher.run(pos, depth_left, 1, -Score::INF, Score::INF),
    };

    let mut half_width = ASPIRATION_WINDOW_CP;
    for _ in 0..ASPIRATION_RETRIES {
        let alpha = Score::centipawns(center.centipawn_value() - half_width);
        let beta = Score::centipawns(center.centipawn_value() + half_width);
        match searcher.run(pos, depth_left, 1, alpha, beta) {
            SearchOutcome::Stopped => return SearchOutcome::Stopped,
            completed @ SearchOutcome::Completed { score, .. } => {
                if score <= alpha || score >= beta {
                    half_width *= 2;
                    continue;
                }
                return completed;
            }
        }
    }

    searcher.run(pos, depth_left, 1, -Score::INF, Score::INF)
}
