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

//! Centipawn scores, always from the perspective of the side to move.
//!
//! A `Score` is either a normal evaluation or a mate distance. Mate
//! distances are encoded as `CHECKMATE` minus the number of plies to the
//! mating move, so that shorter mates are more extreme (and thus preferred
//! by a maximizing search) than longer ones.

use std::fmt::{self, Display, Formatter};
use std::ops::Neg;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A signed evaluation in centipawns, from the perspective of the side to
/// move. Positive favors the side to move; negative favors the opponent.
pub struct Score(i32);

impl Score {
    /// The score of a position where the side to move has just been mated.
    /// Any "normal" static evaluation must have a smaller magnitude than
    /// this.
    pub const CHECKMATE: Score = Score(30_000);

    /// A bound wider than any achievable score, including mate scores. Used
    /// to seed alpha/beta windows.
    pub const INF: Score = Score(Self::CHECKMATE.0 + 1);

    /// The score of a drawn position.
    pub const DRAW: Score = Score(0);

    /// The magnitude above which a score is considered a mate distance
    /// rather than a normal evaluation.
    const MATE_CUTOFF: i32 = Self::CHECKMATE.0 - 1_000;

    #[inline]
    #[must_use]
    /// Construct a score from a raw centipawn value. `cp` must not exceed
    /// `MATE_CUTOFF` in magnitude; use [`Score::mate_in`] for mate scores.
    pub const fn centipawns(cp: i32) -> Score {
        Score(cp)
    }

    #[inline]
    #[must_use]
    /// The score for delivering mate in `plies` half-moves from here, from
    /// the perspective of the side giving mate.
    pub const fn mate_in(plies: u16) -> Score {
        Score(Self::CHECKMATE.0 - plies as i32)
    }

    #[inline]
    #[must_use]
    /// Whether this score represents a forced mate (for either side).
    pub const fn is_mate(self) -> bool {
        self.0 > Self::MATE_CUTOFF || self.0 < -Self::MATE_CUTOFF
    }

    #[inline]
    #[must_use]
    /// The number of plies to mate, if this is a mate score. Positive means
    /// the side to move delivers mate; the sign is carried separately by
    /// the caller via [`Score::is_mate`] combined with the score's sign.
    pub const fn plies_to_mate(self) -> Option<i32> {
        if !self.is_mate() {
            return None;
        }
        Some(if self.0 > 0 {
            Self::CHECKMATE.0 - self.0
        } else {
            Self::CHECKMATE.0 + self.0
        })
    }

    #[inline]
    #[must_use]
    /// Convert a score computed at `height` plies below the search root
    /// into the height-independent form stored in the transposition table.
    ///
    /// Mate scores are path-dependent: the same position can be reached at
    /// different heights, and a mate distance is only meaningful relative
    /// to the node it was computed at. Storing the raw value would let a
    /// shallow mate discovered on one path be misread as available on a
    /// shorter path through a transposition. This shifts mate scores so
    /// the table holds "plies to mate from this node" rather than "from
    /// the root of whichever search wrote the entry".
    pub const fn to_tt(self, height: i32) -> Score {
        if self.0 > Self::MATE_CUTOFF {
            Score(self.0 + height)
        } else if self.0 < -Self::MATE_CUTOFF {
            Score(self.0 - height)
        } else {
            self
        }
    }

    #[inline]
    #[must_use]
    /// The inverse of [`Score::to_tt`]: reinterpret a table entry's score
    /// as if it had been computed at `height` plies below the current
    /// search root.
    pub const fn from_tt(self, height: i32) -> Score {
        if self.0 > Self::MATE_CUTOFF {
            Score(self.0 - height)
        } else if self.0 < -Self::MATE_CUTOFF {
            Score(self.0 + height)
        } else {
            self
        }
    }

    #[inline]
    #[must_use]
    /// Clamp this score into `[lo, hi]`, as required by fail-hard search.
    pub fn clamp(self, lo: Score, hi: Score) -> Score {
        Score(self.0.clamp(lo.0, hi.0))
    }

    #[inline]
    #[must_use]
    /// This score as a raw centipawn integer, suitable for UCI `score cp`.
    pub const fn centipawn_value(self) -> i32 {
        self.0
    }
}

impl Neg for Score {
    type Output = Score;
    #[inline]
    fn neg(self) -> Score {
        Score(-self.0)
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.plies_to_mate() {
            Some(plies) if self.0 > 0 => write!(f, "+M{}", (plies + 1) / 2),
            Some(plies) => write!(f, "-M{}", (plies + 1) / 2),
            None => write!(f, "{:+}", self.0),
        }
    }
}
