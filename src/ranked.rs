//! Bounded top-K retention of the best candidates seen so far.
//!
//! Scores and payloads live in two index-aligned vectors of length exactly
//! `capacity`, sorted ascending by score: index 0 is the worst entry kept,
//! index `capacity - 1` the best. A fresh set is filled with all-zero scores,
//! which is the smallest possible value, so the first `capacity` offers with
//! a non-zero score always get in.

use crate::Score;
use zeroize::Zeroize;

pub struct RankedSet<P: Zeroize> {
    scores: Vec<Score>,
    payloads: Vec<P>,
}

impl<P> RankedSet<P>
where
    P: Clone + Default + Zeroize,
{
    /// # Panics
    ///
    /// If `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "ranked set capacity must be at least 1");
        Self {
            scores: vec![[0_u8; 64]; capacity],
            payloads: vec![P::default(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.scores.len()
    }

    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    pub fn payloads(&self) -> &[P] {
        &self.payloads
    }

    pub fn min_score(&self) -> &Score {
        &self.scores[0]
    }

    /// Number of held entries whose score is strictly below `score`, counted
    /// from the bottom and stopping at the first entry that is not.
    fn rank_of(&self, score: &Score) -> usize {
        self.scores.iter().take_while(|&held| held < score).count()
    }

    /// Offers one candidate. Returns `true` if it was kept.
    ///
    /// A candidate is kept iff its score is strictly greater than the current
    /// minimum. The minimum is then evicted, everything below the insertion
    /// point moves down one slot, and the candidate lands directly beneath the
    /// first held entry whose score is `>=` its own (so below any ties).
    pub fn offer(&mut self, score: &Score, payload: &P) -> bool {
        let rank = self.rank_of(score);
        if rank == 0 {
            return false;
        }
        let at = rank - 1;

        // the evicted payload is wiped before its slot is reused
        self.payloads[0].zeroize();
        self.scores[..=at].rotate_left(1);
        self.payloads[..=at].rotate_left(1);
        self.scores[at] = *score;
        self.payloads[at].clone_from(payload);
        true
    }

    /// Offers every entry of `other`, best first. Used to fold per-thread
    /// sets into one.
    pub fn merge(&mut self, other: &RankedSet<P>) {
        for (score, payload) in other.iter_best() {
            if !self.offer(score, payload) {
                // `other` is sorted, nothing further down can get in either
                break;
            }
        }
    }

    /// Entries from best to worst.
    pub fn iter_best(&self) -> impl Iterator<Item = (&Score, &P)> {
        self.scores.iter().zip(self.payloads.iter()).rev()
    }
}

impl<P: Zeroize> Drop for RankedSet<P> {
    fn drop(&mut self) {
        self.payloads.iter_mut().for_each(Zeroize::zeroize);
        self.scores.iter_mut().for_each(Zeroize::zeroize);
    }
}
