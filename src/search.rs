//! The search loop: generate, score, rank, reseed on acceptance.

use crate::generator::{CandidateGenerator, DerivationError};
use crate::ranked::RankedSet;
use std::thread::scope;
use std::time::{Duration, Instant};

/// About four seconds' worth of Curve25519 keys on one modern core.
pub const CURVE25519_BATCH: usize = 1 << 16;
/// Ed25519 candidates are cheaper (no Montgomery ladder), so batches are larger.
pub const ED25519_BATCH: usize = 1 << 17;

#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    /// Keep searching at least this long.
    pub duration: Duration,
    /// Candidates between two clock checks. Bounds how far the search may
    /// overrun `duration`.
    pub batch_size: usize,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Candidates generated and offered.
    pub runs: u64,
    /// Candidates accepted into the ranked set.
    pub accepted: u64,
    pub elapsed: Duration,
}

impl SearchStats {
    fn absorb(&mut self, other: &SearchStats) {
        self.runs += other.runs;
        self.accepted += other.accepted;
        self.elapsed = self.elapsed.max(other.elapsed);
    }
}

/// Runs batches until `options.duration` has passed and at least
/// `set.capacity()` candidates were offered, whichever comes last.
/// At least one full batch is always run.
pub fn search<G>(
    generator: &mut G,
    set: &mut RankedSet<G::Payload>,
    options: &SearchOptions,
) -> Result<SearchStats, DerivationError>
where
    G: CandidateGenerator,
{
    let start = Instant::now();
    let floor = set.capacity() as u64;
    let batch_size = options.batch_size.max(1);
    let mut stats = SearchStats::default();

    loop {
        for _ in 0..batch_size {
            stats.runs += 1;
            let (score, payload) = generator.next_candidate()?;
            if set.offer(&score, payload) {
                stats.accepted += 1;
                generator.reseed();
            }
        }

        stats.elapsed = start.elapsed();
        if !(stats.elapsed < options.duration || stats.runs < floor) {
            break;
        }
    }
    Ok(stats)
}

/// Runs `jobs` independent searches, one generator and one local ranked set
/// per thread, and merges the local sets once every thread is done.
///
/// The first derivation failure from any thread is returned.
pub fn search_parallel<G, F>(
    jobs: usize,
    new_generator: F,
    capacity: usize,
    options: &SearchOptions,
) -> Result<(RankedSet<G::Payload>, SearchStats), DerivationError>
where
    G: CandidateGenerator,
    F: Fn() -> G + Sync,
{
    let jobs = jobs.max(1);
    let new_generator = &new_generator;
    let results = scope(|s| {
        let handles = (0..jobs)
            .map(|_| {
                s.spawn(move || {
                    let mut generator = new_generator();
                    let mut set = RankedSet::new(capacity);
                    search(&mut generator, &mut set, options).map(|stats| (set, stats))
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect::<Vec<_>>()
    });

    let mut merged = RankedSet::new(capacity);
    let mut total = SearchStats::default();
    for result in results {
        let (set, stats) = result?;
        merged.merge(&set);
        total.absorb(&stats);
    }
    Ok((merged, total))
}
