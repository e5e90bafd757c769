//! Adaptive nearest-color candidate selection
//!
//! A cell is matched in up to three stages:
//! 1. When every neighbor color is known, each neighbor yields the set of
//!    candidates whose facing segment is near that neighbor's color, and the
//!    four sets are intersected.
//! 2. If the intersection is empty (or a neighbor is missing), the candidates
//!    near the cell's own color over the whole image are used instead, narrowed
//!    to at most [`MAX_NARROWED_CANDIDATES`].
//! 3. Among the chosen set, a never-used candidate wins, otherwise the one
//!    used longest ago.
//!
//! The usage table is shared by every cell of a run, so results depend on
//! the order cells are visited in.

use std::collections::HashMap;

use log::debug;

use crate::algorithm::bitset::CandidateSet;
use crate::analysis::candidate::CandidatePool;
use crate::analysis::classifier::Classifier;
use crate::analysis::segment::Segment;
use crate::io::configuration::{MAX_COLOR_DISTANCE, MAX_NARROWED_CANDIDATES};
use crate::math::color::Rgb;
use crate::spatial::NeighborColors;

/// Next threshold after an empty scan; always strictly larger
pub const fn grow_threshold(threshold: u32) -> u32 {
    let step = threshold / 2;
    threshold.saturating_add(if step == 0 { 1 } else { step })
}

/// Distance from `target` to every candidate with a known `segment` color, in pool order
pub fn candidate_distances(
    pool: &CandidatePool,
    classifier: &Classifier,
    target: Rgb,
    segment: Segment,
) -> Vec<(usize, u32)> {
    pool.iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            candidate
                .color(segment, classifier)
                .map(|color| (index, target.distance(color)))
        })
        .collect()
}

/// Candidates whose `segment` color lies within a backed-off threshold of `target`
///
/// The threshold starts at `threshold` and grows until some candidate lies
/// strictly inside it. With `narrow` set, a result larger than
/// [`MAX_NARROWED_CANDIDATES`] is re-filtered with repeatedly halved
/// thresholds (inclusive). A result that ends up empty is replaced by the
/// single nearest candidate. The set is empty only when no candidate has a
/// known `segment` color.
pub fn nearest_set(
    pool: &CandidatePool,
    classifier: &Classifier,
    target: Rgb,
    segment: Segment,
    threshold: u32,
    narrow: bool,
) -> CandidateSet {
    let distances = candidate_distances(pool, classifier, target, segment);

    // First strict minimum in pool order
    let nearest = distances
        .iter()
        .fold(None::<(usize, u32)>, |best, &(index, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((index, distance)),
        })
        .map(|(index, _)| index);

    let Some(nearest) = nearest else {
        return CandidateSet::new(pool.len());
    };

    let mut threshold = threshold.max(1);
    let mut chosen: Vec<(usize, u32)> = Vec::new();
    loop {
        chosen.extend(distances.iter().filter(|&&(_, d)| d < threshold));
        if !chosen.is_empty() || threshold > MAX_COLOR_DISTANCE {
            break;
        }
        threshold = grow_threshold(threshold);
    }

    if narrow {
        let mut narrowed = threshold;
        while chosen.len() > MAX_NARROWED_CANDIDATES && narrowed > 0 {
            narrowed /= 2;
            chosen.retain(|&(_, d)| d <= narrowed);
            debug!(
                "Reducing threshold to {narrowed}, {} candidates remain",
                chosen.len()
            );
        }
    }

    if chosen.is_empty() {
        return CandidateSet::from_indices(pool.len(), [nearest]);
    }

    CandidateSet::from_indices(pool.len(), chosen.into_iter().map(|(index, _)| index))
}

/// Run-wide record of when each candidate was last placed
#[derive(Debug, Default, Clone)]
pub struct UsageTable {
    last_used: HashMap<usize, u64>,
    sequence: u64,
}

impl UsageTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence number at which `index` was last chosen
    pub fn last_used(&self, index: usize) -> Option<u64> {
        self.last_used.get(&index).copied()
    }

    /// Number of selections recorded so far
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Pick from `set` and record the pick
    ///
    /// The first never-used member wins; otherwise the member with the
    /// smallest sequence number. Returns `None` for an empty set.
    pub fn choose_least_used(&mut self, set: &CandidateSet) -> Option<usize> {
        let mut least_used: Option<(usize, u64)> = None;
        for index in set.iter() {
            match self.last_used(index) {
                None => {
                    self.record(index);
                    return Some(index);
                }
                Some(used) => {
                    if least_used.is_none_or(|(_, least)| used < least) {
                        least_used = Some((index, used));
                    }
                }
            }
        }

        let (index, _) = least_used?;
        self.record(index);
        Some(index)
    }

    fn record(&mut self, index: usize) {
        self.last_used.insert(index, self.sequence);
        self.sequence += 1;
    }
}

/// Per-run candidate selector holding the threshold seed and usage history
#[derive(Debug, Clone)]
pub struct CandidateSelector {
    threshold: u32,
    neighbor_matching: bool,
    usage: UsageTable,
}

impl CandidateSelector {
    /// Create a selector with a nearest-match threshold seed
    pub fn new(threshold: u32, neighbor_matching: bool) -> Self {
        Self {
            threshold,
            neighbor_matching,
            usage: UsageTable::new(),
        }
    }

    /// Usage history so far
    pub const fn usage(&self) -> &UsageTable {
        &self.usage
    }

    /// Choose the candidate for a cell with query color `target`
    ///
    /// Returns `None` only when no candidate has a known color.
    pub fn select(
        &mut self,
        pool: &CandidatePool,
        classifier: &Classifier,
        target: Rgb,
        neighbors: &NeighborColors,
    ) -> Option<usize> {
        if self.neighbor_matching {
            if let Some(agreed) = self.neighbor_intersection(pool, classifier, neighbors) {
                return self.usage.choose_least_used(&agreed);
            }
        }

        let chosen = nearest_set(pool, classifier, target, Segment::All, self.threshold, true);
        self.usage.choose_least_used(&chosen)
    }

    /// Candidates consistent with all four neighbors, if there are any
    fn neighbor_intersection(
        &self,
        pool: &CandidatePool,
        classifier: &Classifier,
        neighbors: &NeighborColors,
    ) -> Option<CandidateSet> {
        let mut agreed = CandidateSet::all(pool.len());
        for (direction, color) in neighbors.complete()? {
            let facing = direction.segment().opposite();
            let near = nearest_set(pool, classifier, color, facing, self.threshold, false);
            agreed.intersect_with(&near);
            if agreed.is_empty() {
                return None;
            }
        }
        Some(agreed)
    }
}
