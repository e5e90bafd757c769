//! Eager whole-image classification of every candidate on a worker pool

use log::info;
use rayon::prelude::*;

use crate::analysis::candidate::CandidatePool;
use crate::analysis::classifier::Classifier;
use crate::analysis::segment::Segment;
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::ProgressReporter;

/// Classify every candidate up front, then persist the cache
///
/// Each worker decodes a candidate once and samples all of its segments, so
/// the edge colors used for neighbor matching are ready before tiling. Runs
/// on `workers` threads (all cores when `None`). Returns the number of
/// candidates that produced a whole-image color; failures are logged and
/// skipped.
///
/// # Errors
///
/// Returns an error if:
/// - `workers` is `Some(0)`
/// - The worker pool cannot be built
/// - The color cache cannot be flushed
pub fn classify_eagerly(
    pool: &CandidatePool,
    classifier: &Classifier,
    workers: Option<usize>,
    progress: Option<&ProgressReporter>,
) -> Result<usize> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(workers) = workers {
        if workers == 0 {
            return Err(invalid_parameter("workers", &workers, &"must be positive"));
        }
        builder = builder.num_threads(workers);
    }
    let threads = builder
        .build()
        .map_err(|e| invalid_parameter("workers", &format!("{workers:?}"), &e))?;

    info!(
        "Classifying {} candidates on {} workers",
        pool.len(),
        threads.current_num_threads()
    );

    let bar = progress.map(|p| p.start_classification(pool.len()));
    let classified = threads.install(|| {
        pool.as_slice()
            .par_iter()
            .filter(|candidate| {
                let found = candidate.color(Segment::All, classifier).is_some();
                if let Some(bar) = &bar {
                    bar.inc(1);
                }
                found
            })
            .count()
    });
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    classifier.flush()?;
    info!("Classified {classified} of {} candidates", pool.len());
    Ok(classified)
}
