//! Tests for progress bar creation across composition phases

#[cfg(test)]
mod tests {
    use greedymosaic::io::progress::ProgressReporter;
    use std::path::Path;

    // Tests classification bars are sized to the pool
    // Verified by sizing bars to zero
    #[test]
    fn test_classification_bar() {
        let reporter = ProgressReporter::hidden();
        let bar = reporter.start_classification(12);
        assert_eq!(bar.length(), Some(12));
        bar.inc(5);
        assert_eq!(bar.position(), 5);
        reporter.finish();
    }

    // Tests block bars carry the output file name
    // Verified by using the full path as prefix
    #[test]
    fn test_block_bar() {
        let reporter = ProgressReporter::default();
        let bar = reporter.start_block(Path::new("/out/dir/cat-200w25xh25-out.png"), 40);
        assert_eq!(bar.length(), Some(40));
        assert_eq!(bar.prefix(), "cat-200w25xh25-out.png");
        bar.finish_and_clear();
        reporter.finish();
    }
}
