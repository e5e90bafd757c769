//! Tests for opening the per-run caches

#[cfg(test)]
mod tests {
    use greedymosaic::MosaicError;
    use greedymosaic::algorithm::context::RunContext;
    use greedymosaic::analysis::sampling::SampleConfig;
    use greedymosaic::analysis::segment::Segment;
    use greedymosaic::cache::colors::ColorKey;
    use greedymosaic::math::color::Rgb;
    use tempfile::TempDir;

    // Tests an existing color cache is loaded and the tile cache rooted
    // Verified by ignoring the cache file argument
    #[test]
    fn test_open_loads_cache() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("colors.txt");
        std::fs::write(&file, "/a.jpg:-65536\n").unwrap();

        let context =
            RunContext::open(&file, &dir.path().join("tiles"), SampleConfig::default(), false)
                .unwrap();
        assert_eq!(
            context
                .classifier
                .cache()
                .get(&ColorKey::new("/a.jpg", Segment::All)),
            Some(Rgb::new(255, 0, 0))
        );
        assert_eq!(context.tiles.root(), dir.path().join("tiles"));
        assert!(context.progress.is_none());
    }

    // Tests progress display follows the flag
    // Verified by always creating a reporter
    #[test]
    fn test_open_with_progress() {
        let dir = TempDir::new().unwrap();
        let context = RunContext::open(
            &dir.path().join("colors.txt"),
            &dir.path().join("tiles"),
            SampleConfig::default(),
            true,
        )
        .unwrap();
        assert!(context.progress.is_some());
        assert!(context.classifier.cache().is_empty());
    }

    // Tests a malformed cache aborts before any work
    // Verified by starting from an empty cache on parse errors
    #[test]
    fn test_open_malformed_cache() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("colors.txt");
        std::fs::write(&file, "garbage\n").unwrap();
        assert!(matches!(
            RunContext::open(&file, dir.path(), SampleConfig::default(), false),
            Err(MosaicError::MalformedCacheLine { .. })
        ));
    }
}
