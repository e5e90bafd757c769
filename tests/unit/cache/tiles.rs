//! Tests for the on-disk resized tile cache

#[cfg(test)]
mod tests {
    use greedymosaic::cache::tiles::{CacheStats, ResizeCache};
    use image::RgbImage;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_image(path: &Path, width: u32, height: u32) {
        RgbImage::from_pixel(width, height, image::Rgb([40, 80, 120]))
            .save(path)
            .unwrap();
    }

    // Tests entries live under <root>/<width>/<file name>
    // Verified by swapping width and file name components
    #[test]
    fn test_entry_layout() {
        let cache = ResizeCache::new("/cache");
        assert_eq!(cache.root(), Path::new("/cache"));
        assert_eq!(
            cache.entry_path(Path::new("/photos/cat.png"), 25).unwrap(),
            Path::new("/cache/25/cat.png")
        );
        assert!(cache.entry_path(Path::new("/"), 25).is_err());
        assert_eq!(
            cache.entry_path(Path::new("/photos/cat.bmp"), 25).unwrap(),
            Path::new("/cache/25/cat.bmp.png")
        );
    }

    // Tests candidates in other formats are cached as PNG instead of failing
    // Verified by encoding the entry in the candidate's own format
    #[test]
    fn test_other_format_stored_as_png() {
        let dir = TempDir::new().unwrap();
        let candidate = dir.path().join("scan.bmp");
        write_image(&candidate, 8, 4);

        let mut cache = ResizeCache::new(dir.path().join("tiles"));
        let tile = cache.get_resized_tile(&candidate, 2).unwrap();
        assert_eq!(tile, dir.path().join("tiles/2/scan.bmp.png"));
        assert_eq!(
            image::ImageFormat::from_path(&tile).unwrap(),
            image::ImageFormat::Png
        );
        let resized = image::open(&tile).unwrap().to_rgb8();
        assert_eq!(resized.dimensions(), (4, 2));
        assert_eq!(resized.get_pixel(0, 0).0, [40, 80, 120]);
    }

    // Tests a second request for the same tile is a pure hit
    // Verified by always resizing regardless of existing entries
    #[test]
    fn test_second_request_hits() {
        let dir = TempDir::new().unwrap();
        let candidate = dir.path().join("wide.png");
        write_image(&candidate, 100, 50);

        let mut cache = ResizeCache::new(dir.path().join("tiles"));
        let first = cache.get_resized_tile(&candidate, 20).unwrap();
        assert_eq!(cache.stats, CacheStats { hits: 0, misses: 1 });
        let modified = std::fs::metadata(&first).unwrap().modified().unwrap();

        let second = cache.get_resized_tile(&candidate, 20).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.stats, CacheStats { hits: 1, misses: 1 });
        assert_eq!(
            std::fs::metadata(&second).unwrap().modified().unwrap(),
            modified
        );

        let resized = image::open(&first).unwrap();
        assert_eq!((resized.width(), resized.height()), (40, 20));
    }

    // Tests distinct widths are cached separately
    // Verified by keying entries by file name only
    #[test]
    fn test_widths_cached_separately() {
        let dir = TempDir::new().unwrap();
        let candidate = dir.path().join("tall.png");
        write_image(&candidate, 30, 60);

        let mut cache = ResizeCache::new(dir.path().join("tiles"));
        let small = cache.get_resized_tile(&candidate, 10).unwrap();
        let large = cache.get_resized_tile(&candidate, 15).unwrap();
        assert_ne!(small, large);
        assert_eq!(cache.stats.misses, 2);
        assert_eq!(image::open(&large).unwrap().width(), 15);
    }

    // Tests an undecodable candidate fails without leaving an entry
    // Verified by creating the entry before decoding
    #[test]
    fn test_undecodable_candidate() {
        let dir = TempDir::new().unwrap();
        let candidate = dir.path().join("broken.png");
        std::fs::write(&candidate, b"not an image").unwrap();

        let mut cache = ResizeCache::new(dir.path().join("tiles"));
        assert!(cache.get_resized_tile(&candidate, 10).is_err());
        assert!(!cache.entry_path(&candidate, 10).unwrap().exists());
    }
}
