//! Tests for command-line parsing and the run entry point

#[cfg(test)]
mod tests {
    use clap::Parser;
    use greedymosaic::io::cli::{Cli, MosaicRunner};
    use greedymosaic::io::configuration::{
        COLOR_CACHE_FILE, DEFAULT_NEAREST_THRESHOLD, DEFAULT_RESIZED_WIDTH, DEFAULT_TILE_WIDTH,
        TILE_CACHE_DIR,
    };
    use greedymosaic::io::output::OutputKind;
    use image::RgbImage;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // Tests parsing with only the required arguments
    // Verified by changing default values
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "source.jpg", "photos"]);

        assert_eq!(cli.source, PathBuf::from("source.jpg"));
        assert_eq!(cli.candidates, vec![PathBuf::from("photos")]);
        assert_eq!(cli.width, DEFAULT_RESIZED_WIDTH);
        assert_eq!(cli.tile_width, DEFAULT_TILE_WIDTH);
        assert_eq!(cli.threshold, DEFAULT_NEAREST_THRESHOLD);
        assert_eq!(cli.color_cache, PathBuf::from(COLOR_CACHE_FILE));
        assert_eq!(cli.tile_cache, PathBuf::from(TILE_CACHE_DIR));
        assert!(!cli.eager);
        assert!(cli.should_show_progress());
    }

    // Tests a source without candidates is rejected
    // Verified by making candidates optional
    #[test]
    fn test_cli_requires_candidates() {
        assert!(Cli::try_parse_from(["program", "source.jpg"]).is_err());
    }

    // Tests every option reaches the mosaic configuration
    // Verified by ignoring the --no-neighbors flag
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "source.jpg",
            "a.jpg",
            "dir",
            "-o",
            "out",
            "-r",
            "2",
            "-c",
            "3",
            "-w",
            "60",
            "--tile-width",
            "10",
            "--tile-height",
            "12",
            "-t",
            "30",
            "-e",
            "--no-neighbors",
            "--workers",
            "4",
            "--html",
            "-q",
        ]);
        let config = cli.mosaic_config();

        assert_eq!(cli.candidates.len(), 2);
        assert_eq!(config.out_dir, Some(PathBuf::from("out")));
        assert_eq!((config.rows, config.cols), (2, 3));
        assert_eq!(config.resized_width, 60);
        assert_eq!((config.tile_width, config.tile_height), (10, 12));
        assert_eq!(config.threshold, 30);
        assert!(config.eager);
        assert!(!config.neighbor_matching);
        assert_eq!(config.workers, Some(4));
        assert_eq!(config.output, OutputKind::Html);
        assert!(!cli.should_show_progress());
    }

    // Tests sample percentages are validated
    // Verified by accepting percentages above one
    #[test]
    fn test_sample_config() {
        let cli = Cli::parse_from(["program", "s.jpg", "c", "--sample-width", "0.5"]);
        let config = cli.sample_config().unwrap();
        assert!((config.width_percentage() - 0.5).abs() < f32::EPSILON);

        let bad = Cli::parse_from(["program", "s.jpg", "c", "--sample-height", "1.5"]);
        assert!(bad.sample_config().is_err());
    }

    // Tests a full run writes the mosaic into the output directory
    // Verified by skipping the composer
    #[test]
    fn test_runner_end_to_end() {
        let dir = TempDir::new().unwrap();
        let photos = dir.path().join("photos");
        std::fs::create_dir_all(&photos).unwrap();
        RgbImage::from_pixel(6, 6, image::Rgb([0, 0, 0]))
            .save(photos.join("black.png"))
            .unwrap();
        let source = dir.path().join("source.png");
        RgbImage::from_pixel(3, 3, image::Rgb([5, 5, 5]))
            .save(&source)
            .unwrap();

        let arg = |p: PathBuf| p.to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "program".to_string(),
            arg(source),
            arg(photos),
            "-o".to_string(),
            arg(dir.path().join("out")),
            "-w".to_string(),
            "3".to_string(),
            "--tile-width".to_string(),
            "4".to_string(),
            "--tile-height".to_string(),
            "4".to_string(),
            "--color-cache".to_string(),
            arg(dir.path().join("colors.txt")),
            "--tile-cache".to_string(),
            arg(dir.path().join("tiles")),
            "-q".to_string(),
        ]);

        let written = MosaicRunner::new(cli).run().unwrap();
        assert_eq!(written, vec![dir.path().join("out/source-3w4xh4-out.png")]);
        let mosaic = image::open(&written[0]).unwrap();
        assert_eq!((mosaic.width(), mosaic.height()), (12, 12));
    }

    // Tests invalid configuration stops the run before any work
    // Verified by validating after discovery
    #[test]
    fn test_runner_rejects_zero_rows() {
        let cli = Cli::parse_from(["program", "missing.jpg", "missing-dir", "-r", "0", "-q"]);
        assert!(MosaicRunner::new(cli).run().is_err());
    }
}
