//! Tests for error display formatting and source chaining

#[cfg(test)]
mod tests {
    use greedymosaic::MosaicError;
    use greedymosaic::analysis::sampling::ColorBox;
    use greedymosaic::io::error::{file_system, invalid_parameter};
    use std::error::Error;
    use std::io;
    use std::path::{Path, PathBuf};

    // Tests display messages name the offending input
    // Verified by omitting the path from MissingSource
    #[test]
    fn test_display_messages() {
        let missing = MosaicError::MissingSource {
            path: PathBuf::from("/in/source.jpg"),
        };
        assert!(missing.to_string().contains("/in/source.jpg"));

        let malformed = MosaicError::MalformedCacheLine {
            path: PathBuf::from("cache.txt"),
            line_number: 7,
            line: "oops".to_string(),
        };
        assert_eq!(
            malformed.to_string(),
            "Malformed color cache record at cache.txt:7: 'oops'"
        );

        let empty = MosaicError::EmptySampleRegion {
            color_box: ColorBox::new(0, 0, 1, 2),
        };
        assert_eq!(
            empty.to_string(),
            "Sampling region rows 0..0, cols 1..2 contains no pixels"
        );

        let unmatched = MosaicError::NoMatchingCandidate { x: 3, y: 4 };
        assert!(unmatched.to_string().contains("(3, 4)"));
        let outside = MosaicError::PixelOutOfBounds {
            x: 5,
            y: 0,
            width: 4,
            height: 2,
        };
        assert_eq!(
            outside.to_string(),
            "Source pixel (5, 0) is outside the 4x2 resized source"
        );
        assert!(!MosaicError::EmptyCandidatePool.to_string().is_empty());
    }

    // Tests invalid parameter errors carry name, value and reason
    // Verified by swapping value and reason
    #[test]
    fn test_invalid_parameter() {
        let err = invalid_parameter("rows", &0, &"must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'rows' = '0': must be positive"
        );
        assert!(err.source().is_none());
    }

    // Tests I/O failures keep their source and context
    // Verified by dropping the source in Error::source
    #[test]
    fn test_file_system_source() {
        let err = file_system(Path::new("/x"), "read")(io::Error::other("disk"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("read"));

        let converted: MosaicError = io::Error::other("bare").into();
        assert!(matches!(converted, MosaicError::FileSystem { .. }));
    }
}
