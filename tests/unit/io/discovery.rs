//! Tests for candidate discovery from files and directories

#[cfg(test)]
mod tests {
    use greedymosaic::MosaicError;
    use greedymosaic::io::discovery::{find_candidates, is_image};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    // Tests image extensions are matched case-insensitively
    // Verified by comparing extensions exactly
    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("a.jpg")));
        assert!(is_image(Path::new("a.JPEG")));
        assert!(is_image(Path::new("dir/a.Png")));
        assert!(!is_image(Path::new("a.gif")));
        assert!(!is_image(Path::new("jpg")));
        assert!(!is_image(Path::new("notes.txt")));
    }

    // Tests directories are walked recursively in name order after explicit files
    // Verified by disabling recursion
    #[test]
    fn test_find_candidates() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("photos");
        touch(&root.join("b.jpg"));
        touch(&root.join("a.png"));
        touch(&root.join("notes.txt"));
        touch(&root.join("sub/c.JPG"));
        let explicit = dir.path().join("z.gif");
        touch(&explicit);

        let found = find_candidates(&[root.clone(), explicit.clone()]).unwrap();
        assert_eq!(
            found,
            vec![
                explicit,
                root.join("a.png"),
                root.join("b.jpg"),
                root.join("sub/c.JPG"),
            ]
        );
    }

    // Tests missing inputs are skipped and an empty result is an error
    // Verified by returning an empty list
    #[test]
    fn test_no_candidates() {
        let dir = TempDir::new().unwrap();
        let missing = PathBuf::from("/definitely/not/here");
        assert!(matches!(
            find_candidates(&[missing, dir.path().to_path_buf()]),
            Err(MosaicError::EmptyCandidatePool)
        ));
    }
}
