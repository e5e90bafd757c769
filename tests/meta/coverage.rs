//! Checks that `tests/unit` mirrors `src` file for file and that every test file tests something

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;
    use walkdir::WalkDir;

    /// Files that only declare modules or start a binary
    fn is_structural(relative: &str) -> bool {
        let file_name = relative.rsplit('/').next().unwrap_or(relative);
        matches!(file_name, "main.rs" | "lib.rs" | "mod.rs")
    }

    /// Relative `.rs` paths and directories below `root`, with `/` separators
    fn relative_entries(root: &Path) -> BTreeSet<String> {
        WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| {
                entry.file_type().is_dir()
                    || entry.path().extension().and_then(|e| e.to_str()) == Some("rs")
            })
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(root)
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect()
    }

    // Tests every source file has a unit test file at the same relative path
    // Verified by adding an untested module under src/
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = relative_entries(Path::new("src"));
        let unit = relative_entries(Path::new("tests/unit"));
        assert!(!src.is_empty(), "src directory should not be empty");

        let missing: Vec<_> = src
            .iter()
            .filter(|path| !is_structural(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit tests:\n{}",
            missing.join("\n")
        );
    }

    // Tests every unit test file still has a source counterpart
    // Verified by renaming a source file without moving its tests
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = relative_entries(Path::new("src"));
        let unit = relative_entries(Path::new("tests/unit"));

        let orphaned: Vec<_> = unit
            .iter()
            .filter(|path| !is_structural(path) && !src.contains(*path))
            .map(|path| format!("  - tests/unit/{path} (no src/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without source files:\n{}",
            orphaned.join("\n")
        );
    }

    // Tests no test file is an empty shell
    // Verified by deleting every test from one unit file
    #[test]
    fn test_all_test_files_contain_tests() {
        let empty: Vec<_> = WalkDir::new("tests")
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("rs"))
            .filter(|entry| {
                let name = entry.file_name().to_string_lossy();
                !is_structural(&name)
            })
            .filter(|entry| {
                fs::read_to_string(entry.path())
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|entry| format!("  - {}", entry.path().display()))
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            empty.join("\n")
        );
    }
}
