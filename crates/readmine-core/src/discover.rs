//! Input discovery: list the candidate files in a directory.

use std::path::{Path, PathBuf};

use regex::Regex;

use crate::CoreError;

/// Translate a file-name glob (`*` and `?` wildcards) into an anchored regex.
fn glob_regex(pattern: &str) -> Result<Regex, CoreError> {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            c => re.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    re.push('$');
    Regex::new(&re).map_err(|e| CoreError::InvalidGlob(e.to_string()))
}

/// List the files directly under `dir` whose names match `pattern`,
/// sorted by name so discovery order is stable across platforms.
///
/// Subdirectories are not descended into; entries whose names are not
/// valid UTF-8 are skipped.
pub fn discover_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, CoreError> {
    let re = glob_regex(pattern)?;
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if re.is_match(name) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn finds_matching_files_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "b_README.pdf");
        touch(tmp.path(), "a_README.pdf");
        touch(tmp.path(), "notes.txt");

        let files = discover_files(tmp.path(), "*.pdf").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a_README.pdf", "b_README.pdf"]);
    }

    #[test]
    fn glob_star_and_question_mark() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "doc1.pdf");
        touch(tmp.path(), "doc22.pdf");

        let files = discover_files(tmp.path(), "doc?.pdf").unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("doc1.pdf"));
    }

    #[test]
    fn literal_dots_are_not_wildcards() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "readme.pdf");
        touch(tmp.path(), "readmeXpdf");

        let files = discover_files(tmp.path(), "*.pdf").unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("readme.pdf"));
    }

    #[test]
    fn skips_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("nested.pdf")).unwrap();
        touch(tmp.path(), "real.pdf");

        let files = discover_files(tmp.path(), "*.pdf").unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("real.pdf"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let gone = tmp.path().join("nope");
        assert!(discover_files(&gone, "*.pdf").is_err());
    }
}
