use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::Result;

/// Reason why a document was skipped during a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// File name matches neither kind keyword (auto mode only).
    Unclassified,
    /// File content is not valid UTF-8.
    NonUtf8,
    /// IO error while reading the file.
    IoError,
}

/// A document found in the input directory.
#[derive(Debug, Clone)]
pub struct DiscoveredDoc {
    pub path: PathBuf,
    /// Source file name; also names the output artifact.
    pub name: String,
}

/// List the documents directly inside `dir`, sorted by file name so that row
/// order is deterministic across platforms. Subdirectories are not descended
/// into and hidden files are skipped.
pub fn scan_documents(dir: &Path) -> Result<Vec<DiscoveredDoc>> {
    let docs = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .hidden(true)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| {
            let path = entry.into_path();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            DiscoveredDoc { path, name }
        })
        .collect();

    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_lists_files_sorted_by_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b-postmortem.txt"), "x").unwrap();
        fs::write(tmp.path().join("a-charter.txt"), "x").unwrap();

        let docs = scan_documents(tmp.path()).unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a-charter.txt", "b-postmortem.txt"]);
    }

    #[test]
    fn scan_does_not_descend_into_subdirectories() {
        let tmp = TempDir::new().unwrap();
        let sub = tmp.path().join("archive");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("old-charter.txt"), "x").unwrap();
        fs::write(tmp.path().join("new-charter.txt"), "x").unwrap();

        let docs = scan_documents(tmp.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "new-charter.txt");
    }

    #[test]
    fn scan_skips_hidden_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".hidden-charter.txt"), "x").unwrap();
        fs::write(tmp.path().join("charter.txt"), "x").unwrap();

        let docs = scan_documents(tmp.path()).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "charter.txt");
    }

    #[test]
    fn scan_empty_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(scan_documents(tmp.path()).unwrap().is_empty());
    }
}
