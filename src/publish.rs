//! Copies a module's rendered pages into the site root.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::Result;

/// Copies every file in `<root>/<module>/docs/` to `<root>/docs/<module>/`
/// and returns the destination paths.
///
/// The destination directory is always created. A missing source directory
/// copies nothing. Subdirectories are not descended into.
pub fn publish(module: &str, root: &Path) -> Result<Vec<PathBuf>> {
    let src = root.join(module).join("docs");
    let dst = root.join("docs").join(module);
    fs::create_dir_all(&dst)?;

    let mut copied = Vec::new();
    if src.is_dir() {
        for entry in fs::read_dir(&src)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let target = dst.join(entry.file_name());
            fs::copy(entry.path(), &target)?;
            copied.push(target);
        }
    } else {
        tracing::warn!("Nothing to publish: {} does not exist", src.display());
    }
    copied.sort();

    tracing::info!("Published {} file(s) for {} to {}", copied.len(), module, dst.display());
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copies_module_docs() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("analyst").join("docs");
        fs::create_dir_all(src.join("assets")).unwrap();
        fs::write(src.join("index.html"), "<p>report</p>").unwrap();
        fs::write(src.join("style.css"), "body{}").unwrap();

        let copied = publish("analyst", root.path()).unwrap();

        let dst = root.path().join("docs").join("analyst");
        assert_eq!(copied, vec![dst.join("index.html"), dst.join("style.css")]);
        assert_eq!(fs::read_to_string(dst.join("index.html")).unwrap(), "<p>report</p>");
        assert!(!dst.join("assets").exists());
    }

    #[test]
    fn test_missing_source_copies_nothing() {
        let root = tempfile::tempdir().unwrap();
        let copied = publish("trader", root.path()).unwrap();
        assert!(copied.is_empty());
        assert!(root.path().join("docs").join("trader").is_dir());
    }
}
