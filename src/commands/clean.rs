use std::path::Path;

use anyhow::Result;
use tracing::info;

/// Delete report files (`<prefix>*.md`) from the current directory.
pub fn run(prefix: &str) -> Result<()> {
    let removed = clean_dir(Path::new("."), prefix)?;
    info!("existing reports removed: {} file(s)", removed);
    Ok(())
}

fn clean_dir(dir: &Path, prefix: &str) -> Result<usize> {
    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if name.starts_with(prefix) && name.ends_with(".md") {
            std::fs::remove_file(entry.path())?;
            info!("removed file: {}", name);
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("cookiescan-clean-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_clean_removes_only_prefixed_reports() {
        let dir = scratch_dir("prefix");
        std::fs::write(dir.join("cookie-report2026.md"), "x").unwrap();
        std::fs::write(dir.join("cookie-report-old.md"), "x").unwrap();
        std::fs::write(dir.join("other-report.md"), "x").unwrap();
        std::fs::write(dir.join("cookie-report.txt"), "x").unwrap();

        let removed = clean_dir(&dir, "cookie-report").unwrap();
        assert_eq!(removed, 2);
        assert!(dir.join("other-report.md").exists());
        assert!(dir.join("cookie-report.txt").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_clean_empty_dir() {
        let dir = scratch_dir("empty");
        assert_eq!(clean_dir(&dir, "cookie-report").unwrap(), 0);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
