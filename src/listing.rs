use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::Config;
use crate::error::BrowserError;
use crate::media::{MediaCategory, guess_mime};
use crate::resolve::MediaRoot;

/// Subdirectory entry in a listing
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    /// Path relative to the media root, `/`-separated
    pub path: String,
}

/// Regular file entry in a listing
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub mime: String,
    pub category: MediaCategory,
}

/// Immediate children of one directory, each group sorted by name.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Relative path of the listed directory (empty for the root)
    pub path: String,
    pub directories: Vec<DirEntry>,
    pub files: Vec<FileEntry>,
}

/// Enumerate `dir` without recursing.
///
/// `relative` is the listed directory's path relative to the root; it
/// prefixes every entry path. Symbolic links are listed only when their
/// target stays inside `root`; names that are not valid UTF-8 cannot be
/// addressed by a URL and are skipped. Any read error fails the whole listing.
pub fn list(
    config: &Config,
    root: &MediaRoot,
    dir: &Path,
    relative: &str,
) -> Result<DirectoryListing, BrowserError> {
    let mut directories = Vec::new();
    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            debug!("Skipping non UTF-8 name: {:?}", entry.path());
            continue;
        };

        if config.is_hidden(&name) {
            continue;
        }

        let metadata = if entry.file_type()?.is_symlink() {
            if !root.contains(&entry.path()) {
                debug!("Skipping dangling or escaping link: {:?}", entry.path());
                continue;
            }
            std::fs::metadata(entry.path())?
        } else {
            entry.metadata()?
        };

        let path = if relative.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", relative, name)
        };

        if metadata.is_dir() {
            directories.push(DirEntry { name, path });
        } else if metadata.is_file() {
            let mime = guess_mime(Path::new(&name));
            files.push(FileEntry {
                category: MediaCategory::from_mime(&mime),
                mime: mime.to_string(),
                name,
                path,
                size: metadata.len(),
            });
        }
    }

    directories.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(DirectoryListing {
        path: relative.to_string(),
        directories,
        files,
    })
}

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Human readable size with one decimal, stepping by 1024 up to PB.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} PB", size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn list_dir(config: &Config, dir: &Path, relative: &str) -> Result<DirectoryListing, BrowserError> {
        list(config, &MediaRoot::new(dir).unwrap(), dir, relative)
    }

    fn names(listing: &DirectoryListing) -> (Vec<&str>, Vec<&str>) {
        (
            listing.directories.iter().map(|d| d.name.as_str()).collect(),
            listing.files.iter().map(|f| f.name.as_str()).collect(),
        )
    }

    #[test]
    fn test_format_size_tiers() {
        assert_eq!(format_size(0), "0.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(1024 * 1024 * 1024), "1.0 GB");
        assert_eq!(format_size(1024_u64.pow(4)), "1.0 TB");
        assert_eq!(format_size(1024_u64.pow(5)), "1.0 PB");
        assert_eq!(format_size(2048 * 1024_u64.pow(5)), "2048.0 PB");
    }

    #[test]
    fn test_list_sorts_each_group() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        std::fs::write(dir.join("b.txt"), "bb").unwrap();
        std::fs::write(dir.join("a.txt"), "a").unwrap();
        std::fs::create_dir(dir.join("sub")).unwrap();

        let listing = list_dir(&Config::default(), dir, "").unwrap();
        assert_eq!(names(&listing), (vec!["sub"], vec!["a.txt", "b.txt"]));
        assert_eq!(listing.files[1].size, 2);
        assert_eq!(listing.files[0].mime, "text/plain");
        assert_eq!(listing.files[0].category, MediaCategory::Text);
        assert_eq!(listing.directories[0].path, "sub");
    }

    #[test]
    fn test_list_is_case_sensitive_and_stable() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        for name in ["beta.png", "Zeta.png", "alpha.png"] {
            std::fs::write(dir.join(name), "").unwrap();
        }

        let first = list_dir(&Config::default(), dir, "pics").unwrap();
        let second = list_dir(&Config::default(), dir, "pics").unwrap();
        assert_eq!(first, second);
        assert_eq!(names(&first).1, vec!["Zeta.png", "alpha.png", "beta.png"]);
        assert_eq!(first.files[0].path, "pics/Zeta.png");
    }

    #[test]
    fn test_list_respects_hidden_config() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        std::fs::write(dir.join(".secret"), "").unwrap();
        std::fs::write(dir.join("Thumbs.db"), "").unwrap();
        std::fs::write(dir.join("shown.mp3"), "").unwrap();

        let all = list_dir(&Config::default(), dir, "").unwrap();
        assert_eq!(names(&all).1, vec![".secret", "Thumbs.db", "shown.mp3"]);

        let config = Config {
            show_hidden: false,
            hidden_names: vec!["Thumbs.db".to_string()],
            ..Config::default()
        };
        let filtered = list_dir(&config, dir, "").unwrap();
        assert_eq!(names(&filtered).1, vec!["shown.mp3"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_keeps_only_links_inside_root() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("root");
        let outside = temp_dir.path().join("outside");
        std::fs::create_dir_all(dir.join("albums")).unwrap();
        std::fs::create_dir_all(&outside).unwrap();
        std::fs::write(dir.join("real.txt"), "abc").unwrap();
        symlink(dir.join("real.txt"), dir.join("link.txt")).unwrap();
        symlink(dir.join("albums"), dir.join("shortcut")).unwrap();
        symlink(&outside, dir.join("escape")).unwrap();
        symlink("/nonexistent/target", dir.join("dangling")).unwrap();

        let listing = list_dir(&Config::default(), &dir, "").unwrap();
        assert_eq!(
            names(&listing),
            (vec!["albums", "shortcut"], vec!["link.txt", "real.txt"])
        );
        assert_eq!(listing.files[0].size, 3);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_list_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        std::fs::write(dir.join(OsStr::from_bytes(b"caf\xe9.txt")), "").unwrap();
        std::fs::write(dir.join("cafe.txt"), "").unwrap();

        let listing = list_dir(&Config::default(), dir, "").unwrap();
        assert_eq!(names(&listing).1, vec!["cafe.txt"]);
    }

    #[test]
    fn test_list_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let root = MediaRoot::new(temp_dir.path()).unwrap();
        let result = list(&Config::default(), &root, &temp_dir.path().join("gone"), "");
        assert!(matches!(result, Err(BrowserError::Io(_))));
    }
}
