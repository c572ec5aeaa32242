//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles
//! across the client crates:
//! - No blocking sleep in production code
//! - No blocking I/O inside async functions
//! - No panicking shortcuts (`unwrap`/`expect`) in production code
//!
//! The helpers here walk the production sources and hand each test the lines
//! that matter: comments are dropped and scanning stops at the first
//! `#[cfg(test)]` module.

use std::fs;
use std::path::{Path, PathBuf};

/// Source directories holding production code, relative to the workspace root
pub const PRODUCTION_DIRS: &[&str] = &["client/core/src", "client/term/src"];

/// One line of production code
#[derive(Clone, Debug)]
pub struct SourceLine {
    /// File the line came from
    pub path: PathBuf,
    /// 1-based line number
    pub number: usize,
    /// Line text with any trailing `//` comment removed
    pub code: String,
    /// Whether the nearest enclosing `fn` is `async`
    pub in_async_fn: bool,
}

impl SourceLine {
    /// `path:line - label: code` for violation reports
    #[must_use]
    pub fn report(&self, label: &str) -> String {
        format!(
            "{}:{} - {}: {}",
            self.path.display(),
            self.number,
            label,
            self.code.trim()
        )
    }
}

/// Workspace root, two levels above this crate
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..")
}

/// Every `.rs` file under the production directories
#[must_use]
pub fn production_files() -> Vec<PathBuf> {
    let root = workspace_root();
    PRODUCTION_DIRS
        .iter()
        .map(|dir| root.join(dir))
        .filter(|dir| dir.exists())
        .flat_map(|dir| {
            walkdir::WalkDir::new(dir)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
                .map(walkdir::DirEntry::into_path)
        })
        .collect()
}

/// Production lines of one file
#[must_use]
pub fn production_lines(path: &Path) -> Vec<SourceLine> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };
    scan(path, &content)
}

/// Production lines of every production file
#[must_use]
pub fn all_production_lines() -> Vec<SourceLine> {
    production_files()
        .iter()
        .flat_map(|path| production_lines(path))
        .collect()
}

fn scan(path: &Path, content: &str) -> Vec<SourceLine> {
    let mut lines = Vec::new();
    let mut in_async_fn = false;

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();

        if trimmed.starts_with("#[cfg(test)]") {
            break;
        }
        if trimmed.starts_with("//") || trimmed.is_empty() {
            continue;
        }

        let code = line.split("//").next().unwrap_or(line).to_string();

        if code.contains("fn ") {
            in_async_fn = code.contains("async fn ");
        }

        lines.push(SourceLine {
            path: path.to_path_buf(),
            number: idx + 1,
            code,
            in_async_fn,
        });
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_stops_at_test_module() {
        let src = "fn a() {}\n// note\n#[cfg(test)]\nmod tests { fn b() { x.unwrap(); } }\n";
        let lines = scan(Path::new("x.rs"), src);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 1);
    }

    #[test]
    fn test_scan_tracks_async_functions() {
        let src = "async fn a() {\n    go();\n}\nfn b() {\n    stop();\n}\n";
        let lines = scan(Path::new("x.rs"), src);
        let go = lines.iter().find(|l| l.code.contains("go()")).unwrap();
        let stop = lines.iter().find(|l| l.code.contains("stop()")).unwrap();
        assert!(go.in_async_fn);
        assert!(!stop.in_async_fn);
    }

    #[test]
    fn test_trailing_comments_removed() {
        let lines = scan(Path::new("x.rs"), "let a = 1; // .unwrap()\n");
        assert!(!lines[0].code.contains("unwrap"));
    }

    #[test]
    fn test_production_sources_found() {
        assert!(production_files()
            .iter()
            .any(|p| p.ends_with("client/core/src/lib.rs")));
    }
}
