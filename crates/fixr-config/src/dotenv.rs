//! `.env` support for local development.
//!
//! Lines are `KEY=VALUE`, optionally prefixed with `export`. Blank lines and
//! `#` comments are skipped, and matching single or double quotes around a
//! value are removed. Variables already present in the environment win.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Parse `.env` contents into key/value pairs, in file order.
pub fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Apply the first readable file among `candidates` to the process
/// environment. Returns the file that was used.
pub fn load_dotenv(candidates: &[PathBuf]) -> Option<PathBuf> {
    let (path, contents) = candidates
        .iter()
        .find_map(|p| std::fs::read_to_string(p).ok().map(|c| (p, c)))?;

    let mut applied = 0;
    for (key, value) in parse_dotenv(&contents) {
        if std::env::var_os(&key).is_none() {
            std::env::set_var(&key, value);
            applied += 1;
        }
    }
    debug!(path = %path.display(), applied, "loaded .env");
    Some(path.clone())
}

/// `.env` next to the workspace root of `manifest_dir`, then in the
/// current directory.
pub fn dotenv_candidates(manifest_dir: &Path) -> Vec<PathBuf> {
    vec![
        manifest_dir.join("..").join("..").join(".env"),
        PathBuf::from(".env"),
    ]
}
