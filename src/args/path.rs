// ABOUTME: Path flag normalization: expands ~ and makes the path absolute.
// ABOUTME: Purely lexical; the path does not have to exist.

use super::{InputAction, UsageError};
use std::path::{Component, Path, PathBuf};

pub struct PathAction;

impl InputAction for PathAction {
    type Value = PathBuf;
    const METAVAR: &'static str = "PATH";
    const HELP: &'static str = "Relative paths and ~ are expanded on the local host.";

    fn validate(raw: &str) -> Result<PathBuf, UsageError> {
        let expanded = expand_home(raw);
        let absolute = if expanded.is_absolute() {
            expanded
        } else {
            match std::env::current_dir() {
                Ok(cwd) => cwd.join(expanded),
                Err(_) => expanded,
            }
        };
        Ok(normalize(&absolute))
    }
}

/// clap value parser for [`PathAction`].
pub fn expand_path(raw: &str) -> Result<PathBuf, UsageError> {
    PathAction::validate(raw)
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => &rest[1..],
        _ => return PathBuf::from(raw),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
