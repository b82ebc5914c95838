use crate::error::Result;
use directories::BaseDirs;
use std::env;
use std::path::PathBuf;

pub trait Source {
    type Output;

    fn scan(&self) -> Result<Vec<Self::Output>>;
}

pub mod appendix;
pub mod bin;
pub mod desktop;
pub mod history;

/// Data roots: user, system, local, then `$XDG_DATA_DIRS`, without duplicates.
pub fn data_dirs() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(base_dirs) = BaseDirs::new() {
        paths.push(base_dirs.home_dir().join(".local/share"));
    }
    paths.push(PathBuf::from("/usr/share"));
    paths.push(PathBuf::from("/usr/local/share"));
    extend_unique(&mut paths, env::var("XDG_DATA_DIRS").ok().as_deref());
    paths
}

/// Directories listed in `$PATH`, without duplicates.
pub fn path_dirs() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    extend_unique(&mut paths, env::var("PATH").ok().as_deref());
    paths
}

fn extend_unique(paths: &mut Vec<PathBuf>, list: Option<&str>) {
    let Some(list) = list else { return };
    for dir in list.split(':') {
        let dir = dir.trim_end_matches('/');
        if dir.is_empty() {
            continue;
        }
        let dir = PathBuf::from(dir);
        if !paths.contains(&dir) {
            paths.push(dir);
        }
    }
}
