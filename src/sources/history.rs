use std::fs;
use std::path::{Path, PathBuf};
use directories::BaseDirs;
use serde_json::{Map, Value};
use log::{debug, warn};
use crate::error::{MenuError, Result};

/// Launch counter per command, in first-launch order.
#[derive(Debug, Clone, Default)]
pub struct History {
    path: Option<PathBuf>,
    usage_counts: Vec<(String, u64)>,
}

/// `$XDG_CACHE_HOME/sgtk-menu`, shared with older menu builds.
pub fn get_history_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.cache_dir().join("sgtk-menu"))
}

impl History {
    /// Never fails: a missing or corrupt file is an empty history.
    pub fn load(path: Option<PathBuf>) -> Self {
        let usage_counts = match path.as_deref().map(read_counts) {
            Some(Ok(counts)) => counts,
            Some(Err(e)) => {
                debug!("Starting with empty usage cache: {}", e);
                Vec::new()
            }
            None => Vec::new(),
        };
        Self { path, usage_counts }
    }

    #[cfg(test)]
    pub fn count(&self, command: &str) -> u64 {
        self.usage_counts
            .iter()
            .find(|(c, _)| c == command)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.usage_counts.is_empty()
    }

    /// Bumps the counter and rewrites the whole file.
    pub fn increment_usage(&mut self, command: &str) -> Result<()> {
        match self.usage_counts.iter_mut().find(|(c, _)| c == command) {
            Some((_, count)) => *count += 1,
            None => self.usage_counts.push((command.to_string(), 1)),
        }
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        let path = self.path.as_deref().ok_or(MenuError::NoCacheDir)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let map: Map<String, Value> = self
            .usage_counts
            .iter()
            .map(|(command, count)| (command.clone(), Value::from(*count)))
            .collect();
        fs::write(path, serde_json::to_string_pretty(&map)?)?;
        Ok(())
    }

    /// Commands by descending count; equal counts keep file order.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut sorted: Vec<(&str, u64)> = self
            .usage_counts
            .iter()
            .map(|(c, n)| (c.as_str(), *n))
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }

    /// Up to `n` most launched commands.
    pub fn top_favourites(&self, n: usize) -> Vec<&str> {
        self.sorted().into_iter().take(n).map(|(c, _)| c).collect()
    }
}

fn read_counts(path: &Path) -> Result<Vec<(String, u64)>> {
    let content = fs::read_to_string(path)?;
    let map: Map<String, Value> = serde_json::from_str(&content)?;
    let mut counts = Vec::with_capacity(map.len());
    for (command, value) in map {
        match value.as_u64() {
            Some(count) => counts.push((command, count)),
            None => warn!("Ignoring non-numeric usage count for {}", command),
        }
    }
    Ok(counts)
}
