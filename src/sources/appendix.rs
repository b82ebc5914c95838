use crate::error::Result;
use crate::model::AppendixEntry;
use crate::sources::Source;
use std::fs;
use std::path::{Path, PathBuf};
use log::{info, warn};

/// User-defined menu section stored as a JSON array.
pub struct AppendixSource {
    pub path: PathBuf,
}

impl AppendixSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Writes the stock session items if no appendix exists yet.
    pub fn ensure_default(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&default_appendix())?;
        fs::write(&self.path, content)?;
        info!("Created default appendix at {:?}", self.path);
        Ok(())
    }
}

impl Source for AppendixSource {
    type Output = AppendixEntry;

    /// Never fails: an unreadable file is an empty appendix.
    fn scan(&self) -> Result<Vec<AppendixEntry>> {
        let entries = match load_appendix(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot load appendix {:?}: {}", self.path, e);
                Vec::new()
            }
        };
        info!("AppendixSource: found {} entries", entries.len());
        Ok(entries)
    }
}

fn load_appendix(path: &Path) -> Result<Vec<AppendixEntry>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn default_appendix() -> Vec<AppendixEntry> {
    vec![
        AppendixEntry::new("Lock", "swaylock -f -c 000000", "lock"),
        AppendixEntry::new(
            "Logout",
            "swaynag -t red -m ' Exit sway session?' -b ' Logout ' 'swaymsg exit'",
            "exit",
        ),
        AppendixEntry::new(
            "Reboot",
            "swaynag -t red -m ' Reboot the machine?' -b ' Reboot ' 'systemctl reboot'",
            "reload",
        ),
        AppendixEntry::new(
            "Shutdown",
            "swaynag -t red -m ' Shutdown the machine?' -b ' Shutdown ' 'systemctl -i poweroff'",
            "window-close",
        ),
    ]
}
