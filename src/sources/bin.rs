use crate::error::Result;
use crate::sources::Source;
use std::fs;
use std::path::PathBuf;
use log::{info, debug};

/// Executable names found in `$PATH`, for dmenu mode.
pub struct BinSource {
    pub dirs: Vec<PathBuf>,
}

impl BinSource {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }
}

impl Source for BinSource {
    type Output = String;

    fn scan(&self) -> Result<Vec<String>> {
        let mut commands = Vec::new();
        for dir in &self.dirs {
            if !dir.exists() {
                continue;
            }
            debug!("Scanning binaries in {:?}", dir);
            if let Ok(read_dir) = fs::read_dir(dir) {
                for entry in read_dir.flatten() {
                    let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
                        continue;
                    };
                    // skips libraries, scripts with extensions and dotfiles
                    if file_name.contains('.') {
                        continue;
                    }
                    commands.push(file_name);
                }
            }
        }
        info!("BinSource: found {} entries", commands.len());
        Ok(commands)
    }
}
