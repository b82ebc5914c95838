use crate::error::Result;
use crate::locale::Locale;
use crate::model::DesktopEntry;
use crate::sources::Source;
use std::fs;
use std::path::PathBuf;
use log::{info, debug, warn};

/// Which optional field an entry must carry to be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Menu mode groups by category, so `Categories=` is mandatory.
    Categories,
    /// Grid mode draws a button per entry, so `Icon=` is mandatory.
    Icon,
}

pub struct DesktopSource {
    pub roots: Vec<PathBuf>,
    pub locale: Locale,
    pub requirement: Requirement,
}

impl DesktopSource {
    pub fn new(roots: Vec<PathBuf>, locale: Locale, requirement: Requirement) -> Self {
        Self { roots, locale, requirement }
    }
}

impl Source for DesktopSource {
    type Output = DesktopEntry;

    fn scan(&self) -> Result<Vec<DesktopEntry>> {
        let mut entries: Vec<DesktopEntry> = Vec::new();

        for root in &self.roots {
            let dir = root.join("applications");
            if !dir.exists() {
                continue;
            }
            debug!("Scanning desktop files in {:?}", dir);
            let read_dir = match fs::read_dir(&dir) {
                Ok(read_dir) => read_dir,
                Err(e) => {
                    warn!("Cannot list {:?}: {}", dir, e);
                    continue;
                }
            };
            for file in read_dir.flatten() {
                let path = file.path();
                if !path.is_file() {
                    continue;
                }
                let content = match fs::read_to_string(&path) {
                    Ok(content) => content,
                    Err(e) => {
                        warn!("Skipping {:?}: {}", path, e);
                        continue;
                    }
                };
                let Some(entry) = parse_desktop_file(&content, &self.locale, self.requirement) else {
                    continue;
                };
                if entries.iter().any(|known| known.same_as(&entry)) {
                    debug!("Duplicate entry {} ({}) in {:?}", entry.name, entry.command, path);
                    continue;
                }
                entries.push(entry);
            }
        }
        info!("DesktopSource: found {} entries", entries.len());
        Ok(entries)
    }
}

/// Reads the `[Desktop Entry]` section; `None` when a required field is missing.
pub fn parse_desktop_file(content: &str, locale: &Locale, requirement: Requirement) -> Option<DesktopEntry> {
    let localized_name = locale.key("Name");
    let localized_comment = locale.key("Comment");

    let mut name = String::new();
    let mut exec = String::new();
    let mut icon = String::new();
    let mut comment = String::new();
    let mut categories = Vec::new();
    let mut is_desktop_entry = false;

    for line in content.lines() {
        if line.starts_with('[') {
            is_desktop_entry = line.trim() == "[Desktop Entry]";
            continue;
        }
        if !is_desktop_entry { continue; }

        if let Some(value) = line.strip_prefix("Name=") {
            name = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(localized_name.as_str()) {
            name = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("Comment=") {
            comment = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix(localized_comment.as_str()) {
            comment = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("Exec=") {
            exec = clean_exec(value);
        } else if let Some(value) = line.strip_prefix("Icon=") {
            icon = value.trim().to_string();
        } else if let Some(value) = line.strip_prefix("Categories=") {
            categories = value
                .trim()
                .split(';')
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    if name.is_empty() || exec.is_empty() {
        return None;
    }
    let complete = match requirement {
        Requirement::Categories => !categories.is_empty(),
        Requirement::Icon => !icon.is_empty(),
    };
    if !complete {
        return None;
    }

    Some(DesktopEntry {
        name,
        command: exec,
        icon,
        comment: if comment.is_empty() { None } else { Some(comment) },
        categories,
    })
}

/// Drops everything from the first `%` field code on.
fn clean_exec(raw: &str) -> String {
    let exec = match raw.find('%') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    exec.trim().to_string()
}
