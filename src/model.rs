use serde::{Deserialize, Serialize};

/// An application found in an `applications` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: String,          // Display name, localized when available
    pub command: String,       // Exec line with field codes stripped
    pub icon: String,          // Absolute path or theme icon name
    pub comment: Option<String>,
    pub categories: Vec<String>,
}

impl DesktopEntry {
    #[cfg(test)]
    pub fn new(name: &str, command: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            command: command.to_string(),
            icon: icon.to_string(),
            comment: None,
            categories: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Two entries are the same application when both label and command agree.
    pub fn same_as(&self, other: &DesktopEntry) -> bool {
        self.name == other.name && self.command == other.command
    }
}

/// A user-authored item from the appendix file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendixEntry {
    pub name: String,
    pub exec: String,
    #[serde(default)]
    pub icon: String,
}

impl AppendixEntry {
    pub fn new(name: &str, exec: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            exec: exec.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Anything the user can pick from a menu, grid or bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Catalog(DesktopEntry),
    Appendix(AppendixEntry),
    /// Bare executable from `$PATH` (dmenu mode).
    Command(String),
}

impl Item {
    pub fn label(&self) -> &str {
        match self {
            Item::Catalog(entry) => &entry.name,
            Item::Appendix(entry) => &entry.name,
            Item::Command(command) => command,
        }
    }

    pub fn command(&self) -> &str {
        match self {
            Item::Catalog(entry) => &entry.command,
            Item::Appendix(entry) => &entry.exec,
            Item::Command(command) => command,
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match self {
            Item::Catalog(entry) => Some(&entry.icon),
            Item::Appendix(entry) => Some(&entry.icon),
            Item::Command(_) => None,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            Item::Catalog(entry) => entry.comment.as_deref(),
            _ => None,
        }
    }

    /// First whitespace-delimited token of the command, i.e. the program name.
    pub fn program(&self) -> &str {
        self.command().split_whitespace().next().unwrap_or("")
    }

    /// Only catalog launches count towards favourites.
    pub fn records_usage(&self) -> bool {
        matches!(self, Item::Catalog(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_skips_arguments() {
        let item = Item::Catalog(DesktopEntry::new("Firefox", "firefox --new-window", "firefox"));
        assert_eq!(item.program(), "firefox");
        assert_eq!(Item::Command(String::new()).program(), "");
    }

    #[test]
    fn only_catalog_items_record_usage() {
        assert!(!Item::Appendix(AppendixEntry::new("Lock", "swaylock", "lock")).records_usage());
        assert!(!Item::Command("htop".into()).records_usage());
        assert!(Item::Catalog(DesktopEntry::new("Htop", "htop", "htop")).records_usage());
    }

    #[test]
    fn appendix_entry_reads_exec_key() {
        let entry: AppendixEntry =
            serde_json::from_str(r#"{"name": "Lock", "exec": "swaylock -f", "icon": "lock"}"#).unwrap();
        assert_eq!(entry.exec, "swaylock -f");
    }
}
