use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use walkdir::WalkDir;
use log::debug;
use crate::locale::Locale;

/// Top-level freedesktop.org menu categories, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    AudioVideo,
    Development,
    Game,
    Graphics,
    Network,
    Office,
    Science,
    Settings,
    System,
    Utility,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::AudioVideo,
        Category::Development,
        Category::Game,
        Category::Graphics,
        Category::Network,
        Category::Office,
        Category::Science,
        Category::Settings,
        Category::System,
        Category::Utility,
        Category::Other,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Category::AudioVideo => "AudioVideo",
            Category::Development => "Development",
            Category::Game => "Game",
            Category::Graphics => "Graphics",
            Category::Network => "Network",
            Category::Office => "Office",
            Category::Science => "Science",
            Category::Settings => "Settings",
            Category::System => "System",
            Category::Utility => "Utility",
            Category::Other => "Other",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::AudioVideo => "applications-multimedia",
            Category::Development => "applications-development",
            Category::Game => "applications-games",
            Category::Graphics => "applications-graphics",
            Category::Network => "applications-internet",
            Category::Office => "applications-office",
            Category::Science => "applications-science",
            Category::Settings => "preferences-desktop",
            Category::System => "preferences-system",
            Category::Utility => "applications-accessories",
            Category::Other => "applications-other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Parses a main category key, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Maps a raw `Categories=` tag to its main category.
///
/// See <https://specifications.freedesktop.org/menu-spec/latest/apas02.html>. A few
/// legacy names used by older desktop-directories files ("Sound & Video", "Internet
/// and Network", ...) are accepted too. Unknown tags map to `None`.
pub fn canonical_category(tag: &str) -> Option<Category> {
    let category = match tag {
        "AudioVideo" | "Audio" | "Video" | "Midi" | "Mixer" | "Sequencer" | "Tuner" | "TV"
        | "AudioVideoEditing" | "Player" | "Recorder" | "DiscBurning" | "Music"
        | "Sound & Video" => Category::AudioVideo,

        "Development" | "Building" | "Debugger" | "IDE" | "GUIDesigner" | "Profiling"
        | "RevisionControl" | "Translation" | "WebDevelopment" | "Programming" => {
            Category::Development
        }

        "Game" | "ActionGame" | "AdventureGame" | "ArcadeGame" | "BoardGame" | "BlocksGame"
        | "CardGame" | "KidsGame" | "LogicGame" | "RolePlaying" | "Shooter" | "Simulation"
        | "SportsGame" | "StrategyGame" | "Emulator" | "Games" => Category::Game,

        "Graphics" | "2DGraphics" | "VectorGraphics" | "RasterGraphics" | "3DGraphics"
        | "Scanning" | "OCR" | "Photography" => Category::Graphics,

        "Network" | "Dialup" | "InstantMessaging" | "Chat" | "IRCClient" | "Feed"
        | "FileTransfer" | "HamRadio" | "News" | "P2P" | "RemoteAccess" | "Telephony"
        | "VideoConference" | "WebBrowser" | "Internet" | "Internet and Network" => {
            Category::Network
        }

        "Office" | "Calendar" | "ContactManagement" | "Database" | "Dictionary" | "Chart"
        | "Email" | "Finance" | "FlowChart" | "PDA" | "ProjectManagement" | "Presentation"
        | "Spreadsheet" | "WordProcessor" | "Publishing" | "Viewer" => Category::Office,

        "Science" | "ArtificialIntelligence" | "Astronomy" | "Biology" | "Chemistry"
        | "Economy" | "Electricity" | "Geography" | "Geology" | "Geoscience" | "History"
        | "Humanities" | "MedicalSoftware" | "Physics" | "Robotics" | "Science & Math"
        | "Spirituality" | "Art" | "Construction" | "Languages" | "ComputerScience"
        | "DataVisualization" | "ImageProcessing" | "Literature" | "Math"
        | "NumericalAnalysis" | "Sports" | "ParallelComputing" | "Education" => {
            Category::Science
        }

        "Settings" | "Preferences" | "DesktopSettings" | "HardwareSettings"
        | "PackageManager" | "Security" | "Accessibility" | "Administration" | "Hardware"
        | "Look and Feel" | "Personal" | "Universal Access" => Category::Settings,

        "System" | "FileTools" | "FileManager" | "TerminalEmulator" | "Filesystem"
        | "Monitor" | "System Tools" => Category::System,

        "Utility" | "TextTools" | "TelephonyTools" | "Maps" | "Archiving" | "Compression"
        | "Calculator" | "Clock" | "TextEditor" | "Accessories" => Category::Utility,

        "Other" | "Programs" => Category::Other,

        _ => return None,
    };
    Some(category)
}

/// Buckets an entry belongs to, in first-seen order.
///
/// An entry whose tags resolve to nothing lands in `Other` only; an explicit `Other`
/// tag is honoured only when nothing more specific matched.
pub fn classify<S: AsRef<str>>(tags: &[S]) -> Vec<Category> {
    let mut found = Vec::new();
    for tag in tags {
        if let Some(category) = canonical_category(tag.as_ref()) {
            if category != Category::Other && !found.contains(&category) {
                found.push(category);
            }
        }
    }
    if found.is_empty() {
        found.push(Category::Other);
    }
    found
}

/// Display labels for the main categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryLabels {
    labels: HashMap<Category, String>,
}

impl CategoryLabels {
    /// Reads `desktop-directories/` under every data root.
    pub fn load(data_dirs: &[PathBuf], locale: &Locale) -> Self {
        let mut defined: HashMap<String, String> = HashMap::new();

        for root in data_dirs {
            let dir = root.join("desktop-directories");
            if !dir.exists() {
                continue;
            }
            debug!("Scanning category names in {:?}", dir);
            for entry in WalkDir::new(&dir).into_iter().flatten() {
                if !entry.file_type().is_file() {
                    continue;
                }
                if let Some((name, localized)) = translate_name(entry.path(), locale) {
                    if defined.contains_key(&name) {
                        continue;
                    }
                    if let Some(main) = canonical_category(&name) {
                        defined
                            .entry(main.key().to_string())
                            .or_insert_with(|| localized.clone());
                    }
                    defined.insert(name, localized);
                }
            }
        }

        let labels = Category::ALL
            .iter()
            .filter_map(|c| defined.get(c.key()).map(|label| (*c, label.clone())))
            .collect();
        Self { labels }
    }

    /// Localized label, or the category key when none was found.
    pub fn label(&self, category: Category) -> &str {
        self.labels
            .get(&category)
            .map(String::as_str)
            .unwrap_or(category.key())
    }
}

/// `(Name, localized Name)` of a `.directory` file, if both are present.
fn translate_name(path: &Path, locale: &Locale) -> Option<(String, String)> {
    let content = fs::read_to_string(path).ok()?;
    let localized_key = locale.key("Name");
    let mut name = None;
    let mut localized = None;
    let mut in_entry = false;

    for line in content.lines() {
        if line.starts_with('[') {
            in_entry = line.trim() == "[Desktop Entry]";
            continue;
        }
        if !in_entry {
            continue;
        }
        if let Some(value) = line.strip_prefix("Name=") {
            name = Some(value.trim().to_string());
        } else if !locale.is_english() {
            if let Some(value) = line.strip_prefix(&localized_key) {
                localized = Some(value.trim().to_string());
            }
        }
    }

    if locale.is_english() {
        localized = name.clone();
    }
    match (name, localized) {
        (Some(n), Some(l)) if !n.is_empty() && !l.is_empty() => Some((n, l)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn keys_parse_back_case_insensitively() {
        assert_eq!("game".parse::<Category>(), Ok(Category::Game));
        assert_eq!("AudioVideo".parse::<Category>(), Ok(Category::AudioVideo));
        assert!("Games".parse::<Category>().is_err());
    }

    #[test]
    fn maps_subcategories_to_main() {
        assert_eq!(canonical_category("WebBrowser"), Some(Category::Network));
        assert_eq!(canonical_category("Education"), Some(Category::Science));
        assert_eq!(canonical_category("TerminalEmulator"), Some(Category::System));
        assert_eq!(canonical_category("GTK"), None);
        assert_eq!(canonical_category(""), None);
    }

    #[test]
    fn every_main_key_maps_to_itself() {
        for category in Category::ALL {
            assert_eq!(canonical_category(category.key()), Some(category));
        }
    }

    #[test]
    fn entry_may_land_in_several_buckets() {
        let tags = ["GTK", "AudioVideo", "Player", "Network", "Audio"];
        assert_eq!(classify(&tags), vec![Category::AudioVideo, Category::Network]);
    }

    #[test]
    fn unrecognized_tags_land_in_other_only() {
        assert_eq!(classify(&["GTK", "Qt"]), vec![Category::Other]);
        assert_eq!(classify::<&str>(&[]), vec![Category::Other]);
        assert_eq!(classify(&["Programs", "Utility"]), vec![Category::Utility]);
    }

    #[test]
    fn localized_labels_fall_back_to_keys() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("desktop-directories");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("Multimedia.directory"),
            "[Desktop Entry]\nName=Sound & Video\nName[pl]=Multimedia\nIcon=applications-multimedia\n",
        )
        .unwrap();
        fs::write(
            dir.join("Broken.directory"),
            "[Desktop Entry]\nName=Development\n",
        )
        .unwrap();

        let labels = CategoryLabels::load(&[root.path().to_path_buf()], &Locale::new("pl"));
        assert_eq!(labels.label(Category::AudioVideo), "Multimedia");
        assert_eq!(labels.label(Category::Development), "Development");
        assert_eq!(labels.label(Category::Other), "Other");
    }

    #[test]
    fn english_labels_use_plain_name() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("desktop-directories");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Games.directory"), "[Desktop Entry]\nName=Games\n").unwrap();

        let labels = CategoryLabels::load(&[root.path().to_path_buf()], &Locale::default());
        assert_eq!(labels.label(Category::Game), "Games");
    }
}
