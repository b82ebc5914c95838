use std::path::{Path, PathBuf};

/// Outcome of an icon lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconRef {
    /// Image file on disk.
    File(PathBuf),
    /// Name the toolkit's icon theme should resolve.
    Themed(String),
    /// Nothing usable; grid and bar draw a stand-in, menus draw no icon.
    Placeholder,
}

pub const PLACEHOLDER_ICON: &str = "help";

pub struct IconResolver {
    icon_theme_paths: Vec<PathBuf>,
}

impl IconResolver {
    pub fn new(data_dirs: &[PathBuf]) -> Self {
        let mut paths: Vec<PathBuf> = data_dirs.iter().map(|d| d.join("icons")).collect();
        paths.push(PathBuf::from("/usr/share/pixmaps"));
        Self { icon_theme_paths: paths }
    }

    /// Theme lookup key: `.svg`/`.png` suffixes are not part of icon names.
    pub fn theme_name(icon: &str) -> &str {
        icon.strip_suffix(".svg")
            .or_else(|| icon.strip_suffix(".png"))
            .unwrap_or(icon)
    }

    pub fn resolve(&self, icon: &str) -> IconRef {
        if icon.is_empty() {
            return IconRef::Placeholder;
        }
        let path = Path::new(icon);
        if path.is_absolute() {
            return if path.exists() {
                IconRef::File(path.to_path_buf())
            } else {
                IconRef::Placeholder
            };
        }
        let name = Self::theme_name(icon);
        match self.find_in_themes(name) {
            Some(file) => IconRef::File(file),
            None => IconRef::Themed(name.to_string()),
        }
    }

    fn find_in_themes(&self, icon_name: &str) -> Option<PathBuf> {
        let common_subdirs = [
            "hicolor/48x48/apps",
            "hicolor/scalable/apps",
            "hicolor/32x32/apps",
            "hicolor/64x64/apps",
            "Adwaita/48x48/apps",
            "Adwaita/scalable/apps",
            "",
        ];
        for root in &self.icon_theme_paths {
            if !root.exists() { continue; }
            for sub in common_subdirs {
                let dir = root.join(sub);
                if !dir.exists() { continue; }
                for ext in ["png", "svg", "xpm"] {
                    let file_path = dir.join(format!("{}.{}", icon_name, ext));
                    if file_path.exists() {
                        return Some(file_path);
                    }
                }
            }
        }
        None
    }
}
