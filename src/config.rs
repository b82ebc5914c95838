use serde::Deserialize;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use anyhow::Result;
use std::fs;
use crate::search::SearchPolicy;
use crate::wm::Workaround;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub search: SearchPolicy,
    #[serde(default)]
    pub overflow: OverflowConfig,
    /// Regular expressions; matching applications are hidden.
    #[serde(default)]
    pub blacklist: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    /// Most used items to show first; 0 disables favourites.
    #[serde(default)]
    pub favourites: usize,
    #[serde(default = "default_line_limit")]
    pub line_limit: usize,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default = "default_appendix")]
    pub appendix: String,
}

fn default_line_limit() -> usize { 30 }
fn default_appendix() -> String { "appendix".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            favourites: 0,
            line_limit: default_line_limit(),
            lang: None,
            appendix: default_appendix(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct OverflowConfig {
    #[serde(default)]
    pub workaround: Workaround,
}

/// `~/.config/sgmenu`, or the working directory when no home is known.
pub fn config_dir() -> PathBuf {
    ProjectDirs::from("org", "sgmenu", "sgmenu")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    /// Appendix file, relative names resolved against the config directory.
    pub fn appendix_path(&self, file_name: Option<&str>) -> PathBuf {
        config_dir().join(file_name.unwrap_or(&self.general.appendix))
    }
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_dir().join("config.toml"))
}

pub fn load_config_from(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wm::Workaround;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.general.line_limit, 30);
        assert_eq!(config.general.appendix, "appendix");
        assert!(config.search.match_command);
        assert!(!config.search.exact_on_space);
        assert_eq!(config.overflow.workaround, Workaround::Auto);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
blacklist = ["^avahi"]

[general]
favourites = 5
lang = "de"

[search]
exact_on_space = true

[overflow]
workaround = "always"
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.favourites, 5);
        assert_eq!(config.general.lang.as_deref(), Some("de"));
        assert_eq!(config.general.line_limit, 30);
        assert!(config.search.exact_on_space);
        assert_eq!(config.search.extra_chars, "-+_.");
        assert_eq!(config.overflow.workaround, Workaround::Always);
        assert_eq!(config.blacklist, vec!["^avahi"]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nfavourites = ").unwrap();
        assert!(load_config_from(&path).is_err());
    }
}
