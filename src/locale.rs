use std::env;

/// Language used for `Name[xx]=` style lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    lang: String,
}

impl Locale {
    pub fn new(lang: &str) -> Self {
        // "de_DE.UTF-8" and "de" both reduce to "de"
        let lang = lang
            .split(['_', '.', '@'])
            .next()
            .unwrap_or("")
            .trim();
        let lang = if lang.is_empty() || lang == "C" || lang == "POSIX" {
            "en"
        } else {
            lang
        };
        Self { lang: lang.to_string() }
    }

    /// Forced language wins, then the usual environment variables.
    pub fn detect(forced: Option<&str>) -> Self {
        if let Some(lang) = forced {
            return Self::new(lang);
        }
        let from_env = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .find(|value| !value.is_empty());
        Self::new(from_env.as_deref().unwrap_or("en"))
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn is_english(&self) -> bool {
        self.lang == "en"
    }

    /// Key prefix for the localized variant of `key`, e.g. `Name[de]=`.
    pub fn key(&self, key: &str) -> String {
        format!("{}[{}]=", key, self.lang)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_territory_and_encoding() {
        assert_eq!(Locale::new("pl_PL.UTF-8").lang(), "pl");
        assert_eq!(Locale::new("sr@latin").lang(), "sr");
    }

    #[test]
    fn c_locale_is_english() {
        assert!(Locale::new("C").is_english());
        assert!(Locale::new("").is_english());
    }

    #[test]
    fn forced_language_wins() {
        assert_eq!(Locale::detect(Some("de")).key("Name"), "Name[de]=");
    }
}
