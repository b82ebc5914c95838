use std::collections::BTreeMap;
use regex::Regex;
use log::{info, warn};
use crate::category::{self, Category};
use crate::model::{AppendixEntry, DesktopEntry};
use crate::sources::history::History;

/// All discovered applications, grouped by main category.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<DesktopEntry>,
    by_category: BTreeMap<Category, Vec<DesktopEntry>>,
    appendix: Vec<AppendixEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<DesktopEntry>) -> Self {
        let mut by_category: BTreeMap<Category, Vec<DesktopEntry>> = BTreeMap::new();
        for entry in &entries {
            for category in category::classify(&entry.categories) {
                let list = by_category.entry(category).or_default();
                if !list.iter().any(|known| known.same_as(entry)) {
                    list.push(entry.clone());
                }
            }
        }
        for list in by_category.values_mut() {
            sort_by_name(list);
        }
        info!(
            "Catalog: {} entries in {} categories",
            entries.len(),
            by_category.len()
        );
        Self { entries, by_category, appendix: Vec::new() }
    }

    /// Drops entries whose name or command matches any of `patterns`.
    pub fn with_blacklist(entries: Vec<DesktopEntry>, patterns: &[String]) -> Self {
        let regexes: Vec<Regex> = patterns
            .iter()
            .filter_map(|p| match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Ignoring blacklist pattern {:?}: {}", p, e);
                    None
                }
            })
            .collect();
        let entries = entries
            .into_iter()
            .filter(|e| !regexes.iter().any(|re| re.is_match(&e.name) || re.is_match(&e.command)))
            .collect();
        Self::new(entries)
    }

    pub fn set_appendix(&mut self, appendix: Vec<AppendixEntry>) {
        self.appendix = appendix;
    }

    pub fn appendix(&self) -> &[AppendixEntry] {
        &self.appendix
    }

    /// Entries in scan order.
    #[cfg(test)]
    pub fn entries(&self) -> &[DesktopEntry] {
        &self.entries
    }

    /// Entries of one category, sorted by name; empty for unused categories.
    pub fn category(&self, category: Category) -> &[DesktopEntry] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-empty categories in menu order.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &[DesktopEntry])> {
        self.by_category
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(c, list)| (*c, list.as_slice()))
    }

    /// Every entry once, sorted by name, as the grid shows them.
    pub fn sorted_entries(&self) -> Vec<DesktopEntry> {
        let mut all = self.entries.clone();
        sort_by_name(&mut all);
        all
    }

    /// The `n` most launched commands resolved back to entries.
    ///
    /// Commands no longer installed are skipped, so fewer than `n` may come back.
    pub fn favourites(&self, history: &History, n: usize) -> Vec<DesktopEntry> {
        let mut favourites: Vec<DesktopEntry> = Vec::new();
        if history.is_empty() {
            return favourites;
        }
        for command in history.top_favourites(n) {
            let found = self
                .entries
                .iter()
                .find(|e| e.command == command && !favourites.iter().any(|f| f.same_as(e)));
            if let Some(entry) = found {
                favourites.push(entry.clone());
            }
        }
        favourites
    }
}

fn sort_by_name(list: &mut [DesktopEntry]) {
    list.sort_by_cached_key(|e| e.name.to_lowercase());
}
