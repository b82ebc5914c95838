use std::collections::BTreeMap;
use log::debug;
use crate::catalog::Catalog;
use crate::category::Category;
use crate::model::DesktopEntry;

/// How much of a category submenu is turned into menu items.
///
/// sway cannot scroll a popup that grows past the screen height, so long submenus
/// start with only `limit` rows and receive the rest while they are on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmenuState {
    /// Short list or workaround disabled: everything is shown, hooks do nothing.
    Static,
    /// Built with the first `limit` rows, never opened yet.
    Collapsed,
    /// Opened: all rows present.
    Expanded,
    /// Hidden again and trimmed back to `limit` rows.
    Closed,
}

#[derive(Debug, Clone)]
pub struct SubmenuWindow {
    entries: Vec<DesktopEntry>,
    limit: usize,
    materialized: Vec<usize>,
    state: SubmenuState,
}

impl SubmenuWindow {
    pub fn new(entries: Vec<DesktopEntry>, limit: usize, workaround: bool) -> Self {
        if workaround && entries.len() > limit {
            Self {
                materialized: (0..limit).collect(),
                entries,
                limit,
                state: SubmenuState::Collapsed,
            }
        } else {
            Self {
                materialized: (0..entries.len()).collect(),
                entries,
                limit,
                state: SubmenuState::Static,
            }
        }
    }

    pub fn state(&self) -> SubmenuState {
        self.state
    }

    /// Rows currently present in the submenu.
    pub fn materialized(&self) -> impl Iterator<Item = &DesktopEntry> {
        self.materialized.iter().map(|&i| &self.entries[i])
    }

    pub fn materialized_len(&self) -> usize {
        self.materialized.len()
    }

    /// Every entry, regardless of what is shown; this is what search looks at.
    pub fn search_copies(&self) -> &[DesktopEntry] {
        &self.entries
    }

    /// Popped-up hook. Returns the rows that were appended.
    pub fn open(&mut self) -> Vec<&DesktopEntry> {
        if !matches!(self.state, SubmenuState::Collapsed | SubmenuState::Closed) {
            return Vec::new();
        }
        let mut added = Vec::new();
        for index in self.limit..self.entries.len() {
            let name = &self.entries[index].name;
            let present = self
                .materialized
                .iter()
                .any(|&i| self.entries[i].name == *name);
            if !present {
                self.materialized.push(index);
                added.push(index);
            }
        }
        self.state = SubmenuState::Expanded;
        debug!("Submenu expanded by {} rows", added.len());
        added.into_iter().map(|i| &self.entries[i]).collect()
    }

    /// Hide hook. Returns how many rows were removed.
    pub fn close(&mut self) -> usize {
        if self.state != SubmenuState::Expanded {
            return 0;
        }
        let removed = self.materialized.len().saturating_sub(self.limit);
        self.materialized.truncate(self.limit);
        self.state = SubmenuState::Closed;
        removed
    }
}

/// Submenu windows keyed by category, owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct Submenus {
    windows: BTreeMap<Category, SubmenuWindow>,
}

impl Submenus {
    pub fn new(catalog: &Catalog, limit: usize, workaround: bool) -> Self {
        let windows = catalog
            .categories()
            .map(|(category, list)| (category, SubmenuWindow::new(list.to_vec(), limit, workaround)))
            .collect();
        Self { windows }
    }

    pub fn get(&self, category: Category) -> Option<&SubmenuWindow> {
        self.windows.get(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &SubmenuWindow)> {
        self.windows.iter().map(|(c, w)| (*c, w))
    }

    pub fn open(&mut self, category: Category) -> Vec<&DesktopEntry> {
        match self.windows.get_mut(&category) {
            Some(window) => window.open(),
            None => Vec::new(),
        }
    }

    pub fn close(&mut self, category: Category) -> usize {
        self.windows
            .get_mut(&category)
            .map(SubmenuWindow::close)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<DesktopEntry> {
        (0..n)
            .map(|i| DesktopEntry::new(&format!("App {:02}", i), &format!("app{}", i), ""))
            .collect()
    }

    #[test]
    fn long_submenu_expands_and_collapses() {
        let mut window = SubmenuWindow::new(entries(50), 30, true);
        assert_eq!(window.state(), SubmenuState::Collapsed);
        assert_eq!(window.materialized_len(), 30);
        assert_eq!(window.search_copies().len(), 50);

        assert_eq!(window.open().len(), 20);
        assert_eq!(window.materialized_len(), 50);
        assert_eq!(window.state(), SubmenuState::Expanded);
        assert!(window.open().is_empty());

        assert_eq!(window.close(), 20);
        assert_eq!(window.materialized_len(), 30);
        assert_eq!(window.state(), SubmenuState::Closed);

        assert_eq!(window.open().len(), 20);
        assert_eq!(window.materialized_len(), 50);
    }

    #[test]
    fn short_or_unpatched_submenus_are_static() {
        let mut short = SubmenuWindow::new(entries(30), 30, true);
        assert_eq!(short.state(), SubmenuState::Static);
        assert!(short.open().is_empty());
        assert_eq!(short.close(), 0);
        assert_eq!(short.materialized_len(), 30);

        let unpatched = SubmenuWindow::new(entries(50), 30, false);
        assert_eq!(unpatched.state(), SubmenuState::Static);
        assert_eq!(unpatched.materialized_len(), 50);
    }

    #[test]
    fn expansion_skips_names_already_shown() {
        let mut list = entries(4);
        list.push(DesktopEntry::new("App 00", "other", ""));
        let mut window = SubmenuWindow::new(list, 2, true);
        let added: Vec<&str> = window.open().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(added, vec!["App 02", "App 03"]);
    }

    #[test]
    fn submenus_follow_catalog_categories() {
        let catalog = Catalog::new(
            entries(40)
                .into_iter()
                .map(|e| e.with_categories(&["Game"]))
                .collect(),
        );
        let mut submenus = Submenus::new(&catalog, 30, true);
        assert_eq!(submenus.iter().count(), 1);
        assert_eq!(submenus.open(Category::Game).len(), 10);
        assert!(submenus.open(Category::Office).is_empty());
        assert_eq!(submenus.close(Category::Game), 10);
        assert_eq!(submenus.get(Category::Game).map(|w| w.materialized_len()), Some(30));
    }
}
