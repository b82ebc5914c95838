use anyhow::Result;
use clap::ValueEnum;
use log::{info, warn};
use crate::catalog::Catalog;
use crate::category::Category;
use crate::config::Config;
use crate::error::MenuError;
use crate::executor::Launcher;
use crate::input::InputEvent;
use crate::model::{DesktopEntry, Item};
use crate::search::SearchState;
use crate::sources::history::History;
use crate::submenu::Submenus;

/// Launcher flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Category menu with optional favourites and appendix.
    Menu,
    /// Executables from `$PATH`.
    Dmenu,
    /// Icon grid of all applications.
    Grid,
    /// Buttons for the appendix items only.
    Bar,
}

/// Run-time switches resolved from config and command line.
#[derive(Debug, Clone)]
pub struct Options {
    pub mode: Mode,
    pub favourites: usize,
    pub line_limit: usize,
    pub append: bool,
    pub no_menu: bool,
    pub workaround: bool,
}

impl Options {
    pub fn from_config(config: &Config, mode: Mode) -> Self {
        Self {
            mode,
            favourites: config.general.favourites,
            line_limit: config.general.line_limit,
            append: false,
            no_menu: false,
            workaround: false,
        }
    }
}

pub struct AppState {
    pub config: Config,
    pub options: Options,
    pub catalog: Catalog,
    pub history: History,
    pub favourites: Vec<DesktopEntry>,
    pub submenus: Submenus,
    pub search: SearchState,
    /// Position in [`AppState::visible`], if anything is highlighted.
    pub selected_index: Option<usize>,
    pub should_exit: bool,
    candidates: Vec<Item>,
    /// Appendix rows under the dmenu list; shown while idle, never searched.
    trailer: Vec<Item>,
}

impl AppState {
    /// `commands` are the `$PATH` executables, only used in dmenu mode.
    pub fn new(config: Config, options: Options, catalog: Catalog, commands: Vec<String>, history: History) -> Self {
        let favourites = match options.mode {
            Mode::Menu | Mode::Grid if !options.no_menu => catalog.favourites(&history, options.favourites),
            _ => Vec::new(),
        };
        let submenus = match options.mode {
            Mode::Menu if !options.no_menu => Submenus::new(&catalog, options.line_limit, options.workaround),
            _ => Submenus::default(),
        };

        let mut candidates: Vec<Item> = Vec::new();
        let mut trailer: Vec<Item> = Vec::new();
        match options.mode {
            Mode::Menu if !options.no_menu => {
                candidates.extend(favourites.iter().cloned().map(Item::Catalog));
                for (_, window) in submenus.iter() {
                    candidates.extend(window.search_copies().iter().cloned().map(Item::Catalog));
                }
            }
            Mode::Grid => {
                candidates.extend(catalog.sorted_entries().into_iter().map(Item::Catalog));
            }
            Mode::Dmenu => {
                candidates.extend(commands.into_iter().map(Item::Command));
            }
            Mode::Menu | Mode::Bar => {}
        }
        let appendix = catalog.appendix().iter().cloned().map(Item::Appendix);
        if options.no_menu || options.mode == Mode::Bar {
            candidates.extend(appendix);
        } else if options.append {
            match options.mode {
                Mode::Menu => candidates.extend(appendix),
                Mode::Dmenu => trailer.extend(appendix),
                Mode::Grid | Mode::Bar => {}
            }
        }

        let mut state = Self {
            config,
            options,
            catalog,
            history,
            favourites,
            submenus,
            search: SearchState::default(),
            selected_index: None,
            should_exit: false,
            candidates,
            trailer,
        };
        state.update_filter();
        state
    }

    /// Custom menus and the bar are never searched.
    pub fn is_searchable(&self) -> bool {
        !self.options.no_menu && self.options.mode != Mode::Bar
    }

    #[cfg(test)]
    pub fn candidates(&self) -> &[Item] {
        &self.candidates
    }

    /// Items on screen: matches while searching, the whole scope otherwise.
    ///
    /// dmenu shows only the first `line_limit` commands until something is typed.
    pub fn visible(&self) -> Vec<&Item> {
        if self.search.is_active() {
            return self.search.matches.iter().map(|&i| &self.candidates[i]).collect();
        }
        if self.options.mode == Mode::Dmenu {
            return self
                .candidates
                .iter()
                .take(self.options.line_limit)
                .chain(&self.trailer)
                .collect();
        }
        self.candidates.iter().collect()
    }

    #[cfg(test)]
    pub fn update_query(&mut self, query: &str) {
        self.search.query = query
            .chars()
            .filter(|&c| self.config.search.accepts(c))
            .collect();
        self.update_filter();
    }

    pub fn update_filter(&mut self) {
        self.search.refresh(&self.config.search, &self.candidates);
        self.selected_index = self.search.preselected().map(|_| 0);
    }

    pub fn move_selection(&mut self, delta: i32) {
        let len = self.visible().len() as i32;
        if len == 0 {
            self.selected_index = None;
            return;
        }
        let current = self.selected_index.map(|i| i as i32).unwrap_or(-1);
        let start = if current < 0 && delta < 0 { 0 } else { current };
        self.selected_index = Some((start + delta).rem_euclid(len) as usize);
    }

    pub fn get_selected(&self) -> Option<&Item> {
        self.selected_index
            .and_then(|i| self.visible().get(i).copied())
    }

    pub fn handle_event(&mut self, event: InputEvent, launcher: &mut dyn Launcher) -> Result<()> {
        match event {
            InputEvent::Char(c) if self.is_searchable() => {
                if self.search.push(c, &self.config.search) {
                    self.update_filter();
                }
            }
            InputEvent::Backspace if self.is_searchable() => {
                if self.search.pop() {
                    self.update_filter();
                }
            }
            InputEvent::Escape => {
                if self.search.clear() {
                    self.update_filter();
                } else {
                    self.should_exit = true;
                }
            }
            InputEvent::Up => self.move_selection(-1),
            InputEvent::Down => self.move_selection(1),
            InputEvent::Enter => {
                if let Some(item) = self.get_selected().cloned() {
                    self.activate(&item, launcher)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Records the launch for catalog items, then starts the command.
    ///
    /// A cache write failure only costs the count; the command still runs.
    pub fn activate(&mut self, item: &Item, launcher: &mut dyn Launcher) -> Result<()> {
        if item.records_usage() {
            if let Err(e) = self.history.increment_usage(item.command()) {
                warn!("Could not save usage cache: {}", e);
            }
        }
        launcher.launch(item.command())?;
        self.should_exit = true;
        Ok(())
    }

    /// Activates the first visible item labelled `name` (case-insensitive).
    pub fn launch_by_name(&mut self, name: &str, launcher: &mut dyn Launcher) -> Result<()> {
        let wanted = name.to_lowercase();
        let item = self
            .candidates
            .iter()
            .chain(&self.trailer)
            .find(|item| item.label().to_lowercase() == wanted)
            .cloned()
            .ok_or_else(|| MenuError::UnknownItem(name.to_string()))?;
        info!("Activating {}", item.label());
        self.activate(&item, launcher)
    }

    pub fn submenu_opened(&mut self, category: Category) -> usize {
        self.submenus.open(category).len()
    }

    pub fn submenu_closed(&mut self, category: Category) -> usize {
        self.submenus.close(category)
    }
}
