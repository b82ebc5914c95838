mod catalog;
mod category;
mod config;
mod error;
mod executor;
mod icons;
mod input;
mod locale;
mod model;
mod search;
mod sources;
mod state;
mod submenu;
mod wm;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use log::{debug, warn};
use xkeysym::Keysym;
use crate::catalog::Catalog;
use crate::category::{Category, CategoryLabels};
use crate::config::load_config;
use crate::executor::ShellLauncher;
use crate::icons::{IconRef, IconResolver, PLACEHOLDER_ICON};
use crate::input::InputEvent;
use crate::locale::Locale;
use crate::model::Item;
use crate::sources::{Source, data_dirs, path_dirs};
use crate::sources::appendix::AppendixSource;
use crate::sources::bin::BinSource;
use crate::sources::desktop::{DesktopSource, Requirement};
use crate::sources::history::{self, History};
use crate::state::{AppState, Mode, Options};
use crate::wm::WindowManager;

#[derive(Parser, Debug)]
#[command(author, version, about = "Application menu for sway and i3", long_about = None)]
struct Args {
    /// Launcher flavour
    #[arg(short, long, value_enum, default_value_t = Mode::Menu)]
    mode: Mode,

    /// Prepend the 5 most used items
    #[arg(short, long)]
    favourites: bool,

    /// Prepend <FN> most used items
    #[arg(long = "fn", value_name = "FN", conflicts_with = "favourites")]
    favourites_number: Option<usize>,

    /// Append the custom menu from the appendix file
    #[arg(short, long)]
    append: bool,

    /// Append the custom menu from <AF> in the config directory
    #[arg(long = "af", value_name = "AF", conflicts_with = "append")]
    append_file: Option<String>,

    /// Skip the application menu, show the appendix only
    #[arg(short, long)]
    no_menu: bool,

    /// Force language (e.g. "de" for German)
    #[arg(short, long)]
    lang: Option<String>,

    /// Lines limit for long submenus and the dmenu list
    #[arg(short = 't', long)]
    lines: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print what the launcher would show
    List,
    /// Type a query and print the matches
    Search {
        query: String,
        /// Press Enter afterwards, launching a lone match
        #[arg(long)]
        enter: bool,
    },
    /// Launch an item by its label
    Launch { name: String },
    /// Pop a category submenu up and down again, printing its rows each time
    Open { category: Category },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // 1. Load Config
    let config = load_config()?;
    let locale = Locale::detect(args.lang.as_deref().or(config.general.lang.as_deref()));
    let data_dirs = data_dirs();
    debug!("Language: {}", locale.lang());

    let mut options = Options::from_config(&config, args.mode);
    if args.favourites {
        options.favourites = 5;
    } else if let Some(n) = args.favourites_number {
        options.favourites = n;
    }
    if let Some(lines) = args.lines {
        options.line_limit = lines;
    }
    options.append = args.append || args.append_file.is_some();
    options.no_menu = args.no_menu;
    options.workaround = config.overflow.workaround.is_active(WindowManager::detect());

    // 2. Scan sources needed by the mode
    let wants_entries = matches!(args.mode, Mode::Menu | Mode::Grid) && !options.no_menu;
    let entries = if wants_entries {
        let requirement = if args.mode == Mode::Grid { Requirement::Icon } else { Requirement::Categories };
        DesktopSource::new(data_dirs.clone(), locale.clone(), requirement)
            .scan()
            .unwrap_or_default()
    } else {
        Vec::new()
    };
    let mut catalog = Catalog::with_blacklist(entries, &config.blacklist);

    if options.append || options.no_menu || args.mode == Mode::Bar {
        let source = AppendixSource::new(config.appendix_path(args.append_file.as_deref()));
        if let Err(e) = source.ensure_default() {
            warn!("Could not create default appendix: {}", e);
        }
        catalog.set_appendix(source.scan().unwrap_or_default());
    }

    let commands = if args.mode == Mode::Dmenu {
        BinSource::new(path_dirs()).scan().unwrap_or_default()
    } else {
        Vec::new()
    };

    let history = History::load(history::get_history_path());
    let labels = if args.mode == Mode::Menu {
        CategoryLabels::load(&data_dirs, &locale)
    } else {
        CategoryLabels::default()
    };
    let icons = IconResolver::new(&data_dirs);

    // 3. Init State
    let mut app = AppState::new(config, options, catalog, commands, history);
    let mut launcher = ShellLauncher;

    match args.command.unwrap_or(Command::List) {
        Command::List => print_overview(&app, &labels, &icons),
        Command::Search { query, enter } => {
            for text in query.chars().map(String::from) {
                let event = InputEvent::from_key(Keysym::NoSymbol, Some(&text), false);
                app.handle_event(event, &mut launcher)?;
            }
            print_items(&app, &icons);
            if enter {
                app.handle_event(InputEvent::Enter, &mut launcher)?;
            }
        }
        Command::Launch { name } => app.launch_by_name(&name, &mut launcher)?,
        Command::Open { category } => open_submenu(&mut app, category, &labels, &icons)?,
    }

    Ok(())
}

fn icon_column(item: &Item, icons: &IconResolver, mode: Mode) -> String {
    let resolved = item.icon().map(|icon| icons.resolve(icon)).unwrap_or(IconRef::Placeholder);
    match resolved {
        IconRef::File(path) => path.display().to_string(),
        IconRef::Themed(name) => name,
        IconRef::Placeholder if matches!(mode, Mode::Grid | Mode::Bar) => PLACEHOLDER_ICON.to_string(),
        IconRef::Placeholder => "-".to_string(),
    }
}

fn print_item(item: &Item, icons: &IconResolver, mode: Mode, marker: &str) {
    let hint = item.comment().unwrap_or(item.command());
    println!("{}{}\t{}\t{}", marker, item.label(), hint, icon_column(item, icons, mode));
}

fn print_items(app: &AppState, icons: &IconResolver) {
    let selected = app.get_selected();
    for item in app.visible() {
        let marker = if selected == Some(item) { "* " } else { "  " };
        print_item(item, icons, app.options.mode, marker);
    }
}

fn print_overview(app: &AppState, labels: &CategoryLabels, icons: &IconResolver) {
    let mode = app.options.mode;
    if mode != Mode::Menu || app.options.no_menu {
        for item in &app.favourites {
            print_item(&Item::Catalog(item.clone()), icons, mode, "+ ");
        }
        print_items(app, icons);
        return;
    }

    for entry in &app.favourites {
        print_item(&Item::Catalog(entry.clone()), icons, mode, "+ ");
    }
    for (category, window) in app.submenus.iter() {
        println!(
            "[{}] ({}, {} of {} shown)",
            labels.label(category),
            category.icon(),
            window.materialized_len(),
            window.search_copies().len()
        );
        for entry in window.materialized() {
            print_item(&Item::Catalog(entry.clone()), icons, mode, "  ");
        }
    }
    for entry in app.catalog.appendix() {
        print_item(&Item::Appendix(entry.clone()), icons, mode, "= ");
    }
}

fn print_submenu(app: &AppState, category: Category, labels: &CategoryLabels, icons: &IconResolver) {
    let Some(window) = app.submenus.get(category) else {
        return;
    };
    println!("[{}] {:?}, {} rows", labels.label(category), window.state(), window.materialized_len());
    for entry in window.materialized() {
        print_item(&Item::Catalog(entry.clone()), icons, app.options.mode, "  ");
    }
}

fn open_submenu(app: &mut AppState, category: Category, labels: &CategoryLabels, icons: &IconResolver) -> Result<()> {
    if app.catalog.category(category).is_empty() {
        bail!("No applications in {}", category);
    }
    if app.submenus.get(category).is_none() {
        bail!("Submenus only exist in menu mode");
    }
    print_submenu(app, category, labels, icons);

    let added = app.submenu_opened(category);
    debug!("Opened {}: {} rows appended", category, added);
    print_submenu(app, category, labels, icons);

    let removed = app.submenu_closed(category);
    debug!("Closed {}: {} rows removed", category, removed);
    print_submenu(app, category, labels, icons);
    Ok(())
}
