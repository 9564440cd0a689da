use std::io;

use tracing::{debug, warn};

use common::{
    maze::{MAX_SIZE, MIN_SIZE, maker},
    store::MazeStore,
};

use crate::{
    menu::{self, MenuItem},
    session::Session,
    ui::MazeUi,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run(
    ui: &mut dyn MazeUi,
    session: &mut Session,
    store: &MazeStore,
    default_size: usize,
) -> io::Result<()> {
    loop {
        show_menu(ui);

        let Some(line) = ui.ask("> ")? else {
            break;
        };

        let Some(item) = menu::parse_choice(&line) else {
            ui.show_error(&format!("Unknown choice '{}'.", line.trim()));
            continue;
        };

        debug!(?item, "menu choice");
        if handle(item, ui, session, store, default_size)? == Flow::Quit {
            break;
        }
    }

    ui.show_message("Goodbye.");
    Ok(())
}

fn show_menu(ui: &mut dyn MazeUi) {
    ui.show_message("");
    for line in menu::lines() {
        ui.show_message(&line);
    }
}

pub fn handle(
    item: MenuItem,
    ui: &mut dyn MazeUi,
    session: &mut Session,
    store: &MazeStore,
    default_size: usize,
) -> io::Result<Flow> {
    match item {
        MenuItem::Create => {
            let Some(size) = prompt_size(ui, default_size)? else {
                return Ok(Flow::Quit);
            };
            match session.create(size) {
                Ok(maze) => ui.draw_maze(maze),
                Err(e) => ui.show_error(&e.to_string()),
            }
        }
        MenuItem::Show => match session.current() {
            Some(maze) => ui.draw_maze(maze),
            None => ui.show_error("No maze has been created yet."),
        },
        MenuItem::Escape => match session.escape() {
            Ok(maze) => ui.draw_maze(maze),
            Err(e) => {
                if e.is_structural() {
                    warn!("{e}");
                }
                ui.show_error(&e.to_string());
            }
        },
        MenuItem::Unmark => match session.unmark() {
            Ok(maze) => ui.draw_maze(maze),
            Err(e) => ui.show_error(&e.to_string()),
        },
        MenuItem::Save => {
            let maze = match session.snapshot() {
                Ok(maze) => maze,
                Err(e) => {
                    ui.show_error(&e.to_string());
                    return Ok(Flow::Continue);
                }
            };
            let Some(name) = ui.ask("Name: ")? else {
                return Ok(Flow::Quit);
            };
            match store.save(&name, &maze) {
                Ok(path) => ui.show_message(&format!("Saved to {}.", path.display())),
                Err(e) => ui.show_error(&e.to_string()),
            }
        }
        MenuItem::Load => {
            show_saved(ui, store);
            let Some(name) = ui.ask("Name: ")? else {
                return Ok(Flow::Quit);
            };
            match store.load(&name) {
                Ok(maze) => {
                    let maze = session.replace(maze);
                    ui.draw_maze(maze);
                }
                Err(e) => ui.show_error(&e.to_string()),
            }
        }
        MenuItem::List => show_saved(ui, store),
        MenuItem::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

/// Keep asking until the size is valid. An empty answer takes the default.
fn prompt_size(ui: &mut dyn MazeUi, default_size: usize) -> io::Result<Option<usize>> {
    let prompt = format!("Size (odd, {MIN_SIZE}-{MAX_SIZE}) [{default_size}]: ");

    loop {
        let Some(answer) = ui.ask(&prompt)? else {
            return Ok(None);
        };
        let answer = answer.trim();

        if answer.is_empty() {
            return Ok(Some(default_size));
        }

        match answer.parse::<usize>() {
            Ok(size) => match maker::validate_size(size) {
                Ok(size) => return Ok(Some(size)),
                Err(e) => ui.show_error(&e.to_string()),
            },
            Err(_) => ui.show_error(&format!("'{}' is not a number.", answer)),
        }
    }
}

fn show_saved(ui: &mut dyn MazeUi, store: &MazeStore) {
    match store.list() {
        Ok(names) if names.is_empty() => ui.show_message("No saved mazes."),
        Ok(names) => ui.show_message(&format!("Saved mazes: {}", names.join(", "))),
        Err(e) => ui.show_error(&e.to_string()),
    }
}
