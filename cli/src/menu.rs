use std::str::FromStr;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum MenuItem {
    Create,
    Show,
    Escape,
    Unmark,
    Save,
    Load,
    List,
    Quit,
}

impl MenuItem {
    pub fn description(self) -> &'static str {
        match self {
            MenuItem::Create => "build a new maze",
            MenuItem::Show => "draw the current maze",
            MenuItem::Escape => "mark the way out",
            MenuItem::Unmark => "clear the marked way out",
            MenuItem::Save => "save the current maze",
            MenuItem::Load => "load a saved maze",
            MenuItem::List => "list saved mazes",
            MenuItem::Quit => "leave",
        }
    }
}

/// Accepts the 1-based number shown in the menu or the item's name.
pub fn parse_choice(input: &str) -> Option<MenuItem> {
    let trimmed = input.trim();

    if let Ok(number) = trimmed.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| MenuItem::iter().nth(index));
    }

    MenuItem::from_str(trimmed).ok()
}

pub fn lines() -> Vec<String> {
    MenuItem::iter()
        .enumerate()
        .map(|(i, item)| format!("  {}. {:<7} {}", i + 1, item, item.description()))
        .collect()
}
