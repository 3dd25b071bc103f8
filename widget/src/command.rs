//! Line commands for the terminal driver.
//!
//! Each command is resolved against the currently rendered view, the way a
//! user would act on what they see: `done 2` clicks the "done" button of the
//! second entry in the ready list.

use crate::events;
use crate::types::TodoAction;
use crate::view::{COMPLETED_LIST, DONE, FORM_LABEL, MOVE_BACK, READY_LIST, REMOVE};
use std::str::FromStr;
use thiserror::Error;
use todo_widget_core::view::{Element, Role};

/// Usage text printed by `help`
pub const HELP: &str = "\
commands:
  type <text>   replace the input's contents
  clear         empty the input
  submit        submit the form
  add <text>    type then submit
  done <n>      complete the n-th ready item
  back <n>      move the n-th completed item back to ready
  remove <n>    delete the n-th completed item
  show          print the view
  help          print this text
  quit          unmount and exit";

/// Errors from parsing or resolving a command
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a command
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),

    /// A required argument is absent
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    /// A position was not a positive integer
    #[error("{0:?} is not a list position")]
    InvalidPosition(String),

    /// Nothing is rendered at that position
    #[error("no item {position} in the {list} list")]
    NoSuchItem {
        /// Which list was addressed
        list: &'static str,
        /// 1-based position requested
        position: usize,
    },
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the draft
    Type(String),
    /// Empty the draft
    Clear,
    /// Submit the form
    Submit,
    /// Type then submit
    Add(String),
    /// Complete a ready item (1-based)
    Done(usize),
    /// Move a completed item back (1-based)
    Back(usize),
    /// Remove a completed item (1-based)
    Remove(usize),
    /// Print the view
    Show,
    /// Print usage
    Help,
    /// Unmount and exit
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(' ').unwrap_or((line.trim_end(), ""));

        match word {
            "type" => Ok(Self::Type(rest.to_string())),
            "clear" => Ok(Self::Clear),
            "submit" => Ok(Self::Submit),
            "add" if rest.is_empty() => Err(CommandError::MissingArgument("add")),
            "add" => Ok(Self::Add(rest.to_string())),
            "done" => position("done", rest).map(Self::Done),
            "back" => position("back", rest).map(Self::Back),
            "remove" => position("remove", rest).map(Self::Remove),
            "show" | "" => Ok(Self::Show),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn position(command: &'static str, raw: &str) -> Result<usize, CommandError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidPosition(raw.to_string())),
    }
}

impl Command {
    /// Actions this command dispatches against the rendered `view`
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NoSuchItem`] if a position does not address a
    /// rendered entry.
    pub fn actions(&self, view: &Element) -> Result<Vec<TodoAction>, CommandError> {
        let actions = match self {
            Self::Type(text) => vec![events::input(text.as_str())],
            Self::Clear => vec![events::input("")],
            Self::Submit => submit_form(view).into_iter().collect(),
            Self::Add(text) => std::iter::once(events::input(text.as_str()))
                .chain(submit_form(view))
                .collect(),
            Self::Done(n) => click_in(view, READY_LIST, "ready", *n, DONE)?,
            Self::Back(n) => click_in(view, COMPLETED_LIST, "completed", *n, MOVE_BACK)?,
            Self::Remove(n) => click_in(view, COMPLETED_LIST, "completed", *n, REMOVE)?,
            Self::Show | Self::Help | Self::Quit => Vec::new(),
        };
        Ok(actions)
    }
}

fn submit_form(view: &Element) -> Option<TodoAction> {
    view.find(|e| e.label.as_deref() == Some(FORM_LABEL))
        .and_then(events::submit)
}

fn click_in(
    view: &Element,
    test_id: &str,
    list: &'static str,
    position: usize,
    label: &str,
) -> Result<Vec<TodoAction>, CommandError> {
    let missing = CommandError::NoSuchItem { list, position };

    let entries = view
        .find(|e| e.test_id.as_deref() == Some(test_id))
        .map(|rendered| rendered.find_all(|e| e.role() == Some(Role::ListItem)))
        .unwrap_or_default();
    let entry = position
        .checked_sub(1)
        .and_then(|index| entries.get(index))
        .ok_or(missing)?;

    Ok(entry
        .find(|e| e.label.as_deref() == Some(label))
        .and_then(events::click)
        .into_iter()
        .collect())
}
