mod game;
mod home;

use serde::{Deserialize, Serialize};
use strum::Display;

pub use crate::action::game::GameAction;
pub use crate::action::home::HomeAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize, Default)]
pub enum ActionState {
    #[default]
    Start,
    Repeat,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Command {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Refresh,
    Error(String),
    ToggleShowHelp,
    StartGame,
    BackHome,
    // Page actions
    Home(HomeAction),
    Game(GameAction),
}

impl Command {
    /// Human-readable name, unwrapping page actions for the help overlay.
    pub fn string(&self) -> String {
        match self {
            Command::Home(action) => action.to_string(),
            Command::Game(action) => action.to_string(),
            _ => self.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub command: Command,
    pub state: ActionState,
}

macro_rules! act {
    ($command:expr) => {
        Action { command: $command, state: ActionState::default() }
    };
    ($command:expr, $state:expr) => {
        Action { command: $command, state: $state }
    };
}

pub(crate) use act;
