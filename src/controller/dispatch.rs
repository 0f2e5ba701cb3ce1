use std::collections::HashMap;

use crate::view::page::{ActionKind, ClickTarget, Field};

/// Raw events coming from the host surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Input { field: Field, value: String },
    Submit,
    Click(ClickTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Edit(Field, String),
    Shorten,
    Delete(String),
    Copy(String),
}

pub type ActionHandler = fn(String) -> Command;

/// Routes interactions to commands. Clicks are matched on the target's
/// action marker; the marker's identifier is handed to the bound handler.
#[derive(Debug, Default)]
pub struct Dispatcher {
    submit_bound: bool,
    actions: HashMap<ActionKind, ActionHandler>,
}

impl Dispatcher {
    pub fn bind_submit(&mut self) {
        self.submit_bound = true;
    }

    pub fn bind_action(&mut self, kind: ActionKind, handler: ActionHandler) {
        self.actions.insert(kind, handler);
    }

    pub fn route(&self, interaction: Interaction) -> Option<Command> {
        match interaction {
            Interaction::Input { field, value } => Some(Command::Edit(field, value)),
            Interaction::Submit => self.submit_bound.then_some(Command::Shorten),
            Interaction::Click(ClickTarget { action, code }) => {
                let handler = self.actions.get(&action?)?;
                let code = code.filter(|c| !c.is_empty())?;
                Some(handler(code))
            }
        }
    }
}
