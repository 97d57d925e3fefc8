use std::fmt;
use std::sync::Arc;

use super::board::Cell;
use crate::chooser::MoveChooser;

/// The side marker a participant plays with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Red,
    Yellow,
}

impl Token {
    /// Get the other token
    pub fn other(self) -> Token {
        match self {
            Token::Red => Token::Yellow,
            Token::Yellow => Token::Red,
        }
    }

    /// Convert token to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Token::Red => Cell::Red,
            Token::Yellow => Cell::Yellow,
        }
    }

    /// Get token name for display
    pub fn name(self) -> &'static str {
        match self {
            Token::Red => "Red",
            Token::Yellow => "Yellow",
        }
    }
}

/// How a participant picks its moves.
#[derive(Clone)]
pub enum Controller {
    /// Waits for an external column selection, with no deadline.
    Interactive,
    /// Computed by a chooser under the configured move timeout.
    Computed(Arc<dyn MoveChooser>),
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Controller::Interactive => f.write_str("Interactive"),
            Controller::Computed(chooser) => write!(f, "Computed({})", chooser.name()),
        }
    }
}

/// One of the two players of a session.
#[derive(Debug, Clone)]
pub struct Participant {
    name: String,
    token: Token,
    controller: Controller,
}

impl Participant {
    /// A participant driven by external column selections.
    pub fn interactive(name: impl Into<String>) -> Self {
        Participant {
            name: name.into(),
            token: Token::Red,
            controller: Controller::Interactive,
        }
    }

    /// A participant whose moves come from `chooser`.
    pub fn computed(name: impl Into<String>, chooser: Arc<dyn MoveChooser>) -> Self {
        Participant {
            name: name.into(),
            token: Token::Red,
            controller: Controller::Computed(chooser),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> Token {
        self.token
    }

    /// Tokens are assigned by the game when a session (re)starts.
    pub(crate) fn set_token(&mut self, token: Token) {
        self.token = token;
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self.controller, Controller::Interactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chooser::RandomChooser;

    #[test]
    fn test_other_token() {
        assert_eq!(Token::Red.other(), Token::Yellow);
        assert_eq!(Token::Yellow.other(), Token::Red);
    }

    #[test]
    fn test_token_name() {
        assert_eq!(Token::Red.name(), "Red");
        assert_eq!(Token::Yellow.name(), "Yellow");
    }

    #[test]
    fn test_token_to_cell() {
        assert_eq!(Token::Red.to_cell(), Cell::Red);
        assert_eq!(Token::Yellow.to_cell(), Cell::Yellow);
    }

    #[test]
    fn test_participant_kinds() {
        let human = Participant::interactive("Alice");
        let bot = Participant::computed("Bot", Arc::new(RandomChooser::new()));
        assert!(human.is_interactive());
        assert!(!bot.is_interactive());
        assert_eq!(bot.name(), "Bot");
        assert_eq!(format!("{:?}", bot.controller()), "Computed(Random)");
    }
}
