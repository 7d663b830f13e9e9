use crate::domain::{CardId, ColumnId};
use std::fmt;

/// An action that loses data and needs the user's consent first
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestructiveAction {
    DeleteColumn(ColumnId),
    DeleteCard(CardId),
    ResetBoard,
}

impl DestructiveAction {
    /// Question to put to the user
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::DeleteColumn(_) => "Delete column and all cards?",
            Self::DeleteCard(_) => "Delete this card?",
            Self::ResetBoard => "Reset board to default? This will erase current board.",
        }
    }
}

impl fmt::Display for DestructiveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteColumn(id) => write!(f, "delete column {}", id),
            Self::DeleteCard(id) => write!(f, "delete card {}", id),
            Self::ResetBoard => write!(f, "reset board"),
        }
    }
}

/// Answers whether a destructive action may go ahead.
///
/// Implemented by whatever presents the board; the store asks and never
/// blocks on a dialog itself.
pub trait Confirm {
    fn confirm(&self, action: &DestructiveAction) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&DestructiveAction) -> bool,
{
    fn confirm(&self, action: &DestructiveAction) -> bool {
        self(action)
    }
}

/// Approves everything, for scripted use
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _action: &DestructiveAction) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts() {
        assert_eq!(
            DestructiveAction::DeleteCard(CardId::from("c_1")).prompt(),
            "Delete this card?"
        );
        assert_eq!(
            DestructiveAction::DeleteColumn(ColumnId::from("col_1")).prompt(),
            "Delete column and all cards?"
        );
    }

    #[test]
    fn test_closure_confirm() {
        let only_cards =
            |action: &DestructiveAction| matches!(action, DestructiveAction::DeleteCard(_));

        assert!(only_cards.confirm(&DestructiveAction::DeleteCard(CardId::from("c_1"))));
        assert!(!only_cards.confirm(&DestructiveAction::ResetBoard));
        assert!(AlwaysConfirm.confirm(&DestructiveAction::ResetBoard));
    }

    #[test]
    fn test_display() {
        let action = DestructiveAction::DeleteColumn(ColumnId::from("col_9"));
        assert_eq!(action.to_string(), "delete column col_9");
    }
}
