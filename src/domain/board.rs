use crate::domain::{
    card::{non_blank, Card, CardId, CardPatch},
    fields,
    ids::IdGenerator,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};
use tracing::warn;

/// Opaque identifier of a column, unique within the board
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnId(String);

impl ColumnId {
    pub(crate) const PREFIX: &'static str = "col";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for ColumnId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered bucket of cards; earlier cards rank higher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default, deserialize_with = "fields::lenient_id")]
    pub id: ColumnId,
    #[serde(default, deserialize_with = "fields::lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "fields::lenient_seq")]
    pub cards: Vec<Card>,
}

impl Column {
    pub const FALLBACK_TITLE: &'static str = "New Column";

    /// Creates an empty column, falling back to a default title when blank
    pub fn new(id: ColumnId, title: &str) -> Self {
        Self {
            id,
            title: non_blank(title).unwrap_or_else(|| Self::FALLBACK_TITLE.to_string()),
            cards: Vec::new(),
        }
    }

    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    pub fn find_card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn position_of(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| &card.id == id)
    }
}

/// The whole kanban board: an ordered sequence of columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    pub const SEED_CARD_TITLE: &'static str = "Welcome to Kanban";

    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// The starter board: "Todo" with one sample card, then empty "Doing" and "Done"
    pub fn seeded(ids: &mut dyn IdGenerator) -> Self {
        let todo = Column::new(ids.next_column_id(), "Todo").with_card(
            Card::new(ids.next_card_id(), Self::SEED_CARD_TITLE)
                .with_description("Drag me to other columns")
                .with_tag("demo"),
        );
        let doing = Column::new(ids.next_column_id(), "Doing");
        let done = Column::new(ids.next_column_id(), "Done");

        Self::new(vec![todo, doing, done])
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|col| col.cards.len()).sum()
    }

    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    fn find_column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|col| &col.id == id)
    }

    /// Linear lookup across all columns; first match wins
    pub fn find_card(&self, id: &CardId) -> Option<&Card> {
        self.columns.iter().find_map(|col| col.find_card(id))
    }

    fn find_card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.columns
            .iter_mut()
            .find_map(|col| col.cards.iter_mut().find(|card| &card.id == id))
    }

    /// The column currently holding the card
    pub fn column_of_card(&self, id: &CardId) -> Option<&Column> {
        self.columns.iter().find(|col| col.find_card(id).is_some())
    }

    /// Appends a new empty column
    pub fn add_column(&mut self, id: ColumnId, title: &str) {
        self.columns.push(Column::new(id, title));
    }

    /// Removes the column and its cards. Returns false if it was not present.
    pub fn remove_column(&mut self, id: &ColumnId) -> bool {
        let before = self.columns.len();
        self.columns.retain(|col| &col.id != id);
        self.columns.len() != before
    }

    /// Sets the title when `title` trims to something non-empty
    pub fn rename_column(&mut self, id: &ColumnId, title: &str) -> bool {
        let Some(title) = non_blank(title) else {
            return false;
        };
        match self.find_column_mut(id) {
            Some(col) if col.title != title => {
                col.title = title;
                true
            }
            _ => false,
        }
    }

    /// Inserts the card at the front of the column (newest first)
    pub fn add_card(&mut self, column_id: &ColumnId, card: Card) -> bool {
        match self.find_column_mut(column_id) {
            Some(col) => {
                col.cards.insert(0, card);
                true
            }
            None => false,
        }
    }

    /// Removes the card from whichever column holds it
    pub fn remove_card(&mut self, id: &CardId) -> bool {
        let before = self.card_count();
        for col in &mut self.columns {
            col.cards.retain(|card| &card.id != id);
        }
        self.card_count() != before
    }

    pub fn update_card(&mut self, id: &CardId, patch: &CardPatch) -> bool {
        match self.find_card_mut(id) {
            Some(card) => {
                let before = card.clone();
                card.apply(patch);
                *card != before
            }
            None => false,
        }
    }

    /// Makes a decoded board satisfy the model invariants.
    ///
    /// Blank titles get their fallback and blank or repeated identifiers are
    /// re-issued. Returns how many identifiers were replaced.
    pub fn normalize(&mut self, ids: &mut dyn IdGenerator) -> usize {
        let mut reissued = 0;
        let mut column_ids = HashSet::new();
        let mut card_ids = HashSet::new();

        for col in &mut self.columns {
            if col.id.is_blank() || !column_ids.insert(col.id.clone()) {
                let mut fresh = ids.next_column_id();
                while column_ids.contains(&fresh) {
                    fresh = ids.next_column_id();
                }
                warn!(old = %col.id, new = %fresh, "re-issuing column id");
                col.id = fresh.clone();
                column_ids.insert(fresh);
                reissued += 1;
            }
            col.title =
                non_blank(&col.title).unwrap_or_else(|| Column::FALLBACK_TITLE.to_string());

            for card in &mut col.cards {
                if card.id.is_blank() || !card_ids.insert(card.id.clone()) {
                    let mut fresh = ids.next_card_id();
                    while card_ids.contains(&fresh) {
                        fresh = ids.next_card_id();
                    }
                    warn!(old = %card.id, new = %fresh, "re-issuing card id");
                    card.id = fresh.clone();
                    card_ids.insert(fresh);
                    reissued += 1;
                }
                card.title =
                    non_blank(&card.title).unwrap_or_else(|| Card::FALLBACK_TITLE.to_string());
            }
        }

        reissued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::SequentialIds;

    fn board() -> Board {
        Board::seeded(&mut SequentialIds::new())
    }

    #[test]
    fn test_seeded_board() {
        let board = board();

        let titles: Vec<&str> = board.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Todo", "Doing", "Done"]);
        assert_eq!(board.columns[0].cards.len(), 1);
        assert!(board.columns[1].cards.is_empty());
        assert!(board.columns[2].cards.is_empty());

        let card = &board.columns[0].cards[0];
        assert_eq!(card.title, "Welcome to Kanban");
        assert_eq!(card.description, "Drag me to other columns");
        assert_eq!(card.tag, "demo");
    }

    #[test]
    fn test_add_card_goes_to_front() {
        let mut board = board();
        let todo = board.columns[0].id.clone();
        let previous = board.columns[0].cards.clone();

        assert!(board.add_card(&todo, Card::new(CardId::from("c_new"), "Newest")));

        let cards = &board.columns[0].cards;
        assert_eq!(cards[0].id.as_str(), "c_new");
        assert_eq!(&cards[1..], previous.as_slice());
    }

    #[test]
    fn test_missing_ids_are_no_ops() {
        let original = board();
        let mut board = original.clone();
        let ghost_col = ColumnId::from("col_ghost");
        let ghost_card = CardId::from("c_ghost");

        assert!(!board.remove_column(&ghost_col));
        assert!(!board.remove_card(&ghost_card));
        assert!(!board.update_card(&ghost_card, &CardPatch::new().title("x")));
        assert!(!board.add_card(&ghost_col, Card::new(CardId::from("c_x"), "x")));
        assert!(!board.rename_column(&ghost_col, "x"));

        assert_eq!(board, original);
    }

    #[test]
    fn test_remove_card_from_any_column() {
        let mut board = board();
        let card_id = board.columns[0].cards[0].id.clone();
        let done = board.columns[2].id.clone();
        board.remove_card(&card_id);
        board.add_card(&done, Card::new(card_id.clone(), "Moved"));

        assert!(board.remove_card(&card_id));
        assert_eq!(board.card_count(), 0);
    }

    #[test]
    fn test_rename_column() {
        let mut board = board();
        let id = board.columns[1].id.clone();

        assert!(!board.rename_column(&id, "   "));
        assert_eq!(board.columns[1].title, "Doing");

        assert!(board.rename_column(&id, " Sprint 1 "));
        assert_eq!(board.columns[1].title, "Sprint 1");
    }

    #[test]
    fn test_column_of_card() {
        let board = board();
        let card_id = board.columns[0].cards[0].id.clone();

        let col = board.column_of_card(&card_id).unwrap();
        assert_eq!(col.title, "Todo");
        assert_eq!(col.position_of(&card_id), Some(0));
        assert!(board.column_of_card(&CardId::from("nope")).is_none());
    }

    #[test]
    fn test_new_column_blank_title_falls_back() {
        let mut board = Board::default();
        board.add_column(ColumnId::from("col_a"), "  ");
        assert_eq!(board.columns[0].title, Column::FALLBACK_TITLE);
    }

    #[test]
    fn test_normalize_reissues_blank_and_duplicate_ids() {
        let mut board: Board = serde_json::from_str(
            r#"{"columns": [
                {"id": "col_a", "title": "  ", "cards": [{"id": "c_a", "title": "A"}]},
                {"id": "col_a", "title": "B", "cards": [{"id": "c_a", "title": ""}, {"title": "C"}]},
                {"title": "D", "cards": null}
            ]}"#,
        )
        .unwrap();

        let reissued = board.normalize(&mut SequentialIds::new());
        assert_eq!(reissued, 4);

        assert_eq!(board.columns[0].id.as_str(), "col_a");
        assert_eq!(board.columns[0].title, Column::FALLBACK_TITLE);
        assert_ne!(board.columns[1].id.as_str(), "col_a");
        assert_eq!(board.columns[1].cards[0].title, Card::FALLBACK_TITLE);
        assert_ne!(board.columns[1].cards[0].id.as_str(), "c_a");
        assert!(!board.columns[1].cards[1].id.as_str().is_empty());
        assert!(board.columns[2].cards.is_empty());
    }

    #[test]
    fn test_normalize_trims_card_titles() {
        let mut board: Board = serde_json::from_str(
            r#"{"columns": [{"id": "col_a", "title": " A ", "cards": [{"id": "c_a", "title": "  Padded  "}]}]}"#,
        )
        .unwrap();

        board.normalize(&mut SequentialIds::new());

        assert_eq!(board.columns[0].title, "A");
        assert_eq!(board.columns[0].cards[0].title, "Padded");
    }

    #[test]
    fn test_normalize_skips_fresh_ids_already_taken() {
        let mut board: Board = serde_json::from_str(
            r#"{"columns": [
                {"id": "col_1", "title": "A", "cards": [{"id": "c_2", "title": "x"}]},
                {"id": "col_1", "title": "B", "cards": [{"id": "c_2", "title": "y"}]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(board.normalize(&mut SequentialIds::new()), 2);

        assert_eq!(board.columns[0].id.as_str(), "col_1");
        assert_ne!(board.columns[1].id.as_str(), "col_1");
        assert_eq!(board.columns[0].cards[0].id.as_str(), "c_2");
        assert_ne!(board.columns[1].cards[0].id.as_str(), "c_2");
    }

    #[test]
    fn test_normalize_leaves_valid_board_alone() {
        let original = board();
        let mut board = original.clone();
        assert_eq!(board.normalize(&mut SequentialIds::new()), 0);
        assert_eq!(board, original);
    }
}
