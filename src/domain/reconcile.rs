use crate::domain::{
    board::{Board, Column, ColumnId},
    card::{non_blank, Card, CardId},
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// A card as the view displays it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedCard {
    pub id: CardId,
    /// Displayed title, only used when the id is unknown
    pub title: String,
}

/// A column in its displayed position, with its cards in displayed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedColumn {
    pub id: ColumnId,
    pub title: String,
    pub cards: Vec<ReportedCard>,
}

/// The complete displayed order after an interaction (never a delta)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedOrder {
    pub columns: Vec<ReportedColumn>,
}

impl ReportedOrder {
    /// The order a freshly rendered view of `board` would report
    pub fn from_board(board: &Board) -> Self {
        Self {
            columns: board
                .columns
                .iter()
                .map(|col| ReportedColumn {
                    id: col.id.clone(),
                    title: col.title.clone(),
                    cards: col
                        .cards
                        .iter()
                        .map(|card| ReportedCard {
                            id: card.id.clone(),
                            title: card.title.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Moves a card to `index` within the target column, clamped to its length.
    ///
    /// Returns false when either the card or the target column is absent.
    pub fn move_card(&mut self, card_id: &CardId, to: &ColumnId, index: usize) -> bool {
        let Some(target) = self.columns.iter().position(|col| &col.id == to) else {
            return false;
        };
        let Some((from, pos)) = self.columns.iter().enumerate().find_map(|(ci, col)| {
            col.cards
                .iter()
                .position(|card| &card.id == card_id)
                .map(|pos| (ci, pos))
        }) else {
            return false;
        };

        let card = self.columns[from].cards.remove(pos);
        let cards = &mut self.columns[target].cards;
        cards.insert(index.min(cards.len()), card);
        true
    }

    /// Moves a column to `index`, clamped to the column count
    pub fn move_column(&mut self, column_id: &ColumnId, index: usize) -> bool {
        let Some(pos) = self.columns.iter().position(|col| &col.id == column_id) else {
            return false;
        };
        let col = self.columns.remove(pos);
        let index = index.min(self.columns.len());
        self.columns.insert(index, col);
        true
    }
}

/// Builds the board described by `order`, taking card payloads from `previous`.
///
/// The view knows positions and identifiers but not the card payload, so each
/// card is looked up by id in the previous board. Columns appear exactly as
/// reported, so a column missing from the report is dropped. An unknown card
/// id gets a bare card built from its displayed title. Blank ids and ids
/// already emitted earlier in the report are skipped, keeping every id unique.
pub fn reconcile(previous: &Board, order: &ReportedOrder) -> Board {
    let mut known: HashMap<&CardId, &Card> = HashMap::with_capacity(previous.card_count());
    for card in previous.columns.iter().flat_map(|col| col.cards.iter()) {
        known.entry(&card.id).or_insert(card);
    }

    let mut seen_columns: HashSet<&ColumnId> = HashSet::new();
    let mut seen_cards: HashSet<&CardId> = HashSet::new();
    let mut columns = Vec::with_capacity(order.columns.len());

    for reported in &order.columns {
        if reported.id.is_blank() || !seen_columns.insert(&reported.id) {
            warn!(column = %reported.id, "reported column id blank or repeated; skipping");
            continue;
        }

        let title = non_blank(&reported.title)
            .or_else(|| previous.find_column(&reported.id).map(|c| c.title.clone()))
            .unwrap_or_else(|| Column::FALLBACK_TITLE.to_string());

        let mut cards = Vec::with_capacity(reported.cards.len());
        for card in &reported.cards {
            if card.id.is_blank() || !seen_cards.insert(&card.id) {
                warn!(
                    card = %card.id,
                    column = %reported.id,
                    "reported card id blank or repeated; skipping"
                );
                continue;
            }

            match known.get(&card.id) {
                Some(existing) => cards.push((*existing).clone()),
                None => {
                    warn!(
                        card = %card.id,
                        column = %reported.id,
                        "reported card not on board; synthesizing"
                    );
                    cards.push(Card::new(card.id.clone(), &card.title));
                }
            }
        }

        columns.push(Column {
            id: reported.id.clone(),
            title,
            cards,
        });
    }

    Board::new(columns)
}
