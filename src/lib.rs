//! # Kanban Mini Core
//!
//! Board state model for a single-board kanban tracker.
//!
//! The crate keeps one canonical [`Board`] inside a [`BoardStore`], persists
//! it through a key-value [`Storage`], rebuilds it from the order a view
//! reports after a drag ([`reconcile`]), and exports or imports JSON
//! snapshots. Rendering, dialogs and file pickers stay outside; they talk to
//! the store through plain calls and the [`Confirm`] port.

pub mod config;
pub mod domain;
pub mod error;
pub mod interaction;
pub mod snapshot;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use config::KanbanConfig;
pub use domain::{
    board::{Board, Column, ColumnId},
    card::{Card, CardId, CardPatch},
    ids::{IdGenerator, RandomIds, SequentialIds},
    reconcile::{reconcile, ReportedCard, ReportedColumn, ReportedOrder},
};
pub use error::{KanbanError, Result};
pub use interaction::{AlwaysConfirm, Confirm, DestructiveAction};
pub use storage::Storage;
pub use store::BoardStore;
