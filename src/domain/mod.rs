pub mod board;
pub mod card;
mod fields;
pub mod ids;
pub mod reconcile;

pub use board::{Board, Column, ColumnId};
pub use card::{Card, CardId, CardPatch};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use reconcile::{reconcile, ReportedCard, ReportedColumn, ReportedOrder};
